//! Jurisdiction lookup and conditional address resolution.

mod jurisdiction;
mod resolver;

pub use jurisdiction::{JurisdictionTable, Location};
pub use resolver::{
    AddressCondition, AddressResolver, AddressTemplates, ConditionalAddressKey,
    validate_conditional_keys,
};
