//! Certificate field transformation and fee tiers.
//!
//! `certfill` turns a civil-registration [`Record`] and a declarative
//! [`TemplateDefinition`] into a flat [`FieldMap`], then compiles that map into
//! a render-ready markup or document template. Separately, the [`fees`] module
//! prices a certificate from the days elapsed since the event.

pub mod address;
pub mod config;
pub mod error;
pub mod fees;
pub mod format;
pub mod parser;
pub mod pipeline;
pub mod template;
pub mod transform;
pub mod types;

pub use address::{
    AddressCondition, AddressResolver, AddressTemplates, ConditionalAddressKey, JurisdictionTable,
    Location,
};
pub use error::{
    CertificateError, CompileIntegrityError, ConfigurationError, FieldResolutionError,
    FormatError, LoadError,
};
pub use fees::{EventType, FeeSchedule, FeeTierResult, PriceRange, TierMessageKey, format_fee};
pub use format::{DigitMap, Locale};
pub use pipeline::compose;
pub use template::{
    LintWarning, RenderableTemplate, RenderedBody, TemplateBody, TemplateDefinition, compile,
    lint_definition,
};
pub use transform::{
    ApplicantNameParams, DEFAULT_HOME_COUNTRY, DateFieldParams, FieldValueParams,
    IdentifierParams, NameFormat, NumberConversionParams, OfflineAddressParams, Operation,
    TransformEngine, TransformerRule, box_rules,
};
pub use types::{Field, FieldMap, Record};

/// Creates a [`FieldMap`] from name-value pairs.
///
/// Values are converted with `Into<String>`.
///
/// # Example
///
/// ```
/// use certfill::fields;
///
/// let f = fields! { "amount" => "5.00", "tier" => "withinChargeRange" };
/// assert_eq!(f.len(), 2);
/// assert_eq!(f.get("amount"), Some("5.00"));
/// ```
#[macro_export]
macro_rules! fields {
    {} => {
        $crate::FieldMap::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        $crate::FieldMap::new()
            $(.with($key, $value))+
    };
}
