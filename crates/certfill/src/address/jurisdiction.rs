//! Administrative location hierarchy.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::format::primary_language;

/// Maximum parent chain length followed by [`JurisdictionTable::hierarchy`].
const MAX_DEPTH: usize = 16;

/// One administrative location (country, state, district, health facility...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    /// Default display name.
    pub name: String,
    /// Display names keyed by primary language subtag.
    #[serde(default)]
    pub alternative_names: BTreeMap<String, String>,
    /// Id of the enclosing jurisdiction.
    #[serde(default)]
    pub parent: Option<String>,
    /// Jurisdiction level, e.g. "STATE" or "DISTRICT".
    #[serde(default)]
    pub kind: Option<String>,
}

impl Location {
    /// The display name for a language, falling back to the default name.
    pub fn display_name(&self, language: &str) -> &str {
        self.alternative_names
            .get(primary_language(language))
            .unwrap_or(&self.name)
    }
}

/// Locations indexed by id.
///
/// Deserializes from a JSON list of [`Location`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<Location>")]
pub struct JurisdictionTable {
    locations: HashMap<String, Location>,
}

impl JurisdictionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location, replacing any location with the same id.
    pub fn insert(&mut self, location: Location) {
        self.locations.insert(location.id.clone(), location);
    }

    /// Look up a location by id.
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the table has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The localized display name for a location id.
    pub fn display_name(&self, id: &str, language: &str) -> Option<&str> {
        self.get(id).map(|location| location.display_name(language))
    }

    /// The location and its ancestors, innermost first.
    ///
    /// Stops at unknown parents, at cycles and after a bounded depth.
    pub fn hierarchy(&self, id: &str) -> Vec<&Location> {
        let mut chain: Vec<&Location> = Vec::new();
        let mut next = self.get(id);
        while let Some(location) = next {
            if chain.len() >= MAX_DEPTH || chain.iter().any(|seen| seen.id == location.id) {
                break;
            }
            chain.push(location);
            next = location.parent.as_deref().and_then(|parent| self.get(parent));
        }
        chain
    }

    /// The location and its ancestors joined with `", "`, innermost first.
    pub fn full_name(&self, id: &str, language: &str) -> Option<String> {
        let chain = self.hierarchy(id);
        if chain.is_empty() {
            return None;
        }
        Some(
            chain
                .iter()
                .map(|location| location.display_name(language))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl From<Vec<Location>> for JurisdictionTable {
    fn from(locations: Vec<Location>) -> Self {
        locations.into_iter().collect()
    }
}

impl FromIterator<Location> for JurisdictionTable {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        Self {
            locations: iter
                .into_iter()
                .map(|location| (location.id.clone(), location))
                .collect(),
        }
    }
}
