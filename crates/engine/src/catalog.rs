//! The option catalog: for every category, which games and cores can be
//! picked. It's built once by the backend and shipped to the node as a JSON
//! blob in a hidden control.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use util::debug_log_error;

use crate::errors::CatalogParseError;

/// The games and cores available for one category.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryOptions {
    #[serde(default)]
    pub roms: Vec<String>,
    #[serde(default)]
    pub cores: Vec<String>,
}

/// Category name to [CategoryOptions].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct OptionCatalog {
    categories: BTreeMap<String, CategoryOptions>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog blob.
    pub fn parse(json: &str) -> Result<Self, CatalogParseError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Parse a catalog blob, logging (and swallowing) a failure. A node with
    /// no catalog keeps its controls as they were created.
    pub fn from_blob(json: &str) -> Option<Self> {
        Self::parse(json)
            .inspect_err(|e| debug_log_error!("{e}. Raw: {json}"))
            .ok()
    }

    pub fn get(&self, category: &str) -> Option<&CategoryOptions> {
        self.categories.get(category)
    }

    pub fn insert(&mut self, category: impl Into<String>, options: CategoryOptions) {
        self.categories.insert(category.into(), options);
    }

    /// Iterate over the categories in name order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &CategoryOptions)> {
        self.categories
            .iter()
            .map(|(name, options)| (name.as_str(), options))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every game entry across all categories, sorted and deduplicated.
    pub fn all_roms(&self) -> Vec<String> {
        Self::union(self.categories.values().map(|options| &options.roms))
    }

    /// Every core entry across all categories, sorted and deduplicated.
    pub fn all_cores(&self) -> Vec<String> {
        Self::union(self.categories.values().map(|options| &options.cores))
    }

    fn union<'a>(lists: impl Iterator<Item = &'a Vec<String>>) -> Vec<String> {
        let mut all: Vec<String> = lists.flatten().cloned().collect();
        all.sort();
        all.dedup();
        all
    }

    /// Serialize into the blob format [OptionCatalog::parse] reads. Falls back
    /// to an empty object if serialization somehow fails.
    pub fn to_blob(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            debug_log_error!("Failed to serialize the option catalog: {e}");
            "{}".to_string()
        })
    }
}

impl FromIterator<(String, CategoryOptions)> for OptionCatalog {
    fn from_iter<I: IntoIterator<Item = (String, CategoryOptions)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
