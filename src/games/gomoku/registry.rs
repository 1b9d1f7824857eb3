//! Static registry of variants keyed by their stable name.

use super::variant::VariantRules;
use super::variants::{Freestyle, Pro, Tiny};
use derive_more::Display;
use std::collections::BTreeMap;
use std::sync::Arc;
use strum::{EnumIter, EnumString, IntoEnumIterator};
use tracing::{debug, instrument, warn};

/// Every ruleset the crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum VariantKind {
    /// Unrestricted play on 15x15.
    Freestyle,
    /// Center opening with a distance rule on 19x19.
    Pro,
    /// Small board for exercising the engine.
    Tiny,
}

impl VariantKind {
    /// Builds the ruleset for this kind.
    pub fn rules(self) -> Arc<dyn VariantRules> {
        match self {
            VariantKind::Freestyle => Arc::new(Freestyle::new()),
            VariantKind::Pro => Arc::new(Pro::new()),
            VariantKind::Tiny => Arc::new(Tiny::new()),
        }
    }
}

/// No variant is registered under the name.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("Unknown variant '{}'", name)]
pub struct UnknownVariant {
    /// Requested name.
    pub name: String,
}

impl std::error::Error for UnknownVariant {}

/// Lookup table from variant name to rules.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    variants: BTreeMap<String, Arc<dyn VariantRules>>,
}

impl VariantRegistry {
    /// Registry holding every shipped variant.
    #[instrument]
    pub fn standard() -> Self {
        let variants = VariantKind::iter()
            .map(|kind| (kind.as_ref().to_string(), kind.rules()))
            .collect();
        Self { variants }
    }

    /// Registry restricted to the named variants.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] for the first name that is not shipped.
    #[instrument(skip(names))]
    pub fn only<I, S>(names: I) -> Result<Self, UnknownVariant>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut variants = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let kind: VariantKind = name.parse().map_err(|_| {
                warn!(name, "Variant not shipped");
                UnknownVariant {
                    name: name.to_string(),
                }
            })?;
            variants.insert(kind.as_ref().to_string(), kind.rules());
        }
        debug!(count = variants.len(), "Registry restricted");
        Ok(Self { variants })
    }

    /// Rules registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn VariantRules>> {
        self.variants.get(name).cloned()
    }

    /// Rules registered under `name`, or an error naming it.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] if nothing is registered under `name`.
    pub fn require(&self, name: &str) -> Result<Arc<dyn VariantRules>, UnknownVariant> {
        self.get(name).ok_or_else(|| UnknownVariant {
            name: name.to_string(),
        })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.variants.keys().map(String::as_str).collect()
    }

    /// Registered rulesets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn VariantRules>> {
        self.variants.values()
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_all_variants() {
        let registry = VariantRegistry::standard();
        assert_eq!(registry.names(), vec!["freestyle", "pro", "tiny"]);
    }

    #[test]
    fn test_names_match_configs() {
        let registry = VariantRegistry::standard();
        for name in registry.names() {
            let rules = registry.get(name).unwrap();
            assert_eq!(rules.config().name(), name);
        }
    }

    #[test]
    fn test_only_rejects_unknown() {
        let err = VariantRegistry::only(["freestyle", "renju"]).unwrap_err();
        assert_eq!(err.name, "renju");
    }

    #[test]
    fn test_only_restricts() {
        let registry = VariantRegistry::only(["pro"]).unwrap();
        assert_eq!(registry.names(), vec!["pro"]);
        assert!(registry.get("freestyle").is_none());
    }
}
