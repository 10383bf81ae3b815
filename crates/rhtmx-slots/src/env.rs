// File: src/env.rs
// Purpose: Collaborators shared by a component type and everything derived from it

use crate::args::CONTENT_ARG;
use crate::config::Config;
use crate::inflection::{EnglishPluralizer, Pluralizer};
use once_cell::sync::Lazy;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

static DEFAULT_ENV: Lazy<Arc<SlotEnv>> = Lazy::new(|| Arc::new(SlotEnv::default()));

/// Pluralizer and reserved names used when declaring slots
pub struct SlotEnv {
    pluralizer: Arc<dyn Pluralizer>,
    reserved: BTreeSet<String>,
}

impl SlotEnv {
    pub fn new(pluralizer: impl Pluralizer + 'static) -> Self {
        Self {
            pluralizer: Arc::new(pluralizer),
            reserved: BTreeSet::from([CONTENT_ARG.to_string()]),
        }
    }

    /// Environment built from the `[registry]` and `[inflection]` sections
    pub fn from_config(config: &Config) -> Self {
        let mut pluralizer = EnglishPluralizer::new();
        for (singular, plural) in &config.inflection.irregular {
            pluralizer = pluralizer.with_irregular(singular, plural);
        }
        for word in &config.inflection.uncountable {
            pluralizer = pluralizer.with_uncountable(word);
        }

        let mut env = Self::new(pluralizer);
        for name in &config.registry.reserved_names {
            env = env.reserve(name);
        }
        env
    }

    /// Shared default environment
    pub fn shared() -> Arc<SlotEnv> {
        Arc::clone(&DEFAULT_ENV)
    }

    /// Reject `name` as a slot name
    pub fn reserve(mut self, name: impl Into<String>) -> Self {
        self.reserved.insert(name.into());
        self
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn pluralize(&self, name: &str) -> String {
        self.pluralizer.pluralize(name)
    }
}

impl Default for SlotEnv {
    fn default() -> Self {
        Self::new(EnglishPluralizer::new())
    }
}

impl fmt::Debug for SlotEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotEnv")
            .field("reserved", &self.reserved)
            .finish_non_exhaustive()
    }
}
