// File: src/inflection.rs
// Purpose: Pluralization of collection slot names into accessor names

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Turns a slot name into the plural accessor name of a collection slot
pub trait Pluralizer: Send + Sync {
    fn pluralize(&self, word: &str) -> String;
}

// Checked last to first, so more specific rules come later
static PLURAL_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"$", "s"),
        (r"s$", "s"),
        (r"^(ax|test)is$", "${1}es"),
        (r"(octop|vir)(us|i)$", "${1}i"),
        (r"(alias|status)$", "${1}es"),
        (r"(bu)s$", "${1}ses"),
        (r"(buffal|tomat)o$", "${1}oes"),
        (r"([ti])um$", "${1}a"),
        (r"([ti])a$", "${1}a"),
        (r"sis$", "ses"),
        (r"(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(hive)$", "${1}s"),
        (r"([^aeiouy]|qu)y$", "${1}ies"),
        (r"(x|ch|ss|sh)$", "${1}es"),
        (r"(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"^(m|l)ouse$", "${1}ice"),
        (r"^(ox)$", "${1}en"),
        (r"^(oxen)$", "${1}"),
        (r"(quiz)$", "${1}zes"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (Regex::new(pattern).expect("invalid plural rule"), replacement)
    })
    .collect()
});

const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// English pluralizer with the usual irregular and uncountable words.
///
/// Only the last `_`-separated segment of an identifier is inflected, so
/// `nav_item` becomes `nav_items` and `team_person` becomes `team_people`.
#[derive(Debug, Clone)]
pub struct EnglishPluralizer {
    irregular: HashMap<String, String>,
    uncountable: HashSet<String>,
}

impl EnglishPluralizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULARS
                .iter()
                .map(|(singular, plural)| (singular.to_string(), plural.to_string()))
                .collect(),
            uncountable: UNCOUNTABLES.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn with_irregular(mut self, singular: impl Into<String>, plural: impl Into<String>) -> Self {
        self.irregular.insert(singular.into(), plural.into());
        self
    }

    pub fn with_uncountable(mut self, word: impl Into<String>) -> Self {
        self.uncountable.insert(word.into());
        self
    }

    fn pluralize_word(&self, word: &str) -> String {
        if word.is_empty() || self.uncountable.contains(word) {
            return word.to_string();
        }
        if let Some(plural) = self.irregular.get(word) {
            return plural.clone();
        }
        for (rule, replacement) in PLURAL_RULES.iter().rev() {
            if rule.is_match(word) {
                return rule.replace(word, *replacement).into_owned();
            }
        }
        word.to_string()
    }
}

impl Default for EnglishPluralizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pluralizer for EnglishPluralizer {
    fn pluralize(&self, word: &str) -> String {
        match word.rsplit_once('_') {
            Some((prefix, last)) => format!("{}_{}", prefix, self.pluralize_word(last)),
            None => self.pluralize_word(word),
        }
    }
}
