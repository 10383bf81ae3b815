// File: src/store.rs
// Purpose: Per-instance storage of slot content

use crate::content::SlotContent;
use std::collections::HashMap;

/// What a slot holds once it has been written
#[derive(Debug)]
pub enum StoredSlot {
    One(Box<dyn SlotContent>),
    Many(Vec<Box<dyn SlotContent>>),
}

/// Storage key -> slot content for one component instance.
///
/// Entries only exist after the first write; nothing here creates an entry
/// on read.
#[derive(Debug, Default)]
pub struct SlotStore {
    entries: HashMap<String, StoredSlot>,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StoredSlot> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the content of a singular slot
    pub(crate) fn put(&mut self, key: &str, content: Box<dyn SlotContent>) {
        self.entries.insert(key.to_string(), StoredSlot::One(content));
    }

    /// Append to a collection slot, creating it on first write
    pub(crate) fn append(&mut self, key: &str, contents: Vec<Box<dyn SlotContent>>) {
        let entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| StoredSlot::Many(Vec::new()));
        match entry {
            StoredSlot::Many(items) => items.extend(contents),
            StoredSlot::One(_) => *entry = StoredSlot::Many(contents),
        }
    }
}

/// Result of reading a slot
#[derive(Debug, Clone, Copy)]
pub enum SlotRead<'a> {
    One(Option<&'a dyn SlotContent>),
    Many(&'a [Box<dyn SlotContent>]),
}

impl<'a> SlotRead<'a> {
    /// Content of a singular slot
    pub fn one(self) -> Option<&'a dyn SlotContent> {
        match self {
            SlotRead::One(content) => content,
            SlotRead::Many(_) => None,
        }
    }

    /// Contents of a collection slot
    pub fn many(self) -> &'a [Box<dyn SlotContent>] {
        match self {
            SlotRead::Many(items) => items,
            SlotRead::One(_) => &[],
        }
    }

    /// True when nothing has been written
    pub fn is_empty(&self) -> bool {
        match self {
            SlotRead::One(content) => content.is_none(),
            SlotRead::Many(items) => items.is_empty(),
        }
    }

    /// The `content` values, in write order
    pub fn content_strs(&self) -> Vec<Option<&'a str>> {
        match *self {
            SlotRead::One(content) => vec![content.and_then(|c| c.content_str())],
            SlotRead::Many(items) => items.iter().map(|c| c.content_str()).collect(),
        }
    }
}
