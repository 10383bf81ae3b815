// File: src/registry.rs
// Purpose: Per-type slot registry, slot configuration and nested type namespace

use crate::content::{short_type_name, ContentClass, FromSlotArgs, InlineClass, SlotContent};
use crate::error::{Result, SlotError};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::fmt;

/// Where a slot's content class comes from
#[derive(Debug, Clone)]
pub enum ClassSource {
    /// The base slot content type
    Default,
    /// A class handle supplied at declaration
    Direct(ContentClass),
    /// A name looked up in the component type's namespace at first use
    Named(String),
}

/// Declaration of one slot, consumed by `ComponentType::declare_slot`
pub struct SlotDecl {
    pub(crate) name: String,
    pub(crate) collection: bool,
    pub(crate) class: ClassSource,
    pub(crate) inline: Option<Box<dyn FnOnce(&mut InlineClass)>>,
}

impl SlotDecl {
    /// A singular slot
    pub fn one(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: false,
            class: ClassSource::Default,
            inline: None,
        }
    }

    /// A collection slot
    pub fn many(name: impl Into<String>) -> Self {
        Self {
            collection: true,
            ..Self::one(name)
        }
    }

    pub fn collection(mut self, collection: bool) -> Self {
        self.collection = collection;
        self
    }

    /// Use a Rust type as the content class
    pub fn of<T: SlotContent + FromSlotArgs>(self) -> Self {
        self.class(ContentClass::of::<T>())
    }

    pub fn class(mut self, class: ContentClass) -> Self {
        self.class = ClassSource::Direct(class);
        self.inline = None;
        self
    }

    /// Refer to a content class by name; resolved when the slot is first written
    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class = ClassSource::Named(name.into());
        self.inline = None;
        self
    }

    /// Build an anonymous content class from an inline body
    pub fn inline(mut self, body: impl FnOnce(&mut InlineClass) + 'static) -> Self {
        self.inline = Some(Box::new(body));
        self
    }
}

/// Configuration of one registered slot
#[derive(Debug)]
pub struct SlotConfig {
    name: String,
    accessor_name: String,
    storage_key: String,
    collection: bool,
    source: ClassSource,
    resolved: OnceCell<ContentClass>,
}

impl SlotConfig {
    pub(crate) fn new(name: String, accessor_name: String, collection: bool, source: ClassSource) -> Self {
        let resolved = OnceCell::new();
        match &source {
            ClassSource::Default => {
                let _ = resolved.set(ContentClass::base());
            }
            ClassSource::Direct(class) => {
                let _ = resolved.set(class.clone());
            }
            ClassSource::Named(_) => {}
        }

        Self {
            storage_key: storage_key(&name),
            name,
            accessor_name,
            collection,
            source,
            resolved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the combined get/set accessor
    pub fn accessor_name(&self) -> &str {
        &self.accessor_name
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    pub fn source(&self) -> &ClassSource {
        &self.source
    }

    /// Whether the content class has been resolved and cached
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Resolve and validate the content class, caching the first success
    pub(crate) fn content_class(&self, component: &str, namespace: &Namespace) -> Result<&ContentClass> {
        self.resolved.get_or_try_init(|| {
            let ClassSource::Named(class) = &self.source else {
                return Ok(ContentClass::base());
            };
            match namespace.get(class) {
                Some(NestedType::Content(found)) => {
                    tracing::debug!(component, slot = %self.name, class = %class, "resolved slot content class");
                    Ok(found.clone())
                }
                Some(NestedType::Other { .. }) => {
                    tracing::warn!(component, slot = %self.name, class = %class, "slot content class is not SlotContent");
                    Err(SlotError::InvalidContentClass {
                        component: component.to_string(),
                        slot: self.name.clone(),
                        class: class.clone(),
                    })
                }
                None => Err(SlotError::UndefinedContentClass {
                    component: component.to_string(),
                    slot: self.name.clone(),
                    class: class.clone(),
                }),
            }
        })
    }
}

// A copy resolves named classes again against its own namespace
impl Clone for SlotConfig {
    fn clone(&self) -> Self {
        Self::new(
            self.name.clone(),
            self.accessor_name.clone(),
            self.collection,
            self.source.clone(),
        )
    }
}

/// Storage key of a slot in the instance store
pub fn storage_key(name: &str) -> String {
    format!("slot:{}", name)
}

/// Slot name -> configuration, owned by one component type
#[derive(Debug, Clone, Default)]
pub struct SlotRegistry {
    slots: BTreeMap<String, SlotConfig>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&SlotConfig> {
        self.slots.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.slots.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotConfig> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn insert(&mut self, config: SlotConfig) {
        self.slots.insert(config.name.clone(), config);
    }
}

/// A type defined inside a component type's namespace
#[derive(Clone)]
pub enum NestedType {
    Content(ContentClass),
    Other { type_name: String },
}

impl NestedType {
    pub fn is_slot_content(&self) -> bool {
        matches!(self, NestedType::Content(_))
    }
}

impl fmt::Debug for NestedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NestedType::Content(class) => write!(f, "Content({})", class.name()),
            NestedType::Other { type_name } => write!(f, "Other({})", type_name),
        }
    }
}

/// Named types visible to slot declarations of a component type
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    types: BTreeMap<String, NestedType>,
}

impl Namespace {
    pub fn get(&self, name: &str) -> Option<&NestedType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub(crate) fn define_content(&mut self, name: impl Into<String>, class: ContentClass) {
        self.types.insert(name.into(), NestedType::Content(class));
    }

    pub(crate) fn define_other<T: ?Sized>(&mut self, name: impl Into<String>) {
        self.types.insert(
            name.into(),
            NestedType::Other {
                type_name: short_type_name::<T>(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BaseSlot;

    #[test]
    fn test_storage_key_is_derived_from_name() {
        let config = SlotConfig::new("title".into(), "title".into(), false, ClassSource::Default);
        assert_eq!(config.storage_key(), "slot:title");
        assert!(config.is_resolved());
    }

    #[test]
    fn test_named_class_resolves_lazily_and_caches() {
        let config = SlotConfig::new("tab".into(), "tabs".into(), true, ClassSource::Named("Tab".into()));
        assert!(!config.is_resolved());

        let mut namespace = Namespace::default();
        assert!(matches!(
            config.content_class("Card", &namespace),
            Err(SlotError::UndefinedContentClass { .. })
        ));
        assert!(!config.is_resolved());

        namespace.define_content("Tab", ContentClass::named::<BaseSlot>("Tab"));
        assert_eq!(config.content_class("Card", &namespace).unwrap().name(), "Tab");
        assert!(config.is_resolved());
    }

    #[test]
    fn test_non_content_type_is_rejected() {
        struct Helper;
        let mut namespace = Namespace::default();
        namespace.define_other::<Helper>("Helper");
        let config = SlotConfig::new("tab".into(), "tabs".into(), true, ClassSource::Named("Helper".into()));
        let err = config.content_class("Card", &namespace).unwrap_err();
        assert!(err.to_string().starts_with("Helper must implement SlotContent"));
    }

    #[test]
    fn test_clone_drops_cached_named_class() {
        let config = SlotConfig::new("tab".into(), "tabs".into(), true, ClassSource::Named("Tab".into()));
        let mut namespace = Namespace::default();
        namespace.define_content("Tab", ContentClass::named::<BaseSlot>("Tab"));
        config.content_class("Card", &namespace).unwrap();

        let copy = config.clone();
        assert!(config.is_resolved());
        assert!(!copy.is_resolved());
        assert_eq!(copy.storage_key(), "slot:tab");
        assert!(copy.is_collection());
    }

    #[test]
    fn test_cloned_registry_is_independent() {
        let mut parent = SlotRegistry::new();
        parent.insert(SlotConfig::new("title".into(), "title".into(), false, ClassSource::Default));
        let mut child = parent.clone();
        child.insert(SlotConfig::new("footer".into(), "footer".into(), false, ClassSource::Default));
        assert_eq!(parent.names(), vec!["title".to_string()]);
        assert_eq!(child.names(), vec!["footer".to_string(), "title".to_string()]);
    }
}
