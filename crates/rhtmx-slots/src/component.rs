// File: src/component.rs
// Purpose: Component types: slot declaration, inheritance and generated accessors

use crate::content::{ContentClass, FromSlotArgs, InlineClass, SlotContent};
use crate::env::SlotEnv;
use crate::error::{Result, SlotError};
use crate::instance::{Accessed, Component};
use crate::args::SlotCall;
use crate::registry::{ClassSource, Namespace, SlotConfig, SlotDecl, SlotRegistry};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Signature shared by every generated accessor
pub type AccessorFn =
    dyn for<'c, 'b> Fn(&'c mut Component, SlotCall<'b>) -> Result<Accessed<'c>> + Send + Sync;

fn accessor_fn<F>(f: F) -> Arc<AccessorFn>
where
    F: for<'c, 'b> Fn(&'c mut Component, SlotCall<'b>) -> Result<Accessed<'c>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// What a generated accessor does when called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    /// Reads on an empty call, writes otherwise
    GetOrSet,
    /// Appends one member to a collection slot, even on an empty call
    Append,
}

/// An accessor installed on a component type by a slot declaration
#[derive(Clone)]
pub struct Accessor {
    slot: String,
    kind: AccessorKind,
    call: Arc<AccessorFn>,
}

impl Accessor {
    fn get_or_set(slot: &str) -> Self {
        let target = slot.to_string();
        Self {
            slot: slot.to_string(),
            kind: AccessorKind::GetOrSet,
            call: accessor_fn(move |component, call| component.get_or_set(&target, call)),
        }
    }

    fn append(slot: &str) -> Self {
        let target = slot.to_string();
        Self {
            slot: slot.to_string(),
            kind: AccessorKind::Append,
            call: accessor_fn(move |component, call| {
                component.append(&target, call)?;
                Ok(Accessed::Written)
            }),
        }
    }

    /// Slot this accessor belongs to
    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn kind(&self) -> AccessorKind {
        self.kind
    }

    pub(crate) fn function(&self) -> Arc<AccessorFn> {
        Arc::clone(&self.call)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("slot", &self.slot)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A component type: its slot registry, nested types and accessor table.
///
/// Types are built up with `declare_slot` and friends, then wrapped in an
/// `Arc` and instantiated. `derive` copies everything into a new type, so
/// declarations made afterwards on either side stay on that side.
#[derive(Debug, Clone)]
pub struct ComponentType {
    name: String,
    lineage: Vec<String>,
    env: Arc<SlotEnv>,
    registry: SlotRegistry,
    namespace: Namespace,
    accessors: BTreeMap<String, Accessor>,
}

impl ComponentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_env(name, SlotEnv::shared())
    }

    pub fn with_env(name: impl Into<String>, env: Arc<SlotEnv>) -> Self {
        Self {
            name: name.into(),
            lineage: Vec::new(),
            env,
            registry: SlotRegistry::new(),
            namespace: Namespace::default(),
            accessors: BTreeMap::new(),
        }
    }

    /// Derive a subtype starting from a copy of this type's slots
    pub fn derive(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut lineage = self.lineage.clone();
        lineage.push(self.name.clone());
        tracing::debug!(parent = %self.name, component = %name, slots = self.registry.len(), "derived component type");

        Self {
            name,
            lineage,
            env: Arc::clone(&self.env),
            registry: self.registry.clone(),
            namespace: self.namespace.clone(),
            accessors: self.accessors.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct parent type name
    pub fn parent(&self) -> Option<&str> {
        self.lineage.last().map(String::as_str)
    }

    pub fn is_derived_from(&self, name: &str) -> bool {
        self.lineage.iter().any(|ancestor| ancestor == name)
    }

    pub fn env(&self) -> &SlotEnv {
        &self.env
    }

    /// Register a slot and install its accessors
    pub fn declare_slot(&mut self, decl: SlotDecl) -> Result<&SlotConfig> {
        let SlotDecl {
            name,
            collection,
            class,
            inline,
        } = decl;

        if self.env.is_reserved(&name) {
            return Err(SlotError::ReservedName {
                component: self.name.clone(),
                slot: name,
            });
        }
        if self.registry.contains(&name) {
            return Err(SlotError::DuplicateSlot {
                component: self.name.clone(),
                slot: name,
            });
        }

        let accessor_name = if collection {
            self.env.pluralize(&name)
        } else {
            name.clone()
        };
        if collection && accessor_name == name {
            return Err(SlotError::AccessorConflict {
                component: self.name.clone(),
                accessor: accessor_name,
                existing: name,
            });
        }
        for wanted in [Some(&accessor_name), collection.then_some(&name)].into_iter().flatten() {
            if let Some(existing) = self.accessors.get(wanted) {
                return Err(SlotError::AccessorConflict {
                    component: self.name.clone(),
                    accessor: wanted.clone(),
                    existing: existing.slot.clone(),
                });
            }
        }

        let source = match inline {
            Some(body) => ClassSource::Direct(ContentClass::inline(self.inline_class_name(&name), body)),
            None => class,
        };

        self.accessors
            .insert(accessor_name.clone(), Accessor::get_or_set(&name));
        if collection {
            self.accessors.insert(name.clone(), Accessor::append(&name));
        }

        tracing::debug!(
            component = %self.name,
            slot = %name,
            accessor = %accessor_name,
            collection,
            "declared slot"
        );
        self.registry
            .insert(SlotConfig::new(name.clone(), accessor_name, collection, source));
        self.config(&name)
    }

    /// Declare a singular slot holding [`BaseSlot`](crate::BaseSlot) content
    pub fn slot(&mut self, name: impl Into<String>) -> Result<&SlotConfig> {
        self.declare_slot(SlotDecl::one(name))
    }

    /// Declare a collection slot holding [`BaseSlot`](crate::BaseSlot) content
    pub fn collection(&mut self, name: impl Into<String>) -> Result<&SlotConfig> {
        self.declare_slot(SlotDecl::many(name))
    }

    /// Define a nested slot content class that declarations can name
    pub fn define_content_class<T: SlotContent + FromSlotArgs>(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.namespace
            .define_content(name.clone(), ContentClass::named::<T>(name));
        self
    }

    /// Define a nested content class from an inline body
    pub fn define_inline_class(
        &mut self,
        name: impl Into<String>,
        body: impl FnOnce(&mut InlineClass),
    ) -> &mut Self {
        let name = name.into();
        self.namespace
            .define_content(name.clone(), ContentClass::inline(name, body));
        self
    }

    /// Define a nested type that is not slot content
    pub fn define_type<T: ?Sized + 'static>(&mut self, name: impl Into<String>) -> &mut Self {
        self.namespace.define_other::<T>(name);
        self
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn slot_config(&self, name: &str) -> Option<&SlotConfig> {
        self.registry.get(name)
    }

    pub fn slot_names(&self) -> Vec<String> {
        self.registry.names()
    }

    pub fn accessor(&self, name: &str) -> Option<&Accessor> {
        self.accessors.get(name)
    }

    pub fn accessor_names(&self) -> Vec<String> {
        self.accessors.keys().cloned().collect()
    }

    /// Resolve and validate the content class of a slot
    pub fn content_class(&self, slot: &str) -> Result<&ContentClass> {
        self.resolve(self.config(slot)?)
    }

    /// Resolve every slot's content class now instead of on first write
    pub fn validate_slots(&self) -> Result<()> {
        for config in self.registry.iter() {
            self.resolve(config)?;
        }
        Ok(())
    }

    pub fn instantiate(self: &Arc<Self>) -> Component {
        Component::new(Arc::clone(self))
    }

    pub(crate) fn resolve<'c>(&self, config: &'c SlotConfig) -> Result<&'c ContentClass> {
        config.content_class(&self.name, &self.namespace)
    }

    pub(crate) fn config(&self, slot: &str) -> Result<&SlotConfig> {
        self.registry.get(slot).ok_or_else(|| self.unknown_slot(slot))
    }

    pub(crate) fn unknown_slot(&self, slot: &str) -> SlotError {
        SlotError::UnknownSlot {
            component: self.name.clone(),
            slot: slot.to_string(),
            available: self.registry.names(),
        }
    }

    fn inline_class_name(&self, slot: &str) -> String {
        let camel: String = slot
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect();
        format!("{}::{}Slot", self.name, camel)
    }
}
