// File: src/instance.rs
// Purpose: Component instances: reading and writing slot content

use crate::args::{SlotArgs, SlotCall, CONTENT_ARG};
use crate::capture::{BufferCapture, ContentBlock, ViewContext};
use crate::component::ComponentType;
use crate::content::SlotContent;
use crate::error::{Result, SlotError};
use crate::registry::SlotConfig;
use crate::store::{SlotRead, SlotStore, StoredSlot};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Outcome of an accessor call
#[derive(Debug, Clone, Copy)]
pub enum Accessed<'a> {
    Read(SlotRead<'a>),
    Written,
}

impl<'a> Accessed<'a> {
    pub fn read(self) -> Option<SlotRead<'a>> {
        match self {
            Accessed::Read(read) => Some(read),
            Accessed::Written => None,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Accessed::Written)
    }
}

/// One instance of a component type, holding its own slot content
pub struct Component {
    ty: Arc<ComponentType>,
    store: SlotStore,
    view: Box<dyn ViewContext>,
}

impl Component {
    pub fn new(ty: Arc<ComponentType>) -> Self {
        Self::with_view_context(ty, BufferCapture)
    }

    /// Instance whose content blocks are captured by `view`
    pub fn with_view_context(ty: Arc<ComponentType>, view: impl ViewContext + 'static) -> Self {
        Self {
            ty,
            store: SlotStore::new(),
            view: Box::new(view),
        }
    }

    pub fn component_type(&self) -> &Arc<ComponentType> {
        &self.ty
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Invoke a generated accessor by name
    pub fn call(&mut self, accessor: &str, call: SlotCall<'_>) -> Result<Accessed<'_>> {
        let f = match self.ty.accessor(accessor) {
            Some(found) => found.function(),
            None => return Err(self.ty.unknown_slot(accessor)),
        };
        f(self, call)
    }

    /// Read a slot: the stored content, `None`, or an empty collection
    pub fn get_slot(&self, name: &str) -> Result<SlotRead<'_>> {
        let config = self.ty.config(name)?;
        tracing::trace!(component = %self.ty.name(), slot = name, "read slot");

        let read = match self.store.get(config.storage_key()) {
            Some(StoredSlot::One(content)) => SlotRead::One(Some(&**content)),
            Some(StoredSlot::Many(items)) => SlotRead::Many(items),
            None if config.is_collection() => SlotRead::Many(&[]),
            None => SlotRead::One(None),
        };
        Ok(read)
    }

    /// Write one content object into a slot
    pub fn set_slot(&mut self, name: &str, call: SlotCall<'_>) -> Result<()> {
        let ty = Arc::clone(&self.ty);
        let config = ty.config(name)?;
        let SlotCall { args, block } = call;
        self.write(config, vec![args], block)
    }

    /// Combined accessor behaviour: read on an empty call, write otherwise.
    ///
    /// On a collection slot, a single positional argument holding a non-empty
    /// array writes one member per element, sharing the named arguments and
    /// the block.
    pub fn get_or_set(&mut self, name: &str, call: SlotCall<'_>) -> Result<Accessed<'_>> {
        if call.is_read() {
            return self.get_slot(name).map(Accessed::Read);
        }

        let ty = Arc::clone(&self.ty);
        let config = ty.config(name)?;
        let SlotCall { args, block } = call;

        let writes = if config.is_collection() {
            split_seeds(args)
        } else {
            vec![args]
        };
        self.write(config, writes, block)?;
        Ok(Accessed::Written)
    }

    /// Append one member to a collection slot; always a write
    pub fn append(&mut self, name: &str, call: SlotCall<'_>) -> Result<()> {
        self.set_slot(name, call)
    }

    /// Typed content of a singular slot
    pub fn slot<T: SlotContent>(&self, name: &str) -> Result<Option<&T>> {
        Ok(self.get_slot(name)?.one().and_then(|content| content.downcast_ref::<T>()))
    }

    /// Typed contents of a collection slot, skipping members of other types
    pub fn slots<T: SlotContent>(&self, name: &str) -> Result<Vec<&T>> {
        Ok(self
            .get_slot(name)?
            .many()
            .iter()
            .filter_map(|content| content.downcast_ref::<T>())
            .collect())
    }

    /// Whether a slot has been written at least once
    pub fn is_slot_set(&self, name: &str) -> Result<bool> {
        let config = self.ty.config(name)?;
        Ok(self.store.contains(config.storage_key()))
    }

    /// Build every content object first, then commit them together, so a
    /// failure leaves the store untouched.
    fn write(
        &mut self,
        config: &SlotConfig,
        writes: Vec<SlotArgs>,
        mut block: Option<ContentBlock<'_>>,
    ) -> Result<()> {
        let mut contents = Vec::with_capacity(writes.len());

        for mut args in writes {
            let explicit = args.take_named(CONTENT_ARG).filter(|value| !value.is_null());
            if explicit.is_some() && block.is_some() {
                return Err(SlotError::ConflictingContent {
                    component: self.ty.name().to_string(),
                    slot: config.name().to_string(),
                });
            }

            let class = self.ty.resolve(config)?;
            let mut content = class
                .instantiate(args)
                .map_err(|source| SlotError::Construction {
                    slot: config.name().to_string(),
                    class: class.name().to_string(),
                    source,
                })?;

            if let Some(block) = block.as_mut() {
                let captured = self
                    .view
                    .capture(block)
                    .map_err(|source| SlotError::Capture {
                        slot: config.name().to_string(),
                        source,
                    })?;
                content.set_content(captured);
            } else if let Some(value) = explicit {
                content.set_content(value);
            }
            contents.push(content);
        }

        tracing::trace!(
            component = %self.ty.name(),
            slot = config.name(),
            count = contents.len(),
            "wrote slot"
        );
        if config.is_collection() {
            self.store.append(config.storage_key(), contents);
        } else if let Some(content) = contents.pop() {
            self.store.put(config.storage_key(), content);
        }
        Ok(())
    }
}

fn split_seeds(args: SlotArgs) -> Vec<SlotArgs> {
    let (positional, named) = args.into_parts();
    match <[Value; 1]>::try_from(positional) {
        Ok([Value::Array(seeds)]) if !seeds.is_empty() => seeds
            .into_iter()
            .map(|seed| SlotArgs::from_parts(vec![seed], named.clone()))
            .collect(),
        Ok([single]) => vec![SlotArgs::from_parts(vec![single], named)],
        Err(positional) => vec![SlotArgs::from_parts(positional, named)],
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type", &self.ty.name())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::BaseSlot;
    use crate::registry::SlotDecl;

    fn card() -> Arc<ComponentType> {
        let mut card = ComponentType::new("Card");
        card.slot("title").unwrap();
        card.collection("tab").unwrap();
        Arc::new(card)
    }

    #[test]
    fn test_reads_do_not_create_entries() {
        let c = card().instantiate();
        assert!(c.get_slot("title").unwrap().one().is_none());
        assert!(c.get_slot("tab").unwrap().many().is_empty());
        assert!(c.store().is_empty());
        assert!(!c.is_slot_set("tab").unwrap());
    }

    #[test]
    fn test_explicit_content() {
        let mut c = card().instantiate();
        c.set_slot("title", SlotCall::new().content("Hello")).unwrap();
        let title = c.get_slot("title").unwrap().one().unwrap();
        assert_eq!(title.content_str(), Some("Hello"));
        // `content` is not forwarded to the constructor
        assert!(title.downcast_ref::<BaseSlot>().unwrap().args().is_empty());
    }

    #[test]
    fn test_singular_write_overwrites() {
        let mut c = card().instantiate();
        c.set_slot("title", SlotCall::new().content("first")).unwrap();
        c.set_slot("title", SlotCall::new().content("second")).unwrap();
        assert_eq!(c.get_slot("title").unwrap().content_strs(), vec![Some("second")]);
    }

    #[test]
    fn test_null_content_counts_as_absent() {
        let mut c = card().instantiate();
        c.set_slot(
            "title",
            SlotCall::new().content(Value::Null).block(ContentBlock::text("from block")),
        )
        .unwrap();
        assert_eq!(c.get_slot("title").unwrap().content_strs(), vec![Some("from block")]);
    }

    #[test]
    fn test_conflicting_content_leaves_store_untouched() {
        let mut c = card().instantiate();
        let err = c
            .set_slot("tab", SlotCall::new().content("A").block(ContentBlock::text("B")))
            .unwrap_err();
        assert!(matches!(err, SlotError::ConflictingContent { .. }));
        assert!(!c.is_slot_set("tab").unwrap());
    }

    #[test]
    fn test_empty_accessor_call_reads() {
        let mut c = card().instantiate();
        let accessed = c.call("title", SlotCall::new()).unwrap();
        assert!(accessed.read().unwrap().is_empty());
        assert!(c.store().is_empty());
    }

    #[test]
    fn test_append_accessor_writes_on_empty_call() {
        let mut c = card().instantiate();
        assert!(c.call("tab", SlotCall::new()).unwrap().is_written());
        assert!(c.call("tab", SlotCall::new()).unwrap().is_written());
        assert_eq!(c.get_slot("tab").unwrap().many().len(), 2);
        assert!(c.get_slot("tab").unwrap().many()[0].content().is_none());
    }

    #[test]
    fn test_unknown_accessor() {
        let mut c = card().instantiate();
        let err = c.call("footer", SlotCall::new()).unwrap_err();
        assert!(matches!(err, SlotError::UnknownSlot { .. }));
    }

    #[test]
    fn test_bulk_seeds_on_collection() {
        let mut c = card().instantiate();
        c.call(
            "tabs",
            SlotCall::new().arg(vec!["a", "b"]).with("active", true),
        )
        .unwrap();
        let tabs = c.slots::<BaseSlot>("tab").unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].args().positional().next(), Some(&Value::from("a")));
        assert_eq!(tabs[1].get("active"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_array_is_not_split_for_singular_slot() {
        let mut c = card().instantiate();
        c.call("title", SlotCall::new().arg(vec!["a", "b"])).unwrap();
        let title = c.slot::<BaseSlot>("title").unwrap().unwrap();
        assert_eq!(title.args().positional_len(), 1);
    }

    #[test]
    fn test_failed_bulk_write_commits_nothing() {
        let mut card = ComponentType::new("Card");
        card.declare_slot(SlotDecl::many("link").inline(|c| {
            c.param("href").require("label");
        }))
        .unwrap();
        let mut c = Arc::new(card).instantiate();

        let err = c
            .call("links", SlotCall::new().arg(vec!["/a", "/b"]))
            .unwrap_err();
        assert!(matches!(err, SlotError::Construction { .. }));
        assert!(!c.is_slot_set("link").unwrap());
    }

    #[test]
    fn test_capture_failure_is_reported() {
        let mut c = card().instantiate();
        let err = c
            .set_slot(
                "title",
                SlotCall::new().block(ContentBlock::new(|_| anyhow::bail!("boom"))),
            )
            .unwrap_err();
        assert!(matches!(err, SlotError::Capture { ref slot, .. } if slot == "title"));
        assert!(!c.is_slot_set("title").unwrap());
    }
}
