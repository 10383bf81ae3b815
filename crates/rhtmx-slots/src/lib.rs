// RHTMX Slots
// Slot registry and resolution engine for RHTMX components

//! # rhtmx-slots
//!
//! Component types declare named slots; instances fill them with content
//! objects before rendering.
//!
//! ```rust
//! use std::sync::Arc;
//! use rhtmx_slots::{ComponentType, ContentBlock, SlotCall};
//!
//! let mut card = ComponentType::new("Card");
//! card.slot("title")?;
//! card.collection("tab")?;
//! let card = Arc::new(card);
//!
//! let mut c = card.instantiate();
//! c.call("title", SlotCall::new().content("Hello"))?;
//! for label in ["A", "B", "C"] {
//!     c.call("tab", SlotCall::new().block(ContentBlock::text(label)))?;
//! }
//!
//! let tabs = c.get_slot("tab")?;
//! assert_eq!(tabs.content_strs(), vec![Some("A"), Some("B"), Some("C")]);
//! # Ok::<(), rhtmx_slots::SlotError>(())
//! ```

// Lets the derive macro refer to `::rhtmx_slots` from inside this crate
extern crate self as rhtmx_slots;

pub mod args;
pub mod capture;
pub mod component;
pub mod config;
pub mod content;
pub mod env;
pub mod error;
pub mod inflection;
pub mod instance;
pub mod logging;
pub mod registry;
pub mod store;
pub mod value;

// Re-export the derive macro alongside the trait it implements
pub use rhtmx_slots_macro::SlotContent;

pub use args::{SlotArgs, SlotCall, CONTENT_ARG};
pub use capture::{BufferCapture, ContentBlock, OutputBuffer, ViewContext};
pub use component::{Accessor, AccessorKind, ComponentType};
pub use config::Config;
pub use content::{BaseSlot, ContentClass, FromSlotArgs, InlineClass, InlineSlot};
pub use env::SlotEnv;
pub use error::{ArgError, Result, SlotError};
pub use inflection::{EnglishPluralizer, Pluralizer};
pub use instance::{Accessed, Component};
pub use registry::{ClassSource, NestedType, SlotConfig, SlotDecl, SlotRegistry};
pub use store::{SlotRead, SlotStore, StoredSlot};
pub use value::{FromSlotValue, Value};

// The trait shares its name with the derive macro; both live at the crate root
pub use content::SlotContent;
