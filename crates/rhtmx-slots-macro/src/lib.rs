// RHTMX Slots Procedural Macros
// Provides the SlotContent derive macro

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod slot_content;

/// Derive `SlotContent` and `FromSlotArgs` for a struct
///
/// The struct needs a `content: Option<Value>` field (or a field marked
/// `#[slot(content)]`); the slot engine assigns captured or explicit content
/// to it. Every other field is filled from the slot arguments by name.
///
/// # Field attributes
///
/// - `#[slot(positional)]` - take the next positional argument, falling back
///   to the named argument
/// - `#[slot(default)]` - use `Default::default()` when the argument is missing
/// - `#[slot(rename = "name")]` - read a differently named argument
/// - `#[slot(skip)]` - never read from arguments, always `Default::default()`
/// - `#[slot(content)]` - the field that receives slot content
///
/// `Option<T>` fields are optional without `#[slot(default)]`. Arguments left
/// over after all fields are filled are rejected.
///
/// # Examples
///
/// ```ignore
/// #[derive(Debug, SlotContent)]
/// struct Tab {
///     #[slot(positional)]
///     label: String,
///     #[slot(default)]
///     active: bool,
///     icon: Option<String>,
///     content: Option<Value>,
/// }
/// ```
#[proc_macro_derive(SlotContent, attributes(slot))]
pub fn derive_slot_content(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    slot_content::impl_slot_content(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
