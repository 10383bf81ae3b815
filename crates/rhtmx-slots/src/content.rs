// File: src/content.rs
// Purpose: Slot content capability, the base content type and content classes

use crate::args::SlotArgs;
use crate::error::ArgError;
use crate::value::Value;
use std::any::{self, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Marker capability for types that can be stored in a slot.
///
/// A slot content object holds whatever structured data its constructor
/// took, plus one `content` value assigned by the slot engine after
/// construction. Derive it with `#[derive(SlotContent)]`.
pub trait SlotContent: Any + fmt::Debug {
    /// Content captured from a block or passed as `content:`
    fn content(&self) -> Option<&Value>;

    /// Assign the realized content. Called at most once per object.
    fn set_content(&mut self, content: Value);

    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn SlotContent + 'a {
    pub fn downcast_ref<T: SlotContent>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: SlotContent>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Content as a string, if it is one
    pub fn content_str(&self) -> Option<&str> {
        self.content().and_then(Value::as_str)
    }
}

/// Constructor half of the slot content capability
pub trait FromSlotArgs: Sized {
    fn from_slot_args(args: SlotArgs) -> Result<Self, ArgError>;
}

/// Default slot content type. Keeps every argument it was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseSlot {
    args: SlotArgs,
    content: Option<Value>,
}

impl BaseSlot {
    pub fn args(&self) -> &SlotArgs {
        &self.args
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }
}

impl SlotContent for BaseSlot {
    fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    fn set_content(&mut self, content: Value) {
        self.content = Some(content);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl FromSlotArgs for BaseSlot {
    fn from_slot_args(args: SlotArgs) -> Result<Self, ArgError> {
        Ok(Self {
            args,
            content: None,
        })
    }
}

type Build = dyn Fn(SlotArgs) -> Result<Box<dyn SlotContent>, ArgError> + Send + Sync;

/// A validated slot content class: a name plus a constructor that can only
/// produce [`SlotContent`] objects.
#[derive(Clone)]
pub struct ContentClass {
    name: Arc<str>,
    build: Arc<Build>,
}

impl ContentClass {
    /// Class for a Rust type, named after the type
    pub fn of<T: SlotContent + FromSlotArgs>() -> Self {
        Self::named::<T>(short_type_name::<T>())
    }

    /// Class for a Rust type under an explicit name
    pub fn named<T: SlotContent + FromSlotArgs>(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            build: Arc::new(|args| {
                T::from_slot_args(args).map(|content| Box::new(content) as Box<dyn SlotContent>)
            }),
        }
    }

    /// The base slot content class
    pub fn base() -> Self {
        Self::named::<BaseSlot>("BaseSlot")
    }

    /// Synthesize an anonymous subtype of [`BaseSlot`] from an inline body
    pub fn inline(name: impl Into<String>, body: impl FnOnce(&mut InlineClass)) -> Self {
        let name = name.into();
        let mut class = InlineClass::new(name.clone());
        body(&mut class);
        let class = Arc::new(class);
        Self {
            name: Arc::from(name),
            build: Arc::new(move |args| {
                InlineSlot::build(Arc::clone(&class), args)
                    .map(|content| Box::new(content) as Box<dyn SlotContent>)
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn instantiate(&self, args: SlotArgs) -> Result<Box<dyn SlotContent>, ArgError> {
        (self.build)(args)
    }
}

impl fmt::Debug for ContentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContentClass").field(&self.name).finish()
    }
}

pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

type Computed = dyn Fn(&InlineSlot) -> Value + Send + Sync;

/// Body of an inline slot class: parameter names, defaults, required
/// arguments and computed attributes layered on top of [`BaseSlot`].
pub struct InlineClass {
    name: String,
    params: Vec<String>,
    defaults: BTreeMap<String, Value>,
    required: Vec<String>,
    computed: BTreeMap<String, Arc<Computed>>,
}

impl InlineClass {
    fn new(name: String) -> Self {
        Self {
            name,
            params: Vec::new(),
            defaults: BTreeMap::new(),
            required: Vec::new(),
            computed: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind the next positional argument to `name`
    pub fn param(&mut self, name: impl Into<String>) -> &mut Self {
        self.params.push(name.into());
        self
    }

    /// Value used when `name` is not supplied
    pub fn default_value(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Construction fails unless `name` is supplied
    pub fn require(&mut self, name: impl Into<String>) -> &mut Self {
        self.required.push(name.into());
        self
    }

    /// Attribute derived from the object's fields
    pub fn computed(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&InlineSlot) -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.computed.insert(name.into(), Arc::new(f));
        self
    }
}

/// Instance of an inline slot class
pub struct InlineSlot {
    class: Arc<InlineClass>,
    fields: BTreeMap<String, Value>,
    content: Option<Value>,
}

impl InlineSlot {
    fn build(class: Arc<InlineClass>, args: SlotArgs) -> Result<Self, ArgError> {
        let (positional, named) = args.into_parts();
        if positional.len() > class.params.len() {
            return Err(ArgError::UnexpectedPositional(positional.len() - class.params.len()));
        }

        let mut fields = class.defaults.clone();
        for (param, value) in class.params.iter().zip(positional) {
            fields.insert(param.clone(), value);
        }
        fields.extend(named);

        if let Some(missing) = class.required.iter().find(|name| !fields.contains_key(*name)) {
            return Err(ArgError::Missing(missing.clone()));
        }

        Ok(Self {
            class,
            fields,
            content: None,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class.name
    }

    /// Stored field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Field or computed attribute
    pub fn attr(&self, name: &str) -> Option<Value> {
        match self.class.computed.get(name) {
            Some(f) => Some(f(self)),
            None => self.fields.get(name).cloned(),
        }
    }
}

impl fmt::Debug for InlineSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineSlot")
            .field("class", &self.class.name)
            .field("fields", &self.fields)
            .field("content", &self.content)
            .finish()
    }
}

impl SlotContent for InlineSlot {
    fn content(&self) -> Option<&Value> {
        self.content.as_ref()
    }

    fn set_content(&mut self, content: Value) {
        self.content = Some(content);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
