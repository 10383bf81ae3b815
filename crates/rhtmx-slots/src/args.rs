// File: src/args.rs
// Purpose: Call-site arguments for slot accessors

use crate::capture::ContentBlock;
use crate::error::ArgError;
use crate::value::{FromSlotValue, Value};
use std::collections::{BTreeMap, VecDeque};

/// Named argument that carries explicit slot content instead of constructor data
pub const CONTENT_ARG: &str = "content";

/// Positional and named arguments forwarded to a content class constructor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotArgs {
    positional: VecDeque<Value>,
    named: BTreeMap<String, Value>,
}

impl SlotArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push_back(value.into());
        self
    }

    /// Set a named argument
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn positional(&self) -> impl Iterator<Item = &Value> {
        self.positional.iter()
    }

    pub fn positional_len(&self) -> usize {
        self.positional.len()
    }

    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Remove a named argument, returning its raw value
    pub fn take_named(&mut self, name: &str) -> Option<Value> {
        self.named.remove(name)
    }

    /// Remove the next positional argument
    pub fn next_positional(&mut self) -> Option<Value> {
        self.positional.pop_front()
    }

    /// Remove a named argument and convert it
    pub fn take<T: FromSlotValue>(&mut self, name: &str) -> Result<Option<T>, ArgError> {
        match self.named.remove(name) {
            Some(value) => T::from_slot_value(value)
                .map(Some)
                .map_err(|message| ArgError::invalid(name, message)),
            None => Ok(None),
        }
    }

    /// Remove a named argument that must be present
    pub fn require<T: FromSlotValue>(&mut self, name: &str) -> Result<T, ArgError> {
        self.take(name)?
            .ok_or_else(|| ArgError::Missing(name.to_string()))
    }

    /// Check that every argument was consumed
    pub fn finish(self) -> Result<(), ArgError> {
        if !self.positional.is_empty() {
            return Err(ArgError::UnexpectedPositional(self.positional.len()));
        }
        if !self.named.is_empty() {
            return Err(ArgError::UnexpectedNamed(self.named.into_keys().collect()));
        }
        Ok(())
    }

    /// Split into raw positional and named parts
    pub fn into_parts(self) -> (Vec<Value>, BTreeMap<String, Value>) {
        (self.positional.into(), self.named)
    }

    pub(crate) fn from_parts(positional: Vec<Value>, named: BTreeMap<String, Value>) -> Self {
        Self {
            positional: positional.into(),
            named,
        }
    }
}

/// Everything an accessor call site supplies: arguments plus an optional content block
#[derive(Default)]
pub struct SlotCall<'a> {
    pub args: SlotArgs,
    pub block: Option<ContentBlock<'a>>,
}

impl<'a> SlotCall<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args = self.args.arg(value);
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args = self.args.with(name, value);
        self
    }

    /// Supply the slot content directly
    pub fn content(self, value: impl Into<Value>) -> Self {
        self.with(CONTENT_ARG, value)
    }

    /// Supply a block whose captured output becomes the slot content
    pub fn block(mut self, block: ContentBlock<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// An accessor call with no arguments and no block reads the slot
    pub fn is_read(&self) -> bool {
        self.args.is_empty() && self.block.is_none()
    }
}

impl From<SlotArgs> for SlotCall<'_> {
    fn from(args: SlotArgs) -> Self {
        Self { args, block: None }
    }
}

impl<'a> From<ContentBlock<'a>> for SlotCall<'a> {
    fn from(block: ContentBlock<'a>) -> Self {
        Self {
            args: SlotArgs::default(),
            block: Some(block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_and_finish() {
        let mut args = SlotArgs::new().arg("first").with("count", 2).with("label", "Tab");
        assert_eq!(args.next_positional(), Some(Value::from("first")));
        assert_eq!(args.take::<i64>("count"), Ok(Some(2)));
        assert_eq!(args.take::<i64>("missing"), Ok(None));
        assert_eq!(args.require::<String>("label"), Ok("Tab".to_string()));
        assert_eq!(args.finish(), Ok(()));
    }

    #[test]
    fn test_finish_rejects_leftovers() {
        let args = SlotArgs::new().with("color", "red");
        assert_eq!(
            args.finish(),
            Err(ArgError::UnexpectedNamed(vec!["color".to_string()]))
        );
        let args = SlotArgs::new().arg(1).arg(2);
        assert_eq!(args.finish(), Err(ArgError::UnexpectedPositional(2)));
    }

    #[test]
    fn test_require_reports_invalid_type() {
        let mut args = SlotArgs::new().with("count", "many");
        assert_eq!(
            args.require::<i64>("count"),
            Err(ArgError::invalid("count", "expected integer, got string"))
        );
    }

    #[test]
    fn test_call_shape() {
        assert!(SlotCall::new().is_read());
        assert!(!SlotCall::new().content("Hello").is_read());
        assert!(!SlotCall::new().arg(1).is_read());
        assert!(!SlotCall::from(ContentBlock::text("x")).is_read());
    }
}
