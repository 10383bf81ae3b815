// File: src/capture.rs
// Purpose: Deferred content blocks and the view context that captures them

use crate::value::Value;
use anyhow::Result;
use maud::{Markup, Render};
use std::fmt;

/// Output buffer a content block writes into while it is being captured
#[derive(Debug, Default)]
pub struct OutputBuffer {
    html: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, HTML-escaped
    pub fn push_text(&mut self, text: &str) {
        text.render_to(&mut self.html);
    }

    /// Append already rendered markup without escaping
    pub fn push_markup(&mut self, markup: impl Render) {
        markup.render_to(&mut self.html);
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

type BlockFn<'a> = dyn FnMut(&mut OutputBuffer) -> Result<()> + 'a;

/// Caller-supplied logic that produces slot content when captured.
///
/// Blocks are `FnMut` so a bulk write can capture the same block once per seed.
pub struct ContentBlock<'a> {
    body: Box<BlockFn<'a>>,
}

impl<'a> ContentBlock<'a> {
    pub fn new(body: impl FnMut(&mut OutputBuffer) -> Result<()> + 'a) -> Self {
        Self {
            body: Box::new(body),
        }
    }

    /// Block that writes a fixed, escaped string
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |out| {
            out.push_text(&text);
            Ok(())
        })
    }

    /// Block that renders a maud template
    pub fn markup(mut render: impl FnMut() -> Markup + 'a) -> Self {
        Self::new(move |out| {
            out.push_markup(render());
            Ok(())
        })
    }

    /// Run the block against a buffer
    pub fn run(&mut self, out: &mut OutputBuffer) -> Result<()> {
        (self.body)(out)
    }
}

impl fmt::Debug for ContentBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentBlock(..)")
    }
}

/// Realizes a deferred content block into a value.
///
/// Host frameworks plug their own view context in here; the slot engine only
/// ever calls `capture`.
pub trait ViewContext {
    fn capture(&self, block: &mut ContentBlock<'_>) -> Result<Value>;
}

/// Default view context: runs the block into a fresh buffer and returns the
/// buffer contents as a string value.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferCapture;

impl ViewContext for BufferCapture {
    fn capture(&self, block: &mut ContentBlock<'_>) -> Result<Value> {
        let mut out = OutputBuffer::new();
        block.run(&mut out)?;
        Ok(Value::String(out.into_string()))
    }
}
