// crates/value-dump/src/runtime/dump.rs
// ============================================================================
// Module: Dump Renderer
// Description: Multi-line, indented, type-annotated rendering policy.
// Purpose: Produce the verbose dump used in assertion failure messages.
// Dependencies: crate::{config, model, runtime::{pointer, primitives, walker}}
// ============================================================================

//! ## Overview
//! Each top-level value renders as `[TYPE " "] [LENCAP] VALUE "\n"`. Pointers
//! print their full type, the address chain (unless disabled), and the
//! pointee in parentheses. Composites open a brace, render one item per line
//! at the next indent level, and close at the current level. Byte-like
//! sequences render as a hex dump block instead of element by element.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::io::Write;

use crate::config::Config;
use crate::model::value::Data;
use crate::model::value::Field;
use crate::model::value::MapRef;
use crate::model::value::Sequence;
use crate::model::value::Value;
use crate::runtime::pointer;
use crate::runtime::primitives;
use crate::runtime::walker;
use crate::runtime::walker::Renderer;
use crate::runtime::walker::TraversalState;

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Dump policy state for one top-level value.
pub(crate) struct DumpRenderer<'c> {
    /// Active configuration.
    config: &'c Config,
    /// Traversal bookkeeping.
    state: TraversalState,
    /// Output buffer.
    out: String,
}

impl<'c> DumpRenderer<'c> {
    /// Creates a renderer with fresh traversal state.
    pub(crate) fn new(config: &'c Config) -> Self {
        Self {
            config,
            state: TraversalState::default(),
            out: String::new(),
        }
    }

    /// Renders one top-level value and returns the text with a newline.
    pub(crate) fn render(mut self, value: &Value) -> String {
        let value = walker::unpack(value);
        walker::walk(&mut self, &value, false);
        self.out.push('\n');
        self.out
    }

    /// Writes the indent for the current depth unless suppressed.
    fn indent(&mut self) {
        if self.state.suppress_indent {
            self.state.suppress_indent = false;
            return;
        }
        for _ in 0 .. self.state.depth {
            self.out.push_str(&self.config.indent);
        }
    }

    /// Writes the item separator for position `index` of `count`.
    fn separator(&mut self, index: usize, count: usize) {
        self.out.push_str(if index + 1 < count { ",\n" } else { "\n" });
    }

    /// Opens a composite, renders `body` one level deeper, and closes it.
    fn composite(&mut self, body: impl FnOnce(&mut Self)) {
        self.out.push_str("{\n");
        if self.state.enter(self.config.max_depth) {
            body(self);
        } else {
            self.indent();
            self.out.push_str(primitives::MAX_DEPTH);
        }
        self.state.leave();
        self.indent();
        self.out.push('}');
    }
}

impl Renderer for DumpRenderer<'_> {
    fn config(&self) -> &Config {
        self.config
    }

    fn state(&mut self) -> &mut TraversalState {
        &mut self.state
    }

    fn out(&mut self) -> &mut String {
        &mut self.out
    }

    fn continues_after_method(&self) -> bool {
        self.config.continue_on_method
    }

    fn render_pointer(&mut self, pointer: &Value) {
        self.indent();
        let resolution = pointer::resolve(pointer, self.state.depth, &mut self.state.guard);
        self.out.push('(');
        self.out.push_str(&"*".repeat(resolution.indirections));
        self.out.push_str(resolution.terminal.type_name());
        self.out.push(')');
        if !self.config.disable_pointer_addresses && !resolution.chain.is_empty() {
            self.out.push('(');
            primitives::write_pointer_chain(&mut self.out, &resolution.chain);
            self.out.push(')');
        }
        self.out.push('(');
        if resolution.nil_found {
            self.out.push_str(primitives::NIL);
        } else if resolution.cycle_found {
            self.out.push_str(primitives::CIRCULAR);
        } else {
            self.state.suppress_type = true;
            walker::walk(self, &resolution.terminal, true);
        }
        self.out.push(')');
    }

    fn annotate(&mut self, value: &Value) {
        if !self.state.suppress_type {
            self.indent();
            self.out.push('(');
            self.out.push_str(value.type_name());
            self.out.push_str(") ");
        }
        self.state.suppress_type = false;

        let (len, cap) = match value.data() {
            Data::Slice(_) | Data::Array(_) | Data::Channel {
                ..
            } => (value.len(), value.cap()),
            Data::Map(_) | Data::String(_) => (value.len(), 0),
            _ => (0, 0),
        };
        let show_cap = !self.config.disable_capacities && cap != 0;
        if len != 0 || show_cap {
            self.out.push('(');
            if len != 0 {
                self.out.push_str("len=");
                primitives::write_count(&mut self.out, len);
            }
            if show_cap {
                if len != 0 {
                    self.out.push(' ');
                }
                self.out.push_str("cap=");
                primitives::write_count(&mut self.out, cap);
            }
            self.out.push_str(") ");
        }
    }

    fn render_string(&mut self, text: &str) {
        primitives::write_quoted(&mut self.out, text);
    }

    fn render_sequence(&mut self, sequence: &Sequence, addressable: bool) {
        self.composite(|this| {
            if let Some(bytes) = walker::byte_view(sequence) {
                let indent = this.config.indent.repeat(this.state.depth);
                primitives::write_indented_hex_dump(&mut this.out, &bytes, &indent);
                return;
            }
            let elements = walker::elements(sequence);
            let count = elements.len();
            for (index, element) in elements.iter().enumerate() {
                let element = this.unpack(element);
                walker::walk(this, &element, addressable);
                this.separator(index, count);
            }
        });
    }

    fn render_map(&mut self, table: &MapRef) {
        self.composite(|this| {
            let entries = walker::ordered_entries(this.config, table);
            let count = entries.len();
            for (index, (key, value)) in entries.iter().enumerate() {
                let key = this.unpack(key);
                walker::walk(this, &key, false);
                this.out.push_str(": ");
                this.state.suppress_indent = true;
                let value = this.unpack(value);
                walker::walk(this, &value, false);
                this.separator(index, count);
            }
        });
    }

    fn render_struct(&mut self, fields: &[Field], addressable: bool) {
        self.composite(|this| {
            let count = fields.len();
            for (index, field) in fields.iter().enumerate() {
                this.indent();
                this.out.push_str(field.name());
                this.out.push_str(": ");
                this.state.suppress_indent = true;
                let value = this.unpack(field.value());
                walker::walk(this, &value, addressable);
                this.separator(index, count);
            }
        });
    }

    fn render_cycle(&mut self) {
        self.out.push_str(primitives::CIRCULAR);
    }
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

impl Config {
    /// Dumps each value on its own newline-terminated line.
    #[must_use]
    pub fn sdump(&self, values: &[Value]) -> String {
        values.iter().map(|value| DumpRenderer::new(self).render(value)).collect()
    }

    /// Dumps each value to `writer`.
    ///
    /// # Errors
    ///
    /// Returns the writer's error when writing fails.
    pub fn fdump<W: Write + ?Sized>(&self, writer: &mut W, values: &[Value]) -> io::Result<()> {
        for value in values {
            writer.write_all(DumpRenderer::new(self).render(value).as_bytes())?;
        }
        Ok(())
    }
}
