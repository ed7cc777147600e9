// crates/value-dump/src/runtime/format.rs
// ============================================================================
// Module: Format Renderer
// Description: Single-line, printf-compatible rendering policy.
// Purpose: Render values inline through the standard formatting machinery.
// Dependencies: std::fmt, crate::{config, model, runtime::{pointer, primitives, walker}}
// ============================================================================

//! ## Overview
//! [`ValueFormatter`] implements [`fmt::Display`] with four flag
//! combinations:
//!
//! - `{}`: plain values.
//! - `{:+}`: struct field names and pointer address chains.
//! - `{:#}`: type annotations and struct field names.
//! - `{:+#}`: both.
//!
//! A width or precision (`{:>20}`, `{:.5}`) pads the plain rendering through
//! [`fmt::Formatter::pad`]. `{:?}` is the typed rendering.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::mem;

use crate::config::Config;
use crate::model::value::Field;
use crate::model::value::Kind;
use crate::model::value::MapRef;
use crate::model::value::Sequence;
use crate::model::value::Value;
use crate::runtime::pointer;
use crate::runtime::primitives;
use crate::runtime::walker;
use crate::runtime::walker::Renderer;
use crate::runtime::walker::TraversalState;

// ============================================================================
// SECTION: Flags
// ============================================================================

/// Flag combination selected by the caller's format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct FormatFlags {
    /// `+`: reveal field names and pointer addresses.
    pub(crate) plus: bool,
    /// `#`: reveal types and field names.
    pub(crate) sharp: bool,
}

impl FormatFlags {
    /// `{}`.
    pub(crate) const PLAIN: Self = Self {
        plus: false,
        sharp: false,
    };
    /// `{:#}`.
    pub(crate) const TYPED: Self = Self {
        plus: false,
        sharp: true,
    };

    /// Reads the flags from a formatter.
    fn from_formatter(f: &fmt::Formatter<'_>) -> Self {
        Self {
            plus: f.sign_plus(),
            sharp: f.alternate(),
        }
    }

    /// Returns true when struct field names are shown.
    const fn field_names(self) -> bool {
        self.plus || self.sharp
    }
}

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// Format policy state for one top-level value.
struct FormatRenderer<'c> {
    /// Active configuration.
    config: &'c Config,
    /// Requested flags.
    flags: FormatFlags,
    /// Traversal bookkeeping.
    state: TraversalState,
    /// Output buffer.
    out: String,
}

impl FormatRenderer<'_> {
    /// Wraps `body` in a depth-limited composite.
    fn composite(&mut self, open: &str, close: char, body: impl FnOnce(&mut Self)) {
        self.out.push_str(open);
        if self.state.enter(self.config.max_depth) {
            body(self);
        } else {
            self.out.push_str(primitives::MAX_DEPTH_SHORT);
        }
        self.state.leave();
        self.out.push(close);
    }
}

impl Renderer for FormatRenderer<'_> {
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
        false
    }

    fn unpack(&mut self, value: &Value) -> Value {
        if value.kind() == Kind::Interface {
            self.state.suppress_type = false;
        }
        walker::unpack(value)
    }

    fn render_pointer(&mut self, pointer: &Value) {
        let suppress_type = mem::take(&mut self.state.suppress_type);
        let show_types = self.flags.sharp && !suppress_type;
        if pointer.is_nil() && !show_types {
            self.out.push_str(primitives::NIL);
            return;
        }
        let resolution = pointer::resolve(pointer, self.state.depth, &mut self.state.guard);
        let terminal_name = resolution.terminal.type_name();
        if show_types {
            self.out.push('(');
            self.out.push_str(&"*".repeat(resolution.indirections));
            self.out.push_str(terminal_name);
            self.out.push(')');
        } else {
            let mut indirections = resolution.indirections;
            if resolution.nil_found || resolution.cycle_found {
                indirections += terminal_name.matches('*').count();
            }
            self.out.push('<');
            self.out.push_str(&"*".repeat(indirections));
            self.out.push('>');
        }
        if self.flags.plus && !resolution.chain.is_empty() {
            self.out.push('(');
            primitives::write_pointer_chain(&mut self.out, &resolution.chain);
            self.out.push(')');
        }
        if resolution.nil_found {
            self.out.push_str(primitives::NIL);
        } else if resolution.cycle_found {
            self.out.push_str(primitives::CIRCULAR_SHORT);
        } else {
            self.state.suppress_type = true;
            walker::walk(self, &resolution.terminal, true);
        }
    }

    fn annotate(&mut self, value: &Value) {
        let suppress_type = mem::take(&mut self.state.suppress_type);
        if self.flags.sharp && !suppress_type {
            self.out.push('(');
            self.out.push_str(value.type_name());
            self.out.push(')');
        }
    }

    fn render_string(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn render_sequence(&mut self, sequence: &Sequence, addressable: bool) {
        self.composite("[", ']', |this| {
            for (index, element) in walker::elements(sequence).iter().enumerate() {
                if index > 0 {
                    this.out.push(' ');
                }
                this.state.suppress_type = true;
                let element = this.unpack(element);
                walker::walk(this, &element, addressable);
            }
        });
    }

    fn render_map(&mut self, table: &MapRef) {
        self.composite("map[", ']', |this| {
            let entries = walker::ordered_entries(this.config, table);
            for (index, (key, value)) in entries.iter().enumerate() {
                if index > 0 {
                    this.out.push(' ');
                }
                this.state.suppress_type = true;
                let key = this.unpack(key);
                walker::walk(this, &key, false);
                this.out.push(':');
                this.state.suppress_type = true;
                let value = this.unpack(value);
                walker::walk(this, &value, false);
            }
        });
    }

    fn render_struct(&mut self, fields: &[Field], addressable: bool) {
        self.composite("{", '}', |this| {
            for (index, field) in fields.iter().enumerate() {
                if index > 0 {
                    this.out.push(' ');
                }
                if this.flags.field_names() {
                    this.out.push_str(field.name());
                    this.out.push(':');
                }
                let value = this.unpack(field.value());
                walker::walk(this, &value, addressable);
            }
        });
    }

    fn render_cycle(&mut self) {
        self.out.push_str(primitives::CIRCULAR_SHORT);
    }
}

/// Renders `value` on one line with `flags`.
pub(crate) fn render(config: &Config, value: &Value, flags: FormatFlags) -> String {
    let mut renderer = FormatRenderer {
        config,
        flags,
        state: TraversalState::default(),
        out: String::new(),
    };
    let value = walker::unpack(value);
    walker::walk(&mut renderer, &value, false);
    renderer.out
}

// ============================================================================
// SECTION: Formatter
// ============================================================================

/// Display adapter rendering a value with a configuration.
#[derive(Clone)]
pub struct ValueFormatter<'c> {
    /// Active configuration.
    config: &'c Config,
    /// Value to render.
    value: Value,
}

impl<'c> ValueFormatter<'c> {
    /// Wraps `value` for rendering with `config`.
    #[must_use]
    pub const fn new(config: &'c Config, value: Value) -> Self {
        Self {
            config,
            value,
        }
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for ValueFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.width().is_some() || f.precision().is_some() {
            return f.pad(&render(self.config, &self.value, FormatFlags::PLAIN));
        }
        f.write_str(&render(self.config, &self.value, FormatFlags::from_formatter(f)))
    }
}

impl fmt::Debug for ValueFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self.config, &self.value, FormatFlags::TYPED))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&Config::DEFAULT, self, FormatFlags::TYPED))
    }
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

impl Config {
    /// Wraps `value` for inline rendering with this configuration.
    #[must_use]
    pub fn formatter(&self, value: &Value) -> ValueFormatter<'_> {
        ValueFormatter::new(self, value.clone())
    }

    /// Wraps each of `values` for inline rendering.
    #[must_use]
    pub fn formatters(&self, values: &[Value]) -> Vec<ValueFormatter<'_>> {
        values.iter().map(|value| self.formatter(value)).collect()
    }

    /// Renders values inline, separated by a space unless either neighbour is
    /// a string.
    #[must_use]
    pub fn sprint(&self, values: &[Value]) -> String {
        let mut out = String::new();
        let mut previous_is_string = false;
        for (index, value) in values.iter().enumerate() {
            let is_string = walker::unpack(value).kind() == Kind::String;
            if index > 0 && !is_string && !previous_is_string {
                out.push(' ');
            }
            out.push_str(&render(self, value, FormatFlags::PLAIN));
            previous_is_string = is_string;
        }
        out
    }

    /// Renders values inline separated by spaces, with a trailing newline.
    #[must_use]
    pub fn sprintln(&self, values: &[Value]) -> String {
        let mut out = values
            .iter()
            .map(|value| render(self, value, FormatFlags::PLAIN))
            .collect::<Vec<_>>()
            .join(" ");
        out.push('\n');
        out
    }
}
