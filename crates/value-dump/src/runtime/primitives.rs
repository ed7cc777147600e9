// crates/value-dump/src/runtime/primitives.rs
// ============================================================================
// Module: Primitive Output
// Description: Literal writers shared by the dump and format renderers.
// Purpose: Produce byte-exact scalar, address, quoting, and hex-dump text.
// Dependencies: std::fmt
// ============================================================================

//! ## Overview
//! Scalars render the same way in both output policies. Floats use the
//! shortest representation that round-trips at their stored precision and
//! switch to exponent notation outside `[1e-4, 1e6)`. Addresses render as
//! lowercase hex with a `0x` prefix, or `<nil>` for zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::model::value::Complex;
use crate::model::value::Float;

// ============================================================================
// SECTION: Markers
// ============================================================================

/// Nil reference marker.
pub(crate) const NIL: &str = "<nil>";
/// Absent value marker.
pub(crate) const INVALID: &str = "<invalid>";
/// Dump cycle marker.
pub(crate) const CIRCULAR: &str = "<already shown>";
/// Format cycle marker.
pub(crate) const CIRCULAR_SHORT: &str = "<shown>";
/// Dump depth limit marker, newline terminated.
pub(crate) const MAX_DEPTH: &str = "<max depth reached>\n";
/// Format depth limit marker.
pub(crate) const MAX_DEPTH_SHORT: &str = "<max>";
/// Separator between addresses in a pointer chain.
pub(crate) const POINTER_CHAIN: &str = "->";
/// Prefix of a contained panic placeholder.
pub(crate) const PANIC_PREFIX: &str = "(PANIC=";

/// Bytes rendered per hex dump line.
const HEX_LINE_WIDTH: usize = 16;

// ============================================================================
// SECTION: Scalars
// ============================================================================

/// Appends `true` or `false`.
pub(crate) fn write_bool(out: &mut String, value: bool) {
    out.push_str(if value { "true" } else { "false" });
}

/// Appends a decimal signed integer.
pub(crate) fn write_int(out: &mut String, value: i64) {
    let _ = write!(out, "{value}");
}

/// Appends a decimal unsigned integer.
pub(crate) fn write_uint(out: &mut String, value: u64) {
    let _ = write!(out, "{value}");
}

/// Appends a decimal length or capacity.
pub(crate) fn write_count(out: &mut String, value: usize) {
    let _ = write!(out, "{value}");
}

/// Appends a float in shortest form at its stored precision.
pub(crate) fn write_float(out: &mut String, value: Float) {
    match value {
        Float::F32(value) => out.push_str(&shortest(value, f32::is_nan, f32::is_infinite)),
        Float::F64(value) => out.push_str(&shortest(value, f64::is_nan, f64::is_infinite)),
    }
}

/// Appends a complex number as `(re+imi)`.
pub(crate) fn write_complex(out: &mut String, value: Complex) {
    let (re, im) = value.parts();
    out.push('(');
    write_float(out, re);
    if im.as_f64() >= 0.0 {
        out.push('+');
    }
    write_float(out, im);
    out.push_str("i)");
}

/// Formats a float with the shortest round-trip digits.
fn shortest<F>(value: F, is_nan: fn(F) -> bool, is_infinite: fn(F) -> bool) -> String
where
    F: Copy + PartialOrd + Default + std::fmt::Display + std::fmt::LowerExp,
{
    if is_nan(value) {
        return "NaN".to_string();
    }
    if is_infinite(value) {
        return if value > F::default() { "+Inf" } else { "-Inf" }.to_string();
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4 .. 6).contains(&exponent) {
        return value.to_string();
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}

// ============================================================================
// SECTION: Addresses
// ============================================================================

/// Appends a lowercase `0x` address, or `<nil>` for zero.
pub(crate) fn write_hex_ptr(out: &mut String, addr: usize) {
    if addr == 0 {
        out.push_str(NIL);
    } else {
        let _ = write!(out, "{addr:#x}");
    }
}

/// Appends an address chain joined by `->`.
pub(crate) fn write_pointer_chain(out: &mut String, chain: &[usize]) {
    for (index, addr) in chain.iter().enumerate() {
        if index > 0 {
            out.push_str(POINTER_CHAIN);
        }
        write_hex_ptr(out, *addr);
    }
}

// ============================================================================
// SECTION: Strings
// ============================================================================

/// Inclusive code point ranges of invisible characters that quoting escapes:
/// non-ASCII spaces, line and paragraph separators, format characters, and
/// private use planes.
const INVISIBLE: &[(u32, u32)] = &[
    (0x00a0, 0x00a0),
    (0x00ad, 0x00ad),
    (0x0600, 0x0605),
    (0x061c, 0x061c),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x0890, 0x0891),
    (0x08e2, 0x08e2),
    (0x1680, 0x1680),
    (0x180e, 0x180e),
    (0x2000, 0x200f),
    (0x2028, 0x202f),
    (0x205f, 0x2064),
    (0x2066, 0x206f),
    (0x3000, 0x3000),
    (0xe000, 0xf8ff),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
    (0x110bd, 0x110bd),
    (0x110cd, 0x110cd),
    (0x13430, 0x1343f),
    (0x1bca0, 0x1bca3),
    (0x1d173, 0x1d17a),
    (0xe0001, 0xe0001),
    (0xe0020, 0xe007f),
    (0xf0000, 0xffffd),
    (0x10_0000, 0x10_fffd),
];

/// Returns true when `ch` has no visible glyph of its own.
fn is_invisible(ch: char) -> bool {
    let code = u32::from(ch);
    INVISIBLE
        .binary_search_by(|&(low, high)| {
            if high < code {
                Ordering::Less
            } else if low > code {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        })
        .is_ok()
}

/// Appends `text` as a double-quoted literal with escapes.
pub(crate) fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            ch if u32::from(ch) < 0x20 || ch == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", u32::from(ch));
            }
            ch if ch.is_control() || is_invisible(ch) => {
                let code = u32::from(ch);
                if code > 0xffff {
                    let _ = write!(out, "\\U{code:08x}");
                } else {
                    let _ = write!(out, "\\u{code:04x}");
                }
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

// ============================================================================
// SECTION: Hex Dump
// ============================================================================

/// Returns a canonical hex dump: offset, sixteen hex columns, ASCII gutter.
pub(crate) fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(HEX_LINE_WIDTH) * 80);
    for (line, chunk) in bytes.chunks(HEX_LINE_WIDTH).enumerate() {
        let _ = write!(out, "{:08x}  ", line * HEX_LINE_WIDTH);
        for column in 0 .. HEX_LINE_WIDTH {
            match chunk.get(column) {
                Some(byte) => {
                    let _ = write!(out, "{byte:02x} ");
                }
                None => out.push_str("   "),
            }
            if column == 7 {
                out.push(' ');
            }
        }
        out.push_str(" |");
        out.extend(
            chunk.iter().map(|byte| if (32 ..= 126).contains(byte) { char::from(*byte) } else { '.' }),
        );
        out.push_str("|\n");
    }
    out
}

/// Appends a hex dump whose lines are prefixed with `indent`.
///
/// Trailing indent characters after the final newline are trimmed.
pub(crate) fn write_indented_hex_dump(out: &mut String, bytes: &[u8], indent: &str) {
    let mut block = String::from(indent);
    block.push_str(&hex_dump(bytes).replace('\n', &format!("\n{indent}")));
    let trimmed = block.trim_end_matches(|ch| indent.contains(ch));
    out.push_str(trimmed);
}

// ============================================================================
// SECTION: Tests
// ============================================================================
