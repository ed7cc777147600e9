// crates/value-dump/src/config.rs
// ============================================================================
// Module: Dump Configuration
// Description: Rendering policy threaded through every dump and format call.
// Purpose: Provide an immutable default policy plus strict TOML loading.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! [`Config`] is read-only for the duration of a call. The process-wide
//! default is the constant [`Config::DEFAULT`]; callers derive variants with
//! struct update syntax, [`Config::merged`], or a TOML document whose missing
//! keys fall back to the defaults.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum indent unit length in bytes.
pub(crate) const MAX_INDENT_LENGTH: usize = 16;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Rendering policy for dump and format calls.
///
/// # Invariants
/// - `indent` contains only spaces and tabs (enforced by [`Config::validate`]).
/// - `max_depth == 0` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Indent unit repeated once per nesting level in dumps.
    pub indent: Cow<'static, str>,
    /// Maximum nesting depth for composite values; 0 is unlimited.
    pub max_depth: usize,
    /// Skip text/error rendering capabilities entirely.
    pub disable_methods: bool,
    /// Skip capabilities declared on the pointer receiver.
    pub disable_pointer_methods: bool,
    /// Omit pointer address chains from dumps.
    pub disable_pointer_addresses: bool,
    /// Omit capacities from length/capacity annotations.
    pub disable_capacities: bool,
    /// Keep descending structurally after a capability rendered a dump value.
    pub continue_on_method: bool,
    /// Order map entries deterministically.
    pub sort_keys: bool,
    /// Order otherwise incomparable keys by their typed format rendering.
    pub spew_keys: bool,
    /// Render time values through their textual form even with methods disabled.
    pub enable_time_stringer: bool,
}

impl Config {
    /// Process-wide default policy.
    pub const DEFAULT: Self = Self {
        indent: Cow::Borrowed(" "),
        max_depth: 0,
        disable_methods: false,
        disable_pointer_methods: false,
        disable_pointer_addresses: false,
        disable_capacities: false,
        continue_on_method: false,
        sort_keys: false,
        spew_keys: false,
        enable_time_stringer: false,
    };

    /// Returns the default policy with `overrides` applied.
    #[must_use]
    pub fn merged(overrides: &ConfigOverrides) -> Self {
        Self::DEFAULT.with_overrides(overrides)
    }

    /// Returns a copy of this policy with `overrides` applied.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        Self {
            indent: overrides.indent.clone().unwrap_or_else(|| self.indent.clone()),
            max_depth: overrides.max_depth.unwrap_or(self.max_depth),
            disable_methods: overrides.disable_methods.unwrap_or(self.disable_methods),
            disable_pointer_methods: overrides
                .disable_pointer_methods
                .unwrap_or(self.disable_pointer_methods),
            disable_pointer_addresses: overrides
                .disable_pointer_addresses
                .unwrap_or(self.disable_pointer_addresses),
            disable_capacities: overrides.disable_capacities.unwrap_or(self.disable_capacities),
            continue_on_method: overrides.continue_on_method.unwrap_or(self.continue_on_method),
            sort_keys: overrides.sort_keys.unwrap_or(self.sort_keys),
            spew_keys: overrides.spew_keys.unwrap_or(self.spew_keys),
            enable_time_stringer: overrides
                .enable_time_stringer
                .unwrap_or(self.enable_time_stringer),
        }
    }

    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the indent unit is malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indent.len() > MAX_INDENT_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "indent exceeds {MAX_INDENT_LENGTH} bytes"
            )));
        }
        if !self.indent.chars().all(|ch| ch == ' ' || ch == '\t') {
            return Err(ConfigError::Invalid(
                "indent must contain only spaces and tabs".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Partial policy; `None` fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    /// Indent unit override.
    pub indent: Option<Cow<'static, str>>,
    /// Depth limit override.
    pub max_depth: Option<usize>,
    /// Method rendering override.
    pub disable_methods: Option<bool>,
    /// Pointer receiver override.
    pub disable_pointer_methods: Option<bool>,
    /// Pointer address override.
    pub disable_pointer_addresses: Option<bool>,
    /// Capacity annotation override.
    pub disable_capacities: Option<bool>,
    /// Continue-on-method override.
    pub continue_on_method: Option<bool>,
    /// Key sorting override.
    pub sort_keys: Option<bool>,
    /// Typed-rendering key order override.
    pub spew_keys: Option<bool>,
    /// Time stringer override.
    pub enable_time_stringer: Option<bool>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
