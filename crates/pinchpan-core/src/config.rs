//! Recognizer configuration.
//!
//! The serde forms ([`GestureConfig`], [`PanSettings`], [`PinchSettings`])
//! mirror what a config file holds; [`PanSettings::validate`] turns the raw
//! pan settings into a typed [`PanConfig`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Validated pan recognizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanConfig {
    /// Contacts that must be down at once before the pan starts.
    pub required_pointers: NonZeroUsize,
    /// Only accept the OS-primary contact.
    pub primary_only: bool,
}

impl PanConfig {
    /// Single primary contact.
    pub const SINGLE: Self = Self {
        required_pointers: NonZeroUsize::MIN,
        primary_only: true,
    };

    /// Threshold pan over `required` contacts of any primary state.
    #[must_use]
    pub const fn multi_touch(required: NonZeroUsize) -> Self {
        Self {
            required_pointers: required,
            primary_only: false,
        }
    }

    /// Build from a raw count.
    pub fn new(required_pointers: usize, primary_only: bool) -> Result<Self, ConfigError> {
        PanSettings {
            required_pointers,
            primary_only,
        }
        .validate()
    }
}

impl Default for PanConfig {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Pan settings as written in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanSettings {
    /// Contacts required to start panning
    #[serde(default = "default_required_pointers")]
    pub required_pointers: usize,
    /// Accept only the primary contact
    #[serde(default = "default_primary_only")]
    pub primary_only: bool,
}

const fn default_required_pointers() -> usize {
    1
}

const fn default_primary_only() -> bool {
    true
}

impl Default for PanSettings {
    fn default() -> Self {
        Self {
            required_pointers: default_required_pointers(),
            primary_only: default_primary_only(),
        }
    }
}

impl PanSettings {
    /// Check the settings and produce a [`PanConfig`].
    pub fn validate(&self) -> Result<PanConfig, ConfigError> {
        let required = NonZeroUsize::new(self.required_pointers)
            .ok_or(ConfigError::ZeroRequiredPointers(self.required_pointers))?;
        if self.primary_only && required.get() > 1 {
            return Err(ConfigError::PrimaryOnlyMultiPointer(required.get()));
        }
        Ok(PanConfig {
            required_pointers: required,
            primary_only: self.primary_only,
        })
    }
}

/// Pinch settings as written in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinchSettings {
    /// Emit zoom events
    #[serde(default = "default_zoomable")]
    pub zoomable: bool,
}

const fn default_zoomable() -> bool {
    true
}

impl Default for PinchSettings {
    fn default() -> Self {
        Self {
            zoomable: default_zoomable(),
        }
    }
}

/// Configuration for both recognizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Pan recognizer settings
    #[serde(default)]
    pub pan: PanSettings,
    /// Pinch recognizer settings
    #[serde(default)]
    pub pinch: PinchSettings,
}
