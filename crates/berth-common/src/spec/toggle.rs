//! Enabled/disabled sections with optional settings.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A spec section that is either enabled (with options) or explicitly
/// switched off.
///
/// Serialized either as the options object, or as a bare boolean: `false`
/// suppresses the section, `true` enables it with defaults. A missing field
/// defaults to `Enabled(T::default())` on the containing spec.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum Toggle<T> {
    /// Bare boolean form: `false` disables, `true` enables with defaults
    Switch(bool),
    /// Section enabled with explicit options
    Enabled(T),
}

impl<T: Default> Default for Toggle<T> {
    fn default() -> Self {
        Self::Enabled(T::default())
    }
}

impl<T> Toggle<T> {
    /// Explicitly disabled section
    pub fn disabled() -> Self {
        Self::Switch(false)
    }

    /// Whether the section was explicitly switched off
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Switch(false))
    }
}

impl<T: Clone + Default> Toggle<T> {
    /// Effective options: `None` when disabled, defaults when enabled via
    /// the bare `true` form.
    pub fn options(&self) -> Option<T> {
        match self {
            Self::Switch(false) => None,
            Self::Switch(true) => Some(T::default()),
            Self::Enabled(options) => Some(options.clone()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
    struct Section {
        #[serde(default)]
        replicas: u32,
    }

    #[test]
    fn false_deserializes_as_disabled() {
        let toggle: Toggle<Section> = serde_json::from_value(serde_json::json!(false)).unwrap();
        assert!(toggle.is_disabled());
        assert!(toggle.options().is_none());
    }

    #[test]
    fn object_deserializes_as_enabled() {
        let toggle: Toggle<Section> =
            serde_json::from_value(serde_json::json!({ "replicas": 3 })).unwrap();
        assert_eq!(toggle.options(), Some(Section { replicas: 3 }));
    }

    #[test]
    fn true_enables_with_defaults() {
        let toggle: Toggle<Section> = serde_json::from_value(serde_json::json!(true)).unwrap();
        assert_eq!(toggle.options(), Some(Section::default()));
    }

    #[test]
    fn default_is_enabled_with_defaults() {
        let toggle = Toggle::<Section>::default();
        assert!(!toggle.is_disabled());
        assert_eq!(toggle.options(), Some(Section::default()));
    }
}
