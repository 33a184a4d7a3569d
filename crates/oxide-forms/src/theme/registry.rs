//! Named theme registry.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use super::Theme;
use crate::error::{FormError, Result};

/// Theme registry configuration as read from JSON.
///
/// ```json
/// {"default": "compact", "themes": {"compact": {"containerClass": "row"}}}
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub themes: IndexMap<String, Theme>,
}

/// The set of themes available to a render context.
///
/// Built once and read-only afterwards; share it behind an [`Arc`].
/// Re-initializing replaces every theme and the default name.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: IndexMap<String, Arc<Theme>>,
    default: Option<String>,
    neutral: Arc<Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self {
            themes: IndexMap::new(),
            default: None,
            neutral: Arc::new(Theme::neutral()),
        }
    }
}

impl ThemeRegistry {
    /// Creates an empty registry; every lookup without a name resolves to
    /// the neutral theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `themes` keyed by their names.
    ///
    /// Fails with [`FormError::ThemeNotFound`] when `default` names a theme
    /// that is not part of `themes`.
    pub fn initialize(
        themes: impl IntoIterator<Item = Theme>,
        default: Option<&str>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        registry.reinitialize(themes, default)?;
        Ok(registry)
    }

    /// Replaces all themes and the default name.
    pub fn reinitialize(
        &mut self,
        themes: impl IntoIterator<Item = Theme>,
        default: Option<&str>,
    ) -> Result<()> {
        let themes: IndexMap<String, Arc<Theme>> = themes
            .into_iter()
            .map(|theme| (theme.name().to_string(), Arc::new(theme)))
            .collect();

        if let Some(name) = default {
            if !themes.contains_key(name) {
                return Err(FormError::ThemeNotFound(name.to_string()));
            }
        }

        debug!(
            themes = ?themes.keys().collect::<Vec<_>>(),
            default = ?default,
            "theme registry initialized"
        );
        self.themes = themes;
        self.default = default.map(String::from);
        Ok(())
    }

    /// Builds a registry from a [`RegistryConfig`].
    pub fn from_config(config: RegistryConfig) -> Result<Self> {
        let themes = config.themes.into_iter().map(|(name, mut theme)| {
            theme.set_name(name);
            theme
        });
        Self::initialize(themes, config.default.as_deref())
    }

    /// Parses a JSON registry configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RegistryConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// A registry holding the built-in `bootstrap5` theme as default.
    pub fn bootstrap5() -> Self {
        let theme = Arc::new(Theme::bootstrap5());
        let mut themes = IndexMap::new();
        themes.insert(theme.name().to_string(), theme);
        Self {
            themes,
            default: Some("bootstrap5".to_string()),
            neutral: Arc::new(Theme::neutral()),
        }
    }

    /// Looks up a theme.
    ///
    /// `None` and the empty name resolve to the default theme, or to the
    /// neutral theme when no default is configured. Any other unknown name
    /// is [`FormError::ThemeNotFound`].
    pub fn get(&self, name: Option<&str>) -> Result<Arc<Theme>> {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => self
                .themes
                .get(name)
                .cloned()
                .ok_or_else(|| FormError::ThemeNotFound(name.to_string())),
            None => Ok(self.default_theme()),
        }
    }

    /// Returns the default theme, falling back to the neutral theme.
    pub fn default_theme(&self) -> Arc<Theme> {
        match self.default.as_deref().and_then(|n| self.themes.get(n)) {
            Some(theme) => Arc::clone(theme),
            None => {
                debug!("no default theme configured, using neutral theme");
                Arc::clone(&self.neutral)
            }
        }
    }

    /// Name of the default theme, if one is configured.
    pub fn default_name(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Returns whether a theme named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Registered theme names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::FieldConfig;

    fn compact() -> Theme {
        Theme::new("compact").global(FieldConfig {
            container_class: Some("row".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_missing_theme() {
        let registry = ThemeRegistry::initialize([compact()], Some("compact")).unwrap();
        let err = registry.get(Some("missing-theme")).unwrap_err();
        assert!(matches!(err, FormError::ThemeNotFound(ref name) if name == "missing-theme"));
        assert!(err.to_string().contains("missing-theme"));
    }

    #[test]
    fn test_default_lookup() {
        let registry = ThemeRegistry::initialize([compact()], Some("compact")).unwrap();
        assert_eq!(registry.get(None).unwrap().name(), "compact");
        assert_eq!(registry.get(Some("")).unwrap().name(), "compact");
        assert_eq!(registry.get(Some("compact")).unwrap().name(), "compact");
    }

    #[test]
    fn test_no_default_falls_back_to_neutral() {
        let registry = ThemeRegistry::initialize([compact()], None).unwrap();
        let theme = registry.get(None).unwrap();
        assert_eq!(theme.name(), "");
        assert_eq!(theme.global_config(), &FieldConfig::new());
    }

    #[test]
    fn test_unknown_default_is_rejected() {
        assert!(matches!(
            ThemeRegistry::initialize([compact()], Some("other")),
            Err(FormError::ThemeNotFound(_))
        ));
    }

    #[test]
    fn test_reinitialize_replaces() {
        let mut registry = ThemeRegistry::initialize([compact()], Some("compact")).unwrap();
        registry
            .reinitialize([Theme::new("wide")], Some("wide"))
            .unwrap();
        assert!(!registry.contains("compact"));
        assert_eq!(registry.get(None).unwrap().name(), "wide");
    }

    #[test]
    fn test_from_json() {
        let registry = ThemeRegistry::from_json(
            r#"{
                "default": "compact",
                "themes": {
                    "compact": {"containerClass": "row", "useContainer": true},
                    "bare": {"useContainer": false}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["compact", "bare"]);
        assert_eq!(registry.get(Some("bare")).unwrap().name(), "bare");
        assert_eq!(
            registry.get(None).unwrap().global_config().container_class.as_deref(),
            Some("row")
        );
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            ThemeRegistry::from_json("{\"themes\": 3}"),
            Err(FormError::Config(_))
        ));
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThemeRegistry>();
    }
}
