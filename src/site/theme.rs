use std::str::FromStr;

use crate::foundation::error::{GlyphfieldError, GlyphfieldResult};
use crate::site::storage::PreferenceStore;

/// Color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Dark background, light particles.
    Dark,
    /// Light background, dark particles.
    Light,
}

impl Theme {
    /// Attribute / storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = GlyphfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(GlyphfieldError::validation(format!(
                "unknown theme \"{other}\""
            ))),
        }
    }
}

/// Owns the theme preference: the persisted value and its document-wide mirror.
#[derive(Debug)]
pub struct ThemeManager<S> {
    store: S,
    key: String,
    attribute: Option<Theme>,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Initialize from the stored preference, or from the system preference when none is stored.
    ///
    /// The resolved theme is applied and persisted immediately.
    pub fn init(store: S, key: impl Into<String>, system_prefers_dark: bool) -> Self {
        let mut this = Self {
            store,
            key: key.into(),
            attribute: None,
        };

        let stored = this.store.get(&this.key).and_then(|v| match v.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(value = %v, error = %e, "ignoring stored theme");
                None
            }
        });
        let theme = stored.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        if let Err(e) = this.set(theme) {
            tracing::warn!(error = %e, "theme preference not persisted");
        }
        this
    }

    /// Apply `theme` to the document attribute and persist it.
    ///
    /// The attribute is updated even when persisting fails.
    pub fn set(&mut self, theme: Theme) -> GlyphfieldResult<()> {
        self.attribute = Some(theme);
        tracing::debug!(theme = theme.as_str(), "theme applied");
        self.store.set(&self.key, theme.as_str())
    }

    /// Flip between dark and light and persist the result.
    pub fn toggle(&mut self) -> GlyphfieldResult<Theme> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Active theme; dark when nothing has been applied.
    pub fn current(&self) -> Theme {
        self.attribute.unwrap_or(Theme::Dark)
    }

    /// Value of the document-wide `data-theme` attribute, if set.
    pub fn attribute(&self) -> Option<&'static str> {
        self.attribute.map(Theme::as_str)
    }

    /// Underlying preference store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
#[path = "../../tests/unit/site/theme.rs"]
mod tests;
