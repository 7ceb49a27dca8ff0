use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::color::Rgb;
use super::spec::{ThemeSpec, REQUIRED_COLOR_ROLES, REQUIRED_FONT_ROLES};

/// Errors raised while resolving or checking a theme. All are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("Theme is missing required {kind} role '{role}'")]
    MissingRole { kind: &'static str, role: String },

    #[error("Theme colour role '{role}' has invalid value '{value}'")]
    InvalidColor { role: String, value: String },

    #[error("Deck references unknown colour role '{role}'")]
    UnknownRole { role: String },
}

/// Concrete style values produced from a [`ThemeSpec`]. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTokens {
    colors: BTreeMap<String, Rgb>,
    fonts: BTreeMap<String, String>,
}

impl ThemeTokens {
    pub fn color(&self, role: &str) -> Option<Rgb> {
        self.colors.get(canonical_role(role)).copied()
    }

    /// Font family for a role. The terminal view cannot switch fonts, so
    /// this only feeds the `check` report.
    pub fn font(&self, role: &str) -> Option<&str> {
        self.fonts.get(role).map(String::as_str)
    }

    /// Default slide background.
    pub fn background(&self) -> Rgb {
        self.colors["primary"]
    }

    /// Default text colour.
    pub fn foreground(&self) -> Rgb {
        self.colors["secondary"]
    }

    /// Heading and emphasis colour.
    pub fn emphasis(&self) -> Rgb {
        self.colors["tertiary"]
    }

    /// Muted colour for quotes, captions and placeholders.
    pub fn muted(&self) -> Rgb {
        self.colors["quaternary"]
    }

    pub fn color_roles(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Check that every role the deck refers to exists.
    pub fn check_roles<'a>(
        &self,
        roles: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ThemeError> {
        for role in roles {
            if self.color(role).is_none() {
                return Err(ThemeError::UnknownRole {
                    role: role.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Spectacle-era decks spell the fourth role `quartenary`.
fn canonical_role(role: &str) -> &str {
    match role {
        "quartenary" => "quaternary",
        other => other,
    }
}

/// Resolve a theme spec into tokens.
///
/// Pure: equal specs always produce equal tokens. Required roles that are
/// absent may only be filled from a fallback the spec itself declares.
pub fn resolve(spec: &ThemeSpec) -> Result<ThemeTokens, ThemeError> {
    let mut colors = BTreeMap::new();
    for (role, value) in &spec.colors {
        let rgb = Rgb::parse(value).ok_or_else(|| ThemeError::InvalidColor {
            role: role.clone(),
            value: value.clone(),
        })?;
        colors.insert(canonical_role(role).to_string(), rgb);
    }

    let declared: BTreeMap<String, String> = spec
        .fallbacks
        .colors
        .iter()
        .map(|(role, from)| (canonical_role(role).to_string(), canonical_role(from).to_string()))
        .collect();
    apply_fallbacks(&mut colors, &declared);
    require(&colors, &REQUIRED_COLOR_ROLES, "colour")?;

    let mut fonts: BTreeMap<String, String> = spec.fonts.clone();
    apply_fallbacks(&mut fonts, &spec.fallbacks.fonts);
    require(&fonts, &REQUIRED_FONT_ROLES, "font")?;

    Ok(ThemeTokens { colors, fonts })
}

/// Fill each absent role by following its fallback chain to the first role
/// that has a value. A chain that loops or ends on an absent role fills
/// nothing.
fn apply_fallbacks<V: Clone>(values: &mut BTreeMap<String, V>, fallbacks: &BTreeMap<String, String>) {
    for role in fallbacks.keys() {
        if values.contains_key(role) {
            continue;
        }
        let mut visited = BTreeSet::from([role.as_str()]);
        let mut from = fallbacks.get(role);
        while let Some(next) = from {
            if let Some(value) = values.get(next).cloned() {
                tracing::debug!(role = %role, from = %next, "Theme role filled from fallback");
                values.insert(role.clone(), value);
                break;
            }
            if !visited.insert(next.as_str()) {
                tracing::warn!(role = %role, "Theme fallback chain loops");
                break;
            }
            from = fallbacks.get(next);
        }
    }
}

fn require<V>(
    values: &BTreeMap<String, V>,
    roles: &[&str],
    kind: &'static str,
) -> Result<(), ThemeError> {
    match roles.iter().find(|role| !values.contains_key(**role)) {
        Some(role) => Err(ThemeError::MissingRole {
            kind,
            role: role.to_string(),
        }),
        None => Ok(()),
    }
}
