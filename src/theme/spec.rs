use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Colour roles every theme must provide (directly or via a fallback).
pub const REQUIRED_COLOR_ROLES: [&str; 4] = ["primary", "secondary", "tertiary", "quaternary"];

/// Font roles every theme must provide (directly or via a fallback).
pub const REQUIRED_FONT_ROLES: [&str; 1] = ["primary"];

/// Abstract theme: semantic role name → raw value.
///
/// Any colour role beyond the required four is an accent role (e.g. a
/// deck may declare `js = "#F5DA55"` and use it as a slide background).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    pub colors: BTreeMap<String, String>,
    pub fonts: BTreeMap<String, String>,
    pub fallbacks: Fallbacks,
}

/// Roles allowed to borrow another role's value when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub colors: BTreeMap<String, String>,
    pub fonts: BTreeMap<String, String>,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        let colors = [
            ("primary", "#f9f9f9"),
            ("secondary", "#222222"),
            ("tertiary", "#ff4081"),
            ("quaternary", "#cecece"),
        ];
        let fonts = [("primary", "Montserrat"), ("secondary", "Helvetica")];
        Self {
            colors: to_map(&colors),
            fonts: to_map(&fonts),
            fallbacks: Fallbacks::default(),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
