use podium::theme::{resolve, Rgb, ThemeError, ThemeSpec};
use std::collections::BTreeMap;

fn spec(colors: &[(&str, &str)]) -> ThemeSpec {
    let mut spec = ThemeSpec::default();
    spec.colors = colors
        .iter()
        .map(|(role, value)| (role.to_string(), value.to_string()))
        .collect::<BTreeMap<_, _>>();
    spec
}

#[test]
fn default_theme_resolves() {
    let tokens = resolve(&ThemeSpec::default()).unwrap();
    assert_eq!(tokens.background(), Rgb::new(0xf9, 0xf9, 0xf9));
    assert_eq!(tokens.foreground(), Rgb::new(0x22, 0x22, 0x22));
    assert_eq!(tokens.font("primary"), Some("Montserrat"));
}

#[test]
fn missing_required_role_fails() {
    let err = resolve(&spec(&[
        ("primary", "white"),
        ("secondary", "#1F2022"),
        ("quaternary", "#CECECE"),
    ]))
    .unwrap_err();
    assert_eq!(
        err,
        ThemeError::MissingRole {
            kind: "colour",
            role: "tertiary".to_string(),
        }
    );
}

#[test]
fn declared_fallback_fills_missing_role() {
    let mut theme = spec(&[
        ("primary", "white"),
        ("secondary", "#1F2022"),
        ("quaternary", "#CECECE"),
    ]);
    theme
        .fallbacks
        .colors
        .insert("tertiary".to_string(), "secondary".to_string());
    let tokens = resolve(&theme).unwrap();
    assert_eq!(tokens.emphasis(), Rgb::new(0x1f, 0x20, 0x22));
}

#[test]
fn fallback_to_absent_role_still_fails() {
    let mut theme = spec(&[("primary", "white"), ("secondary", "black"), ("quaternary", "grey")]);
    theme
        .fallbacks
        .colors
        .insert("tertiary".to_string(), "accent".to_string());
    assert!(matches!(
        resolve(&theme),
        Err(ThemeError::MissingRole { role, .. }) if role == "tertiary"
    ));
}

#[test]
fn quartenary_spelling_is_accepted() {
    let tokens = resolve(&spec(&[
        ("primary", "white"),
        ("secondary", "#1F2022"),
        ("tertiary", "#03A9FC"),
        ("quartenary", "#CECECE"),
    ]))
    .unwrap();
    assert_eq!(tokens.muted(), Rgb::new(0xce, 0xce, 0xce));
    assert_eq!(tokens.color("quartenary"), tokens.color("quaternary"));
}

#[test]
fn resolve_is_idempotent() {
    let theme = spec(&[
        ("primary", "#fff"),
        ("secondary", "#000"),
        ("tertiary", "#f0f"),
        ("quaternary", "#888888"),
        ("js", "#F5DA55"),
    ]);
    assert_eq!(resolve(&theme).unwrap(), resolve(&theme).unwrap());
}

#[test]
fn invalid_colour_is_rejected() {
    let err = resolve(&spec(&[
        ("primary", "#ggg"),
        ("secondary", "black"),
        ("tertiary", "red"),
        ("quaternary", "grey"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ThemeError::InvalidColor { role, .. } if role == "primary"));
}

#[test]
fn deck_roles_must_exist() {
    let tokens = resolve(&ThemeSpec::default()).unwrap();
    assert!(tokens.check_roles(["primary", "tertiary"]).is_ok());
    assert_eq!(
        tokens.check_roles(["js"]).unwrap_err(),
        ThemeError::UnknownRole {
            role: "js".to_string()
        }
    );
}

fn with_fallbacks(fallbacks: &[(&str, &str)]) -> ThemeSpec {
    let mut theme = spec(&[("primary", "white"), ("secondary", "#1F2022")]);
    theme.fallbacks.colors = fallbacks
        .iter()
        .map(|(role, from)| (role.to_string(), from.to_string()))
        .collect();
    theme
}

#[test]
fn two_hop_fallback_resolves_when_middle_role_sorts_last() {
    // quaternary -> tertiary -> secondary
    let tokens = resolve(&with_fallbacks(&[
        ("tertiary", "secondary"),
        ("quaternary", "tertiary"),
    ]))
    .unwrap();
    assert_eq!(tokens.emphasis(), Rgb::new(0x1f, 0x20, 0x22));
    assert_eq!(tokens.muted(), Rgb::new(0x1f, 0x20, 0x22));
}

#[test]
fn two_hop_fallback_resolves_when_middle_role_sorts_first() {
    // tertiary -> quaternary -> secondary
    let tokens = resolve(&with_fallbacks(&[
        ("quaternary", "secondary"),
        ("tertiary", "quaternary"),
    ]))
    .unwrap();
    assert_eq!(tokens.emphasis(), Rgb::new(0x1f, 0x20, 0x22));
    assert_eq!(tokens.muted(), Rgb::new(0x1f, 0x20, 0x22));
}

#[test]
fn fallback_cycle_reports_missing_role() {
    let err = resolve(&with_fallbacks(&[
        ("tertiary", "quaternary"),
        ("quaternary", "tertiary"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ThemeError::MissingRole { kind: "colour", .. }));
}
