//! Pure class-list rewrite planning.
//!
//! The browser layer never decides which classes to touch; it hands the
//! element's current token list to [`plan_color_update`] and applies the
//! resulting [`ClassUpdate`] to the `DomTokenList`. Reads go through
//! [`scan_colors`]. Both are plain functions over string tokens so the
//! matching rules are testable without a DOM.

use crate::color::{ColorChoice, ColorDescriptor, ColorRole, is_color_class};
use smol_str::SmolStr;

/// The set of per-role colors currently on an element, derived from its
/// class list. Never stored independently of the DOM; this is a read
/// projection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementColorState {
    pub text: Option<ColorDescriptor>,
    pub bg: Option<ColorDescriptor>,
    pub border: Option<ColorDescriptor>,
}

impl ElementColorState {
    pub fn get(&self, role: ColorRole) -> Option<&ColorDescriptor> {
        match role {
            ColorRole::Text => self.text.as_ref(),
            ColorRole::Bg => self.bg.as_ref(),
            ColorRole::Border => self.border.as_ref(),
        }
    }

    pub fn set(&mut self, role: ColorRole, descriptor: Option<ColorDescriptor>) {
        match role {
            ColorRole::Text => self.text = descriptor,
            ColorRole::Bg => self.bg = descriptor,
            ColorRole::Border => self.border = descriptor,
        }
    }

    /// The class token for a role, if a color is set.
    pub fn class_for(&self, role: ColorRole) -> Option<SmolStr> {
        self.get(role).map(|d| d.class_name(role))
    }
}

/// A planned mutation of an element's class list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassUpdate {
    /// Existing tokens to remove (every current color class of the role).
    pub remove: Vec<SmolStr>,
    /// The token to add afterwards, absent for [`ColorChoice::Clear`].
    pub add: Option<SmolStr>,
    /// Add the bare `border` utility as well: a border color without a
    /// border width is invisible.
    pub add_border_width: bool,
}

/// A generic border width token: `border` or `border-{digits}`.
fn is_border_width_class(token: &str) -> bool {
    token == "border"
        || token
            .strip_prefix("border-")
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Plan the class-list rewrite that applies `choice` for `role`.
///
/// Every current color class of the role is removed first, so an element
/// ends up with at most one class per role no matter what sequence of
/// updates it has seen. Removal matches the applier's broad pattern
/// ([`is_color_class`], any numeric opacity), wider than what the reader
/// recognizes, so a stale out-of-step token still gets swept away.
/// Applying the same class twice is a no-op by construction (the token
/// lands in both `remove` and `add`).
pub fn plan_color_update<'a>(
    classes: impl IntoIterator<Item = &'a str>,
    role: ColorRole,
    choice: &ColorChoice,
) -> ClassUpdate {
    let mut remove = Vec::new();
    let mut has_border_width = false;

    for token in classes {
        if is_color_class(role, token) {
            remove.push(SmolStr::new(token));
        }
        if is_border_width_class(token) {
            has_border_width = true;
        }
    }

    let add = choice.as_class().map(SmolStr::new);
    let add_border_width = role == ColorRole::Border && add.is_some() && !has_border_width;

    ClassUpdate {
        remove,
        add,
        add_border_width,
    }
}

/// Scan a class list for the first color class of each role.
///
/// Tokens that fail to parse are ignored; the element degrades to
/// "uncolored" for that role. Never mutates anything.
pub fn scan_colors<'a>(classes: impl IntoIterator<Item = &'a str>) -> ElementColorState {
    let mut state = ElementColorState::default();
    for token in classes {
        for role in ColorRole::ALL {
            match ColorDescriptor::parse(role, token) {
                Some(descriptor) => {
                    if state.get(role).is_none() {
                        state.set(role, Some(descriptor));
                    }
                }
                None => {
                    if is_color_class(role, token) {
                        tracing::debug!(
                            token,
                            role = role.prefix(),
                            "unreadable color class treated as uncolored"
                        );
                    }
                }
            }
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(classes: &mut Vec<String>, role: ColorRole, choice: &ColorChoice) {
        let plan = plan_color_update(classes.iter().map(|s| s.as_str()), role, choice);
        classes.retain(|c| !plan.remove.iter().any(|r| r == c));
        if let Some(add) = &plan.add {
            if !classes.iter().any(|c| c == add.as_str()) {
                classes.push(add.to_string());
            }
        }
        if plan.add_border_width {
            classes.push("border".to_string());
        }
    }

    fn color_classes(classes: &[String], role: ColorRole) -> Vec<&str> {
        classes
            .iter()
            .map(|s| s.as_str())
            .filter(|c| ColorDescriptor::parse(role, c).is_some())
            .collect()
    }

    #[test]
    fn test_at_most_one_class_per_role() {
        let mut classes = vec!["p-4".to_string(), "bg-red-500".to_string()];
        for token in ["bg-blue-500", "bg-blue-500/40", "bg-emerald-50", "bg-white"] {
            apply(&mut classes, ColorRole::Bg, &ColorChoice::from_token(token));
            assert_eq!(color_classes(&classes, ColorRole::Bg).len(), 1);
        }
        assert!(classes.contains(&"p-4".to_string()));
    }

    #[test]
    fn test_opacity_replaces_existing() {
        let mut classes = vec!["bg-blue-500".to_string()];
        apply(
            &mut classes,
            ColorRole::Bg,
            &ColorChoice::from_token("bg-blue-500/40"),
        );
        assert!(classes.contains(&"bg-blue-500/40".to_string()));
        assert!(!classes.contains(&"bg-blue-500".to_string()));
    }

    #[test]
    fn test_none_clears_without_replacing() {
        let mut classes = vec!["text-rose-700".to_string(), "font-bold".to_string()];
        apply(&mut classes, ColorRole::Text, &ColorChoice::Clear);
        assert_eq!(scan_colors(classes.iter().map(|s| s.as_str())).text, None);
        assert!(classes.contains(&"font-bold".to_string()));
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let mut classes = vec!["bg-sky-300".to_string()];
        let choice = ColorChoice::from_token("bg-sky-300");
        apply(&mut classes, ColorRole::Bg, &choice);
        apply(&mut classes, ColorRole::Bg, &choice);
        assert_eq!(classes, vec!["bg-sky-300".to_string()]);
    }

    #[test]
    fn test_stale_nondecade_opacity_is_removed() {
        // The reader does not recognize /45, but the applier must still
        // sweep it out before adding the replacement.
        let plan = plan_color_update(
            ["bg-blue-500/45"],
            ColorRole::Bg,
            &ColorChoice::from_token("bg-red-500"),
        );
        assert_eq!(plan.remove, vec![SmolStr::new("bg-blue-500/45")]);

        let mut classes = vec!["bg-blue-500/45".to_string()];
        apply(
            &mut classes,
            ColorRole::Bg,
            &ColorChoice::from_token("bg-red-500"),
        );
        assert_eq!(classes, vec!["bg-red-500".to_string()]);
    }

    #[test]
    fn test_border_auto_width() {
        let mut classes = vec!["rounded".to_string()];
        apply(
            &mut classes,
            ColorRole::Border,
            &ColorChoice::from_token("border-red-500"),
        );
        assert!(classes.contains(&"border".to_string()));
    }

    #[test]
    fn test_border_existing_width_untouched() {
        let mut classes = vec!["border-2".to_string()];
        apply(
            &mut classes,
            ColorRole::Border,
            &ColorChoice::from_token("border-red-500"),
        );
        assert!(classes.contains(&"border-2".to_string()));
        assert!(!classes.contains(&"border".to_string()));
    }

    #[test]
    fn test_border_clear_adds_no_width() {
        let plan = plan_color_update(
            ["border-red-500"].into_iter(),
            ColorRole::Border,
            &ColorChoice::Clear,
        );
        assert!(!plan.add_border_width);
        assert_eq!(plan.remove, vec![SmolStr::new("border-red-500")]);
    }

    #[test]
    fn test_scan_finds_first_match_per_role() {
        let state = scan_colors(["p-4", "text-red-500", "bg-blue-500/40", "text-green-500"]);
        assert_eq!(state.class_for(ColorRole::Text).unwrap(), "text-red-500");
        assert_eq!(state.class_for(ColorRole::Bg).unwrap(), "bg-blue-500/40");
        assert_eq!(state.border, None);
    }

    #[test]
    fn test_scan_ignores_malformed() {
        let state = scan_colors(["text-mauve-500", "bg-blue-500/45", "border-2"]);
        assert_eq!(state, ElementColorState::default());
    }

    #[test]
    fn test_round_trip_through_scan() {
        for (family, shade) in [("blue", Some(500)), ("white", None)] {
            for opacity in [100_u8, 50, 10] {
                let descriptor = ColorDescriptor::new(family, shade, opacity).unwrap();
                for role in ColorRole::ALL {
                    let class = descriptor.class_name(role);
                    let mut classes: Vec<String> = vec![];
                    apply(&mut classes, role, &ColorChoice::Class(class.clone()));
                    let state = scan_colors(classes.iter().map(|s| s.as_str()));
                    assert_eq!(state.class_for(role).unwrap(), class);
                }
            }
        }
    }
}
