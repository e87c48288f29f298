//! Utility color classes: descriptor ⇄ class-name translation.
//!
//! A color on an element is represented by a single utility class token of
//! the form `{role}-{family}`, `{role}-{family}-{shade}`, optionally with a
//! `/{opacity}` suffix (e.g. `bg-blue-500/40`). The writer side is strict
//! (only known families, shade required for hues); the reader side is
//! deliberately lenient so externally-injected markup degrades to
//! "uncolored" instead of failing.

use smol_str::{SmolStr, format_smolstr};

/// Every family a color class may name. One shared constant so the
/// applier and the reader cannot drift.
///
/// `white`, `black` and `transparent` are shadeless; the rest are hues
/// carrying a numeric shade.
pub const COLOR_FAMILIES: [&str; 25] = [
    "white", "black", "transparent", "red", "orange", "amber", "yellow", "lime", "green",
    "emerald", "teal", "cyan", "sky", "blue", "indigo", "violet", "purple", "fuchsia", "pink",
    "rose", "slate", "gray", "zinc", "neutral", "stone",
];

/// Discrete shade levels for hue families.
pub const SHADES: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Accepted opacity percentages (the `/{n}` suffix).
pub const OPACITY_STEPS: [u8; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

fn is_known_family(family: &str) -> bool {
    COLOR_FAMILIES.contains(&family)
}

fn is_shadeless(family: &str) -> bool {
    matches!(family, "white" | "black" | "transparent")
}

/// Which visual property a color class affects, and thereby which
/// class-name prefix it carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Text,
    Bg,
    Border,
}

impl ColorRole {
    pub const ALL: [ColorRole; 3] = [ColorRole::Text, ColorRole::Bg, ColorRole::Border];

    /// The class-name prefix for this role.
    pub fn prefix(&self) -> &'static str {
        match self {
            ColorRole::Text => "text",
            ColorRole::Bg => "bg",
            ColorRole::Border => "border",
        }
    }

    /// Parse a role from its class-name prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "text" => Some(ColorRole::Text),
            "bg" => Some(ColorRole::Bg),
            "border" => Some(ColorRole::Border),
            _ => None,
        }
    }
}

/// Structured form of one utility color class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorDescriptor {
    /// One of [`COLOR_FAMILIES`].
    pub family: SmolStr,
    /// Shade level; always `None` for white/black/transparent.
    pub shade: Option<u16>,
    /// 10..=100. 100 means no `/{n}` suffix.
    pub opacity_percent: u8,
}

impl ColorDescriptor {
    /// Build a descriptor, validating family membership, the shade
    /// requirement and the opacity step.
    ///
    /// Shadeless families ignore any shade passed for them; hue families
    /// require one.
    pub fn new(family: &str, shade: Option<u16>, opacity_percent: u8) -> Option<Self> {
        if !is_known_family(family) || !OPACITY_STEPS.contains(&opacity_percent) {
            return None;
        }
        let shade = if is_shadeless(family) {
            None
        } else {
            Some(shade?)
        };
        Some(Self {
            family: family.into(),
            shade,
            opacity_percent,
        })
    }

    /// The class-name token for this descriptor under the given role.
    pub fn class_name(&self, role: ColorRole) -> SmolStr {
        let base = match self.shade {
            Some(shade) => format_smolstr!("{}-{}-{}", role.prefix(), self.family, shade),
            None => format_smolstr!("{}-{}", role.prefix(), self.family),
        };
        if self.opacity_percent < 100 {
            format_smolstr!("{}/{}", base, self.opacity_percent)
        } else {
            base
        }
    }

    /// Parse a class token as a color class of the given role.
    ///
    /// Lenient on shades (any numeric value is accepted, even on shadeless
    /// families) so that foreign-but-recognizable classes are still seen
    /// and replaced as colors of that role. Returns `None` for anything
    /// else; a malformed class is "no current color", never an error.
    pub fn parse(role: ColorRole, token: &str) -> Option<Self> {
        let rest = token.strip_prefix(role.prefix())?.strip_prefix('-')?;

        let (base, opacity) = match rest.split_once('/') {
            Some((base, suffix)) => {
                let pct = suffix.parse::<u8>().ok()?;
                if !OPACITY_STEPS.contains(&pct) {
                    return None;
                }
                (base, pct)
            }
            None => (rest, 100),
        };

        if is_known_family(base) {
            return Some(Self {
                family: base.into(),
                shade: None,
                opacity_percent: opacity,
            });
        }

        let (family, shade) = base.rsplit_once('-')?;
        if !is_known_family(family) {
            return None;
        }
        let shade = shade.parse::<u16>().ok()?;
        Some(Self {
            family: family.into(),
            shade: Some(shade),
            opacity_percent: opacity,
        })
    }
}

/// Whether a token is a color class of the role under the applier's
/// broad pattern: any numeric shade and any numeric opacity suffix are
/// accepted.
///
/// Broader than [`ColorDescriptor::parse`] on purpose. The reader only
/// recognizes the discrete opacity steps, but the applier must still
/// remove a stale `bg-blue-500/45` before adding a replacement, or the
/// element would end up carrying two classes of the role.
pub fn is_color_class(role: ColorRole, token: &str) -> bool {
    let Some(rest) = token
        .strip_prefix(role.prefix())
        .and_then(|r| r.strip_prefix('-'))
    else {
        return false;
    };

    let base = match rest.split_once('/') {
        Some((base, suffix)) => {
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return false;
            }
            base
        }
        None => rest,
    };

    if is_known_family(base) {
        return true;
    }
    match base.rsplit_once('-') {
        Some((family, shade)) => {
            is_known_family(family)
                && !shade.is_empty()
                && shade.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// What a selection has actually asked for: a concrete class, or an
/// explicit "clear this role".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorChoice {
    /// Remove any class of the role without adding a replacement.
    Clear,
    /// Apply this class token verbatim (e.g. `bg-blue-500/40`).
    Class(SmolStr),
}

impl ColorChoice {
    /// Interpret a picker token, where the literal `none` means clear.
    pub fn from_token(token: &str) -> Self {
        if token == "none" {
            ColorChoice::Clear
        } else {
            ColorChoice::Class(token.into())
        }
    }

    /// The class to add, if any.
    pub fn as_class(&self) -> Option<&str> {
        match self {
            ColorChoice::Clear => None,
            ColorChoice::Class(class) => Some(class),
        }
    }
}

/// The fill token for a picker swatch previewing `family`/`shade`.
///
/// White gets a visible border so it stays visible on white backgrounds;
/// black is solid; hues use their background class. Only ever rendered in
/// picker chrome, never written to an edited element.
pub fn preview_swatch(family: &str, shade: Option<u16>) -> SmolStr {
    match family {
        "white" => SmolStr::new_static("bg-white border border-gray-200"),
        "black" => SmolStr::new_static("bg-black"),
        _ => match shade {
            Some(shade) => format_smolstr!("bg-{}-{}", family, shade),
            None => format_smolstr!("bg-{}", family),
        },
    }
}
