//! Theme system for the TUI.
//!
//! Each theme is six base colors (ANSI 256 indices) from which every
//! semantic UI role is derived as a ratatui `Style`.

use ratatui::style::{Color, Modifier, Style};

/// Registered theme names, in cycle order.
pub const THEME_NAMES: [&str; 3] = ["default", "dark", "ocean"];

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Default,
    Dark,
    Ocean,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "dark" => Some(Self::Dark),
            "ocean" => Some(Self::Ocean),
            _ => None,
        }
    }

    /// Resolve a configured name, falling back to `Default` for unknown names.
    pub fn from_config_name(s: &str) -> Self {
        Self::from_str_name(s).unwrap_or_else(|| {
            tracing::warn!(theme = %s, "Unknown theme, using default");
            Self::Default
        })
    }

    /// Cycle: default → dark → ocean → default.
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::Dark,
            Self::Dark => Self::Ocean,
            Self::Ocean => Self::Default,
        }
    }

    /// Name as stored in the config file.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => THEME_NAMES[0],
            Self::Dark => THEME_NAMES[1],
            Self::Ocean => THEME_NAMES[2],
        }
    }

    fn base(self) -> BaseColors {
        match self {
            Self::Default => BaseColors {
                primary: 62,
                secondary: 240,
                accent: 205,
                background: 230,
                error: 196,
                success: 46,
            },
            Self::Dark => BaseColors {
                primary: 39,
                secondary: 245,
                accent: 212,
                background: 235,
                error: 196,
                success: 46,
            },
            Self::Ocean => BaseColors {
                primary: 33,
                secondary: 39,
                accent: 45,
                background: 195,
                error: 196,
                success: 46,
            },
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        ColorPalette::from_base(self.base())
    }
}

/// Advance a configured theme name to the next registered one.
///
/// An unrecognised name moves to the first registered theme.
pub fn next_theme_name(current: &str) -> &'static str {
    match ThemeVariant::from_str_name(current) {
        Some(variant) => variant.next().name(),
        None => THEME_NAMES[0],
    }
}

#[derive(Debug, Clone, Copy)]
struct BaseColors {
    primary: u8,
    secondary: u8,
    accent: u8,
    background: u8,
    error: u8,
    success: u8,
}

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    // -- Chrome --
    pub title: Style,
    pub border: Style,
    pub banner: Style,
    pub status_hint: Style,
    pub status_error: Style,
    pub status_loading: Style,

    // -- Lists (menu, articles, feeds, configure) --
    pub item_normal: Style,
    pub item_selected: Style,
    pub article_time: Style,
    pub article_source: Style,

    // -- Detail --
    pub detail_heading: Style,
    pub detail_meta: Style,
    pub detail_link: Style,
    pub detail_body: Style,

    // -- Input prompt --
    pub input: Style,
}

impl ColorPalette {
    fn from_base(c: BaseColors) -> Self {
        let primary = Color::Indexed(c.primary);
        let secondary = Color::Indexed(c.secondary);
        let accent = Color::Indexed(c.accent);
        let background = Color::Indexed(c.background);

        Self {
            title: Style::default().fg(primary).add_modifier(Modifier::BOLD),
            border: Style::default().fg(secondary),
            banner: Style::default()
                .fg(background)
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            status_hint: Style::default().fg(secondary),
            status_error: Style::default().fg(Color::Indexed(c.error)),
            status_loading: Style::default().fg(Color::Indexed(c.success)),

            item_normal: Style::default(),
            item_selected: Style::default()
                .fg(background)
                .bg(primary)
                .add_modifier(Modifier::BOLD),
            article_time: Style::default().fg(secondary),
            article_source: Style::default().fg(accent),

            detail_heading: Style::default().fg(primary).add_modifier(Modifier::BOLD),
            detail_meta: Style::default().fg(secondary),
            detail_link: Style::default()
                .fg(accent)
                .add_modifier(Modifier::UNDERLINED),
            detail_body: Style::default(),

            input: Style::default().fg(accent),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        ThemeVariant::Default.palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Ocean"),
            Some(ThemeVariant::Ocean)
        );
        assert_eq!(
            ThemeVariant::from_str_name("DEFAULT"),
            Some(ThemeVariant::Default)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn unknown_config_name_falls_back() {
        assert_eq!(ThemeVariant::from_config_name("neon"), ThemeVariant::Default);
    }

    #[test]
    fn cycle_visits_every_theme_and_wraps() {
        let mut names = vec![];
        let mut v = ThemeVariant::Default;
        for _ in 0..THEME_NAMES.len() {
            names.push(v.name());
            v = v.next();
        }
        assert_eq!(names, THEME_NAMES.to_vec());
        assert_eq!(v, ThemeVariant::Default);
    }

    #[test]
    fn next_theme_name_by_string() {
        assert_eq!(next_theme_name("default"), "dark");
        assert_eq!(next_theme_name("dark"), "ocean");
        assert_eq!(next_theme_name("ocean"), "default");
        assert_eq!(next_theme_name("solarized"), "default");
    }

    #[test]
    fn palettes_use_registered_colors() {
        let default = ThemeVariant::Default.palette();
        assert_eq!(default.title.fg, Some(Color::Indexed(62)));
        assert_eq!(default.status_error.fg, Some(Color::Indexed(196)));

        let ocean = ThemeVariant::Ocean.palette();
        assert_eq!(ocean.title.fg, Some(Color::Indexed(33)));
        assert_eq!(ocean.article_source.fg, Some(Color::Indexed(45)));
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(ThemeVariant::Default.palette(), ThemeVariant::Dark.palette());
        assert_ne!(ThemeVariant::Dark.palette(), ThemeVariant::Ocean.palette());
    }
}
