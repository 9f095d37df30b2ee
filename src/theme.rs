use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

pub const DEFAULT_THEME: &str = "E-sevai";

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

const fn hex(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Colors used by the screen, named by the part they paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub muted: Color,

    pub navbar_bg: Color,
    pub navbar_fg: Color,

    pub dropdown_bg: Color,
    pub divider: Color,

    pub description_bg: Color,

    pub card_bg: Color,
    pub card_border: Color,
    pub accent: Color,
    pub focus: Color,

    pub toast_bg: Color,
    pub toast_border: Color,
    pub key_hint: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// The light E-sevai palette.
    #[must_use]
    pub const fn esevai() -> Self {
        Self {
            background: hex(0xF8_F8_F8),
            text: hex(0x33_33_33),
            muted: hex(0x88_88_88),
            navbar_bg: hex(0x1D_3D_47),
            navbar_fg: hex(0xFF_FF_FF),
            dropdown_bg: hex(0xFF_FF_FF),
            divider: hex(0xDD_DD_DD),
            description_bg: hex(0xA1_CE_DC),
            card_bg: hex(0xFF_FF_FF),
            card_border: hex(0xCC_CC_CC),
            accent: hex(0x1D_3D_47),
            focus: hex(0x2E_86_AB),
            toast_bg: hex(0x1D_3D_47),
            toast_border: hex(0xA1_CE_DC),
            key_hint: hex(0x1D_3D_47),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a theme from a Catppuccin flavor.
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            background: catppuccin_to_color(&c.base),
            text: catppuccin_to_color(&c.text),
            muted: catppuccin_to_color(&c.overlay1),
            navbar_bg: catppuccin_to_color(&c.crust),
            navbar_fg: catppuccin_to_color(&c.lavender),
            dropdown_bg: catppuccin_to_color(&c.mantle),
            divider: catppuccin_to_color(&c.surface1),
            description_bg: catppuccin_to_color(&c.surface0),
            card_bg: catppuccin_to_color(&c.mantle),
            card_border: catppuccin_to_color(&c.surface2),
            accent: catppuccin_to_color(&c.blue),
            focus: catppuccin_to_color(&c.mauve),
            toast_bg: catppuccin_to_color(&c.surface0),
            toast_border: catppuccin_to_color(&c.green),
            key_hint: catppuccin_to_color(&c.peach),
            border_type: BorderType::Rounded,
        }
    }

    /// Catppuccin Mocha theme (dark).
    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    /// Catppuccin Latte theme (light).
    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Catppuccin Frappé theme (dark).
    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    /// Catppuccin Macchiato theme (dark).
    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::esevai()
    }
}

/// Information about a theme for lookup by name.
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Display name for the theme
    pub name: &'static str,
    /// The theme instance
    pub theme: Theme,
}

impl ThemeInfo {
    const fn new(name: &'static str, theme: Theme) -> Self {
        Self { name, theme }
    }
}

/// Returns a list of all available built-in themes.
pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo::new(DEFAULT_THEME, Theme::esevai()),
        ThemeInfo::new("Catppuccin Mocha", Theme::catppuccin_mocha()),
        ThemeInfo::new("Catppuccin Macchiato", Theme::catppuccin_macchiato()),
        ThemeInfo::new("Catppuccin Frappé", Theme::catppuccin_frappe()),
        ThemeInfo::new("Catppuccin Latte", Theme::catppuccin_latte()),
    ]
}

/// Look up a theme by name, ignoring case. Returns the default theme if not found.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| t.theme)
        .unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, falling back to {}", name, DEFAULT_THEME);
            Theme::default()
        })
}
