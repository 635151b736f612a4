use ratatui::style::Color;

use crate::analysis::Severity;
use crate::ui::status::StatusLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return ColorSupport::Mono;
    }
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub section_title: Color,
    pub status_good: Color,
    pub status_warning: Color,
    pub status_critical: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    /// Critical, high, medium, low.
    pub severity_colors: [Color; 4],
}

impl Theme {
    pub fn from_config(theme_name: &str, support: ColorSupport) -> Self {
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            "mono" | "monochrome" => Self::mono(),
            _ => Self::dark(),
        };

        if support == ColorSupport::Mono {
            theme = Self::mono();
        }

        theme.apply_color_support(support);
        theme
    }

    pub fn level_color(&self, level: StatusLevel) -> Color {
        match level {
            StatusLevel::Good => self.status_good,
            StatusLevel::Warning => self.status_warning,
            StatusLevel::Critical => self.status_critical,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Critical => self.severity_colors[0],
            Severity::High => self.severity_colors[1],
            Severity::Medium => self.severity_colors[2],
            Severity::Low => self.severity_colors[3],
        }
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.header_accent_bg = map(self.header_accent_bg);
        self.header_accent_fg = map(self.header_accent_fg);
        self.overlay_border = map(self.overlay_border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.section_title = map(self.section_title);
        self.status_good = map(self.status_good);
        self.status_warning = map(self.status_warning);
        self.status_critical = map(self.status_critical);
        self.statusbar_bg = map(self.statusbar_bg);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
        self.severity_colors = self.severity_colors.map(map);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Cyan,
            header_accent_fg: Color::Black,
            overlay_border: Color::DarkGray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            section_title: Color::Rgb(103, 232, 249),
            status_good: Color::Rgb(52, 211, 153),
            status_warning: Color::Rgb(250, 204, 21),
            status_critical: Color::Rgb(239, 68, 68),
            statusbar_bg: Color::DarkGray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            severity_colors: [
                Color::Rgb(239, 68, 68),
                Color::Rgb(249, 115, 22),
                Color::Rgb(250, 204, 21),
                Color::Rgb(52, 211, 153),
            ],
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            overlay_border: Color::Rgb(150, 150, 150),
            text_primary: Color::Black,
            text_secondary: Color::DarkGray,
            section_title: Color::Rgb(70, 130, 180),
            status_good: Color::Rgb(0, 120, 0),
            status_warning: Color::Rgb(180, 130, 0),
            status_critical: Color::Rgb(200, 30, 30),
            statusbar_bg: Color::Rgb(220, 220, 220),
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            severity_colors: [
                Color::Rgb(200, 30, 30),
                Color::Rgb(210, 100, 20),
                Color::Rgb(180, 130, 0),
                Color::Rgb(0, 120, 0),
            ],
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::White,
            header_accent_fg: Color::Black,
            overlay_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            section_title: Color::White,
            status_good: Color::Gray,
            status_warning: Color::White,
            status_critical: Color::White,
            statusbar_bg: Color::Black,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            severity_colors: [Color::White, Color::White, Color::Gray, Color::Gray],
        }
    }
}

pub fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
