use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    HighContrast,
    /// Any name not listed above; replaced by `Dark` once the config is loaded.
    #[serde(other, skip_serializing)]
    Unknown,
}

/// Colours the renderer pulls from; one per theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub done: Color,
    pub common: Color,
    pub unique: Color,
    pub ready_badge: Color,
    pub synced_badge: Color,
    pub gauge: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark | ThemeName::Unknown => Self {
                accent: Color::Cyan,
                text: Color::White,
                muted: Color::Gray,
                done: Color::Green,
                common: Color::Blue,
                unique: Color::Magenta,
                ready_badge: Color::Blue,
                synced_badge: Color::Green,
                gauge: Color::Cyan,
            },
            ThemeName::Light => Self {
                accent: Color::Blue,
                text: Color::Black,
                muted: Color::DarkGray,
                done: Color::Green,
                common: Color::Blue,
                unique: Color::Magenta,
                ready_badge: Color::Blue,
                synced_badge: Color::Green,
                gauge: Color::Blue,
            },
            ThemeName::HighContrast => Self {
                accent: Color::Yellow,
                text: Color::White,
                muted: Color::White,
                done: Color::LightGreen,
                common: Color::LightCyan,
                unique: Color::LightMagenta,
                ready_badge: Color::LightBlue,
                synced_badge: Color::LightGreen,
                gauge: Color::Yellow,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_distinct_badges() {
        for theme in [ThemeName::Dark, ThemeName::Light, ThemeName::HighContrast] {
            let palette = Palette::for_theme(theme);
            assert_ne!(palette.ready_badge, palette.synced_badge);
        }
    }
}
