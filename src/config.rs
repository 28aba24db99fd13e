use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use xdg::BaseDirectories;

use crate::cache::DEFAULT_MEMO_LIFESPAN_SECS;
use crate::picker::{
    DragCapability, PickerSettings, DEFAULT_DAY_RADIUS, DEFAULT_DRAG_GAIN, DEFAULT_MONTH_RADIUS,
};
use crate::range::DEFAULT_RANGE_OFFSET_MONTHS;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// Authoritative range-limits endpoint; no fetch is attempted when unset
    pub range_url: Option<String>,
    pub range_offset_months: u32,
    pub day_radius: u32,
    pub month_radius: u32,
    pub drag_gain: f64,
    /// Set when the host scrolls dragged strips on its own
    pub native_drag_scroll: bool,
    pub memo_lifespan_secs: u64,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub today_fg: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            range_url: None,
            range_offset_months: DEFAULT_RANGE_OFFSET_MONTHS,
            day_radius: DEFAULT_DAY_RADIUS,
            month_radius: DEFAULT_MONTH_RADIUS,
            drag_gain: DEFAULT_DRAG_GAIN,
            native_drag_scroll: false,
            memo_lifespan_secs: DEFAULT_MEMO_LIFESPAN_SECS,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Picker tunables derived from this configuration
    pub fn picker_settings(&self) -> PickerSettings {
        PickerSettings {
            day_radius: self.day_radius,
            month_radius: self.month_radius,
            drag_gain: self.drag_gain,
            capability: DragCapability::from_native_flag(self.native_drag_scroll),
            ..PickerSettings::default()
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            today_fg: None,
        }
    }
}

impl ThemeConfig {
    /// Colour of today's entry, 50% darker than the selection unless set
    pub fn today_fg(&self) -> Color {
        self.today_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * factor) as u8,
            (g as f32 * factor) as u8,
            (b as f32 * factor) as u8,
        ),
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| {
            parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
        })
        .transpose()
}

/// Parse a color string into a ratatui Color
///
/// Accepts named colors ("cyan", "orange"), hex ("#FF6600", "#f60") and
/// RGB tuples ("255,165,0").
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    let named = match s.as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "orange" => Some(Color::Rgb(255, 165, 0)),
        _ => None,
    };
    if named.is_some() {
        return named;
    }

    if let Some(hex) = s.strip_prefix('#') {
        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => Some(Color::Rgb(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
            )),
            _ => None,
        };
    }

    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Read the config file, falling back to defaults when missing or invalid
pub fn read() -> Config {
    let Some(config_path) = get_config_path() else {
        return Config::default();
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Cannot read {}: {}", config_path.display(), e);
            return Config::default();
        }
    };

    parse(&content).unwrap_or_else(|e| {
        warn!("Invalid config {}: {}", config_path.display(), e);
        Config::default()
    })
}

fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_named() {
        assert_eq!(parse_color("cyan"), Some(Color::Cyan));
        assert_eq!(parse_color("ORANGE"), Some(Color::Rgb(255, 165, 0)));
        assert_eq!(parse_color(" grey "), Some(Color::Gray));
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#FF6600"), Some(Color::Rgb(255, 102, 0)));
        assert_eq!(parse_color("#f60"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_rgb_tuple() {
        assert_eq!(parse_color("255, 102, 0"), Some(Color::Rgb(255, 102, 0)));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("invalid"), None);
        assert_eq!(parse_color("#ZZZ"), None);
        assert_eq!(parse_color("#1234"), None);
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("1,2"), None);
    }

    #[test]
    fn test_today_color_derived_from_selection() {
        let theme = ThemeConfig::default();
        assert_eq!(theme.today_fg(), Color::Rgb(127, 82, 0));

        let theme = ThemeConfig {
            selection_fg: Color::Cyan,
            today_fg: Some(Color::Green),
        };
        assert_eq!(theme.today_fg(), Color::Green);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.range_url, None);
        assert_eq!(config.range_offset_months, 9);
        assert_eq!(config.day_radius, 30);
        assert_eq!(config.month_radius, 6);
        assert_eq!(config.drag_gain, 2.0);
        assert!(!config.native_drag_scroll);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = parse(
            r##"
range_url = "https://example.com/range"
day_radius = 10

[theme]
selection_fg = "#00FFFF"
"##,
        )
        .unwrap();

        assert_eq!(config.range_url.as_deref(), Some("https://example.com/range"));
        assert_eq!(config.day_radius, 10);
        assert_eq!(config.month_radius, 6);
        assert_eq!(config.theme.selection_fg, Color::Rgb(0, 255, 255));
        assert_eq!(config.theme.today_fg, None);
    }

    #[test]
    fn test_invalid_color_rejected() {
        assert!(parse("[theme]\nselection_fg = \"nope\"\n").is_err());
    }

    #[test]
    fn test_picker_settings_from_config() {
        let config = Config {
            day_radius: 5,
            month_radius: 2,
            drag_gain: 1.5,
            native_drag_scroll: true,
            ..Config::default()
        };

        let settings = config.picker_settings();

        assert_eq!(settings.day_radius, 5);
        assert_eq!(settings.month_radius, 2);
        assert_eq!(settings.drag_gain, 1.5);
        assert_eq!(settings.capability, DragCapability::NativeDragScroll);
        assert_eq!(settings.day_geometry, PickerSettings::default().day_geometry);
    }
}
