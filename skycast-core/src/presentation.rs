//! The category → presentation mapping.
//!
//! Pure and total: every [`WeatherCategory`] has a fixed descriptor, with
//! [`WeatherCategory::Other`] carrying the shared mist-styled fallback. No
//! I/O, no state; recompute it on every render.

use crate::model::{WeatherCategory, WeatherObservation};

/// 24-bit color, with its `#RRGGBB` form for display layers that want hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

/// Status-bar rendering hint carried alongside the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusStyle {
    Light,
    Dark,
    #[default]
    Default,
}

/// The fixed visual/text bundle for one weather category.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// Two gradient stops, top to bottom.
    pub gradient: [Rgb; 2],
    pub status_style: StatusStyle,
    pub text_color: Rgb,
    /// Icon-font glyph name; when absent the service-hosted image applies.
    pub glyph: Option<&'static str>,
    /// The wire category, verbatim.
    pub title: String,
    /// The service's free-text description.
    pub subtitle: String,
    /// Hardcoded bilingual caption for the category.
    pub caption: &'static str,
    icon_code: String,
}

struct CategoryStyle {
    gradient: [Rgb; 2],
    status_style: StatusStyle,
    text_color: Rgb,
    glyph: &'static str,
    caption: &'static str,
}

fn style_for(category: WeatherCategory) -> CategoryStyle {
    match category {
        WeatherCategory::Clear => CategoryStyle {
            gradient: [Rgb::new(0x24, 0xC6, 0xDC), Rgb::new(0x51, 0x4A, 0x9D)],
            status_style: StatusStyle::Light,
            text_color: WHITE,
            glyph: "weather-sunny",
            caption: "clear sky; 맑은 하늘",
        },
        WeatherCategory::Clouds => CategoryStyle {
            gradient: [Rgb::new(0x2B, 0xC0, 0xE4), Rgb::new(0xEA, 0xEC, 0xC6)],
            status_style: StatusStyle::Dark,
            text_color: Rgb::new(0x32, 0x32, 0x32),
            glyph: "weather-cloudy",
            caption: "few clouds; 구름 조금",
        },
        WeatherCategory::Thunderstorm => CategoryStyle {
            gradient: [Rgb::new(0x28, 0x30, 0x48), Rgb::new(0x85, 0x93, 0x98)],
            status_style: StatusStyle::Light,
            text_color: WHITE,
            glyph: "weather-lightning",
            caption: "thunderstorm; 천둥번개",
        },
        WeatherCategory::Drizzle => CategoryStyle {
            gradient: [Rgb::new(0x13, 0x4E, 0x5E), Rgb::new(0x71, 0xB2, 0x80)],
            status_style: StatusStyle::Light,
            text_color: WHITE,
            glyph: "weather-pouring",
            caption: "shower rain; 많은 비",
        },
        WeatherCategory::Rain => CategoryStyle {
            gradient: [Rgb::new(0x23, 0x25, 0x26), Rgb::new(0x41, 0x43, 0x45)],
            status_style: StatusStyle::Light,
            text_color: WHITE,
            glyph: "weather-lightning-rainy",
            caption: "rain; 비",
        },
        WeatherCategory::Snow => CategoryStyle {
            gradient: [Rgb::new(0x5C, 0x25, 0x8D), Rgb::new(0x43, 0x89, 0xA2)],
            status_style: StatusStyle::Light,
            text_color: WHITE,
            glyph: "weather-snowy",
            caption: "snow; 눈",
        },
        WeatherCategory::Other => CategoryStyle {
            gradient: [Rgb::new(0x75, 0x7F, 0x9A), Rgb::new(0xD7, 0xDD, 0xE8)],
            status_style: StatusStyle::Light,
            text_color: WHITE,
            glyph: "weather-pouring",
            caption: "mist; 안개",
        },
    }
}

impl Descriptor {
    /// Derive the descriptor for an observation. Only the category picks the
    /// visual style; title and subtitle carry the observation's own text.
    pub fn for_observation(observation: &WeatherObservation) -> Self {
        let style = style_for(observation.category);

        Self {
            gradient: style.gradient,
            status_style: style.status_style,
            text_color: style.text_color,
            glyph: Some(style.glyph),
            title: observation.raw_category.clone(),
            subtitle: observation.description.clone(),
            caption: style.caption,
            icon_code: observation.icon_code.clone(),
        }
    }

    /// URL of the service-hosted icon image, for renderers without an icon
    /// font. `50d` stands in when the observation carried no icon code.
    pub fn fallback_icon_url(&self) -> String {
        let code = if self.icon_code.is_empty() {
            "50d"
        } else {
            &self.icon_code
        };
        format!("http://openweathermap.org/img/wn/{code}@2x.png")
    }
}
