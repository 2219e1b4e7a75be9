//! Terminal rendering of the presentation descriptor.
//!
//! Everything here builds strings; callers decide where they go. That keeps
//! the visual layer as testable as the mapping behind it.

use std::fmt::Write;

use skycast_core::model::format_temperature;
use skycast_core::{Descriptor, Rgb, ScreenPhase, WeatherObservation};

/// Width of the gradient band, in terminal cells.
const BAND_WIDTH: usize = 44;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn fg(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

fn bg(color: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
}

/// Horizontal band interpolating between the two gradient stops.
fn gradient_band(gradient: [Rgb; 2]) -> String {
    let [from, to] = gradient;
    let mut line = String::new();

    for i in 0..BAND_WIDTH {
        let t = i as f64 / (BAND_WIDTH - 1) as f64;
        let lerp =
            |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        let cell = Rgb::new(
            lerp(from.r, to.r),
            lerp(from.g, to.g),
            lerp(from.b, to.b),
        );
        let _ = write!(line, "{} ", bg(cell));
    }

    line.push_str(RESET);
    line
}

/// Banner for the very first cycle, before anything has been fetched.
pub fn loading_banner() -> String {
    format!("{BOLD}Getting\nthe weather{RESET}")
}

/// Note printed while a user-triggered re-fetch is running.
pub fn refreshing_note() -> String {
    "Refreshing…".to_string()
}

fn alert_line(alert: &str) -> String {
    format!("{BOLD}! {alert}{RESET}")
}

fn observation_card(observation: &WeatherObservation) -> String {
    let descriptor = Descriptor::for_observation(observation);
    let text = fg(descriptor.text_color);
    let band = gradient_band(descriptor.gradient);

    let icon = match descriptor.glyph {
        Some(glyph) => format!("[{glyph}]"),
        None => descriptor.fallback_icon_url(),
    };

    let mut card = String::new();
    let _ = writeln!(card, "{band}");
    let _ = writeln!(
        card,
        "{text}{icon}  {}{RESET}",
        format_temperature(observation.temperature_c)
    );
    let _ = writeln!(card, "{text}{BOLD}{}{RESET}", descriptor.title);
    let _ = writeln!(card, "{text}{}{RESET}", descriptor.subtitle);
    let _ = writeln!(card, "{text}{}{RESET}", descriptor.caption);
    let _ = write!(card, "{band}");
    card
}

/// Render the whole screen for the current phase.
pub fn screen(phase: &ScreenPhase) -> String {
    match phase {
        ScreenPhase::Loading => loading_banner(),
        ScreenPhase::Ready(observation) => observation_card(observation),
        ScreenPhase::Refreshing(observation) => {
            format!("{}\n{}", observation_card(observation), refreshing_note())
        }
        ScreenPhase::Failed { alert, stale } => match stale {
            Some(observation) => {
                format!("{}\n{}", observation_card(observation), alert_line(alert))
            }
            None => format!("{}\n{}", loading_banner(), alert_line(alert)),
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use skycast_core::WeatherCategory;

    use super::*;

    fn observation(raw_category: &str, temperature_c: f64) -> WeatherObservation {
        WeatherObservation {
            temperature_c,
            category: WeatherCategory::from_wire(raw_category),
            raw_category: raw_category.to_string(),
            description: "clear sky".to_string(),
            icon_code: "01d".to_string(),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn ready_card_shows_rounded_temperature_and_glyph() {
        let rendered = screen(&ScreenPhase::Ready(observation("Clear", 5.57)));

        assert!(rendered.contains("6 ℃"));
        assert!(rendered.contains("[weather-sunny]"));
        assert!(rendered.contains("Clear"));
        assert!(rendered.contains("clear sky"));
    }

    #[test]
    fn snow_card_never_shows_negative_zero() {
        let rendered = screen(&ScreenPhase::Ready(observation("Snow", -0.2)));

        assert!(rendered.contains("0 ℃"));
        assert!(!rendered.contains("-0 ℃"));
        assert!(rendered.contains("[weather-snowy]"));
    }

    #[test]
    fn mist_card_uses_the_fallback_caption() {
        let rendered = screen(&ScreenPhase::Ready(observation("Mist", 8.0)));

        assert!(rendered.contains("mist; 안개"));
        assert!(rendered.contains("[weather-pouring]"));
    }

    #[test]
    fn loading_phase_renders_the_banner() {
        let rendered = screen(&ScreenPhase::Loading);
        assert!(rendered.contains("Getting\nthe weather"));
    }

    #[test]
    fn refreshing_keeps_the_stale_card_visible() {
        let rendered = screen(&ScreenPhase::Refreshing(observation("Rain", 9.3)));

        assert!(rendered.contains("9 ℃"));
        assert!(rendered.contains("Refreshing…"));
    }

    #[test]
    fn failure_with_stale_data_shows_both() {
        let rendered = screen(&ScreenPhase::Failed {
            alert: "Could not fetch the weather.".to_string(),
            stale: Some(observation("Clouds", 12.0)),
        });

        assert!(rendered.contains("12 ℃"));
        assert!(rendered.contains("Could not fetch the weather."));
    }

    #[test]
    fn first_cycle_failure_shows_banner_and_alert() {
        let rendered = screen(&ScreenPhase::Failed {
            alert: "Could not access your location.".to_string(),
            stale: None,
        });

        assert!(rendered.contains("Getting\nthe weather"));
        assert!(rendered.contains("Could not access your location."));
    }

    #[test]
    fn gradient_band_starts_and_ends_on_the_stops() {
        let band = gradient_band([Rgb::new(0x24, 0xC6, 0xDC), Rgb::new(0x51, 0x4A, 0x9D)]);

        assert!(band.starts_with("\x1b[48;2;36;198;220m"));
        assert!(band.contains("\x1b[48;2;81;74;157m"));
        assert!(band.ends_with(RESET));
    }
}
