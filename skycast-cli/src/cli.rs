use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use log::debug;

use skycast_core::location::geoip::GeoIpSensor;
use skycast_core::location::{FixedSensor, LocationSensor, OpenGate};
use skycast_core::{Config, Coordinate, OpenWeatherProvider, Screen};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional pinned position.
    Configure,

    /// Show the current weather for your position.
    Show {
        /// Latitude override; skips geolocation.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude override; skips geolocation.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Render once and exit instead of prompting to refresh.
        #[arg(long)]
        once: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lat, lon, once } => show(lat.zip(lon), once).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()?;
    config.api_key = Some(api_key.trim().to_string());

    let pin = Confirm::new("Pin a fixed position instead of using geolocation?")
        .with_default(false)
        .prompt()?;

    if pin {
        let latitude: f64 = Text::new("Latitude:")
            .prompt()?
            .trim()
            .parse()
            .context("Latitude must be a number")?;
        let longitude: f64 = Text::new("Longitude:")
            .prompt()?
            .trim()
            .parse()
            .context("Longitude must be a number")?;

        // Validate before persisting.
        Coordinate::new(latitude, longitude)?;

        config.latitude = Some(latitude);
        config.longitude = Some(longitude);
    } else {
        config.latitude = None;
        config.longitude = None;
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(position_override: Option<(f64, f64)>, once: bool) -> Result<()> {
    let config = Config::load()?;
    let api_key = config.resolve_api_key()?;
    let provider = OpenWeatherProvider::new(api_key);

    let sensor = pick_sensor(position_override, &config)?;
    let mut screen = Screen::new(OpenGate, sensor, provider);

    println!("{}", render::loading_banner());

    loop {
        screen.refresh_cycle().await;
        println!("{}", render::screen(screen.phase()));

        if once {
            break;
        }

        let again = Confirm::new("Refresh?").with_default(true).prompt()?;
        if !again {
            break;
        }

        println!("{}", render::refreshing_note());
    }

    Ok(())
}

fn pick_sensor(
    position_override: Option<(f64, f64)>,
    config: &Config,
) -> Result<Box<dyn LocationSensor>> {
    if let Some((latitude, longitude)) = position_override {
        debug!("position pinned from flags: {latitude}, {longitude}");
        let coordinate = Coordinate::new(latitude, longitude)?;
        return Ok(Box::new(FixedSensor::new(coordinate)));
    }

    if let Some(pinned) = config.fixed_coordinate() {
        let coordinate = pinned?;
        debug!(
            "position pinned from config: {}, {}",
            coordinate.latitude, coordinate.longitude
        );
        return Ok(Box::new(FixedSensor::new(coordinate)));
    }

    Ok(Box::new(GeoIpSensor::new()?))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_parses_position_override() {
        let cli = Cli::parse_from(["skycast", "show", "--lat", "35.26", "--lon", "128.61"]);
        match cli.command {
            Command::Show { lat, lon, once } => {
                assert_eq!(lat, Some(35.26));
                assert_eq!(lon, Some(128.61));
                assert!(!once);
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::parse_from(["skycast", "show", "--lat", "-33.86", "--lon", "151.20"]);
        match cli.command {
            Command::Show { lat, lon, .. } => {
                assert_eq!(lat, Some(-33.86));
                assert_eq!(lon, Some(151.20));
            }
            other => panic!("expected Show, got {other:?}"),
        }
    }

    #[test]
    fn latitude_alone_is_rejected() {
        let parsed = Cli::try_parse_from(["skycast", "show", "--lat", "35.26"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flag_override_beats_config_pin() {
        let config = Config {
            latitude: Some(1.0),
            longitude: Some(2.0),
            ..Config::default()
        };

        // Both paths produce a sensor; the override one must win without error.
        assert!(pick_sensor(Some((35.26, 128.61)), &config).is_ok());
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let config = Config::default();
        assert!(pick_sensor(Some((512.0, 0.0)), &config).is_err());
    }
}
