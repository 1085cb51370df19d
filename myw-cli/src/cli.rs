use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use myw_core::{
    Config, ForecastSnapshot, IpPositionSource, LocationResolver, PositionOptions, Screen,
    ThemeResult, WeatherSnapshot, WeatherSource, provider::source_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "myw", version, about = "myW weather dashboard")]
pub struct Cli {
    /// Do not look up the device location; always use the fallback city.
    #[arg(long, global = true)]
    pub no_locate: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key.
    Configure,

    /// Show current conditions.
    Now {
        /// City name; if absent, the device location is used.
        city: Option<String>,
    },

    /// Show the 3-day forecast.
    Forecast {
        /// City name; if absent, the device location is used.
        city: Option<String>,
    },

    /// Interactive dashboard (default).
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dashboard) {
            Command::Configure => configure(),
            Command::Now { city } => {
                let (resolver, source) = collaborators(self.no_locate)?;
                let screen: Screen<WeatherSnapshot> = Screen::new(Arc::new(resolver), source);
                load(&screen, city.as_deref()).await;

                let state = screen.state();
                let theme = ThemeResult::for_snapshot(state.snapshot());
                println!(
                    "{}",
                    render::home_screen(&state, screen.error_message(), theme, Local::now())
                );
                Ok(())
            }
            Command::Forecast { city } => {
                let (resolver, source) = collaborators(self.no_locate)?;
                let screen: Screen<ForecastSnapshot> = Screen::new(Arc::new(resolver), source);
                load(&screen, city.as_deref()).await;

                println!(
                    "{}",
                    render::forecast_screen(
                        &screen.state(),
                        screen.error_message(),
                        Local::now().date_naive()
                    )
                );
                Ok(())
            }
            Command::Dashboard => {
                let (resolver, source) = collaborators(self.no_locate)?;
                interactive::run(resolver, source).await
            }
        }
    }
}

async fn load<T: myw_core::Snapshot>(screen: &Screen<T>, city: Option<&str>) {
    if let Some(city) = city {
        if screen.search(city).await {
            return;
        }
    }
    screen.mount().await;
}

/// Build the location resolver and weather source from the on-disk config.
fn collaborators(
    no_locate: bool,
) -> anyhow::Result<(LocationResolver, Arc<dyn WeatherSource>)> {
    let config = Config::load()?;
    let source = source_from_config(&config)?;

    let resolver = if no_locate {
        LocationResolver::new(None, PositionOptions::from(&config.location))
    } else {
        let ip = IpPositionSource::new(config.location.lookup_url.clone());
        LocationResolver::from_config(&config.location, Arc::new(ip))
    };

    Ok((resolver, source))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
