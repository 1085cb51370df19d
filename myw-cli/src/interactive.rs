use std::{fmt, sync::Arc};

use chrono::Local;
use inquire::{InquireError, Select, Text};
use myw_core::{Dashboard, FetchState, LocationResolver, Route, WeatherSource};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    UseLocation,
    Retry,
    Open(Route),
    Back,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search city"),
            Action::UseLocation => f.write_str("Use current location"),
            Action::Retry => f.write_str("Try again"),
            Action::Open(route) => write!(f, "{} - {}", route.label(), route.description()),
            Action::Back => f.write_str("Back"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

/// Actions offered on the active screen.
fn actions(route: Route, failed: bool) -> Vec<Action> {
    let mut out = Vec::new();
    if route == Route::Home {
        out.push(Action::Search);
        out.push(Action::UseLocation);
    }
    if failed {
        out.push(Action::Retry);
    }
    out.extend(Route::all().iter().filter(|r| **r != route).map(|r| Action::Open(*r)));
    if route != Route::Home {
        out.push(Action::Back);
    }
    out.push(Action::Quit);
    out
}

fn draw(dashboard: &Dashboard) {
    let now = Local::now();
    let screen = match dashboard.route() {
        Route::Home => {
            let home = dashboard.home();
            render::home_screen(&home.state(), home.error_message(), dashboard.theme(), now)
        }
        Route::Forecast => {
            let forecast = dashboard.forecast();
            render::forecast_screen(&forecast.state(), forecast.error_message(), now.date_naive())
        }
    };
    println!("\n{}\n\n{screen}\n", render::drawer(dashboard.route()));
}

fn is_failed(dashboard: &Dashboard) -> bool {
    match dashboard.route() {
        Route::Home => matches!(dashboard.home().state(), FetchState::Failed(_)),
        Route::Forecast => matches!(dashboard.forecast().state(), FetchState::Failed(_)),
    }
}

/// Interactive loop; ends on Quit, Esc or Ctrl-C.
pub async fn run(resolver: LocationResolver, source: Arc<dyn WeatherSource>) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(resolver, source);
    dashboard.start().await;

    loop {
        draw(&dashboard);

        let choice = Select::new("What next?", actions(dashboard.route(), is_failed(&dashboard)))
            .prompt();
        let action = match choice {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::Search => {
                let city = match Text::new("City:").with_placeholder("Enter city name...").prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(err) => return Err(err.into()),
                };
                dashboard.home().search(&city).await;
            }
            Action::UseLocation => dashboard.home().locate().await,
            Action::Retry => match dashboard.route() {
                Route::Home => dashboard.home().retry().await,
                Route::Forecast => dashboard.forecast().retry().await,
            },
            Action::Open(route) => dashboard.navigate(route).await,
            Action::Back => dashboard.back().await,
            Action::Quit => break,
        }
    }

    Ok(())
}
