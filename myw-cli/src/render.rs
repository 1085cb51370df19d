//! Plain-text rendering of the dashboard screens.

use chrono::{DateTime, Local, NaiveDate};
use myw_core::{Effect, FetchState, ForecastSnapshot, Route, ThemeResult, WeatherSnapshot};
use std::fmt::Write;

const RULE_WIDTH: usize = 48;

/// Animation parameters the terminal uses for each ambient effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectProfile {
    pub glyph: char,
    pub particles: u16,
    /// Range of fall durations in seconds; `None` for static effects.
    pub fall_secs: Option<(f32, f32)>,
}

impl EffectProfile {
    pub fn for_effect(effect: Effect) -> Option<Self> {
        match effect {
            Effect::None => None,
            Effect::Rain => Some(Self { glyph: '╱', particles: 100, fall_secs: Some((0.5, 1.0)) }),
            Effect::Snow => Some(Self { glyph: '*', particles: 50, fall_secs: Some((2.0, 5.0)) }),
            Effect::Fog => Some(Self { glyph: '~', particles: 200, fall_secs: None }),
            Effect::Thunder => Some(Self { glyph: '⚡', particles: 25, fall_secs: None }),
        }
    }

    /// One row of the effect, denser for effects with more particles.
    pub fn banner(&self, width: usize) -> String {
        let spacing = (200 / usize::from(self.particles.max(1))).max(1);
        (0..width).map(|i| if i % spacing == 0 { self.glyph } else { ' ' }).collect()
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Protocol-relative icon refs become https URLs.
pub fn icon_url(icon_ref: &str) -> String {
    if icon_ref.starts_with("//") { format!("https:{icon_ref}") } else { icon_ref.to_string() }
}

pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.succ_opt() == Some(date) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn clock_header(now: DateTime<Local>) -> String {
    format!("myW\n{}\n{}", now.format("%H:%M:%S"), now.format("%A, %B %-d, %Y"))
}

pub fn theme_banner(theme: ThemeResult) -> String {
    let mut out = format!("[{} | effect: {}]", theme.gradient, theme.effect);
    if let Some(profile) = EffectProfile::for_effect(theme.effect) {
        if let Some((fastest, slowest)) = profile.fall_secs {
            let _ = write!(out, " {} particles, {fastest}-{slowest}s fall", profile.particles);
        }
        out.push('\n');
        out.push_str(&profile.banner(RULE_WIDTH));
    }
    out
}

pub fn drawer(current: Route) -> String {
    let mut out = String::from("myW · Weather App\n");
    for route in Route::all() {
        let marker = if *route == current { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {}\n    {}", route.label(), route.description());
    }
    out.push_str("Powered by WeatherAPI.com");
    out
}

pub fn error_panel(message: &str) -> String {
    let rule = "!".repeat(RULE_WIDTH);
    format!("{rule}\nError\n{message}\n(choose \"Try again\" to retry)\n{rule}")
}

pub fn weather_card(w: &WeatherSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}, {}", w.location_name, w.country_name);
    let _ = writeln!(out, "{}°  {}", round(w.temperature_c), w.condition_text);
    let _ = writeln!(out, "Feels like {}°", round(w.feels_like_c));
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Humidity    {}%", w.humidity_pct);
    let _ = writeln!(out, "Wind Speed  {} km/h", round(w.wind_kph));
    let _ = writeln!(out, "Pressure    {} hPa", w.pressure_hpa);
    let _ = writeln!(out, "Visibility  {} km", w.visibility_km);
    let _ = write!(out, "Icon        {}", icon_url(&w.condition_icon_ref));
    out
}

pub fn forecast_cards(f: &ForecastSnapshot, today: NaiveDate) -> String {
    let mut out = format!("3-Day Forecast\n{}, {}\n", f.location_name, f.country_name);
    for day in f.days() {
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        let _ = writeln!(out, "{} ({})", day_label(day.date, today), short_date(day.date));
        let _ = writeln!(
            out,
            "{}° / {}°  {}",
            round(day.max_temp_c),
            round(day.min_temp_c),
            day.condition_text
        );
        let _ = writeln!(out, "Rain      {}%", day.rain_chance_pct);
        let _ = writeln!(out, "Wind      {} km/h", round(day.max_wind_kph));
        let _ = writeln!(out, "Humidity  {}%", day.avg_humidity_pct);
    }
    out.trim_end().to_string()
}

pub fn home_screen(
    state: &FetchState<WeatherSnapshot>,
    error_message: Option<&str>,
    theme: ThemeResult,
    now: DateTime<Local>,
) -> String {
    let body = match state {
        FetchState::Idle => String::new(),
        FetchState::Loading => "Loading weather data...".to_string(),
        FetchState::Ready(snapshot) => weather_card(snapshot),
        FetchState::Failed(_) => error_panel(error_message.unwrap_or_default()),
    };
    format!("{}\n{}\n\n{body}", theme_banner(theme), clock_header(now))
}

pub fn forecast_screen(
    state: &FetchState<ForecastSnapshot>,
    error_message: Option<&str>,
    today: NaiveDate,
) -> String {
    match state {
        FetchState::Idle => String::new(),
        FetchState::Loading => "Loading 3-day forecast...".to_string(),
        FetchState::Ready(snapshot) => forecast_cards(snapshot, today),
        FetchState::Failed(_) => error_panel(error_message.unwrap_or_default()),
    }
}
