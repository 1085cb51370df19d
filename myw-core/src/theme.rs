//! Maps a free-text condition description onto a visual theme.
//!
//! Matching is a case-insensitive substring search over an ordered rule table.
//! The first rule with a matching keyword wins, so a description such as
//! "light snow showers" lands in the rain rule because "shower" is checked
//! before "snow".

use serde::Serialize;
use std::fmt;

use crate::model::WeatherSnapshot;

/// Background gradient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gradient {
    ClearDay,
    ClearNight,
    PartlyDay,
    PartlyNight,
    CloudyDay,
    CloudyNight,
    FogDay,
    FogNight,
    Rain,
    Thunder,
    SnowDay,
    SnowNight,
    WindDay,
    WindNight,
    Default,
}

impl Gradient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gradient::ClearDay => "clear-day",
            Gradient::ClearNight => "clear-night",
            Gradient::PartlyDay => "partly-day",
            Gradient::PartlyNight => "partly-night",
            Gradient::CloudyDay => "cloudy-day",
            Gradient::CloudyNight => "cloudy-night",
            Gradient::FogDay => "fog-day",
            Gradient::FogNight => "fog-night",
            Gradient::Rain => "rain",
            Gradient::Thunder => "thunder",
            Gradient::SnowDay => "snow-day",
            Gradient::SnowNight => "snow-night",
            Gradient::WindDay => "wind-day",
            Gradient::WindNight => "wind-night",
            Gradient::Default => "default",
        }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient effect drawn over the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[default]
    None,
    Rain,
    Snow,
    Fog,
    Thunder,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::None => "none",
            Effect::Rain => "rain",
            Effect::Snow => "snow",
            Effect::Fog => "fog",
            Effect::Thunder => "thunder",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeResult {
    pub gradient: Gradient,
    pub effect: Effect,
}

impl Default for ThemeResult {
    fn default() -> Self {
        Self { gradient: Gradient::Default, effect: Effect::None }
    }
}

impl ThemeResult {
    /// Theme for an optional snapshot; no snapshot yet means the default theme.
    pub fn for_snapshot(snapshot: Option<&WeatherSnapshot>) -> Self {
        snapshot
            .map(|s| classify(&s.condition_text, s.is_daytime))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
enum Shade {
    Fixed(Gradient),
    DayNight { day: Gradient, night: Gradient },
}

#[derive(Debug)]
struct Rule {
    keywords: &'static [&'static str],
    shade: Shade,
    effect: Effect,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["clear", "sunny"],
        shade: Shade::DayNight { day: Gradient::ClearDay, night: Gradient::ClearNight },
        effect: Effect::None,
    },
    Rule {
        keywords: &["partly cloudy", "partly"],
        shade: Shade::DayNight { day: Gradient::PartlyDay, night: Gradient::PartlyNight },
        effect: Effect::None,
    },
    Rule {
        keywords: &["cloud", "overcast"],
        shade: Shade::DayNight { day: Gradient::CloudyDay, night: Gradient::CloudyNight },
        effect: Effect::None,
    },
    Rule {
        keywords: &["mist", "fog", "haze"],
        shade: Shade::DayNight { day: Gradient::FogDay, night: Gradient::FogNight },
        effect: Effect::Fog,
    },
    Rule {
        keywords: &["rain", "drizzle", "shower"],
        shade: Shade::Fixed(Gradient::Rain),
        effect: Effect::Rain,
    },
    Rule {
        keywords: &["thunder", "storm"],
        shade: Shade::Fixed(Gradient::Thunder),
        effect: Effect::Thunder,
    },
    Rule {
        keywords: &["snow", "blizzard"],
        shade: Shade::DayNight { day: Gradient::SnowDay, night: Gradient::SnowNight },
        effect: Effect::Snow,
    },
    Rule {
        keywords: &["wind"],
        shade: Shade::DayNight { day: Gradient::WindDay, night: Gradient::WindNight },
        effect: Effect::None,
    },
];

/// Classify a condition description. Unknown or empty text yields the default theme.
pub fn classify(condition_text: &str, is_daytime: bool) -> ThemeResult {
    let text = condition_text.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| text.contains(kw)))
        .map(|rule| ThemeResult {
            gradient: match rule.shade {
                Shade::Fixed(g) => g,
                Shade::DayNight { day, night } => {
                    if is_daytime {
                        day
                    } else {
                        night
                    }
                }
            },
            effect: rule.effect,
        })
        .unwrap_or_default()
}
