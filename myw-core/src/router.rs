use std::{convert::TryFrom, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Forecast,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Forecast => "forecast",
        }
    }

    /// Title shown in the navigation drawer.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Forecast => "3-Day Forecast",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Route::Home => "Current weather conditions",
            Route::Forecast => "Plan ahead with reliable extended weather predictions",
        }
    }

    pub const fn all() -> &'static [Route] {
        &[Route::Home, Route::Forecast]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Route {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "home" => Ok(Route::Home),
            "forecast" => Ok(Route::Forecast),
            _ => Err(anyhow::anyhow!("Unknown view '{value}'. Available views: home, forecast.")),
        }
    }
}

/// Selects the active screen. Keeps only the current and previous route.
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: Route,
    previous: Option<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn previous(&self) -> Option<Route> {
        self.previous
    }

    /// Switch to `route`. Returns true when the active screen changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        self.previous = Some(self.current);
        self.current = route;
        true
    }

    /// Back always lands on home.
    pub fn back(&mut self) -> bool {
        self.navigate(Route::Home)
    }
}
