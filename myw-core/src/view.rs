use crate::{error::FetchError, model::LocationQuery};

/// What a screen currently shows. Exactly one variant is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn snapshot(&self) -> Option<&T> {
        match self {
            FetchState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Sequence number identifying one resolve/fetch cycle of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Per-screen state machine: `Idle -> Loading -> Ready | Failed -> Loading -> ...`.
///
/// Every cycle takes a fresh [`RequestToken`]. Results carrying a token older than
/// the latest one issued are dropped, so a slow response can never overwrite the
/// answer to a newer search.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    state: FetchState<T>,
    issued: u64,
    last_query: Option<LocationQuery>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self { state: FetchState::Idle, issued: 0, last_query: None }
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Query of the most recent cycle that got as far as resolving its location.
    pub fn last_query(&self) -> Option<&LocationQuery> {
        self.last_query.as_ref()
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Start a new cycle, superseding any cycle still in flight.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.state = FetchState::Loading;
        RequestToken(self.issued)
    }

    /// Remember the query a cycle resolved to. Ignored for superseded cycles.
    pub fn record_query(&mut self, token: RequestToken, query: LocationQuery) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.last_query = Some(query);
        true
    }

    /// Apply a fetch result. Returns false, leaving the state untouched, when a newer
    /// cycle has been started since `token` was issued.
    pub fn apply(&mut self, token: RequestToken, result: Result<T, FetchError>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state = match result {
            Ok(snapshot) => FetchState::Ready(snapshot),
            Err(err) => FetchState::Failed(err),
        };
        true
    }

    /// Screen teardown: back to `Idle`, and every outstanding token becomes stale.
    pub fn reset(&mut self) {
        self.issued += 1;
        self.state = FetchState::Idle;
        self.last_query = None;
    }
}
