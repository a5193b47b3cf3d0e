//! Page controller
//!
//! Owns the page's request state and last known location, and runs one
//! submission end to end: validate input, resolve location if needed, call
//! the backend, record the outcome.
//!
//! ```text
//! idle -> loading -> success | error -> loading -> ...
//! ```
//!
//! A submit that arrives while another is in flight is ignored and reported
//! as `SubmitOutcome::Busy`. State is kept behind a synchronous lock that is
//! never held across an await, so snapshots stay readable while a request
//! runs and a dropped submit can clear its own `Loading` state.

pub mod input;
pub mod state;
pub mod suggestions;

use crate::client::BackendApi;
use crate::constants::page::SEARCH_CANCELLED;
use crate::geo::{Coordinates, LocationProvider, UserLocation};
use input::QueryInput;
use state::{PageSnapshot, RequestState};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank query; nothing was sent
    Rejected,
    /// A request is already in flight; nothing was sent
    Busy,
    /// The request ran; carries the resulting `Success` or `Error` state
    Finished(RequestState),
}

#[derive(Debug, Default)]
struct PageData {
    state: RequestState,
    location: Option<UserLocation>,
}

/// Orchestrates input, geolocation, backend calls and request state
pub struct PageController<B, L> {
    backend: B,
    locator: L,
    data: RwLock<PageData>,
}

/// Leaves `Loading` for an error if a submit is dropped before it finishes
struct LoadingGuard<'a> {
    data: &'a RwLock<PageData>,
    armed: bool,
}

impl LoadingGuard<'_> {
    /// Record the outcome of the request and disarm
    fn finish(mut self, next: RequestState, fresh: Option<UserLocation>) {
        let mut data = write(self.data);
        if data.location.is_none() {
            data.location = fresh;
        }
        data.state = next;
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut data = write(self.data);
        if data.state.is_loading() {
            warn!("Search dropped before it finished");
            data.state = RequestState::Error(SEARCH_CANCELLED.to_string());
        }
    }
}

fn read(lock: &RwLock<PageData>) -> RwLockReadGuard<'_, PageData> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(lock: &RwLock<PageData>) -> RwLockWriteGuard<'_, PageData> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl<B: BackendApi, L: LocationProvider> PageController<B, L> {
    pub fn new(backend: B, locator: L) -> Self {
        Self {
            backend,
            locator,
            data: RwLock::new(PageData::default()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    /// Current state, location and derived view data
    pub async fn snapshot(&self) -> PageSnapshot {
        let data = read(&self.data);
        let label = data.location.as_ref().and_then(|l| l.label.as_deref());

        PageSnapshot {
            state: data.state.clone(),
            location: data.location.clone(),
            examples: suggestions::example_queries(label),
            input_disabled: QueryInput::for_state(&data.state).is_disabled(),
        }
    }

    /// Example queries for the current location
    pub async fn example_queries(&self) -> Vec<String> {
        let data = read(&self.data);
        suggestions::example_queries(data.location.as_ref().and_then(|l| l.label.as_deref()))
    }

    /// Last known user location
    pub async fn location(&self) -> Option<UserLocation> {
        read(&self.data).location.clone()
    }

    /// Submit a query
    ///
    /// Dropping the returned future mid-request leaves the page in an
    /// error state rather than `Loading`.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        let (query, cached, guard) = {
            let mut data = write(&self.data);

            let input = QueryInput::for_state(&data.state);
            if input.is_disabled() {
                debug!("Ignoring submit while a request is in flight");
                return SubmitOutcome::Busy;
            }
            let Some(query) = input.accept(raw) else {
                debug!("Ignoring blank query");
                return SubmitOutcome::Rejected;
            };

            data.state = RequestState::Loading;
            let guard = LoadingGuard {
                data: &self.data,
                armed: true,
            };
            (query, data.location.as_ref().map(|l| l.coords), guard)
        };

        info!("Searching: {}", query);

        let (result, fresh) = match cached {
            Some(coords) => (self.backend.submit_query(&query, Some(coords)).await, None),
            None => match self.locator.resolve_location().await {
                Some(coords) => {
                    let (result, label) = tokio::join!(
                        self.backend.submit_query(&query, Some(coords)),
                        self.backend.reverse_geocode(coords),
                    );
                    (result, Some(located(coords, label)))
                }
                None => {
                    debug!("No location available, querying without it");
                    (self.backend.submit_query(&query, None).await, None)
                }
            },
        };

        let next = match result {
            Ok(response) => {
                info!("Received {} places", response.places.len());
                RequestState::Success(response)
            }
            Err(e) => {
                warn!("Query failed: {}", e);
                RequestState::Error(e.to_string())
            }
        };

        // A location stored by a refresh during the request is newer
        guard.finish(next.clone(), fresh);
        SubmitOutcome::Finished(next)
    }

    /// Known location, or resolve and label one now
    pub async fn ensure_location(&self) -> Option<UserLocation> {
        if let Some(location) = self.location().await {
            return Some(location);
        }

        let coords = self.locator.resolve_location().await?;
        let label = self.backend.reverse_geocode(coords).await;
        let location = located(coords, label);
        write(&self.data).location = Some(location.clone());
        Some(location)
    }

    /// Force a new location lookup and label it
    ///
    /// Keeps the previous location when the lookup comes back empty.
    pub async fn refresh_location(&self) -> Option<UserLocation> {
        match self.locator.refresh_location().await {
            Some(coords) => {
                let label = self.backend.reverse_geocode(coords).await;
                let location = located(coords, label);
                write(&self.data).location = Some(location.clone());
                Some(location)
            }
            None => {
                debug!("Location refresh found nothing, keeping previous location");
                self.location().await
            }
        }
    }
}

fn located(coords: Coordinates, label: Option<String>) -> UserLocation {
    match label {
        Some(label) => UserLocation::new(coords).with_label(label),
        None => UserLocation::new(coords),
    }
}
