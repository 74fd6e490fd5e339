use chrono::NaiveDate;
use futures::future::FutureExt;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::SingleFlight;
use crate::api::{ApiClient, ApiError};
use crate::models::WorkoutSession;

/// Calendar days on which at least one workout session exists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoneDateSet {
    dates: BTreeSet<NaiveDate>,
}

impl DoneDateSet {
    /// Truncate every session timestamp to its day and de-duplicate
    pub fn from_sessions(sessions: &[WorkoutSession]) -> Self {
        sessions
            .iter()
            .map(|session| session.performed_at.date_naive())
            .collect()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDate> {
        self.dates.iter()
    }
}

impl FromIterator<NaiveDate> for DoneDateSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

struct CacheState {
    generation: u64,
    value: Option<Arc<DoneDateSet>>,
}

/// Memoized, single-flight view of the user's workout days.
///
/// Flights are keyed by cache generation: `invalidate` bumps the
/// generation, so a fetch that was running at that moment is never stored
/// and the next caller starts a fresh one.
pub struct DoneDateCache {
    client: Arc<ApiClient>,
    flights: SingleFlight<u64, Arc<DoneDateSet>>,
    state: Mutex<CacheState>,
}

impl DoneDateCache {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            flights: SingleFlight::new(),
            state: Mutex::new(CacheState {
                generation: 0,
                value: None,
            }),
        }
    }

    pub async fn get(&self) -> Result<Arc<DoneDateSet>, ApiError> {
        let generation = {
            let state = self.state.lock().await;
            if let Some(value) = &state.value {
                tracing::debug!("Workout dates served from cache");
                return Ok(Arc::clone(value));
            }
            state.generation
        };

        let client = Arc::clone(&self.client);
        let dates = self
            .flights
            .run(generation, move || {
                async move {
                    tracing::debug!("Fetching workout dates");
                    let sessions = client.list_sessions().await?;
                    Ok(Arc::new(DoneDateSet::from_sessions(&sessions)))
                }
                .boxed()
            })
            .await?;

        let mut state = self.state.lock().await;
        if state.generation == generation {
            state.value = Some(Arc::clone(&dates));
        } else {
            tracing::debug!("Cache invalidated during fetch, result not kept");
        }

        Ok(dates)
    }

    /// Forget the memoized set and any in-flight fetch
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        self.flights.forget(&state.generation).await;
        state.generation += 1;
        state.value = None;

        tracing::debug!("Workout date cache invalidated (generation {})", state.generation);
    }

    /// Memoized value, without fetching
    pub async fn peek(&self) -> Option<Arc<DoneDateSet>> {
        self.state.lock().await.value.clone()
    }
}
