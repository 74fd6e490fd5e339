use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::Mutex;

use crate::api::ApiError;

type Flight<V> = Shared<BoxFuture<'static, Result<V, ApiError>>>;

/// Coalesces concurrent requests for the same key into one in-progress
/// future. Callers that arrive while a flight is running attach to it and
/// receive the same result. The entry is dropped once the flight settles,
/// successful or not.
pub struct SingleFlight<K, V> {
    inflight: Mutex<HashMap<K, Flight<V>>>,
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Run `start()` for `key` unless a flight for it is already running
    pub async fn run<F>(&self, key: K, start: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<V, ApiError>>,
    {
        let flight = {
            let mut inflight = self.inflight.lock().await;
            match inflight.get(&key) {
                Some(existing) => {
                    tracing::debug!("Joining in-flight request for {:?}", key);
                    existing.clone()
                }
                None => {
                    let flight = start().shared();
                    inflight.insert(key.clone(), flight.clone());
                    flight
                }
            }
        };

        let result = flight.clone().await;

        let mut inflight = self.inflight.lock().await;
        if inflight
            .get(&key)
            .map_or(false, |current| current.ptr_eq(&flight))
        {
            inflight.remove(&key);
        }

        result
    }

    /// Drop the in-flight marker so the next `run` starts from scratch.
    /// Callers already attached still get the old flight's result.
    pub async fn forget(&self, key: &K) {
        self.inflight.lock().await.remove(key);
    }

    pub async fn is_in_flight(&self, key: &K) -> bool {
        self.inflight.lock().await.contains_key(key)
    }
}

impl<K, V> Default for SingleFlight<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_concurrent_callers_share_one_flight() {
        let flights: Arc<SingleFlight<&'static str, u32>> = Arc::new(SingleFlight::new());
        let starts = Arc::new(AtomicU32::new(0));
        let (release, gate) = oneshot::channel::<u32>();
        let gate = Arc::new(tokio::sync::Mutex::new(Some(gate)));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let flights = Arc::clone(&flights);
            let starts = Arc::clone(&starts);
            let gate = Arc::clone(&gate);
            handles.push(tokio::spawn(async move {
                flights
                    .run("dates", move || {
                        starts.fetch_add(1, Ordering::SeqCst);
                        async move {
                            let rx = gate.lock().await.take().expect("started twice");
                            rx.await.map_err(|e| ApiError::Network(e.to_string()))
                        }
                        .boxed()
                    })
                    .await
            }));
        }

        while !flights.is_in_flight(&"dates").await {
            tokio::task::yield_now().await;
        }
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        release.send(42).unwrap();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 42);
        }
        assert_eq!(starts.load(Ordering::SeqCst), 1);
        assert!(!flights.is_in_flight(&"dates").await);
    }

    #[tokio::test]
    async fn test_failed_flight_is_not_reused() {
        let flights: SingleFlight<u8, u32> = SingleFlight::new();
        let starts = AtomicU32::new(0);

        let first = flights
            .run(1, || {
                starts.fetch_add(1, Ordering::SeqCst);
                async { Err(ApiError::Network("down".to_string())) }.boxed()
            })
            .await;
        assert!(first.is_err());

        let second = flights
            .run(1, || {
                starts.fetch_add(1, Ordering::SeqCst);
                async { Ok(7) }.boxed()
            })
            .await;
        assert_eq!(second.unwrap(), 7);
        assert_eq!(starts.load(Ordering::SeqCst), 2);
    }
}
