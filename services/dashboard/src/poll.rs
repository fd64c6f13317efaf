//! View-state clients: the all-metals dashboard view and the single-metal
//! detail view.
//!
//! Each client owns a private `{data, loading, error}` triple. Concurrent
//! fetches are never de-duplicated: within one client the call that
//! resolves last writes last, regardless of issue order. Spawned fetches
//! hold only a `Weak` reference to the state, so a result arriving after
//! the client is dropped is discarded rather than applied.

use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

use crate::client::PriceFeed;
use crate::types::{Metal, MetalPrice, MetalPriceSet};

/// Default dashboard refresh cadence
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Transient view state for one client
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// Drives the dashboard view: fetches the full price set immediately on
/// creation, on manual refetch, and optionally on a fixed interval.
pub struct PollingClient {
    feed: Arc<dyn PriceFeed>,
    state: Arc<RwLock<FetchState<MetalPriceSet>>>,
    refresh_task: Option<JoinHandle<()>>,
}

impl PollingClient {
    /// Create the client and issue the initial fetch. The state is already
    /// loading when this returns.
    pub fn new(feed: Arc<dyn PriceFeed>) -> Self {
        let state = Arc::new(RwLock::new(FetchState::loading()));
        let client = Self {
            feed,
            state,
            refresh_task: None,
        };
        client.spawn_fetch();
        client
    }

    /// Enable timer-driven refresh. A tick does not cancel a fetch already
    /// in flight; the calls race and the last resolution wins.
    pub fn with_auto_refresh(mut self, every: Duration) -> Self {
        let feed = Arc::clone(&self.feed);
        let state = Arc::downgrade(&self.state);
        self.refresh_task = Some(tokio::spawn(async move {
            let mut ticker = interval(every);
            // the first tick completes immediately and the initial fetch
            // is already running
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !run_fetch(&feed, &state).await {
                    break;
                }
            }
        }));
        self
    }

    /// Manual refetch; safe to call while a fetch is in flight
    pub fn refetch(&self) {
        self.spawn_fetch();
    }

    pub async fn snapshot(&self) -> FetchState<MetalPriceSet> {
        self.state.read().await.clone()
    }

    fn spawn_fetch(&self) {
        let feed = Arc::clone(&self.feed);
        let state = Arc::downgrade(&self.state);
        tokio::spawn(async move {
            run_fetch(&feed, &state).await;
        });
    }
}

impl Drop for PollingClient {
    fn drop(&mut self) {
        // The timer must not keep invoking the gateway after disposal
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
    }
}

/// Run one full fetch, updating the state if the owning client is still
/// alive. Returns false once the client is gone.
async fn run_fetch(
    feed: &Arc<dyn PriceFeed>,
    state: &Weak<RwLock<FetchState<MetalPriceSet>>>,
) -> bool {
    {
        let Some(state) = state.upgrade() else {
            return false;
        };
        let mut s = state.write().await;
        s.loading = true;
        s.error = None;
    }

    let result = feed.fetch_all().await;

    let Some(state) = state.upgrade() else {
        debug!("Dropping price result for disposed client");
        return false;
    };
    let mut s = state.write().await;
    match result {
        Ok(set) => {
            s.data = Some(set);
            s.loading = false;
            s.error = None;
        }
        Err(e) => {
            s.data = None;
            s.loading = false;
            s.error = Some(e.to_string());
        }
    }
    true
}

/// State for the single-metal detail view
#[derive(Debug, Clone)]
pub struct DetailState {
    pub metal: Metal,
    pub data: Option<MetalPrice>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Drives the detail view. Refetches when the tracked metal changes (route
/// navigation) or on manual refetch; no timer.
pub struct DetailClient {
    feed: Arc<dyn PriceFeed>,
    state: Arc<RwLock<DetailState>>,
}

impl DetailClient {
    pub fn new(feed: Arc<dyn PriceFeed>, metal: Metal) -> Self {
        let state = Arc::new(RwLock::new(DetailState {
            metal,
            data: None,
            loading: true,
            error: None,
        }));
        let client = Self { feed, state };
        client.spawn_fetch(metal);
        client
    }

    /// Track a different metal. Clears the previous metal's price, enters
    /// loading, and fetches the new one. Re-tracking the current metal is
    /// a no-op.
    pub async fn set_metal(&self, metal: Metal) {
        {
            let mut s = self.state.write().await;
            if s.metal == metal {
                return;
            }
            s.metal = metal;
            s.data = None;
            s.loading = true;
            s.error = None;
        }
        self.spawn_fetch(metal);
    }

    /// Manual refetch of the tracked metal
    pub async fn refetch(&self) {
        let metal = {
            let mut s = self.state.write().await;
            s.loading = true;
            s.error = None;
            s.metal
        };
        self.spawn_fetch(metal);
    }

    pub async fn snapshot(&self) -> DetailState {
        self.state.read().await.clone()
    }

    fn spawn_fetch(&self, metal: Metal) {
        let feed = Arc::clone(&self.feed);
        let state = Arc::downgrade(&self.state);
        tokio::spawn(async move {
            let result = feed.fetch_one(metal).await;

            let Some(state) = state.upgrade() else {
                debug!("Dropping {} result for disposed detail client", metal);
                return;
            };
            let mut s = state.write().await;
            // A result for a metal the view no longer tracks is stale
            if s.metal != metal {
                debug!("Dropping stale {} result, view now tracks {}", metal, s.metal);
                return;
            }
            match result {
                Ok(price) => {
                    s.data = Some(price);
                    s.loading = false;
                    s.error = None;
                }
                Err(e) => {
                    s.data = None;
                    s.loading = false;
                    s.error = Some(e.to_string());
                }
            }
        });
    }
}
