use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::interface::TranslateError;

/// Endpoint selection policy for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStrategy {
    /// Rotate through endpoints in configuration order.
    RoundRobin,
    /// Pick the endpoint with the fewest in-flight calls.
    #[default]
    LeastLoad,
}

/// A fixed set of backend addresses with per-endpoint in-flight counters.
///
/// The set is immutable after construction; only the counters change. Every
/// counter mutation happens inside a short critical section that never spans
/// a network call.
pub struct EndpointPool {
    addresses: Vec<String>,
    loads: Mutex<Vec<u32>>,
    cursor: AtomicUsize,
    strategy: BalanceStrategy,
}

impl EndpointPool {
    pub fn new(
        addresses: Vec<String>,
        strategy: BalanceStrategy,
    ) -> Result<Self, TranslateError> {
        if addresses.is_empty() {
            return Err(TranslateError::Config(
                "endpoint pool must not be empty".to_string(),
            ));
        }
        let loads = Mutex::new(vec![0; addresses.len()]);
        Ok(Self {
            addresses,
            loads,
            cursor: AtomicUsize::new(0),
            strategy,
        })
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Select a fresh endpoint and take one unit of load on it.
    ///
    /// `attempted[i]` marks endpoints already tried within the current
    /// logical call; those are never returned again. Returns `None` once
    /// every endpoint is marked.
    pub fn acquire(self: &Arc<Self>, attempted: &[bool]) -> Option<LoadGuard> {
        let index = match self.strategy {
            BalanceStrategy::RoundRobin => self.next_round_robin(attempted)?,
            BalanceStrategy::LeastLoad => self.next_least_load(attempted)?,
        };
        Some(LoadGuard {
            pool: Arc::clone(self),
            index,
        })
    }

    fn next_round_robin(&self, attempted: &[bool]) -> Option<usize> {
        // n consecutive cursor values cover every index exactly once, so the
        // probe loop is bounded even when most endpoints are excluded.
        for _ in 0..self.addresses.len() {
            let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.addresses.len();
            if !attempted[index] {
                let mut loads = self.loads.lock().unwrap();
                loads[index] += 1;
                return Some(index);
            }
        }
        None
    }

    fn next_least_load(&self, attempted: &[bool]) -> Option<usize> {
        // The pick and its increment share one lock acquisition, so two
        // contending callers cannot both take the same stale minimum.
        let mut loads = self.loads.lock().unwrap();
        let index = loads
            .iter()
            .enumerate()
            .filter(|(i, _)| !attempted[*i])
            .min_by_key(|(_, load)| **load)
            .map(|(i, _)| i)?;
        loads[index] += 1;
        Some(index)
    }

    /// Snapshot of the per-endpoint in-flight counters.
    pub fn loads(&self) -> Vec<u32> {
        self.loads.lock().unwrap().clone()
    }

    /// Total number of calls currently in flight through the pool.
    pub fn total_in_flight(&self) -> u32 {
        self.loads.lock().unwrap().iter().sum()
    }
}

/// One unit of load held against an endpoint for the duration of a call.
///
/// Dropping the guard releases the load, so the counter is decremented on
/// every exit path, including early returns and abandoned futures.
pub struct LoadGuard {
    pool: Arc<EndpointPool>,
    index: usize,
}

impl LoadGuard {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn address(&self) -> &str {
        &self.pool.addresses[self.index]
    }
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        let mut loads = self.pool.loads.lock().unwrap();
        loads[self.index] -= 1;
    }
}
