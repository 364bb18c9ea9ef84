//! Shared Scoreboard Handle
//!
//! The sensing layer (camera thread or manual buttons) and the display
//! poller share one engine. Every mutation is a single write-lock
//! critical section and every snapshot a single read, so a reader sees
//! either the state before an event or after it, never in between.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use crate::config::ScoringConfig;
use crate::engine::{ApplyDecision, ScoringEngine, UndoDecision};
use crate::error::Result;
use crate::models::{EventSymbol, MatchSetup, MatchStateView, Timestamp};

/// Monotonic time source shared by the engine and whoever feeds it.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock monotonic time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_duration(self.origin.elapsed())
    }
}

/// Hand-driven clock for tests and scripted replays.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, at: Timestamp) {
        self.nanos.store(at.as_duration().as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_duration(Duration::from_nanos(self.nanos.load(Ordering::SeqCst)))
    }
}

/// Cloneable handle to one match.
#[derive(Clone)]
pub struct Scoreboard {
    engine: Arc<RwLock<ScoringEngine>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scoreboard").field("engine", &self.engine).finish_non_exhaustive()
    }
}

impl Scoreboard {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        Ok(Self::with_clock(ScoringEngine::new(config)?, MonotonicClock::new()))
    }

    pub fn with_clock(engine: ScoringEngine, clock: impl Clock + 'static) -> Self {
        Self { engine: Arc::new(RwLock::new(engine)), clock: Arc::new(clock) }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // The engine never leaves a half-applied event behind, so a poisoned
    // lock still guards a consistent value.
    fn read(&self) -> RwLockReadGuard<'_, ScoringEngine> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScoringEngine> {
        self.engine.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn apply(&self, event: EventSymbol) -> ApplyDecision {
        let now = self.now();
        self.write().apply(event, now)
    }

    /// Run one mutation and take the snapshot inside the same write lock,
    /// so the outcome and the view always describe the same state.
    pub fn update<R>(&self, mutate: impl FnOnce(&mut ScoringEngine, Timestamp) -> R) -> (R, MatchStateView) {
        let now = self.now();
        let mut engine = self.write();
        let outcome = mutate(&mut engine, now);
        (outcome, engine.snapshot(now))
    }

    pub fn apply_with_snapshot(&self, event: EventSymbol) -> (ApplyDecision, MatchStateView) {
        self.update(|engine, now| engine.apply(event, now))
    }

    pub fn apply_raw(&self, symbol: &str) -> Result<ApplyDecision> {
        let now = self.now();
        self.write().apply_raw(symbol, now)
    }

    pub fn undo_last(&self) -> UndoDecision {
        self.write().undo_last()
    }

    pub fn reset(&self) {
        self.write().reset();
    }

    pub fn reset_with_setup(&self, setup: MatchSetup) -> Result<()> {
        self.write().reset_with_setup(setup)
    }

    pub fn configure(&self, overs_limit: u32) -> Result<()> {
        self.write().configure(overs_limit)
    }

    pub fn clear_last_event(&self) {
        self.write().clear_last_event();
    }

    pub fn snapshot(&self) -> MatchStateView {
        let now = self.now();
        self.read().snapshot(now)
    }

    pub fn config(&self) -> ScoringConfig {
        self.read().config().clone()
    }
}
