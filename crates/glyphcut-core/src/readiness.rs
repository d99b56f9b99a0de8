//! Engines that may arrive after the render context was built
//!
//! The bidi engine and the shaping engine can be installed from any
//! thread at any time. Shaped rendering needs both, and blocks on
//! [`EngineGate::wait_all`] until they are present or the deadline
//! passes. Everything else reads whatever is installed right now.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::traits::{BidiEngine, ShapingEngine};

#[derive(Default)]
struct GateState {
    bidi: Option<Arc<dyn BidiEngine>>,
    shaper: Option<Arc<dyn ShapingEngine>>,
}

impl GateState {
    fn ready_engines(&self) -> Option<ReadyEngines> {
        match (&self.bidi, &self.shaper) {
            (Some(bidi), Some(shaper)) => Some(ReadyEngines {
                bidi: Arc::clone(bidi),
                shaper: Arc::clone(shaper),
            }),
            _ => None,
        }
    }
}

/// Both engines, handed out once the gate has opened
#[derive(Clone)]
pub struct ReadyEngines {
    pub bidi: Arc<dyn BidiEngine>,
    pub shaper: Arc<dyn ShapingEngine>,
}

/// Join point for the two late-bound engines
#[derive(Default)]
pub struct EngineGate {
    state: Mutex<GateState>,
    ready: Condvar,
}

impl EngineGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_bidi(&self, engine: Arc<dyn BidiEngine>) {
        log::debug!("Bidi engine '{}' installed", engine.name());
        self.state.lock().bidi = Some(engine);
        self.ready.notify_all();
    }

    pub fn install_shaper(&self, engine: Arc<dyn ShapingEngine>) {
        log::debug!("Shaping engine '{}' installed", engine.name());
        self.state.lock().shaper = Some(engine);
        self.ready.notify_all();
    }

    pub fn bidi(&self) -> Option<Arc<dyn BidiEngine>> {
        self.state.lock().bidi.clone()
    }

    pub fn shaper(&self) -> Option<Arc<dyn ShapingEngine>> {
        self.state.lock().shaper.clone()
    }

    pub fn is_ready(&self) -> bool {
        let state = self.state.lock();
        state.bidi.is_some() && state.shaper.is_some()
    }

    /// Block until both engines are installed, or `timeout` elapses
    ///
    /// Returns `None` on timeout. A zero timeout only checks;
    /// `Duration::MAX` waits for as long as it takes.
    pub fn wait_all(&self, timeout: Duration) -> Option<ReadyEngines> {
        // `None` when the deadline is too far out to represent
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();
        loop {
            if let Some(engines) = state.ready_engines() {
                return Some(engines);
            }
            match deadline {
                Some(deadline) => {
                    if self.ready.wait_until(&mut state, deadline).timed_out() {
                        return state.ready_engines();
                    }
                },
                None => self.ready.wait(&mut state),
            }
        }
    }

    /// Which engines are still missing, for diagnostics
    pub fn missing(&self) -> Vec<&'static str> {
        let state = self.state.lock();
        let mut missing = Vec::new();
        if state.bidi.is_none() {
            missing.push("bidi engine");
        }
        if state.shaper.is_none() {
            missing.push("shaping engine");
        }
        missing
    }
}

impl std::fmt::Debug for EngineGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("EngineGate")
            .field("bidi", &state.bidi.as_ref().map(|e| e.name()))
            .field("shaper", &state.shaper.as_ref().map(|e| e.name()))
            .finish()
    }
}
