//! Interrupt dispatch registry
//!
//! The pulse state machine switches its own pulse-timer handler between
//! "end pulse" and "delay elapsed" at runtime, so the hot interrupt path
//! carries no mode check. Instead of a mutable function-pointer vector
//! table, the registry maps logical interrupt sources to handler tags;
//! the interrupt entry points branch once on the active tag.
//!
//! Entries are only mutated while the corresponding interrupt source is
//! quiescent (from the handler itself, or from task context inside a
//! critical section).

use heapless::FnvIndexMap;

/// Logical interrupt sources the engine dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptId {
    /// Cycle timer compare match (segment pacing)
    CycleTimer,
    /// Pulse timer compare match (pulse/delay shaping)
    PulseTimer,
}

/// Handler tags the entry points branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqHandler {
    /// Pull the next segment from the planner
    CycleTick,
    /// End the step pulse: clear all step outputs
    EndPulse,
    /// Direction-settling delay has elapsed: emit the pending step edge
    DelayElapsed,
    /// No-op fallback for unregistered sources
    Unhandled,
}

/// Fixed-capacity interrupt vector registry
#[derive(Debug, Default)]
pub struct VectorRegistry {
    entries: FnvIndexMap<InterruptId, IrqHandler, 4>,
}

impl VectorRegistry {
    /// Create an empty registry; all sources dispatch to
    /// [`IrqHandler::Unhandled`]
    pub fn new() -> Self {
        Self {
            entries: FnvIndexMap::new(),
        }
    }

    /// Install a handler for a source, replacing any previous entry
    pub fn register(&mut self, id: InterruptId, handler: IrqHandler) {
        // Capacity covers all interrupt sources, insert cannot fail.
        let _ = self.entries.insert(id, handler);
    }

    /// Remove a source's handler; it falls back to the no-op
    pub fn unregister(&mut self, id: InterruptId) {
        self.entries.remove(&id);
    }

    /// Active handler tag for a source
    pub fn dispatch(&self, id: InterruptId) -> IrqHandler {
        self.entries
            .get(&id)
            .copied()
            .unwrap_or(IrqHandler::Unhandled)
    }
}
