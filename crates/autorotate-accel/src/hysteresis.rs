use crate::types::Orientation;

/// Ticks the classifier has to hold a new value before it is committed.
pub const DEFAULT_DEBOUNCE_TICKS: u32 = 10;

/// An orientation change that should be applied now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub previous: Orientation,
    pub orientation: Orientation,
    /// Crossed between the side family (Left/Right) and the upright one.
    pub family_changed: bool,
}

/// Two-stage latch between what the classifier says and what was applied.
///
/// `candidate` follows the classifier every tick; `committed` only moves once
/// the candidate has been stable for more than `debounce_ticks` ticks.
#[derive(Debug, Clone)]
pub struct Hysteresis {
    committed: Orientation,
    candidate: Orientation,
    stable_ticks: u32,
    debounce_ticks: u32,
}

impl Hysteresis {
    pub fn new(debounce_ticks: u32) -> Self {
        Self {
            committed: Orientation::Normal,
            candidate: Orientation::Normal,
            stable_ticks: 0,
            debounce_ticks,
        }
    }

    /// Feed one classifier output. Returns a commit when the applied
    /// orientation should change on this tick.
    pub fn update(&mut self, observed: Orientation) -> Option<Commit> {
        if observed != self.candidate {
            self.candidate = observed;
            self.stable_ticks = 0;
        } else {
            self.stable_ticks = self.stable_ticks.saturating_add(1);
        }

        if self.committed == self.candidate || self.stable_ticks <= self.debounce_ticks {
            return None;
        }

        let previous = self.committed;
        self.committed = self.candidate;
        Some(Commit {
            previous,
            orientation: self.committed,
            family_changed: previous.is_side() != self.committed.is_side(),
        })
    }

    pub fn committed(&self) -> Orientation {
        self.committed
    }

    pub fn candidate(&self) -> Orientation {
        self.candidate
    }

    /// Consecutive ticks the candidate has held its current value.
    pub fn stable_ticks(&self) -> u32 {
        self.stable_ticks
    }

    pub fn debounce_ticks(&self) -> u32 {
        self.debounce_ticks
    }
}

impl Default for Hysteresis {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_TICKS)
    }
}
