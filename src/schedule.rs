//! The shared scatter/chase rotation every ghost follows by default.

use crate::ghost::Mode;

/// Ordered `(mode, ticks)` phases, cycling forever. Shared read-only by all
/// ghosts; frightened and eaten are externally-triggered overrides and never
/// appear in a schedule. The first phase must be Scatter, because an eaten
/// ghost rejoins the rotation there after respawning.
#[derive(Clone, Debug)]
pub struct ModeSchedule {
    phases: Vec<(Mode, u32)>,
}

impl ModeSchedule {
    /// Returns `None` when the phase list is empty, starts with anything but
    /// Scatter, contains a zero duration, or names a non-schedule mode.
    pub fn new(phases: Vec<(Mode, u32)>) -> Option<Self> {
        if !matches!(phases.first(), Some(&(Mode::Scatter, _))) {
            return None;
        }
        let well_formed = phases
            .iter()
            .all(|&(mode, ticks)| ticks > 0 && matches!(mode, Mode::Scatter | Mode::Chase));
        well_formed.then_some(Self { phases })
    }

    /// The default rotation, sized for the 70 ms tick.
    pub fn standard() -> Self {
        Self {
            phases: vec![
                (Mode::Scatter, 100),
                (Mode::Chase, 285),
                (Mode::Scatter, 100),
                (Mode::Chase, 285),
                (Mode::Scatter, 70),
                (Mode::Chase, 400),
            ],
        }
    }

    pub fn phase(&self, index: usize) -> (Mode, u32) {
        self.phases[index % self.phases.len()]
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phases.len()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}
