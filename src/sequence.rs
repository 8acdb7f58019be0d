use crate::light::LightState;
use alloc::vec::Vec;
use core::time::Duration;

/// A single timed phase: which lamps are lit, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceStep {
    /// Lamps lit during the step.
    pub lights: LightState,

    /// How long the step is held.
    pub duration: Duration,
}

impl SequenceStep {
    /// Creates a new sequence step.
    #[inline]
    pub fn new(lights: LightState, duration: Duration) -> Self {
        Self { lights, duration }
    }
}

/// An ordered list of light states with durations, plus a restartable cursor.
///
/// The cursor always lies in `0..len` (or at 0 when empty). Reads past the end
/// return [`LightState::NONE`] and [`Duration::ZERO`] instead of failing, so a
/// sequence can be handed to a [`Controller`](crate::Controller) without
/// checking it first.
///
/// The usual traversal visits every step exactly once:
///
/// ```
/// # use core::time::Duration;
/// # use traffic_sequencer::{LightState, Sequence};
/// let mut sequence = Sequence::new();
/// sequence.add(LightState::RED, Duration::from_secs(2));
/// sequence.add(LightState::GREEN, Duration::from_secs(5));
///
/// let mut visited = 0;
/// sequence.restart();
/// loop {
///     visited += 1;
///     if !sequence.advance() {
///         break;
///     }
/// }
/// assert_eq!(visited, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    steps: Vec<SequenceStep>,
    index: usize,
}

impl Sequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn add(&mut self, lights: LightState, duration: Duration) {
        self.steps.push(SequenceStep::new(lights, duration));
    }

    /// Appends a step, builder style.
    pub fn with_step(mut self, lights: LightState, duration: Duration) -> Self {
        self.add(lights, duration);
        self
    }

    /// Removes every step and rewinds the cursor.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.index = 0;
    }

    /// Moves the cursor back to the first step.
    #[inline]
    pub fn restart(&mut self) {
        self.index = 0;
    }

    /// Moves the cursor forward one step.
    ///
    /// Returns `false` when the end is passed, in which case the cursor has
    /// already wrapped back to the first step.
    pub fn advance(&mut self) -> bool {
        self.index += 1;

        if self.index >= self.steps.len() {
            self.restart();
            return false;
        }

        true
    }

    /// Returns the number of steps in this sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns the cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Returns the step under the cursor, if any.
    pub fn current(&self) -> Option<&SequenceStep> {
        self.steps.get(self.index)
    }

    /// Lamps lit by the step under the cursor.
    pub fn current_state(&self) -> LightState {
        self.state_at(self.index)
    }

    /// Duration of the step under the cursor.
    pub fn current_duration(&self) -> Duration {
        self.duration_at(self.index)
    }

    pub fn state_at(&self, index: usize) -> LightState {
        self.steps
            .get(index)
            .map_or(LightState::NONE, |step| step.lights)
    }

    pub fn duration_at(&self, index: usize) -> Duration {
        self.steps
            .get(index)
            .map_or(Duration::ZERO, |step| step.duration)
    }

    /// Returns the steps in order.
    pub fn steps(&self) -> &[SequenceStep] {
        &self.steps
    }

    /// Sum of every step's duration.
    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

impl FromIterator<SequenceStep> for Sequence {
    fn from_iter<T: IntoIterator<Item = SequenceStep>>(iter: T) -> Self {
        Self {
            steps: iter.into_iter().collect(),
            index: 0,
        }
    }
}
