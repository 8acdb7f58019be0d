//! Drives sequences onto light groups.
//!
//! Provides [`Controller`], which owns an ordered worklist of
//! (sequence, group id) pairs and steps each one to completion against the
//! registered groups, blocking on the delay primitive for every hold.

use crate::group::LightGroup;
use crate::sequence::Sequence;
use crate::time;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

/// Identifier a controller uses to address one of its groups.
pub type GroupId = usize;

/// Runs (sequence, group) pairs in the order they were added.
///
/// A group id may appear in several pairs; the pairs still run strictly in
/// list order. Pairs that name an unregistered group are skipped: nothing is
/// written and no time passes for them.
///
/// `run` leaves the pair cursor back at the first pair, so calling it again
/// replays the identical series of writes.
#[derive(Debug, Default)]
pub struct Controller {
    groups: BTreeMap<GroupId, LightGroup>,
    sequences: Vec<(Sequence, GroupId)>,
    index: usize,
}

impl Controller {
    /// Creates a controller with no groups or sequences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `group` under `id`, replacing any group already there.
    pub fn add_group(&mut self, group: LightGroup, id: GroupId) {
        self.groups.insert(id, group);
    }

    /// Appends `sequence` to the worklist, targeting group `target`.
    pub fn add_sequence(&mut self, sequence: Sequence, target: GroupId) {
        self.sequences.push((sequence, target));
    }

    /// Builder-style [`Controller::add_group`].
    pub fn with_group(mut self, group: LightGroup, id: GroupId) -> Self {
        self.add_group(group, id);
        self
    }

    /// Builder-style [`Controller::add_sequence`].
    pub fn with_sequence(mut self, sequence: Sequence, target: GroupId) -> Self {
        self.add_sequence(sequence, target);
        self
    }

    /// Drops every sequence, keeping the registered groups.
    pub fn clear_sequences(&mut self) {
        self.sequences.clear();
        self.reset();
    }

    pub fn group(&self, id: GroupId) -> Option<&LightGroup> {
        self.groups.get(&id)
    }

    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Runs every pair to completion, blocking for each step's duration.
    ///
    /// For each step the bound group is switched fully off, then the step's
    /// lamps are lit, then the delay holds. A controller with no sequences
    /// returns immediately without touching any head.
    pub fn run<D: DelayNs + ?Sized>(&mut self, delay: &mut D) {
        if self.sequences.is_empty() {
            return;
        }

        loop {
            let (sequence, group_id) = &mut self.sequences[self.index];
            let group_id = *group_id;

            match self.groups.get(&group_id) {
                Some(group) => drain(sequence, group_id, group, delay),
                None => trace!("no group registered for id {}", group_id),
            }

            if !self.advance() {
                break;
            }
        }
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn advance(&mut self) -> bool {
        self.index += 1;

        if self.index >= self.sequences.len() {
            self.reset();
            return false;
        }

        true
    }
}

fn drain<D: DelayNs + ?Sized>(
    sequence: &mut Sequence,
    group_id: GroupId,
    group: &LightGroup,
    delay: &mut D,
) {
    sequence.restart();

    if sequence.is_empty() {
        return;
    }

    loop {
        let lights = sequence.current_state();
        let duration = sequence.current_duration();

        trace!(
            "group {}: lights {} for {} ms",
            group_id,
            lights,
            time::as_millis_u32(duration)
        );

        group.show(lights);
        time::hold(delay, duration);

        if !sequence.advance() {
            break;
        }
    }
}
