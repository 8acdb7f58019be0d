use crate::head::SignalHead;
use crate::light::LightState;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

/// Shared handle to a signal head.
///
/// The same head may sit in several groups; every group writes through to the
/// one underlying unit.
pub type HeadRef = Rc<RefCell<dyn SignalHead>>;

/// A set of signal heads that receive identical state changes.
///
/// Cloning a group clones the handles, not the heads.
#[derive(Clone, Default)]
pub struct LightGroup {
    heads: Vec<HeadRef>,
}

impl LightGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group holding a single head.
    pub fn single(head: HeadRef) -> Self {
        let mut group = Self::new();
        group.add_head(head);
        group
    }

    /// Creates a group holding every head of every group in `groups`, in order.
    pub fn merged<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = &'a LightGroup>,
    {
        groups
            .into_iter()
            .flat_map(|group| group.heads.iter().cloned())
            .collect()
    }

    pub fn add_head(&mut self, head: HeadRef) {
        self.heads.push(head);
    }

    pub fn heads(&self) -> &[HeadRef] {
        &self.heads
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    pub fn turn_all_lights_off(&self) {
        for head in &self.heads {
            head.borrow_mut().turn_all_lights_off();
        }
    }

    pub fn turn_lights_on(&self, lights: LightState) {
        self.set_lights_state(lights, true);
    }

    pub fn turn_lights_off(&self, lights: LightState) {
        self.set_lights_state(lights, false);
    }

    pub fn set_lights_state(&self, lights: LightState, on: bool) {
        for head in &self.heads {
            head.borrow_mut().set_lights_state(lights, on);
        }
    }

    /// Switches every head off, then lights exactly `lights`.
    pub fn show(&self, lights: LightState) {
        self.turn_all_lights_off();
        self.turn_lights_on(lights);
    }
}

impl FromIterator<HeadRef> for LightGroup {
    fn from_iter<T: IntoIterator<Item = HeadRef>>(iter: T) -> Self {
        Self {
            heads: iter.into_iter().collect(),
        }
    }
}

impl core::fmt::Debug for LightGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LightGroup")
            .field("heads", &self.heads.len())
            .finish()
    }
}
