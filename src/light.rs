//! Lamp vocabulary shared by every component.

use core::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// One physical indicator on a signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    /// Vehicle red.
    Red,
    /// Vehicle yellow (amber).
    Yellow,
    /// Vehicle green.
    Green,
    /// Pedestrian "don't walk".
    CrossingRed,
    /// Pedestrian "walk".
    CrossingGreen,
}

impl Lamp {
    /// Every lamp, in bit order.
    pub const ALL: [Lamp; 5] = [
        Lamp::Red,
        Lamp::Yellow,
        Lamp::Green,
        Lamp::CrossingRed,
        Lamp::CrossingGreen,
    ];

    /// The single-lamp state for this lamp.
    #[inline]
    pub const fn state(self) -> LightState {
        match self {
            Lamp::Red => LightState::RED,
            Lamp::Yellow => LightState::YELLOW,
            Lamp::Green => LightState::GREEN,
            Lamp::CrossingRed => LightState::CROSSING_RED,
            Lamp::CrossingGreen => LightState::CROSSING_GREEN,
        }
    }

    /// Returns true for the pedestrian crossing lamps.
    #[inline]
    pub const fn is_crossing(self) -> bool {
        matches!(self, Lamp::CrossingRed | Lamp::CrossingGreen)
    }
}

impl From<Lamp> for LightState {
    fn from(lamp: Lamp) -> Self {
        lamp.state()
    }
}

/// A set of lamps lit at the same time.
///
/// No exclusivity is enforced: `RED | GREEN` is a valid value, and it is up to
/// the sequence author not to build contradictory aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightState(u8);

impl LightState {
    pub const NONE: Self = Self(0);

    pub const RED: Self = Self(1 << 0);
    pub const YELLOW: Self = Self(1 << 1);
    pub const GREEN: Self = Self(1 << 2);
    pub const CROSSING_RED: Self = Self(1 << 3);
    pub const CROSSING_GREEN: Self = Self(1 << 4);

    /// Vehicle lamps.
    pub const MAIN: Self = Self::RED.union(Self::YELLOW).union(Self::GREEN);
    /// Pedestrian lamps.
    pub const CROSSING: Self = Self::CROSSING_RED.union(Self::CROSSING_GREEN);

    pub const ALL: Self = Self::MAIN.union(Self::CROSSING);

    /// Builds a state from raw bits, discarding bits outside [`LightState::ALL`].
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Builds a state from raw bits, or `None` if any unknown bit is set.
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns true if every lamp in `other` is also lit in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_lit(self, lamp: Lamp) -> bool {
        self.contains(lamp.state())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the lit lamps in bit order.
    pub fn lamps(self) -> impl Iterator<Item = Lamp> {
        Lamp::ALL.into_iter().filter(move |lamp| self.is_lit(*lamp))
    }
}

impl BitOr for LightState {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOr<Lamp> for LightState {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Lamp) -> Self {
        self.union(rhs.state())
    }
}

impl BitOr for Lamp {
    type Output = LightState;

    #[inline]
    fn bitor(self, rhs: Self) -> LightState {
        self.state().union(rhs.state())
    }
}

impl BitOrAssign for LightState {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LightState {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl Not for LightState {
    type Output = Self;

    /// Complement within [`LightState::ALL`].
    #[inline]
    fn not(self) -> Self {
        Self(!self.0 & Self::ALL.0)
    }
}

impl FromIterator<Lamp> for LightState {
    fn from_iter<T: IntoIterator<Item = Lamp>>(iter: T) -> Self {
        iter.into_iter()
            .fold(LightState::NONE, |state, lamp| state | lamp)
    }
}
