//! Abstract input state, as seen by the camera.
//!
//! The renderer never reads an input device itself. Instead, it polls an
//! [`InputState`] once per frame. Frontends implement the trait on top of
//! whatever event source they have; [`KeySet`] is a simple implementation
//! suitable for tests and for frontends that track key state themselves.

use core::fmt::{self, Debug, Formatter};

/// A logical key, or camera control.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
}

impl Key {
    /// All the keys, in declaration order.
    pub const ALL: [Key; 10] = [
        Key::Forward,
        Key::Back,
        Key::StrafeLeft,
        Key::StrafeRight,
        Key::Up,
        Key::Down,
        Key::YawLeft,
        Key::YawRight,
        Key::PitchUp,
        Key::PitchDown,
    ];

    const fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// Trait for querying which keys are currently held down.
pub trait InputState {
    /// Returns whether `key` is currently pressed.
    fn is_pressed(&self, key: Key) -> bool;
}

/// A set of keys, represented as a bitset.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct KeySet(u16);

impl KeySet {
    /// Returns the empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns whether `self` contains no keys.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Adds `key` to `self`.
    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    /// Removes `key` from `self`.
    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    /// Removes all keys from `self`.
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Returns whether `self` contains `key`.
    pub const fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Returns an iterator over the keys in `self`.
    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|&k| self.contains(k))
    }
}

impl InputState for KeySet {
    fn is_pressed(&self, key: Key) -> bool {
        self.contains(key)
    }
}

impl<T: InputState + ?Sized> InputState for &T {
    fn is_pressed(&self, key: Key) -> bool {
        (**self).is_pressed(key)
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = Self::new();
        iter.into_iter().for_each(|k| set.press(k));
        set
    }
}

impl<const N: usize> From<[Key; N]> for KeySet {
    fn from(keys: [Key; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl Debug for KeySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
