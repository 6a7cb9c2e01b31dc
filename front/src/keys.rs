//! Mapping terminal key events to camera controls.
//!
//! Key | Control
//! --- | -------
//! W / S | move forward / back
//! A / D | strafe left / right
//! Space / C | move up / down
//! ← / → | turn left / right
//! ↑ / ↓ | look up / down
//! Q, Esc, Ctrl-C | quit

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use gc::input::{InputState, Key, KeySet};

/// Returns the camera control bound to `key`, if any.
pub fn map_key(key: &KeyEvent) -> Option<Key> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    Some(match key.code {
        KeyCode::Char('w' | 'W') => Key::Forward,
        KeyCode::Char('s' | 'S') => Key::Back,
        KeyCode::Char('a' | 'A') => Key::StrafeLeft,
        KeyCode::Char('d' | 'D') => Key::StrafeRight,
        KeyCode::Char(' ') => Key::Up,
        KeyCode::Char('c' | 'C') => Key::Down,
        KeyCode::Left => Key::YawLeft,
        KeyCode::Right => Key::YawRight,
        KeyCode::Up => Key::PitchUp,
        KeyCode::Down => Key::PitchDown,
        _ => return None,
    })
}

/// Returns whether `key` should stop the program.
pub fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Tracks which controls are held down, from a stream of key events.
///
/// Most terminals only report key presses, plus repeated presses while a
/// key is held. Until a release event is seen, a key counts as released
/// once no press of it has arrived within the release timeout.
#[derive(Clone, Debug)]
pub struct HeldKeys {
    keys: KeySet,
    last_press: [Option<Instant>; Key::ALL.len()],
    release_timeout: Duration,
    reports_release: bool,
}

impl HeldKeys {
    /// The default release timeout.
    pub const RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

    pub fn new() -> Self {
        Self::with_release_timeout(Self::RELEASE_TIMEOUT)
    }

    pub fn with_release_timeout(release_timeout: Duration) -> Self {
        Self {
            keys: KeySet::new(),
            last_press: [None; Key::ALL.len()],
            release_timeout,
            reports_release: false,
        }
    }

    /// Returns the set of currently held controls.
    pub fn keys(&self) -> KeySet {
        self.keys
    }

    /// Updates the held controls from a key event received at `now`.
    pub fn handle(&mut self, ev: &KeyEvent, now: Instant) {
        let Some(key) = map_key(ev) else {
            return;
        };
        match ev.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.keys.press(key);
                self.last_press[key as usize] = Some(now);
            }
            KeyEventKind::Release => {
                self.reports_release = true;
                self.keys.release(key);
                self.last_press[key as usize] = None;
            }
        }
    }

    /// Releases the controls not pressed within the timeout before `now`.
    ///
    /// No-op once the terminal has been seen to report key releases.
    pub fn expire(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        let timeout = self.release_timeout;
        for key in Key::ALL {
            let slot = &mut self.last_press[key as usize];
            if slot.is_some_and(|t| now.duration_since(t) > timeout) {
                *slot = None;
                self.keys.release(key);
            }
        }
    }

    /// Releases all controls.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.last_press = [None; Key::ALL.len()];
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState for HeldKeys {
    fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(key)
    }
}
