//! Crossterm terminal frontend: screen setup/teardown and keyboard input
//!
//! Terminals that support the keyboard enhancement protocol report key
//! releases. Classic terminals only send presses (OS key repeat shows up as
//! more presses), so a held Down, Space or Up key is considered released once
//! it has gone quiet for `HOLD_WINDOW` frames.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use super::input::{InputEvent, InputSource, Key};
use crate::error::{EngineError, Result};

/// Frames without a press or repeat before a held key counts as released.
/// Longer than the usual OS key-repeat delay.
pub const HOLD_WINDOW: u64 = 36;

/// Raw mode + alternate screen for as long as it lives
pub struct TerminalGuard {
    keyboard_enhanced: bool,
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| EngineError::unavailable("terminal", e.to_string()))?;
        // From here on, dropping the guard restores the terminal
        let mut guard = Self {
            keyboard_enhanced: false,
            active: true,
        };

        let mut out = io::stdout();
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;

        // Ask for release events where the terminal can send them
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            guard.keyboard_enhanced = out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        }
        log::info!(
            "Terminal ready (key release events: {})",
            guard.keyboard_enhanced
        );
        Ok(guard)
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Put the terminal back the way it was; safe to call twice
    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut out = io::stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
        log::info!("Terminal restored");
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

/// Turns raw key events into game events, one frame at a time
#[derive(Debug, Default)]
pub struct KeyTracker {
    frame: u64,
    /// Held keys and the frame each was last seen pressed or repeating
    held: BTreeMap<Key, u64>,
    release_events: bool,
}

impl KeyTracker {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            ..Self::default()
        }
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Keys whose OS repeats must not re-trigger the action
    fn debounced(&self, key: Key) -> bool {
        match key {
            Key::Down => true,
            // Release-reporting terminals send repeats as `Repeat`
            Key::Space | Key::Up => !self.release_events,
            _ => false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, out: &mut Vec<InputEvent>) {
        if key.kind == KeyEventKind::Press
            && key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            out.push(InputEvent::Quit);
            return;
        }

        let mapped = map_key(key.code);
        let debounced = self.debounced(mapped);
        match key.kind {
            KeyEventKind::Press if debounced => {
                // A press while already held is an OS repeat
                if self.held.insert(mapped, self.frame).is_none() {
                    out.push(InputEvent::KeyDown(mapped));
                }
            }
            KeyEventKind::Press => out.push(InputEvent::KeyDown(mapped)),
            KeyEventKind::Repeat => {
                if let Some(seen) = self.held.get_mut(&mapped) {
                    *seen = self.frame;
                }
            }
            KeyEventKind::Release if debounced => {
                if self.held.remove(&mapped).is_some() {
                    out.push(InputEvent::KeyUp(mapped));
                }
            }
            KeyEventKind::Release => out.push(InputEvent::KeyUp(mapped)),
        }
    }

    /// Expire quiet keys on terminals without release events
    pub fn end_frame(&mut self, out: &mut Vec<InputEvent>) {
        if self.release_events {
            return;
        }
        let frame = self.frame;
        self.held.retain(|&key, &mut seen| {
            let quiet = frame.saturating_sub(seen) > HOLD_WINDOW;
            if quiet {
                out.push(InputEvent::KeyUp(key));
            }
            !quiet
        });
    }
}

/// Keyboard input read from the terminal without blocking
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new(keyboard_enhanced: bool) -> Self {
        Self {
            tracker: KeyTracker::new(keyboard_enhanced),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let lost = |e: io::Error| EngineError::unavailable("input device", e.to_string());
        let mut events = Vec::new();
        self.tracker.begin_frame();
        while event::poll(Duration::ZERO).map_err(lost)? {
            if let Event::Key(key) = event::read().map_err(lost)? {
                self.tracker.on_key(key, &mut events);
            }
        }
        self.tracker.end_frame(&mut events);
        Ok(events)
    }
}
