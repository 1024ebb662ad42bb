//! Input events and their mapping to simulation actions

use std::collections::VecDeque;

use crate::error::Result;
use crate::sim::{Action, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Space,
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed / interrupt
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Produces the events that arrived since the last poll
pub trait InputSource {
    /// Drain everything pending; never blocks
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}

/// Turn one frame's events into simulation actions, keeping their order
pub fn to_tick_input(events: &[InputEvent]) -> TickInput {
    let actions = events
        .iter()
        .filter_map(|event| match event {
            InputEvent::Quit => Some(Action::Quit),
            InputEvent::KeyDown(Key::Space | Key::Up) => Some(Action::Jump),
            InputEvent::KeyDown(Key::Down) => Some(Action::Duck(true)),
            InputEvent::KeyUp(Key::Down) => Some(Action::Duck(false)),
            InputEvent::KeyDown(Key::Enter) => Some(Action::Confirm),
            InputEvent::KeyDown(Key::Escape) => Some(Action::Cancel),
            _ => None,
        })
        .collect();
    TickInput::new(actions)
}

/// Replays a fixed list of per-frame event batches
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: Vec<Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into(),
            quit_when_done: false,
        }
    }

    /// Emit `Quit` once the script runs out
    pub fn then_quit(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    /// Append `count` frames without input
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(Vec::new(), count));
        self
    }

    pub fn press(mut self, event: InputEvent) -> Self {
        self.frames.push_back(vec![event]);
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        match self.frames.pop_front() {
            Some(events) => Ok(events),
            None if self.quit_when_done => Ok(vec![InputEvent::Quit]),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let input = to_tick_input(&[
            InputEvent::KeyDown(Key::Down),
            InputEvent::KeyDown(Key::Space),
            InputEvent::KeyUp(Key::Space),
            InputEvent::KeyDown(Key::Other),
            InputEvent::KeyUp(Key::Down),
        ]);
        assert_eq!(
            input.actions,
            vec![Action::Duck(true), Action::Jump, Action::Duck(false)]
        );
        assert!(to_tick_input(&[InputEvent::KeyDown(Key::Up)]).has(Action::Jump));
        assert!(to_tick_input(&[InputEvent::KeyDown(Key::Enter)]).has(Action::Confirm));
        assert!(to_tick_input(&[InputEvent::KeyDown(Key::Escape)]).has(Action::Cancel));
        assert!(to_tick_input(&[InputEvent::Quit]).has(Action::Quit));
    }

    #[test]
    fn test_script_replays_then_quits() {
        let mut input = ScriptedInput::default()
            .press(InputEvent::KeyDown(Key::Space))
            .idle(2)
            .then_quit();
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.poll().unwrap(), vec![InputEvent::KeyDown(Key::Space)]);
        assert!(input.poll().unwrap().is_empty());
        assert!(input.poll().unwrap().is_empty());
        assert_eq!(input.poll().unwrap(), vec![InputEvent::Quit]);
        assert_eq!(input.poll().unwrap(), vec![InputEvent::Quit]);
    }
}
