use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

/// Input driver that replays a fixed queue of events. Once the queue runs dry
/// `poll` reports no input, so the event loop only ticks.
#[derive(Debug, Default)]
pub struct ScriptedInputDriver {
    queue: VecDeque<Event>,
    mouse_capture: bool,
}

impl ScriptedInputDriver {
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        Self {
            queue: events.into_iter().collect(),
            mouse_capture: false,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }
}

impl InputDriver for ScriptedInputDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.queue.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.queue
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = enabled;
        Ok(())
    }
}
