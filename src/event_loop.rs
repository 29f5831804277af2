use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands to its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Input(Event),
    /// The poll interval elapsed. Carries the wall time since the previous
    /// tick so animations advance by real time, not by loop iterations.
    Tick(Duration),
}

/// A centralized event loop that drives the main UI thread.
///
/// Each iteration first ticks the handler, then drains every pending input
/// event. Handlers run to completion one at a time; nothing here spawns
/// threads, so the overlay sees a strictly ordered stream of pointer events
/// and animation frames.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll(&mut self) -> io::Result<Option<Event>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Runs the application loop, taking control of the current thread.
    ///
    /// The `handler` is called with:
    /// - `LoopEvent::Tick(dt)` once per iteration, before input is drained.
    /// - `LoopEvent::Input(event)` for every queued input event.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, LoopEvent) -> io::Result<ControlFlow>,
    {
        let mut last_tick = Instant::now();
        loop {
            let now = Instant::now();
            let dt = now.saturating_duration_since(last_tick);
            last_tick = now;
            if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Tick(dt))? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                // Drain the queue so a burst of drag samples does not leave the
                // bubble trailing behind the pointer.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, LoopEvent::Input(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
