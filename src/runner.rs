use std::io;
use std::time::Duration;

use crate::app::App;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop, LoopEvent};

/// Drive `app` until it asks to quit.
///
/// Enters the output driver, enables mouse capture on the input driver and
/// redraws only when an input event arrived or a tick reported a change.
/// The output driver is always exited again, also when the loop fails.
pub fn run_bubble_app<D, O>(
    driver: D,
    output: &mut O,
    app: &mut App,
    poll_interval: Duration,
) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let result = drive(driver, output, app, poll_interval);
    let exited = output.exit();
    result.and(exited)
}

fn drive<D, O>(driver: D, output: &mut O, app: &mut App, poll_interval: Duration) -> io::Result<()>
where
    D: InputDriver,
    O: OutputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let mut needs_redraw = true;
    let result = event_loop.run(|_, event| match event {
        LoopEvent::Tick(dt) => {
            if app.tick(dt) {
                needs_redraw = true;
            }
            if needs_redraw {
                output.draw(|mut frame| app.render(&mut frame))?;
                needs_redraw = false;
            }
            Ok(ControlFlow::Continue)
        }
        LoopEvent::Input(event) => {
            needs_redraw = true;
            Ok(app.handle_event(&event))
        }
    });

    let released = event_loop.driver().set_mouse_capture(false);
    result.and(released)
}
