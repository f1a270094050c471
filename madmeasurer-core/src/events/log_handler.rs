//! Forwards engine events to the `log` facade.

use super::{Event, EventHandler};

/// Logs every event at its own level under the `madmeasurer` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle(&self, event: &Event) {
        // Progress lines are rendered by the terminal handler.
        if matches!(event, Event::MeasurementProgress { .. }) {
            log::trace!(target: "madmeasurer", "{event}");
            return;
        }
        log::log!(target: "madmeasurer", event.level(), "{event}");
    }
}
