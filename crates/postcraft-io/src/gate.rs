//! Single-flight guard for captures.

/// Tracks whether a capture is running.
///
/// The generator panel keeps one of these in a signal.  A click while a
/// capture is in flight is ignored rather than queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportGate {
    in_flight: bool,
}

impl ExportGate {
    #[must_use]
    pub const fn is_busy(self) -> bool {
        self.in_flight
    }

    /// Claim the gate.  Returns `false` if a capture already holds it.
    pub const fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Release the gate, whatever the capture's outcome.
    pub const fn finish(&mut self) {
        self.in_flight = false;
    }
}
