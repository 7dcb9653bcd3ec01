//! The three-phase analysis lifecycle.

use dl_core::{Event, Result};
use dl_hist::Book;

/// Per-event control-flow outcome of [`Analysis::analyze`].
///
/// A veto is not an error: it means "no further histogram fills for this
/// event", after whatever unconditional fills already happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event passed the selection.
    Accepted,
    /// The event was discarded by the selection.
    Vetoed,
}

/// Run-level normalization inputs, supplied by the driver at finalize time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunInfo {
    /// Generator cross-section in pb.
    pub cross_section_pb: f64,
    /// Sum of event weights over all processed events (vetoed included).
    pub sum_of_weights: f64,
    /// Number of processed events.
    pub n_events: u64,
}

/// An event-by-event analysis with the init → analyze → finalize lifecycle.
///
/// The driver owns sequencing: `init` exactly once before the first event,
/// `analyze` once per event in arbitrary worker partitioning, `merge_from`
/// to fold worker accumulators, `finalize` exactly once on the merged
/// instance.
pub trait Analysis: Send {
    /// Declare projections and book every accumulator used later.
    fn init(&mut self) -> Result<()>;

    /// Process one event.
    fn analyze(&mut self, event: &Event) -> Result<EventOutcome>;

    /// Normalize and derive final quantities after the last event.
    fn finalize(&mut self, run: &RunInfo) -> Result<()>;

    /// The accumulator book (for output and inspection).
    fn book(&self) -> &Book;

    /// Fold another instance's accumulators into this one.
    fn merge_from(&mut self, other: Self) -> Result<()>
    where
        Self: Sized;
}
