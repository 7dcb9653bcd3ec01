//! Run driver: sequential and worker-parallel event loops.
//!
//! The parallel driver gives each worker its own analysis instance (with
//! its own accumulator book), folds the books pairwise after the loop, and
//! finalizes exactly once on the merged instance.

use crate::analysis::{Analysis, EventOutcome, RunInfo};
use dl_core::{Error, Event, Result};
use rayon::prelude::*;

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Number of processed events.
    pub n_events: u64,
    /// Events passing the selection.
    pub accepted: u64,
    /// Events discarded by the selection.
    pub vetoed: u64,
    /// Sum of event weights over all processed events.
    pub sum_of_weights: f64,
}

struct Partial<A> {
    analysis: A,
    accepted: u64,
    vetoed: u64,
    sum_of_weights: f64,
}

fn analyze_slice<A: Analysis>(analysis: &mut A, events: &[Event]) -> Result<(u64, u64, f64)> {
    let mut accepted = 0u64;
    let mut vetoed = 0u64;
    let mut sum_of_weights = 0.0;
    for event in events {
        // The veto only stops fills; the weight still counts toward the
        // run normalization.
        sum_of_weights += event.weight;
        match analysis.analyze(event)? {
            EventOutcome::Accepted => accepted += 1,
            EventOutcome::Vetoed => vetoed += 1,
        }
    }
    Ok((accepted, vetoed, sum_of_weights))
}

/// Run an analysis over events in order on the current thread.
///
/// Drives the full lifecycle: init, analyze per event, finalize.
pub fn run_sequential<A: Analysis>(
    analysis: &mut A,
    events: &[Event],
    cross_section_pb: f64,
) -> Result<RunSummary> {
    if events.is_empty() {
        return Err(Error::Validation("no events to run over".into()));
    }
    analysis.init()?;
    let (accepted, vetoed, sum_of_weights) = analyze_slice(analysis, events)?;
    let summary = RunSummary {
        n_events: events.len() as u64,
        accepted,
        vetoed,
        sum_of_weights,
    };
    analysis.finalize(&RunInfo {
        cross_section_pb,
        sum_of_weights,
        n_events: summary.n_events,
    })?;
    tracing::info!(
        events = summary.n_events,
        accepted = summary.accepted,
        vetoed = summary.vetoed,
        sum_of_weights = summary.sum_of_weights,
        "run complete"
    );
    Ok(summary)
}

/// Run an analysis over events with rayon workers.
///
/// `factory` creates one fresh (unbooked) instance per worker chunk; each
/// runs its own init and event loop, then the books are merged and the
/// merged instance finalized. `chunk_size` 0 picks a size that spreads the
/// events over the current rayon pool. Returns the merged, finalized
/// analysis together with the run summary.
pub fn run_parallel<A, F>(
    factory: F,
    events: &[Event],
    cross_section_pb: f64,
    chunk_size: usize,
) -> Result<(A, RunSummary)>
where
    A: Analysis,
    F: Fn() -> A + Sync,
{
    if events.is_empty() {
        return Err(Error::Validation("no events to run over".into()));
    }
    let chunk_size = if chunk_size == 0 {
        events.len().div_ceil(rayon::current_num_threads()).max(1)
    } else {
        chunk_size
    };

    let partials: Vec<Partial<A>> = events
        .par_chunks(chunk_size)
        .map(|chunk| -> Result<Partial<A>> {
            let mut analysis = factory();
            analysis.init()?;
            let (accepted, vetoed, sum_of_weights) = analyze_slice(&mut analysis, chunk)?;
            Ok(Partial { analysis, accepted, vetoed, sum_of_weights })
        })
        .collect::<Result<_>>()?;

    let mut partials = partials.into_iter();
    let first = partials.next().ok_or_else(|| {
        Error::Computation("parallel run produced no worker results".into())
    })?;
    let mut analysis = first.analysis;
    let mut summary = RunSummary {
        n_events: events.len() as u64,
        accepted: first.accepted,
        vetoed: first.vetoed,
        sum_of_weights: first.sum_of_weights,
    };
    for part in partials {
        analysis.merge_from(part.analysis)?;
        summary.accepted += part.accepted;
        summary.vetoed += part.vetoed;
        summary.sum_of_weights += part.sum_of_weights;
    }

    analysis.finalize(&RunInfo {
        cross_section_pb,
        sum_of_weights: summary.sum_of_weights,
        n_events: summary.n_events,
    })?;
    tracing::info!(
        events = summary.n_events,
        accepted = summary.accepted,
        vetoed = summary.vetoed,
        workers = events.len().div_ceil(chunk_size),
        "parallel run complete"
    );
    Ok((analysis, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilepton::DileptonAnalysis;
    use crate::toys::{generate_events, ToyConfig};

    #[test]
    fn empty_run_is_rejected() {
        let mut ana = DileptonAnalysis::new();
        assert!(run_sequential(&mut ana, &[], 1.0).is_err());
    }

    #[test]
    fn summary_counts_add_up() {
        let events = generate_events(&ToyConfig { n_events: 200, seed: 5, ..ToyConfig::default() })
            .unwrap();
        let mut ana = DileptonAnalysis::new();
        let summary = run_sequential(&mut ana, &events, 1.0).unwrap();
        assert_eq!(summary.n_events, 200);
        assert_eq!(summary.accepted + summary.vetoed, 200);
        assert!(summary.accepted > 0);
    }
}
