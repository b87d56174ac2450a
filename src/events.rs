use serde::{Deserialize, Serialize};

/// One candidate's accumulated weight in a tally pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub candidate: String,
    pub votes: f64,
}

/// Why a count stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Every seat was filled.
    SeatsFilled,
    /// Seats remain but no ballot counts for a hopeful candidate.
    CandidatesExhausted,
    /// The ballot collection was empty.
    NoBallots,
    /// The ballots rank nobody.
    NoCandidates,
    /// Zero seats were requested.
    NoSeats,
}

/// Round-level events emitted while counting, in the order they happen.
///
/// `round` numbers outer rounds from 1; a round ends with an elimination
/// or with termination. `pass` numbers the tally passes within a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TabulationEvent {
    QuotaComputed {
        quota: u64,
        ballots: usize,
        seats: usize,
    },
    Tally {
        round: usize,
        pass: usize,
        tally: Vec<TallyEntry>,
    },
    Elected {
        round: usize,
        candidate: String,
        votes: f64,
        surplus: f64,
    },
    SurplusTransferred {
        round: usize,
        from: String,
        /// `None` when the weight exhausted.
        to: Option<String>,
        weight: f64,
        ballots: usize,
    },
    Eliminated {
        round: usize,
        candidate: String,
        votes: f64,
    },
    EliminationTransferred {
        round: usize,
        from: String,
        to: Option<String>,
        weight: f64,
        ballots: usize,
    },
    RoundCompleted {
        round: usize,
        exhausted_weight: f64,
    },
    Terminated {
        reason: TerminationReason,
        elected: usize,
    },
}

/// Receives every [`TabulationEvent`] of a count. Never needed for the
/// result; use it for tracing or to inspect intermediate state.
pub trait TabulationObserver {
    fn on_event(&mut self, event: &TabulationEvent);
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TabulationObserver for NoopObserver {
    fn on_event(&mut self, _event: &TabulationEvent) {}
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<TabulationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TabulationEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TabulationEvent> {
        self.events
    }
}

impl TabulationObserver for EventLog {
    fn on_event(&mut self, event: &TabulationEvent) {
        self.events.push(event.clone());
    }
}

impl<F> TabulationObserver for F
where
    F: FnMut(&TabulationEvent),
{
    fn on_event(&mut self, event: &TabulationEvent) {
        self(event)
    }
}

/// Write an event to the `tracing` subscriber. Tallies go out at trace
/// level, everything else at debug.
pub(crate) fn trace_event(event: &TabulationEvent) {
    match event {
        TabulationEvent::Tally { round, pass, tally } => {
            tracing::trace!(round, pass, candidates = tally.len(), ?tally, "tally pass");
        }
        TabulationEvent::QuotaComputed {
            quota,
            ballots,
            seats,
        } => {
            tracing::debug!(quota, ballots, seats, "quota computed");
        }
        TabulationEvent::Elected {
            round,
            candidate,
            votes,
            surplus,
        } => {
            tracing::debug!(round, %candidate, votes, surplus, "candidate elected");
        }
        TabulationEvent::Eliminated {
            round,
            candidate,
            votes,
        } => {
            tracing::debug!(round, %candidate, votes, "candidate eliminated");
        }
        TabulationEvent::SurplusTransferred {
            round,
            from,
            to,
            weight,
            ballots,
        }
        | TabulationEvent::EliminationTransferred {
            round,
            from,
            to,
            weight,
            ballots,
        } => {
            tracing::trace!(round, %from, ?to, weight, ballots, "weight transferred");
        }
        TabulationEvent::RoundCompleted {
            round,
            exhausted_weight,
        } => {
            tracing::debug!(round, exhausted_weight, "round completed");
        }
        TabulationEvent::Terminated { reason, elected } => {
            tracing::debug!(?reason, elected, "tabulation finished");
        }
    }
}
