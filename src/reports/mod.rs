use crate::events::{TallyEntry, TerminationReason};
use serde::{Deserialize, Serialize};

pub mod generator;

pub use generator::ReportBuilder;

/// How a transfer came about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Fractional surplus of an elected candidate
    Surplus,
    /// Full weight of an eliminated candidate's ballots
    Elimination,
}

/// Vote transfer analysis for understanding voter behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTransfer {
    pub kind: TransferKind,
    pub from_candidate: String,
    pub to_candidate: Option<String>, // None for exhausted ballots
    pub weight: f64,
    pub ballot_count: usize,
}

/// Detailed round information with transfer analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: usize,
    /// One tally per pass, in pass order.
    pub tallies: Vec<Vec<TallyEntry>>,
    pub elected: Vec<String>,
    pub eliminated: Option<String>,
    pub transfers: Vec<VoteTransfer>,
    pub exhausted_weight: f64,
}

impl RoundReport {
    pub(crate) fn new(round: usize) -> Self {
        Self {
            round,
            tallies: Vec::new(),
            elected: Vec::new(),
            eliminated: None,
            transfers: Vec::new(),
            exhausted_weight: 0.0,
        }
    }

    /// The tally of the last pass in this round.
    pub fn final_tally(&self) -> Option<&[TallyEntry]> {
        self.tallies.last().map(Vec::as_slice)
    }
}

/// Full account of one count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabulationReport {
    pub quota: Option<u64>,
    pub rounds: Vec<RoundReport>,
    pub termination: Option<TerminationReason>,
}

impl TabulationReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
