use crate::events::TallyEntry;
use crate::model::{Ballot, CandidateId, CandidatePool, CandidateStatus, PreferenceCursor};
use std::collections::BTreeMap;

/// Weight held by each candidate in one counting pass.
///
/// Only candidates that are the current preference of at least one
/// unexhausted ballot have an entry. Iteration is in candidate id order,
/// which is ascending name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TallySnapshot {
    votes: BTreeMap<CandidateId, f64>,
}

impl TallySnapshot {
    pub fn count(
        ballots: &[Ballot],
        cursors: &[PreferenceCursor],
        statuses: &[CandidateStatus],
    ) -> TallySnapshot {
        let mut votes = BTreeMap::new();
        for (ballot, cursor) in ballots.iter().zip(cursors) {
            if let Some(candidate) = cursor.current(ballot) {
                if statuses[candidate.0].is_hopeful() {
                    *votes.entry(candidate).or_insert(0.0) += cursor.weight();
                }
            }
        }
        TallySnapshot { votes }
    }

    pub fn get(&self, candidate: CandidateId) -> Option<f64> {
        self.votes.get(&candidate).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, f64)> + '_ {
        self.votes.iter().map(|(&c, &v)| (c, v))
    }

    /// Candidates at or above `quota`, in ascending name order.
    pub fn reaching(&self, quota: f64) -> Vec<(CandidateId, f64)> {
        self.iter().filter(|&(_, votes)| votes >= quota).collect()
    }

    /// The candidate with the strictly lowest weight. Ties go to the
    /// candidate whose name sorts first.
    pub fn lowest(&self) -> Option<(CandidateId, f64)> {
        let mut lowest: Option<(CandidateId, f64)> = None;
        for (candidate, votes) in self.iter() {
            match lowest {
                Some((_, min)) if votes >= min => {}
                _ => lowest = Some((candidate, votes)),
            }
        }
        lowest
    }

    pub fn entries(&self, pool: &CandidatePool) -> Vec<TallyEntry> {
        self.iter()
            .map(|(candidate, votes)| TallyEntry {
                candidate: pool.name(candidate).to_string(),
                votes,
            })
            .collect()
    }
}
