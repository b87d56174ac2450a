use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Index of a candidate within a [`CandidatePool`].
///
/// Ids are assigned in ascending name order, so comparing two ids compares
/// the candidates' names. Every tie-break in the counter relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
}

impl Candidate {
    pub fn new(name: String) -> Candidate {
        Candidate { name }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStatus {
    Hopeful,
    Elected,
    Eliminated,
}

impl CandidateStatus {
    pub fn is_hopeful(self) -> bool {
        self == CandidateStatus::Hopeful
    }
}

/// The candidate set of one election, interned and sorted by name.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    ids: HashMap<String, CandidateId>,
}

impl CandidatePool {
    /// Build the pool from a reference ranking (the first ballot).
    /// Repeated names collapse into one candidate.
    pub fn from_ranking<S: AsRef<str>>(ranking: &[S]) -> CandidatePool {
        let mut names: Vec<&str> = ranking.iter().map(AsRef::<str>::as_ref).collect();
        names.sort();
        names.dedup();

        let candidates: Vec<Candidate> = names
            .into_iter()
            .map(|name| Candidate::new(name.to_string()))
            .collect();
        let ids = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), CandidateId(i)))
            .collect();

        CandidatePool { candidates, ids }
    }

    pub fn id(&self, name: &str) -> Option<CandidateId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: CandidateId) -> &str {
        &self.candidates[id.0].name
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
