use super::candidate::{CandidateId, CandidatePool, CandidateStatus};

/// A validated ranking, most preferred first. Never mutated during a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    ranking: Vec<CandidateId>,
}

impl Ballot {
    pub fn new(ranking: Vec<CandidateId>) -> Ballot {
        Ballot { ranking }
    }

    /// Resolve a ranking of names against the pool. Returns the first
    /// name the pool does not know as the error.
    pub fn from_names<'a, S: AsRef<str>>(
        names: &'a [S],
        pool: &CandidatePool,
    ) -> Result<Ballot, &'a str> {
        let ranking = names
            .iter()
            .map(AsRef::<str>::as_ref)
            .map(|name| pool.id(name).ok_or(name))
            .collect::<Result<Vec<_>, &str>>()?;
        Ok(Ballot { ranking })
    }

    pub fn ranking(&self) -> &[CandidateId] {
        &self.ranking
    }

    pub fn len(&self) -> usize {
        self.ranking.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranking.is_empty()
    }
}

/// Per-ballot counting state: how far into the ranking the ballot has
/// moved and how much of its one vote it still carries.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceCursor {
    position: usize,
    weight: f64,
}

impl Default for PreferenceCursor {
    fn default() -> Self {
        Self {
            position: 0,
            weight: 1.0,
        }
    }
}

impl PreferenceCursor {
    pub fn new() -> PreferenceCursor {
        PreferenceCursor::default()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The candidate this ballot currently counts for, or `None` once exhausted.
    pub fn current(&self, ballot: &Ballot) -> Option<CandidateId> {
        ballot.ranking.get(self.position).copied()
    }

    pub fn is_exhausted(&self, ballot: &Ballot) -> bool {
        self.position >= ballot.ranking.len()
    }

    /// Multiply the carried weight by `factor`, which must lie in `[0, 1]`.
    pub fn scale(&mut self, factor: f64) {
        debug_assert!((0.0..=1.0).contains(&factor));
        self.weight *= factor.clamp(0.0, 1.0);
    }

    /// Step past the current preference and any later entries whose
    /// candidate is no longer hopeful. Returns the new current candidate.
    pub fn advance(
        &mut self,
        ballot: &Ballot,
        statuses: &[CandidateStatus],
    ) -> Option<CandidateId> {
        if self.is_exhausted(ballot) {
            return None;
        }
        self.position += 1;
        self.skip_inactive(ballot, statuses)
    }

    fn skip_inactive(
        &mut self,
        ballot: &Ballot,
        statuses: &[CandidateStatus],
    ) -> Option<CandidateId> {
        while let Some(candidate) = self.current(ballot) {
            if statuses[candidate.0].is_hopeful() {
                return Some(candidate);
            }
            self.position += 1;
        }
        None
    }
}
