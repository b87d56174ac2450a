use crate::error::{Result, TabulationError};
use crate::model::{Ballot, CandidatePool};
use itertools::Itertools;

/// Ballots that passed validation, resolved against the candidate set.
#[derive(Debug, Clone, Default)]
pub struct ValidatedBallots {
    pub pool: CandidatePool,
    pub ballots: Vec<Ballot>,
}

/// Check that every ballot ranks the same number of candidates as the
/// first one and only names candidates the first ballot ranks.
///
/// The input is left untouched; the returned ballots are an interned copy.
pub fn validate_ballots<S: AsRef<str>>(
    ballots: &[Vec<S>],
    allow_duplicate_rankings: bool,
) -> Result<ValidatedBallots> {
    let first = match ballots.first() {
        Some(first) => first,
        None => return Ok(ValidatedBallots::default()),
    };

    let expected = first.len();
    let pool = CandidatePool::from_ranking(first.as_slice());
    let mut validated = Vec::with_capacity(ballots.len());

    for (index, ranking) in ballots.iter().enumerate() {
        if ranking.len() != expected {
            return Err(TabulationError::UnevenLength {
                ballot: index,
                expected,
                found: ranking.len(),
            });
        }

        let ballot = Ballot::from_names(ranking.as_slice(), &pool).map_err(|name| {
            TabulationError::UnknownCandidate {
                ballot: index,
                candidate: name.to_string(),
            }
        })?;

        if !allow_duplicate_rankings {
            if let Some(name) = ranking.iter().map(AsRef::<str>::as_ref).duplicates().next() {
                return Err(TabulationError::DuplicateCandidate {
                    ballot: index,
                    candidate: name.to_string(),
                });
            }
        }

        validated.push(ballot);
    }

    Ok(ValidatedBallots {
        pool,
        ballots: validated,
    })
}
