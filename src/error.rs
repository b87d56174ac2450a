#[derive(Debug, thiserror::Error)]
pub enum TabulationError {
    #[error("Uneven ballot lengths: ballot {ballot} ranks {found} candidates, expected {expected}")]
    UnevenLength {
        ballot: usize,
        expected: usize,
        found: usize,
    },
    #[error("Unknown candidate on ballot {ballot}: {candidate}")]
    UnknownCandidate { ballot: usize, candidate: String },
    #[error("Candidate ranked more than once on ballot {ballot}: {candidate}")]
    DuplicateCandidate { ballot: usize, candidate: String },
    #[error("Seat count must not be negative: {0}")]
    InvalidSeats(i64),
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TabulationError>;
