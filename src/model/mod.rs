pub mod ballot;
pub mod candidate;

pub use ballot::{Ballot, PreferenceCursor};
pub use candidate::{Candidate, CandidateId, CandidatePool, CandidateStatus};
