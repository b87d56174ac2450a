/// Droop quota: `floor(ballots / (seats + 1)) + 1`.
///
/// A zero-seat election has no quota; `seats` of 0 is counted as 1 so the
/// result is always defined.
pub fn droop_quota(ballots: usize, seats: usize) -> u64 {
    let seats = seats.max(1);
    (ballots / (seats + 1)) as u64 + 1
}
