//! Quota-based single transferable vote with fractional surplus transfer
//! and one elimination per round.

use crate::config::TabulationOptions;
use crate::error::{Result, TabulationError};
use crate::events::{
    trace_event, NoopObserver, TabulationEvent, TabulationObserver, TerminationReason,
};
use crate::model::{Ballot, CandidateId, CandidatePool, CandidateStatus, PreferenceCursor};
use crate::quota::droop_quota;
use crate::reports::{ReportBuilder, TabulationReport};
use crate::validation::validate_ballots;
use serde::Serialize;
use std::collections::BTreeMap;
use std::convert::TryFrom;

pub mod tally;

pub use tally::TallySnapshot;

/// Outcome of a count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tabulation {
    pub seats: usize,
    /// `None` when counting never started.
    pub quota: Option<u64>,
    pub ballot_count: usize,
    /// Elected candidates in order of election.
    pub winners: Vec<String>,
    pub report: TabulationReport,
}

/// Elect up to `seats` candidates from `ballots`, each ranking candidates
/// from most to least preferred.
pub fn tabulate<S: AsRef<str>>(seats: i64, ballots: &[Vec<S>]) -> Result<Vec<String>> {
    let options = TabulationOptions::with_seats(seats);
    tabulate_with(&options, ballots, &mut NoopObserver).map(|t| t.winners)
}

/// Like [`tabulate`], but driven by `options`, reporting every round to
/// `observer` and returning the full [`Tabulation`].
pub fn tabulate_with<S: AsRef<str>>(
    options: &TabulationOptions,
    ballots: &[Vec<S>],
    observer: &mut dyn TabulationObserver,
) -> Result<Tabulation> {
    let span = tracing::info_span!("tabulate", seats = options.seats, ballots = ballots.len());
    let _enter = span.enter();

    let seats = usize::try_from(options.seats)
        .map_err(|_| TabulationError::InvalidSeats(options.seats))?;

    let validated = validate_ballots(ballots, options.allow_duplicate_rankings)?;
    let mut emitter = Emitter::new(observer);

    let reason = if seats == 0 {
        Some(TerminationReason::NoSeats)
    } else if validated.ballots.is_empty() {
        Some(TerminationReason::NoBallots)
    } else {
        None
    };
    if let Some(reason) = reason {
        emitter.emit(TabulationEvent::Terminated { reason, elected: 0 });
        return Ok(Tabulation {
            seats,
            quota: None,
            ballot_count: validated.ballots.len(),
            winners: Vec::new(),
            report: emitter.finish(),
        });
    }

    let quota = droop_quota(validated.ballots.len(), seats);
    emitter.emit(TabulationEvent::QuotaComputed {
        quota,
        ballots: validated.ballots.len(),
        seats,
    });

    let winners = if validated.pool.is_empty() {
        emitter.emit(TabulationEvent::Terminated {
            reason: TerminationReason::NoCandidates,
            elected: 0,
        });
        Vec::new()
    } else {
        let mut count = Count::new(&validated.pool, &validated.ballots, quota, seats);
        count.run(&mut emitter);
        count
            .elected
            .iter()
            .map(|&c| validated.pool.name(c).to_string())
            .collect()
    };

    Ok(Tabulation {
        seats,
        quota: Some(quota),
        ballot_count: validated.ballots.len(),
        winners,
        report: emitter.finish(),
    })
}

/// Fans every event out to the log, the report and the caller's observer.
struct Emitter<'o> {
    report: ReportBuilder,
    observer: &'o mut dyn TabulationObserver,
}

impl<'o> Emitter<'o> {
    fn new(observer: &'o mut dyn TabulationObserver) -> Self {
        Self {
            report: ReportBuilder::new(),
            observer,
        }
    }

    fn emit(&mut self, event: TabulationEvent) {
        trace_event(&event);
        self.report.on_event(&event);
        self.observer.on_event(&event);
    }

    fn finish(self) -> TabulationReport {
        self.report.finish()
    }
}

/// Weight and ballot count moved to each destination in one transfer step.
/// `None` collects weight that exhausted.
type Transfers = BTreeMap<Option<CandidateId>, (f64, usize)>;

struct Count<'a> {
    pool: &'a CandidatePool,
    ballots: &'a [Ballot],
    cursors: Vec<PreferenceCursor>,
    statuses: Vec<CandidateStatus>,
    quota: u64,
    seats: usize,
    elected: Vec<CandidateId>,
}

impl<'a> Count<'a> {
    fn new(pool: &'a CandidatePool, ballots: &'a [Ballot], quota: u64, seats: usize) -> Self {
        Self {
            pool,
            ballots,
            cursors: vec![PreferenceCursor::new(); ballots.len()],
            statuses: vec![CandidateStatus::Hopeful; pool.len()],
            quota,
            seats,
            elected: Vec::new(),
        }
    }

    fn run(&mut self, emitter: &mut Emitter<'_>) {
        let mut round = 1;

        loop {
            let mut pass = 1;

            let snapshot = loop {
                // Count the weight behind each ballot's current preference
                let snapshot = TallySnapshot::count(self.ballots, &self.cursors, &self.statuses);
                emitter.emit(TabulationEvent::Tally {
                    round,
                    pass,
                    tally: snapshot.entries(self.pool),
                });

                // Elect everyone at or above quota, in name order
                let remaining = self.seats - self.elected.len();
                let winners: Vec<_> = snapshot
                    .reaching(self.quota as f64)
                    .into_iter()
                    .take(remaining)
                    .collect();
                if winners.is_empty() {
                    break snapshot;
                }

                for &(candidate, votes) in &winners {
                    self.elected.push(candidate);
                    emitter.emit(TabulationEvent::Elected {
                        round,
                        candidate: self.pool.name(candidate).to_string(),
                        votes,
                        surplus: votes - self.quota as f64,
                    });
                }
                if self.elected.len() >= self.seats {
                    self.finish(round, TerminationReason::SeatsFilled, emitter);
                    return;
                }

                // Pass each surplus on before tallying again
                for &(candidate, votes) in &winners {
                    self.transfer_surplus(round, candidate, votes, emitter);
                }
                pass += 1;
            };

            // Nobody reached quota: eliminate the lowest candidate
            match snapshot.lowest() {
                Some((loser, votes)) => self.eliminate(round, loser, votes, emitter),
                None => {
                    self.finish(round, TerminationReason::CandidatesExhausted, emitter);
                    return;
                }
            }

            emitter.emit(TabulationEvent::RoundCompleted {
                round,
                exhausted_weight: self.exhausted_weight(),
            });
            round += 1;
        }
    }

    /// Ballots counting for `winner` move on carrying `surplus / votes`
    /// of their weight.
    fn transfer_surplus(
        &mut self,
        round: usize,
        winner: CandidateId,
        votes: f64,
        emitter: &mut Emitter<'_>,
    ) {
        self.statuses[winner.0] = CandidateStatus::Elected;
        let surplus = (votes - self.quota as f64).max(0.0);
        let factor = if votes > 0.0 { surplus / votes } else { 0.0 };

        let transfers = self.move_ballots(winner, factor);
        for (to, (weight, ballots)) in transfers {
            emitter.emit(TabulationEvent::SurplusTransferred {
                round,
                from: self.pool.name(winner).to_string(),
                to: to.map(|c| self.pool.name(c).to_string()),
                weight,
                ballots,
            });
        }
    }

    /// Ballots counting for `loser` move on with their full weight.
    fn eliminate(
        &mut self,
        round: usize,
        loser: CandidateId,
        votes: f64,
        emitter: &mut Emitter<'_>,
    ) {
        self.statuses[loser.0] = CandidateStatus::Eliminated;
        emitter.emit(TabulationEvent::Eliminated {
            round,
            candidate: self.pool.name(loser).to_string(),
            votes,
        });

        let transfers = self.move_ballots(loser, 1.0);
        for (to, (weight, ballots)) in transfers {
            emitter.emit(TabulationEvent::EliminationTransferred {
                round,
                from: self.pool.name(loser).to_string(),
                to: to.map(|c| self.pool.name(c).to_string()),
                weight,
                ballots,
            });
        }
    }

    /// Advance every ballot currently counting for `from` to its next
    /// hopeful preference, scaling its weight by `factor`. Ballots that
    /// only rank `from` further down skip it once they get there.
    fn move_ballots(&mut self, from: CandidateId, factor: f64) -> Transfers {
        let mut transfers = Transfers::new();
        for (ballot, cursor) in self.ballots.iter().zip(self.cursors.iter_mut()) {
            if cursor.current(ballot) != Some(from) {
                continue;
            }
            cursor.scale(factor);
            let to = cursor.advance(ballot, &self.statuses);
            let entry = transfers.entry(to).or_insert((0.0, 0));
            entry.0 += cursor.weight();
            entry.1 += 1;
        }
        transfers
    }

    fn exhausted_weight(&self) -> f64 {
        self.ballots
            .iter()
            .zip(&self.cursors)
            .filter(|(ballot, cursor)| cursor.is_exhausted(ballot))
            .map(|(_, cursor)| cursor.weight())
            .fold(0.0, |acc, w| acc + w)
    }

    fn finish(&self, round: usize, reason: TerminationReason, emitter: &mut Emitter<'_>) {
        emitter.emit(TabulationEvent::RoundCompleted {
            round,
            exhausted_weight: self.exhausted_weight(),
        });
        emitter.emit(TabulationEvent::Terminated {
            reason,
            elected: self.elected.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;

    fn run(seats: i64, ballots: &[Vec<&str>]) -> Tabulation {
        let options = TabulationOptions::with_seats(seats);
        tabulate_with(&options, ballots, &mut NoopObserver).unwrap()
    }

    #[test]
    fn majority_first_preference_wins() {
        let ballots = vec![vec!["A", "B"], vec!["A", "B"], vec!["B", "A"]];
        let result = run(1, &ballots);

        assert_eq!(result.quota, Some(2));
        assert_eq!(result.winners, vec!["A"]);
        assert_eq!(result.report.termination, Some(TerminationReason::SeatsFilled));
    }

    #[test]
    fn fills_both_seats_in_name_order() {
        let ballots = vec![
            vec!["X", "Y"],
            vec!["X", "Y"],
            vec!["X", "Y"],
            vec!["Y", "X"],
            vec!["Y", "X"],
        ];
        let result = run(2, &ballots);
        assert_eq!(result.winners, vec!["X", "Y"]);
    }

    #[test]
    fn simultaneous_winners_are_ordered_by_name() {
        let ballots = vec![
            vec!["Zed", "Amy", "Bo"],
            vec!["Zed", "Amy", "Bo"],
            vec!["Amy", "Zed", "Bo"],
            vec!["Amy", "Zed", "Bo"],
            vec!["Bo", "Amy", "Zed"],
        ];
        // quota = 5 / 3 + 1 = 2, Amy and Zed both reach it in the first pass
        let result = run(2, &ballots);
        assert_eq!(result.winners, vec!["Amy", "Zed"]);
    }

    #[test]
    fn elimination_passes_full_weight() {
        let ballots = vec![
            vec!["A", "B", "C"],
            vec!["A", "B", "C"],
            vec!["B", "A", "C"],
            vec!["B", "A", "C"],
            vec!["C", "A", "B"],
        ];
        // quota 3; C is lowest, its ballot lifts A to 3
        let mut log = EventLog::new();
        let result =
            tabulate_with(&TabulationOptions::with_seats(1), &ballots, &mut log).unwrap();

        assert_eq!(result.winners, vec!["A"]);
        assert!(log.events().contains(&TabulationEvent::EliminationTransferred {
            round: 1,
            from: "C".to_string(),
            to: Some("A".to_string()),
            weight: 1.0,
            ballots: 1,
        }));
    }

    #[test]
    fn elimination_tie_goes_to_first_name() {
        let ballots = vec![
            vec!["A", "B", "C"],
            vec!["A", "B", "C"],
            vec!["B", "C", "A"],
            vec!["C", "B", "A"],
        ];
        // quota 3; B and C tie at 1, B goes first and its ballot lands on C
        let mut log = EventLog::new();
        tabulate_with(&TabulationOptions::with_seats(1), &ballots, &mut log).unwrap();

        let first_elimination = log.events().iter().find_map(|e| match e {
            TabulationEvent::Eliminated { candidate, .. } => Some(candidate.clone()),
            _ => None,
        });
        assert_eq!(first_elimination.as_deref(), Some("B"));
    }

    #[test]
    fn stops_when_no_ballot_counts_for_a_hopeful() {
        let ballots = vec![vec!["A", "B"], vec!["B", "A"]];
        // quota 1 with three seats: A and B both elected, nothing left
        let result = run(3, &ballots);
        assert_eq!(result.winners, vec!["A", "B"]);
        assert_eq!(
            result.report.termination,
            Some(TerminationReason::CandidatesExhausted)
        );
    }

    #[test]
    fn nothing_exhausted_reports_positive_zero() {
        let ballots = vec![
            vec!["A", "B", "C"],
            vec!["A", "B", "C"],
            vec!["B", "A", "C"],
            vec!["B", "A", "C"],
            vec!["C", "A", "B"],
        ];
        let result = run(1, &ballots);

        let first = &result.report.rounds[0];
        assert_eq!(first.exhausted_weight, 0.0);
        assert!(first.exhausted_weight.is_sign_positive());

        let json = serde_json::to_value(first).unwrap();
        assert_eq!(json["exhausted_weight"].to_string(), "0.0");
    }

    #[test]
    fn negative_seats_are_rejected() {
        let ballots = vec![vec!["A"]];
        let err = tabulate_with(&TabulationOptions::with_seats(-1), &ballots, &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, TabulationError::InvalidSeats(-1)));

        let err = tabulate(i64::MIN, &ballots).unwrap_err();
        assert!(matches!(err, TabulationError::InvalidSeats(i64::MIN)));
    }

    #[test]
    fn zero_length_ballots_elect_nobody() {
        let ballots: Vec<Vec<&str>> = vec![vec![], vec![]];
        let result = run(2, &ballots);
        assert!(result.winners.is_empty());
        assert_eq!(result.report.termination, Some(TerminationReason::NoCandidates));
    }

    #[test]
    fn duplicates_are_skipped_when_allowed() {
        let ballots = vec![vec!["A", "A", "B"], vec!["B", "A", "A"], vec!["A", "B", "B"]];
        let options = TabulationOptions {
            seats: 2,
            allow_duplicate_rankings: true,
        };
        let result = tabulate_with(&options, &ballots, &mut NoopObserver).unwrap();
        // quota 2: A elected with 2 and surplus 0, then B reaches 1 + 0 < 2,
        // so nothing more can be elected
        assert_eq!(result.winners, vec!["A"]);
    }
}
