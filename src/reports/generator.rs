use super::{RoundReport, TabulationReport, TransferKind, VoteTransfer};
use crate::events::{TabulationEvent, TabulationObserver};

/// Assembles a [`TabulationReport`] from the event stream of a count.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    report: TabulationReport,
    current: Option<RoundReport>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> TabulationReport {
        self.close_round();
        self.report
    }

    fn round(&mut self, round: usize) -> &mut RoundReport {
        if self.current.as_ref().map(|r| r.round) != Some(round) {
            self.close_round();
        }
        self.current.get_or_insert_with(|| RoundReport::new(round))
    }

    fn close_round(&mut self) {
        if let Some(round) = self.current.take() {
            self.report.rounds.push(round);
        }
    }

    fn transfer(
        &mut self,
        round: usize,
        kind: TransferKind,
        from: &str,
        to: &Option<String>,
        weight: f64,
        ballots: usize,
    ) {
        self.round(round).transfers.push(VoteTransfer {
            kind,
            from_candidate: from.to_string(),
            to_candidate: to.clone(),
            weight,
            ballot_count: ballots,
        });
    }
}

impl TabulationObserver for ReportBuilder {
    fn on_event(&mut self, event: &TabulationEvent) {
        match event {
            TabulationEvent::QuotaComputed { quota, .. } => {
                self.report.quota = Some(*quota);
            }
            TabulationEvent::Tally { round, tally, .. } => {
                self.round(*round).tallies.push(tally.clone());
            }
            TabulationEvent::Elected {
                round, candidate, ..
            } => {
                self.round(*round).elected.push(candidate.clone());
            }
            TabulationEvent::Eliminated {
                round, candidate, ..
            } => {
                self.round(*round).eliminated = Some(candidate.clone());
            }
            TabulationEvent::SurplusTransferred {
                round,
                from,
                to,
                weight,
                ballots,
            } => {
                self.transfer(*round, TransferKind::Surplus, from, to, *weight, *ballots);
            }
            TabulationEvent::EliminationTransferred {
                round,
                from,
                to,
                weight,
                ballots,
            } => {
                self.transfer(*round, TransferKind::Elimination, from, to, *weight, *ballots);
            }
            TabulationEvent::RoundCompleted {
                round,
                exhausted_weight,
            } => {
                self.round(*round).exhausted_weight = *exhausted_weight;
                self.close_round();
            }
            TabulationEvent::Terminated { reason, .. } => {
                self.close_round();
                self.report.termination = Some(*reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{TallyEntry, TerminationReason};

    fn entry(candidate: &str, votes: f64) -> TallyEntry {
        TallyEntry {
            candidate: candidate.to_string(),
            votes,
        }
    }

    #[test]
    fn groups_events_by_round() {
        let mut builder = ReportBuilder::new();
        let events = vec![
            TabulationEvent::QuotaComputed {
                quota: 3,
                ballots: 5,
                seats: 1,
            },
            TabulationEvent::Tally {
                round: 1,
                pass: 1,
                tally: vec![entry("A", 2.0), entry("B", 2.0), entry("C", 1.0)],
            },
            TabulationEvent::Eliminated {
                round: 1,
                candidate: "C".to_string(),
                votes: 1.0,
            },
            TabulationEvent::EliminationTransferred {
                round: 1,
                from: "C".to_string(),
                to: Some("A".to_string()),
                weight: 1.0,
                ballots: 1,
            },
            TabulationEvent::RoundCompleted {
                round: 1,
                exhausted_weight: 0.0,
            },
            TabulationEvent::Tally {
                round: 2,
                pass: 1,
                tally: vec![entry("A", 3.0), entry("B", 2.0)],
            },
            TabulationEvent::Elected {
                round: 2,
                candidate: "A".to_string(),
                votes: 3.0,
                surplus: 0.0,
            },
            TabulationEvent::RoundCompleted {
                round: 2,
                exhausted_weight: 0.0,
            },
            TabulationEvent::Terminated {
                reason: TerminationReason::SeatsFilled,
                elected: 1,
            },
        ];
        for event in &events {
            builder.on_event(event);
        }

        let report = builder.finish();
        assert_eq!(report.quota, Some(3));
        assert_eq!(report.termination, Some(TerminationReason::SeatsFilled));
        assert_eq!(report.rounds.len(), 2);

        let first = &report.rounds[0];
        assert_eq!(first.eliminated.as_deref(), Some("C"));
        assert_eq!(first.transfers.len(), 1);
        assert_eq!(first.transfers[0].kind, TransferKind::Elimination);
        assert_eq!(first.transfers[0].to_candidate.as_deref(), Some("A"));

        let second = &report.rounds[1];
        assert_eq!(second.elected, vec!["A".to_string()]);
        assert_eq!(second.final_tally().map(|t| t.len()), Some(2));
    }

    #[test]
    fn report_without_rounds() {
        let mut builder = ReportBuilder::new();
        builder.on_event(&TabulationEvent::Terminated {
            reason: TerminationReason::NoSeats,
            elected: 0,
        });
        let report = builder.finish();
        assert!(report.rounds.is_empty());
        assert_eq!(report.quota, None);
        assert_eq!(report.termination, Some(TerminationReason::NoSeats));
    }
}
