//! Single transferable vote counting.
//!
//! ```
//! let ballots = vec![vec!["A", "B"], vec!["A", "B"], vec!["B", "A"]];
//! let winners = stv_count::tabulate(1, &ballots).unwrap();
//! assert_eq!(winners, vec!["A"]);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod model;
pub mod quota;
pub mod reports;
pub mod tabulator;
pub mod validation;

pub use config::TabulationOptions;
pub use error::{Result, TabulationError};
pub use events::{EventLog, NoopObserver, TabulationEvent, TabulationObserver, TerminationReason};
pub use quota::droop_quota;
pub use reports::TabulationReport;
pub use tabulator::{tabulate, tabulate_with, Tabulation};
