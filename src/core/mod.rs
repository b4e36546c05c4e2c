mod book;
mod engine;
mod error;
pub mod format;
mod parser;
mod types;

pub use book::{BookError, MAX_OPTIONS, OptionBook};
pub use engine::{
    MAX_TERM_MONTHS, build_schedule, compute_results, evaluate, lease_years, run_lease,
};
pub use error::{DomainError, FormatError, LeaseError};
pub use parser::{parse_area, parse_currency, parse_integer};
pub use types::{
    AmountKind, Commission, Escalation, LeaseInput, LeaseOption, LeaseReport, Metric, MetricEntry,
    ResultSet, ScheduleRow, ServiceType,
};
