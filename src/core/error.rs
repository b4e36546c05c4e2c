use rust_decimal::Decimal;
use thiserror::Error;

/// Raw text that does not match the accepted numeric formats.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("'{raw}' is not a valid amount; use a number such as 25.50, $25.50, 3% or 3")]
    Currency { raw: String },

    #[error("'{raw}' is not a whole number; use digits only, e.g. 36")]
    Integer { raw: String },

    #[error("'{raw}' is not a valid area; use a number such as 2500 or 2,500")]
    Area { raw: String },
}

/// Parsed values the engine cannot compute with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("square feet must be greater than zero, got {square_feet}")]
    NonPositiveArea { square_feet: Decimal },

    #[error("term must be at least 12 months to form a lease year, got {term_months}")]
    TermTooShort { term_months: u32 },

    #[error("term must be at most {max} months, got {term_months}")]
    TermTooLong { term_months: u32, max: u32 },

    #[error("{field} must be between 0 and {max}, got {value}", max = u32::MAX)]
    MonthsOutOfRange { field: &'static str, value: i64 },

    #[error("{what} is too large to compute")]
    Overflow { what: &'static str },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeaseError {
    #[error("{field}: {source}")]
    Format {
        field: &'static str,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl LeaseError {
    pub fn kind(&self) -> &'static str {
        match self {
            LeaseError::Format { .. } => "format",
            LeaseError::Domain(_) => "domain",
        }
    }
}
