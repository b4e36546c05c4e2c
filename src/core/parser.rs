use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::{DomainError, FormatError, LeaseError};
use super::types::{Commission, Escalation, LeaseInput, LeaseOption, ServiceType};

/// Parses a rate or amount such as `25.50`, `$25.50`, `3%` or `3`.
///
/// One leading `$` and then one trailing `%` are stripped. With
/// `allow_blank`, empty input means zero.
pub fn parse_currency(raw: &str, allow_blank: bool) -> Result<Decimal, FormatError> {
    let trimmed = raw.trim();
    if allow_blank && trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let body = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let body = body.strip_suffix('%').unwrap_or(body);
    parse_decimal(body).ok_or_else(|| FormatError::Currency {
        raw: raw.to_string(),
    })
}

/// Parses a whole number; empty input means zero.
pub fn parse_integer(raw: &str) -> Result<i64, FormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i64>().map_err(|_| FormatError::Integer {
        raw: raw.to_string(),
    })
}

/// Parses an area with optional thousands separators, e.g. `2,500`.
pub fn parse_area(raw: &str) -> Result<Decimal, FormatError> {
    let cleaned = raw.trim().replace(',', "");
    parse_decimal(&cleaned).ok_or_else(|| FormatError::Area {
        raw: raw.to_string(),
    })
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    // Decimal::from_str accepts `_` digit separators; plain numbers only here.
    if text.is_empty() || text.contains('_') {
        return None;
    }
    Decimal::from_str(text).ok()
}

fn months(field: &'static str, raw: &str) -> Result<u32, LeaseError> {
    let value = parse_integer(raw).map_err(|source| LeaseError::Format { field, source })?;
    u32::try_from(value).map_err(|_| DomainError::MonthsOutOfRange { field, value }.into())
}

fn currency(field: &'static str, raw: &str, allow_blank: bool) -> Result<Decimal, LeaseError> {
    parse_currency(raw, allow_blank).map_err(|source| LeaseError::Format { field, source })
}

impl LeaseInput {
    /// Converts the raw form into a `LeaseOption`.
    ///
    /// Opex fields are skipped entirely for full-service leases, so stale
    /// text left in them cannot fail the parse.
    pub fn parse(&self) -> Result<LeaseOption, LeaseError> {
        let base_rate = currency("base rate", &self.base_rate, false)?;
        let square_feet = parse_area(&self.square_feet).map_err(|source| LeaseError::Format {
            field: "square feet",
            source,
        })?;
        let term_months = months("term months", &self.term_months)?;
        let free_months = months("free months", &self.free_months)?;
        let ti_allowance_per_sf = currency("TI allowance", &self.ti_allowance, true)?;

        let (opex_per_sf, opex_escalation) = match self.service_type {
            ServiceType::Nnn => (
                currency("opex", &self.opex, true)?,
                Escalation::new(
                    self.opex_escalation_kind,
                    currency("opex escalation", &self.opex_escalation_amount, true)?,
                ),
            ),
            ServiceType::FullService => (Decimal::ZERO, Escalation::NONE),
        };

        let base_escalation = Escalation::new(
            self.base_escalation_kind,
            currency("base escalation", &self.base_escalation_amount, true)?,
        );
        let commission = Commission::new(
            self.commission_kind,
            currency("commission", &self.commission_amount, true)?,
        );

        Ok(LeaseOption {
            service_type: self.service_type,
            base_rate,
            square_feet,
            term_months,
            free_months,
            ti_allowance_per_sf,
            opex_per_sf,
            base_escalation,
            opex_escalation,
            commission,
        })
    }
}
