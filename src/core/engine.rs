use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::{DomainError, LeaseError};
use super::format::{cents, grouped, money, plain};
use super::types::{
    AmountKind, Commission, Escalation, LeaseInput, LeaseOption, LeaseReport, Metric, MetricEntry,
    ResultSet, ScheduleRow,
};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Longest term accepted: 100 lease years.
pub const MAX_TERM_MONTHS: u32 = 1_200;

/// Whole lease years covered by the term; partial years are dropped.
pub fn lease_years(term_months: u32) -> u32 {
    term_months / 12
}

/// Parses and evaluates one raw option.
pub fn evaluate(input: &LeaseInput) -> Result<LeaseReport, LeaseError> {
    let option = input.parse()?;
    Ok(run_lease(&option)?)
}

pub fn run_lease(option: &LeaseOption) -> Result<LeaseReport, DomainError> {
    check_preconditions(option)?;
    let schedule = build_schedule(option)?;
    let results = compute_results(option, &schedule)?;
    tracing::debug!(
        years = schedule.len(),
        service_type = ?option.service_type,
        net_total = %results.value(Metric::NetTotalAfterDiscounts),
        "lease evaluated"
    );
    Ok(LeaseReport {
        service_type: option.service_type,
        years: lease_years(option.term_months),
        total_term_months: option.total_term_months(),
        schedule,
        results,
    })
}

/// Year-by-year rent under escalation.
///
/// Year 1 uses the entered rates. Each later year escalates the running,
/// unrounded rate; only the emitted row figures are rounded to cents.
pub fn build_schedule(option: &LeaseOption) -> Result<Vec<ScheduleRow>, DomainError> {
    check_term_cap(option.term_months)?;
    let years = lease_years(option.term_months);
    let opex_escalation = option.effective_opex_escalation();
    let mut rate = option.base_rate;
    let mut opex = option.effective_opex();
    let mut rows = Vec::with_capacity(years as usize);

    for year in 1..=years {
        if year > 1 {
            rate = escalate(rate, option.base_escalation, "base rate escalation")?;
            if option.opex_active() {
                opex = escalate(opex, opex_escalation, "opex escalation")?;
            }
        }
        let annual = mul(
            checked_add(rate, opex, "annual rent")?,
            option.square_feet,
            "annual rent",
        )?;
        let monthly = div(annual, MONTHS_PER_YEAR, "monthly rent")?;
        rows.push(ScheduleRow {
            year,
            rate_per_sf: cents(rate),
            opex_per_sf: option.opex_active().then(|| cents(opex)),
            monthly: cents(monthly),
            annual: cents(annual),
        });
    }
    Ok(rows)
}

/// Derives the nine summary metrics from a schedule built for `option`.
///
/// Totals are taken from the rounded row figures, the same numbers the
/// schedule table shows.
pub fn compute_results(
    option: &LeaseOption,
    schedule: &[ScheduleRow],
) -> Result<ResultSet, DomainError> {
    check_preconditions(option)?;
    let years = Decimal::from(lease_years(option.term_months));
    let square_feet = option.square_feet;

    let total_rent = sum(schedule.iter().map(|row| row.annual), "total rent")?;
    let first_monthly = schedule.first().map_or(Decimal::ZERO, |row| row.monthly);
    let free_discount = mul(
        first_monthly,
        Decimal::from(option.free_months),
        "free rent discount",
    )?;
    let ti_discount = mul(option.ti_allowance_per_sf, square_feet, "TI discount")?;
    let total_discount = checked_add(free_discount, ti_discount, "total discount")?;
    let net_total = total_rent
        .checked_sub(total_discount)
        .ok_or(DomainError::Overflow {
            what: "net total",
        })?;

    let rate_sum = sum(schedule.iter().map(|row| row.rate_per_sf), "base rent")?;
    let base_sum = mul(rate_sum, square_feet, "base rent")?;
    let (commission, commission_formula) =
        leasing_commission(option.commission, square_feet, years, base_sum)?;

    let ner_year = div(net_total, years, "NER per year")?;
    let ner_month = div(ner_year, MONTHS_PER_YEAR, "NER per month")?;
    let ner_per_sf = div(ner_year, square_feet, "NER per SF")?;

    let annual_terms: Vec<String> = schedule.iter().map(|row| grouped(row.annual, 2)).collect();
    let entries = vec![
        whole_dollars(
            Metric::TotalRentTerm,
            total_rent,
            format!("{} = {}", annual_terms.join(" + "), grouped(total_rent, 0)),
        ),
        whole_dollars(
            Metric::FreeRentDiscount,
            free_discount,
            format!(
                "{} * {} = {}",
                grouped(first_monthly, 0),
                option.free_months,
                grouped(free_discount, 0)
            ),
        ),
        whole_dollars(
            Metric::TiDiscount,
            ti_discount,
            format!(
                "{} * {} = {}",
                plain(option.ti_allowance_per_sf, 2),
                grouped(square_feet, 0),
                grouped(ti_discount, 0)
            ),
        ),
        whole_dollars(
            Metric::TotalDiscount,
            total_discount,
            format!(
                "{} + {} = {}",
                grouped(free_discount, 0),
                grouped(ti_discount, 0),
                grouped(total_discount, 0)
            ),
        ),
        whole_dollars(
            Metric::NetTotalAfterDiscounts,
            net_total,
            format!(
                "{} - {} = {}",
                grouped(total_rent, 0),
                grouped(total_discount, 0),
                grouped(net_total, 0)
            ),
        ),
        whole_dollars(Metric::LeasingCommission, commission, commission_formula),
        dollars_and_cents(
            Metric::NerPerYear,
            ner_year,
            format!(
                "{} / {} = {}",
                grouped(net_total, 0),
                years,
                plain(ner_year, 2)
            ),
        ),
        dollars_and_cents(
            Metric::NerPerMonth,
            ner_month,
            format!("{} / 12 = {}", plain(ner_year, 2), plain(ner_month, 2)),
        ),
        dollars_and_cents(
            Metric::NerPerSfPerYear,
            ner_per_sf,
            format!(
                "{} / {} = {}",
                plain(ner_year, 2),
                grouped(square_feet, 0),
                plain(ner_per_sf, 2)
            ),
        ),
    ];
    Ok(ResultSet::from_entries(entries))
}

fn check_preconditions(option: &LeaseOption) -> Result<(), DomainError> {
    if option.square_feet <= Decimal::ZERO {
        return Err(DomainError::NonPositiveArea {
            square_feet: option.square_feet,
        });
    }
    check_term_cap(option.term_months)?;
    if lease_years(option.term_months) == 0 {
        return Err(DomainError::TermTooShort {
            term_months: option.term_months,
        });
    }
    Ok(())
}

fn check_term_cap(term_months: u32) -> Result<(), DomainError> {
    if term_months > MAX_TERM_MONTHS {
        return Err(DomainError::TermTooLong {
            term_months,
            max: MAX_TERM_MONTHS,
        });
    }
    Ok(())
}

fn leasing_commission(
    commission: Commission,
    square_feet: Decimal,
    years: Decimal,
    base_sum: Decimal,
) -> Result<(Decimal, String), DomainError> {
    match commission.kind {
        AmountKind::Dollar => {
            let value = mul(
                mul(commission.amount, square_feet, "leasing commission")?,
                years,
                "leasing commission",
            )?;
            let formula = format!(
                "{} * {} * {} = {}",
                commission.amount.normalize(),
                grouped(square_feet, 0),
                years,
                grouped(value, 0)
            );
            Ok((value, formula))
        }
        AmountKind::Percentage => {
            let value = mul(
                div(commission.amount, Decimal::ONE_HUNDRED, "leasing commission")?,
                base_sum,
                "leasing commission",
            )?;
            let formula = format!(
                "{}% * {} = {}",
                commission.amount.normalize(),
                grouped(base_sum, 0),
                grouped(value, 0)
            );
            Ok((value, formula))
        }
        AmountKind::None => Ok((Decimal::ZERO, String::new())),
    }
}

fn escalate(
    value: Decimal,
    escalation: Escalation,
    what: &'static str,
) -> Result<Decimal, DomainError> {
    match escalation.kind {
        AmountKind::Percentage => {
            let factor = checked_add(
                Decimal::ONE,
                div(escalation.amount, Decimal::ONE_HUNDRED, what)?,
                what,
            )?;
            mul(value, factor, what)
        }
        AmountKind::Dollar => checked_add(value, escalation.amount, what),
        AmountKind::None => Ok(value),
    }
}

fn whole_dollars(metric: Metric, value: Decimal, formula: String) -> MetricEntry {
    entry(metric, value, money(value, 0), formula)
}

fn dollars_and_cents(metric: Metric, value: Decimal, formula: String) -> MetricEntry {
    entry(metric, value, money(value, 2), formula)
}

fn entry(metric: Metric, value: Decimal, display: String, formula: String) -> MetricEntry {
    MetricEntry {
        metric,
        label: metric.label(),
        value,
        display,
        formula,
    }
}

fn sum(
    mut values: impl Iterator<Item = Decimal>,
    what: &'static str,
) -> Result<Decimal, DomainError> {
    values.try_fold(Decimal::ZERO, |acc, v| checked_add(acc, v, what))
}

fn checked_add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, DomainError> {
    a.checked_add(b).ok_or(DomainError::Overflow { what })
}

fn mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, DomainError> {
    a.checked_mul(b).ok_or(DomainError::Overflow { what })
}

fn div(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, DomainError> {
    a.checked_div(b).ok_or(DomainError::Overflow { what })
}
