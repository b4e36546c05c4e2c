use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    #[default]
    FullService,
    Nnn,
}

/// How an escalation or commission amount is applied.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum AmountKind {
    #[default]
    None,
    Percentage,
    Dollar,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Escalation {
    pub kind: AmountKind,
    pub amount: Decimal,
}

impl Escalation {
    pub const NONE: Escalation = Escalation {
        kind: AmountKind::None,
        amount: Decimal::ZERO,
    };

    pub fn new(kind: AmountKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Commission {
    pub kind: AmountKind,
    pub amount: Decimal,
}

impl Commission {
    pub const NONE: Commission = Commission {
        kind: AmountKind::None,
        amount: Decimal::ZERO,
    };

    pub fn new(kind: AmountKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }
}

/// One lease scenario exactly as the user typed it.
///
/// Amount fields hold raw text; `LeaseInput::parse` turns them into a
/// `LeaseOption`. The default matches a blank form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaseInput {
    pub service_type: ServiceType,
    pub base_rate: String,
    pub square_feet: String,
    pub term_months: String,
    pub free_months: String,
    pub ti_allowance: String,
    pub opex: String,
    pub base_escalation_kind: AmountKind,
    pub base_escalation_amount: String,
    pub opex_escalation_kind: AmountKind,
    pub opex_escalation_amount: String,
    pub commission_kind: AmountKind,
    pub commission_amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseOption {
    pub service_type: ServiceType,
    pub base_rate: Decimal,
    pub square_feet: Decimal,
    pub term_months: u32,
    pub free_months: u32,
    pub ti_allowance_per_sf: Decimal,
    pub opex_per_sf: Decimal,
    pub base_escalation: Escalation,
    pub opex_escalation: Escalation,
    pub commission: Commission,
}

impl LeaseOption {
    /// Operating expenses are only billed separately on NNN leases.
    pub fn opex_active(&self) -> bool {
        self.service_type == ServiceType::Nnn
    }

    pub fn effective_opex(&self) -> Decimal {
        if self.opex_active() {
            self.opex_per_sf
        } else {
            Decimal::ZERO
        }
    }

    pub fn effective_opex_escalation(&self) -> Escalation {
        if self.opex_active() {
            self.opex_escalation
        } else {
            Escalation::NONE
        }
    }

    /// Term plus free months, shown alongside the entered term.
    pub fn total_term_months(&self) -> u32 {
        self.term_months.saturating_add(self.free_months)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub year: u32,
    pub rate_per_sf: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opex_per_sf: Option<Decimal>,
    pub monthly: Decimal,
    pub annual: Decimal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    TotalRentTerm,
    FreeRentDiscount,
    TiDiscount,
    TotalDiscount,
    NetTotalAfterDiscounts,
    LeasingCommission,
    NerPerYear,
    NerPerMonth,
    NerPerSfPerYear,
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::TotalRentTerm,
        Metric::FreeRentDiscount,
        Metric::TiDiscount,
        Metric::TotalDiscount,
        Metric::NetTotalAfterDiscounts,
        Metric::LeasingCommission,
        Metric::NerPerYear,
        Metric::NerPerMonth,
        Metric::NerPerSfPerYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalRentTerm => "Total Rent Term",
            Metric::FreeRentDiscount => "Free Rent Discount",
            Metric::TiDiscount => "TI Discount",
            Metric::TotalDiscount => "Total Discount",
            Metric::NetTotalAfterDiscounts => "Net Total After Discounts",
            Metric::LeasingCommission => "Leasing Commission",
            Metric::NerPerYear => "NER per Year",
            Metric::NerPerMonth => "NER per Month",
            Metric::NerPerSfPerYear => "NER per SF per Year",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    pub metric: Metric,
    pub label: &'static str,
    pub value: Decimal,
    pub display: String,
    pub formula: String,
}

/// The nine derived metrics, always in `Metric::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: Vec<MetricEntry>,
}

impl ResultSet {
    pub(crate) fn from_entries(entries: Vec<MetricEntry>) -> Self {
        debug_assert!(
            entries
                .iter()
                .map(|e| e.metric)
                .eq(Metric::ALL.iter().copied())
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[MetricEntry] {
        &self.entries
    }

    pub fn get(&self, metric: Metric) -> &MetricEntry {
        &self.entries[metric as usize]
    }

    pub fn value(&self, metric: Metric) -> Decimal {
        self.get(metric).value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseReport {
    pub service_type: ServiceType,
    pub years: u32,
    pub total_term_months: u32,
    pub schedule: Vec<ScheduleRow>,
    pub results: ResultSet,
}
