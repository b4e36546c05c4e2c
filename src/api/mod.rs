use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AmountKind, LeaseError, LeaseInput, LeaseReport, OptionBook, ServiceType, evaluate,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliServiceType {
    FullService,
    Nnn,
}

impl From<CliServiceType> for ServiceType {
    fn from(value: CliServiceType) -> Self {
        match value {
            CliServiceType::FullService => ServiceType::FullService,
            CliServiceType::Nnn => ServiceType::Nnn,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliAmountKind {
    None,
    Percentage,
    Dollar,
}

impl From<CliAmountKind> for AmountKind {
    fn from(value: CliAmountKind) -> Self {
        match value {
            CliAmountKind::None => AmountKind::None,
            CliAmountKind::Percentage => AmountKind::Percentage,
            CliAmountKind::Dollar => AmountKind::Dollar,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiServiceType {
    #[serde(
        alias = "fullService",
        alias = "full_service",
        alias = "Full Service",
        alias = "full"
    )]
    FullService,
    #[serde(alias = "NNN", alias = "triple-net", alias = "tripleNet")]
    Nnn,
}

impl From<ApiServiceType> for CliServiceType {
    fn from(value: ApiServiceType) -> Self {
        match value {
            ApiServiceType::FullService => CliServiceType::FullService,
            ApiServiceType::Nnn => CliServiceType::Nnn,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiAmountKind {
    #[serde(alias = "None")]
    None,
    #[serde(alias = "Percentage", alias = "percent", alias = "%")]
    Percentage,
    #[serde(alias = "Dollar", alias = "$")]
    Dollar,
}

impl From<ApiAmountKind> for CliAmountKind {
    fn from(value: ApiAmountKind) -> Self {
        match value {
            ApiAmountKind::None => CliAmountKind::None,
            ApiAmountKind::Percentage => CliAmountKind::Percentage,
            ApiAmountKind::Dollar => CliAmountKind::Dollar,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LeasePayload {
    service_type: Option<ApiServiceType>,
    base_rate: Option<String>,
    square_feet: Option<String>,
    term_months: Option<String>,
    free_months: Option<String>,
    ti_allowance: Option<String>,
    opex: Option<String>,

    base_escalation_type: Option<ApiAmountKind>,
    base_escalation_amount: Option<String>,
    opex_escalation_type: Option<ApiAmountKind>,
    opex_escalation_amount: Option<String>,

    commission_type: Option<ApiAmountKind>,
    commission_amount: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    options: Vec<LeasePayload>,
    active: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "leasecalc",
    about = "Commercial lease economics: escalating rent schedule and net effective rent"
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = CliServiceType::FullService)]
    service_type: CliServiceType,
    #[arg(
        long,
        default_value = "",
        help = "Base rent per SF per year at lease start, e.g. 25.50 or $25.50"
    )]
    base_rate: String,
    #[arg(long, default_value = "", help = "Leased area, e.g. 2500 or 2,500")]
    square_feet: String,
    #[arg(long, default_value = "", help = "Lease term in months")]
    term_months: String,
    #[arg(
        long,
        default_value = "",
        help = "Free rent months, valued at the first year's monthly rent"
    )]
    free_months: String,
    #[arg(long, default_value = "", help = "TI allowance per SF (optional)")]
    ti_allowance: String,
    #[arg(
        long,
        default_value = "",
        help = "Operating expenses per SF per year, used when --service-type=nnn"
    )]
    opex: String,
    #[arg(long, value_enum, default_value_t = CliAmountKind::None)]
    base_escalation_type: CliAmountKind,
    #[arg(
        long,
        default_value = "",
        help = "Yearly base rate step: percent (3 or 3%) or dollars per SF"
    )]
    base_escalation_amount: String,
    #[arg(long, value_enum, default_value_t = CliAmountKind::None)]
    opex_escalation_type: CliAmountKind,
    #[arg(long, default_value = "", help = "Yearly opex step, used when --service-type=nnn")]
    opex_escalation_amount: String,
    #[arg(long, value_enum, default_value_t = CliAmountKind::None)]
    commission_type: CliAmountKind,
    #[arg(
        long,
        default_value = "",
        help = "Commission: percent of base rent, or dollars per SF per year"
    )]
    commission_amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    active: usize,
    options: Vec<OptionOutcome>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionOutcome {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<LeaseReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorResponse>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

impl From<&LeaseError> for ErrorResponse {
    fn from(err: &LeaseError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

fn build_lease_input(cli: Cli) -> LeaseInput {
    LeaseInput {
        service_type: cli.service_type.into(),
        base_rate: cli.base_rate,
        square_feet: cli.square_feet,
        term_months: cli.term_months,
        free_months: cli.free_months,
        ti_allowance: cli.ti_allowance,
        opex: cli.opex,
        base_escalation_kind: cli.base_escalation_type.into(),
        base_escalation_amount: cli.base_escalation_amount,
        opex_escalation_kind: cli.opex_escalation_type.into(),
        opex_escalation_amount: cli.opex_escalation_amount,
        commission_kind: cli.commission_type.into(),
        commission_amount: cli.commission_amount,
    }
}

/// Parses command-line flags, evaluates the option and returns the report
/// as pretty JSON. Exits the process on `--help` or unknown flags.
pub fn run_cli<I, T>(args: I) -> Result<String, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let input = build_lease_input(Cli::parse_from(args));
    let report = evaluate(&input).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&report).map_err(|e| format!("Failed to encode report: {e}"))
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/calculate",
            get(calculate_get_handler).post(calculate_post_handler),
        )
        .route("/api/compare", post(compare_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "lease calculator API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/calculate");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
            kind: "route",
        },
    )
}

async fn calculate_get_handler(Query(payload): Query<LeasePayload>) -> Response {
    calculate_handler_impl(payload).await
}

async fn calculate_post_handler(Json(payload): Json<LeasePayload>) -> Response {
    calculate_handler_impl(payload).await
}

async fn calculate_handler_impl(payload: LeasePayload) -> Response {
    let input = lease_input_from_payload(payload);
    match evaluate(&input) {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "calculation rejected");
            json_response(StatusCode::BAD_REQUEST, ErrorResponse::from(&err))
        }
    }
}

async fn compare_handler(Json(payload): Json<ComparePayload>) -> Response {
    let book = match book_from_payload(payload) {
        Ok(book) => book,
        Err(msg) => {
            tracing::warn!(error = %msg, "comparison rejected");
            return json_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    kind: "options",
                },
            );
        }
    };
    json_response(StatusCode::OK, build_compare_response(&book))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

#[cfg(test)]
fn lease_input_from_json(json: &str) -> Result<LeaseInput, String> {
    let payload = serde_json::from_str::<LeasePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    Ok(lease_input_from_payload(payload))
}

fn lease_input_from_payload(payload: LeasePayload) -> LeaseInput {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.service_type {
        cli.service_type = v.into();
    }
    if let Some(v) = payload.base_rate {
        cli.base_rate = v;
    }
    if let Some(v) = payload.square_feet {
        cli.square_feet = v;
    }
    if let Some(v) = payload.term_months {
        cli.term_months = v;
    }
    if let Some(v) = payload.free_months {
        cli.free_months = v;
    }
    if let Some(v) = payload.ti_allowance {
        cli.ti_allowance = v;
    }
    if let Some(v) = payload.opex {
        cli.opex = v;
    }

    if let Some(v) = payload.base_escalation_type {
        cli.base_escalation_type = v.into();
    }
    if let Some(v) = payload.base_escalation_amount {
        cli.base_escalation_amount = v;
    }
    if let Some(v) = payload.opex_escalation_type {
        cli.opex_escalation_type = v.into();
    }
    if let Some(v) = payload.opex_escalation_amount {
        cli.opex_escalation_amount = v;
    }

    if let Some(v) = payload.commission_type {
        cli.commission_type = v.into();
    }
    if let Some(v) = payload.commission_amount {
        cli.commission_amount = v;
    }

    build_lease_input(cli)
}

fn book_from_payload(payload: ComparePayload) -> Result<OptionBook, String> {
    let inputs = payload
        .options
        .into_iter()
        .map(lease_input_from_payload)
        .collect();
    let mut book = OptionBook::from_inputs(inputs).map_err(|e| e.to_string())?;
    if let Some(index) = payload.active {
        book.select(index).map_err(|e| e.to_string())?;
    }
    Ok(book)
}

fn build_compare_response(book: &OptionBook) -> CompareResponse {
    let options = book
        .evaluate_all()
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(report) => OptionOutcome {
                index,
                report: Some(report),
                error: None,
            },
            Err(err) => OptionOutcome {
                index,
                report: None,
                error: Some(ErrorResponse::from(&err)),
            },
        })
        .collect();
    CompareResponse {
        active: book.active_index(),
        options,
    }
}

/// Blank form: full service, no escalations or commission, empty amounts.
fn default_cli_for_api() -> Cli {
    Cli {
        service_type: CliServiceType::FullService,
        base_rate: String::new(),
        square_feet: String::new(),
        term_months: String::new(),
        free_months: String::new(),
        ti_allowance: String::new(),
        opex: String::new(),
        base_escalation_type: CliAmountKind::None,
        base_escalation_amount: String::new(),
        opex_escalation_type: CliAmountKind::None,
        opex_escalation_amount: String::new(),
        commission_type: CliAmountKind::None,
        commission_amount: String::new(),
    }
}
