use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    FieldError, ProFormaInputs, ProFormaResult, RawProFormaInput, ValidationErrors,
    generate_pro_forma, validate_inputs,
};

mod format;

use format::{CurrencyFormat, format_currency, format_percent};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Parser, Debug)]
#[command(
    name = "proforma",
    about = "Pro forma investment calculator for rental property scenarios",
    after_help = "Run `proforma serve [port]` to start the HTTP API instead."
)]
struct Cli {
    #[arg(long, help = "Acquisition price of the property")]
    purchase_price: f64,
    #[arg(long, help = "Expected gross monthly rent")]
    monthly_rental_income: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Recurring monthly costs such as utilities or HOA dues"
    )]
    monthly_operating_expenses: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Expected vacant fraction of the year, between 0 and 1 (e.g. 0.05)"
    )]
    vacancy_rate: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Property management fee as a fraction of effective rent, between 0 and 1"
    )]
    management_fee_percent: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Maintenance reserve as a fraction of effective rent, between 0 and 1"
    )]
    maintenance_reserve_percent: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual property taxes")]
    property_taxes: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual insurance premium")]
    insurance: f64,
    #[arg(long, default_value_t = 0.0, help = "Other annual expenses")]
    other_expenses: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct ValidationErrorResponse {
    errors: Vec<FieldError>,
}

// CLI flags funnel through the same validator as web payloads so both
// surfaces share one admissible domain.
fn build_inputs(cli: &Cli) -> Result<ProFormaInputs, ValidationErrors> {
    let raw = RawProFormaInput {
        purchase_price: Some(cli.purchase_price.into()),
        monthly_rental_income: Some(cli.monthly_rental_income.into()),
        monthly_operating_expenses: Some(cli.monthly_operating_expenses.into()),
        vacancy_rate: Some(cli.vacancy_rate.into()),
        management_fee_percent: Some(cli.management_fee_percent.into()),
        maintenance_reserve_percent: Some(cli.maintenance_reserve_percent.into()),
        property_taxes: Some(cli.property_taxes.into()),
        insurance: Some(cli.insurance.into()),
        other_expenses: Some(cli.other_expenses.into()),
    };
    validate_inputs(&raw)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/proforma",
            get(proforma_get_handler).post(proforma_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Pro forma HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

pub fn run_cli_report() -> Result<(), ValidationErrors> {
    let cli = Cli::parse();
    let inputs = build_inputs(&cli)?;
    print_report(&generate_pro_forma(&inputs));
    Ok(())
}

fn print_report(result: &ProFormaResult) {
    let usd = CurrencyFormat::usd();
    let rows = [
        ("Gross rental income", result.gross_rental_income),
        ("Effective rental income", result.effective_rental_income),
        ("Management fee", result.management_fee),
        ("Maintenance reserve", result.maintenance_reserve),
        ("Operating expenses", result.operating_expenses_annual),
        ("Total operating expenses", result.total_operating_expenses),
        ("Net operating income", result.noi),
        ("Cash flow after debt", result.cash_flow_after_debt),
    ];
    for (label, value) in rows {
        println!("{label:<26}{}", format_currency(value, &usd));
    }
    println!("{:<26}{}", "Cap rate", format_percent(result.cap_rate, 2));
    println!(
        "{:<26}{}",
        "Cash-on-cash return",
        format_percent(result.cash_on_cash_return, 2)
    );
    println!(
        "{:<26}{:.2}",
        "Gross rent multiplier", result.gross_rent_multiplier
    );
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn proforma_get_handler(Query(payload): Query<RawProFormaInput>) -> Response {
    proforma_handler_impl(payload)
}

async fn proforma_post_handler(Json(payload): Json<RawProFormaInput>) -> Response {
    proforma_handler_impl(payload)
}

fn proforma_handler_impl(payload: RawProFormaInput) -> Response {
    match validate_inputs(&payload) {
        Ok(inputs) => json_response(StatusCode::OK, generate_pro_forma(&inputs)),
        Err(failure) => json_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            ValidationErrorResponse {
                errors: failure.errors,
            },
        ),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        Cli {
            purchase_price: 500_000.0,
            monthly_rental_income: 3_000.0,
            monthly_operating_expenses: 800.0,
            vacancy_rate: 0.05,
            management_fee_percent: 0.08,
            maintenance_reserve_percent: 0.05,
            property_taxes: 6_000.0,
            insurance: 1_200.0,
            other_expenses: 0.0,
        }
    }

    fn inputs_from_json(json: &str) -> Result<ProFormaInputs, ValidationErrors> {
        let payload = serde_json::from_str::<RawProFormaInput>(json)
            .expect("payload JSON should deserialize");
        validate_inputs(&payload)
    }

    #[test]
    fn build_inputs_accepts_sample_flags() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        assert_approx(inputs.purchase_price, 500_000.0);
        assert_approx(inputs.management_fee_percent, 0.08);
    }

    #[test]
    fn build_inputs_rejects_negative_price_through_shared_validation() {
        let mut cli = sample_cli();
        cli.purchase_price = -1.0;

        let failure = build_inputs(&cli).expect_err("negative price must be rejected");
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.errors[0].field, "purchasePrice");
    }

    #[test]
    fn payload_parses_web_keys_with_mixed_value_types() {
        let json = r#"{
          "purchasePrice": "500000",
          "monthlyRentalIncome": 3000,
          "monthlyOperatingExpenses": "800",
          "vacancyRate": 0.05,
          "managementFeePercent": "0.08",
          "maintenanceReservePercent": 0.05,
          "propertyTaxes": 6000,
          "insurance": "1200"
        }"#;
        let inputs = inputs_from_json(json).expect("json should validate");

        assert_approx(inputs.purchase_price, 500_000.0);
        assert_approx(inputs.monthly_rental_income, 3_000.0);
        assert_approx(inputs.monthly_operating_expenses, 800.0);
        assert_approx(inputs.management_fee_percent, 0.08);
        assert_approx(inputs.insurance, 1_200.0);
        assert_approx(inputs.other_expenses, 0.0);
    }

    #[test]
    fn payload_validation_failure_carries_every_field_error() {
        let json = r#"{
          "purchasePrice": 0,
          "monthlyRentalIncome": "lots",
          "vacancyRate": 1.5
        }"#;
        let failure = inputs_from_json(json).expect_err("payload must fail validation");

        let fields: Vec<&str> = failure.errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"purchasePrice"));
        assert!(fields.contains(&"monthlyRentalIncome"));
        assert!(fields.contains(&"vacancyRate"));
        // The absent required fields are reported in the same pass.
        assert!(fields.contains(&"monthlyOperatingExpenses"));
        assert!(fields.contains(&"managementFeePercent"));
        assert!(fields.contains(&"maintenanceReservePercent"));
        assert!(fields.contains(&"propertyTaxes"));
        assert!(fields.contains(&"insurance"));
    }

    #[test]
    fn result_serialization_uses_camel_case_keys() {
        let inputs = build_inputs(&sample_cli()).expect("valid inputs");
        let json = serde_json::to_string(&generate_pro_forma(&inputs))
            .expect("result should serialize");

        assert!(json.contains("\"grossRentalIncome\""));
        assert!(json.contains("\"effectiveRentalIncome\""));
        assert!(json.contains("\"managementFee\""));
        assert!(json.contains("\"maintenanceReserve\""));
        assert!(json.contains("\"operatingExpensesAnnual\""));
        assert!(json.contains("\"totalOperatingExpenses\""));
        assert!(json.contains("\"noi\""));
        assert!(json.contains("\"capRate\""));
        assert!(json.contains("\"cashFlowAfterDebt\""));
        assert!(json.contains("\"cashOnCashReturn\""));
        assert!(json.contains("\"grossRentMultiplier\""));
    }

    #[test]
    fn validation_error_response_serializes_field_and_message() {
        let response = ValidationErrorResponse {
            errors: vec![FieldError {
                field: "vacancyRate",
                message: "must be between 0 and 1".to_string(),
            }],
        };
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert_eq!(
            json,
            r#"{"errors":[{"field":"vacancyRate","message":"must be between 0 and 1"}]}"#
        );
    }
}
