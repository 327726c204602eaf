//! AWS Lambda handler for compound-interest projections
//!
//! Accepts the shared-link query parameters (`initialCapital`, `periodicContribution`, ...)
//! through API Gateway and returns the projection as JSON, or as CSV when `format=csv`.
//! Missing parameters fall back to the defaults; `locale` and `currency` override the
//! environment configuration per request.

use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_lambda_events::encodings::Body;
use compound_projection::{
    config,
    export::{self, Header, DEFAULT_EXPORT_FILE},
    params::query,
    report::{self, ChartPoint, SummaryCards},
    Currency, Locale, ProjectionConfig, ProjectionEngine, SimulationParams, SimulationResult,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{error, info};
use serde::Serialize;

/// Query keys consumed by the handler rather than the parameter table
const FORMAT_KEY: &str = "format";
const LOCALE_KEY: &str = "locale";
const CURRENCY_KEY: &str = "currency";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    params: SimulationParams,
    share_query: String,
    summary: SummaryCards,
    chart: Vec<ChartPoint>,
    result: SimulationResult,
    execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
}

fn response(status: i64, content_type: &str, body: Option<String>) -> Result<ApiGatewayProxyResponse, Error> {
    let mut resp = ApiGatewayProxyResponse {
        status_code: status,
        body: body.map(Body::Text),
        ..Default::default()
    };
    resp.headers.insert("Content-Type", content_type.parse()?);
    resp.headers.insert("Access-Control-Allow-Origin", "*".parse()?);
    resp.headers.insert("Access-Control-Allow-Methods", "GET, OPTIONS".parse()?);
    resp.headers.insert("Access-Control-Allow-Headers", "Content-Type".parse()?);
    Ok(resp)
}

fn error_response(status: i64, message: String) -> Result<ApiGatewayProxyResponse, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    response(status, "application/json", Some(body))
}

/// Build the response for one request; `pairs` are the decoded query parameters
fn handle(
    method: &str,
    pairs: &[(&str, &str)],
    base_config: &ProjectionConfig,
) -> Result<ApiGatewayProxyResponse, Error> {
    let start = std::time::Instant::now();

    if method == "OPTIONS" {
        return response(200, "text/plain", None);
    }

    let mut config = base_config.clone();
    let mut format = OutputFormat::Json;
    let mut param_pairs = Vec::with_capacity(pairs.len());

    for &(key, value) in pairs {
        match key {
            FORMAT_KEY => {
                format = match value.to_ascii_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "csv" => OutputFormat::Csv,
                    other => return error_response(400, format!("Unsupported format: {}", other)),
                }
            }
            LOCALE_KEY => match value.parse::<Locale>() {
                Ok(locale) => config.locale = locale,
                Err(e) => return error_response(400, e.to_string()),
            },
            CURRENCY_KEY => match value.parse::<Currency>() {
                Ok(currency) => config.currency = currency,
                Err(e) => return error_response(400, e.to_string()),
            },
            _ => param_pairs.push((key, value)),
        }
    }

    let params = match query::from_pairs(SimulationParams::default(), param_pairs) {
        Ok(p) => p,
        Err(e) => return error_response(400, e.to_string()),
    };

    let engine = ProjectionEngine::new(config.clone());
    let result = engine.project(&params);
    info!("Projected {} months ({:?})", result.months(), format);

    match format {
        OutputFormat::Csv => {
            let csv = match export::export_csv_string(&result.monthly_data, Header::Localized(config.locale)) {
                Ok(s) => s,
                Err(e) => {
                    error!("CSV export failed: {}", e);
                    return error_response(500, format!("CSV export failed: {}", e));
                }
            };
            let mut resp = response(200, "text/csv; charset=utf-8", Some(csv))?;
            resp.headers.insert(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", DEFAULT_EXPORT_FILE).parse()?,
            );
            Ok(resp)
        }
        OutputFormat::Json => {
            let body = ProjectionResponse {
                share_query: query::to_query_string(&params),
                summary: SummaryCards::new(&result, config.locale, config.currency),
                chart: report::chart_series(&result),
                params,
                result,
                execution_time_ms: start.elapsed().as_millis() as u64,
            };
            response(200, "application/json", Some(serde_json::to_string(&body)?))
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<ApiGatewayProxyRequest>) -> Result<ApiGatewayProxyResponse, Error> {
    let request = event.payload;
    let base_config = match config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return error_response(500, e.to_string());
        }
    };

    let pairs: Vec<(&str, &str)> = request.query_string_parameters.iter().collect();
    handle(request.http_method.as_str(), &pairs, &base_config)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
