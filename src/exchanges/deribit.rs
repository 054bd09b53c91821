use super::Exchange;
use crate::errors::ExchangeError;
use crate::models::Record;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

const FUNDING_RATE_HISTORY_PATH: &str = "/api/v2/public/get_funding_rate_history";

/// JSON-RPC envelope Deribit wraps every response in. Exactly one of
/// `result` or `error` is expected to be present.
#[derive(Debug, Deserialize)]
struct DeribitResponse {
    result: Option<Vec<Record>>,
    error: Option<DeribitError>,
}

#[derive(Debug, Deserialize)]
struct DeribitError {
    code: Option<i64>,
    message: String,
}

impl From<DeribitError> for ExchangeError {
    fn from(err: DeribitError) -> Self {
        ExchangeError::Api {
            code: err.code,
            message: err.message,
        }
    }
}

pub struct Deribit {
    client: reqwest::Client,
    base_url: String,
}

impl Deribit {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Exchange for Deribit {
    fn name(&self) -> &'static str {
        "deribit"
    }

    async fn fetch_funding_rate_history(
        &self,
        instrument: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Record>, ExchangeError> {
        let url = Url::parse_with_params(
            &format!("{}{}", self.base_url, FUNDING_RATE_HISTORY_PATH),
            &[
                ("instrument_name", instrument.to_string()),
                ("start_timestamp", start_ms.to_string()),
                ("end_timestamp", end_ms.to_string()),
            ],
        )?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Deribit answers rejected requests with a 4xx that still carries
        // the JSON-RPC error object, so prefer its message when present.
        if !status.is_success() {
            return match serde_json::from_str::<DeribitResponse>(&body) {
                Ok(DeribitResponse {
                    error: Some(err), ..
                }) => Err(err.into()),
                _ => Err(ExchangeError::Status { status, body }),
            };
        }

        let response: DeribitResponse = serde_json::from_str(&body)?;

        match response {
            DeribitResponse {
                result: Some(records),
                ..
            } => Ok(records),
            DeribitResponse {
                error: Some(err), ..
            } => Err(err.into()),
            _ => Err(ExchangeError::UnexpectedData(format!(
                "[{}] response has neither result nor error: {}",
                self.name(),
                body
            ))),
        }
    }
}
