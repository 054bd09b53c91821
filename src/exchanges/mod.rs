use crate::errors::ExchangeError;
use crate::models::Record;
use async_trait::async_trait;

pub mod deribit;

#[async_trait]
pub trait Exchange: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches funding-rate observations for `instrument` within
    /// `[start_ms, end_ms)` using a single request.
    async fn fetch_funding_rate_history(
        &self,
        instrument: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Record>, ExchangeError>;
}
