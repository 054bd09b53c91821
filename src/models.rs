use serde_json::{Map, Value};

/// One funding-rate observation exactly as the exchange returned it.
/// Field order is preserved so the CSV header follows the API's ordering.
pub type Record = Map<String, Value>;

/// Half-open query window `[start_ms, end_ms)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}
