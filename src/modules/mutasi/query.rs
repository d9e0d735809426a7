use chrono::NaiveDate;
use serde_json::{json, Value};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Ledger days are Jakarta business days.
pub const LEDGER_UTC_OFFSET: &str = "+07:00";

/// Clamp to [1, 200], then drop any fraction.
pub fn page_size(requested: Option<f64>) -> u32 {
    let size = requested.unwrap_or(f64::from(DEFAULT_PAGE_SIZE));
    size.clamp(f64::from(MIN_PAGE_SIZE), f64::from(MAX_PAGE_SIZE)) as u32
}

/// Inclusive bounds of one ledger day, as RFC 3339 timestamps in UTC+7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRange {
    pub from: String,
    pub to: String,
}

impl DayRange {
    pub fn new(date: NaiveDate) -> Self {
        let day = date.format("%Y-%m-%d");
        Self {
            from: format!("{}T00:00:00{}", day, LEDGER_UTC_OFFSET),
            to: format!("{}T23:59:59{}", day, LEDGER_UTC_OFFSET),
        }
    }

    pub fn parse(date_ymd: &str) -> Option<Self> {
        NaiveDate::parse_from_str(date_ymd, "%Y-%m-%d")
            .ok()
            .map(Self::new)
    }
}

/// Journal search filtered to one merchant and one day, newest first.
pub fn journal_search_body(merchant_id: &str, range: &DayRange, size: u32) -> Value {
    json!({
        "from": 0,
        "size": size,
        "sort": { "time": { "order": "desc" } },
        "included_categories": { "incoming": ["transaction_share", "action"] },
        "query": [
            {
                "op": "and",
                "clauses": [
                    { "field": "metadata.transaction.merchant_id", "op": "equal", "value": merchant_id },
                    { "field": "metadata.transaction.transaction_time", "op": "gte", "value": range.from },
                    { "field": "metadata.transaction.transaction_time", "op": "lte", "value": range.to },
                ],
            }
        ],
    })
}
