//! Canonical earnings-calendar data model.
//!
//! The HTTP route that fetches upstream calendar data stays outside this
//! crate; what lives here is the canonical shape it produces and the pure
//! normalization from the upstream row array: drop rows before the range
//! start, group by report date, derive the ticker list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One upstream earnings-calendar row, as the market-data API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEarning {
    pub symbol: String,
    pub date: String,
    #[serde(default)]
    pub eps_estimated: Option<f64>,
    #[serde(default)]
    pub eps_actual: Option<f64>,
    #[serde(default)]
    pub revenue_estimated: Option<f64>,
    #[serde(default)]
    pub revenue_actual: Option<f64>,
}

/// One simplified earnings row in the canonical list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Earning {
    pub symbol: String,
    /// Report date, `YYYY-MM-DD`.
    pub date: String,
    pub eps_estimated: Option<f64>,
    pub actual: Option<f64>,
    pub revenue_estimated: Option<f64>,
    pub revenue_actual: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerRef {
    pub symbol: String,
}

/// The canonical calendar handed to the view layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsCalendar {
    pub date_range: DateRange,
    pub count: usize,
    pub earnings: Vec<Earning>,
    pub grouped_by_date: BTreeMap<String, Vec<Earning>>,
    pub ticker_list: Vec<TickerRef>,
}

impl EarningsCalendar {
    /// Normalizes upstream rows into the canonical calendar. Rows dated
    /// before `range.from` are dropped; ISO dates compare lexicographically,
    /// so plain string comparison is enough. Per-date groups preserve the
    /// upstream row order.
    pub fn normalize(rows: Vec<RawEarning>, range: DateRange) -> Self {
        let earnings: Vec<Earning> = rows
            .into_iter()
            .filter(|row| row.date.as_str() >= range.from.as_str())
            .map(|row| Earning {
                symbol: row.symbol,
                date: row.date,
                eps_estimated: row.eps_estimated,
                actual: row.eps_actual,
                revenue_estimated: row.revenue_estimated,
                revenue_actual: row.revenue_actual,
            })
            .collect();

        let ticker_list = earnings
            .iter()
            .map(|e| TickerRef {
                symbol: e.symbol.clone(),
            })
            .collect();

        let mut grouped_by_date: BTreeMap<String, Vec<Earning>> = BTreeMap::new();
        for earning in &earnings {
            grouped_by_date
                .entry(earning.date.clone())
                .or_default()
                .push(earning.clone());
        }

        Self {
            count: earnings.len(),
            date_range: range,
            earnings,
            grouped_by_date,
            ticker_list,
        }
    }
}
