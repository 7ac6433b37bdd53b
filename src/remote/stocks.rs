use anyhow::{Context, Result};

use super::RemoteClient;
use crate::model::{StockHit, StockStatistics};

impl RemoteClient {
    /// Keyword search backing the autocomplete dropdown.
    pub fn search_stocks(&self, keyword: &str, limit: usize) -> Result<Vec<StockHit>> {
        let resp = self
            .get("/api/stocks/search")
            .query(&[("keyword", keyword), ("limit", &limit.to_string())])
            .send()
            .context("search stocks")?;
        self.envelope_data(resp, "search stocks")
    }

    /// Single-month statistics for one stock across a span of years.
    pub fn stock_statistics(
        &self,
        symbol: &str,
        month: u8,
        start_year: i32,
        end_year: i32,
        data_source: Option<&str>,
    ) -> Result<StockStatistics> {
        let resp = self
            .post("/api/stock/statistics")
            .json(&serde_json::json!({
                "code": symbol,
                "month": month,
                "start_year": start_year,
                "end_year": end_year,
                "data_source": data_source,
            }))
            .send()
            .context("stock statistics")?;
        self.envelope_data(resp, "stock statistics")
    }

    /// Statistics for a selection of months at once.
    pub fn multi_month_statistics(
        &self,
        symbol: &str,
        months: &[u8],
        start_year: i32,
        end_year: i32,
        data_source: Option<&str>,
    ) -> Result<StockStatistics> {
        let resp = self
            .post("/api/stock/multi-month-statistics")
            .json(&serde_json::json!({
                "code": symbol,
                "months": months,
                "start_year": start_year,
                "end_year": end_year,
                "data_source": data_source,
            }))
            .send()
            .context("multi month statistics")?;
        self.envelope_data(resp, "multi month statistics")
    }
}
