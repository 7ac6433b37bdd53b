use anyhow::{Context, Result};

use super::RemoteClient;
use crate::model::{FilteredStock, IndustryStatRow, SourceCompareRow, TopStockRow};

impl RemoteClient {
    /// Stocks whose historical performance in `month` clears `min_count`
    /// years of data.
    pub fn month_filter(
        &self,
        month: u8,
        min_count: u32,
        data_source: Option<&str>,
    ) -> Result<Vec<FilteredStock>> {
        let resp = self
            .post("/api/month/filter")
            .json(&serde_json::json!({
                "month": month,
                "min_count": min_count,
                "data_source": data_source,
            }))
            .send()
            .context("month filter")?;
        self.envelope_data(resp, "month filter")
    }

    pub fn industry_statistics(
        &self,
        month: u8,
        industry_type: Option<&str>,
        data_source: Option<&str>,
    ) -> Result<Vec<IndustryStatRow>> {
        let resp = self
            .post("/api/industry/statistics")
            .json(&serde_json::json!({
                "month": month,
                "industry_type": industry_type,
                "data_source": data_source,
            }))
            .send()
            .context("industry statistics")?;
        self.envelope_data(resp, "industry statistics")
    }

    pub fn industry_top_stocks(
        &self,
        industry: &str,
        month: u8,
        data_source: Option<&str>,
    ) -> Result<Vec<TopStockRow>> {
        let resp = self
            .post("/api/industry/top-stocks")
            .json(&serde_json::json!({
                "industry": industry,
                "month": month,
                "data_source": data_source,
            }))
            .send()
            .context("industry top stocks")?;
        self.envelope_data(resp, "industry top stocks")
    }

    pub fn industries(&self) -> Result<Vec<String>> {
        let resp = self.get("/api/industries").send().context("industries")?;
        self.envelope_data(resp, "industries")
    }

    /// Reconcile one stock's numbers across the configured data sources.
    pub fn compare_sources(&self, symbol: &str, year: i32) -> Result<Vec<SourceCompareRow>> {
        let resp = self
            .post("/api/data/compare-sources")
            .json(&serde_json::json!({
                "code": symbol,
                "year": year,
            }))
            .send()
            .context("compare sources")?;
        self.envelope_data(resp, "compare sources")
    }
}
