use anyhow::{Context, Result};

use super::RemoteClient;

/// Export endpoints mirror the analysis endpoints but answer with a binary
/// spreadsheet body instead of a JSON envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportKind {
    StockStatistics,
    MultiMonthStatistics,
    MonthFilter,
    IndustryStatistics,
    IndustryTopStocks,
    CompareSources,
}

impl ExportKind {
    pub fn path(&self) -> &'static str {
        match self {
            ExportKind::StockStatistics => "/api/export/stock-statistics",
            ExportKind::MultiMonthStatistics => "/api/export/multi-month-statistics",
            ExportKind::MonthFilter => "/api/export/month-filter",
            ExportKind::IndustryStatistics => "/api/export/industry-statistics",
            ExportKind::IndustryTopStocks => "/api/export/industry-top-stocks",
            ExportKind::CompareSources => "/api/export/compare-sources",
        }
    }

    /// Used when the response carries no usable Content-Disposition.
    pub fn default_filename(&self) -> &'static str {
        match self {
            ExportKind::StockStatistics => "stock-statistics.xlsx",
            ExportKind::MultiMonthStatistics => "multi-month-statistics.xlsx",
            ExportKind::MonthFilter => "month-filter.xlsx",
            ExportKind::IndustryStatistics => "industry-statistics.xlsx",
            ExportKind::IndustryTopStocks => "industry-top-stocks.xlsx",
            ExportKind::CompareSources => "compare-sources.xlsx",
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ExportError {
    #[serde(default)]
    detail: Option<String>,

    #[serde(default)]
    message: Option<String>,
}

impl RemoteClient {
    /// Run an export. Success is a binary body saved as-is; failure is a
    /// JSON error envelope distinguished by HTTP status.
    pub fn export(&self, kind: ExportKind, body: serde_json::Value) -> Result<(String, Vec<u8>)> {
        let resp = self
            .post(kind.path())
            .json(&body)
            .send()
            .context("export request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err: ExportError = resp.json().unwrap_or(ExportError {
                detail: None,
                message: None,
            });
            let reason = err
                .detail
                .or(err.message)
                .unwrap_or_else(|| format!("status {}", status));
            anyhow::bail!("export failed: {}", reason);
        }

        let filename = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| kind.default_filename().to_string());

        let bytes = resp.bytes().context("read export body")?.to_vec();
        Ok((filename, bytes))
    }
}

/// Pull a filename out of a Content-Disposition header. Prefers the RFC
/// 5987 `filename*=UTF-8''...` form, then plain `filename=`.
pub(super) fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain: Option<String> = None;
    for part in header.split(';') {
        let part = part.trim();
        if let Some(rest) = part.strip_prefix("filename*=") {
            let rest = rest
                .strip_prefix("UTF-8''")
                .or_else(|| rest.strip_prefix("utf-8''"))
                .unwrap_or(rest);
            let decoded = percent_decode(rest);
            if !decoded.is_empty() {
                return Some(decoded);
            }
        } else if let Some(rest) = part.strip_prefix("filename=") {
            let trimmed = rest.trim_matches('"');
            if !trimmed.is_empty() {
                plain = Some(trimmed.to_string());
            }
        }
    }
    plain
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hi) = hex_val(bytes.get(i + 1).copied())
            && let Some(lo) = hex_val(bytes.get(i + 2).copied())
        {
            out.push(hi * 16 + lo);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: Option<u8>) -> Option<u8> {
    match b? {
        c @ b'0'..=b'9' => Some(c - b'0'),
        c @ b'a'..=b'f' => Some(c - b'a' + 10),
        c @ b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/remote/export_tests.rs"]
mod tests;
