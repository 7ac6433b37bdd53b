use super::*;

#[test]
fn plain_filename_is_extracted() {
    assert_eq!(
        filename_from_disposition("attachment; filename=\"report.xlsx\""),
        Some("report.xlsx".to_string())
    );
    assert_eq!(
        filename_from_disposition("attachment; filename=report.xlsx"),
        Some("report.xlsx".to_string())
    );
}

#[test]
fn rfc5987_form_wins_over_plain() {
    let header = "attachment; filename=\"fallback.xlsx\"; filename*=UTF-8''%E8%82%A1%E7%A5%A8.xlsx";
    assert_eq!(
        filename_from_disposition(header),
        Some("股票.xlsx".to_string())
    );
}

#[test]
fn missing_or_empty_disposition_yields_none() {
    assert_eq!(filename_from_disposition("attachment"), None);
    assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
}

#[test]
fn each_export_kind_has_a_default_name() {
    for kind in [
        ExportKind::StockStatistics,
        ExportKind::MultiMonthStatistics,
        ExportKind::MonthFilter,
        ExportKind::IndustryStatistics,
        ExportKind::IndustryTopStocks,
        ExportKind::CompareSources,
    ] {
        assert!(kind.default_filename().ends_with(".xlsx"));
        assert!(kind.path().starts_with("/api/export/"));
    }
}
