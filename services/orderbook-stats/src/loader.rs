//! Snapshot loading
//!
//! Turns one capture file into one [`SnapshotRow`]: parse the document, run
//! offer aggregation, statistics and bond aggregation, flatten the result.
//! A file that is missing or not valid JSON is an error for the caller.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;
use types::document::SnapshotDocument;
use types::errors::ParseError;
use types::row::SnapshotRow;

use crate::aggregation::aggregate_offers;
use crate::bonds::{aggregate_bonds, BondStatistics};
use crate::statistics::{compute_statistics, OfferStatistics};

/// Flatten offer and bond statistics into a row.
pub fn flatten(
    timestamp: NaiveDateTime,
    offers: &OfferStatistics,
    bonds: &BondStatistics,
) -> SnapshotRow {
    SnapshotRow {
        timestamp,
        total_offers: offers.total_offers,
        total_liquidity: offers.total_liquidity,

        all_fees_mean: offers.all_fees.mean,
        all_fees_median: offers.all_fees.median,
        all_fees_count: offers.all_fees.count,

        relative_fees_count: offers.relative_fees.count,
        relative_fees_ratio: offers.relative_fees.ratio,
        relative_fees_satoshis_mean: offers.relative_fees.satoshis.mean,
        relative_fees_satoshis_median: offers.relative_fees.satoshis.median,
        relative_fees_percentage_mean: offers.relative_fees.percentages.mean,
        relative_fees_percentage_median: offers.relative_fees.percentages.median,

        absolute_fees_count: offers.absolute_fees.count,
        absolute_fees_ratio: offers.absolute_fees.ratio,
        absolute_fees_satoshis_mean: offers.absolute_fees.satoshis.mean,
        absolute_fees_satoshis_median: offers.absolute_fees.satoshis.median,

        order_size_mean: offers.order_sizes.mean,
        order_size_median: offers.order_sizes.median,
        order_size_min: offers.order_sizes.min,
        order_size_max: offers.order_sizes.max,

        total_unique_makers: offers.total_unique_makers,
        total_fidelity_bonds: bonds.total_fidelity_bonds,
        total_bond_value: bonds.total_bond_value,
    }
}

/// Reduce an already-parsed document to its row.
pub fn process_document(document: &SnapshotDocument, timestamp: NaiveDateTime) -> SnapshotRow {
    let offer_stats = compute_statistics(&aggregate_offers(document.offers()));
    let bond_stats = aggregate_bonds(document.fidelity_bonds());
    flatten(timestamp, &offer_stats, &bond_stats)
}

/// Load one capture file and reduce it to its row.
pub fn load_snapshot(path: &Path, timestamp: NaiveDateTime) -> Result<SnapshotRow, ParseError> {
    let document = SnapshotDocument::from_path(path)?;
    let row = process_document(&document, timestamp);
    debug!(
        path = %path.display(),
        %timestamp,
        offers = row.total_offers,
        bonds = row.total_fidelity_bonds,
        "Snapshot processed"
    );
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;
    use types::row::Metric;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    const BASIC: &str = r#"{
        "offers": [
            {"counterparty": "J5EobsvrvAvdTTrP", "oid": 0, "ordertype": "sw0reloffer",
             "minsize": 191725, "maxsize": 14436090, "txfee": 0, "cjfee": "0.000009",
             "fidelity_bond_value": 0},
            {"counterparty": "J5FNKhn7mbAUcpiV", "oid": 0, "ordertype": "sw0absoffer",
             "minsize": 99320, "maxsize": 2066014, "txfee": 0, "cjfee": "1500",
             "fidelity_bond_value": 0}
        ],
        "fidelitybonds": []
    }"#;

    #[test]
    fn test_load_basic_snapshot() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("basic.json");
        fs::write(&path, BASIC).unwrap();

        let row = load_snapshot(&path, noon()).unwrap();
        assert_eq!(row.timestamp, noon());
        assert_eq!(row.total_offers, 2);
        assert_eq!(row.total_liquidity, 16_502_104);
        assert_eq!(row.relative_fees_count, 1);
        assert_eq!(row.absolute_fees_count, 1);
        assert_eq!(row.absolute_fees_satoshis_mean, 1500.0);
        assert_eq!(row.order_size_min, 99320);
        assert_eq!(row.order_size_max, 14436090);
        assert_eq!(row.order_size_mean, 8_251_052.0);
        assert_eq!(row.total_unique_makers, 2);
        assert_eq!(row.total_fidelity_bonds, 0);
    }

    #[test]
    fn test_txfee_does_not_affect_statistics() {
        let doc: SnapshotDocument = serde_json::from_str(BASIC).unwrap();
        let mut with_txfee: serde_json::Value = serde_json::from_str(BASIC).unwrap();
        with_txfee["offers"][0]["txfee"] = serde_json::json!(1000);
        let doc_txfee: SnapshotDocument = serde_json::from_value(with_txfee).unwrap();

        assert_eq!(process_document(&doc, noon()), process_document(&doc_txfee, noon()));
    }

    #[test]
    fn test_empty_snapshot_row_is_zero() {
        let doc: SnapshotDocument =
            serde_json::from_str(r#"{"offers": [], "fidelitybonds": []}"#).unwrap();
        let row = process_document(&doc, noon());
        for metric in Metric::ALL {
            assert_eq!(row.value(metric), 0.0, "{metric}");
        }
        assert_eq!(row, SnapshotRow::empty(noon()));
    }

    #[test]
    fn test_mistyped_offer_fields_do_not_abort_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("mistyped.json");
        fs::write(
            &path,
            r#"{
                "offers": [
                    {"counterparty": "J5EobsvrvAvdTTrP", "ordertype": "sw0reloffer",
                     "minsize": 191725, "maxsize": 14436090, "cjfee": "0.000009"},
                    {"counterparty": null, "ordertype": null,
                     "minsize": 99320, "maxsize": 14436090.0, "cjfee": "1500"}
                ],
                "fidelitybonds": [{"counterparty": null, "bond_value": 2.5}]
            }"#,
        )
        .unwrap();

        let row = load_snapshot(&path, noon()).unwrap();
        assert_eq!(row.total_offers, 2);
        assert_eq!(row.total_liquidity, 28_872_180);
        assert_eq!(row.order_size_min, 14_436_090);
        assert_eq!(row.order_size_max, 14_436_090);
        assert_eq!(row.relative_fees_count, 1);
        assert_eq!(row.absolute_fees_count, 0);
        assert_eq!(row.relative_fees_ratio, 0.5);
        assert_eq!(row.total_unique_makers, 2);
        assert_eq!(row.total_fidelity_bonds, 1);
        assert_eq!(row.total_bond_value, 2.5);
    }

    #[test]
    fn test_liquidity_past_i64_range_saturates() {
        let doc: SnapshotDocument = serde_json::from_value(serde_json::json!({
            "offers": [
                {"counterparty": "a", "ordertype": "sw0absoffer", "maxsize": i64::MAX, "cjfee": 1},
                {"counterparty": "b", "ordertype": "sw0absoffer", "maxsize": 1, "cjfee": 1}
            ]
        }))
        .unwrap();
        let row = process_document(&doc, noon());
        assert_eq!(row.total_liquidity, i64::MAX);
        assert_eq!(row.order_size_max, i64::MAX);
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_snapshot(&tmp.path().join("nope.json"), noon()).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn test_corrupt_json_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("corrupt.json");
        fs::write(&path, "{\"offers\": [").unwrap();
        let err = load_snapshot(&path, noon()).unwrap_err();
        assert!(matches!(err, ParseError::Json { .. }));
    }
}
