// End-to-end and property tests for the comparison pipeline.
// CI: 128 cases (default). Soak: PROPTEST_CASES=5000 cargo test --release

use std::collections::BTreeSet;
use std::fs;

use proptest::prelude::*;
use tempfile::tempdir;

use inventory_compare::data::export::{to_csv_bytes, write_report};
use inventory_compare::data::filter::{default_selection, filter_by_status, status_options};
use inventory_compare::data::loader::{load_file, load_source, load_table};
use inventory_compare::data::normalize::normalize_key;
use inventory_compare::data::REPORT_FILE_NAME;
use inventory_compare::{run, ReconcileError, Source, StatusSelection, Table};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn selection(items: &[&str]) -> StatusSelection {
    items.iter().map(|s| s.to_string()).collect()
}

fn export_text(rows: &[(String, String)]) -> String {
    let mut out = String::from("Barcode\tTitle\tItem Status\n");
    for (i, (barcode, status)) in rows.iter().enumerate() {
        out.push_str(&format!("{barcode}\tTitle {i}\t{status}\n"));
    }
    out
}

fn scanned_text(barcodes: &[String]) -> String {
    let mut out = String::from("Barcode,Scanned By\n");
    for b in barcodes {
        out.push_str(&format!("{b},wand\n"));
    }
    out
}

fn output_barcodes(csv: &[u8]) -> Vec<String> {
    let table = load_table(csv, b',').unwrap();
    let idx = table.column_index("Barcode").unwrap();
    table.column(idx).map(|c| c.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

#[test]
fn reports_items_not_scanned() {
    let export = "Barcode\tItem Status\n001\tLost\n002\tChecked In\n003\tChecked In\n";
    let scanned = "Barcode\n002\n";
    let report = run(
        export.as_bytes(),
        scanned.as_bytes(),
        &selection(&["Lost", "Checked In"]),
    )
    .unwrap();

    assert_eq!(
        String::from_utf8(report.csv).unwrap(),
        "Barcode,Item Status\n001,Lost\n003,Checked In\n"
    );
    assert_eq!(report.reconciliation.missing_count(), 2);
}

#[test]
fn missing_status_column_is_schema_error() {
    let export = "Barcode\tTitle\n001\tDune\n";
    let scanned = "Barcode\n001\n";
    let err = run(export.as_bytes(), scanned.as_bytes(), &selection(&["Lost"])).unwrap_err();
    assert_eq!(err, ReconcileError::schema("Item Status"));
    assert_eq!(err.to_string(), "Missing expected column: 'Item Status'");
}

#[test]
fn missing_scanned_barcode_is_schema_error() {
    let export = "Barcode\tItem Status\n001\tLost\n";
    let scanned = "Item\n001\n";
    let err = run(export.as_bytes(), scanned.as_bytes(), &selection(&["Lost"])).unwrap_err();
    assert_eq!(err.missing_column(), Some("Barcode"));
}

#[test]
fn malformed_export_is_parse_error() {
    let export = "Barcode\tItem Status\n001\tLost\textra\n";
    let err = run(export.as_bytes(), b"Barcode\n1\n", &selection(&["Lost"])).unwrap_err();
    match err {
        ReconcileError::Parse { input, message } => {
            assert_eq!(input, "export");
            assert!(!message.is_empty());
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn empty_selection_is_header_only() {
    let export = "Barcode\tTitle\tItem Status\n1\tA\tLost\n";
    let report = run(export.as_bytes(), b"Barcode\n", &StatusSelection::new()).unwrap();
    assert_eq!(report.csv, b"Barcode,Title,Item Status\n");
}

#[test]
fn passthrough_columns_keep_order_and_content() {
    let export = "Call Number\tBarcode\tNotes\tItem Status\n\
                  813 DUN\t0007\t\"water damage, spine\"\tChecked In\n\
                  520 COS\t0008\t\tChecked In\n";
    let report = run(export.as_bytes(), b"Barcode\n0008\n", &selection(&["Checked In"])).unwrap();
    assert_eq!(
        String::from_utf8(report.csv).unwrap(),
        "Call Number,Barcode,Notes,Item Status\n813 DUN,0007,\"water damage, spine\",Checked In\n"
    );
}

#[test]
fn empty_barcode_exports_as_marker() {
    let export = "Barcode\tItem Status\n\tLost\n";
    let report = run(export.as_bytes(), b"Barcode\n1\n", &selection(&["Lost"])).unwrap();
    assert_eq!(report.csv, b"Barcode,Item Status\nnan,Lost\n");
}

#[test]
fn status_options_and_defaults_from_loaded_export() {
    let export = load_source(
        "Barcode\tItem Status\n1\tLost\n2\t\n3\tMissing\n4\tLost\n".as_bytes(),
        Source::Export,
    )
    .unwrap();
    let options = status_options(&export).unwrap();
    assert_eq!(options, vec!["Lost", "Missing"]);
    assert_eq!(default_selection(&options), selection(&["Lost"]));
}

// ---------------------------------------------------------------------------
// Files on disk
// ---------------------------------------------------------------------------

#[test]
fn load_from_disk_and_write_report() {
    let dir = tempdir().unwrap();
    let export_path = dir.path().join("horizon.txt");
    let scanned_path = dir.path().join("wand.csv");
    fs::write(&export_path, "Barcode\tItem Status\n10\tChecked In\n11\tChecked In\n").unwrap();
    fs::write(&scanned_path, "Barcode\n11\n11\n").unwrap();

    let export = load_file(&export_path, Source::Export).unwrap();
    let scanned = load_file(&scanned_path, Source::Scanned).unwrap();
    let result = inventory_compare::data::reconcile::reconcile(
        &export,
        &scanned,
        &selection(&["Checked In"]),
    )
    .unwrap();

    let bytes = to_csv_bytes(&result.missing).unwrap();
    let out_path = dir.path().join(REPORT_FILE_NAME);
    write_report(&out_path, &bytes).unwrap();

    assert_eq!(
        fs::read_to_string(&out_path).unwrap(),
        "Barcode,Item Status\n10,Checked In\n"
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_file(&dir.path().join("nope.tsv"), Source::Export).unwrap_err();
    assert!(matches!(err, ReconcileError::Io { .. }));
}

#[test]
fn extension_does_not_change_parsing() {
    let dir = tempdir().unwrap();
    // comma content in a .tsv file is still read tab-separated: one column
    let path = dir.path().join("odd.tsv");
    fs::write(&path, "Barcode,Item Status\n1,Lost\n").unwrap();
    let table = load_file(&path, Source::Export).unwrap();
    assert_eq!(table.columns(), &["Barcode,Item Status"]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(128),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

const STATUSES: &[&str] = &["Checked In", "Checked Out", "Lost", "Missing"];

/// Small barcode alphabet so export and scan overlap often.
fn arb_barcode() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => r"0?[0-9]{1,2}",
        1 => Just(String::new()),
    ]
}

fn arb_status() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => prop::sample::select(STATUSES).prop_map(str::to_string),
        1 => Just(String::new()),
    ]
}

fn arb_export() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_barcode(), arb_status()), 0..40)
}

fn arb_scanned() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_barcode(), 0..40)
}

fn arb_selection() -> impl Strategy<Value = StatusSelection> {
    prop::sample::subsequence(STATUSES, 0..=STATUSES.len())
        .prop_map(|v| v.into_iter().map(str::to_string).collect())
}

fn filtered_table(export: &str, selected: &StatusSelection) -> Table {
    let table = load_source(export.as_bytes(), Source::Export).unwrap();
    let table = normalize_key(&table, "Barcode").unwrap();
    filter_by_status(&table, selected).unwrap()
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn missing_rows_are_subset_of_filtered(
        rows in arb_export(),
        scans in arb_scanned(),
        selected in arb_selection(),
    ) {
        let export = export_text(&rows);
        let report = run(export.as_bytes(), scanned_text(&scans).as_bytes(), &selected).unwrap();
        let filtered = filtered_table(&export, &selected);

        let mut remaining: Vec<_> = filtered.rows().to_vec();
        for row in report.reconciliation.missing.rows() {
            let pos = remaining.iter().position(|r| r == row);
            prop_assert!(pos.is_some(), "row {:?} not in filtered table", row);
            remaining.remove(pos.unwrap());
        }
    }

    #[test]
    fn no_missing_barcode_was_scanned(
        rows in arb_export(),
        scans in arb_scanned(),
        selected in arb_selection(),
    ) {
        let report = run(
            export_text(&rows).as_bytes(),
            scanned_text(&scans).as_bytes(),
            &selected,
        ).unwrap();
        let scanned: BTreeSet<String> = scans
            .iter()
            .map(|b| if b.is_empty() { "nan".to_string() } else { b.clone() })
            .collect();
        for barcode in output_barcodes(&report.csv) {
            prop_assert!(!scanned.contains(&barcode));
        }
    }

    #[test]
    fn rerun_is_byte_identical(
        rows in arb_export(),
        scans in arb_scanned(),
        selected in arb_selection(),
    ) {
        let export = export_text(&rows);
        let scanned = scanned_text(&scans);
        let first = run(export.as_bytes(), scanned.as_bytes(), &selected).unwrap();
        let second = run(export.as_bytes(), scanned.as_bytes(), &selected).unwrap();
        prop_assert_eq!(first.csv, second.csv);
    }

    #[test]
    fn row_order_does_not_change_barcode_set(
        rows in arb_export(),
        scans in arb_scanned(),
        selected in arb_selection(),
        seed in any::<u64>(),
    ) {
        let shuffle = |len: usize| -> Vec<usize> {
            let mut idx: Vec<usize> = (0..len).collect();
            let mut x = seed | 1;
            for i in (1..len).rev() {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                idx.swap(i, (x % (i as u64 + 1)) as usize);
            }
            idx
        };
        let rows_perm: Vec<_> = shuffle(rows.len()).into_iter().map(|i| rows[i].clone()).collect();
        let scans_perm: Vec<_> = shuffle(scans.len()).into_iter().map(|i| scans[i].clone()).collect();

        let a = run(export_text(&rows).as_bytes(), scanned_text(&scans).as_bytes(), &selected).unwrap();
        let b = run(export_text(&rows_perm).as_bytes(), scanned_text(&scans_perm).as_bytes(), &selected).unwrap();

        let set_a: BTreeSet<String> = output_barcodes(&a.csv).into_iter().collect();
        let set_b: BTreeSet<String> = output_barcodes(&b.csv).into_iter().collect();
        prop_assert_eq!(set_a, set_b);
    }

    #[test]
    fn exported_report_reparses_to_same_table(
        rows in arb_export(),
        scans in arb_scanned(),
        selected in arb_selection(),
    ) {
        let report = run(
            export_text(&rows).as_bytes(),
            scanned_text(&scans).as_bytes(),
            &selected,
        ).unwrap();
        let reparsed = load_table(&report.csv[..], b',').unwrap();
        prop_assert_eq!(reparsed, report.reconciliation.missing);
    }
}
