//! End-to-end command tests over temporary directories

use doi_reconcile::{Location, MissingReason, SourceRow};
use doi_tasks::commands::{
    identifiers_in_order, run_export_listing, run_inventory, run_partition, run_remaining,
    run_validated, scan_sources, MALFORMED_REPORT,
};
use doi_tasks::Config;
use serde_json::{json, Value};
use std::path::Path;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Two exports sharing one DOI, plus a blank cell and a file without the column
fn exports(dir: &Path) {
    write(
        &dir.join("a.csv"),
        "TI,DOI\nA,10.1016/x1\nB,\nC,10.3390/y1\n",
    );
    write(
        &dir.join("b.csv"),
        "TI,DOI\nD,https://doi.org/10.1016/x1\nE,10.1016/x2\nF,10.1039/z1\n",
    );
    write(&dir.join("c.csv"), "TI,YEAR\nG,2020\n");
}

#[test]
fn test_inventory() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    exports(input.path());

    let report = run_inventory(&Config::default(), input.path(), output.path()).unwrap();
    assert_eq!(report.rows_processed, 6);
    assert_eq!(report.valid, 5);
    assert_eq!(report.unique, 4);
    assert_eq!(report.duplicate_kinds, 1);
    assert_eq!(report.missing, 1);
    assert_eq!(report.failed_sources, 1);

    assert_eq!(
        read_json(&output.path().join("all_unique_dois.json")),
        json!(["10.1016/x1", "10.1016/x2", "10.1039/z1", "10.3390/y1"])
    );
    assert_eq!(
        read_json(&output.path().join("duplicate_dois_report.json")),
        json!({"10.1016/x1": [{"file": "a.csv", "row": 2}, {"file": "b.csv", "row": 2}]})
    );
    assert_eq!(
        read_json(&output.path().join("missing_dois_report.json")),
        json!([{"file": "a.csv", "row": 3, "reason": "blank"}])
    );
    assert_eq!(read_json(&output.path().join(MALFORMED_REPORT)), json!([]));
}

#[test]
fn test_inventory_reports_identifiers_without_prefix() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(&input.path().join("a.csv"), "DOI\n/orphan\n10.2/b\n");

    let report = run_inventory(&Config::default(), input.path(), output.path()).unwrap();
    assert_eq!(report.valid, 2);
    assert_eq!(report.malformed, 1);

    let malformed = read_json(&output.path().join(MALFORMED_REPORT));
    assert_eq!(malformed.as_array().unwrap().len(), 1);
    assert_eq!(malformed[0]["doi"], "/orphan");
}

#[test]
fn test_inventory_reads_workbooks() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "TI").unwrap();
    sheet.write_string(0, 1, "DOI").unwrap();
    sheet.write_string(1, 0, "A").unwrap();
    sheet.write_string(1, 1, "10.1016/x1").unwrap();
    sheet.write_string(2, 0, "B").unwrap();
    sheet.write_string(2, 1, "10.1016/x2").unwrap();
    workbook.save(input.path().join("savedrecs.xlsx")).unwrap();
    // a Web of Science text export saved under a workbook extension
    write(
        &input.path().join("savedrecs(1).xls"),
        "PT\tTI\tDOI\nJ\tC\t10.1016/x1\n",
    );

    let report = run_inventory(&Config::default(), input.path(), output.path()).unwrap();
    assert_eq!(report.rows_processed, 3);
    assert_eq!(report.unique, 2);
    assert_eq!(report.failed_sources, 0);
    assert_eq!(
        read_json(&output.path().join("duplicate_dois_report.json")),
        json!({"10.1016/x1": [
            {"file": "savedrecs(1).xls", "row": 2},
            {"file": "savedrecs.xlsx", "row": 2}
        ]})
    );
}

#[test]
fn test_unreadable_workbook_is_counted_as_failed() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(&input.path().join("savedrecs.xls"), "not,a,doi,export\n1,2,3,4\n");

    let report = run_inventory(&Config::default(), input.path(), output.path()).unwrap();
    assert_eq!(report.rows_processed, 0);
    assert_eq!(report.failed_sources, 1);
}

#[test]
fn test_parallel_scan_matches_file_order() {
    let input = tempfile::tempdir().unwrap();
    exports(input.path());
    let config = Config::default();
    let normalizer = config.normalizer().unwrap();

    let scan = scan_sources(input.path(), &config, &normalizer).unwrap();
    let keys: Vec<&str> = scan
        .collected
        .collection
        .identifiers()
        .map(|id| id.key().as_str())
        .collect();
    assert_eq!(keys, vec!["10.1016/x1", "10.3390/y1", "10.1016/x2", "10.1039/z1"]);
    assert_eq!(scan.files, 3);
}

#[test]
fn test_partition_with_exclusion() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    exports(input.path());
    let downloaded = output.path().join("downloaded.json");
    write(&downloaded, r#"["10.1039/z1"]"#);

    let outcome = run_partition(
        &Config::default(),
        input.path(),
        output.path(),
        Some(&downloaded),
    )
    .unwrap();
    assert_eq!(outcome.excluded, 1);
    assert_eq!(outcome.groups, 2);
    assert_eq!(outcome.batch_files, 2);

    assert_eq!(
        read_json(&output.path().join("validator_index.json")),
        json!([
            {"validator": "10.1016", "count": 2, "doi": "https://doi.org/10.1016/x1"},
            {"validator": "10.3390", "count": 1, "doi": "https://doi.org/10.3390/y1"}
        ])
    );
    assert_eq!(
        read_json(&output.path().join("tasks").join("task_10.1016.json")),
        json!([
            {"doi": "https://doi.org/10.1016/x1", "validator": "10.1016"},
            {"doi": "https://doi.org/10.1016/x2", "validator": "10.1016"}
        ])
    );
    assert!(!output.path().join("tasks").join("task_10.1039.json").exists());
}

#[test]
fn test_partition_index_uses_resolver_form() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write(
        &input.path().join("mixed.csv"),
        "DOI\nDOI: 10.1/a\n10.2/b\nHTTPS://DOI.ORG/10.3/c\n/orphan\n",
    );

    let outcome = run_partition(&Config::default(), input.path(), output.path(), None).unwrap();
    assert_eq!(outcome.report.malformed, 1);
    assert_eq!(
        read_json(&output.path().join("validator_index.json")),
        json!([
            {"validator": "10.1", "count": 1, "doi": "https://doi.org/10.1/a"},
            {"validator": "10.2", "count": 1, "doi": "https://doi.org/10.2/b"},
            {"validator": "10.3", "count": 1, "doi": "https://doi.org/10.3/c"}
        ])
    );
    assert_eq!(
        read_json(&output.path().join("tasks").join("task_10.1.json")),
        json!([{"doi": "https://doi.org/10.1/a", "validator": "10.1"}])
    );
    assert_eq!(read_json(&output.path().join(MALFORMED_REPORT))[0]["doi"], "/orphan");
}

#[test]
fn test_partition_split_batches_from_config() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    exports(input.path());
    let config = Config::from_toml("[partition]\nmax_batch_size = 1\n").unwrap();

    let outcome = run_partition(&config, input.path(), output.path(), None).unwrap();
    assert_eq!(outcome.batch_files, 4);
    let tasks = output.path().join("tasks");
    assert!(tasks.join("task_10.1016_part1.json").exists());
    assert!(tasks.join("task_10.1016_part2.json").exists());
    assert!(tasks.join("task_10.3390.json").exists());
}

#[test]
fn test_remaining_keeps_manifest_order() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = dir.path().join("task_10.3390.json");
    write(
        &tasks,
        r#"[
            {"doi": "https://doi.org/10.3390/c", "validator": "10.3390"},
            {"doi": "https://doi.org/10.3390/a", "validator": "10.3390"},
            {"doi": "https://doi.org/10.3390/b", "validator": "10.3390"}
        ]"#,
    );
    let downloaded = dir.path().join("exported.json");
    write(&downloaded, r#"["10.3390/a", " 10.9999/q "]"#);
    let output = dir.path().join("remaining_tasks.json");

    let outcome = run_remaining(&Config::default(), &tasks, &downloaded, &output).unwrap();
    assert_eq!(outcome.tasks, 3);
    assert_eq!(outcome.downloaded, 2);
    assert_eq!(outcome.remaining, 2);
    assert_eq!(outcome.unusable, 0);
    assert_eq!(
        read_json(&output),
        json!([
            {"doi": "https://doi.org/10.3390/c", "validator": "10.3390"},
            {"doi": "https://doi.org/10.3390/b", "validator": "10.3390"}
        ])
    );
}

#[test]
fn test_validated_follows_download_order() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    exports(input.path());
    let downloaded = out.path().join("dl.json");
    write(
        &downloaded,
        r#"["10.1039/z1", "10.5555/gone", "10.1016/x1", ""]"#,
    );
    let output = out.path().join("downloaded_doi.json");

    let kept = run_validated(&Config::default(), &downloaded, input.path(), &output).unwrap();
    assert_eq!(kept, 2);
    assert_eq!(read_json(&output), json!(["10.1039/z1", "10.1016/x1"]));
}

#[test]
fn test_unusable_downloaded_entries_keep_their_rows() {
    let normalizer = Config::default().normalizer().unwrap();
    let rows = SourceRow::numbered("dl.json", ["10.1/a", "pending", "10.1/a", ""]);

    let (identifiers, missing) = identifiers_in_order(&normalizer, rows);
    assert_eq!(identifiers.len(), 2);
    assert_eq!(missing.len(), 2);
    assert_eq!(missing[0].location, Location::new("dl.json", 2));
    assert_eq!(
        missing[0].reason,
        MissingReason::Unusable {
            raw: "pending".into()
        }
    );
    assert_eq!(missing[1].location, Location::new("dl.json", 4));
    assert_eq!(missing[1].reason, MissingReason::Blank);
}

#[test]
fn test_export_listing() {
    let dir = tempfile::tempdir().unwrap();
    let listing = dir.path().join("bucket.txt");
    write(
        &listing,
        "10.3390/b/_.html.gz\n10.1016/a/_.html.gz\n10.1016/a/_.html.gz\nlogs/run.txt\n",
    );
    let output = dir.path().join("exported.json");

    let count = run_export_listing(&Config::default(), &listing, &output).unwrap();
    assert_eq!(count, 2);
    assert_eq!(read_json(&output), json!(["10.1016/a", "10.3390/b"]));
}

#[test]
fn test_missing_input_dir_is_an_error() {
    let output = tempfile::tempdir().unwrap();
    assert!(run_inventory(
        &Config::default(),
        Path::new("/nonexistent/exports"),
        output.path()
    )
    .is_err());
}
