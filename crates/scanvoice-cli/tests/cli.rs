use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

/// The binary with user configuration isolated under `home`.
fn scanvoice(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scanvoice").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home)
        .arg("--scratch-dir")
        .arg(home.join("scratch"))
        .arg("--output-dir")
        .arg(home.join("csv"));
    cmd
}

const INVOICE_TEXT: &str = "\
--- Page 1 ---
PO Number: 4521
Qty: 10
Unit Price: 5.00
Net Amount: 50.00
--- Page 2 ---
Due Date: 12-Jan-24
";

#[test]
fn batch_reports_failures_and_exits_zero() {
    let home = tempfile::tempdir().unwrap();
    let input = home.path().join("invoices");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("broken.pdf"), b"not a pdf at all").unwrap();

    scanvoice(home.path())
        .arg("batch")
        .arg(&input)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 PDF files"))
        .stdout(predicate::str::contains("Failed:"))
        .stdout(predicate::str::contains("broken.pdf"));

    assert!(!home.path().join("csv").join("broken_extracted.csv").exists());

    let summary = fs::read_to_string(home.path().join("csv").join("summary.csv")).unwrap();
    assert!(summary.starts_with("document,status,stage,output,error,processing_time_ms"));
    assert!(summary.contains("failed,rasterizing"));
}

#[test]
fn batch_missing_directory_is_not_an_error() {
    let home = tempfile::tempdir().unwrap();

    scanvoice(home.path())
        .arg("batch")
        .arg(home.path().join("nowhere"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Input directory not found"));
}

#[test]
fn batch_with_broken_config_still_exits_zero() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("broken.json");
    fs::write(&config, "{ not json").unwrap();

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .arg("batch")
        .arg(home.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Batch could not start"));
}

#[test]
fn process_unreadable_document_fails() {
    let home = tempfile::tempdir().unwrap();
    let source = home.path().join("broken.pdf");
    fs::write(&source, b"%PDF- truncated").unwrap();

    scanvoice(home.path())
        .arg("process")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rasterizing"));

    assert!(!home.path().join("csv").join("broken_extracted.csv").exists());
}

#[test]
fn process_missing_document_fails() {
    let home = tempfile::tempdir().unwrap();

    scanvoice(home.path())
        .arg("process")
        .arg(home.path().join("missing.pdf"))
        .assert()
        .failure();
}

#[test]
fn extract_writes_csv() {
    let home = tempfile::tempdir().unwrap();
    let text = home.path().join("invoice.txt");
    let output = home.path().join("out.csv");
    fs::write(&text, INVOICE_TEXT).unwrap();

    scanvoice(home.path())
        .arg("extract")
        .arg(&text)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Data extracted and saved to"))
        .stdout(predicate::str::contains("PO Number: 4521"));

    let csv = fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("Vendor Name,PO Number"));
    let row = lines.next().unwrap();
    assert!(row.contains("4521"));
    assert!(row.contains("12-Jan-24"));
    assert!(lines.next().is_none());
}

#[test]
fn extract_json_to_stdout() {
    let home = tempfile::tempdir().unwrap();
    let text = home.path().join("invoice.txt");
    fs::write(&text, INVOICE_TEXT).unwrap();

    scanvoice(home.path())
        .arg("extract")
        .arg(&text)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""PO Number": "4521""#))
        .stdout(predicate::str::contains(r#""Net Amount": "50.00""#));
}

#[test]
fn extract_flags_arithmetic_mismatch() {
    let home = tempfile::tempdir().unwrap();
    let text = home.path().join("invoice.txt");
    fs::write(&text, INVOICE_TEXT.replace("50.00", "40.00")).unwrap();

    scanvoice(home.path())
        .arg("extract")
        .arg(&text)
        .arg("--format")
        .arg("text")
        .assert()
        .success()
        .stderr(predicate::str::contains("differs from Net Amount"));
}

#[test]
fn config_init_then_get() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("scanvoice.json");

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "pdf.render_dpi", "150"])
        .assert()
        .success();

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "pdf.render_dpi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("150"));

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure();
}

#[test]
fn config_show_and_path_without_file() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("absent.json");

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""render_dpi": 300"#));

    scanvoice(home.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("absent.json"))
        .stdout(predicate::str::contains("defaults in use"));
    assert!(!config.exists());
}
