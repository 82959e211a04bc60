//! Integration tests for `enctab_validator::validate_batch`.

use std::fs;
use std::path::PathBuf;

use enctab_validator::{SchemaVersion, validate_batch};
use tempfile::TempDir;

const V3_HEADER: &str =
    "Opcode\tOperand1\tOperand2\tOperand3\tOperand4\tOperandEncoding\tExtra\tForcedPrefix\tSupport";

fn write_table(dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = format!("{V3_HEADER}\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_clean_batch_is_ok() {
    let tmp = TempDir::new().unwrap();
    let paths = vec![
        write_table(
            &tmp,
            "base.tsv",
            &[
                "0F,94/0\trm8\t\t\t\tM\t\t\tV,V",
                "B8+\tr32\timm32\t\t\tOI\t\t\tV,V",
                "F7/3\trm64\t\t\t\tM\tREX.W\t\tV,NE",
            ],
        ),
        write_table(&tmp, "nop.tsv", &["90\t\t\t\t\tZO\t\t\tV,V"]),
    ];

    let report = validate_batch(&paths, &SchemaVersion::V3.schema()).unwrap();
    assert!(report.ok, "unexpected findings: {:?}", report.diagnostics);
    assert_eq!(report.exit_code(), 0);
    assert!(report.files.iter().all(|f| f.clean));
}

#[test]
fn test_single_defective_file_in_batch() {
    let tmp = TempDir::new().unwrap();
    let good_before = write_table(&tmp, "a.tsv", &["90\t\t\t\t\tZO\t\t\tV,V"]);
    let bad = write_table(
        &tmp,
        "b.tsv",
        &["90\t\t\t\t\tXYZ\t\t\tV,V", "91\t\t\t\t\tZO\t\t\tV,V"],
    );
    let good_after = write_table(&tmp, "c.tsv", &["92\t\t\t\t\tZO\t\t\tV,V"]);
    let paths = vec![good_before.clone(), bad.clone(), good_after.clone()];

    let report = validate_batch(&paths, &SchemaVersion::V3.schema()).unwrap();
    assert!(!report.ok);
    assert_eq!(report.exit_code(), 1);

    // Only file b contributes findings, and every finding names it.
    assert_eq!(report.diagnostics_count(), 1);
    assert!(report.diagnostics.iter().all(|d| d.file == bad));

    let clean: Vec<bool> = report.files.iter().map(|f| f.clean).collect();
    assert_eq!(clean, [true, false, true]);
    assert_eq!(report.files[0].path, good_before);
    assert_eq!(report.files[2].path, good_after);
}

#[test]
fn test_header_failure_reports_no_row_findings() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("wrong-header.tsv");
    // Header from an older generation, plus rows invalid under any grammar.
    fs::write(
        &path,
        "Opcode\tOperand1\tOperand2\tOperand3\tOperand4\tModifier\nnot-hex\tbogus\t\t\t\t!!\n",
    )
    .unwrap();

    let report = validate_batch(&[path], &SchemaVersion::V3.schema()).unwrap();
    assert!(!report.ok);
    assert!(
        report
            .diagnostics
            .iter()
            .all(|d| d.message.contains("header")),
        "expected header findings only, got: {:?}",
        report.diagnostics
    );
}

#[test]
fn test_older_generation_file_passes_its_schema() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("legacy.tsv");
    fs::write(
        &path,
        "Opcode\tOperand1\tOperand2\tOperand3\tOperand4\tModifier\tForcedPrefix\n\
         0F,AF\tGv\tEv\t\t\t/r\t\n\
         AC\t$al\tXb\t\t\t\tF3\n",
    )
    .unwrap();

    let report = validate_batch(&[path], &SchemaVersion::V2.schema()).unwrap();
    assert!(report.ok, "unexpected findings: {:?}", report.diagnostics);
}

#[test]
fn test_diagnostics_follow_column_then_row_then_file_order() {
    let tmp = TempDir::new().unwrap();
    let first = write_table(
        &tmp,
        "first.tsv",
        // One row with an opcode finding and a support finding: column order.
        &["GG\t\t\t\t\tZO\t\t\tV,XX"],
    );
    let second = write_table(&tmp, "second.tsv", &["ZZ\t\t\t\t\tZO\t\t\tV,V"]);

    let report = validate_batch(&[first, second], &SchemaVersion::V3.schema()).unwrap();
    let messages: Vec<&str> = report
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("'GG'"));
    assert!(messages[1].contains("legacy Support"));
    assert!(messages[2].contains("'ZZ'"));
}

#[test]
fn test_identical_runs_produce_identical_reports() {
    let tmp = TempDir::new().unwrap();
    let path = write_table(
        &tmp,
        "repeat.tsv",
        &["GG\tbogus\t\t\t\tXYZ\tnope\tZZ\tQ,Q"],
    );
    let paths = vec![path];

    let schema = SchemaVersion::V3.schema();
    let first = validate_batch(&paths, &schema).unwrap();
    let second = validate_batch(&paths, &schema).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unreadable_path_aborts_the_batch() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does_not_exist.tsv");
    let result = validate_batch(&[missing], &SchemaVersion::V3.schema());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("does_not_exist.tsv"));
}
