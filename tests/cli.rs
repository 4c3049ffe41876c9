//! End-to-end tests for the `fqa` binary.
//!
//! Exercises the spreadsheet lookup path, the loader error paths, and the
//! dispatch rules with minimal handcrafted fixtures. The QA capability is
//! left unconfigured — everything tested here must work without it.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn fqa_binary() -> std::path::PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.push("fqa");
    path
}

fn run_fqa(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = fqa_binary();
    let output = Command::new(&binary)
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run fqa: {}", e));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Minimal XLSX: Year/Revenue/Expenses over two numeric rows.
fn minimal_xlsx() -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#,
        )
        .unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        )
        .unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
        )
        .unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
        )
        .unwrap();

        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1">
<c r="A1" t="inlineStr"><is><t>Year</t></is></c>
<c r="B1" t="inlineStr"><is><t>Revenue</t></is></c>
<c r="C1" t="inlineStr"><is><t>Expenses</t></is></c>
</row>
<row r="2"><c r="A2"><v>2020</v></c><c r="B2"><v>500</v></c><c r="C2"><v>300</v></c></row>
<row r="3"><c r="A3"><v>2021</v></c><c r="B3"><v>620</v></c><c r="C3"><v>410</v></c></row>
</sheetData>
</worksheet>"#,
        )
        .unwrap();

        zip.finish().unwrap();
    }
    buf
}

/// Minimal valid PDF whose single page has an empty content stream — it
/// parses, but no text can be extracted (the scanned-report case).
/// Builds body then xref with correct byte offsets.
fn textless_pdf() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let o1 = out.len();
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");
    let o2 = out.len();
    out.extend_from_slice(b"2 0 obj << /Type /Pages /Kids [3 0 R] /Count 1 >> endobj\n");
    let o3 = out.len();
    out.extend_from_slice(
        b"3 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << >> >> endobj\n",
    );
    let o4 = out.len();
    out.extend_from_slice(b"4 0 obj << /Length 0 >> stream\n\nendstream endobj\n");
    let xref_start = out.len();
    out.extend_from_slice(b"xref\n0 5\n");
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    out.extend_from_slice(format!("{:010} 00000 n \n", o1).as_bytes());
    out.extend_from_slice(format!("{:010} 00000 n \n", o2).as_bytes());
    out.extend_from_slice(format!("{:010} 00000 n \n", o3).as_bytes());
    out.extend_from_slice(format!("{:010} 00000 n \n", o4).as_bytes());
    out.extend_from_slice(b"trailer << /Size 5 /Root 1 0 R >>\nstartxref\n");
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}

#[test]
fn xlsx_lookup_answers_without_any_capability() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("q3.xlsx"), minimal_xlsx()).unwrap();

    let (stdout, stderr, success) = run_fqa(
        tmp.path(),
        &["ask", "q3.xlsx", "Tell me about Revenue in 2020"],
    );
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(
        stdout.contains("Revenue in 2020: 500"),
        "expected the lookup answer, got: {}",
        stdout
    );
}

#[test]
fn xlsx_lookup_with_no_match_reports_none() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("q3.xlsx"), minimal_xlsx()).unwrap();

    let (stdout, _, success) = run_fqa(tmp.path(), &["ask", "q3.xlsx", "xyz"]);
    assert!(success);
    assert!(
        stdout.contains("Best match: None, but no exact data found."),
        "expected the universal fallback, got: {}",
        stdout
    );
}

#[test]
fn unsupported_extension_is_rejected_before_any_stage() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.csv"), b"Year,Revenue\n2020,500\n").unwrap();

    let (stdout, stderr, success) = run_fqa(tmp.path(), &["ask", "notes.csv", "revenue in 2020"]);
    assert!(!success, "csv must be rejected, got stdout: {}", stdout);
    assert!(
        stderr.contains("unsupported file type"),
        "expected the unsupported-type message, got: {}",
        stderr
    );
}

#[test]
fn extract_previews_the_parsed_table() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("q3.xlsx"), minimal_xlsx()).unwrap();

    let (stdout, _, success) = run_fqa(tmp.path(), &["extract", "q3.xlsx"]);
    assert!(success);
    assert!(stdout.contains("Year | Revenue | Expenses"), "{}", stdout);
    assert!(stdout.contains("2020 | 500 | 300"), "{}", stdout);
}

#[test]
fn corrupt_pdf_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.pdf"), b"not a valid pdf").unwrap();

    let (_, stderr, success) = run_fqa(tmp.path(), &["ask", "bad.pdf", "what was revenue?"]);
    assert!(!success);
    assert!(
        stderr.contains("could not parse PDF"),
        "expected a parse error, got: {}",
        stderr
    );
}

#[test]
fn textless_pdf_reports_no_text_and_skips_qa() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("scan.pdf"), textless_pdf()).unwrap();

    let (_, stderr, success) = run_fqa(tmp.path(), &["ask", "scan.pdf", "what was revenue?"]);
    assert!(!success);
    // The loader fails first, so the disabled-capability error never appears.
    assert!(
        stderr.contains("no text found in the report"),
        "expected the no-text message, got: {}",
        stderr
    );
    assert!(!stderr.contains("question answering is disabled"));
}

#[test]
fn summarize_requires_a_pdf_report() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("q3.xlsx"), minimal_xlsx()).unwrap();

    let (_, stderr, success) = run_fqa(tmp.path(), &["summarize", "q3.xlsx"]);
    assert!(!success);
    assert!(
        stderr.contains("requires a PDF report"),
        "expected the report-only message, got: {}",
        stderr
    );
}
