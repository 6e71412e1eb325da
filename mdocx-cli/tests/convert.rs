use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn convert_markdown_to_html_on_stdout() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "# Hello\n\nSome **bold** text.\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg("convert").arg(&input).arg("--to").arg("html");

    let output_pred = predicate::str::contains("<h1>Hello</h1>")
        .and(predicate::str::contains("<strong>bold</strong>"))
        .and(predicate::str::contains("<!DOCTYPE html>"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn convert_without_explicit_subcommand() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "plain paragraph\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input).arg("--to").arg("html");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("<p>plain paragraph</p>"));
}

#[test]
fn convert_to_json_reports_blocks_in_order() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "## Title\n\nHello\n\n- item\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input).arg("--to").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["dialect"], "general");
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0]["type"], "heading");
    assert_eq!(blocks[0]["level"], 2);
    assert_eq!(blocks[1]["type"], "paragraph");
    assert_eq!(blocks[2]["type"], "bullet");
}

#[test]
fn dialect_flag_changes_the_parse() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "- a\n  - b\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input).arg("--to").arg("json").arg("--dialect").arg("office");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["dialect"], "office");
    // The office profile keeps lists flat.
    assert_eq!(json["blocks"][1]["indent"], 0);
}

#[test]
fn docx_output_is_written_with_appended_extension() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "# Report\n\nbody text\n");
    let out_base = dir.path().join("report");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input)
        .arg("--to")
        .arg("docx")
        .arg("-o")
        .arg(&out_base);

    cmd.assert().success();

    let out_path = dir.path().join("report.docx");
    let bytes = fs::read(&out_path).unwrap();
    // OOXML documents are zip archives.
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn docx_to_stdout_is_refused() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "content\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input).arg("--to").arg("docx");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("require an output file"));
}

#[test]
fn empty_input_is_refused_before_rendering() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "empty.md", "  \n\t\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input).arg("--to").arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn unknown_renderer_is_an_error() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "content\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input).arg("--to").arg("rtf");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Renderer 'rtf' not found"));
}

#[test]
fn unknown_template_is_an_error() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "doc.md", "content\n");

    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg(&input)
        .arg("--to")
        .arg("html")
        .arg("--template")
        .arg("fancy");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown template 'fancy'"));
}

#[test]
fn list_renderers_shows_the_built_ins() {
    let mut cmd = cargo_bin_cmd!("mdocx");
    cmd.arg("--list-renderers");

    let output_pred = predicate::str::contains("docx")
        .and(predicate::str::contains("html"))
        .and(predicate::str::contains("json"))
        .and(predicate::str::contains("academic"))
        .and(predicate::str::contains("minimal"));

    cmd.assert().success().stdout(output_pred);
}
