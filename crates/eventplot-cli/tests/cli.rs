// File: crates/eventplot-cli/tests/cli.rs
// Purpose: Run the `eventplot` binary against small workbooks and check files, output, and exit status.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use rust_xlsxwriter::Workbook;

const HEADER: [&str; 6] = ["Datum", "Event", "Achieved", "Completion", "Accounts Invited", "Remaining Business Days"];

/// (date, event, achieved, completion, invited, remaining business days)
type Row<'a> = (&'a str, &'a str, f64, f64, f64, f64);

fn write_workbook(dir: &Path, sheet: &str, rows: &[Row<'_>]) -> PathBuf {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name(sheet).expect("sheet name");
    for (c, h) in HEADER.iter().enumerate() {
        ws.write_string(0, c as u16, *h).expect("header");
    }
    for (r, (date, event, achieved, completion, invited, days)) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        ws.write_string(r, 0, *date).expect("date");
        ws.write_string(r, 1, *event).expect("event");
        ws.write_number(r, 2, *achieved).expect("achieved");
        ws.write_number(r, 3, *completion).expect("completion");
        ws.write_number(r, 4, *invited).expect("invited");
        ws.write_number(r, 5, *days).expect("days");
    }
    let path = dir.join("tracking.xlsx");
    wb.save(&path).expect("save workbook");
    path
}

fn two_events(dir: &Path) -> PathBuf {
    write_workbook(
        dir,
        "Sheet2",
        &[
            ("2024-03-01", "Launch", 10.0, 0.5, 20.0, 10.0),
            ("2024-03-04", "Launch", 20.0, 0.5, 35.0, 9.0),
            ("2024-03-01", "Renewal", 4.0, 0.2, 10.0, 20.0),
            ("2024-03-05", "Renewal", 9.0, 0.2, 14.0, 18.0),
        ],
    )
}

fn eventplot() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("eventplot"))
}

fn pngs_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read out dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

fn zip_entries(path: &Path) -> Vec<String> {
    let bytes = std::fs::read(path).expect("read zip");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len()).map(|i| archive.by_index(i).expect("entry").name().to_string()).collect()
}

#[test]
fn generate_writes_images_and_archive() {
    let tmp = tempfile::tempdir().unwrap();
    let input = two_events(tmp.path());
    let out = tmp.path().join("plots");

    let assert = eventplot().arg("generate").arg(&input).arg("--out").arg(&out).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("2 of 2 events rendered"), "stdout:\n{stdout}");

    assert_eq!(pngs_in(&out), ["Launch_plot.png", "Renewal_plot.png"]);
    assert_eq!(zip_entries(&out.join("plots.zip")), ["Launch_plot.png", "Renewal_plot.png"]);
    assert!(!out.join("report.csv").exists());
}

#[test]
fn no_images_writes_only_archive() {
    let tmp = tempfile::tempdir().unwrap();
    let input = two_events(tmp.path());
    let out = tmp.path().join("zip-only");

    eventplot().arg("generate").arg(&input).arg("--out").arg(&out).arg("--no-images").assert().success();

    assert!(pngs_in(&out).is_empty());
    assert_eq!(zip_entries(&out.join("plots.zip")).len(), 2);
}

#[test]
fn report_flag_writes_csv() {
    let tmp = tempfile::tempdir().unwrap();
    let input = two_events(tmp.path());
    let out = tmp.path().join("plots");

    eventplot().arg("generate").arg(&input).arg("-o").arg(&out).arg("--report").assert().success();

    let csv = std::fs::read_to_string(out.join("report.csv")).expect("report written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "event,status,rows,usable_rows,completion_target,end_date,file,error");
    assert!(lines[1].starts_with("Launch,rendered,2,2,20,"), "{}", lines[1]);
    assert!(lines[2].starts_with("Renewal,rendered,2,2,20,"), "{}", lines[2]);
}

#[test]
fn file_level_errors_fail_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("plots");

    let csv = tmp.path().join("tracking.csv");
    std::fs::write(&csv, "Datum,Event\n").unwrap();
    eventplot().arg("generate").arg(&csv).arg("--out").arg(&out).assert().failure();

    let input = two_events(tmp.path());
    let assert = eventplot()
        .arg("generate")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--sheet")
        .arg("Missing")
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("Missing"), "stderr:\n{stderr}");

    assert!(!out.join("plots.zip").exists());
}

#[test]
fn no_rendered_chart_is_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("plots");

    // only event has zero completion on its first row
    let input = write_workbook(tmp.path(), "Sheet2", &[("2024-03-01", "Broken", 10.0, 0.0, 20.0, 5.0)]);
    let assert = eventplot().arg("generate").arg(&input).arg("--out").arg(&out).assert().failure();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("0 of 1 events rendered"), "stdout:\n{stdout}");
    assert!(stdout.contains("failed: event 'Broken'"), "stdout:\n{stdout}");
}

#[test]
fn empty_sheet_is_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("plots");
    let input = write_workbook(tmp.path(), "Sheet2", &[]);

    let assert = eventplot().arg("generate").arg(&input).arg("--out").arg(&out).assert().failure();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("0 of 0 events rendered"), "stdout:\n{stdout}");
}

#[test]
fn names_differing_by_case_write_one_image() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("plots");
    let input = write_workbook(
        tmp.path(),
        "Sheet2",
        &[
            ("2024-03-01", "Launch", 10.0, 0.5, 20.0, 10.0),
            ("2024-03-01", "launch", 12.0, 0.5, 22.0, 10.0),
        ],
    );

    let assert = eventplot().arg("generate").arg(&input).arg("--out").arg(&out).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("skipped launch_plot.png"), "stdout:\n{stdout}");

    assert_eq!(pngs_in(&out), ["Launch_plot.png"]);
    assert_eq!(zip_entries(&out.join("plots.zip")), ["Launch_plot.png", "launch_plot.png"]);
}

#[test]
fn inspect_prints_one_line_per_event() {
    let tmp = tempfile::tempdir().unwrap();
    let input = two_events(tmp.path());

    let assert = eventplot().arg("inspect").arg(&input).assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.starts_with("2 events (business-days schema)"), "stdout:\n{stdout}");
    let event_lines: Vec<&str> = stdout.lines().filter(|l| l.contains("rows=")).collect();
    assert_eq!(event_lines.len(), 2, "stdout:\n{stdout}");
    assert!(event_lines[0].trim_start().starts_with("Launch"));
    assert!(event_lines[0].contains("target=20"));
    assert!(event_lines[1].trim_start().starts_with("Renewal"));
}
