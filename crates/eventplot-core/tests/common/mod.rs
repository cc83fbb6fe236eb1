// File: crates/eventplot-core/tests/common/mod.rs
// Summary: Builds small tracking workbooks in memory for the integration tests.

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;

pub const BUSINESS_DAYS_HEADER: [&str; 6] =
    ["Datum", "Event", "Achieved", "Completion", "Accounts Invited", "Remaining Business Days"];
pub const END_DATE_HEADER: [&str; 6] = ["Datum", "Event", "Achieved", "Completion", "Accounts Invited", "Enddate"];

#[derive(Clone, Debug)]
pub enum Cell {
    Text(String),
    Num(f64),
    Empty,
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s.to_string()) }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Num(v) }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self { Cell::Num(v as f64) }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self { v.map(Cell::Num).unwrap_or(Cell::Empty) }
}

/// One sheet: name, header row, data rows.
pub struct SheetFixture<'a> {
    pub name: &'a str,
    pub header: &'a [&'a str],
    pub rows: Vec<Vec<Cell>>,
}

pub fn workbook(sheets: &[SheetFixture<'_>]) -> Vec<u8> {
    let mut wb = Workbook::new();
    for sheet in sheets {
        let ws = wb.add_worksheet();
        ws.set_name(sheet.name).expect("sheet name");
        for (c, h) in sheet.header.iter().enumerate() {
            ws.write_string(0, c as u16, *h).expect("header");
        }
        for (r, row) in sheet.rows.iter().enumerate() {
            let r = r as u32 + 1;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Cell::Text(s) => {
                        ws.write_string(r, c, s.as_str()).expect("text cell");
                    }
                    Cell::Num(v) => {
                        ws.write_number(r, c, *v).expect("number cell");
                    }
                    Cell::Empty => {}
                }
            }
        }
    }
    wb.save_to_buffer().expect("save workbook")
}

/// Single "Sheet2" with the business-days schema.
pub fn tracking_workbook(rows: Vec<Vec<Cell>>) -> Vec<u8> {
    workbook(&[SheetFixture { name: "Sheet2", header: &BUSINESS_DAYS_HEADER, rows }])
}

pub fn row(date: &str, event: &str, achieved: Option<f64>, completion: f64, invited: f64, days: i32) -> Vec<Cell> {
    vec![date.into(), event.into(), achieved.into(), completion.into(), invited.into(), days.into()]
}

/// Two events: "Launch" with five complete rows (target 20) and "Renewal" with three rows,
/// one of them missing the achieved count.
pub fn launch_and_renewal() -> Vec<u8> {
    tracking_workbook(vec![
        row("2024-03-01", "Launch", Some(10.0), 0.5, 20.0, 10),
        row("2024-03-01", "Renewal", Some(4.0), 0.2, 10.0, 20),
        row("2024-03-04", "Launch", Some(20.0), 0.5, 35.0, 9),
        row("2024-03-05", "Launch", Some(30.0), 0.5, 50.0, 8),
        row("2024-03-04", "Renewal", None, 0.2, 12.0, 19),
        row("2024-03-06", "Launch", Some(45.0), 0.5, 65.0, 7),
        row("2024-03-07", "Launch", Some(55.0), 0.5, 80.0, 6),
        row("2024-03-05", "Renewal", Some(9.0), 0.2, 14.0, 18),
    ])
}
