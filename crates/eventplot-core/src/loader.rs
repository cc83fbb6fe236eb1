// File: crates/eventplot-core/src/loader.rs
// Summary: Reads the tracking sheet of an .xlsx workbook into typed rows (calamine).
// Notes:
// - Only type coercion happens here. Unparseable dates and numbers become `None`.
// - Header lookup is by exact (trimmed) column name.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx};
use chrono::{Days, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{LoadError, SchemaError};
use crate::record::{
    EndDateSource, Row, RowEnd, SchemaMode, BASE_COLUMNS, COL_ACHIEVED, COL_COMPLETION, COL_DATE,
    COL_END_DATE, COL_EVENT, COL_INVITED, COL_REMAINING_DAYS,
};

/// Rows read from one sheet plus the end-date source the header resolved to.
#[derive(Clone, Debug)]
pub struct LoadedSheet {
    pub source: EndDateSource,
    pub rows: Vec<Row>,
}

/// Load `sheet` from the workbook at `path`. The extension must be `.xlsx`.
pub fn load_path(path: &Path, sheet: &str, mode: SchemaMode) -> Result<LoadedSheet, LoadError> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if !is_xlsx {
        return Err(LoadError::UnsupportedInput { path: path.to_path_buf() });
    }
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), "read workbook");
    load_bytes(&bytes, sheet, mode)
}

/// Load `sheet` from an in-memory .xlsx workbook (e.g. an upload buffer).
pub fn load_bytes(bytes: &[u8], sheet: &str, mode: SchemaMode) -> Result<LoadedSheet, LoadError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
    let available = workbook.sheet_names().to_owned();
    if !available.iter().any(|n| n == sheet) {
        return Err(LoadError::SheetNotFound { name: sheet.to_string(), available });
    }
    let range = workbook.worksheet_range(sheet)?;
    let loaded = rows_from_range(&range, mode)?;
    info!(sheet, rows = loaded.rows.len(), source = %loaded.source, "loaded sheet");
    Ok(loaded)
}

/// Column positions in the header row.
#[derive(Clone, Copy, Debug)]
struct Columns {
    date: usize,
    event: usize,
    achieved: usize,
    completion: usize,
    invited: usize,
    end: usize,
    source: EndDateSource,
}

impl Columns {
    fn resolve(header: &[String], mode: SchemaMode) -> Result<Self, SchemaError> {
        let find = |name: &str| header.iter().position(|h| h == name);

        let source = match mode {
            SchemaMode::BusinessDays => EndDateSource::BusinessDays,
            SchemaMode::EndDate => EndDateSource::Column,
            SchemaMode::Auto => match (find(COL_REMAINING_DAYS), find(COL_END_DATE)) {
                (Some(_), Some(_)) => {
                    return Err(SchemaError::AmbiguousEndDate(COL_REMAINING_DAYS, COL_END_DATE))
                }
                (None, Some(_)) => EndDateSource::Column,
                // neither present: report the business-days column as missing below
                _ => EndDateSource::BusinessDays,
            },
        };

        let missing: Vec<String> = BASE_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once(source.column()))
            .filter(|name| find(name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        // every lookup below succeeded in the check above
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            date: at(COL_DATE),
            event: at(COL_EVENT),
            achieved: at(COL_ACHIEVED),
            completion: at(COL_COMPLETION),
            invited: at(COL_INVITED),
            end: at(source.column()),
            source,
        })
    }

    fn all(&self) -> [usize; 6] {
        [self.date, self.event, self.achieved, self.completion, self.invited, self.end]
    }
}

/// Convert a sheet range (header in its first row) into rows.
pub fn rows_from_range(range: &Range<Data>, mode: SchemaMode) -> Result<LoadedSheet, SchemaError> {
    let mut iter = range.rows();
    let header: Vec<String> = iter
        .next()
        .ok_or(SchemaError::MissingHeader)?
        .iter()
        .map(header_text)
        .collect();
    let cols = Columns::resolve(&header, mode)?;
    debug!(?header, "resolved header");

    let empty = Data::Empty;
    let mut rows = Vec::new();
    for cells in iter {
        let cell = |i: usize| cells.get(i).unwrap_or(&empty);
        if cols.all().iter().all(|&i| is_blank(cell(i))) {
            continue;
        }
        let end = match cols.source {
            EndDateSource::BusinessDays => RowEnd::RemainingBusinessDays(cell_integer(cell(cols.end))),
            EndDateSource::Column => RowEnd::EndDate(cell_date(cell(cols.end))),
        };
        rows.push(Row {
            date: cell_date(cell(cols.date)),
            event: cell_text(cell(cols.event)),
            achieved: cell_number(cell(cols.achieved)),
            completion: cell_number(cell(cols.completion)),
            accounts_invited: cell_number(cell(cols.invited)),
            end,
        });
    }
    Ok(LoadedSheet { source: cols.source, rows })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Event key as text. Numeric keys keep their display form (`7`, not `7.0`).
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

pub fn cell_number(cell: &Data) -> Option<f64> {
    let v = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_number(s)?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }
    // single decimal comma, e.g. "0,5"
    if !s.contains('.') && s.matches(',').count() == 1 {
        return s.replace(',', ".").parse::<f64>().ok();
    }
    None
}

/// Integral numbers only; `3.5` remaining days is treated as missing.
pub fn cell_integer(cell: &Data) -> Option<i64> {
    let v = cell_number(cell)?;
    (v.fract() == 0.0).then_some(v as i64)
}

pub fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => serial_to_date(dt.as_f64()),
        Data::Float(f) => serial_to_date(*f),
        Data::Int(i) => serial_to_date(*i as f64),
        Data::DateTimeIso(s) | Data::String(s) => parse_date_text(s),
        _ => None,
    }
}

/// Excel serial day number (1900 system) to a calendar date.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}

// two-digit years first: `%Y` would otherwise read "24" as the year 24
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d.%m.%y", "%d.%m.%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}
