//! Spreadsheet parsing.
//!
//! Loads the first worksheet of an XLSX upload into a [`TabularDataset`]:
//! the first row becomes the column names, the remaining rows become cells,
//! both in file order.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{Error, Result};
use crate::models::{Cell, TabularDataset};

pub fn load_table(bytes: &[u8]) -> Result<TabularDataset> {
    let cursor = Cursor::new(bytes);
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| Error::UnreadableTable(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::UnreadableTable("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| Error::UnreadableTable(e.to_string()))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| Error::UnreadableTable(format!("sheet {} is empty", sheet)))?;

    let columns: Vec<String> = header.iter().map(|d| to_cell(d).to_string()).collect();
    let data: Vec<Vec<Cell>> = rows.map(|row| row.iter().map(to_cell).collect()).collect();

    tracing::debug!(sheet = %sheet, columns = columns.len(), rows = data.len(), "loaded table");

    Ok(TabularDataset {
        columns,
        rows: data,
    })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Float(*f),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("{:?}", e)),
    }
}
