//! Series table output.
//!
//! Undefined cells are written as empty CSV fields and JSON `null`.

use serde_json::{Map, Value};
use std::io::Write;
use techind_core::error::DataError;
use techind_core::numeric::Cell;
use techind_core::types::SeriesTable;

/// Name of the leading row-label column.
fn index_header(table: &SeriesTable) -> &'static str {
    if table.timestamps().is_some() {
        "timestamp"
    } else {
        "index"
    }
}

fn row_label(table: &SeriesTable, row: usize) -> i64 {
    table
        .timestamps()
        .map(|ts| ts[row])
        .unwrap_or(row as i64)
}

/// Write the table as CSV, one row per table row.
pub fn write_csv<W: Write>(table: &SeriesTable, writer: W) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_writer(writer);
    let names = table.column_names();
    let columns: Vec<&[Cell]> = names
        .iter()
        .map(|name| table.require(name))
        .collect::<Result<_, _>>()
        .map_err(|e| DataError::WriteError(e.to_string()))?;

    let mut header = Vec::with_capacity(names.len() + 1);
    header.push(index_header(table).to_string());
    header.extend(names.iter().cloned());
    writer
        .write_record(&header)
        .map_err(|e| DataError::WriteError(e.to_string()))?;

    for row in 0..table.len() {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(row_label(table, row).to_string());
        record.extend(
            columns
                .iter()
                .map(|c| c[row].map(|v| v.to_string()).unwrap_or_default()),
        );
        writer
            .write_record(&record)
            .map_err(|e| DataError::WriteError(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Convert the table to a JSON array of row objects.
pub fn to_json_records(table: &SeriesTable) -> Value {
    let names = table.column_names();
    let label = index_header(table);

    let records = (0..table.len())
        .map(|row| {
            let mut record = Map::new();
            record.insert(label.to_string(), Value::from(row_label(table, row)));
            for name in &names {
                let cell = table.value(name, row);
                record.insert(name.clone(), cell.map(Value::from).unwrap_or(Value::Null));
            }
            Value::Object(record)
        })
        .collect();

    Value::Array(records)
}

/// Write the table as pretty-printed JSON records.
pub fn write_json<W: Write>(table: &SeriesTable, writer: W) -> Result<(), DataError> {
    serde_json::to_writer_pretty(writer, &to_json_records(table))
        .map_err(|e| DataError::WriteError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use techind_core::types::{Candle, ColumnKey};

    fn table() -> SeriesTable {
        let candles = vec![
            Candle::new(1000, 1.0, 2.0, 0.5, 1.5, 10.0),
            Candle::new(2000, 1.5, 2.5, 1.0, 2.0, 20.0),
        ];
        let mut table = SeriesTable::from_candles(&candles);
        table
            .insert(ColumnKey::Rci { period: 2 }, vec![None, Some(100.0)])
            .unwrap();
        table
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "timestamp,open,high,low,close,volume,rci_2");
        assert_eq!(lines[1], "1000,1,2,0.5,1.5,10,");
        assert_eq!(lines[2], "2000,1.5,2.5,1,2,20,100");
    }

    #[test]
    fn test_write_csv_without_timestamps() {
        let table = SeriesTable::from_columns([("close", vec![3.0])]).unwrap();
        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "index,close\n0,3\n");
    }

    #[test]
    fn test_json_records() {
        let json = to_json_records(&table());
        let rows = json.as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["timestamp"], 1000);
        assert!(rows[0]["rci_2"].is_null());
        assert_eq!(rows[1]["rci_2"], 100.0);
    }
}
