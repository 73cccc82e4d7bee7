use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};

use crate::error::{DataError, DataResult};

use super::export::parse_csv;
use super::model::{CellValue, Record, Table, CORE_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.db` / `.sqlite` / `.sqlite3` – SQLite database, rows of `table_name`
/// * `.csv` – a previously exported view (`table_name` is ignored)
pub fn load_file(path: &Path, table_name: &str) -> DataResult<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "db" | "sqlite" | "sqlite3" => load_all(path, table_name),
        "csv" => {
            let bytes = std::fs::read(path)?;
            let table = parse_csv(&bytes)?;
            log::info!("Loaded {} rows from {}", table.len(), path.display());
            Ok(table)
        }
        other => Err(DataError::UnsupportedFormat(other.to_string())),
    }
}

/// Open the SQLite store read-only and read every row of `table_name`.
pub fn load_all(path: &Path, table_name: &str) -> DataResult<Table> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| DataError::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let table = load_table(&conn, table_name)?;
    log::info!(
        "Loaded {} rows from {}:{} with columns {:?}",
        table.len(),
        path.display(),
        table_name,
        table.columns()
    );
    Ok(table)
}

/// Read every row of `table_name` (`SELECT *`) from an open connection.
///
/// Rows whose population, area or growth is NULL are skipped: they can never
/// pass a range filter.
pub fn load_table(conn: &Connection, table_name: &str) -> DataResult<Table> {
    let exists: i64 = conn.query_row(
        "SELECT count(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
        [table_name],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(DataError::MissingTable(table_name.to_string()));
    }

    let sql = format!("SELECT * FROM \"{}\"", table_name.replace('"', "\"\""));
    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let missing: Vec<String> = CORE_COLUMNS
        .iter()
        .filter(|core| !columns.iter().any(|c| c == *core))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns {
            table: table_name.to_string(),
            missing,
        });
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut rows = stmt.query([])?;
    let mut row_no = 0usize;

    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(columns.len());
        for idx in 0..columns.len() {
            cells.push(row.get::<_, Value>(idx)?);
        }
        match row_to_record(&columns, cells, row_no)? {
            Some(rec) => records.push(rec),
            None => skipped += 1,
        }
        row_no += 1;
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} rows of '{table_name}' with NULL population, area or growth");
    }

    Ok(Table::new(columns, records))
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

/// `None` when a metric column is NULL.
fn row_to_record(columns: &[String], cells: Vec<Value>, row: usize) -> DataResult<Option<Record>> {
    let mut rec = Record::new(String::new(), String::new(), 0, 0, 0.0);
    let mut extra = BTreeMap::new();

    for (col, cell) in columns.iter().zip(cells) {
        match col.as_str() {
            "name" => rec.name = value_to_text(cell),
            "code" => rec.code = value_to_text(cell),
            "population" => match value_to_count(cell, row, col)? {
                Some(n) => rec.population = n,
                None => return Ok(None),
            },
            "area" => match value_to_count(cell, row, col)? {
                Some(n) => rec.area = n,
                None => return Ok(None),
            },
            "population_growth" => match value_to_percent(cell, row, col)? {
                Some(p) => rec.population_growth = p,
                None => return Ok(None),
            },
            other => {
                extra.insert(other.to_string(), value_to_cell(cell));
            }
        }
    }

    rec.extra = extra;
    Ok(Some(rec))
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::Text(s) => s,
        Value::Integer(i) => i.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
        Value::Null => String::new(),
    }
}

fn value_to_count(value: Value, row: usize, column: &str) -> DataResult<Option<u64>> {
    let invalid = |message: String| DataError::InvalidValue {
        row,
        column: column.to_string(),
        message,
    };
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => u64::try_from(i)
            .map(Some)
            .map_err(|_| invalid(format!("{i} is negative"))),
        Value::Real(v) if v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => Ok(Some(v as u64)),
        Value::Text(s) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| invalid(format!("'{s}' is not a non-negative integer ({e})"))),
        other => Err(invalid(format!("{other:?} is not a non-negative integer"))),
    }
}

fn value_to_percent(value: Value, row: usize, column: &str) -> DataResult<Option<f64>> {
    let invalid = |message: String| DataError::InvalidValue {
        row,
        column: column.to_string(),
        message,
    };
    match value {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(i as f64)),
        Value::Real(v) if v.is_finite() => Ok(Some(v)),
        Value::Real(v) => Err(invalid(format!("{v} is not a finite number"))),
        Value::Text(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(invalid(format!("'{s}' is not a finite number"))),
        },
        Value::Blob(_) => Err(invalid("blob is not a number".to_string())),
    }
}

fn value_to_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Integer(i) => CellValue::Integer(i),
        Value::Real(v) => CellValue::Real(v),
        Value::Text(s) => CellValue::Text(s),
        Value::Blob(b) => CellValue::Text(String::from_utf8_lossy(&b).into_owned()),
    }
}
