use std::collections::BTreeMap;
use std::io;

use crate::error::{DataError, DataResult};

use super::model::{CellValue, Record, Table, CORE_COLUMNS};

/// Default download name of the filtered view.
pub const EXPORT_FILE_NAME: &str = "filtered_factbook_data.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// A ready-to-save CSV download.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Serialize `subset` under the table's column header.
pub fn export(table: &Table, subset: &[&Record]) -> DataResult<CsvExport> {
    Ok(CsvExport {
        file_name: EXPORT_FILE_NAME.to_string(),
        mime: EXPORT_MIME,
        bytes: to_csv(table.columns(), subset)?,
    })
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Header row of `columns`, then one row per record in subset order.
pub fn to_csv(columns: &[String], subset: &[&Record]) -> DataResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for rec in subset {
        writer.write_record(columns.iter().map(|col| rec.field_text(col)))?;
    }
    writer
        .into_inner()
        .map_err(|e| DataError::Io(io::Error::new(e.error().kind(), e.to_string())))
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Parse CSV produced by [`to_csv`] (or any CSV with the core columns) back
/// into a table.
///
/// Core columns are parsed with their declared types; every other column is
/// type-guessed per cell. Round-trip through [`to_csv`] is exact for core
/// columns and for numeric or NULL extras; extra text that looks numeric
/// comes back as a number, and empty text comes back as `Null`.
pub fn parse_csv(bytes: &[u8]) -> DataResult<Table> {
    let mut reader = csv::Reader::from_reader(bytes);
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let missing: Vec<String> = CORE_COLUMNS
        .iter()
        .filter(|core| !columns.iter().any(|c| c == *core))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns {
            table: "csv".to_string(),
            missing,
        });
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let mut rec = Record::new(String::new(), String::new(), 0, 0, 0.0);
        let mut extra = BTreeMap::new();

        for (col, value) in columns.iter().zip(row.iter()) {
            match col.as_str() {
                "name" => rec.name = value.to_string(),
                "code" => rec.code = value.to_string(),
                "population" => rec.population = parse_count(value, row_no, col)?,
                "area" => rec.area = parse_count(value, row_no, col)?,
                "population_growth" => rec.population_growth = parse_percent(value, row_no, col)?,
                other => {
                    extra.insert(other.to_string(), CellValue::parse(value));
                }
            }
        }
        rec.extra = extra;
        records.push(rec);
    }

    Ok(Table::new(columns, records))
}

fn parse_count(value: &str, row: usize, column: &str) -> DataResult<u64> {
    value.trim().parse::<u64>().map_err(|e| DataError::InvalidValue {
        row,
        column: column.to_string(),
        message: format!("'{value}' is not a non-negative integer ({e})"),
    })
}

fn parse_percent(value: &str, row: usize, column: &str) -> DataResult<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(DataError::InvalidValue {
            row,
            column: column.to_string(),
            message: format!("'{value}' is not a finite number"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usa() -> Record {
        Record::new("USA", "US", 331_000_000, 9_834_000, 0.4)
    }

    #[test]
    fn single_row_export_has_header_and_one_line() {
        let rec = usa();
        let table = Table::from_records(vec![rec.clone()]);
        let out = export(&table, &[&rec]).unwrap();

        assert_eq!(out.file_name, "filtered_factbook_data.csv");
        assert_eq!(out.mime, "text/csv");
        let text = String::from_utf8(out.bytes).unwrap();
        assert_eq!(
            text,
            "name,code,population,area,population_growth\nUSA,US,331000000,9834000,0.4\n"
        );
    }

    #[test]
    fn round_trip_preserves_records_and_order() {
        let mut chad = Record::new("Chad", "TCD", 16_900_000, 1_284_000, 3.0);
        chad.extra.insert("birth_rate".into(), CellValue::Real(41.0));
        chad.extra.insert("id".into(), CellValue::Integer(37));
        let mut cote = Record::new("Cote d'Ivoire, \"Ivory Coast\"", "CIV", 27_000_000, 322_463, -0.05);
        cote.extra.insert("birth_rate".into(), CellValue::Null);
        cote.extra.insert("id".into(), CellValue::Integer(48));

        let columns: Vec<String> = ["id", "code", "name", "area", "population", "population_growth", "birth_rate"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let subset = vec![&cote, &chad];

        let bytes = to_csv(&columns, &subset).unwrap();
        let parsed = parse_csv(&bytes).unwrap();

        assert_eq!(parsed.columns(), columns.as_slice());
        let expected: Vec<Record> = subset.into_iter().cloned().collect();
        assert_eq!(parsed.records(), expected.as_slice());
    }

    #[test]
    fn extra_text_is_type_guessed_on_read() {
        let mut rec = usa();
        rec.extra.insert("note".into(), CellValue::Text("007".into()));
        rec.extra.insert("tag".into(), CellValue::Text(String::new()));
        let columns: Vec<String> = ["name", "code", "population", "area", "population_growth", "note", "tag"]
            .iter()
            .map(|c| c.to_string())
            .collect();

        let parsed = parse_csv(&to_csv(&columns, &[&rec]).unwrap()).unwrap();
        let back = &parsed.records()[0];
        assert_eq!(back.extra.get("note"), Some(&CellValue::Integer(7)));
        assert_eq!(back.extra.get("tag"), Some(&CellValue::Null));
        assert_eq!(back.population, rec.population);
        assert_eq!(back.population_growth, rec.population_growth);
    }

    #[test]
    fn infinite_growth_is_rejected_on_read() {
        let csv = b"name,code,population,area,population_growth\nX,XXX,10,10,inf\n";
        assert!(matches!(
            parse_csv(csv),
            Err(DataError::InvalidValue { ref column, .. }) if column == "population_growth"
        ));
    }

    #[test]
    fn empty_subset_exports_header_only() {
        let table = Table::from_records(Vec::new());
        let bytes = to_csv(table.columns(), &[]).unwrap();
        assert_eq!(bytes, b"name,code,population,area,population_growth\n");
        assert!(parse_csv(&bytes).unwrap().is_empty());
    }

    #[test]
    fn missing_core_column_is_rejected() {
        let err = parse_csv(b"name,code,population\nUSA,US,1\n").unwrap_err();
        match err {
            DataError::MissingColumns { missing, .. } => {
                assert_eq!(missing, ["area", "population_growth"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_core_values_report_row_and_column() {
        let csv = b"name,code,population,area,population_growth\nA,AAA,-5,1,0.1\n";
        assert!(matches!(
            parse_csv(csv),
            Err(DataError::InvalidValue { row: 0, ref column, .. }) if column == "population"
        ));

        let csv = b"name,code,population,area,population_growth\nA,AAA,5,1,NaN\n";
        assert!(matches!(parse_csv(csv), Err(DataError::InvalidValue { .. })));
    }
}
