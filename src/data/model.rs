use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Column names every source table must carry, in export order.
pub const CORE_COLUMNS: [&str; 5] = ["name", "code", "population", "area", "population_growth"];

// ---------------------------------------------------------------------------
// CellValue – a single cell in a non-core column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the SQLite storage classes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Null,
}

impl CellValue {
    /// Guess the type of a text cell: empty → Null, then integer, float, text.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(v) = s.parse::<f64>() {
            return CellValue::Real(v);
        }
        CellValue::Text(s.to_string())
    }

    /// Text written to a CSV field. `Real` always keeps a decimal point so it
    /// parses back as `Real`.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Real(v) => format_float(*v),
            CellValue::Text(s) => s.clone(),
            CellValue::Null => String::new(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Real(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

/// Shortest representation that parses back to the same `f64`.
pub(crate) fn format_float(v: f64) -> String {
    format!("{v:?}")
}

// ---------------------------------------------------------------------------
// Field / Measure – the three filterable metrics
// ---------------------------------------------------------------------------

/// The numeric fields the dashboard filters, ranks and colours by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Population,
    Area,
    PopulationGrowth,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Population, Field::Area, Field::PopulationGrowth];

    /// Source column name.
    pub fn column(self) -> &'static str {
        match self {
            Field::Population => "population",
            Field::Area => "area",
            Field::PopulationGrowth => "population_growth",
        }
    }

    /// Human readable axis / legend label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Population => "Population",
            Field::Area => "Area (sq km)",
            Field::PopulationGrowth => "Population Growth (%)",
        }
    }

    pub fn value(self, record: &Record) -> Measure {
        match self {
            Field::Population => Measure::Count(record.population),
            Field::Area => Measure::Count(record.area),
            Field::PopulationGrowth => Measure::Percent(record.population_growth),
        }
    }

    /// Ascending total order of two records on this field.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        self.value(a).total_cmp(&self.value(b))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The value of one [`Field`] for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    Count(u64),
    Percent(f64),
}

impl Measure {
    pub fn as_f64(self) -> f64 {
        match self {
            Measure::Count(n) => n as f64,
            Measure::Percent(p) => p,
        }
    }

    /// Counts compare exactly; anything involving a percentage compares with
    /// `f64::total_cmp`.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Measure::Count(a), Measure::Count(b)) => a.cmp(b),
            _ => self.as_f64().total_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Count(n) => write!(f, "{n}"),
            Measure::Percent(p) => write!(f, "{p:.2}%"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the facts table
// ---------------------------------------------------------------------------

/// One country / entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    /// ISO-3 code, the join key for choropleths.
    pub code: String,
    pub population: u64,
    /// Square kilometres.
    pub area: u64,
    /// Percent per year, may be negative.
    pub population_growth: f64,
    /// Every other source column, unchanged.
    pub extra: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        population: u64,
        area: u64,
        population_growth: f64,
    ) -> Self {
        Record {
            name: name.into(),
            code: code.into(),
            population,
            area,
            population_growth,
            extra: BTreeMap::new(),
        }
    }

    /// CSV text of the given column, empty when the column is unknown.
    pub fn field_text(&self, column: &str) -> String {
        match column {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "population" => self.population.to_string(),
            "area" => self.area.to_string(),
            "population_growth" => format_float(self.population_growth),
            other => self
                .extra
                .get(other)
                .map(CellValue::to_field)
                .unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the immutable session dataset
// ---------------------------------------------------------------------------

/// The loaded dataset. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table with an explicit source column order.
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Table { columns, records }
    }

    /// Build a table carrying only the core columns.
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = CORE_COLUMNS.iter().map(|c| c.to_string()).collect();
        Table { columns, records }
    }

    /// Source column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed `(min, max)` of a field, `None` for an empty table.
    pub fn extent(&self, field: Field) -> Option<(Measure, Measure)> {
        let min = self.records.iter().min_by(|a, b| field.compare(a, b))?;
        let max = self.records.iter().max_by(|a, b| field.compare(a, b))?;
        Some((field.value(min), field.value(max)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_value_guesses_types() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse("-1.5"), CellValue::Real(-1.5));
        assert_eq!(CellValue::parse("Aruba"), CellValue::Text("Aruba".into()));
    }

    #[test]
    fn real_fields_keep_decimal_point() {
        assert_eq!(CellValue::Real(2.0).to_field(), "2.0");
        assert_eq!(CellValue::parse(&CellValue::Real(2.0).to_field()), CellValue::Real(2.0));
        assert_eq!(CellValue::Real(0.1).to_field(), "0.1");
    }

    #[test]
    fn growth_compares_with_total_order() {
        let a = Record::new("A", "AAA", 1, 1, -0.5);
        let b = Record::new("B", "BBB", 1, 1, 1.25);
        assert_eq!(Field::PopulationGrowth.compare(&a, &b), Ordering::Less);
        assert_eq!(Field::Population.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn extent_spans_observed_values() {
        let table = Table::from_records(vec![
            Record::new("A", "AAA", 300, 10, 1.0),
            Record::new("B", "BBB", 100, 50, -2.0),
            Record::new("C", "CCC", 200, 30, 0.5),
        ]);
        assert_eq!(
            table.extent(Field::Population),
            Some((Measure::Count(100), Measure::Count(300)))
        );
        assert_eq!(
            table.extent(Field::PopulationGrowth),
            Some((Measure::Percent(-2.0), Measure::Percent(1.0)))
        );
        assert_eq!(Table::from_records(Vec::new()).extent(Field::Area), None);
    }

    #[test]
    fn field_text_reads_core_and_extra_columns() {
        let mut rec = Record::new("Chad", "TCD", 12_000_000, 1_284_000, 1.9);
        rec.extra.insert("birth_rate".into(), CellValue::Real(36.6));
        assert_eq!(rec.field_text("population_growth"), "1.9");
        assert_eq!(rec.field_text("birth_rate"), "36.6");
        assert_eq!(rec.field_text("death_rate"), "");
    }
}
