use super::model::{Field, Measure, Record, Table};

/// Start-up lower bounds of the dashboard, clamped into the observed range.
pub const DEFAULT_MIN_POPULATION: u64 = 1_000_000;
pub const DEFAULT_MIN_AREA: u64 = 0;
pub const DEFAULT_MIN_GROWTH: f64 = 0.0;

// ---------------------------------------------------------------------------
// Filter bounds: inclusive range per numeric field
// ---------------------------------------------------------------------------

/// The six user-chosen inclusive limits, applied jointly (AND).
///
/// Nothing here checks `min <= max`; an inverted pair simply matches no
/// record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterBounds {
    pub min_pop: u64,
    pub max_pop: u64,
    pub min_area: u64,
    pub max_area: u64,
    pub min_growth: f64,
    pub max_growth: f64,
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            min_pop: 0,
            max_pop: 0,
            min_area: 0,
            max_area: 0,
            min_growth: 0.0,
            max_growth: 0.0,
        }
    }
}

impl FilterBounds {
    /// Bounds equal to the observed extents of `table` (everything passes).
    pub fn spanning(table: &Table) -> Self {
        let (min_pop, max_pop) = count_extent(table, Field::Population);
        let (min_area, max_area) = count_extent(table, Field::Area);
        let (min_growth, max_growth) = percent_extent(table);
        Self {
            min_pop,
            max_pop,
            min_area,
            max_area,
            min_growth,
            max_growth,
        }
    }

    /// The selection the dashboard opens with: default lower bounds clamped
    /// into the observed range, upper bounds at the observed maximum.
    pub fn initial(table: &Table) -> Self {
        let span = Self::spanning(table);
        Self {
            min_pop: DEFAULT_MIN_POPULATION.clamp(span.min_pop, span.max_pop),
            min_area: DEFAULT_MIN_AREA.clamp(span.min_area, span.max_area),
            min_growth: DEFAULT_MIN_GROWTH.clamp(span.min_growth, span.max_growth),
            ..span
        }
    }

    /// Whether `record` lies inside all three ranges.
    pub fn contains(&self, record: &Record) -> bool {
        (self.min_pop..=self.max_pop).contains(&record.population)
            && (self.min_area..=self.max_area).contains(&record.area)
            && (self.min_growth..=self.max_growth).contains(&record.population_growth)
    }

    /// Fields whose lower bound exceeds the upper bound.
    pub fn inverted_fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.min_pop > self.max_pop {
            fields.push(Field::Population);
        }
        if self.min_area > self.max_area {
            fields.push(Field::Area);
        }
        if self.min_growth > self.max_growth {
            fields.push(Field::PopulationGrowth);
        }
        fields
    }
}

fn count_extent(table: &Table, field: Field) -> (u64, u64) {
    match table.extent(field) {
        Some((Measure::Count(lo), Measure::Count(hi))) => (lo, hi),
        _ => (0, 0),
    }
}

fn percent_extent(table: &Table) -> (f64, f64) {
    match table.extent(Field::PopulationGrowth) {
        Some((lo, hi)) => (lo.as_f64(), hi.as_f64()),
        None => (0.0, 0.0),
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return indices of records that pass `bounds`, in table order.
pub fn filtered_indices(table: &Table, bounds: &FilterBounds) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| bounds.contains(rec))
        .map(|(i, _)| i)
        .collect()
}

/// The subsequence of `table` passing `bounds`. An empty result is valid.
pub fn filter<'a>(table: &'a Table, bounds: &FilterBounds) -> Vec<&'a Record> {
    table
        .records()
        .iter()
        .filter(|rec| bounds.contains(rec))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records(vec![
            Record::new("United States", "USA", 331_000_000, 9_834_000, 0.4),
            Record::new("Monaco", "MCO", 39_000, 2, 0.2),
            Record::new("Japan", "JPN", 125_000_000, 377_975, -0.3),
            Record::new("Niger", "NER", 25_000_000, 1_267_000, 3.8),
            Record::new("France", "FRA", 68_000_000, 643_801, 0.4),
        ])
    }

    fn wide_open() -> FilterBounds {
        FilterBounds {
            min_pop: 0,
            max_pop: u64::MAX,
            min_area: 0,
            max_area: u64::MAX,
            min_growth: f64::MIN,
            max_growth: f64::MAX,
        }
    }

    #[test]
    fn bounds_are_applied_jointly() {
        let table = sample();
        let bounds = FilterBounds {
            min_pop: 1_000_000,
            max_pop: 400_000_000,
            min_area: 0,
            max_area: 10_000_000,
            min_growth: 0.0,
            max_growth: 1.0,
        };
        let names: Vec<&str> = filter(&table, &bounds).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["United States", "France"]);
    }

    #[test]
    fn limits_are_inclusive() {
        let table = sample();
        let exact = FilterBounds {
            min_pop: 68_000_000,
            max_pop: 68_000_000,
            ..wide_open()
        };
        assert_eq!(filter(&table, &exact).len(), 1);

        let above = FilterBounds {
            min_pop: 68_000_001,
            max_pop: 124_999_999,
            ..wide_open()
        };
        assert!(filter(&table, &above).is_empty());

        let growth_edge = FilterBounds {
            min_growth: -0.3,
            max_growth: -0.3,
            ..wide_open()
        };
        assert_eq!(filter(&table, &growth_edge)[0].code, "JPN");
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let table = sample();
        let bounds = FilterBounds {
            min_area: 1_000,
            max_area: 999,
            ..wide_open()
        };
        assert!(filter(&table, &bounds).is_empty());
        assert_eq!(bounds.inverted_fields(), vec![Field::Area]);
        assert!(wide_open().inverted_fields().is_empty());
    }

    #[test]
    fn result_is_ordered_subsequence_and_repeatable() {
        let table = sample();
        let bounds = FilterBounds {
            min_pop: 1_000_000,
            ..wide_open()
        };
        let first = filter(&table, &bounds);
        let second = filter(&table, &bounds);
        assert_eq!(first, second);

        let indices = filtered_indices(&table, &bounds);
        assert_eq!(indices, vec![0, 2, 3, 4]);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for (rec, idx) in first.iter().zip(&indices) {
            assert!(std::ptr::eq(*rec, &table.records()[*idx]));
        }
    }

    #[test]
    fn spanning_bounds_keep_every_record() {
        let table = sample();
        let bounds = FilterBounds::spanning(&table);
        assert_eq!(bounds.min_pop, 39_000);
        assert_eq!(bounds.max_growth, 3.8);
        assert_eq!(filter(&table, &bounds).len(), table.len());
    }

    #[test]
    fn initial_bounds_clamp_defaults_into_range() {
        let table = sample();
        let bounds = FilterBounds::initial(&table);
        assert_eq!(bounds.min_pop, DEFAULT_MIN_POPULATION);
        assert_eq!(bounds.max_pop, 331_000_000);
        // Smallest observed area is 2, so the 0 default is lifted.
        assert_eq!(bounds.min_area, 2);
        assert_eq!(bounds.min_growth, 0.0);

        let small = Table::from_records(vec![Record::new("Tuvalu", "TUV", 11_000, 26, 0.9)]);
        let bounds = FilterBounds::initial(&small);
        assert_eq!(bounds.min_pop, 11_000);
        assert_eq!(bounds.min_growth, 0.9);
        assert_eq!(filter(&small, &bounds).len(), 1);
    }

    #[test]
    fn empty_table_yields_zero_bounds() {
        let table = Table::from_records(Vec::new());
        assert_eq!(FilterBounds::initial(&table), FilterBounds::default());
        assert!(filter(&table, &FilterBounds::default()).is_empty());
    }
}
