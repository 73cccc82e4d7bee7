use super::filter::{filter, FilterBounds};
use super::model::{Field, Measure, Record, Table};

/// Length of every leaderboard.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// One marker of the population-vs-area scatter plot. Magnitudes are raw;
/// log scaling happens at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint<'a> {
    pub area: u64,
    pub population: u64,
    /// Drives marker colour.
    pub growth: f64,
    pub name: &'a str,
}

/// One region of a choropleth, keyed by ISO-3 code.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethEntry<'a> {
    pub code: &'a str,
    pub value: Measure,
    pub name: &'a str,
}

/// A choropleth together with the field it is coloured by.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethView<'a> {
    pub field: Field,
    pub entries: Vec<ChoroplethEntry<'a>>,
}

/// Stable sort of `subset` by `field`, truncated to the first `n`.
/// Records that tie keep their relative order from `subset`.
pub fn top_n_by<'a>(
    subset: &[&'a Record],
    field: Field,
    n: usize,
    order: SortOrder,
) -> Vec<&'a Record> {
    let mut sorted = subset.to_vec();
    match order {
        SortOrder::Descending => sorted.sort_by(|a, b| field.compare(b, a)),
        SortOrder::Ascending => sorted.sort_by(|a, b| field.compare(a, b)),
    }
    sorted.truncate(n);
    sorted
}

pub fn project_for_scatter<'a>(subset: &[&'a Record]) -> Vec<ScatterPoint<'a>> {
    subset
        .iter()
        .map(|rec| ScatterPoint {
            area: rec.area,
            population: rec.population,
            growth: rec.population_growth,
            name: &rec.name,
        })
        .collect()
}

pub fn project_for_choropleth<'a>(
    subset: &[&'a Record],
    color_field: Field,
) -> Vec<ChoroplethEntry<'a>> {
    subset
        .iter()
        .map(|rec| ChoroplethEntry {
            code: &rec.code,
            value: color_field.value(rec),
            name: &rec.name,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ViewSet – everything one frame of the dashboard draws
// ---------------------------------------------------------------------------

/// Every derived view for one `(table, bounds)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSet<'a> {
    pub subset: Vec<&'a Record>,
    pub top_population: Vec<&'a Record>,
    pub top_area: Vec<&'a Record>,
    pub top_growth: Vec<&'a Record>,
    pub scatter: Vec<ScatterPoint<'a>>,
    /// Population, growth and area maps, in that order.
    pub choropleths: Vec<ChoroplethView<'a>>,
}

impl ViewSet<'_> {
    pub fn is_empty(&self) -> bool {
        self.subset.is_empty()
    }
}

/// Run the whole pipeline from scratch: filter, then build each view.
pub fn render<'a>(table: &'a Table, bounds: &FilterBounds) -> ViewSet<'a> {
    let subset = filter(table, bounds);
    let top = |field| top_n_by(&subset, field, TOP_N, SortOrder::Descending);

    let choropleths = [Field::Population, Field::PopulationGrowth, Field::Area]
        .into_iter()
        .map(|field| ChoroplethView {
            field,
            entries: project_for_choropleth(&subset, field),
        })
        .collect();

    ViewSet {
        top_population: top(Field::Population),
        top_area: top(Field::Area),
        top_growth: top(Field::PopulationGrowth),
        scatter: project_for_scatter(&subset),
        choropleths,
        subset,
    }
}
