//! Charts for templated (vectorized) benchmarks such as `Sum<int>/4_mean`:
//! one mean line and one stddev error band per template type, plotted over
//! the input size.

use std::collections::BTreeMap;

use common::{
    chart::{Chart, ChartSeries},
    config::{LookupMiss, Settings},
    error::NameError,
    plot::Plot,
    record::{RawRecord, Shape},
    series::{Run, Series, TimeKind},
};
use eyre::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

pub mod name;

pub use name::TemplatedName;

pub const TITLE_PREFIX: &str = "Vectorization";

/// function -> template type -> series keyed by input size
pub type FunctionTable = BTreeMap<String, BTreeMap<String, Series>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vectorization {
    /// CPU time is tracked but not charted unless asked for.
    #[serde(default = "default_time_kinds")]
    pub time_kinds: Vec<TimeKind>,
}

fn default_time_kinds() -> Vec<TimeKind> {
    vec![TimeKind::Real]
}

impl Default for Vectorization {
    fn default() -> Self {
        Self {
            time_kinds: default_time_kinds(),
        }
    }
}

#[typetag::serde]
impl Plot for Vectorization {
    fn name(&self) -> &'static str {
        "vectorization"
    }

    fn shape(&self) -> Shape {
        Shape::Templated
    }

    fn charts(&self, records: &[&RawRecord], settings: &Settings) -> Result<Vec<Chart>> {
        let table = aggregate(records.iter().copied()).inspect_err(|err| error!("{err}"))?;
        debug!("Aggregated {} templated functions", table.len());
        build_charts(&table, &self.time_kinds, settings.lookup_miss)
    }
}

/// Folds records into a [`FunctionTable`]. Any name outside the templated
/// grammar aborts, later records overwrite earlier ones with the same
/// function, template type, input size and aggregate.
pub fn aggregate<'a>(
    records: impl IntoIterator<Item = &'a RawRecord>,
) -> Result<FunctionTable, NameError> {
    let mut table = FunctionTable::new();
    for record in records {
        let name: TemplatedName = record.name.parse()?;
        table
            .entry(name.function)
            .or_default()
            .entry(name.template_type)
            .or_default()
            .insert(
                name.aggregate,
                name.input_size,
                Run::new(record.real_time, record.cpu_time),
            );
    }
    Ok(table)
}

/// One chart per function. Series are ordered by time kind, then by
/// template type, each mean line followed by its error band.
pub fn build_charts(
    table: &FunctionTable,
    time_kinds: &[TimeKind],
    lookup_miss: LookupMiss,
) -> Result<Vec<Chart>> {
    table
        .iter()
        .map(|(function, by_template)| -> Result<Chart> {
            let series = time_kinds
                .iter()
                .cartesian_product(by_template)
                .map(|(kind, (template_type, series))| -> Result<[ChartSeries; 2]> {
                    let label = kind.label();
                    let errors = series
                        .error_points(*kind, lookup_miss)
                        .with_context(|| format!("Error bars of {function}<{template_type}>"))?;
                    Ok([
                        ChartSeries::spline(
                            format!("{label} time {template_type}"),
                            series.mean_points(*kind),
                        ),
                        ChartSeries::errorbar(format!("{label} time error {template_type}"), errors),
                    ])
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Chart::new(
                TITLE_PREFIX,
                function,
                series.into_iter().flatten().collect(),
            ))
        })
        .collect()
}
