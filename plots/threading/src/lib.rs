//! Charts for threading benchmarks such as `BM_Fill/real_time/threads:8`:
//! real and CPU time of every function plotted over the thread count.

use std::collections::BTreeMap;

use common::{
    chart::{Chart, ChartSeries},
    config::Settings,
    plot::Plot,
    record::{RawRecord, Shape},
    series::{Aggregate, Run, Series, TimeKind},
};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod name;

pub use name::ThreadedName;

pub const TITLE_PREFIX: &str = "Threading";

/// function -> series keyed by thread count, only means are recorded
pub type FunctionTable = BTreeMap<String, Series>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Threading {
    #[serde(default = "default_time_kinds")]
    pub time_kinds: Vec<TimeKind>,
}

fn default_time_kinds() -> Vec<TimeKind> {
    vec![TimeKind::Real, TimeKind::Cpu]
}

impl Default for Threading {
    fn default() -> Self {
        Self {
            time_kinds: default_time_kinds(),
        }
    }
}

#[typetag::serde]
impl Plot for Threading {
    fn name(&self) -> &'static str {
        "threading"
    }

    fn shape(&self) -> Shape {
        Shape::Threaded
    }

    fn charts(&self, records: &[&RawRecord], _settings: &Settings) -> Result<Vec<Chart>> {
        let table = aggregate(records.iter().copied());
        debug!("Aggregated {} threaded functions", table.len());
        Ok(build_charts(&table, &self.time_kinds))
    }
}

/// Folds records into a [`FunctionTable`]. Names that do not decode are
/// skipped with a warning, later records overwrite earlier ones with the same
/// function and thread count.
pub fn aggregate<'a>(records: impl IntoIterator<Item = &'a RawRecord>) -> FunctionTable {
    let mut table = FunctionTable::new();
    for record in records {
        let name = match record.name.parse::<ThreadedName>() {
            Ok(name) => name,
            Err(err) => {
                warn!("Skipping benchmark: {err}");
                continue;
            }
        };
        table.entry(name.function).or_default().insert(
            Aggregate::Mean,
            name.thread_count,
            Run::new(record.real_time, record.cpu_time),
        );
    }
    table
}

/// One chart per function with a mean line per time kind.
pub fn build_charts(table: &FunctionTable, time_kinds: &[TimeKind]) -> Vec<Chart> {
    table
        .iter()
        .map(|(function, series)| {
            let lines = time_kinds
                .iter()
                .map(|kind| {
                    ChartSeries::spline(
                        format!("{} time {function}", kind.label()),
                        series.mean_points(*kind),
                    )
                })
                .collect();
            Chart::new(TITLE_PREFIX, function, lines)
        })
        .collect()
}
