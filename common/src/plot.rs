use core::fmt::Debug;

use dyn_clone::{DynClone, clone_trait_object};
use eyre::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::{
    chart::Chart,
    config::{Dispatch, Settings},
    record::{RawRecord, Shape},
};

#[typetag::serde(tag = "type")]
pub trait Plot: Debug + DynClone + Send + Sync {
    fn name(&self) -> &'static str;
    /// The benchmark name shape this plot understands
    fn shape(&self) -> Shape;
    /// Builds one chart per benchmarked function
    ///
    /// Arguments:
    /// * `records` - The records dispatched to this plot, in input order
    /// * `settings` - The settings from the config
    fn charts(&self, records: &[&RawRecord], settings: &Settings) -> Result<Vec<Chart>>;
}
clone_trait_object!(Plot);

/// Runs every plot over the records selected by `settings` and collects the
/// charts in plot order. The first failing plot aborts the whole run.
pub fn plot(
    plots: &[Box<dyn Plot>],
    records: &[RawRecord],
    settings: &Settings,
) -> Result<Vec<Chart>> {
    let filter = settings
        .filter
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Compile benchmark filter")?;
    let selected = records
        .iter()
        .filter(|record| filter.as_ref().is_none_or(|f| f.is_match(&record.name)))
        .collect::<Vec<_>>();
    debug!("Selected {} of {} benchmarks", selected.len(), records.len());

    let mut charts = Vec::new();
    for plot in plots {
        let records = match settings.dispatch {
            Dispatch::ByShape => selected
                .iter()
                .copied()
                .filter(|record| record.shape() == plot.shape())
                .collect(),
            Dispatch::All => selected.clone(),
        };
        debug!("Plotting {} with {} benchmarks", plot.name(), records.len());
        let plotted = plot
            .charts(&records, settings)
            .with_context(|| format!("Generate {} charts", plot.name()))?;
        debug!("{} produced {} charts", plot.name(), plotted.len());
        charts.extend(plotted);
    }
    Ok(charts)
}
