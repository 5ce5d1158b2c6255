use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{chart::Point, config::LookupMiss, error::ChartError};

/// Which measured time of a [`Run`] to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeKind {
    Real,
    Cpu,
}

impl TimeKind {
    /// Label used in chart series names.
    pub fn label(&self) -> &'static str {
        match self {
            TimeKind::Real => "real",
            TimeKind::Cpu => "CPU",
        }
    }
}

/// Which aggregate of repeated runs a record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Mean,
    Stddev,
}

impl Aggregate {
    pub fn suffix(&self) -> &'static str {
        match self {
            Aggregate::Mean => "mean",
            Aggregate::Stddev => "stddev",
        }
    }
}

/// Time measurements of one input size or thread count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub real_time: i64,
    pub cpu_time: i64,
}

impl Run {
    pub fn new(real_time: i64, cpu_time: i64) -> Self {
        Self {
            real_time,
            cpu_time,
        }
    }

    pub fn time(&self, kind: TimeKind) -> i64 {
        match kind {
            TimeKind::Real => self.real_time,
            TimeKind::Cpu => self.cpu_time,
        }
    }
}

/// Runs of one function (and template type) keyed by input size or thread
/// count. Stddev runs are relative to the mean run with the same key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Series {
    pub mean_by_key: BTreeMap<i64, Run>,
    pub stddev_by_key: BTreeMap<i64, Run>,
}

impl Series {
    /// Stores a run, replacing any earlier run with the same key and aggregate.
    pub fn insert(&mut self, aggregate: Aggregate, key: i64, run: Run) {
        let runs = match aggregate {
            Aggregate::Mean => &mut self.mean_by_key,
            Aggregate::Stddev => &mut self.stddev_by_key,
        };
        runs.insert(key, run);
    }

    /// `[key, time]` for every mean run, ascending by key.
    pub fn mean_points(&self, kind: TimeKind) -> Vec<Point> {
        self.mean_by_key
            .iter()
            .map(|(key, run)| Point::Value(*key, run.time(kind)))
            .collect()
    }

    /// `[key, mean - stddev, mean + stddev]` for every stddev run, ascending
    /// by key. `lookup_miss` decides what happens to a stddev run without a
    /// mean run.
    pub fn error_points(
        &self,
        kind: TimeKind,
        lookup_miss: LookupMiss,
    ) -> Result<Vec<Point>, ChartError> {
        let mut points = Vec::with_capacity(self.stddev_by_key.len());
        for (key, run) in &self.stddev_by_key {
            let mean = match (self.mean_by_key.get(key), lookup_miss) {
                (Some(mean), _) => mean.time(kind),
                (None, LookupMiss::ZeroMean) => 0,
                (None, LookupMiss::Skip) => {
                    warn!("Skipping stddev at key {key}, no mean run");
                    continue;
                }
                (None, LookupMiss::Error) => return Err(ChartError::MissingMean { key: *key }),
            };
            // Float times saturate at the i64 bounds, keep the band there too
            let stddev = run.time(kind);
            points.push(Point::Range(
                *key,
                mean.saturating_sub(stddev),
                mean.saturating_add(stddev),
            ));
        }
        Ok(points)
    }
}
