use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::plot::Plot;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    /// Plots run in list order.
    pub plots: Vec<Box<dyn Plot>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub dispatch: Dispatch,
    pub lookup_miss: LookupMiss,
    /// Id of the element each Highcharts chart renders into.
    pub container: String,
    /// Only benchmarks whose name matches this regex are charted.
    pub filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dispatch: Dispatch::default(),
            lookup_miss: LookupMiss::default(),
            container: "container".to_owned(),
            filter: None,
        }
    }
}

/// Which records a plot gets to see.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// Only records whose name has the plot's shape.
    #[default]
    ByShape,
    /// Every record, whatever its shape.
    All,
}

/// What to do with a stddev run that has no mean run for its key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMiss {
    /// Drop the error bar point.
    #[default]
    Skip,
    /// Center the error bar on zero.
    ZeroMean,
    /// Abort chart generation.
    Error,
}

impl FromStr for Dispatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "by_shape" => Ok(Dispatch::ByShape),
            "all" => Ok(Dispatch::All),
            _ => Err(format!("Unsupported dispatch {s}, expected by-shape or all")),
        }
    }
}

impl FromStr for LookupMiss {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "skip" => Ok(LookupMiss::Skip),
            "zero_mean" => Ok(LookupMiss::ZeroMean),
            "error" => Ok(LookupMiss::Error),
            _ => Err(format!(
                "Unsupported lookup miss policy {s}, expected skip, zero-mean or error"
            )),
        }
    }
}
