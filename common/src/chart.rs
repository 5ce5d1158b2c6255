//! Highcharts chart descriptions.
//!
//! A [`Chart`] serializes to the options object handed to
//! `Highcharts.chart(container, options)`. Only the options the generated
//! charts use are modelled.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Error bar tooltip, times are milliseconds.
pub const ERROR_TOOLTIP: &str = "Error range: {point.low}-{point.high}ms";
pub const ERROR_COLOR: &str = "#FF0000";

/// A data point, serialized as a bare JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Point {
    /// `[x, y]`
    Value(i64, i64),
    /// `[x, low, high]`
    Range(i64, i64, i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Spline,
    Errorbar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesTooltip {
    pub point_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<SeriesTooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whisker_length: Option<u32>,
}

impl ChartSeries {
    /// Mean line without point markers.
    pub fn spline(name: impl Into<String>, data: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Spline,
            data,
            marker: Some(Marker { enabled: false }),
            color: None,
            tooltip: None,
            stem_width: None,
            whisker_length: None,
        }
    }

    /// Red stddev band around a mean line.
    pub fn errorbar(name: impl Into<String>, data: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Errorbar,
            data,
            marker: None,
            color: Some(ERROR_COLOR.to_owned()),
            tooltip: Some(SeriesTooltip {
                point_format: ERROR_TOOLTIP.to_owned(),
            }),
            stem_width: Some(3),
            whisker_length: Some(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub zoom_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    pub labels: Labels,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub shared: bool,
}

/// One chart per benchmarked function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub chart: ChartOptions,
    pub title: Title,
    pub y_axis: Axis,
    pub tooltip: Tooltip,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    /// Zoomable chart titled `"<prefix> <function>"` with a millisecond time axis.
    pub fn new(prefix: &str, function: &str, series: Vec<ChartSeries>) -> Self {
        Self {
            chart: ChartOptions {
                zoom_type: "x".to_owned(),
            },
            title: Title {
                text: format!("{prefix} {function}"),
            },
            y_axis: Axis {
                labels: Labels {
                    format: "{value}ms".to_owned(),
                },
                title: Title {
                    text: "time".to_owned(),
                },
            },
            tooltip: Tooltip { shared: true },
            series,
        }
    }

    /// `Highcharts.chart('<container>', <options>);` with one space indentation.
    pub fn to_highcharts(&self, container: &str) -> serde_json::Result<String> {
        Ok(format!(
            "Highcharts.chart('{container}', {});",
            to_string_indented(self)?
        ))
    }
}

/// Pretty prints with a single space of indentation.
pub fn to_string_indented<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b" "));
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
