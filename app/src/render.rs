use std::path::Path;

use clap::ValueEnum;
use common::{
    chart::{Chart, to_string_indented},
    config::{Config, Settings},
    record::BenchmarkReport,
};
use eyre::{Context, Result};
use threading::Threading;
use tokio::{
    fs::read_to_string,
    io::{AsyncReadExt, stdin},
};
use tracing::debug;
use vectorization::Vectorization;

/// How charts are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One `Highcharts.chart(...)` call per chart
    Highcharts,
    /// A single JSON array of chart options
    Json,
}

/// Vectorization charts first, then threading charts.
pub fn default_config() -> Config {
    Config {
        settings: Settings::default(),
        plots: vec![
            Box::new(Vectorization::default()),
            Box::new(Threading::default()),
        ],
    }
}

pub async fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        debug!("No config file, using defaults");
        return Ok(default_config());
    };
    let config = read_to_string(path)
        .await
        .with_context(|| format!("Read config {}", path.display()))?;
    serde_yml::from_str(&config).with_context(|| format!("Parse config {}", path.display()))
}

/// Reads a benchmark JSON report, `-` reads it from stdin.
pub async fn load_report(path: &Path) -> Result<BenchmarkReport> {
    let report = if path == Path::new("-") {
        let mut report = String::new();
        stdin()
            .read_to_string(&mut report)
            .await
            .context("Read report from stdin")?;
        report
    } else {
        read_to_string(path)
            .await
            .with_context(|| format!("Read report {}", path.display()))?
    };
    let report: BenchmarkReport = serde_json::from_str(&report).context("Parse benchmark report")?;
    debug!("Loaded {} benchmarks", report.benchmarks.len());
    Ok(report)
}

pub fn render(charts: &[Chart], format: Format, container: &str) -> Result<String> {
    let mut out = match format {
        Format::Highcharts => charts
            .iter()
            .map(|chart| chart.to_highcharts(container))
            .collect::<serde_json::Result<Vec<_>>>()?
            .join("\n"),
        Format::Json => to_string_indented(charts)?,
    };
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

/// Loads the report and renders every chart. Nothing is rendered when a
/// plot fails.
pub async fn render_report(
    input: &Path,
    config: &Config,
    format: Format,
) -> Result<String> {
    let report = load_report(input).await?;
    let charts = common::plot::plot(&config.plots, &report.benchmarks, &config.settings)?;
    render(&charts, format, &config.settings.container)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use common::{config::Dispatch, error::NameError};
    use tempfile::NamedTempFile;

    use super::*;

    const MIXED_REPORT: &str = r#"{
        "context": {"library_build_type": "release"},
        "benchmarks": [
            {"name": "Sum<int>/4_mean", "real_time": 100, "cpu_time": 90},
            {"name": "Sum<int>/4_stddev", "real_time": 10, "cpu_time": 8},
            {"name": "BM_Fill/real_time/threads:1", "real_time": 12.5, "cpu_time": 12},
            {"name": "BM_Fill/real_time/threads:2", "real_time": 7, "cpu_time": 13}
        ]
    }"#;

    fn file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn parse_highcharts(out: &str) -> Vec<serde_json::Value> {
        out.split("Highcharts.chart('container', ")
            .filter(|chunk| !chunk.is_empty())
            .map(|chunk| {
                let body = chunk.trim_end().strip_suffix(");").unwrap();
                serde_json::from_str(body).unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn mixed_report_by_shape() {
        let report = file(MIXED_REPORT);
        let out = render_report(report.path(), &default_config(), Format::Highcharts)
            .await
            .unwrap();

        let charts = parse_highcharts(&out);
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0]["title"]["text"], "Vectorization Sum");
        assert_eq!(charts[0]["series"][0]["data"], serde_json::json!([[4, 100]]));
        assert_eq!(charts[0]["series"][1]["data"], serde_json::json!([[4, 90, 110]]));
        assert_eq!(charts[1]["title"]["text"], "Threading Fill");
        assert_eq!(charts[1]["series"][0]["name"], "real time Fill");
        assert_eq!(charts[1]["series"][0]["data"], serde_json::json!([[1, 12], [2, 7]]));
        assert_eq!(charts[1]["series"][1]["name"], "CPU time Fill");
        assert!(out.ends_with(");\n"));
    }

    #[tokio::test]
    async fn unknown_name_shape_is_skipped() {
        let report = file(
            r#"{"benchmarks": [
                {"name": "Sum<int>/4_mean", "real_time": 100, "cpu_time": 90},
                {"name": "OnlyOneSegment", "real_time": 1, "cpu_time": 1},
                {"name": "BM_Fill/real_time/threads:1", "real_time": 12, "cpu_time": 12}
            ]}"#,
        );
        let out = render_report(report.path(), &default_config(), Format::Json)
            .await
            .unwrap();

        let charts: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0]["title"]["text"], "Vectorization Sum");
        assert_eq!(charts[1]["title"]["text"], "Threading Fill");
        assert!(!out.contains("OnlyOneSegment"));
    }

    #[tokio::test]
    async fn huge_float_time_saturates() {
        let report = file(
            r#"{"benchmarks": [
                {"name": "Sum<int>/4_mean", "real_time": 1e30, "cpu_time": 1},
                {"name": "Sum<int>/4_stddev", "real_time": 5, "cpu_time": 1}
            ]}"#,
        );
        let out = render_report(report.path(), &default_config(), Format::Json)
            .await
            .unwrap();

        let charts: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(
            charts[0]["series"][0]["data"],
            serde_json::json!([[4, i64::MAX]])
        );
        assert_eq!(
            charts[0]["series"][1]["data"],
            serde_json::json!([[4, i64::MAX - 5, i64::MAX]])
        );
    }

    #[tokio::test]
    async fn mixed_report_dispatched_to_all_aborts() {
        let report = file(MIXED_REPORT);
        let mut config = default_config();
        config.settings.dispatch = Dispatch::All;

        let err = render_report(report.path(), &config, Format::Highcharts)
            .await
            .unwrap_err();
        assert!(err.chain().any(|cause| matches!(
            cause.downcast_ref::<NameError>(),
            Some(NameError::MissingSuffix { .. })
        )));
    }

    #[tokio::test]
    async fn filter_limits_charts() {
        let report = file(MIXED_REPORT);
        let mut config = default_config();
        config.settings.filter = Some("threads".to_owned());

        let out = render_report(report.path(), &config, Format::Json)
            .await
            .unwrap();
        let charts: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0]["title"]["text"], "Threading Fill");
    }

    #[tokio::test]
    async fn config_from_file() {
        let config_file = file(
            "settings:\n  container: bench\n  lookup_miss: error\nplots:\n  - type: Threading\n    time_kinds: [cpu]\n",
        );
        let config = load_config(Some(config_file.path())).await.unwrap();
        assert_eq!(config.plots.len(), 1);
        assert_eq!(config.settings.container, "bench");

        let report = file(MIXED_REPORT);
        let out = render_report(report.path(), &config, Format::Highcharts)
            .await
            .unwrap();
        assert!(out.starts_with("Highcharts.chart('bench', "));
        assert!(!out.contains("Vectorization"));
        assert!(!out.contains("real time"));
    }

    #[tokio::test]
    async fn unreadable_input_fails() {
        assert!(load_report(Path::new("/nonexistent/report.json")).await.is_err());
        let report = file("{\"benchmarks\": [{\"name\": \"Foo/1_mean\"}]}");
        assert!(load_report(report.path()).await.is_err());
    }

    #[test]
    fn empty_output() {
        assert_eq!(render(&[], Format::Highcharts, "container").unwrap(), "");
        assert_eq!(render(&[], Format::Json, "container").unwrap(), "[]\n");
    }
}
