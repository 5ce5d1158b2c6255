use serde::{Deserialize, Deserializer, Serialize};

/// Top level of a benchmark tool JSON report. Everything besides the
/// `benchmarks` list (`context`, ...) is ignored.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct BenchmarkReport {
    pub benchmarks: Vec<RawRecord>,
}

/// One benchmark run as reported by the measurement tool.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub name: String,
    #[serde(deserialize_with = "deserialize_time")]
    pub real_time: i64,
    #[serde(deserialize_with = "deserialize_time")]
    pub cpu_time: i64,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, real_time: i64, cpu_time: i64) -> Self {
        Self {
            name: name.into(),
            real_time,
            cpu_time,
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::classify(&self.name)
    }
}

/// The two benchmark name shapes this tool knows how to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `Func<Type>/<size>_mean`, `Func/<size>_stddev`, ...
    Templated,
    /// `BM_Func/real_time/threads:<N>`
    Threaded,
}

impl Shape {
    /// Only names carrying an aggregate suffix are templated. Everything
    /// else goes to the threaded parser, which skips what it cannot read.
    pub fn classify(name: &str) -> Self {
        if name.ends_with("_mean") || name.ends_with("_stddev") {
            Shape::Templated
        } else {
            Shape::Threaded
        }
    }
}

/// Times are integers in the reference output but the benchmark tool writes
/// floats, so both are accepted and floats are truncated.
fn deserialize_time<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Time {
        Int(i64),
        Float(f64),
    }

    match Time::deserialize(deserializer)? {
        Time::Int(t) => Ok(t),
        Time::Float(t) if t.is_finite() => Ok(t.trunc() as i64),
        Time::Float(t) => Err(serde::de::Error::custom(format!(
            "benchmark time {t} is not a finite number"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_ignores_unknown_fields() {
        let report: BenchmarkReport = serde_json::from_str(
            r#"{
                "context": {"date": "2019-03-01", "num_cpus": 56},
                "benchmarks": [
                    {"name": "Sum<int>/4_mean", "iterations": 3, "real_time": 100, "cpu_time": 90, "time_unit": "ns"},
                    {"name": "BM_Fill/real_time/threads:8", "real_time": 1.5e3, "cpu_time": 12.9}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            report.benchmarks,
            vec![
                RawRecord::new("Sum<int>/4_mean", 100, 90),
                RawRecord::new("BM_Fill/real_time/threads:8", 1500, 12),
            ]
        );
    }

    #[test]
    fn non_numeric_time_is_rejected() {
        let err = serde_json::from_str::<RawRecord>(
            r#"{"name": "Foo/1_mean", "real_time": "fast", "cpu_time": 1}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(Shape::classify("BM_Foo/real_time/threads:56"), Shape::Threaded);
        assert_eq!(Shape::classify("Foo/threads:4"), Shape::Threaded);
        assert_eq!(Shape::classify("Foo<Bar>/128_mean"), Shape::Templated);
        assert_eq!(Shape::classify("Foo/128_stddev"), Shape::Templated);
        assert_eq!(Shape::classify("OnlyOneSegment_mean"), Shape::Templated);
        assert_eq!(Shape::classify("Foo/128_median"), Shape::Threaded);
        assert_eq!(Shape::classify("Foo/128"), Shape::Threaded);
        assert_eq!(Shape::classify("threads:4"), Shape::Threaded);
        assert_eq!(Shape::classify("OnlyOneSegment"), Shape::Threaded);
    }
}
