use std::str::FromStr;

use common::error::NameError;

/// Prefix the benchmark tool puts in front of registered benchmark functions.
pub const BENCHMARK_PREFIX: &str = "BM_";

/// A decoded `BM_<Func>/<timing>/threads:<N>` benchmark name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadedName {
    pub function: String,
    pub thread_count: i64,
}

impl FromStr for ThreadedName {
    type Err = NameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let segments = name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>();
        let &[tag, _timing, threads] = segments.as_slice() else {
            return Err(NameError::SegmentCount {
                name: name.to_owned(),
                segments: segments.len(),
            });
        };

        let thread_count = threads
            .split(':')
            .nth(1)
            .and_then(|count| count.parse::<i64>().ok())
            .ok_or_else(|| NameError::InvalidThreadCount {
                name: name.to_owned(),
                segment: threads.to_owned(),
            })?;

        Ok(Self {
            function: tag.strip_prefix(BENCHMARK_PREFIX).unwrap_or(tag).to_owned(),
            thread_count,
        })
    }
}
