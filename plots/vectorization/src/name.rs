use std::{fmt, str::FromStr};

use common::{error::NameError, series::Aggregate};

/// A decoded `Func<Type>/<size>_<aggregate>` benchmark name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatedName {
    pub function: String,
    /// Empty when the benchmark is not templated.
    pub template_type: String,
    /// Zero when the name has no digits after the `/`.
    pub input_size: i64,
    pub aggregate: Aggregate,
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Byte offset of the `>` closing a template argument that started right
/// before `inner`.
fn closing_bracket(inner: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (pos, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos);
                }
            }
            _ => {}
        }
    }
    None
}

impl FromStr for TemplatedName {
    type Err = NameError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let end = name.find(|c: char| !is_ident(c)).unwrap_or(name.len());
        let (function, rest) = name.split_at(end);
        if function.is_empty() {
            return Err(NameError::MissingFunction {
                name: name.to_owned(),
            });
        }

        let (template_type, rest) = match rest.strip_prefix('<') {
            Some(inner) => {
                let close = closing_bracket(inner).ok_or_else(|| NameError::UnterminatedTemplate {
                    name: name.to_owned(),
                })?;
                (&inner[..close], &inner[close + 1..])
            }
            None => ("", rest),
        };

        let rest = rest
            .strip_prefix('/')
            .ok_or_else(|| NameError::MissingSeparator {
                name: name.to_owned(),
                found: rest.chars().next(),
            })?;

        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (size, rest) = rest.split_at(digits);
        let input_size = if size.is_empty() {
            0
        } else {
            size.parse().map_err(|_| NameError::InvalidSize {
                name: name.to_owned(),
                size: size.to_owned(),
            })?
        };

        // The tool appends `_mean`/`_stddev` literally, strip it exactly once
        let suffix = rest
            .strip_prefix('_')
            .ok_or_else(|| NameError::MissingSuffix {
                name: name.to_owned(),
            })?;
        let aggregate = match suffix {
            "mean" => Aggregate::Mean,
            "stddev" => Aggregate::Stddev,
            _ => {
                return Err(NameError::UnknownSuffix {
                    name: name.to_owned(),
                    suffix: suffix.to_owned(),
                });
            }
        };

        Ok(Self {
            function: function.to_owned(),
            template_type: template_type.to_owned(),
            input_size,
            aggregate,
        })
    }
}

impl fmt::Display for TemplatedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)?;
        if !self.template_type.is_empty() {
            write!(f, "<{}>", self.template_type)?;
        }
        write!(f, "/{}_{}", self.input_size, self.aggregate.suffix())
    }
}
