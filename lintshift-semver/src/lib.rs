use semver::{Comparator, Op, VersionReq};
use std::error::Error as StdError;
use std::fmt;

/// An npm-style range such as `^8.0.0`, `>=7 <9` or `^1 || ^2`.
#[derive(Debug, Clone)]
pub struct RangeSet {
    ranges: Vec<VersionReq>,
}

#[derive(Debug, Clone)]
pub struct Error {
    input: String,
    message: String,
}

impl Error {
    pub fn new(input: String, message: String) -> Self {
        Self { input, message }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.input)
    }
}

impl StdError for Error {}

impl RangeSet {
    pub fn parse(original: &str) -> Result<Self, Error> {
        let mut s = original.trim();

        if s.is_empty() {
            s = "*";
        }

        let mut ranges = Vec::new();

        for part in s.split("||") {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let normalized = normalize_and_part(part);

            let req = VersionReq::parse(&normalized)
                .map_err(|err| Error::new(original.to_string(), err.to_string()))?;

            ranges.push(req);
        }

        if ranges.is_empty() {
            ranges.push(VersionReq::STAR);
        }

        Ok(RangeSet { ranges })
    }

    /// Lowest version satisfying any alternative of the set, or `None` when
    /// every alternative is unsatisfiable (e.g. `>=2.0.0 <1.0.0`).
    pub fn min_version(&self) -> Option<Version> {
        self.ranges.iter().filter_map(min_version_of).min()
    }
}

/// Major component of the lowest version that satisfies `range`.
pub fn min_major(range: &str) -> Result<u64, Error> {
    let set = RangeSet::parse(range)?;

    set.min_version()
        .map(|version| version.major)
        .ok_or_else(|| Error::new(range.to_string(), "range is unsatisfiable".to_string()))
}

fn min_version_of(req: &VersionReq) -> Option<Version> {
    let mut floor = Version::new(0, 0, 0);

    for comparator in &req.comparators {
        let bound = lower_bound(comparator)?;
        if bound > floor {
            floor = bound;
        }
    }

    req.matches(&floor).then_some(floor)
}

/// Lowest version a single comparator admits; `None` when the bound lies past
/// `u64::MAX` (e.g. `>18446744073709551615`).
fn lower_bound(comparator: &Comparator) -> Option<Version> {
    let major = comparator.major;
    let minor = comparator.minor.unwrap_or(0);
    let patch = comparator.patch.unwrap_or(0);

    match comparator.op {
        Op::Less | Op::LessEq => Some(Version::new(0, 0, 0)),
        Op::Greater => match (comparator.minor, comparator.patch) {
            (Some(minor), Some(patch)) if !comparator.pre.is_empty() => {
                Some(Version::new(major, minor, patch))
            }
            (Some(minor), Some(patch)) => {
                Some(Version::new(major, minor, patch.checked_add(1)?))
            }
            (Some(minor), None) => Some(Version::new(major, minor.checked_add(1)?, 0)),
            _ => Some(Version::new(major.checked_add(1)?, 0, 0)),
        },
        _ => {
            let mut version = Version::new(major, minor, patch);
            version.pre = comparator.pre.clone();
            Some(version)
        }
    }
}

fn normalize_and_part(part: &str) -> String {
    let tokens: Vec<&str> = part.split_whitespace().collect();

    if tokens.len() == 3 && tokens[1] == "-" {
        return format!(">={}, <={}", strip_v(tokens[0]), strip_v(tokens[2]));
    }

    if tokens.len() <= 1 {
        return strip_v(part.trim()).to_string();
    }

    let mut result = String::new();

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            let prev = tokens[i - 1];
            if matches!(prev, "=" | ">" | ">=" | "<" | "<=" | "~" | "^") {
                result.push(' ');
            } else {
                result.push_str(", ");
            }
        }

        result.push_str(&strip_v(token));
    }
    result
}

// npm tolerates a `v` in front of the version (`v1.2.3`, `>=v2`).
fn strip_v(token: &str) -> String {
    let split = token
        .find(|c: char| !matches!(c, '=' | '>' | '<' | '~' | '^'))
        .unwrap_or(token.len());
    let (op, rest) = token.split_at(split);

    match rest.strip_prefix(['v', 'V']) {
        Some(version) if version.starts_with(|c: char| c.is_ascii_digit()) => {
            format!("{op}{version}")
        }
        _ => token.to_string(),
    }
}

pub use semver::Version;
