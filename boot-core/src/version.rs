use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// Maturity stage encoded in an API version token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Alpha(u32),
    Beta(u32),
    Stable,
}

/// An API version token matching `^v\d+(alpha\d+|beta\d+)?$`.
///
/// Valid: `v1`, `v1alpha1`, `v2beta3`. Invalid: `v1Alpha1`, `beta1`, `V1`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ApiVersion {
    raw: String,
    major: u32,
    stage: Stage,
}

impl ApiVersion {
    /// The major version number.
    pub fn major(&self) -> u32 {
        self.major
    }

    /// The maturity stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The version exactly as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for ApiVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            format!(
                "invalid version '{}', expected v<N>, v<N>alpha<N> or v<N>beta<N> (e.g. v1, v1alpha1, v1beta1)",
                s
            )
        };

        let rest = s.strip_prefix('v').ok_or_else(invalid)?;
        let (major, rest) = split_number(rest).ok_or_else(invalid)?;

        let stage = if rest.is_empty() {
            Stage::Stable
        } else if let Some(n) = rest.strip_prefix("alpha") {
            Stage::Alpha(parse_whole_number(n).ok_or_else(invalid)?)
        } else if let Some(n) = rest.strip_prefix("beta") {
            Stage::Beta(parse_whole_number(n).ok_or_else(invalid)?)
        } else {
            return Err(invalid());
        };

        Ok(Self {
            raw: s.to_string(),
            major,
            stage,
        })
    }
}

/// Split a leading run of ASCII digits off `s` and parse it.
fn split_number(s: &str) -> Option<(u32, &str)> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    let (digits, rest) = s.split_at(end);
    parse_whole_number(digits).map(|n| (n, rest))
}

/// Parse `s` only if it consists entirely of ASCII digits.
///
/// Digit runs too long for `u32` saturate: the grammar has no upper bound.
fn parse_whole_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.bytes().fold(0u32, |n, b| {
        n.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    }))
}
