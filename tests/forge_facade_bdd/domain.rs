//! Domain wrapper types for the forge facade BDD tests.

use std::str::FromStr;

/// Pull request or issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IssueNumber(u64);

impl IssueNumber {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for IssueNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u64>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("IssueNumber must be >= 1".to_owned());
        }

        Ok(Self(value))
    }
}

/// Comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommentId(u64);

impl CommentId {
    pub(crate) const fn value(self) -> u64 {
        self.0
    }
}

impl FromStr for CommentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Number of calls the substitute received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CallCount(usize);

impl CallCount {
    pub(crate) const fn value(self) -> usize {
        self.0
    }
}

impl FromStr for CallCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<usize>().map(Self)
    }
}
