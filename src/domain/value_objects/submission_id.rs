//! Partnership submission identifiers.
//!
//! A submission ID is the literal prefix `PN` followed by the local
//! creation time formatted as `yyMMddHHmmss`:
//!
//! ```text
//! PN 24 03 09 14 05 07
//! |  |  |  |  |  |  +-- second
//! |  |  |  |  |  +----- minute
//! |  |  |  |  +-------- hour (24h)
//! |  |  |  +----------- day
//! |  |  +-------------- month
//! |  +----------------- year (two digits)
//! +-------------------- prefix
//! ```
//!
//! Two submissions created within the same second share an ID; the
//! repository's unique constraint rejects the second one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal prefix of every submission ID.
pub const SUBMISSION_ID_PREFIX: &str = "PN";

/// chrono format of the timestamp part.
pub const SUBMISSION_ID_TIMESTAMP_FORMAT: &str = "%y%m%d%H%M%S";

const TIMESTAMP_DIGITS: usize = 12;

/// Identifier of a partnership application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Derive the ID for an application created at `at`.
    pub fn generate(at: NaiveDateTime) -> Self {
        Self(format!(
            "{}{}",
            SUBMISSION_ID_PREFIX,
            at.format(SUBMISSION_ID_TIMESTAMP_FORMAT)
        ))
    }

    /// Wrap an ID read back from storage without re-checking its shape.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    /// Check the `PN` + 12 digits shape.
    pub fn is_well_formed(value: &str) -> bool {
        value
            .strip_prefix(SUBMISSION_ID_PREFIX)
            .map(|digits| {
                digits.len() == TIMESTAMP_DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
            })
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
