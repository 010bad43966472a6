//! Business hours in their stored form.
//!
//! Stored hours are a sparse map from weekday name to either
//! [`TWENTY_FOUR_HOURS`] or `"<open>-<close>"`. Days that are closed are
//! simply absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored value for a day of a business that never closes.
pub const TWENTY_FOUR_HOURS: &str = "24시간";

/// Opening hours of a single weekday as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DaySchedule {
    pub enabled: bool,
    pub open: String,
    pub close: String,
}

impl DaySchedule {
    pub fn open(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            enabled: true,
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn closed() -> Self {
        Self::default()
    }
}

/// Canonical weekday → hours mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessHours(BTreeMap<String, String>);

impl BusinessHours {
    /// Convert submitted per-day schedules into the stored mapping.
    ///
    /// Every key of `schedule` is visited; no missing weekday is filled in.
    pub fn from_schedule<'a, I>(is_24_hours: bool, schedule: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a DaySchedule)>,
    {
        let hours = schedule
            .into_iter()
            .filter_map(|(day, entry)| {
                if is_24_hours {
                    Some((day.clone(), TWENTY_FOUR_HOURS.to_string()))
                } else if entry.enabled {
                    Some((day.clone(), format!("{}-{}", entry.open, entry.close)))
                } else {
                    None
                }
            })
            .collect();

        Self(hours)
    }

    pub fn from_map(hours: BTreeMap<String, String>) -> Self {
        Self(hours)
    }

    pub fn get(&self, day: &str) -> Option<&str> {
        self.0.get(day).map(String::as_str)
    }

    pub fn contains_day(&self, day: &str) -> bool {
        self.0.contains_key(day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}
