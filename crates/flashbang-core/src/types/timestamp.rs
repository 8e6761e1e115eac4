// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Duration;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// The same wall-clock time, `days` days later. Saturates at the latest
    /// representable timestamp.
    pub fn plus_days(self, days: u32) -> Self {
        match self.0.checked_add_signed(Duration::days(i64::from(days))) {
            Some(ndt) => Self(ndt),
            None => Self(NaiveDateTime::MAX.trunc_subsecs(3)),
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(&value, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp(ndt))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
pub(crate) fn ts(s: &str) -> Timestamp {
    Timestamp::try_from(s.to_string()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_string() {
        let ndt = NaiveDateTime::parse_from_str("2023-10-05T14:30:15.123", FORMAT).unwrap();
        let ts = Timestamp(ndt);
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123");
    }

    #[test]
    fn test_invalid_string() {
        let result = Timestamp::try_from("yesterday".to_string());
        assert_eq!(
            result,
            Err(ErrorReport::new("Failed to parse timestamp: 'yesterday'."))
        );
    }

    #[test]
    fn test_plus_days_crosses_month() {
        assert_eq!(
            ts("2024-01-30T08:00:00.000").plus_days(6),
            ts("2024-02-05T08:00:00.000")
        );
        assert_eq!(
            ts("2024-01-30T08:00:00.000").plus_days(0),
            ts("2024-01-30T08:00:00.000")
        );
    }

    #[test]
    fn test_plus_days_saturates() {
        let latest = ts("2024-01-30T08:00:00.000").plus_days(u32::MAX);
        assert_eq!(latest.0, NaiveDateTime::MAX.trunc_subsecs(3));
        assert_eq!(latest.plus_days(1), latest);
    }

    #[test]
    fn test_ordering() {
        assert!(ts("2024-01-01T00:00:00.000") < ts("2024-01-01T00:00:00.001"));
    }

    #[test]
    fn test_serialize() {
        let serialized = serde_json::to_string(&ts("2023-10-05T14:30:15.123")).unwrap();
        assert_eq!(serialized, "\"2023-10-05T14:30:15.123\"");
    }

    #[test]
    fn test_deserialize() {
        let ts: Timestamp = serde_json::from_str("\"2023-10-05T14:30:15.123\"").unwrap();
        let expected_ndt = NaiveDateTime::parse_from_str("2023-10-05T14:30:15.123", FORMAT).unwrap();
        assert_eq!(ts.0, expected_ndt);
    }
}
