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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// The minimum number of distinct words a quiz session is built from.
pub const MIN_SESSION_WORDS: usize = 4;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<InsufficientWordsError> for ErrorReport {
    fn from(value: InsufficientWordsError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// Raised when the eligible pool for a session, after category, mode, and
/// count filtering, holds fewer than [`MIN_SESSION_WORDS`] distinct words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsufficientWordsError {
    /// How many distinct words were eligible.
    pub found: usize,
}

impl Display for InsufficientWordsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "not enough words to start a quiz (need at least {MIN_SESSION_WORDS}, found {})",
            self.found
        )
    }
}

impl Error for InsufficientWordsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_words_message() {
        let err = InsufficientWordsError { found: 3 };
        assert_eq!(
            err.to_string(),
            "not enough words to start a quiz (need at least 4, found 3)"
        );
        let report: ErrorReport = err.into();
        assert_eq!(
            report.to_string(),
            "error: not enough words to start a quiz (need at least 4, found 3)"
        );
    }

    #[test]
    fn test_fail() {
        let result: Fallible<()> = fail("boom");
        assert_eq!(result, Err(ErrorReport::new("boom")));
    }
}
