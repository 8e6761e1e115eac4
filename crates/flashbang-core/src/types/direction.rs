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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The direction a session asks in. `Mixed` is resolved per question.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Direction {
    SourceToTarget,
    TargetToSource,
    Mixed,
}

/// The direction of a single question.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuestionType {
    /// Show the source term, ask for the translation.
    SourceToTarget,
    /// Show the translation, ask for the source term.
    TargetToSource,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SourceToTarget => "source-to-target",
            Direction::TargetToSource => "target-to-source",
            Direction::Mixed => "mixed",
        }
    }
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::SourceToTarget => "source-to-target",
            QuestionType::TargetToSource => "target-to-source",
        }
    }
}

impl From<QuestionType> for Direction {
    fn from(kind: QuestionType) -> Direction {
        match kind {
            QuestionType::SourceToTarget => Direction::SourceToTarget,
            QuestionType::TargetToSource => Direction::TargetToSource,
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "source-to-target" => Ok(Direction::SourceToTarget),
            "target-to-source" => Ok(Direction::TargetToSource),
            "mixed" => Ok(Direction::Mixed),
            _ => fail(format!("invalid direction: {value}")),
        }
    }
}

impl TryFrom<String> for QuestionType {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match Direction::try_from(value)? {
            Direction::SourceToTarget => Ok(QuestionType::SourceToTarget),
            Direction::TargetToSource => Ok(QuestionType::TargetToSource),
            Direction::Mixed => fail("a question cannot be mixed"),
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> String {
        direction.as_str().to_string()
    }
}

impl From<QuestionType> for String {
    fn from(kind: QuestionType) -> String {
        kind.as_str().to_string()
    }
}
