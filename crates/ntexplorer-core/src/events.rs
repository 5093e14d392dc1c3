use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::preferences::Filter;
use crate::quiz::questions::BranchVariant;

/// Every quiz flow transition produces an Event.
/// Front-ends may print or log them; the session holds the actual state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    QuizStarted {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    /// A linear question was answered and the next one is shown.
    QuestionAdvanced {
        answered: String,
        index: usize,
        at: DateTime<Utc>,
    },
    /// The trigger question was answered; the branch question is shown next.
    BranchEntered {
        variant: BranchVariant,
        question_id: String,
        at: DateTime<Utc>,
    },
    FiltersShown {
        at: DateTime<Utc>,
    },
    FilterChanged {
        filter: Filter,
        at: DateTime<Utc>,
    },
    FetchStarted {
        generation: u64,
        has_location: bool,
        at: DateTime<Utc>,
    },
    ResultsReady {
        count: usize,
        at: DateTime<Utc>,
    },
    /// The fetch failed and the user is back on the filter step.
    FetchFailed {
        malformed: bool,
        message: String,
        at: DateTime<Utc>,
    },
    /// A reply arrived for a fetch whose session was abandoned.
    FetchDiscarded {
        generation: u64,
        at: DateTime<Utc>,
    },
    ReturnedToWelcome {
        at: DateTime<Utc>,
    },
}
