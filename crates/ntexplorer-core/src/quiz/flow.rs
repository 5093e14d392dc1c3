//! Quiz flow state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Welcome -> Quiz(Linear 0..n) -> Quiz(Branch) -> Filters -> Loading -> Results
//!                                                    ^           |
//!                                                    +-- error --+
//! ```
//!
//! `go_to_welcome()` is accepted from every step. The flow owns no mutable
//! state itself: every operation takes the [`Session`] it acts on.
//!
//! ## Usage
//!
//! ```ignore
//! let flow = QuizFlow::new(QuizCatalog::northern_taiwan());
//! let mut session = Session::new(Locale::En);
//! flow.start(&mut session);
//! flow.answer(&mut session, "activity", "relaxed")?;
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::questions::{BranchVariant, QuizCatalog, QuizQuestion};
use crate::error::{FlowError, RecommendError};
use crate::events::Event;
use crate::locale::UiStrings;
use crate::preferences::Filter;
use crate::recommend::{
    build_request, parse_recommendations, GeoLocation, RecommendationProvider,
    RecommendationRequest,
};
use crate::session::Session;

/// Share of the progress bar covered by the linear questions; the branch
/// question fills the rest.
const LINEAR_PROGRESS_SHARE: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum QuizPhase {
    Linear { index: usize },
    Branch { variant: BranchVariant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum Step {
    Welcome,
    Quiz(QuizPhase),
    Filters,
    Loading,
    Results,
}

/// Step without its payload, for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Welcome,
    Quiz,
    Filters,
    Loading,
    Results,
}

impl Step {
    pub fn kind(self) -> StepKind {
        match self {
            Step::Welcome => StepKind::Welcome,
            Step::Quiz(_) => StepKind::Quiz,
            Step::Filters => StepKind::Filters,
            Step::Loading => StepKind::Loading,
            Step::Results => StepKind::Results,
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StepKind::Welcome => "welcome",
            StepKind::Quiz => "quiz",
            StepKind::Filters => "filters",
            StepKind::Loading => "loading",
            StepKind::Results => "results",
        })
    }
}

/// Handle for one outstanding fetch.
///
/// Built by [`QuizFlow::begin_fetch`] and handed back to
/// [`QuizFlow::complete_fetch`] together with the provider's reply.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    pub request: RecommendationRequest,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Drives a [`Session`] through the quiz.
#[derive(Debug, Clone, Default)]
pub struct QuizFlow {
    catalog: QuizCatalog,
}

impl QuizFlow {
    pub fn new(catalog: QuizCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuizCatalog {
        &self.catalog
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// The question to show, if the session is in the quiz.
    pub fn current_question(&self, session: &Session) -> Option<&QuizQuestion> {
        match session.step {
            Step::Quiz(QuizPhase::Linear { index }) => self.catalog.linear.get(index),
            Step::Quiz(QuizPhase::Branch { variant }) => {
                Some(self.catalog.branch_question(variant))
            }
            _ => None,
        }
    }

    /// 0.0 .. 100.0 quiz progress; `None` outside the quiz.
    ///
    /// Linear questions fill up to 85%, the branch question shows 100%.
    pub fn progress_pct(&self, session: &Session) -> Option<f64> {
        match session.step {
            Step::Quiz(QuizPhase::Linear { index }) => {
                let total = self.catalog.linear_len();
                if total == 0 {
                    return Some(0.0);
                }
                let shown = (index + 1).min(total);
                Some(shown as f64 / total as f64 * LINEAR_PROGRESS_SHARE)
            }
            Step::Quiz(QuizPhase::Branch { .. }) => Some(100.0),
            _ => None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh quiz. Accepted from any step.
    pub fn start(&self, session: &mut Session) -> Event {
        session.abandon_fetch();
        session.preferences.clear_answers();
        session.error = None;
        session.step = Step::Quiz(QuizPhase::Linear { index: 0 });
        tracing::debug!(session = %session.id(), "quiz started");
        Event::QuizStarted {
            session_id: session.id(),
            at: Utc::now(),
        }
    }

    /// Record an answer and move to whatever comes next.
    pub fn answer(
        &self,
        session: &mut Session,
        question_id: &str,
        value: &str,
    ) -> Result<Event, FlowError> {
        let Step::Quiz(phase) = session.step else {
            return Err(invalid("answer a question", session.step));
        };

        session.preferences.record_answer(question_id, value);

        let event = match phase {
            QuizPhase::Linear { .. } if question_id == self.catalog.trigger_id => {
                let variant = BranchVariant::select(value);
                session.step = Step::Quiz(QuizPhase::Branch { variant });
                Event::BranchEntered {
                    variant,
                    question_id: self.catalog.branch_question(variant).id.clone(),
                    at: Utc::now(),
                }
            }
            QuizPhase::Linear { index } if index + 1 < self.catalog.linear_len() => {
                session.step = Step::Quiz(QuizPhase::Linear { index: index + 1 });
                Event::QuestionAdvanced {
                    answered: question_id.to_string(),
                    index: index + 1,
                    at: Utc::now(),
                }
            }
            QuizPhase::Linear { .. } | QuizPhase::Branch { .. } => {
                session.step = Step::Filters;
                Event::FiltersShown { at: Utc::now() }
            }
        };
        tracing::debug!(question_id, value, step = ?session.step, "answer recorded");
        Ok(event)
    }

    /// Jump to the filter step. Not available while a fetch is running.
    pub fn go_to_filters(&self, session: &mut Session) -> Result<Event, FlowError> {
        if session.step == Step::Loading {
            return Err(invalid("open filters", session.step));
        }
        session.step = Step::Filters;
        Ok(Event::FiltersShown { at: Utc::now() })
    }

    /// Return to the welcome screen from anywhere.
    ///
    /// Quiz position is reset; answers and filters stay until the next
    /// `start()`. A fetch still in flight is abandoned.
    pub fn go_to_welcome(&self, session: &mut Session) -> Event {
        if session.step == Step::Loading {
            tracing::info!(session = %session.id(), "abandoning outstanding fetch");
        }
        session.abandon_fetch();
        session.step = Step::Welcome;
        Event::ReturnedToWelcome { at: Utc::now() }
    }

    pub fn set_filter(&self, session: &mut Session, filter: Filter) -> Result<Event, FlowError> {
        if session.step != Step::Filters {
            return Err(invalid("change filters", session.step));
        }
        session.preferences.set_filter(filter);
        Ok(Event::FilterChanged {
            filter,
            at: Utc::now(),
        })
    }

    /// Leave the filter step and build the request for the provider.
    pub fn begin_fetch(
        &self,
        session: &mut Session,
        location: Option<GeoLocation>,
    ) -> Result<(FetchTicket, Event), FlowError> {
        if session.step != Step::Filters {
            return Err(invalid("fetch recommendations", session.step));
        }
        session.error = None;
        session.step = Step::Loading;

        let ticket = FetchTicket {
            generation: session.generation,
            request: build_request(&session.preferences, location),
        };
        let event = Event::FetchStarted {
            generation: ticket.generation,
            has_location: location.is_some(),
            at: Utc::now(),
        };
        Ok((ticket, event))
    }

    /// Apply the provider's reply for `ticket`.
    ///
    /// Replies for an abandoned fetch are dropped without touching the
    /// session. Any failure, transport or format, sends the user back to the
    /// filter step with the localized failure message.
    pub fn complete_fetch(
        &self,
        session: &mut Session,
        ticket: FetchTicket,
        reply: Result<String, RecommendError>,
    ) -> Event {
        if ticket.generation != session.generation || session.step != Step::Loading {
            tracing::info!(
                session = %session.id(),
                generation = ticket.generation,
                "discarding reply for abandoned fetch"
            );
            return Event::FetchDiscarded {
                generation: ticket.generation,
                at: Utc::now(),
            };
        }

        match reply.and_then(|raw| parse_recommendations(&raw)) {
            Ok(cards) => {
                let count = cards.len();
                session.results = cards;
                session.step = Step::Results;
                tracing::debug!(count, "recommendations ready");
                Event::ResultsReady {
                    count,
                    at: Utc::now(),
                }
            }
            Err(err) => {
                let malformed = err.is_malformed();
                tracing::error!(error = %err, malformed, "failed to get recommendations");
                let message = UiStrings::for_locale(session.locale())
                    .fetch_failed
                    .to_string();
                session.error = Some(message.clone());
                session.step = Step::Filters;
                Event::FetchFailed {
                    malformed,
                    message,
                    at: Utc::now(),
                }
            }
        }
    }

    /// Begin, call `provider`, and complete in one go.
    ///
    /// For front-ends that take no input while loading. Returns the
    /// `FetchStarted` event followed by the completion event.
    pub async fn fetch(
        &self,
        session: &mut Session,
        provider: &dyn RecommendationProvider,
        location: Option<GeoLocation>,
    ) -> Result<(Event, Event), FlowError> {
        let (ticket, started) = self.begin_fetch(session, location)?;
        tracing::debug!(provider = provider.name(), "fetch started");
        let reply = provider.generate(&ticket.request).await;
        let finished = self.complete_fetch(session, ticket, reply);
        Ok((started, finished))
    }
}

fn invalid(action: &'static str, step: Step) -> FlowError {
    FlowError::InvalidTransition {
        action,
        step: step.kind(),
    }
}
