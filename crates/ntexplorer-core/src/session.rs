//! The single owned state of one quiz run.
//!
//! A [`Session`] carries everything that changes while the user moves
//! through the flow: the current step, accumulated preferences, the last
//! results or error, and the display locale. [`crate::QuizFlow`] mutates it;
//! nothing else holds state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::locale::Locale;
use crate::preferences::UserPreferences;
use crate::quiz::flow::Step;
use crate::recommend::RecommendationCard;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: Uuid,
    pub(crate) step: Step,
    pub(crate) preferences: UserPreferences,
    pub(crate) results: Vec<RecommendationCard>,
    pub(crate) error: Option<String>,
    locale: Locale,
    /// Bumped whenever an outstanding fetch is abandoned; replies carrying an
    /// older generation are dropped.
    pub(crate) generation: u64,
}

impl Session {
    pub fn new(locale: Locale) -> Self {
        Self {
            id: Uuid::new_v4(),
            step: Step::Welcome,
            preferences: UserPreferences::reset(),
            results: Vec::new(),
            error: None,
            locale,
            generation: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    /// Cards of the last successful fetch, in provider order.
    pub fn results(&self) -> &[RecommendationCard] {
        &self.results
    }

    /// Localized message of the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn abandon_fetch(&mut self) {
        self.generation += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
