//! Accumulated quiz answers and trip filters.
//!
//! [`UserPreferences`] is a plain value object. The quiz flow appends
//! answers through [`UserPreferences::record_answer`]; the filter step
//! replaces one filter at a time through [`UserPreferences::set_filter`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One committed quiz choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: String,
    pub value: String,
}

/// Generates a filter enum with its wire labels and string parsing.
macro_rules! filter_enum {
    ($(#[$meta:meta])* $name:ident, $filter:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ValidationError::InvalidFilterValue {
                        filter: $filter.to_string(),
                        value: s.to_string(),
                    })
            }
        }
    };
}

filter_enum!(
    /// How the traveller gets around.
    Transport, "transport" {
        Mrt => "MRT",
        Bus => "Bus",
        Walking => "Walking",
        Car => "Car",
    }
);

filter_enum!(
    PriceRange, "price" {
        Budget => "$",
        Moderate => "$$",
        Luxury => "$$$",
    }
);

filter_enum!(
    /// Typical stay at one place.
    Duration, "duration" {
        Short => "1-2h",
        Medium => "3-5h",
        FullDay => "Full Day",
    }
);

filter_enum!(
    TimeOfDay, "timeOfDay" {
        Day => "Daytime",
        Night => "Nightlife",
        Any => "Anytime",
    }
);

/// Names of the four filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Transport,
    Price,
    Duration,
    TimeOfDay,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Transport,
        FilterKey::Price,
        FilterKey::Duration,
        FilterKey::TimeOfDay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKey::Transport => "transport",
            FilterKey::Price => "price",
            FilterKey::Duration => "duration",
            FilterKey::TimeOfDay => "timeOfDay",
        }
    }

    /// Wire labels of every value in this filter's domain, in display order.
    pub fn options(self) -> Vec<&'static str> {
        match self {
            FilterKey::Transport => Transport::ALL.iter().map(|v| v.label()).collect(),
            FilterKey::Price => PriceRange::ALL.iter().map(|v| v.label()).collect(),
            FilterKey::Duration => Duration::ALL.iter().map(|v| v.label()).collect(),
            FilterKey::TimeOfDay => TimeOfDay::ALL.iter().map(|v| v.label()).collect(),
        }
    }
}

impl FromStr for FilterKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = match s.trim() {
            "time-of-day" | "time_of_day" => "timeOfDay",
            other => other,
        };
        FilterKey::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownFilter(s.to_string()))
    }
}

/// A filter key paired with a value from that key's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "camelCase")]
pub enum Filter {
    Transport(Transport),
    Price(PriceRange),
    Duration(Duration),
    TimeOfDay(TimeOfDay),
}

impl Filter {
    /// Parse a `(key, value)` pair coming from outside the type system.
    pub fn parse(key: &str, value: &str) -> Result<Self, ValidationError> {
        Ok(match key.parse::<FilterKey>()? {
            FilterKey::Transport => Filter::Transport(value.parse()?),
            FilterKey::Price => Filter::Price(value.parse()?),
            FilterKey::Duration => Filter::Duration(value.parse()?),
            FilterKey::TimeOfDay => Filter::TimeOfDay(value.parse()?),
        })
    }

    pub fn key(self) -> FilterKey {
        match self {
            Filter::Transport(_) => FilterKey::Transport,
            Filter::Price(_) => FilterKey::Price,
            Filter::Duration(_) => FilterKey::Duration,
            Filter::TimeOfDay(_) => FilterKey::TimeOfDay,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::Transport(v) => v.label(),
            Filter::Price(v) => v.label(),
            Filter::Duration(v) => v.label(),
            Filter::TimeOfDay(v) => v.label(),
        }
    }
}

/// Quiz answers plus the four trip filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub answers: Vec<QuizAnswer>,
    pub transport: Transport,
    pub price: PriceRange,
    pub duration: Duration,
    pub time_of_day: TimeOfDay,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::reset()
    }
}

impl UserPreferences {
    /// Empty answers and the default filters (MRT, $$, 3-5h, Anytime).
    pub fn reset() -> Self {
        Self {
            answers: Vec::new(),
            transport: Transport::Mrt,
            price: PriceRange::Moderate,
            duration: Duration::Medium,
            time_of_day: TimeOfDay::Any,
        }
    }

    /// Store `value` for `question_id`.
    ///
    /// Any earlier answer for the same question is removed and the new one is
    /// appended, so re-answering moves the entry to the end of `answers`.
    pub fn record_answer(&mut self, question_id: &str, value: &str) {
        self.answers.retain(|a| a.question_id != question_id);
        self.answers.push(QuizAnswer {
            question_id: question_id.to_string(),
            value: value.to_string(),
        });
    }

    pub fn clear_answers(&mut self) {
        self.answers.clear();
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|a| a.question_id == question_id)
            .map(|a| a.value.as_str())
    }

    pub fn set_filter(&mut self, filter: Filter) {
        match filter {
            Filter::Transport(v) => self.transport = v,
            Filter::Price(v) => self.price = v,
            Filter::Duration(v) => self.duration = v,
            Filter::TimeOfDay(v) => self.time_of_day = v,
        }
    }

    pub fn filter(&self, key: FilterKey) -> Filter {
        match key {
            FilterKey::Transport => Filter::Transport(self.transport),
            FilterKey::Price => Filter::Price(self.price),
            FilterKey::Duration => Filter::Duration(self.duration),
            FilterKey::TimeOfDay => Filter::TimeOfDay(self.time_of_day),
        }
    }

    /// `"activity: relaxed, interest: nature, ..."` in answer order.
    pub fn quiz_profile(&self) -> String {
        self.answers
            .iter()
            .map(|a| format!("{}: {}", a.question_id, a.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reset_uses_documented_defaults() {
        let prefs = UserPreferences::reset();
        assert!(prefs.answers.is_empty());
        assert_eq!(prefs.transport, Transport::Mrt);
        assert_eq!(prefs.price, PriceRange::Moderate);
        assert_eq!(prefs.duration, Duration::Medium);
        assert_eq!(prefs.time_of_day, TimeOfDay::Any);
    }

    #[test]
    fn re_answering_replaces_and_moves_to_end() {
        let mut prefs = UserPreferences::reset();
        prefs.record_answer("activity", "relaxed");
        prefs.record_answer("interest", "nature");
        prefs.record_answer("activity", "active");

        let ids: Vec<_> = prefs.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, ["interest", "activity"]);
        assert_eq!(prefs.answer_for("activity"), Some("active"));
    }

    #[test]
    fn identical_answer_is_idempotent_as_a_set() {
        let mut prefs = UserPreferences::reset();
        prefs.record_answer("food", "street");
        prefs.record_answer("food", "street");
        assert_eq!(prefs.answers.len(), 1);
    }

    #[test]
    fn set_filter_touches_one_field() {
        let mut prefs = UserPreferences::reset();
        prefs.set_filter(Filter::Price(PriceRange::Luxury));
        assert_eq!(prefs.price, PriceRange::Luxury);
        assert_eq!(prefs.transport, Transport::Mrt);
        assert_eq!(prefs.duration, Duration::Medium);
        assert_eq!(prefs.time_of_day, TimeOfDay::Any);
    }

    #[test]
    fn filter_parse_accepts_wire_labels() {
        assert_eq!(
            Filter::parse("duration", "full day").unwrap(),
            Filter::Duration(Duration::FullDay)
        );
        assert_eq!(
            Filter::parse("timeOfDay", "Nightlife").unwrap(),
            Filter::TimeOfDay(TimeOfDay::Night)
        );
        assert_eq!(
            Filter::parse("price", "$").unwrap(),
            Filter::Price(PriceRange::Budget)
        );
    }

    #[test]
    fn filter_parse_rejects_unknowns() {
        assert!(matches!(
            Filter::parse("weather", "sunny"),
            Err(ValidationError::UnknownFilter(_))
        ));
        assert!(matches!(
            Filter::parse("transport", "Boat"),
            Err(ValidationError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn quiz_profile_joins_in_answer_order() {
        let mut prefs = UserPreferences::reset();
        prefs.record_answer("activity", "relaxed");
        prefs.record_answer("social", "solo");
        assert_eq!(prefs.quiz_profile(), "activity: relaxed, social: solo");
    }

    #[test]
    fn serializes_with_camel_case_and_wire_labels() {
        let json = serde_json::to_value(UserPreferences::reset()).unwrap();
        assert_eq!(json["transport"], "MRT");
        assert_eq!(json["price"], "$$");
        assert_eq!(json["timeOfDay"], "Anytime");
    }

    proptest! {
        #[test]
        fn at_most_one_answer_per_question(
            calls in prop::collection::vec((0usize..5, "[a-z]{1,6}"), 0..40)
        ) {
            let ids = ["activity", "interest", "food", "social", "group_type"];
            let mut prefs = UserPreferences::reset();
            for (idx, value) in &calls {
                prefs.record_answer(ids[*idx], value);
            }

            for id in ids {
                let entries: Vec<_> = prefs.answers.iter().filter(|a| a.question_id == id).collect();
                prop_assert!(entries.len() <= 1);

                let latest = calls.iter().rev().find(|(idx, _)| ids[*idx] == id).map(|(_, v)| v.as_str());
                prop_assert_eq!(prefs.answer_for(id), latest);
            }
        }
    }
}
