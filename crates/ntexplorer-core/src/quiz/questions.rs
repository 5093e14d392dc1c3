//! Static quiz content: the linear questions and the two branch questions.

use serde::{Deserialize, Serialize};

use crate::locale::{Locale, LocalizedText};

/// Answer value of the trigger question that selects the solo branch.
pub const SOLO_SENTINEL: &str = "solo";

/// Id of the linear question whose answer selects the branch.
pub const BRANCH_TRIGGER_ID: &str = "social";

/// A choice offered by a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub value: String,
    pub label: LocalizedText,
}

/// A quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub prompt: LocalizedText,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    fn new(id: &str, en: &str, zh: &str, options: &[(&str, &str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            prompt: LocalizedText::new(en, zh),
            options: options
                .iter()
                .map(|(value, en, zh)| QuizOption {
                    value: value.to_string(),
                    label: LocalizedText::new(*en, *zh),
                })
                .collect(),
        }
    }

    pub fn prompt_text(&self, locale: Locale) -> &str {
        self.prompt.get(locale)
    }

    pub fn option(&self, value: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.value == value)
    }
}

/// Which follow-up question is asked after the trigger question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchVariant {
    Solo,
    Group,
}

impl BranchVariant {
    /// Only an exact match on `"solo"` selects the solo branch; every other
    /// value, including empty or unknown ones, falls back to the group branch.
    pub fn select(trigger_value: &str) -> Self {
        if trigger_value == SOLO_SENTINEL {
            BranchVariant::Solo
        } else {
            BranchVariant::Group
        }
    }
}

/// The full question set driving a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCatalog {
    pub linear: Vec<QuizQuestion>,
    pub solo_branch: QuizQuestion,
    pub group_branch: QuizQuestion,
    /// Id of the linear question that triggers branching.
    pub trigger_id: String,
}

impl QuizCatalog {
    /// The Northern Taiwan question set.
    pub fn northern_taiwan() -> Self {
        Self {
            linear: vec![
                QuizQuestion::new(
                    "activity",
                    "What's your preferred activity level?",
                    "您偏好的活動強度是？",
                    &[
                        ("relaxed", "Relaxed (Cafes, museums)", "輕鬆閒適 (咖啡廳、博物館)"),
                        ("active", "Active (Hiking, walking)", "活力十足 (登山、漫步)"),
                    ],
                ),
                QuizQuestion::new(
                    "interest",
                    "What's your main interest?",
                    "您主要的興趣是？",
                    &[
                        ("nature", "Nature & Scenery", "自然景觀"),
                        ("urban", "Urban & Cultural", "城市文化"),
                    ],
                ),
                QuizQuestion::new(
                    "food",
                    "What's your food style?",
                    "您偏好的美食風格？",
                    &[
                        ("street", "Local Street Food", "在地小吃"),
                        ("restaurant", "Fine Dining", "精緻餐廳"),
                    ],
                ),
                QuizQuestion::new(
                    BRANCH_TRIGGER_ID,
                    "Who are you traveling with?",
                    "您這次是跟誰一起旅行？",
                    &[
                        (SOLO_SENTINEL, "Solo Traveler", "獨自旅行"),
                        ("group", "Friends or Family", "朋友或家人"),
                    ],
                ),
            ],
            solo_branch: QuizQuestion::new(
                "solo_exp",
                "Is this your first time in Northern Taiwan?",
                "這是您第一次來北台灣嗎？",
                &[
                    ("first", "Yes, first time!", "是的，第一次來！"),
                    ("repeater", "I've been here before.", "我之前來過幾次。"),
                ],
            ),
            group_branch: QuizQuestion::new(
                "group_type",
                "What's your group composition?",
                "您的成員組成主要是？",
                &[
                    ("friends", "Young Friends / Energetic", "年輕好友 / 充滿活力"),
                    ("family_kids", "Family with Kids", "帶著小孩的家庭"),
                    ("family_seniors", "Family with Seniors", "帶著長輩的家庭"),
                ],
            ),
            trigger_id: BRANCH_TRIGGER_ID.to_string(),
        }
    }

    pub fn linear_len(&self) -> usize {
        self.linear.len()
    }

    pub fn branch_question(&self, variant: BranchVariant) -> &QuizQuestion {
        match variant {
            BranchVariant::Solo => &self.solo_branch,
            BranchVariant::Group => &self.group_branch,
        }
    }
}

impl Default for QuizCatalog {
    fn default() -> Self {
        Self::northern_taiwan()
    }
}
