//! The two supported display locales and the UI string table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Zh,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "zh" => Ok(Locale::Zh),
            other => Err(ValidationError::UnknownLocale(other.to_string())),
        }
    }
}

/// A piece of text available in both locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub zh: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, zh: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            zh: zh.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => &self.zh,
        }
    }
}

/// Every user-facing string of the front-end, for one locale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UiStrings {
    pub brand: &'static str,
    pub welcome_title: &'static str,
    pub welcome_subtitle: &'static str,
    pub welcome_desc: &'static str,
    pub start_btn: &'static str,
    pub question: &'static str,
    pub refine_title: &'static str,
    pub refine_subtitle: &'static str,
    pub transport: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
    pub time_of_day: &'static str,
    pub find_btn: &'static str,
    pub loading_title: &'static str,
    pub loading_subtitle: &'static str,
    pub results_title: &'static str,
    pub restart_btn: &'static str,
    pub view_on_maps: &'static str,
    pub fetch_failed: &'static str,
}

const EN: UiStrings = UiStrings {
    brand: "NT Explorer",
    welcome_title: "Explore Northern Taiwan",
    welcome_subtitle: "Personalized AI Travel Guide",
    welcome_desc: "Answer a few questions to find your perfect spots in Taipei, New Taipei, Keelung, and Taoyuan.",
    start_btn: "Start Discovery",
    question: "Question",
    refine_title: "Refine Your Trip",
    refine_subtitle: "How would you like to travel today?",
    transport: "Transport",
    price: "Price Range",
    duration: "Duration",
    time_of_day: "Time of Day",
    find_btn: "Find My Places",
    loading_title: "Curating your adventure...",
    loading_subtitle: "We're matching the best 4+ star spots to your profile...",
    results_title: "Your Matches",
    restart_btn: "Start Over",
    view_on_maps: "Maps",
    fetch_failed: "Failed to load matches. Please try again.",
};

const ZH: UiStrings = UiStrings {
    brand: "北台探索",
    welcome_title: "探索北台灣",
    welcome_subtitle: "您的 AI 專屬旅遊顧問",
    welcome_desc: "回答幾個簡單問題，我們將為您推薦台北、新北、基隆及桃園的最優質去處。",
    start_btn: "開始探索",
    question: "問題",
    refine_title: "完善您的行程",
    refine_subtitle: "您今天偏好什麼樣的旅遊方式？",
    transport: "交通方式",
    price: "價位預算",
    duration: "停留時程",
    time_of_day: "白天/晚上",
    find_btn: "尋找景點與美食",
    loading_title: "正在為您規劃行程...",
    loading_subtitle: "正在挑選最符合您偏好的 4 星以上優質地點...",
    results_title: "為您精選的地點",
    restart_btn: "重新開始",
    view_on_maps: "地圖",
    fetch_failed: "載入失敗，請稍後再試。",
};

impl UiStrings {
    pub fn for_locale(locale: Locale) -> &'static UiStrings {
        match locale {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }
}
