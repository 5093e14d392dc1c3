//! Extraction of recommendation cards from the service's free-form reply.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::RecommendError;
use crate::locale::Locale;

/// One recommended place, as returned by the service.
///
/// Field contents are trusted verbatim; missing fields come through empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationCard {
    pub name_zh: String,
    pub name_en: String,
    #[serde(deserialize_with = "string_or_number")]
    pub rating: String,
    pub category: String,
    pub highlight_zh: String,
    pub highlight_en: String,
    pub image_keyword: String,
    pub map_uri: String,
}

impl RecommendationCard {
    /// Name in the display locale.
    pub fn name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name_en,
            Locale::Zh => &self.name_zh,
        }
    }

    /// Name in the other locale, shown as a subtitle.
    pub fn alt_name(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.name_zh,
            Locale::Zh => &self.name_en,
        }
    }

    pub fn highlight(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.highlight_en,
            Locale::Zh => &self.highlight_zh,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Parse the cards out of `raw`.
///
/// The payload is taken from the first `[` to the last `]` inclusive, so
/// prose or code fences around the array are ignored. Order is preserved and
/// nothing about count or field contents is checked.
pub fn parse_recommendations(raw: &str) -> Result<Vec<RecommendationCard>, RecommendError> {
    let (Some(start), Some(end)) = (raw.find('['), raw.rfind(']')) else {
        tracing::warn!(raw = %raw, "recommendation reply has no JSON array");
        return Err(RecommendError::malformed("no JSON array in reply"));
    };
    if end < start {
        tracing::warn!(raw = %raw, "recommendation reply brackets are reversed");
        return Err(RecommendError::malformed("no JSON array in reply"));
    }

    serde_json::from_str(&raw[start..=end]).map_err(|err| {
        tracing::warn!(raw = %raw, error = %err, "recommendation reply is not a valid card array");
        RecommendError::malformed(err.to_string())
    })
}
