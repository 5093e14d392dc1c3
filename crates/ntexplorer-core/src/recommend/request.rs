//! Prompt construction for the recommendation service.

use serde::{Deserialize, Serialize};

use crate::preferences::UserPreferences;

/// Number of spots the service is asked for.
pub const RECOMMENDATION_COUNT: usize = 6;

/// Device position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Everything a provider needs to ask for recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub prompt: String,
    /// Grounding hint, only set when a location was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}

/// Build the request for `preferences`. Pure; never fails.
pub fn build_request(
    preferences: &UserPreferences,
    location: Option<GeoLocation>,
) -> RecommendationRequest {
    RecommendationRequest {
        prompt: build_prompt(preferences),
        location,
    }
}

fn build_prompt(preferences: &UserPreferences) -> String {
    indoc::formatdoc! {"
        Act as a professional visual travel guide for Northern Taiwan (Taipei, New Taipei, Keelung, Taoyuan).
        Recommend exactly {count} high-quality spots (4+ stars).

        User Persona:
        - Quiz Profile: {profile}
        - Preferred Transport: {transport}
        - Budget Level: {price}
        - Typical Stay: {duration}
        - Time of Visit: {time_of_day}

        Output requirement:
        Return ONLY a valid JSON array of objects. No markdown formatting.
        Fields:
        - nameZh: Chinese name
        - nameEn: English name
        - rating: e.g. \"4.8\"
        - category: short category (e.g. \"Scenic View\")
        - highlightZh: ONE extremely short catchphrase in Chinese.
        - highlightEn: ONE extremely short catchphrase in English.
        - imageKeyword: A highly specific English keyword for finding a representative photo of this place (e.g., \"Taipei101\", \"JiufenOldStreet\", \"ShilinNightMarket\"). Do NOT include spaces if possible, or use simple words.
        - mapUri: The Google Maps URL.

        Use Google Maps grounding to verify all locations and ratings.
        ",
        count = RECOMMENDATION_COUNT,
        profile = preferences.quiz_profile(),
        transport = preferences.transport,
        price = preferences.price,
        duration = preferences.duration,
        time_of_day = preferences.time_of_day,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{Filter, Transport};

    fn sample_preferences() -> UserPreferences {
        let mut prefs = UserPreferences::reset();
        prefs.record_answer("activity", "active");
        prefs.record_answer("interest", "nature");
        prefs.record_answer("social", "group");
        prefs.set_filter(Filter::Transport(Transport::Bus));
        prefs
    }

    #[test]
    fn prompt_embeds_profile_and_filters() {
        let req = build_request(&sample_preferences(), None);
        assert!(req
            .prompt
            .contains("Quiz Profile: activity: active, interest: nature, social: group"));
        assert!(req.prompt.contains("Preferred Transport: Bus"));
        assert!(req.prompt.contains("Budget Level: $$"));
        assert!(req.prompt.contains("Typical Stay: 3-5h"));
        assert!(req.prompt.contains("Time of Visit: Anytime"));
    }

    #[test]
    fn prompt_demands_six_bare_json_entries() {
        let req = build_request(&UserPreferences::reset(), None);
        assert!(req.prompt.contains("exactly 6"));
        assert!(req.prompt.contains("ONLY a valid JSON array"));
        assert!(req.prompt.contains("No markdown"));
        for field in [
            "nameZh",
            "nameEn",
            "rating",
            "category",
            "highlightZh",
            "highlightEn",
            "imageKeyword",
            "mapUri",
        ] {
            assert!(req.prompt.contains(&format!("- {field}:")), "{field}");
        }
    }

    #[test]
    fn location_hint_only_when_available() {
        let prefs = sample_preferences();
        assert!(build_request(&prefs, None).location.is_none());

        let here = GeoLocation::new(25.0330, 121.5654);
        assert_eq!(build_request(&prefs, Some(here)).location, Some(here));
    }

    #[test]
    fn empty_answers_render_empty_profile() {
        let req = build_request(&UserPreferences::reset(), None);
        assert!(req.prompt.contains("- Quiz Profile: \n"));
    }

    #[test]
    fn location_bounds() {
        assert!(GeoLocation::new(25.0, 121.5).is_valid());
        assert!(!GeoLocation::new(91.0, 0.0).is_valid());
        assert!(!GeoLocation::new(0.0, -181.0).is_valid());
    }
}
