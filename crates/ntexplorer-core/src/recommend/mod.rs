//! Recommendation request/response contract and the external provider.

pub mod provider;
pub mod request;
pub mod response;

pub use provider::{GeminiProvider, RecommendationProvider};
pub use request::{build_request, GeoLocation, RecommendationRequest, RECOMMENDATION_COUNT};
pub use response::{parse_recommendations, RecommendationCard};
