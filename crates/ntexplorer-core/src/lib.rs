//! # NT Explorer Core Library
//!
//! Business logic for the NT Explorer travel recommender: a short quiz plus
//! four trip filters are turned into a prompt for a generative AI service,
//! and the service's reply is parsed into recommendation cards. The CLI is a
//! thin front-end over this crate.
//!
//! ## Architecture
//!
//! - **Preferences**: answers and filters accumulated during a run
//! - **Quiz**: static question catalog and the flow state machine
//! - **Recommend**: request builder, response parser, provider trait and the
//!   Gemini implementation
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`QuizFlow`]: drives a [`Session`] from welcome to results
//! - [`RecommendationProvider`]: injectable "prompt in, raw text out" capability
//! - [`parse_recommendations`]: tolerant extraction of the card array
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod geo;
pub mod imagery;
pub mod locale;
pub mod preferences;
pub mod quiz;
pub mod recommend;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, FlowError, RecommendError, ValidationError};
pub use events::Event;
pub use locale::{Locale, LocalizedText, UiStrings};
pub use preferences::{
    Duration, Filter, FilterKey, PriceRange, QuizAnswer, TimeOfDay, Transport, UserPreferences,
};
pub use quiz::{BranchVariant, FetchTicket, QuizCatalog, QuizFlow, QuizPhase, QuizQuestion, Step};
pub use recommend::{
    build_request, parse_recommendations, GeminiProvider, GeoLocation, RecommendationCard,
    RecommendationProvider, RecommendationRequest,
};
pub use session::Session;
pub use storage::Config;
