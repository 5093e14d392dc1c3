//! Quiz content and the flow that walks a session through it.

pub mod flow;
pub mod questions;

pub use flow::{FetchTicket, QuizFlow, QuizPhase, Step, StepKind};
pub use questions::{BranchVariant, QuizCatalog, QuizOption, QuizQuestion};
