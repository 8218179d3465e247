//! Prompt construction for the generation endpoints.
//!
//! Builders are pure and infallible: missing input renders as an empty value
//! or a documented default, never as an error.

pub mod diet;
pub mod risk;

pub use diet::build_diet_prompt;
pub use risk::build_risk_prompt;
