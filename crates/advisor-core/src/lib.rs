pub mod client;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod report;
pub mod rubric;
pub mod score;
pub mod types;
