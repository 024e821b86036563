pub mod prompt_builder;
pub mod title_parser;

pub use prompt_builder::{PromptBuilder, SYSTEM_PROMPT};
pub use title_parser::{fallback_titles, parse_recommendation_response, ParsedTitles, MAX_TITLES};
