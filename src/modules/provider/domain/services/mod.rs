pub mod title_matcher;

pub use title_matcher::TitleMatcher;
