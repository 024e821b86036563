pub mod provider;
pub mod recommendation;
