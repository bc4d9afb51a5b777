pub mod candidates;
pub mod scoring;
