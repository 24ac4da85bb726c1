pub mod matcher;
pub mod ranker;
