pub mod normalizer;
pub mod profile;
pub mod recommender;
pub mod usage_stats;
