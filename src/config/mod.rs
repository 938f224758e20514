/// Database configuration and connection management
pub mod database;

/// Journey tuning constants (layer durations and progress maxima) from stratum.toml
pub mod journey;
