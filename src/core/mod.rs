//! Core business logic for Stratum.
//!
//! Pure calendar and streak math lives in [`dates`], [`streaks`],
//! [`journey`], and [`activity`]; the remaining modules pair that math with
//! database operations for each layer of the system.

/// Activity tallies and the dashboard week grid
pub mod activity;
/// Local-calendar date helpers
pub mod dates;
/// Habit CRUD, completion toggling, and per-habit statistics
pub mod habits;
/// Journey state resolution across the four layers
pub mod journey;
/// Weekly, daily, and quarterly plans plus the shutdown ritual
pub mod planning;
/// Ritual CRUD and period-based completion
pub mod rituals;
/// Streak and completion-rate calculations
pub mod streaks;
/// Core values and the personal code document
pub mod values;
/// Remarkable aspects and milestones
pub mod vision;
