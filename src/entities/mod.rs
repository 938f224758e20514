//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.
//!
//! Every table is scoped to exactly one owning user via `user_id`; rows are
//! never visible cross-user. Columns with day semantics are plain calendar
//! dates, never timestamps.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

pub mod completion;
pub mod daily_plan;
pub mod habit;
pub mod milestone;
pub mod personal_code;
pub mod quarterly_plan;
pub mod remarkable_aspect;
pub mod ritual;
pub mod ritual_completion;
pub mod value;
pub mod weekly_plan;

// Re-export specific types to avoid conflicts
pub use completion::{Column as CompletionColumn, Entity as Completion, Model as CompletionModel};
pub use daily_plan::{Column as DailyPlanColumn, Entity as DailyPlan, Model as DailyPlanModel};
pub use habit::{Column as HabitColumn, Entity as Habit, Model as HabitModel};
pub use milestone::{Column as MilestoneColumn, Entity as Milestone, Model as MilestoneModel};
pub use personal_code::{
    Column as PersonalCodeColumn, Entity as PersonalCode, Model as PersonalCodeModel,
};
pub use quarterly_plan::{
    Column as QuarterlyPlanColumn, Entity as QuarterlyPlan, Model as QuarterlyPlanModel,
};
pub use remarkable_aspect::{
    Column as RemarkableAspectColumn, Entity as RemarkableAspect, Model as RemarkableAspectModel,
};
pub use ritual::{Column as RitualColumn, Entity as Ritual, Model as RitualModel};
pub use ritual_completion::{
    Column as RitualCompletionColumn, Entity as RitualCompletion, Model as RitualCompletionModel,
};
pub use value::{Column as ValueColumn, Entity as Value, Model as ValueModel};
pub use weekly_plan::{Column as WeeklyPlanColumn, Entity as WeeklyPlan, Model as WeeklyPlanModel};

/// Ordered list of strings stored as a JSON column (big rocks, priorities,
/// objectives).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl StringList {
    /// Number of entries in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}
