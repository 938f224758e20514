//! Journey state resolution.
//!
//! The four layers (Discipline, Values, Control, Vision) form a strictly
//! ordered display sequence. Which layer the user is "in" is never persisted;
//! it is recomputed on every load from what data exists, so it cannot drift
//! out of sync with the tables. The resolver itself is pure; the snapshot it
//! consumes is loaded with parallel, causally independent reads.

use crate::config::journey::JourneyConfig;
use crate::core::dates;
use crate::entities::{
    Completion, DailyPlan, Habit, Milestone, PersonalCode, QuarterlyPlan, RemarkableAspect, Ritual,
    Value, WeeklyPlan, completion, daily_plan, habit, milestone, personal_code, quarterly_plan,
    remarkable_aspect, ritual, value, weekly_plan,
};
use crate::errors::Result;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// The four journey layers, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Keystone habits
    Discipline,
    /// Core values, rituals, personal code
    Values,
    /// Weekly/daily/quarterly planning
    Control,
    /// Remarkable aspects and milestones
    Vision,
}

impl Layer {
    /// All layers in journey order.
    pub const ALL: [Self; 4] = [Self::Discipline, Self::Values, Self::Control, Self::Vision];

    /// Lowercase name matching the stored/serialized form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Discipline => "discipline",
            Self::Values => "values",
            Self::Control => "control",
            Self::Vision => "vision",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only per-user counts and presence flags the resolver works from.
///
/// All fields come from one consistent read snapshot; the resolver never
/// queries on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneySnapshot {
    /// Number of habits
    pub habits: u64,
    /// Number of habit completion rows
    pub completions: u64,
    /// Number of core values
    pub values: u64,
    /// Number of rituals
    pub rituals: u64,
    /// Whether a personal code document exists
    pub has_personal_code: bool,
    /// Number of weekly plans
    pub weekly_plans: u64,
    /// Number of daily plans
    pub daily_plans: u64,
    /// Number of quarterly plans
    pub quarterly_plans: u64,
    /// Number of remarkable aspects
    pub aspects: u64,
    /// Number of milestones
    pub milestones: u64,
    /// Local date of the earliest creation across the six qualifying
    /// collections (completions and milestones are derivative and excluded)
    pub started_on: Option<NaiveDate>,
}

impl JourneySnapshot {
    /// The furthest layer with any qualifying data, defaulting to Discipline.
    ///
    /// Priority order vision > control > values > discipline; the resolver
    /// only reports how far the user has reached, it never gates creating
    /// data in a later layer.
    #[must_use]
    pub const fn current_layer(&self) -> Layer {
        if self.aspects > 0 {
            Layer::Vision
        } else if self.weekly_plans > 0 || self.daily_plans > 0 {
            Layer::Control
        } else if self.values > 0 || self.rituals > 0 || self.has_personal_code {
            Layer::Values
        } else {
            Layer::Discipline
        }
    }

    /// Weighted item count for one layer's progress numerator.
    #[must_use]
    pub const fn layer_items(&self, layer: Layer) -> u64 {
        match layer {
            Layer::Discipline => self.habits + self.completions,
            Layer::Values => {
                self.values + self.rituals + if self.has_personal_code { 1 } else { 0 }
            }
            Layer::Control => self.weekly_plans + self.daily_plans,
            Layer::Vision => self.aspects + self.milestones,
        }
    }
}

/// Progress of one layer: items accumulated against a configured expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerProgress {
    /// Weighted count of entities in the layer
    pub items: u64,
    /// Configured denominator
    pub max: u64,
}

impl LayerProgress {
    /// Completion ratio clamped to `[0, 1]`.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        // Item counts stay far below f64's integer precision limit
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.items as f64 / self.max as f64;
        ratio.min(1.0)
    }
}

/// Per-layer progress, one entry per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerProgressSet {
    /// Discipline layer progress
    pub discipline: LayerProgress,
    /// Values layer progress
    pub values: LayerProgress,
    /// Control layer progress
    pub control: LayerProgress,
    /// Vision layer progress
    pub vision: LayerProgress,
}

impl LayerProgressSet {
    /// Progress entry for one layer.
    #[must_use]
    pub const fn get(&self, layer: Layer) -> LayerProgress {
        match layer {
            Layer::Discipline => self.discipline,
            Layer::Values => self.values,
            Layer::Control => self.control,
            Layer::Vision => self.vision,
        }
    }
}

/// The derived journey position rendered on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyState {
    /// Local date of the first action ever taken, if any
    pub started_on: Option<NaiveDate>,
    /// 1-based day of the journey; 0 when nothing has been created yet
    pub journey_day: u32,
    /// Total nominal journey length in days (120 with default config)
    pub total_days: u32,
    /// Furthest layer reached
    pub current_layer: Layer,
    /// 1-based day within the current layer
    pub day_in_layer: u32,
    /// Nominal duration of the current layer in days
    pub current_layer_days: u32,
    /// Per-layer progress ratios
    pub progress: LayerProgressSet,
    /// Mean of the four clamped layer ratios, in `[0, 1]`
    pub overall_progress: f64,
}

/// Days of all layers strictly before `layer`.
const fn layer_offset(layer: Layer, config: &JourneyConfig) -> u32 {
    let d = &config.durations;
    match layer {
        Layer::Discipline => 0,
        Layer::Values => d.discipline,
        Layer::Control => d.discipline + d.values,
        Layer::Vision => d.discipline + d.values + d.control,
    }
}

/// Nominal duration of `layer` in days.
const fn layer_duration(layer: Layer, config: &JourneyConfig) -> u32 {
    let d = &config.durations;
    match layer {
        Layer::Discipline => d.discipline,
        Layer::Values => d.values,
        Layer::Control => d.control,
        Layer::Vision => d.vision,
    }
}

/// Resolves the full journey state from a snapshot, as of `today`.
#[must_use]
pub fn resolve(snapshot: &JourneySnapshot, config: &JourneyConfig, today: NaiveDate) -> JourneyState {
    let journey_day = snapshot.started_on.map_or(0, |start| {
        let day = dates::days_between(start, today) + 1;
        // A start date in the future can only come from clock skew between
        // writer and reader; floor at 0 rather than going negative.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            day.max(0) as u32
        }
    });

    let current_layer = snapshot.current_layer();
    let day_in_layer = journey_day
        .saturating_sub(layer_offset(current_layer, config))
        .max(1);

    let progress = LayerProgressSet {
        discipline: LayerProgress {
            items: snapshot.layer_items(Layer::Discipline),
            max: config.maxima.discipline,
        },
        values: LayerProgress {
            items: snapshot.layer_items(Layer::Values),
            max: config.maxima.values,
        },
        control: LayerProgress {
            items: snapshot.layer_items(Layer::Control),
            max: config.maxima.control,
        },
        vision: LayerProgress {
            items: snapshot.layer_items(Layer::Vision),
            max: config.maxima.vision,
        },
    };

    let overall_progress = Layer::ALL
        .iter()
        .map(|&layer| progress.get(layer).ratio())
        .sum::<f64>()
        / 4.0;

    JourneyState {
        started_on: snapshot.started_on,
        journey_day,
        total_days: config.durations.total(),
        current_layer,
        day_in_layer,
        current_layer_days: layer_duration(current_layer, config),
        progress,
        overall_progress,
    }
}

/// Loads a consistent per-user snapshot with parallel independent reads.
///
/// The collections are causally unrelated (all scoped to one user, read
/// only), so the counts, the personal-code presence check, and the
/// earliest-creation probes all fan out concurrently.
pub async fn load_snapshot(db: &DatabaseConnection, user_id: &str) -> Result<JourneySnapshot> {
    let (
        habits,
        completions,
        values,
        rituals,
        personal_codes,
        weekly_plans,
        daily_plans,
        quarterly_plans,
        aspects,
        milestones,
    ) = tokio::try_join!(
        Habit::find()
            .filter(habit::Column::UserId.eq(user_id))
            .count(db),
        Completion::find()
            .filter(completion::Column::UserId.eq(user_id))
            .count(db),
        Value::find()
            .filter(value::Column::UserId.eq(user_id))
            .count(db),
        Ritual::find()
            .filter(ritual::Column::UserId.eq(user_id))
            .count(db),
        PersonalCode::find()
            .filter(personal_code::Column::UserId.eq(user_id))
            .count(db),
        WeeklyPlan::find()
            .filter(weekly_plan::Column::UserId.eq(user_id))
            .count(db),
        DailyPlan::find()
            .filter(daily_plan::Column::UserId.eq(user_id))
            .count(db),
        QuarterlyPlan::find()
            .filter(quarterly_plan::Column::UserId.eq(user_id))
            .count(db),
        RemarkableAspect::find()
            .filter(remarkable_aspect::Column::UserId.eq(user_id))
            .count(db),
        Milestone::find()
            .filter(milestone::Column::UserId.eq(user_id))
            .count(db),
    )?;

    // Earliest creation instant across the six qualifying collections.
    // Completions and milestones are excluded by design: they are derivative
    // of habits and aspects and cannot predate them.
    let (first_habit, first_value, first_ritual, first_weekly, first_daily, first_aspect) = tokio::try_join!(
        Habit::find()
            .filter(habit::Column::UserId.eq(user_id))
            .order_by_asc(habit::Column::CreatedAt)
            .one(db),
        Value::find()
            .filter(value::Column::UserId.eq(user_id))
            .order_by_asc(value::Column::CreatedAt)
            .one(db),
        Ritual::find()
            .filter(ritual::Column::UserId.eq(user_id))
            .order_by_asc(ritual::Column::CreatedAt)
            .one(db),
        WeeklyPlan::find()
            .filter(weekly_plan::Column::UserId.eq(user_id))
            .order_by_asc(weekly_plan::Column::CreatedAt)
            .one(db),
        DailyPlan::find()
            .filter(daily_plan::Column::UserId.eq(user_id))
            .order_by_asc(daily_plan::Column::CreatedAt)
            .one(db),
        RemarkableAspect::find()
            .filter(remarkable_aspect::Column::UserId.eq(user_id))
            .order_by_asc(remarkable_aspect::Column::CreatedAt)
            .one(db),
    )?;

    let started_on = [
        first_habit.map(|m| m.created_at),
        first_value.map(|m| m.created_at),
        first_ritual.map(|m| m.created_at),
        first_weekly.map(|m| m.created_at),
        first_daily.map(|m| m.created_at),
        first_aspect.map(|m| m.created_at),
    ]
    .into_iter()
    .flatten()
    .min()
    .map(dates::local_date_of);

    debug!(user_id, habits, completions, aspects, ?started_on, "loaded journey snapshot");

    Ok(JourneySnapshot {
        habits,
        completions,
        values,
        rituals,
        has_personal_code: personal_codes > 0,
        weekly_plans,
        daily_plans,
        quarterly_plans,
        aspects,
        milestones,
        started_on,
    })
}
