use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::PlannerError;
use crate::meals::catalog::FoodItem;

/// One of the three fixed meal buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Meal1,
    Meal2,
    Meal3,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Meal1, MealSlot::Meal2, MealSlot::Meal3];

    pub fn as_str(self) -> &'static str {
        match self {
            MealSlot::Meal1 => "meal1",
            MealSlot::Meal2 => "meal2",
            MealSlot::Meal3 => "meal3",
        }
    }

    /// Title shown to the user for this slot.
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Meal1 => "وجبة 1",
            MealSlot::Meal2 => "وجبة 2",
            MealSlot::Meal3 => "وجبة 3",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            MealSlot::Meal1 => 0,
            MealSlot::Meal2 => 1,
            MealSlot::Meal3 => 2,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "meal1" => Ok(MealSlot::Meal1),
            "meal2" => Ok(MealSlot::Meal2),
            "meal3" => Ok(MealSlot::Meal3),
            other => Err(PlannerError::InvalidSlotReference(other.to_string())),
        }
    }
}

/// Identifies a single addition of a food to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(Uuid);

impl OccurrenceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OccurrenceId {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| PlannerError::InvalidOccurrenceReference(s.to_string()))
    }
}

/// A catalog food placed in a slot. The food is copied at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub occurrence_id: OccurrenceId,
    pub slot: MealSlot,
    #[serde(flatten)]
    pub food: FoodItem,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

impl MealEntry {
    pub(crate) fn new(slot: MealSlot, food: FoodItem) -> Self {
        Self {
            occurrence_id: OccurrenceId::generate(),
            slot,
            food,
            added_at: OffsetDateTime::now_utc(),
        }
    }
}
