use serde::Serialize;
use time::OffsetDateTime;
use tracing::info;

use crate::meals::dto::MealSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanEventKind {
    FoodAdded,
    FoodRemoved,
}

/// User-facing notice raised after a successful add or remove.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEvent {
    pub kind: PlanEventKind,
    pub food_name: String,
    pub slot: MealSlot,
    pub slot_label: String,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

impl PlanEvent {
    pub(crate) fn new(kind: PlanEventKind, food_name: &str, slot: MealSlot) -> Self {
        Self {
            kind,
            food_name: food_name.to_string(),
            slot,
            slot_label: slot.label().to_string(),
            at: OffsetDateTime::now_utc(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            PlanEventKind::FoodAdded => "تم إضافة الطعام بنجاح",
            PlanEventKind::FoodRemoved => "تم حذف الطعام",
        }
    }

    pub fn description(&self) -> String {
        match self.kind {
            PlanEventKind::FoodAdded => {
                format!("تم إضافة {} إلى {}", self.food_name, self.slot_label)
            }
            PlanEventKind::FoodRemoved => "تم إزالة الطعام من الوجبة بنجاح".to_string(),
        }
    }
}

/// Receives plan events. Presentation decides what to do with them.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &PlanEvent);
}

/// Writes each event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &PlanEvent) {
        info!(
            kind = ?event.kind,
            food = %event.food_name,
            slot = %event.slot,
            title = event.title(),
            "{}",
            event.description()
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: &PlanEvent) {}
}
