pub mod catalog;
pub mod dto;
pub mod events;
pub mod format;
pub mod planner;
pub mod totals;

pub use catalog::{Catalog, FoodItem};
pub use dto::{MealEntry, MealSlot, OccurrenceId};
pub use events::{Notifier, NullNotifier, PlanEvent, PlanEventKind, TracingNotifier};
pub use planner::MealPlanner;
pub use totals::{totals, NutrientTotals, Nutrients};
