pub mod config;
pub mod error;
pub mod meals;
pub mod shell;
pub mod state;

pub use error::{PlannerError, PlannerResult};
pub use meals::{MealEntry, MealPlanner, MealSlot, NutrientTotals};
