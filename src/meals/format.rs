use std::fmt;

use crate::meals::dto::MealEntry;
use crate::meals::totals::NutrientTotals;

pub fn grams(value: f64) -> String {
    format!("{value:.1}g")
}

pub fn diabetes_mark(suitable: bool) -> &'static str {
    if suitable {
        "✅"
    } else {
        "❌"
    }
}

/// Calories are whole numbers, macros one decimal in grams.
impl fmt::Display for NutrientTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} سعرة حرارية | بروتين {} | كربوهيدرات {} | دهون {} | ألياف {}",
            self.calories,
            grams(self.protein),
            grams(self.carbohydrates),
            grams(self.fats),
            grams(self.fiber),
        )
    }
}

/// One table row: name, diabetes mark, serving, calories, then macros.
impl fmt::Display for MealEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let food = &self.food;
        write!(
            f,
            "{} {} | {} | {} | {} | {} | {} | {} | {}",
            food.name,
            diabetes_mark(food.suitable_for_diabetes),
            food.quantity,
            food.calories,
            grams(food.protein),
            grams(food.carbohydrates),
            grams(food.fats),
            grams(food.fiber),
            self.occurrence_id,
        )
    }
}
