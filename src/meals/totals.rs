use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::meals::catalog::FoodItem;
use crate::meals::dto::MealEntry;

/// Anything carrying the five summed nutrient fields.
pub trait Nutrients {
    fn calories(&self) -> f64;
    fn protein(&self) -> f64;
    fn carbohydrates(&self) -> f64;
    fn fats(&self) -> f64;
    fn fiber(&self) -> f64;
}

impl Nutrients for FoodItem {
    fn calories(&self) -> f64 {
        self.calories
    }
    fn protein(&self) -> f64 {
        self.protein
    }
    fn carbohydrates(&self) -> f64 {
        self.carbohydrates
    }
    fn fats(&self) -> f64 {
        self.fats
    }
    fn fiber(&self) -> f64 {
        self.fiber
    }
}

impl Nutrients for MealEntry {
    fn calories(&self) -> f64 {
        self.food.calories
    }
    fn protein(&self) -> f64 {
        self.food.protein
    }
    fn carbohydrates(&self) -> f64 {
        self.food.carbohydrates
    }
    fn fats(&self) -> f64 {
        self.food.fats
    }
    fn fiber(&self) -> f64 {
        self.food.fiber
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fats: f64,
    pub fiber: f64,
}

impl NutrientTotals {
    pub const ZERO: NutrientTotals = NutrientTotals {
        calories: 0.0,
        protein: 0.0,
        carbohydrates: 0.0,
        fats: 0.0,
        fiber: 0.0,
    };

    fn of<N: Nutrients + ?Sized>(item: &N) -> Self {
        Self {
            calories: item.calories(),
            protein: item.protein(),
            carbohydrates: item.carbohydrates(),
            fats: item.fats(),
            fiber: item.fiber(),
        }
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, rhs: Self) -> Self::Output {
        NutrientTotals {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbohydrates: self.carbohydrates + rhs.carbohydrates,
            fats: self.fats + rhs.fats,
            fiber: self.fiber + rhs.fiber,
        }
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientTotals::ZERO, Add::add)
    }
}

/// Sums each nutrient field over `items`, left to right from zero.
pub fn totals<'a, N, I>(items: I) -> NutrientTotals
where
    N: Nutrients + 'a,
    I: IntoIterator<Item = &'a N>,
{
    items.into_iter().map(NutrientTotals::of).sum()
}
