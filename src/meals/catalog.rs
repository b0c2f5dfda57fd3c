use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A food as listed in the catalog. Values are per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub name: String,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fats: f64,
    pub fiber: f64,
    pub calories: f64,
    pub quantity: String,
    pub suitable_for_diabetes: bool,
}

/// Read-only lookup of the foods a planner can use.
#[derive(Debug)]
pub struct Catalog {
    foods: Vec<FoodItem>,
}

lazy_static! {
    static ref BUILTIN: Catalog = Catalog {
        foods: vec![
            food(1, "دجاج مشوي", 31.0, 0.0, 3.6, 0.0, 165.0, true),
            food(2, "أرز بني", 2.6, 23.0, 0.9, 1.8, 112.0, true),
            food(3, "سلمون مدخن", 25.0, 0.0, 4.3, 0.0, 142.0, true),
            food(4, "خبز أبيض", 9.0, 49.0, 3.2, 2.7, 265.0, false),
            food(5, "بروكلي", 2.8, 7.0, 0.4, 2.6, 34.0, true),
            food(6, "تونة معلبة", 29.0, 0.0, 1.3, 0.0, 132.0, true),
            food(7, "موز", 1.1, 23.0, 0.3, 2.6, 89.0, false),
            food(8, "لوز", 21.0, 22.0, 49.0, 12.0, 576.0, true),
            food(9, "بيض مسلوق", 13.0, 1.1, 11.0, 0.0, 155.0, true),
            food(10, "أفوكادو", 2.0, 9.0, 15.0, 7.0, 160.0, true),
        ],
    };
}

#[allow(clippy::too_many_arguments)]
fn food(
    id: u32,
    name: &str,
    protein: f64,
    carbohydrates: f64,
    fats: f64,
    fiber: f64,
    calories: f64,
    suitable_for_diabetes: bool,
) -> FoodItem {
    FoodItem {
        id,
        name: name.to_string(),
        protein,
        carbohydrates,
        fats,
        fiber,
        calories,
        quantity: "100g".to_string(),
        suitable_for_diabetes,
    }
}

impl Catalog {
    /// The fixed sample catalog shared by every planner.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn lookup(&self, id: u32) -> Option<&FoodItem> {
        self.foods.iter().find(|f| f.id == id)
    }

    pub fn all(&self) -> &[FoodItem] {
        &self.foods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_ten_foods_in_id_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.all().len(), 10);
        let ids: Vec<u32> = catalog.all().iter().map(|f| f.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn lookup_returns_catalog_values() {
        let chicken = Catalog::builtin().lookup(1).expect("id 1");
        assert_eq!(chicken.name, "دجاج مشوي");
        assert_eq!(chicken.protein, 31.0);
        assert_eq!(chicken.fats, 3.6);
        assert_eq!(chicken.calories, 165.0);
        assert_eq!(chicken.quantity, "100g");
        assert!(chicken.suitable_for_diabetes);

        let bread = Catalog::builtin().lookup(4).expect("id 4");
        assert!(!bread.suitable_for_diabetes);
    }

    #[test]
    fn lookup_misses_unknown_ids() {
        assert!(Catalog::builtin().lookup(0).is_none());
        assert!(Catalog::builtin().lookup(11).is_none());
    }
}
