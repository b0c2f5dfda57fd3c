use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::meals::catalog::Catalog;
use crate::meals::dto::{MealEntry, MealSlot, OccurrenceId};
use crate::meals::events::{Notifier, PlanEvent, PlanEventKind, TracingNotifier};
use crate::meals::totals::{totals, NutrientTotals};

/// Three ordered meal slots filled from a catalog.
pub struct MealPlanner {
    catalog: &'static Catalog,
    slots: [Vec<MealEntry>; 3],
    notifier: Arc<dyn Notifier>,
}

impl Default for MealPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MealPlanner {
    pub fn new() -> Self {
        Self::with_notifier(Arc::new(TracingNotifier))
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            catalog: Catalog::builtin(),
            slots: Default::default(),
            notifier,
        }
    }

    /// Appends a copy of catalog food `food_id` to `slot`.
    #[instrument(skip(self))]
    pub fn add_food(&mut self, slot: MealSlot, food_id: u32) -> PlannerResult<MealEntry> {
        let Some(food) = self.catalog.lookup(food_id) else {
            warn!(food_id, %slot, "unknown food");
            return Err(PlannerError::InvalidFoodReference(food_id.into()));
        };

        let entry = MealEntry::new(slot, food.clone());
        self.slots[slot.index()].push(entry.clone());
        debug!(occurrence = %entry.occurrence_id, len = self.slots[slot.index()].len(), "food added");

        self.notifier
            .notify(&PlanEvent::new(PlanEventKind::FoodAdded, &entry.food.name, slot));
        Ok(entry)
    }

    /// Removes one occurrence. Unknown ids leave the slot as is and return false.
    #[instrument(skip(self))]
    pub fn remove_food(&mut self, slot: MealSlot, occurrence_id: OccurrenceId) -> bool {
        let entries = &mut self.slots[slot.index()];
        let Some(pos) = entries.iter().position(|e| e.occurrence_id == occurrence_id) else {
            debug!("nothing to remove");
            return false;
        };

        let removed = entries.remove(pos);
        debug!(len = entries.len(), "food removed");
        self.notifier
            .notify(&PlanEvent::new(PlanEventKind::FoodRemoved, &removed.food.name, slot));
        true
    }

    pub fn slot(&self, slot: MealSlot) -> &[MealEntry] {
        &self.slots[slot.index()]
    }

    pub fn slot_totals(&self, slot: MealSlot) -> NutrientTotals {
        totals(self.slot(slot))
    }

    pub fn grand_totals(&self) -> NutrientTotals {
        totals(self.slots.iter().flatten())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }

    pub fn reset(&mut self) {
        for entries in &mut self.slots {
            entries.clear();
        }
        debug!("planner reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::events::tests::RecordingNotifier;
    use crate::meals::totals::tests::assert_close;

    fn recording() -> (MealPlanner, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (MealPlanner::with_notifier(notifier.clone()), notifier)
    }

    fn snapshot(planner: &MealPlanner) -> Vec<Vec<MealEntry>> {
        MealSlot::ALL.iter().map(|s| planner.slot(*s).to_vec()).collect()
    }

    #[test]
    fn grilled_chicken_twice_then_once() {
        let mut planner = MealPlanner::default();
        let first = planner.add_food(MealSlot::Meal1, 1).expect("add");
        let second = planner.add_food(MealSlot::Meal1, 1).expect("add");
        assert_ne!(first.occurrence_id, second.occurrence_id);
        assert_eq!(planner.slot(MealSlot::Meal1).len(), 2);

        assert_close(
            &planner.slot_totals(MealSlot::Meal1),
            &NutrientTotals {
                calories: 330.0,
                protein: 62.0,
                carbohydrates: 0.0,
                fats: 7.2,
                fiber: 0.0,
            },
        );

        assert!(planner.remove_food(MealSlot::Meal1, first.occurrence_id));
        assert_eq!(
            planner.slot_totals(MealSlot::Meal1),
            NutrientTotals {
                calories: 165.0,
                protein: 31.0,
                carbohydrates: 0.0,
                fats: 3.6,
                fiber: 0.0,
            }
        );
        assert_eq!(planner.slot(MealSlot::Meal1)[0].occurrence_id, second.occurrence_id);
    }

    #[test]
    fn white_bread_keeps_diabetes_flag() {
        let mut planner = MealPlanner::default();
        let entry = planner.add_food(MealSlot::Meal2, 4).expect("add");
        assert_eq!(entry.food.name, "خبز أبيض");
        assert!(!entry.food.suitable_for_diabetes);
        assert_eq!(entry.slot, MealSlot::Meal2);
        assert!(!planner.slot(MealSlot::Meal2)[0].food.suitable_for_diabetes);
    }

    #[test]
    fn unknown_food_leaves_every_slot_untouched() {
        let (mut planner, notifier) = recording();
        planner.add_food(MealSlot::Meal1, 2).expect("add");
        planner.add_food(MealSlot::Meal3, 9).expect("add");
        let before = snapshot(&planner);
        let seen = notifier.kinds().len();

        let err = planner.add_food(MealSlot::Meal2, 99).unwrap_err();
        assert_eq!(err, PlannerError::InvalidFoodReference(99));
        assert_eq!(snapshot(&planner), before);
        assert_eq!(notifier.kinds().len(), seen);
    }

    #[test]
    fn removing_unknown_occurrence_is_a_noop() {
        let (mut planner, notifier) = recording();
        planner.add_food(MealSlot::Meal1, 5).expect("add");
        let before = snapshot(&planner);

        assert!(!planner.remove_food(MealSlot::Meal1, OccurrenceId::generate()));
        assert_eq!(snapshot(&planner), before);
        assert_eq!(notifier.kinds().len(), 1);
    }

    #[test]
    fn occurrence_is_only_removed_from_its_own_slot() {
        let mut planner = MealPlanner::default();
        let entry = planner.add_food(MealSlot::Meal1, 3).expect("add");
        assert!(!planner.remove_food(MealSlot::Meal2, entry.occurrence_id));
        assert_eq!(planner.slot(MealSlot::Meal1).len(), 1);
    }

    #[test]
    fn insertion_order_is_display_order() {
        let mut planner = MealPlanner::default();
        for id in [7, 2, 10, 2] {
            planner.add_food(MealSlot::Meal3, id).expect("add");
        }
        let ids: Vec<u32> = planner.slot(MealSlot::Meal3).iter().map(|e| e.food.id).collect();
        assert_eq!(ids, vec![7, 2, 10, 2]);
    }

    #[test]
    fn slot_count_tracks_adds_minus_removes() {
        let mut planner = MealPlanner::default();
        let mut expected = [0usize; 3];
        let mut added: Vec<(MealSlot, OccurrenceId)> = Vec::new();

        // Deterministic mix of adds, real removes and bogus removes.
        for step in 0..60u32 {
            let slot = MealSlot::ALL[(step % 3) as usize];
            match step % 5 {
                0 | 1 | 3 => {
                    let e = planner.add_food(slot, step % 10 + 1).expect("add");
                    expected[slot.index()] += 1;
                    added.push((slot, e.occurrence_id));
                }
                2 => {
                    if let Some((s, id)) = added.pop() {
                        assert!(planner.remove_food(s, id));
                        expected[s.index()] -= 1;
                    }
                }
                _ => assert!(!planner.remove_food(slot, OccurrenceId::generate())),
            }
            for s in MealSlot::ALL {
                assert_eq!(planner.slot(s).len(), expected[s.index()]);
            }
        }
    }

    #[test]
    fn grand_totals_equal_sum_of_slot_totals() {
        let mut planner = MealPlanner::default();
        for (slot, id) in [
            (MealSlot::Meal1, 1),
            (MealSlot::Meal1, 2),
            (MealSlot::Meal2, 8),
            (MealSlot::Meal3, 4),
            (MealSlot::Meal3, 9),
            (MealSlot::Meal3, 10),
        ] {
            planner.add_food(slot, id).expect("add");
        }

        let by_slot: NutrientTotals = MealSlot::ALL.iter().map(|s| planner.slot_totals(*s)).sum();
        assert_close(&planner.grand_totals(), &by_slot);
    }

    #[test]
    fn empty_planner_has_zero_totals() {
        let planner = MealPlanner::default();
        assert!(planner.is_empty());
        assert_eq!(planner.grand_totals(), NutrientTotals::ZERO);
        for s in MealSlot::ALL {
            assert_eq!(planner.slot_totals(s), NutrientTotals::ZERO);
        }
    }

    #[test]
    fn events_follow_successful_changes() {
        let (mut planner, notifier) = recording();
        let entry = planner.add_food(MealSlot::Meal2, 7).expect("add");
        planner.remove_food(MealSlot::Meal2, entry.occurrence_id);

        assert_eq!(
            notifier.kinds(),
            vec![
                (PlanEventKind::FoodAdded, "موز".to_string(), "وجبة 2".to_string()),
                (PlanEventKind::FoodRemoved, "موز".to_string(), "وجبة 2".to_string()),
            ]
        );
    }

    #[test]
    fn reset_empties_all_slots() {
        let mut planner = MealPlanner::default();
        planner.add_food(MealSlot::Meal1, 1).expect("add");
        planner.add_food(MealSlot::Meal3, 6).expect("add");
        assert!(!planner.is_empty());

        planner.reset();
        assert!(planner.is_empty());
        assert_eq!(planner.grand_totals(), NutrientTotals::ZERO);
    }
}
