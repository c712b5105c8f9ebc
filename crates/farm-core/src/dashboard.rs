//! Dashboard
//!
//! The cycle list is fetched in one go; filtering, sorting and the summary
//! cards are computed locally. The optimistic helpers patch the in-memory
//! list after a successful write so the page does not refetch.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::{Activity, CycleStatus, DomainError, DomainResult, Entity, ProductionCycle};

/// Upcoming-harvest window in days
pub const UPCOMING_HARVEST_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleSort {
    #[default]
    PlantingDate,
    ExpectedHarvest,
    LandSize,
    Variety,
}

impl CycleSort {
    pub const ALL: [CycleSort; 4] = [
        CycleSort::PlantingDate,
        CycleSort::ExpectedHarvest,
        CycleSort::LandSize,
        CycleSort::Variety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleSort::PlantingDate => "planting",
            CycleSort::ExpectedHarvest => "harvest",
            CycleSort::LandSize => "land",
            CycleSort::Variety => "variety",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleSort::PlantingDate => "Planting date",
            CycleSort::ExpectedHarvest => "Expected harvest",
            CycleSort::LandSize => "Land size",
            CycleSort::Variety => "Variety",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CycleQuery {
    pub status: Option<CycleStatus>,
    pub search: String,
    pub sort: CycleSort,
    pub descending: bool,
}

impl CycleQuery {
    pub fn matches(&self, cycle: &ProductionCycle) -> bool {
        if self.status.is_some_and(|status| cycle.status != status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [Some(cycle.variety_name()), cycle.location.as_deref(), cycle.notes.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filtered and sorted copy of `cycles`
    pub fn apply(&self, cycles: &[ProductionCycle]) -> Vec<ProductionCycle> {
        let mut result: Vec<ProductionCycle> = cycles.iter().filter(|c| self.matches(c)).cloned().collect();
        result.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        result
    }

    fn compare(&self, a: &ProductionCycle, b: &ProductionCycle) -> Ordering {
        match self.sort {
            CycleSort::PlantingDate => a.planting_date.cmp(&b.planting_date),
            // Cycles without a date go last
            CycleSort::ExpectedHarvest => match (a.expected_harvest_date, b.expected_harvest_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            CycleSort::LandSize => a.land_size.total_cmp(&b.land_size),
            CycleSort::Variety => a.variety_name().to_lowercase().cmp(&b.variety_name().to_lowercase()),
        }
    }
}

/// Swap in the server's copy of an entity
pub fn replace_entity<T: Entity>(items: &mut [T], updated: T) -> DomainResult<()> {
    let slot = items
        .iter_mut()
        .find(|item| item.id() == updated.id())
        .ok_or_else(|| DomainError::NotFound(updated.id().to_string()))?;
    *slot = updated;
    Ok(())
}

/// Replace an entity, or push it when it is new
pub fn upsert_entity<T: Entity>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

pub fn remove_entity<T: Entity>(items: &mut Vec<T>, id: &str) -> DomainResult<T> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
    Ok(items.remove(index))
}

pub fn upsert_activity(cycles: &mut [ProductionCycle], cycle_id: &str, activity: Activity) -> DomainResult<()> {
    let cycle = find_cycle(cycles, cycle_id)?;
    upsert_entity(&mut cycle.activities, activity);
    Ok(())
}

pub fn remove_activity(cycles: &mut [ProductionCycle], cycle_id: &str, activity_id: &str) -> DomainResult<Activity> {
    let cycle = find_cycle(cycles, cycle_id)?;
    remove_entity(&mut cycle.activities, activity_id)
}

fn find_cycle<'a>(cycles: &'a mut [ProductionCycle], id: &str) -> DomainResult<&'a mut ProductionCycle> {
    cycles
        .iter_mut()
        .find(|cycle| cycle.id == id)
        .ok_or_else(|| DomainError::NotFound(id.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingHarvest {
    pub cycle_id: String,
    pub variety: String,
    pub date: NaiveDate,
    pub days_remaining: i64,
}

/// Numbers behind the dashboard cards
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub active: usize,
    pub harvested: usize,
    pub archived: usize,
    pub active_acres: f64,
    pub total_cost: f64,
    pub expected_revenue: f64,
    pub upcoming_harvests: Vec<UpcomingHarvest>,
}

impl DashboardSummary {
    pub fn from_cycles(cycles: &[ProductionCycle], today: NaiveDate) -> Self {
        let mut summary = Self::default();
        for cycle in cycles {
            summary.total_cost += cycle.total_cost();
            match cycle.status {
                CycleStatus::Active => {
                    summary.active += 1;
                    summary.active_acres += cycle.land_size;
                    summary.expected_revenue += cycle.expected_revenue().unwrap_or(0.0);
                    if let Some(date) = cycle.expected_harvest_date {
                        let days_remaining = (date - today).num_days();
                        if (0..=UPCOMING_HARVEST_DAYS).contains(&days_remaining) {
                            summary.upcoming_harvests.push(UpcomingHarvest {
                                cycle_id: cycle.id.clone(),
                                variety: cycle.variety_name().to_string(),
                                date,
                                days_remaining,
                            });
                        }
                    }
                }
                CycleStatus::Harvested => summary.harvested += 1,
                CycleStatus::Archived => summary.archived += 1,
            }
        }
        summary.upcoming_harvests.sort_by_key(|harvest| harvest.date);
        summary
    }

    pub fn total(&self) -> usize {
        self.active + self.harvested + self.archived
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityType, CropVariety, CropVarietyRef};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cycle(id: &str, variety: &str, acres: f64, planted: NaiveDate) -> ProductionCycle {
        let variety = CropVarietyRef::Embedded(CropVariety {
            id: format!("v-{}", variety),
            name: variety.to_string(),
            ..CropVariety::default()
        });
        ProductionCycle::new(id, variety, acres, planted)
    }

    fn sample() -> Vec<ProductionCycle> {
        let mut a = cycle("a", "Shangi", 2.0, date(2024, 3, 1));
        a.location = Some("Nyandarua".to_string());
        a.expected_harvest_date = Some(date(2024, 5, 25));
        let mut b = cycle("b", "Dutch Robijn", 5.0, date(2024, 1, 10));
        b.status = CycleStatus::Harvested;
        let mut c = cycle("c", "Markies", 1.0, date(2024, 2, 15));
        c.notes = Some("near the river".to_string());
        c.expected_harvest_date = Some(date(2024, 6, 14));
        vec![a, b, c]
    }

    fn ids(cycles: &[ProductionCycle]) -> Vec<&str> {
        cycles.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let cycles = sample();
        let active = CycleQuery { status: Some(CycleStatus::Active), ..CycleQuery::default() };
        assert_eq!(ids(&active.apply(&cycles)), vec!["c", "a"]);

        let search = CycleQuery { search: "RIVER".to_string(), ..CycleQuery::default() };
        assert_eq!(ids(&search.apply(&cycles)), vec!["c"]);

        let by_location = CycleQuery { search: "nyand".to_string(), ..CycleQuery::default() };
        assert_eq!(ids(&by_location.apply(&cycles)), vec!["a"]);
    }

    #[test]
    fn test_sorting() {
        let cycles = sample();
        let land = CycleQuery { sort: CycleSort::LandSize, descending: true, ..CycleQuery::default() };
        assert_eq!(ids(&land.apply(&cycles)), vec!["b", "a", "c"]);

        let harvest = CycleQuery { sort: CycleSort::ExpectedHarvest, ..CycleQuery::default() };
        assert_eq!(ids(&harvest.apply(&cycles)), vec!["a", "c", "b"]);

        let variety = CycleQuery { sort: CycleSort::Variety, ..CycleQuery::default() };
        assert_eq!(ids(&variety.apply(&cycles)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_replace_and_remove_entity() {
        let mut cycles = sample();
        let mut updated = cycles[0].clone();
        updated.status = CycleStatus::Archived;
        replace_entity(&mut cycles, updated).unwrap();
        assert_eq!(cycles[0].status, CycleStatus::Archived);

        let missing = cycle("zz", "Unica", 1.0, date(2024, 1, 1));
        assert_eq!(replace_entity(&mut cycles, missing), Err(DomainError::NotFound("zz".to_string())));

        let removed = remove_entity(&mut cycles, "b").unwrap();
        assert_eq!(removed.id, "b");
        assert_eq!(cycles.len(), 2);
        assert!(remove_entity(&mut cycles, "b").is_err());
    }

    #[test]
    fn test_activity_helpers() {
        let mut cycles = sample();
        let mut activity = Activity::new(ActivityType::Weeding, "First weeding", 3_000.0);
        activity.id = "act1".to_string();
        upsert_activity(&mut cycles, "a", activity.clone()).unwrap();
        assert_eq!(cycles[0].activities.len(), 1);

        activity.cost = 3_500.0;
        upsert_activity(&mut cycles, "a", activity).unwrap();
        assert_eq!(cycles[0].activities.len(), 1);
        assert_eq!(cycles[0].total_cost(), 3_500.0);

        remove_activity(&mut cycles, "a", "act1").unwrap();
        assert!(cycles[0].activities.is_empty());
        assert_eq!(
            upsert_activity(&mut cycles, "nope", Activity::default()),
            Err(DomainError::NotFound("nope".to_string()))
        );
        assert_eq!(
            remove_activity(&mut cycles, "a", "act1"),
            Err(DomainError::NotFound("act1".to_string()))
        );
    }

    #[test]
    fn test_summary_counts_and_upcoming_harvests() {
        let mut cycles = sample();
        cycles[0].expected_yield = Some(200.0);
        cycles[0].expected_price_per_bag = Some(2_500.0);
        let mut activity = Activity::new(ActivityType::Planting, "Planting", 10_000.0);
        activity.id = "p".to_string();
        cycles[1].activities.push(activity);

        let summary = DashboardSummary::from_cycles(&cycles, date(2024, 5, 20));
        assert_eq!((summary.active, summary.harvested, summary.archived), (2, 1, 0));
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.active_acres, 3.0);
        assert_eq!(summary.total_cost, 10_000.0);
        assert_eq!(summary.expected_revenue, 500_000.0);

        let upcoming: Vec<_> = summary.upcoming_harvests.iter().map(|h| (h.cycle_id.as_str(), h.days_remaining)).collect();
        assert_eq!(upcoming, vec![("a", 5), ("c", 25)]);
    }

    #[test]
    fn test_past_harvest_not_upcoming() {
        let summary = DashboardSummary::from_cycles(&sample(), date(2024, 6, 1));
        let upcoming: Vec<_> = summary.upcoming_harvests.iter().map(|h| h.cycle_id.as_str()).collect();
        assert_eq!(upcoming, vec!["c"]);
    }
}
