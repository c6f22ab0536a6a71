// Status/cost classification for walkthrough items
//
// Item ids carry the component they describe ("roof-condition",
// "electrical-panel"); the classifier parses that id into an ItemCategory
// once, then maps (category, status) onto the injected cost schedule. The
// match on category is exhaustive so adding a category without a cost band
// fails to compile instead of silently landing in the default band.

use crate::config::CostSchedule;
use crate::models::{CostRange, ItemStatus};

/// Building component recognized from an item id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemCategory {
    Roof,
    Foundation,
    ElectricalPanel,
    Hvac,
    WaterHeater,
    Other,
}

impl ItemCategory {
    /// Parse an item id, case-insensitively.
    ///
    /// Order matters: "water-heater" must win before any broader match, and
    /// ids that mention none of the known components classify as Other.
    pub fn parse(item_id: &str) -> Self {
        let id = item_id.to_lowercase();

        if id.contains("water-heater") {
            ItemCategory::WaterHeater
        } else if id.contains("roof") {
            ItemCategory::Roof
        } else if id.contains("foundation") {
            ItemCategory::Foundation
        } else if id.contains("panel") {
            ItemCategory::ElectricalPanel
        } else if id.contains("hvac") || id.contains("ac-") {
            ItemCategory::Hvac
        } else {
            ItemCategory::Other
        }
    }
}

/// Result of classifying a status change: the fields to write onto the item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAssessment {
    pub estimated_repair_cost: Option<CostRange>,
    pub negotiation_leverage: Option<String>,
}

impl StatusAssessment {
    fn clear() -> Self {
        Self {
            estimated_repair_cost: None,
            negotiation_leverage: None,
        }
    }
}

/// Classify a status change for an item.
///
/// Pure function of (item id, requested status, schedule): re-applying the
/// same status always produces identical fields.
pub fn assess_status(item_id: &str, status: ItemStatus, costs: &CostSchedule) -> StatusAssessment {
    let category = ItemCategory::parse(item_id);

    match status {
        ItemStatus::Critical => {
            let (cost, leverage) = critical_band(category, costs);
            StatusAssessment {
                estimated_repair_cost: Some(cost),
                negotiation_leverage: Some(leverage.to_string()),
            }
        }
        ItemStatus::Warning => {
            let cost = match category {
                ItemCategory::Roof => costs.warning_roof,
                ItemCategory::Foundation
                | ItemCategory::ElectricalPanel
                | ItemCategory::Hvac
                | ItemCategory::WaterHeater
                | ItemCategory::Other => costs.warning_default,
            };
            StatusAssessment {
                estimated_repair_cost: Some(cost),
                negotiation_leverage: None,
            }
        }
        // Marking an item fine (or un-assessed) clears any earlier estimate
        ItemStatus::Normal | ItemStatus::Pending => StatusAssessment::clear(),
    }
}

fn critical_band(category: ItemCategory, costs: &CostSchedule) -> (CostRange, &'static str) {
    match category {
        ItemCategory::Roof => (
            costs.critical_roof,
            "A failing roof is a strong negotiation point: ask for a replacement credit \
             or a price reduction covering the full re-roof estimate.",
        ),
        ItemCategory::Foundation => (
            costs.critical_foundation,
            "Structural foundation issues justify a major price concession, and many \
             buyers walk away entirely. Get a structural engineer's bid before countering.",
        ),
        ItemCategory::ElectricalPanel => (
            costs.critical_electrical_panel,
            "An outdated or unsafe panel is a common insurer red flag. Ask the seller \
             to replace it before closing or credit the replacement cost.",
        ),
        ItemCategory::Hvac => (
            costs.critical_hvac,
            "A failed HVAC system supports asking for a full replacement credit, since \
             partial repairs on aged systems rarely hold up.",
        ),
        ItemCategory::WaterHeater => (
            costs.critical_water_heater,
            "Water heater replacement is routine; ask for a closing credit rather than \
             delaying on a seller repair.",
        ),
        ItemCategory::Other => (
            costs.critical_default,
            "Document the defect with photos and request a repair credit in your offer.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs() -> CostSchedule {
        CostSchedule::default()
    }

    #[test]
    fn test_critical_roof_band() {
        let assessment = assess_status("roof-condition", ItemStatus::Critical, &costs());
        assert_eq!(
            assessment.estimated_repair_cost,
            Some(CostRange::new(8000, 15000))
        );
        assert!(assessment.negotiation_leverage.is_some());
    }

    #[test]
    fn test_critical_panel_band() {
        let assessment = assess_status("electrical-panel", ItemStatus::Critical, &costs());
        assert_eq!(
            assessment.estimated_repair_cost,
            Some(CostRange::new(2500, 4000))
        );
    }

    #[test]
    fn test_critical_unmatched_id_gets_default_band() {
        let assessment = assess_status("kitchen-cabinets", ItemStatus::Critical, &costs());
        assert_eq!(
            assessment.estimated_repair_cost,
            Some(CostRange::new(1000, 3000))
        );
        assert!(assessment.negotiation_leverage.is_some());
    }

    #[test]
    fn test_warning_roof_vs_everything_else() {
        let roof = assess_status("roof-condition", ItemStatus::Warning, &costs());
        assert_eq!(roof.estimated_repair_cost, Some(CostRange::new(500, 2000)));
        assert!(roof.negotiation_leverage.is_none());

        let other = assess_status("bathroom-toilet", ItemStatus::Warning, &costs());
        assert_eq!(other.estimated_repair_cost, Some(CostRange::new(200, 1000)));
        assert!(other.negotiation_leverage.is_none());
    }

    #[test]
    fn test_normal_and_pending_clear_fields() {
        for status in [ItemStatus::Normal, ItemStatus::Pending] {
            let assessment = assess_status("roof-condition", status, &costs());
            assert!(assessment.estimated_repair_cost.is_none());
            assert!(assessment.negotiation_leverage.is_none());
        }
    }

    #[test]
    fn test_idempotent_classification() {
        let first = assess_status("hvac-furnace", ItemStatus::Critical, &costs());
        let second = assess_status("hvac-furnace", ItemStatus::Critical, &costs());
        assert_eq!(first, second);
    }

    #[test]
    fn test_category_parse_precedence() {
        // "water-heater" must not classify as anything broader
        assert_eq!(ItemCategory::parse("water-heater"), ItemCategory::WaterHeater);
        assert_eq!(
            ItemCategory::parse("foundation-slab-cracking"),
            ItemCategory::Foundation
        );
        assert_eq!(ItemCategory::parse("hvac-ac-unit"), ItemCategory::Hvac);
        assert_eq!(ItemCategory::parse("attic-roof-underside"), ItemCategory::Roof);
        assert_eq!(ItemCategory::parse("bedroom-windows"), ItemCategory::Other);
    }

    #[test]
    fn test_custom_schedule_is_honored() {
        let mut schedule = CostSchedule::default();
        schedule.critical_roof = CostRange::new(10000, 20000);
        let assessment = assess_status("roof-condition", ItemStatus::Critical, &schedule);
        assert_eq!(
            assessment.estimated_repair_cost,
            Some(CostRange::new(10000, 20000))
        );
    }
}
