// Report aggregation: roll per-item statuses and estimates into an overall
// risk level and a total repair-cost range.

use crate::config::RiskThresholds;
use crate::models::{CostRange, ItemStatus, RiskLevel, WalkthroughReport, WalkthroughRoom};

/// Build the derived report for the current room/item collection.
///
/// Deterministic given the same collection: a fixed threshold rule, not a
/// weighted score. Cost mins and maxes are summed independently; overlapping
/// repairs are not discounted.
pub fn build_report(rooms: &[WalkthroughRoom], thresholds: &RiskThresholds) -> WalkthroughReport {
    let mut critical_count = 0usize;
    let mut warning_count = 0usize;
    let mut total = CostRange::default();

    for item in rooms.iter().flat_map(|room| room.items.iter()) {
        match item.status {
            ItemStatus::Critical => critical_count += 1,
            ItemStatus::Warning => warning_count += 1,
            ItemStatus::Normal | ItemStatus::Pending => {}
        }

        if let Some(cost) = item.estimated_repair_cost {
            total.min += cost.min;
            total.max += cost.max;
        }
    }

    let overall_risk = if critical_count >= thresholds.high_critical_count {
        RiskLevel::High
    } else if critical_count > 0 || warning_count >= thresholds.medium_warning_count {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    WalkthroughReport {
        overall_risk,
        total_estimated_repairs: total,
    }
}
