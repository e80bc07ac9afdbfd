use serde::Serialize;

use crate::format::NumberFormat;
use crate::model::{DashboardDataset, Priority, RiskLevel};

/// Display class shared by the risk and priority badges. Front ends map
/// each tier to their own colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    Elevated,
    Guarded,
    Low,
    Planned,
    Neutral,
}

pub fn risk_tier(risk: Option<RiskLevel>) -> Tier {
    match risk {
        Some(RiskLevel::VeryHigh) => Tier::Critical,
        Some(RiskLevel::High) => Tier::Elevated,
        Some(RiskLevel::Medium) => Tier::Guarded,
        Some(RiskLevel::Low) => Tier::Low,
        None => Tier::Neutral,
    }
}

pub fn priority_tier(priority: Option<Priority>) -> Tier {
    match priority {
        Some(Priority::Immediate) => Tier::Critical,
        Some(Priority::High) => Tier::Elevated,
        Some(Priority::Medium) => Tier::Guarded,
        Some(Priority::Strategic) => Tier::Planned,
        None => Tier::Neutral,
    }
}

/// Tier for a free-form risk label; unknown labels are neutral.
pub fn risk_tier_for_label(label: &str) -> Tier {
    risk_tier(RiskLevel::parse(label))
}

/// Tier for a free-form priority label; unknown labels are neutral.
pub fn priority_tier_for_label(label: &str) -> Tier {
    priority_tier(Priority::parse(label))
}

/// Parses `#rrggbb` (or `#rgb`) into its components.
pub fn parse_hex_color(code: &str) -> Option<(u8, u8, u8)> {
    let hex = code.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let digit = |index: usize| {
                u8::from_str_radix(&hex[index..=index], 16)
                    .ok()
                    .map(|value| value * 17)
            };
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub timeline: &'static str,
    pub expected_impact: &'static str,
}

/// The four prioritised actions, filled in from the dataset's headline
/// figures.
pub fn recommendations(dataset: &DashboardDataset) -> Vec<Recommendation> {
    let metrics = &dataset.key_metrics;
    let targeted = dataset
        .vehicle_type_data
        .first()
        .map_or("most targeted vehicle", |vehicle| vehicle.kind.as_str());

    vec![
        Recommendation {
            priority: Priority::Immediate,
            action: format!(
                "Deploy additional patrols in {} and other high-risk regions",
                metrics.highest_risk_region
            ),
            timeline: "0-3 months",
            expected_impact: "15% reduction in high-risk areas",
        },
        Recommendation {
            priority: Priority::High,
            action: format!("Increase surveillance operations on {}s", metrics.peak_day),
            timeline: "1-6 months",
            expected_impact: "20% reduction in weekend thefts",
        },
        Recommendation {
            priority: Priority::Medium,
            action: format!("Launch public awareness campaign for {targeted} owners"),
            timeline: "3-9 months",
            expected_impact: "10% reduction in targeted vehicle types",
        },
        Recommendation {
            priority: Priority::Strategic,
            action: "Implement predictive policing system using identified patterns".to_string(),
            timeline: "6-18 months",
            expected_impact: "25% overall reduction in theft rates",
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: &'static str,
    pub body: String,
}

pub fn key_insights(dataset: &DashboardDataset) -> Vec<Insight> {
    let metrics = &dataset.key_metrics;
    vec![
        Insight {
            title: "Peak Risk Period",
            body: format!("{}s show highest theft activity", metrics.peak_day),
        },
        Insight {
            title: "Highest Risk Region",
            body: format!("{} requires immediate attention", metrics.highest_risk_region),
        },
        Insight {
            title: "Recovery Success",
            body: format!("{}% recovery rate trending upward", metrics.recovery_rate),
        },
    ]
}

pub fn analysis_summary(dataset: &DashboardDataset, numbers: NumberFormat) -> Vec<Insight> {
    let metrics = &dataset.key_metrics;
    vec![
        Insight {
            title: "Total Records Analyzed",
            body: format!(
                "{} vehicle theft cases",
                numbers.format(metrics.total_thefts)
            ),
        },
        Insight {
            title: "Highest Risk Region",
            body: format!(
                "{} - requires immediate action",
                metrics.highest_risk_region
            ),
        },
        Insight {
            title: "Peak Activity",
            body: format!("{}s in {}", metrics.peak_day, metrics.peak_month),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePhase {
    pub window: &'static str,
    pub focus: &'static str,
}

pub const IMPLEMENTATION_TIMELINE: [TimelinePhase; 3] = [
    TimelinePhase {
        window: "0-3 Months",
        focus: "Deploy additional patrols and increase weekend operations",
    },
    TimelinePhase {
        window: "3-12 Months",
        focus: "Launch awareness campaigns and community engagement programs",
    },
    TimelinePhase {
        window: "1-2 Years",
        focus: "Implement predictive policing and advanced technology solutions",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessMetrics {
    pub horizon: &'static str,
    pub targets: [&'static str; 3],
}

pub const SUCCESS_METRICS: [SuccessMetrics; 3] = [
    SuccessMetrics {
        horizon: "Short Term (3-6 months)",
        targets: [
            "15% reduction in high-risk regions",
            "20% faster response times",
            "25% increase in public awareness",
        ],
    },
    SuccessMetrics {
        horizon: "Medium Term (6-12 months)",
        targets: [
            "25% overall theft reduction",
            "30% improved clearance rates",
            "40% fewer repeat locations",
        ],
    },
    SuccessMetrics {
        horizon: "Long Term (1-2 years)",
        targets: [
            "35% sustained reduction",
            "50% better community safety",
            "Predictive system deployed",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_dataset;

    #[test]
    fn risk_tiers_cover_every_level() {
        assert_eq!(risk_tier(Some(RiskLevel::VeryHigh)), Tier::Critical);
        assert_eq!(risk_tier(Some(RiskLevel::High)), Tier::Elevated);
        assert_eq!(risk_tier(Some(RiskLevel::Medium)), Tier::Guarded);
        assert_eq!(risk_tier(Some(RiskLevel::Low)), Tier::Low);
        assert_eq!(risk_tier(None), Tier::Neutral);
    }

    #[test]
    fn unknown_labels_are_neutral() {
        assert_eq!(risk_tier_for_label("Very High"), Tier::Critical);
        assert_eq!(risk_tier_for_label("catastrophic"), Tier::Neutral);
        assert_eq!(priority_tier_for_label("Strategic"), Tier::Planned);
        assert_eq!(priority_tier_for_label("whenever"), Tier::Neutral);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#8884d8"), Some((0x88, 0x84, 0xd8)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("8884d8"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn recommendations_use_headline_figures() {
        let recs = recommendations(&sample_dataset());
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].priority, Priority::Immediate);
        assert_eq!(
            recs[0].action,
            "Deploy additional patrols in Canterbury and other high-risk regions"
        );
        assert_eq!(recs[1].action, "Increase surveillance operations on Saturdays");
        assert_eq!(
            recs[2].action,
            "Launch public awareness campaign for Hatchback owners"
        );
    }

    #[test]
    fn recommendations_without_vehicle_types() {
        let mut dataset = sample_dataset();
        dataset.vehicle_type_data.clear();
        let recs = recommendations(&dataset);
        assert_eq!(
            recs[2].action,
            "Launch public awareness campaign for most targeted vehicle owners"
        );
    }

    #[test]
    fn summary_groups_total() {
        let summary = analysis_summary(&sample_dataset(), NumberFormat::ENGLISH);
        assert_eq!(summary[0].body, "4,553 vehicle theft cases");
        assert_eq!(summary[2].body, "Saturdays in August");
    }
}
