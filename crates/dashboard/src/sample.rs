use crate::model::{
    DashboardDataset, DayOfWeekThefts, KeyMetrics, MakeTypeShare, MonthlyThefts, RegionStats,
    RiskFactor, RiskLevel, VehicleTypeShare,
};

/// Built-in dataset shown whenever the real data cannot be loaded.
pub fn sample_dataset() -> DashboardDataset {
    let months = [
        ("Jan", 385, 1),
        ("Feb", 412, 1),
        ("Mar", 445, 1),
        ("Apr", 398, 2),
        ("May", 376, 2),
        ("Jun", 359, 2),
        ("Jul", 423, 3),
        ("Aug", 467, 3),
        ("Sep", 434, 3),
        ("Oct", 401, 4),
        ("Nov", 387, 4),
        ("Dec", 366, 4),
    ];

    let days = [
        ("Mon", 612),
        ("Tue", 598),
        ("Wed", 634),
        ("Thu", 656),
        ("Fri", 723),
        ("Sat", 789),
        ("Sun", 541),
    ];

    DashboardDataset {
        monthly_data: months
            .iter()
            .map(|&(month, thefts, quarter)| MonthlyThefts {
                month: month.to_string(),
                thefts,
                quarter,
            })
            .collect(),
        day_of_week_data: days
            .iter()
            .map(|&(day, thefts)| DayOfWeekThefts {
                day: day.to_string(),
                thefts,
            })
            .collect(),
        regional_data: vec![
            region("Auckland", 1245, 1_695_200, 73.4, RiskLevel::High),
            region("Canterbury", 756, 695_500, 108.7, RiskLevel::VeryHigh),
            region("Waikato", 445, 513_800, 86.6, RiskLevel::High),
        ],
        vehicle_type_data: vec![
            vehicle("Hatchback", 789, 17.3, "#8884d8"),
            vehicle("Saloon", 675, 14.8, "#82ca9d"),
            vehicle("Stationwagon", 534, 11.7, "#ffc658"),
        ],
        make_type_data: vec![
            MakeTypeShare {
                kind: "Standard".to_string(),
                count: 3845,
                percentage: 84.4,
            },
            MakeTypeShare {
                kind: "Luxury".to_string(),
                count: 708,
                percentage: 15.6,
            },
        ],
        key_metrics: KeyMetrics {
            total_thefts: 4553,
            daily_average: 12.5,
            recovery_rate: 67.8,
            clearance_rate: 34.2,
            highest_risk_region: "Canterbury".to_string(),
            peak_day: "Saturday".to_string(),
            peak_month: "August".to_string(),
        },
        risk_factors: vec![
            factor("Weekend (Fri-Sun)", RiskLevel::High, 45.2),
            factor("Urban Areas", RiskLevel::VeryHigh, 78.9),
            factor("Vehicles 1-5 years old", RiskLevel::High, 52.3),
            factor("Evening Hours (6-11 PM)", RiskLevel::High, 38.7),
        ],
        last_updated: "July 2025".to_string(),
    }
}

fn region(name: &str, thefts: u64, population: u64, rate: f64, risk: RiskLevel) -> RegionStats {
    RegionStats {
        region: name.to_string(),
        thefts,
        population,
        rate,
        risk,
        density: None,
    }
}

fn vehicle(kind: &str, count: u64, percentage: f64, color: &str) -> VehicleTypeShare {
    VehicleTypeShare {
        kind: kind.to_string(),
        count,
        percentage,
        color: color.to_string(),
    }
}

fn factor(name: &str, impact: RiskLevel, percentage: f64) -> RiskFactor {
    RiskFactor {
        factor: name.to_string(),
        impact,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_passes_validation() {
        assert_eq!(sample_dataset().validate(), Ok(()));
    }

    #[test]
    fn sample_matches_published_figures() {
        let sample = sample_dataset();
        assert_eq!(sample.monthly_data.len(), 12);
        assert_eq!(sample.day_of_week_data.len(), 7);
        assert_eq!(sample.key_metrics.total_thefts, 4553);
        assert_eq!(sample.regional_data[1].risk, RiskLevel::VeryHigh);
        assert_eq!(sample.last_updated, "July 2025");
    }

    #[test]
    fn sample_round_trips_through_wire_format() -> Result<(), serde_json::Error> {
        let sample = sample_dataset();
        let json = serde_json::to_string(&sample)?;
        assert!(json.contains("\"monthlyData\""));
        assert!(json.contains("\"Very High\""));

        let parsed: DashboardDataset = serde_json::from_str(&json)?;
        assert_eq!(parsed, sample);
        Ok(())
    }
}
