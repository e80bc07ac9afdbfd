use serde::{Deserialize, Serialize};

/// Qualitative risk bucket attached to regions and risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High", alias = "VeryHigh")]
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "very high" | "veryhigh" => Some(Self::VeryHigh),
            _ => None,
        }
    }
}

/// Priority of a policy recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Immediate,
    High,
    Medium,
    Strategic,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Strategic => "Strategic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "immediate" => Some(Self::Immediate),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "strategic" => Some(Self::Strategic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyThefts {
    pub month: String,
    pub thefts: u64,
    pub quarter: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOfWeekThefts {
    pub day: String,
    pub thefts: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub region: String,
    pub thefts: u64,
    pub population: u64,
    /// Thefts per 100,000 population, precomputed upstream.
    pub rate: f64,
    pub risk: RiskLevel,
    /// Thefts per million population. Derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleTypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeTypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    pub total_thefts: u64,
    pub daily_average: f64,
    pub recovery_rate: f64,
    pub clearance_rate: f64,
    pub highest_risk_region: String,
    pub peak_day: String,
    pub peak_month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub impact: RiskLevel,
    pub percentage: f64,
}

/// Everything the dashboard renders. Loaded once per session and replaced
/// wholesale on reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDataset {
    pub monthly_data: Vec<MonthlyThefts>,
    pub day_of_week_data: Vec<DayOfWeekThefts>,
    pub regional_data: Vec<RegionStats>,
    pub vehicle_type_data: Vec<VehicleTypeShare>,
    pub make_type_data: Vec<MakeTypeShare>,
    pub key_metrics: KeyMetrics,
    pub risk_factors: Vec<RiskFactor>,
    pub last_updated: String,
}

/// A named theft count, implemented by the monthly and weekday series so
/// they can share the series helpers in [`crate::metrics`].
pub trait TheftSeries {
    fn label(&self) -> &str;
    fn thefts(&self) -> u64;
}

impl TheftSeries for MonthlyThefts {
    fn label(&self) -> &str {
        &self.month
    }

    fn thefts(&self) -> u64 {
        self.thefts
    }
}

impl TheftSeries for DayOfWeekThefts {
    fn label(&self) -> &str {
        &self.day
    }

    fn thefts(&self) -> u64 {
        self.thefts
    }
}

impl TheftSeries for RegionStats {
    fn label(&self) -> &str {
        &self.region
    }

    fn thefts(&self) -> u64 {
        self.thefts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_uses_spaced_wire_name() -> Result<(), serde_json::Error> {
        let level: RiskLevel = serde_json::from_str("\"Very High\"")?;
        assert_eq!(level, RiskLevel::VeryHigh);

        let alias: RiskLevel = serde_json::from_str("\"VeryHigh\"")?;
        assert_eq!(alias, RiskLevel::VeryHigh);

        assert_eq!(serde_json::to_string(&RiskLevel::VeryHigh)?, "\"Very High\"");
        Ok(())
    }

    #[test]
    fn risk_level_parse_is_lenient_about_case_and_separators() {
        assert_eq!(RiskLevel::parse(" very-high "), Some(RiskLevel::VeryHigh));
        assert_eq!(RiskLevel::parse("LOW"), Some(RiskLevel::Low));
        assert_eq!(RiskLevel::parse("extreme"), None);
    }

    #[test]
    fn vehicle_type_reads_type_key() -> Result<(), serde_json::Error> {
        let share: VehicleTypeShare = serde_json::from_str(
            r##"{"type":"Hatchback","count":789,"percentage":17.3,"color":"#8884d8"}"##,
        )?;
        assert_eq!(share.kind, "Hatchback");
        assert_eq!(share.count, 789);
        Ok(())
    }

    #[test]
    fn region_density_is_optional() -> Result<(), serde_json::Error> {
        let region: RegionStats = serde_json::from_str(
            r#"{"region":"Otago","thefts":10,"population":1000,"rate":1.0,"risk":"Low"}"#,
        )?;
        assert_eq!(region.density, None);

        let json = serde_json::to_string(&region)?;
        assert!(!json.contains("density"));
        Ok(())
    }
}
