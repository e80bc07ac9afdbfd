use std::collections::HashSet;

use thiserror::Error;

use crate::model::DashboardDataset;

pub const MONTHS_PER_YEAR: usize = 12;
pub const DAYS_PER_WEEK: usize = 7;

/// A parsed document that does not have the dashboard's shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("document does not match the dataset schema: {0}")]
    Schema(String),
    #[error("expected 12 monthly entries, found {found}")]
    MonthCount { found: usize },
    #[error("month {month} has quarter {quarter}, expected 1-4")]
    QuarterRange { month: String, quarter: u8 },
    #[error("month {month} breaks chronological order (quarter {quarter} after {previous})")]
    QuarterOrder {
        month: String,
        quarter: u8,
        previous: u8,
    },
    #[error("expected 7 day-of-week entries, found {found}")]
    WeekdayCount { found: usize },
    #[error("region {0} appears more than once")]
    DuplicateRegion(String),
    #[error("region {0} has a population of zero")]
    EmptyPopulation(String),
    #[error("vehicle type {0} appears more than once")]
    DuplicateVehicleType(String),
    #[error("make type {0} appears more than once")]
    DuplicateMakeType(String),
    #[error("{field} is negative ({value})")]
    Negative { field: String, value: f64 },
    #[error("{field} is outside 0-100 ({value})")]
    PercentageRange { field: String, value: f64 },
}

impl DashboardDataset {
    /// Checks the invariants serde cannot express. Stops at the first
    /// violation.
    pub fn validate(&self) -> Result<(), ShapeError> {
        self.validate_monthly()?;

        if self.day_of_week_data.len() != DAYS_PER_WEEK {
            return Err(ShapeError::WeekdayCount {
                found: self.day_of_week_data.len(),
            });
        }

        self.validate_regions()?;
        self.validate_shares()?;

        let metrics = &self.key_metrics;
        non_negative("keyMetrics.dailyAverage", metrics.daily_average)?;
        percentage("keyMetrics.recoveryRate", metrics.recovery_rate)?;
        percentage("keyMetrics.clearanceRate", metrics.clearance_rate)?;

        for factor in &self.risk_factors {
            percentage(&format!("riskFactors[{}].percentage", factor.factor), factor.percentage)?;
        }

        Ok(())
    }

    fn validate_monthly(&self) -> Result<(), ShapeError> {
        if self.monthly_data.len() != MONTHS_PER_YEAR {
            return Err(ShapeError::MonthCount {
                found: self.monthly_data.len(),
            });
        }

        let mut previous = 1;
        for entry in &self.monthly_data {
            if !(1..=4).contains(&entry.quarter) {
                return Err(ShapeError::QuarterRange {
                    month: entry.month.clone(),
                    quarter: entry.quarter,
                });
            }
            if entry.quarter < previous {
                return Err(ShapeError::QuarterOrder {
                    month: entry.month.clone(),
                    quarter: entry.quarter,
                    previous,
                });
            }
            previous = entry.quarter;
        }

        Ok(())
    }

    fn validate_regions(&self) -> Result<(), ShapeError> {
        let mut seen = HashSet::new();
        for region in &self.regional_data {
            if !seen.insert(region.region.as_str()) {
                return Err(ShapeError::DuplicateRegion(region.region.clone()));
            }
            if region.population == 0 {
                return Err(ShapeError::EmptyPopulation(region.region.clone()));
            }
            non_negative(&format!("regionalData[{}].rate", region.region), region.rate)?;
            if let Some(density) = region.density {
                non_negative(&format!("regionalData[{}].density", region.region), density)?;
            }
        }
        Ok(())
    }

    fn validate_shares(&self) -> Result<(), ShapeError> {
        let mut seen = HashSet::new();
        for share in &self.vehicle_type_data {
            if !seen.insert(share.kind.as_str()) {
                return Err(ShapeError::DuplicateVehicleType(share.kind.clone()));
            }
            percentage(&format!("vehicleTypeData[{}].percentage", share.kind), share.percentage)?;
        }

        let mut seen = HashSet::new();
        for share in &self.make_type_data {
            if !seen.insert(share.kind.as_str()) {
                return Err(ShapeError::DuplicateMakeType(share.kind.clone()));
            }
            percentage(&format!("makeTypeData[{}].percentage", share.kind), share.percentage)?;
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ShapeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShapeError::Negative {
            field: field.to_string(),
            value,
        })
    }
}

fn percentage(field: &str, value: f64) -> Result<(), ShapeError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ShapeError::PercentageRange {
            field: field.to_string(),
            value,
        })
    }
}
