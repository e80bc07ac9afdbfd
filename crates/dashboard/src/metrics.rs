//! Presentation-derived values computed from a loaded dataset.
//!
//! Every function here is pure: same dataset in, same output out.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{DashboardDataset, RegionStats, RiskLevel, TheftSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionShare<'a> {
    pub region: &'a str,
    pub percent: f64,
}

/// Each region's share of all regional thefts, rounded half up to one
/// decimal. Every share is rounded on its own, so equal thefts always give
/// equal shares and the total may drift from 100.0 by a tenth or so. A zero
/// total yields 0.0 everywhere.
pub fn regional_share_percentage(dataset: &DashboardDataset) -> Vec<RegionShare<'_>> {
    let regions = &dataset.regional_data;
    let total: u128 = regions.iter().map(|r| u128::from(r.thefts)).sum();

    regions
        .iter()
        .map(|region| {
            let percent = if total == 0 {
                0.0
            } else {
                // Integer tenths of a percent
                let tenths = (u128::from(region.thefts) * 1000 + total / 2) / total;
                tenths as f64 / 10.0
            };
            RegionShare {
                region: &region.region,
                percent,
            }
        })
        .collect()
}

/// Number of regions per risk level. All four levels are always present.
pub fn risk_bucket_counts(dataset: &DashboardDataset) -> BTreeMap<RiskLevel, usize> {
    let mut counts: BTreeMap<RiskLevel, usize> =
        RiskLevel::ALL.iter().map(|&level| (level, 0)).collect();

    for region in &dataset.regional_data {
        *counts.entry(region.risk).or_insert(0) += 1;
    }

    counts
}

/// Plot area the scatter coordinates are mapped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterFrame {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl ScatterFrame {
    pub const fn new(width: f64, height: f64, margin_x: f64, margin_y: f64) -> Self {
        Self {
            width,
            height,
            margin_x,
            margin_y,
        }
    }

    fn span_x(&self) -> f64 {
        (self.width - 2.0 * self.margin_x).max(0.0)
    }

    fn span_y(&self) -> f64 {
        (self.height - 2.0 * self.margin_y).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint<'a> {
    pub region: &'a str,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

pub const MIN_SCATTER_RADIUS: f64 = 4.0;
pub const MAX_SCATTER_RADIUS: f64 = 20.0;

/// Population (x) against thefts (y) for every region, scaled to the
/// largest values in the dataset. Y grows downwards, so the region with the
/// most thefts sits at the top margin.
pub fn normalized_scatter_coordinates(
    dataset: &DashboardDataset,
    frame: ScatterFrame,
) -> Vec<ScatterPoint<'_>> {
    let regions = &dataset.regional_data;
    let max_population = regions.iter().map(|r| r.population).max().unwrap_or(0);
    let max_thefts = regions.iter().map(|r| r.thefts).max().unwrap_or(0);

    regions
        .iter()
        .map(|region| {
            let x = if max_population == 0 {
                frame.margin_x
            } else {
                let ratio = region.population as f64 / max_population as f64;
                ratio.mul_add(frame.span_x(), frame.margin_x)
            };

            let bottom = frame.margin_y + frame.span_y();
            let y = if max_thefts == 0 {
                bottom
            } else {
                let ratio = region.thefts as f64 / max_thefts as f64;
                ratio.mul_add(-frame.span_y(), bottom)
            };

            ScatterPoint {
                region: &region.region,
                x,
                y,
                radius: scatter_radius(region.rate),
            }
        })
        .collect()
}

pub fn scatter_radius(rate: f64) -> f64 {
    (rate / 100.0 * 15.0).clamp(MIN_SCATTER_RADIUS, MAX_SCATTER_RADIUS)
}

/// Thefts per million population: the stored value when present, otherwise
/// derived from thefts and population.
pub fn region_density(region: &RegionStats) -> f64 {
    region.density.unwrap_or_else(|| {
        if region.population == 0 {
            0.0
        } else {
            region.thefts as f64 / region.population as f64 * 1_000_000.0
        }
    })
}

/// The first `n` entries in their existing order. Callers wanting a ranking
/// must sort first.
pub fn top_n<T>(series: &[T], n: usize) -> &[T] {
    &series[..n.min(series.len())]
}

/// Thefts summed per quarter; index 0 is Q1.
pub fn quarterly_totals(dataset: &DashboardDataset) -> [u64; 4] {
    let mut totals = [0_u64; 4];
    for entry in &dataset.monthly_data {
        if let Some(slot) = usize::from(entry.quarter)
            .checked_sub(1)
            .and_then(|index| totals.get_mut(index))
        {
            *slot += entry.thefts;
        }
    }
    totals
}

/// The first entry carrying the highest theft count.
pub fn peak_entry<T: TheftSeries>(series: &[T]) -> Option<&T> {
    series.iter().fold(None, |best: Option<&T>, entry| match best {
        Some(current) if current.thefts() >= entry.thefts() => Some(current),
        _ => Some(entry),
    })
}
