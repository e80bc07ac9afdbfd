use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use serde::Serialize;
use std::io::Stdout;
use std::time::Duration;
use theft_dashboard::loader;
use theft_dashboard::{AppConfig, DataSource};
use theft_dashboard_core::metrics::{
    peak_entry, quarterly_totals, regional_share_percentage, risk_bucket_counts, top_n,
};
use theft_dashboard_core::presentation::{recommendations, Recommendation};
use theft_dashboard_core::{
    resolve, DataOrigin, LoadError, LoadOutcome, NumberFormat, RiskLevel,
};
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, error, warn};

use crate::app::{handle_input, App};
use crate::ui;

const TOP_VEHICLE_TYPES: usize = 6;

/// Run the dashboard once without a UI and print its stats.
pub async fn run_headless(config: &AppConfig, json: bool) -> Result<()> {
    let outcome = loader::load(&config.source).await;
    let report = build_headless_report(&config.source, &outcome);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_stats(&report, config.numbers);
    }

    Ok(())
}

fn render_headless_stats(report: &HeadlessReport<'_>, numbers: NumberFormat) {
    println!("\nVehicle Theft Dashboard");
    println!("=======================");
    println!("Source: {}", report.source);
    match &report.origin {
        DataOrigin::Remote => println!("Data: loaded"),
        DataOrigin::Fallback { reason, detail } => {
            println!("Data: SAMPLE ({}: {detail})", reason.as_str());
        }
    }
    println!("Last updated: {}", report.last_updated);

    let metrics = report.key_metrics;
    println!("\nKey Metrics:");
    println!("- Total thefts: {}", numbers.format(metrics.total_thefts));
    println!("- Daily average: {}", numbers.format(metrics.daily_average));
    println!("- Recovery rate: {}%", metrics.recovery_rate);
    println!("- Clearance rate: {}%", metrics.clearance_rate);
    println!("- Highest risk region: {}", metrics.highest_risk_region);
    println!("- Peak: {}s in {}", metrics.peak_day, metrics.peak_month);

    println!("\nRegional Share:");
    for share in &report.regional_shares {
        println!("- {}: {:.1}%", share.region, share.percent);
    }

    println!("\nRegions by Risk:");
    for (risk, count) in &report.risk_buckets {
        println!("- {risk}: {count}");
    }

    println!("\nThefts by Quarter:");
    for (index, total) in report.quarterly_totals.iter().enumerate() {
        println!("- Q{}: {}", index + 1, numbers.format(*total));
    }

    if let (Some(month), Some(day)) = (report.busiest_month, report.busiest_day) {
        println!("Busiest month: {month}  Busiest day: {day}");
    }

    println!("\nTop Vehicle Types:");
    for vehicle in &report.top_vehicle_types {
        println!(
            "- {} | {} | {}%",
            vehicle.name,
            numbers.format(vehicle.count),
            vehicle.percentage
        );
    }

    println!("\nRecommendations:");
    for rec in &report.recommendations {
        println!(
            "- [{}] {} ({}; {})",
            rec.priority.label(),
            rec.action,
            rec.timeline,
            rec.expected_impact
        );
    }
}

fn build_headless_report<'a>(
    source: &DataSource,
    outcome: &'a LoadOutcome,
) -> HeadlessReport<'a> {
    let dataset = &outcome.dataset;

    let regional_shares = regional_share_percentage(dataset)
        .into_iter()
        .map(|share| HeadlessShare {
            region: share.region,
            percent: share.percent,
        })
        .collect();

    let risk_buckets = risk_bucket_counts(dataset)
        .into_iter()
        .map(|(risk, count): (RiskLevel, usize)| (risk.label(), count))
        .collect();

    let top_vehicle_types = top_n(&dataset.vehicle_type_data, TOP_VEHICLE_TYPES)
        .iter()
        .map(|vehicle| HeadlessVehicle {
            name: &vehicle.kind,
            count: vehicle.count,
            percentage: vehicle.percentage,
        })
        .collect();

    HeadlessReport {
        source: source.to_string(),
        origin: outcome.origin.clone(),
        last_updated: &dataset.last_updated,
        key_metrics: &dataset.key_metrics,
        regional_shares,
        risk_buckets,
        quarterly_totals: quarterly_totals(dataset),
        busiest_month: peak_entry(&dataset.monthly_data).map(|m| m.month.as_str()),
        busiest_day: peak_entry(&dataset.day_of_week_data).map(|d| d.day.as_str()),
        top_vehicle_types,
        recommendations: recommendations(dataset),
    }
}

#[derive(Serialize)]
struct HeadlessReport<'a> {
    source: String,
    origin: DataOrigin,
    last_updated: &'a str,
    key_metrics: &'a theft_dashboard_core::model::KeyMetrics,
    regional_shares: Vec<HeadlessShare<'a>>,
    risk_buckets: Vec<(&'static str, usize)>,
    quarterly_totals: [u64; 4],
    busiest_month: Option<&'a str>,
    busiest_day: Option<&'a str>,
    top_vehicle_types: Vec<HeadlessVehicle<'a>>,
    recommendations: Vec<Recommendation>,
}

#[derive(Serialize)]
struct HeadlessShare<'a> {
    region: &'a str,
    percent: f64,
}

#[derive(Serialize)]
struct HeadlessVehicle<'a> {
    name: &'a str,
    count: u64,
    percentage: f64,
}

fn spawn_load(source: DataSource) -> oneshot::Receiver<LoadOutcome> {
    let (sender, receiver) = oneshot::channel();
    tokio::spawn(async move {
        let outcome = loader::load(&source).await;
        if sender.send(outcome).is_err() {
            debug!("Dashboard closed before the load finished");
        }
    });
    receiver
}

fn poll_load(app: &mut App, pending: &mut Option<oneshot::Receiver<LoadOutcome>>) {
    let Some(receiver) = pending.as_mut() else {
        return;
    };

    match receiver.try_recv() {
        Ok(outcome) => {
            app.finish_loading(outcome);
            *pending = None;
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Closed) => {
            error!("Load task ended without a result");
            app.finish_loading(resolve(Err::<Vec<u8>, _>(LoadError::Transport(
                "load task ended without a result".to_string(),
            ))));
            *pending = None;
        }
    }
}

fn draw_frame<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> Result<()> {
    terminal
        .draw(|f| ui::ui(app, f))
        .map(|_| ())
        .map_err(|e| color_eyre::eyre::eyre!("Terminal draw error: {e}"))
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut pending = Some(spawn_load(app.source.clone()));

    loop {
        app.update();
        poll_load(app, &mut pending);

        draw_frame(terminal, app)?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Event::Resize(width, height) => {
                    // Non-fatal: the next iteration draws again
                    if let Err(e) = draw_frame(terminal, app) {
                        warn!(width, height, "Redraw after resize failed: {e}");
                    }
                }
                _ => {}
            }
        }

        if !app.running {
            break;
        }

        if app.reload_requested {
            app.begin_reload();
            pending = Some(spawn_load(app.source.clone()));
        }

        // Yield so the load task makes progress on a busy loop
        tokio::task::yield_now().await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use theft_dashboard_core::sample_dataset;

    #[test]
    fn headless_report_carries_derived_metrics() -> Result<()> {
        let outcome = LoadOutcome::remote(sample_dataset());
        let report = build_headless_report(&DataSource::default(), &outcome);
        let json = serde_json::to_value(&report)?;

        assert_eq!(json["origin"]["kind"], "remote");
        assert_eq!(json["key_metrics"]["totalThefts"], 4553);
        assert_eq!(json["regional_shares"][0]["percent"], 50.9);
        assert_eq!(json["risk_buckets"][2][0], "High");
        assert_eq!(json["risk_buckets"][2][1], 2);
        assert_eq!(json["busiest_month"], "Aug");
        assert_eq!(json["recommendations"].as_array().map(Vec::len), Some(4));
        Ok(())
    }

    #[test]
    fn headless_report_flags_sample_data() -> Result<()> {
        let outcome = resolve(Err::<Vec<u8>, _>(LoadError::Status { status: 500 }));
        let report = build_headless_report(&DataSource::default(), &outcome);
        let json = serde_json::to_value(&report)?;

        assert_eq!(json["origin"]["kind"], "fallback");
        assert_eq!(json["origin"]["reason"], "http-error");
        Ok(())
    }

    #[test]
    fn frame_redraws_after_resize() -> Result<()> {
        let mut terminal = Terminal::new(ratatui::backend::TestBackend::new(120, 40))?;
        let mut app = App::new(&AppConfig::default());
        app.finish_loading(LoadOutcome::remote(sample_dataset()));
        draw_frame(&mut terminal, &app)?;

        terminal.backend_mut().resize(80, 24);
        draw_frame(&mut terminal, &app)?;
        assert_eq!(terminal.backend().buffer().area.width, 80);
        Ok(())
    }

    #[tokio::test]
    async fn pending_load_is_delivered() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut app = App::new(&AppConfig::default());
        let mut pending = Some(spawn_load(DataSource::File(dir.path().join("missing.json"))));

        while pending.is_some() {
            poll_load(&mut app, &mut pending);
            tokio::task::yield_now().await;
        }

        assert!(app.view.is_fallback());
        Ok(())
    }
}
