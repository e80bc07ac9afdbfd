use crate::ui::widgets::palette::{hex_color, tier_color, ACCENT, MUTED};
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;
use theft_dashboard_core::metrics::{normalized_scatter_coordinates, ScatterFrame};
use theft_dashboard_core::model::VehicleTypeShare;
use theft_dashboard_core::presentation::risk_tier;
use theft_dashboard_core::{DashboardDataset, NumberFormat};

/// Plot area the regional scatter is laid out in.
pub const SCATTER_FRAME: ScatterFrame = ScatterFrame::new(600.0, 400.0, 60.0, 40.0);

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
}

fn render_empty(f: &mut Frame<'_>, area: Rect, title: &str) {
    let paragraph = Paragraph::new("No data available")
        .block(chart_block(title))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

pub fn render_monthly_chart(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Monthly Theft Trends";
    let months = &dataset.monthly_data;
    if months.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let points: Vec<(f64, f64)> = months
        .iter()
        .enumerate()
        .map(|(index, month)| (index as f64, month.thefts as f64))
        .collect();
    let max_thefts = months.iter().map(|m| m.thefts).max().unwrap_or(0).max(1) as f64;
    let last = months.len() - 1;

    let x_labels = [0, last / 2, last]
        .iter()
        .map(|&index| Span::raw(months[index].month.clone()))
        .collect::<Vec<_>>();
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.0}", max_thefts / 2.0)),
        Span::raw(format!("{max_thefts:.0}")),
    ];

    let datasets = vec![Dataset::default()
        .name("Thefts")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Rgb(0x88, 0x84, 0xd8)))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(chart_block(TITLE))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(MUTED))
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Thefts")
                .style(Style::default().fg(MUTED))
                .bounds([0.0, max_thefts])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

pub fn render_weekday_bars(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Day of Week Pattern";
    let days = &dataset.day_of_week_data;
    if days.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let peak = days.iter().map(|d| d.thefts).max().unwrap_or(0);
    let bars: Vec<Bar<'_>> = days
        .iter()
        .map(|day| {
            let color = if day.thefts == peak {
                Color::Rgb(0xff, 0xc6, 0x58)
            } else {
                Color::Rgb(0x82, 0xca, 0x9d)
            };
            Bar::default()
                .value(day.thefts)
                .label(TextLine::from(day.day.chars().take(3).collect::<String>()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(TITLE))
        .data(BarGroup::default().bars(&bars))
        .max(peak.max(1))
        .bar_gap(1)
        .bar_width(5);

    f.render_widget(chart, area);
}

pub fn render_vehicle_types(
    vehicles: &[VehicleTypeShare],
    numbers: NumberFormat,
    f: &mut Frame<'_>,
    area: Rect,
) {
    const TITLE: &str = "Vehicle Types Targeted";
    if vehicles.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let bars: Vec<Bar<'_>> = vehicles
        .iter()
        .map(|vehicle| {
            let color = hex_color(&vehicle.color);
            Bar::default()
                .value(vehicle.count)
                .text_value(format!(
                    "{} ({}%)",
                    numbers.format(vehicle.count),
                    numbers.format(vehicle.percentage)
                ))
                .label(TextLine::from(vehicle.kind.as_str()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(TITLE))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

/// Population against thefts, one circle per region sized by theft rate and
/// coloured by risk.
pub fn render_region_scatter(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    const TITLE: &str = "Population vs Thefts";
    if dataset.regional_data.is_empty() {
        render_empty(f, area, TITLE);
        return;
    }

    let frame = SCATTER_FRAME;
    let points = normalized_scatter_coordinates(dataset, frame);

    let canvas = Canvas::default()
        .block(chart_block(TITLE))
        .marker(Marker::Braille)
        .x_bounds([0.0, frame.width])
        .y_bounds([0.0, frame.height])
        .paint(|ctx| {
            for (point, region) in points.iter().zip(&dataset.regional_data) {
                // Canvas y grows upwards
                let y = frame.height - point.y;
                ctx.draw(&Circle {
                    x: point.x,
                    y,
                    radius: point.radius,
                    color: tier_color(risk_tier(Some(region.risk))),
                });
                ctx.print(
                    point.x + point.radius,
                    y,
                    TextLine::styled(
                        point.region.to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}
