use crate::app::App;
use crate::ui::widgets::charts::render_region_scatter;
use crate::ui::widgets::palette::{tier_color, ACCENT, MUTED};
use crate::ui::widgets::tables::scroll_offset;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table};
use ratatui::Frame;
use theft_dashboard_core::metrics::{region_density, regional_share_percentage};
use theft_dashboard_core::presentation::risk_tier;
use theft_dashboard_core::DashboardDataset;

pub fn render_geographic(app: &App, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let [table_area, charts_area] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    render_region_table(app, dataset, f, table_area);

    let [rates, scatter] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(charts_area);
    render_rate_comparison(dataset, f, rates);
    render_region_scatter(dataset, f, scatter);
}

fn render_region_table(app: &App, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let numbers = app.numbers;
    let shares = regional_share_percentage(dataset);

    // Borders and the header row
    let visible = usize::from(area.height.saturating_sub(3));
    let offset = scroll_offset(dataset.regional_data.len(), visible, app.region_index);

    let rows = dataset
        .regional_data
        .iter()
        .zip(&shares)
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, (region, share))| {
            let tier_style = Style::default().fg(tier_color(risk_tier(Some(region.risk))));
            let row = Row::new(vec![
                Cell::from(region.region.as_str()),
                Cell::from(numbers.format(region.thefts)),
                Cell::from(numbers.format(region.population)),
                Cell::from(numbers.format(region.rate)),
                Cell::from(format!("{}%", numbers.format(share.percent))),
                Cell::from(numbers.format((region_density(region) * 10.0).round() / 10.0)),
                Cell::from(region.risk.label()).style(tier_style.add_modifier(Modifier::BOLD)),
            ]);

            if index == app.region_index {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        })
        .collect::<Vec<_>>();

    let header = Row::new(vec![
        "Region",
        "Total Thefts",
        "Population",
        "Rate per 100k",
        "Share",
        "Per Million",
        "Risk Level",
    ])
    .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let widths = [
        Constraint::Min(14),
        Constraint::Length(13),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
    ];

    let title = format!(
        "Regional Theft Analysis ({}/{})",
        (app.region_index + 1).min(dataset.regional_data.len()),
        dataset.regional_data.len()
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );

    f.render_widget(table, area);
}

fn render_rate_comparison(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let bars: Vec<Bar<'_>> = dataset
        .regional_data
        .iter()
        .map(|region| {
            let color = tier_color(risk_tier(Some(region.risk)));
            Bar::default()
                // Bars hold integers; tenths keep one decimal of the rate
                .value((region.rate * 10.0).round().max(0.0) as u64)
                .text_value(format!("{:.1}", region.rate))
                .label(TextLine::from(region.region.as_str()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Regional Theft Rates Comparison")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .label_style(Style::default().fg(MUTED))
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}
