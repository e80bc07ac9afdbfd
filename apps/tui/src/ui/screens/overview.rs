use crate::app::App;
use crate::ui::chrome::render_fallback_banner;
use crate::ui::widgets::charts::{render_monthly_chart, render_vehicle_types, render_weekday_bars};
use crate::ui::widgets::palette::{ACCENT, MUTED};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use theft_dashboard_core::metrics::top_n;
use theft_dashboard_core::presentation::key_insights;
use theft_dashboard_core::DashboardDataset;

const VEHICLE_TYPES_SHOWN: usize = 6;

pub fn render_overview(app: &App, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let banner_height = if app.view.is_fallback() { 2 } else { 0 };

    let [banner, cards, charts, bottom] = Layout::vertical([
        Constraint::Length(banner_height),
        Constraint::Length(5),
        Constraint::Min(8),
        Constraint::Length(9),
    ])
    .areas(area);

    if app.view.is_fallback() {
        render_fallback_banner(f, banner);
    }

    render_metric_cards(app, dataset, f, cards);

    let [monthly, weekday] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(charts);
    render_monthly_chart(dataset, f, monthly);
    render_weekday_bars(dataset, f, weekday);

    let [vehicles, insights] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(bottom);
    render_vehicle_types(
        top_n(&dataset.vehicle_type_data, VEHICLE_TYPES_SHOWN),
        app.numbers,
        f,
        vehicles,
    );
    render_insights(dataset, f, insights);
}

fn render_metric_cards(app: &App, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let metrics = &dataset.key_metrics;
    let numbers = app.numbers;
    let cards = [
        ("Total Thefts", numbers.format(metrics.total_thefts), "Analysis period", None),
        ("Daily Average", numbers.format(metrics.daily_average), "Thefts per day", None),
        (
            "Recovery Rate",
            format!("{}%", numbers.format(metrics.recovery_rate)),
            "Vehicles recovered",
            Some("+5.2% vs last year"),
        ),
        (
            "Clearance Rate",
            format!("{}%", numbers.format(metrics.clearance_rate)),
            "Cases solved",
            None,
        ),
    ];

    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((title, value, subtitle, trend), card_area) in cards.into_iter().zip(areas.iter()) {
        let mut lines = vec![
            TextLine::from(Span::styled(
                value,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(subtitle, Style::default().fg(MUTED))),
        ];
        if let Some(trend) = trend {
            lines.push(TextLine::from(Span::styled(
                trend,
                Style::default().fg(Color::Green),
            )));
        }

        let card = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title(title)
                .title_style(Style::default().fg(ACCENT))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(card, *card_area);
    }
}

fn render_insights(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();
    for insight in key_insights(dataset) {
        lines.push(TextLine::from(Span::styled(
            insight.title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(TextLine::from(Span::styled(
            insight.body,
            Style::default().fg(MUTED),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title("Key Insights from Analysis")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
