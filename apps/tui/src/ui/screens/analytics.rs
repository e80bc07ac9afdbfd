use crate::app::App;
use crate::ui::widgets::palette::{tier_color, ACCENT, MUTED};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;
use theft_dashboard_core::metrics::{quarterly_totals, risk_bucket_counts};
use theft_dashboard_core::presentation::{analysis_summary, risk_tier};
use theft_dashboard_core::DashboardDataset;

pub fn render_analytics(app: &App, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let [factors, lower] =
        Layout::vertical([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

    render_risk_factors(dataset, f, factors);

    let [categories, summary] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(lower);
    render_vehicle_categories(app, dataset, f, categories);
    render_summary(app, dataset, f, summary);
}

fn titled(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_risk_factors(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let block = titled("Key Risk Factors", ACCENT);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if dataset.risk_factors.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No risk factors", Style::default().fg(MUTED))),
            inner,
        );
        return;
    }

    let rows = Layout::vertical(
        dataset
            .risk_factors
            .iter()
            .map(|_| Constraint::Length(1))
            .collect::<Vec<_>>(),
    )
    .split(inner);

    for (factor, row) in dataset.risk_factors.iter().zip(rows.iter()) {
        let [label_area, gauge_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(*row);

        let color = tier_color(risk_tier(Some(factor.impact)));
        let label = TextLine::from(vec![
            Span::styled(
                format!("{:<10}", factor.impact.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(factor.factor.as_str()),
        ]);
        f.render_widget(Paragraph::new(label), label_area);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .ratio((factor.percentage / 100.0).clamp(0.0, 1.0))
            .label(format!("{}%", factor.percentage));
        f.render_widget(gauge, gauge_area);
    }
}

fn render_vehicle_categories(
    app: &App,
    dataset: &DashboardDataset,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let numbers = app.numbers;
    let lines = dataset
        .make_type_data
        .iter()
        .map(|make| {
            TextLine::from(vec![
                Span::styled(
                    format!("{:<16}", make.kind),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>8}", numbers.format(make.count)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("  {}%", numbers.format(make.percentage)),
                    Style::default().fg(MUTED),
                ),
            ])
        })
        .collect::<Vec<_>>();

    let paragraph =
        Paragraph::new(Text::from(lines)).block(titled("Vehicle Category Analysis", ACCENT));
    f.render_widget(paragraph, area);
}

fn render_summary(app: &App, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let numbers = app.numbers;
    let accents = [Color::Blue, Color::Red, Color::Green];

    let mut lines = Vec::new();
    for (insight, color) in analysis_summary(dataset, numbers).into_iter().zip(accents) {
        lines.push(TextLine::from(Span::styled(
            insight.title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(TextLine::from(insight.body));
    }

    lines.push(TextLine::from(""));
    let quarters = quarterly_totals(dataset)
        .iter()
        .enumerate()
        .map(|(index, total)| format!("Q{} {}", index + 1, numbers.format(*total)))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(TextLine::from(vec![
        Span::styled("Quarters: ", Style::default().fg(MUTED)),
        Span::raw(quarters),
    ]));

    let mut buckets = vec![Span::styled("Regions by risk: ", Style::default().fg(MUTED))];
    for (risk, count) in risk_bucket_counts(dataset) {
        buckets.push(Span::styled(
            format!("{} {count}  ", risk.label()),
            Style::default().fg(tier_color(risk_tier(Some(risk)))),
        ));
    }
    lines.push(TextLine::from(buckets));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(titled("Analysis Summary", ACCENT))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
