use crate::ui::widgets::palette::{tier_color, ACCENT, MUTED};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use theft_dashboard_core::presentation::{
    priority_tier, recommendations, IMPLEMENTATION_TIMELINE, SUCCESS_METRICS,
};
use theft_dashboard_core::DashboardDataset;

pub fn render_recommendations(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let [actions, timeline, kpis] = Layout::vertical([
        Constraint::Min(10),
        Constraint::Length(5),
        Constraint::Length(6),
    ])
    .areas(area);

    render_actions(dataset, f, actions);
    render_timeline(f, timeline);
    render_success_metrics(f, kpis);
}

fn render_actions(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();
    for rec in recommendations(dataset) {
        let color = tier_color(priority_tier(Some(rec.priority)));
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("[{}] ", rec.priority.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(rec.action, Style::default().fg(Color::White)),
        ]));
        lines.push(TextLine::from(vec![
            Span::styled("    Timeline: ", Style::default().fg(MUTED)),
            Span::raw(rec.timeline),
            Span::styled("   Expected impact: ", Style::default().fg(MUTED)),
            Span::styled(rec.expected_impact, Style::default().fg(Color::Green)),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title("Evidence-Based Recommendations")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_timeline(f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Implementation Timeline")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns =
        Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(inner);
    for (phase, column) in IMPLEMENTATION_TIMELINE.iter().zip(columns.iter()) {
        let text = Text::from(vec![
            TextLine::from(Span::styled(
                phase.window,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            TextLine::from(Span::styled(phase.focus, Style::default().fg(MUTED))),
        ]);
        f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), *column);
    }
}

fn render_success_metrics(f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Success Metrics & KPIs")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let accents = [Color::Blue, Color::Green, Color::Magenta];
    let columns =
        Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(inner);

    for ((metrics, column), color) in SUCCESS_METRICS.iter().zip(columns.iter()).zip(accents) {
        let mut lines = vec![TextLine::from(Span::styled(
            metrics.horizon,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            metrics
                .targets
                .iter()
                .map(|target| TextLine::from(format!("• {target}"))),
        );
        f.render_widget(Paragraph::new(Text::from(lines)), *column);
    }
}
