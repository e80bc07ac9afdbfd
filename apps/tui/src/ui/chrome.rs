use crate::app::App;
use crate::ui::widgets::palette::{ACCENT, MUTED};
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use theft_dashboard_core::{DashboardDataset, Tab};

pub fn render_header(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [title_area, updated_area] =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(32)]).areas(inner);

    let title = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            "Vehicle Theft Analysis Dashboard",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            "New Zealand Police Department",
            Style::default().fg(MUTED),
        )),
    ]));
    f.render_widget(title, title_area);

    let updated = Paragraph::new(Span::styled(
        format!("Last Updated: {}", dataset.last_updated),
        Style::default().fg(MUTED),
    ))
    .alignment(Alignment::Right);
    f.render_widget(updated, updated_area);
}

pub fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Tab::ALL
        .iter()
        .map(|tab| TextLine::from(format!(" {} {} ", tab.index() + 1, tab.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .select(app.view.tab().index())
        .style(Style::default().fg(MUTED))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// Advisory shown above the overview when the sample dataset is on screen.
pub fn render_fallback_banner(f: &mut Frame<'_>, area: Rect) {
    let banner = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "! ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Using sample data. To see your real analysis results, place dashboard_data.json in the public folder.",
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: true });

    f.render_widget(banner, area);
}

pub fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let style = if app.view.is_fallback() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Green)
    };

    let mut spans = vec![Span::styled(app.status_message.as_str(), style)];
    if let Some(loaded_at) = app.loaded_at {
        spans.push(Span::styled(
            format!("  at {}", loaded_at.format("%H:%M:%S")),
            Style::default().fg(MUTED),
        ));
    }

    let status_paragraph = Paragraph::new(TextLine::from(spans))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

pub fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(MUTED);
    let shortcuts = TextLine::from(vec![
        Span::styled("←/→", key),
        Span::styled(" tabs  ", text),
        Span::styled("1-4", key),
        Span::styled(" jump  ", text),
        Span::styled("↑/↓", key),
        Span::styled(" regions  ", text),
        Span::styled("r", key),
        Span::styled(" reload  ", text),
        Span::styled("?", key),
        Span::styled(" help  ", text),
        Span::styled("q", key),
        Span::styled(" quit", text),
    ]);

    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Center), area);
}

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let heading = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let entry = |keys: &'static str, action: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("{keys:<18}"), key),
            Span::raw(action),
        ])
    };

    vec![
        TextLine::from(Span::styled("Navigation", heading)),
        entry("Left/Right, Tab", "Previous / next tab"),
        entry("1-4", "Overview, Geographic, Analytics, Recommendations"),
        entry("Up/Down", "Move through the regional table"),
        entry("PgUp/PgDn", "Move five regions at a time"),
        entry("Home/End", "First / last region"),
        TextLine::from(""),
        TextLine::from(Span::styled("Data", heading)),
        entry("r", "Fetch the dashboard document again"),
        TextLine::from(""),
        TextLine::from(Span::styled("General", heading)),
        entry("? / F1", "Toggle this help"),
        entry("q / Esc", "Quit"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(MUTED),
        )),
    ]
}
