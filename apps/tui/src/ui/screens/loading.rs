use crate::app::App;
use crate::ui::widgets::palette::{ACCENT, MUTED};
use ratatui::layout::{Alignment, Constraint, Flex, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

pub fn render_loading(app: &App, f: &mut Frame<'_>) {
    let [spinner_area, caption_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
            .flex(Flex::Center)
            .spacing(1)
            .areas(f.area());

    let [spinner_area] = Layout::horizontal([Constraint::Length(28)])
        .flex(Flex::Center)
        .areas(spinner_area);

    let throbber = Throbber::default()
        .label("Loading dashboard data...")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .throbber_style(Style::default().fg(ACCENT))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);

    // The throbber is stateful; draw from a copy so rendering stays &App.
    let mut state = app.throbber_state.clone();
    f.render_stateful_widget(throbber, spinner_area, &mut state);

    let caption = Paragraph::new(Span::styled(
        "Analyzing vehicle theft patterns",
        Style::default().fg(MUTED),
    ))
    .alignment(Alignment::Center);
    f.render_widget(caption, caption_area);
}
