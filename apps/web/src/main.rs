use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::event::KeyCode;
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use theft_dashboard_core::metrics::{quarterly_totals, regional_share_percentage, top_n};
use theft_dashboard_core::presentation::{
    analysis_summary, key_insights, parse_hex_color, priority_tier, recommendations, risk_tier,
    Tier, IMPLEMENTATION_TIMELINE,
};
use theft_dashboard_core::{
    resolve, DashboardDataset, DataOrigin, LoadError, NumberFormat, Tab, ViewState,
    DEFAULT_RESOURCE,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

struct WebState {
    view: ViewState,
    loaded_at: Option<String>,
}

type Shared = Rc<RefCell<WebState>>;

fn main() -> io::Result<()> {
    let state: Shared = Rc::new(RefCell::new(WebState {
        view: ViewState::loading(),
        loaded_at: None,
    }));

    spawn_local(load_into(state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| {
            let reload = {
                let mut state = state.borrow_mut();
                apply_key(&mut state.view, event.code)
            };
            if reload {
                {
                    let mut state = state.borrow_mut();
                    state.view = state.view.reloading();
                    state.loaded_at = None;
                }
                spawn_local(load_into(state.clone()));
            }
        }
    });

    terminal.draw_web(move |f| {
        let area = f.area();
        let block = Block::default()
            .title("Vehicle Theft Analysis Dashboard")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let state = state.borrow();
        if let Some(dataset) = state.view.dataset() {
            render_dashboard(&state, dataset, f, inner);
        } else {
            let paragraph = Paragraph::new(Text::from(vec![
                TextLine::from("Loading dashboard data..."),
                TextLine::from(Span::styled(
                    "Analyzing vehicle theft patterns",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
        }
    });

    Ok(())
}

/// Applies a key to the view. Returns true when the key asks for a reload.
fn apply_key(view: &mut ViewState, code: KeyCode) -> bool {
    match code {
        KeyCode::Left => view.select_tab(view.tab().previous()),
        KeyCode::Right => view.select_tab(view.tab().next()),
        KeyCode::Char(digit @ '1'..='4') => {
            if let Some(tab) = digit
                .to_digit(10)
                .and_then(|n| usize::try_from(n).ok())
                .and_then(|n| Tab::from_index(n - 1))
            {
                view.select_tab(tab);
            }
        }
        KeyCode::Char('r') => return !view.is_loading(),
        _ => {}
    }
    false
}

/// The sample-data advisory sits above the overview only.
fn shows_fallback_banner(view: &ViewState) -> bool {
    view.is_fallback() && view.tab() == Tab::Overview
}

fn render_dashboard(state: &WebState, dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let banner = shows_fallback_banner(&state.view);
    let banner_height = u16::from(banner);
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(banner_height),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    let updated = TextLine::from(vec![
        Span::styled(
            "New Zealand Police Department",
            Style::default().fg(Color::Gray),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Last Updated: {}", dataset.last_updated),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(updated), main_layout[0]);

    let titles = Tab::ALL
        .iter()
        .map(|tab| TextLine::from(tab.label()))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(state.view.tab().index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, main_layout[1]);

    if banner {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "Using sample data. To see your real analysis results, place {DEFAULT_RESOURCE} in the public folder."
                ),
                Style::default().fg(Color::Yellow),
            )),
            main_layout[2],
        );
    }

    let numbers = NumberFormat::ENGLISH;
    match state.view.tab() {
        Tab::Overview => render_overview(dataset, numbers, f, main_layout[3]),
        Tab::Geographic => render_geographic(dataset, numbers, f, main_layout[3]),
        Tab::Analytics => render_analytics(dataset, numbers, f, main_layout[3]),
        Tab::Recommendations => render_recommendations(dataset, f, main_layout[3]),
    }

    let loaded = state.loaded_at.as_deref().unwrap_or("-");
    let footer = Paragraph::new(Span::styled(
        format!("←/→ tabs · 1-4 jump · r reload · loaded {loaded}"),
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    f.render_widget(footer, main_layout[4]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

const fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Critical => Color::Red,
        Tier::Elevated => Color::LightRed,
        Tier::Guarded => Color::Yellow,
        Tier::Low => Color::Green,
        Tier::Planned => Color::Blue,
        Tier::Neutral => Color::Gray,
    }
}

fn render_overview(dataset: &DashboardDataset, numbers: NumberFormat, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8), Constraint::Length(5)])
        .split(area);

    let metrics = &dataset.key_metrics;
    let cards = Paragraph::new(Text::from(vec![
        TextLine::from(format!(
            "Total Thefts {}   Daily Average {}",
            numbers.format(metrics.total_thefts),
            numbers.format(metrics.daily_average)
        )),
        TextLine::from(format!(
            "Recovery Rate {}%   Clearance Rate {}%",
            numbers.format(metrics.recovery_rate),
            numbers.format(metrics.clearance_rate)
        )),
    ]))
    .block(panel("Key Metrics"));
    f.render_widget(cards, rows[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let monthly: Vec<Bar<'_>> = dataset
        .monthly_data
        .iter()
        .map(|month| {
            Bar::default()
                .value(month.thefts)
                .label(TextLine::from(month.month.as_str()))
        })
        .collect();
    f.render_widget(
        BarChart::default()
            .block(panel("Monthly Theft Trends"))
            .data(BarGroup::default().bars(&monthly))
            .bar_width(3)
            .bar_style(Style::default().fg(Color::Rgb(0x88, 0x84, 0xd8))),
        charts[0],
    );

    let vehicles: Vec<Bar<'_>> = top_n(&dataset.vehicle_type_data, 6)
        .iter()
        .map(|vehicle| {
            let color = parse_hex_color(&vehicle.color)
                .map_or(Color::Gray, |(r, g, b)| Color::Rgb(r, g, b));
            Bar::default()
                .value(vehicle.count)
                .text_value(format!("{}%", vehicle.percentage))
                .label(TextLine::from(vehicle.kind.as_str()))
                .style(Style::default().fg(color))
        })
        .collect();
    f.render_widget(
        BarChart::default()
            .block(panel("Most Stolen Vehicle Types"))
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&vehicles))
            .bar_width(1),
        charts[1],
    );

    let insights = key_insights(dataset)
        .into_iter()
        .map(|insight| {
            TextLine::from(vec![
                Span::styled(
                    format!("{}: ", insight.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(insight.body),
            ])
        })
        .collect::<Vec<_>>();
    f.render_widget(
        Paragraph::new(Text::from(insights)).block(panel("Key Insights from Analysis")),
        rows[2],
    );
}

fn render_geographic(
    dataset: &DashboardDataset,
    numbers: NumberFormat,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let shares = regional_share_percentage(dataset);
    let rows = dataset
        .regional_data
        .iter()
        .zip(&shares)
        .map(|(region, share)| {
            Row::new(vec![
                Cell::from(region.region.as_str()),
                Cell::from(numbers.format(region.thefts)),
                Cell::from(numbers.format(region.population)),
                Cell::from(numbers.format(region.rate)),
                Cell::from(format!("{:.1}%", share.percent)),
                Cell::from(region.risk.label())
                    .style(Style::default().fg(tier_color(risk_tier(Some(region.risk))))),
            ])
        })
        .collect::<Vec<_>>();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec![
            "Region",
            "Total Thefts",
            "Population",
            "Rate per 100k",
            "Share",
            "Risk Level",
        ])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(panel("Regional Theft Analysis"));

    f.render_widget(table, area);
}

fn render_analytics(
    dataset: &DashboardDataset,
    numbers: NumberFormat,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let factors = dataset
        .risk_factors
        .iter()
        .map(|factor| {
            TextLine::from(vec![
                Span::styled(
                    format!("{:<10}", factor.impact.label()),
                    Style::default().fg(tier_color(risk_tier(Some(factor.impact)))),
                ),
                Span::raw(format!("{} ({}%)", factor.factor, factor.percentage)),
            ])
        })
        .collect::<Vec<_>>();
    f.render_widget(
        Paragraph::new(Text::from(factors)).block(panel("Key Risk Factors")),
        columns[0],
    );

    let mut summary = analysis_summary(dataset, numbers)
        .into_iter()
        .flat_map(|insight| {
            [
                TextLine::from(Span::styled(
                    insight.title,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                TextLine::from(insight.body),
            ]
        })
        .collect::<Vec<_>>();
    let quarters = quarterly_totals(dataset);
    summary.push(TextLine::from(format!(
        "Q1 {}  Q2 {}  Q3 {}  Q4 {}",
        numbers.format(quarters[0]),
        numbers.format(quarters[1]),
        numbers.format(quarters[2]),
        numbers.format(quarters[3])
    )));
    f.render_widget(
        Paragraph::new(Text::from(summary))
            .block(panel("Analysis Summary"))
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}

fn render_recommendations(dataset: &DashboardDataset, f: &mut Frame<'_>, area: Rect) {
    let mut lines = Vec::new();
    for rec in recommendations(dataset) {
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("[{}] ", rec.priority.label()),
                Style::default()
                    .fg(tier_color(priority_tier(Some(rec.priority))))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(rec.action),
        ]));
        lines.push(TextLine::from(Span::styled(
            format!("    {} · {}", rec.timeline, rec.expected_impact),
            Style::default().fg(Color::Gray),
        )));
    }

    lines.push(TextLine::from(""));
    for phase in IMPLEMENTATION_TIMELINE {
        lines.push(TextLine::from(vec![
            Span::styled(
                format!("{:<12}", phase.window),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(phase.focus),
        ]));
    }

    f.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel("Evidence-Based Recommendations"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

async fn load_into(state: Shared) {
    let outcome = resolve(fetch_document(DEFAULT_RESOURCE).await);

    if let DataOrigin::Fallback { reason, detail } = &outcome.origin {
        web_sys::console::warn_1(
            &format!("Using sample data ({}): {detail}", reason.as_str()).into(),
        );
    }

    let mut state = state.borrow_mut();
    match state.view.finish_loading(outcome) {
        Ok(()) => {
            state.loaded_at = Some(String::from(
                js_sys::Date::new_0().to_locale_time_string("en-NZ"),
            ));
            if let Ok(phase) = serde_json::to_string(state.view.phase()) {
                web_sys::console::log_1(&format!("dashboard state: {phase}").into());
            }
        }
        Err(error) => web_sys::console::error_1(&error.to_string().into()),
    }
}

/// One same-origin GET for the dashboard document.
async fn fetch_document(path: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| transport("no window"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts).map_err(js_transport)?;
    let response_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_transport)?;
    let response = response_value
        .dyn_into::<Response>()
        .map_err(js_transport)?;

    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
        });
    }

    let text = wasm_bindgen_futures::JsFuture::from(response.text().map_err(js_transport)?)
        .await
        .map_err(js_transport)?;
    text.as_string()
        .ok_or_else(|| transport("response body is not text"))
}

fn transport(message: &str) -> LoadError {
    LoadError::Transport(message.to_string())
}

fn js_transport(value: wasm_bindgen::JsValue) -> LoadError {
    LoadError::Transport(format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use theft_dashboard_core::{sample_dataset, LoadOutcome};

    fn loaded() -> ViewState {
        let mut view = ViewState::loading();
        assert!(view
            .finish_loading(LoadOutcome::remote(sample_dataset()))
            .is_ok());
        view
    }

    #[test]
    fn arrows_and_digits_switch_tabs() {
        let mut view = loaded();
        apply_key(&mut view, KeyCode::Left);
        assert_eq!(view.tab(), Tab::Recommendations);

        apply_key(&mut view, KeyCode::Char('2'));
        assert_eq!(view.tab(), Tab::Geographic);

        apply_key(&mut view, KeyCode::Right);
        assert_eq!(view.tab(), Tab::Analytics);
    }

    #[test]
    fn sample_data_banner_only_on_overview() {
        let mut view = ViewState::loading();
        assert!(view
            .finish_loading(resolve(Err::<String, _>(LoadError::Status { status: 404 })))
            .is_ok());
        assert!(shows_fallback_banner(&view));

        for key in ['2', '3', '4'] {
            apply_key(&mut view, KeyCode::Char(key));
            assert!(!shows_fallback_banner(&view), "banner on {:?}", view.tab());
        }

        assert!(!shows_fallback_banner(&loaded()));
    }

    #[test]
    fn reload_is_ignored_while_loading() {
        let mut view = ViewState::loading();
        assert!(!apply_key(&mut view, KeyCode::Char('r')));

        let mut view = loaded();
        assert!(apply_key(&mut view, KeyCode::Char('r')));
    }
}
