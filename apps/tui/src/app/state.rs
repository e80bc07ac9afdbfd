use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use theft_dashboard::{AppConfig, DataSource};
use theft_dashboard_core::{DashboardDataset, LoadOutcome, NumberFormat, Tab, ViewState};
use throbber_widgets_tui::ThrobberState;
use tracing::{info, warn};

const THROBBER_STEP: Duration = Duration::from_millis(120);

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub view: ViewState,
    pub source: DataSource,
    pub numbers: NumberFormat,
    pub status_message: String,
    pub show_help: bool,
    pub region_index: usize,
    pub loaded_at: Option<DateTime<Local>>,
    pub reload_requested: bool,
    pub throbber_state: ThrobberState,
    pub last_frame: Instant,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            view: ViewState::loading(),
            source: config.source.clone(),
            numbers: config.numbers,
            status_message: String::new(),
            show_help: false,
            region_index: 0,
            loaded_at: None,
            reload_requested: false,
            throbber_state: ThrobberState::default(),
            last_frame: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        if !self.view.is_loading() {
            return;
        }

        let now = Instant::now();
        if now.duration_since(self.last_frame) >= THROBBER_STEP {
            self.throbber_state.calc_next();
            self.last_frame = now;
        }
    }

    pub fn dataset(&self) -> Option<&DashboardDataset> {
        self.view.dataset()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.view.tab() != tab {
            self.view.select_tab(tab);
            self.region_index = 0;
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.view.tab().next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.view.tab().previous());
    }

    pub fn region_count(&self) -> usize {
        self.dataset().map_or(0, |dataset| dataset.regional_data.len())
    }

    pub fn scroll_regions(&mut self, delta: isize) {
        let count = self.region_count();
        if count == 0 {
            self.region_index = 0;
            return;
        }

        self.region_index = self
            .region_index
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    pub fn scroll_regions_to_end(&mut self) {
        self.region_index = self.region_count().saturating_sub(1);
    }

    /// Asks the event loop for a fresh fetch. Ignored while a load is
    /// already running.
    pub fn request_reload(&mut self) {
        if self.view.is_loading() {
            return;
        }
        self.reload_requested = true;
    }

    /// Drops the current dataset and returns to the loading state.
    pub fn begin_reload(&mut self) {
        info!(source = %self.source, "reloading dashboard data");
        self.reload_requested = false;
        self.view = self.view.reloading();
        self.region_index = 0;
        self.loaded_at = None;
        self.status_message = "Reloading dashboard data...".to_string();
    }

    pub fn finish_loading(&mut self, outcome: LoadOutcome) {
        let fallback = outcome.is_fallback();
        if let Err(e) = self.view.finish_loading(outcome) {
            warn!("Ignoring load result: {e}");
            return;
        }

        self.loaded_at = Some(Local::now());
        self.status_message = if fallback {
            "Loaded sample data".to_string()
        } else {
            format!("Loaded {}", self.source)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theft_dashboard_core::sample_dataset;

    fn loaded_app() -> App {
        let mut app = App::new(&AppConfig::default());
        app.finish_loading(LoadOutcome::remote(sample_dataset()));
        app
    }

    #[test]
    fn finishing_a_load_records_time_and_status() {
        let app = loaded_app();
        assert!(app.loaded_at.is_some());
        assert!(app.dataset().is_some());
        assert_eq!(app.status_message, "Loaded dashboard_data.json");
    }

    #[test]
    fn region_scrolling_is_clamped() {
        let mut app = loaded_app();
        app.scroll_regions(-3);
        assert_eq!(app.region_index, 0);

        app.scroll_regions(10);
        assert_eq!(app.region_index, 2);

        app.region_index = 0;
        app.scroll_regions_to_end();
        assert_eq!(app.region_index, 2);
    }

    #[test]
    fn switching_tabs_resets_scroll() {
        let mut app = loaded_app();
        app.select_tab(Tab::Geographic);
        app.scroll_regions(1);
        app.next_tab();
        assert_eq!(app.view.tab(), Tab::Analytics);
        assert_eq!(app.region_index, 0);
    }

    #[test]
    fn reload_only_when_idle() {
        let mut app = App::new(&AppConfig::default());
        app.request_reload();
        assert!(!app.reload_requested);

        app.finish_loading(LoadOutcome::remote(sample_dataset()));
        app.request_reload();
        assert!(app.reload_requested);

        app.begin_reload();
        assert!(app.view.is_loading());
        assert!(app.dataset().is_none());
        assert!(!app.reload_requested);
    }
}
