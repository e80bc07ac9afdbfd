// UI module for theft_dashboard
// Handles all UI rendering functions

mod chrome;
pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::Frame;
use theft_dashboard_core::Tab;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let Some(dataset) = app.dataset() else {
        screens::loading::render_loading(app, f);
        return;
    };

    let [header, tabs, content, status, shortcuts] = Layout::vertical([
        Constraint::Length(4), // Title area
        Constraint::Length(3), // Tabs
        Constraint::Min(8),    // Tab content
        Constraint::Length(3), // Status area
        Constraint::Length(1), // Shortcuts hint
    ])
    .areas(f.area().inner(Margin::new(1, 0)));

    chrome::render_header(dataset, f, header);
    chrome::render_tabs(app, f, tabs);

    match app.view.tab() {
        Tab::Overview => screens::overview::render_overview(app, dataset, f, content),
        Tab::Geographic => screens::geographic::render_geographic(app, dataset, f, content),
        Tab::Analytics => screens::analytics::render_analytics(app, dataset, f, content),
        Tab::Recommendations => {
            screens::recommendations::render_recommendations(dataset, f, content);
        }
    }

    chrome::render_status(app, f, status);
    chrome::render_shortcuts(f, shortcuts);

    if app.show_help {
        let area = f.area();
        chrome::render_help_popup(f, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use theft_dashboard::AppConfig;
    use theft_dashboard_core::{resolve, sample_dataset, LoadError, LoadOutcome};

    fn draw(app: &App) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(140, 48))?;
        terminal.draw(|f| ui(app, f))?;
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect::<String>();
        Ok(text)
    }

    #[test]
    fn loading_screen_before_data_arrives() -> Result<(), Box<dyn std::error::Error>> {
        let app = App::new(&AppConfig::default());
        let screen = draw(&app)?;
        assert!(screen.contains("Loading dashboard data..."));
        assert!(screen.contains("Analyzing vehicle theft patterns"));
        Ok(())
    }

    #[test]
    fn every_tab_renders() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(&AppConfig::default());
        app.finish_loading(LoadOutcome::remote(sample_dataset()));

        let expected = [
            (Tab::Overview, "Monthly Theft Trends"),
            (Tab::Geographic, "Regional Theft Analysis"),
            (Tab::Analytics, "Key Risk Factors"),
            (Tab::Recommendations, "Implementation Timeline"),
        ];
        for (tab, heading) in expected {
            app.select_tab(tab);
            let screen = draw(&app)?;
            assert!(screen.contains("Vehicle Theft Analysis Dashboard"));
            assert!(screen.contains("Last Updated: July 2025"));
            assert!(screen.contains(heading), "{heading} missing on {tab:?}");
        }
        Ok(())
    }

    #[test]
    fn banner_only_for_sample_data() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(&AppConfig::default());
        app.finish_loading(LoadOutcome::remote(sample_dataset()));
        assert!(!draw(&app)?.contains("Using sample data"));

        let mut app = App::new(&AppConfig::default());
        app.finish_loading(resolve(Err::<Vec<u8>, _>(LoadError::Status { status: 404 })));
        assert!(draw(&app)?.contains("Using sample data"));
        Ok(())
    }

    #[test]
    fn help_popup_lists_keys() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(&AppConfig::default());
        app.finish_loading(LoadOutcome::remote(sample_dataset()));
        app.show_help = true;
        assert!(draw(&app)?.contains("Help & Keyboard Shortcuts"));
        Ok(())
    }
}
