use crate::app::state::App;
use crossterm::event::KeyCode;
use theft_dashboard_core::Tab;

const PAGE: isize = 5;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if handle_help_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char('r') => {
            app.request_reload();
        }
        KeyCode::Right | KeyCode::Tab => app.next_tab(),
        KeyCode::Left | KeyCode::BackTab => app.previous_tab(),
        KeyCode::Char(digit @ '1'..='4') => {
            let index = digit as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(index) {
                app.select_tab(tab);
            }
        }
        _ if app.view.tab() == Tab::Geographic => handle_region_scroll(app, key),
        _ => {}
    }
}

fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::F(1) | KeyCode::Char('?')) {
        app.show_help = !app.show_help;
        return true;
    }

    if app.show_help {
        if key == KeyCode::Esc {
            app.show_help = false;
        }
        return true;
    }

    false
}

fn handle_region_scroll(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up => app.scroll_regions(-1),
        KeyCode::Down => app.scroll_regions(1),
        KeyCode::PageUp => app.scroll_regions(-PAGE),
        KeyCode::PageDown => app.scroll_regions(PAGE),
        KeyCode::Home => app.region_index = 0,
        KeyCode::End => app.scroll_regions_to_end(),
        _ => {}
    }
}
