/// First row to draw so that `selected` stays inside a window of
/// `visible` rows.
pub const fn scroll_offset(total_rows: usize, visible: usize, selected: usize) -> usize {
    if visible == 0 || total_rows <= visible {
        return 0;
    }

    let last_start = total_rows - visible;
    let offset = if selected >= visible {
        selected + 1 - visible
    } else {
        0
    };

    if offset > last_start {
        last_start
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tables_never_scroll() {
        assert_eq!(scroll_offset(3, 10, 2), 0);
        assert_eq!(scroll_offset(3, 0, 2), 0);
    }

    #[test]
    fn selection_stays_on_last_visible_row() {
        assert_eq!(scroll_offset(16, 5, 4), 0);
        assert_eq!(scroll_offset(16, 5, 5), 1);
        assert_eq!(scroll_offset(16, 5, 15), 11);
    }
}
