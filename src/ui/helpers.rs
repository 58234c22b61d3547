use anyhow::Error;
use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::{format_phone, StudentRecord};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Cell text for one table row. The phone column is shown formatted; the
/// stored value stays as entered.
pub(crate) fn display_cells(record: &StudentRecord) -> [String; 4] {
    [
        record.first_name.clone(),
        record.last_name.clone(),
        format_phone(&record.phone),
        record.email.clone(),
    ]
}

/// Wall-clock time appended to save confirmations.
pub(crate) fn clock_time(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};
    use chrono::TimeZone;

    #[test]
    fn surface_error_returns_root_cause() {
        let err = Err::<(), _>(anyhow!("disk full"))
            .context("failed to store file metadata")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }

    #[test]
    fn display_cells_format_phone_only() {
        let record = StudentRecord::new("Ada", "Lovelace", "5551234567", "ada@example.com");
        assert_eq!(
            display_cells(&record),
            [
                "Ada".to_string(),
                "Lovelace".to_string(),
                "(555) 123-4567".to_string(),
                "ada@example.com".to_string(),
            ]
        );
    }

    #[test]
    fn clock_time_is_hours_minutes_seconds() {
        let now = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(clock_time(now), "09:05:07");
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
    }
}
