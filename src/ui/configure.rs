use crate::app::App;
use ratatui::text::{Line, Span};
use std::time::Duration;

/// Settings rows, in the order the Configure cursor walks them.
pub fn lines(app: &App, row: usize) -> Vec<Line<'static>> {
    let config = &app.config;
    let values = [
        format!("Refresh Rate: {}", format_interval(config.refresh_interval())),
        format!("Color Theme: {}", config.color_theme),
        format!(
            "Notifications: {}",
            if config.enable_notifications { "on" } else { "off" }
        ),
    ];

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("Settings:", app.palette.detail_heading)),
    ];
    lines.extend(values.into_iter().enumerate().map(|(i, text)| {
        let style = if i == row {
            app.palette.item_selected
        } else {
            app.palette.item_normal
        };
        Line::from(Span::styled(format!("  {}", text), style))
    }));
    lines.push(Line::from(Span::styled(
        format!("  Feeds File: {}", config.feeds_file.display()),
        app.palette.detail_meta,
    )));
    lines
}

/// `1m`, `15m`, `1h30m`; whole seconds only when not a minute multiple.
fn format_interval(d: Duration) -> String {
    let secs = d.as_secs();
    if secs % 60 != 0 {
        return format!("{}s", secs);
    }
    let (hours, minutes) = (secs / 3600, secs % 3600 / 60);
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h{}m", h, m),
    }
}
