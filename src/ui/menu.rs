use crate::app::{App, MENU_ITEMS};
use ratatui::text::{Line, Span};

/// Main menu entries, the selected one highlighted.
pub fn lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    lines.extend(MENU_ITEMS.iter().enumerate().map(|(i, item)| {
        let (marker, style) = if i == app.menu_selected {
            ("> ", app.palette.item_selected)
        } else {
            ("  ", app.palette.item_normal)
        };
        Line::from(Span::styled(format!("{}{}", marker, item), style))
    }));
    lines
}
