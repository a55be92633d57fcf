use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::StoreError;
use crate::models::Record;

/// Widest name column before long names start pushing phone numbers around.
const MAX_NAME_COLUMN: usize = 32;

/// Width of the name column for a listing: the longest name, capped.
pub(crate) fn name_column_width<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|record| record.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_NAME_COLUMN)
}

/// One listing row: the name padded (or cut) to `width`, then the phone.
pub(crate) fn record_row(record: &Record, width: usize) -> String {
    let mut name: String = record.name.chars().take(width).collect();
    let used = name.chars().count();
    name.push_str(&" ".repeat(width.saturating_sub(used)));
    format!("{name}   {}", record.phone_number)
}

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

/// Column for a text cursor placed after `label` and `value_len` typed
/// characters, kept inside `inner`.
pub(crate) fn cursor_column(inner: Rect, label: &str, value_len: usize) -> u16 {
    let offset = u16::try_from(label.len().saturating_add(value_len)).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(offset)
        .min(inner.right().saturating_sub(1).max(inner.x))
}

/// Pick the message worth showing for an error. Store errors already name the
/// file and the OS cause; for anything else the innermost cause is the most
/// specific.
pub(crate) fn surface_error(err: &Error) -> String {
    if let Some(store_err) = err.downcast_ref::<StoreError>() {
        return store_err.to_string();
    }
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
