use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::models::{Record, RecordId};
use crate::store::RecordStore;

use super::forms::{ConfirmRecordDelete, RecordField, RecordForm, SearchForm};
use super::helpers::{centered_rect, cursor_column, name_column_width, record_row, surface_error};
use super::screens::{ResultsScreen, Selection};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// What the main area shows.
enum Screen {
    Directory,
    Results(ResultsScreen),
}

/// Modal overlays on top of the current screen.
enum Mode {
    Normal,
    Adding(RecordForm),
    Editing { id: RecordId, form: RecordForm },
    ConfirmDelete(ConfirmRecordDelete),
    Searching(SearchForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Application state: the record store plus everything the TUI needs to
/// present it. Every successful mutation is written back to the store's file
/// before the next key is handled, unless that file failed to load.
pub struct App {
    store: RecordStore,
    directory: Selection,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    /// Set when the file exists but could not be read. Mutations then stay in
    /// memory until the user saves explicitly.
    unreadable_file: bool,
}

impl App {
    /// Wrap an already populated store.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            directory: Selection::default(),
            screen: Screen::Directory,
            mode: Mode::Normal,
            status: None,
            unreadable_file: false,
        }
    }

    /// Load the store's file and build the app around it. A file that cannot
    /// be read leaves the directory empty, the reason in the footer, and the
    /// file untouched until the user saves with `w` or Ctrl+S.
    pub fn open(store: RecordStore) -> Self {
        let mut app = Self::new(store);
        app.load_directory();
        app
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Dispatch a key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Adding(form) => self.handle_add_record(code, form)?,
            Mode::Editing { id, form } => self.handle_edit_record(code, id, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::Searching(form) => self.handle_search(code, form)?,
        };

        Ok(exit)
    }

    /// Ctrl+S saves from the main screen; inside dialogs it is ignored.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        if matches!(self.mode, Mode::Normal) {
            self.save_directory();
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if matches!(self.screen, Screen::Results(_)) {
                    self.screen = Screen::Directory;
                    self.clear_status();
                } else {
                    *exit = true;
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.selection_mut().select_first(),
            KeyCode::End => {
                let len = self.visible_len();
                self.selection_mut().select_last(len);
            }
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(Mode::Adding(RecordForm::default()));
            }
            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(record) = self.current_record() {
                    let id = record.id;
                    let form = RecordForm::from_record(record);
                    self.clear_status();
                    return Ok(Mode::Editing { id, form });
                }
                self.set_status("No record selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
                if let Some(record) = self.current_record() {
                    let confirm = ConfirmRecordDelete::from(record);
                    self.clear_status();
                    return Ok(Mode::ConfirmDelete(confirm));
                }
                self.set_status("No record selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchForm::default()));
            }
            KeyCode::Char('w') | KeyCode::Char('W') => self.save_directory(),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_record(&mut self, code: KeyCode, mut form: RecordForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if Self::advance_to_phone(&mut form) {
                    return Ok(Mode::Adding(form));
                }
                match form.parse_inputs() {
                    Ok((name, phone_number)) => {
                        self.add_record(name, phone_number);
                        return Ok(Mode::Normal);
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Adding(form))
    }

    fn handle_edit_record(
        &mut self,
        code: KeyCode,
        id: RecordId,
        mut form: RecordForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if Self::advance_to_phone(&mut form) {
                    return Ok(Mode::Editing { id, form });
                }
                match form.parse_inputs() {
                    Ok((name, phone_number)) => {
                        self.update_record(id, name, phone_number);
                        return Ok(Mode::Normal);
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        form.error = Some(message.clone());
                        self.set_status(message, StatusKind::Error);
                    }
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Editing { id, form })
    }

    /// Enter on a filled name with an empty phone moves on instead of
    /// reporting the missing phone.
    fn advance_to_phone(form: &mut RecordForm) -> bool {
        if form.active == RecordField::Name
            && !form.name.trim().is_empty()
            && form.phone_number.trim().is_empty()
        {
            form.toggle_field();
            true
        } else {
            false
        }
    }

    fn handle_confirm_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmRecordDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.delete_record(&confirm);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut form: SearchForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_query() {
                Ok(query) => {
                    self.run_search(query);
                    return Ok(Mode::Normal);
                }
                Err(err) => form.error = Some(surface_error(&err)),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::Searching(form))
    }

    fn load_directory(&mut self) {
        let loaded = self.store.load().map(|records| records.len());
        let path = self.store.path().display().to_string();
        match loaded {
            Ok(count) => {
                self.set_status(format!("Loaded {count} record(s) from {path}."), StatusKind::Info);
            }
            Err(err) if err.is_missing_file() => {
                warn!(%path, "directory file missing, starting empty");
                self.set_status(
                    format!("{path} does not exist yet; starting with an empty directory."),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                warn!(error = %err, "failed to load directory");
                self.unreadable_file = true;
                self.set_status(
                    format!("Error reading data from file: {err}. Press w to overwrite it."),
                    StatusKind::Error,
                );
            }
        }
    }

    fn add_record(&mut self, name: String, phone_number: String) {
        let message = format!("Added {name}.");
        self.store.add(name, phone_number);
        self.screen = Screen::Directory;
        self.directory.select_last(self.store.len());
        self.persist(message);
    }

    fn update_record(&mut self, id: RecordId, name: String, phone_number: String) {
        let message = format!("Updated {name}.");
        match self.store.update(id, name, phone_number) {
            Ok(()) => self.persist(message),
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn delete_record(&mut self, confirm: &ConfirmRecordDelete) {
        match self.store.delete(confirm.id) {
            Ok(_) => {
                if let Screen::Results(results) = &mut self.screen {
                    results.forget(confirm.id);
                }
                self.directory.ensure_in_bounds(self.store.len());
                self.persist(format!("Deleted {}.", confirm.name));
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn run_search(&mut self, query: String) {
        let results = ResultsScreen::new(query.clone(), &self.store.find_by_name(&query));
        debug!(%query, matches = results.len(), "searched directory");
        if results.is_empty() {
            self.set_status(
                format!("No record named \"{query}\" was found."),
                StatusKind::Error,
            );
            return;
        }
        let message = format!("Found {} record(s) named \"{query}\".", results.len());
        self.screen = Screen::Results(results);
        self.set_status(message, StatusKind::Info);
    }

    fn save_directory(&mut self) {
        if self.unreadable_file {
            info!(path = %self.store.path().display(), "overwriting unreadable directory file");
            self.unreadable_file = false;
        }
        let message = format!("Data saved to {}.", self.store.path().display());
        self.persist(message);
    }

    /// Write the store back to disk, reporting `success` or the failure.
    fn persist(&mut self, success: String) {
        if self.unreadable_file {
            let path = self.store.path().display().to_string();
            warn!(%path, "not overwriting unreadable directory file");
            self.set_status(
                format!("Not saved: {path} could not be read. Press w to overwrite it."),
                StatusKind::Error,
            );
            return;
        }
        match self.store.save() {
            Ok(()) => self.set_status(success, StatusKind::Info),
            Err(err) => {
                warn!(error = %err, "failed to save directory");
                self.set_status(
                    format!("Error saving data to file: {err}"),
                    StatusKind::Error,
                );
            }
        }
    }

    fn current_record(&self) -> Option<&Record> {
        match &self.screen {
            Screen::Directory => self.store.list().get(self.directory.selected),
            Screen::Results(results) => results.current_id().and_then(|id| self.store.get(id)),
        }
    }

    fn visible_len(&self) -> usize {
        match &self.screen {
            Screen::Directory => self.store.len(),
            Screen::Results(results) => results.len(),
        }
    }

    fn selection_mut(&mut self) -> &mut Selection {
        match &mut self.screen {
            Screen::Directory => &mut self.directory,
            Screen::Results(results) => &mut results.selection,
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.visible_len();
        self.selection_mut().move_by(offset, len);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Directory => self.draw_directory(frame, content_area),
            Screen::Results(results) => self.draw_results(frame, content_area, results),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Adding(form) => self.draw_record_form(frame, area, "Add Record", form),
            Mode::Editing { form, .. } => self.draw_record_form(frame, area, "Edit Record", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(form) => self.draw_search_form(frame, area, form),
            Mode::Normal => {}
        }
    }

    fn draw_directory(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Phone Directory • {} • {} record(s)",
            self.store.path().display(),
            self.store.len()
        );

        if self.store.is_empty() {
            let message = Paragraph::new("No records yet. Press '+' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(message, area);
            return;
        }

        let records: Vec<&Record> = self.store.list().iter().collect();
        self.render_records(frame, area, title, &records, self.directory.selected);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect, results: &ResultsScreen) {
        let records = results.records(&self.store);
        let title = format!("Search \"{}\" • {} match(es)", results.query, records.len());

        if records.is_empty() {
            let message = Paragraph::new("No matching records left. Press Esc to go back.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(message, area);
            return;
        }

        self.render_records(frame, area, title, &records, results.selection.selected);
    }

    fn render_records(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: String,
        records: &[&Record],
        selected: usize,
    ) {
        let width = name_column_width(records.iter().copied());
        let items: Vec<ListItem> = records
            .iter()
            .map(|record| ListItem::new(record_row(record, width)))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let back = match self.screen {
            Screen::Directory => " Quit",
            Screen::Results(_) => " Back",
        };
        Line::from(vec![
            Span::styled("[↑↓]", key_style),
            Span::raw(" Select   "),
            Span::styled("[+]", key_style),
            Span::raw(" Add   "),
            Span::styled("[e]", key_style),
            Span::raw(" Edit   "),
            Span::styled("[-]", key_style),
            Span::raw(" Delete   "),
            Span::styled("[f]", key_style),
            Span::raw(" Search   "),
            Span::styled("[w]", key_style),
            Span::raw(" Save   "),
            Span::styled("[Esc]", key_style),
            Span::raw(back),
            Span::raw("   "),
            Span::styled("[q]", key_style),
            Span::raw(" Quit"),
        ])
    }

    fn draw_record_form(&self, frame: &mut Frame, area: Rect, title: &str, form: &RecordForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let name_line = form.build_line("Name", RecordField::Name);
        let phone_line = form.build_line("Phone", RecordField::Phone);

        let mut lines = vec![name_line, phone_line, Line::from("")];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor = match form.active {
            RecordField::Name => (
                cursor_column(inner, "Name: ", form.value_len(RecordField::Name)),
                inner.y,
            ),
            RecordField::Phone => (
                cursor_column(inner, "Phone: ", form.value_len(RecordField::Phone)),
                inner.y.saturating_add(1),
            ),
        };
        frame.set_cursor_position(cursor);
    }

    fn draw_search_form(&self, frame: &mut Frame, area: Rect, form: &SearchForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Search by Name")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let hint = match &form.error {
            Some(error) => Span::styled(error.clone(), Style::default().fg(Color::Red)),
            None => Span::styled(
                "Enter to search • Esc to cancel",
                Style::default().fg(Color::Gray),
            ),
        };
        let lines = vec![
            Line::from(vec![
                Span::raw("Name: "),
                Span::styled(form.query.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
            Line::from(hint),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = cursor_column(inner, "Name: ", form.query.chars().count());
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRecordDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Delete")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete {} ({})?",
                confirm.name, confirm.phone_number
            )),
            Line::from("The directory file is rewritten immediately."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn open_with(dir: &tempfile::TempDir, contents: &str) -> App {
        let path = dir.path().join("phone_directory.txt");
        fs::write(&path, contents).unwrap();
        App::open(RecordStore::new(path))
    }

    fn press(app: &mut App, keys: &[KeyCode]) -> bool {
        let mut exit = false;
        for key in keys {
            exit = app.handle_key(*key).unwrap();
        }
        exit
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn status(app: &App) -> (&str, StatusKind) {
        let status = app.status.as_ref().expect("status set");
        (status.text.as_str(), status.kind)
    }

    fn file_contents(app: &App) -> String {
        fs::read_to_string(app.store().path()).unwrap()
    }

    #[test]
    fn open_reports_loaded_records() {
        let dir = tempfile::tempdir().unwrap();
        let app = open_with(&dir, "Alice, 5551234\nBob, 5555678\n");

        assert_eq!(app.store().len(), 2);
        let (text, kind) = status(&app);
        assert!(text.starts_with("Loaded 2 record(s)"));
        assert_eq!(kind, StatusKind::Info);
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::open(RecordStore::new(dir.path().join("new.txt")));

        assert!(app.store().is_empty());
        let (text, kind) = status(&app);
        assert!(text.contains("starting with an empty directory"));
        assert_eq!(kind, StatusKind::Info);
    }

    #[test]
    fn undecodable_file_keeps_existing_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone_directory.txt");
        fs::write(&path, b"Alice, 5551234\nBob, 5555678\nCaf\xE9, 111\n").unwrap();
        let mut app = App::open(RecordStore::new(&path));

        assert_eq!(app.store().len(), 3);
        assert_eq!(status(&app).1, StatusKind::Info);

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Dan");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "9");
        press(&mut app, &[KeyCode::Enter]);

        let saved = file_contents(&app);
        assert!(saved.starts_with("Alice, 5551234\nBob, 5555678\n"));
        assert!(saved.ends_with("Dan, 9\n"));
    }

    #[test]
    fn unreadable_file_is_not_overwritten_by_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone_directory.txt");
        fs::create_dir(&path).unwrap();
        let mut app = App::open(RecordStore::new(&path));

        assert!(app.store().is_empty());
        let (text, kind) = status(&app);
        assert!(text.starts_with("Error reading data from file"));
        assert_eq!(kind, StatusKind::Error);

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Dan");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "9");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.store().len(), 1);
        let (text, kind) = status(&app);
        assert!(text.starts_with("Not saved:"));
        assert_eq!(kind, StatusKind::Error);
        assert!(path.is_dir());
    }

    #[test]
    fn explicit_save_overwrites_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phone_directory.txt");
        fs::create_dir(&path).unwrap();
        let mut app = App::open(RecordStore::new(&path));

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Dan");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "9");
        press(&mut app, &[KeyCode::Enter]);
        fs::remove_dir(&path).unwrap();

        press(&mut app, &[KeyCode::Char('w')]);
        assert_eq!(file_contents(&app), "Dan, 9\n");
        assert_eq!(status(&app).1, StatusKind::Info);
    }

    #[test]
    fn add_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Alice, 5551234\nBob, 5555678\n");

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Carol");
        press(&mut app, &[KeyCode::Enter]);
        type_text(&mut app, "5559999");
        press(&mut app, &[KeyCode::Enter]);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(
            file_contents(&app),
            "Alice, 5551234\nBob, 5555678\nCarol, 5559999\n"
        );
        assert_eq!(app.directory.selected, 2);
        assert_eq!(status(&app), ("Added Carol.", StatusKind::Info));
    }

    #[test]
    fn add_with_missing_phone_keeps_form_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "");

        press(&mut app, &[KeyCode::Char('a'), KeyCode::Tab, KeyCode::Enter]);

        match &app.mode {
            Mode::Adding(form) => assert_eq!(form.error.as_deref(), Some("Name is required.")),
            _ => panic!("form should stay open"),
        }
        assert!(app.store().is_empty());
    }

    #[test]
    fn add_cancelled_with_esc() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "");

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Dan");
        press(&mut app, &[KeyCode::Esc]);

        assert!(matches!(app.mode, Mode::Normal));
        assert!(app.store().is_empty());
        assert_eq!(file_contents(&app), "");
    }

    #[test]
    fn commas_never_reach_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "");

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Smith, John");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "555");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(file_contents(&app), "Smith John, 555\n");
    }

    #[test]
    fn edit_selected_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Alice, 5551234\nBob, 5555678\n");

        press(&mut app, &[KeyCode::Down, KeyCode::Char('e'), KeyCode::Tab]);
        for _ in 0..7 {
            press(&mut app, &[KeyCode::Backspace]);
        }
        type_text(&mut app, "5550000");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(file_contents(&app), "Alice, 5551234\nBob, 5550000\n");
        assert_eq!(status(&app), ("Updated Bob.", StatusKind::Info));
    }

    #[test]
    fn delete_after_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Alice, 5551234\nBob, 5555678\n");

        press(&mut app, &[KeyCode::End, KeyCode::Char('d')]);
        assert!(matches!(app.mode, Mode::ConfirmDelete(_)));
        press(&mut app, &[KeyCode::Char('y')]);

        assert_eq!(file_contents(&app), "Alice, 5551234\n");
        assert_eq!(app.directory.selected, 0);
    }

    #[test]
    fn delete_cancelled_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Alice, 5551234\n");

        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('n')]);

        assert_eq!(app.store().len(), 1);
        assert_eq!(status(&app), ("Deletion cancelled.", StatusKind::Info));
    }

    #[test]
    fn delete_on_empty_directory_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "");

        press(&mut app, &[KeyCode::Char('d')]);

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(status(&app).1, StatusKind::Error);
    }

    #[test]
    fn search_lists_every_case_insensitive_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Ann, 1\nBob, 3\nann, 2\n");

        press(&mut app, &[KeyCode::Char('f')]);
        type_text(&mut app, "ANN");
        press(&mut app, &[KeyCode::Enter]);

        match &app.screen {
            Screen::Results(results) => {
                let phones: Vec<&str> = results
                    .records(app.store())
                    .into_iter()
                    .map(|record| record.phone_number.as_str())
                    .collect();
                assert_eq!(phones, vec!["1", "2"]);
            }
            Screen::Directory => panic!("expected results screen"),
        }

        press(&mut app, &[KeyCode::Esc]);
        assert!(matches!(app.screen, Screen::Directory));
    }

    #[test]
    fn search_without_match_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Alice, 5551234\n");

        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "Zoe");
        press(&mut app, &[KeyCode::Enter]);

        assert!(matches!(app.screen, Screen::Directory));
        let (text, kind) = status(&app);
        assert_eq!(text, "No record named \"Zoe\" was found.");
        assert_eq!(kind, StatusKind::Error);
    }

    #[test]
    fn delete_from_results_updates_both_views() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Ann, 1\nBob, 3\nann, 2\n");

        press(&mut app, &[KeyCode::Char('f')]);
        type_text(&mut app, "ann");
        press(&mut app, &[KeyCode::Enter, KeyCode::Down, KeyCode::Char('d'), KeyCode::Char('y')]);

        assert_eq!(file_contents(&app), "Ann, 1\nBob, 3\n");
        match &app.screen {
            Screen::Results(results) => assert_eq!(results.len(), 1),
            Screen::Directory => panic!("expected results screen"),
        }
    }

    #[test]
    fn save_failure_is_reported_and_record_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("book.txt");
        let mut app = App::open(RecordStore::new(&path));

        press(&mut app, &[KeyCode::Char('+')]);
        type_text(&mut app, "Eve");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "42");
        press(&mut app, &[KeyCode::Enter]);

        assert_eq!(app.store().len(), 1);
        let (text, kind) = status(&app);
        assert!(text.starts_with("Error saving data to file"));
        assert_eq!(kind, StatusKind::Error);
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn explicit_save_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "  Alice ,5551234\njunk line\n");

        press(&mut app, &[KeyCode::Char('w')]);
        assert_eq!(file_contents(&app), "Alice, 5551234\n");

        fs::write(app.store().path(), "").unwrap();
        app.handle_ctrl_s().unwrap();
        assert_eq!(file_contents(&app), "Alice, 5551234\n");
    }

    #[test]
    fn ctrl_s_ignored_inside_dialogs() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "Alice, 5551234\n");
        fs::write(app.store().path(), "").unwrap();

        press(&mut app, &[KeyCode::Char('+')]);
        app.handle_ctrl_s().unwrap();

        assert_eq!(file_contents(&app), "");
        assert!(matches!(app.mode, Mode::Adding(_)));
    }

    #[test]
    fn quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = open_with(&dir, "");

        assert!(press(&mut app, &[KeyCode::Char('q')]));
        assert!(press(&mut app, &[KeyCode::Esc]));
        assert!(!press(&mut app, &[KeyCode::Char('+'), KeyCode::Char('q')]));
    }

    #[test]
    fn draws_records_and_footer() {
        let dir = tempfile::tempdir().unwrap();
        let app = open_with(&dir, "Alice, 5551234\nBob, 5555678\n");

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Alice"));
        assert!(screen.contains("5555678"));
        assert!(screen.contains("Loaded 2 record(s)"));
    }
}
