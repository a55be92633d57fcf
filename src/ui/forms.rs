use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Record, RecordId};

/// Characters accepted in the phone field besides digits.
const PHONE_PUNCTUATION: &[char] = &[' ', '+', '-', '(', ')', '.'];

/// Internal representation of the add/edit record form.
#[derive(Default, Clone)]
pub(crate) struct RecordForm {
    pub(crate) name: String,
    pub(crate) phone_number: String,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
}

/// Fields available within the record form.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) enum RecordField {
    #[default]
    Name,
    Phone,
}

impl RecordForm {
    /// Populate the form from an existing record when editing.
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            phone_number: record.phone_number.clone(),
            active: RecordField::Name,
            error: None,
        }
    }

    /// Swap focus between the name and phone fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            RecordField::Name => RecordField::Phone,
            RecordField::Phone => RecordField::Name,
        };
    }

    /// Append a character to the active field. Commas are refused everywhere
    /// because the directory file has no way to escape them.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || ch == ',' {
            return false;
        }
        match self.active {
            RecordField::Name => {
                self.name.push(ch);
                true
            }
            RecordField::Phone => {
                if ch.is_ascii_digit() || PHONE_PUNCTUATION.contains(&ch) {
                    self.phone_number.push(ch);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            RecordField::Name => {
                self.name.pop();
            }
            RecordField::Phone => {
                self.phone_number.pop();
            }
        }
    }

    /// Validate the inputs and return trimmed values ready for the store.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Name is required."));
        }
        let phone_number = self.phone_number.trim();
        if phone_number.is_empty() {
            return Err(anyhow!("Phone number is required."));
        }
        if name.contains(',') || phone_number.contains(',') {
            return Err(anyhow!("Commas cannot be stored in the directory file."));
        }
        Ok((name.to_string(), phone_number.to_string()))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: RecordField) -> Line<'static> {
        let value = match field {
            RecordField::Name => &self.name,
            RecordField::Phone => &self.phone_number,
        };
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: RecordField) -> usize {
        match field {
            RecordField::Name => self.name.chars().count(),
            RecordField::Phone => self.phone_number.chars().count(),
        }
    }
}

/// Single-field prompt for a name search.
#[derive(Default, Clone)]
pub(crate) struct SearchForm {
    pub(crate) query: String,
    pub(crate) error: Option<String>,
}

impl SearchForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.query.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.query.pop();
    }

    /// Trimmed query, or an error when nothing was typed.
    pub(crate) fn parse_query(&self) -> Result<String> {
        let query = self.query.trim();
        if query.is_empty() {
            Err(anyhow!("Enter a name to search for."))
        } else {
            Ok(query.to_string())
        }
    }
}

/// Snapshot of the record awaiting delete confirmation.
#[derive(Clone)]
pub(crate) struct ConfirmRecordDelete {
    pub(crate) id: RecordId,
    pub(crate) name: String,
    pub(crate) phone_number: String,
}

impl ConfirmRecordDelete {
    pub(crate) fn from(record: &Record) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            phone_number: record.phone_number.clone(),
        }
    }
}
