use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{read_status_text, NewBook, SearchField};

/// Fields of the "Add a Book" form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    ReadStatus,
}

impl BookField {
    const ORDER: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::ReadStatus,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Publication Year",
            BookField::Genre => "Genre",
            BookField::ReadStatus => "Read Status",
        }
    }

    /// Row offset of this field inside the rendered form.
    pub(crate) fn row(self) -> u16 {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as u16
    }

    fn step(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        Self::ORDER[(self.row() as isize + delta).rem_euclid(len) as usize]
    }
}

/// State of the "Add a Book" form. Nothing here is validated: the catalog
/// happily stores empty strings.
#[derive(Default, Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) read: bool,
    pub(crate) active: BookField,
}

impl BookForm {
    pub(crate) fn focus_next(&mut self) {
        self.active = self.active.step(1);
    }

    pub(crate) fn focus_prev(&mut self) {
        self.active = self.active.step(-1);
    }

    pub(crate) fn toggle_read(&mut self) {
        self.read = !self.read;
    }

    /// Append a character to the active field. On the read-status selector a
    /// space flips the value and any other character is ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            BookField::ReadStatus => {
                if ch == ' ' {
                    self.toggle_read();
                    true
                } else {
                    false
                }
            }
            field => {
                if let Some(value) = self.text_mut(field) {
                    value.push(ch);
                }
                true
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        if let Some(value) = self.text_mut(field) {
            value.pop();
        }
    }

    /// Snapshot the inputs as an insert payload. Values are stored as typed.
    pub(crate) fn to_new_book(&self) -> NewBook {
        NewBook::new(
            self.title.clone(),
            self.author.clone(),
            self.year.clone(),
            self.genre.clone(),
            self.read,
        )
    }

    /// Start over after a successful save, keeping focus on the first field.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn text(&self, field: BookField) -> Option<&str> {
        match field {
            BookField::Title => Some(&self.title),
            BookField::Author => Some(&self.author),
            BookField::Year => Some(&self.year),
            BookField::Genre => Some(&self.genre),
            BookField::ReadStatus => None,
        }
    }

    fn text_mut(&mut self, field: BookField) -> Option<&mut String> {
        match field {
            BookField::Title => Some(&mut self.title),
            BookField::Author => Some(&mut self.author),
            BookField::Year => Some(&mut self.year),
            BookField::Genre => Some(&mut self.genre),
            BookField::ReadStatus => None,
        }
    }

    /// Render one form row, highlighting the focused field.
    pub(crate) fn build_line(&self, field: BookField, focused: bool) -> Line<'static> {
        let is_active = focused && self.active == field;
        match self.text(field) {
            Some(value) => input_line(field.label(), value, is_active),
            None => {
                let style = if is_active {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::raw(format!("{}: ", field.label())),
                    Span::styled(format!("< {} >", read_status_text(self.read)), style),
                ])
            }
        }
    }

    /// Column where the cursor belongs for the active text field.
    pub(crate) fn cursor_column(&self) -> Option<u16> {
        let value = self.text(self.active)?;
        Some((self.active.label().len() + 2 + value.chars().count()) as u16)
    }
}

/// Single text input used by the "Remove a Book" screen.
#[derive(Default, Clone, Debug)]
pub(crate) struct TitleForm {
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl TitleForm {
    pub(crate) const LABEL: &'static str = "Title to remove";

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.title.push(ch);
        self.error = None;
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.title.pop();
    }

    /// The title to delete, or an error message when nothing was typed.
    pub(crate) fn parse_title(&self) -> Result<String, String> {
        if self.title.trim().is_empty() {
            Err("Enter the title of the book to remove.".to_string())
        } else {
            Ok(self.title.clone())
        }
    }

    pub(crate) fn build_line(&self, focused: bool) -> Line<'static> {
        input_line(Self::LABEL, &self.title, focused)
    }

    pub(crate) fn cursor_column(&self) -> u16 {
        (Self::LABEL.len() + 2 + self.title.chars().count()) as u16
    }
}

/// Field selector plus the term being typed on the search screen.
#[derive(Clone, Debug)]
pub(crate) struct SearchForm {
    pub(crate) field: SearchField,
    pub(crate) term: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            field: SearchField::Title,
            term: String::new(),
        }
    }
}

impl SearchForm {
    pub(crate) const TERM_LABEL: &'static str = "Enter a search term";

    pub(crate) fn cycle_field(&mut self, delta: isize) {
        self.field = self.field.cycle(delta);
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.term.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) -> bool {
        self.term.pop().is_some()
    }

    /// Term to query with, or `None` while the input is still empty.
    pub(crate) fn active_term(&self) -> Option<&str> {
        if self.term.is_empty() {
            None
        } else {
            Some(&self.term)
        }
    }

    pub(crate) fn build_lines(&self, focused: bool) -> Vec<Line<'static>> {
        let selector_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        vec![
            Line::from(vec![
                Span::raw("Search by: "),
                Span::styled(format!("< {} >", self.field.label()), selector_style),
            ]),
            input_line(Self::TERM_LABEL, &self.term, focused),
        ]
    }

    pub(crate) fn cursor_column(&self) -> u16 {
        (Self::TERM_LABEL.len() + 2 + self.term.chars().count()) as u16
    }
}

fn input_line(label: &str, value: &str, is_active: bool) -> Line<'static> {
    let display = if value.is_empty() && !is_active {
        "<empty>".to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}
