use anyhow::Error;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::models::Book;

/// Column widths for the book table. Text columns share whatever is left.
const TABLE_WIDTHS: [Constraint; 6] = [
    Constraint::Length(5),
    Constraint::Fill(3),
    Constraint::Fill(2),
    Constraint::Length(6),
    Constraint::Fill(2),
    Constraint::Length(6),
];

/// Render books as a table with an optional highlighted row. Shared by the
/// "all books" and search screens.
pub(crate) fn render_book_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    books: &[Book],
    selected: Option<usize>,
) {
    let header = Row::new(["ID", "Title", "Author", "Year", "Genre", "Read"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = books.iter().map(|book| {
        Row::new([
            book.id.to_string(),
            book.title.clone(),
            book.author.clone(),
            book.publication_year.clone(),
            book.genre.clone(),
            book.read_label().to_string(),
        ])
    });

    let table = Table::new(rows, TABLE_WIDTHS)
        .header(header)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

/// Centered gray hint used when a screen has nothing to show.
pub(crate) fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(Line::from(message.to_string()))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Clamp a selection index after the underlying list changed length.
pub(crate) fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.min(len - 1)
    }
}

/// Move a selection by `delta`, saturating at both ends.
pub(crate) fn step_selection(selected: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = selected as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn selection_saturates() {
        assert_eq!(step_selection(0, -1, 3), 0);
        assert_eq!(step_selection(1, 5, 3), 2);
        assert_eq!(step_selection(0, 1, 0), 0);
    }

    #[test]
    fn clamp_handles_shrinking_lists() {
        assert_eq!(clamp_selection(4, 2), 1);
        assert_eq!(clamp_selection(4, 0), 0);
    }

    #[test]
    fn surface_error_reports_root_cause() {
        let err = Err::<(), _>(anyhow!("disk full"))
            .context("failed to add book")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }
}
