use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::cli::removal_message;
use crate::db::BookStore;
use crate::models::{Book, Statistics};

use super::forms::{BookField, BookForm, SearchForm, TitleForm};
use super::helpers::{
    clamp_selection, render_book_table, render_placeholder, step_selection, surface_error,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the navigation sidebar.
const SIDEBAR_WIDTH: u16 = 26;
/// Rows scrolled by PageUp/PageDown in the tables.
const PAGE_STEP: isize = 10;

/// The five actions offered in the sidebar, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Screen {
    Add,
    Remove,
    List,
    Search,
    Statistics,
}

impl Screen {
    const MENU: [Screen; 5] = [
        Screen::Add,
        Screen::Remove,
        Screen::List,
        Screen::Search,
        Screen::Statistics,
    ];

    fn title(self) -> &'static str {
        match self {
            Screen::Add => "Add a Book",
            Screen::Remove => "Remove a Book",
            Screen::List => "Display all Books",
            Screen::Search => "Search for a Book",
            Screen::Statistics => "Display Statistics",
        }
    }
}

/// Whether keystrokes drive the sidebar or the active screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Menu,
    Content,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Books currently loaded into the "all books" table.
#[derive(Default)]
struct ListScreen {
    books: Vec<Book>,
    selected: usize,
}

/// Search inputs plus the last result set. `results` stays `None` until a
/// non-empty term has been queried.
#[derive(Default)]
struct SearchScreen {
    form: SearchForm,
    results: Option<Vec<Book>>,
    selected: usize,
}

/// Central application state shared across the TUI.
pub struct App {
    store: BookStore,
    menu_selected: usize,
    focus: Focus,
    add_form: BookForm,
    remove_form: TitleForm,
    list: ListScreen,
    search: SearchScreen,
    stats: Option<Statistics>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(store: BookStore) -> Self {
        Self {
            store,
            menu_selected: 0,
            focus: Focus::Menu,
            add_form: BookForm::default(),
            remove_form: TitleForm::default(),
            list: ListScreen::default(),
            search: SearchScreen::default(),
            stats: None,
            status: None,
        }
    }

    fn screen(&self) -> Screen {
        Screen::MENU[self.menu_selected]
    }

    /// Process one key press. Returns `true` once the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match self.focus {
            Focus::Menu => return Ok(self.handle_menu_key(code)),
            Focus::Content => {
                if code == KeyCode::Esc {
                    self.focus = Focus::Menu;
                    return Ok(false);
                }
            }
        }

        match self.screen() {
            Screen::Add => self.handle_add_key(code),
            Screen::Remove => self.handle_remove_key(code),
            Screen::List => self.handle_list_key(code),
            Screen::Search => self.handle_search_key(code),
            Screen::Statistics => {
                if matches!(code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.refresh_statistics();
                }
            }
        }
        Ok(false)
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                self.menu_selected = step_selection(self.menu_selected, -1, Screen::MENU.len());
            }
            KeyCode::Down => {
                self.menu_selected = step_selection(self.menu_selected, 1, Screen::MENU.len());
            }
            KeyCode::Char(ch) if ('1'..='5').contains(&ch) => {
                self.menu_selected = ch as usize - '1' as usize;
                self.enter_screen();
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right => self.enter_screen(),
            _ => {}
        }
        false
    }

    /// Move focus into the selected screen, loading whatever it displays.
    fn enter_screen(&mut self) {
        self.focus = Focus::Content;
        self.clear_status();
        match self.screen() {
            Screen::List => self.refresh_list(),
            Screen::Statistics => self.refresh_statistics(),
            Screen::Search => self.run_search(),
            Screen::Add | Screen::Remove => {}
        }
    }

    fn handle_add_key(&mut self, code: KeyCode) {
        let on_read_status = self.add_form.active == BookField::ReadStatus;
        match code {
            KeyCode::Tab | KeyCode::Down => self.add_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.add_form.focus_prev(),
            KeyCode::Left | KeyCode::Right if on_read_status => self.add_form.toggle_read(),
            KeyCode::Backspace => self.add_form.backspace(),
            KeyCode::Enter => self.save_new_book(),
            KeyCode::Char(ch) => {
                self.add_form.push_char(ch);
            }
            _ => {}
        }
    }

    fn save_new_book(&mut self) {
        let book = self.add_form.to_new_book();
        match self.store.add(&book).context("failed to add book") {
            Ok(_) => {
                self.add_form.clear();
                self.set_status(
                    format!("Book: '{}' successfully added", book.title),
                    StatusKind::Info,
                );
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn handle_remove_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Backspace => self.remove_form.backspace(),
            KeyCode::Enter => self.remove_by_title(),
            KeyCode::Char(ch) => {
                self.remove_form.push_char(ch);
            }
            _ => {}
        }
    }

    fn remove_by_title(&mut self) {
        let title = match self.remove_form.parse_title() {
            Ok(title) => title,
            Err(message) => {
                self.remove_form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                return;
            }
        };

        match self.store.remove(&title).context("failed to remove book") {
            Ok(0) => self.set_status(removal_message(&title, 0), StatusKind::Warning),
            Ok(deleted) => {
                self.remove_form = TitleForm::default();
                self.set_status(removal_message(&title, deleted), StatusKind::Info);
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        let len = self.list.books.len();
        match code {
            KeyCode::Up => self.list.selected = step_selection(self.list.selected, -1, len),
            KeyCode::Down => self.list.selected = step_selection(self.list.selected, 1, len),
            KeyCode::PageUp => {
                self.list.selected = step_selection(self.list.selected, -PAGE_STEP, len)
            }
            KeyCode::PageDown => {
                self.list.selected = step_selection(self.list.selected, PAGE_STEP, len)
            }
            KeyCode::Home => self.list.selected = 0,
            KeyCode::End => self.list.selected = len.saturating_sub(1),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_list(),
            KeyCode::Char('-') | KeyCode::Delete => self.remove_selected(),
            _ => {}
        }
    }

    /// Delete exactly the highlighted row, even when other books share its
    /// title.
    fn remove_selected(&mut self) {
        let Some(book) = self.list.books.get(self.list.selected).cloned() else {
            self.set_status("No book selected to remove.", StatusKind::Error);
            return;
        };

        match self.store.remove_by_id(book.id).context("failed to remove book") {
            Ok(true) => {
                self.refresh_list();
                self.set_status(
                    format!("Book: '{}' successfully deleted", book.title),
                    StatusKind::Info,
                );
            }
            Ok(false) => {
                self.refresh_list();
                self.set_status(
                    format!("Book: '{}' not found", book.title),
                    StatusKind::Warning,
                );
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let len = self.search.results.as_ref().map_or(0, Vec::len);
        match code {
            KeyCode::Tab | KeyCode::Right => {
                self.search.form.cycle_field(1);
                self.run_search();
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.search.form.cycle_field(-1);
                self.run_search();
            }
            KeyCode::Up => self.search.selected = step_selection(self.search.selected, -1, len),
            KeyCode::Down => self.search.selected = step_selection(self.search.selected, 1, len),
            KeyCode::Backspace => {
                if self.search.form.backspace() {
                    self.run_search();
                }
            }
            KeyCode::Char(ch) => {
                if self.search.form.push_char(ch) {
                    self.run_search();
                }
            }
            _ => {}
        }
    }

    /// Re-query with the current field and term. An empty term clears the
    /// results instead of matching everything.
    fn run_search(&mut self) {
        let Some(term) = self.search.form.active_term().map(str::to_string) else {
            self.search.results = None;
            self.search.selected = 0;
            return;
        };

        match self
            .store
            .search(self.search.form.field, &term)
            .context("failed to search books")
        {
            Ok(books) => {
                self.search.selected = clamp_selection(self.search.selected, books.len());
                self.search.results = Some(books);
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn refresh_list(&mut self) {
        match self.store.list_all().context("failed to load books") {
            Ok(books) => {
                self.list.selected = clamp_selection(self.list.selected, books.len());
                self.list.books = books;
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn refresh_statistics(&mut self) {
        match self.store.statistics().context("failed to compute statistics") {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => self.report_error(&err),
        }
    }

    fn report_error(&mut self, err: &anyhow::Error) {
        tracing::warn!("{err:#}");
        self.set_status(surface_error(err), StatusKind::Error);
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

        let (main_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(main_area);

        self.draw_sidebar(frame, columns[0]);

        let content = columns[1];
        match self.screen() {
            Screen::Add => self.draw_add_form(frame, content),
            Screen::Remove => self.draw_remove_form(frame, content),
            Screen::List => self.draw_list(frame, content),
            Screen::Search => self.draw_search(frame, content),
            Screen::Statistics => self.draw_statistics(frame, content),
        }

        if area.height > footer_height {
            self.draw_footer(frame, footer_area);
        }
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Screen::MENU
            .iter()
            .enumerate()
            .map(|(idx, screen)| ListItem::new(format!("{} {}", idx + 1, screen.title())))
            .collect();

        let border_style = if self.focus == Focus::Menu {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Navigation")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.menu_selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn content_block(&self, title: &str) -> Block<'static> {
        let border_style = if self.focus == Focus::Content {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style)
    }

    fn draw_add_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Content;
        let block = self.content_block(Screen::Add.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = [
            BookField::Title,
            BookField::Author,
            BookField::Year,
            BookField::Genre,
            BookField::ReadStatus,
        ]
        .into_iter()
        .map(|field| self.add_form.build_line(field, focused))
        .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter to save • Tab to switch field • Space toggles Read Status",
            Style::default().fg(Color::Gray),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        if focused {
            if let Some(column) = self.add_form.cursor_column() {
                frame.set_cursor_position((inner.x + column, inner.y + self.add_form.active.row()));
            }
        }
    }

    fn draw_remove_form(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Content;
        let block = self.content_block(Screen::Remove.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![self.remove_form.build_line(focused), Line::from("")];
        if let Some(error) = &self.remove_form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to remove every book with exactly this title",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        if focused {
            frame.set_cursor_position((inner.x + self.remove_form.cursor_column(), inner.y));
        }
    }

    fn draw_list(&self, frame: &mut Frame, area: Rect) {
        let title = Screen::List.title();
        if self.list.books.is_empty() {
            render_placeholder(frame, area, title, "No books available.");
            return;
        }
        let selected = (self.focus == Focus::Content).then_some(self.list.selected);
        render_book_table(frame, area, title, &self.list.books, selected);
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Content;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(area);

        let block = self.content_block(Screen::Search.title());
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        frame.render_widget(Paragraph::new(self.search.form.build_lines(focused)), inner);
        if focused {
            frame.set_cursor_position((inner.x + self.search.form.cursor_column(), inner.y + 1));
        }

        match &self.search.results {
            None => render_placeholder(frame, chunks[1], "Results", "Type a term to search."),
            Some(books) if books.is_empty() => {
                render_placeholder(frame, chunks[1], "Results", "No matching books found.")
            }
            Some(books) => {
                let selected = focused.then_some(self.search.selected);
                render_book_table(frame, chunks[1], "Results", books, selected);
            }
        }
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect) {
        let block = self.content_block(Screen::Statistics.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(stats) = &self.stats else {
            let hint = Paragraph::new("Press r to load statistics.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(hint, inner);
            return;
        };

        let metrics = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let metric = |label: &str, value: String| {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    label.to_string(),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    value,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
        };

        frame.render_widget(metric("Total Books", stats.total.to_string()), metrics[0]);
        frame.render_widget(
            metric("Read Books Percentage", stats.read_percentage_label()),
            metrics[1],
        );
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
        let hints: &[(&str, &str)] = match (self.focus, self.screen()) {
            (Focus::Menu, _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[1-5]", " Jump   "),
                ("[q]", " Quit"),
            ],
            (Focus::Content, Screen::Add) => &[
                ("[Tab]", " Next Field   "),
                ("[Space/←→]", " Toggle Read   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Back"),
            ],
            (Focus::Content, Screen::Remove) => &[("[Enter]", " Remove   "), ("[Esc]", " Back")],
            (Focus::Content, Screen::List) => &[
                ("[↑↓]", " Navigate   "),
                ("[-]", " Remove Selected   "),
                ("[r]", " Reload   "),
                ("[Esc]", " Back"),
            ],
            (Focus::Content, Screen::Search) => &[
                ("[Tab]", " Search By   "),
                ("[↑↓]", " Navigate   "),
                ("[Esc]", " Back"),
            ],
            (Focus::Content, Screen::Statistics) => &[("[r]", " Reload   "), ("[Esc]", " Back")],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;
    use tempfile::{tempdir, TempDir};

    fn app() -> (TempDir, App) {
        let dir = tempdir().unwrap();
        let store = BookStore::new(dir.path().join("books.sqlite"));
        store.initialize().unwrap();
        (dir, App::new(store))
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn open(app: &mut App, screen: Screen) {
        app.focus = Focus::Menu;
        let idx = Screen::MENU.iter().position(|s| *s == screen).unwrap();
        app.menu_selected = idx;
        app.handle_key(KeyCode::Enter).unwrap();
    }

    fn status(app: &App) -> Option<(&str, StatusKind)> {
        app.status.as_ref().map(|s| (s.text.as_str(), s.kind))
    }

    #[test]
    fn q_quits_from_menu_but_types_in_forms() {
        let (_dir, mut app) = app();
        open(&mut app, Screen::Add);
        assert!(!app.handle_key(KeyCode::Char('q')).unwrap());
        assert_eq!(app.add_form.title, "q");

        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn esc_from_a_form_never_quits() {
        let (_dir, mut app) = app();
        open(&mut app, Screen::Add);

        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert_eq!(app.focus, Focus::Menu);
        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert_eq!(app.focus, Focus::Menu);
    }

    #[test]
    fn statistics_hint_names_the_reload_key() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let dir = tempdir().unwrap();
        let mut app = App::new(BookStore::new(dir.path().join("never-initialized.sqlite")));
        open(&mut app, Screen::Statistics);
        assert!(app.stats.is_none());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Press r to load statistics."));
    }

    #[test]
    fn add_form_saves_and_clears() {
        let (_dir, mut app) = app();
        open(&mut app, Screen::Add);
        type_text(&mut app, "Dune");
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(&mut app, "Frank Herbert");
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(&mut app, "1965");
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(&mut app, "Sci-Fi");
        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Char(' ')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(
            status(&app),
            Some(("Book: 'Dune' successfully added", StatusKind::Info))
        );
        assert!(app.add_form.title.is_empty());

        let books = app.store.list_all().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].author, "Frank Herbert");
        assert_eq!(books[0].publication_year, "1965");
        assert!(books[0].read);
    }

    #[test]
    fn remove_reports_missing_title_as_warning() {
        let (_dir, mut app) = app();
        open(&mut app, Screen::Remove);
        type_text(&mut app, "Ghost");
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(
            status(&app),
            Some(("Book: 'Ghost' not found", StatusKind::Warning))
        );
    }

    #[test]
    fn remove_with_blank_title_never_hits_the_store() {
        let (_dir, mut app) = app();
        app.store.add(&NewBook::default()).unwrap();
        open(&mut app, Screen::Remove);
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(matches!(status(&app), Some((_, StatusKind::Error))));
        assert_eq!(app.store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn remove_deletes_matching_title() {
        let (_dir, mut app) = app();
        app.store
            .add(&NewBook::new("Emma", "Jane Austen", "1815", "Fiction", false))
            .unwrap();
        open(&mut app, Screen::Remove);
        type_text(&mut app, "Emma");
        app.handle_key(KeyCode::Enter).unwrap();

        assert_eq!(
            status(&app),
            Some(("Book: 'Emma' successfully deleted", StatusKind::Info))
        );
        assert!(app.store.list_all().unwrap().is_empty());
    }

    #[test]
    fn list_screen_loads_and_removes_selected_row() {
        let (_dir, mut app) = app();
        let first = app
            .store
            .add(&NewBook::new("Twin", "A", "2000", "Drama", false))
            .unwrap();
        let second = app
            .store
            .add(&NewBook::new("Twin", "B", "2000", "Drama", false))
            .unwrap();

        open(&mut app, Screen::List);
        assert_eq!(app.list.books.len(), 2);

        app.handle_key(KeyCode::Down).unwrap();
        app.handle_key(KeyCode::Char('-')).unwrap();

        let remaining = app.store.list_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, first);
        assert_ne!(remaining[0].id, second);
        assert_eq!(app.list.selected, 0);
    }

    #[test]
    fn search_updates_as_you_type() {
        let (_dir, mut app) = app();
        app.store
            .add(&NewBook::new("Dune", "Frank Herbert", "1965", "Sci-Fi", false))
            .unwrap();
        app.store
            .add(&NewBook::new("Emma", "Jane Austen", "1815", "Fiction", true))
            .unwrap();

        open(&mut app, Screen::Search);
        assert!(app.search.results.is_none());

        app.handle_key(KeyCode::Tab).unwrap();
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(&mut app, "Fi");
        assert_eq!(app.search.results.as_ref().map(Vec::len), Some(2));

        type_text(&mut app, "c");
        assert_eq!(app.search.results.as_ref().map(Vec::len), Some(1));

        for _ in 0..3 {
            app.handle_key(KeyCode::Backspace).unwrap();
        }
        assert!(app.search.results.is_none());
    }

    #[test]
    fn statistics_refresh_on_entry() {
        let (_dir, mut app) = app();
        open(&mut app, Screen::Statistics);
        assert_eq!(app.stats.map(|s| s.total), Some(0));

        app.store
            .add(&NewBook::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true))
            .unwrap();
        app.handle_key(KeyCode::Char('r')).unwrap();

        let stats = app.stats.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.read_percentage_label(), "100.0%");
    }

    #[test]
    fn store_failures_land_in_the_footer() {
        let dir = tempdir().unwrap();
        let mut app = App::new(BookStore::new(dir.path().join("never-initialized.sqlite")));

        open(&mut app, Screen::List);

        assert!(matches!(status(&app), Some((_, StatusKind::Error))));
    }

    #[test]
    fn draw_renders_every_screen() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let (_dir, mut app) = app();
        app.store
            .add(&NewBook::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true))
            .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        for screen in Screen::MENU {
            open(&mut app, screen);
            terminal.draw(|frame| app.draw(frame)).unwrap();
        }

        let buffer = terminal.backend().buffer().clone();
        let rendered: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(rendered.contains("Read Books Percentage"));
        assert!(rendered.contains("100.0%"));
    }
}
