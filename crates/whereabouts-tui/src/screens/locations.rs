//! Locations screen — the flattened location table with free-text search
//! and per-column sort cycling.
//!
//! The dataset is immutable once loaded. Every change to the view state
//! (search text, sort activation) re-derives the displayed row sequence
//! from the full dataset, so the view always reflects the latest input.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use tokio::sync::mpsc::UnboundedSender;

use whereabouts_core::{Dataset, SortDirection, ViewState, derive_view};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct LocationsScreen {
    action_tx: Option<UnboundedSender<Action>>,
    dataset: Option<Arc<Dataset>>,
    view_state: ViewState,
    /// Derived row indices into the dataset's table.
    view: Vec<usize>,
    /// Keyboard column cursor for sort activation.
    cursor_column: usize,
    table_state: TableState,
    loading: bool,
    fetch_error: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
    /// Table area from the last render. The header sits on its first
    /// line; mouse clicks map through this rect.
    table_area: Rect,
}

impl LocationsScreen {
    pub fn new() -> Self {
        Self {
            action_tx: None,
            dataset: None,
            view_state: ViewState::default(),
            view: Vec::new(),
            cursor_column: 0,
            table_state: TableState::default(),
            loading: true,
            fetch_error: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            table_area: Rect::default(),
        }
    }

    fn column_count(&self) -> usize {
        self.dataset
            .as_ref()
            .map_or(0, |d| d.table.columns().len())
    }

    /// Re-derive the view and keep the selection in range.
    fn recompute_view(&mut self) {
        self.view = match self.dataset.as_ref() {
            Some(dataset) => derive_view(&dataset.table, &self.view_state),
            None => Vec::new(),
        };

        let len = self.view.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some(selected.min(len - 1)));
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.view.len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(idx.min(len - 1)));
        }
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.view.len();
        if len == 0 {
            return;
        }
        let current = self.selected_index() as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::as_conversions)]
    fn move_cursor_column(&mut self, delta: isize) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        let current = self.cursor_column as isize;
        self.cursor_column = (current + delta).clamp(0, count as isize - 1) as usize;
    }

    /// Advance one column's sort state and re-derive.
    fn sort_by(&mut self, column: usize) {
        if column >= self.column_count() {
            return;
        }
        self.view_state.sort.activate(column);
        self.cursor_column = column;
        self.recompute_view();
    }

    /// Map a click x-coordinate to a column index.
    ///
    /// Columns share the table width evenly (all `Fill(1)`), so the
    /// mapping is proportional.
    #[allow(clippy::as_conversions)]
    fn column_at(&self, x: u16) -> Option<usize> {
        let count = self.column_count();
        let width = self.table_area.width;
        if count == 0 || width == 0 {
            return None;
        }
        if x < self.table_area.x || x >= self.table_area.x + width {
            return None;
        }
        let rel = (x - self.table_area.x) as usize;
        Some((rel * count / width as usize).min(count - 1))
    }

    fn header_row(&self) -> Row<'static> {
        let Some(dataset) = self.dataset.as_ref() else {
            return Row::new(Vec::<Cell>::new());
        };

        let cells: Vec<Cell<'static>> = dataset
            .table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let direction = self.view_state.sort.direction(i);
                let label = if direction == SortDirection::Unsorted {
                    name.clone()
                } else {
                    format!("{name} {}", direction.indicator())
                };

                let is_active = self
                    .view_state
                    .sort
                    .active()
                    .is_some_and(|(col, _)| col == i);
                let style = if i == self.cursor_column {
                    theme::table_header_cursor()
                } else if is_active {
                    theme::table_header_active()
                } else {
                    theme::table_header()
                };
                Cell::from(label).style(style)
            })
            .collect();

        Row::new(cells)
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(ref err) = self.fetch_error {
            return Line::from(Span::styled(
                format!(" fetch failed — showing empty table ({err})"),
                theme::status_error(),
            ));
        }
        if self.loading {
            return Line::from(Span::styled(" fetching…", theme::status_dim()));
        }
        if self.view.is_empty() {
            return Line::from(Span::styled(" no rows to show", theme::status_dim()));
        }

        let column = self
            .dataset
            .as_ref()
            .and_then(|d| d.table.columns().get(self.cursor_column).cloned())
            .unwrap_or_default();
        Line::from(Span::styled(
            format!(
                " row {}/{} · column {column}",
                self.selected_index() + 1,
                self.view.len()
            ),
            theme::status_dim(),
        ))
    }
}

impl Component for LocationsScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_selection(1);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_selection(-1);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                self.select(0);
                Ok(None)
            }
            (_, KeyCode::Char('G')) => {
                let len = self.view.len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                self.move_selection(10);
                Ok(None)
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.move_selection(-10);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => {
                self.move_cursor_column(-1);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => {
                self.move_cursor_column(1);
                Ok(None)
            }
            (KeyModifiers::NONE, KeyCode::Char('s') | KeyCode::Enter) => {
                if self.column_count() == 0 {
                    Ok(None)
                } else {
                    Ok(Some(Action::SortColumn(self.cursor_column)))
                }
            }
            _ => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Header cells are clickable: the header occupies the
                // table area's first line.
                if mouse.row == self.table_area.y {
                    if let Some(column) = self.column_at(mouse.column) {
                        return Ok(Some(Action::SortColumn(column)));
                    }
                }
                Ok(None)
            }
            MouseEventKind::ScrollDown => {
                self.move_selection(1);
                Ok(None)
            }
            MouseEventKind::ScrollUp => {
                self.move_selection(-1);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DatasetLoaded(dataset) => {
                self.loading = false;
                self.fetch_error = None;
                self.view_state = ViewState::new(dataset.table.columns().len());
                self.cursor_column = 0;
                self.dataset = Some(Arc::clone(dataset));
                self.recompute_view();
                self.select(0);
            }
            Action::FetchFailed(message) => {
                self.loading = false;
                self.fetch_error = Some(message.clone());
            }
            Action::SearchInput(query) => {
                // Always filter with the value just typed — the view is
                // derived from this state, nothing else.
                self.view_state.search.clone_from(query);
                self.recompute_view();
                self.select(0);
            }
            Action::CloseSearch => {
                self.view_state.search.clear();
                self.recompute_view();
            }
            Action::SortColumn(column) => {
                self.sort_by(*column);
            }
            Action::Tick => {
                if self.loading {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let dataset = self.dataset.clone();
        let (shown, total) = (
            self.view.len(),
            dataset.as_ref().map_or(0, |d| d.table.len()),
        );

        let title = match dataset.as_ref() {
            Some(d) if self.view_state.search.is_empty() => {
                format!(" Locations ({shown}/{total}) · seed {} ", d.info.seed)
            }
            Some(d) => format!(
                " Locations ({shown}/{total}) [\"{}\"] · seed {} ",
                self.view_state.search, d.info.seed
            ),
            None => " Locations ".to_owned(),
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        self.table_area = layout[0];

        if self.loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("Fetching users…")
                .style(theme::status_dim())
                .throbber_style(Style::default().fg(theme::LILAC));
            frame.render_stateful_widget(throbber, layout[0], &mut self.throbber_state);
            frame.render_widget(Paragraph::new(self.status_line()), layout[1]);
            return;
        }

        if let Some(dataset) = dataset {
            let columns = dataset.table.columns();

            let rows: Vec<Row> = self
                .view
                .iter()
                .map(|&row_idx| {
                    let cells: Vec<Cell> = columns
                        .iter()
                        .map(|column| {
                            // Cells a row lacks render blank.
                            let text = dataset
                                .table
                                .value(row_idx, column)
                                .map(ToString::to_string)
                                .unwrap_or_default();
                            Cell::from(text)
                        })
                        .collect();
                    Row::new(cells).style(theme::table_row())
                })
                .collect();

            let widths: Vec<Constraint> =
                columns.iter().map(|_| Constraint::Fill(1)).collect();

            let table = Table::new(rows, widths)
                .header(self.header_row())
                .column_spacing(1)
                .row_highlight_style(theme::table_selected());

            frame.render_stateful_widget(table, layout[0], &mut self.table_state);
        }

        frame.render_widget(Paragraph::new(self.status_line()), layout[1]);
    }

    fn id(&self) -> &'static str {
        "Locations"
    }
}
