use crate::column::Column;
use crate::input::InputEvent;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap::TableBindings;
use crate::keymap::TableCommand;
use crate::pipeline;
use crate::pipeline::SortDirection;
use crate::pipeline::SortState;
use crate::pipeline::ViewState;
use crate::record::Record;
use crate::record::RecordId;
use crate::render;
use crate::search::SearchAction;
use crate::search::SearchInput;
use crate::search::SearchInputOptions;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

/// What a call to [`TableView::handle_event`] did.
///
/// Purely informational: the search and sort state stay inside the view. Apps typically redraw
/// on anything other than `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    SearchChanged,
    SortChanged(SortState),
    Activated(RecordId),
}

/// Which part of the table receives key input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Grid,
    Search,
}

/// Options for [`TableView`].
#[derive(Clone, Debug)]
pub struct TableViewOptions {
    pub show_search: bool,
    pub search_prompt: String,
    pub search: SearchInputOptions,
    pub show_scrollbar: bool,
    pub col_gap: u16,
    pub ascending_indicator: String,
    pub descending_indicator: String,
    pub empty_message: String,
    pub wheel_step: u16,
    pub style: Style,
    pub scrollbar_style: Style,
    pub bindings: TableBindings,
}

impl Default for TableViewOptions {
    fn default() -> Self {
        Self {
            show_search: true,
            search_prompt: "/ ".to_string(),
            search: SearchInputOptions::default(),
            show_scrollbar: true,
            col_gap: 1,
            ascending_indicator: " ▲".to_string(),
            descending_indicator: " ▼".to_string(),
            empty_message: "No matching rows".to_string(),
            wheel_step: 3,
            style: Style::default(),
            scrollbar_style: Style::default(),
            bindings: TableBindings::default(),
        }
    }
}

/// Screen regions of a table rendered into some `area`.
#[derive(Clone, Copy, Debug)]
struct TableLayout {
    search: Option<Rect>,
    header: Rect,
    body: Rect,
    scrollbar: Option<Rect>,
}

/// A searchable, sortable table over an in-memory record set.
///
/// Rows are derived by sorting the records on the active sort key (if any) and then keeping
/// those where any column's text contains the search term, case-insensitively. Derivation runs
/// again after every change to the records, the columns, the search term or the sort.
///
/// Like the other views in this crate it is event-loop agnostic: feed it events with
/// [`handle_event_in_area`](Self::handle_event_in_area) and draw it with
/// [`render_ref`](Self::render_ref).
#[derive(Debug, Default)]
pub struct TableView {
    /// Body scroll position, in rows and columns of content.
    pub state: ViewportState,
    options: TableViewOptions,
    records: Vec<Record>,
    columns: Vec<Column>,
    widths: Vec<u16>,
    view: ViewState,
    search: SearchInput,
    focus: Focus,
    rows: Vec<usize>,
    cursor: Option<usize>,
    col_cursor: usize,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TableViewOptions) -> Self {
        let mut v = Self::default();
        v.set_options(options);
        v
    }

    pub fn options(&self) -> &TableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableViewOptions) {
        self.search.set_options(options.search.clone());
        self.options = options;
        if !self.options.show_search {
            self.focus = Focus::Grid;
        }
        self.recompute_widths();
        self.sync_content_size();
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        let selected = self.selected_id();
        self.records = records;
        self.recompute_widths();
        self.rederive_from(selected);
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        let selected = self.selected_id();
        self.columns = columns;
        self.col_cursor = self.col_cursor.min(self.columns.len().saturating_sub(1));
        self.recompute_widths();
        self.rederive_from(selected);
    }

    pub fn set_data(&mut self, records: Vec<Record>, columns: Vec<Column>) {
        let selected = self.selected_id();
        self.records = records;
        self.columns = columns;
        self.col_cursor = self.col_cursor.min(self.columns.len().saturating_sub(1));
        self.recompute_widths();
        self.rederive_from(selected);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn search_term(&self) -> &str {
        &self.view.search_term
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.view.sort.as_ref()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = if self.options.show_search {
            focus
        } else {
            Focus::Grid
        };
    }

    /// Indices into [`records`](Self::records) in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|&i| &self.records[i])
    }

    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible_records().map(|r| r.id().clone()).collect()
    }

    /// Cursor position within the visible rows.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn column_cursor(&self) -> usize {
        self.col_cursor
    }

    pub fn selected_record(&self) -> Option<&Record> {
        let row = self.cursor?;
        self.rows.get(row).and_then(|&i| self.records.get(i))
    }

    fn selected_id(&self) -> Option<RecordId> {
        self.selected_record().map(|r| r.id().clone())
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.set_text(term);
        self.apply_search_text();
    }

    /// Header-click interaction for the column with `key`.
    pub fn toggle_sort(&mut self, key: &str) -> &SortState {
        let sort = self.view.toggle_sort(key).clone();
        log::debug!("sort by {:?} {:?}", sort.key, sort.direction);
        self.rederive();
        self.view.sort.get_or_insert(sort)
    }

    /// Handles an event that carries no position information. Mouse events are ignored; use
    /// [`handle_event_in_area`](Self::handle_event_in_area) for those.
    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(s) => self.handle_paste(s),
            InputEvent::Mouse(_) => TableAction::None,
        }
    }

    /// Handles an event for a table rendered into `area`.
    pub fn handle_event_in_area(&mut self, area: Rect, event: InputEvent) -> TableAction {
        match event {
            InputEvent::Mouse(m) => self.handle_mouse(area, m),
            other => self.handle_event(other),
        }
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let layout = self.layout(area);
        self.state.set_viewport(layout.body.width, layout.body.height);
        self.sync_content_size();

        let base_style = theme.text_primary.patch(self.options.style);
        buf.set_style(area, base_style);

        if let Some(search_area) = layout.search {
            self.render_search(search_area, buf, theme);
        }
        self.render_header(layout.header, buf, theme);
        self.render_body(layout.body, buf, theme, base_style);

        if let Some(sb) = layout.scrollbar {
            render::render_scrollbar(sb, buf, &self.state, self.options.scrollbar_style);
        }
    }

    /// Where the terminal caret should go, if the search input is focused.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if self.focus != Focus::Search {
            return None;
        }
        let search_area = self.layout(area).search?;
        self.search.cursor_pos(self.search_input_area(search_area))
    }

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        if self.focus == Focus::Search {
            let caret = self.search.cursor();
            return match self.search.input(InputEvent::Key(key)) {
                SearchAction::Changed => self.apply_search_text(),
                SearchAction::Submitted | SearchAction::Leave => {
                    self.focus = Focus::Grid;
                    TableAction::Redraw
                }
                SearchAction::None if self.search.cursor() != caret => TableAction::Redraw,
                SearchAction::None => TableAction::None,
            };
        }

        let Some(cmd) = self.options.bindings.action_for(&key) else {
            return TableAction::None;
        };
        match cmd {
            TableCommand::FocusSearch => {
                if !self.options.show_search {
                    return TableAction::None;
                }
                self.focus = Focus::Search;
                TableAction::Redraw
            }
            TableCommand::ToggleSort => {
                let Some(key) = self.columns.get(self.col_cursor).map(|c| c.key.clone()) else {
                    return TableAction::None;
                };
                TableAction::SortChanged(self.toggle_sort(&key).clone())
            }
            TableCommand::Activate => self
                .selected_record()
                .map(|r| TableAction::Activated(r.id().clone()))
                .unwrap_or(TableAction::None),
            TableCommand::Left => self.move_column_by(-1),
            TableCommand::Right => self.move_column_by(1),
            TableCommand::Up => self.move_cursor_by(-1),
            TableCommand::Down => self.move_cursor_by(1),
            TableCommand::PageUp => self.move_cursor_by(-self.page_step()),
            TableCommand::PageDown => self.move_cursor_by(self.page_step()),
            TableCommand::Top => self.move_cursor_to(0),
            TableCommand::Bottom => self.move_cursor_to(self.rows.len().saturating_sub(1)),
        }
    }

    fn handle_paste(&mut self, text: String) -> TableAction {
        if !self.options.show_search {
            return TableAction::None;
        }
        self.focus = Focus::Search;
        match self.search.input(InputEvent::Paste(text)) {
            SearchAction::Changed => self.apply_search_text(),
            _ => TableAction::Redraw,
        }
    }

    fn handle_mouse(&mut self, area: Rect, m: MouseEvent) -> TableAction {
        let pos = Position::new(m.x, m.y);
        if !area.contains(pos) {
            return TableAction::None;
        }
        let layout = self.layout(area);
        match m.kind {
            MouseEventKind::ScrollUp => {
                self.state.scroll_y_by(-(self.options.wheel_step as i32));
                TableAction::Redraw
            }
            MouseEventKind::ScrollDown => {
                self.state.scroll_y_by(self.options.wheel_step as i32);
                TableAction::Redraw
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.search.is_some_and(|r| r.contains(pos)) {
                    self.focus = Focus::Search;
                    return TableAction::Redraw;
                }
                if layout.header.contains(pos) {
                    let Some(col) = self.column_at(m.x - layout.header.x) else {
                        return TableAction::None;
                    };
                    self.focus = Focus::Grid;
                    self.col_cursor = col;
                    let key = self.columns[col].key.clone();
                    return TableAction::SortChanged(self.toggle_sort(&key).clone());
                }
                if layout.body.contains(pos) {
                    let row = self.state.y as usize + (m.y - layout.body.y) as usize;
                    if row >= self.rows.len() {
                        return TableAction::None;
                    }
                    self.focus = Focus::Grid;
                    self.cursor = Some(row);
                    if let Some(col) = self.column_at(m.x - layout.body.x) {
                        self.col_cursor = col;
                    }
                    return TableAction::Redraw;
                }
                TableAction::None
            }
            MouseEventKind::Down(_) | MouseEventKind::Up(_) => TableAction::None,
        }
    }

    fn apply_search_text(&mut self) -> TableAction {
        if self.view.search_term == self.search.text() {
            return TableAction::Redraw;
        }
        self.view.search_term = self.search.text().to_string();
        self.rederive();
        TableAction::SearchChanged
    }

    /// Re-runs sort → filter and keeps the cursor on the same record when it is still visible.
    fn rederive(&mut self) {
        let selected = self.selected_id();
        self.rederive_from(selected);
    }

    fn rederive_from(&mut self, selected: Option<RecordId>) {
        self.rows = pipeline::derive_rows(&self.records, &self.columns, &self.view);
        self.cursor = if self.rows.is_empty() {
            None
        } else {
            let kept = selected.and_then(|id| {
                self.rows
                    .iter()
                    .position(|&i| self.records[i].id() == &id)
            });
            Some(kept.unwrap_or_else(|| self.cursor.unwrap_or(0).min(self.rows.len() - 1)))
        };
        self.sync_content_size();
        if let Some(row) = self.cursor {
            self.state.ensure_y_visible(row as u32);
        }
    }

    fn move_cursor_by(&mut self, delta: i32) -> TableAction {
        if self.rows.is_empty() {
            return TableAction::None;
        }
        let cur = self.cursor.unwrap_or(0) as i64;
        let next = (cur + delta as i64).clamp(0, self.rows.len() as i64 - 1) as usize;
        self.move_cursor_to(next)
    }

    fn move_cursor_to(&mut self, row: usize) -> TableAction {
        if self.rows.is_empty() {
            return TableAction::None;
        }
        let row = row.min(self.rows.len() - 1);
        if self.cursor == Some(row) {
            return TableAction::None;
        }
        self.cursor = Some(row);
        self.state.ensure_y_visible(row as u32);
        TableAction::Redraw
    }

    fn move_column_by(&mut self, delta: i32) -> TableAction {
        if self.columns.is_empty() {
            return TableAction::None;
        }
        let next = (self.col_cursor as i64 + delta as i64)
            .clamp(0, self.columns.len() as i64 - 1) as usize;
        if next == self.col_cursor {
            return TableAction::None;
        }
        self.col_cursor = next;
        let start = self.column_start(next);
        self.state.ensure_x_visible(start, self.widths[next] as u32);
        TableAction::Redraw
    }

    fn page_step(&self) -> i32 {
        self.state.viewport_h.saturating_sub(1).max(1) as i32
    }

    fn layout(&self, area: Rect) -> TableLayout {
        let mut y = area.y;
        let bottom = area.y + area.height;

        let search = if self.options.show_search && y < bottom {
            y += 1;
            Some(Rect::new(area.x, area.y, area.width, 1))
        } else {
            None
        };

        let (content_x, content_w, scrollbar_x) =
            if self.options.show_scrollbar && area.width >= 2 {
                (area.x, area.width - 1, Some(area.x + area.width - 1))
            } else {
                (area.x, area.width, None)
            };

        let header_h = u16::from(y < bottom);
        let header = Rect::new(content_x, y, content_w, header_h);
        y += header_h;

        let body = Rect::new(content_x, y, content_w, bottom - y);
        let scrollbar = scrollbar_x.map(|x| Rect::new(x, body.y, 1, body.height));

        TableLayout {
            search,
            header,
            body,
            scrollbar,
        }
    }

    fn search_input_area(&self, search_area: Rect) -> Rect {
        let prompt_w = (render::display_width(&self.options.search_prompt) as u16)
            .min(search_area.width);
        Rect::new(
            search_area.x + prompt_w,
            search_area.y,
            search_area.width - prompt_w,
            1,
        )
    }

    fn render_search(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let prompt_style = if self.focus == Focus::Search {
            theme.accent
        } else {
            theme.text_muted
        };
        render::render_str_clipped(
            area.x,
            area.y,
            0,
            area.width,
            buf,
            &self.options.search_prompt,
            prompt_style,
        );
        let input_area = self.search_input_area(area);
        self.search.render_ref(input_area, buf);
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, theme.header);
        for (i, column) in self.columns.iter().enumerate() {
            let text = match self.view.direction_for(&column.key) {
                Some(SortDirection::Ascending) => {
                    format!("{}{}", column.header, self.options.ascending_indicator)
                }
                Some(SortDirection::Descending) => {
                    format!("{}{}", column.header, self.options.descending_indicator)
                }
                None => column.header.clone(),
            };
            let style = if self.view.direction_for(&column.key).is_some() {
                theme.header.patch(theme.accent)
            } else {
                theme.header
            };
            self.render_cell_text(area, i, &text, style, buf);
        }
        self.render_separators(area, buf, theme.text_muted);
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer, theme: &Theme, base_style: Style) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.rows.is_empty() {
            render::render_str_clipped(
                area.x,
                area.y,
                0,
                area.width,
                buf,
                &self.options.empty_message,
                theme.text_muted,
            );
            return;
        }

        for dy in 0..area.height {
            let row = self.state.y as usize + dy as usize;
            let Some(&record_idx) = self.rows.get(row) else {
                break;
            };
            let record = &self.records[record_idx];
            let line = Rect::new(area.x, area.y + dy, area.width, 1);
            let is_cursor = self.cursor == Some(row);
            let row_style = if is_cursor {
                base_style.patch(theme.cursor_row)
            } else {
                base_style
            };
            buf.set_style(line, row_style);

            for (i, column) in self.columns.iter().enumerate() {
                let text = record
                    .get(&column.key)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let style = if is_cursor && i == self.col_cursor && self.focus == Focus::Grid {
                    base_style.patch(theme.cursor_cell)
                } else {
                    row_style
                };
                self.render_cell_text(line, i, &text, style, buf);
            }
            self.render_separators(line, buf, theme.text_muted);
        }
    }

    /// Draws `text` into column `col` of the one-line `line`, honoring the horizontal scroll.
    fn render_cell_text(&self, line: Rect, col: usize, text: &str, style: Style, buf: &mut Buffer) {
        let Some((dx, clip_left, w)) = self.visible_span(col, line.width) else {
            return;
        };
        buf.set_style(Rect::new(line.x + dx, line.y, w, 1), style);
        render::render_str_clipped(line.x + dx, line.y, clip_left, w, buf, text, style);
    }

    fn render_separators(&self, line: Rect, buf: &mut Buffer, style: Style) {
        if self.options.col_gap == 0 {
            return;
        }
        let scroll_x = self.state.x as i64;
        for i in 0..self.columns.len().saturating_sub(1) {
            let sep = (self.column_start(i) + self.widths[i] as u32) as i64 - scroll_x;
            if sep < 0 || sep >= line.width as i64 {
                continue;
            }
            buf.set_span(line.x + sep as u16, line.y, &Span::styled("│", style), 1);
        }
    }

    /// Returns `(dx, clip_left, visible_width)` for column `col` in a viewport `width` wide.
    fn visible_span(&self, col: usize, width: u16) -> Option<(u16, u32, u16)> {
        let start = self.column_start(col) as i64 - self.state.x as i64;
        let size = *self.widths.get(col)? as i64;
        let clip_left = (-start).max(0);
        let dx = start.max(0);
        if dx >= width as i64 || clip_left >= size {
            return None;
        }
        let visible = (size - clip_left).min(width as i64 - dx);
        Some((dx as u16, clip_left as u32, visible as u16))
    }

    /// Column under viewport-relative x, accounting for horizontal scroll.
    fn column_at(&self, rel_x: u16) -> Option<usize> {
        let x = self.state.x + rel_x as u32;
        (0..self.columns.len()).find(|&i| {
            let start = self.column_start(i);
            x >= start && x < start + self.widths[i] as u32
        })
    }

    fn column_start(&self, col: usize) -> u32 {
        self.widths[..col]
            .iter()
            .map(|&w| w as u32 + self.options.col_gap as u32)
            .sum()
    }

    fn content_width(&self) -> u32 {
        if self.widths.is_empty() {
            return 0;
        }
        let last = self.widths.len() - 1;
        self.column_start(last) + self.widths[last] as u32
    }

    fn sync_content_size(&mut self) {
        self.state
            .set_content(self.content_width(), self.rows.len() as u32);
    }

    /// Auto-width columns fit the header plus a sort indicator and every record's value.
    fn recompute_widths(&mut self) {
        let indicator_w = render::display_width(&self.options.ascending_indicator)
            .max(render::display_width(&self.options.descending_indicator));
        self.widths = self
            .columns
            .iter()
            .map(|column| {
                if let Some(w) = column.width {
                    return w.max(1);
                }
                let header_w = render::display_width(&column.header) + indicator_w;
                let cell_w = self
                    .records
                    .iter()
                    .filter_map(|r| r.get(&column.key))
                    .map(|v| render::display_width(&v.to_string()))
                    .max()
                    .unwrap_or(0);
                header_w.max(cell_w).clamp(1, u16::MAX as usize) as u16
            })
            .collect();
    }
}
