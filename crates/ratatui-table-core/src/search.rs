use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchAction {
    None,
    /// The text changed; the caller should re-derive rows.
    Changed,
    /// Enter was pressed.
    Submitted,
    /// Esc, Tab or Down was pressed; focus should move back to the grid.
    Leave,
}

#[derive(Clone, Debug)]
pub struct SearchInputOptions {
    pub placeholder: String,
    pub style: Style,
    pub placeholder_style: Style,
}

impl Default for SearchInputOptions {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            placeholder: "Search...".to_string(),
            style: Style::default(),
            placeholder_style: Style::default().dark_gray(),
        }
    }
}

/// Single-line text input that holds the search term.
#[derive(Clone, Debug, Default)]
pub struct SearchInput {
    text: String,
    cursor: usize, // char index
    scroll_x: u32,
    options: SearchInputOptions,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SearchInputOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn set_options(&mut self, options: SearchInputOptions) {
        self.options = options;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the text and puts the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = strip_newlines(&text.into());
        self.cursor = self.text.chars().count();
        self.scroll_x = 0;
    }

    pub fn input(&mut self, event: InputEvent) -> SearchAction {
        match event {
            InputEvent::Paste(s) => {
                let s = strip_newlines(&s);
                if s.is_empty() {
                    return SearchAction::None;
                }
                for ch in s.chars() {
                    self.insert_char(ch);
                }
                SearchAction::Changed
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => SearchAction::None,
        }
    }

    /// Renders the text (or placeholder) on the first line of `area`.
    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let line = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(line, self.options.style);
        if self.text.is_empty() {
            self.scroll_x = 0;
            render::render_str_clipped(
                line.x,
                line.y,
                0,
                line.width,
                buf,
                &self.options.placeholder,
                self.options.placeholder_style,
            );
            return;
        }
        self.ensure_cursor_visible(line.width);
        render::render_str_clipped(
            line.x,
            line.y,
            self.scroll_x,
            line.width,
            buf,
            &self.text,
            self.options.style,
        );
    }

    /// Terminal position of the caret inside `area`, if visible.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let x = self.cursor_display_x().checked_sub(self.scroll_x)?;
        if x >= area.width as u32 {
            return None;
        }
        Some((area.x + x as u16, area.y))
    }

    fn handle_key(&mut self, key: KeyEvent) -> SearchAction {
        if key.modifiers.ctrl && !key.modifiers.alt {
            return match key.code {
                KeyCode::Char('u') if !self.text.is_empty() => {
                    self.set_text("");
                    SearchAction::Changed
                }
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    SearchAction::None
                }
                KeyCode::Char('e') => {
                    self.cursor = self.char_len();
                    SearchAction::None
                }
                _ => SearchAction::None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.alt {
                    return SearchAction::None;
                }
                self.insert_char(c);
                SearchAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return SearchAction::None;
                }
                self.cursor -= 1;
                self.remove_at_cursor();
                SearchAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return SearchAction::None;
                }
                self.remove_at_cursor();
                SearchAction::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                SearchAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                SearchAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                SearchAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                SearchAction::None
            }
            KeyCode::Enter => SearchAction::Submitted,
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => SearchAction::Leave,
            KeyCode::Up | KeyCode::PageUp | KeyCode::PageDown => SearchAction::None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    fn remove_at_cursor(&mut self) {
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn cursor_display_x(&self) -> u32 {
        self.text
            .chars()
            .take(self.cursor)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as u32)
            .sum()
    }

    fn ensure_cursor_visible(&mut self, width: u16) {
        let cx = self.cursor_display_x();
        let width = width as u32;
        if cx < self.scroll_x {
            self.scroll_x = cx;
        } else if width > 0 && cx >= self.scroll_x + width {
            self.scroll_x = cx + 1 - width;
        }
    }
}

fn strip_newlines(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}
