use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named set of keys, used both for matching and for help text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

/// Exact match on code and modifiers.
///
/// Shift is ignored for `Char` patterns since terminals report `G` as `Shift+G` inconsistently.
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    let (p, e) = (pattern.modifiers, event.modifiers);
    let shift_ok = matches!(pattern.code, KeyCode::Char(_)) || p.shift == e.shift;
    shift_ok && p.ctrl == e.ctrl && p.alt == e.alt
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::CTRL)
}

/// Grid-focus actions of [`TableView`](crate::view::TableView).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableCommand {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleSort,
    FocusSearch,
    Activate,
}

/// Key bindings used while the grid (not the search input) has focus.
#[derive(Clone, Debug)]
pub struct TableBindings {
    pub up: Binding,
    pub down: Binding,
    pub left: Binding,
    pub right: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub top: Binding,
    pub bottom: Binding,
    pub toggle_sort: Binding,
    pub focus_search: Binding,
    pub activate: Binding,
}

impl Default for TableBindings {
    fn default() -> Self {
        Self {
            up: Binding::new("↑/k", "up", vec![KeyCode::Up.into(), key_char('k')]),
            down: Binding::new("↓/j", "down", vec![KeyCode::Down.into(), key_char('j')]),
            left: Binding::new("←/h", "prev column", vec![KeyCode::Left.into(), key_char('h')]),
            right: Binding::new(
                "→/l",
                "next column",
                vec![KeyCode::Right.into(), key_char('l')],
            ),
            page_up: Binding::new("pgup", "page up", vec![KeyCode::PageUp.into(), key_ctrl('u')]),
            page_down: Binding::new(
                "pgdn",
                "page down",
                vec![KeyCode::PageDown.into(), key_ctrl('d')],
            ),
            top: Binding::new("g", "top", vec![KeyCode::Home.into(), key_char('g')]),
            bottom: Binding::new("G", "bottom", vec![KeyCode::End.into(), key_char('G')]),
            toggle_sort: Binding::new("s", "sort", vec![key_char('s')]),
            focus_search: Binding::new(
                "/",
                "search",
                vec![key_char('/'), KeyCode::Tab.into(), KeyCode::BackTab.into()],
            ),
            activate: Binding::new("enter", "open", vec![KeyCode::Enter.into()]),
        }
    }
}

impl TableBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        let table = [
            (&self.up, TableCommand::Up),
            (&self.down, TableCommand::Down),
            (&self.left, TableCommand::Left),
            (&self.right, TableCommand::Right),
            (&self.page_up, TableCommand::PageUp),
            (&self.page_down, TableCommand::PageDown),
            (&self.top, TableCommand::Top),
            (&self.bottom, TableCommand::Bottom),
            (&self.toggle_sort, TableCommand::ToggleSort),
            (&self.focus_search, TableCommand::FocusSearch),
            (&self.activate, TableCommand::Activate),
        ];
        table
            .into_iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, cmd)| cmd)
    }

    /// Bindings in the order a help bar should list them.
    pub fn help(&self) -> Vec<&Binding> {
        vec![
            &self.down,
            &self.up,
            &self.right,
            &self.toggle_sort,
            &self.focus_search,
            &self.activate,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("q", "quit", vec![key_char('q')]);
        assert!(b.matches(&key_char('q')));
        assert!(!b.matches(&key_ctrl('q')));
    }

    #[test]
    fn shifted_char_matches_plain_pattern() {
        let shifted = key_char('G').with_modifiers(KeyModifiers {
            shift: true,
            ..KeyModifiers::NONE
        });
        assert_eq!(
            TableBindings::default().action_for(&shifted),
            Some(TableCommand::Bottom)
        );
    }

    #[test]
    fn ctrl_d_pages_down() {
        assert_eq!(
            TableBindings::default().action_for(&key_ctrl('d')),
            Some(TableCommand::PageDown)
        );
        assert_eq!(TableBindings::default().action_for(&key_char('d')), None);
    }
}
