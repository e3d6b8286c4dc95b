use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_table_core::column::Column;
use ratatui_table_core::input::InputEvent;
use ratatui_table_core::input::KeyCode;
use ratatui_table_core::input::KeyEvent;
use ratatui_table_core::input::MouseEvent;
use ratatui_table_core::input::MouseEventKind;
use ratatui_table_core::pipeline::SortDirection;
use ratatui_table_core::record::Record;
use ratatui_table_core::record::RecordId;
use ratatui_table_core::record::records_from_json_str;
use ratatui_table_core::theme::Theme;
use ratatui_table_core::value::Value;
use ratatui_table_core::view::Focus;
use ratatui_table_core::view::TableAction;
use ratatui_table_core::view::TableView;

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 30,
    height: 6,
};
const HEADER_Y: u16 = 1;
const BODY_Y: u16 = 2;

fn bob_and_alice() -> TableView {
    let records = records_from_json_str(r#"[{"id":1,"name":"Bob"},{"id":2,"name":"alice"}]"#)
        .expect("records");
    let mut t = TableView::new();
    t.set_data(records, vec![Column::new("name", "Name")]);
    t
}

fn render(t: &mut TableView) -> Vec<String> {
    let mut buf = Buffer::empty(AREA);
    t.render_ref(AREA, &mut buf, &Theme::default());
    (0..AREA.height)
        .map(|y| {
            (0..AREA.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn body(lines: &[String]) -> Vec<String> {
    lines[BODY_Y as usize..]
        .iter()
        .filter(|l| !l.is_empty())
        .cloned()
        .collect()
}

fn ids(ids: &[i64]) -> Vec<RecordId> {
    ids.iter().copied().map(RecordId::Integer).collect()
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code))
}

#[test]
fn header_clicks_cycle_between_ascending_and_descending() {
    let mut t = bob_and_alice();
    let lines = render(&mut t);
    assert_eq!(lines[HEADER_Y as usize], "Name");
    assert_eq!(body(&lines), vec!["Bob", "alice"]);

    let click = InputEvent::Mouse(MouseEvent::click(1, HEADER_Y));
    let action = t.handle_event_in_area(AREA, click.clone());
    assert!(matches!(
        action,
        TableAction::SortChanged(ref s) if s.key == "name" && s.direction == SortDirection::Ascending
    ));
    let lines = render(&mut t);
    assert_eq!(lines[HEADER_Y as usize], "Name ▲");
    assert_eq!(body(&lines), vec!["alice", "Bob"]);

    t.handle_event_in_area(AREA, click.clone());
    let lines = render(&mut t);
    assert_eq!(lines[HEADER_Y as usize], "Name ▼");
    assert_eq!(body(&lines), vec!["Bob", "alice"]);

    t.handle_event_in_area(AREA, click);
    assert_eq!(body(&render(&mut t)), vec!["alice", "Bob"]);
}

#[test]
fn search_renders_only_matching_rows() {
    let mut t = bob_and_alice();
    t.handle_event_in_area(AREA, InputEvent::Mouse(MouseEvent::click(5, 0)));
    assert_eq!(t.focus(), Focus::Search);
    for c in "ali".chars() {
        assert_eq!(
            t.handle_event_in_area(AREA, key(KeyCode::Char(c))),
            TableAction::SearchChanged
        );
    }
    let lines = render(&mut t);
    assert_eq!(lines[0], "/ ali");
    assert_eq!(body(&lines), vec!["alice"]);
    assert_eq!(t.cursor_pos(AREA), Some((5, 0)));
}

#[test]
fn record_missing_searched_field_is_excluded() {
    let mut t = TableView::new();
    t.set_data(
        vec![
            Record::new(1).with("name", "Bob").with("city", "Oslo"),
            Record::new(2).with("name", "alice"),
            Record::new(3).with("name", "Osvald").with("city", Value::Null),
        ],
        vec![Column::new("name", "Name"), Column::new("city", "City")],
    );
    t.set_search_term("os");
    assert_eq!(t.visible_ids(), ids(&[1, 3]));
    t.set_search_term("oslo");
    assert_eq!(t.visible_ids(), ids(&[1]));
}

#[test]
fn unknown_column_renders_empty_cells_and_keeps_order() {
    let mut t = bob_and_alice();
    t.set_columns(vec![
        Column::new("name", "Name"),
        Column::new("nope", "Nope"),
    ]);
    t.toggle_sort("nope");
    let lines = render(&mut t);
    assert_eq!(lines[HEADER_Y as usize], "Name  │Nope ▲");
    assert_eq!(body(&lines), vec!["Bob   │", "alice │"]);
}

#[test]
fn empty_result_shows_message() {
    let mut t = bob_and_alice();
    t.set_search_term("zzz");
    let lines = render(&mut t);
    assert_eq!(lines[BODY_Y as usize], "No matching rows");
}

#[test]
fn click_on_body_row_moves_cursor() {
    let mut t = bob_and_alice();
    render(&mut t);
    assert_eq!(
        t.handle_event_in_area(AREA, InputEvent::Mouse(MouseEvent::click(0, BODY_Y + 1))),
        TableAction::Redraw
    );
    assert_eq!(t.cursor(), Some(1));
    assert_eq!(
        t.handle_event_in_area(AREA, InputEvent::Mouse(MouseEvent::click(0, BODY_Y + 3))),
        TableAction::None
    );
}

#[test]
fn wheel_scrolls_long_tables() {
    let records = (0..50).map(|i| Record::new(i).with("n", i)).collect();
    let mut t = TableView::new();
    t.set_data(records, vec![Column::new("n", "N")]);
    render(&mut t);
    let wheel = MouseEvent {
        x: 0,
        y: BODY_Y,
        kind: MouseEventKind::ScrollDown,
    };
    t.handle_event_in_area(AREA, InputEvent::Mouse(wheel));
    assert_eq!(t.state.y, 3);
    let lines = render(&mut t);
    assert!(lines[BODY_Y as usize].starts_with('3'));
}

#[test]
fn keyboard_sort_matches_header_click() {
    let mut t = bob_and_alice();
    t.handle_event(key(KeyCode::Char('s')));
    assert_eq!(t.visible_ids(), ids(&[2, 1]));
    t.handle_event(key(KeyCode::Char('s')));
    assert_eq!(t.visible_ids(), ids(&[1, 2]));
}
