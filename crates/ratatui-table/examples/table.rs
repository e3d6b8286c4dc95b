use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_table::crossterm_input::input_event_from_crossterm;
use ratatui_table::input::InputEvent;
use ratatui_table::input::KeyCode;
use ratatui_table::prelude::*;
use ratatui_table::record::records_from_reader;
use simplelog::ConfigBuilder;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use std::env;
use std::fs::File;
use std::io;
use std::time::Duration;

fn main() -> io::Result<()> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return Ok(());
    }

    let mut data_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--log" => {
                i += 1;
                let path = args.get(i).ok_or_else(|| {
                    io::Error::new(io::ErrorKind::InvalidInput, "--log needs a path")
                })?;
                init_logging(path)?;
            }
            other => data_path = Some(other.to_string()),
        }
        i += 1;
    }

    let (records, columns) = match data_path {
        Some(path) => load(&path)?,
        None => sample(),
    };
    log::info!("starting with {} records, {} columns", records.len(), columns.len());

    let mut table = TableView::new();
    table.set_data(records, columns);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let theme = Theme::default();

    let res = run(&mut terminal, &theme, &mut table);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut TableView,
) -> io::Result<()> {
    let mut table_area = Rect::default();
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("TableView (/ search, s sort, ←→ column, ↑↓ row, click headers, q quit)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(1),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);

            table.render_ref(table_area, f.buffer_mut(), theme);
            render_status(status_area, f.buffer_mut(), theme, table);
            if let Some((x, y)) = table.cursor_pos(table_area) {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(ev) = input_event_from_crossterm(crossterm::event::read()?) else {
            continue;
        };
        if table.focus() == Focus::Grid
            && matches!(&ev, InputEvent::Key(k) if k.code == KeyCode::Char('q'))
        {
            return Ok(());
        }
        match table.handle_event_in_area(table_area, ev) {
            TableAction::Activated(id) => log::info!("activated record {id}"),
            TableAction::SortChanged(sort) => {
                log::info!("sorted by {} {:?}", sort.key, sort.direction)
            }
            TableAction::SearchChanged => {
                log::debug!("search {:?}: {} rows", table.search_term(), table.visible_indices().len())
            }
            TableAction::Redraw | TableAction::None => {}
        }
    }
}

fn render_status(area: Rect, buf: &mut ratatui::buffer::Buffer, theme: &Theme, table: &TableView) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let sort = table
        .sort()
        .map(|s| format!("{} {:?}", s.key, s.direction))
        .unwrap_or("-".to_string());
    let help = table
        .options()
        .bindings
        .help()
        .iter()
        .map(|b| format!("{} {}", b.help_key, b.help_desc))
        .collect::<Vec<_>>()
        .join(" • ");
    let pct = table.state.percent_y().unwrap_or(100);
    let s = format!(
        "rows={}/{}  sort={sort}  scroll={pct}%  {help}",
        table.visible_indices().len(),
        table.records().len(),
    );
    buf.set_span(area.x, area.y, &Span::styled(s, theme.text_muted), area.width);
}

fn init_logging(path: &str) -> io::Result<()> {
    let config = ConfigBuilder::new().build();
    WriteLogger::init(LevelFilter::Trace, config, File::create(path)?)
        .map_err(|e| io::Error::other(e.to_string()))
}

/// Loads a JSON array of records; columns come from the union of field names, `id` first.
fn load(path: &str) -> io::Result<(Vec<Record>, Vec<Column>)> {
    let records = records_from_reader(File::open(path)?)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut keys: Vec<String> = Vec::new();
    for record in &records {
        for (key, _) in record.fields() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }
    let columns = keys
        .into_iter()
        .map(|k| {
            let header = capitalize(&k);
            Column::new(k, header)
        })
        .collect();
    Ok((records, columns))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn sample() -> (Vec<Record>, Vec<Column>) {
    let people = [
        ("Bob", 41, "Oslo", true),
        ("alice", 34, "Lyon", false),
        ("Émile", 29, "Montréal", true),
        ("carol", 52, "Austin", false),
        ("Dmitri", 38, "Tallinn", true),
        ("zoë", 23, "Utrecht", false),
        ("Oskar", 45, "Malmö", true),
        ("hana", 31, "Kyoto", false),
    ];
    let mut records: Vec<Record> = people
        .iter()
        .enumerate()
        .map(|(i, &(name, age, city, active))| {
            Record::new(i as i64 + 1)
                .with("name", name)
                .with("age", age)
                .with("city", city)
                .with("active", active)
        })
        .collect();
    // One record without a city, to show empty cells and non-matching search.
    records.push(Record::new(99).with("name", "Nobody").with("age", 0.5));

    let columns = vec![
        Column::new("id", "Id"),
        Column::new("name", "Name"),
        Column::new("age", "Age"),
        Column::new("city", "City"),
        Column::new("active", "Active"),
    ];
    (records, columns)
}

fn print_help() {
    println!("Usage: table [--log <file>] [records.json]");
    println!();
    println!("Shows a searchable, sortable table. Without a file, sample data is used.");
    println!("The file must be a JSON array of objects, each with a unique `id`.");
}
