use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

/// Display width of `s` in terminal columns, counting tabs as four columns.
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        UnicodeWidthChar::width(ch).unwrap_or(0)
    }
}

/// Writes `input` at `(x, y)`, skipping the first `start_col` display columns and writing at
/// most `max_cols` columns. Wide chars that straddle either edge are dropped.
///
/// Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut written = 0usize;
    let mut tmp = [0u8; 4];

    let put = |buf: &mut Buffer, dx: usize, symbol: &str| {
        if let Some(cell) = buf.cell_mut((x + dx as u16, y)) {
            cell.set_style(style);
            cell.set_symbol(symbol);
        }
    };

    for ch in input.chars() {
        let w = char_width(ch);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            // A tab partially scrolled off still shows its remaining columns.
            if ch == '\t' && col > start_col {
                let remaining = (col - start_col).min(max_cols - written.min(max_cols));
                for _ in 0..remaining {
                    put(buf, written, " ");
                    written += 1;
                }
            }
            continue;
        }
        if written + w > max_cols {
            break;
        }
        if ch == '\t' {
            for _ in 0..TAB_WIDTH {
                put(buf, written, " ");
                written += 1;
            }
        } else {
            put(buf, written, ch.encode_utf8(&mut tmp));
            if w == 2 {
                put(buf, written + 1, "");
            }
            written += w;
        }
        col += w;
    }
    written as u16
}

/// Draws a one-column vertical scrollbar for `state` into `area`.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 || area.width == 0 {
        return;
    }
    let track = area.height as u32;
    let (thumb_top, thumb_h) = if state.content_h <= state.viewport_h as u32 {
        (0, 0)
    } else {
        let thumb_h = (state.viewport_h as u64 * track as u64 / state.content_h as u64)
            .clamp(1, track as u64) as u32;
        let max_y = state.content_h - state.viewport_h as u32;
        let thumb_top = (state.y as u64 * (track - thumb_h) as u64 / max_y as u64) as u32;
        (thumb_top, thumb_h)
    };
    for dy in 0..area.height {
        let on_thumb = (dy as u32) >= thumb_top && (dy as u32) < thumb_top + thumb_h;
        let symbol = if on_thumb { "█" } else { " " };
        buf.set_stringn(area.x, area.y + dy, symbol, 1, style);
    }
}
