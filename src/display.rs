/// Rendering layer — all terminal I/O lives here.
///
/// Receives a fully composed `Frame` and translates it into terminal
/// commands.  No game logic is performed here.
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use sprite_collector::frame::Frame;

/// Write one complete frame, switching colours only where they change.
pub fn present<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let mut fg = Color::Reset;
    let mut bg = Color::Reset;
    out.queue(style::ResetColor)?;

    for (row, cells) in frame.rows_iter().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut run = String::with_capacity(cells.len());
        for cell in cells {
            if cell.fg != fg || cell.bg != bg {
                if !run.is_empty() {
                    out.queue(Print(&run))?;
                    run.clear();
                }
                if cell.fg != fg {
                    out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = cell.fg;
                }
                if cell.bg != bg {
                    out.queue(style::SetBackgroundColor(cell.bg))?;
                    bg = cell.bg;
                }
            }
            run.push(cell.ch);
        }
        if !run.is_empty() {
            out.queue(Print(&run))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.rows().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
