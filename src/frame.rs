/// Frame composition.
///
/// The renderer draws into an in-memory cell grid instead of straight to the
/// terminal: the canvas is laid out in pixel coordinates and `Viewport`
/// squeezes it onto however many cells the terminal has.  Writing the grid
/// out is the binary's job (`display::present`).
use crossterm::style::Color;

use crate::assets::{AssetId, Assets, Sprite};
use crate::compute::play_again_button;
use crate::entities::{GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::DarkGreen;
const C_PLAYER: Color = Color::White;
const C_ITEM: Color = Color::Yellow;
const C_SCORE: Color = Color::Black;
const C_SCORE_BG: Color = Color::Grey;
const C_WIN: Color = Color::Red;
const C_BUTTON: Color = Color::Blue;
const C_BUTTON_TEXT: Color = Color::White;
const C_LOADING: Color = Color::Cyan;

// Font sizes of the canvas layout, in pixels.  Text is anchored on its
// baseline, so these shift the row a label lands on.
const FONT_SCORE: f32 = 24.0;
const FONT_MESSAGE: f32 = 20.0;
const FONT_WIN: f32 = 48.0;
const FONT_BUTTON: f32 = 24.0;

// ── Cell buffer ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell::default(); cols as usize * rows as usize];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col as i32, row as i32).map(|i| &self.cells[i])
    }

    /// Out-of-bounds writes are clipped.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Write a glyph, keeping the cell's background.
    pub fn put_char(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        if let Some(i) = self.index(col, row) {
            let bg = self.cells[i].bg;
            self.cells[i] = Cell { ch, fg, bg };
        }
    }

    pub fn put_str(&mut self, col: i32, row: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(col + i as i32, row, ch, fg);
        }
    }

    pub fn fill_rect(&mut self, col: i32, row: i32, width: i32, height: i32, bg: Color) {
        for r in row..row + height {
            for c in col..col + width {
                if let Some(i) = self.index(c, r) {
                    self.cells[i] = Cell { ch: ' ', fg: Color::Reset, bg };
                }
            }
        }
    }

    pub fn row_text(&self, row: u16) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.rows).any(|r| self.row_text(r).contains(needle))
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1) as usize)
    }
}

// ── Canvas → cell mapping ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, canvas_width: f32, canvas_height: f32) -> Self {
        Self {
            cols,
            rows,
            canvas_width,
            canvas_height,
        }
    }

    fn cell_width(&self) -> f32 {
        self.canvas_width / self.cols.max(1) as f32
    }

    fn cell_height(&self) -> f32 {
        self.canvas_height / self.rows.max(1) as f32
    }

    /// Cell containing canvas point (`x`, `y`).
    pub fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        (
            (x / self.cell_width()).floor() as i32,
            (y / self.cell_height()).floor() as i32,
        )
    }

    /// Canvas point at the middle of a terminal cell.
    pub fn to_canvas(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.cell_width(),
            (row as f32 + 0.5) * self.cell_height(),
        )
    }

    /// Columns spanned by `px` canvas pixels (at least one).
    pub fn span_cols(&self, px: f32) -> i32 {
        ((px / self.cell_width()).round() as i32).max(1)
    }

    pub fn span_rows(&self, px: f32) -> i32 {
        ((px / self.cell_height()).round() as i32).max(1)
    }

    /// Cells whose centre (as seen by `to_canvas`) lies inside `rect`, as
    /// `(col, row, width, height)`.  `None` when no cell centre is covered.
    pub fn cells_inside(&self, rect: &Rect) -> Option<(i32, i32, i32, i32)> {
        let (c0, r0) = self.to_cell(rect.x, rect.y);
        let (c1, r1) = self.to_cell(rect.x + rect.width, rect.y + rect.height);
        let cols: Vec<i32> = (c0 - 1..=c1 + 1)
            .filter(|&c| c >= 0 && c < self.cols as i32)
            .filter(|&c| {
                let (x, _) = self.to_canvas(c as u16, 0);
                x >= rect.x && x <= rect.x + rect.width
            })
            .collect();
        let rows: Vec<i32> = (r0 - 1..=r1 + 1)
            .filter(|&r| r >= 0 && r < self.rows as i32)
            .filter(|&r| {
                let (_, y) = self.to_canvas(0, r as u16);
                y >= rect.y && y <= rect.y + rect.height
            })
            .collect();
        let (first_col, last_col) = (*cols.first()?, *cols.last()?);
        let (first_row, last_row) = (*rows.first()?, *rows.last()?);
        Some((
            first_col,
            first_row,
            last_col - first_col + 1,
            last_row - first_row + 1,
        ))
    }

    /// Row a text line with baseline `y` and font size `font_px` lands on.
    fn text_row(&self, y: f32, font_px: f32) -> i32 {
        self.to_cell(0.0, y - font_px / 2.0).1
    }
}

/// Draw `sprite` scaled (nearest neighbour) into a `width` × `height` cell
/// box whose top-left corner is (`col`, `row`).  Spaces stay transparent.
fn blit(
    frame: &mut Frame,
    sprite: &Sprite,
    col: i32,
    row: i32,
    width: i32,
    height: i32,
    flipped: bool,
    fg: Color,
) {
    if width <= 0 || height <= 0 {
        return;
    }
    let (sw, sh) = (sprite.width(), sprite.height());
    for dy in 0..height {
        let sy = dy as usize * sh / height as usize;
        for dx in 0..width {
            let sx = dx as usize * sw / width as usize;
            let glyph = if flipped {
                sprite.get_mirrored(sx, sy)
            } else {
                sprite.get(sx, sy)
            };
            match glyph {
                Some(' ') | None => {}
                Some(ch) => frame.put_char(col + dx, row + dy, ch, fg),
            }
        }
    }
}

/// Text colour of the pickup message at `alpha`.
pub fn fade_color(alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    Color::Rgb {
        r: 0,
        g: (64.0 + 128.0 * a).round() as u8,
        b: 0,
    }
}

// ── Public entry points ──────────────────────────────────────────────────────

/// Compose one complete game frame.
pub fn compose(frame: &mut Frame, state: &GameState, assets: &Assets, view: &Viewport) {
    frame.clear();

    draw_background(frame, assets, view);
    draw_player(frame, state, assets, view);
    draw_items(frame, state, assets, view);
    draw_score(frame, state, view);

    if state.status == GameStatus::Won {
        draw_win_screen(frame, state, view);
    }
}

/// Loading screen shown until every asset resolved.
pub fn compose_loading(frame: &mut Frame, pending: &[AssetId]) {
    frame.clear();
    let names: Vec<String> = pending.iter().map(|a| a.to_string()).collect();
    let title = "Loading...";
    let detail = format!("waiting for: {}", names.join(", "));
    let cx = frame.cols() as i32 / 2;
    let cy = frame.rows() as i32 / 2;
    frame.put_str(cx - title.chars().count() as i32 / 2, cy - 1, title, C_LOADING);
    frame.put_str(cx - detail.chars().count() as i32 / 2, cy, &detail, C_LOADING);
}

// ── Layers ───────────────────────────────────────────────────────────────────

fn draw_background(frame: &mut Frame, assets: &Assets, view: &Viewport) {
    blit(
        frame,
        &assets.background,
        0,
        0,
        view.cols as i32,
        view.rows as i32,
        false,
        C_BACKGROUND,
    );
}

fn draw_player(frame: &mut Frame, state: &GameState, assets: &Assets, view: &Viewport) {
    let p = &state.player;
    let (w, h) = (p.scaled_width(), p.scaled_height());
    let (col, row) = view.to_cell(p.x - w / 2.0, p.y - h / 2.0);
    blit(
        frame,
        &assets.player,
        col,
        row,
        view.span_cols(w),
        view.span_rows(h),
        p.flipped,
        C_PLAYER,
    );
}

fn draw_items(frame: &mut Frame, state: &GameState, assets: &Assets, view: &Viewport) {
    let size = state.config.item_size;
    let (w, h) = (view.span_cols(size), view.span_rows(size));
    for item in &state.items {
        let (col, row) = view.to_cell(item.x - size / 2.0, item.y - size / 2.0);
        blit(frame, &assets.collectible, col, row, w, h, false, C_ITEM);
    }
}

fn draw_score(frame: &mut Frame, state: &GameState, view: &Viewport) {
    let (col, _) = view.to_cell(10.0, 0.0);
    let score = format!("Score: {}", state.score);
    let row = view.text_row(30.0, FONT_SCORE);
    for (i, ch) in score.chars().enumerate() {
        frame.set(
            col + i as i32,
            row,
            Cell {
                ch,
                fg: C_SCORE,
                bg: C_SCORE_BG,
            },
        );
    }

    if let Some(message) = &state.message {
        let alpha = message.alpha();
        if alpha > 0.0 {
            let row = view.text_row(50.0, FONT_MESSAGE);
            frame.put_str(col, row, &message.text, fade_color(alpha));
        }
    }
}

fn draw_win_screen(frame: &mut Frame, state: &GameState, view: &Viewport) {
    let h = state.height();

    let title = "YOU WIN!!!";
    let title_cols = title.chars().count() as i32;
    let title_row = view.text_row(h / 2.0, FONT_WIN);
    frame.put_str(
        (view.cols as i32 - title_cols) / 2,
        title_row,
        title,
        C_WIN,
    );

    // Paint exactly the cells a click would land in.
    let button = play_again_button(&state.config);
    let Some((bcol, brow, bw, bh)) = view.cells_inside(&button) else {
        return;
    };
    frame.fill_rect(bcol, brow, bw, bh, C_BUTTON);

    let label = "Play Again";
    let label_cols = label.chars().count() as i32;
    let label_row = view
        .text_row(button.y + 30.0, FONT_BUTTON)
        .clamp(brow, brow + bh - 1);
    frame.put_str(bcol + (bw - label_cols) / 2, label_row, label, C_BUTTON_TEXT);
}
