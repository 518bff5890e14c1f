/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` (array of Cell)
///   2. Compare each cell with `back` (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// The renderer only reads session snapshots; it never mutates game state.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::app::{App, Screen};
use crate::domain::geometry::Rect;
use crate::sim::session::Phase;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    const BASE_BG: Color = Color::Rgb { r: 30, g: 18, b: 36 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Never equal to a real cell, so every position is re-emitted.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    /// Centre `s` on row `y`.
    fn put_centered(&mut self, y: usize, s: &str, fg: Color, bg: Color) {
        let len = s.chars().count();
        let x = self.width.saturating_sub(len) / 2;
        self.put_str(x, y, s, fg, bg);
    }
}

// ── Layout ──

const HUD_ROW: usize = 0;
const BOARD_ROW: usize = 2;

/// Snake: each grid cell is 2 terminal columns.
const SNAKE_CELL_W: usize = 2;

/// Chase: field units per terminal cell (800×400 → 80×20).
const CHASE_UNITS_X: f32 = 10.0;
const CHASE_UNITS_Y: f32 = 20.0;

// ── Palette ──

const SNAKE_BG: Color = Color::Rgb { r: 253, g: 246, b: 255 };
const SNAKE_HEAD: Color = Color::Rgb { r: 190, g: 24, b: 93 };
const SNAKE_BODY: Color = Color::Rgb { r: 236, g: 72, b: 153 };
const HEART: Color = Color::Rgb { r: 239, g: 68, b: 68 };
const SKY: Color = Color::Rgb { r: 135, g: 206, b: 235 };
const GROUND: Color = Color::Rgb { r: 139, g: 69, b: 19 };
const GRASS: Color = Color::Rgb { r: 34, g: 139, b: 34 };
const CHEESE: Color = Color::Rgb { r: 255, g: 215, b: 0 };
const JERRY: Color = Color::Rgb { r: 160, g: 82, b: 45 };
const TOM: Color = Color::Rgb { r: 105, g: 105, b: 105 };
const BONUS: Color = Color::Black;
const ACCENT: Color = Color::Rgb { r: 244, g: 114, b: 182 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_screen: Option<Screen>,
    enhanced_keys: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_screen: None,
            enhanced_keys: false,
        }
    }

    /// Enter raw mode and the alternate screen.
    /// Returns whether key release events will be reported.
    pub fn init(&mut self) -> io::Result<bool> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced_keys = true;
        }
        log::debug!("keyboard enhancement: {}", self.enhanced_keys);

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(Cell::INVALID);

        Ok(self.enhanced_keys)
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, app: &App) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        let resized = tw as usize != self.term_w || th as usize != self.term_h;
        if resized || self.last_screen != Some(app.screen) {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_screen = Some(app.screen);
        }

        self.front.clear();
        match app.screen {
            Screen::Title => self.compose_title(),
            Screen::Snake => self.compose_snake(app),
            Screen::Chase => self.compose_chase(app),
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }
                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_title(&mut self) {
        let bg = Cell::BASE_BG;
        let mid = self.front.height / 2;
        let top = mid.saturating_sub(5);
        self.front.put_centered(top, "♥  Hearts & Chase  ♥", ACCENT, bg);
        self.front.put_centered(top + 2, "[1]  Hearts Snake", Color::White, bg);
        self.front.put_centered(top + 3, "[2]  Tom & Jerry Chase", Color::White, bg);
        self.front.put_centered(top + 5, "[Q]  Quit", Color::Grey, bg);
        self.front.put_centered(
            top + 8,
            "Enter: start/pause   R: reset   Esc: back to menu",
            Color::DarkGrey,
            bg,
        );
    }

    fn compose_hud(&mut self, title: &str, score: u32, phase: Phase, app: &App) {
        let bg = Cell::BASE_BG;
        let status = match phase {
            Phase::Idle => "READY",
            Phase::Running => "PLAYING",
            Phase::Paused => "PAUSED",
            Phase::Over => "GAME OVER",
        };
        let hud = format!(" {title}   Score: {score:<6}  {status}");
        self.front.put_str(0, HUD_ROW, &hud, ACCENT, bg);
        if !app.message.is_empty() {
            self.front.put_str(0, HUD_ROW + 1, &format!(" {}", app.message), Color::Yellow, bg);
        }
    }

    fn compose_help(&mut self, row: usize, help: &str) {
        self.front.put_str(1, row, help, Color::DarkGrey, Cell::BASE_BG);
    }

    fn compose_snake(&mut self, app: &App) {
        let session = &app.snake;
        let w = session.world();
        self.compose_hud("Hearts Snake", session.score(), session.phase(), app);

        let grid = w.grid_size.max(0) as usize;
        for gy in 0..grid {
            for gx in 0..grid {
                let (x, y) = (gx * SNAKE_CELL_W, BOARD_ROW + gy);
                let dot = Cell::new('·', Color::Rgb { r: 233, g: 213, b: 255 }, SNAKE_BG);
                self.front.set(x, y, dot);
                self.front.set(x + 1, y, Cell::new(' ', Color::White, SNAKE_BG));
            }
        }

        let food = w.food;
        if food.in_bounds(w.grid_size) {
            let (x, y) = (food.x as usize * SNAKE_CELL_W, BOARD_ROW + food.y as usize);
            self.front.set(x, y, Cell::new('♥', HEART, SNAKE_BG));
        }

        // Tail first so the head is drawn last.
        for (i, seg) in w.body.iter().enumerate().rev() {
            if !seg.in_bounds(w.grid_size) {
                continue;
            }
            let color = if i == 0 { SNAKE_HEAD } else { SNAKE_BODY };
            let (x, y) = (seg.x as usize * SNAKE_CELL_W, BOARD_ROW + seg.y as usize);
            self.front.set(x, y, Cell::new('█', color, SNAKE_BG));
            self.front.set(x + 1, y, Cell::new('█', color, SNAKE_BG));
        }

        if session.is_over() {
            let row = BOARD_ROW + grid / 2;
            let text = format!("  Game Over! You collected {} hearts  ", session.score());
            self.front.put_centered(row, &text, Color::White, SNAKE_HEAD);
        }

        self.compose_help(BOARD_ROW + grid + 1, "Arrows/WASD: steer   Enter: start/pause   R: reset   Esc: menu");
    }

    fn compose_chase(&mut self, app: &App) {
        let session = &app.chase;
        let w = session.world();
        self.compose_hud("Tom & Jerry", session.score(), session.phase(), app);

        let cols = (w.field_width / CHASE_UNITS_X).ceil() as usize;
        let rows = (w.field_height / CHASE_UNITS_Y).ceil() as usize;
        for y in 0..rows {
            for x in 0..cols {
                self.front.set(x, BOARD_ROW + y, Cell::new(' ', Color::White, SKY));
            }
        }

        for p in &w.platforms {
            self.fill_rect(&p.body, cols, rows, Cell::new('▀', GRASS, GROUND));
        }
        for c in &w.cheese {
            self.fill_rect(&c.body, cols, rows, Cell::new('◆', CHEESE, SKY));
        }
        self.fill_rect(&w.bonus.body, cols, rows, Cell::new('M', BONUS, SKY));
        self.fill_rect(&w.pursuer.body, cols, rows, Cell::new('T', Color::White, TOM));
        self.fill_rect(&w.player.body, cols, rows, Cell::new('J', Color::White, JERRY));

        if session.is_over() {
            let text = format!("  Game Over! Final score {}  ", session.score());
            self.front.put_centered(BOARD_ROW + rows / 2, &text, Color::White, Color::DarkRed);
        }

        self.compose_help(BOARD_ROW + rows + 1, "←/→: run   ↑/Space: jump   Enter: start/pause   R: reset   Esc: menu");
    }

    /// Paint every terminal cell covered by `r` (clipped to the field).
    fn fill_rect(&mut self, r: &Rect, cols: usize, rows: usize, cell: Cell) {
        let x0 = (r.x / CHASE_UNITS_X).floor().max(0.0) as usize;
        let y0 = (r.y / CHASE_UNITS_Y).floor().max(0.0) as usize;
        let x1 = ((r.right() / CHASE_UNITS_X).ceil().max(0.0) as usize).min(cols);
        let y1 = ((r.bottom() / CHASE_UNITS_Y).ceil().max(0.0) as usize).min(rows);
        for y in y0..y1 {
            for x in x0..x1 {
                self.front.set(x, BOARD_ROW + y, cell);
            }
        }
    }
}
