use std::io;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::cell::CellState;
use crate::grid::{Grid, GridState};
use crate::menu::Control;
use crate::page::{Page, UiEvent};
use crate::view::ViewRenderer;

/// Hosts a page in the terminal: mouse buttons stand in for click and contextmenu,
/// keys drive the cursor and the menu controls.
pub fn run_tui<R: ViewRenderer>(mut page: Page<R>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut cursor = (0usize, 0usize);
    let mut last_inner_board = Rect::default();
    loop {
        terminal.draw(|f| { last_inner_board = ui(f, page.grid(), cursor); })?;

        let event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let grid = page.grid();
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => {
                        cursor.0 = cursor.0.saturating_sub(1);
                        None
                    }
                    KeyCode::Char('l') | KeyCode::Right => {
                        if cursor.0 + 1 < grid.width() { cursor.0 += 1; }
                        None
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        cursor.1 = cursor.1.saturating_sub(1);
                        None
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        if cursor.1 + 1 < grid.height() { cursor.1 += 1; }
                        None
                    }
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => {
                        Some(UiEvent::Click { x: cursor.0, y: cursor.1 })
                    }
                    KeyCode::Char('f') => Some(UiEvent::ContextMenu { x: cursor.0, y: cursor.1 }),
                    KeyCode::Char('n') => Some(UiEvent::Control(Control::Reset)),
                    KeyCode::Char('c') => Some(UiEvent::Control(Control::Cheat)),
                    KeyCode::Char('v') => Some(UiEvent::Control(Control::Validate)),
                    _ => None,
                }
            }
            Event::Mouse(m) => match m.kind {
                MouseEventKind::Down(btn) => {
                    let grid = page.grid();
                    pos_to_cell(m.column, m.row, last_inner_board, dim(grid.width()), dim(grid.height()))
                        .and_then(|(cx, cy)| {
                            let (x, y) = (cx as usize, cy as usize);
                            match btn {
                                MouseButton::Left => Some(UiEvent::Click { x, y }),
                                MouseButton::Right => Some(UiEvent::ContextMenu { x, y }),
                                MouseButton::Middle => None,
                            }
                        })
                }
                _ => None,
            },
            _ => None,
        };

        if let Some(event) = event {
            page.handle(event);
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

fn ui(f: &mut ratatui::Frame, grid: &Grid, cursor: (usize, usize)) -> Rect {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let (status, color) = match grid.state() {
        GridState::GameOver => ("BIG BA-DA-BOOOOM! n to reset, q to quit", Color::Red),
        GridState::Won => ("You won! n to reset, q to quit", Color::Green),
        GridState::Gaming => ("Mouse: left=open, right=flag | Arrows/HJKL move | Enter open | f flag", Color::Cyan),
    };
    let header = Paragraph::new(status)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Minesweeper"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], dim(grid.width()), dim(grid.height()));
    let inner = inner_area(area);
    draw_grid(f, grid, area, cursor);

    let footer = Paragraph::new(format!(
        "n reset | c cheat{} | v validate | q quit    {}x{}  mines: {}  closed: {}",
        if grid.is_cheating() { " (on)" } else { "" },
        grid.width(),
        grid.height(),
        grid.total_mines(),
        grid.cells_closed(),
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

fn centered_grid_area(parent: Rect, cols: u16, rows: u16) -> Rect {
    // one char + one space per cell, plus the border
    let grid_w = cols.saturating_mul(2).saturating_add(2);
    let grid_h = rows.saturating_add(2);
    let x = parent.x.saturating_add(parent.width.saturating_sub(grid_w) / 2);
    let y = parent.y.saturating_add(parent.height.saturating_sub(grid_h) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_grid(f: &mut ratatui::Frame, grid: &Grid, area: Rect, cursor: (usize, usize)) {
    let lines: Vec<Line> = grid
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    let mut ch = grid.glyph(cell);
                    let mut style = match cell.state() {
                        CellState::Mine => Style::default().fg(Color::Red),
                        CellState::Maybe => Style::default().fg(Color::Yellow),
                        CellState::Open => number_style(cell.label().unwrap_or(0)),
                        CellState::Closed if grid.is_cheating() && cell.is_mine() => Style::default().fg(Color::LightRed),
                        CellState::Closed => Style::default().fg(Color::DarkGray),
                    };
                    if cursor == (x, y) {
                        style = style.add_modifier(Modifier::REVERSED);
                        if ch == ' ' { ch = '·'; }
                    }
                    Span::styled(format!("{} ", ch), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let para = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Grid"));
    f.render_widget(para, area);
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

/// Grid dimension in terminal cells, saturating instead of wrapping.
fn dim(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn inner_area(area: Rect) -> Rect {
    // same shrink as Block::inner() for Borders::ALL
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

fn pos_to_cell(mx: u16, my: u16, inner: Rect, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    let cx = (mx - inner.x) / 2;
    let cy = my - inner.y;
    (cx < cols && cy < rows).then_some((cx, cy))
}

struct TermGuard;

impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
