//! LunarView Terminal Viewer
//! =========================
//!
//! Full-screen terminal rendering of the trajectory animation.
//! Uses Ratatui's canvas for drawing and Crossterm for input and raw mode.
//!
//! Enable with the `dashboard` feature flag.
//!
//! Layout:
//! - Header with title and frame counter
//! - Canvas: Earth at the origin, the Moon at the current frame, axes through 0
//! - Legend and axis ranges
//! - Footer

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};

use crate::animation::{FrameSink, Scene};
use crate::error::Result;
use crate::viewport::Viewport;

/// Number of dash/gap pairs drawn along each axis.
const AXIS_DASHES: usize = 60;

/// Grid cells per axis; lines are drawn at the inner cell boundaries.
const GRID_DIVISIONS: usize = 4;

// =============================================================================
// TRAJECTORY VIEWER
// =============================================================================

/// Terminal sink for [`crate::animation::Player`].
///
/// The terminal is switched to raw mode and the alternate screen on
/// [`TrajectoryViewer::open`] and restored when the viewer is dropped.
pub struct TrajectoryViewer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TrajectoryViewer {
    /// Takes over the terminal.
    pub fn open() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(e);
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Gives the terminal back. Called automatically on drop.
    pub fn close(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TrajectoryViewer {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl FrameSink for TrajectoryViewer {
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
        self.terminal.draw(|f| ui(f, scene))?;
        Ok(())
    }

    fn wait(&mut self, timeout: Duration) -> Result<bool> {
        // Handle input (returns early on any event, the player re-checks time)
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && (key.code == KeyCode::Char('q') || key.code == KeyCode::Esc)
                {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render one frame.
fn ui(f: &mut Frame, scene: &Scene<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Canvas
            Constraint::Length(2), // Legend + ranges
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    // === HEADER ===
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Moon Trajectory Over Time",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Frame: {}", scene.frame_label()),
            Style::default().fg(Color::Cyan),
        ),
    ]))
    .style(Style::default().bg(Color::Black))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    // === CANVAS ===
    let viewport = *scene.viewport;
    let earth_radius = scene.body.display_radius(&viewport);
    let earth = scene.body.position();
    let moon = scene.state.marker();

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL))
        .background_color(Color::Black)
        .marker(Marker::Braille)
        .x_bounds(viewport.x_bounds)
        .y_bounds(viewport.y_bounds)
        .paint(move |ctx| {
            draw_grid(ctx, &viewport);
            draw_axes(ctx, &viewport);
            ctx.draw(&Circle {
                x: earth.x,
                y: earth.y,
                radius: earth_radius,
                color: Color::Green,
            });
            ctx.layer();
            if let Some(moon) = moon {
                ctx.draw(&Points {
                    coords: &[(moon.x, moon.y)],
                    color: Color::White,
                });
            }
        });
    f.render_widget(canvas, chunks[1]);

    // === LEGEND ===
    let legend = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled("Earth (to scale)", Style::default().fg(Color::White)),
            Span::raw("   "),
            Span::styled("● ", Style::default().fg(Color::White)),
            Span::styled("Moon", Style::default().fg(Color::White)),
        ]),
        Line::from(Span::styled(
            format!(
                "X values (km): [{:.1}, {:.1}]   Y values (km): [{:.1}, {:.1}]",
                viewport.x_bounds[0],
                viewport.x_bounds[1],
                viewport.y_bounds[0],
                viewport.y_bounds[1]
            ),
            Style::default().fg(Color::White),
        )),
    ])
    .style(Style::default().bg(Color::Black));
    f.render_widget(legend, chunks[2]);

    // === FOOTER ===
    let footer = Paragraph::new("Press 'q' to quit").style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[3]);
}

/// Faint dashed grid at evenly spaced ticks.
fn draw_grid(ctx: &mut Context<'_>, viewport: &Viewport) {
    let [x0, x1] = viewport.x_bounds;
    let [y0, y1] = viewport.y_bounds;

    for x in grid_ticks(x0, x1, GRID_DIVISIONS) {
        for (a, b) in dashes(y0, y1, AXIS_DASHES) {
            ctx.draw(&CanvasLine::new(x, a, x, b, Color::DarkGray));
        }
    }
    for y in grid_ticks(y0, y1, GRID_DIVISIONS) {
        for (a, b) in dashes(x0, x1, AXIS_DASHES) {
            ctx.draw(&CanvasLine::new(a, y, b, y, Color::DarkGray));
        }
    }
}

/// Inner boundaries when `[from, to]` is cut into `divisions` equal cells.
fn grid_ticks(from: f64, to: f64, divisions: usize) -> impl Iterator<Item = f64> {
    let step = (to - from) / divisions.max(1) as f64;
    (1..divisions).map(move |i| from + i as f64 * step)
}

/// Dashed horizontal and vertical lines through the origin.
fn draw_axes(ctx: &mut Context<'_>, viewport: &Viewport) {
    let [x0, x1] = viewport.x_bounds;
    let [y0, y1] = viewport.y_bounds;

    for (a, b) in dashes(x0, x1, AXIS_DASHES) {
        ctx.draw(&CanvasLine::new(a, 0.0, b, 0.0, Color::Gray));
    }
    for (a, b) in dashes(y0, y1, AXIS_DASHES) {
        ctx.draw(&CanvasLine::new(0.0, a, 0.0, b, Color::Gray));
    }
}

/// Splits `[from, to]` into `count` dash segments separated by equal gaps.
fn dashes(from: f64, to: f64, count: usize) -> impl Iterator<Item = (f64, f64)> {
    let step = (to - from) / (2 * count.max(1)) as f64;
    (0..count).map(move |i| {
        let start = from + 2.0 * i as f64 * step;
        (start, start + step)
    })
}

// =============================================================================
// TESTS
// =============================================================================
