/// Terminal frontend for the Bloch sphere visualiser
use bloch_core::{Animator, BlochResult, VisualiserConfig};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

pub mod renderer;

pub use renderer::AsciiCanvas;

/// How often the host "refreshes"; the animator's throttle decides which of
/// these ticks actually redraw
const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Rows reserved for the status line
const STATUS_ROWS: u16 = 1;

/// Build an animator drawing onto a `cols × rows` cell grid
pub fn build_animator(
    config: &VisualiserConfig,
    cols: usize,
    rows: usize,
) -> Animator<AsciiCanvas> {
    let canvas = AsciiCanvas::new(
        cols,
        rows,
        config.style.surface_width,
        config.style.surface_height,
    );
    Animator::new(config.scene(), config.throttle(), canvas)
}

/// Render one frame at `time_ms` of animation and return it as text
pub fn render_snapshot(
    config: &VisualiserConfig,
    cols: usize,
    rows: usize,
    time_ms: f64,
) -> BlochResult<String> {
    let mut canvas = AsciiCanvas::new(
        cols,
        rows,
        config.style.surface_width,
        config.style.surface_height,
    );
    config.scene().draw(&mut canvas, time_ms)?;
    Ok(canvas.to_text())
}

/// Leave raw mode and the alternate screen; both steps always run and the
/// first failure is returned
fn restore_terminal<W: Write>(
    writer: &mut W,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> BlochResult<()> {
    let raw = disable_raw_mode();
    let screen = execute!(writer, terminal::LeaveAlternateScreen, cursor::Show);
    raw.and(screen)?;
    Ok(())
}

/// Main application struct for the animated terminal view
pub struct TerminalApp {
    animator: Animator<AsciiCanvas>,
    running: bool,
    started: Instant,
}

impl TerminalApp {
    pub fn new(config: &VisualiserConfig) -> BlochResult<Self> {
        let (width, height) = terminal::size()?;
        let rows = height.saturating_sub(STATUS_ROWS).max(1);
        info!(cols = width, rows, "terminal surface acquired");

        Ok(Self {
            animator: build_animator(config, width as usize, rows as usize),
            running: true,
            started: Instant::now(),
        })
    }

    pub fn run(&mut self) -> BlochResult<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();
        let restored = restore_terminal(&mut stdout(), terminal::disable_raw_mode);

        if let Err(e) = &result {
            error!("animation stopped: {e}");
        }
        info!(frames = self.animator.frames_drawn(), "animation finished");
        result.and(restored)
    }

    fn main_loop(&mut self) -> BlochResult<()> {
        while self.running {
            if event::poll(TICK_INTERVAL)? {
                self.handle_input()?;
            }

            let timestamp = self.started.elapsed().as_secs_f64() * 1000.0;
            if self.animator.tick(timestamp)? {
                self.present()?;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> BlochResult<()> {
        match event::read()? {
            Event::Key(KeyEvent {
                code, modifiers, ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.running = false
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                let rows = height.saturating_sub(STATUS_ROWS).max(1);
                debug!(cols = width, rows, "terminal resized");
                let style = self.animator.scene().style;
                *self.animator.surface_mut() = AsciiCanvas::new(
                    width as usize,
                    rows as usize,
                    style.surface_width,
                    style.surface_height,
                );
                execute!(stdout(), terminal::Clear(terminal::ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn present(&mut self) -> BlochResult<()> {
        let mut stdout = stdout();
        self.animator.surface().draw(&mut stdout)?;

        let status_row = self.animator.surface().height() as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, status_row),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Bloch sphere | t = {:.1}s | frame {} | Q=Quit",
                self.animator.throttle().time() / 1000.0,
                self.animator.frames_drawn()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
