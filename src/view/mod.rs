//! TUI rendering and terminal management (impure shell)
//!
//! The terminal is a host with 1x1 pixel cells: the [`LayoutEngine`] is
//! fed terminal sizes, key presses and mouse events, and every frame is
//! drawn from what it reports.

pub mod constants;
mod layout;
mod status;
mod styles;

pub use layout::{render_layout, Screen};
pub use status::status_line;
pub use styles::{ColorConfig, HexStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, InputError, KeyAction, LayoutError};
use crate::source::{DataProvider, InputSource};
use crate::view::constants::{
    FALLBACK_WIDTH, STATUS_BAR_HEIGHT, TICK_INTERVAL_MS, WHEEL_SCROLL_ROWS,
};
use crate::view_state::{
    EngineConfig, LayoutEngine, Metrics, PositionOverflowMode, ScrollAxis, ScrollingDirection,
    Zone,
};
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Document could not be read
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Engine rejected its configuration
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    engine: LayoutEngine,
    input_source: InputSource,
    key_bindings: KeyBindings,
    styles: HexStyles,
    /// Left button went down inside the data view; drags extend the selection.
    dragging: bool,
    last_tick: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        input_source: InputSource,
        config: EngineConfig,
        styles: HexStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, input_source, config, styles)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws after input, on resize, and when
    /// the caret blinks.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let poll_interval = Duration::from_millis(TICK_INTERVAL_MS);
        self.draw()?;

        loop {
            let mut dirty = false;
            if event::poll(poll_interval)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => dirty = self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height)?;
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.tick();
            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an already initialized terminal.
    ///
    /// Lays the document out for the terminal's current size.
    pub fn with_terminal(
        terminal: Terminal<B>,
        input_source: InputSource,
        config: EngineConfig,
        styles: HexStyles,
    ) -> Result<Self, TuiError> {
        let mut engine = LayoutEngine::new(config)?;
        engine.set_metrics(Metrics::fixed(1, 1, 1))?;
        engine.recompute_layout(input_source.size())?;
        info!(
            source = %input_source.name(),
            size = input_source.size(),
            "document opened"
        );

        let mut app = Self {
            terminal,
            engine,
            input_source,
            key_bindings: KeyBindings::default(),
            styles,
            dragging: false,
            last_tick: Instant::now(),
        };
        let size = app.terminal.size()?;
        app.handle_resize(size.width, size.height)?;
        Ok(app)
    }

    /// The layout engine driving this view.
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        let engine = &mut self.engine;
        let config = *engine.config();
        let result = match action {
            KeyAction::Quit => return true,
            KeyAction::MoveCaret(direction) => {
                engine.move_caret(direction, false);
                Ok(())
            }
            KeyAction::ExtendSelection(direction) => {
                engine.move_caret(direction, true);
                Ok(())
            }
            KeyAction::Scroll(direction) => {
                engine.scroll(direction);
                Ok(())
            }
            KeyAction::CenterOnCaret => {
                engine.center_on_caret();
                Ok(())
            }
            KeyAction::SelectAll => {
                engine.select_all();
                Ok(())
            }
            KeyAction::ToggleEditOperation => {
                engine.set_edit_operation(config.edit_operation.toggled());
                Ok(())
            }
            KeyAction::CycleCodeType => engine.set_code_type(config.structure.code_type.next()),
            KeyAction::SetViewMode(view_mode) => engine.set_view_mode(view_mode),
            KeyAction::ToggleCase => engine.set_code_case(config.code_case.toggled()),
            KeyAction::ToggleWrapping => {
                engine.set_row_wrapping(config.structure.row_wrapping.toggled())
            }
        };

        if let Err(err) = result {
            debug!(?action, %err, "setting change rejected");
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Left click places the caret (Shift extends), dragging extends the
    /// selection, clicking the vertical scrollbar jumps there and the wheel
    /// scrolls (Shift for horizontal). Returns true when a redraw is needed.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let x = i32::from(mouse.column);
        let y = i32::from(mouse.row);
        let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);

        match mouse.kind {
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let direction = match (mouse.kind == MouseEventKind::ScrollUp, shift) {
                    (true, false) => ScrollingDirection::Up,
                    (false, false) => ScrollingDirection::Down,
                    (true, true) => ScrollingDirection::Left,
                    (false, true) => ScrollingDirection::Right,
                };
                (0..WHEEL_SCROLL_ROWS).fold(false, |changed, _| {
                    self.engine.scroll(direction) || changed
                })
            }
            MouseEventKind::Down(MouseButton::Left) => match self.engine.position_zone(x, y) {
                Zone::CodeArea => {
                    self.dragging = true;
                    self.engine
                        .move_caret_to_pixel(x, y, shift, PositionOverflowMode::NoOverflow);
                    true
                }
                Zone::VerticalScrollbar => self.jump_vertical_scrollbar(y),
                _ => false,
            },
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                self.engine
                    .move_caret_to_pixel(x, y, true, PositionOverflowMode::Overflow)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                false
            }
            _ => false,
        }
    }

    /// Map a click on the vertical scrollbar track to a scrollbar value.
    fn jump_vertical_scrollbar(&mut self, y: i32) -> bool {
        let Some(state) = self.engine.vertical_scrollbar() else {
            return false;
        };
        let track = self.engine.dimensions().vertical_scrollbar_rect();
        let span = i64::from((track.height - 1).max(1));
        let offset = i64::from((y - track.y).clamp(0, track.height.max(1) - 1));
        let value = offset * i64::from(state.range) / span;
        self.engine
            .on_scroll(value.min(i64::from(i32::MAX)) as i32, ScrollAxis::Vertical)
    }

    /// Handle a terminal resize event
    ///
    /// The component gets everything above the status bar.
    pub fn handle_resize(&mut self, width: u16, height: u16) -> Result<(), TuiError> {
        debug!("Handling resize to {}x{}", width, height);
        let width = if width > 0 { width } else { FALLBACK_WIDTH };
        let height = height.saturating_sub(STATUS_BAR_HEIGHT);
        self.engine
            .on_resize(i32::from(width), i32::from(height))?;
        Ok(())
    }

    /// Advance the caret blink clock. Returns true when the caret flipped.
    fn tick(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.engine
            .tick(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let rows = self.engine.rows(&self.input_source)?;
        let status = status_line(&self.engine, &self.input_source.name());
        let screen = Screen {
            engine: &self.engine,
            rows: &rows,
            status: &status,
            styles: &self.styles,
        };
        self.terminal.draw(|frame| render_layout(frame, &screen))?;
        Ok(())
    }
}

/// Initialize and run the TUI application with input source and config
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    input_source: InputSource,
    config: EngineConfig,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let result = TuiApp::new(input_source, config, HexStyles::with_color_config(colors))
        .and_then(|mut app| app.run());

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
