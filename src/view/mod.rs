//! TUI shell for the windowing engine (impure shell).
//!
//! This module is the host integration layer: it owns the terminal, feeds
//! crossterm events into the engine as native scrolls and imperative scroll
//! operations, and draws the emitted cells. The engine core never touches
//! the terminal directly.

mod grid;
mod styles;

pub use grid::GridView;
pub use styles::{ColorConfig, GridStyles};

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use thiserror::Error;
use tracing::debug;

use crate::config::ResolvedConfig;
use crate::grid::config::{GridConfig, InvalidGridConfig};
use crate::grid::driver::RenderDriver;
use crate::grid::state::GridViewState;
use crate::host::{ScrollSurface, StaticMetrics};

/// Terminal lines reserved for chrome outside the grid (title + status bar).
const CHROME_LINES: u16 = 2;

/// Terminal lines of decorative header inside the scrollable content.
const HEADER_LINES: f64 = 1.0;

/// How long the event loop waits for input before ticking the idle check.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The resolved configuration produced an invalid grid configuration.
    #[error("Invalid grid configuration: {0}")]
    Config(#[from] InvalidGridConfig),
}

/// In-process stand-in for a natively scrollable surface.
///
/// Terminals have no scrollable element, so the shell keeps the "real"
/// scroll position itself and synthesizes native-scroll readings from it.
/// Like a browser surface, it clamps every write into its own bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EmulatedSurface {
    offset: f64,
    client_height: f64,
    scroll_height: f64,
}

impl EmulatedSurface {
    /// Surface with the given viewport and content extents.
    pub fn new(client_height: f64, scroll_height: f64) -> Self {
        Self {
            offset: 0.0,
            client_height,
            scroll_height,
        }
    }

    /// Update the extents (content grew/shrank or the viewport resized),
    /// re-clamping the current offset.
    pub fn set_extents(&mut self, client_height: f64, scroll_height: f64) {
        self.client_height = client_height;
        self.scroll_height = scroll_height;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Largest offset the surface can be scrolled to.
    pub fn max_offset(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Apply a wheel/keyboard delta, clamped. Returns the new offset.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
        self.offset
    }

    /// Viewport extent of the surface.
    pub fn client_height(&self) -> f64 {
        self.client_height
    }

    /// Content extent of the surface.
    pub fn scroll_height(&self) -> f64 {
        self.scroll_height
    }
}

impl ScrollSurface for EmulatedSurface {
    fn scroll_top(&self) -> f64 {
        self.offset
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }
}

/// Main TUI application.
///
/// Generic over backend to support testing with TestBackend.
pub struct GridApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    state: GridViewState,
    driver: RenderDriver<String>,
    surface: EmulatedSurface,
    data: Vec<String>,
    styles: GridStyles,
    started: Instant,
    should_quit: bool,
}

impl GridApp<CrosstermBackend<Stdout>> {
    /// Create and initialize the application on the real terminal.
    ///
    /// Sets up raw mode, the alternate screen, and mouse capture.
    pub fn new(data: Vec<String>, resolved: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::with_terminal(terminal, data, resolved, width, height)
    }

    /// Run the event loop until the user quits, then restore the terminal.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let result = self.event_loop();
        self.state.teardown();

        disable_raw_mode()?;
        io::stdout().execute(crossterm::event::DisableMouseCapture)?;
        io::stdout().execute(LeaveAlternateScreen)?;

        result
    }

    fn event_loop(&mut self) -> Result<(), TuiError> {
        while !self.should_quit {
            self.draw()?;

            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => self.remount(width, height)?,
                    _ => {}
                }
            }

            let now = self.now_ms();
            self.state.poll_scroll_idle(now);
            self.state.flush_requested_scroll(&mut self.surface);
        }
        Ok(())
    }
}

impl<B> GridApp<B>
where
    B: Backend,
{
    /// Build the application over an existing terminal (used by tests with
    /// a TestBackend, and by `new` with the crossterm backend).
    pub fn with_terminal(
        terminal: Terminal<B>,
        data: Vec<String>,
        resolved: &ResolvedConfig,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let grid_height = f64::from(height.saturating_sub(CHROME_LINES));
        let config = GridConfig::new(
            grid_height,
            resolved.row_height,
            resolved.columns.max(1),
            data.len(),
        )?
        .with_overscan(resolved.overscan_row_count)
        .with_scrolling_reset_delay_ms(resolved.scrolling_reset_delay_ms);
        let config = match resolved.initial_scroll_top {
            Some(offset) => config.with_initial_scroll_top(offset),
            None => config,
        };

        let mut app = Self {
            terminal,
            state: GridViewState::new(config),
            driver: RenderDriver::new(),
            surface: EmulatedSurface::default(),
            data,
            styles: GridStyles::new(),
            started: Instant::now(),
            should_quit: false,
        };
        app.mount(width);
        Ok(app)
    }

    /// Milliseconds since the application started; the engine's injected
    /// clock.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn mount(&mut self, width: u16) {
        let metrics = StaticMetrics {
            width: f64::from(width),
            leading_offset: HEADER_LINES,
            scrollbar_thickness: 0.0,
        };
        let viewport_height = self.state.config().viewport_height;
        // Extents first: initialize may push an initial offset at the
        // surface, which clamps against them.
        let content_height =
            HEADER_LINES + self.state.config().row_count() as f64 * self.state.config().row_height;
        self.surface.set_extents(viewport_height, content_height);
        self.state.initialize(&metrics, &mut self.surface, &metrics);
        debug!(width, content_height, "grid mounted");
    }

    /// Remount with a new terminal size, preserving the scroll offset.
    pub fn remount(&mut self, width: u16, height: u16) -> Result<(), TuiError> {
        let offset = self.state.viewport().scroll_top;
        let grid_height = f64::from(height.saturating_sub(CHROME_LINES));
        let config = GridConfig {
            viewport_height: grid_height,
            initial_scroll_top: Some(offset),
            ..self.state.config().clone()
        };
        self.state.teardown();
        self.state = GridViewState::new(config);
        self.mount(width);
        Ok(())
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let row_height = self.state.config().row_height;
        let page = self.state.config().viewport_height;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.wheel(-row_height),
            KeyCode::Down => self.wheel(row_height),
            KeyCode::PageUp => self.wheel(-page),
            KeyCode::PageDown => self.wheel(page),
            KeyCode::Home => {
                self.state.scroll_to(Some(0.0));
            }
            KeyCode::End => {
                let bottom = self.state.max_scroll_top();
                self.state.scroll_to(Some(bottom));
            }
            KeyCode::Char('g') => {
                self.state.scroll_to_item(0);
            }
            KeyCode::Char('G') => {
                let last = self.data.len().saturating_sub(1);
                self.state.scroll_to_item(last);
            }
            _ => {}
        }
    }

    /// Handle a mouse event (wheel scrolling only).
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let row_height = self.state.config().row_height;
        match mouse.kind {
            MouseEventKind::ScrollUp => self.wheel(-row_height),
            MouseEventKind::ScrollDown => self.wheel(row_height),
            _ => {}
        }
    }

    /// Move the emulated surface and feed the result to the engine as a
    /// native scroll event.
    pub fn wheel(&mut self, delta: f64) {
        let offset = self.surface.scroll_by(delta);
        let now = self.now_ms();
        self.state.on_native_scroll(
            self.surface.client_height(),
            offset,
            self.surface.scroll_height(),
            now,
        );
    }

    /// Engine state, for assertions in tests.
    pub fn state(&self) -> &GridViewState {
        &self.state
    }

    /// Emulated scroll surface, for assertions in tests.
    pub fn surface(&self) -> &EmulatedSurface {
        &self.surface
    }

    /// Whether a quit key has been handled.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The terminal, for buffer assertions in tests.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Render one frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let viewport = *self.state.viewport();
        let range = self.state.render_range();
        let item_count = self.data.len();
        let status = format!(
            "offset {:.0}/{:.0}  rows {}..={} of {}  {}",
            viewport.scroll_top,
            self.state.max_scroll_top(),
            range.render_start.get(),
            range.render_end.get(),
            viewport.row_count,
            if viewport.is_scrolling {
                "scrolling"
            } else {
                "idle"
            },
        );

        let state = &mut self.state;
        let driver = &self.driver;
        let data = &self.data;
        let styles = &self.styles;

        self.terminal.draw(|frame| {
            let chunks = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

            let title = Paragraph::new(Line::from(format!(
                "gridwin - {item_count} items - q quits"
            )))
            .style(styles.header);
            frame.render_widget(title, chunks[0]);

            let status_bar = Paragraph::new(Line::from(status)).style(styles.status);
            frame.render_widget(status_bar, chunks[2]);

            let grid = GridView::new(state, data, driver, styles).with_header("── grid ──");
            frame.render_widget(grid, chunks[1]);
        })?;
        Ok(())
    }
}

/// Build and run the TUI over the given items.
pub fn run(data: Vec<String>, resolved: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = GridApp::new(data, resolved)?;
    app.run()
}
