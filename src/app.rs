//! Main application loop for the terminal monitor.
//!
//! The [`App`] owns the controller and drives its cadence: one host loop
//! polls the keyboard with a short timeout and calls `tick()` whenever the
//! configured interval has elapsed. Ticks, commands, and rendering all run
//! on this one thread, so nothing can interleave with a tick in flight.

use crate::config::Config;
use crate::controller::{Controller, PipelineSettings, TraceSnapshot};
use crate::error::Result;
use crate::export::{export_csv, DEFAULT_EXPORT_PATH};
use crate::input::{Action, InputHandler};
use crate::source::SyntheticSource;
use crate::theme::Theme;
use crate::widgets::Waveform;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// The terminal monitor application.
pub struct App {
    /// The detection pipeline.
    controller: Controller,
    /// Theme for waveform and tier colors.
    theme: Theme,
    /// Input handler.
    input: InputHandler,
    /// When the last tick fired.
    last_tick: Instant,
    /// Transient status message (export result, source failure).
    status: Option<String>,
    /// Help overlay visibility.
    show_help: bool,
    /// Main loop exit flag.
    should_quit: bool,
}

impl App {
    /// Creates the application from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured starting threshold is out of
    /// range; see [`Controller::new`].
    pub fn new(config: Config) -> Result<Self> {
        let source = SyntheticSource::new(config.global.seed);
        let settings = config.pipeline_settings();
        let controller = Controller::new(Box::new(source), settings)?;

        Ok(Self {
            controller,
            theme: Theme::named(&config.theme.name),
            input: InputHandler::new(),
            last_tick: Instant::now(),
            status: None,
            show_help: false,
            should_quit: false,
        })
    }

    /// Creates the application over an explicit controller.
    ///
    /// Used by tests and callers that want a non-synthetic source.
    #[must_use]
    pub fn with_controller(controller: Controller) -> Self {
        Self {
            controller,
            theme: Theme::default(),
            input: InputHandler::new(),
            last_tick: Instant::now(),
            status: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Runs the application main loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup or rendering fails.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;

        // Run the main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// The main event loop.
    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        // Poll short enough that the cadence never slips a full interval.
        let poll_timeout = self.controller.interval().min(Duration::from_millis(50));

        loop {
            self.advance();

            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if event::poll(poll_timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = self.input.handle_key(key);
                        self.handle_action(action);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Fires a tick when the cadence interval has elapsed.
    fn advance(&mut self) {
        if !self.controller.is_running() || self.last_tick.elapsed() < self.controller.interval() {
            return;
        }
        self.last_tick = Instant::now();

        // A failing source halts the cadence inside tick(); surface it in
        // the status bar instead of crashing the monitor.
        if let Err(err) = self.controller.tick() {
            self.status = Some(err.to_string());
        }
    }

    /// Handles an input action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Toggle => {
                if self.controller.is_running() {
                    self.controller.stop();
                } else {
                    self.controller.start();
                    self.last_tick = Instant::now();
                }
            }
            Action::Reset => {
                self.controller.reset();
                self.status = None;
            }
            Action::Classify => {
                self.controller.classify_all();
                let ledger = self.controller.ledger();
                self.status = Some(format!(
                    "classified {}/{} events",
                    ledger.classified_count(),
                    ledger.len()
                ));
            }
            Action::Export => self.export(),
            Action::ThresholdUp => self.controller.step_threshold_up(),
            Action::ThresholdDown => self.controller.step_threshold_down(),
            Action::Help => self.show_help = !self.show_help,
            Action::None => {}
        }
    }

    /// Exports the ledger to the default CSV path.
    fn export(&mut self) {
        self.status = Some(match export_csv(self.controller.ledger(), DEFAULT_EXPORT_PATH) {
            Ok(Some(rows)) => format!("exported {rows} events to {DEFAULT_EXPORT_PATH}"),
            Ok(None) => "no events to export".to_string(),
            Err(err) => {
                crate::error!("app", "export failed: {err}");
                format!("export failed: {err}")
            }
        });
    }

    /// Renders the application.
    fn render(&self, frame: &mut ratatui::Frame) {
        use ratatui::layout::{Constraint, Direction, Layout};
        use ratatui::style::Style;
        use ratatui::text::{Line, Span};
        use ratatui::widgets::{Block, Borders, Clear, Paragraph};

        crate::time_scope!("app", "render");

        let snapshot = self.controller.snapshot();
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(area);

        // Waveform panel
        let waveform_block = Block::default()
            .title(format!(
                " Waveform  threshold {} ",
                self.controller.threshold()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.fg()));
        let inner = waveform_block.inner(chunks[0]);
        frame.render_widget(waveform_block, chunks[0]);
        frame.render_widget(
            Waveform::new(&snapshot.window_samples)
                .threshold(snapshot.threshold)
                .color(self.theme.waveform.sample(0.0))
                .spike_color(self.theme.tier_color(crate::classify::Tier::High))
                .threshold_color(self.theme.threshold_color()),
            inner,
        );

        // Events panel
        let events_block = Block::default()
            .title(format!(" Events ({}) ", snapshot.events.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.fg()));
        let rows = chunks[1].height.saturating_sub(2) as usize;
        let lines: Vec<Line> = snapshot
            .events
            .iter()
            .rev()
            .take(rows)
            .map(|event| {
                let tier_span = match event.tier {
                    Some(tier) => Span::styled(
                        tier.to_string(),
                        Style::default().fg(self.theme.tier_color(tier)),
                    ),
                    None => Span::raw("-"),
                };
                Line::from(vec![
                    Span::raw(format!("t={:<6} amp={:.3}  ", event.time_step, event.amplitude)),
                    tier_span,
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(events_block), chunks[1]);

        // Status bar
        let [low, medium, high] = self.controller.ledger().tier_counts();
        let status = self.status.clone().unwrap_or_else(|| {
            "space run/pause  r reset  c classify  e export  +/- threshold  ? help  q quit"
                .to_string()
        });
        let bar = format!(
            " {}  ticks {}  events {}  L/M/H {}/{}/{}  {}",
            snapshot.state,
            snapshot.ticks,
            snapshot.events.len(),
            low,
            medium,
            high,
            status
        );
        frame.render_widget(
            Paragraph::new(bar).style(Style::default().fg(self.theme.fg())),
            chunks[2],
        );

        // Help overlay
        if self.show_help {
            let help = Paragraph::new(
                "space  start/stop the tick cadence\n\
                 r      reset window, ledger, tick counter\n\
                 c      classify detected events\n\
                 e      export ledger CSV\n\
                 + / -  raise / lower the threshold\n\
                 q      quit",
            )
            .block(Block::default().title(" Help ").borders(Borders::ALL));
            let popup = centered_rect(50, 10, area);
            frame.render_widget(Clear, popup);
            frame.render_widget(help, popup);
        }
    }

    /// Returns whether the app should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Read access to the pipeline, for tests and embedding hosts.
    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Takes a render snapshot of the pipeline.
    #[must_use]
    pub fn snapshot(&self) -> TraceSnapshot {
        self.controller.snapshot()
    }
}

impl Default for App {
    fn default() -> Self {
        let controller = Controller::new(
            Box::new(SyntheticSource::default()),
            PipelineSettings::default(),
        )
        .expect("default settings are valid");
        Self::with_controller(controller)
    }
}

/// Centers a fixed-size rect inside `area`, clamped to it.
fn centered_rect(width: u16, height: u16, area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    ratatui::layout::Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
