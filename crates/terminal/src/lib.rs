//! Terminal front-end for `socmon`.
//!
//! Owns the event loop and wires together the background tasks:
//! - Sampler task (one acquisition pass per interval or on demand)
//! - Config file watcher (live reload on change)
//! - Keyboard input
//!
//! The [`DashboardModel`] lives on this loop alone, so ticks, manual
//! refreshes and toggles are applied strictly one after another.

pub mod markup;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use socmon_config::{load as load_config, ConfigWatcher, SocmonConfig};
use socmon_core::{Message, MonitorError, Result};
use socmon_dashboard::{strip_tags, DashboardModel};
use socmon_system::{spawn_sampler, Sampler, SamplerCommand, MINIMUM_CPU_UPDATE_INTERVAL};
use socmon_theme::Theme;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Startup options resolved by the binary.
#[derive(Debug, Clone)]
pub struct Options {
    pub config_path: PathBuf,
    /// Overrides `monitor.update_interval` when set.
    pub interval: Option<Duration>,
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Run the interactive dashboard until the user quits.
pub async fn run(config: SocmonConfig, options: Options) -> Result<()> {
    enable_raw_mode().map_err(|e| MonitorError::Terminal(format!("raw mode: {e}")))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(MonitorError::Terminal(format!("alternate screen: {e}")));
    }

    // Restore the terminal before a panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
        default_hook(info);
    }));

    let result = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(mut terminal) => {
            let result = event_loop(&mut terminal, config, options).await;
            terminal.show_cursor().ok();
            result
        }
        Err(e) => Err(MonitorError::Terminal(format!("init: {e}"))),
    };

    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    result
}

/// Sample twice, one interval apart, and return the resulting frame as plain
/// text.  The first pass only primes CPU usage and trends, so the gap is
/// never shorter than the CPU counters need.
pub async fn snapshot(config: &SocmonConfig, interval: Duration) -> String {
    let mut sampler = Sampler::new(&config.sensors);
    let mut model = DashboardModel::new(config);

    model.ingest(&sampler.sample().await);
    tokio::time::sleep(interval.max(MINIMUM_CPU_UPDATE_INTERVAL)).await;
    strip_tags(&model.tick(&sampler.sample().await))
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Whether the loop should keep going after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    model:       DashboardModel,
    theme:       Theme,
    config_path: PathBuf,
    interval:    Option<Duration>,
    sampler:     mpsc::Sender<SamplerCommand>,
    /// One-line feedback shown in the footer.
    status:      Option<String>,
}

impl App {
    fn update(&mut self, message: Message) -> Flow {
        match message {
            Message::Readings(readings) => {
                self.model.ingest(&readings);
            }
            Message::Refresh => {
                // A full channel already holds a pending request.
                if let Err(mpsc::error::TrySendError::Closed(_)) =
                    self.sampler.try_send(SamplerCommand::RefreshNow)
                {
                    self.status = Some("sampler stopped".into());
                } else {
                    self.status = Some("refreshing…".into());
                }
            }
            Message::ToggleDisplayMode => {
                self.model.toggle_display_mode();
                self.status = Some(format!("{:?} view", self.model.display().mode).to_lowercase());
            }
            Message::ToggleTrends => {
                self.model.toggle_trend_annotations();
                let state = if self.model.display().show_trends { "on" } else { "off" };
                self.status = Some(format!("trends {state}"));
            }
            Message::ConfigReloaded => self.reload(),
            Message::Shutdown => return Flow::Quit,
        }
        Flow::Continue
    }

    fn reload(&mut self) {
        match load_config(&self.config_path) {
            Ok(cfg) => {
                info!("Config reloaded");
                self.model.apply_config(&cfg);
                self.theme = Theme::from_config(&cfg.theme, cfg.display.use_colors);
                let command = SamplerCommand::Reconfigure {
                    sensors:  cfg.sensors.clone(),
                    interval: self.interval.unwrap_or_else(|| cfg.monitor.interval()),
                };
                if self.sampler.try_send(command).is_err() {
                    warn!("Sampler did not accept the new config");
                }
                self.status = Some("config reloaded".into());
            }
            Err(e) => {
                warn!("Config reload failed: {e}");
                self.status = Some(format!("reload failed: {e}"));
            }
        }
    }

    fn view(&self, frame: &mut Frame<'_>) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" RK3588 system monitor ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let text = markup::to_lines(&self.model.display_text(), &self.theme);
        frame.render_widget(Paragraph::new(text).block(block), body);

        let updated = self
            .model
            .last_update()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".into());
        let mut hint = format!(" q quit · r refresh · g graph · t trends · c reload │ {updated}");
        if let Some(status) = &self.status {
            hint.push_str(" │ ");
            hint.push_str(status);
        }
        frame.render_widget(
            Paragraph::new(Line::from(hint)).style(Style::default().add_modifier(Modifier::DIM)),
            footer,
        );
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: SocmonConfig,
    options: Options,
) -> Result<()> {
    let interval = options.interval.unwrap_or_else(|| config.monitor.interval());
    let (mut readings_rx, sampler) = spawn_sampler(Sampler::new(&config.sensors), interval);
    let (_watcher, mut reload_rx) = ConfigWatcher::spawn(&options.config_path);

    let mut app = App {
        model: DashboardModel::new(&config),
        theme: Theme::from_config(&config.theme, config.display.use_colors),
        config_path: options.config_path,
        interval: options.interval,
        sampler,
        status: None,
    };

    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| app.view(frame))?;

        let message = tokio::select! {
            Some(readings) = readings_rx.recv() => Message::Readings(readings),
            Some(()) = reload_rx.recv() => Message::ConfigReloaded,
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match key_message(key) {
                    Some(message) => message,
                    None => continue,
                },
                // Resize and the like: just redraw.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => Message::Shutdown,
            },
        };

        if app.update(message) == Flow::Quit {
            break;
        }
    }

    Ok(())
}

/// Key bindings.  Releases and repeats are ignored.
fn key_message(key: KeyEvent) -> Option<Message> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::Shutdown)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Shutdown),
        KeyCode::Char('r') | KeyCode::F(5) => Some(Message::Refresh),
        KeyCode::Char('g') => Some(Message::ToggleDisplayMode),
        KeyCode::Char('t') => Some(Message::ToggleTrends),
        KeyCode::Char('c') => Some(Message::ConfigReloaded),
        _ => None,
    }
}
