use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::style::{Modifier, Style};
use tracing::Level;

use desk_wm::config::{ConfigError, ManagerConfig, ReconcilePolicy};
use desk_wm::constants::DEFAULT_MAX_WINDOWS;
use desk_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use desk_wm::runner::{DesktopApp, run_desktop};
use desk_wm::tracing_sub::{self, LogTarget};
use desk_wm::ui::UiFrame;
use desk_wm::window::{Position, Size, WindowDescriptor, WindowDraw, WindowManager};

type WindowId = usize;

const HELP_WINDOW: WindowId = 0;

const HELP_TEXT: &str = indoc::indoc! {"
    Drag a header to move a window.
    Drag a border to resize it.
    Double-click a header to maximize.
    _ minimizes, the dock brings it back.

    n        open another window
    Tab      focus next window
    Ctrl+Q   quit
"};

#[derive(Parser, Debug)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating window desktop in the terminal"
)]
struct DemoCli {
    /// Most windows shown at once; extra windows are not opened.
    #[arg(
        short = 'm',
        long = "max-windows",
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_WINDOWS
    )]
    max_windows: usize,

    /// Windows open at startup, the help window included.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 3)]
    windows: usize,

    /// Color theme: default, midnight or paper.
    #[arg(short = 't', long = "theme", value_name = "NAME", default_value = "default")]
    theme: String,

    /// Keep geometry of windows that leave the list instead of purging it.
    #[arg(long = "retain-stale")]
    retain_stale: bool,

    /// Append logs to this file. Without it logs are discarded.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::INFO)]
    log_level: Level,
}

impl TryFrom<&DemoCli> for ManagerConfig {
    type Error = ConfigError;

    fn try_from(cli: &DemoCli) -> Result<Self, Self::Error> {
        let policy = if cli.retain_stale {
            ReconcilePolicy::Retain
        } else {
            ReconcilePolicy::AutoPurge
        };
        let config = ManagerConfig::default()
            .with_max_windows(cli.max_windows)
            .with_reconcile_policy(policy)
            .with_theme(cli.theme.as_str());
        config.validate()?;
        Ok(config)
    }
}

fn main() -> io::Result<()> {
    let cli = DemoCli::parse();
    let config = ManagerConfig::try_from(&cli)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    let target = cli
        .log_file
        .clone()
        .map(LogTarget::File)
        .unwrap_or_default();
    tracing_sub::init(&target, cli.log_level)?;

    let mut app = DemoApp::new(config, cli.windows);
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    let result = run_desktop(
        output.terminal_mut(),
        &mut input,
        &mut app,
        Duration::from_millis(16),
    );
    output.exit()?;
    tracing::info!(closed = app.closed_count, "desktop exited");
    result
}

struct DemoApp {
    desktop: WindowManager<WindowId>,
    open: Vec<WindowId>,
    next_id: WindowId,
    closed_count: usize,
}

impl DemoApp {
    fn new(config: ManagerConfig, initial: usize) -> Self {
        let open: Vec<WindowId> = (0..initial.max(1)).collect();
        Self {
            desktop: WindowManager::with_config(config),
            next_id: open.len(),
            open,
            closed_count: 0,
        }
    }

    fn descriptor(id: WindowId) -> WindowDescriptor<WindowId> {
        if id == HELP_WINDOW {
            return WindowDescriptor::new(id, "Help")
                .with_icon("?")
                .with_default_position(Position::new(2, 1))
                .with_default_size(Size::new(44, 13))
                .with_min_size(30, 6);
        }
        let step = (id % 8) as i32;
        WindowDescriptor::new(id, format!("Window {id}"))
            .with_default_position(Position::new(20 + step * 4, 3 + step * 2))
            .with_default_size(Size::new(36, 10))
    }
}

impl DesktopApp<WindowId> for DemoApp {
    fn desktop(&mut self) -> &mut WindowManager<WindowId> {
        &mut self.desktop
    }

    fn windows(&mut self) -> Vec<WindowDescriptor<WindowId>> {
        self.open.iter().copied().map(Self::descriptor).collect()
    }

    fn render_content(&mut self, frame: &mut UiFrame<'_>, window: &WindowDraw<WindowId>) {
        let inner = window.surface.inner;
        let content = window.surface.content;
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let lines: Vec<String> = if window.id == HELP_WINDOW {
            let mut lines: Vec<String> = HELP_TEXT.lines().map(str::to_string).collect();
            lines.push(String::new());
            lines.push(format!(
                "{} open, {} shown, {} closed",
                self.open.len(),
                self.desktop.descriptors().len(),
                self.closed_count
            ));
            lines
        } else {
            vec![
                format!("Window {}", window.id),
                format!("z-index {}", window.z_index),
            ]
        };
        let style = if window.focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        // Content coordinates can be off-screen; UiFrame clips the rest.
        let bottom = i32::from(inner.y) + i32::from(inner.height);
        let right = i32::from(inner.x) + i32::from(inner.width);
        for (row, line) in lines.iter().enumerate() {
            let y = content.y.saturating_add(row as i32);
            if y < i32::from(inner.y) {
                continue;
            }
            if y >= bottom {
                break;
            }
            let width = right.saturating_sub(content.x).max(0) as usize;
            frame.put_str(content.x, y, line, width, style);
        }
    }

    fn handle_content_event(&mut self, event: &Event, _focused: Option<&WindowId>) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press || !key.modifiers.is_empty() {
            return false;
        }
        if key.code == KeyCode::Char('n') {
            self.open.push(self.next_id);
            tracing::debug!(window_id = self.next_id, "opened window");
            self.next_id += 1;
            return true;
        }
        false
    }

    fn on_windows_closed(&mut self, closed: Vec<WindowId>) {
        self.closed_count += closed.len();
        self.open.retain(|id| !closed.contains(id));
    }
}
