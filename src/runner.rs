use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::style::Style;

use crate::dock::Dock;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::ui::UiFrame;
use crate::window::{WindowDescriptor, WindowDraw, WindowKey, WindowManager};

/// A host application living on the desktop.
///
/// The host stays declarative: every frame it reports the windows it wants
/// through [`windows`](DesktopApp::windows) and the manager converges on
/// that list. Windows closed from their chrome are reported back through
/// [`on_windows_closed`](DesktopApp::on_windows_closed) so the host can drop
/// them from its list.
pub trait DesktopApp<K: WindowKey + 'static> {
    fn desktop(&mut self) -> &mut WindowManager<K>;
    fn windows(&mut self) -> Vec<WindowDescriptor<K>>;
    fn render_content(&mut self, frame: &mut UiFrame<'_>, window: &WindowDraw<K>);

    /// Input not consumed by window chrome or the dock. Returns true when
    /// handled.
    fn handle_content_event(&mut self, _event: &Event, _focused: Option<&K>) -> bool {
        false
    }

    fn on_windows_closed(&mut self, _closed: Vec<K>) {}

    /// Checked with `None` before each redraw and with every event.
    fn should_quit(&mut self, event: Option<&Event>) -> bool {
        matches!(
            event,
            Some(Event::Key(key))
                if key.code == KeyCode::Char('q')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
        )
    }

    fn empty_desktop_message(&self) -> &str {
        "No windows"
    }
}

pub fn run_desktop<B, D, A, K>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    app: &mut A,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
    A: DesktopApp<K>,
    K: WindowKey + 'static,
{
    let mut dock = Dock::new();
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_, event| {
        let Some(evt) = event else {
            if app.should_quit(None) {
                return Ok(ControlFlow::Quit);
            }
            sync_windows(app);
            terminal
                .draw(|frame| draw_desktop(&mut UiFrame::new(frame), app, &mut dock))
                .map_err(|e| io::Error::other(e.to_string()))?;
            return Ok(ControlFlow::Continue);
        };
        if app.should_quit(Some(&evt)) {
            return Ok(ControlFlow::Quit);
        }
        dispatch_event(&evt, app, &dock);
        let closed = app.desktop().take_closed_windows();
        if !closed.is_empty() {
            app.on_windows_closed(closed);
        }
        Ok(ControlFlow::Continue)
    })
}

fn sync_windows<A, K>(app: &mut A)
where
    A: DesktopApp<K>,
    K: WindowKey + 'static,
{
    let windows = app.windows();
    app.desktop().set_windows(windows);
}

fn dispatch_event<A, K>(evt: &Event, app: &mut A, dock: &Dock<K>)
where
    A: DesktopApp<K>,
    K: WindowKey + 'static,
{
    if dock.handle_event(evt, app.desktop()) {
        return;
    }
    match evt {
        Event::Mouse(_) => {
            if !app.desktop().handle_event(evt) {
                let focused = app.desktop().focused_window();
                app.handle_content_event(evt, focused.as_ref());
            }
        }
        Event::Key(key)
            if matches!(key.code, KeyCode::Tab | KeyCode::BackTab)
                && key.kind == KeyEventKind::Press =>
        {
            let focused = app.desktop().focused_window();
            if !app.handle_content_event(evt, focused.as_ref()) {
                app.desktop().focus_next(key.code == KeyCode::Tab);
            }
        }
        _ => {
            let focused = app.desktop().focused_window();
            app.handle_content_event(evt, focused.as_ref());
        }
    }
}

fn draw_desktop<A, K>(frame: &mut UiFrame<'_>, app: &mut A, dock: &mut Dock<K>)
where
    A: DesktopApp<K>,
    K: WindowKey + 'static,
{
    let (desktop, _) = dock.split_area(frame.area());
    if app.desktop().descriptors().is_empty() {
        let message = app.empty_desktop_message().to_string();
        frame.put_str(
            i32::from(desktop.x),
            i32::from(desktop.y),
            &message,
            desktop.width as usize,
            Style::default(),
        );
    }
    let plan = app.desktop().window_draw_plan(desktop);
    for window in &plan {
        app.desktop().render_window(frame, window);
        app.render_content(frame, window);
    }
    dock.render(frame, app.desktop());
}
