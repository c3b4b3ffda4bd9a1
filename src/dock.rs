//! One-row strip listing every rendered window. Minimized windows live only
//! here, so it is the way back to them.
use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::DOCK_HEIGHT;
use crate::layout::rect_contains;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::{WindowKey, WindowManager};

#[derive(Debug, Clone, PartialEq, Eq)]
struct DockHit<K> {
    id: K,
    rect: Rect,
}

#[derive(Debug)]
pub struct Dock<K> {
    area: Rect,
    hits: Vec<DockHit<K>>,
}

impl<K> Default for Dock<K> {
    fn default() -> Self {
        Self {
            area: Rect::default(),
            hits: Vec::new(),
        }
    }
}

impl<K: WindowKey + 'static> Dock<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Split `area` into the desktop above and the dock row at the bottom.
    pub fn split_area(&mut self, area: Rect) -> (Rect, Rect) {
        let height = DOCK_HEIGHT.min(area.height);
        let dock = Rect {
            x: area.x,
            y: area.y.saturating_add(area.height).saturating_sub(height),
            width: area.width,
            height,
        };
        let desktop = Rect {
            height: area.height.saturating_sub(height),
            ..area
        };
        self.area = dock;
        (desktop, dock)
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, manager: &WindowManager<K>) {
        self.hits.clear();
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let palette = manager.config().theme.palette();
        let base = Style::default().bg(palette.dock_bg).fg(palette.dock_fg);
        frame.fill(area, base);

        let focused = manager.focused_window();
        let max_x = area.x.saturating_add(area.width);
        let mut x = area.x;
        for descriptor in manager.descriptors() {
            let minimized = manager
                .store()
                .window(&descriptor.id)
                .is_some_and(|r| r.is_minimized);
            let max_label = max_x.saturating_sub(x).saturating_sub(2) as usize;
            if max_label == 0 {
                break;
            }
            let label = truncate_to_width(&descriptor.display_title(), max_label);
            let chunk = format!(" {label} ");
            let width = chunk.chars().count() as u16;
            if x.saturating_add(width) > max_x {
                break;
            }
            let style = if focused.as_ref() == Some(&descriptor.id) {
                Style::default()
                    .bg(palette.dock_active_bg)
                    .fg(palette.dock_active_fg)
                    .add_modifier(Modifier::BOLD)
            } else if minimized {
                base.fg(palette.dock_minimized_fg)
                    .add_modifier(Modifier::ITALIC)
            } else {
                base
            };
            frame.put_str(i32::from(x), i32::from(area.y), &chunk, width as usize, style);
            self.hits.push(DockHit {
                id: descriptor.id.clone(),
                rect: Rect {
                    x,
                    y: area.y,
                    width,
                    height: 1,
                },
            });
            x = x.saturating_add(width).saturating_add(1);
        }
    }

    /// Entry under a left-button press, if any.
    pub fn hit_test(&self, event: &Event) -> Option<&K> {
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        self.hits
            .iter()
            .find(|hit| rect_contains(hit.rect, mouse.column, mouse.row))
            .map(|hit| &hit.id)
    }

    /// Clicking a minimized entry restores it, clicking the focused entry
    /// minimizes it, and any other entry is brought to the front.
    pub fn handle_event(&self, event: &Event, manager: &mut WindowManager<K>) -> bool {
        let Some(id) = self.hit_test(event) else {
            return false;
        };
        let minimized = manager
            .store()
            .window(id)
            .is_some_and(|r| r.is_minimized);
        if minimized {
            manager.restore_window(id);
        } else if manager.focused_window().as_ref() == Some(id) {
            manager.minimize_window(id);
        } else {
            manager.focus_window(id);
        }
        true
    }
}
