use ratatui::style::{Modifier, Style};

use super::{FloatRect, WindowControls};
use crate::theme::Palette;
use crate::ui::UiFrame;

/// Result of hit-testing a window's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    Drag,
    Minimize,
    Maximize,
    Close,
}

/// Width of one header control button in cells.
const CONTROL_WIDTH: i32 = 3;

/// Draws window chrome and knows where its clickable parts are.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        title: &str,
        controls: WindowControls,
        palette: &Palette,
        focused: bool,
    );

    fn hit_test(
        &self,
        rect: FloatRect,
        controls: WindowControls,
        column: u16,
        row: u16,
    ) -> HeaderAction;

    /// Area left for the window content once chrome is drawn.
    fn content_rect(&self, rect: FloatRect) -> FloatRect {
        FloatRect {
            x: rect.x.saturating_add(1),
            y: rect.y.saturating_add(2),
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(3),
        }
    }
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    /// Control buttons laid out right to left from the right border. Controls
    /// that no longer fit in the header are dropped, leftmost first.
    fn control_slots(rect: FloatRect, controls: WindowControls) -> Vec<(HeaderAction, i32)> {
        let mut slots = Vec::with_capacity(3);
        let inner_left = rect.x.saturating_add(1);
        let mut cursor = rect.right().saturating_sub(1);
        for (action, enabled) in [
            (HeaderAction::Close, controls.close),
            (HeaderAction::Maximize, controls.maximize),
            (HeaderAction::Minimize, controls.minimize),
        ] {
            if !enabled {
                continue;
            }
            if cursor.saturating_sub(CONTROL_WIDTH) < inner_left {
                break;
            }
            cursor -= CONTROL_WIDTH;
            slots.push((action, cursor));
        }
        slots
    }

    fn control_symbol(action: HeaderAction) -> &'static str {
        match action {
            HeaderAction::Minimize => " _ ",
            HeaderAction::Maximize => " □ ",
            HeaderAction::Close => " x ",
            HeaderAction::None | HeaderAction::Drag => "   ",
        }
    }
}

impl WindowDecorator for DefaultDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: FloatRect,
        title: &str,
        controls: WindowControls,
        palette: &Palette,
        focused: bool,
    ) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let header_style = if focused {
            Style::default()
                .bg(palette.header_bg)
                .fg(palette.header_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(palette.inactive_header_bg)
                .fg(palette.inactive_header_fg)
        };
        let border_style = Style::default().fg(palette.border).bg(palette.body_bg);

        let left = rect.x;
        let top = rect.y;
        let right = rect.right().saturating_sub(1);
        let bottom = rect.bottom().saturating_sub(1);
        let header_y = top.saturating_add(1);

        for x in left..=right {
            let (top_sym, bottom_sym) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            frame.put(x, top, top_sym, border_style);
            frame.put(x, bottom, bottom_sym, border_style);
        }
        for y in header_y..bottom {
            frame.put(left, y, "│", border_style);
            frame.put(right, y, "│", border_style);
        }

        if header_y >= bottom {
            return;
        }
        for x in left.saturating_add(1)..right {
            frame.put(x, header_y, " ", header_style);
        }
        let slots = Self::control_slots(rect, controls);
        let title_end = slots.iter().map(|(_, x)| *x).min().unwrap_or(right);
        let header_width = title_end.saturating_sub(left).saturating_sub(1).max(0) as usize;
        let title_len = title.chars().count().min(header_width);
        let start_x = left
            .saturating_add(1)
            .saturating_add(((header_width - title_len) / 2) as i32);
        frame.put_str(start_x, header_y, title, title_len, header_style);

        let control_style = header_style.fg(palette.control_fg);
        for (action, x) in slots {
            frame.put_str(
                x,
                header_y,
                Self::control_symbol(action),
                CONTROL_WIDTH as usize,
                control_style,
            );
        }
    }

    fn hit_test(
        &self,
        rect: FloatRect,
        controls: WindowControls,
        column: u16,
        row: u16,
    ) -> HeaderAction {
        let (column, row) = (i32::from(column), i32::from(row));
        let right = rect.right().saturating_sub(1);
        if rect.height < 3 || row != rect.y.saturating_add(1) || column <= rect.x || column >= right
        {
            return HeaderAction::None;
        }
        for (action, x) in Self::control_slots(rect, controls) {
            if column >= x && column < x.saturating_add(CONTROL_WIDTH) {
                return action;
            }
        }
        HeaderAction::Drag
    }
}
