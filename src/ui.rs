//! UiFrame: a thin wrapper around the ratatui buffer that clips every draw
//! call to the visible area.
//!
//! Windows can be dragged partly off the desktop, so chrome and content are
//! routinely asked to paint at coordinates outside the buffer, including
//! negative ones. Drawing goes through this type so none of those writes
//! can panic.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Used by tests
    /// and offscreen rendering.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint one cell at signed coordinates; silently skipped when outside.
    pub fn put(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        if x < i32::from(self.area.x) || y < i32::from(self.area.y) {
            return;
        }
        if x >= i32::from(self.area.x) + i32::from(self.area.width)
            || y >= i32::from(self.area.y) + i32::from(self.area.height)
        {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((x as u16, y as u16)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Write `text` starting at signed coordinates, one cell per char,
    /// stopping after `max_width` cells.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, max_width: usize, style: Style) {
        let mut buf = [0u8; 4];
        for (idx, ch) in text.chars().take(max_width).enumerate() {
            self.put(x.saturating_add(idx as i32), y, ch.encode_utf8(&mut buf), style);
        }
    }

    /// Fill a rectangle with blanks in `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
