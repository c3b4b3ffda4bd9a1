use std::time::{Duration, Instant};

use ratatui::prelude::Rect;
use ratatui::style::Style;

use super::decorator::{HeaderAction, WindowDecorator};
use super::{FloatRect, Position, Size, WindowDescriptor, WindowRecord};
use crate::constants::{DEFAULT_WINDOW_POSITION, DEFAULT_WINDOW_SIZE, DOUBLE_CLICK_INTERVAL};
use crate::layout::floating::{ManipulatorProps, ResizeEdge, resize_edge_at};
use crate::theme::Palette;
use crate::ui::UiFrame;

/// What a pointer press landed on inside one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHit {
    Control(HeaderAction),
    Header,
    Edge(ResizeEdge),
    Body,
}

/// Screen placement of a rendered window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSurface {
    /// Whole window including chrome, absolute buffer coordinates.
    pub full: FloatRect,
    /// Content area, absolute and possibly partly off-screen.
    pub content: FloatRect,
    /// The on-screen part of `content`.
    pub inner: Rect,
}

/// Presentation adapter for one window.
///
/// Reads state from a store record when one is given; without a record it
/// runs uncontrolled from the descriptor defaults. It never mutates
/// anything: gestures are reported back as [`WindowHit`]s and the caller
/// decides what to do with them.
#[derive(Debug, Clone, Copy)]
pub struct WindowView<'a, K> {
    descriptor: &'a WindowDescriptor<K>,
    record: Option<&'a WindowRecord<K>>,
    preview: Option<FloatRect>,
    fallback_position: Position,
    fallback_size: Size,
}

impl<'a, K> WindowView<'a, K> {
    pub fn new(descriptor: &'a WindowDescriptor<K>, record: Option<&'a WindowRecord<K>>) -> Self {
        Self {
            descriptor,
            record,
            preview: None,
            fallback_position: DEFAULT_WINDOW_POSITION,
            fallback_size: DEFAULT_WINDOW_SIZE,
        }
    }

    pub fn uncontrolled(descriptor: &'a WindowDescriptor<K>) -> Self {
        Self::new(descriptor, None)
    }

    /// Geometry used when neither the record nor the descriptor has one.
    pub fn with_fallback(mut self, position: Position, size: Size) -> Self {
        self.fallback_position = position;
        self.fallback_size = size;
        self
    }

    /// Live geometry from an in-progress drag or resize.
    pub fn with_preview(mut self, preview: Option<FloatRect>) -> Self {
        self.preview = preview;
        self
    }

    pub fn descriptor(&self) -> &'a WindowDescriptor<K> {
        self.descriptor
    }

    pub fn is_minimized(&self) -> bool {
        self.record.is_some_and(|r| r.is_minimized)
    }

    pub fn is_maximized(&self) -> bool {
        self.record.is_some_and(|r| r.is_maximized)
    }

    pub fn z_index(&self) -> u64 {
        self.record.map(|r| r.z_index).unwrap_or_default()
    }

    /// Restored geometry relative to the desktop, ignoring maximize.
    pub fn geometry(&self) -> FloatRect {
        if let Some(preview) = self.preview {
            return preview;
        }
        let position = self
            .record
            .and_then(|r| r.position)
            .or(self.descriptor.default_position)
            .unwrap_or(self.fallback_position);
        let size = self
            .record
            .and_then(|r| r.size)
            .or(self.descriptor.default_size)
            .unwrap_or(self.fallback_size);
        FloatRect::from_parts(position, size)
    }

    /// Absolute placement inside the desktop `area`. Minimized windows have
    /// no placement at all; maximized ones fill the area.
    pub fn layout(&self, area: Rect) -> Option<FloatRect> {
        if self.is_minimized() {
            return None;
        }
        if self.is_maximized() {
            return Some(FloatRect::from(area));
        }
        Some(self.geometry().offset_by(area))
    }

    /// Constraints for the drag/resize collaborator. Maximized windows can
    /// be neither dragged nor resized.
    pub fn manipulator_props(&self, bounds: Rect, visible_margin: u16) -> ManipulatorProps {
        let min = self.descriptor.min_size();
        let maximized = self.is_maximized();
        ManipulatorProps {
            min_width: min.width,
            min_height: min.height,
            max_width: self.descriptor.max_width,
            max_height: self.descriptor.max_height,
            disable_dragging: maximized || !self.descriptor.draggable,
            enable_resizing: !maximized && self.descriptor.resizable,
            bounds,
            visible_margin,
        }
    }

    pub fn hit_test(
        &self,
        decorator: &dyn WindowDecorator,
        area: Rect,
        column: u16,
        row: u16,
    ) -> Option<WindowHit> {
        let rect = self.layout(area)?;
        if !rect.contains(column, row) {
            return None;
        }
        match decorator.hit_test(rect, self.descriptor.controls, column, row) {
            HeaderAction::Drag => return Some(WindowHit::Header),
            HeaderAction::None => {}
            action => return Some(WindowHit::Control(action)),
        }
        if self.descriptor.resizable
            && !self.is_maximized()
            && let Some(edge) = resize_edge_at(rect, column, row)
        {
            return Some(WindowHit::Edge(edge));
        }
        Some(WindowHit::Body)
    }

    /// Where the window and its content land inside `area`, without
    /// painting anything.
    pub fn surface(&self, area: Rect, decorator: &dyn WindowDecorator) -> Option<WindowSurface> {
        let full = self.layout(area)?;
        let content = decorator.content_rect(full);
        Some(WindowSurface {
            full,
            content,
            inner: content.visible_in(full.visible_in(area)),
        })
    }

    /// Paint chrome and blank the content area. Returns where content
    /// should go, or `None` when the window is minimized.
    pub fn render(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        decorator: &dyn WindowDecorator,
        palette: &Palette,
        focused: bool,
    ) -> Option<WindowSurface> {
        let surface = self.surface(area, decorator)?;
        frame.fill(
            surface.full.visible_in(area),
            Style::default().bg(palette.body_bg),
        );
        decorator.render_window(
            frame,
            surface.full,
            &self.descriptor.display_title(),
            self.descriptor.controls,
            palette,
            focused,
        );
        Some(surface)
    }
}

/// Detects double-clicks on window headers.
#[derive(Debug, Clone)]
pub struct HeaderClickTracker<K> {
    last: Option<(K, Instant)>,
    interval: Duration,
}

impl<K: PartialEq> Default for HeaderClickTracker<K> {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_INTERVAL)
    }
}

impl<K: PartialEq> HeaderClickTracker<K> {
    pub fn new(interval: Duration) -> Self {
        Self {
            last: None,
            interval,
        }
    }

    /// Record a header click on `id` at `now`. Returns true when it
    /// completes a double-click; the pair is consumed so a third click
    /// starts over.
    pub fn register(&mut self, id: K, now: Instant) -> bool {
        if let Some((prev_id, prev)) = &self.last
            && *prev_id == id
            && now.saturating_duration_since(*prev) <= self.interval
        {
            self.last = None;
            return true;
        }
        self.last = Some((id, now));
        false
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
