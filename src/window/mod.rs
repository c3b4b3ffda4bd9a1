pub mod decorator;
pub mod record;
pub mod store;
pub mod view;

mod window_manager;

use ratatui::prelude::Rect;

use crate::constants::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::theme::Theme;

pub use record::{InitialGeometry, Position, Size, WindowRecord};
pub use store::WindowStore;
pub use view::{HeaderClickTracker, WindowHit, WindowView};
pub use window_manager::{ReconcileReport, WindowDraw, WindowManager};

/// Bounds every window identifier must satisfy. Ids are chosen by the
/// caller; the store never generates them.
pub trait WindowKey: Clone + Ord + std::fmt::Debug {}

impl<T: Clone + Ord + std::fmt::Debug> WindowKey for T {}

/// Signed floating rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloatRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl FloatRect {
    pub fn from_parts(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Translate a desktop-relative rect into absolute buffer coordinates.
    pub fn offset_by(self, area: Rect) -> Self {
        Self {
            x: self.x.saturating_add(i32::from(area.x)),
            y: self.y.saturating_add(i32::from(area.y)),
            ..self
        }
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(i32::from(self.width))
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(i32::from(self.height))
    }

    /// The part of this rect that lies inside `bounds`.
    pub fn visible_in(self, bounds: Rect) -> Rect {
        let left = self.x.max(i32::from(bounds.x));
        let top = self.y.max(i32::from(bounds.y));
        let right = self
            .right()
            .min(i32::from(bounds.x) + i32::from(bounds.width));
        let bottom = self
            .bottom()
            .min(i32::from(bounds.y) + i32::from(bounds.height));
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (column, row) = (i32::from(column), i32::from(row));
        column >= self.x
            && row >= self.y
            && column < self.right()
            && row < self.bottom()
    }
}

impl From<Rect> for FloatRect {
    fn from(rect: Rect) -> Self {
        Self {
            x: i32::from(rect.x),
            y: i32::from(rect.y),
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Which header controls a window shows. A control that is switched off
/// is not drawn and cannot be clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowControls {
    pub minimize: bool,
    pub maximize: bool,
    pub close: bool,
}

impl Default for WindowControls {
    fn default() -> Self {
        Self::all()
    }
}

impl WindowControls {
    pub const fn all() -> Self {
        Self {
            minimize: true,
            maximize: true,
            close: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            minimize: false,
            maximize: false,
            close: false,
        }
    }
}

/// Declarative description of a window the host wants open.
///
/// The host owns the content; the manager only needs enough to register
/// the window and draw its chrome.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor<K> {
    pub id: K,
    pub title: String,
    pub icon: Option<String>,
    pub default_position: Option<Position>,
    pub default_size: Option<Size>,
    pub min_width: Option<u16>,
    pub min_height: Option<u16>,
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
    pub resizable: bool,
    pub draggable: bool,
    pub controls: WindowControls,
    pub theme: Option<Theme>,
}

impl<K> WindowDescriptor<K> {
    pub fn new(id: K, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            icon: None,
            default_position: None,
            default_size: None,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            resizable: true,
            draggable: true,
            controls: WindowControls::all(),
            theme: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_default_position(mut self, position: Position) -> Self {
        self.default_position = Some(position);
        self
    }

    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = Some(size);
        self
    }

    pub fn with_min_size(mut self, width: u16, height: u16) -> Self {
        self.min_width = Some(width);
        self.min_height = Some(height);
        self
    }

    pub fn with_max_size(mut self, width: u16, height: u16) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn with_controls(mut self, controls: WindowControls) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn initial_geometry(&self) -> InitialGeometry {
        InitialGeometry::new(self.default_position, self.default_size)
    }

    pub fn min_size(&self) -> Size {
        Size::new(
            self.min_width.unwrap_or(DEFAULT_MIN_WIDTH),
            self.min_height.unwrap_or(DEFAULT_MIN_HEIGHT),
        )
    }

    /// Title with the icon prefixed, as shown in the header and the dock.
    pub fn display_title(&self) -> String {
        match &self.icon {
            Some(icon) if !icon.is_empty() => format!("{icon} {}", self.title),
            _ => self.title.clone(),
        }
    }
}
