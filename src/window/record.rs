/// Window origin in desktop cells. Signed so a window can be dragged partly
/// past the left or top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Geometry supplied when a window is first registered. Either half may be
/// left unset; layout falls back to the descriptor or crate defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitialGeometry {
    pub position: Option<Position>,
    pub size: Option<Size>,
}

impl InitialGeometry {
    pub const fn new(position: Option<Position>, size: Option<Size>) -> Self {
        Self { position, size }
    }
}

/// Mutable UI state of one registered window.
///
/// `is_minimized` and `is_maximized` are independent: a maximized window
/// that gets minimized is still maximized once restored. Position and size
/// are kept while maximized so un-maximizing returns to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord<K> {
    pub id: K,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u64,
}

impl<K> WindowRecord<K> {
    pub(crate) fn new(id: K, initial: InitialGeometry, z_index: u64) -> Self {
        Self {
            id,
            position: initial.position,
            size: initial.size,
            is_minimized: false,
            is_maximized: false,
            z_index,
        }
    }

    /// Whether the window takes part in stacking and rendering.
    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}
