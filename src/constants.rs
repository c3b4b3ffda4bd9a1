//! Shared crate-wide constants.

use std::time::Duration;

use crate::window::{Position, Size};

/// First z-index handed out by a fresh store.
///
/// Every creation or focus event takes the current counter value and bumps
/// it, so values below this baseline are never produced.
pub const INITIAL_Z_INDEX: u64 = 1000;

/// Hard cap on simultaneously rendered windows. Descriptors past the cap are
/// dropped, not queued.
pub const DEFAULT_MAX_WINDOWS: usize = 10;

/// Origin used when a descriptor supplies no default position.
///
/// Units: terminal cells, relative to the desktop area.
pub const DEFAULT_WINDOW_POSITION: Position = Position { x: 4, y: 2 };

/// Size used when a descriptor supplies no default size.
pub const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 48,
    height: 14,
};

/// Smallest width a window can be resized to when its descriptor does not
/// say otherwise. Wide enough for the border and all three header controls.
pub const DEFAULT_MIN_WIDTH: u16 = 14;

/// Smallest height: top border, header, one content row, bottom border.
pub const DEFAULT_MIN_HEIGHT: u16 = 4;

/// Minimum number of visible cells a dragged window must keep within the
/// desktop so the user can grab its chrome again.
pub const MIN_VISIBLE_MARGIN: u16 = 4;

/// Two header clicks on the same window closer than this toggle maximize.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Height of the dock strip in rows.
pub const DOCK_HEIGHT: u16 = 1;
