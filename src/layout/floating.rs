//! Drag and resize collaborator.
//!
//! The window core never does pointer math itself. It hands a
//! [`RectManipulator`] the window's current rectangle plus constraints when
//! a gesture starts, feeds it pointer motion, and receives the final
//! geometry when the gesture ends. Tests swap in a scripted implementation
//! so focus and z-order behavior can be exercised without simulating real
//! pointer tracks.
//!
//! All coordinates handed to a manipulator are relative to the desktop
//! area, which is why pointer positions are signed: a drag can leave the
//! desktop to the left or above.

use ratatui::prelude::Rect;

use super::keep_visible;
use crate::window::{FloatRect, Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// What part of the window the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    Move,
    Resize(ResizeEdge),
}

/// Constraints supplied with every gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManipulatorProps {
    pub min_width: u16,
    pub min_height: u16,
    pub max_width: Option<u16>,
    pub max_height: Option<u16>,
    pub disable_dragging: bool,
    pub enable_resizing: bool,
    /// Desktop-relative area the window has to stay reachable in.
    pub bounds: Rect,
    pub visible_margin: u16,
}

impl ManipulatorProps {
    /// Whether this gesture kind is allowed at all.
    pub fn permits(&self, grab: Grab) -> bool {
        match grab {
            Grab::Move => !self.disable_dragging,
            Grab::Resize(_) => self.enable_resizing,
        }
    }
}

/// Final geometry reported when a gesture ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manipulation {
    DragStop(Position),
    ResizeStop { size: Size, position: Position },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManipulationEnd<K> {
    pub id: K,
    pub result: Manipulation,
}

/// Capability interface for the rectangle-manipulation collaborator.
pub trait RectManipulator<K> {
    /// Start a gesture on `id`. Returns false when the props forbid the
    /// requested grab; nothing is tracked in that case.
    fn begin(
        &mut self,
        id: K,
        grab: Grab,
        start: FloatRect,
        props: ManipulatorProps,
        pointer: Position,
    ) -> bool;

    fn on_move(&mut self, pointer: Position);

    /// Finish the active gesture, if any, and report the final geometry.
    fn on_end(&mut self, pointer: Position) -> Option<ManipulationEnd<K>>;

    /// Live geometry of the window being manipulated.
    fn preview(&self) -> Option<(&K, FloatRect)>;

    /// Abandon the active gesture without reporting anything.
    fn cancel(&mut self);

    fn is_active(&self) -> bool {
        self.preview().is_some()
    }
}

#[derive(Debug, Clone)]
struct Gesture<K> {
    id: K,
    grab: Grab,
    start: FloatRect,
    origin: Position,
    props: ManipulatorProps,
    current: FloatRect,
}

impl<K> Gesture<K> {
    fn track(&mut self, pointer: Position) {
        let dx = pointer.x.saturating_sub(self.origin.x);
        let dy = pointer.y.saturating_sub(self.origin.y);
        self.current = match self.grab {
            Grab::Move => keep_visible(
                FloatRect {
                    x: self.start.x.saturating_add(dx),
                    y: self.start.y.saturating_add(dy),
                    ..self.start
                },
                self.props.bounds,
                self.props.visible_margin,
            ),
            Grab::Resize(edge) => apply_resize(self.start, edge, dx, dy, &self.props),
        };
    }
}

/// Default collaborator driven by raw pointer positions.
#[derive(Debug, Clone)]
pub struct PointerManipulator<K> {
    gesture: Option<Gesture<K>>,
}

impl<K> Default for PointerManipulator<K> {
    fn default() -> Self {
        Self { gesture: None }
    }
}

impl<K> PointerManipulator<K> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Clone> RectManipulator<K> for PointerManipulator<K> {
    fn begin(
        &mut self,
        id: K,
        grab: Grab,
        start: FloatRect,
        props: ManipulatorProps,
        pointer: Position,
    ) -> bool {
        if !props.permits(grab) {
            return false;
        }
        self.gesture = Some(Gesture {
            id,
            grab,
            start,
            origin: pointer,
            props,
            current: start,
        });
        true
    }

    fn on_move(&mut self, pointer: Position) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.track(pointer);
        }
    }

    fn on_end(&mut self, pointer: Position) -> Option<ManipulationEnd<K>> {
        let mut gesture = self.gesture.take()?;
        gesture.track(pointer);
        let rect = gesture.current;
        let result = match gesture.grab {
            Grab::Move => Manipulation::DragStop(rect.position()),
            Grab::Resize(_) => Manipulation::ResizeStop {
                size: rect.size(),
                position: rect.position(),
            },
        };
        Some(ManipulationEnd {
            id: gesture.id,
            result,
        })
    }

    fn preview(&self) -> Option<(&K, FloatRect)> {
        self.gesture.as_ref().map(|g| (&g.id, g.current))
    }

    fn cancel(&mut self) {
        self.gesture = None;
    }
}

/// Resize `start` by dragging `edge` by (`dx`, `dy`) and clamp the result
/// to the min/max size in `props`. The edge opposite the grabbed one stays
/// anchored.
pub fn apply_resize(
    start: FloatRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    props: &ManipulatorProps,
) -> FloatRect {
    let mut x = start.x;
    let mut y = start.y;
    let mut width = i32::from(start.width);
    let mut height = i32::from(start.height);

    if edge.moves_left() {
        x = x.saturating_add(dx);
        width = width.saturating_sub(dx);
    } else if edge.moves_right() {
        width = width.saturating_add(dx);
    }
    if edge.moves_top() {
        y = y.saturating_add(dy);
        height = height.saturating_sub(dy);
    } else if edge.moves_bottom() {
        height = height.saturating_add(dy);
    }

    let min_w = i32::from(props.min_width.max(1));
    let min_h = i32::from(props.min_height.max(1));
    let max_w = props
        .max_width
        .map(i32::from)
        .unwrap_or(i32::from(u16::MAX))
        .max(min_w);
    let max_h = props
        .max_height
        .map(i32::from)
        .unwrap_or(i32::from(u16::MAX))
        .max(min_h);

    let clamped_w = width.clamp(min_w, max_w);
    if edge.moves_left() {
        x = x.saturating_sub(clamped_w.saturating_sub(width));
    }
    let clamped_h = height.clamp(min_h, max_h);
    if edge.moves_top() {
        y = y.saturating_sub(clamped_h.saturating_sub(height));
    }
    // Never let a top-edge resize push the header above the desktop.
    let top = i32::from(props.bounds.y);
    if edge.moves_top() && y < top {
        let overshoot = top.saturating_sub(y);
        y = top;
        height = clamped_h.saturating_sub(overshoot).max(min_h);
    } else {
        height = clamped_h;
    }

    FloatRect {
        x,
        y,
        width: clamped_w as u16,
        height: height as u16,
    }
}

/// Which resize edge, if any, sits under (`column`, `row`) on the border of
/// `rect`. The header row belongs to dragging except for its two border
/// cells.
pub fn resize_edge_at(rect: FloatRect, column: u16, row: u16) -> Option<ResizeEdge> {
    if rect.width < 2 || rect.height < 2 || !rect.contains(column, row) {
        return None;
    }
    let (column, row) = (i32::from(column), i32::from(row));
    let left = column == rect.x;
    let right = column == rect.right().saturating_sub(1);
    let top = row == rect.y;
    let bottom = row == rect.bottom().saturating_sub(1);
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        _ => None,
    }
}
