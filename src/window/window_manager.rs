use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::prelude::Rect;

use super::decorator::{DefaultDecorator, HeaderAction, WindowDecorator};
use super::view::{HeaderClickTracker, WindowHit, WindowSurface, WindowView};
use super::{Position, Size, WindowDescriptor, WindowKey, WindowStore};
use crate::config::{ManagerConfig, ReconcilePolicy};
use crate::layout::floating::{
    Grab, Manipulation, ManipulationEnd, PointerManipulator, RectManipulator,
};
use crate::theme::Palette;
use crate::ui::UiFrame;

/// One window scheduled for painting, bottom to top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDraw<K> {
    pub id: K,
    pub surface: WindowSurface,
    pub focused: bool,
    pub maximized: bool,
    pub z_index: u64,
}

/// What one reconciliation pass changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport<K> {
    /// Ids registered in the store for the first time.
    pub registered: Vec<K>,
    /// Ids purged because their descriptor went away.
    pub purged: Vec<K>,
    /// Ids beyond the window cap; neither registered nor rendered.
    pub dropped: Vec<K>,
}

impl<K> Default for ReconcileReport<K> {
    fn default() -> Self {
        Self {
            registered: Vec::new(),
            purged: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

type CloseCallback<K> = Box<dyn FnMut(&K)>;

/// Reconciles the host's declarative window list with the store it owns
/// and routes pointer input to window chrome.
///
/// The manager owns its [`WindowStore`], so several desktops can live in
/// one process without sharing state.
pub struct WindowManager<K: WindowKey + 'static> {
    store: WindowStore<K>,
    known: BTreeSet<K>,
    descriptors: Vec<WindowDescriptor<K>>,
    last_input: Option<Vec<WindowDescriptor<K>>>,
    config: ManagerConfig,
    decorator: Arc<dyn WindowDecorator>,
    manipulator: Box<dyn RectManipulator<K>>,
    header_clicks: HeaderClickTracker<K>,
    area: Rect,
    closed_windows: Vec<K>,
    on_window_close: Option<CloseCallback<K>>,
}

impl<K: WindowKey + 'static> Default for WindowManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: WindowKey + 'static> WindowManager<K> {
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    pub fn with_config(config: ManagerConfig) -> Self {
        Self {
            store: WindowStore::with_baseline(config.initial_z_index),
            known: BTreeSet::new(),
            descriptors: Vec::new(),
            last_input: None,
            header_clicks: HeaderClickTracker::new(config.double_click_interval),
            config,
            decorator: Arc::new(DefaultDecorator),
            manipulator: Box::new(PointerManipulator::new()),
            area: Rect::default(),
            closed_windows: Vec::new(),
            on_window_close: None,
        }
    }

    /// Replace the drag/resize collaborator.
    pub fn with_manipulator(mut self, manipulator: Box<dyn RectManipulator<K>>) -> Self {
        self.manipulator = manipulator;
        self
    }

    pub fn set_decorator(&mut self, decorator: Arc<dyn WindowDecorator>) {
        self.decorator = decorator;
    }

    pub fn decorator(&self) -> Arc<dyn WindowDecorator> {
        self.decorator.clone()
    }

    /// Called with the id of every window closed through its chrome or
    /// [`close_window`](Self::close_window).
    pub fn set_on_window_close<F>(&mut self, callback: F)
    where
        F: FnMut(&K) + 'static,
    {
        self.on_window_close = Some(Box::new(callback));
    }

    /// Drain the ids of windows closed since the last call.
    pub fn take_closed_windows(&mut self) -> Vec<K> {
        std::mem::take(&mut self.closed_windows)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &WindowStore<K> {
        &self.store
    }

    /// Direct access for geometry and flag changes. Windows removed here
    /// stop rendering and are registered again on the next reconciliation;
    /// use [`close_window`](Self::close_window) to close one.
    pub fn store_mut(&mut self) -> &mut WindowStore<K> {
        &mut self.store
    }

    /// Descriptors that survived the cap, in input order.
    pub fn descriptors(&self) -> &[WindowDescriptor<K>] {
        &self.descriptors
    }

    pub fn descriptor(&self, id: &K) -> Option<&WindowDescriptor<K>> {
        self.descriptors.iter().find(|d| d.id == *id)
    }

    pub fn is_known(&self, id: &K) -> bool {
        self.known.contains(id)
    }

    /// Desktop area used by the last draw plan.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Reconcile against `windows` if it differs from the previous list.
    pub fn set_windows(&mut self, windows: Vec<WindowDescriptor<K>>) -> Option<ReconcileReport<K>> {
        if self.last_input.as_ref() == Some(&windows) {
            return None;
        }
        Some(self.reconcile(windows))
    }

    /// Converge the store on `windows`.
    ///
    /// The list is cut to `max_windows` first; the rest is dropped without
    /// being registered. Every surviving id not seen before is registered
    /// with its default geometry. Ids already known are left untouched so
    /// user adjustments survive; a known id whose record went missing is
    /// registered again.
    pub fn reconcile(&mut self, windows: Vec<WindowDescriptor<K>>) -> ReconcileReport<K> {
        let mut report = ReconcileReport::default();
        self.last_input = Some(windows.clone());

        let mut windows = windows;
        if windows.len() > self.config.max_windows {
            let overflow = windows.split_off(self.config.max_windows);
            report.dropped = overflow.into_iter().map(|d| d.id).collect();
            tracing::warn!(
                max_windows = self.config.max_windows,
                dropped = report.dropped.len(),
                "window cap reached, dropping descriptors"
            );
        }

        let mut seen = BTreeSet::new();
        let mut kept = Vec::with_capacity(windows.len());
        for descriptor in windows {
            if !seen.insert(descriptor.id.clone()) {
                tracing::warn!(window_id = ?descriptor.id, "duplicate window descriptor ignored");
                continue;
            }
            kept.push(descriptor);
        }

        for descriptor in &kept {
            if self.known.contains(&descriptor.id) && self.store.contains(&descriptor.id) {
                continue;
            }
            self.store
                .add_window(descriptor.id.clone(), descriptor.initial_geometry());
            self.known.insert(descriptor.id.clone());
            report.registered.push(descriptor.id.clone());
        }

        if self.config.reconcile_policy == ReconcilePolicy::AutoPurge {
            let stale: Vec<K> = self
                .known
                .iter()
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
            for id in stale {
                self.forget(&id);
                tracing::debug!(window_id = ?id, "purged window without descriptor");
                report.purged.push(id);
            }
        }

        self.descriptors = kept;
        tracing::debug!(
            registered = report.registered.len(),
            purged = report.purged.len(),
            dropped = report.dropped.len(),
            rendered = self.descriptors.len(),
            "reconciled windows"
        );
        report
    }

    fn forget(&mut self, id: &K) -> bool {
        let removed = self.store.remove_window(id).is_some();
        let was_known = self.known.remove(id);
        if self.manipulator.preview().is_some_and(|(active, _)| active == id) {
            self.manipulator.cancel();
        }
        removed || was_known
    }

    pub fn focus_window(&mut self, id: &K) -> bool {
        self.store.focus_window(id)
    }

    pub fn minimize_window(&mut self, id: &K) -> bool {
        if self.manipulator.preview().is_some_and(|(active, _)| active == id) {
            self.manipulator.cancel();
        }
        let applied = self.store.set_minimized(id, true);
        if applied {
            tracing::debug!(window_id = ?id, "minimized window");
        }
        applied
    }

    /// Un-minimize `id` and bring it to the front.
    pub fn restore_window(&mut self, id: &K) -> bool {
        if !self.store.set_minimized(id, false) {
            return false;
        }
        tracing::debug!(window_id = ?id, "restored window");
        self.store.focus_window(id)
    }

    pub fn toggle_maximize(&mut self, id: &K) -> Option<bool> {
        let maximized = self.store.toggle_maximized(id)?;
        tracing::debug!(window_id = ?id, maximized, "toggled maximize");
        Some(maximized)
    }

    /// Close `id`: purge it, stop rendering it, and tell the host. Unknown
    /// ids are ignored and nobody is notified.
    ///
    /// A host that keeps listing the id does not get the window back until
    /// its list changes.
    pub fn close_window(&mut self, id: &K) -> bool {
        if !self.forget(id) {
            return false;
        }
        self.descriptors.retain(|d| d.id != *id);
        tracing::debug!(window_id = ?id, "closed window");
        self.closed_windows.push(id.clone());
        if let Some(callback) = self.on_window_close.as_mut() {
            callback(id);
        }
        true
    }

    /// The focused window: the rendered, non-minimized window with the
    /// highest z-index.
    pub fn focused_window(&self) -> Option<K> {
        self.descriptors
            .iter()
            .filter_map(|d| self.store.window(&d.id))
            .filter(|r| r.is_visible())
            .max_by_key(|r| r.z_index)
            .map(|r| r.id.clone())
    }

    /// Rendered windows from bottom to top. Minimized ones, and descriptors
    /// without a store record, are skipped.
    pub fn draw_order(&self) -> Vec<K> {
        let mut order: Vec<(u64, &K)> = self
            .descriptors
            .iter()
            .filter_map(|d| {
                let record = self.store.window(&d.id)?;
                record.is_visible().then_some((record.z_index, &d.id))
            })
            .collect();
        order.sort_by_key(|(z, _)| *z);
        order.into_iter().map(|(_, id)| id.clone()).collect()
    }

    /// Move focus to the next (or previous) visible window in descriptor
    /// order.
    pub fn focus_next(&mut self, forward: bool) -> Option<K> {
        let ring: Vec<K> = self
            .descriptors
            .iter()
            .filter(|d| self.store.window(&d.id).is_some_and(|r| r.is_visible()))
            .map(|d| d.id.clone())
            .collect();
        if ring.is_empty() {
            return None;
        }
        let len = ring.len() as isize;
        let next = match self
            .focused_window()
            .and_then(|current| ring.iter().position(|id| *id == current))
        {
            Some(idx) => {
                let step = if forward { 1 } else { -1 };
                (idx as isize + step).rem_euclid(len) as usize
            }
            None if forward => 0,
            None => ring.len() - 1,
        };
        let id = ring[next].clone();
        self.store.focus_window(&id);
        Some(id)
    }

    fn view_for<'a>(&'a self, descriptor: &'a WindowDescriptor<K>) -> WindowView<'a, K> {
        let preview = self
            .manipulator
            .preview()
            .filter(|(active, _)| **active == descriptor.id)
            .map(|(_, rect)| rect);
        WindowView::new(descriptor, self.store.window(&descriptor.id))
            .with_fallback(self.config.default_position, self.config.default_size)
            .with_preview(preview)
    }

    fn palette_for(&self, descriptor: &WindowDescriptor<K>) -> Palette {
        descriptor
            .theme
            .as_ref()
            .unwrap_or(&self.config.theme)
            .palette()
    }

    /// Lay out every visible window inside `area` and remember `area` for
    /// pointer hit-testing.
    pub fn window_draw_plan(&mut self, area: Rect) -> Vec<WindowDraw<K>> {
        self.area = area;
        let focused = self.focused_window();
        let mut plan = Vec::new();
        for id in self.draw_order() {
            let Some(descriptor) = self.descriptor(&id) else {
                continue;
            };
            let view = self.view_for(descriptor);
            let Some(surface) = view.surface(area, self.decorator.as_ref()) else {
                continue;
            };
            plan.push(WindowDraw {
                focused: focused.as_ref() == Some(&id),
                maximized: view.is_maximized(),
                z_index: view.z_index(),
                surface,
                id,
            });
        }
        plan
    }

    /// Paint the chrome of one planned window.
    pub fn render_window(&self, frame: &mut UiFrame<'_>, draw: &WindowDraw<K>) {
        let Some(descriptor) = self.descriptor(&draw.id) else {
            return;
        };
        let palette = self.palette_for(descriptor);
        self.view_for(descriptor).render(
            frame,
            self.area,
            self.decorator.as_ref(),
            &palette,
            draw.focused,
        );
    }

    /// Plan and paint all windows, handing each content area to `content`
    /// right after its chrome so higher windows cover lower content.
    pub fn render<F>(&mut self, frame: &mut UiFrame<'_>, area: Rect, mut content: F)
    where
        F: FnMut(&mut UiFrame<'_>, &WindowDraw<K>),
    {
        for draw in self.window_draw_plan(area) {
            self.render_window(frame, &draw);
            content(frame, &draw);
        }
    }

    /// Topmost visible window under (`column`, `row`).
    pub fn window_at(&self, column: u16, row: u16) -> Option<K> {
        self.draw_order().into_iter().rev().find(|id| {
            self.descriptor(id)
                .and_then(|d| self.view_for(d).layout(self.area))
                .is_some_and(|rect| rect.contains(column, row))
        })
    }

    pub fn gesture_active(&self) -> bool {
        self.manipulator.is_active()
    }

    fn relative(&self, column: u16, row: u16) -> Position {
        Position::new(
            i32::from(column) - i32::from(self.area.x),
            i32::from(row) - i32::from(self.area.y),
        )
    }

    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.handle_event_at(event, Instant::now())
    }

    /// Route a pointer event. Returns true when window chrome consumed it;
    /// plain body clicks still focus but report false so content can react.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(mouse.column, mouse.row, now),
            MouseEventKind::Drag(MouseButton::Left) if self.manipulator.is_active() => {
                let pointer = self.relative(mouse.column, mouse.row);
                self.manipulator.on_move(pointer);
                true
            }
            MouseEventKind::Up(MouseButton::Left) if self.manipulator.is_active() => {
                let pointer = self.relative(mouse.column, mouse.row);
                let end = self.manipulator.on_end(pointer);
                self.apply_manipulation(end);
                true
            }
            _ => false,
        }
    }

    fn handle_press(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let Some(id) = self.window_at(column, row) else {
            return false;
        };
        self.store.focus_window(&id);
        let hit = self
            .descriptor(&id)
            .and_then(|d| self.view_for(d).hit_test(self.decorator.as_ref(), self.area, column, row));
        match hit {
            Some(WindowHit::Control(action)) => {
                self.header_clicks.reset();
                match action {
                    HeaderAction::Minimize => {
                        self.minimize_window(&id);
                    }
                    HeaderAction::Maximize => {
                        self.toggle_maximize(&id);
                    }
                    HeaderAction::Close => {
                        self.close_window(&id);
                    }
                    HeaderAction::Drag | HeaderAction::None => {}
                }
                true
            }
            Some(WindowHit::Header) => {
                if self.header_clicks.register(id.clone(), now) {
                    self.toggle_maximize(&id);
                } else {
                    self.begin_gesture(&id, Grab::Move, column, row);
                }
                true
            }
            Some(WindowHit::Edge(edge)) => {
                self.header_clicks.reset();
                self.begin_gesture(&id, Grab::Resize(edge), column, row);
                true
            }
            Some(WindowHit::Body) | None => {
                self.header_clicks.reset();
                false
            }
        }
    }

    fn begin_gesture(&mut self, id: &K, grab: Grab, column: u16, row: u16) -> bool {
        let Some(descriptor) = self.descriptor(id) else {
            return false;
        };
        let view = self.view_for(descriptor);
        let bounds = Rect::new(0, 0, self.area.width, self.area.height);
        let start = view.geometry();
        let props = view.manipulator_props(bounds, self.config.visible_margin);
        let pointer = self.relative(column, row);
        self.manipulator
            .begin(id.clone(), grab, start, props, pointer)
    }

    fn apply_manipulation(&mut self, end: Option<ManipulationEnd<K>>) {
        let Some(ManipulationEnd { id, result }) = end else {
            return;
        };
        if !self.config.persist_geometry {
            return;
        }
        match result {
            Manipulation::DragStop(position) => {
                self.store.set_position(&id, position);
                tracing::debug!(window_id = ?id, x = position.x, y = position.y, "drag committed");
            }
            Manipulation::ResizeStop { size, position } => {
                self.store.set_size(&id, size);
                self.store.set_position(&id, position);
                tracing::debug!(
                    window_id = ?id,
                    width = size.width,
                    height = size.height,
                    "resize committed"
                );
            }
        }
    }

    /// Store geometry directly, as a host would after its own gesture.
    pub fn set_window_geometry(&mut self, id: &K, position: Position, size: Size) -> bool {
        self.store.set_position(id, position) && self.store.set_size(id, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::floating::ManipulatorProps;
    use crate::window::FloatRect;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::time::Duration;

    /// Collaborator that ends every gesture with a pre-recorded result.
    #[derive(Default)]
    struct ScriptedManipulator {
        active: Option<(&'static str, FloatRect)>,
        script: VecDeque<Manipulation>,
        begun: Rc<RefCell<Vec<(&'static str, Grab)>>>,
    }

    impl RectManipulator<&'static str> for ScriptedManipulator {
        fn begin(
            &mut self,
            id: &'static str,
            grab: Grab,
            start: FloatRect,
            props: ManipulatorProps,
            _pointer: Position,
        ) -> bool {
            if !props.permits(grab) {
                return false;
            }
            self.begun.borrow_mut().push((id, grab));
            self.active = Some((id, start));
            true
        }

        fn on_move(&mut self, _pointer: Position) {}

        fn on_end(&mut self, _pointer: Position) -> Option<ManipulationEnd<&'static str>> {
            let (id, _) = self.active.take()?;
            let result = self.script.pop_front()?;
            Some(ManipulationEnd { id, result })
        }

        fn preview(&self) -> Option<(&&'static str, FloatRect)> {
            self.active.as_ref().map(|(id, rect)| (id, *rect))
        }

        fn cancel(&mut self) {
            self.active = None;
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn desc(id: &'static str, x: i32, y: i32) -> WindowDescriptor<&'static str> {
        WindowDescriptor::new(id, id.to_uppercase())
            .with_default_position(Position::new(x, y))
            .with_default_size(Size::new(20, 8))
    }

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn manager_with(ids: &[(&'static str, i32, i32)]) -> WindowManager<&'static str> {
        let mut wm = WindowManager::new();
        wm.set_windows(ids.iter().map(|(id, x, y)| desc(id, *x, *y)).collect());
        wm.window_draw_plan(area());
        wm
    }

    #[test]
    fn reconcile_registers_each_new_id_once() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 30, 0)]);
        let report = wm
            .set_windows(vec![desc("a", 0, 0), desc("b", 30, 0), desc("c", 50, 0)])
            .expect("list changed");
        assert_eq!(report.registered, vec!["c"]);
        assert_eq!(wm.store().len(), 3);
        assert!(wm.is_known(&"c"));
    }

    #[test]
    fn unchanged_list_skips_reconciliation() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        assert!(wm.set_windows(vec![desc("a", 0, 0)]).is_none());
    }

    #[test]
    fn re_registration_keeps_user_geometry() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        wm.store_mut().set_position(&"a", Position::new(9, 9));
        // descriptor default changes, record must not
        wm.set_windows(vec![desc("a", 1, 1)]);
        assert_eq!(
            wm.store().get_window(&"a").unwrap().position,
            Some(Position::new(9, 9))
        );
    }

    #[test]
    fn cap_truncates_and_registers_nothing_beyond_it() {
        let mut wm = WindowManager::with_config(ManagerConfig::default().with_max_windows(5));
        let ids: Vec<&'static str> = vec![
            "w0", "w1", "w2", "w3", "w4", "w5", "w6", "w7", "w8", "w9", "w10", "w11", "w12",
            "w13", "w14",
        ];
        let report = wm.reconcile(ids.iter().map(|id| desc(id, 0, 0)).collect());
        assert_eq!(report.registered, ids[..5].to_vec());
        assert_eq!(report.dropped, ids[5..].to_vec());
        assert_eq!(wm.store().len(), 5);
        let rendered: Vec<_> = wm.window_draw_plan(area()).into_iter().map(|d| d.id).collect();
        assert_eq!(rendered, ids[..5].to_vec());
        for id in &ids[5..] {
            assert!(wm.store().get_window(id).is_none());
        }
    }

    #[test]
    fn duplicate_descriptor_ids_keep_the_first() {
        let mut wm = WindowManager::new();
        let report = wm.reconcile(vec![desc("a", 1, 1), desc("a", 5, 5)]);
        assert_eq!(report.registered, vec!["a"]);
        assert_eq!(wm.descriptors().len(), 1);
        assert_eq!(
            wm.descriptor(&"a").unwrap().default_position,
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn auto_purge_removes_vanished_descriptors() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 30, 0)]);
        let report = wm.set_windows(vec![desc("a", 0, 0)]).unwrap();
        assert_eq!(report.purged, vec!["b"]);
        assert!(wm.store().get_window(&"b").is_none());
        assert!(!wm.is_known(&"b"));
        // purge is not a close
        assert!(wm.take_closed_windows().is_empty());
    }

    #[test]
    fn retain_policy_keeps_vanished_records() {
        let config = ManagerConfig::default().with_reconcile_policy(ReconcilePolicy::Retain);
        let mut wm = WindowManager::with_config(config);
        wm.set_windows(vec![desc("a", 0, 0), desc("b", 30, 0)]);
        let report = wm.set_windows(vec![desc("a", 0, 0)]).unwrap();
        assert!(report.purged.is_empty());
        assert!(wm.store().get_window(&"b").is_some());
        assert_eq!(wm.draw_order(), vec!["a"]);
    }

    #[test]
    fn close_relays_exactly_once() {
        let mut wm = manager_with(&[("x", 0, 0), ("y", 30, 0)]);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        wm.set_on_window_close(move |id| sink.borrow_mut().push(*id));

        assert!(wm.close_window(&"x"));
        assert!(!wm.close_window(&"x"));
        assert_eq!(*calls.borrow(), vec!["x"]);
        assert!(wm.store().get_window(&"x").is_none());
        assert!(!wm.is_known(&"x"));
        assert_eq!(wm.take_closed_windows(), vec!["x"]);
        assert!(wm.take_closed_windows().is_empty());
    }

    #[test]
    fn stale_operations_do_not_panic() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        let before = wm.store().clone();
        assert!(!wm.focus_window(&"ghost"));
        assert!(!wm.minimize_window(&"ghost"));
        assert!(!wm.restore_window(&"ghost"));
        assert_eq!(wm.toggle_maximize(&"ghost"), None);
        assert!(!wm.close_window(&"ghost"));
        assert!(!wm.set_window_geometry(&"ghost", Position::new(1, 1), Size::new(9, 9)));
        assert_eq!(wm.store(), &before);
    }

    #[test]
    fn body_click_focuses_topmost_window() {
        // b overlaps a and is on top after registration
        let mut wm = manager_with(&[("a", 0, 0), ("b", 5, 3)]);
        assert_eq!(wm.focused_window(), Some("b"));
        // inside a only
        assert!(!wm.handle_event(&press(2, 4)));
        assert_eq!(wm.focused_window(), Some("a"));
        // overlap region belongs to a now that it is on top
        wm.handle_event(&press(8, 6));
        assert_eq!(wm.focused_window(), Some("a"));
        // part of b that a does not cover
        wm.handle_event(&press(22, 9));
        assert_eq!(wm.focused_window(), Some("b"));
        let za = wm.store().get_window(&"a").unwrap().z_index;
        let zb = wm.store().get_window(&"b").unwrap().z_index;
        assert!(zb > za);
    }

    #[test]
    fn click_on_empty_desktop_is_ignored() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        let before = wm.store().clone();
        assert!(!wm.handle_event(&press(70, 20)));
        assert_eq!(wm.store(), &before);
    }

    #[test]
    fn minimize_control_hides_window_and_moves_focus() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 30, 0)]);
        // b spans x 30..50; minimize control sits at 40..43 on row 1
        assert!(wm.handle_event(&press(42, 1)));
        assert!(wm.store().get_window(&"b").unwrap().is_minimized);
        assert_eq!(wm.draw_order(), vec!["a"]);
        assert_eq!(wm.focused_window(), Some("a"));
        let rendered: Vec<_> = wm.window_draw_plan(area()).into_iter().map(|d| d.id).collect();
        assert_eq!(rendered, vec!["a"]);

        assert!(wm.restore_window(&"b"));
        assert_eq!(wm.focused_window(), Some("b"));
    }

    #[test]
    fn close_control_removes_and_notifies() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        wm.set_on_window_close(move |_| *c.borrow_mut() += 1);
        // close button at x 16..19 on the header row
        assert!(wm.handle_event(&press(17, 1)));
        assert_eq!(*count.borrow(), 1);
        assert!(wm.store().is_empty());
    }

    #[test]
    fn maximize_ignores_geometry_and_restores_it() {
        let mut wm = manager_with(&[("a", 3, 2)]);
        wm.set_window_geometry(&"a", Position::new(6, 4), Size::new(25, 10));
        assert_eq!(wm.toggle_maximize(&"a"), Some(true));
        let plan = wm.window_draw_plan(area());
        assert_eq!(plan[0].surface.full, FloatRect::from(area()));
        assert!(plan[0].maximized);

        assert_eq!(wm.toggle_maximize(&"a"), Some(false));
        let plan = wm.window_draw_plan(area());
        assert_eq!(
            plan[0].surface.full,
            FloatRect {
                x: 6,
                y: 4,
                width: 25,
                height: 10
            }
        );
    }

    #[test]
    fn double_click_on_header_toggles_maximize() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        let t0 = Instant::now();
        let down = press(4, 1);
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 4, 1);
        wm.handle_event_at(&down, t0);
        wm.handle_event_at(&up, t0);
        wm.handle_event_at(&down, t0 + Duration::from_millis(100));
        assert!(wm.store().get_window(&"a").unwrap().is_maximized);
        assert!(!wm.gesture_active());
    }

    #[test]
    fn scripted_drag_persists_position() {
        let script = ScriptedManipulator {
            script: VecDeque::from([Manipulation::DragStop(Position::new(12, 7))]),
            ..Default::default()
        };
        let begun = script.begun.clone();
        let mut wm = WindowManager::new().with_manipulator(Box::new(script));
        wm.set_windows(vec![desc("a", 0, 0), desc("b", 30, 0)]);
        wm.window_draw_plan(area());

        // header of a, which is below b
        assert!(wm.handle_event(&press(3, 1)));
        assert_eq!(wm.focused_window(), Some("a"));
        assert!(wm.gesture_active());
        assert!(wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 10, 5)));
        assert!(wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 5)));
        assert_eq!(*begun.borrow(), vec![("a", Grab::Move)]);
        assert_eq!(
            wm.store().get_window(&"a").unwrap().position,
            Some(Position::new(12, 7))
        );
    }

    #[test]
    fn scripted_resize_persists_size_and_position() {
        let script = ScriptedManipulator {
            script: VecDeque::from([Manipulation::ResizeStop {
                size: Size::new(30, 12),
                position: Position::new(1, 1),
            }]),
            ..Default::default()
        };
        let mut wm = WindowManager::new().with_manipulator(Box::new(script));
        wm.set_windows(vec![desc("a", 0, 0)]);
        wm.window_draw_plan(area());
        // bottom-right corner of a (20x8 at origin)
        assert!(wm.handle_event(&press(19, 7)));
        wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 29, 11));
        let rec = wm.store().get_window(&"a").unwrap();
        assert_eq!(rec.size, Some(Size::new(30, 12)));
        assert_eq!(rec.position, Some(Position::new(1, 1)));
    }

    #[test]
    fn gestures_never_start_on_maximized_windows() {
        let script = ScriptedManipulator::default();
        let begun = script.begun.clone();
        let mut wm = WindowManager::new().with_manipulator(Box::new(script));
        wm.set_windows(vec![desc("a", 0, 0)]);
        wm.toggle_maximize(&"a");
        wm.window_draw_plan(area());
        wm.handle_event(&press(5, 1));
        wm.handle_event(&press(79, 23));
        assert!(begun.borrow().is_empty());
        assert!(!wm.gesture_active());
    }

    #[test]
    fn non_draggable_window_refuses_drag() {
        let script = ScriptedManipulator::default();
        let begun = script.begun.clone();
        let mut wm = WindowManager::new().with_manipulator(Box::new(script));
        wm.set_windows(vec![desc("a", 0, 0).with_draggable(false)]);
        wm.window_draw_plan(area());
        assert!(wm.handle_event(&press(5, 1)));
        assert!(begun.borrow().is_empty());
    }

    #[test]
    fn persistence_can_be_switched_off() {
        let script = ScriptedManipulator {
            script: VecDeque::from([Manipulation::DragStop(Position::new(12, 7))]),
            ..Default::default()
        };
        let config = ManagerConfig::default().with_persist_geometry(false);
        let mut wm = WindowManager::with_config(config).with_manipulator(Box::new(script));
        wm.set_windows(vec![desc("a", 0, 0)]);
        wm.window_draw_plan(area());
        wm.handle_event(&press(3, 1));
        wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 9, 9));
        assert_eq!(
            wm.store().get_window(&"a").unwrap().position,
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn live_drag_preview_moves_window_with_pointer() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        wm.handle_event(&press(3, 1));
        wm.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 8, 4));
        let plan = wm.window_draw_plan(area());
        assert_eq!((plan[0].surface.full.x, plan[0].surface.full.y), (5, 3));
        // store untouched until the gesture ends
        assert_eq!(
            wm.store().get_window(&"a").unwrap().position,
            Some(Position::new(0, 0))
        );
        wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 8, 4));
        assert_eq!(
            wm.store().get_window(&"a").unwrap().position,
            Some(Position::new(5, 3))
        );
    }

    #[test]
    fn closing_mid_drag_cancels_the_gesture() {
        let mut wm = manager_with(&[("a", 0, 0)]);
        wm.handle_event(&press(3, 1));
        assert!(wm.gesture_active());
        wm.close_window(&"a");
        assert!(!wm.gesture_active());
        assert!(!wm.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 8, 4)));
    }

    #[test]
    fn tab_order_cycles_visible_windows() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 30, 0), ("c", 50, 0)]);
        wm.minimize_window(&"b");
        // c is on top
        assert_eq!(wm.focus_next(true), Some("a"));
        assert_eq!(wm.focus_next(true), Some("c"));
        assert_eq!(wm.focus_next(false), Some("a"));
    }

    #[test]
    fn missing_default_position_uses_config_fallback() {
        let mut wm = WindowManager::new();
        wm.set_windows(vec![WindowDescriptor::new("plain", "Plain")]);
        let plan = wm.window_draw_plan(area());
        let full = plan[0].surface.full;
        assert_eq!(full.position(), wm.config().default_position);
        assert_eq!(full.size(), wm.config().default_size);
    }

    #[test]
    fn chrome_close_stops_rendering_the_window() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 30, 0)]);
        wm.focus_window(&"a");
        // a's close control sits at 16..19 on its header row
        assert!(wm.handle_event(&press(17, 1)));
        assert_eq!(wm.take_closed_windows(), vec!["a"]);

        let ids: Vec<_> = wm.window_draw_plan(area()).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(wm.descriptor(&"a").is_none());
        assert_eq!(wm.window_at(17, 1), None);
        assert!(!wm.handle_event(&press(17, 1)));
        assert!(wm.take_closed_windows().is_empty());

        // the host has not caught up yet and still lists a
        assert!(wm.set_windows(vec![desc("a", 0, 0), desc("b", 30, 0)]).is_none());
        assert_eq!(wm.draw_order(), vec!["b"]);
    }

    #[test]
    fn record_removed_behind_the_managers_back_is_not_drawn() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 30, 0)]);
        wm.store_mut().remove_window(&"a");
        assert_eq!(wm.draw_order(), vec!["b"]);
        assert_eq!(wm.window_at(5, 5), None);

        let report = wm.reconcile(vec![desc("a", 0, 0), desc("b", 30, 0)]);
        assert_eq!(report.registered, vec!["a"]);
        assert!(wm.store().contains(&"a"));
        assert_eq!(wm.draw_order(), vec!["b", "a"]);
    }

    #[test]
    fn windows_near_the_coordinate_limit_are_handled_off_screen() {
        let far = i32::MAX - 5;
        let mut wm = manager_with(&[("far", far, far), ("a", 0, 0)]);
        let plan = wm.window_draw_plan(area());
        assert_eq!(plan.len(), 2);
        let far_draw = plan.iter().find(|d| d.id == "far").unwrap();
        assert_eq!(far_draw.surface.inner, Rect::default());
        assert_eq!(far_draw.surface.full.right(), i32::MAX);

        let mut buf = Buffer::empty(area());
        let mut ui = UiFrame::from_parts(area(), &mut buf);
        wm.render(&mut ui, area(), |_, _| {});
        assert_eq!(wm.window_at(u16::MAX, u16::MAX), None);
        assert!(!wm.handle_event(&press(70, 20)));
        assert_eq!(wm.focused_window(), Some("a"));
    }

    #[test]
    fn render_paints_bottom_to_top() {
        let mut wm = manager_with(&[("a", 0, 0), ("b", 5, 3)]);
        let mut buf = Buffer::empty(area());
        let mut ui = UiFrame::from_parts(area(), &mut buf);
        let mut painted = Vec::new();
        wm.render(&mut ui, area(), |_, draw| painted.push((draw.id, draw.focused)));
        assert_eq!(painted, vec![("a", false), ("b", true)]);
        // b's top-left corner covers a's body
        assert_eq!(buf.cell((5, 3)).unwrap().symbol(), "┌");
    }
}
