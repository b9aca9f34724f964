//! Drag-to-reorder on top of [`WheelSelector`].
//!
//! While an item is dragged the wheel has one extra sector reserved for it. Every
//! pointer sample rebuilds the previewed order from the snapshot taken when the
//! drag started, so the preview never accumulates state between samples.

use crate::config::{ActivationPolicy, ConfigError};
use crate::geometry::{Point, Radii, Rect};
use crate::input::{Button, EventKind, HandlerTable, InputEvent};
use crate::item::SelectorItem;
use crate::selector::{Selection, SelectorError, WheelSelector, resolve_selection};
use crate::surface::{Frame, Surface};

struct Drag {
    item: SelectorItem,
    /// Items without the dragged one, in their pre-drag order.
    base: Vec<SelectorItem>,
    from: usize,
}

/// Order previewed for a drag: `base` with `dragged` inserted at `index`, or `base`
/// unchanged when there is no insertion point.
pub fn candidate_sequence(
    base: &[SelectorItem],
    dragged: &SelectorItem,
    index: Option<usize>,
) -> Vec<SelectorItem> {
    let mut items = base.to_vec();
    if let Some(index) = index {
        items.insert(index.min(base.len()), dragged.clone());
    }
    items
}

pub type ItemsUpdated = Box<dyn FnMut(&[SelectorItem])>;

pub struct WheelEditor<S: Surface> {
    selector: WheelSelector<S>,
    drag: Option<Drag>,
    on_items_updated: ItemsUpdated,
}

impl<S: Surface> WheelEditor<S> {
    pub fn new(surface: S, radii: Radii) -> Self {
        Self {
            selector: WheelSelector::new(surface, radii),
            drag: None,
            on_items_updated: Box::new(|_| {}),
        }
    }

    /// Sizes the wheel to fit inside `rect` and opens it at the centre.
    pub fn fit_to(surface: S, rect: Rect) -> Result<Self, ConfigError> {
        let radii = Radii::from_outer(rect.width.min(rect.height) / 2.0)?;
        let mut editor = Self::new(surface, radii);
        editor.activate(rect.center());
        Ok(editor)
    }

    pub fn with_items(mut self, items: Vec<SelectorItem>) -> Self {
        self.selector.update_items(items);
        self
    }

    pub fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.selector = self.selector.with_policy(policy);
        self
    }

    pub fn on_items_updated(mut self, sink: impl FnMut(&[SelectorItem]) + 'static) -> Self {
        self.on_items_updated = Box::new(sink);
        self
    }

    pub fn selector(&self) -> &WheelSelector<S> {
        &self.selector
    }

    pub fn items(&self) -> &[SelectorItem] {
        self.selector.items()
    }

    pub fn selection(&self) -> Selection {
        self.selector.selection()
    }

    pub fn is_active(&self) -> bool {
        self.selector.is_active()
    }

    pub fn dragging(&self) -> Option<&SelectorItem> {
        self.drag.as_ref().map(|d| &d.item)
    }

    pub fn frame(&self) -> Option<Frame<'_>> {
        self.selector.frame_with(self.dragging())
    }

    pub fn activate(&mut self, origin: Point) -> bool {
        if self.is_active() && self.selector.policy() == ActivationPolicy::Ignore {
            return self.selector.activate(origin);
        }
        self.abandon_drag();
        self.selector.activate(origin)
    }

    /// Starts dragging the selected item. Returns whether a drag began.
    pub fn pointer_down(&mut self) -> bool {
        if !self.is_active() || self.drag.is_some() {
            return false;
        }
        let Some(from) = self.selection().index() else {
            return false;
        };
        let Some(item) = self.items().get(from).cloned() else {
            return false;
        };

        let mut base = self.items().to_vec();
        base.remove(from);
        log::debug!("Dragging '{}' from {}", item.name(), from);
        self.drag = Some(Drag { item, base, from });
        true
    }

    /// Feeds one pointer sample. Past the outer radius nothing is selected.
    ///
    /// During a drag the items are rebuilt and redrawn on every sample; otherwise
    /// this redraws only when the selection changed. Returns whether a redraw
    /// happened.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        let Some(origin) = self.selector.record_pointer(pointer) else {
            return false;
        };
        let radii = self.selector.radii();

        match &self.drag {
            Some(drag) => {
                let selection =
                    resolve_selection(origin, pointer, radii, true, drag.base.len() + 1);
                self.selector.set_items(candidate_sequence(
                    &drag.base,
                    &drag.item,
                    selection.index(),
                ));
                self.selector.set_selection(selection);
                self.selector.redraw_with(Some(&drag.item));
                true
            }
            None => {
                let count = self.selector.items().len();
                let selection = resolve_selection(origin, pointer, radii, true, count);
                self.selector.apply_selection(selection)
            }
        }
    }

    /// Ends a drag, keeping the current arrangement and reporting it.
    pub fn pointer_up(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        log::info!(
            "Dropped '{}', {} items now",
            drag.item.name(),
            self.items().len()
        );
        (self.on_items_updated)(self.selector.items());
        self.selector.redraw();
        true
    }

    pub fn select_item(&mut self, index: Option<usize>) -> Result<(), SelectorError> {
        self.selector.select_item(index)
    }

    pub fn update_items(&mut self, items: Vec<SelectorItem>) {
        self.abandon_drag();
        self.selector.update_items(items);
    }

    /// Closes the editor. A drag still in progress is abandoned and commits nothing.
    pub fn deactivate(&mut self) -> Option<SelectorItem> {
        self.abandon_drag();
        self.selector.deactivate()
    }

    pub fn handlers() -> HandlerTable<Self> {
        HandlerTable::new()
            .on(EventKind::Activate, |e: &mut Self, ev: &InputEvent| {
                if let InputEvent::ActivateRequested(origin) = ev {
                    e.activate(*origin);
                }
            })
            .on(EventKind::PointerMove, |e: &mut Self, ev: &InputEvent| {
                if let InputEvent::PointerMoved(pointer) = ev {
                    e.pointer_moved(*pointer);
                }
            })
            .on(EventKind::PointerDown, |e: &mut Self, ev: &InputEvent| {
                if let InputEvent::PointerPressed(Button::Primary) = ev {
                    e.pointer_down();
                }
            })
            .on(EventKind::PointerUp, |e: &mut Self, ev: &InputEvent| {
                if let InputEvent::PointerReleased(Button::Primary) = ev {
                    e.pointer_up();
                }
            })
            .on(EventKind::Deactivate, |e: &mut Self, _: &InputEvent| {
                e.deactivate();
            })
    }

    /// Puts the dragged item back where it came from.
    fn abandon_drag(&mut self) {
        if let Some(drag) = self.drag.take() {
            log::debug!("Abandoning drag of '{}'", drag.item.name());
            self.selector
                .set_items(candidate_sequence(&drag.base, &drag.item, Some(drag.from)));
            self.selector.set_selection(Selection::None);
            self.selector.redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;
    use std::cell::RefCell;
    use std::f64::consts::{PI, TAU};
    use std::rc::Rc;

    const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    type Updates = Rc<RefCell<Vec<Vec<String>>>>;

    fn names(items: &[SelectorItem]) -> Vec<String> {
        items.iter().map(|i| i.name().to_string()).collect()
    }

    /// Point in the middle of sector `idx` of `count`, in range.
    fn in_sector(idx: usize, count: usize) -> Point {
        let step = TAU / count as f64;
        ORIGIN.offset(step * (idx as f64 + 0.5), 150.0)
    }

    fn editor(labels: &[&str]) -> (WheelEditor<RecordingSurface>, Updates) {
        let updates: Updates = Rc::default();
        let sink = updates.clone();
        let items = labels.iter().map(|n| SelectorItem::new(*n, || {})).collect();
        let mut editor =
            WheelEditor::new(RecordingSurface::default(), Radii::new(100.0, 200.0).unwrap())
                .with_items(items)
                .on_items_updated(move |items| sink.borrow_mut().push(names(items)));
        editor.activate(ORIGIN);
        (editor, updates)
    }

    #[test]
    fn test_candidate_sequence() {
        let items: Vec<_> = ["a", "c"].iter().map(|n| SelectorItem::new(*n, || {})).collect();
        let b = SelectorItem::new("b", || {});

        assert_eq!(names(&candidate_sequence(&items, &b, Some(1))), ["a", "b", "c"]);
        assert_eq!(names(&candidate_sequence(&items, &b, Some(0))), ["b", "a", "c"]);
        assert_eq!(names(&candidate_sequence(&items, &b, Some(2))), ["a", "c", "b"]);
        assert_eq!(names(&candidate_sequence(&items, &b, Some(9))), ["a", "c", "b"]);
        assert_eq!(names(&candidate_sequence(&items, &b, None)), ["a", "c"]);
    }

    #[test]
    fn test_drag_reorder_scenario() {
        let (mut editor, updates) = editor(&["A", "B", "C"]);

        editor.pointer_moved(in_sector(1, 3));
        assert_eq!(editor.selection(), Selection::Item(1));
        assert!(editor.pointer_down());
        assert_eq!(editor.dragging().unwrap().name().as_str(), "B");

        editor.pointer_moved(in_sector(0, 3));
        assert_eq!(names(editor.items()), ["B", "A", "C"]);
        assert_eq!(editor.selection(), Selection::Item(0));

        assert!(editor.pointer_up());
        assert!(editor.dragging().is_none());
        assert_eq!(names(editor.items()), ["B", "A", "C"]);
        assert_eq!(*updates.borrow(), vec![vec!["B", "A", "C"]]);
    }

    #[test]
    fn test_preview_rebuilds_from_snapshot() {
        let (mut editor, _) = editor(&["A", "B", "C", "D"]);
        editor.pointer_moved(in_sector(0, 4));
        editor.pointer_down();

        // sweep around the wheel and back; no sample may duplicate or lose items
        for idx in [1, 2, 3, 2, 1, 3, 3, 0] {
            editor.pointer_moved(in_sector(idx, 4));
            assert_eq!(editor.items().len(), 4);
            assert_eq!(editor.selection(), Selection::Item(idx));
            assert!(editor.items()[idx].same(editor.dragging().unwrap()));
        }
        assert_eq!(names(editor.items()), ["A", "B", "C", "D"]);

        editor.pointer_moved(in_sector(3, 4));
        assert_eq!(names(editor.items()), ["B", "C", "D", "A"]);
    }

    #[test]
    fn test_drag_outside_detaches_item() {
        let (mut editor, updates) = editor(&["A", "B", "C"]);
        editor.pointer_moved(in_sector(2, 3));
        editor.pointer_down();

        editor.pointer_moved(ORIGIN.offset(1.0, 500.0));
        assert_eq!(names(editor.items()), ["A", "B"]);
        assert_eq!(editor.selection(), Selection::None);
        assert_eq!(
            editor.selector().surface().last_detached.as_ref().map(|n| n.as_str()),
            Some("C")
        );

        editor.pointer_moved(ORIGIN.offset(1.0, 20.0));
        assert_eq!(names(editor.items()), ["A", "B"]);
        assert_eq!(editor.selection(), Selection::Cancel);

        // dropping in the cancel zone removes the item
        editor.pointer_up();
        assert_eq!(*updates.borrow(), vec![vec!["A", "B"]]);
    }

    #[test]
    fn test_drag_redraws_every_sample() {
        let (mut editor, _) = editor(&["A", "B"]);
        editor.pointer_moved(in_sector(0, 2));
        editor.pointer_down();
        let redraws = editor.selector().surface().redraws;

        assert!(editor.pointer_moved(in_sector(0, 3)));
        assert!(editor.pointer_moved(in_sector(0, 3)));
        assert_eq!(editor.selector().surface().redraws, redraws + 2);
    }

    #[test]
    fn test_plain_move_enforces_outer_radius() {
        let (mut editor, _) = editor(&["A", "B"]);
        let redraws = editor.selector().surface().redraws;

        assert!(editor.pointer_moved(in_sector(1, 2)));
        assert!(!editor.pointer_moved(in_sector(1, 2)));
        assert_eq!(editor.selector().surface().redraws, redraws + 1);

        editor.pointer_moved(ORIGIN.offset(PI + 0.3, 250.0));
        assert_eq!(editor.selection(), Selection::None);
    }

    #[test]
    fn test_pointer_down_without_selection_is_noop() {
        let (mut editor, updates) = editor(&["A", "B"]);
        editor.pointer_moved(ORIGIN.offset(0.3, 10.0));
        assert!(!editor.pointer_down());
        assert!(editor.dragging().is_none());

        assert!(!editor.pointer_up());
        assert!(updates.borrow().is_empty());
    }

    #[test]
    fn test_deactivate_mid_drag_restores_order() {
        let (mut editor, updates) = editor(&["A", "B", "C"]);
        editor.pointer_moved(in_sector(1, 3));
        editor.pointer_down();
        editor.pointer_moved(ORIGIN.offset(0.1, 900.0));
        assert_eq!(names(editor.items()), ["A", "C"]);

        assert!(editor.deactivate().is_none());
        assert_eq!(names(editor.items()), ["A", "B", "C"]);
        assert!(editor.dragging().is_none());
        assert!(updates.borrow().is_empty());
        assert!(editor.selector().surface().live.is_empty());
    }

    #[test]
    fn test_fit_to_rect() {
        let editor =
            WheelEditor::fit_to(RecordingSurface::default(), Rect::new(10.0, 20.0, 300.0, 200.0))
                .unwrap();
        assert!(editor.is_active());
        assert_eq!(editor.selector().origin(), Some(Point::new(160.0, 120.0)));
        let radii = editor.selector().radii();
        assert_eq!((radii.inner(), radii.outer()), (50.0, 100.0));

        assert!(WheelEditor::fit_to(RecordingSurface::default(), Rect::default()).is_err());
    }

    #[test]
    fn test_handlers_drive_drag() {
        let (mut editor, updates) = editor(&["A", "B", "C"]);
        let mut table = WheelEditor::handlers();
        let mut host = crate::input::testing::RecordingHost::default();
        table.attach(&mut host).unwrap();

        table.dispatch(&mut editor, &InputEvent::PointerMoved(in_sector(1, 3)));
        table.dispatch(&mut editor, &InputEvent::PointerPressed(Button::Secondary));
        assert!(editor.dragging().is_none());

        table.dispatch(&mut editor, &InputEvent::PointerPressed(Button::Primary));
        table.dispatch(&mut editor, &InputEvent::PointerMoved(in_sector(2, 3)));
        table.dispatch(&mut editor, &InputEvent::PointerReleased(Button::Primary));
        assert_eq!(*updates.borrow(), vec![vec!["A", "C", "B"]]);
        assert!(editor.is_active());

        table.dispatch(&mut editor, &InputEvent::DeactivateRequested);
        assert!(!editor.is_active());
    }
}
