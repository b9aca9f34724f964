use crate::geometry::{Point, Radii, angle_step, vector_from};
use crate::item::SelectorItem;
use crate::selector::Selection;

/// Where a selector draws itself. Owned by the selector and held for exactly the
/// lifetime of an active session.
pub trait Surface {
    type Handle;

    fn create(&mut self, origin: Point, diameter: f64) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);

    /// Rendering problems stay inside the implementation; the selector never
    /// hears about them.
    fn redraw(&mut self, frame: &Frame<'_>);
}

impl<T: Surface + ?Sized> Surface for &mut T {
    type Handle = T::Handle;

    fn create(&mut self, origin: Point, diameter: f64) -> Self::Handle {
        (**self).create(origin, diameter)
    }

    fn destroy(&mut self, handle: Self::Handle) {
        (**self).destroy(handle)
    }

    fn redraw(&mut self, frame: &Frame<'_>) {
        (**self).redraw(frame)
    }
}

/// Headless surface for hosts that only need the selection logic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    type Handle = ();

    fn create(&mut self, _origin: Point, _diameter: f64) {}

    fn destroy(&mut self, _handle: ()) {}

    fn redraw(&mut self, _frame: &Frame<'_>) {}
}

/// Read-only snapshot of an active session handed to [`Surface::redraw`].
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub origin: Point,
    pub radii: Radii,
    pub items: &'a [SelectorItem],
    pub selection: Selection,
    /// Item held by an editor drag, drawn detached at the pointer while it is not
    /// inserted anywhere.
    pub dragging: Option<&'a SelectorItem>,
    pub pointer: Option<Point>,
}

#[derive(Debug, Clone, Copy)]
pub struct Sector<'a> {
    pub index: usize,
    pub item: &'a SelectorItem,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Middle of the ring, halfway through the arc.
    pub label_at: Point,
    pub selected: bool,
}

impl<'a> Frame<'a> {
    pub fn sectors(&self) -> impl Iterator<Item = Sector<'a>> + '_ {
        let step = angle_step(self.items.len());
        let label_radius = (self.radii.inner() + self.radii.outer()) / 2.0;
        let items: &'a [SelectorItem] = self.items;

        items.iter().enumerate().map(move |(index, item)| {
            let start_angle = index as f64 * step;
            Sector {
                index,
                item,
                start_angle,
                end_angle: start_angle + step,
                label_at: self.origin.offset(start_angle + step / 2.0, label_radius),
                selected: self.selection == Selection::Item(index),
            }
        })
    }

    /// Angle and length of a guide line from the origin towards the pointer,
    /// never longer than the outer radius.
    pub fn guide_line(&self) -> Option<(f64, f64)> {
        self.pointer.map(|pointer| {
            let v = vector_from(self.origin, pointer);
            (v.angle, v.distance.min(self.radii.outer()))
        })
    }

    /// The dragged item when it is floating outside every sector.
    pub fn detached(&self) -> Option<&'a SelectorItem> {
        self.dragging
            .filter(|dragged| !self.items.iter().any(|item| item.same(dragged)))
    }
}
