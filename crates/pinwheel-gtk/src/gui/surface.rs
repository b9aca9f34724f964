use gtk::prelude::*;
use gtk4 as gtk;
use pinwheel::surface::{Frame, Surface};
use pinwheel::Point;

/// The overlay window. Shown for the length of a session and drawn on demand.
pub struct GtkSurface {
    window: gtk::ApplicationWindow,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub struct SurfaceHandle {
    pub origin: Point,
    pub diameter: f64,
}

impl GtkSurface {
    pub fn new(window: gtk::ApplicationWindow, drawing_area: gtk::DrawingArea) -> Self {
        Self {
            window,
            drawing_area,
        }
    }
}

impl Surface for GtkSurface {
    type Handle = SurfaceHandle;

    fn create(&mut self, origin: Point, diameter: f64) -> SurfaceHandle {
        log::debug!("Showing overlay for wheel of {} at {:?}", diameter, origin);
        self.window.set_visible(true);
        SurfaceHandle { origin, diameter }
    }

    fn destroy(&mut self, handle: SurfaceHandle) {
        log::debug!("Hiding overlay for wheel at {:?}", handle.origin);
        self.window.set_visible(false);
    }

    // painting happens in the draw func once GTK gets to it
    fn redraw(&mut self, _frame: &Frame<'_>) {
        self.drawing_area.queue_draw();
    }
}
