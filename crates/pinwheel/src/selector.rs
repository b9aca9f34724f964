use crate::config::{ActivationPolicy, ConfigError, SelectorOptions};
use crate::geometry::{
    Point, Radii, Zone, classify_distance, normalize_angle, sector_index, vector_from,
};
use crate::input::{EventKind, HandlerTable, InputEvent};
use crate::item::SelectorItem;
use crate::surface::{Frame, Surface};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Item index {index} out of range for {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// What the pointer currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// Inside the cancel zone. Releasing here commits nothing.
    Cancel,
    Item(usize),
}

impl Selection {
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Item(idx) => Some(idx),
            _ => None,
        }
    }
}

/// Resolves a pointer sample against `sector_count` equal sectors around `origin`.
///
/// The outer radius only limits the wheel when `bounded` is set.
pub fn resolve_selection(
    origin: Point,
    pointer: Point,
    radii: Radii,
    bounded: bool,
    sector_count: usize,
) -> Selection {
    let v = vector_from(origin, pointer);
    let outer = bounded.then_some(radii.outer());

    match classify_distance(v.distance, radii.inner(), outer) {
        Zone::Cancel => Selection::Cancel,
        Zone::OutOfRange => Selection::None,
        Zone::InRange => sector_index(normalize_angle(v.angle), sector_count)
            .map_or(Selection::None, Selection::Item),
    }
}

struct Session<H> {
    origin: Point,
    handle: H,
    pointer: Option<Point>,
}

/// The plain wheel: open at a point, point at a sector, commit on release.
pub struct WheelSelector<S: Surface> {
    surface: S,
    session: Option<Session<S::Handle>>,
    items: Vec<SelectorItem>,
    selection: Selection,
    radii: Radii,
    policy: ActivationPolicy,
}

impl<S: Surface> WheelSelector<S> {
    pub fn new(surface: S, radii: Radii) -> Self {
        Self {
            surface,
            session: None,
            items: Vec::new(),
            selection: Selection::None,
            radii,
            policy: ActivationPolicy::default(),
        }
    }

    /// Builds a selector from parsed options. Item callbacks are supplied by the
    /// caller since the options only describe them.
    pub fn from_options(
        surface: S,
        options: &SelectorOptions,
        items: Vec<SelectorItem>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(surface, options.radii()?)
            .with_items(items)
            .with_policy(options.activation))
    }

    pub fn with_items(mut self, items: Vec<SelectorItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn origin(&self) -> Option<Point> {
        self.session.as_ref().map(|s| s.origin)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_item(&self) -> Option<&SelectorItem> {
        self.selection.index().and_then(|idx| self.items.get(idx))
    }

    pub fn items(&self) -> &[SelectorItem] {
        &self.items
    }

    pub fn radii(&self) -> Radii {
        self.radii
    }

    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frame(&self) -> Option<Frame<'_>> {
        self.frame_with(None)
    }

    pub(crate) fn frame_with<'a>(
        &'a self,
        dragging: Option<&'a SelectorItem>,
    ) -> Option<Frame<'a>> {
        self.session.as_ref().map(|session| Frame {
            origin: session.origin,
            radii: self.radii,
            items: &self.items,
            selection: self.selection,
            dragging,
            pointer: session.pointer,
        })
    }

    /// Opens a session at `origin`. Returns whether a new session was opened.
    pub fn activate(&mut self, origin: Point) -> bool {
        if self.is_active() {
            match self.policy {
                ActivationPolicy::Ignore => {
                    log::debug!("Already active, ignoring activation at {:?}", origin);
                    return false;
                }
                ActivationPolicy::Restart => {
                    log::debug!("Restarting session at {:?}", origin);
                    self.discard_session();
                }
            }
        }

        let handle = self.surface.create(origin, self.radii.diameter());
        self.session = Some(Session {
            origin,
            handle,
            pointer: None,
        });
        self.selection = Selection::None;
        log::debug!("Activated at {:?} with {} items", origin, self.items.len());
        self.redraw();
        true
    }

    /// Feeds one pointer sample. Redraws and returns `true` only when the
    /// selection changed.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        let Some(origin) = self.record_pointer(pointer) else {
            return false;
        };
        let selection = resolve_selection(origin, pointer, self.radii, false, self.items.len());
        self.apply_selection(selection)
    }

    pub fn select_item(&mut self, index: Option<usize>) -> Result<(), SelectorError> {
        let selection = match index {
            Some(index) if index >= self.items.len() => {
                return Err(SelectorError::OutOfRange {
                    index,
                    len: self.items.len(),
                });
            }
            Some(index) => Selection::Item(index),
            None => Selection::None,
        };
        self.selection = selection;
        self.redraw();
        Ok(())
    }

    /// Closes the session and commits the held item, if any.
    ///
    /// The selection is cleared before the item's callback runs. Returns the
    /// committed item.
    pub fn deactivate(&mut self) -> Option<SelectorItem> {
        let selection = std::mem::take(&mut self.selection);
        let session = self.session.take()?;
        self.surface.destroy(session.handle);

        let committed = selection.index().and_then(|idx| self.items.get(idx).cloned());
        match &committed {
            Some(item) => {
                log::info!("Committing '{}'", item.name());
                item.trigger();
            }
            None => log::debug!("Deactivated without selection ({:?})", selection),
        }
        committed
    }

    pub fn update_items(&mut self, items: Vec<SelectorItem>) {
        self.items = items;
        self.selection = Selection::None;
        self.redraw();
    }

    pub fn handlers() -> HandlerTable<Self> {
        HandlerTable::new()
            .on(EventKind::Activate, |s: &mut Self, e: &InputEvent| {
                if let InputEvent::ActivateRequested(origin) = e {
                    s.activate(*origin);
                }
            })
            .on(EventKind::PointerMove, |s: &mut Self, e: &InputEvent| {
                if let InputEvent::PointerMoved(pointer) = e {
                    s.pointer_moved(*pointer);
                }
            })
            .on(EventKind::PointerUp, |s: &mut Self, _: &InputEvent| {
                s.deactivate();
            })
            .on(EventKind::Deactivate, |s: &mut Self, _: &InputEvent| {
                s.deactivate();
            })
    }

    /// Stores the latest sample and hands back the session origin.
    pub(crate) fn record_pointer(&mut self, pointer: Point) -> Option<Point> {
        self.session.as_mut().map(|session| {
            session.pointer = Some(pointer);
            session.origin
        })
    }

    pub(crate) fn apply_selection(&mut self, selection: Selection) -> bool {
        if self.selection == selection {
            return false;
        }
        log::trace!("Selection {:?} -> {:?}", self.selection, selection);
        self.selection = selection;
        self.redraw();
        true
    }

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Swaps the item sequence without touching the selection.
    pub(crate) fn set_items(&mut self, items: Vec<SelectorItem>) {
        self.items = items;
    }

    pub(crate) fn redraw(&mut self) {
        self.redraw_with(None);
    }

    pub(crate) fn redraw_with(&mut self, dragging: Option<&SelectorItem>) {
        let Some(session) = &self.session else {
            return;
        };
        let frame = Frame {
            origin: session.origin,
            radii: self.radii,
            items: &self.items,
            selection: self.selection,
            dragging,
            pointer: session.pointer,
        };
        self.surface.redraw(&frame);
    }

    fn discard_session(&mut self) {
        self.selection = Selection::None;
        if let Some(session) = self.session.take() {
            self.surface.destroy(session.handle);
        }
    }
}

impl<S: Surface> Drop for WheelSelector<S> {
    fn drop(&mut self) {
        self.discard_session();
    }
}
