use crate::geometry::Point;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use thiserror::Error;

pub const ESCAPE_KEY: &str = "Escape";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Primary,
    Secondary,
    Other(u32),
}

impl From<u32> for Button {
    /// X11/GDK numbering: 1 is primary, 3 is secondary.
    fn from(button: u32) -> Self {
        match button {
            1 => Self::Primary,
            3 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

/// Host events after normalization. Nothing platform specific gets past this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    ActivateRequested(Point),
    PointerMoved(Point),
    PointerPressed(Button),
    PointerReleased(Button),
    DeactivateRequested,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ActivateRequested(_) => EventKind::Activate,
            Self::PointerMoved(_) => EventKind::PointerMove,
            Self::PointerPressed(_) => EventKind::PointerDown,
            Self::PointerReleased(_) => EventKind::PointerUp,
            Self::DeactivateRequested => EventKind::Deactivate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    Activate,
    PointerMove,
    PointerDown,
    PointerUp,
    Deactivate,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Handlers are already attached")]
    AlreadyAttached,
    #[error("Handlers are not attached")]
    NotAttached,
}

/// Whatever delivers raw events. Only told which kinds of events to forward.
pub trait InputHost {
    fn register(&mut self, kind: EventKind);
    fn unregister(&mut self, kind: EventKind);
}

pub type Handler<T> = fn(&mut T, &InputEvent);

/// Named handlers registered and unregistered with a host as one unit.
pub struct HandlerTable<T> {
    handlers: Vec<(EventKind, Handler<T>)>,
    attached: bool,
}

impl<T> Default for HandlerTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandlerTable<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            attached: false,
        }
    }

    /// Adds or replaces the handler for `kind`.
    pub fn on(mut self, kind: EventKind, handler: Handler<T>) -> Self {
        self.handlers.retain(|(k, _)| *k != kind);
        self.handlers.push((kind, handler));
        self
    }

    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.handlers.iter().map(|(kind, _)| *kind)
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach<H: InputHost + ?Sized>(&mut self, host: &mut H) -> Result<(), InputError> {
        if self.attached {
            return Err(InputError::AlreadyAttached);
        }
        for (kind, _) in &self.handlers {
            host.register(*kind);
        }
        self.attached = true;
        log::debug!("Attached {} handlers", self.handlers.len());
        Ok(())
    }

    pub fn detach<H: InputHost + ?Sized>(&mut self, host: &mut H) -> Result<(), InputError> {
        if !self.attached {
            return Err(InputError::NotAttached);
        }
        for (kind, _) in &self.handlers {
            host.unregister(*kind);
        }
        self.attached = false;
        log::debug!("Detached {} handlers", self.handlers.len());
        Ok(())
    }

    /// Runs the handler for `event`. Returns whether one ran; a detached table
    /// handles nothing.
    pub fn dispatch(&self, target: &mut T, event: &InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        let kind = event.kind();
        match self.handlers.iter().find(|(k, _)| *k == kind) {
            Some((_, handler)) => {
                handler(target, event);
                true
            }
            None => false,
        }
    }
}

/// Turns raw mouse and key input into [`InputEvent`]s.
///
/// Pressing the secondary button while the primary one is held opens the wheel at
/// the pointer. While the primary button is held the host should swallow its
/// context menu.
#[derive(Debug, Clone, Default)]
pub struct MouseGesture {
    primary_held: bool,
    pointer: Point,
    activate_key: Option<String>,
}

impl MouseGesture {
    pub fn new(activate_key: Option<String>) -> Self {
        Self {
            activate_key,
            ..Default::default()
        }
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn suppress_context_menu(&self) -> bool {
        self.primary_held
    }

    pub fn pointer_moved(&mut self, pointer: Point) -> InputEvent {
        self.pointer = pointer;
        InputEvent::PointerMoved(pointer)
    }

    pub fn button_pressed(&mut self, button: Button) -> InputEvent {
        match button {
            Button::Primary => {
                self.primary_held = true;
                InputEvent::PointerPressed(button)
            }
            Button::Secondary if self.primary_held => InputEvent::ActivateRequested(self.pointer),
            _ => InputEvent::PointerPressed(button),
        }
    }

    pub fn button_released(&mut self, button: Button) -> InputEvent {
        if button == Button::Primary {
            self.primary_held = false;
        }
        InputEvent::PointerReleased(button)
    }

    pub fn key_pressed(&mut self, key: &str) -> Option<InputEvent> {
        if key == ESCAPE_KEY {
            return Some(InputEvent::DeactivateRequested);
        }
        self.activate_key
            .as_deref()
            .filter(|k| k.eq_ignore_ascii_case(key))
            .map(|_| InputEvent::ActivateRequested(self.pointer))
    }
}

pub fn all_kinds() -> impl Iterator<Item = EventKind> {
    EventKind::iter()
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    #[derive(Default)]
    struct Log(Vec<String>);

    fn table() -> HandlerTable<Log> {
        HandlerTable::new()
            .on(EventKind::PointerMove, |log: &mut Log, e: &InputEvent| {
                log.0.push(format!("{:?}", e))
            })
            .on(EventKind::Deactivate, |log: &mut Log, _: &InputEvent| {
                log.0.push("bye".to_string())
            })
    }

    #[test]
    fn test_attach_detach_all_or_nothing() {
        let mut host = RecordingHost::default();
        let mut table = table();

        table.attach(&mut host).unwrap();
        assert_eq!(
            host.registered,
            vec![EventKind::PointerMove, EventKind::Deactivate]
        );
        assert_eq!(table.attach(&mut host), Err(InputError::AlreadyAttached));
        assert_eq!(host.calls, 2);

        table.detach(&mut host).unwrap();
        assert!(host.registered.is_empty());
        assert_eq!(table.detach(&mut host), Err(InputError::NotAttached));
        assert_eq!(host.calls, 4);
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let mut host = RecordingHost::default();
        let mut table = table();
        let mut log = Log::default();

        assert!(!table.dispatch(&mut log, &InputEvent::DeactivateRequested));
        table.attach(&mut host).unwrap();

        assert!(table.dispatch(&mut log, &InputEvent::DeactivateRequested));
        assert!(!table.dispatch(&mut log, &InputEvent::PointerPressed(Button::Primary)));
        assert!(table.dispatch(&mut log, &InputEvent::PointerMoved(Point::new(1.0, 2.0))));
        assert_eq!(log.0.len(), 2);
        assert_eq!(log.0[0], "bye");
    }

    #[test]
    fn test_on_replaces_existing_handler() {
        let table = table().on(EventKind::Deactivate, |log: &mut Log, _: &InputEvent| {
            log.0.push("again".to_string())
        });
        assert_eq!(table.kinds().count(), 2);
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::PointerMove.to_string(), "pointer-move");
        assert_eq!(all_kinds().count(), 5);
    }

    #[test]
    fn test_button_numbers() {
        assert_eq!(Button::from(1), Button::Primary);
        assert_eq!(Button::from(3), Button::Secondary);
        assert_eq!(Button::from(2), Button::Other(2));
    }

    #[test]
    fn test_mouse_gesture_activation() {
        let mut gesture = MouseGesture::default();
        let at = Point::new(30.0, 40.0);
        gesture.pointer_moved(at);

        // secondary alone is just a press
        assert_eq!(
            gesture.button_pressed(Button::Secondary),
            InputEvent::PointerPressed(Button::Secondary)
        );
        assert!(!gesture.suppress_context_menu());

        gesture.button_pressed(Button::Primary);
        assert!(gesture.suppress_context_menu());
        assert_eq!(
            gesture.button_pressed(Button::Secondary),
            InputEvent::ActivateRequested(at)
        );

        assert_eq!(
            gesture.button_released(Button::Primary),
            InputEvent::PointerReleased(Button::Primary)
        );
        assert!(!gesture.suppress_context_menu());
    }

    #[test]
    fn test_mouse_gesture_keys() {
        let mut gesture = MouseGesture::new(Some("space".to_string()));
        gesture.pointer_moved(Point::new(5.0, 6.0));

        assert_eq!(
            gesture.key_pressed("Space"),
            Some(InputEvent::ActivateRequested(Point::new(5.0, 6.0)))
        );
        assert_eq!(
            gesture.key_pressed(ESCAPE_KEY),
            Some(InputEvent::DeactivateRequested)
        );
        assert_eq!(gesture.key_pressed("a"), None);
        assert_eq!(MouseGesture::default().key_pressed("space"), None);
    }
}
