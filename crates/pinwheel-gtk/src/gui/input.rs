use gtk::prelude::*;
use gtk4 as gtk;
use pinwheel::input::{EventKind, InputHost};
use std::collections::HashSet;

/// Event controllers of the overlay, switched on and off per event kind.
pub struct ControllerHost {
    motion: gtk::EventControllerMotion,
    click: gtk::GestureClick,
    key: gtk::EventControllerKey,
    enabled: HashSet<EventKind>,
}

impl ControllerHost {
    pub fn new(
        motion: gtk::EventControllerMotion,
        click: gtk::GestureClick,
        key: gtk::EventControllerKey,
    ) -> Self {
        let host = Self {
            motion,
            click,
            key,
            enabled: HashSet::new(),
        };
        host.sync();
        host
    }

    fn wants(&self, kinds: &[EventKind]) -> bool {
        kinds.iter().any(|k| self.enabled.contains(k))
    }

    fn sync(&self) {
        set_listening(&self.motion, self.wants(&[EventKind::PointerMove]));
        set_listening(
            &self.click,
            self.wants(&[EventKind::PointerDown, EventKind::PointerUp]),
        );
        set_listening(
            &self.key,
            self.wants(&[EventKind::Activate, EventKind::Deactivate]),
        );
    }
}

fn set_listening(controller: &impl IsA<gtk::EventController>, on: bool) {
    controller.set_propagation_phase(if on {
        gtk::PropagationPhase::Bubble
    } else {
        gtk::PropagationPhase::None
    });
}

impl InputHost for ControllerHost {
    fn register(&mut self, kind: EventKind) {
        log::trace!("Listening for {}", kind);
        self.enabled.insert(kind);
        self.sync();
    }

    fn unregister(&mut self, kind: EventKind) {
        log::trace!("No longer listening for {}", kind);
        self.enabled.remove(&kind);
        self.sync();
    }
}
