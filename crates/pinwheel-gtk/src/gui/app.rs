use crate::events::AppEvent;
use crate::gui::input::ControllerHost;
use crate::gui::surface::GtkSurface;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{view, window};
use crate::sys::exec;
use gtk::prelude::*;
use gtk4 as gtk;
use pinwheel::config::{self, SelectorOptions};
use pinwheel::input::{Button, HandlerTable, InputEvent, MouseGesture};
use pinwheel::{Point, Radii, Theme, WheelSelector};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Selector = WheelSelector<GtkSurface>;

pub struct AppModel {
    selector: Rc<RefCell<Selector>>,
    theme: Rc<Cell<Theme>>,
    handlers: HandlerTable<Selector>,
    host: ControllerHost,
    gesture: MouseGesture,
    root: gtk::ApplicationWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Pressed(u32),
    Released(u32),
    CursorMove(Point),
    Key(String),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn dispatch(&self, event: InputEvent) {
        let mut selector = self.selector.borrow_mut();
        self.handlers.dispatch(&mut selector, &event);
    }

    fn build_selector(options: &SelectorOptions, surface: GtkSurface) -> Selector {
        let radii = options.radii().unwrap_or_else(|e| {
            log::error!("Invalid radii, using defaults: {}", e);
            Radii::default()
        });
        WheelSelector::new(surface, radii)
            .with_items(exec::build_items(&options.items))
            .with_policy(options.activation)
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (SelectorOptions, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Pinwheel"),
            add_css_class: "pinwheel-window",
            set_decorated: false,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "pinwheel-drawing-area",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (options, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let widgets = view_output!();

        let surface = GtkSurface::new(root.clone(), widgets.drawing_area.clone());
        let selector = Rc::new(RefCell::new(Self::build_selector(&options, surface)));
        let theme = Rc::new(Cell::new(options.theme));

        let state_draw = selector.clone();
        let theme_draw = theme.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let colors =
                    ThemeColors::from_context(&drawing_area.style_context(), &theme_draw.get());
                let selector = state_draw.borrow();
                if let Some(frame) = selector.frame()
                    && let Err(e) = view::draw(cr, &frame, &colors)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let motion = gtk::EventControllerMotion::new();
        let s = sender.clone();
        motion.connect_motion(move |_, x, y| s.input(AppMsg::CursorMove(Point::new(x, y))));

        let click = gtk::GestureClick::new();
        click.set_button(0); // Listen to all buttons
        let s = sender.clone();
        click.connect_pressed(move |gesture, _, _, _| {
            s.input(AppMsg::Pressed(gesture.current_button()));
        });
        let s = sender.clone();
        click.connect_released(move |gesture, _, _, _| {
            s.input(AppMsg::Released(gesture.current_button()));
        });

        let key = gtk::EventControllerKey::new();
        let s = sender.clone();
        key.connect_key_pressed(move |_, keyval, _, _| match keyval.name() {
            Some(name) => {
                s.input(AppMsg::Key(name.to_string()));
                glib::Propagation::Stop
            }
            None => glib::Propagation::Proceed,
        });

        widgets.drawing_area.add_controller(motion.clone());
        widgets.drawing_area.add_controller(click.clone());
        root.add_controller(key.clone());

        let mut host = ControllerHost::new(motion, click, key);
        let mut handlers = WheelSelector::handlers();
        if let Err(e) = handlers.attach(&mut host) {
            log::error!("Failed to attach input handlers: {}", e);
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        root.set_visible(false);

        let model = AppModel {
            selector,
            theme,
            handlers,
            host,
            gesture: MouseGesture::new(options.activate_key.clone()),
            root: root.clone(),
        };

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                // the pointer can only be queried on a mapped surface
                self.root.set_visible(true);
                let origin = window::get_cursor_position(&self.root)
                    .unwrap_or_else(|| window::center(&self.root));
                self.gesture.pointer_moved(origin);
                self.dispatch(InputEvent::ActivateRequested(origin));
            }
            AppMsg::Hide => self.dispatch(InputEvent::DeactivateRequested),
            AppMsg::Pressed(btn) => {
                let event = self.gesture.button_pressed(Button::from(btn));
                self.dispatch(event);
            }
            AppMsg::Released(btn) => {
                let event = self.gesture.button_released(Button::from(btn));
                self.dispatch(event);
            }
            AppMsg::CursorMove(point) => {
                let event = self.gesture.pointer_moved(point);
                self.dispatch(event);
            }
            AppMsg::Key(name) => {
                if let Some(event) = self.gesture.key_pressed(&name) {
                    self.dispatch(event);
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.theme.set(new_config.theme);
                    self.gesture = MouseGesture::new(new_config.activate_key.clone());
                    self.selector
                        .borrow_mut()
                        .update_items(exec::build_items(&new_config.items));
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        if let Err(e) = self.handlers.detach(&mut self.host) {
            log::warn!("Failed to detach input handlers: {}", e);
        }
        // close any open session without committing
        let mut selector = self.selector.borrow_mut();
        let _ = selector.select_item(None);
        selector.deactivate();
    }
}
