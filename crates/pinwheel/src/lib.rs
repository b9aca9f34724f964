#[macro_use]
mod macros;

pub mod config;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod item;
pub mod selector;
pub mod surface;

pub use config::{ActivationPolicy, ConfigError, SelectorOptions, Theme};
pub use editor::WheelEditor;
pub use geometry::{Point, Radii, Rect};
pub use input::{Button, HandlerTable, InputEvent, InputHost, MouseGesture};
pub use item::{ItemConfig, ItemName, SelectorItem};
pub use selector::{Selection, SelectorError, WheelSelector};
pub use surface::{Frame, NullSurface, Surface};
