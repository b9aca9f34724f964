pub mod app;
pub mod input;
pub mod surface;
pub mod theme;
pub mod view;
pub mod window;
