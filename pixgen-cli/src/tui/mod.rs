pub mod app;
pub mod layout;
pub mod preview;
pub mod state;
pub mod theme;
