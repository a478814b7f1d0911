#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod config;
pub mod effect;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod palette;
pub mod panels;
pub mod state;
pub mod stroke;
pub mod util;

pub use app::PaletteApp;
pub use canvas::{Canvas, Snapshot};
pub use command::{ActionId, SnapshotHistory};
pub use config::PaletteConfig;
pub use effect::Effect;
pub use input::{InputEvent, InputStateMachine, KeyCommand};
pub use layout::Layout;
pub use palette::PaletteController;
pub use state::SelectionState;
pub use stroke::Stroke;
