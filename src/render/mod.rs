pub mod renderer;

pub use renderer::{CellKind, Renderer, View, cell_kind};
