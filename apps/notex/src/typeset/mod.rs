// Compilation service: LaTeX generation and the engine that typesets it.

pub mod engine;
pub mod handlers;
pub mod latex;

pub use engine::{TectonicEngine, TypesetEngine, TypesetError};
pub use latex::{escape_latex, generate_latex};
