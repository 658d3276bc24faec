//! Résumé editing core plus the LaTeX compilation service behind it.
//!
//! The editing side (`document`, `editing`, `preview`, `compile`) is pure
//! data transformation plus one outbound HTTP bridge; `typeset` and `routes`
//! host the compilation service and the editor API.

pub mod compile;
pub mod config;
pub mod document;
pub mod editing;
pub mod errors;
pub mod preview;
pub mod routes;
pub mod state;
pub mod typeset;
