// Rendering transform: (document, layout) -> style-annotated visual tree for
// on-screen preview. No I/O and no hidden state.

pub mod render;
pub mod tree;

pub use render::{format_contact_line, render, split_skill_line};
pub use tree::{SectionBody, SkillText, Style, VisualTree};
