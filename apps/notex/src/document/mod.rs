// Document model: the canonical in-memory résumé and its layout configuration.
// Entries in every list are addressed purely by position.

pub mod layout;
pub mod model;

pub use layout::{
    default_layout, form_number, parse_form_int, Fonts, FontsPatch, Layout, LayoutField,
    LayoutPatch, Margins, MarginsPatch, Spacing, SpacingPatch,
};
pub use model::{
    default_template, DocumentError, EducationEntry, ExperienceEntry, PersonalInfo,
    ResumeDocument, Sections, PLACEHOLDER_BULLET, PLACEHOLDER_SKILL_LINE,
};
