//! Mutation engine: pure, positional edit operations over a [`ResumeDocument`].
//!
//! Every operation borrows the current document and returns a new one; the
//! input is never modified. Positional operations whose index is out of
//! bounds return an unchanged copy instead of failing, so an editing surface
//! holding a stale index stays usable.

pub mod handlers;
pub mod ops;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{
    default_layout, EducationEntry, ExperienceEntry, Layout, LayoutField, LayoutPatch,
    PersonalInfo, ResumeDocument,
};

pub use crate::document::parse_form_int;
pub use ops::{apply, Edit};

// ────────────────────────────────────────────────────────────────────────────
// Addressing types
// ────────────────────────────────────────────────────────────────────────────

/// A whole replacement value for one top-level section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "camelCase")]
pub enum Section {
    Personal(PersonalInfo),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Skills(Vec<String>),
}

/// The two sections whose entries are structured records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Experience,
    Education,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NewEntry {
    Experience(ExperienceEntry),
    Education(EducationEntry),
}

/// A single text field of an experience or education entry.
///
/// `Location` exists on both kinds; every other field belongs to one kind and
/// is ignored when addressed on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryField {
    Title,
    Company,
    Location,
    StartDate,
    EndDate,
    Degree,
    School,
    GraduationDate,
    Gpa,
}

// ────────────────────────────────────────────────────────────────────────────
// Sections and layout
// ────────────────────────────────────────────────────────────────────────────

/// Replaces one top-level section wholesale.
pub fn update_section(doc: &ResumeDocument, section: Section) -> ResumeDocument {
    let mut next = doc.clone();
    match section {
        Section::Personal(personal) => next.sections.personal = personal,
        Section::Experience(experience) => next.sections.experience = experience,
        Section::Education(education) => next.sections.education = education,
        Section::Skills(skills) => next.sections.skills = skills,
    }
    next
}

/// Merges a partial layout group by group. Fields the patch does not name
/// keep their current values; named fields are clamped into range, and
/// named fields holding something other than a number reset to their default.
pub fn update_layout(doc: &ResumeDocument, patch: &LayoutPatch) -> ResumeDocument {
    patch
        .entries()
        .into_iter()
        .fold(doc.clone(), |current, (field, value)| {
            set_layout_number(&current, field, value)
        })
}

/// Sets one numeric layout field. `None` (non-numeric input) resets the
/// field to its default; any number is clamped into range.
pub fn set_layout_number(
    doc: &ResumeDocument,
    field: LayoutField,
    value: Option<i64>,
) -> ResumeDocument {
    let stored = match value {
        Some(v) => field.clamp(v),
        None => {
            debug!("Non-numeric input for {field:?}, resetting to default");
            field.default_value()
        }
    };
    let mut next = doc.clone();
    field.set(&mut next.layout, stored);
    next
}

/// Sets one numeric layout field from raw form input such as `"14"` or `"abc"`.
pub fn set_layout_field(doc: &ResumeDocument, field: LayoutField, input: &str) -> ResumeDocument {
    set_layout_number(doc, field, parse_form_int(input))
}

/// The fixed default layout, independent of any current values.
pub fn reset_layout_to_defaults() -> Layout {
    default_layout()
}

pub fn reset_layout(doc: &ResumeDocument) -> ResumeDocument {
    let mut next = doc.clone();
    next.layout = reset_layout_to_defaults();
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Experience / education entries
// ────────────────────────────────────────────────────────────────────────────

/// Appends an entry at the end of its section.
pub fn add_entry(doc: &ResumeDocument, entry: NewEntry) -> ResumeDocument {
    let mut next = doc.clone();
    match entry {
        NewEntry::Experience(e) => next.sections.experience.push(e),
        NewEntry::Education(e) => next.sections.education.push(e),
    }
    next
}

/// Removes the entry at `index`; later entries shift down by one.
pub fn remove_entry(doc: &ResumeDocument, kind: EntryKind, index: usize) -> ResumeDocument {
    let mut next = doc.clone();
    match kind {
        EntryKind::Experience => remove_at(&mut next.sections.experience, index, "experience"),
        EntryKind::Education => remove_at(&mut next.sections.education, index, "education"),
    }
    next
}

/// Replaces one text field of the entry at `index`.
pub fn update_entry_field(
    doc: &ResumeDocument,
    kind: EntryKind,
    index: usize,
    field: EntryField,
    value: impl Into<String>,
) -> ResumeDocument {
    let mut next = doc.clone();
    let value = value.into();
    let slot = match kind {
        EntryKind::Experience => next
            .sections
            .experience
            .get_mut(index)
            .and_then(|entry| experience_field(entry, field)),
        EntryKind::Education => next
            .sections
            .education
            .get_mut(index)
            .and_then(|entry| education_field(entry, field)),
    };
    match slot {
        Some(slot) => *slot = value,
        None => debug!("Ignoring update of {kind:?}[{index}].{field:?}: no such entry or field"),
    }
    next
}

fn experience_field(entry: &mut ExperienceEntry, field: EntryField) -> Option<&mut String> {
    match field {
        EntryField::Title => Some(&mut entry.title),
        EntryField::Company => Some(&mut entry.company),
        EntryField::Location => Some(&mut entry.location),
        EntryField::StartDate => Some(&mut entry.start_date),
        EntryField::EndDate => Some(&mut entry.end_date),
        _ => None,
    }
}

fn education_field(entry: &mut EducationEntry, field: EntryField) -> Option<&mut String> {
    match field {
        EntryField::Degree => Some(&mut entry.degree),
        EntryField::School => Some(&mut entry.school),
        EntryField::Location => Some(&mut entry.location),
        EntryField::GraduationDate => Some(&mut entry.graduation_date),
        EntryField::Gpa => Some(&mut entry.gpa),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets of one experience entry
// ────────────────────────────────────────────────────────────────────────────

pub fn add_bullet(doc: &ResumeDocument, entry: usize, text: impl Into<String>) -> ResumeDocument {
    let mut next = doc.clone();
    match next.sections.experience.get_mut(entry) {
        Some(e) => e.bullets.push(text.into()),
        None => debug!("Ignoring bullet add on missing experience[{entry}]"),
    }
    next
}

pub fn remove_bullet(doc: &ResumeDocument, entry: usize, index: usize) -> ResumeDocument {
    let mut next = doc.clone();
    match next.sections.experience.get_mut(entry) {
        Some(e) => remove_at(&mut e.bullets, index, "bullet"),
        None => debug!("Ignoring bullet removal on missing experience[{entry}]"),
    }
    next
}

pub fn update_bullet(
    doc: &ResumeDocument,
    entry: usize,
    index: usize,
    text: impl Into<String>,
) -> ResumeDocument {
    let mut next = doc.clone();
    let slot = next
        .sections
        .experience
        .get_mut(entry)
        .and_then(|e| e.bullets.get_mut(index));
    match slot {
        Some(slot) => *slot = text.into(),
        None => debug!("Ignoring update of experience[{entry}].bullets[{index}]"),
    }
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Skill lines
// ────────────────────────────────────────────────────────────────────────────

pub fn add_skill_line(doc: &ResumeDocument, line: impl Into<String>) -> ResumeDocument {
    let mut next = doc.clone();
    next.sections.skills.push(line.into());
    next
}

pub fn remove_skill_line(doc: &ResumeDocument, index: usize) -> ResumeDocument {
    let mut next = doc.clone();
    remove_at(&mut next.sections.skills, index, "skill line");
    next
}

pub fn update_skill_line(
    doc: &ResumeDocument,
    index: usize,
    line: impl Into<String>,
) -> ResumeDocument {
    let mut next = doc.clone();
    match next.sections.skills.get_mut(index) {
        Some(slot) => *slot = line.into(),
        None => debug!("Ignoring update of skills[{index}]"),
    }
    next
}

fn remove_at<T>(items: &mut Vec<T>, index: usize, what: &str) {
    if index < items.len() {
        items.remove(index);
    } else {
        debug!(
            "Ignoring removal of {what} {index}: only {} present",
            items.len()
        );
    }
}
