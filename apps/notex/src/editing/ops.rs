//! Serializable edit commands, so a remote editing surface can drive the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{
    form_number, EducationEntry, ExperienceEntry, LayoutField, LayoutPatch, ResumeDocument,
    PLACEHOLDER_BULLET, PLACEHOLDER_SKILL_LINE,
};
use crate::editing::{
    add_bullet, add_entry, add_skill_line, remove_bullet, remove_entry, remove_skill_line,
    reset_layout, set_layout_number, update_bullet, update_entry_field, update_layout,
    update_section, update_skill_line, EntryField, EntryKind, NewEntry, Section,
};

/// One editor action. Wire form: `{"op": "removeEntry", "kind": "experience", "index": 0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Edit {
    UpdateSection {
        section: Section,
    },
    UpdateLayout {
        patch: LayoutPatch,
    },
    /// `value` is whatever the form produced: a JSON number, a string, or null.
    SetLayoutField {
        field: LayoutField,
        #[serde(default)]
        value: Value,
    },
    ResetLayout,
    /// Appends `entry`, or the experience placeholder when absent.
    AddExperience {
        #[serde(default)]
        entry: Option<ExperienceEntry>,
    },
    AddEducation {
        #[serde(default)]
        entry: Option<EducationEntry>,
    },
    RemoveEntry {
        kind: EntryKind,
        index: usize,
    },
    UpdateEntryField {
        kind: EntryKind,
        index: usize,
        field: EntryField,
        value: String,
    },
    AddBullet {
        entry: usize,
        #[serde(default)]
        text: Option<String>,
    },
    RemoveBullet {
        entry: usize,
        index: usize,
    },
    UpdateBullet {
        entry: usize,
        index: usize,
        text: String,
    },
    AddSkillLine {
        #[serde(default)]
        line: Option<String>,
    },
    RemoveSkillLine {
        index: usize,
    },
    UpdateSkillLine {
        index: usize,
        line: String,
    },
}

/// Applies one edit, returning the resulting document.
pub fn apply(doc: &ResumeDocument, edit: &Edit) -> ResumeDocument {
    match edit {
        Edit::UpdateSection { section } => update_section(doc, section.clone()),
        Edit::UpdateLayout { patch } => update_layout(doc, patch),
        Edit::SetLayoutField { field, value } => set_layout_number(doc, *field, form_number(value)),
        Edit::ResetLayout => reset_layout(doc),
        Edit::AddExperience { entry } => add_entry(
            doc,
            NewEntry::Experience(entry.clone().unwrap_or_else(ExperienceEntry::placeholder)),
        ),
        Edit::AddEducation { entry } => add_entry(
            doc,
            NewEntry::Education(entry.clone().unwrap_or_else(EducationEntry::placeholder)),
        ),
        Edit::RemoveEntry { kind, index } => remove_entry(doc, *kind, *index),
        Edit::UpdateEntryField {
            kind,
            index,
            field,
            value,
        } => update_entry_field(doc, *kind, *index, *field, value.as_str()),
        Edit::AddBullet { entry, text } => add_bullet(
            doc,
            *entry,
            text.as_deref().unwrap_or(PLACEHOLDER_BULLET),
        ),
        Edit::RemoveBullet { entry, index } => remove_bullet(doc, *entry, *index),
        Edit::UpdateBullet { entry, index, text } => {
            update_bullet(doc, *entry, *index, text.as_str())
        }
        Edit::AddSkillLine { line } => {
            add_skill_line(doc, line.as_deref().unwrap_or(PLACEHOLDER_SKILL_LINE))
        }
        Edit::RemoveSkillLine { index } => remove_skill_line(doc, *index),
        Edit::UpdateSkillLine { index, line } => update_skill_line(doc, *index, line.as_str()),
    }
}

/// Applies edits in order.
pub fn apply_all<'a>(
    doc: &ResumeDocument,
    edits: impl IntoIterator<Item = &'a Edit>,
) -> ResumeDocument {
    edits
        .into_iter()
        .fold(doc.clone(), |current, edit| apply(&current, edit))
}
