//! Visual tree types produced by [`render`](crate::preview::render).
//!
//! The tree carries final style values (points, millimetres, colours) so a
//! preview surface only has to draw it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Style of one block. `None` means "inherit from the enclosing block".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub uppercase: bool,
    pub align: Align,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top_pt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom_pt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left_pt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing_pt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    /// Draw a 1px rule under the block.
    pub rule_below: bool,
}

/// The page box: paper size, padding from the layout margins and base type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyle {
    pub width_mm: f64,
    pub min_height_mm: f64,
    pub padding_top_mm: f64,
    pub padding_right_mm: f64,
    pub padding_bottom_mm: f64,
    pub padding_left_mm: f64,
    pub font_family: &'static str,
    pub font_size_pt: f64,
    pub line_height: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub style: Style,
}

/// A line with one part flush left and one flush right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitLine {
    pub left: String,
    pub right: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualTree {
    pub page: PageStyle,
    pub header: Header,
    /// Non-empty sections in fixed order: experience, education, skills.
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    /// Absent when the name is empty.
    pub name: Option<TextBlock>,
    /// Non-empty contact fields joined with `" • "`.
    pub contact: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub heading: TextBlock,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SectionBody {
    Experience { entries: Vec<ExperienceBlock> },
    Education { entries: Vec<EducationBlock> },
    Skills { style: Style, lines: Vec<SkillLine> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceBlock {
    pub style: Style,
    /// `"{title} - {company}"` against `"{startDate} - {endDate}"`.
    pub heading: SplitLine,
    pub location: TextBlock,
    /// Absent when the entry has no bullets.
    pub bullets: Option<BulletList>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulletList {
    pub style: Style,
    pub items: Vec<TextBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBlock {
    pub style: Style,
    /// Degree against graduation date.
    pub heading: SplitLine,
    /// `"{school}, {location}"` plus `" • GPA: {gpa}"` when a GPA is set.
    pub detail: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLine {
    pub style: Style,
    pub content: SkillText,
}

/// A skill line split at its first colon, or kept whole.
///
/// A labelled line is drawn as the label in bold followed by `:`, then the
/// remainder in the regular weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SkillText {
    Labeled { label: String, remainder: String },
    Plain { text: String },
}
