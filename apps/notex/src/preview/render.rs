use crate::document::{EducationEntry, ExperienceEntry, Layout, PersonalInfo, ResumeDocument};
use crate::preview::tree::{
    Align, BulletList, EducationBlock, ExperienceBlock, Header, PageStyle, SectionBlock,
    SectionBody, SkillLine, SkillText, SplitLine, Style, TextBlock, VisualTree,
};

pub const CONTACT_SEPARATOR: &str = " • ";

const A4_WIDTH_MM: f64 = 210.0;
const A4_HEIGHT_MM: f64 = 297.0;
const TEXT_COLOR: &str = "#000";
const MUTED_COLOR: &str = "#333";

/// Maps a document to its preview tree. Pure: equal input, equal output.
pub fn render(doc: &ResumeDocument) -> VisualTree {
    let layout = &doc.layout;
    let sections = &doc.sections;

    let mut blocks = Vec::new();
    if !sections.experience.is_empty() {
        blocks.push(section(
            layout,
            "EXPERIENCE",
            SectionBody::Experience {
                entries: sections
                    .experience
                    .iter()
                    .map(|e| experience_block(layout, e))
                    .collect(),
            },
        ));
    }
    if !sections.education.is_empty() {
        blocks.push(section(
            layout,
            "EDUCATION",
            SectionBody::Education {
                entries: sections
                    .education
                    .iter()
                    .map(|e| education_block(layout, e))
                    .collect(),
            },
        ));
    }
    if !sections.skills.is_empty() {
        blocks.push(section(
            layout,
            "SKILLS",
            SectionBody::Skills {
                style: content_style(layout),
                lines: sections
                    .skills
                    .iter()
                    .map(|line| SkillLine {
                        style: Style {
                            margin_bottom_pt: Some(item_spacing(layout) / 2.0),
                            line_height: Some(1.4),
                            ..Style::default()
                        },
                        content: split_skill_line(line),
                    })
                    .collect(),
            },
        ));
    }

    VisualTree {
        page: page_style(layout),
        header: header(layout, &sections.personal),
        sections: blocks,
    }
}

/// Joins phone, email, location and website, skipping empty fields.
pub fn format_contact_line(personal: &PersonalInfo) -> String {
    [
        &personal.phone,
        &personal.email,
        &personal.location,
        &personal.website,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .map(String::as_str)
    .collect::<Vec<_>>()
    .join(CONTACT_SEPARATOR)
}

/// Splits at the first `:`; later colons stay in the remainder.
pub fn split_skill_line(line: &str) -> SkillText {
    match line.split_once(':') {
        Some((label, remainder)) => SkillText::Labeled {
            label: label.to_string(),
            remainder: remainder.to_string(),
        },
        None => SkillText::Plain {
            text: line.to_string(),
        },
    }
}

pub fn education_detail(entry: &EducationEntry) -> String {
    let mut detail = format!("{}, {}", entry.school, entry.location);
    if !entry.gpa.is_empty() {
        detail.push_str(&format!("{CONTACT_SEPARATOR}GPA: {}", entry.gpa));
    }
    detail
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

fn page_style(layout: &Layout) -> PageStyle {
    PageStyle {
        width_mm: A4_WIDTH_MM,
        min_height_mm: A4_HEIGHT_MM,
        padding_top_mm: f64::from(layout.margins.top),
        padding_right_mm: f64::from(layout.margins.right),
        padding_bottom_mm: f64::from(layout.margins.bottom),
        padding_left_mm: f64::from(layout.margins.left),
        font_family: "Times, serif",
        font_size_pt: f64::from(layout.fonts.content_size),
        line_height: 1.2,
        color: TEXT_COLOR,
    }
}

fn header(layout: &Layout, personal: &PersonalInfo) -> Header {
    let name = (!personal.name.is_empty()).then(|| TextBlock {
        text: personal.name.clone(),
        style: Style {
            font_size_pt: Some(f64::from(layout.fonts.name_size)),
            bold: true,
            align: Align::Center,
            margin_bottom_pt: Some(item_spacing(layout)),
            line_height: Some(1.1),
            color: Some(TEXT_COLOR),
            ..Style::default()
        },
    });

    Header {
        name,
        contact: TextBlock {
            text: format_contact_line(personal),
            style: Style {
                font_size_pt: Some(f64::from(layout.fonts.content_size)),
                align: Align::Center,
                margin_bottom_pt: Some(f64::from(layout.spacing.section_spacing)),
                line_height: Some(1.2),
                color: Some(TEXT_COLOR),
                ..Style::default()
            },
        },
    }
}

fn section(layout: &Layout, title: &str, body: SectionBody) -> SectionBlock {
    SectionBlock {
        heading: TextBlock {
            text: title.to_string(),
            style: Style {
                font_size_pt: Some(f64::from(layout.fonts.section_size)),
                bold: true,
                uppercase: true,
                margin_top_pt: Some(f64::from(layout.spacing.section_spacing)),
                margin_bottom_pt: Some(item_spacing(layout)),
                letter_spacing_pt: Some(0.5),
                color: Some(TEXT_COLOR),
                rule_below: true,
                ..Style::default()
            },
        },
        body,
    }
}

fn experience_block(layout: &Layout, entry: &ExperienceEntry) -> ExperienceBlock {
    let bullets = (!entry.bullets.is_empty()).then(|| BulletList {
        style: Style {
            margin_left_pt: Some(15.0),
            margin_top_pt: Some(4.0),
            ..Style::default()
        },
        items: entry
            .bullets
            .iter()
            .map(|bullet| TextBlock {
                text: bullet.clone(),
                style: Style {
                    margin_bottom_pt: Some(item_spacing(layout) / 3.0),
                    line_height: Some(1.4),
                    ..Style::default()
                },
            })
            .collect(),
    });

    ExperienceBlock {
        style: Style {
            margin_bottom_pt: Some(item_spacing(layout) * 1.5),
            ..content_style(layout)
        },
        heading: SplitLine {
            left: format!("{} - {}", entry.title, entry.company),
            right: format!("{} - {}", entry.start_date, entry.end_date),
            style: entry_heading_style(),
        },
        location: TextBlock {
            text: entry.location.clone(),
            style: Style {
                italic: true,
                margin_bottom_pt: Some(item_spacing(layout) / 2.0),
                color: Some(MUTED_COLOR),
                ..Style::default()
            },
        },
        bullets,
    }
}

fn education_block(layout: &Layout, entry: &EducationEntry) -> EducationBlock {
    EducationBlock {
        style: content_style(layout),
        heading: SplitLine {
            left: entry.degree.clone(),
            right: entry.graduation_date.clone(),
            style: entry_heading_style(),
        },
        detail: TextBlock {
            text: education_detail(entry),
            style: Style {
                line_height: Some(1.3),
                color: Some(MUTED_COLOR),
                ..Style::default()
            },
        },
    }
}

fn content_style(layout: &Layout) -> Style {
    Style {
        font_size_pt: Some(f64::from(layout.fonts.content_size)),
        margin_bottom_pt: Some(item_spacing(layout)),
        line_height: Some(1.3),
        color: Some(TEXT_COLOR),
        ..Style::default()
    }
}

fn entry_heading_style() -> Style {
    Style {
        bold: true,
        margin_bottom_pt: Some(2.0),
        ..Style::default()
    }
}

fn item_spacing(layout: &Layout) -> f64 {
    f64::from(layout.spacing.item_spacing)
}
