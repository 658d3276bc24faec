//! Layout configuration: page margins, vertical spacing and font sizes.
//!
//! Margins are millimetres; spacing and font sizes are points. Every stored
//! value is an integer inside the range its [`LayoutField`] declares.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Layout groups
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    /// Space above each section heading.
    pub section_spacing: u32,
    /// Space between entries inside a section.
    pub item_spacing: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fonts {
    pub name_size: u32,
    pub section_size: u32,
    pub content_size: u32,
}

/// Presentation parameters of a résumé, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub margins: Margins,
    pub spacing: Spacing,
    pub fonts: Fonts,
}

impl Default for Layout {
    fn default() -> Self {
        default_layout()
    }
}

/// The fixed default layout block: A4-style 20mm/15mm margins, 24/14/11pt type.
pub fn default_layout() -> Layout {
    Layout {
        margins: Margins {
            top: LayoutField::MarginTop.default_value(),
            bottom: LayoutField::MarginBottom.default_value(),
            left: LayoutField::MarginLeft.default_value(),
            right: LayoutField::MarginRight.default_value(),
        },
        spacing: Spacing {
            section_spacing: LayoutField::SectionSpacing.default_value(),
            item_spacing: LayoutField::ItemSpacing.default_value(),
        },
        fonts: Fonts {
            name_size: LayoutField::NameSize.default_value(),
            section_size: LayoutField::SectionSize.default_value(),
            content_size: LayoutField::ContentSize.default_value(),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Individual numeric fields
// ────────────────────────────────────────────────────────────────────────────

/// One numeric layout setting, addressable on its own by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutField {
    NameSize,
    SectionSize,
    ContentSize,
    SectionSpacing,
    ItemSpacing,
    MarginTop,
    MarginBottom,
    MarginLeft,
    MarginRight,
}

impl LayoutField {
    pub const ALL: [LayoutField; 9] = [
        LayoutField::NameSize,
        LayoutField::SectionSize,
        LayoutField::ContentSize,
        LayoutField::SectionSpacing,
        LayoutField::ItemSpacing,
        LayoutField::MarginTop,
        LayoutField::MarginBottom,
        LayoutField::MarginLeft,
        LayoutField::MarginRight,
    ];

    /// Inclusive range of accepted values.
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            LayoutField::NameSize => 18..=32,
            LayoutField::SectionSize => 10..=18,
            LayoutField::ContentSize => 9..=14,
            LayoutField::SectionSpacing => 6..=20,
            LayoutField::ItemSpacing => 2..=12,
            LayoutField::MarginTop | LayoutField::MarginBottom => 10..=50,
            LayoutField::MarginLeft | LayoutField::MarginRight => 10..=40,
        }
    }

    /// Value used when the editor receives something that is not a number.
    pub fn default_value(self) -> u32 {
        match self {
            LayoutField::NameSize => 24,
            LayoutField::SectionSize => 14,
            LayoutField::ContentSize => 11,
            LayoutField::SectionSpacing => 12,
            LayoutField::ItemSpacing => 6,
            LayoutField::MarginTop | LayoutField::MarginBottom => 20,
            LayoutField::MarginLeft | LayoutField::MarginRight => 15,
        }
    }

    /// Clamps an arbitrary integer into this field's range.
    pub fn clamp(self, value: i64) -> u32 {
        let range = self.range();
        let (lo, hi) = (i64::from(*range.start()), i64::from(*range.end()));
        // Result lies in [lo, hi], both of which came from u32.
        value.clamp(lo, hi) as u32
    }

    pub fn get(self, layout: &Layout) -> u32 {
        match self {
            LayoutField::NameSize => layout.fonts.name_size,
            LayoutField::SectionSize => layout.fonts.section_size,
            LayoutField::ContentSize => layout.fonts.content_size,
            LayoutField::SectionSpacing => layout.spacing.section_spacing,
            LayoutField::ItemSpacing => layout.spacing.item_spacing,
            LayoutField::MarginTop => layout.margins.top,
            LayoutField::MarginBottom => layout.margins.bottom,
            LayoutField::MarginLeft => layout.margins.left,
            LayoutField::MarginRight => layout.margins.right,
        }
    }

    /// Writes `value` without range checking; callers clamp first.
    pub(crate) fn set(self, layout: &mut Layout, value: u32) {
        let slot = match self {
            LayoutField::NameSize => &mut layout.fonts.name_size,
            LayoutField::SectionSize => &mut layout.fonts.section_size,
            LayoutField::ContentSize => &mut layout.fonts.content_size,
            LayoutField::SectionSpacing => &mut layout.spacing.section_spacing,
            LayoutField::ItemSpacing => &mut layout.spacing.item_spacing,
            LayoutField::MarginTop => &mut layout.margins.top,
            LayoutField::MarginBottom => &mut layout.margins.bottom,
            LayoutField::MarginLeft => &mut layout.margins.left,
            LayoutField::MarginRight => &mut layout.margins.right,
        };
        *slot = value;
    }
}

impl Layout {
    /// True when every field sits inside its declared range.
    pub fn is_within_ranges(&self) -> bool {
        LayoutField::ALL
            .iter()
            .all(|field| field.range().contains(&field.get(self)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Partial layout updates
// ────────────────────────────────────────────────────────────────────────────

// Patch values are raw form input: numbers, numeric strings, or junk. They
// are interpreted by `form_number` when the patch is applied.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_spacing: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_spacing: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_size: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_size: Option<Value>,
}

/// A partial layout. Absent groups and absent fields leave the current
/// value untouched. A present field is clamped into range, or reset to its
/// default when it is not a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<MarginsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontsPatch>,
}

impl LayoutPatch {
    /// Flattens the patch into `(field, parsed value)` pairs for the fields
    /// it names. `None` marks input that is not a number.
    pub fn entries(&self) -> Vec<(LayoutField, Option<i64>)> {
        let mut out = Vec::new();
        if let Some(m) = &self.margins {
            push_present(&mut out, LayoutField::MarginTop, m.top.as_ref());
            push_present(&mut out, LayoutField::MarginBottom, m.bottom.as_ref());
            push_present(&mut out, LayoutField::MarginLeft, m.left.as_ref());
            push_present(&mut out, LayoutField::MarginRight, m.right.as_ref());
        }
        if let Some(s) = &self.spacing {
            push_present(&mut out, LayoutField::SectionSpacing, s.section_spacing.as_ref());
            push_present(&mut out, LayoutField::ItemSpacing, s.item_spacing.as_ref());
        }
        if let Some(f) = &self.fonts {
            push_present(&mut out, LayoutField::NameSize, f.name_size.as_ref());
            push_present(&mut out, LayoutField::SectionSize, f.section_size.as_ref());
            push_present(&mut out, LayoutField::ContentSize, f.content_size.as_ref());
        }
        out
    }
}

fn push_present(
    out: &mut Vec<(LayoutField, Option<i64>)>,
    field: LayoutField,
    value: Option<&Value>,
) {
    if let Some(v) = value {
        out.push((field, form_number(v)));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form input
// ────────────────────────────────────────────────────────────────────────────

/// Parses number-field input the way an integer form parser does: optional
/// leading whitespace and sign, then the leading run of digits. Anything
/// after the digits is ignored (`"14pt"` → 14, `"12.7"` → 12). Returns
/// `None` when there are no leading digits.
pub fn parse_form_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    // Saturate absurdly long digit runs; they clamp to the range end anyway.
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Interprets a JSON form value as an integer. Numbers truncate toward zero;
/// strings go through [`parse_form_int`]; anything else is non-numeric.
pub fn form_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_form_int(s),
        _ => None,
    }
}
