//! LaTeX source generation for the compilation service.
//!
//! The output targets XeTeX-compatible engines (it loads `fontspec`). All
//! user text goes through [`escape_latex`]; layout numbers are emitted as-is.

use crate::document::{EducationEntry, ExperienceEntry, Layout, PersonalInfo, ResumeDocument};

const CONTACT_SEPARATOR: &str = " $|$ ";

/// Escapes the characters LaTeX treats specially in running text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Builds a complete LaTeX document for `doc`.
pub fn generate_latex(doc: &ResumeDocument) -> String {
    let sections = &doc.sections;
    let mut tex = preamble(&doc.layout);

    tex.push_str("\\begin{document}\n\n");
    tex.push_str(&header(&doc.layout, &sections.personal));

    if !sections.experience.is_empty() {
        tex.push_str("\\section{Experience}\n");
        for entry in &sections.experience {
            tex.push_str(&experience(entry));
        }
    }

    if !sections.education.is_empty() {
        tex.push_str("\\section{Education}\n");
        for entry in &sections.education {
            tex.push_str(&education(entry));
        }
    }

    if !sections.skills.is_empty() {
        tex.push_str(&skills(&sections.skills));
    }

    tex.push_str("\\end{document}\n");
    tex
}

fn preamble(layout: &Layout) -> String {
    let m = &layout.margins;
    let f = &layout.fonts;
    let s = &layout.spacing;
    let mut tex = String::new();

    tex.push_str(&format!(
        "\\documentclass[letterpaper,{}pt]{{article}}\n",
        f.content_size
    ));
    tex.push_str(&format!(
        "\\usepackage[top={}mm,bottom={}mm,left={}mm,right={}mm]{{geometry}}\n",
        m.top, m.bottom, m.left, m.right
    ));
    tex.push_str(
        "\\usepackage{enumitem}\n\
         \\usepackage{titlesec}\n\
         \\usepackage{fontspec}\n\
         \\usepackage{xcolor}\n\
         \\usepackage{array}\n\n\
         \\pagestyle{empty}\n\
         \\setmainfont{Times New Roman}\n\n",
    );
    tex.push_str(&format!(
        "\\titleformat{{\\section}}{{\\fontsize{{{}pt}}{{{}pt}}\\selectfont\\bfseries\\uppercase}}{{}}{{0pt}}{{}}[\\titlerule]\n",
        f.section_size,
        f.section_size + 2
    ));
    tex.push_str(&format!(
        "\\titlespacing*{{\\section}}{{0pt}}{{{}pt}}{{{}pt}}\n\n",
        s.section_spacing, s.item_spacing
    ));
    tex.push_str(
        "\\newcommand{\\resumeSubheading}[4]{\n\
         \\begin{tabular*}{\\textwidth}[t]{l@{\\extracolsep{\\fill}}r}\n\
         \x20   \\textbf{#1} & #2 \\\\\n\
         \x20   \\textit{\\small#3} & \\textit{\\small #4} \\\\\n\
         \\end{tabular*}\\vspace{-7pt}\n\
         }\n\n\
         \\newcommand{\\resumeEducation}[5]{\n\
         \\begin{tabular*}{\\textwidth}[t]{l@{\\extracolsep{\\fill}}r}\n\
         \x20   \\textbf{#1} & #2 \\\\\n\
         \x20   \\textit{\\small#3} & \\textit{\\small #4} \\\\\n\
         \\end{tabular*}\n\
         \\ifx\\relax#5\\relax\n\
         \\else\n\
         \x20   \\vspace{-5pt}\n\
         \x20   \\begin{tabular*}{\\textwidth}[t]{l}\n\
         \x20       \\small GPA: #5 \\\\\n\
         \x20   \\end{tabular*}\n\
         \\fi\n\
         \\vspace{-7pt}\n\
         }\n\n\
         \\newcommand{\\resumeItemListStart}{\\begin{itemize}[leftmargin=0.15in, label=$\\bullet$]}\n\
         \\newcommand{\\resumeItemListEnd}{\\end{itemize}\\vspace{-5pt}}\n\
         \\newcommand{\\resumeItem}[1]{\\item\\small{#1 \\vspace{-2pt}}}\n\n",
    );
    tex
}

fn header(layout: &Layout, personal: &PersonalInfo) -> String {
    let contact = [
        &personal.phone,
        &personal.email,
        &personal.location,
        &personal.website,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .map(|part| escape_latex(part))
    .collect::<Vec<_>>()
    .join(CONTACT_SEPARATOR);

    let name_size = layout.fonts.name_size;
    format!(
        "\\begin{{center}}\n\
         \x20   {{\\fontsize{{{}pt}}{{{}pt}}\\selectfont\\textbf{{{}}}}} \\\\\n\
         \x20   \\vspace{{2pt}}\n\
         \x20   {{\\small {}}}\n\
         \\end{{center}}\n\n",
        name_size,
        name_size + 4,
        escape_latex(&personal.name),
        contact
    )
}

fn experience(entry: &ExperienceEntry) -> String {
    let mut tex = format!(
        "\\resumeSubheading\n    {{{}}}{{{} -- {}}}\n    {{{}}}{{{}}}\n",
        escape_latex(&entry.title),
        escape_latex(&entry.start_date),
        escape_latex(&entry.end_date),
        escape_latex(&entry.company),
        escape_latex(&entry.location),
    );
    // An itemize with no \item is a LaTeX error, so skip the list entirely.
    if !entry.bullets.is_empty() {
        tex.push_str("    \\resumeItemListStart\n");
        for bullet in &entry.bullets {
            tex.push_str(&format!("        \\resumeItem{{{}}}\n", escape_latex(bullet)));
        }
        tex.push_str("    \\resumeItemListEnd\n");
    }
    tex.push('\n');
    tex
}

fn education(entry: &EducationEntry) -> String {
    format!(
        "\\resumeEducation\n    {{{}}}{{{}}}\n    {{{}}}{{{}}}\n    {{{}}}\n\n",
        escape_latex(&entry.degree),
        escape_latex(&entry.graduation_date),
        escape_latex(&entry.school),
        escape_latex(&entry.location),
        escape_latex(&entry.gpa),
    )
}

fn skills(lines: &[String]) -> String {
    let body = lines
        .iter()
        .map(|line| match line.split_once(':') {
            Some((category, items)) => format!(
                "        \\textbf{{{}:}} {}",
                escape_latex(category.trim()),
                escape_latex(items.trim())
            ),
            None => format!("        {}", escape_latex(line)),
        })
        .collect::<Vec<_>>()
        .join(" \\\\\n");

    format!(
        "\\section{{Technical Skills}}\n\
         \\begin{{itemize}}[leftmargin=0.15in, label={{}}]\n\
         \x20   \\small{{\\item{{\n\
         {body}\n\
         \x20   }}}}\n\
         \\end{{itemize}}\n\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::default_template;

    #[test]
    fn test_escape_latex_specials() {
        assert_eq!(escape_latex("R&D 50% $5 #1 a_b"), "R\\&D 50\\% \\$5 \\#1 a\\_b");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(escape_latex("a\\b"), "a\\textbackslash{}b");
        assert_eq!(escape_latex("~^"), "\\textasciitilde{}\\textasciicircum{}");
        assert_eq!(escape_latex("plain"), "plain");
    }

    #[test]
    fn test_preamble_uses_layout_values() {
        let mut doc = default_template();
        doc.layout.fonts.content_size = 12;
        doc.layout.fonts.section_size = 16;
        doc.layout.margins.left = 25;
        let tex = generate_latex(&doc);
        assert!(tex.starts_with("\\documentclass[letterpaper,12pt]{article}\n"));
        assert!(tex.contains("top=20mm,bottom=20mm,left=25mm,right=15mm"));
        assert!(tex.contains("\\fontsize{16pt}{18pt}"));
        assert!(tex.contains("\\titlespacing*{\\section}{0pt}{12pt}{6pt}"));
        assert!(tex.contains("\\fontsize{24pt}{28pt}\\selectfont\\textbf{John Doe}"));
        assert!(tex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_contact_line_skips_empty_fields() {
        let mut doc = default_template();
        doc.sections.personal.phone.clear();
        doc.sections.personal.website.clear();
        let tex = generate_latex(&doc);
        assert!(tex.contains("{\\small john.doe@email.com $|$ City, State}"));
    }

    #[test]
    fn test_experience_block_and_escaped_bullets() {
        let mut doc = default_template();
        doc.sections.experience[0].bullets = vec!["Cut costs by 40% & more".to_string()];
        let tex = generate_latex(&doc);
        assert!(tex.contains("\\section{Experience}"));
        assert!(tex.contains("{Software Engineer}{2022 -- Present}"));
        assert!(tex.contains("\\resumeItem{Cut costs by 40\\% \\& more}"));
    }

    #[test]
    fn test_experience_without_bullets_has_no_list() {
        let mut doc = default_template();
        doc.sections.experience[0].bullets.clear();
        let tex = generate_latex(&doc);
        let body = tex.split("\\begin{document}").nth(1).unwrap();
        assert!(!body.contains("\\resumeItemListStart"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut doc = default_template();
        doc.sections.experience.clear();
        doc.sections.education.clear();
        doc.sections.skills.clear();
        let tex = generate_latex(&doc);
        assert!(!tex.contains("\\section{Experience}"));
        assert!(!tex.contains("\\section{Education}"));
        assert!(!tex.contains("\\section{Technical Skills}"));
    }

    #[test]
    fn test_education_passes_gpa_argument() {
        let tex = generate_latex(&default_template());
        assert!(tex.contains(
            "{Bachelor of Science in Computer Science}{2022}\n    {University Name}{City, State}\n    {3.8}"
        ));
    }

    #[test]
    fn test_skills_split_on_colon_and_join_lines() {
        let mut doc = default_template();
        doc.sections.skills = vec![
            "Languages: Rust, Go".to_string(),
            "Git, Docker".to_string(),
        ];
        let tex = generate_latex(&doc);
        assert!(tex.contains("\\textbf{Languages:} Rust, Go \\\\\n        Git, Docker\n"));
    }
}
