//! "Corporate Professional" resume template: centred header, ruled section
//! titles, dates and locations right-aligned against the text column.

use serde::Serialize;

use crate::layout::font_metrics::FontStyle;
use crate::layout::urls::{absolute_url, clean_url};
use crate::layout::wrap::split_text_to_size;
use crate::models::resume::{Education, Experience, PersonalInfo, Project, ResumeData, SkillGroup};
use crate::render::document::{Align, Area, Document, BLACK, LINK_BLUE};

const MARGIN: f32 = 20.0;
const WIDTH: f32 = 170.0;
const CENTER_X: f32 = 105.0;
const TOP_AFTER_BREAK: f32 = 20.0;
const LEADING: f32 = 5.0;
const SEPARATOR: &str = "  |  ";
const BULLET: &str = "\u{2022} ";

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const TEMPLATES: &[TemplateInfo] = &[TemplateInfo {
    id: "corporate",
    name: "Corporate Professional",
    description:
        "Standard corporate/academic layout with centered headers and section dividers.",
}];

/// `Ada Lovelace` → `Ada_Lovelace_Resume.pdf`. Characters unsafe in a
/// Content-Disposition filename are dropped.
pub fn resume_file_name(full_name: &str) -> String {
    let stem = full_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect::<String>();
    if stem.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{stem}_Resume.pdf")
    }
}

/// Lays the resume out page by page.
pub fn layout_resume(data: &ResumeData) -> Document {
    let mut page = ResumePage {
        doc: Document::new(),
        y: 15.0,
    };

    page.header(&data.personal_info);

    if !data.personal_info.summary.trim().is_empty() {
        page.summary(&data.personal_info.summary);
    }
    if !data.experience.is_empty() {
        page.section_header("Experience");
        for exp in &data.experience {
            page.experience(exp);
        }
    }
    if !data.projects.is_empty() {
        page.section_header("Projects");
        for project in &data.projects {
            page.project(project);
        }
    }
    if !data.education.is_empty() {
        page.section_header("Education");
        for edu in &data.education {
            page.education(edu);
        }
    }
    let skills: Vec<&SkillGroup> = data
        .skills
        .iter()
        .filter(|s| !s.category.trim().is_empty() || !s.skills.is_empty())
        .collect();
    if !skills.is_empty() {
        page.section_header("Skills");
        for group in skills {
            page.skill_group(group);
        }
    }
    let honors: Vec<&str> = data
        .honors
        .iter()
        .map(|h| h.trim())
        .filter(|h| !h.is_empty())
        .collect();
    if !honors.is_empty() {
        page.section_header("Honors & Awards");
        for honor in honors {
            page.honor(honor);
        }
    }

    page.doc
}

struct ContactItem {
    label: &'static str,
    text: String,
    url: Option<String>,
}

impl ContactItem {
    fn plain(text: &str) -> Self {
        Self {
            label: "",
            text: text.trim().to_string(),
            url: None,
        }
    }

    fn link(label: &'static str, url: &str) -> Self {
        let url = url.trim();
        Self {
            label,
            text: if url.is_empty() { String::new() } else { clean_url(url) },
            url: (!url.is_empty()).then(|| absolute_url(url)),
        }
    }

    fn display(&self) -> String {
        format!("{}{}", self.label, self.text)
    }
}

/// Cursor over the document being laid out.
struct ResumePage {
    doc: Document,
    /// Baseline of the next line, mm from the top of the page.
    y: f32,
}

impl ResumePage {
    fn break_if_below(&mut self, limit: f32) {
        if self.y > limit {
            self.doc.add_page();
            self.y = TOP_AFTER_BREAK;
        }
    }

    fn header(&mut self, info: &PersonalInfo) {
        self.doc.set_font(FontStyle::Bold, 22.0);
        self.doc
            .text(&info.full_name.trim().to_uppercase(), CENTER_X, self.y, Align::Center);
        self.y += 8.0;

        self.doc.set_font(FontStyle::Normal, 9.0);
        let line1 = vec![
            ContactItem::plain(&info.phone),
            ContactItem::plain(&info.email),
            ContactItem::link("", &info.portfolio),
        ];
        self.contact_line(line1);
        self.y += LEADING;

        let line2 = vec![
            ContactItem::link("LinkedIn: ", &info.linkedin),
            ContactItem::link("GitHub: ", &info.github),
            ContactItem::link("LeetCode: ", &info.leetcode),
        ];
        if self.contact_line(line2) {
            self.y += LEADING;
        }
        self.y += 5.0;
    }

    /// Centred `a  |  b  |  c` line; link areas cover the value, not the label.
    /// Returns whether anything was drawn.
    fn contact_line(&mut self, items: Vec<ContactItem>) -> bool {
        let items: Vec<ContactItem> = items.into_iter().filter(|i| !i.text.is_empty()).collect();
        if items.is_empty() {
            return false;
        }

        let line = items
            .iter()
            .map(ContactItem::display)
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        self.doc.text(&line, CENTER_X, self.y, Align::Center);

        let mut x = CENTER_X - self.doc.width(&line) / 2.0;
        let last = items.len() - 1;
        for (idx, item) in items.iter().enumerate() {
            if let Some(url) = &item.url {
                let area = Area {
                    x: x + self.doc.width(item.label),
                    top: self.y - 4.0,
                    width: self.doc.width(&item.text),
                    height: 5.0,
                };
                self.doc.link(area, url.clone());
            }
            x += self.doc.width(&item.display());
            if idx < last {
                x += self.doc.width(SEPARATOR);
            }
        }
        true
    }

    fn section_header(&mut self, title: &str) {
        self.break_if_below(270.0);
        self.y += 5.0;
        self.doc.set_font(FontStyle::Bold, 11.0);
        self.doc
            .text(&title.to_uppercase(), MARGIN, self.y, Align::Left);
        self.y += 2.0;
        self.doc.rule(MARGIN, MARGIN + WIDTH, self.y, 0.2);
        self.y += 6.0;
    }

    fn summary(&mut self, summary: &str) {
        self.section_header("Summary");
        self.doc.set_font(FontStyle::Normal, 10.0);
        let lines = split_text_to_size(summary.trim(), FontStyle::Normal, 10.0, WIDTH);
        self.doc.text_lines(&lines, MARGIN, self.y, LEADING);
        self.y += lines.len() as f32 * LEADING + 5.0;
    }

    /// Bold title left, normal text right-aligned on the same baseline.
    fn title_row(&mut self, left: &str, left_style: FontStyle, right: &str) {
        self.doc.set_font(left_style, 10.0);
        self.doc.text(left.trim(), MARGIN, self.y, Align::Left);
        self.doc.set_style(FontStyle::Normal);
        self.doc.text(right, MARGIN + WIDTH, self.y, Align::Right);
    }

    fn bullets(&mut self, text: &str) {
        self.doc.set_font(FontStyle::Normal, 10.0);
        let lines = split_text_to_size(text.trim(), FontStyle::Normal, 10.0, WIDTH - 5.0);
        for line in lines.iter().filter(|l| !l.is_empty()) {
            self.break_if_below(280.0);
            self.doc
                .text(&format!("{BULLET}{line}"), MARGIN + 2.0, self.y, Align::Left);
            self.y += LEADING;
        }
    }

    fn experience(&mut self, exp: &Experience) {
        self.break_if_below(260.0);

        self.title_row(&exp.role, FontStyle::Bold, &date_range(&exp.start_date, &exp.end_date));
        self.y += 5.0;

        let location = if exp.location.trim().is_empty() {
            "Remote"
        } else {
            exp.location.trim()
        };
        self.title_row(&exp.company, FontStyle::Italic, location);
        self.y += 6.0;

        self.bullets(&exp.description);
        self.y += 2.0;
    }

    fn project(&mut self, project: &Project) {
        self.break_if_below(260.0);

        let title = project.title.trim();
        self.doc.set_font(FontStyle::Bold, 10.0);
        self.doc.text(title, MARGIN, self.y, Align::Left);
        let title_end = MARGIN + self.doc.width(title);

        let link = project.link.trim();
        if !link.is_empty() {
            self.doc.set_style(FontStyle::Normal);
            self.doc.set_color(LINK_BLUE);
            self.doc.text("| Link", title_end + 5.0, self.y, Align::Left);
            let area = Area {
                x: title_end + 5.0 + self.doc.width("| "),
                top: self.y - 4.0,
                width: self.doc.width("Link"),
                height: 5.0,
            };
            self.doc.link(area, absolute_url(link));
            self.doc.set_color(BLACK);
        }
        self.y += LEADING;

        let technologies: Vec<&str> = project
            .technologies
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if !technologies.is_empty() {
            self.doc.set_font(FontStyle::Italic, 9.0);
            let lines = split_text_to_size(
                &format!("Tech: {}", technologies.join(", ")),
                FontStyle::Italic,
                9.0,
                WIDTH - 5.0,
            );
            for line in &lines {
                self.break_if_below(280.0);
                self.doc.text(line, MARGIN + 2.0, self.y, Align::Left);
                self.y += LEADING;
            }
        }

        self.bullets(&project.description);
        self.y += 2.0;
    }

    fn education(&mut self, edu: &Education) {
        self.break_if_below(270.0);

        self.title_row(
            &edu.institution,
            FontStyle::Bold,
            &date_range(&edu.start_date, &edu.end_date),
        );
        self.y += 5.0;
        self.title_row(&edu.degree, FontStyle::Italic, edu.location.trim());
        self.y += 5.0;

        let cgpa = edu.cgpa.trim();
        if cgpa.is_empty() {
            self.y += 2.0;
        } else {
            self.doc.set_font(FontStyle::Bold, 10.0);
            self.doc.text(
                &format!("{BULLET}CGPA: {cgpa}"),
                MARGIN + 2.0,
                self.y,
                Align::Left,
            );
            self.y += 6.0;
        }
    }

    fn skill_group(&mut self, group: &SkillGroup) {
        self.break_if_below(275.0);

        self.doc.set_font(FontStyle::Bold, 10.0);
        let label = format!("{}: ", group.category.trim());
        self.doc.text(&label, MARGIN, self.y, Align::Left);
        let label_width = self.doc.width(&label);

        self.doc.set_style(FontStyle::Normal);
        let skills = group
            .skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let lines = split_text_to_size(
            &skills,
            FontStyle::Normal,
            10.0,
            WIDTH - label_width - 5.0,
        );
        self.doc
            .text_lines(&lines, MARGIN + label_width + 2.0, self.y, LEADING);
        self.y += lines.len() as f32 * LEADING + 2.0;
    }

    fn honor(&mut self, honor: &str) {
        self.break_if_below(280.0);
        self.doc.set_font(FontStyle::Normal, 10.0);
        let lines = split_text_to_size(honor, FontStyle::Normal, 10.0, WIDTH - 5.0);
        for (idx, line) in lines.iter().enumerate() {
            let prefix = if idx == 0 { BULLET } else { "  " };
            self.doc
                .text(&format!("{prefix}{line}"), MARGIN + 2.0, self.y, Align::Left);
            self.y += LEADING;
        }
        self.y += 1.0;
    }
}

/// `start - end`, or whichever side is present.
fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}
