//! Splitting a generated plan into titled sections and deciding how each
//! one is displayed.
//!
//! A heading is `###`, one whitespace character, one or more ASCII digits,
//! a `.`, and one more whitespace character (e.g. `### 4. `). Everything
//! between two headings is one section: its first line is the title, the
//! rest is the body. Text before the first heading is kept as a preamble
//! but never treated as a section.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How a section body is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Monospace block with code fences removed (code and schematics).
    Preformatted,
    /// Line-wrapped text, one display line per source line.
    Prose,
}

/// Decorative icon chosen from the section title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionIcon {
    Function,
    Pinout,
    Schematic,
    Code,
    Notes,
    Upgrade,
    Default,
}

impl SectionIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            SectionIcon::Function => "ℹ",
            SectionIcon::Pinout => "⇄",
            SectionIcon::Schematic => "⌁",
            SectionIcon::Code => "⌨",
            SectionIcon::Notes => "✎",
            SectionIcon::Upgrade => "↑",
            SectionIcon::Default => "◆",
        }
    }
}

/// One parsed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub body: String,
    pub kind: SectionKind,
    pub icon: SectionIcon,
}

/// Result of splitting a plan on its headings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPlan {
    /// Non-blank text before the first heading, if any.
    pub preamble: Option<String>,
    pub sections: Vec<Section>,
}

/// Display-ready section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedBody {
    Code(String),
    Prose(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    pub title: String,
    pub icon: SectionIcon,
    pub body: RenderedBody,
}

/// What the output pane shows for a given plan text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanView {
    /// No plan yet.
    Welcome,
    /// A non-empty response with no recognizable headings.
    Unstructured { raw: String },
    Sections(Vec<RenderedSection>),
}

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

/// Titles containing any of these render as preformatted blocks.
const PREFORMATTED_KEYWORDS: &[&str] = &["code", "schematic", "کد", "شماتیک"];

/// First match wins, in table order.
const ICON_KEYWORDS: &[(SectionIcon, &[&str])] = &[
    (
        SectionIcon::Function,
        &["function", "behavior", "behaviour", "عملکرد"],
    ),
    (
        SectionIcon::Pinout,
        &["pinout", "connection", "wiring", "اتصالات"],
    ),
    (SectionIcon::Schematic, &["schematic", "شماتیک"]),
    (SectionIcon::Code, &["code", "کد"]),
    (SectionIcon::Notes, &["note", "نکات"]),
    (SectionIcon::Upgrade, &["upgrade", "improvement", "ارتقاء"]),
];

fn title_matches(title: &str, keywords: &[&str]) -> bool {
    let lowered = title.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}

pub fn classify_kind(title: &str) -> SectionKind {
    if title_matches(title, PREFORMATTED_KEYWORDS) {
        SectionKind::Preformatted
    } else {
        SectionKind::Prose
    }
}

pub fn classify_icon(title: &str) -> SectionIcon {
    ICON_KEYWORDS
        .iter()
        .find(|(_, keywords)| title_matches(title, keywords))
        .map(|(icon, _)| *icon)
        .unwrap_or(SectionIcon::Default)
}

// ---------------------------------------------------------------------------
// Heading scanner
// ---------------------------------------------------------------------------

/// If `s` begins with a heading marker, return the marker's byte length.
fn heading_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix("###")?;
    let mut chars = rest.char_indices();

    let (_, c) = chars.next()?;
    if !c.is_whitespace() {
        return None;
    }

    let mut digits = 0usize;
    loop {
        let (_, c) = chars.next()?;
        if c.is_ascii_digit() {
            digits += 1;
        } else if c == '.' && digits > 0 {
            break;
        } else {
            return None;
        }
    }

    let (i, c) = chars.next()?;
    if !c.is_whitespace() {
        return None;
    }
    Some(3 + i + c.len_utf8())
}

/// Byte ranges of every heading marker, leftmost first, non-overlapping.
fn find_headings(text: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(rel) = text[from..].find("###") {
        let start = from + rel;
        match heading_len(&text[start..]) {
            Some(len) => {
                found.push((start, start + len));
                from = start + len;
            }
            // `#` is one byte, so this stays on a char boundary.
            None => from = start + 1,
        }
    }
    found
}

fn split_section(chunk: &str) -> Section {
    let (title, body) = match chunk.find('\n') {
        Some(nl) => (chunk[..nl].trim(), chunk[nl + 1..].trim()),
        None => (chunk.trim(), ""),
    };
    Section {
        title: title.to_string(),
        body: body.to_string(),
        kind: classify_kind(title),
        icon: classify_icon(title),
    }
}

/// Split `text` on its headings.
///
/// Chunks that are blank after trimming are dropped. No reordering or
/// completeness check is done: whatever sections are present come back in
/// source order.
pub fn parse_sections(text: &str) -> ParsedPlan {
    let headings = find_headings(text);
    let Some(&(first_start, _)) = headings.first() else {
        let preamble = text.trim();
        return ParsedPlan {
            preamble: (!preamble.is_empty()).then(|| preamble.to_string()),
            sections: Vec::new(),
        };
    };

    let preamble = text[..first_start].trim();
    let sections = headings
        .iter()
        .enumerate()
        .map(|(i, &(_, body_start))| {
            let end = headings.get(i + 1).map_or(text.len(), |&(next, _)| next);
            &text[body_start..end]
        })
        .filter(|chunk| !chunk.trim().is_empty())
        .map(split_section)
        .collect();

    ParsedPlan {
        preamble: (!preamble.is_empty()).then(|| preamble.to_string()),
        sections,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Opening or closing code fence, with an optional language tag and the
/// newline that follows it.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[A-Za-z0-9_+#-]*[ \t]*\n?").expect("fence pattern is valid")
});

/// Remove Markdown code-fence markers, keeping the fenced content.
pub fn strip_code_fences(body: &str) -> String {
    FENCE.replace_all(body, "").trim_end().to_string()
}

impl Section {
    pub fn render(&self) -> RenderedSection {
        let body = match self.kind {
            SectionKind::Preformatted => RenderedBody::Code(strip_code_fences(&self.body)),
            SectionKind::Prose => {
                RenderedBody::Prose(self.body.split('\n').map(str::to_string).collect())
            }
        };
        RenderedSection {
            title: self.title.clone(),
            icon: self.icon,
            body,
        }
    }
}

/// Decide what to display for `plan`.
///
/// An empty string is the "no result yet" state. A non-empty string with no
/// headings is reported as [`PlanView::Unstructured`] rather than silently
/// rendering nothing.
pub fn render(plan: &str) -> PlanView {
    if plan.is_empty() {
        return PlanView::Welcome;
    }
    let parsed = parse_sections(plan);
    if parsed.sections.is_empty() {
        return PlanView::Unstructured {
            raw: plan.to_string(),
        };
    }
    PlanView::Sections(parsed.sections.iter().map(Section::render).collect())
}

impl PlanView {
    /// Number of rendered section blocks.
    pub fn section_count(&self) -> usize {
        match self {
            PlanView::Sections(sections) => sections.len(),
            _ => 0,
        }
    }

    /// Plain-text rendering for non-interactive output.
    pub fn to_plain_text(&self) -> String {
        match self {
            PlanView::Welcome => String::new(),
            PlanView::Unstructured { raw } => raw.clone(),
            PlanView::Sections(sections) => {
                let mut out = String::new();
                for section in sections {
                    out.push_str(&format!("{} {}\n", section.icon.glyph(), section.title));
                    out.push_str(&"-".repeat(section.title.chars().count() + 2));
                    out.push('\n');
                    match &section.body {
                        RenderedBody::Code(code) => {
                            out.push_str(code);
                            out.push('\n');
                        }
                        RenderedBody::Prose(lines) => {
                            for line in lines {
                                out.push_str(line);
                                out.push('\n');
                            }
                        }
                    }
                    out.push('\n');
                }
                out
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
