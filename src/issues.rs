use crate::section::{Issue, Section};

/// Longest checklist preview taken from a child's first content line, in chars.
const PREVIEW_LEN: usize = 100;

/// Label applied when no keyword in the title matches.
const DEFAULT_LABEL: &str = "feature";

/// Keywords scanned in the lower-cased title, in this order, and the label each adds.
const KEYWORD_LABELS: &[(&[&str], &str)] = &[
    (&["feature"], "feature"),
    (&["bug", "fix"], "bug"),
    (&["enhancement"], "enhancement"),
    (&["documentation", "docs"], "documentation"),
    (&["api"], "api"),
    (&["ui", "ux"], "ui"),
    (&["test"], "testing"),
    (&["security"], "security"),
    (&["performance"], "performance"),
];

/// Which sections become issues and how they are labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueOptions {
    /// Shallowest heading level turned into an issue (inclusive).
    pub min_level: u8,
    /// Deepest heading level turned into an issue (inclusive).
    pub max_level: u8,
    /// Extra label put in front of every issue's labels when non-empty.
    pub label_prefix: String,
}

impl Default for IssueOptions {
    fn default() -> Self {
        Self {
            min_level: 2,
            max_level: 3,
            label_prefix: String::new(),
        }
    }
}

impl IssueOptions {
    fn in_window(&self, level: u8) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

/// Turn a section forest into issues, visiting every section depth-first.
///
/// Sections outside the level window yield no issue but their descendants are
/// still visited, and always see their direct parent's title as context.
pub fn to_issues(sections: &[Section], options: &IssueOptions) -> Vec<Issue> {
    let mut issues = Vec::new();
    for section in sections {
        collect(section, None, options, &mut issues);
    }
    issues
}

fn collect(section: &Section, parent: Option<&str>, options: &IssueOptions, issues: &mut Vec<Issue>) {
    if options.in_window(section.level) {
        let issue = Issue {
            title: section.title.clone(),
            body: compose_body(section, parent),
            labels: labels_for(&section.title, &options.label_prefix),
        };
        tracing::debug!(title = %issue.title, labels = ?issue.labels, "issue from section");
        issues.push(issue);
    }

    for child in &section.children {
        collect(child, Some(&section.title), options, issues);
    }
}

/// Keyword labels for a title, prefixed by `prefix` when it is non-empty.
pub fn labels_for(title: &str, prefix: &str) -> Vec<String> {
    let title = title.to_lowercase();
    let mut labels: Vec<String> = KEYWORD_LABELS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|keyword| title.contains(keyword)))
        .map(|(_, label)| label.to_string())
        .collect();

    if labels.is_empty() {
        labels.push(DEFAULT_LABEL.to_string());
    }
    if !prefix.is_empty() {
        labels.insert(0, prefix.to_string());
    }
    labels
}

fn compose_body(section: &Section, parent: Option<&str>) -> String {
    let mut parts = Vec::new();

    if let Some(parent) = parent {
        parts.push(format!("> Part of: **{parent}**"));
    }
    if !section.content.is_empty() {
        parts.push(section.content.clone());
    }
    if !section.children.is_empty() {
        parts.push(checklist(&section.children));
    }

    parts.join("\n\n").trim().to_string()
}

fn checklist(children: &[Section]) -> String {
    let mut out = String::from("## Tasks\n");
    for child in children {
        out.push('\n');
        out.push_str("- [ ] **");
        out.push_str(&child.title);
        out.push_str("**");
        if let Some(line) = child.first_line() {
            out.push_str(": ");
            out.extend(line.chars().take(PREVIEW_LEN));
        }
    }
    out
}
