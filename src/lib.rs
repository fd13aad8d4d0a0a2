mod config;
mod error;
mod issues;
mod parser;
mod render;
mod section;

pub use config::{CONFIG_FILE, Config, IssuesConfig, OutputConfig};
pub use error::{Error, Result};
pub use issues::{IssueOptions, labels_for};
pub use render::{OutputFormat, issues_to_gh_commands, issues_to_json, issues_to_markdown, render};
pub use section::{Issue, Section};

/// Parse markdown text into top-level sections with their nested children.
pub fn parse(markdown: &str) -> Vec<Section> {
    parser::parse(markdown)
}

/// Turn parsed sections into issues.
pub fn to_issues(sections: &[Section], options: &IssueOptions) -> Vec<Issue> {
    issues::to_issues(sections, options)
}

/// Convert markdown straight to issues.
pub fn markdown_to_issues(markdown: &str, options: &IssueOptions) -> Vec<Issue> {
    let sections = parse(markdown);
    to_issues(&sections, options)
}
