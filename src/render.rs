use serde::Deserialize;

use crate::error::Result;
use crate::section::Issue;

/// How issues are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing, one `## Issue N` block per issue.
    #[default]
    Markdown,
    /// Pretty-printed JSON array.
    Json,
    /// `gh issue create` commands, one per line.
    Gh,
}

/// Render issues in the requested format.
pub fn render(issues: &[Issue], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(issues_to_markdown(issues)),
        OutputFormat::Json => issues_to_json(issues),
        OutputFormat::Gh => Ok(issues_to_gh_commands(issues)),
    }
}

/// Markdown listing of all issues, separated by horizontal rules.
pub fn issues_to_markdown(issues: &[Issue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| issue_to_markdown(issue, i + 1))
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

fn issue_to_markdown(issue: &Issue, number: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("## Issue {number}: {}\n\n", issue.title));
    out.push_str(&format!("**Labels:** {}\n\n", issue.labels.join(", ")));
    out.push_str("### Body\n\n");
    out.push_str(&issue.body);
    out.push('\n');
    out
}

pub fn issues_to_json(issues: &[Issue]) -> Result<String> {
    Ok(serde_json::to_string_pretty(issues)?)
}

/// One `gh issue create` invocation per issue, ready to pipe into a shell.
pub fn issues_to_gh_commands(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|issue| {
            let mut cmd = format!(
                "gh issue create --title \"{}\" --body \"{}\"",
                escape(&issue.title),
                escape(&issue.body)
            );
            for label in &issue.labels {
                cmd.push_str(&format!(" -l \"{}\"", escape(label)));
            }
            cmd
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape text for use inside a double-quoted shell argument, folding newlines to `\n`.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '"' | '$' | '`' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn sample() -> Vec<Issue> {
        vec![
            Issue {
                title: "Login".to_string(),
                body: "> Part of: **Auth**\n\nUsers sign in with \"email\".".to_string(),
                labels: vec!["prd".to_string(), "feature".to_string()],
            },
            Issue {
                title: "API rate limits".to_string(),
                body: String::new(),
                labels: vec!["api".to_string()],
            },
        ]
    }

    #[test]
    fn markdown_listing() {
        assert_snapshot!(issues_to_markdown(&sample()), @r#"
        ## Issue 1: Login

        **Labels:** prd, feature

        ### Body

        > Part of: **Auth**

        Users sign in with "email".

        ---

        ## Issue 2: API rate limits

        **Labels:** api

        ### Body
        "#);
    }

    #[test]
    fn markdown_empty() {
        assert_eq!(issues_to_markdown(&[]), "");
    }

    #[test]
    fn gh_commands() {
        assert_snapshot!(issues_to_gh_commands(&sample()), @r#"
        gh issue create --title "Login" --body "> Part of: **Auth**\n\nUsers sign in with \"email\"." -l "prd" -l "feature"
        gh issue create --title "API rate limits" --body "" -l "api"
        "#);
    }

    #[test]
    fn escape_shell_specials() {
        assert_eq!(escape(r#"say "hi" $HOME `id` \ok"#), r#"say \"hi\" \$HOME \`id\` \\ok"#);
        assert_eq!(escape("a\nb"), "a\\nb");
    }

    #[test]
    fn json_roundtrips() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let back: Vec<Issue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
        assert!(json.starts_with("[\n  {\n    \"title\": \"Login\""));
    }

    #[test]
    fn format_names() {
        let format: OutputFormat = serde_json::from_str("\"gh\"").unwrap();
        assert_eq!(format, OutputFormat::Gh);
    }
}
