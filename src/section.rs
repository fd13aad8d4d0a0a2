use serde::{Deserialize, Serialize};

/// A heading and everything nested under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    /// Number of `#` markers on the heading line (1-6).
    pub level: u8,
    /// Text between this heading and the next heading of any level, trimmed.
    pub content: String,
    /// Nested sections, each with a strictly greater level.
    pub children: Vec<Section>,
}

impl Section {
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level,
            content: String::new(),
            children: Vec::new(),
        }
    }

    /// First line of the content, or `None` for an empty section body.
    pub fn first_line(&self) -> Option<&str> {
        self.content.lines().next().filter(|line| !line.is_empty())
    }
}

/// A flat, tracker-ready issue derived from one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub body: String,
    pub labels: Vec<String>,
}
