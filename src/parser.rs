use crate::section::Section;

/// Parse markdown text into a forest of sections nested by heading level.
///
/// Lines before the first heading have no owner and are dropped.
pub fn parse(markdown: &str) -> Vec<Section> {
    let mut state = OutlineState::default();

    for line in markdown.lines() {
        match heading(line) {
            Some((level, title)) => state.open(level, title),
            None => state.content.push(line),
        }
    }

    let sections = state.finish();
    tracing::debug!(roots = sections.len(), "parsed outline");
    sections
}

/// Recognise an ATX heading: 1-6 `#`, whitespace, then non-blank text.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&hashes) {
        return None;
    }

    let rest = &line[hashes..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some((hashes as u8, title))
}

#[derive(Default)]
struct OutlineState<'a> {
    roots: Vec<Section>,
    // Open sections, shallowest first. A section is attached to its parent
    // once it is popped, so the stack always owns the sections it holds.
    stack: Vec<Section>,
    // Lines seen since the last heading
    content: Vec<&'a str>,
}

impl OutlineState<'_> {
    fn open(&mut self, level: u8, title: &str) {
        self.flush_content();
        // Same or deeper levels are siblings or cousins, never parents
        self.close_from(level);
        self.stack.push(Section::new(title, level));
    }

    fn flush_content(&mut self) {
        if !self.content.is_empty() {
            if let Some(top) = self.stack.last_mut() {
                top.content = self.content.join("\n").trim().to_string();
            }
        }
        self.content.clear();
    }

    /// Pop every open section whose level is at least `level`.
    fn close_from(&mut self, level: u8) {
        while self.stack.last().is_some_and(|top| top.level >= level) {
            if let Some(done) = self.stack.pop() {
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(done),
                    None => self.roots.push(done),
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.flush_content();
        self.close_from(0);
        self.roots
    }
}
