use std::sync::LazyLock;

use regex::Regex;

/// A heading line: three or more `#`, then the heading text up to end of line.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#{3,}[ \t]*([^\r\n]*?)[ \t]*\r?$").expect("valid heading regex")
});

/// Placeholder GitHub issue forms render for an unanswered field.
const NO_RESPONSE: &str = "_No response_";

/// A markdown issue body split into `(heading, content)` pairs, in document order.
///
/// Content runs from the line after a heading up to the next heading line or
/// end of input, trimmed. Text before the first heading is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSections {
    sections: Vec<(String, String)>,
}

impl IssueSections {
    pub fn parse(body: &str) -> Self {
        let headings: Vec<(String, usize, usize)> = HEADING_RE
            .captures_iter(body)
            .filter_map(|caps| {
                let line = caps.get(0)?;
                let title = caps.get(1)?;
                Some((title.as_str().to_string(), line.start(), line.end()))
            })
            .collect();

        let sections = headings
            .iter()
            .enumerate()
            .map(|(i, (title, _, content_start))| {
                let content_end = headings
                    .get(i + 1)
                    .map_or(body.len(), |(_, next_start, _)| *next_start);
                let content = body[*content_start..content_end].trim().to_string();
                (title.clone(), content)
            })
            .collect();

        Self { sections }
    }

    /// Content under the first heading whose text equals `heading`.
    ///
    /// Returns `None` when the heading is absent, its content is empty, or the
    /// field was left unanswered.
    pub fn get(&self, heading: &str) -> Option<&str> {
        let heading = heading.trim();
        self.sections
            .iter()
            .find(|(title, _)| title == heading)
            .map(|(_, content)| content.as_str())
            .filter(|content| !content.is_empty() && *content != NO_RESPONSE)
    }

    /// Heading texts in document order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(title, _)| title.as_str())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
