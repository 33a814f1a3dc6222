//! Ordered record of a terminal session.
//!
//! Entries are append-only between resets. Credential input is masked before
//! it is stored, so plaintext never reaches the transcript.

use crate::common::mask;

/// One line of command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Text(String),
    /// A project name rendered as a link to its detail view.
    ProjectLink { id: String, name: String },
}

impl OutputLine {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::ProjectLink { name, .. } => name,
        }
    }
}

/// A submitted line and the output it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    raw_input: String,
    output: Vec<OutputLine>,
    is_credential: bool,
}

impl Entry {
    pub fn command(raw_input: impl Into<String>, output: Vec<OutputLine>) -> Self {
        Self {
            raw_input: raw_input.into(),
            output,
            is_credential: false,
        }
    }

    /// An entry for credential input; the candidate is masked on construction.
    pub fn credential(candidate: &str, output: Vec<OutputLine>) -> Self {
        Self {
            raw_input: mask(candidate),
            output,
            is_credential: true,
        }
    }

    /// An empty submission.
    pub fn blank() -> Self {
        Self::command(String::new(), Vec::new())
    }

    /// Banner shown at the top of a fresh session.
    pub fn welcome(message: &str) -> Self {
        Self::command(String::new(), vec![OutputLine::text(message)])
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn is_credential(&self) -> bool {
        self.is_credential
    }

    /// True for output-only entries such as the welcome banner.
    pub fn is_banner(&self) -> bool {
        !self.is_credential && self.raw_input.is_empty() && !self.output.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollMode {
    /// Keep the newest entry in view.
    #[default]
    FollowLatest,
    /// Pinned at a line offset from the top.
    Anchored { offset: usize },
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    scroll: ScrollMode,
    /// Index into [`Transcript::link_ids`]. Cleared whenever entries change.
    link_focus: Option<usize>,
}

impl Transcript {
    pub fn new(welcome: Option<&str>) -> Self {
        let mut transcript = Self::default();
        transcript.reset(welcome);
        transcript
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn scroll_mode(&self) -> ScrollMode {
        self.scroll
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.link_focus = None;
        self.scroll_to_latest();
    }

    /// Drops every entry, keeping only the welcome banner when one is set.
    pub fn reset(&mut self, welcome: Option<&str>) {
        self.entries.clear();
        self.link_focus = None;
        if let Some(message) = welcome.filter(|m| !m.trim().is_empty()) {
            self.entries.push(Entry::welcome(message));
        }
        self.scroll_to_latest();
    }

    /// Project ids of every link, top to bottom.
    pub fn link_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flat_map(Entry::output)
            .filter_map(|line| match line {
                OutputLine::ProjectLink { id, .. } => Some(id.as_str()),
                OutputLine::Text(_) => None,
            })
            .collect()
    }

    pub fn link_focus(&self) -> Option<usize> {
        self.link_focus
    }

    /// Id of the focused link.
    pub fn focused_link(&self) -> Option<&str> {
        self.link_focus
            .and_then(|index| self.link_ids().get(index).copied())
    }

    /// Moves focus to the next link, wrapping. Without a focus it starts at
    /// the first link of the newest listing.
    pub fn focus_next_link(&mut self) {
        let count = self.link_ids().len();
        if count == 0 {
            return;
        }
        self.link_focus = Some(match self.link_focus {
            Some(index) => (index + 1) % count,
            None => count - self.newest_listing_len(),
        });
    }

    /// Moves focus to the previous link, wrapping. Without a focus it starts
    /// at the last link.
    pub fn focus_prev_link(&mut self) {
        let count = self.link_ids().len();
        if count == 0 {
            return;
        }
        self.link_focus = Some(match self.link_focus {
            Some(index) => (index + count - 1) % count,
            None => count - 1,
        });
    }

    pub fn clear_link_focus(&mut self) {
        self.link_focus = None;
    }

    fn newest_listing_len(&self) -> usize {
        self.entries
            .iter()
            .rev()
            .map(|entry| {
                entry
                    .output()
                    .iter()
                    .filter(|line| matches!(line, OutputLine::ProjectLink { .. }))
                    .count()
            })
            .find(|&links| links > 0)
            .unwrap_or(0)
    }

    pub fn scroll_to_latest(&mut self) {
        self.scroll = ScrollMode::FollowLatest;
    }

    /// Scrolls towards older lines.
    pub fn scroll_up(&mut self, lines: usize, total_lines: usize, viewport: usize) {
        let current = self.scroll_offset(total_lines, viewport);
        self.scroll = ScrollMode::Anchored {
            offset: current.saturating_sub(lines),
        };
    }

    /// Scrolls towards newer lines; reaching the bottom re-follows.
    pub fn scroll_down(&mut self, lines: usize, total_lines: usize, viewport: usize) {
        let max = total_lines.saturating_sub(viewport);
        let next = self.scroll_offset(total_lines, viewport) + lines;
        self.scroll = if next >= max {
            ScrollMode::FollowLatest
        } else {
            ScrollMode::Anchored { offset: next }
        };
    }

    /// First visible line for a viewport of `viewport` rows.
    pub fn scroll_offset(&self, total_lines: usize, viewport: usize) -> usize {
        let max = total_lines.saturating_sub(viewport);
        match self.scroll {
            ScrollMode::FollowLatest => max,
            ScrollMode::Anchored { offset } => offset.min(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(ids: &[&str]) -> Entry {
        Entry::command(
            "ls",
            ids.iter()
                .map(|id| OutputLine::ProjectLink {
                    id: (*id).to_string(),
                    name: format!("Project {id}"),
                })
                .collect(),
        )
    }

    #[test]
    fn test_link_focus_starts_at_newest_listing_and_wraps() {
        let mut transcript = Transcript::new(None);
        transcript.push(listing(&["1", "2"]));
        transcript.push(Entry::command("echo x", vec![OutputLine::text("x")]));
        transcript.push(listing(&["3", "4"]));

        transcript.focus_next_link();
        assert_eq!(transcript.focused_link(), Some("3"));
        transcript.focus_next_link();
        assert_eq!(transcript.focused_link(), Some("4"));
        transcript.focus_next_link();
        assert_eq!(transcript.focused_link(), Some("1"));
        transcript.focus_prev_link();
        assert_eq!(transcript.focused_link(), Some("4"));
    }

    #[test]
    fn test_link_focus_cleared_by_new_entries() {
        let mut transcript = Transcript::new(None);
        transcript.push(listing(&["1"]));
        transcript.focus_prev_link();
        assert_eq!(transcript.focused_link(), Some("1"));

        transcript.push(Entry::blank());
        assert_eq!(transcript.focused_link(), None);

        transcript.focus_next_link();
        transcript.reset(None);
        assert_eq!(transcript.link_focus(), None);
    }

    #[test]
    fn test_link_focus_without_links_is_noop() {
        let mut transcript = Transcript::new(Some("hi"));
        transcript.focus_next_link();
        transcript.focus_prev_link();
        assert_eq!(transcript.focused_link(), None);
    }

    #[test]
    fn test_credential_entry_is_masked() {
        let entry = Entry::credential("s3cret", vec![]);
        assert_eq!(entry.raw_input(), "******");
        assert!(entry.is_credential());
        assert!(!entry.is_banner());
    }

    #[test]
    fn test_reset_keeps_only_welcome() {
        let mut transcript = Transcript::new(Some("hi there"));
        transcript.push(Entry::command("help", vec![]));
        transcript.push(Entry::blank());

        transcript.reset(Some("hi there"));

        assert_eq!(transcript.len(), 1);
        assert!(transcript.entries()[0].is_banner());

        transcript.reset(None);
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_blank_welcome_is_skipped() {
        assert!(Transcript::new(Some("   ")).is_empty());
    }

    #[test]
    fn test_push_follows_latest_after_manual_scroll() {
        let mut transcript = Transcript::new(None);
        transcript.scroll_up(5, 40, 10);
        assert_eq!(transcript.scroll_mode(), ScrollMode::Anchored { offset: 25 });

        transcript.push(Entry::blank());

        assert_eq!(transcript.scroll_mode(), ScrollMode::FollowLatest);
        assert_eq!(transcript.scroll_offset(41, 10), 31);
    }

    #[test]
    fn test_scroll_to_latest_is_idempotent() {
        let mut transcript = Transcript::new(None);
        transcript.scroll_to_latest();
        let once = transcript.scroll_offset(30, 10);
        transcript.scroll_to_latest();
        assert_eq!(transcript.scroll_offset(30, 10), once);
    }

    #[test]
    fn test_scroll_down_to_bottom_refollows() {
        let mut transcript = Transcript::new(None);
        transcript.scroll_up(10, 30, 10);
        transcript.scroll_down(3, 30, 10);
        assert_eq!(transcript.scroll_mode(), ScrollMode::Anchored { offset: 13 });

        transcript.scroll_down(100, 30, 10);
        assert_eq!(transcript.scroll_mode(), ScrollMode::FollowLatest);
    }

    #[test]
    fn test_offset_is_zero_when_content_fits() {
        let mut transcript = Transcript::new(None);
        assert_eq!(transcript.scroll_offset(3, 10), 0);
        transcript.scroll_up(2, 3, 10);
        assert_eq!(transcript.scroll_offset(3, 10), 0);
    }
}
