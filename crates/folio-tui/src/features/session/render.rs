//! Interactive terminal overlay rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::SessionState;
use super::transcript::{Entry, OutputLine, Transcript};
use crate::common::mask;
use crate::common::render_utils::{
    InputHint, centered_rect, render_hints, render_overlay_container,
};
use crate::style::{Palette, prompt_prefix};

const TITLE: &str = "Interactive Terminal";
const PASSWORD_LABEL: &str = "Password: ";

struct SessionLayout {
    popup: Rect,
    transcript: Rect,
    input: Rect,
    footer: Rect,
}

fn layout(area: Rect) -> SessionLayout {
    let popup = centered_rect(90, 70, area);
    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );
    let [transcript, input, footer] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    SessionLayout {
        popup,
        transcript,
        input,
        footer,
    }
}

/// Transcript rows available for a terminal of the given size.
pub fn viewport_rows(width: u16, height: u16) -> usize {
    layout(Rect::new(0, 0, width, height)).transcript.height as usize
}

fn entry_height(entry: &Entry) -> usize {
    if entry.is_banner() {
        entry.output().len()
    } else {
        1 + entry.output().len()
    }
}

pub fn line_count(transcript: &Transcript) -> usize {
    transcript.entries().iter().map(entry_height).sum()
}

/// Flattens the transcript into display lines.
///
/// Credential entries show only their (already masked) input; banners show
/// only their output. The focused project link is drawn reversed.
pub fn transcript_lines(transcript: &Transcript, prompt: &str, palette: &Palette) -> Vec<Line<'static>> {
    let prompt_style = Style::default()
        .fg(palette.primary)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(palette.accent);
    let link_style = text_style.add_modifier(Modifier::UNDERLINED);
    let focused_style = link_style.add_modifier(Modifier::REVERSED);
    let focus = transcript.link_focus();
    let mut link_index = 0;

    let mut lines = Vec::new();
    for entry in transcript.entries() {
        if entry.is_credential() {
            lines.push(Line::from(Span::styled(
                entry.raw_input().to_string(),
                Style::default().fg(palette.muted),
            )));
        } else if !entry.is_banner() {
            lines.push(Line::from(vec![
                Span::styled(prompt_prefix(prompt), prompt_style),
                Span::styled(entry.raw_input().to_string(), text_style),
            ]));
        }
        for output in entry.output() {
            let line = match output {
                OutputLine::Text(text) => Line::from(Span::styled(text.clone(), text_style)),
                OutputLine::ProjectLink { name, .. } => {
                    let style = if focus == Some(link_index) {
                        focused_style
                    } else {
                        link_style
                    };
                    link_index += 1;
                    Line::from(Span::styled(name.clone(), style))
                }
            };
            lines.push(line);
        }
    }
    lines
}

fn input_line(state: &SessionState, prompt: &str, palette: &Palette) -> Line<'static> {
    let (label, value) = if state.is_awaiting_credential() {
        (PASSWORD_LABEL.to_string(), mask(&state.input))
    } else {
        (prompt_prefix(prompt), state.input.clone())
    };
    Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(palette.accent)),
        Span::styled("█", Style::default().fg(palette.primary)),
    ])
}

pub fn render(state: &SessionState, prompt: &str, palette: &Palette, frame: &mut Frame, area: Rect) {
    let layout = layout(area);
    render_overlay_container(frame, layout.popup, TITLE, palette.primary, palette.background);

    let lines = transcript_lines(&state.transcript, prompt, palette);
    let viewport = layout.transcript.height as usize;
    let offset = state.transcript.scroll_offset(lines.len(), viewport);
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(viewport).collect();
    frame.render_widget(Paragraph::new(visible), layout.transcript);

    frame.render_widget(Paragraph::new(input_line(state, prompt, palette)), layout.input);

    let hints = [
        InputHint::new("Enter", "run"),
        InputHint::new("Tab", "links"),
        InputHint::new("PgUp/PgDn", "scroll"),
        InputHint::new("Esc", if state.is_awaiting_credential() { "cancel" } else { "close" }),
    ];
    render_hints(frame, layout.footer, &hints, palette.primary);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::features::session::state::SessionMode;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_lines_for_each_entry_kind() {
        let mut transcript = Transcript::new(Some("welcome"));
        transcript.push(Entry::command("echo hi", vec![OutputLine::text("hi")]));
        transcript.push(Entry::credential("pw", vec![OutputLine::text("nope")]));
        transcript.push(Entry::blank());

        let lines = transcript_lines(&transcript, "me@box", &Palette::default());

        assert_eq!(
            plain(&lines),
            ["welcome", "[me@box ~]$ echo hi", "hi", "**", "nope", "[me@box ~]$ "]
        );
        assert_eq!(line_count(&transcript), lines.len());
    }

    #[test]
    fn test_project_links_are_underlined() {
        let mut transcript = Transcript::new(None);
        transcript.push(Entry::command(
            "ls",
            vec![OutputLine::ProjectLink {
                id: "1".to_string(),
                name: "Alpha".to_string(),
            }],
        ));

        let lines = transcript_lines(&transcript, "p", &Palette::default());

        let style = lines[1].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_focused_link_is_reversed() {
        let mut transcript = Transcript::new(None);
        let link = |id: &str| OutputLine::ProjectLink {
            id: id.to_string(),
            name: format!("P{id}"),
        };
        transcript.push(Entry::command("ls", vec![link("1"), link("2")]));
        transcript.focus_prev_link();

        let lines = transcript_lines(&transcript, "p", &Palette::default());

        assert!(!lines[1].spans[0].style.add_modifier.contains(Modifier::REVERSED));
        assert!(lines[2].spans[0].style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_password_input_is_masked() {
        let mut state = SessionState::new(None, Duration::from_secs(1));
        state.mode = SessionMode::AwaitingCredential;
        state.input = "secret".to_string();

        let line = input_line(&state, "p", &Palette::default());

        assert_eq!(plain(&[line]), ["Password: ******█"]);
    }

    #[test]
    fn test_render_draws_prompt_and_input() {
        let mut state = SessionState::new(None, Duration::from_secs(1));
        state.open = true;
        state.input = "help".to_string();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render(&state, "me@box", &Palette::default(), frame, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Interactive Terminal"));
        assert!(text.contains("[me@box ~]$ help"));
    }

    #[test]
    fn test_viewport_rows_excludes_chrome() {
        // 70% of 20 rows = 14, minus borders, input and hints.
        assert_eq!(viewport_rows(100, 20), 10);
    }
}
