use folio_core::projects::{MediaType, Project};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::GalleryState;
use crate::common::render_utils::{InputHint, render_hints, render_separator, split_footer};
use crate::common::truncate_with_ellipsis;
use crate::style::{Palette, prompt_prefix};

/// Rows per project card, including the spacer.
const CARD_HEIGHT: usize = 4;
const HEADER_HEIGHT: u16 = 3;

pub fn render(gallery: &GalleryState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.background))
        .title(Span::styled(
            " folio ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (body, footer) = split_footer(inner);
    let [header, cards] =
        Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).areas(body);

    frame.render_widget(Paragraph::new(header_lines(gallery, palette)), header);
    render_separator(frame, header, HEADER_HEIGHT - 1, palette.primary);

    if gallery.detail_open
        && let Some(project) = gallery.selected_project()
    {
        let [list, detail] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(cards);
        render_cards(gallery, palette, frame, list);
        render_detail(project, palette, frame, detail);
    } else {
        render_cards(gallery, palette, frame, cards);
    }

    let hints = [
        InputHint::new("↑↓", "select"),
        InputHint::new("Enter", "details"),
        InputHint::new("o", "open link"),
        InputHint::new(":", "terminal"),
        InputHint::new("q", "quit"),
    ];
    render_hints(frame, footer, &hints, palette.primary);
}

fn header_lines(gallery: &GalleryState, palette: &Palette) -> Vec<Line<'static>> {
    let prompt = Style::default()
        .fg(palette.primary)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(palette.accent);
    let theme = &gallery.theme;
    vec![
        Line::from(vec![
            Span::styled(prompt_prefix(theme.prompt()).trim_end().to_string(), prompt),
            Span::styled(theme.welcome_message.clone(), text),
        ]),
        Line::from(vec![
            Span::styled(prompt_prefix(theme.prompt()), prompt),
            Span::styled(theme.loading_command.clone(), text),
        ]),
    ]
}

/// Card lines for the visible projects, scrolled so the selection is shown.
fn card_lines(gallery: &GalleryState, palette: &Palette, width: usize, height: usize) -> Vec<Line<'static>> {
    let visible = gallery.visible();
    if visible.is_empty() {
        return vec![Line::from(Span::styled(
            "No projects yet.",
            Style::default().fg(palette.muted),
        ))];
    }

    let per_page = (height / CARD_HEIGHT).max(1);
    let first = gallery.selected.saturating_sub(per_page - 1);
    let text = Style::default().fg(palette.accent);
    let muted = Style::default().fg(palette.muted);

    let mut lines = Vec::new();
    for (index, project) in visible.iter().enumerate().skip(first).take(per_page) {
        let selected = index == gallery.selected;
        let marker = if selected { "▸ " } else { "  " };
        let name_style = if selected {
            text.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            text.add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.primary)),
            Span::styled(project.name.clone(), name_style),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  TECH: ", muted),
            Span::styled(
                truncate_with_ellipsis(&project.tech_stack, width.saturating_sub(8)),
                text,
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "  {}",
                truncate_with_ellipsis(&project.description, width.saturating_sub(2))
            ),
            muted,
        )));
        lines.push(Line::default());
    }
    lines
}

fn render_cards(gallery: &GalleryState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let lines = card_lines(gallery, palette, area.width as usize, area.height as usize);
    frame.render_widget(Paragraph::new(lines), area);
}

fn detail_lines(project: &Project, palette: &Palette) -> Vec<Line<'static>> {
    let label = Style::default().fg(palette.muted);
    let text = Style::default().fg(palette.accent);
    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<6}"), label),
            Span::styled(value, text),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            project.name.clone(),
            text.add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(project.description.clone(), text)),
        Line::default(),
        field("TECH", project.tech_stack.clone()),
    ];
    if let Some(url) = project.live_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(field("Live", url.to_string()));
    }
    if let Some(url) = project.repo_url.as_deref().filter(|u| !u.is_empty()) {
        lines.push(field("Repo", url.to_string()));
    }
    if let Some(path) = project.media_path.as_deref() {
        let kind = match project.media_type {
            Some(MediaType::Video) => " (video)",
            Some(MediaType::Image) => " (image)",
            None => "",
        };
        lines.push(field("Media", format!("{path}{kind}")));
    }
    lines
}

fn render_detail(project: &Project, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(palette.primary));
    let paragraph = Paragraph::new(detail_lines(project, palette))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use folio_core::projects::seed_projects;
    use folio_core::theme::Theme;

    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_header_shows_prompt_and_loading_command() {
        let gallery = GalleryState::new(Vec::new(), Theme::default());
        let lines = plain(&header_lines(&gallery, &Palette::default()));
        assert_eq!(
            lines,
            [
                "[user@cli-portfolio ~]$ welcome-to-my-portfolio",
                "[user@cli-portfolio ~]$ ls projects"
            ]
        );
    }

    #[test]
    fn test_cards_skip_hidden_projects() {
        let gallery = GalleryState::new(seed_projects(), Theme::default());
        let text = plain(&card_lines(&gallery, &Palette::default(), 80, 40)).join("\n");
        assert!(text.contains("Project Alpha"));
        assert!(text.contains("TECH: React, Node.js, Express, MongoDB"));
        assert!(!text.contains("Project Delta"));
    }

    #[test]
    fn test_cards_scroll_to_selection() {
        let mut gallery = GalleryState::new(seed_projects(), Theme::default());
        gallery.selected = 2;
        let text = plain(&card_lines(&gallery, &Palette::default(), 80, 8)).join("\n");
        assert!(!text.contains("Project Alpha"));
        assert!(text.contains("Project Gamma"));
    }

    #[test]
    fn test_detail_lists_links_and_media() {
        let project = &seed_projects()[0];
        let text = plain(&detail_lines(project, &Palette::default())).join("\n");
        assert!(text.contains("Live  https://example.com"));
        assert!(text.contains("Repo  https://github.com/example/repo"));
        assert!(text.contains("Media /projects/placeholder-1.jpg (image)"));
    }
}
