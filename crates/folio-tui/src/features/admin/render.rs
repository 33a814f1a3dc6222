use folio_core::projects::Project;
use folio_core::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::AdminState;
use crate::common::render_utils::{
    InputHint, centered_rect, render_hints, render_overlay_container, split_footer,
};
use crate::style::Palette;

fn project_lines(admin: &AdminState, projects: &[Project], palette: &Palette) -> Vec<Line<'static>> {
    let text = Style::default().fg(palette.accent);
    let muted = Style::default().fg(palette.muted);
    projects
        .iter()
        .enumerate()
        .map(|(index, project)| {
            let selected = index == admin.selected;
            let marker = if selected { "▸ " } else { "  " };
            let flag = if project.hidden { "[hidden]  " } else { "[visible] " };
            let name_style = if selected {
                text.add_modifier(Modifier::REVERSED)
            } else {
                text
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(palette.primary)),
                Span::styled(flag, if project.hidden { muted } else { text }),
                Span::styled(project.name.clone(), name_style),
            ])
        })
        .collect()
}

fn theme_lines(theme: &Theme, palette: &Palette) -> Vec<Line<'static>> {
    let label = Style::default().fg(palette.muted);
    let text = Style::default().fg(palette.accent);
    let field = |name: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name:<20}"), label),
            Span::styled(value.to_string(), text),
        ])
    };

    let mut lines = vec![
        field("primaryColor", &theme.primary_color),
        field("backgroundColor", &theme.background_color),
        field("accentColor", &theme.accent_color),
        field("font", &theme.font),
        field("prompt", theme.prompt()),
        Line::default(),
    ];
    lines.extend(
        theme
            .css_variables()
            .iter()
            .map(|(name, value)| field(*name, value.as_str())),
    );
    lines
}

pub fn render(
    admin: &AdminState,
    projects: &[Project],
    theme: &Theme,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let popup = centered_rect(80, 80, area);
    let title = if admin.dirty { "Admin *" } else { "Admin" };
    let inner = render_overlay_container(frame, popup, title, palette.primary, palette.background);
    let (body, footer) = split_footer(inner);
    let [main, status] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(body);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(main);

    let list = Paragraph::new(project_lines(admin, projects, palette)).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(palette.primary))
            .title(Span::styled("Projects", Style::default().fg(palette.accent))),
    );
    frame.render_widget(list, left);

    let theme_view = Paragraph::new(theme_lines(theme, palette)).block(
        Block::default().title(Span::styled(" Theme", Style::default().fg(palette.accent))),
    );
    frame.render_widget(theme_view, right);

    if let Some(message) = &admin.status {
        frame.render_widget(
            Paragraph::new(Span::styled(message.clone(), Style::default().fg(palette.muted))),
            status,
        );
    }

    let hints = [
        InputHint::new("↑↓", "select"),
        InputHint::new("h", "toggle hidden"),
        InputHint::new("d", "delete"),
        InputHint::new("s", "save"),
        InputHint::new("Esc", "close"),
    ];
    render_hints(frame, footer, &hints, palette.primary);
}
