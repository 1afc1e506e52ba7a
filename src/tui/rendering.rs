use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::events::Focus;
use super::layout::AppLayout;
use super::timestamps::format_optional_timestamp;
use crate::models::Prompt;
use crate::utils::{format_path_with_tilde, strip_ansi_codes};
use crate::view::{HighlightFilter, PromptView};

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const HIGHLIGHT: Color = Color::Rgb(234, 179, 8);
const ERROR: Color = Color::Rgb(239, 68, 68);
const STATUS_BG: Color = Color::Rgb(24, 24, 27);

const HIGHLIGHT_MARKER: &str = "★";
const PREVIEW_CHARS: usize = 80;

/// Everything a frame needs besides the list scroll state
pub struct RenderState<'a> {
    pub view: &'a PromptView,
    pub focus: Focus,
    pub search_input: &'a str,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState, list_state: &mut ListState) {
    let layout = AppLayout::new(frame.area());

    render_search_box(frame, layout.search_area, state);
    render_results_list(frame, layout.results_area, state.view, list_state);
    render_preview(frame, layout.preview_area, state.view.selected());
    render_status_bar(frame, layout.status_area, state);
}

fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { ACCENT } else { MUTED })
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Search;
    let text = if state.search_input.is_empty() && !focused {
        Span::styled("press / to search", Style::default().fg(MUTED))
    } else {
        Span::raw(strip_ansi_codes(state.search_input))
    };

    let paragraph = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(focused))
            .title(" Search "),
    );
    frame.render_widget(paragraph, area);

    if focused {
        let typed = state.search_input.chars().count() as u16;
        let x = area.x.saturating_add(1).saturating_add(typed).min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// One list row: marker, short session id, char count, first line of text
pub fn list_row(prompt: &Prompt) -> String {
    let marker = if prompt.is_highlighted() { HIGHLIGHT_MARKER } else { " " };
    let first_line = strip_ansi_codes(prompt.text().lines().next().unwrap_or(""));
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if prompt.text().chars().count() > preview.chars().count() {
        preview.push('…');
    }
    let length = format!("{}c", prompt.length());
    format!("{} {:<8} {:>6}  {}", marker, prompt.short_session_id(), length, preview)
}

fn render_results_list(
    frame: &mut Frame,
    area: Rect,
    view: &PromptView,
    list_state: &mut ListState,
) {
    let items: Vec<ListItem> = view
        .visible()
        .into_iter()
        .map(|prompt| {
            let style = if prompt.is_highlighted() {
                Style::default().fg(HIGHLIGHT)
            } else {
                Style::default().fg(MUTED)
            };
            ListItem::new(list_row(prompt)).style(style)
        })
        .collect();

    let title = format!(" Prompts ({}) ", view.visible_len());
    let list = List::new(items)
        .block(
            Block::default().borders(Borders::ALL).border_style(border_style(false)).title(title),
        )
        .highlight_style(Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD));

    list_state.select(view.selected_index());
    frame.render_stateful_widget(list, area, list_state);
}

fn label(name: &str) -> Span<'_> {
    Span::styled(name, Style::default().fg(MUTED))
}

fn render_preview(frame: &mut Frame, area: Rect, prompt: Option<&Prompt>) {
    let content = if let Some(prompt) = prompt {
        let highlighted = if prompt.is_highlighted() {
            Span::styled(format!("{} yes", HIGHLIGHT_MARKER), Style::default().fg(HIGHLIGHT))
        } else {
            Span::raw("no")
        };
        let cwd = prompt
            .cwd()
            .map(|cwd| format_path_with_tilde(std::path::Path::new(cwd)))
            .unwrap_or_else(|| "unknown".to_string());

        let mut lines = vec![
            Line::from(vec![
                label("Session: "),
                Span::raw(format!("{} #{}", prompt.session_id(), prompt.sequence_index())),
            ]),
            Line::from(vec![label("Length: "), Span::raw(format!("{} chars", prompt.length()))]),
            Line::from(vec![label("Highlighted: "), highlighted]),
            Line::from(vec![
                label("Time: "),
                Span::raw(format_optional_timestamp(prompt.timestamp())),
            ]),
            Line::from(vec![label("Cwd: "), Span::raw(strip_ansi_codes(&cwd))]),
            Line::from(""),
        ];

        let text = strip_ansi_codes(prompt.text());
        lines.extend(text.lines().map(|line| Line::from(line.to_string())));

        Text::from(lines)
    } else {
        Text::from("No prompt selected")
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(false))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// `visible/total prompts [modes]`
pub fn summary_text(view: &PromptView) -> String {
    let state = view.state();
    let mut modes = vec![format!("sort: {}", state.sort_mode)];
    if state.highlight_filter == HighlightFilter::ShowHighlightedOnly {
        modes.push("highlighted only".to_string());
    }
    if !state.search_query.is_empty() {
        modes.push(format!("search: \"{}\"", strip_ansi_codes(&state.search_query)));
    }

    format!("{}/{} prompts [{}]", view.visible_len(), view.total_len(), modes.join("] ["))
}

fn key_help(focus: Focus) -> &'static str {
    match focus {
        Focus::List => "h: highlight  o: highlighted only  l/n: sort  a: reset  /: search  q: quit",
        Focus::Search => "Enter/Esc: back to list  Ctrl+C: quit",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let summary = summary_text(state.view);

    let (tail, style) = match state.status_message {
        Some(msg) => {
            let color = match msg.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => ERROR,
            };
            (msg.text.clone(), Style::default().fg(color).bg(STATUS_BG))
        }
        None => (key_help(state.focus).to_string(), Style::default().fg(BRIGHT).bg(STATUS_BG)),
    };

    let status = format!(" {} | {} ", summary, tail);
    frame.render_widget(Paragraph::new(status).style(style), area);
}
