use ayurhaven::session::{DISCLAIMER, SAMPLE_QUESTIONS, WELCOME_HINT, WELCOME_SUBTITLE, WELCOME_TITLE};
use ayurhaven::{Message, Role, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

const SIDEBAR_WIDTH: u16 = 40;

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub user: Color,
    pub assistant: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Green,
                user: Color::Blue,
                assistant: Color::Green,
                border: Color::Gray,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::LightGreen,
                user: Color::LightCyan,
                assistant: Color::LightGreen,
                border: Color::DarkGray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
            .title(title)
            .style(self.base())
    }
}

/// Renders the conversation as wrapped lines: a role label, the content, a blank line.
pub fn message_lines(messages: &[Message], width: u16, busy: bool, palette: &Palette) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();

    for (i, message) in messages.iter().enumerate() {
        let label_style = match message.role {
            Role::User => Style::default().fg(palette.user),
            Role::Assistant => Style::default().fg(palette.assistant),
            Role::System => Style::default().fg(palette.muted),
        }
        .add_modifier(Modifier::BOLD);
        lines.push(Line::from(Span::styled(message.role.to_string(), label_style)));

        let thinking = busy && i + 1 == messages.len() && message.is_placeholder();
        if thinking {
            lines.push(Line::from(Span::styled(
                format!("✦ {}", message.content),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            for raw in message.content.lines() {
                if raw.is_empty() {
                    lines.push(Line::from(""));
                    continue;
                }
                for wrapped in textwrap::wrap(raw, width) {
                    lines.push(Line::from(wrapped.into_owned()));
                }
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.ctx.theme.theme());
    f.render_widget(Block::default().style(palette.base()), f.area());

    // Input grows with its content: 1 line + 2 borders, at most 8 rows
    let line_count = app.textarea.lines().len() as u16;
    let input_height = (line_count + 2).clamp(3, 8);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(input_height),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, app, &palette, chunks[0]);
    if app.current_messages().is_empty() {
        render_empty_state(f, &palette, chunks[1]);
    } else {
        render_messages(f, app, &palette, chunks[1]);
    }
    render_input(f, app, &palette, chunks[2]);
    render_footer(f, app, &palette, chunks[3]);

    if app.sidebar_open {
        render_sidebar(f, app, &palette);
    }
}

fn render_header(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let theme_hint = match app.ctx.theme.theme() {
        Theme::Dark => "Light mode",
        Theme::Light => "Dark mode",
    };
    let header = Line::from(vec![
        Span::styled(
            " AyurHaven ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " ^B Chats  ^N New Chat  ^T {}  ^X Clear  Esc Quit",
                theme_hint
            ),
            Style::default().fg(palette.muted),
        ),
    ]);
    let title = app
        .ctx
        .conversations
        .active_thread()
        .map(|t| t.title.as_str())
        .unwrap_or("");
    f.render_widget(Paragraph::new(header).block(palette.block(title)), area);
}

fn render_empty_state(f: &mut Frame, palette: &Palette, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            WELCOME_TITLE,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(WELCOME_SUBTITLE, Style::default().fg(palette.muted))),
        Line::from(""),
    ];
    for (i, sample) in SAMPLE_QUESTIONS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("[F{}] ", i + 1), Style::default().fg(palette.accent)),
            Span::styled(sample.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(sample.question, Style::default().fg(palette.muted))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(WELCOME_HINT, Style::default().fg(palette.muted))));

    let widget = Paragraph::new(lines)
        .block(palette.block("Messages"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_messages(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let lines = message_lines(app.current_messages(), inner_width, app.is_busy(), palette);

    // Pin to the bottom unless the user scrolled back
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(inner_height);
    app.scroll_back = app.scroll_back.min(max_offset);
    let offset = max_offset - app.scroll_back;

    let widget = Paragraph::new(lines)
        .block(palette.block("Messages"))
        .scroll((offset, 0));
    f.render_widget(widget, area);
}

fn render_input(f: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let title = if app.is_busy() {
        "Input (Waiting for AyurHaven...)"
    } else {
        "Input (Enter to send, Shift+Enter for new line)"
    };
    app.textarea.set_block(palette.block(title));
    app.textarea.set_style(palette.base());
    f.render_widget(&app.textarea, area);
}

fn render_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let text = app.status.as_deref().unwrap_or(DISCLAIMER);
    let footer = Paragraph::new(Span::styled(text, Style::default().fg(palette.muted)))
        .alignment(Alignment::Center)
        .style(palette.base());
    f.render_widget(footer, area);
}

fn render_sidebar(f: &mut Frame, app: &App, palette: &Palette) {
    let area = f.area();
    let sidebar = Rect {
        x: 0,
        y: 0,
        width: SIDEBAR_WIDTH.min(area.width),
        height: area.height,
    };
    f.render_widget(Clear, sidebar);

    let active = app.ctx.conversations.active_id();
    let items: Vec<ListItem> = app
        .ctx
        .conversations
        .threads()
        .iter()
        .map(|thread| {
            let style = if Some(thread.id) == active {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Line::from(Span::styled(thread.title.clone(), style)))
        })
        .collect();

    let title = "Recent Chats (Enter open, Esc close)";
    if items.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No conversations yet. Ctrl+N starts one.",
            Style::default().fg(palette.muted),
        ))
        .wrap(Wrap { trim: true })
        .block(palette.block(title));
        f.render_widget(empty, sidebar);
        return;
    }

    let list = List::new(items)
        .block(palette.block(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(app.sidebar_selected));
    f.render_stateful_widget(list, sidebar, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lines_wrap_and_label() {
        let palette = Palette::for_theme(Theme::Light);
        let messages = vec![
            Message::user("Hi"),
            Message::assistant("one two three four five six"),
        ];
        let lines = message_lines(&messages, 10, false, &palette);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[0], "You");
        assert_eq!(text[1], "Hi");
        assert_eq!(text[2], "");
        assert_eq!(text[3], "AyurHaven");
        assert_eq!(&text[4..7], ["one two", "three four", "five six"]);
    }

    #[test]
    fn test_placeholder_marked_only_while_busy() {
        let palette = Palette::for_theme(Theme::Dark);
        let messages = vec![Message::user("Hi"), Message::placeholder()];
        let busy = message_lines(&messages, 40, true, &palette);
        assert_eq!(busy[4].to_string(), "✦ Thinking...");
        let idle = message_lines(&messages, 40, false, &palette);
        assert_eq!(idle[4].to_string(), "Thinking...");
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Palette::for_theme(Theme::Light), Palette::for_theme(Theme::Dark));
    }
}
