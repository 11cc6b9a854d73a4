//! TUI rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use espforge_core::sections::{self, PlanView, RenderedBody};
use espforge_core::{ListField, Messages, PlanPhase, SuggestPhase};

use super::app::{App, Field, Mode};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the whole screen.
pub fn render(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // form + output
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    if app.mode == Mode::Help {
        render_help(f, rows[0]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);
        render_form(f, app, panes[0]);
        render_output(f, app, panes[1]);
    }

    render_status_bar(f, app, rows[1]);
}

// -- Form --

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for field in app.visible_fields() {
        let selected = field == app.selected;
        lines.extend(field_lines(app, field, selected));
    }

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Project "));
    f.render_widget(form, area);
}

fn field_lines(app: &App, field: Field, selected: bool) -> Vec<Line<'static>> {
    let cfg = &app.session.config;
    let marker = if selected { "> " } else { "  " };
    let label_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let label = Span::styled(format!("{marker}{}: ", field.label()), label_style);

    match field {
        Field::Board => vec![Line::from(vec![
            label,
            Span::raw(format!("< {} >", cfg.board)),
        ])],
        Field::CustomBoard => vec![Line::from(vec![
            label,
            text_value(app, field, &cfg.custom_board_config),
        ])],
        Field::Goal => {
            let mut spans = vec![label, Span::raw(format!("< {} >", cfg.goal))];
            match &app.session.suggest {
                SuggestPhase::Suggesting => spans.push(Span::styled(
                    format!(" {}", SPINNER[(app.tick as usize) % SPINNER.len()]),
                    Style::default().fg(Color::Cyan),
                )),
                SuggestPhase::Failed(_) => {
                    spans.push(Span::styled(" !", Style::default().fg(Color::Red)))
                }
                SuggestPhase::Idle => {}
            }
            vec![Line::from(spans)]
        }
        Field::Modules => checklist_lines(
            app,
            ListField::Modules,
            &app.catalog.components,
            app.module_cursor,
            selected,
            label,
        ),
        Field::Communication => checklist_lines(
            app,
            ListField::Communication,
            &app.catalog.communication,
            app.comm_cursor,
            selected,
            label,
        ),
        Field::Language => vec![Line::from(vec![
            label,
            Span::raw(format!("< {} >", cfg.language)),
        ])],
        Field::Power => vec![Line::from(vec![
            label,
            text_value(app, field, &cfg.power),
        ])],
        Field::Description => vec![Line::from(vec![
            label,
            text_value(app, field, &cfg.custom_description),
        ])],
        Field::Generate => {
            let busy = !app.session.can_generate();
            let text = if busy { "[ Generating... ]" } else { "[ Generate ]" };
            let style = if selected {
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Blue)
            };
            vec![
                Line::from(""),
                Line::from(vec![Span::raw(marker), Span::styled(text, style)]),
            ]
        }
    }
}

/// A text field's value, or the live edit buffer while it is being edited.
fn text_value(app: &App, field: Field, value: &str) -> Span<'static> {
    match &app.mode {
        Mode::Editing {
            field: editing,
            buffer,
        } if *editing == field => Span::styled(
            format!("{buffer}_"),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        _ if value.is_empty() => Span::styled("(empty)", Style::default().fg(Color::DarkGray)),
        _ => Span::raw(value.to_string()),
    }
}

/// Collapsed to a summary unless selected; expanded with a cursor when selected.
fn checklist_lines(
    app: &App,
    list: ListField,
    options: &[String],
    cursor: usize,
    selected: bool,
    label: Span<'static>,
) -> Vec<Line<'static>> {
    let chosen = app.session.config.list(list);
    if !selected {
        let summary = if chosen.is_empty() {
            Span::styled("(none)", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(chosen.join(", "))
        };
        return vec![Line::from(vec![label, summary])];
    }

    let mut lines = vec![Line::from(label)];
    for (i, option) in options.iter().enumerate() {
        let check = if chosen.contains(option) { "[x]" } else { "[ ]" };
        let style = if i == cursor {
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("    {check} {option}"),
            style,
        )));
    }
    lines
}

// -- Output --

fn render_output(f: &mut Frame, app: &App, area: Rect) {
    let messages = app.session.messages();
    let lines = match &app.session.plan {
        PlanPhase::Generating => loading_lines(messages, app.tick),
        PlanPhase::Failed(msg) => vec![
            Line::from(Span::styled(
                messages.error_title,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
        ],
        PlanPhase::Idle | PlanPhase::Ready(_) => {
            plan_lines(messages, &sections::render(app.session.plan_text()))
        }
    };

    let output = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Plan "));
    f.render_widget(output, area);
}

fn loading_lines(messages: &Messages, tick: u64) -> Vec<Line<'static>> {
    let spinner = SPINNER[(tick as usize) % SPINNER.len()];
    vec![
        Line::from(Span::styled(
            format!("{spinner} {}", messages.loading_title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(messages.loading_body),
    ]
}

fn plan_lines(messages: &Messages, view: &PlanView) -> Vec<Line<'static>> {
    match view {
        PlanView::Welcome => vec![
            Line::from(Span::styled(
                messages.welcome_title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(messages.welcome_body),
        ],
        PlanView::Unstructured { raw } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    messages.no_sections,
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
            ];
            lines.extend(raw.lines().map(|l| Line::from(l.to_string())));
            lines
        }
        PlanView::Sections(sections) => {
            let mut lines = Vec::new();
            for section in sections {
                lines.push(Line::from(Span::styled(
                    format!("{} {}", section.icon.glyph(), section.title),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )));
                match &section.body {
                    RenderedBody::Code(code) => {
                        let style = Style::default().fg(Color::Green).bg(Color::Black);
                        lines.extend(
                            code.lines()
                                .map(|l| Line::from(Span::styled(l.to_string(), style))),
                        );
                    }
                    RenderedBody::Prose(body) => {
                        lines.extend(body.iter().map(|l| Line::from(l.clone())));
                    }
                }
                lines.push(Line::from(""));
            }
            lines
        }
    }
}

// -- Help and status --

fn render_help(f: &mut Frame, area: Rect) {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("  Form", heading)),
        Line::from("    Up/Down     Select field"),
        Line::from("    Left/Right  Change value / move checklist cursor"),
        Line::from("    Space       Toggle checklist item or language"),
        Line::from("    Enter       Edit text field / activate"),
        Line::from(""),
        Line::from(Span::styled("  Requests", heading)),
        Line::from("    g           Generate project plan"),
        Line::from("    s           Suggest a new project goal"),
        Line::from(""),
        Line::from(Span::styled("  Other", heading)),
        Line::from("    PgUp/PgDn   Scroll plan"),
        Line::from("    ?           Toggle this help"),
        Line::from("    Esc/q       Quit (leave edit mode while editing)"),
        Line::from("    Ctrl-C      Quit"),
        Line::from(""),
    ];

    let help = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mode_name = match &app.mode {
        Mode::Normal => "NORMAL",
        Mode::Editing { .. } => "EDIT",
        Mode::Help => "HELP",
    };

    let suggest = match &app.session.suggest {
        SuggestPhase::Idle => Span::raw(""),
        SuggestPhase::Suggesting => {
            Span::styled("suggesting idea...", Style::default().fg(Color::Cyan))
        }
        SuggestPhase::Failed(msg) => Span::styled(msg.clone(), Style::default().fg(Color::Red)),
    };

    let status_msg = app.status_message.clone().unwrap_or_default();

    let hints = match &app.mode {
        Mode::Editing { .. } => "  Enter:save  Esc:cancel",
        _ => "  g:generate  s:suggest  ?:help  q:quit",
    };

    let bar = Line::from(vec![
        Span::styled(
            format!(" {mode_name} "),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  "),
        suggest,
        Span::raw("  "),
        Span::styled(status_msg, Style::default().fg(Color::Green)),
        Span::raw(hints),
    ]);

    f.render_widget(Paragraph::new(bar), area);
}
