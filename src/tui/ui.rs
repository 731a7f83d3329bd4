//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! Every screen shares a header (title, position, score) and a footer with
//! key hints for the active profile. The content area depends on the screen:
//! - question: progress gauge, prompt, choices, feedback after the reveal
//! - summary: final score with one decimal and a gauge
//! - review: every attempt with its choices marked, scrollable
//!
//! The help overlay is drawn on top of whichever screen is active.
//!
//! # Example
//!
//! ```no_run
//! use quizdeck::tui::app::App;
//! use quizdeck::tui::ui::render;
//! use ratatui::Frame;
//!
//! fn draw(frame: &mut Frame, app: &App) {
//!     render(frame, app);
//! }
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

use super::app::{Action, App, AppMode};
use super::keybindings::KeyBindings;
use crate::quiz::{ChoiceMark, Question, ReviewEntry, Session};

// ==================== Accessible Mode Helpers ====================

/// ASCII borders for screen readers and limited terminals.
const ASCII_BORDER_SET: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

fn get_border_set(accessible: bool) -> border::Set {
    if accessible {
        ASCII_BORDER_SET
    } else {
        border::ROUNDED
    }
}

fn create_block(accessible: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(get_border_set(accessible))
}

fn create_block_with_title<'a>(accessible: bool, title: impl Into<Line<'a>>) -> Block<'a> {
    create_block(accessible).title(title)
}

/// Symbols for review marks; plain words in accessible mode.
fn mark_symbol(mark: ChoiceMark, accessible: bool) -> &'static str {
    match (mark, accessible) {
        (ChoiceMark::Correct, false) => "✓",
        (ChoiceMark::WrongPick, false) => "✗",
        (ChoiceMark::Correct, true) => "[correct]",
        (ChoiceMark::WrongPick, true) => "[wrong]",
        (ChoiceMark::Neutral, _) => " ",
    }
}

/// Render the TUI based on the current application state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.mode() == AppMode::Help {
        render_help_dialog(frame, app, area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let title = app.title().unwrap_or("quizdeck");

    let status = match app.screen() {
        AppMode::Summary => " | Quiz complete".to_string(),
        AppMode::Review => " | Review".to_string(),
        _ => format!(
            " | Question {} of {}",
            session.current_index() + 1,
            session.question_count()
        ),
    };

    let header_text = format!("{}{} | Score: {}", title, status, session.score());
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(app.theme().primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            create_block(app.is_accessible())
                .border_style(Style::default().fg(app.theme().primary)),
        );

    frame.render_widget(header, area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.screen() {
        AppMode::Summary => render_summary(frame, app, area),
        AppMode::Review => render_review(frame, app, area),
        _ if app.should_quit() => render_quitting_content(frame, app, area),
        _ => render_question(frame, app, area),
    }
}

fn render_quitting_content(frame: &mut Frame, app: &App, area: Rect) {
    let message = Paragraph::new("Goodbye!")
        .style(Style::default().fg(app.theme().success))
        .alignment(Alignment::Center)
        .block(create_block(app.is_accessible()));
    frame.render_widget(message, area);
}

// ==================== Question Screen ====================

fn render_question(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let question = session.current_question();
    let inner_width = area.width.saturating_sub(2);

    let hint = question_hint(question);
    let prompt_height = wrapped_height(question.prompt(), inner_width) + u16::from(hint.is_some());
    let feedback_height = if session.answer_revealed() {
        feedback_text_height(question, inner_width)
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(prompt_height.min(8) + 2),
            Constraint::Min(question.choices().len() as u16 + 2),
            Constraint::Length(if feedback_height == 0 {
                0
            } else {
                feedback_height.min(10) + 2
            }),
        ])
        .split(area);

    render_progress_gauge(frame, app, chunks[0]);
    render_prompt(frame, app, question, hint, chunks[1]);
    render_choices(frame, app, chunks[2]);
    if session.answer_revealed() {
        render_feedback(frame, app, chunks[3]);
    }
}

fn question_hint(question: &Question) -> Option<&'static str> {
    question
        .is_multiple_answer()
        .then_some("Select two answers")
}

fn render_progress_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let gauge = Gauge::default()
        .block(create_block_with_title(app.is_accessible(), "Progress"))
        .gauge_style(Style::default().fg(app.theme().primary))
        .ratio(percent_ratio(session.progress_percent()))
        .label(format!(
            "{}/{}",
            session.current_index() + 1,
            session.question_count()
        ));
    frame.render_widget(gauge, area);
}

fn render_prompt(
    frame: &mut Frame,
    app: &App,
    question: &Question,
    hint: Option<&'static str>,
    area: Rect,
) {
    let mut lines = vec![Line::from(Span::styled(
        question.prompt().to_string(),
        Style::default()
            .fg(app.theme().normal)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(
            hint,
            Style::default()
                .fg(app.theme().secondary)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let prompt = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            create_block_with_title(app.is_accessible(), "Question")
                .border_style(Style::default().fg(app.theme().primary)),
        );
    frame.render_widget(prompt, area);
}

fn render_choices(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let question = session.current_question();
    let multiple = question.is_multiple_answer();
    let attempt = session.current_attempt();

    let lines: Vec<Line> = question
        .choices()
        .iter()
        .enumerate()
        .map(|(index, choice)| {
            let selected = session.is_selected(choice);
            let marker = match (multiple, selected) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(x)",
                (false, false) => "( )",
            };
            let under_cursor = !session.answer_revealed() && index == app.cursor();
            let pointer = if under_cursor { ">" } else { " " };

            let mut style = Style::default().fg(app.theme().normal);
            let mut suffix = String::new();
            match attempt.map(|a| a.mark(choice)) {
                Some(ChoiceMark::Correct) => {
                    style = style.fg(app.theme().success).add_modifier(Modifier::BOLD);
                    suffix = format!(" {}", mark_symbol(ChoiceMark::Correct, app.is_accessible()));
                }
                Some(ChoiceMark::WrongPick) => {
                    style = style.fg(app.theme().danger);
                    suffix =
                        format!(" {}", mark_symbol(ChoiceMark::WrongPick, app.is_accessible()));
                }
                Some(ChoiceMark::Neutral) => style = style.fg(app.theme().dim),
                None if under_cursor => {
                    style = style.fg(app.theme().secondary).add_modifier(Modifier::BOLD);
                }
                None if selected => style = style.fg(app.theme().secondary),
                None => {}
            }

            Line::from(Span::styled(
                format!("{} {}. {} {}{}", pointer, index + 1, marker, choice, suffix),
                style,
            ))
        })
        .collect();

    let title = if session.answer_revealed() {
        "Choices (locked)"
    } else {
        "Choices"
    };
    let list = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(create_block_with_title(app.is_accessible(), title));
    frame.render_widget(list, area);
}

fn render_feedback(frame: &mut Frame, app: &App, area: Rect) {
    let Some(attempt) = app.session().current_attempt() else {
        return;
    };

    let (verdict, color) = if attempt.was_correct() {
        ("Correct!", app.theme().success)
    } else {
        ("Incorrect", app.theme().danger)
    };

    let mut lines = vec![Line::from(Span::styled(
        verdict,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if !attempt.was_correct() {
        lines.push(Line::from(vec![
            Span::styled("Answer: ", Style::default().fg(app.theme().dim)),
            Span::styled(
                answer_text(attempt.question()),
                Style::default().fg(app.theme().success),
            ),
        ]));
    }
    if !attempt.question().explanation().is_empty() {
        lines.push(Line::from(Span::styled(
            attempt.question().explanation().to_string(),
            Style::default().fg(app.theme().normal),
        )));
    }

    let feedback = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(
            create_block_with_title(app.is_accessible(), "Result")
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(feedback, area);
}

fn feedback_text_height(question: &Question, width: u16) -> u16 {
    // Verdict, answer line (only when wrong, reserved anyway), explanation
    2 + wrapped_height(question.explanation(), width)
}

// ==================== Summary Screen ====================

fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let session = app.session();
    let percent = session.final_score_percent();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let color = score_color(app, percent);
    let lines = vec![
        Line::from(Span::styled(
            "Quiz complete!",
            Style::default()
                .fg(app.theme().primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "You answered {} of {} questions correctly.",
            session.score(),
            session.question_count()
        )),
        Line::from(Span::styled(
            format!("Final score: {}", format_percent(percent)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    let summary = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(create_block_with_title(app.is_accessible(), "Summary"));
    frame.render_widget(summary, chunks[0]);

    let gauge = Gauge::default()
        .block(create_block(app.is_accessible()))
        .gauge_style(Style::default().fg(color))
        .ratio(percent_ratio(percent))
        .label(format_percent(percent));
    frame.render_widget(gauge, chunks[1]);
}

fn score_color(app: &App, percent: f64) -> ratatui::style::Color {
    if percent >= 50.0 {
        app.theme().success
    } else {
        app.theme().danger
    }
}

// ==================== Review Screen ====================

fn render_review(frame: &mut Frame, app: &App, area: Rect) {
    let lines = review_lines(app, app.session());
    let scroll = app.review_scroll().min(app.max_review_scroll());

    let review = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(create_block_with_title(app.is_accessible(), "Review"));
    frame.render_widget(review, area);
}

fn review_lines<'a>(app: &App, session: &'a Session) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for entry in session.review_entries() {
        lines.extend(review_entry_lines(app, &entry));
        lines.push(Line::from(""));
    }
    lines
}

fn review_entry_lines<'a>(app: &App, entry: &ReviewEntry<'a>) -> Vec<Line<'a>> {
    let attempt = entry.attempt;
    let (badge, badge_color) = if attempt.was_correct() {
        (" Correct ", app.theme().success)
    } else {
        (" Incorrect ", app.theme().danger)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                badge,
                Style::default()
                    .fg(app.theme().inverted_fg)
                    .bg(badge_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" Question {} of {}", entry.position, entry.total),
                Style::default().fg(app.theme().dim),
            ),
        ]),
        Line::from(Span::styled(
            attempt.question().prompt(),
            Style::default()
                .fg(app.theme().normal)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    for (choice, mark) in attempt.marked_choices() {
        let style = match mark {
            ChoiceMark::Correct => Style::default().fg(app.theme().success),
            ChoiceMark::WrongPick => Style::default().fg(app.theme().danger),
            ChoiceMark::Neutral => Style::default().fg(app.theme().dim),
        };
        lines.push(Line::from(Span::styled(
            format!("  {} {}", mark_symbol(mark, app.is_accessible()), choice),
            style,
        )));
    }

    if !attempt.question().explanation().is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Explanation: ", Style::default().fg(app.theme().dim)),
            Span::styled(
                attempt.question().explanation(),
                Style::default().fg(app.theme().normal),
            ),
        ]));
    }

    lines
}

// ==================== Footer ====================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let commands = get_footer_commands(app);

    let spans: Vec<Span> = commands
        .into_iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(
                    format!("[{}]", key),
                    Style::default()
                        .fg(app.theme().secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", desc),
                    Style::default().fg(app.theme().normal),
                ),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            create_block(app.is_accessible()).border_style(Style::default().fg(app.theme().dim)),
        );

    frame.render_widget(footer, area);
}

/// Footer hints for the active screen, using the active bindings.
fn get_footer_commands(app: &App) -> Vec<(String, &'static str)> {
    let bindings = app.bindings();
    let hint = |action: Action| bindings.key_hint(&action);
    let pair = |a: Action, b: Action| format!("{}/{}", hint(a), hint(b));
    let session = app.session();

    match app.mode() {
        AppMode::Answering => {
            let mut commands = vec![
                (pair(Action::NavigateUp, Action::NavigateDown), "Move"),
                (hint(Action::ToggleChoice), "Select"),
                ("1-9".to_string(), "Pick"),
                (hint(Action::Confirm), "Check"),
            ];
            if session.current_index() > 0 {
                commands.push((hint(Action::PreviousQuestion), "Back"));
            }
            commands.push((hint(Action::ShowHelp), "Help"));
            commands.push((hint(Action::Quit), "Quit"));
            commands
        }
        AppMode::Revealed => {
            let next = if session.is_last_question() {
                "Finish"
            } else {
                "Next"
            };
            let mut commands = vec![(hint(Action::Confirm), next)];
            if session.current_index() > 0 {
                commands.push((hint(Action::PreviousQuestion), "Back"));
            }
            commands.push((hint(Action::ShowHelp), "Help"));
            commands.push((hint(Action::Quit), "Quit"));
            commands
        }
        AppMode::Summary => vec![
            (hint(Action::ToggleReview), "Review answers"),
            (hint(Action::Restart), "Restart"),
            (hint(Action::Quit), "Quit"),
        ],
        AppMode::Review => vec![
            (pair(Action::NavigateUp, Action::NavigateDown), "Scroll"),
            (hint(Action::ToggleReview), "Summary"),
            (hint(Action::Restart), "Restart"),
            (hint(Action::Quit), "Quit"),
        ],
        AppMode::Help => vec![(hint(Action::Cancel), "Close")],
        AppMode::Quitting => vec![],
    }
}

// ==================== Help Overlay ====================

/// Actions listed in the help overlay, in display order.
const HELP_ACTIONS: &[Action] = &[
    Action::NavigateUp,
    Action::NavigateDown,
    Action::ToggleChoice,
    Action::Confirm,
    Action::NextQuestion,
    Action::PreviousQuestion,
    Action::ToggleReview,
    Action::Restart,
    Action::ToggleTheme,
    Action::ShowHelp,
    Action::Cancel,
    Action::Quit,
    Action::Interrupt,
];

fn render_help_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let dialog_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, dialog_area);

    let bindings = app.bindings();
    let mut lines = vec![
        Line::from(Span::styled(
            "Keybinding Reference",
            Style::default()
                .fg(app.theme().primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Profile: ", Style::default().fg(app.theme().dim)),
            Span::styled(
                bindings.profile().display_name(),
                Style::default().fg(app.theme().secondary),
            ),
        ]),
        Line::from(""),
        format_help_line(app, "1-9".to_string(), Action::Pick(0).description()),
    ];

    for action in HELP_ACTIONS {
        let keys = bindings
            .keys_for_action(action)
            .iter()
            .map(KeyBindings::format_key)
            .collect::<Vec<_>>()
            .join(", ");
        if !keys.is_empty() {
            lines.push(format_help_line(app, keys, action.description()));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme().dim),
    )));

    let help = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            create_block_with_title(app.is_accessible(), "Help")
                .border_style(Style::default().fg(app.theme().primary)),
        );
    frame.render_widget(help, dialog_area);
}

fn format_help_line<'a>(app: &App, keys: String, desc: &'static str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {:>14}", keys),
            Style::default()
                .fg(app.theme().secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", desc),
            Style::default().fg(app.theme().normal),
        ),
    ])
}

// ==================== Helpers ====================

/// Format a percentage with one decimal, e.g. `66.7%`.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Correct answer values joined for display.
#[must_use]
pub fn answer_text(question: &Question) -> String {
    question.answer().values().collect::<Vec<_>>().join(", ")
}

fn percent_ratio(percent: f64) -> f64 {
    (percent / 100.0).clamp(0.0, 1.0)
}

/// Rough line count of `text` wrapped at `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let lines: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(lines.max(1)).unwrap_or(u16::MAX)
}

/// Create a centered rectangle with given percentage of parent.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
