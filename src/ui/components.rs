//! UI components for the TUI
//!
//! - Input component for text entry, scrolled so the end of the text stays visible
//! - Submit line with the button label and key hints
//! - Outcome component showing the error, loading text, or a scrollable summary

use crate::view_model::{FormView, Outcome, LOADING_TEXT, SUMMARY_HEADING, TITLE};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Draw the form. Returns the summary scroll offset actually applied,
/// clamped to the summary's length.
pub fn render(frame: &mut Frame<'_>, view: &FormView, summary_scroll: u16) -> u16 {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Percentage(40),
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, layout[0]);

    render_input(frame, layout[1], view);
    render_submit(frame, layout[2], view);
    render_outcome(frame, layout[3], view, summary_scroll)
}

fn render_input(frame: &mut Frame<'_>, area: Rect, view: &FormView) {
    let counter_style = if view.within_limits() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default().borders(Borders::ALL).title(Line::from(vec![
        Span::raw(" Text "),
        Span::styled(
            format!("{}/{} ", view.char_count, view.limits.max_chars),
            counter_style,
        ),
    ]));

    if view.input.is_empty() {
        let placeholder = Text::styled(
            view.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(
            Paragraph::new(placeholder)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    // Typing happens at the end, so pin the last rows.
    let inner = block.inner(area);
    let rows = wrap_text(&view.input, usize::from(inner.width));
    let offset = to_u16(rows.len().saturating_sub(usize::from(inner.height)));
    frame.render_widget(
        Paragraph::new(rows.into_iter().map(Line::from).collect::<Vec<_>>())
            .block(block)
            .scroll((offset, 0)),
        area,
    );
}

fn render_submit(frame: &mut Frame<'_>, area: Rect, view: &FormView) {
    let button_style = if view.submit_enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let hints = if view.submit_enabled {
        "  ctrl+s submit · pgup/pgdn scroll · ctrl+q quit"
    } else {
        "  esc cancel · ctrl+q quit"
    };

    let line = Line::from(vec![
        Span::styled(format!("[ {} ]", view.submit_label), button_style),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_outcome(frame: &mut Frame<'_>, area: Rect, view: &FormView, summary_scroll: u16) -> u16 {
    match &view.outcome {
        Outcome::Idle => 0,
        Outcome::Failed(message) => {
            let widget =
                Paragraph::new(Span::styled(message.clone(), Style::default().fg(Color::Red)))
                    .block(Block::default().borders(Borders::ALL).title(" Error "))
                    .wrap(Wrap { trim: false });
            frame.render_widget(widget, area);
            0
        }
        Outcome::Loading => {
            let widget =
                Paragraph::new(Span::styled(LOADING_TEXT, Style::default().fg(Color::Yellow)));
            frame.render_widget(widget, area);
            0
        }
        Outcome::Summary(summary) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", SUMMARY_HEADING));
            let inner = block.inner(area);
            let rows = wrap_text(summary, usize::from(inner.width));
            let max_scroll = to_u16(rows.len().saturating_sub(usize::from(inner.height)));
            let scroll = summary_scroll.min(max_scroll);
            frame.render_widget(
                Paragraph::new(rows.into_iter().map(Line::from).collect::<Vec<_>>())
                    .block(block)
                    .scroll((scroll, 0)),
                area,
            );
            scroll
        }
    }
}

fn to_u16(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Word-wrap `text` into rows of at most `width` characters. Words longer
/// than a row are split; each `\n` starts a new row.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_len = 0;
        for word in line.split_inclusive(' ') {
            let visible = word.trim_end_matches(' ').chars().count();
            if row_len > 0 && row_len + visible > width {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            for c in word.chars() {
                if row_len == width {
                    // spaces at the wrap point are not carried over
                    if c == ' ' {
                        continue;
                    }
                    rows.push(std::mem::take(&mut row));
                    row_len = 0;
                }
                row.push(c);
                row_len += 1;
            }
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SummarizeError;
    use crate::form::{update, FormState, Msg};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(view: &FormView) -> String {
        screen_scrolled(view, 0).0
    }

    fn screen_scrolled(view: &FormView, summary_scroll: u16) -> (String, u16) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut applied = 0;
        terminal
            .draw(|frame| applied = render(frame, view, summary_scroll))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        (text, applied)
    }

    fn with_summary(summary: String) -> FormState {
        let (state, request) = submitted();
        update(
            state,
            Msg::Completed {
                request,
                outcome: Ok(summary),
            },
        )
        .0
    }

    fn submitted() -> (FormState, u64) {
        let (state, _) = update(FormState::default(), Msg::InputChanged("a".repeat(100)));
        let (state, _) = update(state, Msg::Submit);
        let request = state.in_flight().unwrap();
        (state, request)
    }

    #[test]
    fn idle_form_shows_placeholder() {
        let text = screen(&FormState::default().view());
        assert!(text.contains(TITLE));
        assert!(text.contains("Enter text to summarize (100-5000 characters)"));
        assert!(text.contains("[ Summarize ]"));
        assert!(!text.contains(LOADING_TEXT));
    }

    #[test]
    fn loading_form_disables_submit() {
        let (state, _) = submitted();
        let text = screen(&state.view());
        assert!(text.contains("[ Summarizing... ]"));
        assert!(text.contains(LOADING_TEXT));
    }

    #[test]
    fn summary_replaces_loading() {
        let (state, request) = submitted();
        let (state, _) = update(
            state,
            Msg::Completed {
                request,
                outcome: Ok("short summary".into()),
            },
        );
        let text = screen(&state.view());
        assert!(text.contains(SUMMARY_HEADING));
        assert!(text.contains("short summary"));
        assert!(!text.contains(LOADING_TEXT));
        assert!(!text.contains("Error"));
    }

    #[test]
    fn error_is_rendered() {
        let (state, request) = submitted();
        let (state, _) = update(
            state,
            Msg::Completed {
                request,
                outcome: Err(SummarizeError::InvalidResponse),
            },
        );
        let text = screen(&state.view());
        assert!(text.contains("Invalid response format"));
        assert!(!text.contains(LOADING_TEXT));
    }

    #[test]
    fn tail_of_long_input_stays_visible() {
        let input = format!("{}ENDMARK", "word ".repeat(600));
        let (state, _) = update(FormState::default(), Msg::InputChanged(input));
        let text = screen(&state.view());
        assert!(text.contains("ENDMARK"));
    }

    #[test]
    fn tail_after_many_newlines_stays_visible() {
        let input = format!("{}last line", "line\n".repeat(50));
        let (state, _) = update(FormState::default(), Msg::InputChanged(input));
        assert!(screen(&state.view()).contains("last line"));
    }

    #[test]
    fn long_summary_scrolls_and_clamps() {
        let body = (0..40)
            .map(|i| format!("row{i:02}"))
            .collect::<Vec<_>>()
            .join("\n");
        let state = with_summary(format!("FIRSTROW\n{body}\nLASTROW"));
        let view = state.view();

        let (top, applied) = screen_scrolled(&view, 0);
        assert_eq!(applied, 0);
        assert!(top.contains("FIRSTROW"));
        assert!(!top.contains("LASTROW"));

        let (bottom, applied) = screen_scrolled(&view, u16::MAX);
        assert!(applied > 0 && applied < 42);
        assert!(bottom.contains("LASTROW"));
        assert!(!bottom.contains("FIRSTROW"));

        // the clamped offset is the bottom of the summary
        let (again, _) = screen_scrolled(&view, applied);
        assert_eq!(again, bottom);
    }

    #[test]
    fn short_summary_does_not_scroll() {
        let state = with_summary("short summary".into());
        let (_, applied) = screen_scrolled(&state.view(), 10);
        assert_eq!(applied, 0);
    }

    #[test]
    fn wrap_text_breaks_on_words_and_long_runs() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert!(wrap_text("anything", 0).is_empty());
    }
}
