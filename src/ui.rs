use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;
use typerush::session::{CharClass, Status};

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        if session.status() == Status::Finished {
            render_results(self, area, buf);
            return;
        }

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let mut prompt_occupied_lines = ((session.reference_text().width() as f64
            / max_chars_per_line as f64)
            .ceil()
            + 1.0) as u16;

        if session.reference_text().width() <= max_chars_per_line as usize {
            prompt_occupied_lines = 1;
        }

        // countdown + passage + spacer + stats + gauge + spacer + hint
        let fixed_lines = 2 + prompt_occupied_lines + 1 + 1 + 1 + 1 + 1;
        let top_pad = area.height.saturating_sub(fixed_lines) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(top_pad),
                    Constraint::Length(2),
                    Constraint::Length(prompt_occupied_lines),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        let timer = Paragraph::new(Span::styled(
            format!("{}", session.remaining_secs()),
            dim_bold_style,
        ))
        .alignment(Alignment::Center);
        timer.render(chunks[1], buf);

        let spans = session
            .classes()
            .iter()
            .enumerate()
            .map(|(idx, class)| {
                let expected = session
                    .reference_char(idx)
                    .map(|c| c.to_string())
                    .unwrap_or_default();

                match class {
                    CharClass::Correct => Span::styled(expected, green_bold_style),
                    CharClass::Incorrect => Span::styled(
                        match session.typed_char(idx) {
                            Some(' ') => "·".to_owned(),
                            Some(c) => c.to_string(),
                            None => expected,
                        },
                        red_bold_style,
                    ),
                    CharClass::Current => Span::styled(expected, underlined_dim_bold_style),
                    CharClass::Pending => Span::styled(expected, dim_bold_style),
                }
            })
            .collect::<Vec<Span>>();

        let passage = Paragraph::new(Line::from(spans))
            .alignment(if prompt_occupied_lines == 1 {
                // when the passage fits on one line, centering it reads best
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });
        passage.render(chunks[2], buf);

        let report = session.report();
        let stats = Paragraph::new(Span::styled(
            format!(
                "{} wpm   {}% acc   {} chars",
                report.net_wpm, report.accuracy, report.total_chars
            ),
            bold_style,
        ))
        .alignment(Alignment::Center);
        stats.render(chunks[4], buf);

        let gauge_label = match session.status() {
            Status::Idle => String::from("Ready to start"),
            Status::Running if session.typed_len() == 0 => String::from("Test in progress..."),
            _ => session.progress_label(),
        };
        let gauge = Gauge::default()
            .ratio((session.progress_percent() / 100.0).clamp(0.0, 1.0))
            .label(gauge_label)
            .gauge_style(Style::default().fg(Color::Magenta));
        gauge.render(chunks[5], buf);

        let hint = Paragraph::new(Span::styled(
            match session.status() {
                Status::Idle => "(enter) start / (esc)ape",
                _ => "(ctrl+r) reset / (esc)ape",
            },
            italic_style,
        ))
        .alignment(Alignment::Center);
        hint.render(chunks[7], buf);
    }
}

/// Final results, presented as a centered modal over a cleared area.
fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let report = app.session.report();
    let modal = centered_rect(44, 9, area);

    Clear.render(modal, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Test Complete!")
        .title_alignment(Alignment::Center);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(format!("{} wpm", report.net_wpm), bold_style)).centered(),
        Line::from(Span::styled(
            format!("{}% accuracy", report.accuracy),
            bold_style,
        ))
        .centered(),
        Line::from(Span::styled(
            format!("{} characters", report.total_chars),
            bold_style,
        ))
        .centered(),
        Line::default(),
        Line::from(Span::styled("(r) try again / (esc)ape", italic_style)).centered(),
    ];

    let body = Paragraph::new(lines).block(block);
    body.render(modal, buf);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
