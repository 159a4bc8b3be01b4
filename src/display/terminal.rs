use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::io::{self, stdout};
use std::time::Duration;
use tracing::info;

use super::app::{App, Screen};
use super::layout::centered_rect;
use super::plot::{PlotView, Readouts};
use crate::config::Config;
use crate::input::Field;

const TITLE: &str = " Fan Pattern Overlap Calculator ";
const READOUT_WIDTH: u16 = 36;

pub fn run(config: Config, autorun: bool) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, App::new(config, autorun));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let poll_interval = Duration::from_millis(250);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    info!("Exiting");
    Ok(())
}

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match (app.screen, &app.plot) {
        (Screen::Plot, Some(eval)) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(1)])
                .split(area);
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(10), Constraint::Length(READOUT_WIDTH)])
                .split(chunks[0]);

            let plot = &app.config.plot;
            frame.render_widget(
                PlotView::new(&eval.scene)
                    .colors(plot.background, plot.text_color)
                    .legend(plot.show_legend),
                body[0],
            );
            frame.render_widget(
                Readouts {
                    input: &eval.input,
                    result: &eval.result,
                    units: &plot.units,
                    precision: plot.precision,
                },
                body[1],
            );
            render_status(frame, chunks[1], app);
        }
        _ => render_form(frame, area, app),
    }

    if let Some(message) = &app.notice {
        render_notice(frame, area, message);
    }
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let form_area = centered_rect(44, 11, area);
    let block = Block::default().borders(Borders::ALL).title(TITLE);
    let inner = block.inner(form_area);
    frame.render_widget(Clear, form_area);
    frame.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (field, label_row, input_row) in [(Field::Index, rows[0], rows[1]), (Field::Radius, rows[3], rows[4])] {
        let focused = app.form.focus == field;
        let style = if focused {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        };
        let text = app.form.text(field);

        frame.render_widget(Paragraph::new(format!("{}:", field.label())), label_row);
        frame.render_widget(Paragraph::new(format!("{:<width$}", text, width = input_row.width as usize)).style(style), input_row);

        if focused && app.notice.is_none() {
            let cursor_x = input_row.x + (text.chars().count() as u16).min(input_row.width.saturating_sub(1));
            frame.set_cursor_position((cursor_x, input_row.y));
        }
    }

    let hint = Line::from(vec![
        Span::styled("[ Run ]", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" enter  tab: next field  esc: quit", Style::default().fg(Color::DarkGray)),
    ]);
    if let Some(row) = rows.get(6) {
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), *row);
    }
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(50, 7, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Error ")
        .border_style(Style::default().fg(Color::Yellow));
    let text = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::styled("Press any key", Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), popup);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let plot = &app.config.plot;
    let status = format!(
        " [e]dit | \u{2190}/\u{2192} index | \u{2193}/\u{2191} radius | [c]olor: {} | [g]rid | [r]ings | [l]egend | [q]uit ",
        plot.color_scheme.name()
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
