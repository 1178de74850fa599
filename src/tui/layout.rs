//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::runtime::App;
use super::style;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(6), // latest values
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_chart(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: replay progress, speed, run state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (state_icon, state_label) = if app.is_finished() {
        ("■", "DONE")
    } else if app.paused {
        ("‖", "PAUSED")
    } else {
        ("▶", "REPLAY")
    };

    let header = Line::from(vec![
        Span::styled(
            " RAN-ENERGY-TWIN ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " t={}/{} │ {}ms │ {state_icon} {state_label} ",
            app.cursor,
            app.total(),
            app.tick_interval_ms(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// One line per node of the selected tier, or the network totals.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let series = app.series();
    let y_bounds = style::auto_bounds_y(series.iter().map(|(_, p)| p.as_slice()));
    let x_hi = (app.total().saturating_sub(1) as f64).max(1.0);

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, (name, points))| {
            Dataset::default()
                .name(name.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(style::series_color(i)))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().title(app.title()).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("sample")
                .bounds([0.0, x_hi])
                .labels(vec!["0".to_string(), format!("{}", x_hi as usize)]),
        )
        .y_axis(
            Axis::default()
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.2}", y_bounds[0]),
                    format!("{:.2}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Values at the latest revealed timestamp, four per line.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = match app.latest() {
        Some((stamp, values)) => {
            let lines = values
                .chunks(4)
                .map(|chunk| {
                    Line::from(
                        chunk
                            .iter()
                            .map(|(id, v)| format!("  {id}={v:>9.2}"))
                            .collect::<String>(),
                    )
                })
                .collect();
            (format!(" {stamp} "), lines)
        }
        None => (
            " Latest ".to_string(),
            vec![Line::from("  Waiting for first timestamp...")],
        ),
    };

    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Space:Pause  +/-:Speed  1/2/3:RU/DU/CU  n:Network  u/p:Util/Power  End:Skip  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
