//! Terminal rendering.
//!
//! Everything here reads an [`App`] and writes into a ratatui frame; no state
//! changes hands in the other direction.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, Paragraph, Row, Table,
};
use ratatui::{Frame, Terminal};

use crate::app::{App, DemoPhase, ToastKind};
use crate::catalog::{self, ScenarioId};
use crate::error::Result;
use crate::presenter::{RenderPlan, Rgb, StatusClass, DARK_GREEN};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

const BUTTON_IDLE: Rgb = Rgb(0x73, 0x73, 0x73);
const DEMO_WIDTH: u16 = 12;
const COLUMN_SPACING: u16 = 1;
const MIN_CHART_WIDTH: u16 = 20;

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

fn status_style(status: Option<StatusClass>) -> Style {
    match status {
        Some(StatusClass::Active) => Style::default().fg(Color::Green),
        Some(StatusClass::Masked) => Style::default().fg(Color::Yellow),
        Some(StatusClass::Inactive) => Style::default().fg(Color::Red),
        None => Style::default(),
    }
}

pub fn draw(f: &mut Frame<'_>, app: &App) {
    let area = f.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        f.render_widget(
            Paragraph::new(format!(
                "Terminal terlalu kecil ({}x{}), minimal {MIN_WIDTH}x{MIN_HEIGHT}",
                area.width, area.height
            ))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, app, vertical[0]);
    draw_logic(f, app, vertical[1]);
    draw_footer(f, app, vertical[2]);
}

fn draw_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Lampu Lalu Lintas ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(DEMO_WIDTH),
            Constraint::Length(32),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Bagian: "),
            Span::styled(
                app.section().name,
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])),
        cols[0],
    );

    f.render_widget(Paragraph::new(demo_light(app.demo_phase())), cols[1]);

    let label = app
        .counter_label()
        .unwrap_or_else(|| format!("{:.0}%", app.progress() * 100.0));
    f.render_widget(
        Gauge::default()
            .ratio(app.progress())
            .label(label)
            .gauge_style(Style::default().fg(rgb(DARK_GREEN)).bg(Color::DarkGray)),
        cols[2],
    );
}

fn demo_light(current: DemoPhase) -> Line<'static> {
    let lamp = |phase: DemoPhase, color: Color| {
        let style = if current == phase {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(" ●", style)
    };
    Line::from(vec![
        Span::raw("Demo"),
        lamp(DemoPhase::Red, Color::Red),
        lamp(DemoPhase::Yellow, Color::Yellow),
        lamp(DemoPhase::Green, Color::Green),
    ])
}

fn draw_logic(f: &mut Frame<'_>, app: &App, area: Rect) {
    let plan = app.plan();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    draw_buttons(f, app.selected(), rows[0]);

    let widths = column_widths(plan);
    let spacing = widths.len().saturating_sub(1) as u16 * COLUMN_SPACING;
    let table_width = widths.iter().sum::<u16>() + spacing + 2;
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(table_width), Constraint::Min(MIN_CHART_WIDTH)])
        .split(rows[1]);

    draw_table(f, plan, &widths, main[0]);
    draw_chart(f, plan, main[1]);
    draw_summary(f, plan, rows[2]);
}

fn draw_buttons(f: &mut Frame<'_>, selected: ScenarioId, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, id) in ScenarioId::ALL.into_iter().enumerate() {
        let bg = if id == selected { DARK_GREEN } else { BUTTON_IDLE };
        let style = Style::default().fg(Color::White).bg(rgb(bg));
        f.render_widget(
            Paragraph::new(format!("[{}] {}", i + 1, catalog::lookup(id).name))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).style(style)),
            cols[i],
        );
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Width of each column: its header or its widest cell, whichever is wider.
pub fn column_widths(plan: &RenderPlan) -> Vec<u16> {
    plan.headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            plan.rows
                .iter()
                .filter_map(|row| row.cells.get(i))
                .map(|cell| text_width(&cell.text))
                .fold(text_width(header), u16::max)
        })
        .collect()
}

fn draw_table(f: &mut Frame<'_>, plan: &RenderPlan, widths: &[u16], area: Rect) {
    let header = Row::new(plan.headers.iter().map(|h| Cell::from(h.clone())))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = plan
        .rows
        .iter()
        .map(|row| {
            Row::new(
                row.cells
                    .iter()
                    .map(|cell| Cell::from(cell.text.clone()).style(status_style(cell.status))),
            )
        })
        .collect();

    let table = Table::new(rows, widths.iter().map(|&w| Constraint::Length(w)))
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", plan.title)),
        );
    f.render_widget(table, area);
}

fn draw_chart(f: &mut Frame<'_>, plan: &RenderPlan, area: Rect) {
    let bars: Vec<Bar> = plan
        .bars
        .iter()
        .map(|b| {
            Bar::default()
                .value(u64::from(b.value))
                .label(Line::from(b.label.clone()))
                .style(Style::default().fg(rgb(b.color)))
                .value_style(Style::default().fg(Color::White).bg(rgb(b.color)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", plan.chart_title))
                .title_bottom(" Durasi (detik) "),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(u64::from(plan.max_bar()))
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn draw_summary(f: &mut Frame<'_>, plan: &RenderPlan, area: Rect) {
    let s = &plan.summary;
    let field = |name: &'static str, value: &str| {
        vec![
            Span::styled(name, Style::default().add_modifier(Modifier::DIM)),
            Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]
    };
    let sep = || Span::raw("  │  ");

    let mut spans = field("Total siklus: ", &s.total_cycle);
    spans.push(sep());
    spans.extend(field("Jumlah state: ", &s.state_count));
    spans.push(sep());
    spans.extend(field("Hijau maks: ", &s.max_green));
    spans.push(sep());
    spans.extend(field("Transisi: ", &s.transition_time));

    f.render_widget(
        Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title(" Info Sistem ")),
        area,
    );
}

fn draw_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let line = match app.toast() {
        Some(toast) => {
            let (mark, color) = match toast.kind {
                ToastKind::Success => ("✔", Color::Green),
                ToastKind::Error => ("✖", Color::Red),
            };
            Line::from(vec![
                Span::styled(format!(" {mark} "), Style::default().fg(color)),
                Span::raw(toast.message.clone()),
            ])
        }
        None => Line::from(Span::styled(
            " 1-4 skenario · Tab/←/→ bagian · Esc hero · q keluar",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Plain text of a buffer, one line per row, trailing blanks trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width).max(1);
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Draws one frame off-screen and returns it as text.
pub fn render_to_string(app: &App, width: u16, height: u16) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| draw(f, app))?;
    Ok(buffer_to_string(terminal.backend().buffer()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{project, BarPalette};
    use std::time::Instant;

    fn snapshot(id: ScenarioId, width: u16, height: u16) -> String {
        let app = App::new(id, BarPalette::Bucketed, Instant::now());
        render_to_string(&app, width, height).unwrap()
    }

    #[test]
    fn two_way_frame_shows_table_chart_and_summary() {
        let text = snapshot(ScenarioId::TwoWay, 120, 32);
        assert!(text.contains("Jalan Lurus 2 Arah"));
        assert!(text.contains("Arah 1"));
        assert!(text.contains("Hijau"));
        assert!(text.contains("State 6"));
        assert!(text.contains("~50 detik"));
        assert!(text.contains("6 states"));
        assert!(!text.contains("State 7"));
    }

    #[test]
    fn four_way_frame_lists_all_states() {
        let text = snapshot(ScenarioId::FourWay, 120, 32);
        assert!(text.contains("State 12"));
        assert!(text.contains("Kuning*"));
        assert!(text.contains("12 states"));
    }

    #[test]
    fn welcome_toast_lands_in_footer() {
        let text = snapshot(ScenarioId::TwoWay, 120, 32);
        let footer = text.lines().last().unwrap();
        assert!(footer.contains("Selamat datang"));
    }

    #[test]
    fn redraw_is_stable() {
        let app = App::new(ScenarioId::TShape, BarPalette::Bucketed, Instant::now());
        let a = render_to_string(&app, 120, 32).unwrap();
        let b = render_to_string(&app, 120, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn switching_scenarios_leaves_no_stale_rows() {
        let t0 = Instant::now();
        let mut app = App::new(ScenarioId::FourWay, BarPalette::Bucketed, t0);
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
        app.select(ScenarioId::TwoWay, t0);
        terminal.draw(|f| draw(f, &app)).unwrap();
        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("State 6"));
        assert!(!text.contains("State 7"));
        assert!(!text.contains("Barat"));
    }

    #[test]
    fn tiny_terminal_gets_a_notice() {
        let text = snapshot(ScenarioId::TwoWay, 40, 10);
        assert!(text.contains("terlalu kecil"));
        assert!(!text.contains("State 1"));
    }

    #[test]
    fn widths_fit_headers_and_cells() {
        let plan = project(ScenarioId::FourWay, BarPalette::Bucketed);
        let widths = column_widths(&plan);
        assert_eq!(widths.len(), plan.headers.len());
        assert_eq!(widths[0], 5);
        assert_eq!(widths[2], 7);
        assert_eq!(widths[5], 14);
        assert_eq!(widths[6], 43);
    }

    #[test]
    fn default_frame_shows_every_header_and_note() {
        for id in ScenarioId::ALL {
            let text = snapshot(id, 120, 32);
            let plan = project(id, BarPalette::Bucketed);
            let widths = column_widths(&plan);
            let header_line = plan
                .headers
                .iter()
                .zip(&widths)
                .map(|(h, &w)| format!("{h:<width$}", width = usize::from(w)))
                .collect::<Vec<_>>()
                .join(" ");
            assert!(
                text.contains(header_line.trim_end()),
                "{id}: header row cut off\n{text}"
            );
            for row in &plan.rows {
                let note = &row.cells.last().unwrap().text;
                assert!(text.contains(note.as_str()), "{id}: note {note:?} cut off\n{text}");
            }
        }
    }

    #[test]
    fn demo_light_sits_in_the_header() {
        let text = snapshot(ScenarioId::TwoWay, 120, 32);
        let header = text.lines().nth(1).unwrap();
        assert!(header.contains("Demo ● ● ●"));
        assert!(header.contains("Bagian: Hero"));
    }
}
