//! Painting a [`DisplayTree`] with ratatui widgets.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;
use vitals_core::Severity;
use vitals_render::{DisplayTree, Footer, Header, Panel};

const HEADER_HEIGHT: u16 = 3;
const PANEL_HEIGHT: u16 = 5;
const FOOTER_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, tree: &DisplayTree) {
    let mut constraints = vec![Constraint::Length(HEADER_HEIGHT)];
    constraints.extend(tree.rows.iter().map(|_| Constraint::Length(PANEL_HEIGHT)));
    constraints.push(Constraint::Length(FOOTER_HEIGHT));
    constraints.push(Constraint::Min(0));

    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    draw_header(frame, areas[0], &tree.header);

    for (row, area) in tree.rows.iter().zip(areas.iter().skip(1)) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*area);

        draw_panel(frame, halves[0], &row.left);
        if let Some(right) = &row.right {
            draw_panel(frame, halves[1], right);
        }
    }

    draw_footer(frame, areas[1 + tree.rows.len()], &tree.footer);
}

fn draw_header(frame: &mut Frame, area: Rect, header: &Header) {
    let line = Line::from(vec![
        Span::styled("  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(&header.hostname, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled("  ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
        Span::raw(&header.kernel),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled("󰥔  ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(&header.uptime),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(Span::styled(
            "System Monitor",
            Style::default().add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_panel(frame: &mut Frame, area: Rect, panel: &Panel) {
    let color = severity_color(panel.severity);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!("{}  {}", panel.icon, panel.label),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let value = Paragraph::new(Span::styled(
        panel.value.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(value, lines[0]);

    if let Some(pct) = panel.percentage {
        let gauge = Gauge::default()
            .ratio(pct / 100.0)
            .label(gauge_label(pct, panel.unit))
            .gauge_style(Style::default().fg(color));
        frame.render_widget(gauge, lines[1]);
    }

    if let Some(spark) = &panel.sparkline {
        let spark = Paragraph::new(Span::styled(spark.clone(), Style::default().fg(color)));
        frame.render_widget(spark, lines[2]);
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, footer: &Footer) {
    let line = Line::from(vec![
        Span::raw(format!("  Refreshing every {:.0}s", footer.interval_secs)),
        Span::raw("  |  "),
        Span::raw(format!("  {}", footer.clock)),
    ])
    .style(Style::default().fg(Color::DarkGray));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn gauge_label(pct: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{pct:.0}")
    } else {
        format!("{pct:.0}{unit}")
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Normal => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
        Severity::Dim => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_label_appends_the_metric_unit() {
        assert_eq!(gauge_label(42.4, "%"), "42%");
        assert_eq!(gauge_label(62.0, "°C"), "62°C");
        assert_eq!(gauge_label(10.0, ""), "10");
    }

    #[test]
    fn severity_maps_to_traffic_light_colors() {
        assert_eq!(severity_color(Severity::Normal), Color::Green);
        assert_eq!(severity_color(Severity::Warning), Color::Yellow);
        assert_eq!(severity_color(Severity::Critical), Color::Red);
        assert_eq!(severity_color(Severity::Dim), Color::DarkGray);
    }
}
