//! Risk report view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{format_percent, Assessment, RiskClass};
use crate::tui::styles::Theme;

/// Render the report for a completed assessment
pub fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Report
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_report(f, chunks[0], assessment);
    render_result_footer(f, chunks[1]);
}

/// `(label, value)` rows for the detail table.
fn detail_rows(assessment: &Assessment) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Prediction Result", assessment.risk.label().to_string())];
    if let Some(p) = assessment.response.probability {
        rows.push(("Confidence", format_percent(p)));
    }
    if let Some(c) = assessment.response.confidence {
        rows.push(("Model Confidence", format_percent(c)));
    }
    if let Some(bmi) = assessment.bmi {
        rows.push(("Calculated BMI", format!("{bmi:.1}")));
    }
    rows
}

fn render_report(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let risk_style = Theme::risk(assessment.risk);

    let block = Block::default()
        .title(Span::styled(" Risk Report ", Theme::focused()))
        .borders(Borders::ALL)
        .border_style(risk_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = detail_rows(assessment);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),                     // Headline + message
            Constraint::Length(rows.len() as u16 + 1), // Details
            Constraint::Length(3),                     // Probability gauge
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let icon = match assessment.risk {
        RiskClass::High => "!",
        RiskClass::Low => "OK",
    };

    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}", icon, assessment.risk.title()),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            assessment.risk.message(),
            Theme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(headline, chunks[0]);

    let details: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Theme::text_secondary()),
                Span::styled(value, Theme::text()),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(details).alignment(Alignment::Center),
        chunks[1],
    );

    if let Some(p) = assessment.response.probability {
        let ratio = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(" Disease Probability ", Theme::text_secondary()))
                    .borders(Borders::ALL)
                    .border_style(Theme::border()),
            )
            .gauge_style(risk_style)
            .ratio(ratio)
            .label(format_percent(p));
        f.render_widget(gauge, chunks[2]);
    }
}

fn render_result_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[Esc] ", Theme::key_hint()),
        Span::styled("Dismiss ", Theme::key_desc()),
        Span::styled("[N] ", Theme::key_hint()),
        Span::styled("New Assessment ", Theme::key_desc()),
        Span::styled("[Q] ", Theme::key_hint()),
        Span::styled("Quit", Theme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
