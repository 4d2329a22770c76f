//! Vitals input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{Field, FieldKind, RawInput};
use crate::tui::styles::Theme;
use crate::CardioError;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Form state
pub struct FormState {
    pub input: RawInput,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input: RawInput::with_form_defaults(),
            selected_field: 0,
            error_message: None,
        }
    }
}

impl FormState {
    #[must_use]
    pub fn selected(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % Field::ALL.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = Field::ALL.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current numeric field
    pub fn input_char(&mut self, c: char) {
        let field = self.selected();
        if !matches!(field.kind(), FieldKind::Numeric { .. }) {
            return;
        }
        if c.is_ascii_digit() || c == '.' || c == '-' {
            self.input.get_mut(field).push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        let field = self.selected();
        if matches!(field.kind(), FieldKind::Numeric { .. }) {
            self.input.get_mut(field).pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        let field = self.selected();
        if matches!(field.kind(), FieldKind::Numeric { .. }) {
            self.input.get_mut(field).zeroize();
        }
    }

    /// Step the current selector to its next (or previous) option.
    pub fn cycle_option(&mut self, forward: bool) {
        let field = self.selected();
        let FieldKind::Choice { options } = field.kind() else {
            return;
        };

        let value = self.input.get_mut(field);
        let current = options
            .iter()
            .position(|(v, _)| *v == value.as_str())
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        *value = options[next].0.to_string();
        self.error_message = None;
    }

    /// Wipe all field buffers and return to a fresh form.
    pub fn reset(&mut self) {
        self.input.zeroize();
        *self = Self::default();
    }

    /// Check every numeric field is filled in and numeric.
    ///
    /// Selectors are not re-checked; they can only hold listed options.
    ///
    /// # Errors
    /// Returns `CardioError::Validation` naming the first bad field.
    pub fn to_raw_input(&self) -> crate::Result<RawInput> {
        for field in Field::ALL {
            if !matches!(field.kind(), FieldKind::Numeric { .. }) {
                continue;
            }
            let value = self.input.get(field).trim();
            if value.is_empty() {
                return Err(CardioError::Validation(format!("{}: Required", field.label())));
            }
            if value.parse::<f64>().is_err() {
                return Err(CardioError::Validation(format!(
                    "{}: Invalid number",
                    field.label()
                )));
            }
        }
        Ok(self.input.clone())
    }

    /// Load sample data for testing
    pub fn load_sample_data(&mut self) {
        self.input = RawInput {
            age: "45".to_string(),
            gender: "2".to_string(),
            systolic_bp: "130".to_string(),
            diastolic_bp: "85".to_string(),
            cholesterol: "1".to_string(),
            glucose: "1".to_string(),
            smoker: "0".to_string(),
            alcohol: "0".to_string(),
            active: "1".to_string(),
            weight: "80".to_string(),
            height: "180".to_string(),
        };
        self.error_message = None;
    }

    fn display_value(&self, field: Field) -> (String, bool) {
        let value = self.input.get(field);
        match field.kind() {
            FieldKind::Numeric { placeholder } if value.is_empty() => {
                (placeholder.to_string(), true)
            }
            FieldKind::Numeric { .. } => (value.to_string(), false),
            FieldKind::Choice { options } => {
                let label = options
                    .iter()
                    .find(|(v, _)| *v == value)
                    .map_or(value, |(_, l)| *l);
                (label.to_string(), false)
            }
        }
    }
}

/// Render the vitals form
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, in_flight: bool, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_form_fields(f, chunks[1], state);
    render_form_footer(f, chunks[2], state, in_flight, tick);
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ♥ ", Theme::brand()),
        Span::styled("CardioCheck", Theme::title()),
        Span::styled(
            " │ Advanced Cardiovascular Risk Assessment",
            Theme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border()),
    );

    f.render_widget(header, area);
}

fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    let mid = (Field::ALL.len() + 1) / 2;

    render_field_column(f, columns[0], state, 0..mid);
    render_field_column(f, columns[1], state, mid..Field::ALL.len());
}

fn render_field_column(f: &mut Frame, area: Rect, state: &FormState, range: std::ops::Range<usize>) {
    let constraints: Vec<Constraint> = range
        .clone()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, index) in range.enumerate() {
        let field = Field::ALL[index];
        let is_selected = index == state.selected_field;
        let is_choice = matches!(field.kind(), FieldKind::Choice { .. });

        let (border_style, title_style) = if is_selected {
            (Theme::border_focused(), Theme::focused())
        } else {
            (Theme::border(), Theme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let (text, is_placeholder) = state.display_value(field);
        let value_style = if is_placeholder {
            Theme::text_muted()
        } else {
            Theme::text()
        };

        let mut spans = vec![Span::raw(" ")];
        if is_selected && is_choice {
            spans.push(Span::styled("◀ ", Theme::cursor()));
            spans.push(Span::styled(text, value_style));
            spans.push(Span::styled(" ▶", Theme::cursor()));
        } else {
            spans.push(Span::styled(text, value_style));
            if is_selected {
                spans.push(Span::styled("▌", Theme::cursor()));
            }
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[slot]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState, in_flight: bool, tick: usize) {
    let content = if in_flight {
        Line::from(vec![
            Span::styled(format!("{} ", SPINNER[tick % SPINNER.len()]), Theme::focused()),
            Span::styled("Analyzing...", Theme::text_secondary()),
        ])
    } else if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", Theme::danger()),
            Span::styled(err.clone(), Theme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", Theme::key_hint()),
            Span::styled("Navigate ", Theme::key_desc()),
            Span::styled("[←→] ", Theme::key_hint()),
            Span::styled("Change ", Theme::key_desc()),
            Span::styled("[Enter] ", Theme::key_hint()),
            Span::styled("Generate Risk Report ", Theme::key_desc()),
            Span::styled("[S] ", Theme::key_hint()),
            Span::styled("Sample ", Theme::key_desc()),
            Span::styled("[Esc] ", Theme::key_hint()),
            Span::styled("Quit", Theme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border()),
    );

    f.render_widget(footer, area);
}
