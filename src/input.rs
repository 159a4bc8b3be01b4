//! Text input boundary: the two form fields, number parsing and the
//! parse → compute → scene pipeline the shell runs on submit.

use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::overlap::{OverlapError, OverlapResult, PatternInput};
use crate::scene::{build_scene, Scene, SceneStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Index,
    Radius,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Index => "Path Index",
            Field::Radius => "Pattern Radius",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Field::Index => Field::Radius,
            Field::Radius => Field::Index,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A field whose text is not a usable number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be a number, got '{text}'")]
pub struct ParseError {
    pub field: Field,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Overlap(#[from] OverlapError),
}

/// Parse one field's text as a finite float.
pub fn parse_field(field: Field, text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError {
            field,
            text: trimmed.to_string(),
        }),
    }
}

/// Everything the plot view needs from one successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub input: PatternInput,
    pub result: OverlapResult,
    pub scene: Scene,
}

impl Evaluation {
    /// Recompute for already-parsed numbers.
    pub fn from_values(index: f64, radius: f64, style: &SceneStyle) -> Result<Self, OverlapError> {
        let input = PatternInput::new(index, radius)?;
        let result = input.compute()?;
        let scene = build_scene(&input, &result, style);
        Ok(Self { input, result, scene })
    }
}

/// Parse both fields, then compute. Both fields are parsed before the
/// calculator runs.
pub fn evaluate(index_text: &str, radius_text: &str, style: &SceneStyle) -> Result<Evaluation, CalcError> {
    let index = parse_field(Field::Index, index_text)?;
    let radius = parse_field(Field::Radius, radius_text)?;

    match Evaluation::from_values(index, radius, style) {
        Ok(eval) => {
            info!(
                "index={} radius={} -> lens area {:.4}, overlap {:.4}%, lens diameter {:.4}",
                index,
                radius,
                eval.result.lens_area,
                eval.result.overlap_percentage,
                eval.result.lens_diameter
            );
            Ok(eval)
        }
        Err(e) => {
            debug!("Calculation rejected: {}", e);
            Err(e.into())
        }
    }
}

/// Editable state of the two-field input form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub index: String,
    pub radius: String,
    pub focus: Field,
}

impl FormState {
    pub fn new(index: impl Into<String>, radius: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            radius: radius.into(),
            focus: Field::Index,
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Index => &self.index,
            Field::Radius => &self.radius,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Index => &mut self.index,
            Field::Radius => &mut self.radius,
        }
    }

    /// Append a character to the focused field. Control characters are ignored.
    pub fn insert(&mut self, ch: char) {
        if !ch.is_control() {
            self.focused_mut().push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn clear_field(&mut self) {
        self.focused_mut().clear();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.other();
    }

    /// With two fields, previous and next are the same move.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.other();
    }

    /// Refill the form from numbers, e.g. after leaving the plot.
    pub fn fill(&mut self, input: &PatternInput) {
        self.index = input.index.to_string();
        self.radius = input.radius.to_string();
    }

    pub fn submit(&self, style: &SceneStyle) -> Result<Evaluation, CalcError> {
        evaluate(&self.index, &self.radius, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(parse_field(Field::Index, " 5 "), Ok(5.0));
        assert_eq!(parse_field(Field::Radius, "2.5"), Ok(2.5));
        assert_eq!(parse_field(Field::Radius, "1e1"), Ok(10.0));
        assert_eq!(parse_field(Field::Index, "-3"), Ok(-3.0));
    }

    #[test]
    fn rejects_text_empty_and_non_finite() {
        for text in ["", "   ", "abc", "5in", "NaN", "inf", "1,5"] {
            let err = parse_field(Field::Radius, text).unwrap_err();
            assert_eq!(err.field, Field::Radius);
            assert_eq!(err.text, text.trim());
        }
    }

    #[test]
    fn parse_error_message_names_field() {
        let err = parse_field(Field::Index, "ten").unwrap_err();
        assert_eq!(err.to_string(), "Path Index must be a number, got 'ten'");
    }

    #[test]
    fn parse_failure_precedes_geometry() {
        // radius 0 would be InvalidRadius, but the bad index is reported first
        let err = evaluate("x", "0", &SceneStyle::default()).unwrap_err();
        assert!(matches!(err, CalcError::Parse(ParseError { field: Field::Index, .. })));

        let err = evaluate("10", "three", &SceneStyle::default()).unwrap_err();
        assert!(matches!(err, CalcError::Parse(ParseError { field: Field::Radius, .. })));
    }

    #[test]
    fn geometry_errors_pass_through() {
        let err = evaluate("10", "3", &SceneStyle::default()).unwrap_err();
        assert!(matches!(err, CalcError::Overlap(OverlapError::NoOverlap { .. })));
        assert!(err.to_string().starts_with("No overlap present"));

        let err = evaluate("1", "0", &SceneStyle::default()).unwrap_err();
        assert!(matches!(err, CalcError::Overlap(OverlapError::InvalidRadius { .. })));
    }

    #[test]
    fn successful_evaluation_builds_scene() {
        let eval = evaluate("5", "5", &SceneStyle::default()).unwrap();
        assert_eq!(eval.input, PatternInput { index: 5.0, radius: 5.0 });
        assert_eq!(eval.result.lens_diameter, 5.0);
        assert_eq!(eval.scene.circles().count(), 12);
    }

    #[test]
    fn form_editing() {
        let mut form = FormState::default();
        for ch in "4.5".chars() {
            form.insert(ch);
        }
        form.insert('\n');
        form.focus_next();
        assert_eq!(form.focus, Field::Radius);
        form.insert('3');
        form.insert('x');
        form.backspace();
        assert_eq!(form.text(Field::Index), "4.5");
        assert_eq!(form.text(Field::Radius), "3");

        form.focus_prev();
        form.clear_field();
        assert_eq!(form.index, "");
        assert_eq!(form.radius, "3");
    }

    #[test]
    fn form_submit_and_refill() {
        let mut form = FormState::new("2", "3");
        let eval = form.submit(&SceneStyle::default()).unwrap();
        assert_eq!(eval.result.lens_diameter, 4.0);

        form.fill(&PatternInput { index: 1.5, radius: 4.0 });
        assert_eq!(form.index, "1.5");
        assert_eq!(form.radius, "4");
    }
}
