//! Control descriptors
//!
//! Generators describe their tweakable parameters as a list of `Control`s.
//! A front end renders them however it likes and feeds edits back through
//! [`Controllable::apply_control`].

use crate::error::ShapeError;

use super::events::ChangeEmitter;

/// The widget a control maps to
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    /// Free numeric entry
    Number,
    /// Bounded slider
    Range { min: f64, max: f64, step: f64 },
    Checkbox,
    /// One of a fixed set of options
    Select { options: Vec<&'static str> },
}

/// A value coming from (or going to) a control
#[derive(Clone, Debug, PartialEq)]
pub enum ControlValue {
    Number(f64),
    Bool(bool),
    Choice(String),
}

impl ControlValue {
    /// Interpret user text: booleans, then numbers, then a free choice
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text {
            "true" => ControlValue::Bool(true),
            "false" => ControlValue::Bool(false),
            _ => match text.parse::<f64>() {
                Ok(n) => ControlValue::Number(n),
                Err(_) => ControlValue::Choice(text.to_string()),
            },
        }
    }

    /// The numeric value, or an error naming `control`
    pub fn as_number(&self, control: &str) -> Result<f64, ShapeError> {
        match self {
            ControlValue::Number(n) if n.is_finite() => Ok(*n),
            _ => Err(ShapeError::InvalidControlValue {
                control: control.to_string(),
                expected: "number",
            }),
        }
    }

    /// The selected option, or an error naming `control`
    pub fn as_choice(&self, control: &str) -> Result<&str, ShapeError> {
        match self {
            ControlValue::Choice(s) => Ok(s),
            _ => Err(ShapeError::InvalidControlValue {
                control: control.to_string(),
                expected: "choice",
            }),
        }
    }
}

/// Description of one parameter
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    /// Panel section ("Shape", "Star", "Render", ...)
    pub group: &'static str,
    /// Parameter name, also the key passed to `apply_control`
    pub label: &'static str,
    pub kind: ControlKind,
    pub initial: ControlValue,
}

impl Control {
    pub fn number(group: &'static str, label: &'static str, initial: f64) -> Self {
        Self {
            group,
            label,
            kind: ControlKind::Number,
            initial: ControlValue::Number(initial),
        }
    }

    pub fn range(
        group: &'static str,
        label: &'static str,
        initial: f64,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        Self {
            group,
            label,
            kind: ControlKind::Range { min, max, step },
            initial: ControlValue::Number(initial),
        }
    }

    pub fn select(
        group: &'static str,
        label: &'static str,
        options: Vec<&'static str>,
        initial: &str,
    ) -> Self {
        Self {
            group,
            label,
            kind: ControlKind::Select { options },
            initial: ControlValue::Choice(initial.to_string()),
        }
    }
}

/// Something with user-facing parameters and a change notification
pub trait Controllable {
    /// The controls to present, reflecting current values
    fn controls(&self) -> Vec<Control>;

    /// Apply an edit to the control named `label`
    ///
    /// Implementations clamp out-of-range values, update derived state, and
    /// then trigger [`change_emitter`](Self::change_emitter).
    fn apply_control(&mut self, label: &str, value: ControlValue) -> Result<(), ShapeError>;

    /// Fires after every successful `apply_control`
    fn change_emitter(&self) -> &ChangeEmitter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ControlValue::parse("12"), ControlValue::Number(12.0));
        assert_eq!(ControlValue::parse(" 0.5 "), ControlValue::Number(0.5));
        assert_eq!(ControlValue::parse("true"), ControlValue::Bool(true));
        assert_eq!(
            ControlValue::parse("thin"),
            ControlValue::Choice("thin".to_string())
        );
    }

    #[test]
    fn test_as_number_rejects_other_kinds() {
        let err = ControlValue::Bool(true).as_number("size").unwrap_err();
        assert_eq!(
            err,
            ShapeError::InvalidControlValue {
                control: "size".to_string(),
                expected: "number"
            }
        );
        assert!(ControlValue::Number(f64::NAN).as_number("size").is_err());
    }
}
