//! Three editable text fields for the light position.

use std::fmt;

use crate::engine::utils::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Text state of the x/y/z inputs plus which one has focus.
#[derive(Debug, Clone, PartialEq)]
pub struct LightInputFields {
    fields: [String; 3],
    active: Axis,
}

impl LightInputFields {
    pub fn new(initial: Vec3) -> Self {
        Self {
            fields: initial.map(|c| c.to_string()),
            active: Axis::X,
        }
    }

    pub fn active(&self) -> Axis {
        self.active
    }

    pub fn text(&self, axis: Axis) -> &str {
        &self.fields[axis.index()]
    }

    pub fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn push_str(&mut self, text: &str) {
        self.fields[self.active.index()].push_str(text);
    }

    /// Returns whether a character was removed.
    pub fn backspace(&mut self) -> bool {
        self.fields[self.active.index()].pop().is_some()
    }

    pub fn clear_active(&mut self) -> bool {
        let field = &mut self.fields[self.active.index()];
        let changed = !field.is_empty();
        field.clear();
        changed
    }

    /// Parses all three fields. A field that is not a finite number keeps the
    /// matching component of `previous`; its axis is listed in the result.
    pub fn parse(&self, previous: Vec3) -> (Vec3, Vec<Axis>) {
        let mut position = previous;
        let mut rejected = Vec::new();
        for axis in Axis::ALL {
            match parse_component(self.text(axis)) {
                Some(value) => position[axis.index()] = value,
                None => rejected.push(axis),
            }
        }
        (position, rejected)
    }

    /// Single-line summary with the focused field bracketed.
    pub fn summary(&self) -> String {
        Axis::ALL
            .iter()
            .map(|&axis| {
                if axis == self.active {
                    format!("{axis}=[{}]", self.text(axis))
                } else {
                    format!("{axis}={}", self.text(axis))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn parse_component(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_initial_position() {
        let fields = LightInputFields::new([1.5, 0.0, -2.0]);
        assert_eq!(fields.text(Axis::X), "1.5");
        assert_eq!(fields.text(Axis::Z), "-2");
        assert_eq!(fields.parse([9.0; 3]), ([1.5, 0.0, -2.0], vec![]));
    }

    #[test]
    fn edits_apply_to_focused_field() {
        let mut fields = LightInputFields::new([0.0; 3]);
        fields.focus_next();
        assert!(fields.clear_active());
        fields.push_str("-3");
        fields.push_str(".25");
        assert_eq!(fields.text(Axis::Y), "-3.25");
        assert!(fields.backspace());
        assert_eq!(fields.text(Axis::Y), "-3.2");
        assert_eq!(fields.text(Axis::X), "0");
    }

    #[test]
    fn focus_wraps_around() {
        let mut fields = LightInputFields::new([0.0; 3]);
        for _ in 0..3 {
            fields.focus_next();
        }
        assert_eq!(fields.active(), Axis::X);
    }

    #[test]
    fn malformed_field_keeps_previous_component() {
        let mut fields = LightInputFields::new([1.0, 2.0, 3.0]);
        fields.clear_active();
        fields.push_str("abc");
        let (position, rejected) = fields.parse([7.0, 8.0, 9.0]);
        assert_eq!(position, [7.0, 2.0, 3.0]);
        assert_eq!(rejected, vec![Axis::X]);
    }

    #[test]
    fn empty_and_nan_fields_are_rejected() {
        let mut fields = LightInputFields::new([0.0; 3]);
        fields.clear_active();
        fields.focus_next();
        fields.clear_active();
        fields.push_str("NaN");
        let (position, rejected) = fields.parse([4.0, 5.0, 6.0]);
        assert_eq!(position, [4.0, 5.0, 0.0]);
        assert_eq!(rejected, vec![Axis::X, Axis::Y]);
        assert!(position.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn summary_brackets_focused_field() {
        let fields = LightInputFields::new([1.0, 2.0, 3.0]);
        assert_eq!(fields.summary(), "x=[1] y=2 z=3");
    }
}
