use adminkit_model::{FieldKind, Schema};
use std::fmt;

/// The input control a field is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    Text,
    Number,
    Toggle,
}

impl ControlType {
    /// Control for `slug`, falling back to text when the schema does not
    /// declare it.
    pub fn for_field(schema: &Schema, slug: &str) -> Self {
        schema.kind_of(slug).map_or(Self::Text, Self::from)
    }

    /// The HTML `<input type>` for this control.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Toggle => "checkbox",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Toggle => "toggle",
        }
    }
}

impl From<FieldKind> for ControlType {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::String => Self::Text,
            FieldKind::Integer => Self::Number,
            FieldKind::Boolean => Self::Toggle,
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_controls() {
        let schema = Schema::new().string("a").integer("b").boolean("c");
        assert_eq!(ControlType::for_field(&schema, "a"), ControlType::Text);
        assert_eq!(ControlType::for_field(&schema, "b"), ControlType::Number);
        assert_eq!(ControlType::for_field(&schema, "c"), ControlType::Toggle);
        assert_eq!(ControlType::for_field(&schema, "zzz"), ControlType::Text);
    }

    #[test]
    fn toggle_is_a_checkbox_input() {
        assert_eq!(ControlType::Toggle.input_type(), "checkbox");
        assert_eq!(ControlType::Toggle.to_string(), "toggle");
    }
}
