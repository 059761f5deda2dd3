//! Declared output shapes.
//!
//! Every flow describes the JSON it expects back from the model as a
//! `Shape`: named fields, each required or optional, each with a primitive
//! kind. The check is purely structural and runs before the value is
//! deserialized into the flow's typed output. Unknown extra fields are
//! tolerated; nothing is repaired or coerced.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    String,
    Number,
    Integer,
    Boolean,
    /// A string restricted to a fixed set of tokens.
    OneOf(&'static [&'static str]),
    Array { item: Box<Kind>, min_len: usize },
    Object(Shape),
}

impl Kind {
    pub fn array(item: Kind) -> Kind {
        Kind::Array {
            item: Box::new(item),
            min_len: 0,
        }
    }

    pub fn non_empty_array(item: Kind) -> Kind {
        Kind::Array {
            item: Box::new(item),
            min_len: 1,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Kind::String | Kind::OneOf(_) => "a string",
            Kind::Number => "a number",
            Kind::Integer => "an integer",
            Kind::Boolean => "a boolean",
            Kind::Array { .. } => "an array",
            Kind::Object(_) => "an object",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    Missing,
    WrongKind { expected: &'static str },
    NotAllowed { allowed: Vec<&'static str> },
    TooShort { min_len: usize },
    Invalid(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("field `{path}` {}", describe_problem(.problem))]
pub struct ShapeError {
    pub path: String,
    pub problem: Problem,
}

fn describe_problem(problem: &Problem) -> String {
    match problem {
        Problem::Missing => "is missing".to_string(),
        Problem::WrongKind { expected } => format!("must be {expected}"),
        Problem::NotAllowed { allowed } => format!("must be one of {}", allowed.join(", ")),
        Problem::TooShort { min_len } => format!("must have at least {min_len} element(s)"),
        Problem::Invalid(reason) => reason.clone(),
    }
}

impl ShapeError {
    pub fn new(path: impl Into<String>, problem: Problem) -> Self {
        Self {
            path: path.into(),
            problem,
        }
    }

    /// A semantic failure found after the structural check.
    pub fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(path, Problem::Invalid(reason.into()))
    }
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &'static str, kind: Kind) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: &'static str, kind: Kind) -> Self {
        self.fields.push(Field {
            name,
            kind,
            required: false,
        });
        self
    }

    /// Checks that `value` is an object carrying every declared field.
    pub fn check(&self, value: &Value) -> Result<(), ShapeError> {
        match value.as_object() {
            Some(object) => self.check_object(object, ""),
            None => Err(ShapeError::new(
                "$",
                Problem::WrongKind {
                    expected: "an object",
                },
            )),
        }
    }

    fn check_object(&self, object: &Map<String, Value>, prefix: &str) -> Result<(), ShapeError> {
        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.name.to_string()
            } else {
                format!("{prefix}.{}", field.name)
            };
            match object.get(field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(ShapeError::new(path, Problem::Missing));
                }
                None | Some(Value::Null) => {}
                Some(value) => check_kind(&field.kind, value, &path)?,
            }
        }
        Ok(())
    }
}

fn check_kind(kind: &Kind, value: &Value, path: &str) -> Result<(), ShapeError> {
    let wrong = || {
        ShapeError::new(
            path,
            Problem::WrongKind {
                expected: kind.describe(),
            },
        )
    };

    match kind {
        Kind::String => value.as_str().map(|_| ()).ok_or_else(wrong),
        Kind::Number => value.is_number().then_some(()).ok_or_else(wrong),
        Kind::Integer => (value.is_i64() || value.is_u64())
            .then_some(())
            .ok_or_else(wrong),
        Kind::Boolean => value.is_boolean().then_some(()).ok_or_else(wrong),
        Kind::OneOf(allowed) => {
            let token = value.as_str().ok_or_else(wrong)?;
            if allowed.iter().any(|a| *a == token) {
                Ok(())
            } else {
                Err(ShapeError::new(
                    path,
                    Problem::NotAllowed {
                        allowed: allowed.to_vec(),
                    },
                ))
            }
        }
        Kind::Array { item, min_len } => {
            let items = value.as_array().ok_or_else(wrong)?;
            if items.len() < *min_len {
                return Err(ShapeError::new(
                    path,
                    Problem::TooShort { min_len: *min_len },
                ));
            }
            items
                .iter()
                .enumerate()
                .try_for_each(|(i, v)| check_kind(item, v, &format!("{path}[{i}]")))
        }
        Kind::Object(shape) => {
            let object = value.as_object().ok_or_else(wrong)?;
            shape.check_object(object, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question_shape() -> Shape {
        Shape::new().required(
            "questions",
            Kind::non_empty_array(Kind::Object(
                Shape::new()
                    .required("question", Kind::String)
                    .required("options", Kind::non_empty_array(Kind::String))
                    .required("correctAnswer", Kind::String)
                    .optional("explanation", Kind::String),
            )),
        )
    }

    #[test]
    fn test_conforming_value_passes() {
        let value = json!({
            "questions": [
                {"question": "2 + 2?", "options": ["3", "4"], "correctAnswer": "4"}
            ]
        });
        assert!(question_shape().check(&value).is_ok());
    }

    #[test]
    fn test_missing_nested_field_reports_path() {
        let value = json!({
            "questions": [
                {"question": "2 + 2?", "options": ["3", "4"], "correctAnswer": "4"},
                {"question": "3 + 3?", "options": ["6"]}
            ]
        });
        let err = question_shape().check(&value).unwrap_err();
        assert_eq!(err.path, "questions[1].correctAnswer");
        assert_eq!(err.problem, Problem::Missing);
        assert_eq!(err.to_string(), "field `questions[1].correctAnswer` is missing");
    }

    #[test]
    fn test_null_required_field_counts_as_missing() {
        let shape = Shape::new().required("reasoning", Kind::String);
        let err = shape.check(&json!({"reasoning": null})).unwrap_err();
        assert_eq!(err.problem, Problem::Missing);
    }

    #[test]
    fn test_optional_field_may_be_absent_or_null() {
        let shape = Shape::new()
            .required("name", Kind::String)
            .optional("note", Kind::String);
        assert!(shape.check(&json!({"name": "a"})).is_ok());
        assert!(shape.check(&json!({"name": "a", "note": null})).is_ok());
    }

    #[test]
    fn test_optional_field_with_wrong_kind_fails() {
        let shape = Shape::new().optional("note", Kind::String);
        let err = shape.check(&json!({"note": 5})).unwrap_err();
        assert_eq!(
            err.problem,
            Problem::WrongKind {
                expected: "a string"
            }
        );
    }

    #[test]
    fn test_one_of_rejects_unknown_token() {
        let shape = Shape::new().required("stream", Kind::OneOf(&["Science", "Commerce", "Arts"]));
        assert!(shape.check(&json!({"stream": "Commerce"})).is_ok());
        let err = shape.check(&json!({"stream": "Engineering"})).unwrap_err();
        assert!(matches!(err.problem, Problem::NotAllowed { .. }));
    }

    #[test]
    fn test_empty_array_rejected_when_min_len_set() {
        let err = question_shape().check(&json!({"questions": []})).unwrap_err();
        assert_eq!(err.problem, Problem::TooShort { min_len: 1 });
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let shape = Shape::new().required("count", Kind::Integer);
        assert!(shape.check(&json!({"count": 3})).is_ok());
        assert!(shape.check(&json!({"count": 3.5})).is_err());
    }

    #[test]
    fn test_number_accepts_fraction() {
        let shape = Shape::new().required("score", Kind::Number);
        assert!(shape.check(&json!({"score": 72.5})).is_ok());
        assert!(shape.check(&json!({"score": "72.5"})).is_err());
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = question_shape().check(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path, "$");
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let shape = Shape::new().required("summary", Kind::String);
        assert!(shape.check(&json!({"summary": "ok", "confidence": 0.9})).is_ok());
    }
}
