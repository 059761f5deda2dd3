//! Degree-course recommendation from 12th-grade results.
//!
//! This flow makes a single attempt against the primary tier and never
//! falls back, unlike every other flow.

use serde::{Deserialize, Serialize};

use crate::dispatch::flow::{require_percentage, require_text, AttemptPolicy, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{DEGREE_PROMPT_TEMPLATE, DEGREE_ROLE};
use crate::flows::stream::Stream;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectMark {
    pub subject: String,
    pub marks: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeInput {
    pub stream: Stream,
    pub subjects: Vec<SubjectMark>,
    #[serde(default)]
    pub interests: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeCourse {
    pub name: String,
    pub description: String,
    pub career_prospects: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeRecommendation {
    pub courses: Vec<DegreeCourse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

pub struct RecommendDegreeCourses;

impl Flow for RecommendDegreeCourses {
    type Input = DegreeInput;
    type Output = DegreeRecommendation;

    const NAME: &'static str = "recommend-degree-courses";
    const ROLE: &'static str = DEGREE_ROLE;
    const ATTEMPTS: AttemptPolicy = AttemptPolicy::SingleAttempt;
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &DegreeInput) -> Result<(), ValidationError> {
        if input.subjects.is_empty() {
            return Err(ValidationError::new("subjects", "at least one subject is required"));
        }
        for (i, subject) in input.subjects.iter().enumerate() {
            require_text(&format!("subjects[{i}].subject"), &subject.subject)?;
            require_percentage(&format!("subjects[{i}].marks"), subject.marks)?;
        }
        Ok(())
    }

    fn render(input: &DegreeInput) -> serde_json::Result<String> {
        let subjects = input
            .subjects
            .iter()
            .map(|s| format!("- {}: {}", s.subject.trim(), s.marks))
            .collect::<Vec<_>>()
            .join("\n");
        let interests = input
            .interests
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Not specified");

        Ok(DEGREE_PROMPT_TEMPLATE
            .replace("{stream}", input.stream.as_str())
            .replace("{subjects}", &subjects)
            .replace("{interests}", interests))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required(
                "courses",
                Kind::non_empty_array(Kind::Object(
                    Shape::new()
                        .required("name", Kind::String)
                        .required("description", Kind::String)
                        .required("careerProspects", Kind::array(Kind::String))
                        .optional("eligibility", Kind::String),
                )),
            )
            .optional("advice", Kind::String)
    }
}
