//! Stream recommendation: 10th-grade marks (and an optional aptitude score)
//! to one of Science, Commerce or Arts.

use serde::{Deserialize, Serialize};

use crate::dispatch::flow::{require_percentage, require_text, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{STREAM_PROMPT_TEMPLATE, STREAM_ROLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    Science,
    Commerce,
    Arts,
}

impl Stream {
    pub const TOKENS: &'static [&'static str] = &["Science", "Commerce", "Arts"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Science => "Science",
            Stream::Commerce => "Commerce",
            Stream::Arts => "Arts",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenthMarks {
    pub math: f64,
    pub science: f64,
    pub english: f64,
    pub social_studies: f64,
    #[serde(default)]
    pub optional_subject: Option<String>,
    #[serde(default)]
    pub optional_marks: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamInput {
    pub marks: TenthMarks,
    #[serde(default)]
    pub test_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecommendation {
    pub recommended_stream: Stream,
    pub reasoning: String,
    pub career_paths: Vec<String>,
}

pub struct RecommendStream;

impl Flow for RecommendStream {
    type Input = StreamInput;
    type Output = StreamRecommendation;

    const NAME: &'static str = "recommend-stream";
    const ROLE: &'static str = STREAM_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Tagged;

    fn validate(input: &StreamInput) -> Result<(), ValidationError> {
        let marks = &input.marks;
        require_percentage("marks.math", marks.math)?;
        require_percentage("marks.science", marks.science)?;
        require_percentage("marks.english", marks.english)?;
        require_percentage("marks.social_studies", marks.social_studies)?;

        match (&marks.optional_subject, marks.optional_marks) {
            (Some(subject), Some(score)) => {
                require_text("marks.optional_subject", subject)?;
                require_percentage("marks.optional_marks", score)?;
            }
            (None, None) => {}
            _ => {
                return Err(ValidationError::new(
                    "marks.optional_subject",
                    "optional_subject and optional_marks must be given together",
                ))
            }
        }

        if let Some(score) = input.test_score {
            require_percentage("testScore", score)?;
        }
        Ok(())
    }

    fn render(input: &StreamInput) -> serde_json::Result<String> {
        let marks = &input.marks;
        let mut lines = vec![
            format!("- Mathematics: {}", marks.math),
            format!("- Science: {}", marks.science),
            format!("- English: {}", marks.english),
            format!("- Social Studies: {}", marks.social_studies),
        ];
        if let (Some(subject), Some(score)) = (&marks.optional_subject, marks.optional_marks) {
            lines.push(format!("- {}: {}", subject.trim(), score));
        }

        let test_score = match input.test_score {
            Some(score) => format!(
                "APTITUDE TEST SCORE: {score}/100. Weigh this alongside the marks."
            ),
            None => "No aptitude test score is available; base the recommendation on marks alone."
                .to_string(),
        };

        Ok(STREAM_PROMPT_TEMPLATE
            .replace("{marks}", &lines.join("\n"))
            .replace("{test_score}", &test_score))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("recommendedStream", Kind::OneOf(Stream::TOKENS))
            .required("reasoning", Kind::String)
            .required("careerPaths", Kind::array(Kind::String))
    }
}
