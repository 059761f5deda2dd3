//! Assessments: generating a multiple-choice test and evaluating an attempt.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dispatch::flow::{require_text, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape, ShapeError};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{
    ASSESSMENT_PROMPT_TEMPLATE, ASSESSMENT_ROLE, EVALUATION_PROMPT_TEMPLATE, EVALUATION_ROLE,
};

pub const MAX_QUESTIONS: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub topic: String,
    #[serde(default)]
    pub level: Difficulty,
    pub number_of_questions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<Question>,
}

pub struct GenerateAssessment;

impl Flow for GenerateAssessment {
    type Input = AssessmentRequest;
    type Output = Assessment;

    const NAME: &'static str = "generate-assessment";
    const ROLE: &'static str = ASSESSMENT_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &AssessmentRequest) -> Result<(), ValidationError> {
        require_text("topic", &input.topic)?;
        if !(1..=MAX_QUESTIONS).contains(&input.number_of_questions) {
            return Err(ValidationError::new(
                "numberOfQuestions",
                format!("must be between 1 and {MAX_QUESTIONS}"),
            ));
        }
        Ok(())
    }

    fn render(input: &AssessmentRequest) -> serde_json::Result<String> {
        Ok(ASSESSMENT_PROMPT_TEMPLATE
            .replace("{topic}", input.topic.trim())
            .replace("{level}", input.level.as_str())
            .replace("{count}", &input.number_of_questions.to_string()))
    }

    fn output_shape() -> Shape {
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

    /// Every question needs text, and its answer must be one of its options.
    fn verify(input: &AssessmentRequest, output: &Assessment) -> Result<(), ShapeError> {
        for (i, q) in output.questions.iter().enumerate() {
            if q.question.trim().is_empty() {
                return Err(ShapeError::invalid(
                    format!("questions[{i}].question"),
                    "must not be empty",
                ));
            }
            if !q.options.contains(&q.correct_answer) {
                return Err(ShapeError::invalid(
                    format!("questions[{i}].correctAnswer"),
                    "must be one of the question's options",
                ));
            }
        }

        if output.questions.len() != input.number_of_questions as usize {
            warn!(
                "Assessment on '{}' asked for {} questions, model returned {}",
                input.topic,
                input.number_of_questions,
                output.questions.len()
            );
        }
        Ok(())
    }
}

// ── Evaluation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredQuestion {
    pub question: String,
    pub correct_answer: String,
    /// `None` when the question was skipped.
    #[serde(default)]
    pub selected_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub topic: String,
    pub answers: Vec<AnsweredQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentFeedback {
    pub summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommended_topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.total as f64 * 100.0).round()
    }
}

/// Counts answers that match the correct option exactly.
pub fn score(answers: &[AnsweredQuestion]) -> Score {
    let correct = answers
        .iter()
        .filter(|a| a.selected_answer.as_deref() == Some(a.correct_answer.as_str()))
        .count();
    Score {
        correct,
        total: answers.len(),
    }
}

pub struct EvaluateAssessment;

impl Flow for EvaluateAssessment {
    type Input = EvaluationRequest;
    type Output = AssessmentFeedback;

    const NAME: &'static str = "evaluate-assessment";
    const ROLE: &'static str = EVALUATION_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &EvaluationRequest) -> Result<(), ValidationError> {
        require_text("topic", &input.topic)?;
        if input.answers.is_empty() {
            return Err(ValidationError::new("answers", "at least one answer is required"));
        }
        for (i, answer) in input.answers.iter().enumerate() {
            require_text(&format!("answers[{i}].question"), &answer.question)?;
            require_text(&format!("answers[{i}].correctAnswer"), &answer.correct_answer)?;
        }
        Ok(())
    }

    fn render(input: &EvaluationRequest) -> serde_json::Result<String> {
        let score = score(&input.answers);
        let answers = serde_json::to_string_pretty(&input.answers)?;

        Ok(EVALUATION_PROMPT_TEMPLATE
            .replace("{topic}", input.topic.trim())
            .replace(
                "{score}",
                &format!(
                    "{}/{} correct ({}%)",
                    score.correct,
                    score.total,
                    score.percentage()
                ),
            )
            .replace("{answers}", &answers))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("summary", Kind::String)
            .required("strengths", Kind::array(Kind::String))
            .required("areasForImprovement", Kind::array(Kind::String))
            .required("recommendedTopics", Kind::array(Kind::String))
    }
}
