//! Resume flows: writing resume content from profile details, and reviewing
//! an existing resume against a target role.

use serde::{Deserialize, Serialize};

use crate::dispatch::flow::{require_text, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape, ShapeError};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{
    RESUME_PROMPT_TEMPLATE, RESUME_ROLE, REVIEW_PROMPT_TEMPLATE, REVIEW_ROLE,
};
use crate::models::profile::{EducationRecord, WorkExperience};

/// Upper bound on pasted resume text sent for review.
pub const MAX_RESUME_CHARS: usize = 20_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<ProjectDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeExperience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeEducation {
    pub institution: String,
    pub qualification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProject {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    pub professional_summary: String,
    pub experience: Vec<ResumeExperience>,
    pub education: Vec<ResumeEducation>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ResumeProject>>,
}

pub struct GenerateResume;

impl Flow for GenerateResume {
    type Input = ResumeRequest;
    type Output = GeneratedResume;

    const NAME: &'static str = "generate-resume";
    const ROLE: &'static str = RESUME_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Tagged;

    fn validate(input: &ResumeRequest) -> Result<(), ValidationError> {
        require_text("fullName", &input.full_name)?;
        if !input.email.contains('@') {
            return Err(ValidationError::new("email", "must be a valid email address"));
        }
        for (i, job) in input.work_experience.iter().enumerate() {
            require_text(&format!("workExperience[{i}].company"), &job.company)?;
            require_text(&format!("workExperience[{i}].role"), &job.role)?;
            require_text(&format!("workExperience[{i}].startDate"), &job.start_date)?;
        }
        for (i, school) in input.education.iter().enumerate() {
            require_text(&format!("education[{i}].institution"), &school.institution)?;
        }
        if input.education.is_empty() && input.work_experience.is_empty() && input.skills.is_empty()
        {
            return Err(ValidationError::new(
                "education",
                "add education, work experience or skills before generating",
            ));
        }
        Ok(())
    }

    fn render(input: &ResumeRequest) -> serde_json::Result<String> {
        let details = serde_json::to_string_pretty(input)?;
        let target_role = input
            .target_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("General");

        Ok(RESUME_PROMPT_TEMPLATE
            .replace("{target_role}", target_role)
            .replace("{details}", &details))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("professionalSummary", Kind::String)
            .required(
                "experience",
                Kind::array(Kind::Object(
                    Shape::new()
                        .required("company", Kind::String)
                        .required("role", Kind::String)
                        .required("duration", Kind::String)
                        .required("bullets", Kind::array(Kind::String)),
                )),
            )
            .required(
                "education",
                Kind::array(Kind::Object(
                    Shape::new()
                        .required("institution", Kind::String)
                        .required("qualification", Kind::String)
                        .optional("duration", Kind::String)
                        .optional("grade", Kind::String),
                )),
            )
            .required("skills", Kind::array(Kind::String))
            .optional(
                "projects",
                Kind::array(Kind::Object(
                    Shape::new()
                        .required("name", Kind::String)
                        .required("description", Kind::String),
                )),
            )
    }
}

// ── Review ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReviewRequest {
    pub resume_text: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReview {
    pub overall_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_keywords: Option<Vec<String>>,
}

pub struct ReviewResume;

impl Flow for ReviewResume {
    type Input = ResumeReviewRequest;
    type Output = ResumeReview;

    const NAME: &'static str = "review-resume";
    const ROLE: &'static str = REVIEW_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &ResumeReviewRequest) -> Result<(), ValidationError> {
        require_text("resumeText", &input.resume_text)?;
        if input.resume_text.chars().count() > MAX_RESUME_CHARS {
            return Err(ValidationError::new(
                "resumeText",
                format!("must be at most {MAX_RESUME_CHARS} characters"),
            ));
        }
        Ok(())
    }

    fn render(input: &ResumeReviewRequest) -> serde_json::Result<String> {
        let target_role = input
            .target_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("Not specified");

        Ok(REVIEW_PROMPT_TEMPLATE
            .replace("{target_role}", target_role)
            .replace("{resume_text}", input.resume_text.trim()))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("overallScore", Kind::Number)
            .required("summary", Kind::String)
            .required("strengths", Kind::array(Kind::String))
            .required("improvements", Kind::array(Kind::String))
            .optional("missingKeywords", Kind::array(Kind::String))
    }

    fn verify(_input: &ResumeReviewRequest, output: &ResumeReview) -> Result<(), ShapeError> {
        if !(0.0..=100.0).contains(&output.overall_score) {
            return Err(ShapeError::invalid(
                "overallScore",
                "must be between 0 and 100",
            ));
        }
        Ok(())
    }
}
