use serde::{Deserialize, Serialize};

use crate::dispatch::flow::{require_text, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape, ShapeError};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{CAREER_PROMPT_TEMPLATE, CAREER_ROLE};
use crate::models::profile::WorkExperience;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    pub education_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerOption {
    pub title: String,
    pub description: String,
    pub match_score: f64,
    pub required_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_outlook: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendations {
    pub recommendations: Vec<CareerOption>,
}

pub struct RecommendCareers;

impl Flow for RecommendCareers {
    type Input = CareerProfile;
    type Output = CareerRecommendations;

    const NAME: &'static str = "recommend-careers";
    const ROLE: &'static str = CAREER_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Tagged;

    fn validate(input: &CareerProfile) -> Result<(), ValidationError> {
        require_text("educationLevel", &input.education_level)?;
        if input.skills.is_empty() && input.interests.is_empty() {
            return Err(ValidationError::new(
                "skills",
                "provide at least one skill or interest",
            ));
        }
        for (i, job) in input.work_experience.iter().enumerate() {
            require_text(&format!("workExperience[{i}].company"), &job.company)?;
            require_text(&format!("workExperience[{i}].role"), &job.role)?;
        }
        Ok(())
    }

    fn render(input: &CareerProfile) -> serde_json::Result<String> {
        let profile = serde_json::to_string_pretty(input)?;
        Ok(CAREER_PROMPT_TEMPLATE.replace("{profile}", &profile))
    }

    fn output_shape() -> Shape {
        Shape::new().required(
            "recommendations",
            Kind::non_empty_array(Kind::Object(
                Shape::new()
                    .required("title", Kind::String)
                    .required("description", Kind::String)
                    .required("matchScore", Kind::Number)
                    .required("requiredSkills", Kind::array(Kind::String))
                    .optional("growthOutlook", Kind::String),
            )),
        )
    }

    fn verify(_input: &CareerProfile, output: &CareerRecommendations) -> Result<(), ShapeError> {
        match output
            .recommendations
            .iter()
            .position(|r| !(0.0..=100.0).contains(&r.match_score))
        {
            Some(i) => Err(ShapeError::invalid(
                format!("recommendations[{i}].matchScore"),
                "must be between 0 and 100",
            )),
            None => Ok(()),
        }
    }
}
