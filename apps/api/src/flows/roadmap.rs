use serde::{Deserialize, Serialize};

use crate::dispatch::flow::{require_text, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_ROLE};

pub const MAX_TIMEFRAME_MONTHS: u32 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub target_career: String,
    pub current_level: String,
    #[serde(default)]
    pub timeframe_months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    pub duration: String,
    pub description: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRoadmap {
    pub career: String,
    pub overview: String,
    pub milestones: Vec<Milestone>,
}

pub struct BuildRoadmap;

impl Flow for BuildRoadmap {
    type Input = RoadmapRequest;
    type Output = CareerRoadmap;

    const NAME: &'static str = "career-roadmap";
    const ROLE: &'static str = ROADMAP_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Throw;

    fn validate(input: &RoadmapRequest) -> Result<(), ValidationError> {
        require_text("targetCareer", &input.target_career)?;
        require_text("currentLevel", &input.current_level)?;
        if let Some(months) = input.timeframe_months {
            if !(1..=MAX_TIMEFRAME_MONTHS).contains(&months) {
                return Err(ValidationError::new(
                    "timeframeMonths",
                    format!("must be between 1 and {MAX_TIMEFRAME_MONTHS}"),
                ));
            }
        }
        Ok(())
    }

    fn render(input: &RoadmapRequest) -> serde_json::Result<String> {
        let timeframe = match input.timeframe_months {
            Some(1) => "1 month".to_string(),
            Some(months) => format!("{months} months"),
            None => "Flexible; suggest a realistic timeframe".to_string(),
        };

        Ok(ROADMAP_PROMPT_TEMPLATE
            .replace("{target_career}", input.target_career.trim())
            .replace("{current_level}", input.current_level.trim())
            .replace("{timeframe}", &timeframe))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("career", Kind::String)
            .required("overview", Kind::String)
            .required(
                "milestones",
                Kind::non_empty_array(Kind::Object(
                    Shape::new()
                        .required("title", Kind::String)
                        .required("duration", Kind::String)
                        .required("description", Kind::String)
                        .required("resources", Kind::array(Kind::String)),
                )),
            )
    }
}
