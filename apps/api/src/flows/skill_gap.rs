use serde::{Deserialize, Serialize};

use crate::dispatch::flow::{require_text, Flow, ValidationError};
use crate::dispatch::shape::{Kind, Shape};
use crate::dispatch::ResponseConvention;
use crate::flows::prompts::{bullet_list, SKILL_GAP_PROMPT_TEMPLATE, SKILL_GAP_ROLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    pub const TOKENS: &'static [&'static str] = &["high", "medium", "low"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRequest {
    pub current_skills: Vec<String>,
    pub target_role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub skill: String,
    pub importance: Importance,
    pub learning_resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapAnalysis {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<MissingSkill>,
    pub summary: String,
}

pub struct AnalyzeSkillGap;

impl Flow for AnalyzeSkillGap {
    type Input = SkillGapRequest;
    type Output = SkillGapAnalysis;

    const NAME: &'static str = "skill-gap";
    const ROLE: &'static str = SKILL_GAP_ROLE;
    const CONVENTION: ResponseConvention = ResponseConvention::Tagged;

    fn validate(input: &SkillGapRequest) -> Result<(), ValidationError> {
        require_text("targetRole", &input.target_role)?;
        if input.current_skills.iter().all(|s| s.trim().is_empty()) {
            return Err(ValidationError::new(
                "currentSkills",
                "list at least one current skill",
            ));
        }
        Ok(())
    }

    fn render(input: &SkillGapRequest) -> serde_json::Result<String> {
        let skills: Vec<String> = input
            .current_skills
            .iter()
            .filter(|s| !s.trim().is_empty())
            .cloned()
            .collect();

        Ok(SKILL_GAP_PROMPT_TEMPLATE
            .replace("{target_role}", input.target_role.trim())
            .replace("{skills}", &bullet_list(&skills)))
    }

    fn output_shape() -> Shape {
        Shape::new()
            .required("matchingSkills", Kind::array(Kind::String))
            .required(
                "missingSkills",
                Kind::array(Kind::Object(
                    Shape::new()
                        .required("skill", Kind::String)
                        .required("importance", Kind::OneOf(Importance::TOKENS))
                        .required("learningResources", Kind::array(Kind::String)),
                )),
            )
            .required("summary", Kind::String)
    }
}
