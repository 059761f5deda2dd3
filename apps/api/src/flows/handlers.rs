//! Axum route handlers for the flow API. One generic handler serves every flow.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::dispatch::{run_flow, Flow, ResponseConvention};
use crate::errors::AppError;
use crate::flows::assessment::{EvaluateAssessment, GenerateAssessment};
use crate::flows::careers::RecommendCareers;
use crate::flows::degree::RecommendDegreeCourses;
use crate::flows::resume::{GenerateResume, ReviewResume};
use crate::flows::roadmap::BuildRoadmap;
use crate::flows::skill_gap::AnalyzeSkillGap;
use crate::flows::stream::RecommendStream;
use crate::state::AppState;

/// POST /api/v1/flows/{name}
///
/// Validates the input, runs the flow under its attempt policy, and
/// answers in the flow's fixed convention: a thrown `AppError`, or a
/// 200 carrying either the output or `{"error": true, "message": ...}`.
pub async fn handle_flow<F: Flow>(
    State(state): State<AppState>,
    Json(input): Json<F::Input>,
) -> Result<Response, AppError> {
    F::validate(&input)?;

    let outcome = run_flow::<F>(state.llm.as_ref(), &state.models, &input).await;

    Ok(match F::CONVENTION {
        ResponseConvention::Throw => Json(outcome.into_result()?).into_response(),
        ResponseConvention::Tagged => Json(outcome.into_tagged()).into_response(),
    })
}

fn flow_route<F: Flow>(router: Router<AppState>) -> Router<AppState> {
    router.route(&format!("/api/v1/flows/{}", F::NAME), post(handle_flow::<F>))
}

pub fn flow_routes() -> Router<AppState> {
    let router = Router::new();
    let router = flow_route::<RecommendStream>(router);
    let router = flow_route::<RecommendDegreeCourses>(router);
    let router = flow_route::<GenerateAssessment>(router);
    let router = flow_route::<EvaluateAssessment>(router);
    let router = flow_route::<RecommendCareers>(router);
    let router = flow_route::<GenerateResume>(router);
    let router = flow_route::<ReviewResume>(router);
    let router = flow_route::<BuildRoadmap>(router);
    flow_route::<AnalyzeSkillGap>(router)
}
