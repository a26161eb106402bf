//! Client-side routes and plan-id resolution.

use serde::{Deserialize, Serialize};
use yew_router::prelude::*;

use crate::config::Environment;
use crate::models::PlanType;

#[derive(Routable, Debug, Clone, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/myplans")]
    MyPlans,
    #[at("/create-plan")]
    CreatePlan,
    /// Full dashboard for one plan.
    #[at("/plan/:plan_id")]
    PlanDetail { plan_id: String },
    /// Bare task list for one plan.
    #[at("/plans/:plan_id")]
    PlanTasks { plan_id: String },
    #[at("/learning/microservices")]
    Microservices,
    #[at("/learning/genai")]
    GenAi,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    fn plan_segment(&self) -> Option<&str> {
        match self {
            Route::PlanDetail { plan_id } | Route::PlanTasks { plan_id } => Some(plan_id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearningTrack {
    Microservices,
    GenAi,
}

impl LearningTrack {
    pub const ALL: [LearningTrack; 2] = [LearningTrack::Microservices, LearningTrack::GenAi];

    pub fn label(&self) -> &'static str {
        match self {
            LearningTrack::Microservices => "Microservices",
            LearningTrack::GenAi => "GenAI",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            LearningTrack::Microservices => Route::Microservices,
            LearningTrack::GenAi => Route::GenAi,
        }
    }
}

/// `?plan_id=` on pages that are not tied to a plan by their path.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlanQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

impl PlanQuery {
    /// Query that selects `plan_id`, or `None` when the plan is the test
    /// plan and the URL can stay bare.
    pub fn selecting(plan_id: &str, env: &Environment) -> Option<PlanQuery> {
        if plan_id.trim().is_empty() || plan_id == env.test_plan_id {
            None
        } else {
            Some(PlanQuery { plan_id: Some(plan_id.to_string()) })
        }
    }
}

/// `?type=&focus=` prefill for the create-plan form.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CreatePlanQuery {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl CreatePlanQuery {
    pub fn new(plan_type: Option<PlanType>, focus: &str) -> Self {
        let focus = focus.trim();
        CreatePlanQuery {
            plan_type: plan_type.map(|t| t.as_str().to_string()),
            focus: (!focus.is_empty()).then(|| focus.to_string()),
        }
    }
}

/// Plan the current page is about: path segment, then `plan_id` query
/// parameter, then the configured test plan.
pub fn resolve_plan_id(route: &Route, query: &PlanQuery, env: &Environment) -> String {
    route
        .plan_segment()
        .or(query.plan_id.as_deref())
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| env.test_plan_id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(path: &str) -> Route {
        Route::recognize(path).unwrap_or(Route::NotFound)
    }

    #[test]
    fn recognizes_known_paths() {
        assert_eq!(recognize("/"), Route::Home);
        assert_eq!(recognize("/myplans"), Route::MyPlans);
        assert_eq!(recognize("/create-plan"), Route::CreatePlan);
        assert_eq!(recognize("/plan/abc-1"), Route::PlanDetail { plan_id: "abc-1".into() });
        assert_eq!(recognize("/plans/abc-1"), Route::PlanTasks { plan_id: "abc-1".into() });
        assert_eq!(recognize("/learning/genai"), Route::GenAi);
        assert_eq!(recognize("/learning/rust"), Route::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            Route::Home,
            Route::MyPlans,
            Route::CreatePlan,
            Route::PlanDetail { plan_id: "p-7".into() },
            Route::PlanTasks { plan_id: "p-7".into() },
            Route::Microservices,
        ] {
            assert_eq!(recognize(&route.to_path()), route);
        }
        assert_eq!(LearningTrack::GenAi.route().to_path(), "/learning/genai");
    }

    #[test]
    fn plan_id_precedence() {
        let env = Environment::default();
        let detail = Route::PlanDetail { plan_id: "from-path".into() };
        let query = PlanQuery { plan_id: Some("from-query".into()) };
        assert_eq!(resolve_plan_id(&detail, &query, &env), "from-path");
        assert_eq!(resolve_plan_id(&Route::Home, &query, &env), "from-query");
        assert_eq!(resolve_plan_id(&Route::Home, &PlanQuery { plan_id: Some(" ".into()) }, &env), env.test_plan_id);
        assert_eq!(resolve_plan_id(&Route::Home, &PlanQuery::default(), &env), env.test_plan_id);
    }

    #[test]
    fn test_plan_is_left_out_of_urls() {
        let env = Environment::default();
        assert_eq!(PlanQuery::selecting(&env.test_plan_id, &env), None);
        assert_eq!(PlanQuery::selecting("", &env), None);
        assert_eq!(PlanQuery::selecting("p2", &env), Some(PlanQuery { plan_id: Some("p2".into()) }));
    }

    #[test]
    fn create_query_carries_choice() {
        assert_eq!(CreatePlanQuery::new(None, "  "), CreatePlanQuery::default());
        let query = CreatePlanQuery::new(Some(PlanType::Learning), " movie app ");
        assert_eq!(query.plan_type.as_deref(), Some("learning"));
        assert_eq!(query.focus.as_deref(), Some("movie app"));
    }
}
