use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::use_app;
use crate::models::Plan;
use crate::routes::Route;

#[derive(Clone, PartialEq)]
enum PlansState {
    Loading,
    Failed,
    Ready(Vec<Plan>),
}

#[function_component(MyPlans)]
pub fn my_plans() -> Html {
    let ctx = use_app();
    let state = use_state(|| PlansState::Loading);

    {
        let state = state.clone();
        use_effect_with(ctx.api.clone(), move |api| {
            let api = api.clone();
            state.set(PlansState::Loading);
            spawn_local(async move {
                match api.list_plans().await {
                    Ok(plans) => state.set(PlansState::Ready(plans)),
                    Err(e) => {
                        log::error!("[MyPlans] error fetching plans: {}", e);
                        state.set(PlansState::Failed);
                    }
                }
            });
        });
    }

    let css = r#"
        .plan-link { display: inline-block; text-decoration: none; }
        .plan-card { display: block; height: 100%; color: inherit; text-decoration: none; transition: all 0.2s; }
        .plan-card:hover { transform: translateY(-4px); box-shadow: 0 6px 16px rgba(0,0,0,0.08); }
        .plan-card h3 { color: var(--accent-color); margin: 0 0 8px 0; font-size: 1.25rem; }
        .plan-type { font-size: 0.875rem; font-weight: 600; opacity: 0.7; margin-bottom: 12px; }
        .plan-desc { opacity: 0.8; display: -webkit-box; -webkit-line-clamp: 3; -webkit-box-orient: vertical; overflow: hidden; }
        .plan-focus { margin-top: 16px; padding-top: 16px; border-top: 1px solid var(--border-color); }
        .plan-focus h4 { margin: 0 0 4px 0; font-size: 0.875rem; opacity: 0.7; }
        .centered { text-align: center; padding: 48px 0; }
    "#;

    let body = match &*state {
        PlansState::Loading => html! {
            <div class="centered">
                <div class="spinner"></div>
                <p class="muted">{ "Loading plans..." }</p>
            </div>
        },
        PlansState::Failed => html! {
            <div class="centered" style="color: var(--danger-color);">{ "Failed to load plans" }</div>
        },
        PlansState::Ready(plans) if plans.is_empty() => html! {
            <div class="centered">
                <p class="muted">{ "No plans found. Create your first plan!" }</p>
                <Link<Route> to={Route::CreatePlan} classes={classes!("btn", "btn-primary", "plan-link")}>
                    { "Create New Plan" }
                </Link<Route>>
            </div>
        },
        PlansState::Ready(plans) => html! {
            <div class="grid">
                { for plans.iter().map(|plan| {
                    let route = Route::PlanDetail { plan_id: plan.id.clone() };
                    html! {
                        <Link<Route> key={plan.id.clone()} to={route} classes={classes!("card", "plan-card")}>
                            <h3>{ &plan.name }</h3>
                            <div class="plan-type">{ plan.plan_type.label() }</div>
                            <p class="plan-desc">
                                { plan.description.as_deref().filter(|d| !d.trim().is_empty()).unwrap_or("No description available") }
                            </p>
                            if let Some(focus) = plan.focus.as_deref().filter(|f| !f.trim().is_empty()) {
                                <div class="plan-focus">
                                    <h4>{ "Focus" }</h4>
                                    <p class="muted" style="margin: 0;">{ focus }</p>
                                </div>
                            }
                        </Link<Route>>
                    }
                }) }
            </div>
        },
    };

    html! {
        <main class="page">
            <style>{ css }</style>
            <div class="hero">
                <h1>{ "My Plans" }</h1>
                <p>{ "Manage and track your development and learning plans." }</p>
            </div>
            { body }
        </main>
    }
}
