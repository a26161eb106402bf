use std::rc::Rc;

use anyhow::Context as _;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::archived_list::ArchivedList;
use crate::components::github::GithubCard;
use crate::components::task_list::TaskList;
use crate::context::use_app;
use crate::models::{Plan, Scope};
use crate::routes::Route;
use crate::services::api::ApiClient;
use crate::services::envelope::WriteOutcome;
use crate::utils;

const DEFAULT_BLURB: &str = "Let's continue your development journey.";

async fn load_plan(api: &ApiClient, plan_id: &str) -> anyhow::Result<Plan> {
    let plan = api
        .get_plan(plan_id)
        .await
        .with_context(|| format!("loading plan {} from {}", plan_id, api.base_url()))?;
    anyhow::ensure!(plan.id == plan_id, "asked for plan {} but got {}", plan_id, plan.id);
    Ok(plan)
}

/// Bumped whenever an item is archived so the archived lists refetch.
#[derive(Debug, Default, PartialEq)]
struct ArchiveReload(u32);

impl Reducible for ArchiveReload {
    type Action = ();

    fn reduce(self: Rc<Self>, _: ()) -> Rc<Self> {
        Rc::new(ArchiveReload(self.0.wrapping_add(1)))
    }
}

#[derive(Clone, PartialEq)]
enum PlanState {
    Loading,
    Failed,
    Ready(Plan),
}

#[derive(Properties, PartialEq, Clone)]
pub struct PlanDetailProps {
    pub plan_id: String,
}

#[function_component(PlanDetail)]
pub fn plan_detail(props: &PlanDetailProps) -> Html {
    let ctx = use_app();
    let navigator = use_navigator();
    let plan = use_state(|| PlanState::Loading);
    let banner = use_state(|| None::<String>);
    let show_archived = use_state(|| false);
    let archive_reload = use_reducer(ArchiveReload::default);
    let busy = use_state(|| false);

    {
        let plan = plan.clone();
        use_effect_with((ctx.api.clone(), props.plan_id.clone()), move |(api, plan_id)| {
            let api = api.clone();
            let plan_id = plan_id.clone();
            plan.set(PlanState::Loading);
            spawn_local(async move {
                match load_plan(&api, &plan_id).await {
                    Ok(p) => plan.set(PlanState::Ready(p)),
                    Err(e) => {
                        log::error!("[PlanDetail] {:#}", e);
                        plan.set(PlanState::Failed);
                    }
                }
            });
        });
    }

    let on_archived = {
        let bump = archive_reload.dispatcher();
        Callback::from(move |_: ()| bump.dispatch(()))
    };

    let toggle_archived = {
        let show_archived = show_archived.clone();
        Callback::from(move |_: MouseEvent| show_archived.set(!*show_archived))
    };

    let on_daily_reset = {
        let api = ctx.api.clone();
        let plan = plan.clone();
        let banner = banner.clone();
        let busy = busy.clone();
        Callback::from(move |_: Event| {
            let PlanState::Ready(current) = (*plan).clone() else {
                return;
            };
            let api = api.clone();
            let plan = plan.clone();
            let banner = banner.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match api.toggle_daily_reset(&current.id).await {
                    WriteOutcome::Success(updated) => {
                        let updated = updated.unwrap_or(Plan { daily_reset: !current.daily_reset, ..current });
                        plan.set(PlanState::Ready(updated));
                        banner.set(None);
                    }
                    WriteOutcome::Failure => {
                        log::warn!("[PlanDetail] daily reset toggle failed for {}", current.id);
                        banner.set(Some("Failed to update daily reset. Please try again.".to_string()));
                    }
                }
                busy.set(false);
            });
        })
    };

    let on_delete = {
        let api = ctx.api.clone();
        let navigator = navigator.clone();
        let plan_id = props.plan_id.clone();
        let banner = banner.clone();
        let busy = busy.clone();
        Callback::from(move |_: MouseEvent| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Delete this plan and all of its tasks?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let api = api.clone();
            let navigator = navigator.clone();
            let plan_id = plan_id.clone();
            let banner = banner.clone();
            let busy = busy.clone();
            busy.set(true);
            spawn_local(async move {
                match api.delete_plan(&plan_id).await {
                    WriteOutcome::Success(()) => {
                        log::info!("[PlanDetail] deleted plan {}", plan_id);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::MyPlans);
                        }
                    }
                    WriteOutcome::Failure => {
                        banner.set(Some("Failed to delete plan. Please try again.".to_string()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let on_dismiss = {
        let banner = banner.clone();
        Callback::from(move |_: MouseEvent| banner.set(None))
    };

    let (title, description, daily_reset) = match &*plan {
        PlanState::Loading => ("Loading...".to_string(), html! { <p>{ "..." }</p> }, None),
        PlanState::Failed => (
            "Plan Details".to_string(),
            html! { <p>{ "Failed to load plan data" }</p> },
            None,
        ),
        PlanState::Ready(p) => {
            let text = p.description.as_deref().filter(|d| !d.trim().is_empty());
            let description = match text {
                Some(d) => utils::render_markdown(d),
                None => html! { <p>{ DEFAULT_BLURB }</p> },
            };
            (p.name.clone(), description, Some(p.daily_reset))
        }
    };

    html! {
        <main class="page">
            <div class="hero">
                <h1>{ title }</h1>
                { description }
                <div style="display: flex; gap: 12px; align-items: center; margin-top: 16px; flex-wrap: wrap;">
                    if let Some(enabled) = daily_reset {
                        <label style="display: flex; gap: 8px; align-items: center; cursor: pointer; font-size: 0.9rem;">
                            <input type="checkbox" checked={enabled} onchange={on_daily_reset} disabled={*busy} />
                            { "Reset daily tasks every day" }
                        </label>
                    }
                    <span style="flex: 1;"></span>
                    <button class="btn btn-danger" onclick={on_delete} disabled={*busy}>{ "Delete Plan" }</button>
                </div>
            </div>

            if let Some(text) = &*banner {
                <div class="banner banner-error">
                    <span>{ text }</span>
                    <button class="btn-icon" title="Dismiss" onclick={on_dismiss}>{ "×" }</button>
                </div>
            }

            <div class="grid">
                <TaskList plan_id={props.plan_id.clone()} scope={Scope::Daily} on_archived={on_archived.clone()} />
                <TaskList plan_id={props.plan_id.clone()} scope={Scope::Longterm} on_archived={on_archived} />
            </div>

            <div class="card">
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <h2 style="margin: 0;">{ "Archived" }</h2>
                    <button class="btn" onclick={toggle_archived}>
                        { if *show_archived { "Hide" } else { "Show" } }
                    </button>
                </div>
                if *show_archived {
                    <div class="grid" style="margin-top: 16px;">
                        <ArchivedList plan_id={props.plan_id.clone()} scope={Scope::Daily} reload={archive_reload.0} />
                        <ArchivedList plan_id={props.plan_id.clone()} scope={Scope::Longterm} reload={archive_reload.0} />
                    </div>
                }
            </div>

            <GithubCard />
        </main>
    }
}
