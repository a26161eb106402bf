use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::use_app;
use crate::models::{NewPlan, PlanType};
use crate::routes::{CreatePlanQuery, PlanQuery, Route};
use crate::services::envelope::WriteOutcome;

const REDIRECT_DELAY_MS: u32 = 1_500;

/// Form values prefilled from `?type=` and `?focus=`.
pub fn prefilled(query: &CreatePlanQuery) -> NewPlan {
    NewPlan {
        focus: query.focus.clone().unwrap_or_default(),
        plan_type: query.plan_type.as_deref().map(PlanType::from_value).unwrap_or_default(),
        ..Default::default()
    }
}

#[function_component(CreatePlan)]
pub fn create_plan() -> Html {
    let ctx = use_app();
    let navigator = use_navigator();
    let query = use_location()
        .and_then(|l| l.query::<CreatePlanQuery>().ok())
        .unwrap_or_default();
    let form = use_state(|| prefilled(&query));
    let submitting = use_state(|| false);
    let error = use_state(|| None::<String>);
    let success = use_state(|| false);

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(NewPlan { name: input.value(), ..(*form).clone() });
        })
    };
    let on_focus = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(NewPlan { focus: input.value(), ..(*form).clone() });
        })
    };
    let on_description = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            form.set(NewPlan { description: input.value(), ..(*form).clone() });
        })
    };
    let on_type = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.set(NewPlan { plan_type: PlanType::from_value(&select.value()), ..(*form).clone() });
        })
    };

    let on_submit = {
        let ctx = ctx.clone();
        let navigator = navigator.clone();
        let form = form.clone();
        let submitting = submitting.clone();
        let error = error.clone();
        let success = success.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting || *success {
                return;
            }
            if let Some(field) = form.missing_field() {
                error.set(Some(format!("{} is required.", field)));
                return;
            }

            let plan = NewPlan {
                name: form.name.trim().to_string(),
                focus: form.focus.trim().to_string(),
                description: form.description.trim().to_string(),
                plan_type: form.plan_type,
            };
            submitting.set(true);
            error.set(None);

            let ctx = ctx.clone();
            let navigator = navigator.clone();
            let form = form.clone();
            let submitting = submitting.clone();
            let error = error.clone();
            let success = success.clone();
            spawn_local(async move {
                match ctx.api.create_plan(&plan).await {
                    WriteOutcome::Success(created) => {
                        log::info!("[CreatePlan] created plan {}", created.id);
                        success.set(true);
                        submitting.set(false);
                        form.set(NewPlan::default());
                        TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                        let Some(navigator) = navigator else { return };
                        match PlanQuery::selecting(&created.id, &ctx.env) {
                            Some(query) => {
                                if let Err(e) = navigator.push_with_query(&Route::Home, &query) {
                                    log::warn!("[CreatePlan] could not open plan {}: {}", created.id, e);
                                }
                            }
                            None => navigator.push(&Route::Home),
                        }
                    }
                    WriteOutcome::Failure => {
                        log::error!("[CreatePlan] could not create plan {:?}", plan.name);
                        error.set(Some("Failed to create plan. Please try again.".to_string()));
                        submitting.set(false);
                    }
                }
            });
        })
    };

    let on_cancel = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::MyPlans);
            }
        })
    };

    let locked = *submitting || *success;

    html! {
        <main class="page" style="max-width: 720px;">
            <div class="card">
                <h1 style="margin-top: 0;">{ "Create New Plan" }</h1>

                if let Some(e) = &*error {
                    <div class="banner banner-error" style="margin-bottom: 16px;">{ e }</div>
                }
                if *success {
                    <div class="banner banner-success" style="margin-bottom: 16px;">
                        { "Plan created successfully! Redirecting to your new plan..." }
                    </div>
                }

                <form onsubmit={on_submit}>
                    <label class="form-label" for="name">{ "Plan Name" }</label>
                    <input class="form-input" id="name" type="text" placeholder="NextJS Portfolio Website"
                        value={form.name.clone()} oninput={on_name} disabled={locked} />

                    <label class="form-label" for="focus">{ "Focus" }</label>
                    <input class="form-input" id="focus" type="text" placeholder="Building a modern portfolio website using NextJS..."
                        value={form.focus.clone()} oninput={on_focus} disabled={locked} />

                    <label class="form-label" for="description">{ "Description" }</label>
                    <textarea class="form-textarea" id="description" rows="5"
                        placeholder="Create a portfolio with sections for work, about me, and contact..."
                        value={form.description.clone()} oninput={on_description} disabled={locked} />

                    <label class="form-label" for="planType">{ "Plan Type" }</label>
                    <select class="form-select" id="planType" onchange={on_type} disabled={locked}>
                        { for PlanType::ALL.iter().map(|t| html! {
                            <option value={t.as_str()} selected={*t == form.plan_type}>{ t.label() }</option>
                        }) }
                    </select>

                    <div style="display: flex; justify-content: flex-end; gap: 8px; margin-top: 8px;">
                        <button class="btn" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                        <button class="btn btn-primary" type="submit" disabled={locked}>
                            { if *submitting { "Creating..." } else { "Create Plan" } }
                        </button>
                    </div>
                </form>
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_reads_type_and_focus() {
        let form = prefilled(&CreatePlanQuery::new(Some(PlanType::Learning), "movie app"));
        assert_eq!(form.plan_type, PlanType::Learning);
        assert_eq!(form.focus, "movie app");
        assert!(form.name.is_empty());

        assert_eq!(prefilled(&CreatePlanQuery::default()).plan_type, PlanType::Development);
        let unknown = CreatePlanQuery { plan_type: Some("project".into()), focus: None };
        assert_eq!(prefilled(&unknown).plan_type, PlanType::Development);
    }
}
