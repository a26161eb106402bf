use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::task_list::TaskList;
use crate::context::use_app;
use crate::models::{PlanType, Scope};
use crate::routes::{CreatePlanQuery, Route};

fn focus_blurb(plan_type: PlanType) -> &'static str {
    match plan_type {
        PlanType::Development => "Focus on building and improving your projects",
        PlanType::Learning => "Focus on acquiring new skills and knowledge",
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let ctx = use_app();
    let selected = use_state(|| None::<PlanType>);
    let custom_focus = use_state(String::new);

    let on_focus_input = {
        let custom_focus = custom_focus.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            custom_focus.set(input.value());
        })
    };

    let on_start = {
        let navigator = use_navigator();
        let selected = selected.clone();
        let custom_focus = custom_focus.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(navigator) = &navigator else { return };
            let query = CreatePlanQuery::new(*selected, &custom_focus);
            if let Err(e) = navigator.push_with_query(&Route::CreatePlan, &query) {
                log::warn!("[Home] could not open the create form: {}", e);
            }
        })
    };

    let css = r#"
        .focus-choice { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 16px; }
        .focus-card { padding: 24px; border-radius: 12px; border: 1px solid transparent; background: var(--bg-card); color: inherit; text-align: left; cursor: pointer; transition: all 0.2s; font-family: inherit; }
        .focus-card:hover { border-color: var(--border-color); }
        .focus-card.selected { border-color: var(--accent-color); transform: scale(1.02); box-shadow: 0 4px 12px rgba(0,0,0,0.08); }
        .focus-card h3 { margin: 0 0 8px 0; }
        .focus-input { width: 100%; padding: 12px 4px; border: none; border-bottom: 1px solid var(--border-color); background: transparent; color: inherit; font-family: inherit; font-size: 1rem; outline: none; }
        .focus-input:focus { border-bottom-color: var(--accent-color); }
    "#;

    html! {
        <main class="page">
            <style>{ css }</style>
            <div class="hero">
                <h1>{ format!("Welcome back, {}.", ctx.settings.display_name) }</h1>
                <p>{ "Let's continue your development journey." }</p>
            </div>

            <div class="card">
                <h2>{ "What will be your focus of the day?" }</h2>
                <input
                    class="focus-input"
                    type="text"
                    placeholder="Enter your focus. E.g. start a new project on building a movie app, continue an existing plan."
                    value={(*custom_focus).clone()}
                    oninput={on_focus_input}
                />
                <div class="focus-choice" style="margin-top: 24px;">
                    { for PlanType::ALL.iter().map(|t| {
                        let plan_type = *t;
                        let onclick = {
                            let selected = selected.clone();
                            Callback::from(move |_: MouseEvent| selected.set(Some(plan_type)))
                        };
                        html! {
                            <button class={classes!("focus-card", (*selected == Some(plan_type)).then_some("selected"))} {onclick}>
                                <h3>{ plan_type.label() }</h3>
                                <p class="muted" style="margin: 0;">{ focus_blurb(plan_type) }</p>
                            </button>
                        }
                    }) }
                </div>
                <div style="margin-top: 16px; display: flex; justify-content: flex-end;">
                    <button class="btn btn-primary" onclick={on_start} disabled={selected.is_none() && custom_focus.trim().is_empty()}>
                        { "Plan it" }
                    </button>
                </div>
            </div>

            <div class="grid">
                <TaskList key={format!("{}-daily", ctx.plan_id)} plan_id={ctx.plan_id.clone()} scope={Scope::Daily} />
                <TaskList key={format!("{}-longterm", ctx.plan_id)} plan_id={ctx.plan_id.clone()} scope={Scope::Longterm} />
            </div>
        </main>
    }
}
