use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::use_app;
use crate::models::Plan;
use crate::routes::{LearningTrack, Route};

struct NavItem {
    label: String,
    route: Route,
}

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let ctx = use_app();
    let route = use_route::<Route>();
    let plans = use_state(Vec::<Plan>::new);
    let generation = use_mut_ref(|| 0u32);

    // Refetched on navigation so created and deleted plans show up
    {
        let plans = plans.clone();
        let generation = generation.clone();
        use_effect_with((ctx.api.clone(), route.clone()), move |(api, _)| {
            let current = {
                let mut g = generation.borrow_mut();
                *g += 1;
                *g
            };
            let api = api.clone();
            spawn_local(async move {
                let result = api.list_plans().await;
                if *generation.borrow() != current {
                    return;
                }
                match result {
                    Ok(list) => plans.set(list),
                    Err(e) => log::warn!("[Sidebar] could not load plans: {}", e),
                }
            });
        });
    }

    let learning: Vec<NavItem> = LearningTrack::ALL
        .into_iter()
        .map(|track| NavItem { label: track.label().to_string(), route: track.route() })
        .collect();
    let projects: Vec<NavItem> = plans
        .iter()
        .map(|plan| NavItem { label: plan.name.clone(), route: Route::PlanDetail { plan_id: plan.id.clone() } })
        .collect();

    let css = r#"
        .sidebar { width: 256px; height: 100vh; position: fixed; left: 0; top: 0; padding: 96px 16px 16px; overflow-y: auto; background: var(--bg-sidebar); transition: background 0.2s; }
        .nav-section { margin-bottom: 24px; }
        .nav-section h3 { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.08em; opacity: 0.7; margin: 0 0 8px 0; }
        .nav-list { list-style: none; margin: 0; padding-left: 8px; }
        .nav-link { display: block; padding: 8px 12px; font-size: 0.875rem; border-radius: 6px; color: inherit; text-decoration: none; cursor: pointer; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
        .nav-link:hover { background: var(--accent-soft); }
        .nav-link.active { background: var(--accent-soft); color: var(--accent-color); font-weight: 600; }
    "#;

    let render_section = |title: &str, items: &[NavItem], empty: &str| {
        html! {
            <div class="nav-section">
                <h3>{ title }</h3>
                <ul class="nav-list">
                    if items.is_empty() {
                        <li class="muted" style="padding: 8px 12px;">{ empty }</li>
                    }
                    { for items.iter().map(|item| {
                        let active = route.as_ref() == Some(&item.route);
                        html! {
                            <li>
                                <Link<Route> to={item.route.clone()} classes={classes!("nav-link", active.then_some("active"))}>
                                    { &item.label }
                                </Link<Route>>
                            </li>
                        }
                    })}
                </ul>
            </div>
        }
    };

    html! {
        <>
            <style>{ css }</style>
            <aside class="sidebar">
                <nav>
                    { render_section("Learning", &learning, "") }
                    { render_section("Projects", &projects, "No plans yet") }
                </nav>
            </aside>
        </>
    }
}
