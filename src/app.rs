use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{profile_menu::ProfileMenu, settings::SettingsModal, sidebar::Sidebar};
use crate::config::Environment;
use crate::context::AppContext;
use crate::models::AppSettings;
use crate::pages::{
    create_plan::CreatePlan, home::Home, learning::LearningPage, my_plans::MyPlans, plan_detail::PlanDetail,
    plan_tasks::PlanTasks,
};
use crate::routes::{resolve_plan_id, LearningTrack, PlanQuery, Route};
use crate::services::api::ApiClient;
use crate::services::storage::{LocalStorage, KEY_SETTINGS};
use crate::utils;

const GLOBAL_STYLES: &str = r#"
    :root {
        --bg-app: rgb(242, 240, 227);
        --bg-sidebar: rgb(232, 230, 217);
        --bg-card: rgba(255, 255, 255, 0.45);
        --border-color: #dedbc9;
        --text-primary: #2b2b2b;
        --text-secondary: #6b6b6b;
        --accent-color: rgb(247, 111, 83);
        --accent-soft: rgba(247, 111, 83, 0.1);
        --danger-color: #dc2626;
        --danger-soft: #fef2f2;
        --success-soft: rgba(34, 197, 94, 0.12);
    }
    .dark {
        --bg-app: #1f1f1f;
        --bg-sidebar: #171717;
        --bg-card: rgba(17, 24, 39, 0.35);
        --border-color: #333;
        --text-primary: #ececec;
        --text-secondary: #a3a3a3;
        --danger-soft: rgba(220, 38, 38, 0.12);
    }

    * { box-sizing: border-box; }
    body { margin: 0; font-family: Merriweather, Georgia, serif; }

    .app-container { display: flex; min-height: 100vh; background: var(--bg-app); color: var(--text-primary); transition: background 0.2s; }
    .main-content { flex-grow: 1; display: flex; flex-direction: column; margin-left: 256px; min-width: 0; }
    .header { height: 48px; border-bottom: 1px solid var(--border-color); display: flex; justify-content: flex-end; align-items: center; padding: 0 16px; }
    .page { padding: 32px; max-width: 1280px; width: 100%; margin: 0 auto; display: flex; flex-direction: column; gap: 24px; }

    .hero { border-radius: 16px; padding: 32px; background: var(--bg-card); box-shadow: 0 4px 12px rgba(0,0,0,0.06); }
    .hero h1 { font-size: 2.25rem; margin: 0 0 8px 0; }
    .hero p { margin: 0; opacity: 0.8; }

    .card { background: var(--bg-card); border-radius: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.05); padding: 24px; }
    .card h2 { font-size: 1.25rem; margin: 0 0 16px 0; }
    .grid { display: grid; gap: 24px; grid-template-columns: repeat(auto-fill, minmax(320px, 1fr)); }
    .muted { color: var(--text-secondary); font-size: 0.875rem; }

    .btn { cursor: pointer; border: 1px solid var(--border-color); background: transparent; padding: 8px 12px; border-radius: 6px; font-size: 0.9rem; transition: all 0.2s; color: var(--text-primary); }
    .btn:hover { background: var(--accent-soft); }
    .btn:disabled { opacity: 0.6; cursor: default; }
    .btn-primary { background: var(--accent-color); color: white; border-color: transparent; }
    .btn-primary:hover { background: var(--accent-color); opacity: 0.9; }
    .btn-danger { color: var(--danger-color); border-color: var(--danger-color); }
    .btn-danger:hover { background: var(--danger-soft); }
    .btn-icon { border: none; background: transparent; font-size: 1rem; padding: 4px 6px; color: var(--text-secondary); cursor: pointer; border-radius: 4px; }
    .btn-icon:hover { color: var(--accent-color); }

    .form-input, .form-select, .form-textarea { width: 100%; padding: 8px 12px; border: 1px solid var(--border-color); border-radius: 6px; font-family: inherit; background: transparent; color: inherit; margin-bottom: 10px; }
    .form-input:focus, .form-textarea:focus, .form-select:focus { outline: 2px solid var(--accent-color); border-color: transparent; }
    .form-label { display: block; font-size: 0.85rem; font-weight: 600; margin-bottom: 5px; color: var(--text-secondary); }

    .banner { padding: 8px 12px; border-radius: 6px; font-size: 0.875rem; display: flex; justify-content: space-between; align-items: center; gap: 8px; }
    .banner-error { color: var(--danger-color); background: var(--danger-soft); }
    .banner-success { background: var(--success-soft); }

    .markdown-body { line-height: 1.6; }
    .markdown-body p { margin-top: 0; margin-bottom: 0.5em; }
    .markdown-body code { background: rgba(0,0,0,0.06); padding: 2px 4px; border-radius: 4px; font-family: monospace; font-size: 0.9em; }

    .spinner { display: inline-block; width: 32px; height: 32px; border-radius: 50%; border-top: 2px solid var(--accent-color); border-bottom: 2px solid var(--accent-color); animation: spin 1s linear infinite; }
    @keyframes spin { to { transform: rotate(360deg); } }
"#;

fn settings_or_default() -> AppSettings {
    LocalStorage::get::<AppSettings>(KEY_SETTINGS).unwrap_or_default()
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::MyPlans => html! { <MyPlans /> },
        Route::CreatePlan => html! { <CreatePlan /> },
        Route::PlanDetail { plan_id } => {
            let key = plan_id.clone();
            html! { <PlanDetail key={key} plan_id={plan_id} /> }
        }
        Route::PlanTasks { plan_id } => {
            let key = plan_id.clone();
            html! { <PlanTasks key={key} plan_id={plan_id} /> }
        }
        Route::Microservices => html! { <LearningPage track={LearningTrack::Microservices} /> },
        Route::GenAi => html! { <LearningPage track={LearningTrack::GenAi} /> },
        Route::NotFound => html! {
            <main class="page">
                <div class="hero">
                    <h1>{ "Page not found" }</h1>
                    <p>{ "There is nothing at this address." }</p>
                </div>
            </main>
        },
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Shell />
        </BrowserRouter>
    }
}

/// Everything inside the router: settings, theme and the shared context.
#[function_component(Shell)]
fn shell() -> Html {
    let env = use_memo((), |_| Environment::from_build_env());
    let settings = use_state(settings_or_default);
    let route = use_route::<Route>().unwrap_or(Route::NotFound);
    let query = use_location()
        .and_then(|l| l.query::<PlanQuery>().ok())
        .unwrap_or_default();
    let system_dark = use_state(|| utils::dark_mode_query().map(|q| q.matches()).unwrap_or(false));
    let show_settings = use_state(|| false);

    // --- EFFECTS ---
    {
        let s = settings.clone();
        use_effect_with(s, |s| LocalStorage::set(KEY_SETTINGS, &**s));
    }

    // System colour scheme changes
    {
        let system_dark = system_dark.clone();
        use_effect_with((), move |_| {
            let query = utils::dark_mode_query();
            let listener = Closure::<dyn FnMut(web_sys::MediaQueryListEvent)>::new(move |e: web_sys::MediaQueryListEvent| {
                system_dark.set(e.matches());
            });
            if let Some(q) = &query {
                let _ = q.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
            }
            move || {
                if let Some(q) = query {
                    let _ = q.remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
                }
            }
        });
    }

    // --- ACTIONS ---

    let on_settings_save = {
        let settings = settings.clone();
        Callback::from(move |new_settings: AppSettings| settings.set(new_settings))
    };

    let on_reset_settings = {
        let settings = settings.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Reset all settings to default?").ok())
                .unwrap_or(false);
            if confirmed {
                settings.set(AppSettings::default());
            }
        })
    };

    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };

    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };

    let base_url = settings.effective_base_url(&env);
    let api = use_memo(base_url, |url| ApiClient::new(url));
    let ctx = AppContext {
        env: Rc::clone(&env),
        api: (*api).clone(),
        settings: (*settings).clone(),
        dark: settings.theme.is_dark(*system_dark),
        plan_id: resolve_plan_id(&route, &query, &env),
        open_settings,
    };

    let container_class = classes!("app-container", ctx.dark.then_some("dark"));

    html! {
        <ContextProvider<AppContext> context={ctx.clone()}>
            <style>{ GLOBAL_STYLES }</style>
            <div class={container_class}>
                <Sidebar />
                <div class="main-content">
                    <div class="header">
                        <ProfileMenu />
                    </div>

                    if *show_settings {
                        <SettingsModal
                            settings={ctx.settings.clone()}
                            default_base_url={env.api_base_url.clone()}
                            on_save={on_settings_save}
                            on_close={close_settings}
                            on_reset={on_reset_settings}
                        />
                    }

                    <Switch<Route> render={switch} />
                </div>
            </div>
        </ContextProvider<AppContext>>
    }
}
