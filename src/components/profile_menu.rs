use yew::prelude::*;
use yew_router::prelude::*;

use crate::context::use_app;
use crate::routes::Route;

#[function_component(ProfileMenu)]
pub fn profile_menu() -> Html {
    let ctx = use_app();
    let navigator = use_navigator();
    let open = use_state(|| false);

    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };
    let close = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(false))
    };
    let on_plans = {
        let open = open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            open.set(false);
            if let Some(navigator) = &navigator {
                navigator.push(&Route::MyPlans);
            }
        })
    };
    let on_settings = {
        let open = open.clone();
        let open_settings = ctx.open_settings.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            open.set(false);
            open_settings.emit(());
        })
    };

    let css = r#"
        .profile { position: relative; z-index: 50; }
        .profile-btn { display: flex; align-items: center; gap: 8px; padding: 4px 8px; border: none; border-radius: 6px; background: transparent; color: inherit; cursor: pointer; }
        .profile-btn:hover { background: var(--accent-soft); }
        .avatar { width: 24px; height: 24px; border-radius: 50%; background: linear-gradient(135deg, #fb923c, #ea580c); color: white; font-size: 0.7rem; font-weight: 600; display: flex; align-items: center; justify-content: center; }
        .chevron { transition: transform 0.2s; }
        .chevron.open { transform: rotate(180deg); }
        .profile-backdrop { position: fixed; inset: 0; z-index: 40; }
        .profile-dropdown { position: absolute; right: 0; margin-top: 4px; width: 192px; padding: 4px 0; border: 1px solid var(--border-color); border-radius: 8px; background: var(--bg-app); box-shadow: 0 10px 15px -3px rgba(0,0,0,0.1); z-index: 50; }
        .profile-dropdown a { display: block; padding: 8px 16px; font-size: 0.875rem; color: inherit; text-decoration: none; }
        .profile-dropdown a:hover { background: var(--accent-soft); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="profile">
                <button class="profile-btn" onclick={toggle}>
                    <div class="avatar">{ ctx.settings.initials() }</div>
                    <span style="font-size: 0.875rem;">{ &ctx.settings.display_name }</span>
                    <svg class={classes!("chevron", open.then_some("open"))} width="16" height="16" viewBox="0 0 20 20" fill="currentColor">
                        <path fill-rule="evenodd" d="M5.23 7.21a.75.75 0 011.06.02L10 11.168l3.71-3.938a.75.75 0 111.08 1.04l-4.25 4.5a.75.75 0 01-1.08 0l-4.25-4.5a.75.75 0 01.02-1.06z" clip-rule="evenodd" />
                    </svg>
                </button>

                if *open {
                    <div class="profile-backdrop" onclick={close}></div>
                    <div class="profile-dropdown" role="menu">
                        <a href={Route::MyPlans.to_path()} role="menuitem" onclick={on_plans}>{ "My Plans" }</a>
                        <a href="#" role="menuitem" onclick={on_settings}>{ "Profile Settings" }</a>
                    </div>
                }
            </div>
        </>
    }
}
