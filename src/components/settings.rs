use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use wasm_bindgen_futures::spawn_local;

use crate::config::clean_base_url;
use crate::models::{AppSettings, ThemePreference};
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsProps {
    pub settings: AppSettings,
    /// Shown as the placeholder of the server field.
    pub default_base_url: String,
    pub on_save: Callback<AppSettings>,
    pub on_close: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsProps) -> Html {
    // None until a check ran; Ok carries the plan count
    let check = use_state(|| None::<Result<usize, String>>);

    let on_name_input = {
        let on_save = props.on_save.clone();
        let settings = props.settings.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_save.emit(AppSettings { display_name: input.value(), ..settings.clone() });
        })
    };

    let on_url_input = {
        let on_save = props.on_save.clone();
        let settings = props.settings.clone();
        let check = check.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            check.set(None);
            on_save.emit(AppSettings { api_base_url_override: input.value(), ..settings.clone() });
        })
    };

    let on_theme_change = {
        let on_save = props.on_save.clone();
        let settings = props.settings.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_save.emit(AppSettings { theme: ThemePreference::from_label(&select.value()), ..settings.clone() });
        })
    };

    let on_check = {
        let custom = clean_base_url(&props.settings.api_base_url_override);
        let url = if custom.is_empty() { props.default_base_url.clone() } else { custom };
        let check = check.clone();
        Callback::from(move |_| {
            let api = ApiClient::new(&url);
            let check = check.clone();
            spawn_local(async move {
                match api.list_plans().await {
                    Ok(plans) => check.set(Some(Ok(plans.len()))),
                    Err(e) => {
                        log::warn!("[Settings] connection check failed: {}", e);
                        check.set(Some(Err(e.to_string())));
                    }
                }
            });
        })
    };

    let on_reset_click = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let css = r#"
        .settings-backdrop { position: fixed; inset: 0; background: rgba(255,255,255,0.6); backdrop-filter: blur(2px); z-index: 99; cursor: pointer; }
        .dark .settings-backdrop { background: rgba(0,0,0,0.5); }
        .settings-panel { position: fixed; top: 60px; right: 20px; width: 340px; background: var(--bg-app); border: 1px solid var(--border-color); border-radius: 8px; box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1); padding: 20px; z-index: 100; display: flex; flex-direction: column; gap: 15px; }
        .settings-header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--border-color); padding-bottom: 10px; margin-bottom: 5px; }
        .settings-header h3 { margin: 0; font-size: 1.1rem; }
        .close-btn { background: none; border: none; font-size: 1.5rem; line-height: 1; cursor: pointer; color: var(--text-secondary); padding: 0 5px; }
        .close-btn:hover { color: var(--text-primary); }
        .fetch-group { display: flex; gap: 8px; }
        .actions { margin-top: 10px; display: flex; flex-direction: column; gap: 8px; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="settings-backdrop" onclick={props.on_close.reform(|_| ())}></div>

            <div class="settings-panel">
                <div class="settings-header">
                    <h3>{ "Profile Settings" }</h3>
                    <button class="close-btn" onclick={props.on_close.reform(|_| ())} title="Close">{"×"}</button>
                </div>

                <div>
                    <label class="form-label">{ "Display Name" }</label>
                    <input class="form-input" type="text" value={props.settings.display_name.clone()} oninput={on_name_input} />
                </div>

                <div>
                    <label class="form-label">{ "API Server" }</label>
                    <div class="fetch-group">
                        <input
                            class="form-input"
                            type="text"
                            placeholder={props.default_base_url.clone()}
                            value={props.settings.api_base_url_override.clone()}
                            oninput={on_url_input}
                            style="margin-bottom:0;"
                        />
                        <button class="btn" onclick={on_check} title="Test connection">{ "⟳" }</button>
                    </div>
                    {
                        match &*check {
                            Some(Ok(count)) => html! { <div class="muted" style="margin-top: 6px;">{ format!("Connected, {} plans found", count) }</div> },
                            Some(Err(e)) => html! { <div style="color: var(--danger-color); font-size: 0.8rem; margin-top: 6px;">{ e }</div> },
                            None => html! {},
                        }
                    }
                </div>

                <div>
                    <label class="form-label">{ "Theme" }</label>
                    <select class="form-select" onchange={on_theme_change}>
                        { for ThemePreference::ALL.iter().map(|t| html! {
                            <option value={t.label()} selected={*t == props.settings.theme}>{ t.label() }</option>
                        }) }
                    </select>
                </div>

                <div class="actions">
                    <hr style="width: 100%; border: 0; border-top: 1px solid var(--border-color);" />
                    <button class="btn" onclick={on_reset_click}>{ "Reset Settings" }</button>
                </div>
            </div>
        </>
    }
}
