use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::models::GithubRepo;
use crate::services::storage::{LocalStorage, KEY_GITHUB_REPO};
use crate::utils;

/// Last non-empty path segment with any `.git` suffix dropped.
pub fn repo_name_from_url(url: &str) -> String {
    url.trim()
        .split(['/', '?', '#'])
        .filter(|s| !s.is_empty())
        .last()
        .map(|s| s.trim_end_matches(".git"))
        .filter(|s| !s.is_empty() && !s.contains(':'))
        .unwrap_or("repository")
        .to_string()
}

pub fn updated_label(then_ms: f64, now_ms: f64) -> String {
    let minutes = ((now_ms - then_ms).max(0.0) / 60_000.0) as u64;
    let (n, unit) = match minutes {
        0 => return "just now".to_string(),
        m if m < 60 => (m, "minute"),
        m if m < 60 * 24 => (m / 60, "hour"),
        m => (m / (60 * 24), "day"),
    };
    format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" })
}

#[function_component(GithubCard)]
pub fn github_card() -> Html {
    let repo = use_state(|| LocalStorage::get::<GithubRepo>(KEY_GITHUB_REPO));
    let input_url = use_state(String::new);
    let connecting = use_state(|| false);

    let on_input = {
        let input_url = input_url.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input_url.set(input.value());
        })
    };

    let on_connect = {
        let repo = repo.clone();
        let input_url = input_url.clone();
        let connecting = connecting.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let url = input_url.trim().to_string();
            if url.is_empty() || *connecting {
                return;
            }
            connecting.set(true);
            let repo = repo.clone();
            let input_url = input_url.clone();
            let connecting = connecting.clone();
            spawn_local(async move {
                // No GitHub API call yet; the short pause keeps the button state visible
                TimeoutFuture::new(1_000).await;
                let connected = GithubRepo {
                    name: repo_name_from_url(&url),
                    description: "Connected repository".to_string(),
                    url,
                    connected_at: utils::now_ms(),
                };
                log::info!("[GitHub] connected {}", connected.url);
                LocalStorage::set(KEY_GITHUB_REPO, &connected);
                repo.set(Some(connected));
                input_url.set(String::new());
                connecting.set(false);
            });
        })
    };

    let on_disconnect = {
        let repo = repo.clone();
        Callback::from(move |_: MouseEvent| {
            LocalStorage::remove(KEY_GITHUB_REPO);
            repo.set(None);
        })
    };

    html! {
        <div class="card">
            <div style="display: flex; align-items: center; gap: 8px; margin-bottom: 16px;">
                <svg width="24" height="24" viewBox="0 0 24 24" fill="currentColor" style="color: var(--accent-color);">
                    <path fill-rule="evenodd" clip-rule="evenodd" d="M12 0C5.37 0 0 5.37 0 12C0 17.31 3.435 21.795 8.205 23.385C8.805 23.49 9.03 23.13 9.03 22.815C9.03 22.53 9.015 21.585 9.015 20.58C6 21.135 5.22 19.845 4.98 19.17C4.845 18.825 4.26 17.76 3.75 17.475C3.33 17.25 2.73 16.695 3.735 16.68C4.68 16.665 5.355 17.55 5.58 17.91C6.66 19.725 8.385 19.215 9.075 18.9C9.18 18.12 9.495 17.595 9.84 17.295C7.17 16.995 4.38 15.96 4.38 11.37C4.38 10.065 4.845 8.985 5.61 8.145C5.49 7.845 5.07 6.615 5.73 4.965C5.73 4.965 6.735 4.65 9.03 6.195C9.99 5.925 11.01 5.79 12.03 5.79C13.05 5.79 14.07 5.925 15.03 6.195C17.325 4.635 18.33 4.965 18.33 4.965C18.99 6.615 18.57 7.845 18.45 8.145C19.215 8.985 19.68 10.05 19.68 11.37C19.68 15.975 16.875 16.995 14.205 17.295C14.64 17.67 15.015 18.39 15.015 19.515C15.015 21.12 15 22.41 15 22.815C15 23.13 15.225 23.505 15.825 23.385C18.2072 22.5807 20.2772 21.0497 21.7437 19.0074C23.2101 16.965 23.9993 14.5143 24 12C24 5.37 18.63 0 12 0Z" />
                </svg>
                <h2 style="margin: 0;">{ "Repository" }</h2>
            </div>

            {
                match &*repo {
                    None => html! {
                        <div>
                            <p class="muted">{ "Connect your GitHub repository to track changes and progress." }</p>
                            <form onsubmit={on_connect}>
                                <input
                                    class="form-input"
                                    type="text"
                                    placeholder="https://github.com/username/repository"
                                    value={(*input_url).clone()}
                                    oninput={on_input}
                                />
                                <button class="btn btn-primary" type="submit" disabled={input_url.trim().is_empty() || *connecting}>
                                    { if *connecting { "Connecting..." } else { "Connect Repository" } }
                                </button>
                            </form>
                        </div>
                    },
                    Some(r) => html! {
                        <div style="display: flex; justify-content: space-between; align-items: flex-start; gap: 12px;">
                            <div>
                                <h4 style="margin: 0;">
                                    <a href={r.url.clone()} target="_blank" rel="noopener noreferrer" style="color: var(--accent-color);">{ &r.name }</a>
                                </h4>
                                <p class="muted" style="margin: 4px 0 12px 0;">{ &r.description }</p>
                                <button class="btn btn-danger" onclick={on_disconnect}>{ "Disconnect" }</button>
                            </div>
                            <span class="muted" style="white-space: nowrap;">
                                { format!("Updated {}", updated_label(r.connected_at, utils::now_ms())) }
                            </span>
                        </div>
                    },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_name_is_last_segment() {
        assert_eq!(repo_name_from_url("https://github.com/acme/flow-client"), "flow-client");
        assert_eq!(repo_name_from_url("https://github.com/acme/flow-client/"), "flow-client");
        assert_eq!(repo_name_from_url("git@github.com:acme/api.git"), "api");
    }

    #[test]
    fn repo_name_falls_back() {
        assert_eq!(repo_name_from_url(""), "repository");
        assert_eq!(repo_name_from_url("https://"), "repository");
        assert_eq!(repo_name_from_url("/.git"), "repository");
    }

    #[test]
    fn updated_label_buckets() {
        let now = 10_000_000_000.0;
        assert_eq!(updated_label(now - 5_000.0, now), "just now");
        assert_eq!(updated_label(now - 60_000.0, now), "1 minute ago");
        assert_eq!(updated_label(now - 2.0 * 3_600_000.0, now), "2 hours ago");
        assert_eq!(updated_label(now - 3.0 * 86_400_000.0, now), "3 days ago");
        assert_eq!(updated_label(now + 1_000.0, now), "just now");
    }
}
