use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::context::use_app;
use crate::hooks::use_checklist;
use crate::models::{ChecklistItem, Scope, Suggestion};
use crate::optimistic::{ListView, Mutation};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Value of a `datetime-local` input, read as local time.
pub fn parse_schedule_input(value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), INPUT_FORMAT).ok()?;
    Local.from_local_datetime(&naive).earliest().map(|t| t.with_timezone(&Utc))
}

pub fn schedule_input_value(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(INPUT_FORMAT).to_string()
}

pub fn format_scheduled(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%b %-d, %H:%M").to_string()
}

#[derive(Properties, PartialEq, Clone)]
pub struct TaskListProps {
    pub plan_id: String,
    pub scope: Scope,
    /// Emitted once an archive request settled.
    #[prop_or_default]
    pub on_archived: Option<Callback<()>>,
    #[prop_or(true)]
    pub show_suggestions: bool,
}

#[derive(Clone, PartialEq)]
enum Editing {
    None,
    Text { id: String, draft: String },
    Schedule { id: String, draft: String },
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    let ctx = use_app();
    let list = use_checklist(ctx.api.clone(), props.plan_id.clone(), props.scope, ListView::Active, 0);
    let new_task = use_state(String::new);
    let editing = use_state(|| Editing::None);
    let suggestions = use_state(Vec::<Suggestion>::new);
    let suggesting = use_state(|| false);
    let suggest_error = use_state(|| None::<String>);

    let on_new_input = {
        let new_task = new_task.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_task.set(input.value());
        })
    };

    let on_add = {
        let list = list.clone();
        let new_task = new_task.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if new_task.trim().is_empty() {
                return;
            }
            if list.mutate(Mutation::Create { description: (*new_task).clone() }) {
                new_task.set(String::new());
            }
        })
    };

    let on_suggest = {
        let api = ctx.api.clone();
        let plan_id = props.plan_id.clone();
        let scope = props.scope;
        let suggestions = suggestions.clone();
        let suggesting = suggesting.clone();
        let suggest_error = suggest_error.clone();
        Callback::from(move |_: MouseEvent| {
            let api = api.clone();
            let plan_id = plan_id.clone();
            let suggestions = suggestions.clone();
            let suggesting = suggesting.clone();
            let suggest_error = suggest_error.clone();
            suggesting.set(true);
            suggest_error.set(None);
            spawn_local(async move {
                match api.checklist_suggestions(&plan_id, scope).await {
                    Ok(list) => suggestions.set(list),
                    Err(e) => {
                        log::error!("[Suggestions] {} for {} failed: {}", scope.as_str(), plan_id, e);
                        suggest_error.set(Some("Could not fetch suggestions right now.".to_string()));
                    }
                }
                suggesting.set(false);
            });
        })
    };

    let on_pick_suggestion = {
        let list = list.clone();
        let suggestions = suggestions.clone();
        Callback::from(move |description: String| {
            if list.mutate(Mutation::Create { description: description.clone() }) {
                suggestions.set(suggestions.iter().filter(|s| s.description != description).cloned().collect());
            }
        })
    };

    let on_dismiss = {
        let list = list.clone();
        Callback::from(move |_: MouseEvent| list.dismiss_error())
    };

    let css = r#"
        .task-form { display: flex; gap: 8px; margin-bottom: 16px; }
        .task-form .form-input { margin-bottom: 0; flex: 1; }
        .task-list { list-style: none; margin: 0; padding: 0; display: flex; flex-direction: column; gap: 10px; }
        .task-row { display: flex; align-items: center; justify-content: space-between; gap: 8px; }
        .task-row.pending { opacity: 0.55; }
        .task-main { display: flex; align-items: center; gap: 10px; min-width: 0; flex: 1; }
        .task-main input[type=checkbox] { accent-color: var(--accent-color); width: 16px; height: 16px; }
        .task-text { font-size: 0.9rem; cursor: text; overflow-wrap: anywhere; }
        .task-text.done { text-decoration: line-through; opacity: 0.7; }
        .task-when { font-size: 0.75rem; color: var(--accent-color); white-space: nowrap; }
        .task-actions { display: flex; gap: 2px; opacity: 0; transition: opacity 0.2s; }
        .task-row:hover .task-actions { opacity: 1; }
        .task-inline { display: flex; gap: 6px; flex: 1; }
        .task-inline .form-input { margin-bottom: 0; padding: 4px 8px; }
        .suggestions { margin-top: 16px; border-top: 1px dashed var(--border-color); padding-top: 12px; display: flex; flex-wrap: wrap; gap: 6px; align-items: center; }
        .chip { border: 1px solid var(--border-color); border-radius: 999px; padding: 4px 10px; font-size: 0.8rem; background: transparent; color: inherit; cursor: pointer; }
        .chip:hover { border-color: var(--accent-color); color: var(--accent-color); }
    "#;

    let render_item = |item: &ChecklistItem| -> Html {
        let id = item.id.clone();
        let pending = list.is_pending(&id);

        let on_toggle = {
            let list = list.clone();
            let id = id.clone();
            Callback::from(move |_: Event| {
                list.mutate(Mutation::Toggle { id: id.clone() });
            })
        };
        let on_delete = {
            let list = list.clone();
            let id = id.clone();
            Callback::from(move |_: MouseEvent| {
                list.mutate(Mutation::Delete { id: id.clone() });
            })
        };
        let on_archive = {
            let list = list.clone();
            let id = id.clone();
            let on_archived = props.on_archived.clone();
            Callback::from(move |_: MouseEvent| {
                list.mutate_with(Mutation::Archive { id: id.clone() }, on_archived.clone());
            })
        };
        let start_edit = {
            let editing = editing.clone();
            let id = id.clone();
            let draft = item.description.clone();
            Callback::from(move |_: MouseEvent| editing.set(Editing::Text { id: id.clone(), draft: draft.clone() }))
        };
        let start_schedule = {
            let editing = editing.clone();
            let id = id.clone();
            let draft = item.scheduled_time.as_ref().map(schedule_input_value).unwrap_or_default();
            Callback::from(move |_: MouseEvent| editing.set(Editing::Schedule { id: id.clone(), draft: draft.clone() }))
        };

        let body = match &*editing {
            Editing::Text { id: editing_id, draft } if *editing_id == id => {
                let on_input = {
                    let editing = editing.clone();
                    let id = id.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        editing.set(Editing::Text { id: id.clone(), draft: input.value() });
                    })
                };
                let on_save = {
                    let list = list.clone();
                    let editing = editing.clone();
                    let id = id.clone();
                    let draft = draft.clone();
                    Callback::from(move |e: SubmitEvent| {
                        e.prevent_default();
                        if list.mutate(Mutation::Edit { id: id.clone(), description: draft.clone() }) {
                            editing.set(Editing::None);
                        }
                    })
                };
                let on_cancel = {
                    let editing = editing.clone();
                    Callback::from(move |_: MouseEvent| editing.set(Editing::None))
                };
                html! {
                    <form class="task-inline" onsubmit={on_save}>
                        <input class="form-input" type="text" value={draft.clone()} oninput={on_input} />
                        <button class="btn" type="submit">{ "Save" }</button>
                        <button class="btn" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                    </form>
                }
            }
            Editing::Schedule { id: editing_id, draft } if *editing_id == id => {
                let on_input = {
                    let editing = editing.clone();
                    let id = id.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        editing.set(Editing::Schedule { id: id.clone(), draft: input.value() });
                    })
                };
                let on_save = {
                    let list = list.clone();
                    let editing = editing.clone();
                    let id = id.clone();
                    let draft = draft.clone();
                    Callback::from(move |e: SubmitEvent| {
                        e.prevent_default();
                        let at = parse_schedule_input(&draft);
                        if list.mutate(Mutation::Schedule { id: id.clone(), at }) {
                            editing.set(Editing::None);
                        }
                    })
                };
                let on_cancel = {
                    let editing = editing.clone();
                    Callback::from(move |_: MouseEvent| editing.set(Editing::None))
                };
                html! {
                    <form class="task-inline" onsubmit={on_save}>
                        <span class="task-text">{ &item.description }</span>
                        <input class="form-input" type="datetime-local" value={draft.clone()} oninput={on_input} style="width: auto;" />
                        <button class="btn" type="submit" title="Empty clears the schedule">{ "Set" }</button>
                        <button class="btn" type="button" onclick={on_cancel}>{ "Cancel" }</button>
                    </form>
                }
            }
            _ => html! {
                <>
                    <div class="task-main">
                        <input type="checkbox" id={format!("todo-{}", id)} checked={item.done} onchange={on_toggle} disabled={pending} />
                        <span class={classes!("task-text", item.done.then_some("done"))} ondblclick={start_edit.clone()}>
                            { &item.description }
                        </span>
                        if let Some(at) = &item.scheduled_time {
                            <span class="task-when">{ format!("⏰ {}", format_scheduled(at)) }</span>
                        }
                    </div>
                    if !pending {
                        <div class="task-actions">
                            <button class="btn-icon" title="Edit" onclick={start_edit}>{ "✎" }</button>
                            <button class="btn-icon" title="Schedule" onclick={start_schedule}>{ "⏰" }</button>
                            <button class="btn-icon" title="Archive" onclick={on_archive}>{ "🗄" }</button>
                            <button class="btn-icon" title="Delete" onclick={on_delete}>{ "🗑" }</button>
                        </div>
                    }
                </>
            },
        };

        html! {
            <li key={item.id.clone()} class={classes!("task-row", pending.then_some("pending"))}>
                { body }
            </li>
        }
    };

    let items = list.items();

    html! {
        <div class="card">
            <style>{ css }</style>
            <h2>{ props.scope.title() }</h2>

            if let Some(error) = list.error() {
                <div class="banner banner-error" style="margin-bottom: 12px;">
                    <span>{ error }</span>
                    <button class="btn-icon" title="Dismiss" onclick={on_dismiss}>{ "×" }</button>
                </div>
            }

            <form class="task-form" onsubmit={on_add}>
                <input
                    class="form-input"
                    type="text"
                    placeholder="Add a new task..."
                    value={(*new_task).clone()}
                    oninput={on_new_input}
                />
                <button class="btn btn-primary" type="submit" disabled={new_task.trim().is_empty()}>{ "Add" }</button>
            </form>

            if list.is_loading() {
                <div class="muted" style="padding: 16px 0;">{ "Loading tasks..." }</div>
            } else if items.is_empty() {
                <p class="muted">{ "No tasks yet. Add one above!" }</p>
            } else {
                <ul class="task-list">
                    { for items.iter().map(render_item) }
                </ul>
            }

            if props.show_suggestions {
                <div class="suggestions">
                    <button class="btn" onclick={on_suggest} disabled={*suggesting}>
                        { if *suggesting { "Thinking..." } else { "✨ Suggest tasks" } }
                    </button>
                    if let Some(e) = &*suggest_error {
                        <span class="muted">{ e }</span>
                    }
                    { for suggestions.iter().map(|s| {
                        let description = s.description.clone();
                        let onclick = on_pick_suggestion.reform(move |_: MouseEvent| description.clone());
                        html! { <button class="chip" title="Add as task" {onclick}>{ format!("+ {}", s.description) }</button> }
                    }) }
                </div>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_input_reads_local_time() {
        let at = parse_schedule_input("2024-05-01T10:30").unwrap();
        assert_eq!(schedule_input_value(&at), "2024-05-01T10:30");
    }

    #[test]
    fn blank_or_garbled_schedule_clears() {
        assert_eq!(parse_schedule_input(""), None);
        assert_eq!(parse_schedule_input("tomorrow"), None);
        assert_eq!(parse_schedule_input("2024-13-01T10:30"), None);
    }
}
