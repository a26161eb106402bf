use yew::prelude::*;

use crate::context::use_app;
use crate::hooks::use_checklist;
use crate::models::Scope;
use crate::optimistic::{ListView, Mutation};

#[derive(Properties, PartialEq, Clone)]
pub struct ArchivedListProps {
    pub plan_id: String,
    pub scope: Scope,
    /// Bumped by the parent after something was archived.
    pub reload: u32,
}

#[function_component(ArchivedList)]
pub fn archived_list(props: &ArchivedListProps) -> Html {
    let ctx = use_app();
    let list = use_checklist(ctx.api.clone(), props.plan_id.clone(), props.scope, ListView::Archived, props.reload);

    let on_dismiss = {
        let list = list.clone();
        Callback::from(move |_: MouseEvent| list.dismiss_error())
    };

    let items = list.items();

    html! {
        <div>
            <h3 style="font-size: 0.95rem; margin: 0 0 8px 0;">{ props.scope.title() }</h3>
            if let Some(error) = list.error() {
                <div class="banner banner-error" style="margin-bottom: 8px;">
                    <span>{ error }</span>
                    <button class="btn-icon" title="Dismiss" onclick={on_dismiss}>{ "×" }</button>
                </div>
            }
            if list.is_loading() {
                <div class="muted">{ "Loading..." }</div>
            } else if items.is_empty() {
                <p class="muted">{ "Nothing archived." }</p>
            } else {
                <ul class="task-list">
                    { for items.iter().map(|item| {
                        let pending = list.is_pending(&item.id);
                        let on_delete = {
                            let list = list.clone();
                            let id = item.id.clone();
                            Callback::from(move |_: MouseEvent| {
                                list.mutate(Mutation::Delete { id: id.clone() });
                            })
                        };
                        html! {
                            <li key={item.id.clone()} class={classes!("task-row", pending.then_some("pending"))}>
                                <span class={classes!("task-text", item.done.then_some("done"))}>{ &item.description }</span>
                                <button class="btn-icon" title="Delete permanently" onclick={on_delete} disabled={pending}>{ "🗑" }</button>
                            </li>
                        }
                    }) }
                </ul>
            }
        </div>
    }
}
