use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::{ChecklistItem, Scope};
use crate::optimistic::{self, ChecklistState, ListView, Mutation, Ticket};
use crate::services::api::ApiClient;

/// Live view of one checklist plus the actions that mutate it.
#[derive(Clone)]
pub struct UseChecklistHandle {
    state: Rc<RefCell<ChecklistState>>,
    api: ApiClient,
    plan_id: String,
    trigger: UseForceUpdateHandle,
}

impl UseChecklistHandle {
    pub fn items(&self) -> Vec<ChecklistItem> {
        self.state.borrow().items().to_vec()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error().map(str::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.state.borrow().is_pending(id)
    }

    pub fn dismiss_error(&self) {
        self.state.borrow_mut().dismiss_error();
        self.trigger.force_update();
    }

    /// Apply `mutation` now and send it in the background. Returns whether
    /// the mutation was accepted locally.
    pub fn mutate(&self, mutation: Mutation) -> bool {
        self.mutate_with(mutation, None)
    }

    /// Like [`mutate`](Self::mutate), also emitting `on_settled` once the
    /// server answered and the list was confirmed or rolled back.
    pub fn mutate_with(&self, mutation: Mutation, on_settled: Option<Callback<()>>) -> bool {
        let api = self.api.clone();
        let plan_id = self.plan_id.clone();
        let trigger = self.trigger.clone();

        let sent = optimistic::dispatch(
            &self.state,
            mutation,
            move |ticket: &Ticket| {
                let ticket = ticket.clone();
                async move { api.send_item_request(&plan_id, &ticket).await }
            },
            move || trigger.force_update(),
        );

        match sent {
            Ok(settle) => {
                spawn_local(async move {
                    settle.await;
                    if let Some(cb) = on_settled {
                        cb.emit(());
                    }
                });
                true
            }
            Err(e) => {
                log::warn!("[Checklist] rejected: {}", e);
                self.state.borrow_mut().set_error(e.to_string());
                self.trigger.force_update();
                false
            }
        }
    }
}

/// Load the `scope` checklist of `plan_id` and keep it in optimistic state.
/// Changing `reload` refetches.
#[hook]
pub fn use_checklist(api: ApiClient, plan_id: String, scope: Scope, view: ListView, reload: u32) -> UseChecklistHandle {
    let state = use_mut_ref(|| ChecklistState::new(scope, view));
    let generation = use_mut_ref(|| 0u32);
    let trigger = use_force_update();

    {
        let state = state.clone();
        let generation = generation.clone();
        let trigger = trigger.clone();
        use_effect_with((api.clone(), plan_id.clone(), reload), move |(api, plan_id, _)| {
            let current = {
                let mut g = generation.borrow_mut();
                *g += 1;
                *g
            };
            state.borrow_mut().begin_loading();

            let api = api.clone();
            let plan_id = plan_id.clone();
            spawn_local(async move {
                let result = match view {
                    ListView::Active => api.list_checklist(&plan_id, scope, false).await,
                    ListView::Archived => api.list_archived(&plan_id, scope).await,
                };
                if *generation.borrow() != current {
                    log::debug!("[Checklist] dropping superseded {} load", scope.as_str());
                    return;
                }
                match result {
                    Ok(items) => state.borrow_mut().load(items),
                    Err(e) => {
                        log::error!("[Checklist] failed to load {} items for {}: {}", scope.as_str(), plan_id, e);
                        state.borrow_mut().load_failed();
                    }
                }
                trigger.force_update();
            });
            || ()
        });
    }

    UseChecklistHandle {
        state,
        api,
        plan_id,
        trigger,
    }
}
