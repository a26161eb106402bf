//! Optimistic checklist state.
//!
//! Every mutation is applied to the local list first and handed back as a
//! [`Ticket`] describing the request to send. When the response arrives the
//! ticket is settled: success keeps (or refines) the local change, failure
//! restores the last state the server is known to agree with.
//!
//! Per item the engine keeps one [`InFlight`] record holding that
//! last-known-good snapshot, the newest ticket, and the state each
//! outstanding ticket produced. Only the newest ticket may change what the
//! user sees; an older response merely moves the snapshot (on success) or is
//! dropped (on failure). This makes rapid repeated edits last-request-wins.

use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::MutationError;
use crate::lifecycle::{Lifecycle, MutationKind};
use crate::models::{ChecklistItem, Scope};
use crate::services::envelope::WriteOutcome;

pub const LOAD_FAILED: &str = "Failed to load tasks. Please try again later.";

/// Which items a list holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    Active,
    Archived,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { description: String },
    Toggle { id: String },
    Edit { id: String, description: String },
    Schedule { id: String, at: Option<DateTime<Utc>> },
    Archive { id: String },
    Delete { id: String },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create { .. } => MutationKind::Create,
            Mutation::Toggle { .. } => MutationKind::Toggle,
            Mutation::Edit { .. } => MutationKind::Edit,
            Mutation::Schedule { .. } => MutationKind::Schedule,
            Mutation::Archive { .. } => MutationKind::Archive,
            Mutation::Delete { .. } => MutationKind::Delete,
        }
    }
}

/// Body of `PATCH .../checklists/{itemId}`.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

/// The HTTP call a ticket stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemRequest {
    Create { description: String },
    Update { item_id: String, patch: ItemPatch },
    Schedule { item_id: String, scheduled_time: Option<DateTime<Utc>> },
    Archive { item_id: String },
    Delete { item_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub seq: u64,
    pub kind: MutationKind,
    /// Id the item had when the mutation was applied (temporary for creates).
    pub item_id: String,
    pub scope: Scope,
    pub request: ItemRequest,
}

/// Position and value of an item, or `None` when it is not in the list.
type Slot = Option<(usize, ChecklistItem)>;

#[derive(Debug)]
struct InFlight {
    confirmed: Slot,
    latest: u64,
    outcomes: HashMap<u64, Slot>,
}

#[derive(Debug)]
pub struct ChecklistState {
    scope: Scope,
    view: ListView,
    items: Vec<ChecklistItem>,
    /// Ids in the order the server last agreed on, pending creates appended.
    order: Vec<String>,
    in_flight: HashMap<String, InFlight>,
    next_seq: u64,
    loading: bool,
    error: Option<String>,
}

impl ChecklistState {
    pub fn new(scope: Scope, view: ListView) -> Self {
        Self {
            scope,
            view,
            items: Vec::new(),
            order: Vec::new(),
            in_flight: HashMap::new(),
            next_seq: 1,
            loading: true,
            error: None,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.in_flight.contains_key(id)
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Replace the list with a fresh server listing. Items of another scope
    /// or archive state are dropped; outstanding tickets become stale.
    pub fn load(&mut self, items: Vec<ChecklistItem>) {
        let scope = self.scope;
        let want_archived = self.view == ListView::Archived;
        self.items = items
            .into_iter()
            .map(|mut item| {
                item.scope.get_or_insert(scope);
                item
            })
            .filter(|item| item.scope == Some(scope) && item.archived == want_archived)
            .collect();
        self.order = self.items.iter().map(|i| i.id.clone()).collect();
        self.in_flight.clear();
        self.loading = false;
        self.error = None;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
        self.error = Some(LOAD_FAILED.to_string());
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    fn slot(&self, id: &str) -> Slot {
        self.position(id).map(|idx| (idx, self.items[idx].clone()))
    }

    /// Apply `mutation` locally and return the ticket for the request.
    /// Nothing changes when an error is returned.
    pub fn apply(&mut self, mutation: Mutation) -> Result<Ticket, MutationError> {
        let kind = mutation.kind();

        match mutation {
            Mutation::Create { description } => {
                let description = non_empty(&description)?;
                let item = ChecklistItem::placeholder(description.clone(), self.scope);
                let id = item.id.clone();
                self.items.push(item);
                self.order.push(id.clone());
                Ok(self.record(kind, id, None, ItemRequest::Create { description }))
            }
            Mutation::Toggle { id } => {
                let (idx, before) = self.target(&id, kind)?;
                let item = &mut self.items[idx];
                item.done = !item.done;
                let patch = ItemPatch { done: Some(item.done), ..Default::default() };
                let request = ItemRequest::Update { item_id: id.clone(), patch };
                Ok(self.record(kind, id, before, request))
            }
            Mutation::Edit { id, description } => {
                let (idx, before) = self.target(&id, kind)?;
                let description = non_empty(&description)?;
                self.items[idx].description = description.clone();
                let patch = ItemPatch { description: Some(description), ..Default::default() };
                let request = ItemRequest::Update { item_id: id.clone(), patch };
                Ok(self.record(kind, id, before, request))
            }
            Mutation::Schedule { id, at } => {
                let (idx, before) = self.target(&id, kind)?;
                self.items[idx].scheduled_time = at;
                let request = ItemRequest::Schedule { item_id: id.clone(), scheduled_time: at };
                Ok(self.record(kind, id, before, request))
            }
            Mutation::Archive { id } => {
                let (idx, before) = self.target(&id, kind)?;
                self.items.remove(idx);
                let request = ItemRequest::Archive { item_id: id.clone() };
                Ok(self.record(kind, id, before, request))
            }
            Mutation::Delete { id } => {
                let (idx, before) = self.target(&id, kind)?;
                self.items.remove(idx);
                let request = ItemRequest::Delete { item_id: id.clone() };
                Ok(self.record(kind, id, before, request))
            }
        }
    }

    /// Index and snapshot of an existing, confirmed item `kind` may act on.
    fn target(&self, id: &str, kind: MutationKind) -> Result<(usize, Slot), MutationError> {
        let idx = self.position(id).ok_or_else(|| MutationError::UnknownItem(id.to_string()))?;
        let item = &self.items[idx];
        if item.has_temp_id() {
            return Err(MutationError::PendingCreate(id.to_string()));
        }
        Lifecycle::of(item).apply(kind)?;
        Ok((idx, Some((idx, item.clone()))))
    }

    fn record(&mut self, kind: MutationKind, id: String, before: Slot, request: ItemRequest) -> Ticket {
        let seq = self.next_seq;
        self.next_seq += 1;
        let after = self.slot(&id);

        let entry = self.in_flight.entry(id.clone()).or_insert_with(|| InFlight {
            confirmed: before,
            latest: seq,
            outcomes: HashMap::new(),
        });
        entry.latest = seq;
        entry.outcomes.insert(seq, after);
        self.error = None;

        log::debug!("[Checklist] applied {} #{} on {}", kind, seq, id);
        Ticket { seq, kind, item_id: id, scope: self.scope, request }
    }

    /// Settle a ticket with the server's answer.
    pub fn settle(&mut self, ticket: &Ticket, outcome: WriteOutcome<Option<ChecklistItem>>) {
        match outcome {
            WriteOutcome::Success(None) if ticket.kind == MutationKind::Create => {
                log::warn!("[Checklist] create #{} succeeded without an item", ticket.seq);
                self.reject(ticket);
            }
            WriteOutcome::Success(server) => self.confirm(ticket, server),
            WriteOutcome::Failure => self.reject(ticket),
        }
    }

    fn confirm(&mut self, ticket: &Ticket, server: Option<ChecklistItem>) {
        let Some(entry) = self.in_flight.get_mut(&ticket.item_id) else {
            log::debug!("[Checklist] ignoring stale success #{}", ticket.seq);
            return;
        };

        if entry.latest != ticket.seq {
            // Superseded: the server state moved but the screen already shows newer intent.
            if let Some(outcome) = entry.outcomes.remove(&ticket.seq) {
                entry.confirmed = outcome;
            }
            return;
        }
        self.in_flight.remove(&ticket.item_id);

        let server = server.map(|mut item| {
            item.scope.get_or_insert(self.scope);
            item
        });
        match ticket.kind {
            MutationKind::Archive | MutationKind::Delete => self.forget(&ticket.item_id),
            MutationKind::Create | MutationKind::Toggle | MutationKind::Edit | MutationKind::Schedule => {
                let Some(server) = server else { return };
                if ticket.kind == MutationKind::Create {
                    if let Some(slot) = self.order.iter_mut().find(|id| **id == ticket.item_id) {
                        *slot = server.id.clone();
                    }
                }
                if let Some(idx) = self.position(&ticket.item_id) {
                    log::debug!("[Checklist] confirmed #{} as {}", ticket.seq, server.id);
                    self.items[idx] = server;
                }
            }
        }
    }

    fn forget(&mut self, id: &str) {
        self.order.retain(|known| known != id);
    }

    fn reject(&mut self, ticket: &Ticket) {
        let Some(entry) = self.in_flight.get_mut(&ticket.item_id) else {
            log::debug!("[Checklist] ignoring stale failure #{}", ticket.seq);
            return;
        };

        if entry.latest != ticket.seq {
            entry.outcomes.remove(&ticket.seq);
            return;
        }
        let confirmed = entry.confirmed.take();
        self.in_flight.remove(&ticket.item_id);
        self.restore(&ticket.item_id, confirmed);
        if ticket.kind == MutationKind::Create {
            self.forget(&ticket.item_id);
        }

        log::warn!("[Checklist] {} #{} failed, rolled back {}", ticket.kind, ticket.seq, ticket.item_id);
        self.error = Some(ticket.kind.failure_message().to_string());
    }

    fn restore(&mut self, id: &str, slot: Slot) {
        match (self.position(id), slot) {
            (Some(pos), Some((_, item))) => self.items[pos] = item,
            (Some(pos), None) => {
                self.items.remove(pos);
            }
            (None, Some((idx, item))) => {
                let idx = self.reinsert_index(id).unwrap_or(idx).min(self.items.len());
                self.items.insert(idx, item);
            }
            (None, None) => {}
        }
    }

    /// Where `id` goes back in: right after the closest earlier item in
    /// `order` that is still on screen, or first when there is none.
    fn reinsert_index(&self, id: &str) -> Option<usize> {
        let rank = self.order.iter().position(|known| known == id)?;
        let after = self.order[..rank]
            .iter()
            .rev()
            .find_map(|earlier| self.position(earlier));
        Some(after.map_or(0, |pos| pos + 1))
    }
}

fn non_empty(description: &str) -> Result<String, MutationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        Err(MutationError::EmptyDescription)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Apply `mutation`, then return the future that sends it and settles the
/// ticket. `notify` runs after the local change and again after settling.
pub fn dispatch<S, Fut, N>(
    state: &Rc<RefCell<ChecklistState>>,
    mutation: Mutation,
    send: S,
    notify: N,
) -> Result<impl Future<Output = ()>, MutationError>
where
    S: FnOnce(&Ticket) -> Fut,
    Fut: Future<Output = WriteOutcome<Option<ChecklistItem>>> + 'static,
    N: Fn() + 'static,
{
    let ticket = state.borrow_mut().apply(mutation)?;
    notify();
    let response = send(&ticket);
    let state = Rc::clone(state);
    Ok(async move {
        let outcome = response.await;
        state.borrow_mut().settle(&ticket, outcome);
        notify();
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::ready;
    use futures_util::FutureExt;
    use std::cell::Cell;

    fn item(id: &str, description: &str, scope: Scope) -> ChecklistItem {
        ChecklistItem {
            id: id.to_string(),
            description: description.to_string(),
            done: false,
            scheduled_time: None,
            scope: Some(scope),
            archived: false,
        }
    }

    fn loaded(items: Vec<ChecklistItem>) -> ChecklistState {
        let mut state = ChecklistState::new(Scope::Daily, ListView::Active);
        state.load(items);
        state
    }

    fn three() -> ChecklistState {
        loaded(vec![
            item("1", "Complete hooks tutorial", Scope::Daily),
            item("2", "Review types", Scope::Daily),
            item("3", "Practice CSS", Scope::Daily),
        ])
    }

    #[test]
    fn create_buy_milk_gets_server_id() {
        let mut state = loaded(vec![]);
        let ticket = state.apply(Mutation::Create { description: "Buy milk".into() }).unwrap();

        assert_eq!(state.items().len(), 1);
        assert!(state.items()[0].has_temp_id());
        assert_eq!(state.items()[0].id, ticket.item_id);
        assert!(state.is_pending(&ticket.item_id));
        assert_eq!(ticket.request, ItemRequest::Create { description: "Buy milk".into() });

        let server = ChecklistItem { scope: None, ..item("srv-9", "Buy milk", Scope::Daily) };
        state.settle(&ticket, WriteOutcome::Success(Some(server)));

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id, "srv-9");
        assert_eq!(state.items()[0].description, "Buy milk");
        assert_eq!(state.items()[0].scope, Some(Scope::Daily));
        assert!(!state.is_pending(&ticket.item_id));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn create_keeps_list_position() {
        let mut state = three();
        let ticket = state.apply(Mutation::Create { description: "  Fourth  ".into() }).unwrap();
        assert_eq!(state.items()[3].description, "Fourth");

        state.settle(&ticket, WriteOutcome::Success(Some(item("4", "Fourth", Scope::Daily))));
        let ids: Vec<_> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn failed_create_restores_previous_list() {
        let mut state = three();
        let before = state.items().to_vec();
        let ticket = state.apply(Mutation::Create { description: "Doomed".into() }).unwrap();
        state.settle(&ticket, WriteOutcome::Failure);

        assert_eq!(state.items(), &before[..]);
        assert_eq!(state.error(), Some("Failed to add task. Please try again."));
    }

    #[test]
    fn create_without_payload_is_rolled_back() {
        let mut state = loaded(vec![]);
        let ticket = state.apply(Mutation::Create { description: "x".into() }).unwrap();
        state.settle(&ticket, WriteOutcome::Success(None));
        assert!(state.items().is_empty());
        assert!(state.error().is_some());
    }

    #[test]
    fn failed_toggle_edit_schedule_restore_fields() {
        let when: DateTime<Utc> = "2024-05-01T10:00:00Z".parse().unwrap();
        let mutations = [
            (Mutation::Toggle { id: "2".into() }, "Failed to update task status. Please try again."),
            (Mutation::Edit { id: "2".into(), description: "Changed".into() }, "Failed to update task. Please try again."),
            (Mutation::Schedule { id: "2".into(), at: Some(when) }, "Failed to schedule task. Please try again."),
        ];
        for (mutation, message) in mutations {
            let mut state = three();
            let before = state.items().to_vec();
            let ticket = state.apply(mutation).unwrap();
            assert_ne!(state.items(), &before[..]);

            state.settle(&ticket, WriteOutcome::Failure);
            assert_eq!(state.items(), &before[..]);
            assert_eq!(state.error(), Some(message));
        }
    }

    #[test]
    fn failed_archive_and_delete_restore_membership_and_position() {
        for mutation in [Mutation::Archive { id: "2".into() }, Mutation::Delete { id: "2".into() }] {
            let mut state = three();
            let before = state.items().to_vec();
            let ticket = state.apply(mutation).unwrap();
            assert_eq!(state.items().len(), 2);
            assert!(state.items().iter().all(|i| i.id != "2"));

            state.settle(&ticket, WriteOutcome::Failure);
            assert_eq!(state.items(), &before[..]);
        }
    }

    fn ids(state: &ChecklistState) -> Vec<&str> {
        state.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn overlapping_failed_deletes_keep_original_order() {
        // Failures arriving in request order and in reverse order.
        for reverse in [false, true] {
            let mut state = three();
            let first = state.apply(Mutation::Delete { id: "1".into() }).unwrap();
            let second = state.apply(Mutation::Delete { id: "2".into() }).unwrap();
            assert_eq!(ids(&state), ["3"]);

            let (a, b) = if reverse { (&second, &first) } else { (&first, &second) };
            state.settle(a, WriteOutcome::Failure);
            state.settle(b, WriteOutcome::Failure);
            assert_eq!(ids(&state), ["1", "2", "3"]);
        }
    }

    #[test]
    fn failed_archive_lands_next_to_surviving_neighbour() {
        let mut state = loaded(vec![
            item("1", "a", Scope::Daily),
            item("2", "b", Scope::Daily),
            item("3", "c", Scope::Daily),
            item("4", "d", Scope::Daily),
        ]);
        let archive = state.apply(Mutation::Archive { id: "3".into() }).unwrap();
        let delete = state.apply(Mutation::Delete { id: "1".into() }).unwrap();
        state.settle(&delete, WriteOutcome::Success(None));
        assert_eq!(ids(&state), ["2", "4"]);

        state.settle(&archive, WriteOutcome::Failure);
        assert_eq!(ids(&state), ["2", "3", "4"]);
    }

    #[test]
    fn failed_delete_after_confirmed_create_uses_server_id() {
        let mut state = three();
        let create = state.apply(Mutation::Create { description: "d".into() }).unwrap();
        state.settle(&create, WriteOutcome::Success(Some(item("4", "d", Scope::Daily))));

        let gone_3 = state.apply(Mutation::Delete { id: "3".into() }).unwrap();
        let gone_4 = state.apply(Mutation::Delete { id: "4".into() }).unwrap();
        state.settle(&gone_3, WriteOutcome::Failure);
        state.settle(&gone_4, WriteOutcome::Failure);
        assert_eq!(ids(&state), ["1", "2", "3", "4"]);
    }

    #[test]
    fn deleted_item_reappears_identical() {
        let mut state = three();
        state.items[1].done = true;
        let original = state.items()[1].clone();

        let ticket = state.apply(Mutation::Delete { id: "2".into() }).unwrap();
        assert_eq!(ticket.request, ItemRequest::Delete { item_id: "2".into() });
        state.settle(&ticket, WriteOutcome::Failure);

        assert_eq!(state.items()[1], original);
        assert_eq!(state.error(), Some("Failed to delete task. Please try again."));
    }

    #[test]
    fn successful_archive_and_delete_stay_removed() {
        let mut state = three();
        let a = state.apply(Mutation::Archive { id: "1".into() }).unwrap();
        let d = state.apply(Mutation::Delete { id: "3".into() }).unwrap();
        state.settle(&a, WriteOutcome::Success(None));
        state.settle(&d, WriteOutcome::Success(None));
        let ids: Vec<_> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["2"]);
        assert!(!state.is_pending("1") && !state.is_pending("3"));
    }

    #[test]
    fn toggle_twice_returns_to_original() {
        let mut state = three();
        let original = state.items()[0].done;

        let first = state.apply(Mutation::Toggle { id: "1".into() }).unwrap();
        assert_eq!(
            first.request,
            ItemRequest::Update { item_id: "1".into(), patch: ItemPatch { done: Some(!original), description: None } }
        );
        state.settle(&first, WriteOutcome::Success(None));
        let second = state.apply(Mutation::Toggle { id: "1".into() }).unwrap();
        state.settle(&second, WriteOutcome::Success(None));

        assert_eq!(state.items()[0].done, original);
    }

    #[test]
    fn server_copy_replaces_local_on_success() {
        let mut state = three();
        let ticket = state.apply(Mutation::Edit { id: "1".into(), description: "draft".into() }).unwrap();
        state.settle(&ticket, WriteOutcome::Success(Some(item("1", "Draft (normalized)", Scope::Daily))));
        assert_eq!(state.items()[0].description, "Draft (normalized)");
    }

    #[test]
    fn stale_response_does_not_override_newer_edit() {
        let mut state = three();
        let a = state.apply(Mutation::Edit { id: "1".into(), description: "A".into() }).unwrap();
        let b = state.apply(Mutation::Edit { id: "1".into(), description: "B".into() }).unwrap();

        // Older answer arrives last-ish and carries its own copy: ignored for display.
        state.settle(&a, WriteOutcome::Success(Some(item("1", "A", Scope::Daily))));
        assert_eq!(state.items()[0].description, "B");

        // Newer one fails: roll back to what the server confirmed, i.e. "A".
        state.settle(&b, WriteOutcome::Failure);
        assert_eq!(state.items()[0].description, "A");
    }

    #[test]
    fn superseded_failure_is_dropped() {
        let mut state = three();
        let a = state.apply(Mutation::Toggle { id: "1".into() }).unwrap();
        let b = state.apply(Mutation::Toggle { id: "1".into() }).unwrap();
        state.settle(&a, WriteOutcome::Failure);
        assert_eq!(state.error(), None);
        assert!(!state.items()[0].done);

        state.settle(&b, WriteOutcome::Failure);
        assert!(!state.items()[0].done);
        assert!(!state.is_pending("1"));
    }

    #[test]
    fn rejected_mutations_change_nothing() {
        let mut state = three();
        let before = state.items().to_vec();

        assert_eq!(state.apply(Mutation::Create { description: "   ".into() }), Err(MutationError::EmptyDescription));
        assert_eq!(
            state.apply(Mutation::Edit { id: "1".into(), description: "".into() }),
            Err(MutationError::EmptyDescription)
        );
        assert_eq!(state.apply(Mutation::Toggle { id: "nope".into() }), Err(MutationError::UnknownItem("nope".into())));

        let pending = state.apply(Mutation::Create { description: "new".into() }).unwrap();
        assert_eq!(
            state.apply(Mutation::Toggle { id: pending.item_id.clone() }),
            Err(MutationError::PendingCreate(pending.item_id.clone()))
        );
        state.settle(&pending, WriteOutcome::Failure);
        assert_eq!(state.items(), &before[..]);
    }

    #[test]
    fn load_filters_scope_and_archived() {
        let mut state = ChecklistState::new(Scope::Longterm, ListView::Active);
        let mut archived = item("2", "old", Scope::Longterm);
        archived.archived = true;
        let unscoped = ChecklistItem { scope: None, ..item("4", "no scope", Scope::Daily) };
        state.load(vec![
            item("1", "goal", Scope::Longterm),
            archived,
            item("3", "today", Scope::Daily),
            unscoped,
        ]);

        let ids: Vec<_> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["1", "4"]);
        assert!(state.items().iter().all(|i| i.scope == Some(Scope::Longterm) && !i.archived));
        assert!(!state.is_loading());
    }

    #[test]
    fn archived_view_only_allows_delete() {
        let mut state = ChecklistState::new(Scope::Daily, ListView::Archived);
        let mut old = item("9", "shelved", Scope::Daily);
        old.archived = true;
        state.load(vec![old, item("1", "live", Scope::Daily)]);
        assert_eq!(state.items().len(), 1);

        assert!(matches!(state.apply(Mutation::Toggle { id: "9".into() }), Err(MutationError::Lifecycle(_))));
        assert!(state.apply(Mutation::Delete { id: "9".into() }).is_ok());
        assert!(state.items().is_empty());
    }

    #[test]
    fn reload_drops_in_flight_tickets() {
        let mut state = three();
        let ticket = state.apply(Mutation::Delete { id: "1".into() }).unwrap();
        state.load(vec![item("1", "Complete hooks tutorial", Scope::Daily)]);
        state.settle(&ticket, WriteOutcome::Failure);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn load_failure_surfaces_message() {
        let mut state = ChecklistState::new(Scope::Daily, ListView::Active);
        assert!(state.is_loading());
        state.load_failed();
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some(LOAD_FAILED));
    }

    #[test]
    fn dispatch_applies_before_sending_and_settles_after() {
        let state = Rc::new(RefCell::new(three()));
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);

        let fut = dispatch(
            &state,
            Mutation::Delete { id: "3".into() },
            |ticket| {
                assert_eq!(ticket.kind, MutationKind::Delete);
                ready(WriteOutcome::<Option<ChecklistItem>>::Failure)
            },
            move || counter.set(counter.get() + 1),
        )
        .unwrap();

        assert_eq!(state.borrow().items().len(), 2);
        assert_eq!(renders.get(), 1);

        assert!(fut.now_or_never().is_some());
        assert_eq!(state.borrow().items().len(), 3);
        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn dispatch_refuses_invalid_mutation_without_rendering() {
        let state = Rc::new(RefCell::new(three()));
        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        let result = dispatch(
            &state,
            Mutation::Create { description: "".into() },
            |_| ready(WriteOutcome::<Option<ChecklistItem>>::Success(None)),
            move || counter.set(counter.get() + 1),
        );
        assert!(matches!(result, Err(MutationError::EmptyDescription)));
        assert_eq!(renders.get(), 0);
    }
}
