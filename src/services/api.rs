//! REST client for the Flow API.
//!
//! One method per endpoint, one HTTP call per method. Reads return
//! `Result<_, ApiError>`, writes return [`WriteOutcome`] and never fail loudly.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::clean_base_url;
use crate::error::ApiError;
use crate::models::{ChecklistItem, NewPlan, Plan, Scope, Suggestion};
use crate::optimistic::{ItemPatch, ItemRequest, Ticket};
use crate::services::envelope::{decode_read, decode_read_list, decode_write, decode_write_payload, WriteOutcome};

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

#[derive(Serialize)]
struct CreateItemBody<'a> {
    description: &'a str,
    scope: Scope,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleBody {
    scheduled_time: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionPayload {
    List(Vec<Suggestion>),
    Single(Suggestion),
}

fn seg(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn plans_url(base: &str) -> String {
    format!("{}/api/plans", base)
}

fn plan_url(base: &str, plan_id: &str) -> String {
    format!("{}/api/plans/{}", base, seg(plan_id))
}

fn checklists_url(base: &str, plan_id: &str) -> String {
    format!("{}/checklists", plan_url(base, plan_id))
}

fn checklist_list_url(base: &str, plan_id: &str, scope: Scope, archived: bool) -> String {
    format!("{}?scope={}&archived={}", checklists_url(base, plan_id), scope.as_str(), archived)
}

fn archived_list_url(base: &str, plan_id: &str, scope: Scope) -> String {
    format!("{}/archived?scope={}", checklists_url(base, plan_id), scope.as_str())
}

/// `.../checklists/{itemId}[/{action}]?scope=`
fn item_url(base: &str, plan_id: &str, item_id: &str, action: Option<&str>, scope: Scope) -> String {
    let mut url = format!("{}/{}", checklists_url(base, plan_id), seg(item_id));
    if let Some(action) = action {
        url.push('/');
        url.push_str(action);
    }
    format!("{}?scope={}", url, scope.as_str())
}

fn suggestion_url(base: &str, plan_id: &str, scope: Scope) -> String {
    match scope {
        Scope::Daily => format!("{}/api/insights/checklist-suggestion-daily?plan_id={}", base, seg(plan_id)),
        Scope::Longterm => format!(
            "{}/api/insights/checklist-suggestion?plan_id={}&scope={}",
            base,
            seg(plan_id),
            scope.as_str()
        ),
    }
}

fn daily_reset_url(base: &str, plan_id: &str) -> String {
    format!("{}/toggle-daily-reset", plan_url(base, plan_id))
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: clean_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, request: RequestBuilder) -> Result<(u16, String), ApiError> {
        let resp = request.send().await?;
        let status = resp.status().as_u16();
        Ok((status, resp.text().await?))
    }

    async fn read<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let (status, body) = self.fetch(request).await?;
        decode_read(status, &body)
    }

    async fn read_list<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, ApiError> {
        let (status, body) = self.fetch(request).await?;
        decode_read_list(status, &body)
    }

    /// Send a write and hand back `(status, body)`, or `None` when the
    /// request never completed.
    async fn send_write(&self, request: RequestBuilder) -> Option<(u16, String)> {
        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("[Api] write request failed: {}", e);
                return None;
            }
        };
        let status = resp.status().as_u16();
        match resp.text().await {
            Ok(body) => Some((status, body)),
            Err(e) => {
                log::warn!("[Api] could not read write response: {}", e);
                None
            }
        }
    }

    async fn write<T: DeserializeOwned>(&self, request: RequestBuilder) -> WriteOutcome<Option<T>> {
        match self.send_write(request).await {
            Some((status, body)) => decode_write(status, &body),
            None => WriteOutcome::Failure,
        }
    }

    async fn write_payload<T: DeserializeOwned>(&self, request: RequestBuilder) -> WriteOutcome<T> {
        match self.send_write(request).await {
            Some((status, body)) => decode_write_payload(status, &body),
            None => WriteOutcome::Failure,
        }
    }

    // --- plans ---

    pub async fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.read_list(self.client.get(plans_url(&self.base_url))).await
    }

    pub async fn get_plan(&self, plan_id: &str) -> Result<Plan, ApiError> {
        self.read(self.client.get(plan_url(&self.base_url, plan_id))).await
    }

    pub async fn create_plan(&self, plan: &NewPlan) -> WriteOutcome<Plan> {
        self.write_payload(self.client.post(plans_url(&self.base_url)).json(plan)).await
    }

    pub async fn delete_plan(&self, plan_id: &str) -> WriteOutcome<()> {
        self.write::<serde_json::Value>(self.client.delete(plan_url(&self.base_url, plan_id)))
            .await
            .map(|_| ())
    }

    /// Flip the plan's daily-reset flag. The updated plan is returned when
    /// the server sends it back.
    pub async fn toggle_daily_reset(&self, plan_id: &str) -> WriteOutcome<Option<Plan>> {
        self.write(self.client.patch(daily_reset_url(&self.base_url, plan_id))).await
    }

    // --- checklists ---

    pub async fn list_checklist(&self, plan_id: &str, scope: Scope, archived: bool) -> Result<Vec<ChecklistItem>, ApiError> {
        let url = checklist_list_url(&self.base_url, plan_id, scope, archived);
        let mut items: Vec<ChecklistItem> = self.read_list(self.client.get(url)).await?;
        for item in &mut items {
            item.scope.get_or_insert(scope);
        }
        log::debug!("[Api] loaded {} {} items for plan {}", items.len(), scope.as_str(), plan_id);
        Ok(items)
    }

    pub async fn list_archived(&self, plan_id: &str, scope: Scope) -> Result<Vec<ChecklistItem>, ApiError> {
        let url = archived_list_url(&self.base_url, plan_id, scope);
        let mut items: Vec<ChecklistItem> = self.read_list(self.client.get(url)).await?;
        for item in &mut items {
            item.scope.get_or_insert(scope);
            item.archived = true;
        }
        Ok(items)
    }

    pub async fn create_checklist_item(&self, plan_id: &str, scope: Scope, description: &str) -> WriteOutcome<ChecklistItem> {
        let body = CreateItemBody { description, scope };
        self.write_payload(self.client.post(checklists_url(&self.base_url, plan_id)).json(&body))
            .await
    }

    pub async fn update_checklist_item(
        &self,
        plan_id: &str,
        scope: Scope,
        item_id: &str,
        patch: &ItemPatch,
    ) -> WriteOutcome<Option<ChecklistItem>> {
        let url = item_url(&self.base_url, plan_id, item_id, None, scope);
        self.write(self.client.patch(url).json(patch)).await
    }

    pub async fn delete_checklist_item(&self, plan_id: &str, scope: Scope, item_id: &str) -> WriteOutcome<()> {
        let url = item_url(&self.base_url, plan_id, item_id, None, scope);
        self.write::<serde_json::Value>(self.client.delete(url)).await.map(|_| ())
    }

    pub async fn schedule_checklist_item(
        &self,
        plan_id: &str,
        scope: Scope,
        item_id: &str,
        scheduled_time: Option<DateTime<Utc>>,
    ) -> WriteOutcome<Option<ChecklistItem>> {
        let url = item_url(&self.base_url, plan_id, item_id, Some("schedule"), scope);
        self.write(self.client.patch(url).json(&ScheduleBody { scheduled_time })).await
    }

    pub async fn archive_checklist_item(&self, plan_id: &str, scope: Scope, item_id: &str) -> WriteOutcome<Option<ChecklistItem>> {
        let url = item_url(&self.base_url, plan_id, item_id, Some("archive"), scope);
        self.write(self.client.patch(url)).await
    }

    /// Send whatever request an optimistic ticket stands for.
    pub async fn send_item_request(&self, plan_id: &str, ticket: &Ticket) -> WriteOutcome<Option<ChecklistItem>> {
        let scope = ticket.scope;
        match &ticket.request {
            ItemRequest::Create { description } => self
                .create_checklist_item(plan_id, scope, description)
                .await
                .map(Some),
            ItemRequest::Update { item_id, patch } => self.update_checklist_item(plan_id, scope, item_id, patch).await,
            ItemRequest::Schedule { item_id, scheduled_time } => {
                self.schedule_checklist_item(plan_id, scope, item_id, *scheduled_time).await
            }
            ItemRequest::Archive { item_id } => self.archive_checklist_item(plan_id, scope, item_id).await,
            ItemRequest::Delete { item_id } => self
                .delete_checklist_item(plan_id, scope, item_id)
                .await
                .map(|_| None),
        }
    }

    // --- insights ---

    /// AI task ideas for a scope. Daily lists use the dedicated daily endpoint.
    pub async fn checklist_suggestions(&self, plan_id: &str, scope: Scope) -> Result<Vec<Suggestion>, ApiError> {
        let payload: SuggestionPayload = self.read(self.client.get(suggestion_url(&self.base_url, plan_id, scope))).await?;
        Ok(match payload {
            SuggestionPayload::List(list) => list,
            SuggestionPayload::Single(one) => vec![one],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:6060";

    #[test]
    fn plan_paths() {
        assert_eq!(plans_url(BASE), "http://localhost:6060/api/plans");
        assert_eq!(plan_url(BASE, "p1"), "http://localhost:6060/api/plans/p1");
        assert_eq!(daily_reset_url(BASE, "p1"), "http://localhost:6060/api/plans/p1/toggle-daily-reset");
    }

    #[test]
    fn checklist_paths() {
        assert_eq!(
            checklist_list_url(BASE, "p1", Scope::Longterm, false),
            "http://localhost:6060/api/plans/p1/checklists?scope=longterm&archived=false"
        );
        assert_eq!(
            archived_list_url(BASE, "p1", Scope::Daily),
            "http://localhost:6060/api/plans/p1/checklists/archived?scope=daily"
        );
        assert_eq!(
            item_url(BASE, "p1", "i/9", None, Scope::Daily),
            "http://localhost:6060/api/plans/p1/checklists/i%2F9?scope=daily"
        );
        assert_eq!(
            item_url(BASE, "p1", "i9", Some("schedule"), Scope::Longterm),
            "http://localhost:6060/api/plans/p1/checklists/i9/schedule?scope=longterm"
        );
    }

    #[test]
    fn suggestion_paths() {
        assert_eq!(
            suggestion_url(BASE, "p1", Scope::Longterm),
            "http://localhost:6060/api/insights/checklist-suggestion?plan_id=p1&scope=longterm"
        );
        assert_eq!(
            suggestion_url(BASE, "p1", Scope::Daily),
            "http://localhost:6060/api/insights/checklist-suggestion-daily?plan_id=p1"
        );
    }

    #[test]
    fn request_bodies() {
        let create = serde_json::to_value(CreateItemBody { description: "Buy milk", scope: Scope::Daily }).unwrap();
        assert_eq!(create, serde_json::json!({"description": "Buy milk", "scope": "daily"}));

        let patch = serde_json::to_value(ItemPatch { done: Some(true), description: None }).unwrap();
        assert_eq!(patch, serde_json::json!({"done": true}));

        let unschedule = serde_json::to_value(ScheduleBody { scheduled_time: None }).unwrap();
        assert_eq!(unschedule, serde_json::json!({"scheduledTime": null}));
    }

    #[test]
    fn suggestion_payload_shapes() {
        let list: SuggestionPayload = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert!(matches!(list, SuggestionPayload::List(ref l) if l.len() == 2));
        let single: SuggestionPayload = serde_json::from_str(r#"{"description": "c"}"#).unwrap();
        assert!(matches!(single, SuggestionPayload::Single(_)));
    }

    #[test]
    fn clients_compare_by_base_url() {
        assert_eq!(ApiClient::new("http://a/"), ApiClient::new("http://a"));
        assert_ne!(ApiClient::new("http://a"), ApiClient::new("http://b"));
    }
}
