use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{clean_base_url, Environment};

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Daily,
    Longterm,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Daily => "daily",
            Scope::Longterm => "longterm",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scope::Daily => "Today's Tasks",
            Scope::Longterm => "Long-term Goals",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    /// Absent on some list responses; the API client fills in the scope it asked for.
    #[serde(default)]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub archived: bool,
}

pub const TEMP_ID_PREFIX: &str = "tmp-";

impl ChecklistItem {
    /// A not-yet-confirmed item carrying a client-generated id.
    pub fn placeholder(description: String, scope: Scope) -> Self {
        Self {
            id: format!("{}{}", TEMP_ID_PREFIX, uuid::Uuid::new_v4()),
            description,
            done: false,
            scheduled_time: None,
            scope: Some(scope),
            archived: false,
        }
    }

    pub fn has_temp_id(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    #[serde(alias = "project")]
    Development,
    Learning,
}

impl PlanType {
    pub const ALL: [PlanType; 2] = [PlanType::Development, PlanType::Learning];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Development => "development",
            PlanType::Learning => "learning",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanType::Development => "Development",
            PlanType::Learning => "Learning",
        }
    }

    pub fn from_value(value: &str) -> Self {
        match value {
            "learning" => PlanType::Learning,
            _ => PlanType::Development,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub daily_reset: bool,
}

/// Body of `POST /api/plans`.
#[derive(Serialize, Clone, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub name: String,
    pub focus: String,
    pub description: String,
    pub plan_type: PlanType,
}

impl NewPlan {
    /// Name of the first required field left blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [("Plan Name", &self.name), ("Focus", &self.focus), ("Description", &self.description)]
            .into_iter()
            .find(|(_, v)| v.trim().is_empty())
            .map(|(label, _)| label)
    }
}

/// AI-generated task idea. The insights endpoint returns either bare strings
/// or objects with a `description` field.
#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(from = "SuggestionWire")]
pub struct Suggestion {
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionWire {
    Text(String),
    Item { description: String },
}

impl From<SuggestionWire> for Suggestion {
    fn from(wire: SuggestionWire) -> Self {
        match wire {
            SuggestionWire::Text(description) | SuggestionWire::Item { description } => Suggestion { description },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    pub const ALL: [ThemePreference; 3] = [ThemePreference::System, ThemePreference::Light, ThemePreference::Dark];

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::System => "System",
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
        }
    }

    pub fn from_label(label: &str) -> Self {
        Self::ALL.into_iter().find(|t| t.label() == label).unwrap_or_default()
    }

    pub fn is_dark(&self, system_prefers_dark: bool) -> bool {
        match self {
            ThemePreference::System => system_prefers_dark,
            ThemePreference::Light => false,
            ThemePreference::Dark => true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct AppSettings {
    /// Empty means "use the build-time base URL".
    pub api_base_url_override: String,
    pub theme: ThemePreference,
    pub display_name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url_override: String::new(),
            theme: ThemePreference::System,
            display_name: "Kranti".to_string(),
        }
    }
}

impl AppSettings {
    pub fn effective_base_url(&self, env: &Environment) -> String {
        let custom = clean_base_url(&self.api_base_url_override);
        if custom.is_empty() {
            env.api_base_url.clone()
        } else {
            custom
        }
    }

    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct GithubRepo {
    pub name: String,
    pub description: String,
    pub url: String,
    /// Milliseconds since the epoch.
    pub connected_at: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_item_wire_format() {
        let json = r#"{"id":"7","description":"Read chapter 3","done":true,"scheduledTime":"2024-05-01T10:00:00Z","scope":"longterm"}"#;
        let item: ChecklistItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.scope, Some(Scope::Longterm));
        assert!(!item.archived);
        assert_eq!(item.scheduled_time.unwrap().to_rfc3339(), "2024-05-01T10:00:00+00:00");

        let minimal: ChecklistItem = serde_json::from_str(r#"{"id":"1","description":"x"}"#).unwrap();
        assert!(!minimal.done);
        assert_eq!(minimal.scope, None);
    }

    #[test]
    fn placeholder_ids_are_temporary_and_unique() {
        let a = ChecklistItem::placeholder("a".into(), Scope::Daily);
        let b = ChecklistItem::placeholder("a".into(), Scope::Daily);
        assert!(a.has_temp_id());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn plan_type_accepts_legacy_project_value() {
        let plan: Plan = serde_json::from_str(r#"{"id":"p","name":"Site","planType":"project","focus":null}"#).unwrap();
        assert_eq!(plan.plan_type, PlanType::Development);
        assert_eq!(plan.focus, None);
        assert!(!plan.daily_reset);

        let body = serde_json::to_value(NewPlan { plan_type: PlanType::Development, ..Default::default() }).unwrap();
        assert_eq!(body["planType"], "development");
    }

    #[test]
    fn new_plan_reports_first_blank_field() {
        let mut plan = NewPlan { name: "Portfolio".into(), focus: " ".into(), ..Default::default() };
        assert_eq!(plan.missing_field(), Some("Focus"));
        plan.focus = "NextJS".into();
        plan.description = "Sections for work".into();
        assert_eq!(plan.missing_field(), None);
    }

    #[test]
    fn suggestions_accept_strings_and_objects() {
        let list: Vec<Suggestion> = serde_json::from_str(r#"["Write tests", {"description": "Refactor API"}]"#).unwrap();
        assert_eq!(list[0].description, "Write tests");
        assert_eq!(list[1].description, "Refactor API");
    }

    #[test]
    fn settings_base_url_and_theme() {
        let env = Environment::default();
        let mut settings = AppSettings::default();
        assert_eq!(settings.effective_base_url(&env), "http://localhost:6060");
        settings.api_base_url_override = " https://flow.example/ ".into();
        assert_eq!(settings.effective_base_url(&env), "https://flow.example");

        assert!(ThemePreference::System.is_dark(true));
        assert!(!ThemePreference::Light.is_dark(true));
        assert!(ThemePreference::Dark.is_dark(false));
        assert_eq!(ThemePreference::from_label("Light"), ThemePreference::Light);
        assert_eq!(ThemePreference::from_label("sepia"), ThemePreference::System);
    }

    #[test]
    fn initials_from_display_name() {
        let mut s = AppSettings { display_name: "john doe".into(), ..Default::default() };
        assert_eq!(s.initials(), "JD");
        s.display_name = "  ".into();
        assert_eq!(s.initials(), "?");
    }

    #[test]
    fn old_settings_blobs_still_load() {
        let s: AppSettings = serde_json::from_str(r#"{"theme":"Dark"}"#).unwrap();
        assert_eq!(s.theme, ThemePreference::Dark);
        assert_eq!(s.display_name, "Kranti");
    }
}
