//! App-wide values handed to every page through a Yew context.

use std::rc::Rc;

use yew::prelude::*;

use crate::config::Environment;
use crate::models::AppSettings;
use crate::services::api::ApiClient;

#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub env: Rc<Environment>,
    pub api: ApiClient,
    pub settings: AppSettings,
    pub dark: bool,
    /// Plan resolved from the path, the `plan_id` query parameter, or the test plan.
    pub plan_id: String,
    pub open_settings: Callback<()>,
}

#[hook]
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext is provided by App")
}
