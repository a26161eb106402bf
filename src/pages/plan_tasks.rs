use yew::prelude::*;

use crate::components::task_list::TaskList;
use crate::models::Scope;

#[derive(Properties, PartialEq, Clone)]
pub struct PlanTasksProps {
    pub plan_id: String,
}

/// Just the checklists of one plan, without the dashboard around them.
#[function_component(PlanTasks)]
pub fn plan_tasks(props: &PlanTasksProps) -> Html {
    html! {
        <main class="page">
            <TaskList plan_id={props.plan_id.clone()} scope={Scope::Daily} show_suggestions={false} />
            <TaskList plan_id={props.plan_id.clone()} scope={Scope::Longterm} show_suggestions={false} />
        </main>
    }
}
