pub mod create_plan;
pub mod home;
pub mod learning;
pub mod my_plans;
pub mod plan_detail;
pub mod plan_tasks;
