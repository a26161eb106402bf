pub mod archived_list;
pub mod github;
pub mod profile_menu;
pub mod settings;
pub mod sidebar;
pub mod task_list;
