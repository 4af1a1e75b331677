//! sea-orm entities for the catalog database.

pub mod categories;
pub mod category_tool;
pub mod tag_tool;
pub mod tags;
pub mod tool_action_challenges;
pub mod tool_roles;
pub mod tools;
pub mod users;
