pub mod challenge;
pub mod moderation;
pub mod session;
pub mod taxonomy;
pub mod tool;
pub mod tool_deletion;
