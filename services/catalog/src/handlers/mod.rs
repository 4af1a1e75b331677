pub mod deletion;
pub mod moderation;
pub mod reference;
pub mod session;
pub mod tool;
