pub mod analytics;
pub mod assistant;
pub mod chat;
pub mod contact;
pub mod session;
pub mod vision;
