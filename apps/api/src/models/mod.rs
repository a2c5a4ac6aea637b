pub mod analysis;
pub mod chat;
pub mod cover_letter;
pub mod resume;
pub mod roadmap;
pub mod user;
