pub mod movie;
pub mod root;
pub mod user;
