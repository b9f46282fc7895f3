pub mod achievement;
pub mod activity;
pub mod settings;
pub mod user;
