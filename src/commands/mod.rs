pub mod config;
pub mod create;
pub mod delete;
pub mod ls;
pub mod set;
pub mod show;
pub mod switch;
