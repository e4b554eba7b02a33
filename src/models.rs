pub mod activity;
pub mod attachment;
pub mod calendar;
pub mod comment;
pub mod counts;
mod lenient;
pub mod project;
pub mod setting;
pub mod store;
pub mod task;
pub mod team;
