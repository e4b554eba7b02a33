//! Derived views over a project-management backend snapshot: task counts and
//! progress, per-member workload, calendar events and the activity feed.
//!
//! Every function in [`services`] is a pure transform over borrowed records.

pub mod config;
pub mod models;
pub mod services;
pub mod storage;
pub mod ui;
