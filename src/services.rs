pub mod activities;
pub mod aggregate;
pub mod calendar;
pub mod dates;
pub mod files;
pub mod settings;
pub mod team;
