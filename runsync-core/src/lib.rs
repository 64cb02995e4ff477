pub mod boxart;
pub mod cell;
pub mod checklist;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod schedule;
pub mod tracing_ext;
pub mod tracker;
pub mod web;

#[cfg(test)]
mod test_util;
