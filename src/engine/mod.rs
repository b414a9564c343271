//! Core engine modules for grange.

pub mod board;
pub mod db;
pub mod record;
pub mod repo;
pub mod resolver;
pub mod schedule;
pub mod types;
