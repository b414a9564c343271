//! Per-command handlers.

pub mod add;
pub mod area;
pub mod defer;
pub mod done;
pub mod due;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod list;
pub mod status;
pub mod why;
