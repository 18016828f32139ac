//! taskboard - Personal Task Board Library
//!
//! This library provides the core functionality for the taskboard binary:
//! a CRUD API over a file-backed task store, plus the pure display logic a
//! client needs to render the tasks as a three-column board.
//!
//! # Core Concepts
//!
//! - **Tasks**: title, status lifecycle (PENDING / IN_PROGRESS / DONE),
//!   priority tier (LOW / MEDIUM / HIGH), optional due date
//! - **Filtering**: status/priority with an `ALL` sentinel plus
//!   case-insensitive title search, newest first
//! - **Board view**: per-column day-groups with priority ordering and
//!   due-date expiry classification, recomputed from wall-clock time
//! - **Read model**: the client-held mirror patched after confirmed
//!   mutations
//!
//! # Module Organization
//!
//! - `api`: HTTP surface using axum
//! - `board`: board grouping and expiry classification
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `taskboard.toml`
//! - `error`: error types and result aliases
//! - `lock`: file locking and atomic writes for the snapshot
//! - `query`: listing filter composition
//! - `readmodel`: client-side task collection mirror
//! - `store`: file-backed task store
//! - `task`: task records, validation, and transition rules

pub mod api;
pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod query;
pub mod readmodel;
pub mod store;
pub mod task;

pub use error::{Error, Result};
