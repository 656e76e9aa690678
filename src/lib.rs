//! # Parts Unlimited
//!
//! A small CRUD service for parts records (name, SKU, description, weight),
//! backed by SQLite and exposed over HTTP, with a report of the most common
//! words across part descriptions.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌─────────────┐   ┌──────────┐
//! │   HTTP   │──▶│ PartService │──▶│  PartStore  │──▶│  SQLite  │
//! │  (Axum)  │   │             │   │ SQLite/Mem  │   │  `part`  │
//! └──────────┘   └──────┬──────┘   └─────────────┘   └──────────┘
//!      ▲                │
//! ┌──────────┐          ▼
//! │   CLI    │   ┌─────────────┐
//! │ (parts)  │   │    words    │
//! └──────────┘   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! parts init                    # create database
//! parts serve                   # start HTTP server
//! parts list --limit 20
//! parts words
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`models`] | `Part`, `NewPart`, `PartUpdate`, `WordCount` and field validation |
//! | [`error`] | Domain error type (`NotFound`, `Validation`, `Internal`) |
//! | [`store`] | `PartStore` trait with SQLite and in-memory backends |
//! | [`service`] | CRUD orchestration over a store |
//! | [`words`] | Most-common-words ranking |
//! | [`server`] | HTTP API (Axum) with CORS |
//! | [`commands`] | CLI command implementations |
//! | [`db`] | SQLite connection pool |
//! | [`migrate`] | Schema migrations (idempotent) |

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod server;
pub mod service;
pub mod store;
pub mod words;

pub use error::{Error, Result};
pub use models::{NewPart, Part, PartUpdate, WordCount};
pub use service::PartService;
pub use store::{InMemoryStore, PartStore, SqliteStore};
