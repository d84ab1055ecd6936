//! sealdeck: a terminal dashboard for seal applications and their pools.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod error;
pub mod model;
pub mod api;
pub mod mock;
pub mod selection;
pub mod controller;
pub mod executor;
pub mod dispatcher;
pub mod export;
pub mod config;
pub mod view;
pub mod app;
