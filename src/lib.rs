//! Findash - financial dashboard client
//!
//! A CLI for a portfolio/market dashboard backend. All outbound calls
//! run through a request pipeline that caches responses, attaches the
//! session's bearer token, classifies failures, and transparently
//! refreshes the token once on an authorization failure.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod observe;
pub mod pipeline;
pub mod session;
pub mod store;
pub mod token;
pub mod transport;
pub mod ui;

pub use error::{FindashError, FindashResult};
