//! HTTP API: the service-side enforcement point for campus authorization.
//!
//! Requests are authenticated into a [`campusnav_auth::Principal`], resources
//! are loaded from in-memory stores, and every decision is delegated to the
//! shared [`campusnav_auth::Policy`].

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
pub mod store;
pub mod token;
