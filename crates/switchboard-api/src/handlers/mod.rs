//! HTTP handlers for the administration surface.

pub mod admin;
