//! Google Workspace directory access for group membership reports.
//!
//! Authenticates as a service account impersonating an admin user, then
//! lists groups and their members through the Admin SDK Directory API.

pub mod auth;
pub mod client;
pub mod membership;
pub mod models;
pub mod paging;
