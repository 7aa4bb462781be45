//! Core domain for userdesk.
//!
//! Pure types and functions shared by the server: the user model, form
//! validation, and the storage contract. Nothing in this crate performs I/O.

pub mod storage;
pub mod user;
