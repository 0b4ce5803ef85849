//! Tracker-facing plumbing for ticketdoc.
//!
//! This crate takes converted documents the rest of the way: wire
//! serialization, ticket-write HTTP calls, and event deduplication.

pub mod adf;
pub mod dedup;
pub mod publish;
pub mod tracker;

pub use adf::to_adf;
pub use dedup::SeenEvents;
pub use publish::{PublishOutcome, Publisher};
pub use tracker::{CommentRef, TrackerClient, validate_issue_key};
