//! # Brain Module
//!
//! Fast, deterministic text analysis that runs before any model call.
//!
//! ## Components
//! - `category`: keyword routing to one topical category
//! - `keywords`: medical vocabulary extraction and input cleaning
//! - `scorer`: tag-overlap ranking of content table entries
//! - `distortion`: cognitive distortion patterns for thought records
//! - `prompts`: system prompt and per-category answer extras

pub mod category;
pub mod distortion;
pub mod keywords;
pub mod prompts;
pub mod scorer;
