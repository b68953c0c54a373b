//! Security module for command classification.
//!
//! This module decides whether a resolved command deserves a stronger
//! warning before execution and whether it needs a real terminal attached.
//! Both checks are advisory pattern matches over the raw command text, not
//! a semantic parse; they deliberately trade false negatives for
//! simplicity.

mod analyzer;

pub use analyzer::{assess, is_dangerous, is_interactive, CommandAssessment};
