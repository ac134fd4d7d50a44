//! Parley - Adaptive AI-led interviews
//!
//! This crate runs scripted-but-adaptive interviews: an operator defines a
//! topic and a question budget, and an LLM completion service generates each
//! question from the conversation so far, then distills a structured summary
//! when the session closes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
