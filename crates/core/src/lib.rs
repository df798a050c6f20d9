//! Core types and shared functionality for media-client.
//!
//! This crate provides:
//! - The rendered news-item document model
//! - Layered configuration structures

pub mod config;
pub mod document;

pub use config::{AppConfig, ConfigError};
pub use document::{Association, Document, Rendition};
