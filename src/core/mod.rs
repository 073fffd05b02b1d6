//! Core components of the `headline-sentiment` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The HTTP [`NewsClient`] and its builder.
//! - The primary [`NsError`] type.
//! - Shared data models like [`Ticker`] and [`HeadlineRecord`].
//! - The service traits the pipeline is generic over.

/// The HTTP client (`NewsClient`), builder, and retry configuration.
pub mod client;
/// The primary error type (`NsError`) for the crate.
pub mod error;
/// Shared data models used across the pipeline stages.
pub mod models;
/// Service traits abstracting page fetching and row extraction.
pub mod services;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::NewsClient`
pub use client::{Backoff, NewsClient, NewsClientBuilder, RetryConfig};
pub use error::NsError;
pub use models::{
    FetchOutcome, HeadlineRecord, HeadlineRow, RawDocument, SentimentLabel, Ticker,
};
pub use services::{DocumentFetcher, ExtractedRows, RowExtractor};
