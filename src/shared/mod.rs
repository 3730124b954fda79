//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the JSON API and the server-rendered pages. Nothing in here touches the
//! database or the HTTP runtime, so it compiles without the `ssr` feature.
//!
//! # Overview
//!
//! - **`models`** - Users, blog posts, predictions, payments and their DTOs
//! - **`forms`** - Declarative form schemas used for rendering and validation
//! - **`error`** - Validation and serialization errors

/// Domain records and request/response types
pub mod models;

/// Form schema layer
pub mod forms;

/// Shared error types
pub mod error;

pub use error::{FieldError, SharedError};
pub use forms::{FieldKind, FieldSpec, FormRequest, FormSchema};
pub use models::{
    BlogPost, Comment, ListQuery, Page, Payment, PaymentStatus, PostDetail, PostStats,
    Prediction, PredictionOutcome, PredictionView, PublicUser, Role, SuccessResponse,
};
