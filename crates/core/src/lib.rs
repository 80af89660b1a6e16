//! Core library for blogdesk
//!
//! This crate implements the **Functional Core** of the blogdesk application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`blogdesk_core`** (this crate): article rules with no I/O of its own
//! - **`blogdesk`**: the CLI and the HTTP adapter for the article API
//!
//! The only boundary this crate knows about is the [`repository::ArticleRepository`]
//! trait. Workflow and listing functions are generic over it, so they are
//! tested against an in-memory repository instead of a live API.
//!
//! # Module Organization
//!
//! - [`article`]: the article model, its status values and display helpers
//! - [`validation`]: field rules and the form state kept between submissions
//! - [`listing`]: status tabs, tab counts and the management snapshot
//! - [`pagination`]: the public preview and its page arithmetic
//! - [`workflow`]: create, edit and trash transitions
//! - [`repository`]: the article API port and its error type
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use blogdesk_core::article::{ArticleFields, ArticleStatus};
//! use blogdesk_core::workflow;
//!
//! let fields = ArticleFields::new(title, content, "News");
//! let outcome = workflow::create(&repository, &fields, ArticleStatus::Publish).await?;
//! println!("{}", outcome.message);
//! ```

pub mod article;
pub mod listing;
pub mod pagination;
pub mod repository;
pub mod validation;
pub mod workflow;
