// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Blocking LM clients for declm
//!
//! ```ignore
//! use declm::prelude::*;
//! use declm_client::ApiLm;
//!
//! let lm = std::sync::Arc::new(ApiLm::from_env()?);
//! declm::settings::configure(|s| s.default_lm = Some(lm));
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod provider;
pub mod request;
pub mod response;
pub mod retry;

pub use client::ApiLm;
pub use config::LmConfig;
pub use provider::{Endpoint, Provider};
pub use response::Completion;
pub use retry::RetryPolicy;
