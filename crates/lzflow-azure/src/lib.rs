//! Azure Resource Manager and Terra service clients for lzflow
//!
//! Implements the collaborator traits of `lzflow-cloud` over HTTP:
//!
//! - [`ArmClient`]: Marketplace managed applications and managed resource group
//!   contents (Azure management token)
//! - [`BpmClient`]: managed app registry and billing profiles
//! - [`RawlsClient`]: billing projects and workspaces
//! - [`LandingZoneClient`]: landing zone creation jobs
//!
//! # Requirements
//!
//! - Terra services: a Google access token, explicit or from `gcloud auth print-access-token`
//! - Azure Resource Manager: an access token, explicit or from `az account get-access-token`
//!
//! # Example
//!
//! ```ignore
//! use lzflow_azure::{RawlsClient, RequestContext, TokenSource};
//! use std::sync::Arc;
//!
//! let token = TokenSource::terra(None).acquire().await?;
//! let ctx = Arc::new(RequestContext::new().with_terra_token(token));
//! let rawls = RawlsClient::new(ctx, "https://rawls.dsde-dev.broadinstitute.org");
//! ```

pub mod arm;
pub mod bpm;
pub mod error;
pub mod landing_zone;
pub mod rawls;
pub mod request;
pub mod token;

pub use arm::ArmClient;
pub use bpm::BpmClient;
pub use error::{AzureError, Result};
pub use landing_zone::LandingZoneClient;
pub use rawls::RawlsClient;
pub use request::RequestContext;
pub use token::TokenSource;
