//! Minimal OAuth-style login relay for the Yurba identity provider—send the browser to the
//! provider's login page, accept one callback carrying a short-lived token, trade the token for a
//! user profile over a server-to-server call, and render the result.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod obs;
pub mod profile;
pub mod resolver;
pub mod server;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
		time::Duration,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use {httpmock as _, tower as _};
