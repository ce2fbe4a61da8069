//! Economy: construction, recruitment and harvesting.
//!
//! Every build action is all-or-nothing: either the full cost is paid and the
//! effect applied, or a [`BuildError`] is returned and the state is untouched.

mod build;
mod error;
mod harvest;

pub use build::{BuildAction, BuildEffect, BuildReceipt, available_builds, resolve_build};
pub use error::BuildError;
pub use harvest::{HarvestReport, harvest};
