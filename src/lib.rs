// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod establisher;
pub mod kubernetes;
pub mod types;

#[cfg(test)]
pub mod test_utils;

pub use config::EstablisherConfig;
pub use error::{EstablishError, Result};
pub use establisher::{package_owner_reference, Established, Establisher, Outcome};
pub use kubernetes::{KubeStore, ObjectIdentity, ObjectStore};
pub use types::{ChildObject, PackageRevision, TypedReference};
