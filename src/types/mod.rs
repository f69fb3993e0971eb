// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource types: package revisions and the objects they declare.

pub mod object;
pub mod revision;

pub use object::{parse_manifests, ChildObject, TypedReference};
pub use revision::{
    ConfigurationRevision, ConfigurationRevisionSpec, DesiredState, PackageRevision,
    PackageRevisionSpec, PackageRevisionStatus, ProviderRevision, ProviderRevisionSpec,
};
