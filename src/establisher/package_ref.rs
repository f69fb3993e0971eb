// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lookup of the package that owns a revision

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::Resource;

/// Find the owner reference of the package a revision belongs to.
///
/// The package is named by the `label` on the revision; the first owner reference with
/// that name is returned. `None` when the label is missing or nothing matches.
pub fn package_owner_reference<'a, R>(revision: &'a R, label: &str) -> Option<&'a OwnerReference>
where
    R: Resource,
{
    let meta = revision.meta();
    let package = meta.labels.as_ref()?.get(label)?;

    meta.owner_references
        .as_ref()?
        .iter()
        .find(|r| &r.name == package)
}
