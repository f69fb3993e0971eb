// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Stable naming of admission webhook configurations

use crate::establisher::package_ref::package_owner_reference;
use crate::types::ChildObject;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::Resource;
use tracing::debug;

/// Name shared by every revision of a package: `<prefix>-<kind>-<name>`
pub fn webhook_configuration_name(prefix: &str, package: &OwnerReference) -> String {
    format!("{}-{}-{}", prefix, package.kind.to_lowercase(), package.name)
}

/// Rename a webhook configuration after the package owning `revision`.
/// Other kinds, and revisions whose package cannot be found, keep the declared name.
pub fn rename_webhook_configuration<R>(obj: &mut ChildObject, revision: &R, label: &str, prefix: &str)
where
    R: Resource,
{
    if !obj.is_webhook_configuration() {
        return;
    }
    let Some(package) = package_owner_reference(revision, label) else {
        return;
    };

    let name = webhook_configuration_name(prefix, package);
    debug!("Renaming webhook configuration {} to {}", obj.name(), name);
    obj.meta_mut().name = Some(name);
}
