// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Package revision resources that act as owners of established objects.

use crate::types::object::TypedReference;
use kube::{CustomResource, Resource};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
pub enum DesiredState {
    #[default]
    Active,
    Inactive,
}

/// Fields shared by every kind of package revision
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevisionSpec {
    /// OCI reference of the package image
    pub package: String,
    #[serde(default)]
    pub desired_state: DesiredState,
    #[serde(default)]
    pub revision: i64,
    /// Secret in the establisher namespace holding the webhook TLS material
    #[serde(rename = "webhookTLSSecretName", skip_serializing_if = "Option::is_none")]
    pub webhook_tls_secret_name: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevisionStatus {
    /// Objects established for this revision
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_refs: Vec<TypedReference>,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "pkg.crossplane.io", version = "v1", kind = "ProviderRevision")]
#[kube(status = "PackageRevisionStatus")]
pub struct ProviderRevisionSpec {
    #[serde(flatten)]
    pub revision: PackageRevisionSpec,
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[kube(group = "pkg.crossplane.io", version = "v1", kind = "ConfigurationRevision")]
#[kube(status = "PackageRevisionStatus")]
pub struct ConfigurationRevisionSpec {
    #[serde(flatten)]
    pub revision: PackageRevisionSpec,
}

/// A revision of an installable package, owner of the objects the package declares.
pub trait PackageRevision: Resource<DynamicType = ()> {
    fn revision_spec(&self) -> &PackageRevisionSpec;

    fn status_mut(&mut self) -> &mut PackageRevisionStatus;

    fn webhook_tls_secret_name(&self) -> Option<&str> {
        self.revision_spec().webhook_tls_secret_name.as_deref()
    }

    /// Whether this revision should control, rather than just own, its objects
    fn is_active(&self) -> bool {
        self.revision_spec().desired_state == DesiredState::Active
    }

    fn set_object_refs(&mut self, refs: Vec<TypedReference>) {
        self.status_mut().object_refs = refs;
    }
}

impl PackageRevision for ProviderRevision {
    fn revision_spec(&self) -> &PackageRevisionSpec {
        &self.spec.revision
    }

    fn status_mut(&mut self) -> &mut PackageRevisionStatus {
        self.status.get_or_insert_with(Default::default)
    }
}

impl PackageRevision for ConfigurationRevision {
    fn revision_spec(&self) -> &PackageRevisionSpec {
        &self.spec.revision
    }

    fn status_mut(&mut self) -> &mut PackageRevisionStatus {
        self.status.get_or_insert_with(Default::default)
    }
}
