// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object store access used by the establisher

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{ApiResource, DynamicObject, PostParams},
    core::GroupVersionKind,
    Api, Client,
};
use std::fmt;
use tracing::{debug, instrument};

/// Identity of an object in the store. Cluster-scoped objects have no namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectIdentity {
    pub gvk: GroupVersionKind,
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectIdentity {
    pub fn of(gvk: GroupVersionKind, obj: &DynamicObject) -> Self {
        Self {
            gvk,
            namespace: obj.metadata.namespace.clone().filter(|ns| !ns.is_empty()),
            name: obj.metadata.name.clone().unwrap_or_default(),
        }
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_version = if self.gvk.group.is_empty() {
            self.gvk.version.clone()
        } else {
            format!("{}/{}", self.gvk.group, self.gvk.version)
        };
        match &self.namespace {
            Some(namespace) => write!(f, "{} {} {}/{}", api_version, self.gvk.kind, namespace, self.name),
            None => write!(f, "{} {} {}", api_version, self.gvk.kind, self.name),
        }
    }
}

/// Get/create/update by identity. Store errors are passed through untouched.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object; `None` when the store reports it as not found
    async fn get(&self, id: &ObjectIdentity) -> Result<Option<DynamicObject>, kube::Error>;

    async fn create(&self, id: &ObjectIdentity, obj: &DynamicObject) -> Result<DynamicObject, kube::Error>;

    async fn update(&self, id: &ObjectIdentity, obj: &DynamicObject) -> Result<DynamicObject, kube::Error>;

    /// Fetch a secret; a missing secret is an error
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, kube::Error>;
}

/// Object store backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, id: &ObjectIdentity) -> Api<DynamicObject> {
        let resource = ApiResource::from_gvk(&id.gvk);
        match &id.namespace {
            Some(namespace) => Api::namespaced_with(self.client.clone(), namespace, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        }
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    #[instrument(skip(self), fields(object = %id))]
    async fn get(&self, id: &ObjectIdentity) -> Result<Option<DynamicObject>, kube::Error> {
        debug!("Getting object");
        self.api(id).get_opt(&id.name).await
    }

    #[instrument(skip(self, obj), fields(object = %id))]
    async fn create(&self, id: &ObjectIdentity, obj: &DynamicObject) -> Result<DynamicObject, kube::Error> {
        debug!("Creating object");
        self.api(id).create(&PostParams::default(), obj).await
    }

    #[instrument(skip(self, obj), fields(object = %id))]
    async fn update(&self, id: &ObjectIdentity, obj: &DynamicObject) -> Result<DynamicObject, kube::Error> {
        debug!("Replacing object");
        self.api(id)
            .replace(&id.name, &PostParams::default(), obj)
            .await
    }

    #[instrument(skip(self))]
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, kube::Error> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        secrets.get(name).await
    }
}
