// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Establishes control or ownership of a package revision over its declared objects.

pub mod ca_bundle;
pub mod package_ref;
pub mod webhook;

pub use ca_bundle::{fetch_ca_bundle, inject_ca_bundle, WebhookService};
pub use package_ref::package_owner_reference;
pub use webhook::{rename_webhook_configuration, webhook_configuration_name};

use crate::config::EstablisherConfig;
use crate::error::Result;
use crate::kubernetes::owner_refs::{merge_owner_reference, owner_reference_to};
use crate::kubernetes::store::{ObjectIdentity, ObjectStore};
use crate::types::{ChildObject, PackageRevision, TypedReference};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::ResourceExt;
use tracing::{debug, info, instrument};

/// What happened to a single declared object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    /// Absent from the store and not controlled, so not created
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Established {
    pub reference: TypedReference,
    pub outcome: Outcome,
}

pub struct Establisher<S> {
    store: S,
    config: EstablisherConfig,
}

impl<S: ObjectStore> Establisher<S> {
    pub fn new(store: S, config: EstablisherConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EstablisherConfig {
        &self.config
    }

    /// Make `parent` the controller (`control`) or an owner of every object in `objects`.
    ///
    /// Objects are processed in order and processing stops at the first error; objects
    /// written before it stay written. Returns one reference per input object.
    pub async fn establish<P>(
        &self,
        objects: Vec<ChildObject>,
        parent: &P,
        control: bool,
    ) -> Result<Vec<TypedReference>>
    where
        P: PackageRevision,
    {
        let established = self.establish_detailed(objects, parent, control).await?;
        Ok(established.into_iter().map(|e| e.reference).collect())
    }

    /// Like [`Establisher::establish`], also reporting the outcome for each object
    #[instrument(
        skip(self, objects, parent),
        fields(revision = %parent.name_any(), objects = objects.len())
    )]
    pub async fn establish_detailed<P>(
        &self,
        objects: Vec<ChildObject>,
        parent: &P,
        control: bool,
    ) -> Result<Vec<Established>>
    where
        P: PackageRevision,
    {
        let ca_bundle = match parent.webhook_tls_secret_name() {
            Some(secret_name) => {
                Some(fetch_ca_bundle(&self.store, &self.config.namespace, secret_name).await?)
            }
            None => None,
        };
        let service = WebhookService {
            name: parent.name_any(),
            namespace: self.config.namespace.clone(),
            port: self.config.webhook_port,
        };
        let owner = owner_reference_to(parent, control);

        // A missing CA fails the batch before any store access
        let mut prepared = Vec::with_capacity(objects.len());
        for obj in objects {
            let mut obj = obj.into_typed()?;
            rename_webhook_configuration(
                &mut obj,
                parent,
                &self.config.parent_package_label,
                &self.config.webhook_name_prefix,
            );
            inject_ca_bundle(&mut obj, ca_bundle.as_ref(), &service)?;
            prepared.push(obj);
        }

        let mut established = Vec::with_capacity(prepared.len());
        for obj in &prepared {
            let outcome = self.apply(obj, &owner, control).await?;
            established.push(Established {
                reference: obj.typed_reference(),
                outcome,
            });
        }

        info!(
            "Established {} of {} objects",
            if control { "control" } else { "ownership" },
            established.len()
        );
        Ok(established)
    }

    async fn apply(&self, obj: &ChildObject, owner: &OwnerReference, control: bool) -> Result<Outcome> {
        let mut desired = obj.to_dynamic()?;
        let id = ObjectIdentity::of(obj.gvk(), &desired);

        match self.store.get(&id).await? {
            Some(mut current) if control => {
                // The declared object replaces the live one, keeping its other owners
                let mut refs = current.metadata.owner_references.take().unwrap_or_default();
                merge_owner_reference(&mut refs, owner.clone());
                desired.metadata.owner_references = Some(refs);
                desired.metadata.resource_version = current.metadata.resource_version.take();

                debug!("Updating {} as controller", id);
                self.store.update(&id, &desired).await?;
                Ok(Outcome::Updated)
            }
            Some(mut current) => {
                let refs = current.metadata.owner_references.get_or_insert_with(Vec::new);
                merge_owner_reference(refs, owner.clone());

                debug!("Updating {} as owner", id);
                self.store.update(&id, &current).await?;
                Ok(Outcome::Updated)
            }
            None if control => {
                let mut refs = desired.metadata.owner_references.take().unwrap_or_default();
                merge_owner_reference(&mut refs, owner.clone());
                desired.metadata.owner_references = Some(refs);

                debug!("Creating {}", id);
                self.store.create(&id, &desired).await?;
                Ok(Outcome::Created)
            }
            None => {
                debug!("Not creating {} without control", id);
                Ok(Outcome::Skipped)
            }
        }
    }
}
