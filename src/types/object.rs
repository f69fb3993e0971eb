// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Objects declared by a package that a revision establishes ownership of.

use crate::error::{EstablishError, Result};
use k8s_openapi::api::admissionregistration::v1::{
    MutatingWebhookConfiguration, ValidatingWebhookConfiguration,
};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    api::{DynamicObject, ObjectMeta},
    core::{GroupVersionKind, TypeMeta},
    Resource,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Minimal handle to an established object, reported in the revision status
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypedReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
}

/// A declared object. Kinds that need CA bundle injection are kept typed.
#[derive(Clone, Debug)]
pub enum ChildObject {
    CustomResourceDefinition(CustomResourceDefinition),
    MutatingWebhookConfiguration(MutatingWebhookConfiguration),
    ValidatingWebhookConfiguration(ValidatingWebhookConfiguration),
    /// Any other kind. Built from one of the kinds above, it is converted by
    /// [`ChildObject::into_typed`] before being established.
    Other(DynamicObject),
}

impl ChildObject {
    pub fn meta(&self) -> &ObjectMeta {
        match self {
            Self::CustomResourceDefinition(o) => o.meta(),
            Self::MutatingWebhookConfiguration(o) => o.meta(),
            Self::ValidatingWebhookConfiguration(o) => o.meta(),
            Self::Other(o) => &o.metadata,
        }
    }

    pub fn meta_mut(&mut self) -> &mut ObjectMeta {
        match self {
            Self::CustomResourceDefinition(o) => o.meta_mut(),
            Self::MutatingWebhookConfiguration(o) => o.meta_mut(),
            Self::ValidatingWebhookConfiguration(o) => o.meta_mut(),
            Self::Other(o) => &mut o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.meta().name.as_deref().unwrap_or_default()
    }

    pub fn type_meta(&self) -> TypeMeta {
        match self {
            Self::CustomResourceDefinition(_) => type_meta_of::<CustomResourceDefinition>(),
            Self::MutatingWebhookConfiguration(_) => type_meta_of::<MutatingWebhookConfiguration>(),
            Self::ValidatingWebhookConfiguration(_) => {
                type_meta_of::<ValidatingWebhookConfiguration>()
            }
            Self::Other(o) => o.types.clone().unwrap_or_else(|| TypeMeta {
                api_version: String::new(),
                kind: String::new(),
            }),
        }
    }

    pub fn gvk(&self) -> GroupVersionKind {
        let types = self.type_meta();
        let (group, version) = types
            .api_version
            .split_once('/')
            .unwrap_or(("", types.api_version.as_str()));
        GroupVersionKind::gvk(group, version, &types.kind)
    }

    /// Whether this is one of the admission webhook configuration kinds
    pub fn is_webhook_configuration(&self) -> bool {
        matches!(
            self,
            Self::MutatingWebhookConfiguration(_) | Self::ValidatingWebhookConfiguration(_)
        )
    }

    pub fn typed_reference(&self) -> TypedReference {
        let types = self.type_meta();
        TypedReference {
            api_version: types.api_version,
            kind: types.kind,
            name: self.name().to_string(),
        }
    }

    /// Untyped form of this object as sent to the object store
    pub fn to_dynamic(&self) -> Result<DynamicObject> {
        match self {
            Self::CustomResourceDefinition(o) => convert(o),
            Self::MutatingWebhookConfiguration(o) => convert(o),
            Self::ValidatingWebhookConfiguration(o) => convert(o),
            Self::Other(o) => Ok(o.clone()),
        }
    }

    /// Move an `Other` object carrying one of the typed kinds into its typed variant
    pub fn into_typed(self) -> Result<Self> {
        match self {
            Self::Other(obj) if obj.types.is_some() => Self::from_dynamic(obj),
            typed => Ok(typed),
        }
    }

    /// Parse an untyped object, keeping the kinds that need CA injection typed
    pub fn from_dynamic(obj: DynamicObject) -> Result<Self> {
        let types = obj
            .types
            .as_ref()
            .map(|t| (t.api_version.as_str(), t.kind.as_str()));

        match types {
            Some(t) if t == static_types::<CustomResourceDefinition>() => {
                convert(&obj).map(Self::CustomResourceDefinition)
            }
            Some(t) if t == static_types::<MutatingWebhookConfiguration>() => {
                convert(&obj).map(Self::MutatingWebhookConfiguration)
            }
            Some(t) if t == static_types::<ValidatingWebhookConfiguration>() => {
                convert(&obj).map(Self::ValidatingWebhookConfiguration)
            }
            Some(_) => Ok(Self::Other(obj)),
            None => Err(EstablishError::InvalidObject(format!(
                "object {} has no apiVersion or kind",
                obj.metadata.name.as_deref().unwrap_or_default()
            ))),
        }
    }
}

/// Parse a multi-document YAML stream of package objects, skipping empty documents
pub fn parse_manifests(yaml: &str) -> Result<Vec<ChildObject>> {
    let mut objects = Vec::new();

    for document in serde_yaml::Deserializer::from_str(yaml) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| EstablishError::InvalidObject(format!("Failed to parse manifest: {}", e)))?;
        if value.is_null() {
            continue;
        }

        let obj: DynamicObject = serde_yaml::from_value(value)
            .map_err(|e| EstablishError::InvalidObject(format!("Failed to parse object: {}", e)))?;
        objects.push(ChildObject::from_dynamic(obj)?);
    }

    Ok(objects)
}

fn type_meta_of<K: Resource<DynamicType = ()>>() -> TypeMeta {
    TypeMeta {
        api_version: K::api_version(&()).into_owned(),
        kind: K::kind(&()).into_owned(),
    }
}

fn static_types<K: k8s_openapi::Resource>() -> (&'static str, &'static str) {
    (K::API_VERSION, K::KIND)
}

fn convert<S: Serialize, T: DeserializeOwned>(obj: &S) -> Result<T> {
    serde_json::to_value(obj)
        .and_then(serde_json::from_value)
        .map_err(|e| EstablishError::InvalidObject(e.to_string()))
}
