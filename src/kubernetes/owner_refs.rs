// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Owner reference construction and merging

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::{Resource, ResourceExt};

/// Build a reference to `owner`. A controller reference also blocks owner deletion.
pub fn owner_reference_to<K>(owner: &K, controller: bool) -> OwnerReference
where
    K: Resource<DynamicType = ()>,
{
    OwnerReference {
        api_version: K::api_version(&()).into_owned(),
        kind: K::kind(&()).into_owned(),
        name: owner.name_any(),
        uid: owner.uid().unwrap_or_default(),
        controller: controller.then_some(true),
        block_owner_deletion: controller.then_some(true),
    }
}

fn same_owner(a: &OwnerReference, b: &OwnerReference) -> bool {
    a.api_version == b.api_version && a.kind == b.kind && a.name == b.name && a.uid == b.uid
}

pub fn is_controller(reference: &OwnerReference) -> bool {
    reference.controller == Some(true)
}

/// Merge `reference` into `refs`.
///
/// A controller reference takes the controller flag away from every other entry and
/// replaces any entry for the same owner. A plain owner reference is only appended when
/// the owner is not referenced yet; an existing entry keeps its flags.
pub fn merge_owner_reference(refs: &mut Vec<OwnerReference>, reference: OwnerReference) {
    if is_controller(&reference) {
        for existing in refs.iter_mut().filter(|r| is_controller(r)) {
            existing.controller = None;
        }
        match refs.iter_mut().find(|r| same_owner(r, &reference)) {
            Some(existing) => *existing = reference,
            None => refs.push(reference),
        }
    } else if !refs.iter().any(|r| same_owner(r, &reference)) {
        refs.push(reference);
    }
}
