// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for object store access and owner references.

pub mod owner_refs;
pub mod store;

pub use owner_refs::{merge_owner_reference, owner_reference_to};
pub use store::{KubeStore, ObjectIdentity, ObjectStore};
