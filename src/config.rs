// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{labels, webhook};
use anyhow::{Context, Result};
use std::env;

/// Establisher configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstablisherConfig {
    /// Namespace holding the webhook TLS secret and the webhook services
    pub namespace: String,
    /// Label on a revision whose value names its parent package
    pub parent_package_label: String,
    pub webhook_name_prefix: String,
    pub webhook_port: i32,
}

impl EstablisherConfig {
    /// Configuration with the default label, prefix and port
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            parent_package_label: labels::PARENT_PACKAGE.to_string(),
            webhook_name_prefix: webhook::NAME_PREFIX.to_string(),
            webhook_port: webhook::PORT,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let namespace =
            lookup("POD_NAMESPACE").context("POD_NAMESPACE environment variable not set")?;
        let mut config = Self::new(namespace);

        if let Some(label) = lookup("PARENT_PACKAGE_LABEL") {
            config.parent_package_label = label;
        }
        if let Some(prefix) = lookup("WEBHOOK_NAME_PREFIX") {
            config.webhook_name_prefix = prefix;
        }
        if let Some(port) = lookup("WEBHOOK_PORT") {
            config.webhook_port = port
                .parse()
                .with_context(|| format!("WEBHOOK_PORT is not a valid port: {}", port))?;
        }

        Ok(config)
    }
}
