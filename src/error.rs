// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstablishError {
    /// Create, update or get of a child object failed
    #[error(transparent)]
    Store(#[from] kube::Error),

    #[error("failed to get webhook TLS secret {name}: {source}")]
    WebhookTlsSecret {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("webhook secret {0} has no CA bundle")]
    WebhookSecretWithoutCaBundle(String),

    #[error("conversion webhook requested by {0} but no webhook CA is configured")]
    ConversionWithoutWebhookCa(String),

    #[error("Invalid object: {0}")]
    InvalidObject(String),
}

pub type Result<T> = std::result::Result<T, EstablishError>;
