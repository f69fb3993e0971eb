// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Label keys used on package revisions
pub mod labels {
    /// Names the package that owns a revision
    pub const PARENT_PACKAGE: &str = "pkg.crossplane.io/package";
}

/// Webhook wiring defaults
pub mod webhook {
    /// Prefix of the per-package webhook configuration name
    pub const NAME_PREFIX: &str = "crossplane";
    /// Port the package's webhook service listens on
    pub const PORT: i32 = 9443;
    /// Secret key holding the webhook certificate
    pub const TLS_CERT_KEY: &str = "tls.crt";
}

/// CRD conversion strategy that delegates to a webhook
pub const WEBHOOK_CONVERTER: &str = "Webhook";
