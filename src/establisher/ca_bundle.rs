// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Webhook CA bundle lookup and injection

use crate::constants::{webhook::TLS_CERT_KEY, WEBHOOK_CONVERTER};
use crate::error::{EstablishError, Result};
use crate::kubernetes::store::ObjectStore;
use crate::types::ChildObject;
use k8s_openapi::api::admissionregistration::v1 as admission;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1 as apiextensions;
use k8s_openapi::ByteString;
use tracing::{debug, instrument};

/// Service fronting the webhooks of a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookService {
    pub name: String,
    pub namespace: String,
    pub port: i32,
}

/// Read the certificate of the webhook TLS secret
#[instrument(skip(store))]
pub async fn fetch_ca_bundle<S>(store: &S, namespace: &str, secret_name: &str) -> Result<ByteString>
where
    S: ObjectStore + ?Sized,
{
    let secret = store
        .get_secret(namespace, secret_name)
        .await
        .map_err(|source| EstablishError::WebhookTlsSecret {
            name: secret_name.to_string(),
            source,
        })?;

    match secret.data.and_then(|mut data| data.remove(TLS_CERT_KEY)) {
        Some(cert) if !cert.0.is_empty() => Ok(cert),
        _ => Err(EstablishError::WebhookSecretWithoutCaBundle(
            secret_name.to_string(),
        )),
    }
}

/// Whether a CRD delegates version conversion to a webhook
pub fn requires_conversion_webhook(crd: &apiextensions::CustomResourceDefinition) -> bool {
    crd.spec
        .conversion
        .as_ref()
        .is_some_and(|c| c.strategy == WEBHOOK_CONVERTER)
}

/// Point the webhooks of `obj` at the package's webhook service, trusting `ca_bundle`.
///
/// A conversion webhook CRD without a CA bundle is an error. Webhook configurations
/// are left unmodified when there is no CA bundle.
pub fn inject_ca_bundle(
    obj: &mut ChildObject,
    ca_bundle: Option<&ByteString>,
    service: &WebhookService,
) -> Result<()> {
    match obj {
        ChildObject::CustomResourceDefinition(crd) => {
            if !requires_conversion_webhook(crd) {
                return Ok(());
            }
            let name = crd.metadata.name.clone().unwrap_or_default();
            let ca_bundle = ca_bundle
                .ok_or_else(|| EstablishError::ConversionWithoutWebhookCa(name.clone()))?;

            if let Some(conversion) = crd.spec.conversion.as_mut() {
                let webhook = conversion.webhook.get_or_insert_with(Default::default);
                let client_config = webhook.client_config.get_or_insert_with(Default::default);
                client_config.ca_bundle = Some(ca_bundle.clone());

                let reference = client_config.service.get_or_insert_with(Default::default);
                reference.name = service.name.clone();
                reference.namespace = service.namespace.clone();
                reference.port = Some(service.port);
            }
            debug!("Injected CA bundle into conversion webhook of {}", name);
        }
        ChildObject::MutatingWebhookConfiguration(conf) => {
            if let Some(ca_bundle) = ca_bundle {
                for webhook in conf.webhooks.iter_mut().flatten() {
                    configure_admission_client(&mut webhook.client_config, ca_bundle, service);
                }
            }
        }
        ChildObject::ValidatingWebhookConfiguration(conf) => {
            if let Some(ca_bundle) = ca_bundle {
                for webhook in conf.webhooks.iter_mut().flatten() {
                    configure_admission_client(&mut webhook.client_config, ca_bundle, service);
                }
            }
        }
        _ => {}
    }

    Ok(())
}

fn configure_admission_client(
    client_config: &mut admission::WebhookClientConfig,
    ca_bundle: &ByteString,
    service: &WebhookService,
) {
    client_config.ca_bundle = Some(ca_bundle.clone());

    let reference = client_config.service.get_or_insert_with(Default::default);
    reference.name = service.name.clone();
    reference.namespace = service.namespace.clone();
    reference.port = Some(service.port);
}
