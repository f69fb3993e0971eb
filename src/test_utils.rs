// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-memory object store and a mock Kubernetes API server.

use crate::constants::webhook::TLS_CERT_KEY;
use crate::kubernetes::store::{ObjectIdentity, ObjectStore};
use crate::types::ChildObject;
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::{DynamicObject, ObjectMeta};
use kube::client::Body;
use kube::core::ErrorResponse;
use kube::Client;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// Build the error the API server returns for a failed request
pub fn api_error(code: u16) -> kube::Error {
    let reason = match code {
        404 => "NotFound",
        409 => "Conflict",
        403 => "Forbidden",
        _ => "InternalError",
    };
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("request failed with {}", reason),
        reason: reason.to_string(),
        code,
    })
}

/// Store operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Create,
    Update,
    GetSecret,
}

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub gets: usize,
    pub creates: usize,
    pub updates: usize,
    pub secret_gets: usize,
}

/// In-memory object store
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<ObjectIdentity, DynamicObject>>>,
    secrets: Arc<Mutex<HashMap<(String, String), Secret>>>,
    failures: Arc<Mutex<HashMap<StoreOp, u16>>>,
    operations: Arc<Mutex<OperationCounts>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store with a declared object
    pub fn with_object(self, obj: &ChildObject) -> Self {
        let dynamic = obj.to_dynamic().unwrap();
        let id = ObjectIdentity::of(obj.gvk(), &dynamic);
        self.objects.lock().unwrap().insert(id, dynamic);
        self
    }

    /// Add a secret holding `tls.crt`, or no data at all when `cert` is `None`
    pub fn with_tls_secret(self, namespace: &str, name: &str, cert: Option<&[u8]>) -> Self {
        let secret = Secret {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..Default::default()
            },
            data: cert.map(|c| {
                BTreeMap::from([(TLS_CERT_KEY.to_string(), ByteString(c.to_vec()))])
            }),
            ..Default::default()
        };
        self.secrets
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), secret);
        self
    }

    /// Make every call of `op` fail with the given API status code
    pub fn failing(self, op: StoreOp, code: u16) -> Self {
        self.failures.lock().unwrap().insert(op, code);
        self
    }

    pub fn object(&self, id: &ObjectIdentity) -> Option<DynamicObject> {
        self.objects.lock().unwrap().get(id).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn operation_counts(&self) -> OperationCounts {
        self.operations.lock().unwrap().clone()
    }

    fn check(&self, op: StoreOp) -> Result<(), kube::Error> {
        let mut ops = self.operations.lock().unwrap();
        match op {
            StoreOp::Get => ops.gets += 1,
            StoreOp::Create => ops.creates += 1,
            StoreOp::Update => ops.updates += 1,
            StoreOp::GetSecret => ops.secret_gets += 1,
        }

        match self.failures.lock().unwrap().get(&op) {
            Some(code) => Err(api_error(*code)),
            None => Ok(()),
        }
    }
}

fn next_resource_version(current: Option<&str>) -> String {
    let version: u64 = current.and_then(|v| v.parse().ok()).unwrap_or(0);
    (version + 1).to_string()
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, id: &ObjectIdentity) -> Result<Option<DynamicObject>, kube::Error> {
        self.check(StoreOp::Get)?;
        Ok(self.object(id))
    }

    async fn create(&self, id: &ObjectIdentity, obj: &DynamicObject) -> Result<DynamicObject, kube::Error> {
        self.check(StoreOp::Create)?;
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(id) {
            return Err(api_error(409));
        }

        let mut created = obj.clone();
        created.metadata.resource_version = Some(next_resource_version(None));
        objects.insert(id.clone(), created.clone());
        Ok(created)
    }

    async fn update(&self, id: &ObjectIdentity, obj: &DynamicObject) -> Result<DynamicObject, kube::Error> {
        self.check(StoreOp::Update)?;
        let mut objects = self.objects.lock().unwrap();
        let Some(current) = objects.get(id) else {
            return Err(api_error(404));
        };
        if obj.metadata.resource_version.is_some()
            && obj.metadata.resource_version != current.metadata.resource_version
        {
            return Err(api_error(409));
        }

        let mut updated = obj.clone();
        updated.metadata.resource_version = Some(next_resource_version(
            current.metadata.resource_version.as_deref(),
        ));
        objects.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Secret, kube::Error> {
        self.check(StoreOp::GetSecret)?;
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| api_error(404))
    }
}

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Requests received so far as (method, path)
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let response = self.find_response(&method, &path);
        self.requests.lock().unwrap().push((method, path));

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("object", "")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
