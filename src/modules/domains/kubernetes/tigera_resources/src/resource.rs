/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: src/modules/domains/kubernetes/tigera_resources/src/resource.rs
*
* The read/write side of the provider: a generic adapter that performs the
* create, read, update, delete and import operations for any
* operator.tigera.io kind against a cluster.
*
* Architecture:
* - The adapter talks to the API server through `Api<DynamicObject>` built
*   from the kind's `ApiResource`, so one implementation serves every kind.
* - Create and Update are the same operation: the typed object is marshalled
*   to JSON and sent as a Server-Side Apply PATCH with the resolved field
*   manager and force flag. The object the server returns is unmarshalled
*   back into the model, which is how server-side defaults reach the caller.
* - Read is a GET by name, Delete a DELETE by name. Import only checks the
*   identifier and seeds the model; the caller follows up with a Read.
* - Every call is a single request. Failures are returned as `Error` values
*   and are never retried.
*
* SPDX-License-Identifier: Apache-2.0 */

use kube::api::{Api, DeleteParams, DynamicObject, Patch, PatchParams, PropagationPolicy};
use kube::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::crds::{OperatorObject, OperatorSpec, OBJECT_FIELDS};
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::validation::validate_known_keys;
use crate::wait::{self, WaitForDelete, WaitForUpsert};

/// Model attributes that steer the provider and never reach the cluster.
pub const PROVIDER_ATTRIBUTES: [&str; 6] = [
    "id",
    "field_manager",
    "force_conflicts",
    "deletion_propagation",
    "wait_for_upsert",
    "wait_for_delete",
];

/// Provider-level apply settings a resource can override.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyDefaults {
    pub field_manager: String,
    pub force_conflicts: bool,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletionPropagation {
    Orphan,
    Background,
    Foreground,
}

impl From<DeletionPropagation> for PropagationPolicy {
    fn from(value: DeletionPropagation) -> Self {
        match value {
            DeletionPropagation::Orphan => PropagationPolicy::Orphan,
            DeletionPropagation::Background => PropagationPolicy::Background,
            DeletionPropagation::Foreground => PropagationPolicy::Foreground,
        }
    }
}

/// State of a managed resource: the object itself plus attributes that only
/// steer the provider and are never sent to the cluster.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default", serialize = "S: Serialize"))]
pub struct ResourceModel<S> {
    /// Computed; always equal to `metadata.name` once the resource exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_propagation: Option<DeletionPropagation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_upsert: Option<WaitForUpsert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_delete: Option<WaitForDelete>,
    #[serde(flatten)]
    pub object: OperatorObject<S>,
}

impl<S: OperatorSpec> ResourceModel<S> {
    pub fn new(object: OperatorObject<S>) -> Self {
        Self {
            id: None,
            field_manager: None,
            force_conflicts: None,
            deletion_propagation: None,
            wait_for_upsert: None,
            wait_for_delete: None,
            object,
        }
    }

    /// Parses a model document in YAML or JSON. Unknown top-level keys are
    /// reported as invalid attributes instead of being dropped.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let document: serde_yaml::Value = serde_yaml::from_str(content)?;
        let mut diags = Diagnostics::new();
        let known = [&OBJECT_FIELDS[..], &PROVIDER_ATTRIBUTES[..]].concat();
        validate_known_keys(&document, &known, &mut diags);
        diags.into_result()?;
        Ok(serde_yaml::from_value(document)?)
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    /// Resolves the apply parameters: values set on the resource win over provider defaults.
    pub fn patch_params(&self, defaults: &ApplyDefaults) -> PatchParams {
        let manager = self
            .field_manager
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(&defaults.field_manager);
        let params = PatchParams::apply(manager);
        if self.force_conflicts.unwrap_or(defaults.force_conflicts) {
            params.force()
        } else {
            params
        }
    }

    /// Client-side checks of the object and of the wait settings.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut diags = self.object.diagnostics();
        if let Some(Err(err)) = self.wait_for_upsert.as_ref().map(WaitForUpsert::compile) {
            diags.extend(Diagnostics::from(err));
        }
        if let Some(Err(err)) = self
            .wait_for_delete
            .as_ref()
            .map(|w| wait::parse_duration(&w.timeout))
        {
            diags.extend(Diagnostics::from(err));
        }
        diags
    }

    /// Replaces the object with the one returned by the server.
    fn absorb(&mut self, returned: DynamicObject) -> Result<()> {
        let value = serde_json::to_value(&returned).map_err(Error::Unmarshal)?;
        self.object = serde_json::from_value(value).map_err(Error::Unmarshal)?;
        self.id = Some(self.object.metadata.name.clone());
        Ok(())
    }
}

/// CRUD adapter for one operator.tigera.io kind.
pub struct ResourceAdapter<S> {
    api: Api<DynamicObject>,
    defaults: ApplyDefaults,
    _spec: std::marker::PhantomData<S>,
}

impl<S: OperatorSpec> ResourceAdapter<S> {
    pub fn new(client: Client, defaults: ApplyDefaults) -> Self {
        let api_resource = OperatorObject::<S>::api_resource();
        Self {
            api: Api::all_with(client, &api_resource),
            defaults,
            _spec: std::marker::PhantomData,
        }
    }

    pub async fn create(&self, model: ResourceModel<S>) -> Result<ResourceModel<S>> {
        self.apply(model).await
    }

    pub async fn update(&self, model: ResourceModel<S>) -> Result<ResourceModel<S>> {
        self.apply(model).await
    }

    #[instrument(skip(self, model), fields(kind = S::KIND, name = %model.name()))]
    async fn apply(&self, mut model: ResourceModel<S>) -> Result<ResourceModel<S>> {
        model.object.set_type_meta();
        model.diagnostics().into_result()?;
        let wait = model
            .wait_for_upsert
            .as_ref()
            .map(WaitForUpsert::compile)
            .transpose()?;

        let name = model.name().to_string();
        let body = serde_json::to_value(&model.object).map_err(Error::Marshal)?;
        let params = model.patch_params(&self.defaults);
        debug!(
            "Applying {} '{}' as field manager '{}' (force: {})",
            S::KIND,
            name,
            params.field_manager.as_deref().unwrap_or_default(),
            params.force
        );

        let applied = self
            .api
            .patch(&name, &params, &Patch::Apply(&body))
            .await
            .map_err(|source| Error::Patch {
                name: name.clone(),
                source,
            })?;
        model.absorb(applied)?;

        if let Some(wait) = &wait {
            wait::for_upsert(&self.api, &name, wait).await?;
        }
        info!("Successfully applied {} '{}'.", S::KIND, name);
        Ok(model)
    }

    #[instrument(skip(self, model), fields(kind = S::KIND, name = %model.name()))]
    pub async fn read(&self, mut model: ResourceModel<S>) -> Result<ResourceModel<S>> {
        let name = model.name().to_string();
        let current = self.api.get(&name).await.map_err(|source| Error::Get {
            name: name.clone(),
            source,
        })?;
        model.absorb(current)?;
        debug!("Read {} '{}'.", S::KIND, name);
        Ok(model)
    }

    #[instrument(skip(self, model), fields(kind = S::KIND, name = %model.name()))]
    pub async fn delete(&self, model: &ResourceModel<S>) -> Result<()> {
        let name = model.name();
        let params = DeleteParams {
            propagation_policy: model.deletion_propagation.map(Into::into),
            ..DeleteParams::default()
        };
        self.api
            .delete(name, &params)
            .await
            .map_err(|source| Error::Delete {
                name: name.to_string(),
                source,
            })?;

        if let Some(wait) = &model.wait_for_delete {
            wait::for_delete(&self.api, name, wait).await?;
        }
        info!("Successfully deleted {} '{}'.", S::KIND, name);
        Ok(())
    }

    /// Seeds a model from an import identifier, which must be a single non-empty name.
    pub fn import_state(id: &str) -> Result<ResourceModel<S>> {
        let parts: Vec<&str> = id.split('/').collect();
        if parts.len() != 1 || parts[0].is_empty() {
            return Err(Error::ImportId(id.to_string()));
        }
        let mut model = ResourceModel::new(OperatorObject::new(id));
        model.id = Some(id.to_string());
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crds::api_server::{APIServerLogging, ComponentLogging, LogSeverity};
    use crate::crds::{APIServer, APIServerSpec, LogStorageSpec};
    use http::{Method, Request, Response, StatusCode};
    use kube::client::Body;
    use serde_json::json;

    type ApiServerVerifier = tower_test::mock::Handle<Request<Body>, Response<Body>>;

    fn mock_adapter<S: OperatorSpec>() -> (ResourceAdapter<S>, ApiServerVerifier) {
        let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
        let client = Client::new(mock_service, "default");
        let defaults = ApplyDefaults {
            field_manager: "tigera-provider".to_string(),
            force_conflicts: false,
        };
        (ResourceAdapter::new(client, defaults), handle)
    }

    fn json_response(status: StatusCode, body: serde_json::Value) -> Response<Body> {
        Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn not_found(name: &str) -> Response<Body> {
        json_response(
            StatusCode::NOT_FOUND,
            json!({
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Failure",
                "message": format!("apiservers.operator.tigera.io \"{}\" not found", name),
                "reason": "NotFound",
                "code": 404
            }),
        )
    }

    fn api_server_model() -> ResourceModel<APIServerSpec> {
        let spec = APIServerSpec {
            api_server_deployment: None,
            logging: Some(APIServerLogging {
                api_server: Some(ComponentLogging {
                    log_severity: Some(LogSeverity::Info),
                }),
                query_server: None,
            }),
        };
        let mut object = APIServer::new("default").with_spec(spec);
        object.api_version = String::new();
        object.kind = String::new();
        ResourceModel::new(object)
    }

    fn api_server_list(items: Vec<serde_json::Value>) -> Response<Body> {
        json_response(
            StatusCode::OK,
            json!({
                "apiVersion": "operator.tigera.io/v1",
                "kind": "APIServerList",
                "metadata": {"resourceVersion": "100"},
                "items": items
            }),
        )
    }

    fn wait_until_ready(timeout: &str) -> WaitForUpsert {
        WaitForUpsert {
            conditions: vec![wait::WaitCondition {
                jsonpath: "status.state".to_string(),
                value: "Ready".to_string(),
            }],
            timeout: timeout.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_sends_server_side_apply_patch() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let mut model = api_server_model();
        model.force_conflicts = Some(true);

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::PATCH);
            assert_eq!(
                request.uri().path(),
                "/apis/operator.tigera.io/v1/apiservers/default"
            );
            let query = request.uri().query().unwrap_or_default().to_string();
            assert!(query.contains("fieldManager=tigera-provider"), "{}", query);
            assert!(query.contains("force=true"), "{}", query);
            assert_eq!(
                request.headers().get("content-type").unwrap(),
                "application/apply-patch+yaml"
            );

            let body = request.into_body().collect_bytes().await.unwrap();
            let sent: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(
                sent,
                json!({
                    "apiVersion": "operator.tigera.io/v1",
                    "kind": "APIServer",
                    "metadata": {"name": "default"},
                    "spec": {"logging": {"apiServer": {"logSeverity": "Info"}}}
                })
            );

            let mut returned = sent.clone();
            returned["metadata"]["uid"] = json!("5f0c");
            returned["metadata"]["labels"] = json!({"k8s-app": "calico-apiserver"});
            returned["status"] = json!({"state": "Ready"});
            send.send_response(json_response(StatusCode::OK, returned));
        });

        let created = adapter.create(model).await.unwrap();
        server.await.unwrap();

        assert_eq!(created.id.as_deref(), Some("default"));
        assert_eq!(created.force_conflicts, Some(true));
        assert_eq!(created.object.kind, "APIServer");
        assert_eq!(
            created.object.metadata.labels.unwrap()["k8s-app"],
            "calico-apiserver"
        );
    }

    #[tokio::test]
    async fn test_update_uses_resource_field_manager_without_force() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let mut model = api_server_model();
        model.field_manager = Some("platform-team".to_string());

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            let query = request.uri().query().unwrap_or_default().to_string();
            assert!(query.contains("fieldManager=platform-team"), "{}", query);
            assert!(!query.contains("force=true"), "{}", query);
            let body = request.into_body().collect_bytes().await.unwrap();
            let sent: serde_json::Value = serde_json::from_slice(&body).unwrap();
            send.send_response(json_response(StatusCode::OK, sent));
        });

        let updated = adapter.update(model).await.unwrap();
        server.await.unwrap();
        assert_eq!(updated.field_manager.as_deref(), Some("platform-team"));
    }

    #[tokio::test]
    async fn test_invalid_model_is_rejected_before_any_request() {
        let (adapter, _handle) = mock_adapter::<APIServerSpec>();
        let model = ResourceModel::new(APIServer::new("Not_A_Name"));
        let err = adapter.create(model).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_read_fills_model_and_keeps_provider_attributes() {
        let (adapter, mut handle) = mock_adapter::<LogStorageSpec>();
        let mut model = ResourceAdapter::<LogStorageSpec>::import_state("tigera-secure").unwrap();
        model.deletion_propagation = Some(DeletionPropagation::Foreground);

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::GET);
            assert_eq!(
                request.uri().path(),
                "/apis/operator.tigera.io/v1/logstorages/tigera-secure"
            );
            send.send_response(json_response(
                StatusCode::OK,
                json!({
                    "apiVersion": "operator.tigera.io/v1",
                    "kind": "LogStorage",
                    "metadata": {"name": "tigera-secure", "resourceVersion": "99"},
                    "spec": {"nodes": {"count": 1}, "indices": {"replicas": 0}},
                    "status": {"state": "Ready"}
                }),
            ));
        });

        let read = adapter.read(model).await.unwrap();
        server.await.unwrap();

        assert_eq!(read.id.as_deref(), Some("tigera-secure"));
        assert_eq!(read.deletion_propagation, Some(DeletionPropagation::Foreground));
        let spec = read.object.spec.unwrap();
        assert_eq!(spec.nodes.and_then(|n| n.count), Some(1));
        assert_eq!(spec.indices.and_then(|i| i.replicas), Some(0));
    }

    #[tokio::test]
    async fn test_read_not_found_is_a_get_error() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let server = tokio::spawn(async move {
            let (_request, send) = handle.next_request().await.expect("service not called");
            send.send_response(not_found("default"));
        });

        let err = adapter.read(api_server_model()).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, Error::Get { ref name, .. } if name == "default"));
        assert!(err.to_string().contains("not found"), "{}", err);
    }

    #[tokio::test]
    async fn test_delete_sends_propagation_policy() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let mut model = api_server_model();
        model.deletion_propagation = Some(DeletionPropagation::Background);

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::DELETE);
            assert_eq!(
                request.uri().path(),
                "/apis/operator.tigera.io/v1/apiservers/default"
            );
            let body = request.into_body().collect_bytes().await.unwrap();
            let params: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(params["propagationPolicy"], "Background");
            send.send_response(json_response(
                StatusCode::OK,
                json!({
                    "apiVersion": "operator.tigera.io/v1",
                    "kind": "APIServer",
                    "metadata": {"name": "default", "deletionTimestamp": "2026-01-01T00:00:00Z"}
                }),
            ));
        });

        adapter.delete(&model).await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_failure_is_reported() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let server = tokio::spawn(async move {
            let (_request, send) = handle.next_request().await.expect("service not called");
            send.send_response(not_found("default"));
        });

        let err = adapter.delete(&api_server_model()).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, Error::Delete { .. }));
    }

    #[test]
    fn test_diagnostics_cover_wait_settings() {
        let mut model = api_server_model();
        model.wait_for_upsert = Some(WaitForUpsert {
            conditions: vec![wait::WaitCondition {
                jsonpath: "status..state".to_string(),
                value: "Ready".to_string(),
            }],
            timeout: "1m".to_string(),
        });
        model.wait_for_delete = Some(WaitForDelete {
            timeout: "forever".to_string(),
        });
        let diags = model.diagnostics();
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().all(|d| d.summary == crate::diagnostics::SUMMARY_INVALID));
    }

    #[test]
    fn test_import_state() {
        let model = ResourceAdapter::<APIServerSpec>::import_state("default").unwrap();
        assert_eq!(model.id.as_deref(), Some("default"));
        assert_eq!(model.object.metadata.name, "default");
        assert_eq!(model.object.kind, "APIServer");

        for bad in ["", "ns/default", "/default", "default/"] {
            let err = ResourceAdapter::<APIServerSpec>::import_state(bad).unwrap_err();
            assert!(matches!(err, Error::ImportId(ref id) if id == bad));
        }
    }

    #[test]
    fn test_patch_params_resolution() {
        let defaults = ApplyDefaults {
            field_manager: "tigera-provider".to_string(),
            force_conflicts: true,
        };
        let mut model = api_server_model();
        let params = model.patch_params(&defaults);
        assert_eq!(params.field_manager.as_deref(), Some("tigera-provider"));
        assert!(params.force);

        model.field_manager = Some(String::new());
        model.force_conflicts = Some(false);
        let params = model.patch_params(&defaults);
        assert_eq!(params.field_manager.as_deref(), Some("tigera-provider"));
        assert!(!params.force);
    }

    #[test]
    fn test_provider_attributes_never_reach_the_wire() {
        let mut model = api_server_model();
        model.object.set_type_meta();
        model.field_manager = Some("x".to_string());
        model.wait_for_delete = Some(WaitForDelete::default());
        let wire = serde_json::to_value(&model.object).unwrap();
        assert!(wire.get("field_manager").is_none());
        assert!(wire.get("wait_for_delete").is_none());

        let state = serde_json::to_value(&model).unwrap();
        assert_eq!(state["field_manager"], "x");
        assert_eq!(state["kind"], "APIServer");
    }

    #[tokio::test]
    async fn test_apply_waits_until_conditions_hold() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let mut model = api_server_model();
        model.wait_for_upsert = Some(wait_until_ready("10s"));

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::PATCH);
            let body = request.into_body().collect_bytes().await.unwrap();
            let sent: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert!(sent.get("wait_for_upsert").is_none());
            send.send_response(json_response(StatusCode::OK, sent.clone()));

            let (request, send) = handle.next_request().await.expect("wait did not list");
            assert_eq!(request.method(), Method::GET);
            assert_eq!(request.uri().path(), "/apis/operator.tigera.io/v1/apiservers");
            let query = request.uri().query().unwrap_or_default().to_string();
            assert!(query.contains("fieldSelector=metadata.name%3Ddefault"), "{}", query);
            let mut ready = sent;
            ready["status"] = json!({"state": "Ready"});
            send.send_response(api_server_list(vec![ready]));
        });

        let applied = adapter.create(model).await.unwrap();
        server.await.unwrap();
        assert_eq!(applied.id.as_deref(), Some("default"));
        assert!(applied.wait_for_upsert.is_some());
    }

    #[tokio::test]
    async fn test_apply_wait_times_out() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let mut model = api_server_model();
        model.wait_for_upsert = Some(wait_until_ready("1s"));

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            let body = request.into_body().collect_bytes().await.unwrap();
            let sent: serde_json::Value = serde_json::from_slice(&body).unwrap();
            send.send_response(json_response(StatusCode::OK, sent.clone()));

            let (_request, send) = handle.next_request().await.expect("wait did not list");
            let mut progressing = sent;
            progressing["status"] = json!({"state": "Progressing"});
            send.send_response(api_server_list(vec![progressing]));

            // The watch is left unanswered until the timeout fires.
            let (request, pending) = handle.next_request().await.expect("wait did not watch");
            assert!(request.uri().query().unwrap_or_default().contains("watch=true"));
            (handle, pending)
        });

        let err = adapter.create(model).await.unwrap_err();
        let _open_watch = server.await.unwrap();
        assert!(matches!(err, Error::WaitTimeout { ref name, .. } if name == "default"));

        let diags = Diagnostics::from(err);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, crate::diagnostics::SUMMARY_WAIT);
        assert!(diag.detail.contains("default"), "{}", diag.detail);
    }

    #[tokio::test]
    async fn test_delete_waits_until_gone() {
        let (adapter, mut handle) = mock_adapter::<APIServerSpec>();
        let mut model = api_server_model();
        model.wait_for_delete = Some(WaitForDelete {
            timeout: "10s".to_string(),
        });

        let server = tokio::spawn(async move {
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), Method::DELETE);
            send.send_response(json_response(
                StatusCode::OK,
                json!({
                    "apiVersion": "operator.tigera.io/v1",
                    "kind": "APIServer",
                    "metadata": {"name": "default", "deletionTimestamp": "2026-01-01T00:00:00Z"}
                }),
            ));

            let (request, send) = handle.next_request().await.expect("wait did not list");
            assert_eq!(request.method(), Method::GET);
            assert_eq!(request.uri().path(), "/apis/operator.tigera.io/v1/apiservers");
            send.send_response(api_server_list(vec![]));
        });

        adapter.delete(&model).await.unwrap();
        server.await.unwrap();
    }

    #[test]
    fn test_diagnostics_reject_overflowing_timeout() {
        let mut model = api_server_model();
        model.wait_for_upsert = Some(wait_until_ready("307445734561825861m"));
        let diags = model.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags.iter().next().unwrap().summary,
            crate::diagnostics::SUMMARY_INVALID
        );
    }

    #[test]
    fn test_from_yaml_parses_provider_attributes() {
        let model = ResourceModel::<LogStorageSpec>::from_yaml(
            r#"
apiVersion: operator.tigera.io/v1
kind: LogStorage
metadata:
  name: tigera-secure
spec:
  nodes:
    count: 3
field_manager: ci
force_conflicts: true
deletion_propagation: Foreground
wait_for_delete:
  timeout: 2m
"#,
        )
        .unwrap();
        assert_eq!(model.name(), "tigera-secure");
        assert_eq!(model.field_manager.as_deref(), Some("ci"));
        assert_eq!(model.force_conflicts, Some(true));
        assert_eq!(model.deletion_propagation, Some(DeletionPropagation::Foreground));
        assert_eq!(model.wait_for_delete.unwrap().timeout, "2m");
        assert_eq!(model.object.spec.unwrap().nodes.unwrap().count, Some(3));

        let json = ResourceModel::<APIServerSpec>::from_yaml(
            r#"{"kind": "APIServer", "metadata": {"name": "default"}, "force_conflicts": false}"#,
        )
        .unwrap();
        assert_eq!(json.force_conflicts, Some(false));
    }

    #[test]
    fn test_from_yaml_rejects_misspelled_attributes() {
        let err = ResourceModel::<APIServerSpec>::from_yaml(
            "kind: APIServer\nmetadata: {name: default}\nfield_manger: ci\nwait_for_upsrt: {}\n",
        )
        .unwrap_err();
        match err {
            Error::Validation(diags) => {
                let attributes: Vec<_> = diags.iter().filter_map(|d| d.attribute.as_deref()).collect();
                assert_eq!(attributes, vec!["field_manger", "wait_for_upsrt"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
