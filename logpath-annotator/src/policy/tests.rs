use serde_json::{Value, json};

use super::*;

const LOG_ENABLED: &str = "co.elastic.logs/enabled";

fn settings() -> Value {
    json!({
        "env_key": "LOG_PATH",
        "annotation_base": "co_elastic_logs_path",
        "annotation_ext_format": "co_elastic_logs_path_ext_%d"
    })
}

fn settings_with(extra: Value) -> Value {
    let mut settings = settings();
    if let (Some(settings), Some(extra)) = (settings.as_object_mut(), extra.as_object()) {
        settings.extend(extra.clone());
    }
    settings
}

fn request(kind: &str, object: Value, settings: Value) -> Vec<u8> {
    let payload = json!({
        "request": {
            "uid": "705ab4f5-6393-11e8-b7cc-42010a800002",
            "kind": {"group": "", "version": "v1", "kind": kind},
            "operation": "CREATE",
            "namespace": "default",
            "object": object
        },
        "settings": settings
    });
    serde_json::to_vec(&payload).unwrap()
}

fn container(name: &str, env: &[(&str, &str)]) -> Value {
    let env: Vec<Value> =
        env.iter().map(|(name, value)| json!({"name": name, "value": value})).collect();
    json!({"name": name, "image": "nginx:1.27", "env": env})
}

fn pod(owner_kind: Option<&str>, containers: Value) -> Value {
    let mut metadata = json!({
        "name": "web-5d4f8c7b9-x2x7q",
        "namespace": "default",
        "labels": {"app": "web"}
    });
    if let Some(kind) = owner_kind {
        metadata["ownerReferences"] = json!([{
            "apiVersion": "apps/v1",
            "kind": kind,
            "name": "web-5d4f8c7b9",
            "uid": "3b2a9c5e-2f0e-4f5e-9d61-1c2b3a4d5e6f",
            "controller": true
        }]);
    }
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": metadata,
        "spec": {"containers": containers, "restartPolicy": "Always"}
    })
}

fn replica_set_pod(containers: Value) -> Value { pod(Some("ReplicaSet"), containers) }

fn deployment(pod_spec: Option<Value>) -> Value {
    let mut template = json!({"metadata": {"labels": {"app": "web"}}});
    if let Some(pod_spec) = pod_spec {
        template["spec"] = pod_spec;
    }
    json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": "web",
            "namespace": "default",
            "annotations": {"deployment.kubernetes.io/revision": "1"}
        },
        "spec": {
            "replicas": 2,
            "selector": {"matchLabels": {"app": "web"}},
            "template": template
        }
    })
}

fn expected(entries: &[(&str, &str)]) -> Value {
    Value::Object(entries.iter().map(|(key, value)| ((*key).to_string(), json!(value))).collect())
}

fn mutated(response: &ValidationResponse) -> &Value {
    assert!(response.accepted, "request was rejected: {:?}", response.message);
    response.mutated_object.as_ref().expect("expected a mutated object")
}

fn pod_annotations(response: &ValidationResponse) -> &Value {
    &mutated(response)["metadata"]["annotations"]
}

fn assert_accepted_unchanged(response: &ValidationResponse) {
    assert!(response.accepted, "request was rejected: {:?}", response.message);
    assert!(response.mutated_object.is_none(), "unexpected mutation");
}

#[test]
fn test_pod_with_multiple_log_paths() {
    let object = replica_set_pod(json!([container("my-container", &[
        ("LOG_PATH", "/var/log/nginx/access.log"),
        ("LOG_PATH", "/var/log/nginx/error.log"),
        ("LOG_PATH", "/var/log/nginx/debug.log"),
        ("LOG_PATH", "/var/log/app/app.log"),
        ("LOG_PATH", "/var/log/app/error.log"),
    ])]));
    let response = validate(&request("Pod", object, settings()));

    assert_eq!(
        pod_annotations(&response),
        &expected(&[
            ("co_elastic_logs_path", "/var/log/nginx/access.log"),
            ("co_elastic_logs_path_ext_1", "/var/log/nginx/error.log"),
            ("co_elastic_logs_path_ext_2", "/var/log/nginx/debug.log"),
            ("co_elastic_logs_path_ext_3", "/var/log/app/app.log"),
            ("co_elastic_logs_path_ext_4", "/var/log/app/error.log"),
        ])
    );
}

#[test]
fn test_pod_only_first_container_is_inspected() {
    let object = replica_set_pod(json!([
        container("container1", &[("LOG_PATH", "/var/log/app1.log")]),
        container("container2", &[("LOG_PATH", "/var/log/app2.log")]),
    ]));
    let response = validate(&request("Pod", object, settings()));

    assert_eq!(
        pod_annotations(&response),
        &expected(&[("co_elastic_logs_path", "/var/log/app1.log")])
    );
}

#[test]
fn test_pod_without_log_path_gets_enabled_marker() {
    let object = replica_set_pod(json!([container("my-container", &[("OTHER_ENV", "x")])]));
    let response = validate(&request("Pod", object, settings()));

    assert_eq!(pod_annotations(&response), &expected(&[(LOG_ENABLED, "true")]));
}

#[test]
fn test_pod_existing_annotations_are_kept() {
    let mut object =
        replica_set_pod(json!([container("my-container", &[("LOG_PATH", "/var/log/app.log")])]));
    object["metadata"]["annotations"] =
        json!({"existing_annotation": "value", "co_elastic_logs_path": "/stale.log"});
    let response = validate(&request("Pod", object, settings()));

    assert_eq!(
        pod_annotations(&response),
        &expected(&[
            ("existing_annotation", "value"),
            ("co_elastic_logs_path", "/var/log/app.log"),
        ])
    );
}

#[test]
fn test_pod_additional_annotations() {
    let settings = settings_with(json!({
        "additional_annotations": {
            "custom.annotation/key1": "value1",
            "co_elastic_logs_multiline_negate": false,
            "co_elastic_logs_multiline_max_lines": 50,
            "co_elastic_logs_sample_ratio": 0.25,
            "co_elastic_logs_path": "/forced.log",
            "ignored": null
        }
    }));
    let object =
        replica_set_pod(json!([container("my-container", &[("LOG_PATH", "/var/log/app.log")])]));
    let response = validate(&request("Pod", object, settings));

    assert_eq!(
        pod_annotations(&response),
        &expected(&[
            ("co_elastic_logs_path", "/forced.log"),
            ("custom.annotation/key1", "value1"),
            ("co_elastic_logs_multiline_negate", "false"),
            ("co_elastic_logs_multiline_max_lines", "50"),
            ("co_elastic_logs_sample_ratio", "0.250000"),
        ])
    );
}

#[test]
fn test_pod_additional_annotations_with_fallback() {
    let settings = settings_with(json!({"additional_annotations": {"k": "v", "flag": true}}));
    let object = replica_set_pod(json!([container("my-container", &[])]));
    let response = validate(&request("Pod", object, settings));

    assert_eq!(
        pod_annotations(&response),
        &expected(&[(LOG_ENABLED, "true"), ("k", "v"), ("flag", "true")])
    );
}

#[test]
fn test_pod_without_containers() {
    let response = validate(&request("Pod", replica_set_pod(json!([])), settings()));
    assert_eq!(pod_annotations(&response), &expected(&[(LOG_ENABLED, "true")]));

    let settings = settings_with(json!({"empty_containers": "skip"}));
    let response = validate(&request("Pod", replica_set_pod(json!([])), settings));
    assert_accepted_unchanged(&response);
}

#[test]
fn test_pod_without_spec_counts_as_no_containers() {
    let mut object = replica_set_pod(json!([]));
    let _spec = object.as_object_mut().unwrap().remove("spec");

    let response = validate(&request("Pod", object.clone(), settings()));
    assert_eq!(pod_annotations(&response), &expected(&[(LOG_ENABLED, "true")]));

    let settings = settings_with(json!({"empty_containers": "skip"}));
    assert_accepted_unchanged(&validate(&request("Pod", object, settings)));
}

#[test]
fn test_pod_owner_filter() {
    let containers = json!([container("app", &[("LOG_PATH", "/var/log/app.log")])]);

    for owner in [None, Some("StatefulSet"), Some("replicaset")] {
        let response = validate(&request("Pod", pod(owner, containers.clone()), settings()));
        assert_accepted_unchanged(&response);
    }

    let settings = settings_with(json!({"pod_owner_filter": "any"}));
    let response = validate(&request("Pod", pod(None, containers), settings));
    assert_eq!(
        pod_annotations(&response),
        &expected(&[("co_elastic_logs_path", "/var/log/app.log")])
    );
}

#[test]
fn test_kind_is_case_insensitive() {
    for kind in ["pod", "POD", "pOd"] {
        let object = replica_set_pod(json!([container("app", &[("LOG_PATH", "/a.log")])]));
        assert!(validate(&request(kind, object, settings())).is_mutation());
    }
    for kind in ["deployment", "DEPLOYMENT"] {
        let object = deployment(Some(json!({"containers": [container("app", &[])]})));
        assert!(validate(&request(kind, object, settings())).is_mutation());
    }
    for kind in ["pods", "Deployments", "ReplicaSet"] {
        let object = replica_set_pod(json!([container("app", &[("LOG_PATH", "/a.log")])]));
        assert_accepted_unchanged(&validate(&request(kind, object, settings())));
    }
}

#[test]
fn test_pod_mutation_only_touches_annotations() {
    let object = replica_set_pod(json!([container("app", &[("LOG_PATH", "/a.log")])]));
    let response = validate(&request("Pod", object.clone(), settings()));

    let mut restored = mutated(&response).clone();
    let _annotations = restored["metadata"].as_object_mut().unwrap().remove("annotations");
    assert_eq!(restored, object);
    assert_eq!(serde_json::to_string(&restored).unwrap(), serde_json::to_string(&object).unwrap());
}

#[test]
fn test_pod_mutation_is_idempotent() {
    let object = replica_set_pod(json!([container("app", &[
        ("LOG_PATH", "/a.log"),
        ("LOG_PATH", "/b.log")
    ])]));
    let first = validate(&request("Pod", object, settings()));
    let second = validate(&request("Pod", mutated(&first).clone(), settings()));

    assert_eq!(mutated(&first), mutated(&second));
}

#[test]
fn test_deployment_template_is_annotated() {
    let object = deployment(Some(json!({"containers": [container("web", &[
        ("LOG_PATH", "/var/log/access.log"),
        ("LOG_PATH", "/var/log/error.log"),
    ])]})));
    let response = validate(&request("Deployment", object.clone(), settings()));
    let mutated = mutated(&response);

    assert_eq!(
        mutated["spec"]["template"]["metadata"]["annotations"],
        expected(&[
            ("co_elastic_logs_path", "/var/log/access.log"),
            ("co_elastic_logs_path_ext_1", "/var/log/error.log"),
        ])
    );
    assert_eq!(mutated["metadata"], object["metadata"]);
    assert_eq!(mutated["spec"]["template"]["metadata"]["labels"], json!({"app": "web"}));
    assert_eq!(mutated["spec"]["replicas"], 2);
}

#[test]
fn test_deployment_ignores_owner_filter() {
    let object = deployment(Some(json!({"containers": [container("web", &[])]})));
    let response = validate(&request("Deployment", object, settings()));

    assert_eq!(
        mutated(&response)["spec"]["template"]["metadata"]["annotations"],
        expected(&[(LOG_ENABLED, "true")])
    );
}

#[test]
fn test_deployment_template_metadata_is_created() {
    let mut object = deployment(Some(json!({"containers": [container("web", &[])]})));
    let _metadata = object["spec"]["template"].as_object_mut().unwrap().remove("metadata");
    let response = validate(&request("Deployment", object, settings()));

    assert_eq!(
        mutated(&response)["spec"]["template"]["metadata"],
        json!({"annotations": {LOG_ENABLED: "true"}})
    );
}

#[test]
fn test_deployment_without_template_spec() {
    let response = validate(&request("Deployment", deployment(None), settings()));
    assert_accepted_unchanged(&response);
}

#[test]
fn test_deployment_without_containers() {
    let object = deployment(Some(json!({"containers": []})));
    let settings = settings_with(json!({"empty_containers": "skip"}));
    assert_accepted_unchanged(&validate(&request("Deployment", object, settings)));
}

#[test]
fn test_deployment_mutation_is_idempotent() {
    let object = deployment(Some(json!({"containers": [container("web", &[("LOG_PATH", "/a")])]})));
    let first = validate(&request("Deployment", object, settings()));
    let second = validate(&request("Deployment", mutated(&first).clone(), settings()));

    assert_eq!(mutated(&first), mutated(&second));
}

#[test]
fn test_other_kinds_are_accepted() {
    let service = json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": {"name": "test-service"},
        "spec": {"selector": {"app": "test"}, "ports": [{"port": 80, "targetPort": 8080}]}
    });
    assert_accepted_unchanged(&validate(&request("Service", service, settings())));
}

#[test]
fn test_malformed_object_is_rejected() {
    let object = json!({"apiVersion": "v1", "kind": "Pod", "spec": {"containers": "nope"}});
    let response = validate(&request("Pod", object, settings()));

    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
    assert!(response.message.is_some_and(|message| !message.is_empty()));
    assert!(response.mutated_object.is_none());
}

#[test]
fn test_malformed_deployment_is_rejected() {
    let object = json!({"apiVersion": "apps/v1", "kind": "Deployment", "spec": "nope"});
    let response = validate(&request("Deployment", object, settings()));

    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
}

#[test]
fn test_malformed_request_is_rejected() {
    let response = validate(br#"{"request": "#);

    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
}

#[test]
fn test_invalid_settings_reject_request() {
    let settings = json!({"annotation_base": "base", "annotation_ext_format": "ext_%d"});
    let object = replica_set_pod(json!([container("app", &[("LOG_PATH", "/a.log")])]));
    let response = validate(&request("Pod", object, settings));

    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
    assert_eq!(response.message.as_deref(), Some("env_key cannot be empty"));
}

#[test]
fn test_validate_request_matches_validate() {
    let object = replica_set_pod(json!([container("app", &[("LOG_PATH", "/a.log")])]));
    let payload = request("Pod", object, settings());
    let parsed: ValidationRequest = serde_json::from_slice(&payload).unwrap();

    assert_eq!(validate_request(parsed), validate(&payload));
}

#[test]
fn test_validate_settings_accepts_valid_settings() {
    let payload = serde_json::to_vec(&settings()).unwrap();
    assert_eq!(validate_settings(&payload), SettingsValidationResponse::accept());
}

#[test]
fn test_validate_settings_reports_first_failing_rule() {
    let cases = [
        (json!({}), "env_key cannot be empty"),
        (json!({"env_key": "A", "annotation_ext_format": "x"}), "annotation_base cannot be empty"),
        (json!({"env_key": "A", "annotation_base": "b"}), "annotation_ext_format cannot be empty"),
        (
            settings_with(json!({"additional_annotations": {"": "v"}})),
            "additional_annotations keys cannot be empty",
        ),
        (
            settings_with(json!({"additional_annotations": {"k": ""}})),
            "additional_annotations string values cannot be empty",
        ),
        (
            settings_with(json!({"annotation_ext_format": "ext"})),
            "annotation_ext_format must contain %d placeholder",
        ),
    ];

    for (settings, message) in cases {
        let response = validate_settings(&serde_json::to_vec(&settings).unwrap());
        assert!(!response.valid);
        assert_eq!(
            response.message.as_deref(),
            Some(format!("Provided settings are not valid: {message}").as_str())
        );
    }
}

#[test]
fn test_validate_settings_malformed_document() {
    let response = validate_settings(br#"{"env_key": "my_env""#);

    assert!(!response.valid);
    assert!(
        response.message.is_some_and(|message| message.starts_with("Provided settings are not valid: "))
    );
}

#[test]
fn test_validate_settings_accepts_null_additional_annotations() {
    let payload = serde_json::to_vec(&settings_with(json!({"additional_annotations": null}))).unwrap();
    assert_eq!(validate_settings(&payload), SettingsValidationResponse::accept());
}

#[test]
fn test_validate_settings_null_env_key() {
    let response = validate_settings(&serde_json::to_vec(&settings_with(json!({"env_key": null}))).unwrap());

    assert!(!response.valid);
    assert_eq!(
        response.message.as_deref(),
        Some("Provided settings are not valid: env_key cannot be empty")
    );
}

#[test]
fn test_validate_settings_rejects_non_object_documents() {
    let payloads: [&[u8]; 3] = [b"[]", br#"["LOG_PATH", "base", "ext_%d"]"#, b"42"];
    for payload in payloads {
        let response = validate_settings(payload);
        assert!(!response.valid);
        assert!(response.message.is_some_and(|message| {
            message.starts_with("Provided settings are not valid: invalid type:")
                && message.ends_with("expected a settings object")
        }));
    }
}

#[test]
fn test_non_object_settings_reject_request() {
    let object = replica_set_pod(json!([container("app", &[("LOG_PATH", "/a.log")])]));
    let response = validate(&request("Pod", object, json!(["LOG_PATH", "base", "ext_%d"])));

    assert!(!response.accepted);
    assert_eq!(response.code, Some(400));
    assert_eq!(
        response.message.as_deref(),
        Some("invalid type: sequence, expected a settings object")
    );
}

#[test]
fn test_events_go_to_the_scoped_subscriber() {
    let subscriber = tracing_subscriber::fmt().with_test_writer().finish();
    let response = tracing::subscriber::with_default(subscriber, || {
        validate_settings(&serde_json::to_vec(&json!({})).unwrap())
    });
    assert!(!response.valid);
}
