//! JSON output of masked configurations.
//!
//! These tests verify that:
//! - the `Masked` wrapper serializes the redacted projection in declaration order
//! - `serialize_with` helpers mask config fields of otherwise plain structs
//! - `to_masked_value` / `to_masked_json` agree with each other
//! - nested objects keep declaration order in every output form

use configmask::{
    MaskedConfig, Masker,
    json::{self, Masked, MaskedSerializeExt, to_masked_json, to_masked_value},
    text,
};
use serde::Serialize;
use serde_json::json;

#[derive(MaskedConfig, Serialize)]
#[masked(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
struct PulsarConfig {
    service_url: String,
    #[field_doc(sensitive, help = "Authentication token")]
    auth_token: String,
    topic_names: Vec<String>,
}

fn pulsar() -> PulsarConfig {
    PulsarConfig {
        service_url: "pulsar://localhost:6650".into(),
        auth_token: "eyJhbGciOi".into(),
        topic_names: vec!["orders".into(), "payments".into()],
    }
}

#[test]
fn test_masked_wrapper_serializes_in_order() {
    let text = serde_json::to_string(&pulsar().masked()).unwrap();
    assert_eq!(
        text,
        r#"{"serviceUrl":"pulsar://localhost:6650","authToken":"********","topicNames":["orders","payments"]}"#
    );
}

#[test]
fn test_masked_wrapper_pretty() {
    let config = pulsar();
    let pretty = serde_json::to_string_pretty(&Masked::new(&config)).unwrap();
    assert!(pretty.contains("\"authToken\": \"********\""));
    assert!(!pretty.contains("eyJhbGciOi"));
}

#[test]
fn test_value_and_string_agree() {
    let config = pulsar();
    let value = to_masked_value(&config).into_output().unwrap();
    let text = to_masked_json(&config).into_output().unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), value);
    assert_eq!(value["authToken"], json!("********"));
}

#[test]
fn test_masked_outputs_are_tagged_masked() {
    let config = pulsar();
    assert!(to_masked_value(&config).is_masked());
    assert!(to_masked_json(&config).is_masked());
}

#[test]
fn test_serialize_with_on_plain_struct() {
    #[derive(Serialize)]
    struct ConnectorStatus {
        name: String,
        #[serde(serialize_with = "json::serialize")]
        config: PulsarConfig,
        #[serde(serialize_with = "json::serialize_option")]
        previous: Option<PulsarConfig>,
    }

    let status = ConnectorStatus {
        name: "pulsar-sink".into(),
        config: pulsar(),
        previous: None,
    };
    let value = serde_json::to_value(&status).unwrap();
    assert_eq!(value["config"]["authToken"], json!("********"));
    assert_eq!(value["config"]["serviceUrl"], json!("pulsar://localhost:6650"));
    assert_eq!(value["previous"], json!(null));
    assert_eq!(value["name"], json!("pulsar-sink"));
}

#[test]
fn test_masked_with_custom_masker() {
    let config = pulsar();
    let wrapper = config.masked_with(Masker::new().with_max_depth(0));
    // Nothing can be projected at depth zero, so the wrapper falls back.
    assert!(wrapper.render_json().is_fallback());
    let text = serde_json::to_string(&wrapper).unwrap();
    assert!(text.contains("eyJhbGciOi"));
}

#[test]
fn test_masked_wrapper_debug_does_not_leak() {
    let config = pulsar();
    let debug = format!("{:?}", config.masked());
    assert!(!debug.contains("eyJhbGciOi"));
}

#[derive(MaskedConfig, Serialize)]
struct Outer {
    zulu: String,
    #[masked(nested)]
    inner: Inner,
    apple: String,
}

#[derive(MaskedConfig, Serialize)]
struct Inner {
    zeta: String,
    #[field_doc(sensitive)]
    alpha: String,
}

fn outer() -> Outer {
    Outer {
        zulu: "z".into(),
        inner: Inner {
            zeta: "1".into(),
            alpha: "2".into(),
        },
        apple: "a".into(),
    }
}

#[test]
fn test_outputs_keep_declaration_order() {
    let config = outer();
    let value = to_masked_value(&config).into_output().unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["zulu", "inner", "apple"]);
    let nested: Vec<_> = value["inner"].as_object().unwrap().keys().collect();
    assert_eq!(nested, ["zeta", "alpha"]);

    assert_eq!(
        to_masked_json(&config).into_output().as_deref(),
        Some(r#"{"zulu":"z","inner":{"zeta":"1","alpha":"********"},"apple":"a"}"#)
    );
    assert_eq!(
        serde_json::to_string(&config.masked()).unwrap(),
        r#"{"zulu":"z","inner":{"zeta":"1","alpha":"********"},"apple":"a"}"#
    );
    assert_eq!(
        text::to_masked_string(&config),
        r#"{zulu=z, inner={"zeta":"1","alpha":"********"}, apple=a}"#
    );
}
