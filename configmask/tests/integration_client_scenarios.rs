//! Client scenario tests - connector configurations as they are logged in practice.
//!
//! Kafka style sink and source configs carry a truststore password next to
//! values operators need to see. The password must never reach a log line,
//! while the object itself stays untouched for the client library.

use std::{
    fmt::{self, Write as _},
    sync::{Arc, Mutex},
};

use configmask::{MaskedConfig, json::MaskedSerializeExt, tracing::TracingMaskedExt};
use serde::Serialize;
use tracing::{Event, Subscriber, info};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
};

#[derive(Clone, MaskedConfig, Serialize)]
#[masked(rename_all = "camelCase", display)]
#[serde(rename_all = "camelCase")]
struct KafkaSinkConfig {
    #[field_doc(required = true, help = "Comma separated list of brokers")]
    bootstrap_servers: String,
    #[field_doc(required = true, help = "Topic to produce to")]
    topic: String,
    #[field_doc(help = "Path to the truststore")]
    ssl_truststore_location: Option<String>,
    #[field_doc(sensitive = true, help = "Password of the truststore")]
    ssl_truststore_password: Option<String>,
    #[field_doc(default_value = "1", help = "Number of acknowledgments")]
    acks: String,
}

#[derive(Clone, MaskedConfig, Serialize)]
#[masked(rename_all = "camelCase", display)]
#[serde(rename_all = "camelCase")]
struct KafkaSourceConfig {
    bootstrap_servers: String,
    topic: String,
    group_id: String,
    #[field_doc(sensitive = true)]
    ssl_truststore_password: String,
    #[field_doc(sensitive = true, help = "SASL JAAS configuration")]
    sasl_jaas_config: Option<String>,
}

fn sink_config() -> KafkaSinkConfig {
    KafkaSinkConfig {
        bootstrap_servers: "broker-1:9093,broker-2:9093".into(),
        topic: "orders".into(),
        ssl_truststore_location: Some("/etc/kafka/truststore.jks".into()),
        ssl_truststore_password: Some("changeit".into()),
        acks: "all".into(),
    }
}

fn source_config() -> KafkaSourceConfig {
    KafkaSourceConfig {
        bootstrap_servers: "broker-1:9093".into(),
        topic: "payments".into(),
        group_id: "billing".into(),
        ssl_truststore_password: "changeit".into(),
        sasl_jaas_config: None,
    }
}

mod display {
    use super::*;

    #[test]
    fn sink_config_masks_truststore_password() {
        let rendered = sink_config().to_string();
        assert_eq!(
            rendered,
            "{bootstrapServers=broker-1:9093,broker-2:9093, topic=orders, \
             sslTruststoreLocation=/etc/kafka/truststore.jks, \
             sslTruststorePassword=********, acks=all}"
        );
    }

    #[test]
    fn source_config_keeps_operational_fields() {
        let rendered = source_config().to_string();
        assert!(rendered.contains("sslTruststorePassword=********"));
        assert!(rendered.contains("bootstrapServers=broker-1:9093"));
        assert!(rendered.contains("topic=payments"));
        assert!(rendered.contains("groupId=billing"));
        assert!(rendered.contains("saslJaasConfig=null"));
        assert!(!rendered.contains("changeit"));
    }

    #[test]
    fn debug_output_is_masked_too() {
        let rendered = format!("{:?}", source_config());
        assert!(rendered.starts_with("KafkaSourceConfig { "));
        assert!(rendered.contains("sslTruststorePassword: \"********\""));
        assert!(!rendered.contains("changeit"));
    }
}

mod untouched_object {
    use super::*;

    #[test]
    fn plain_serialization_still_contains_the_secret() {
        let config = source_config();
        let _masked = config.to_string();
        let plain = serde_json::to_string(&config).unwrap();
        assert!(plain.contains("\"sslTruststorePassword\":\"changeit\""));
    }

    #[test]
    fn masked_serialization_matches_plain_keys() {
        let config = sink_config();
        let plain = serde_json::to_value(&config).unwrap();
        let masked = serde_json::to_value(config.masked()).unwrap();
        let plain_keys: Vec<_> = plain.as_object().unwrap().keys().collect();
        let masked_keys: Vec<_> = masked.as_object().unwrap().keys().collect();
        assert_eq!(plain_keys, masked_keys);
        assert_eq!(masked["sslTruststorePassword"], "********");
    }
}

mod logging_sink {
    use super::*;

    /// A sink that logs the config it was opened with.
    struct KafkaSink {
        config: KafkaSinkConfig,
    }

    impl KafkaSink {
        fn open(config: KafkaSinkConfig) -> Self {
            info!(config = config.tracing_masked(), "opening kafka sink");
            Self { config }
        }
    }

    #[derive(Clone, Default)]
    struct FieldCapture(Arc<Mutex<Vec<String>>>);

    struct FieldVisitor<'a>(&'a mut String);

    impl tracing::field::Visit for FieldVisitor<'_> {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
            if field.name() == "config" {
                let _ = write!(self.0, "{value:?}");
            }
        }
    }

    impl<S: Subscriber> Layer<S> for FieldCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut config = String::new();
            event.record(&mut FieldVisitor(&mut config));
            if !config.is_empty() {
                self.0.lock().unwrap().push(config);
            }
        }
    }

    #[test]
    fn opening_the_sink_logs_masked_config() {
        let capture = FieldCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let sink = tracing::subscriber::with_default(subscriber, || KafkaSink::open(sink_config()));

        let logged = capture.0.lock().unwrap().clone();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].contains("sslTruststorePassword=********"));
        assert!(!logged[0].contains("changeit"));
        assert_eq!(
            sink.config.ssl_truststore_password.as_deref(),
            Some("changeit")
        );
    }
}
