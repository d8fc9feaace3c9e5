//! Bounded model invocation
//!
//! Exactly one upstream call per request, raced against a per-endpoint
//! wall-clock budget. On expiry the in-flight future is dropped, which
//! cancels the underlying transport request; no retry or backoff exists at
//! this layer. Upstream failures are classified here into the API error
//! taxonomy.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::model_client::{ModelClient, ModelError};

/// Fixed per-endpoint invocation parameters
#[derive(Debug, Clone, Copy)]
pub struct EndpointParams {
    pub name: &'static str,
    pub timeout: Duration,
    pub max_tokens: u32,
}

/// Combined analysis: largest reply, largest budget
pub const ANALYZE_DOCUMENT: EndpointParams = EndpointParams {
    name: "analyze-document",
    timeout: Duration::from_secs(45),
    max_tokens: 1500,
};

pub const BRAND_ALIGNMENT: EndpointParams = EndpointParams {
    name: "brand-alignment",
    timeout: Duration::from_secs(20),
    max_tokens: 1024,
};

pub const PERSONA_ALIGNMENT: EndpointParams = EndpointParams {
    name: "persona-alignment",
    timeout: Duration::from_secs(30),
    max_tokens: 1024,
};

/// Invoke the model once within the endpoint's budget and return the raw
/// reply text.
pub async fn invoke_model(
    model: &dyn ModelClient,
    params: &EndpointParams,
    system: &str,
    prompt: &str,
) -> Result<String, ApiError> {
    let request_id = Uuid::new_v4();
    let started = Instant::now();

    debug!(
        request_id = %request_id,
        endpoint = params.name,
        provider = model.name(),
        prompt_chars = prompt.chars().count(),
        "Invoking model"
    );

    let raw = match tokio::time::timeout(
        params.timeout,
        model.complete(system, prompt, params.max_tokens),
    )
    .await
    {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => {
            warn!(
                request_id = %request_id,
                endpoint = params.name,
                error = %e,
                "Model call failed"
            );
            return Err(classify_model_error(e));
        }
        Err(_) => {
            warn!(
                request_id = %request_id,
                endpoint = params.name,
                budget_secs = params.timeout.as_secs(),
                "Model call exceeded budget; in-flight request dropped"
            );
            return Err(ApiError::Timeout {
                budget_secs: params.timeout.as_secs(),
            });
        }
    };

    info!(
        request_id = %request_id,
        endpoint = params.name,
        latency_ms = started.elapsed().as_millis() as u64,
        reply_chars = raw.chars().count(),
        "Model call complete"
    );

    Ok(raw)
}

/// Map a model client error to the API taxonomy. The upstream status code
/// is preserved for rate-limit, auth, and availability failures.
fn classify_model_error(err: ModelError) -> ApiError {
    match err {
        ModelError::Http { status, message } => match status {
            429 => ApiError::UpstreamRateLimited { status },
            401 | 403 => ApiError::UpstreamAuth { status },
            500..=599 => ApiError::UpstreamUnavailable { status },
            _ => ApiError::Internal(format!("unexpected upstream status {}: {}", status, message)),
        },
        ModelError::Decode(msg) => ApiError::MalformedUpstream(msg),
        ModelError::Empty => {
            ApiError::MalformedUpstream("reply contained no text content".to_string())
        }
        ModelError::Network(msg) => ApiError::Internal(format!("model transport failure: {}", msg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct HangingClient;

    #[async_trait]
    impl ModelClient for HangingClient {
        fn name(&self) -> &'static str {
            "hanging"
        }

        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, ModelError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            unreachable!()
        }
    }

    struct FixedClient(&'static str);

    #[async_trait]
    impl ModelClient for FixedClient {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn complete(&self, _: &str, _: &str, _: u32) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    const TEST_PARAMS: EndpointParams = EndpointParams {
        name: "test",
        timeout: Duration::from_secs(5),
        max_tokens: 64,
    };

    #[tokio::test(start_paused = true)]
    async fn hung_upstream_times_out() {
        let result = invoke_model(&HangingClient, &TEST_PARAMS, "sys", "prompt").await;
        match result {
            Err(ApiError::Timeout { budget_secs }) => assert_eq!(budget_secs, 5),
            other => panic!("expected timeout, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn successful_reply_passed_through() {
        let raw = invoke_model(&FixedClient("{\"score\": 5}"), &TEST_PARAMS, "sys", "prompt")
            .await
            .unwrap();
        assert_eq!(raw, "{\"score\": 5}");
    }

    #[test]
    fn classification_preserves_upstream_status() {
        let err = classify_model_error(ModelError::Http {
            status: 429,
            message: "slow down".to_string(),
        });
        assert!(matches!(err, ApiError::UpstreamRateLimited { status: 429 }));

        let err = classify_model_error(ModelError::Http {
            status: 403,
            message: "bad key".to_string(),
        });
        assert!(matches!(err, ApiError::UpstreamAuth { status: 403 }));

        let err = classify_model_error(ModelError::Http {
            status: 503,
            message: "overloaded".to_string(),
        });
        assert!(matches!(err, ApiError::UpstreamUnavailable { status: 503 }));
    }

    #[test]
    fn unexpected_status_is_internal() {
        let err = classify_model_error(ModelError::Http {
            status: 302,
            message: "moved".to_string(),
        });
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn empty_reply_is_malformed() {
        let err = classify_model_error(ModelError::Empty);
        assert!(matches!(err, ApiError::MalformedUpstream(_)));
    }
}
