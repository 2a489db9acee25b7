//! Integration tests for the lookup services
//!
//! The external collaborators (token endpoint, bureau, historical source) are
//! played by a wiremock server; call counts are asserted with `expect`.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use consulta_tests::*;
use shared::models::demographic::{RecordSource, SearchResponse};
use shared::repositories::token_repository::TokenRepository;
use shared::services::bureau_service::BureauClient;
use shared::services::errors::bureau_service_errors::BureauServiceError;
use shared::services::errors::resolution_service_errors::ResolutionServiceError;
use shared::services::errors::token_service_errors::TokenServiceError;
use shared::services::historical_service::HistoricalClient;
use shared::services::token_service::{TokenProvider, TOKEN_EXPIRES_AT_KEY, TOKEN_KEY};

mod token_cache {
    use super::*;

    #[tokio::test]
    async fn test_fresh_cached_token_makes_no_network_call() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, "unused", 0).await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "cached", Duration::minutes(30)).await;

        let token = h.tokens.get_token().await.unwrap();
        assert_eq!(token.value, "cached");
    }

    #[tokio::test]
    async fn test_token_within_safety_buffer_is_refreshed_once() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, "fresh", 1).await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "stale", Duration::minutes(4)).await;

        let token = h.tokens.get_token().await.unwrap();
        assert_eq!(token.value, "fresh");
    }

    #[tokio::test]
    async fn test_missing_token_is_fetched_and_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("scope=https"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "new"})))
            .expect(1)
            .mount(&server)
            .await;
        let h = harness(&config_for(&server));

        let before = Utc::now();
        let token = h.tokens.get_token().await.unwrap();
        assert_eq!(token.value, "new");
        // expires_in omitted: one hour
        assert!(token.expires_at >= before + Duration::seconds(3600));
        assert!(token.expires_at <= Utc::now() + Duration::seconds(3600));

        assert_eq!(
            h.repository.get(TOKEN_KEY).await.unwrap(),
            Some("new".to_string())
        );
        let stored = h.repository.get(TOKEN_EXPIRES_AT_KEY).await.unwrap().unwrap();
        assert_eq!(
            DateTime::parse_from_rfc3339(&stored).unwrap(),
            token.expires_at
        );

        // Second call is served from the store.
        assert_eq!(h.tokens.get_token().await.unwrap().value, "new");
    }

    #[tokio::test]
    async fn test_token_endpoint_error_is_a_refresh_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .expect(1)
            .mount(&server)
            .await;
        let h = harness(&config_for(&server));

        let err = h.tokens.get_token().await.unwrap_err();
        assert!(matches!(
            err,
            TokenServiceError::UnexpectedStatus { status: 500, ref body } if body == "down"
        ));
        assert_eq!(h.repository.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_response_without_access_token_is_a_refresh_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": 3600})))
            .expect(1)
            .mount(&server)
            .await;
        let h = harness(&config_for(&server));

        let err = h.tokens.get_token().await.unwrap_err();
        assert!(matches!(err, TokenServiceError::MissingAccessToken));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refresh() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, "fresh", 1).await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "cached", Duration::minutes(30)).await;

        h.tokens.invalidate().await;
        assert_eq!(h.tokens.get_token().await.unwrap().value, "fresh");
    }
}

mod bureau_client {
    use super::*;

    #[tokio::test]
    async fn test_lookup_sends_document_and_product_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOOKUP_PATH))
            .and(body_partial_json(json!({
                "applicants": {"primaryConsumer": {"personalInformation": {
                    "tipoDocumento": "C",
                    "numeroDocumento": CEDULA
                }}},
                "productData": {"customer": "ECICHAPPYPAY", "shipTo": "EC004002B001S001"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(bureau_record()))
            .expect(1)
            .mount(&server)
            .await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "cached", Duration::minutes(30)).await;

        let record = h.bureau.fetch_demographics(CEDULA).await.unwrap();
        assert_eq!(record, bureau_record());
    }

    #[tokio::test]
    async fn test_first_401_refreshes_and_retries_once() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(&server, "stale", ResponseTemplate::new(401), 1).await;
        mount_lookup(
            &server,
            "fresh",
            ResponseTemplate::new(200).set_body_json(bureau_record()),
            1,
        )
        .await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "stale", Duration::minutes(30)).await;

        let record = h.bureau.fetch_demographics(CEDULA).await.unwrap();
        assert_eq!(record, bureau_record());
        assert_eq!(
            h.repository.get(TOKEN_KEY).await.unwrap(),
            Some("fresh".to_string())
        );
    }

    #[tokio::test]
    async fn test_second_401_is_an_auth_error() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(&server, "stale", ResponseTemplate::new(401), 1).await;
        mount_lookup(&server, "fresh", ResponseTemplate::new(401), 1).await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "stale", Duration::minutes(30)).await;

        let err = h.bureau.fetch_demographics(CEDULA).await.unwrap_err();
        assert!(matches!(err, BureauServiceError::Unauthorized));
    }

    #[tokio::test]
    async fn test_refresh_failure_during_retry_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        mount_lookup(&server, "stale", ResponseTemplate::new(401), 1).await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "stale", Duration::minutes(30)).await;

        let err = h.bureau.fetch_demographics(CEDULA).await.unwrap_err();
        assert!(matches!(
            err,
            BureauServiceError::Token(TokenServiceError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_other_errors_carry_status_and_body() {
        let server = MockServer::start().await;
        mount_lookup(
            &server,
            "cached",
            ResponseTemplate::new(422).set_body_string("documento invalido"),
            1,
        )
        .await;
        let h = harness(&config_for(&server));
        seed_token(&h.repository, "cached", Duration::minutes(30)).await;

        let err = h.bureau.fetch_demographics(CEDULA).await.unwrap_err();
        assert!(matches!(
            err,
            BureauServiceError::Api { status: 422, ref body } if body == "documento invalido"
        ));
        assert_eq!(err.to_string(), "API Error 422: documento invalido");
    }
}

mod historical_client {
    use super::*;

    #[tokio::test]
    async fn test_envelope_is_unwrapped() {
        let server = MockServer::start().await;
        mount_historical(
            &server,
            ResponseTemplate::new(200).set_body_json(historical_envelope("0991234567")),
            1,
        )
        .await;
        let h = harness(&config_for(&server));

        let record = h.historical.fetch_historical(CEDULA).await.unwrap().unwrap();
        assert_eq!(
            record["informacion_demografica"][0]["numero_telefonico_celular"],
            "0991234567"
        );
    }

    #[tokio::test]
    async fn test_missing_envelope_is_not_found() {
        let server = MockServer::start().await;
        mount_historical(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"datos": null})),
            1,
        )
        .await;
        let h = harness(&config_for(&server));

        assert_eq!(h.historical.fetch_historical(CEDULA).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_2xx_is_an_api_error() {
        let server = MockServer::start().await;
        mount_historical(&server, ResponseTemplate::new(404), 1).await;
        let h = harness(&config_for(&server));

        assert!(h.historical.fetch_historical(CEDULA).await.is_err());
    }
}

mod resolution_pipeline {
    use super::*;

    #[tokio::test]
    async fn test_usable_historical_phone_never_reaches_bureau() {
        let server = MockServer::start().await;
        mount_historical(
            &server,
            ResponseTemplate::new(200).set_body_json(historical_envelope("09123456|")),
            1,
        )
        .await;
        mount_token_endpoint(&server, "unused", 0).await;
        Mock::given(path(LOOKUP_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let h = harness(&config_for(&server));

        let resolution = h.resolution.resolve_cedula(CEDULA).await.unwrap();
        assert_eq!(resolution.source, RecordSource::Historical);
        assert_eq!(
            resolution.record["informacion_demografica"][0]["numero_telefonico_celular"],
            "09123456|"
        );
    }

    #[tokio::test]
    async fn test_short_historical_phone_falls_back_to_bureau() {
        let server = MockServer::start().await;
        mount_historical(
            &server,
            ResponseTemplate::new(200).set_body_json(historical_envelope("123|45")),
            1,
        )
        .await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(
            &server,
            "fresh",
            ResponseTemplate::new(200).set_body_json(bureau_record()),
            1,
        )
        .await;
        let h = harness(&config_for(&server));

        let resolution = h.resolution.resolve_cedula(CEDULA).await.unwrap();
        assert_eq!(resolution.source, RecordSource::Bureau);
        assert_eq!(resolution.record, bureau_record());
    }

    #[tokio::test]
    async fn test_historical_network_failure_is_not_surfaced() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(
            &server,
            "fresh",
            ResponseTemplate::new(200).set_body_json(bureau_record()),
            1,
        )
        .await;
        let mut config = config_for(&server);
        config.historical_api_url = UNREACHABLE_URL.to_string();
        let h = harness(&config);

        let resolution = h.resolution.resolve_cedula(CEDULA).await.unwrap();
        assert_eq!(resolution.source, RecordSource::Bureau);
    }

    #[tokio::test]
    async fn test_historical_server_error_is_not_surfaced() {
        let server = MockServer::start().await;
        mount_historical(&server, ResponseTemplate::new(500), 1).await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(
            &server,
            "fresh",
            ResponseTemplate::new(200).set_body_json(bureau_record()),
            1,
        )
        .await;
        let h = harness(&config_for(&server));

        let resolution = h.resolution.resolve_cedula(CEDULA).await.unwrap();
        assert_eq!(resolution.source, RecordSource::Bureau);
    }

    #[tokio::test]
    async fn test_bureau_failure_is_surfaced() {
        let server = MockServer::start().await;
        mount_historical(&server, ResponseTemplate::new(500), 1).await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(
            &server,
            "fresh",
            ResponseTemplate::new(500).set_body_string("bureau down"),
            1,
        )
        .await;
        let h = harness(&config_for(&server));

        let err = h.resolution.resolve_cedula(CEDULA).await.unwrap_err();
        assert!(matches!(
            err,
            ResolutionServiceError::Bureau(BureauServiceError::Api { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_cedula_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let h = harness(&config_for(&server));

        for input in ["", "091234567", "09123456789", "0912-45678"] {
            let err = h.resolution.resolve_cedula(input).await.unwrap_err();
            assert!(matches!(err, ResolutionServiceError::ValidationError(_)));
        }
    }

    #[tokio::test]
    async fn test_repeated_resolution_is_identical_and_reuses_token() {
        let server = MockServer::start().await;
        mount_historical(
            &server,
            ResponseTemplate::new(200).set_body_json(historical_envelope("")),
            2,
        )
        .await;
        mount_token_endpoint(&server, "fresh", 1).await;
        mount_lookup(
            &server,
            "fresh",
            ResponseTemplate::new(200).set_body_json(bureau_record()),
            2,
        )
        .await;
        let h = harness(&config_for(&server));

        let first = SearchResponse::from(h.resolution.resolve_cedula(CEDULA).await.unwrap());
        let second = SearchResponse::from(h.resolution.resolve_cedula(CEDULA).await.unwrap());

        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(first.summary, second.summary);
        assert!(first.summary.contains("Teléfono Celular: 0998765432 | 0991112222"));
    }
}
