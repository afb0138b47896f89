use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{
    Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::domain::errors::UpstreamError;

const RPC_TIMEOUT: Duration = Duration::from_secs(20);
const READ_ONE_TIMEOUT: Duration = Duration::from_secs(20);
const READ_MANY_TIMEOUT: Duration = Duration::from_secs(25);
const WRITE_TIMEOUT: Duration = Duration::from_secs(20);

const PREFER: HeaderName = HeaderName::from_static("prefer");
const API_KEY: HeaderName = HeaderName::from_static("apikey");

/// Thin client for a hosted PostgREST (Supabase) API using the service key.
pub struct PostgrestClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: &str, service_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build PostgREST http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            API_KEY,
            HeaderValue::from_str(&self.service_key).context("service key is not a valid header")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.service_key))
                .context("service key is not a valid header")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn rpc_url(&self, name: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, name)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// POST `/rest/v1/rpc/{name}` with `params` as the JSON body.
    pub async fn call_rpc<P>(&self, name: &str, params: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let context = format!("rpc {}", name);
        debug!(rpc = name, "postgrest: calling rpc");

        let response = self
            .http
            .post(self.rpc_url(name))
            .headers(self.headers()?)
            .timeout(RPC_TIMEOUT)
            .json(params)
            .send()
            .await
            .map_err(|err| transport_error(err, &context))?;

        let response = ensure_success(response, &context).await?;
        read_json(response, &context).await
    }

    /// Single-row read. 404/406 and empty result sets become `None`.
    pub async fn get_one(
        &self,
        table: &str,
        filters: &[(&str, String)],
        select: &str,
    ) -> Result<Option<Value>> {
        let context = format!("select one from {}", table);
        let mut headers = self.headers()?;
        headers.insert(
            PREFER,
            HeaderValue::from_static("return=representation,single-object"),
        );

        let response = self
            .http
            .get(self.table_url(table))
            .headers(headers)
            .timeout(READ_ONE_TIMEOUT)
            .query(&[("select", select)])
            .query(filters)
            .send()
            .await
            .map_err(|err| transport_error(err, &context))?;

        if is_missing(response.status()) {
            return Ok(None);
        }

        let response = ensure_success(response, &context).await?;
        Ok(first_row(read_json(response, &context).await?))
    }

    /// Multi-row read with embeds and filters. 404/406 become an empty list.
    pub async fn get_many(
        &self,
        table: &str,
        filters: &[(&str, String)],
        select: &str,
    ) -> Result<Vec<Value>> {
        let context = format!("select from {}", table);

        let response = self
            .http
            .get(self.table_url(table))
            .headers(self.headers()?)
            .timeout(READ_MANY_TIMEOUT)
            .query(&[("select", select)])
            .query(filters)
            .send()
            .await
            .map_err(|err| transport_error(err, &context))?;

        if is_missing(response.status()) {
            return Ok(Vec::new());
        }

        let response = ensure_success(response, &context).await?;
        Ok(into_rows(read_json(response, &context).await?))
    }

    /// PATCH rows matching `filters` and return the first updated row.
    pub async fn update_one<P>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &P,
    ) -> Result<Option<Value>>
    where
        P: Serialize + ?Sized,
    {
        let context = format!("update {}", table);
        let mut headers = self.headers()?;
        headers.insert(PREFER, HeaderValue::from_static("return=representation"));

        let response = self
            .http
            .patch(self.table_url(table))
            .headers(headers)
            .timeout(WRITE_TIMEOUT)
            .query(filters)
            .json(patch)
            .send()
            .await
            .map_err(|err| transport_error(err, &context))?;

        let response = ensure_success(response, &context).await?;
        Ok(first_row(read_json(response, &context).await?))
    }
}

fn is_missing(status: StatusCode) -> bool {
    status == StatusCode::NOT_FOUND || status == StatusCode::NOT_ACCEPTABLE
}

async fn ensure_success(response: Response, context: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(text) => text,
        Err(err) => format!("<failed to read response body: {err}>"),
    };

    error!(status, body = %body, "postgrest: {} failed", context);

    Err(anyhow::Error::new(UpstreamError::Status { status, body })
        .context(format!("postgrest {} failed", context)))
}

fn transport_error(err: reqwest::Error, context: &str) -> anyhow::Error {
    let message = if err.is_timeout() {
        format!("{} timed out", context)
    } else if err.is_connect() {
        format!("{} could not connect", context)
    } else if err.is_body() || err.is_decode() {
        format!("{} body could not be read", context)
    } else {
        format!("{} request failed", context)
    };

    error!(error = %err, "postgrest: {}", message);
    anyhow::Error::new(UpstreamError::Transport(message)).context(format!("postgrest {}", context))
}

async fn read_json(response: Response, context: &str) -> Result<Value> {
    let bytes = response
        .bytes()
        .await
        .map_err(|err| transport_error(err, context))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes)
        .with_context(|| format!("postgrest {}: response is not valid JSON", context))
}

fn first_row(value: Value) -> Option<Value> {
    match value {
        Value::Array(rows) => rows.into_iter().next(),
        Value::Null => None,
        other => Some(other),
    }
}

fn into_rows(value: Value) -> Vec<Value> {
    match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PostgrestClient {
        PostgrestClient::new(&format!("{}/", server.uri()), "service-key").unwrap()
    }

    #[tokio::test]
    async fn rpc_posts_params_with_service_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/release_tickets"))
            .and(header("apikey", "service-key"))
            .and(header("authorization", "Bearer service-key"))
            .and(body_json(json!({ "p_session_id": "s-1", "p_ticket_ids": ["t-1"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "released": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call_rpc(
                "release_tickets",
                &json!({ "p_session_id": "s-1", "p_ticket_ids": ["t-1"] }),
            )
            .await
            .unwrap();

        assert_eq!(result, json!([{ "released": 1 }]));
    }

    #[tokio::test]
    async fn rpc_with_empty_body_yields_null() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/approve_payment"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .call_rpc("approve_payment", &json!({}))
            .await
            .unwrap();

        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/rpc/reserve_tickets"))
            .respond_with(
                ResponseTemplate::new(409).set_body_string(r#"{"message":"ticket taken"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .call_rpc("reserve_tickets", &json!({}))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<UpstreamError>(),
            Some(&UpstreamError::Status {
                status: 409,
                body: r#"{"message":"ticket taken"}"#.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = PostgrestClient::new("http://127.0.0.1:1", "service-key").unwrap();

        let err = client.call_rpc("verify_tickets", &json!({})).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UpstreamError>(),
            Some(UpstreamError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn body_cut_short_is_a_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut chunk).await.unwrap();
                if read == 0 {
                    return;
                }
                request.extend_from_slice(&chunk[..read]);
            }
            socket
                .write_all(
                    concat!(
                        "HTTP/1.1 200 OK\r\n",
                        "content-type: application/json\r\n",
                        "content-length: 64\r\n\r\n",
                        "[{\"id\"",
                    )
                    .as_bytes(),
                )
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = PostgrestClient::new(&format!("http://{}", addr), "service-key").unwrap();
        let err = client.get_many("raffles", &[], "id").await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UpstreamError>(),
            Some(UpstreamError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn get_one_returns_first_row_and_none_when_missing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/payments"))
            .and(query_param("select", "id,reference,status"))
            .and(query_param("reference", "eq.REF-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "id": "p-1", "reference": "REF-1" }])),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/payments"))
            .and(query_param("reference", "eq.REF-404"))
            .respond_with(ResponseTemplate::new(406))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let found = client
            .get_one(
                "payments",
                &[("reference", "eq.REF-1".to_string())],
                "id,reference,status",
            )
            .await
            .unwrap();
        assert_eq!(found, Some(json!({ "id": "p-1", "reference": "REF-1" })));

        let missing = client
            .get_one(
                "payments",
                &[("reference", "eq.REF-404".to_string())],
                "id,reference,status",
            )
            .await
            .unwrap();
        assert_eq!(missing, None);

        // wiremock's `header` matcher splits on commas, so check the raw value.
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests {
            assert_eq!(
                request.headers.get("prefer").and_then(|value| value.to_str().ok()),
                Some("return=representation,single-object")
            );
        }
    }

    #[tokio::test]
    async fn get_many_passes_filters_and_treats_404_as_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/raffles"))
            .and(query_param("select", "id"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": "r-1" }])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/payment_tickets"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let rows = client
            .get_many("raffles", &[("limit", "1".to_string())], "id")
            .await
            .unwrap();
        assert_eq!(rows, vec![json!({ "id": "r-1" })]);

        let rows = client
            .get_many("payment_tickets", &[], "*")
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn update_one_patches_and_returns_representation() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/payments"))
            .and(query_param("id", "eq.p-1"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!({ "ci": "V-123" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "id": "p-1", "ci": "V-123" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let updated = client_for(&server)
            .update_one(
                "payments",
                &[("id", "eq.p-1".to_string())],
                &json!({ "ci": "V-123" }),
            )
            .await
            .unwrap();

        assert_eq!(updated, Some(json!({ "id": "p-1", "ci": "V-123" })));
    }
}
