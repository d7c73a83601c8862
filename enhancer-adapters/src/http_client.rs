use std::sync::Arc;
use std::time::Duration;

use hyper::body::{Bytes, to_bytes};
use hyper::client::HttpConnector;
use hyper::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use hyper::{Body, Client, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use tokio::time::timeout;
use webpki_roots::TLS_SERVER_ROOTS;

use crate::traits::{AdapterError, AdapterResult};

pub(crate) type HyperClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Status, headers and body of a fully read response.
pub(crate) struct RawResponse {
    pub(crate) status: StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
}

pub(crate) fn build_https_client() -> HyperClient {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    // Plain http stays allowed for local endpoints and test servers.
    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let connector = HttpsConnector::from((http, Arc::new(config)));

    Client::builder().build::<_, Body>(connector)
}

/// Posts a JSON body and reads the whole response.
///
/// `provider` only prefixes error messages. With `limit` unset the call waits
/// for as long as the connection stays open.
pub(crate) async fn post_json(
    client: &HyperClient,
    provider: &str,
    endpoint: Uri,
    headers: &[(HeaderName, &str)],
    body: Vec<u8>,
    limit: Option<Duration>,
) -> AdapterResult<RawResponse> {
    let mut builder = Request::post(endpoint).header(CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        let value = HeaderValue::from_str(value).map_err(|_| {
            AdapterError::invalid_request(format!(
                "{provider} header `{}` has an invalid value",
                name.as_str()
            ))
        })?;
        builder = builder.header(name, value);
    }

    let req = builder.body(Body::from(body)).map_err(|err| {
        AdapterError::transport(format!("failed to build {provider} request: {err}"))
    })?;

    let exchange = async {
        let response = client
            .request(req)
            .await
            .map_err(|err| AdapterError::transport(format!("{provider} request failed: {err}")))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body()).await.map_err(|err| {
            AdapterError::transport(format!("failed to read {provider} response: {err}"))
        })?;

        Ok::<_, AdapterError>(RawResponse {
            status,
            headers,
            body,
        })
    };

    // The limit covers the body read too, not just the response headers.
    match limit {
        Some(limit) => timeout(limit, exchange)
            .await
            .map_err(|_| AdapterError::transport(format!("{provider} request timed out")))?,
        None => exchange.await,
    }
}
