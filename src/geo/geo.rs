//! Country lookup against the public geolocation API.

use std::future::Future;

use serde::Deserialize;

use crate::error::Result;

/// Resolves an IP address to a country name.
pub trait CountryLookup {
    fn resolve_country(&self, ip: &str) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Deserialize)]
struct IpResponse {
    #[allow(dead_code)]
    #[serde(default)]
    ip: String,
    country_name: String,
}

/// HTTP client for the geolocation endpoint. One request per call, no retry
/// and no caching.
pub struct GeoResolver {
    http: reqwest::Client,
    endpoint: String,
}

impl GeoResolver {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self::with_client(http, endpoint))
    }

    pub fn with_client(http: reqwest::Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }
}

impl CountryLookup for GeoResolver {
    async fn resolve_country(&self, ip: &str) -> Result<String> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("ip", ip)])
            .send()
            .await?;
        let body = resp.bytes().await?;

        let parsed: IpResponse = serde_json::from_slice(&body)?;
        Ok(parsed.country_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    fn local_resolver(url: &str) -> GeoResolver {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        GeoResolver::with_client(http, url)
    }

    /// Serves one request with `body` and hands back the raw request head.
    async fn mock_server(body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}/");
        let body = body.to_string();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());

                let resp = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, rx)
    }

    #[tokio::test]
    async fn returns_country_name() {
        let (url, request) =
            mock_server(r#"{"ip":"8.8.8.8","country_name":"United States"}"#).await;

        let resolver = local_resolver(&url);
        let country = resolver.resolve_country("8.8.8.8").await.unwrap();

        assert_eq!(country, "United States");
        let head = request.await.unwrap();
        assert!(head.starts_with("GET /?ip=8.8.8.8 HTTP/1.1"), "{head}");
    }

    #[tokio::test]
    async fn extra_fields_are_ignored() {
        let (url, _request) = mock_server(
            r#"{"ip":"1.1.1.1","ip_number":"16843009","ip_version":4,"country_name":"Australia","country_code2":"AU","isp":"Cloudflare","response_code":"200"}"#,
        )
        .await;

        let resolver = local_resolver(&url);
        assert_eq!(resolver.resolve_country("1.1.1.1").await.unwrap(), "Australia");
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let (url, _request) = mock_server("<html>rate limited</html>").await;

        let resolver = local_resolver(&url);
        let err = resolver.resolve_country("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn missing_country_is_decode_error() {
        let (url, _request) = mock_server(r#"{"ip":"8.8.8.8"}"#).await;

        let resolver = local_resolver(&url);
        let err = resolver.resolve_country("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let resolver = local_resolver(&format!("http://127.0.0.1:{port}/"));
        let err = resolver.resolve_country("8.8.8.8").await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }
}
