//! HTTP request routed through a forward-proxy node.

use std::time::{Duration, Instant};

use super::error::ProbeError;
use crate::node::{NodeIdentity, Protocol};

/// Status the probe endpoint answers with on success.
const EXPECTED_STATUS: u16 = 204;

/// Fetches a known `204 No Content` endpoint through an `http`, `https` or
/// `socks5` node and times the request up to the response headers.
///
/// A fresh client is built per probe, so no connection is ever shared
/// between nodes.
#[derive(Debug, Clone)]
pub struct HttpProxyProbe {
    timeout: Duration,
    url: String,
}

impl HttpProxyProbe {
    pub fn new(timeout: Duration, url: impl Into<String>) -> Self {
        Self {
            timeout,
            url: url.into(),
        }
    }

    /// Proxy URL handed to the HTTP client for this node.
    ///
    /// `http` and `https` nodes are both spoken to as plain HTTP proxies.
    pub fn proxy_url(identity: &NodeIdentity) -> String {
        let scheme = match identity.protocol {
            Protocol::Socks5 => "socks5",
            _ => "http",
        };
        format!("{}://{}", scheme, identity.address())
    }

    pub async fn measure(&self, identity: &NodeIdentity) -> Result<Duration, ProbeError> {
        let proxy = reqwest::Proxy::all(Self::proxy_url(identity))
            .map_err(|e| ProbeError::ClientBuild(e.to_string()))?;
        let client = reqwest::Client::builder()
            .proxy(proxy)
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ProbeError::ClientBuild(e.to_string()))?;

        let start = Instant::now();
        let response = tokio::time::timeout(self.timeout, client.get(&self.url).send())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(self.timeout)
                } else {
                    ProbeError::Request(e.to_string())
                }
            })?;
        let elapsed = start.elapsed();

        let status = response.status().as_u16();
        if status != EXPECTED_STATUS {
            return Err(ProbeError::UnexpectedStatus(status));
        }
        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal forward proxy stand-in: answers every request with `status_line`.
    async fn spawn_fake_proxy(status_line: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let mut read = 0;
                    loop {
                        match socket.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                        status_line
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                });
            }
        });
        port
    }

    fn http_node(port: u16) -> NodeIdentity {
        NodeIdentity::new(Protocol::Http, "127.0.0.1", port)
    }

    #[test]
    fn test_proxy_url_per_protocol() {
        let http = NodeIdentity::new(Protocol::Http, "p", 3128);
        let https = NodeIdentity::new(Protocol::Https, "p", 443);
        let socks = NodeIdentity::new(Protocol::Socks5, "p", 1080);

        assert_eq!(HttpProxyProbe::proxy_url(&http), "http://p:3128");
        assert_eq!(HttpProxyProbe::proxy_url(&https), "http://p:443");
        assert_eq!(HttpProxyProbe::proxy_url(&socks), "socks5://p:1080");
    }

    #[tokio::test]
    async fn test_204_through_proxy_succeeds() {
        let port = spawn_fake_proxy("204 No Content").await;
        let probe = HttpProxyProbe::new(
            Duration::from_secs(5),
            "http://probe.invalid/generate_204",
        );

        let elapsed = probe.measure(&http_node(port)).await.unwrap();
        assert!(elapsed < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_other_status_fails() {
        let port = spawn_fake_proxy("200 OK").await;
        let probe = HttpProxyProbe::new(
            Duration::from_secs(5),
            "http://probe.invalid/generate_204",
        );

        let result = probe.measure(&http_node(port)).await;
        assert_eq!(result, Err(ProbeError::UnexpectedStatus(200)));
    }

    #[tokio::test]
    async fn test_silent_proxy_times_out() {
        // Accepts connections but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let timeout = Duration::from_millis(300);
        let probe = HttpProxyProbe::new(timeout, "http://probe.invalid/generate_204");

        let start = Instant::now();
        let result = probe.measure(&http_node(port)).await;

        assert!(matches!(result, Err(ProbeError::Timeout(_))));
        assert!(start.elapsed() < timeout + Duration::from_secs(1));
    }
}
