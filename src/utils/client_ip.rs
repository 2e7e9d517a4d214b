//! Originating address extraction from HTTP requests.

use axum::http::HeaderMap;
use std::net::SocketAddr;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client address for a request.
///
/// With `behind_proxy` set, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`, then the peer socket. Without it the headers are ignored,
/// since any client can send them.
///
/// Returns `None` when nothing is known, e.g. in-process test transports that
/// carry no peer address.
///
/// # Examples
///
/// ```
/// use axum::http::HeaderMap;
/// use std::net::SocketAddr;
/// use tiny_url::utils::client_ip::client_ip;
///
/// let peer: SocketAddr = "10.1.2.3:5555".parse().unwrap();
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(client_ip(&headers, Some(peer), true).as_deref(), Some("203.0.113.7"));
/// assert_eq!(client_ip(&headers, Some(peer), false).as_deref(), Some("10.1.2.3"));
/// ```
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> Option<String> {
    if behind_proxy {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }

        let real_ip = headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = real_ip {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.168.1.10:40000".parse().unwrap())
    }

    #[test]
    fn test_peer_address_without_proxy() {
        let headers = HeaderMap::new();
        assert_eq!(
            client_ip(&headers, peer(), false).as_deref(),
            Some("192.168.1.10")
        );
    }

    #[test]
    fn test_forwarded_headers_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("1.2.3.4"));
        headers.insert(X_REAL_IP, HeaderValue::from_static("5.6.7.8"));

        assert_eq!(
            client_ip(&headers, peer(), false).as_deref(),
            Some("192.168.1.10")
        );
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static(" 1.2.3.4 , 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers, peer(), true).as_deref(), Some("1.2.3.4"));
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("5.6.7.8"));

        assert_eq!(client_ip(&headers, peer(), true).as_deref(), Some("5.6.7.8"));
    }

    #[test]
    fn test_ipv6_peer() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "[::1]:8080".parse().unwrap();

        assert_eq!(
            client_ip(&headers, Some(peer), true).as_deref(),
            Some("::1")
        );
    }

    #[test]
    fn test_unknown_address() {
        let headers = HeaderMap::new();
        assert!(client_ip(&headers, None, true).is_none());
    }
}
