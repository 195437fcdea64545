//! Protocol variants and their descriptor grammars.
//!
//! Each variant owns a parse function. Dispatch is a lookup from the scheme
//! prefix (text before `://`) to the variant, never a sequence of trial
//! matches.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ParseError;

/// Proxy protocol a descriptor encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Vmess,
    Vless,
    Trojan,
    #[serde(rename = "ss")]
    Shadowsocks,
    Tuic,
    Hysteria,
    Http,
    Https,
    Socks5,
}

/// How a variant's authority section must end right after the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// A `?` must follow the port.
    Query,
    /// A `#` or `?` must follow the port.
    FragmentOrQuery,
    /// End of input, `/`, `?` or `#`.
    Open,
}

impl Terminator {
    fn accepts(self, next: Option<char>) -> bool {
        match self {
            Terminator::Query => next == Some('?'),
            Terminator::FragmentOrQuery => matches!(next, Some('#') | Some('?')),
            Terminator::Open => matches!(next, None | Some('/') | Some('?') | Some('#')),
        }
    }
}

impl Protocol {
    /// All variants in lookup order.
    pub const ALL: [Protocol; 9] = [
        Protocol::Vmess,
        Protocol::Vless,
        Protocol::Trojan,
        Protocol::Shadowsocks,
        Protocol::Tuic,
        Protocol::Hysteria,
        Protocol::Http,
        Protocol::Https,
        Protocol::Socks5,
    ];

    /// URI scheme, also used as the protocol part of the canonical key.
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Vmess => "vmess",
            Protocol::Vless => "vless",
            Protocol::Trojan => "trojan",
            Protocol::Shadowsocks => "ss",
            Protocol::Tuic => "tuic",
            Protocol::Hysteria => "hysteria",
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Socks5 => "socks5",
        }
    }

    /// Looks up the variant for a scheme prefix.
    pub fn from_scheme(scheme: &str) -> Option<Protocol> {
        Self::ALL.into_iter().find(|p| p.scheme() == scheme)
    }

    /// Whether the node can be driven as a forward proxy by an HTTP client.
    ///
    /// Everything else is probed with a bare TCP connect.
    pub fn is_forward_proxy(self) -> bool {
        matches!(self, Protocol::Http | Protocol::Https | Protocol::Socks5)
    }

    fn requires_userinfo(self) -> bool {
        !self.is_forward_proxy()
    }

    fn terminator(self) -> Terminator {
        match self {
            Protocol::Vmess | Protocol::Trojan | Protocol::Tuic | Protocol::Hysteria => {
                Terminator::Query
            }
            Protocol::Vless | Protocol::Shadowsocks => Terminator::FragmentOrQuery,
            Protocol::Http | Protocol::Https | Protocol::Socks5 => Terminator::Open,
        }
    }

    /// Extracts `(host, port)` from the part of a descriptor after `scheme://`.
    pub fn parse_body(self, body: &str) -> Result<(String, u16), ParseError> {
        match self {
            Protocol::Vmess => parse_authority(self, body).or_else(|authority_err| {
                parse_vmess_share(body).map_err(|_| authority_err)
            }),
            _ => parse_authority(self, body),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Protocol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::from_scheme(s).ok_or_else(|| ParseError::UnknownScheme(s.to_string()))
    }
}

/// `<userinfo>@<host>:<port><terminator>...`
fn parse_authority(protocol: Protocol, body: &str) -> Result<(String, u16), ParseError> {
    let rest = match body.split_once('@') {
        Some((userinfo, rest)) => {
            if userinfo.is_empty() {
                return Err(ParseError::MissingUserinfo);
            }
            rest
        }
        None if protocol.requires_userinfo() => return Err(ParseError::MissingUserinfo),
        None => body,
    };

    let (host, after_host) = rest.split_once(':').ok_or(ParseError::MissingPort)?;
    if host.is_empty() {
        return Err(ParseError::MissingHost);
    }

    let digits_len = after_host
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_host.len());
    let (digits, tail) = after_host.split_at(digits_len);
    let port = parse_port(digits)?;

    if !protocol.terminator().accepts(tail.chars().next()) {
        return Err(ParseError::UnterminatedAuthority);
    }

    Ok((host.to_string(), port))
}

fn parse_port(digits: &str) -> Result<u16, ParseError> {
    if digits.is_empty() {
        return Err(ParseError::MissingPort);
    }
    match digits.parse::<u16>() {
        Ok(0) | Err(_) => Err(ParseError::InvalidPort(digits.to_string())),
        Ok(port) => Ok(port),
    }
}

/// v2rayN-style share link: `vmess://<base64 JSON>`.
#[derive(Deserialize)]
struct VmessShare {
    add: String,
    port: VmessPort,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VmessPort {
    Number(u64),
    Text(String),
}

fn parse_vmess_share(body: &str) -> Result<(String, u16), ParseError> {
    let payload = body.split(['#', '?']).next().unwrap_or_default().trim();
    let bytes = STANDARD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))
        .or_else(|_| STANDARD.decode(pad_base64(payload)))
        .map_err(|e| ParseError::InvalidVmessPayload(e.to_string()))?;

    let share: VmessShare = serde_json::from_slice(&bytes)
        .map_err(|e| ParseError::InvalidVmessPayload(e.to_string()))?;

    let host = share.add.trim();
    if host.is_empty() {
        return Err(ParseError::MissingHost);
    }
    let port = match share.port {
        VmessPort::Number(n) => u16::try_from(n)
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| ParseError::InvalidPort(n.to_string()))?,
        VmessPort::Text(s) => parse_port(s.trim())?,
    };

    Ok((host.to_string(), port))
}

fn pad_base64(payload: &str) -> String {
    let mut padded = payload.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_round_trip() {
        for protocol in Protocol::ALL {
            assert_eq!(Protocol::from_scheme(protocol.scheme()), Some(protocol));
        }
        assert_eq!(Protocol::from_scheme("wireguard"), None);
        assert_eq!(Protocol::from_scheme("VMESS"), None);
    }

    #[test]
    fn test_shadowsocks_uses_ss_scheme() {
        assert_eq!(Protocol::Shadowsocks.to_string(), "ss");
        assert_eq!(
            serde_json::to_string(&Protocol::Shadowsocks).unwrap(),
            "\"ss\""
        );
        assert_eq!("ss".parse::<Protocol>().unwrap(), Protocol::Shadowsocks);
    }

    #[test]
    fn test_forward_proxy_classes() {
        assert!(Protocol::Http.is_forward_proxy());
        assert!(Protocol::Https.is_forward_proxy());
        assert!(Protocol::Socks5.is_forward_proxy());
        assert!(!Protocol::Vmess.is_forward_proxy());
        assert!(!Protocol::Hysteria.is_forward_proxy());
    }

    #[test]
    fn test_query_terminated_variants() {
        assert_eq!(
            Protocol::Trojan.parse_body("pw@5.6.7.8:443?sni=a").unwrap(),
            ("5.6.7.8".to_string(), 443)
        );
        assert_eq!(
            Protocol::Trojan.parse_body("pw@5.6.7.8:443#name"),
            Err(ParseError::UnterminatedAuthority)
        );
        assert_eq!(
            Protocol::Tuic.parse_body("uuid@host.example:8443"),
            Err(ParseError::UnterminatedAuthority)
        );
    }

    #[test]
    fn test_fragment_or_query_variants() {
        assert_eq!(
            Protocol::Vless.parse_body("id@a.example:80#tag").unwrap(),
            ("a.example".to_string(), 80)
        );
        assert_eq!(
            Protocol::Shadowsocks
                .parse_body("YWVzOnB3@9.9.9.9:8388?plugin=x")
                .unwrap(),
            ("9.9.9.9".to_string(), 8388)
        );
    }

    #[test]
    fn test_forward_proxy_userinfo_optional() {
        assert_eq!(
            Protocol::Socks5.parse_body("10.0.0.1:1080").unwrap(),
            ("10.0.0.1".to_string(), 1080)
        );
        assert_eq!(
            Protocol::Http.parse_body("user:pass@proxy.local:3128/").unwrap(),
            ("proxy.local".to_string(), 3128)
        );
    }

    #[test]
    fn test_rejects_structural_errors() {
        assert_eq!(
            Protocol::Vmess.parse_body("@1.2.3.4:443?x"),
            Err(ParseError::MissingUserinfo)
        );
        assert_eq!(
            Protocol::Vless.parse_body("1.2.3.4:443#x"),
            Err(ParseError::MissingUserinfo)
        );
        assert_eq!(
            Protocol::Trojan.parse_body("u@:443?x"),
            Err(ParseError::MissingHost)
        );
        assert_eq!(
            Protocol::Trojan.parse_body("u@host?x"),
            Err(ParseError::MissingPort)
        );
        assert_eq!(
            Protocol::Trojan.parse_body("u@host:?x"),
            Err(ParseError::MissingPort)
        );
        assert_eq!(
            Protocol::Trojan.parse_body("u@host:70000?x"),
            Err(ParseError::InvalidPort("70000".to_string()))
        );
        assert_eq!(
            Protocol::Trojan.parse_body("u@host:0?x"),
            Err(ParseError::InvalidPort("0".to_string()))
        );
    }

    #[test]
    fn test_vmess_share_link() {
        let json = r#"{"v":"2","ps":"hk","add":"hk.example.net","port":"10086","id":"x"}"#;
        let body = STANDARD.encode(json);
        assert_eq!(
            Protocol::Vmess.parse_body(&body).unwrap(),
            ("hk.example.net".to_string(), 10086)
        );

        let json = r#"{"add":"1.1.1.1","port":443}"#;
        let body = STANDARD.encode(json);
        let unpadded = body.trim_end_matches('=');
        assert_eq!(
            Protocol::Vmess.parse_body(unpadded).unwrap(),
            ("1.1.1.1".to_string(), 443)
        );
    }

    #[test]
    fn test_vmess_share_failure_reports_authority_error() {
        assert_eq!(
            Protocol::Vmess.parse_body("not base64 at all"),
            Err(ParseError::MissingUserinfo)
        );
    }
}
