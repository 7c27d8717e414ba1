//! Voter identity derived from the request origin.
//!
//! The token is an opaque string compared only for equality. A client can set
//! `X-Forwarded-For` to anything, so this is throttling, not authentication.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use std::{convert::Infallible, net::IpAddr, net::SocketAddr};

pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
pub const UNKNOWN_ORIGIN: &str = "0.0.0.0";

/// Picks the voter token: a non-empty forwarded hint verbatim, else the peer address.
pub fn resolve(peer: Option<IpAddr>, forwarded: Option<&str>) -> String {
    match forwarded {
        Some(hint) if !hint.is_empty() => hint.to_string(),
        _ => peer
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| UNKNOWN_ORIGIN.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterIdentity(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for VoterIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(FORWARDED_FOR_HEADER)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(VoterIdentity(resolve(peer, forwarded.as_deref())))
    }
}
