use crate::error::ServiceError;
use governor::clock::DefaultClock;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use warp::http::HeaderMap;
use warp::{Filter, Rejection};

pub type RateLimiterState = RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock>;

/// Per-client-IP burst limiter for the image endpoint.
#[derive(Clone)]
pub struct IpRateLimiter {
    limiter: Arc<RateLimiterState>,
}

impl IpRateLimiter {
    /// Returns `None` when either setting is zero, which disables limiting.
    pub fn new(requests: u32, window_secs: u64) -> Option<Self> {
        let burst = NonZeroU32::new(requests)?;
        let quota = Quota::with_period(Duration::from_secs(window_secs))?.allow_burst(burst);

        Some(Self {
            limiter: Arc::new(RateLimiter::dashmap(quota)),
        })
    }

    pub fn check_request(&self, headers: &HeaderMap, remote: Option<SocketAddr>) -> bool {
        self.check(Self::client_ip(headers, remote))
    }

    pub fn check(&self, ip: IpAddr) -> bool {
        self.limiter.check_key(&ip).is_ok()
    }

    fn client_ip(headers: &HeaderMap, remote: Option<SocketAddr>) -> IpAddr {
        if let Some(ip) = headers
            .get("CF-Connecting-IP")
            .and_then(|h| h.to_str().ok())
            .and_then(|ip| IpAddr::from_str(ip.trim()).ok())
        {
            return ip;
        }

        if let Some(ip) = headers
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|ip| ip.split(',').next())
            .and_then(|ip| ip.trim().parse().ok())
        {
            return ip;
        }

        remote
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

/// Passes every request through when `limiter` is `None`.
pub fn with_rate_limit(
    limiter: Option<IpRateLimiter>,
) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::headers_cloned()
        .and(warp::addr::remote())
        .and_then(move |headers: HeaderMap, remote: Option<SocketAddr>| {
            let limiter = limiter.clone();
            async move {
                match limiter {
                    Some(limiter) if !limiter.check_request(&headers, remote) => {
                        Err(warp::reject::custom(ServiceError::RateLimitExceeded))
                    }
                    _ => Ok(()),
                }
            }
        })
        .untuple_one()
}
