//! Pluggable route providers for drawing station-to-hydrant paths.
//!
//! Implementations, selectable via [`RouteProviderKind`]:
//!
//! - **`StraightLineRouteProvider`**: two-point polyline with haversine distance. No I/O.
//! - **`OsrmRouteProvider`** (feature `osrm`): calls an OSRM HTTP endpoint.
//!
//! Any provider can be wrapped in [`CachedRouteProvider`]. Routing sits outside the
//! assignment engine: [`plan_routes`] runs after assignment and a failed route is
//! logged and skipped, never propagated into the assignment.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use log::{debug, warn};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::AssignmentResult;
use crate::geo::{distance_m, Coordinate};
use crate::resources::{HydrantId, IncidentId, StationId};

#[cfg(feature = "osrm")]
pub mod osrm;

/// Average road speed for estimated durations (km/h).
const AVG_SPEED_KMH: f64 = 40.0;

/// Default route cache capacity.
pub const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 20_000;

// ---------------------------------------------------------------------------
// Core types
// ---------------------------------------------------------------------------

/// A road path between two coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Polyline from origin to destination, inclusive.
    pub waypoints: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_secs: f64,
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[cfg(feature = "osrm")]
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status '{0}'")]
    Api(String),

    #[error("no route between {from:?} and {to:?}")]
    NoRoute { from: Coordinate, to: Coordinate },

    #[error("route cache unavailable")]
    CachePoisoned,
}

/// Which routing backend to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum RouteProviderKind {
    #[default]
    StraightLine,
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).
    #[cfg(feature = "osrm")]
    Osrm { endpoint: String },
}

/// Routing backend. `Send + Sync` so one provider can serve concurrent callers.
pub trait RouteProvider: Send + Sync {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError>;
}

fn estimate_duration_secs(distance_m: f64) -> f64 {
    if distance_m <= 0.0 {
        return 0.0;
    }
    (distance_m / 1000.0) / AVG_SPEED_KMH * 3600.0
}

// ---------------------------------------------------------------------------
// Straight-line provider (always available)
// ---------------------------------------------------------------------------

/// As-the-crow-flies route: origin and destination only.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightLineRouteProvider;

impl RouteProvider for StraightLineRouteProvider {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError> {
        let distance_m = distance_m(from, to);
        Ok(Route {
            waypoints: vec![from, to],
            distance_m,
            duration_secs: estimate_duration_secs(distance_m),
        })
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

/// Degrees are quantized to 1e-7 for cache keys.
const ROUTE_KEY_SCALE: f64 = 1e7;

/// Directed `(from, to)` pair of quantized `(lat, lon)` endpoints.
type RouteKey = (i64, i64, i64, i64);

fn quantize(degrees: f64) -> i64 {
    (degrees * ROUTE_KEY_SCALE).round() as i64
}

fn route_key(from: Coordinate, to: Coordinate) -> RouteKey {
    (
        quantize(from.lat),
        quantize(from.lon),
        quantize(to.lat),
        quantize(to.lon),
    )
}

/// LRU-cached wrapper around any [`RouteProvider`].
///
/// Only routes the inner provider produced are cached. With
/// `fallback_to_straight_line`, an inner failure is answered with an uncached
/// straight-line route instead of an error, so the next request asks the inner
/// provider again.
pub struct CachedRouteProvider {
    inner: Box<dyn RouteProvider>,
    cache: Mutex<LruCache<RouteKey, Route>>,
    fallback_to_straight_line: bool,
}

impl CachedRouteProvider {
    pub fn new(
        inner: Box<dyn RouteProvider>,
        capacity: usize,
        fallback_to_straight_line: bool,
    ) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            fallback_to_straight_line,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl RouteProvider for CachedRouteProvider {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError> {
        let key = route_key(from, to);

        {
            let mut cache = self.cache.lock().map_err(|_| RoutingError::CachePoisoned)?;
            if let Some(cached) = cache.get(&key) {
                return Ok(cached.clone());
            }
        }

        match self.inner.route(from, to) {
            Ok(route) => {
                if let Ok(mut cache) = self.cache.lock() {
                    cache.put(key, route.clone());
                }
                Ok(route)
            }
            Err(err) if self.fallback_to_straight_line => {
                warn!("route provider failed ({err}); using straight line");
                StraightLineRouteProvider.route(from, to)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Construct a provider from its descriptor. Network-backed providers come wrapped
/// by [`cached_network_provider`].
pub fn build_route_provider(
    kind: &RouteProviderKind,
) -> Result<Box<dyn RouteProvider>, RoutingError> {
    match kind {
        RouteProviderKind::StraightLine => Ok(Box::new(StraightLineRouteProvider)),

        #[cfg(feature = "osrm")]
        RouteProviderKind::Osrm { endpoint } => Ok(cached_network_provider(Box::new(
            osrm::OsrmRouteProvider::new(endpoint)?,
        ))),
    }
}

/// Cache a network-backed provider without straight-line fallback: an outage
/// surfaces as errors, which [`plan_routes`] logs and counts.
pub fn cached_network_provider(inner: Box<dyn RouteProvider>) -> Box<dyn RouteProvider> {
    Box::new(CachedRouteProvider::new(
        inner,
        DEFAULT_ROUTE_CACHE_CAPACITY,
        false,
    ))
}

// ---------------------------------------------------------------------------
// Route planning over assignment results
// ---------------------------------------------------------------------------

/// A station-to-hydrant route for one incident.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlannedRoute {
    pub incident_id: IncidentId,
    pub station_id: StationId,
    pub hydrant_id: HydrantId,
    pub route: Route,
}

/// Routes that could be drawn, plus a count of the ones that could not.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RoutePlan {
    pub routes: Vec<PlannedRoute>,
    pub failures: usize,
}

/// Request a station-to-hydrant route for every hydrant of every result that has a
/// station. Failures are logged and counted; they never abort the pass.
pub fn plan_routes(results: &[AssignmentResult], provider: &dyn RouteProvider) -> RoutePlan {
    let mut plan = RoutePlan::default();

    for result in results {
        let Some(station) = &result.station else {
            debug!("incident {} has no station; no routes", result.incident_id);
            continue;
        };

        for hydrant in &result.hydrants {
            match provider.route(station.coordinate, hydrant.coordinate) {
                Ok(route) => plan.routes.push(PlannedRoute {
                    incident_id: result.incident_id,
                    station_id: station.id.clone(),
                    hydrant_id: hydrant.id,
                    route,
                }),
                Err(err) => {
                    warn!(
                        "no route from station {} to hydrant {} (incident {}): {}",
                        station.id, hydrant.id, result.incident_id, err
                    );
                    plan.failures += 1;
                }
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl RouteProvider for CountingProvider {
        fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(RoutingError::NoRoute { from, to })
            } else {
                StraightLineRouteProvider.route(from, to)
            }
        }
    }

    #[test]
    fn straight_line_has_both_endpoints() {
        let a = Coordinate::new(45.55, -73.58);
        let b = Coordinate::new(45.56, -73.58);
        let route = StraightLineRouteProvider.route(a, b).unwrap();
        assert_eq!(route.waypoints, vec![a, b]);
        assert!(route.distance_m > 1000.0);
        assert!(route.duration_secs > 0.0);
    }

    #[test]
    fn cache_answers_repeat_queries() {
        let inner = CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        };
        let cached = CachedRouteProvider::new(Box::new(inner), 8, false);
        let a = Coordinate::new(45.55, -73.58);
        let b = Coordinate::new(45.56, -73.58);
        cached.route(a, b).unwrap();
        cached.route(a, b).unwrap();
        assert_eq!(cached.cached_len(), 1);
    }

    #[test]
    fn failing_inner_falls_back_when_enabled() {
        let a = Coordinate::new(45.55, -73.58);
        let b = Coordinate::new(45.56, -73.58);

        let strict = CachedRouteProvider::new(
            Box::new(CountingProvider {
                calls: AtomicUsize::new(0),
                fail: true,
            }),
            8,
            false,
        );
        assert!(strict.route(a, b).is_err());
        assert_eq!(strict.cached_len(), 0);

        let lenient = CachedRouteProvider::new(
            Box::new(CountingProvider {
                calls: AtomicUsize::new(0),
                fail: true,
            }),
            8,
            true,
        );
        assert_eq!(lenient.route(a, b).unwrap().waypoints.len(), 2);
        assert_eq!(lenient.cached_len(), 0);
    }

    /// Fails until `up` is set, then answers with a three-point route.
    struct FlakyProvider {
        up: Arc<AtomicBool>,
    }

    impl RouteProvider for FlakyProvider {
        fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError> {
            if !self.up.load(Ordering::SeqCst) {
                return Err(RoutingError::Api("down".to_string()));
            }
            let mid = Coordinate::new((from.lat + to.lat) / 2.0, (from.lon + to.lon) / 2.0);
            Ok(Route {
                waypoints: vec![from, mid, to],
                distance_m: distance_m(from, to),
                duration_secs: 1.0,
            })
        }
    }

    #[test]
    fn fallback_routes_are_not_cached() {
        let a = Coordinate::new(45.55, -73.58);
        let b = Coordinate::new(45.56, -73.58);
        let up = Arc::new(AtomicBool::new(false));
        let cached = CachedRouteProvider::new(Box::new(FlakyProvider { up: up.clone() }), 8, true);

        assert_eq!(cached.route(a, b).unwrap().waypoints.len(), 2);
        assert_eq!(cached.cached_len(), 0);

        up.store(true, Ordering::SeqCst);
        assert_eq!(cached.route(a, b).unwrap().waypoints.len(), 3);
        assert_eq!(cached.cached_len(), 1);
    }

    #[test]
    fn route_key_is_directional() {
        let a = Coordinate::new(45.55, -73.58);
        let b = Coordinate::new(45.56, -73.58);
        assert_ne!(route_key(a, b), route_key(b, a));
        assert_eq!(route_key(a, b), route_key(a, Coordinate::new(45.56000000001, -73.58)));
    }

    #[test]
    fn default_kind_is_straight_line() {
        assert_eq!(RouteProviderKind::default(), RouteProviderKind::StraightLine);
        assert!(build_route_provider(&RouteProviderKind::StraightLine).is_ok());
    }
}
