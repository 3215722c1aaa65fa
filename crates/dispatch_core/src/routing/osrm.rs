//! OSRM HTTP route provider.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{Route, RouteProvider, RoutingError};
use crate::geo::Coordinate;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Routes via an OSRM endpoint's `/route/v1/driving` service.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    client: Client,
    endpoint: String,
}

impl OsrmRouteProvider {
    pub fn new(endpoint: &str) -> Result<Self, RoutingError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, from: Coordinate, to: Coordinate) -> String {
        // OSRM wants lon,lat.
        format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.endpoint, from.lon, from.lat, to.lon, to.lat,
        )
    }
}

/// Minimal OSRM JSON response structures.
#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64, // metres
    duration: f64, // seconds
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<Vec<f64>>, // [lon, lat]
}

fn parse_response(
    resp: OsrmResponse,
    from: Coordinate,
    to: Coordinate,
) -> Result<Route, RoutingError> {
    if resp.code != "Ok" {
        return Err(RoutingError::Api(resp.code));
    }

    let route = resp
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(RoutingError::NoRoute { from, to })?;

    let waypoints = route
        .geometry
        .coordinates
        .iter()
        .filter(|pair| pair.len() >= 2)
        .map(|pair| Coordinate::new(pair[1], pair[0]))
        .collect();

    Ok(Route {
        waypoints,
        distance_m: route.distance,
        duration_secs: route.duration,
    })
}

impl RouteProvider for OsrmRouteProvider {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError> {
        let resp: OsrmResponse = self
            .client
            .get(self.url(from, to))
            .send()?
            .error_for_status()?
            .json()?;
        parse_response(resp, from, to)
    }
}
