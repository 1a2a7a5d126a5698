//! Route representations
//!
//! Lists show airport names, the detail view nests both airports and writes
//! echo the airport ids.

use serde::Serialize;

use crate::models::{Airport, Route, RouteDetails};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteListItem {
    pub id: i64,
    pub source: String,
    pub destination: String,
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDetailResponse {
    pub id: i64,
    pub source: Airport,
    pub destination: Airport,
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteWriteResponse {
    pub id: i64,
    pub source: i64,
    pub destination: i64,
    pub distance: i32,
}

impl From<&RouteDetails> for RouteListItem {
    fn from(details: &RouteDetails) -> Self {
        Self {
            id: details.route.id,
            source: details.source.name.clone(),
            destination: details.destination.name.clone(),
            distance: details.route.distance,
        }
    }
}

impl From<RouteDetails> for RouteDetailResponse {
    fn from(details: RouteDetails) -> Self {
        Self {
            id: details.route.id,
            source: details.source,
            destination: details.destination,
            distance: details.route.distance,
        }
    }
}

impl From<Route> for RouteWriteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            source: route.source_id,
            destination: route.destination_id,
            distance: route.distance,
        }
    }
}
