use serde::Deserialize;

/// A row of `routes.txt`.
/// See <https://gtfs.org/schedule/reference/#routestxt>
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRecord {
    /// Identifies a route.
    pub route_id: String,

    /// Agency for the specified route. Also drives transit-mode inference:
    /// agency-id substring rules take precedence over `route_type`.
    pub agency_id: Option<String>,

    /// Short name of a route, e.g. a line number.
    pub route_short_name: Option<String>,

    /// Full name of a route, generally more descriptive than the short name.
    pub route_long_name: Option<String>,

    /// Indicates the type of transportation used on a route:
    /// `0` tram, `1` subway/BRT, `2` rail, `3` bus, `4` ferry,
    /// `5`–`7` cable/aerial/funicular (all treated as tram here).
    pub route_type: Option<u16>,
}
