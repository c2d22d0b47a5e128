use model::route::Route;
use routing::StoreError;
use sqlx::FromRow;

use super::corrupt_row;

#[derive(Debug, Clone, FromRow)]
pub struct RouteRow {
    pub id: String,
    pub agency_id: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub mode: String,
}

impl RouteRow {
    pub fn into_model(self) -> Result<Route, StoreError> {
        let mode = self
            .mode
            .parse()
            .map_err(|why: String| corrupt_row(format!("route {}: {why}", self.id)))?;
        Ok(Route {
            id: self.id,
            agency_id: self.agency_id,
            short_name: self.short_name,
            long_name: self.long_name,
            mode,
        })
    }
}
