use model::stop::Stop;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct StopRow {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<StopRow> for Stop {
    fn from(row: StopRow) -> Self {
        Stop {
            id: row.id,
            name: row.name,
            latitude: row.lat,
            longitude: row.lon,
        }
    }
}
