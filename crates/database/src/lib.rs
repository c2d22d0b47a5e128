//! Postgres backend of the routing graph: connection management, the
//! [`GraphStore`] implementation the search engine queries, and the feed
//! import / graph rebuild pipelines.

use std::{env, error::Error};

use async_trait::async_trait;
use model::graph::{Edge, Node};
use routing::{GraphStore, StoreError};

pub mod data_model;
pub mod import;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    pool: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(
        connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error>> {
        let url = connection_info.postgres_url();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait]
impl GraphStore for PgDatabase {
    async fn nearest_nodes(
        &self,
        latitude: f64,
        longitude: f64,
        k: usize,
    ) -> Result<Vec<Node>, StoreError> {
        queries::node::nearest(&self.pool, latitude, longitude, k).await
    }

    async fn outgoing_edges(&self, node_id: i64) -> Result<Vec<Edge>, StoreError> {
        queries::edge::outgoing(&self.pool, node_id).await
    }

    async fn get_node(&self, node_id: i64) -> Result<Node, StoreError> {
        queries::node::get(&self.pool, node_id).await
    }
}
