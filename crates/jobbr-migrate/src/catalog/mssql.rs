//! SQL Server catalog access via Tiberius.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tiberius::{Client, Config, Query};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

use super::{CatalogClient, ConnectionInfo, QualifiedTableName};
use crate::config::connection_value;
use crate::error::{MigrateError, Result};

/// ADO keys naming the server to connect to.
const DATA_SOURCE_KEYS: &[&str] = &[
    "server",
    "data source",
    "address",
    "addr",
    "network address",
];

/// Tables of one schema, matched by exact schema name.
const TABLES_IN_SCHEMA_QUERY: &str = r#"
    SELECT s.name, t.name
    FROM sys.tables AS t
    INNER JOIN sys.schemas AS s ON s.schema_id = t.schema_id
    WHERE s.name = @P1
    ORDER BY t.name
"#;

/// Catalog client that opens a fresh SQL Server session per call.
#[derive(Debug, Clone, Default)]
pub struct MssqlCatalog {
    connect_timeout: Option<Duration>,
}

impl MssqlCatalog {
    /// Create a catalog client with unbounded connect attempts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound each connect attempt by `timeout`.
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    async fn open(&self, connection: &str) -> Result<(Client<Compat<TcpStream>>, String)> {
        let config = Config::from_ado_string(connection)?;
        let data_source = data_source(connection, &config);
        debug!("Opening SQL Server session to {}", config.get_addr());

        let client = self.bounded(establish(config)).await?;
        Ok((client, data_source))
    }

    async fn bounded<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| MigrateError::Timeout(limit.as_secs()))?,
            None => fut.await,
        }
    }
}

/// Server as written in the connection string, else the resolved address.
fn data_source(connection: &str, config: &Config) -> String {
    connection_value(connection, DATA_SOURCE_KEYS).unwrap_or_else(|| config.get_addr())
}

async fn establish(config: Config) -> Result<Client<Compat<TcpStream>>> {
    let tcp = TcpStream::connect(config.get_addr())
        .await
        .map_err(|e| MigrateError::Connection(e.to_string()))?;

    tcp.set_nodelay(true).ok();

    Ok(Client::connect(config, tcp.compat_write()).await?)
}

#[async_trait]
impl CatalogClient for MssqlCatalog {
    async fn connect(&self, connection: &str) -> Result<ConnectionInfo> {
        let (mut client, data_source) = self.open(connection).await?;

        let row = client
            .simple_query("SELECT DB_NAME()")
            .await?
            .into_row()
            .await?;

        let database = row
            .as_ref()
            .and_then(|r| r.get::<&str, _>(0))
            .unwrap_or_default()
            .to_string();

        Ok(ConnectionInfo {
            data_source,
            database,
            is_open: row.is_some(),
        })
    }

    async fn tables_in_schema(
        &self,
        connection: &str,
        schema: &str,
    ) -> Result<Vec<QualifiedTableName>> {
        let (mut client, _) = self.open(connection).await?;

        let mut query = Query::new(TABLES_IN_SCHEMA_QUERY);
        query.bind(schema);

        let rows = query.query(&mut client).await?.into_first_result().await?;

        let tables: Vec<QualifiedTableName> = rows
            .iter()
            .map(|row| {
                QualifiedTableName::new(
                    row.get::<&str, _>(0).unwrap_or_default(),
                    row.get::<&str, _>(1).unwrap_or_default(),
                )
            })
            .collect();

        debug!("Found {} tables in schema {}", tables.len(), schema);
        Ok(tables)
    }
}
