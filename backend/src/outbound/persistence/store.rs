//! MongoDB client bootstrap for the user collection.
//!
//! Connecting is bounded by one timeout: it caps server selection, the socket
//! connect and the initial `ping`, so an unreachable server fails startup
//! instead of hanging it.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use super::documents::UserDocument;

/// Errors that can occur while connecting to the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed or the client not built.
    #[error("invalid document store options: {message}")]
    Options { message: String },

    /// The server did not answer the initial ping.
    #[error("document store unreachable: {message}")]
    Unreachable { message: String },

    /// The initial ping did not complete in time.
    #[error("document store did not respond within {0:?}")]
    Timeout(Duration),
}

impl StoreError {
    /// Create an options error with the given message.
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options {
            message: message.into(),
        }
    }

    /// Create an unreachable error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }
}

/// Where the user collection lives and how long to wait for it.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use userinfo::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017")
///     .with_database("userinfo")
///     .with_collection("user")
///     .with_connect_timeout(Duration::from_secs(5));
/// assert_eq!(config.collection(), "user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
    collection: String,
    connect_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration for `uri` with the default names and a
    /// 10 second connect timeout.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: "userinfo".to_owned(),
            collection: "user".to_owned(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Set the bound applied to connecting and the initial ping.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Connect to the store, confirm it answers, and return the user collection.
///
/// # Errors
///
/// Returns [`StoreError::Options`] for an unusable connection string,
/// [`StoreError::Unreachable`] when the ping fails and
/// [`StoreError::Timeout`] when it does not finish within the configured
/// bound.
pub async fn connect(config: &StoreConfig) -> Result<Collection<UserDocument>, StoreError> {
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(|err| StoreError::options(err.to_string()))?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_owned());
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());

    let client = Client::with_options(options).map_err(|err| StoreError::options(err.to_string()))?;
    let database = client.database(config.database());

    debug!(database = config.database(), "pinging document store");
    tokio::time::timeout(config.connect_timeout(), async {
        database.run_command(doc! { "ping": 1 }).await
    })
    .await
    .map_err(|_| StoreError::Timeout(config.connect_timeout()))?
    .map_err(|err| StoreError::unreachable(err.to_string()))?;

    info!(
        database = config.database(),
        collection = config.collection(),
        "connected to document store"
    );
    Ok(database.collection::<UserDocument>(config.collection()))
}
