pub mod job_repo;
pub mod notification_repo;
pub mod quote_repo;
pub mod repository_error;

use mongodb::options::{ClientOptions, Credential, ResolverConfig};
use mongodb::{Client, Database};

use crate::config::mongo_conf::MongoConfig;

/// Connect to the configured database. Each Mongo repository gets its typed
/// collection handle from the database returned here.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare())
            .await?;
    client_options.app_name = Some("ObralinkBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(
        config.connection_timeout_secs,
    ));

    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }

    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}
