use console_core::{Bootstrap, PluginDirectory, PluginKind};
use console_logging::{console_error, console_info};

use crate::{ConsoleApi, FetchError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("startup fetch of {endpoint} failed: {source}")]
pub struct BootstrapError {
    pub endpoint: &'static str,
    #[source]
    pub source: FetchError,
}

fn at(endpoint: &'static str) -> impl FnOnce(FetchError) -> BootstrapError {
    move |source| BootstrapError { endpoint, source }
}

/// Loads application info, providers and publishers concurrently.
///
/// All three must succeed; the first failure is returned and the partial
/// results are discarded.
pub async fn load_directory(api: &dyn ConsoleApi) -> Result<Bootstrap, BootstrapError> {
    let outcome = tokio::try_join!(
        async { api.about().await.map_err(at("version")) },
        async { api.plugins(PluginKind::Provider).await.map_err(at("providers")) },
        async { api.plugins(PluginKind::Publisher).await.map_err(at("publishers")) },
    );

    match outcome {
        Ok((about, providers, publishers)) => {
            console_info!(
                "Directory loaded: {} {} with {} providers, {} publishers",
                about.application_name,
                about.version,
                providers.len(),
                publishers.len()
            );
            Ok(Bootstrap {
                about,
                directory: PluginDirectory::new(providers, publishers),
            })
        }
        Err(err) => {
            console_error!("{}", err);
            Err(err)
        }
    }
}
