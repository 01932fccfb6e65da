use library_api::{router, seed, AppState};
use resource_query::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("library-api")?;
    init_tracing(&config);

    let state = AppState::new(config.clone(), seed::authors())?;
    tracing::info!(authors = state.store.len(), "Author store seeded");

    Server::new(config).serve(router(state)).await?;

    Ok(())
}
