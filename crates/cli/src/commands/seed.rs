use std::sync::Arc;

use crate::commands::{with_database, CommandResult};
use catalog_core::service::ProductService;
use catalog_db::{migrations, DemoCatalog, SeedResult, SqlProductRepository};

pub fn run() -> CommandResult {
    let result = with_database("seed", |pool| async move {
        if let Err(error) = migrations::run_pending(&pool).await {
            return Err(("migration", error.to_string(), 5u8));
        }

        let service = ProductService::new(Arc::new(SqlProductRepository::new(pool)));
        DemoCatalog::load(&service)
            .await
            .map_err(|error| ("seed_execution", error.to_string(), 6u8))
    });

    match result {
        Ok(seeded) => CommandResult::success("seed", seed_message(&seeded)),
        Err(failure) => failure,
    }
}

fn seed_message(result: &SeedResult) -> String {
    format!(
        "demo catalog loaded: {} inserted, {} already present",
        result.inserted, result.skipped
    )
}
