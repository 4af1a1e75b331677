use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(toolhub_catalog_migration::Migrator).await;
}
