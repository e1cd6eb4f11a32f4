use sea_orm_migration::prelude::*;

use kontor_crm_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
