use sea_orm_migration::prelude::*;

mod m20260901_000001_create_users;
mod m20260901_000002_create_login_codes;
mod m20260901_000003_create_customers;
mod m20260901_000004_create_products;
mod m20260901_000005_create_orders;
mod m20260901_000006_create_order_items;
mod m20260901_000007_create_contacts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_users::Migration),
            Box::new(m20260901_000002_create_login_codes::Migration),
            Box::new(m20260901_000003_create_customers::Migration),
            Box::new(m20260901_000004_create_products::Migration),
            Box::new(m20260901_000005_create_orders::Migration),
            Box::new(m20260901_000006_create_order_items::Migration),
            Box::new(m20260901_000007_create_contacts::Migration),
        ]
    }
}
