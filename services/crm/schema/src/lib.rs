//! sea-orm entities for the Kontor CRM schema.

pub mod contacts;
pub mod customers;
pub mod login_codes;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod users;
