pub mod auth;
pub mod contact;
pub mod customer;
pub mod dashboard;
pub mod order;
