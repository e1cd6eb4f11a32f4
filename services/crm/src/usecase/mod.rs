pub mod contact;
pub mod customer;
pub mod dashboard;
pub mod login;
pub mod order;
pub mod password;
pub mod register;
pub mod verify;
