//! Session and pending-login state for the Kontor CRM.
//!
//! Authentication state lives entirely in signed cookies: `kontor_session`
//! for an authenticated user and `kontor_pending` for a user who has passed
//! the password check but not yet entered their login code. There is no
//! server-side session store; every request materializes its state through
//! the extractors in [`identity`].

pub mod cookie;
pub mod identity;
pub mod token;
