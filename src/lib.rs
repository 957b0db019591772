//! # HotelHub accounts
//!
//! `hotelhub` owns the user accounts of the HotelHub booking site: people
//! register with a username, email and password, then log in to receive a
//! signed session token.
//!
//! ## Registration
//!
//! Passwords are hashed with **Argon2id** before they reach storage. The cost
//! (memory, iterations, parallelism) is configurable so it can be raised as
//! hardware gets faster. The response to a registration never contains the
//! hash, only `id`, `email` and `username`.
//!
//! ## Login
//!
//! A successful login yields an `HS256` JWT whose claims carry the user id
//! (`sub`) and a 24 hour expiration. The token is returned in the JSON body and
//! as a `token` cookie with the same expiry. Unknown emails and wrong passwords
//! produce the same `401 Invalid credentials` response.
//!
//! ## Storage
//!
//! Users live behind the [`hotelhub::storage::UserStore`] capability, backed by
//! Postgres in production and by an in-process map for local runs and tests.

pub mod cli;
pub mod hotelhub;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
