//! Recommendation resolution gateway for the book-browsing front end.
//!
//! Turns a handful of read operations (active users, popular books,
//! content-similar books, hybrid recommendations, single-book lookup) into
//! calls against the upstream recommendation backend, falling back through an
//! ordered list of sources and finally a static substitute. Read paths never
//! fail because the backend is down.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
