//! Collaborative-filtering movie recommender.
//!
//! Scores user-to-user similarity with the Pearson correlation coefficient
//! over commonly rated items, ranks the nearest neighbors, and aggregates
//! their ratings into a weighted recommendation list. The rating matrix is
//! loaded once at startup and served over a small HTTP API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
