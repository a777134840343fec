//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /cache/:namespace/:key` - Store a value
//! - `GET /cache/:namespace/:key` - Retrieve a value
//! - `GET /cache/:namespace/:key/exists` - Check for a live value
//! - `DELETE /cache/:namespace/:key` - Delete a value
//! - `DELETE /cache/:namespace` - Clear a namespace
//! - `PUT /batch/:namespace` - Store several values
//! - `POST /batch/:namespace/get` - Retrieve several values
//! - `POST /batch/:namespace/delete` - Delete several values
//! - `GET /stats` - Get store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
