//! # HTTP API Module
//!
//! Container for the `routes` submodule, which defines the web server
//! endpoints and handlers of the text processing service.

pub mod routes;
