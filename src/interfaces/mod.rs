//! Interface layer: the HTTP API

pub mod http;
