//! HTTP server: routes, CORS, DTOs, and the OpenAPI document.

pub mod config;
pub mod dto;
pub mod openapi;
pub mod routes;
