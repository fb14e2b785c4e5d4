/*
 * Responsibility
 * - Router-level layers: auth (per route), cors, http plumbing, security headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
