/*
 * Responsibility
 * - Public surface of the middleware layer
 * - auth: bearer session authentication; http: request id, tracing, limits
 */
pub mod auth;
pub mod http;
