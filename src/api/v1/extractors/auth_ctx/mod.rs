/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Hand the request-scoped AuthCtx to handlers
 * - axum-specific code stays in core; the type itself lives in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor (401 when anonymous)
 * - MaybeAuthCtx (never rejects)
 */

mod core;
mod types;

pub use self::core::{AuthCtxExtractor, MaybeAuthCtx};
pub use types::AuthCtx;
