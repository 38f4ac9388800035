//! # Error Types
//!
//! Error taxonomy for the pose engine. Only two conditions are surfaced as
//! errors: a pose document that is not well-formed ([`ValidationError`]) and
//! a failed model import ([`ImportError`]). Everything softer — a joint with
//! no bilateral counterpart, a joint with no visible part, an unknown joint
//! name in a document, a stale node handle — resolves as a silent no-op and
//! is reported through `Option` returns, never through these types.
//!
//! No error originating here is fatal to the process.

use thiserror::Error;

/// A pose document failed the well-formedness checks of the codec.
///
/// Applying a document is not transactional: joint rotations written before
/// the failing check stay written. In practice the checks all run against
/// the top-level document shape, so a failure means nothing was applied at
/// all unless the `props` field itself was malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The document root is not a JSON object.
    #[error("pose document must be a JSON object")]
    NotAnObject,

    /// The `joints` field is present but is not an object.
    #[error("pose document `joints` must be an object of name -> [qx, qy, qz, qw]")]
    MalformedJoints,

    /// The `props` field is present but is not an array.
    #[error("pose document `props` must be an array of prop descriptors")]
    MalformedProps,
}

/// Model import failed at the collaborator boundary.
///
/// Always recoverable: the entity registry is left exactly as it was, any
/// temporary resources the import allocated are released, and the caller is
/// expected to surface this to the user rather than abort.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The import collaborator reported a parse or load failure.
    #[error("model import failed")]
    Collaborator(#[from] anyhow::Error),

    /// The import collaborator went away without delivering a model.
    #[error("import collaborator disconnected before delivering a model")]
    Disconnected,
}
