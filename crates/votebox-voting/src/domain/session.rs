//! Anonymous session identity.
//!
//! The session transport (a signed cookie) owns persistence and guarantees
//! that one physical client session is read and written through a single
//! per-request session object. Two concurrent first requests from the same
//! client are therefore not prevented here; the transport decides which
//! token sticks.

use uuid::Uuid;

/// Result of resolving the token a client presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSession {
    /// The client presented a well-formed token; it is returned unchanged.
    Existing(String),
    /// A new token was minted. The caller must persist it in the transport.
    Created(String),
}

impl ResolvedSession {
    /// The session token.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Existing(id) | Self::Created(id) => id,
        }
    }

    /// Returns `true` if the token must be written back to the transport.
    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Consumes the resolution and returns the token.
    #[must_use]
    pub fn into_id(self) -> String {
        match self {
            Self::Existing(id) | Self::Created(id) => id,
        }
    }
}

/// Resolves the incoming token, minting a fresh one when it is absent or
/// malformed.
#[must_use]
pub fn resolve(incoming_token: Option<&str>) -> ResolvedSession {
    match incoming_token {
        Some(token) if is_well_formed(token) => ResolvedSession::Existing(token.to_owned()),
        _ => ResolvedSession::Created(new_token()),
    }
}

/// A well-formed token is a hyphenated UUID string.
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == uuid::fmt::Hyphenated::LENGTH && Uuid::try_parse(token).is_ok()
}

/// 128 random bits rendered as a hyphenated UUID.
fn new_token() -> String {
    Uuid::new_v4().hyphenated().to_string()
}
