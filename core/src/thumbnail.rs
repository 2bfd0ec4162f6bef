//! Host-injected thumbnail generation (§6 `add_thumbnailer`). This crate
//! ships no codec, matching the Non-goal that concrete decoders/encoders
//! are external collaborators — only the `thumbnail` table's refcount
//! lifecycle (migration triggers) and this contract are owned here.

use async_trait::async_trait;
use medialib_errors::ParserError;

use crate::callbacks::EntityKind;

/// A fixed set of target sizes a thumbnailer must be able to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

#[async_trait]
pub trait Thumbnailer: Send + Sync {
    /// Generates (or reuses) a thumbnail for the given entity and returns
    /// its mrl. Implementations own cropping/aspect handling; the contract
    /// only fixes the size bucket and that output is aspect-preserving.
    async fn generate(&self, kind: EntityKind, entity_id: i32, size: SizeBucket) -> Result<String, ParserError>;
}
