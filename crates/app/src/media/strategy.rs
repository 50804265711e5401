//! Ordered retrieval strategies for stored objects.

use jiff::Timestamp;

use crate::media::{MediaConfig, ResourceClass, SIGNED_URL_TTL_SECS, StoredAsset, sign_hex};

/// One way of asking the provider for a stored object.
///
/// Objects may be provisioned under different delivery policies, so callers
/// try each strategy in [`RetrievalStrategy::ORDERED`] order and stop at the
/// first success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStrategy {
    /// Plain fetch of the stored URL.
    Direct,

    /// Signed fetch against the `upload` delivery type.
    SignedUpload,

    /// Signed fetch against the `authenticated` delivery type.
    SignedAuthenticated,

    /// Signed fetch against the `private` delivery type.
    SignedPrivate,
}

impl RetrievalStrategy {
    /// Evaluation order: cheapest first, most restricted last.
    pub const ORDERED: [Self; 4] = [
        Self::Direct,
        Self::SignedUpload,
        Self::SignedAuthenticated,
        Self::SignedPrivate,
    ];

    const fn delivery_type(self) -> Option<&'static str> {
        match self {
            Self::Direct => None,
            Self::SignedUpload => Some("upload"),
            Self::SignedAuthenticated => Some("authenticated"),
            Self::SignedPrivate => Some("private"),
        }
    }

    /// Build the URL this strategy fetches.
    pub(crate) fn request_url(
        self,
        config: &MediaConfig,
        asset: &StoredAsset,
        class: ResourceClass,
        now: Timestamp,
    ) -> String {
        let Some(delivery_type) = self.delivery_type() else {
            return asset.url.clone();
        };

        let expires_at = now.as_second() + SIGNED_URL_TTL_SECS;
        let signature = sign_hex(
            &config.api_secret,
            &format!("{}:{delivery_type}:{expires_at}", asset.public_id),
        );

        format!(
            "{}/{}/{}/{delivery_type}/{}?expires_at={expires_at}&signature={signature}",
            config.delivery_addr,
            config.cloud_name,
            class.segment(),
            asset.public_id,
        )
    }
}
