use url::Url;
use wallet_adapter_common::RequestId;

use crate::host::FrameId;

/// The attached overlay frame and the exchange it serves.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameHandle {
    pub(super) id: FrameId,
    pub(super) url: Url,
    pub(super) request_id: Option<RequestId>,
    pub(super) loaded: bool,
}

impl FrameHandle {
    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The request this frame was opened for.
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Whether the frame's load notification has fired.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
