use serde_json::Value;
use tracing::debug;
use wallet_adapter_common::{FrameError, RequestId};

use crate::host::{FrameHost, FrameId, LoadCallback};

use super::handle::FrameHandle;
use super::types::{CloseReason, FrameSpec};
use super::FrameManager;

impl<H: FrameHost> FrameManager<H> {
    /// Open an overlay frame at `path` under the widget base URL.
    ///
    /// Any attached frame is removed first and returned alongside the new
    /// handle. `on_load` fires once the new frame's document has loaded.
    /// An invalid `path` fails before anything is removed.
    pub fn open(
        &mut self,
        path: &str,
        request_id: Option<RequestId>,
        on_load: LoadCallback,
    ) -> Result<(FrameHandle, Option<FrameHandle>), FrameError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| FrameError::InvalidUrl(format!("{path}: {e}")))?;

        let evicted = self.close(CloseReason::Replaced);

        let spec = FrameSpec::overlay(url);
        let id = self.host.mount(&spec, on_load)?;

        debug!(frame = %id, url = %spec.url, request_id = ?request_id, "frame opened");

        let handle = FrameHandle {
            id,
            url: spec.url,
            request_id,
            loaded: false,
        };
        self.current = Some(handle.clone());
        Ok((handle, evicted))
    }

    /// Remove the attached frame, if any. Safe to call repeatedly.
    pub fn close(&mut self, reason: CloseReason) -> Option<FrameHandle> {
        let handle = self.current.take()?;
        self.host.unmount(handle.id);
        debug!(frame = %handle.id, ?reason, "frame removed");
        Some(handle)
    }

    /// Post a message into `frame`, which must still be the attached frame.
    pub fn post(
        &self,
        frame: FrameId,
        message: &Value,
        target_origin: &str,
    ) -> Result<(), FrameError> {
        if !self.is_current(frame) {
            return Err(FrameError::NotMounted(frame.to_string()));
        }
        self.host.post_message(frame, message, target_origin)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::json;
    use url::Url;

    use crate::testing::RecordingHost;

    use super::*;

    fn manager() -> (FrameManager<RecordingHost>, RecordingHost) {
        let host = RecordingHost::new();
        let base = Url::parse("https://widget.example").unwrap();
        (FrameManager::new(host.clone(), base), host)
    }

    fn noop() -> LoadCallback {
        Box::new(|| {})
    }

    #[test]
    fn open_resolves_path_against_base() {
        let (mut frames, host) = manager();
        let (handle, _) = frames.open("/login.html", None, noop()).unwrap();
        assert_eq!(handle.url().as_str(), "https://widget.example/login.html");
        assert_eq!(host.live_frames(), vec![handle.id()]);
        assert_eq!(
            host.frame_url(handle.id()).unwrap().as_str(),
            "https://widget.example/login.html"
        );
        assert!(!handle.is_loaded());
    }

    #[test]
    fn open_replaces_existing_frame() {
        let (mut frames, host) = manager();
        let (first, evicted) = frames.open("/login.html", None, noop()).unwrap();
        assert!(evicted.is_none());
        let (second, evicted) = frames.open("/sign.html", None, noop()).unwrap();

        assert_eq!(evicted, Some(first.clone()));
        assert_ne!(first.id(), second.id());
        assert_eq!(host.live_frames(), vec![second.id()]);
        assert_eq!(host.max_live_frames(), 1);
        assert!(frames.is_current(second.id()));
        assert!(!frames.is_current(first.id()));
    }

    #[test]
    fn open_keeps_request_binding() {
        let (mut frames, _host) = manager();
        let id = RequestId::from("req-1");
        frames.open("/sign.html", Some(id.clone()), noop()).unwrap();
        assert_eq!(frames.current().unwrap().request_id(), Some(&id));
    }

    #[test]
    fn close_is_idempotent() {
        let (mut frames, host) = manager();
        let (handle, _) = frames.open("/login.html", None, noop()).unwrap();

        let closed = frames.close(CloseReason::Resolved).unwrap();
        assert_eq!(closed.id(), handle.id());
        assert!(frames.close(CloseReason::Resolved).is_none());
        assert!(frames.current().is_none());
        assert!(host.live_frames().is_empty());
    }

    #[test]
    fn load_callback_fires_once_for_live_frame() {
        let (mut frames, host) = manager();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let (handle, _) = frames
            .open("/login.html", None, Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        assert!(host.finish_load(handle.id()));
        assert!(!host.finish_load(handle.id()));
        assert_eq!(fired.get(), 1);
        assert!(frames.mark_loaded(handle.id()));
        assert!(frames.current().unwrap().is_loaded());
    }

    #[test]
    fn replaced_frame_never_loads() {
        let (mut frames, host) = manager();
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let (first, _) = frames
            .open("/login.html", None, Box::new(move || flag.set(true)))
            .unwrap();
        frames.open("/sign.html", None, noop()).unwrap();

        assert!(!host.finish_load(first.id()));
        assert!(!fired.get());
        assert!(!frames.mark_loaded(first.id()));
    }

    #[test]
    fn post_targets_current_frame_only() {
        let (mut frames, host) = manager();
        let (first, _) = frames.open("/login.html", None, noop()).unwrap();
        let (second, _) = frames.open("/sign.html", None, noop()).unwrap();

        let message = json!({ "type": "wallet-adapter" });
        let err = frames.post(first.id(), &message, "*").unwrap_err();
        assert!(matches!(err, FrameError::NotMounted(_)));

        frames.post(second.id(), &message, "https://widget.example").unwrap();
        let posted = host.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].frame, second.id());
        assert_eq!(posted[0].target_origin, "https://widget.example");
    }

    #[test]
    fn failed_mount_leaves_no_frame() {
        let (mut frames, host) = manager();
        frames.open("/login.html", None, noop()).unwrap();
        host.fail_next_mount("appendChild threw");

        let err = frames.open("/sign.html", None, noop()).unwrap_err();
        assert!(matches!(err, FrameError::MountFailed(_)));
        assert!(frames.current().is_none());
        assert!(host.live_frames().is_empty());
    }

    #[test]
    fn invalid_path_keeps_current_frame() {
        let (mut frames, host) = manager();
        let id = RequestId::from("req-1");
        let (handle, _) = frames.open("/login.html", Some(id.clone()), noop()).unwrap();

        let err = frames.open("//", None, noop()).unwrap_err();
        assert!(matches!(err, FrameError::InvalidUrl(_)));
        assert_eq!(host.live_frames(), vec![handle.id()]);
        assert_eq!(frames.current().unwrap().request_id(), Some(&id));
    }
}
