//! Getting the current frame out of a running session.
//!
//! The surface is read directly when the frame lets us. Otherwise a
//! `captureRequest` message goes into the session and the node waits (up to a
//! timeout) for the matching `captureResult`.

use std::time::{Duration, Instant};

use media::frame::data_url::is_capture_payload;
use media::frame::snapshot::CAPTURE_JPEG_QUALITY;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use util::channels::ChannelError;
use util::{debug_log_error, debug_log_info, debug_log_warning};

use crate::controls::names;
use crate::errors::CaptureError;
use crate::host::NodeHost;
use crate::node::{NodeId, RetroEngineNode};
use crate::session::SessionHandle;

pub const DEFAULT_CAPTURE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Messages exchanged with a session over its channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionMessage {
    #[serde(rename_all = "camelCase")]
    CaptureRequest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    CaptureResult {
        #[serde(default)]
        payload: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<u64>,
    },
}

impl RetroEngineNode {
    /// Capture the session's current frame, store it in the frame control and
    /// return it.
    pub fn capture_frame(
        &mut self,
        timeout: Duration,
        host: &mut dyn NodeHost,
    ) -> Result<String, CaptureError> {
        let id = self.id;
        let Some(session) = &mut self.session else {
            debug_log_error!("[Retro Engine Node {id}] Emulator not running or iframe inaccessible.");
            return Err(CaptureError::NoSession);
        };

        let frame = match read_surface(id, session) {
            Some(frame) => frame,
            None => request_frame(id, session, timeout)?,
        };
        self.store_frame(frame, host)
    }

    fn store_frame(&mut self, frame: String, host: &mut dyn NodeHost) -> Result<String, CaptureError> {
        let Some(control) = self.controls.by_name_mut(names::SCREEN_DATA) else {
            debug_log_error!("[Retro Engine Node {}] screen_data widget not found.", self.id);
            return Err(CaptureError::MissingFrameControl);
        };

        control.set_value(frame.as_str());
        host.set_dirty_canvas(true, false);
        Ok(frame)
    }
}

/// Read and encode the surface directly. `None` if that isn't possible.
fn read_surface(id: NodeId, session: &mut SessionHandle) -> Option<String> {
    let snapshot = session
        .frame_mut()
        .read_surface()
        .inspect_err(|e| debug_log_warning!("[Retro Engine Node {id}] Direct capture failed, falling back: {e}"))
        .ok()?;

    snapshot
        .to_jpeg_data_url(CAPTURE_JPEG_QUALITY)
        .inspect_err(|e| debug_log_warning!("[Retro Engine Node {id}] Direct capture failed, falling back: {e}"))
        .ok()
}

/// Ask the session for a frame and wait for its answer.
fn request_frame(
    id: NodeId,
    session: &mut SessionHandle,
    timeout: Duration,
) -> Result<String, CaptureError> {
    let deadline = Instant::now() + timeout;
    let request_id = session.next_request_id();

    // Answers to requests that already timed out.
    let stale = session.port().discard_pending();
    if stale > 0 {
        debug_log_info!("[Retro Engine Node {id}] Discarded {stale} stale session message(s).");
    }

    let request = serde_json::to_value(SessionMessage::CaptureRequest {
        request_id: Some(request_id),
    })
    .map_err(|e| CaptureError::SendFailed(e.to_string()))?;
    session.port().send(request).map_err(|e| {
        debug_log_error!("[Retro Engine Node {id}] Error sending capture request: {e}");
        CaptureError::SendFailed(e.to_string())
    })?;

    loop {
        let message = match session.port().wait_deadline(deadline) {
            Ok(message) => message,
            Err(ChannelError::Timeout { .. }) => {
                debug_log_error!("[Retro Engine Node {id}] Timeout waiting for canvas data.");
                return Err(CaptureError::Timeout { timeout });
            }
            Err(ChannelError::ConnectionDropped) => return Err(CaptureError::SessionGone),
        };

        let Ok(SessionMessage::CaptureResult {
            payload,
            request_id: answered,
        }) = serde_json::from_value(message)
        else {
            continue;
        };
        if answered.is_some_and(|answered| answered != request_id) {
            continue;
        }

        return validate_payload(payload).inspect_err(|e| {
            debug_log_error!("[Retro Engine Node {id}] {e}");
        });
    }
}

fn validate_payload(payload: Value) -> Result<String, CaptureError> {
    match payload {
        Value::String(payload) if !payload.is_empty() && is_capture_payload(&payload) => Ok(payload),
        Value::String(payload) => Err(CaptureError::InvalidPayload {
            received: format!("string {:?}", payload.chars().take(32).collect::<String>()),
        }),
        other => Err(CaptureError::InvalidPayload {
            received: describe(&other).to_string(),
        }),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use media::frame::{Dimensions, SurfaceSnapshot};
    use serde_json::json;

    use super::*;
    use crate::node::NodeHooks;
    use crate::testing::{RecordingHost, answer_once, node_with_catalog};

    const NES: &str = r#"{"NES": {"roms": ["mario.nes"], "cores": ["core_a"]}}"#;
    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn running_node(host: &mut RecordingHost) -> RetroEngineNode {
        let mut node = node_with_catalog(NES, "NES");
        node.on_create(host);
        node.start(host).unwrap();
        node
    }

    fn screen_data(node: &RetroEngineNode) -> &str {
        node.controls().text(names::SCREEN_DATA).unwrap()
    }

    #[test]
    fn messages_use_the_wire_names() {
        let request = serde_json::to_value(SessionMessage::CaptureRequest {
            request_id: Some(3),
        })
        .unwrap();
        assert_eq!(request, json!({"type": "captureRequest", "requestId": 3}));

        let result: SessionMessage =
            serde_json::from_value(json!({"type": "captureResult", "payload": PIXEL})).unwrap();
        assert_eq!(
            result,
            SessionMessage::CaptureResult {
                payload: json!(PIXEL),
                request_id: None
            }
        );
    }

    #[test]
    fn no_session_fails_without_trying() {
        let mut host = RecordingHost::default();
        let mut node = node_with_catalog(NES, "NES");
        node.on_create(&mut host);

        assert_eq!(
            node.capture_frame(DEFAULT_CAPTURE_TIMEOUT, &mut host),
            Err(CaptureError::NoSession)
        );
        assert_eq!(host.log.borrow().surface_reads, 0);
    }

    #[test]
    fn reachable_surface_is_captured_directly() {
        let mut host = RecordingHost {
            surface: Some(SurfaceSnapshot::new(Dimensions::new(4, 2).unwrap(), vec![200; 32]).unwrap()),
            ..Default::default()
        };
        let mut node = running_node(&mut host);

        let started = Instant::now();
        let frame = node.capture_frame(Duration::from_secs(10), &mut host).unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(frame.starts_with("data:image/jpeg;base64,"));
        assert_eq!(screen_data(&node), frame);
        assert_eq!(host.dirty.last(), Some(&(true, false)));
        // Nothing was asked of the session.
        assert_eq!(host.emulators[0].check(), Ok(None));
    }

    #[test]
    fn falls_back_to_asking_the_session() {
        let mut host = RecordingHost::default();
        let mut node = running_node(&mut host);

        let emulator = answer_once(host.take_emulator(), |request| {
            let request_id = request["requestId"].clone();
            vec![
                json!({"type": "ready"}),
                json!({"type": "captureResult", "payload": "data:image/png;base64,old", "requestId": 999}),
                json!({"type": "captureResult", "payload": PIXEL, "requestId": request_id}),
            ]
        });

        let frame = node.capture_frame(Duration::from_secs(5), &mut host).unwrap();
        let _emulator = emulator.join().unwrap();

        assert_eq!(frame, PIXEL);
        assert_eq!(screen_data(&node), PIXEL);
        assert_eq!(host.log.borrow().surface_reads, 1);
    }

    #[test]
    fn silence_times_out_no_earlier_than_the_budget() {
        let mut host = RecordingHost::default();
        let mut node = running_node(&mut host);

        let timeout = Duration::from_millis(150);
        let started = Instant::now();
        let result = node.capture_frame(timeout, &mut host);

        assert!(started.elapsed() >= timeout);
        assert_eq!(result, Err(CaptureError::Timeout { timeout }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Timeout (150ms) waiting for screenshot data."
        );
        assert_eq!(screen_data(&node), "");
    }

    #[test]
    fn bad_payloads_are_rejected_immediately() {
        for payload in [json!(42), json!(""), json!("data:text/plain;base64,AAAA"), Value::Null] {
            let mut host = RecordingHost::default();
            let mut node = running_node(&mut host);
            node.controls_mut()
                .by_name_mut(names::SCREEN_DATA)
                .unwrap()
                .set_value(PIXEL);

            let emulator = answer_once(host.take_emulator(), move |_| {
                vec![json!({"type": "captureResult", "payload": payload})]
            });

            let started = Instant::now();
            let result = node.capture_frame(Duration::from_secs(10), &mut host);
            let _emulator = emulator.join().unwrap();

            assert!(matches!(result, Err(CaptureError::InvalidPayload { .. })));
            assert!(started.elapsed() < Duration::from_secs(5));
            // The last good frame is kept.
            assert_eq!(screen_data(&node), PIXEL);
        }
    }

    #[test]
    fn session_going_away_ends_the_wait() {
        let mut host = RecordingHost::default();
        let mut node = running_node(&mut host);
        drop(host.take_emulator());

        assert!(matches!(
            node.capture_frame(Duration::from_secs(10), &mut host),
            Err(CaptureError::SendFailed(_))
        ));
    }

    #[test]
    fn stale_answers_are_discarded() {
        let mut host = RecordingHost::default();
        let mut node = running_node(&mut host);
        let emulator = host.take_emulator();
        emulator
            .send(json!({"type": "captureResult", "payload": "data:image/png;base64,stale"}))
            .unwrap();

        let emulator = answer_once(emulator, |_| {
            vec![json!({"type": "captureResult", "payload": PIXEL})]
        });
        let frame = node.capture_frame(Duration::from_secs(5), &mut host);
        let _emulator = emulator.join().unwrap();

        assert_eq!(frame.as_deref(), Ok(PIXEL));
    }
}
