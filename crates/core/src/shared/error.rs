use thiserror::Error;

/// Failure raised while the capture loop is starting or running.
///
/// Only [`CaptureError::CaptureTransient`] is recoverable: the loop logs it
/// and retries the iteration. Every other variant ends the session after
/// cleanup.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("no frame returned by capture device: {0}")]
    CaptureTransient(String),
    #[error("camera {index} unavailable: {reason}")]
    CaptureFatal { index: i32, reason: String },
    #[error("classifier failure: {0}")]
    ClassifierFatal(String),
    #[error("display failure: {0}")]
    Display(String),
    #[error("rendering failure: {0}")]
    Render(String),
}

impl CaptureError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::CaptureTransient(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_capture_transient_is_transient() {
        assert!(CaptureError::CaptureTransient("timeout".into()).is_transient());
        assert!(!CaptureError::CaptureFatal {
            index: 0,
            reason: "busy".into()
        }
        .is_transient());
        assert!(!CaptureError::ClassifierFatal("empty".into()).is_transient());
        assert!(!CaptureError::Display("closed".into()).is_transient());
        assert!(!CaptureError::Render("bad frame".into()).is_transient());
    }

    #[test]
    fn test_fatal_message_names_camera() {
        let err = CaptureError::CaptureFatal {
            index: 2,
            reason: "device busy".into(),
        };
        assert_eq!(err.to_string(), "camera 2 unavailable: device busy");
    }
}
