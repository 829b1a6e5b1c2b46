//! Clipboard access.

use crate::error::{AppError, AppResult};
use clipboard::{ClipboardContext, ClipboardProvider};

/// Destination for copied text.
///
pub trait ClipboardSink {
    fn copy(&mut self, text: String) -> AppResult<()>;
}

/// System clipboard, opened on first use.
///
#[derive(Default)]
pub struct SystemClipboard {
    context: Option<ClipboardContext>,
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: String) -> AppResult<()> {
        if self.context.is_none() {
            let context =
                ClipboardContext::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
            self.context = Some(context);
        }
        match self.context.as_mut() {
            Some(context) => context
                .set_contents(text)
                .map_err(|e| AppError::Clipboard(e.to_string())),
            None => Err(AppError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}
