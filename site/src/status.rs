//! Status banner with a self-dismissing timer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use htmlescape::encode_minimal;

/// How long a status message stays visible.
pub const DISPLAY_FOR: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerState {
    pub message: String,
    pub kind: StatusKind,
    pub hidden: bool,
}

/// The page's single status banner.
///
/// Every `show` schedules its own hide. Timers are never cancelled, so an earlier
/// timer can hide a message shown after it.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    state: Arc<Mutex<BannerState>>,
    display_for: Duration,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new(DISPLAY_FOR)
    }
}

impl StatusBanner {
    pub fn new(display_for: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(BannerState {
                message: String::new(),
                kind: StatusKind::Success,
                hidden: true,
            })),
            display_for,
        }
    }

    /// Show `message` and schedule it to hide. Must be called within a Tokio runtime.
    pub async fn show(&self, message: impl Into<String>, is_error: bool) {
        {
            let mut state = self.state.lock().await;
            state.message = message.into();
            state.kind = if is_error {
                StatusKind::Error
            } else {
                StatusKind::Success
            };
            state.hidden = false;
        }

        let state = Arc::clone(&self.state);
        let display_for = self.display_for;
        tokio::spawn(async move {
            tokio::time::sleep(display_for).await;
            state.lock().await.hidden = true;
        });
    }

    pub async fn snapshot(&self) -> BannerState {
        self.state.lock().await.clone()
    }

    pub async fn render(&self) -> String {
        let state = self.snapshot().await;
        let class = if state.hidden {
            format!("{} hidden", state.kind.css_class())
        } else {
            state.kind.css_class().to_string()
        };
        format!(
            r#"<div id="status-message" class="{}">{}</div>"#,
            class,
            encode_minimal(&state.message)
        )
    }
}
