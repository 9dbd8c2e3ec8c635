use serde::{Deserialize, Serialize};

use crate::domain::{AvailabilityResult, ElementId, ModalVisibility, PageMode};

/// One step of a scripted page session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionStep {
    SetInput { element: ElementId, value: String },
    Click { element: ElementId },
    Submit { element: ElementId },
    KeyDown { key: String },
    Advance { ms: u64 },
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub present: bool,
    pub visible: bool,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub mode: PageMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalVisibility>,
    pub status: PanelSnapshot,
    pub error: PanelSnapshot,
    pub personal_data_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_availability: Option<AvailabilityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub now_ms: u64,
    pub pending_timers: usize,
}
