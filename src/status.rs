//! Status model for the airlock panels.
//!
//! Owns the single current [`DisplayStatus`] and the panels it is rendered
//! on. The status only changes through [`StatusModel::set_status`] (or its
//! numeric twin), which suppresses redundant panel writes.
//!
//! ## Display mode
//!
//! A panel shows either a status glyph ([`DisplayMode::Texture`]) or free
//! progress text ([`DisplayMode::Text`]). The mode is tracked on its own:
//! writing text leaves the status untouched, and the next status render after
//! text always reaches the panels even when the status value is unchanged.
//! The model starts [`DisplayMode::Blank`], so the first render always goes
//! out, `Unknown` included.
//!
//! | Status   | Code | Label          |
//! |----------|------|----------------|
//! | Unknown  | -1   | `Construction` |
//! | Ready    | 0    | `Online`       |
//! | NoEntry  | 1    | `No Entry`     |
//! | Hazard   | 2    | `Danger`       |
//! | Transit  | 3    | `Arrow`        |

use core::fmt;

use log::debug;

use crate::app::ports::Display;
use crate::error::Error;

/// The attached panels, in discovery order.
pub type Panels = Vec<Box<dyn Display>>;

/// Label shown for `Unknown` and for any unrecognised status code.
pub const LABEL_FALLBACK: &str = "Construction";

/// Discrete airlock status shown on the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum DisplayStatus {
    Unknown = -1,
    Ready = 0,
    NoEntry = 1,
    Hazard = 2,
    Transit = 3,
}

impl DisplayStatus {
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Map a numeric code back to a status. `None` for anything out of range.
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::Unknown),
            0 => Some(Self::Ready),
            1 => Some(Self::NoEntry),
            2 => Some(Self::Hazard),
            3 => Some(Self::Transit),
            _ => None,
        }
    }

    /// Panel glyph for this status.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "Online",
            Self::NoEntry => "No Entry",
            Self::Hazard => "Danger",
            Self::Transit => "Arrow",
            Self::Unknown => LABEL_FALLBACK,
        }
    }
}

impl TryFrom<i8> for DisplayStatus {
    type Error = Error;

    fn try_from(code: i8) -> Result<Self, Error> {
        Self::from_code(code).ok_or(Error::InvalidStatus(code))
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Ready => "ready",
            Self::NoEntry => "no-entry",
            Self::Hazard => "hazard",
            Self::Transit => "transit",
        };
        f.write_str(s)
    }
}

/// What the panels are currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Nothing rendered since startup.
    Blank,
    Texture,
    Text,
}

/// Result of a status render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Same status already on screen; nothing written.
    Unchanged,
    /// Panels updated. `from == to` when only the display mode switched back.
    Rendered {
        from: DisplayStatus,
        to: DisplayStatus,
    },
    /// Unrecognised code: fallback glyph shown, status forced to `Unknown`.
    Fallback { code: i8, from: DisplayStatus },
}

pub struct StatusModel {
    panels: Panels,
    current: DisplayStatus,
    mode: DisplayMode,
    /// Text last written in text mode, for dedup.
    text: String,
    /// Rendering passes issued since construction (one per status or text
    /// write, regardless of panel count).
    writes: u64,
}

impl StatusModel {
    pub fn new(panels: Panels) -> Self {
        Self {
            panels,
            current: DisplayStatus::Unknown,
            mode: DisplayMode::Blank,
            text: String::new(),
            writes: 0,
        }
    }

    pub fn current(&self) -> DisplayStatus {
        self.current
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Show `status` on every panel unless it is already showing.
    pub fn set_status(&mut self, status: DisplayStatus) -> Render {
        if status == self.current && self.mode == DisplayMode::Texture {
            return Render::Unchanged;
        }
        let from = self.current;
        self.render_label(status.label());
        self.current = status;
        debug!("panels: {from} -> {status}");
        Render::Rendered { from, to: status }
    }

    /// Numeric entry point for callers holding a raw status code.
    pub fn set_status_code(&mut self, code: i8) -> Render {
        let e = match DisplayStatus::try_from(code) {
            Ok(status) => return self.set_status(status),
            Err(e) => e,
        };
        debug!("{e}, showing {LABEL_FALLBACK}");
        let from = self.current;
        self.render_label(LABEL_FALLBACK);
        self.current = DisplayStatus::Unknown;
        Render::Fallback { code, from }
    }

    /// Write free-form progress text. Returns `false` when the same text is
    /// already showing. The current status is left as it was.
    pub fn set_text(&mut self, text: &str, append: bool) -> bool {
        if !append && self.mode == DisplayMode::Text && self.text == text {
            return false;
        }
        for panel in &mut self.panels {
            panel.show_text(text, append);
        }
        if append && self.mode == DisplayMode::Text {
            self.text.push_str(text);
        } else {
            self.text.clear();
            self.text.push_str(text);
        }
        self.mode = DisplayMode::Text;
        self.writes += 1;
        true
    }

    fn render_label(&mut self, label: &str) {
        for panel in &mut self.panels {
            panel.show_status(label);
        }
        self.mode = DisplayMode::Texture;
        self.text.clear();
        self.writes += 1;
    }
}
