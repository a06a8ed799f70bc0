use std::fmt;

use crate::JobState;

/// Text shown for states the console does not recognize.
pub const UNKNOWN_STATE_TEXT: &str = "Unknown";

/// Label text used when a finished job did not succeed.
pub const FAILED_TEXT: &str = "Failed";

pub fn pretty_state(state: &JobState) -> &'static str {
    match state {
        JobState::Canceled => "Canceled",
        JobState::Completed => "Completed",
        JobState::Created => "Created",
        JobState::InProgress => "In Progress",
        JobState::InQueue => "In Queue",
        JobState::Published => "Published",
        JobState::Unavailable => "Unavailable",
        JobState::Other(_) => UNKNOWN_STATE_TEXT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Ok,
    Pending,
    Warning,
    Unavailable,
    Canceled,
    Unknown,
}

impl StatusIcon {
    /// Single-character glyph for terminal rendering.
    pub fn symbol(self) -> &'static str {
        match self {
            StatusIcon::Ok => "✔",
            StatusIcon::Pending => "⧗",
            StatusIcon::Warning => "⚠",
            StatusIcon::Unavailable => "◷",
            StatusIcon::Canceled => "⊘",
            StatusIcon::Unknown => "?",
        }
    }

    /// Bootstrap glyphicon markup used by the web console.
    pub fn markup(self) -> String {
        let (glyph, color) = match self {
            StatusIcon::Ok => ("glyphicon-ok-circle", "seagreen"),
            StatusIcon::Pending => ("glyphicon-hourglass", "dimgrey"),
            StatusIcon::Warning => ("glyphicon-warning-sign", "darkred"),
            StatusIcon::Unavailable => ("glyphicon-time", "lightslategrey"),
            StatusIcon::Canceled => ("glyphicon-ban-circle", "lightslategrey"),
            StatusIcon::Unknown => ("glyphicon-question-sign", "lightslategrey"),
        };
        format!(
            r#"<span class="glyphicon {glyph}" style="color:{color}" aria-hidden="true"></span>"#
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Success,
    Info,
    Danger,
    Warning,
    Default,
}

impl LabelKind {
    pub fn css_class(self) -> &'static str {
        match self {
            LabelKind::Success => "label-success",
            LabelKind::Info => "label-info",
            LabelKind::Danger => "label-danger",
            LabelKind::Warning => "label-warning",
            LabelKind::Default => "label-default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabel {
    pub kind: LabelKind,
    pub text: String,
}

impl StatusLabel {
    fn new(kind: LabelKind, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }

    pub fn markup(&self) -> String {
        format!(
            r#"<span class="label {}">{}</span>"#,
            self.kind.css_class(),
            self.text
        )
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub icon: StatusIcon,
    pub label: StatusLabel,
}

/// Maps the success flag and state to an icon and label.
///
/// Rules are evaluated in order and the first match wins: success, still
/// running, finished without success, unavailable, canceled, and finally a
/// neutral badge for anything unrecognized.
pub fn status_badge(success: Option<bool>, state: &JobState) -> StatusBadge {
    let pretty = pretty_state(state);
    let (icon, label) = if success == Some(true) {
        (StatusIcon::Ok, StatusLabel::new(LabelKind::Success, pretty))
    } else {
        match state {
            JobState::Created | JobState::InQueue | JobState::InProgress => {
                (StatusIcon::Pending, StatusLabel::new(LabelKind::Info, pretty))
            }
            JobState::Completed | JobState::Published => (
                StatusIcon::Warning,
                StatusLabel::new(LabelKind::Danger, FAILED_TEXT),
            ),
            JobState::Unavailable => (
                StatusIcon::Unavailable,
                StatusLabel::new(LabelKind::Warning, pretty),
            ),
            JobState::Canceled => (
                StatusIcon::Canceled,
                StatusLabel::new(LabelKind::Default, pretty),
            ),
            JobState::Other(_) => (
                StatusIcon::Unknown,
                StatusLabel::new(LabelKind::Default, UNKNOWN_STATE_TEXT),
            ),
        }
    };
    StatusBadge { icon, label }
}
