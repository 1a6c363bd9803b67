use crate::task::Status;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;
pub const PRIORITY_MIN: u8 = 1;
pub const PRIORITY_MAX: u8 = 5;
pub const PRIORITY_DEFAULT: u8 = 3;

pub const DEFAULT_SORT_BY: &str = "priority";

/// Display attributes for a priority or status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub css_class: &'static str,
}

const PRIORITY_STYLES: [(u8, CodeStyle); 5] = [
    (1, CodeStyle { label: "Critical", icon: "!!", css_class: "priority-critical" }),
    (2, CodeStyle { label: "High", icon: "!", css_class: "priority-high" }),
    (3, CodeStyle { label: "Medium", icon: "-", css_class: "priority-medium" }),
    (4, CodeStyle { label: "Low", icon: "·", css_class: "priority-low" }),
    (5, CodeStyle { label: "Minimal", icon: "·", css_class: "priority-minimal" }),
];

const STATUS_STYLES: [(&str, CodeStyle); 3] = [
    ("TODO", CodeStyle { label: "To Do", icon: "○", css_class: "status-todo" }),
    ("IN_PROGRESS", CodeStyle { label: "In Progress", icon: "◐", css_class: "status-in-progress" }),
    ("DONE", CodeStyle { label: "Done", icon: "●", css_class: "status-done" }),
];

const UNKNOWN_STYLE: CodeStyle = CodeStyle {
    label: "Unknown",
    icon: "?",
    css_class: "unknown",
};

pub fn priority_style(priority: u8) -> &'static CodeStyle {
    PRIORITY_STYLES
        .iter()
        .find(|(code, _)| *code == priority)
        .map(|(_, style)| style)
        .unwrap_or(&UNKNOWN_STYLE)
}

pub fn status_style(code: &str) -> &'static CodeStyle {
    STATUS_STYLES
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, style)| style)
        .unwrap_or(&UNKNOWN_STYLE)
}

pub fn status_label(status: Status) -> &'static str {
    status_style(status.as_str()).label
}

#[cfg(test)]
mod tests {
    use super::{priority_style, status_style};

    #[test]
    fn known_codes_resolve_to_their_styles() {
        assert_eq!(priority_style(1).label, "Critical");
        assert_eq!(priority_style(5).css_class, "priority-minimal");
        assert_eq!(status_style("IN_PROGRESS").label, "In Progress");
        assert_eq!(status_style("DONE").icon, "●");
    }

    #[test]
    fn unrecognized_codes_fall_back_to_unknown() {
        assert_eq!(priority_style(0).label, "Unknown");
        assert_eq!(priority_style(10).label, "Unknown");
        assert_eq!(status_style("ARCHIVED").css_class, "unknown");
    }
}
