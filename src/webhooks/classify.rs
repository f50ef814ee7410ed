//! Event classification decision tables.
//!
//! The mapping from raw payload flags to a notification outcome (marker,
//! label, logged subtype) is kept separate from rendering and delivery so it
//! can be tested on its own.

/// Classified pull-request outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrOutcome {
    pub emoji: &'static str,
    pub label: &'static str,
    pub subtype: &'static str,
}

/// Maps (action, merged flag) to a pull-request outcome.
///
/// Only `opened`, `reopened` and `closed` produce notifications; every other
/// action returns `None` and the event is dropped upstream. A `closed`
/// action splits on the merged flag, which defaults to false when the
/// payload omits it.
pub fn classify_pull_request(action: &str, merged: bool) -> Option<PrOutcome> {
    match (action, merged) {
        ("opened", _) => Some(PrOutcome {
            emoji: "🟦",
            label: "New pull request",
            subtype: "opened",
        }),
        ("reopened", _) => Some(PrOutcome {
            emoji: "🟩",
            label: "Pull request reopened",
            subtype: "reopened",
        }),
        ("closed", true) => Some(PrOutcome {
            emoji: "🟪",
            label: "Pull request merged",
            subtype: "merged",
        }),
        ("closed", false) => Some(PrOutcome {
            emoji: "🟥",
            label: "Pull request closed",
            subtype: "closed",
        }),
        _ => None,
    }
}

/// Classified workflow-run outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub emoji: &'static str,
    pub subtype: String,
}

const RUN_FAILURE_CONCLUSIONS: &[&str] = &["failure", "timed_out", "cancelled", "startup_failure"];

/// Maps (status, conclusion) to a workflow-run outcome.
///
/// A run that has not completed keeps its raw status as the subtype with a
/// pending marker. A completed run takes its conclusion: success gets the
/// success marker, the recognized failure set gets the failure marker, and
/// anything else stays neutral.
pub fn classify_workflow_run(status: &str, conclusion: Option<&str>) -> RunOutcome {
    if status != "completed" {
        return RunOutcome {
            emoji: "⏳",
            subtype: status.to_string(),
        };
    }

    let conclusion = conclusion.unwrap_or("unknown");
    let emoji = if conclusion == "success" {
        "✅"
    } else if RUN_FAILURE_CONCLUSIONS.contains(&conclusion) {
        "❌"
    } else {
        "⚪"
    };

    RunOutcome {
        emoji,
        subtype: conclusion.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_request_decision_table() {
        assert_eq!(classify_pull_request("opened", false).unwrap().subtype, "opened");
        assert_eq!(
            classify_pull_request("reopened", true).unwrap().subtype,
            "reopened"
        );
        assert_eq!(classify_pull_request("closed", true).unwrap().subtype, "merged");
        assert_eq!(classify_pull_request("closed", false).unwrap().subtype, "closed");
        assert!(classify_pull_request("synchronize", false).is_none());
        assert!(classify_pull_request("labeled", true).is_none());
    }

    #[test]
    fn workflow_run_pending_keeps_raw_status() {
        let outcome = classify_workflow_run("in_progress", None);
        assert_eq!(outcome.subtype, "in_progress");
        assert_eq!(outcome.emoji, "⏳");
    }

    #[test]
    fn workflow_run_completed_takes_conclusion() {
        assert_eq!(classify_workflow_run("completed", Some("success")).emoji, "✅");
        assert_eq!(classify_workflow_run("completed", Some("failure")).emoji, "❌");
        assert_eq!(
            classify_workflow_run("completed", Some("timed_out")).emoji,
            "❌"
        );
        assert_eq!(classify_workflow_run("completed", Some("skipped")).emoji, "⚪");
        assert_eq!(
            classify_workflow_run("completed", None).subtype,
            "unknown"
        );
    }
}
