//! Why-run messages describing what an action would do.

use crate::core::sqitch_status::StatusReport;

pub fn deploy_preview(report: &StatusReport) -> String {
    if report.is_up_to_date() {
        return "deploy nothing, because everything is up-to-date".to_string();
    }

    let mut message = String::from("deploy the following changesets:\n");
    for name in report.pending_change_names() {
        message.push_str("\n    ");
        message.push_str(name);
    }
    message
}

// sqitch cannot list what a revert would remove without doing it
pub fn revert_preview(target: &str) -> String {
    format!("revert schema to tag {target}")
}
