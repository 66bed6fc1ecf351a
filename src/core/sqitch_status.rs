//! Interpretation of `sqitch status` output.
//!
//! sqitch has no machine-readable status query, so this module scrapes its
//! human-readable output. Callers only see [`StatusReport::parse`]; if sqitch ever
//! grows a structured status format, only this module has to change.
//!
//! Representative output:
//!
//! ```text
//! # On database bifrost_test
//! # Project:  bifrost
//! # Change:   842b0858d77d016dd08bcc4452af3c2152e4c1ca
//! # Name:     debug_object_acl_view
//! # Tag:      @1.1.6
//! # Deployed: 2013-06-26 09:50:30 -0400
//! # By:       Jane Doe <jane@example.com>
//! #
//! Undeployed changes:
//!   * actor_has_bulk_permission_on @1.2.0 @1.2.1 @1.2.2
//!   * update_acl
//! ```
//!
//! The parser is coupled to this shape and must be re-checked when sqitch changes
//! its output.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Error sqitch reports when its registry tables do not exist yet
const UNINITIALIZED_MARKER: &str = r#"ERROR:  relation "changes" does not exist"#;
const NOTHING_TO_DEPLOY_MARKER: &str = "Nothing to deploy";
const UNDEPLOYED_MARKER: &str = "Undeployed changes";

/// Stand-in change name used when the pending changes cannot be listed because
/// sqitch has never touched the database. Listing them would need the plan file.
pub const ALL_CHANGES_SENTINEL: &str = "<every change in the plan>";

static CHANGE_LINE_RE: OnceLock<Regex> = OnceLock::new();
static HEADER_LINE_RE: OnceLock<Regex> = OnceLock::new();

fn change_line_re() -> &'static Regex {
    CHANGE_LINE_RE.get_or_init(|| Regex::new(r"^\* ([^ ]+)").expect("valid change line regex"))
}

fn header_line_re() -> &'static Regex {
    HEADER_LINE_RE
        .get_or_init(|| Regex::new(r"^#\s*([A-Za-z]+):\s*(.*)$").expect("valid header regex"))
}

/// The `# Key: value` preamble describing the last deployed change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusHeader {
    pub database: Option<String>,
    pub project: Option<String>,
    pub change: Option<String>,
    pub name: Option<String>,
    pub tag: Option<String>,
    pub deployed: Option<String>,
    pub by: Option<String>,
}

impl StatusHeader {
    fn parse(stdout: &str) -> Self {
        let mut header = StatusHeader::default();

        for line in stdout.lines().map(str::trim) {
            if let Some(database) = line.strip_prefix("# On database ") {
                header.database = non_empty(database);
                continue;
            }

            let Some(caps) = header_line_re().captures(line) else {
                continue;
            };
            let value = non_empty(&caps[2]);
            match caps[1].to_ascii_lowercase().as_str() {
                "project" => header.project = value,
                "change" => header.change = value,
                "name" => header.name = value,
                "tag" => header.tag = value,
                "deployed" => header.deployed = value,
                "by" => header.by = value,
                _ => {}
            }
        }

        header
    }

    pub fn is_empty(&self) -> bool {
        *self == StatusHeader::default()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// What a `sqitch status` run says about pending work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    is_uninitialized: bool,
    has_nothing_pending: bool,
    pending_change_names: Vec<String>,
    header: StatusHeader,
}

impl StatusReport {
    /// Interpret the captured output of `sqitch status`. Never fails: output in an
    /// unexpected shape yields no pending changes.
    pub fn parse(stdout: &str, stderr: &str) -> Self {
        let is_uninitialized = stderr.contains(UNINITIALIZED_MARKER);
        let has_nothing_pending = stdout.contains(NOTHING_TO_DEPLOY_MARKER);

        let pending_change_names = if is_uninitialized {
            vec![ALL_CHANGES_SENTINEL.to_string()]
        } else if has_nothing_pending {
            Vec::new()
        } else {
            undeployed_changes(stdout)
        };

        log::debug!(
            "Parsed sqitch status: uninitialized={is_uninitialized}, nothing_pending={has_nothing_pending}, {} pending change(s)",
            pending_change_names.len()
        );

        Self {
            is_uninitialized,
            has_nothing_pending,
            pending_change_names,
            header: StatusHeader::parse(stdout),
        }
    }

    /// sqitch has never been used against this database
    pub fn is_uninitialized(&self) -> bool {
        self.is_uninitialized
    }

    pub fn has_nothing_pending(&self) -> bool {
        self.has_nothing_pending
    }

    /// Names of changes still to deploy, in plan order. Holds only
    /// [`ALL_CHANGES_SENTINEL`] for an uninitialized database.
    pub fn pending_change_names(&self) -> &[String] {
        &self.pending_change_names
    }

    pub fn header(&self) -> &StatusHeader {
        &self.header
    }

    pub fn is_up_to_date(&self) -> bool {
        self.has_nothing_pending && !self.is_uninitialized
    }
}

fn undeployed_changes(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .skip_while(|line| !line.contains(UNDEPLOYED_MARKER))
        .skip(1)
        .map(str::trim)
        .filter_map(|line| {
            change_line_re()
                .captures(line)
                .map(|caps| caps[1].to_string())
        })
        .collect()
}
