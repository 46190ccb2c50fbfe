//! Placeholder token substitution for payload templates.
//!
//! Templates carry two token shapes, `<status-<key>-status>` and
//! `<author-<key>-author>`. Matching is literal, non-overlapping substring
//! replacement — every occurrence of a known token is rewritten, and
//! anything else is left exactly as written.

/// A known commit author, keyed by the short name used in author tokens.
pub struct Author {
    pub id: &'static str,
    pub display_name: &'static str,
}

/// Author keys to Slack identities.
///
/// Identities change rarely enough that a hardcoded directory beats asking
/// the workspace API on every run, and keeps template keys decoupled from
/// Slack handles.
const AUTHORS: &[(&str, Author)] = &[
    (
        "d3or",
        Author {
            id: "U04S33SE7G8",
            display_name: "Deor",
        },
    ),
    (
        "devops-unevenlabs",
        Author {
            id: "U04NS0VMWNN",
            display_name: "DevOps",
        },
    ),
    (
        "fdmota",
        Author {
            id: "U04NS0VMWNN",
            display_name: "Mota",
        },
    ),
    (
        "georgeroman",
        Author {
            id: "U03MA663BA6",
            display_name: "George",
        },
    ),
    (
        "ipeleg",
        Author {
            id: "U03MCJ37NLU",
            display_name: "Peleg",
        },
    ),
    (
        "nofir",
        Author {
            id: "U03M3HRPV70",
            display_name: "Ofir",
        },
    ),
    (
        "tv3636",
        Author {
            id: "U04H7HTDEH1",
            display_name: "TV",
        },
    ),
];

/// Build statuses to the emoji marker shown in channels.
const STATUSES: &[(&str, &str)] = &[("failure", ":boom:"), ("success", ":rocket:")];

fn status_token(key: &str) -> String {
    format!("<status-{}-status>", key)
}

fn author_token(key: &str) -> String {
    format!("<author-{}-author>", key)
}

/// Whether a raw template should @-mention its authors: successful builds
/// mention, anything else names authors without notifying them.
pub fn notifies_via_mention(raw: &str) -> bool {
    raw.contains(&status_token("success"))
}

/// Replace every occurrence of every known token in `raw`. Authors become
/// `<@id>` mentions when `notify_via_mention` is set, and plain display
/// names otherwise.
pub fn resolve(raw: &str, notify_via_mention: bool) -> String {
    let mut out = raw.to_owned();

    for (key, emoji) in STATUSES {
        out = out.replace(&status_token(key), emoji);
    }

    for (key, author) in AUTHORS {
        let identity = if notify_via_mention {
            format!("<@{}>", author.id)
        } else {
            author.display_name.to_owned()
        };

        out = out.replace(&author_token(key), &identity);
    }

    out
}
