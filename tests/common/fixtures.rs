//! Canned payloads shaped like real Jules API responses.

use serde_json::{json, Value};

pub const API_KEY: &str = "test-api-key";

pub const WIDGETS: &str = "sources/github/acme/widgets";
pub const GADGETS: &str = "sources/github/acme/gadgets";

pub fn sources() -> Value {
    json!({
        "sources": [
            {
                "name": WIDGETS,
                "id": "github/acme/widgets",
                "githubRepo": { "owner": "acme", "repo": "widgets" }
            },
            {
                "name": GADGETS,
                "id": "github/acme/gadgets",
                "githubRepo": { "owner": "acme", "repo": "gadgets" }
            }
        ],
        "nextPageToken": "page-2"
    })
}

pub fn source_detail(name: &str) -> Option<Value> {
    let (repo, branches, default) = match name {
        WIDGETS => ("widgets", vec!["main", "dev"], "main"),
        GADGETS => ("gadgets", vec!["trunk"], "trunk"),
        _ => return None,
    };
    let branches: Vec<Value> = branches
        .into_iter()
        .map(|branch| json!({ "displayName": branch }))
        .collect();
    Some(json!({
        "name": name,
        "id": name.trim_start_matches("sources/"),
        "githubRepo": {
            "owner": "acme",
            "repo": repo,
            "defaultBranch": { "displayName": default },
            "branches": branches
        }
    }))
}

pub fn sessions() -> Value {
    json!({
        "sessions": [
            {
                "name": "sessions/s1",
                "id": "s1",
                "title": "Fix login",
                "state": "IN_PROGRESS",
                "url": "https://jules.google.com/session/s1",
                "prompt": "Fix the login bug",
                "sourceContext": { "source": WIDGETS }
            },
            {
                "name": "sessions/s2",
                "id": "s2",
                "title": "Gadget cleanup",
                "state": "COMPLETED",
                "sourceContext": { "source": GADGETS }
            },
            {
                "name": "sessions/s3",
                "id": "s3",
                "prompt": "Bump deps",
                "state": "AWAITING_USER_FEEDBACK",
                "sourceContext": { "source": WIDGETS }
            },
            {
                "name": "sessions/s4",
                "id": "s4",
                "state": "QUEUED"
            }
        ]
    })
}

/// Feed of `s1`, deliberately out of order. Newest first it reads
/// a2, a1, a4, then a3 whose timestamp does not parse.
pub fn activities() -> Value {
    json!({
        "activities": [
            {
                "name": "sessions/s1/activities/a1",
                "id": "a1",
                "createTime": "2025-05-01T10:00:00Z",
                "originator": "agent",
                "agentMessaged": { "agentMessage": "Looking into it" }
            },
            {
                "name": "sessions/s1/activities/a2",
                "id": "a2",
                "createTime": "2025-05-01T11:00:00Z",
                "originator": "agent",
                "planGenerated": {
                    "plan": { "steps": [{ "title": "Reproduce" }, { "title": "Fix" }] }
                }
            },
            {
                "name": "sessions/s1/activities/a3",
                "id": "a3",
                "createTime": "yesterday",
                "originator": "agent",
                "progressUpdated": { "title": "Running tests", "description": "3 suites" }
            },
            {
                "name": "sessions/s1/activities/a4",
                "id": "a4",
                "createTime": "2025-05-01T09:00:00Z",
                "originator": "user",
                "userMessaged": { "userMessage": "Fix the login bug" }
            }
        ]
    })
}
