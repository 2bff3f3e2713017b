use serde_json::{json, Value};

use super::{normalize_field, normalize_object, FieldSet, NormalizeContext, ObjectKind};
use crate::server::model::snapshot::{EntityRef, Record};

mod guild;
mod message;

/// Unwraps a `json!` object literal into a raw record.
fn raw(value: Value) -> Record {
    match value {
        Value::Object(object) => object,
        other => panic!("expected object, got {other}"),
    }
}

/// Raw guild with two channels, an admin role, a booster role and two members.
fn raw_guild() -> Record {
    raw(json!({
        "id": "1",
        "name": "Test Guild",
        "owner_id": "100",
        "roles": [
            { "id": "1", "name": "@everyone", "permissions": "1024", "position": 0, "color": 0 },
            { "id": "20", "name": "Admin", "permissions": "8", "position": 2, "color": 0xFF8000 },
            {
                "id": "30",
                "name": "Booster",
                "permissions": "0",
                "position": 1,
                "color": 0,
                "tags": { "premium_subscriber": true }
            }
        ],
        "channels": [
            { "id": "10", "name": "general", "type": 0, "position": 1 },
            { "id": "11", "name": "voice", "type": 2, "position": 0 },
            { "id": "12", "name": "announcements", "type": 5, "position": 0 },
            { "id": "13", "name": "Text Channels", "type": 4, "position": 0 }
        ],
        "members": [
            { "user": { "id": "100", "username": "owner" }, "roles": [], "premium_since": null },
            {
                "user": { "id": "200", "username": "booster" },
                "roles": ["30"],
                "premium_since": "2022-01-01T00:00:00+00:00"
            }
        ],
        "presences": [
            { "user": { "id": "200" }, "activities": [{ "name": "Chess", "type": 0 }] }
        ]
    }))
}

fn context() -> NormalizeContext {
    NormalizeContext::from_guild(&raw_guild(), Some(EntityRef::new(999, "backup-bot")))
}
