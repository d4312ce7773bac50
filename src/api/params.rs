// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Presence-only validation of required request parameters.
//!
//! A field is missing only when the key is absent from the request object.
//! Present-but-falsy values (`0`, `""`, `false`, `null`) pass, matching the
//! contract the game clients were written against. Runs before any RPC or
//! signing work.

use serde_json::Value;

/// Validate that every required key is present in the body.
///
/// The error message always enumerates the full declared field list for the
/// operation, not just the missing ones.
pub fn require_params(body: &Value, required: &[&str]) -> Result<(), String> {
    let missing = match body.as_object() {
        Some(map) => required.iter().any(|field| !map.contains_key(*field)),
        None => true,
    };
    if missing {
        Err(format!("Parameters required: {}", required.join(", ")))
    } else {
        Ok(())
    }
}

/// Render a parameter the way it is interpolated into quantities and memos:
/// strings verbatim, other scalars via their JSON text.
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
