//! Country directory entries and the two-letter code allocator.
//!
//! Countries come from a seeded reference table but can also be created lazily
//! when a user types a name the directory does not know. Synthetic entries get
//! the lowest unused AA..ZZ code so the `iso_code` uniqueness constraint keeps
//! holding for them too.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub iso_code: String,
    pub created_at: DateTime<Utc>,
}

impl Country {
    pub fn flag_emoji(&self) -> String {
        iso_to_flag(&self.iso_code)
    }
}

/// Name used when the free-text country input is blank.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Normalize free-text country input: trim, blank becomes [`UNKNOWN_COUNTRY`].
pub fn normalize_country_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNKNOWN_COUNTRY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Lowest two-letter code not present in `used`, scanning AA..ZZ in order.
/// Falls back to "ZZ" when the space is exhausted.
pub fn next_available_iso_code(used: &HashSet<String>) -> String {
    for first in b'A'..=b'Z' {
        for second in b'A'..=b'Z' {
            let code = String::from_utf8(vec![first, second]).expect("ascii is valid utf8");
            if !used.contains(&code) {
                return code;
            }
        }
    }
    "ZZ".to_string()
}

/// Map a two-letter code to its regional-indicator flag emoji.
/// Non-alphabetic input yields an empty string.
pub fn iso_to_flag(iso_code: &str) -> String {
    let code = iso_code.trim().to_uppercase();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return String::new();
    }
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)).expect("within unicode range"))
        .collect()
}
