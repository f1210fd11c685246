// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for flood simulation.

use serde_json::{json, Value};

/// Generate a pool of client addresses for testing.
pub fn generate_clients(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = (i >> 16) & 0xFF;
            let b = (i >> 8) & 0xFF;
            let c = i & 0xFF;
            format!("10.{}.{}.{}", a, b, c)
        })
        .collect()
}

/// A submission that passes every field rule.
pub fn valid_body(i: usize) -> Value {
    json!({
        "name": format!("選手 {}", i),
        "inquiryType": "体験・見学について",
        "contact": if i % 2 == 0 { "parent@example.jp".to_string() } else { format!("090-0000-{:04}", i % 10_000) },
        "message": "見学を希望します",
    })
}

/// A submission that parses but fails a field rule.
pub fn invalid_body(i: usize) -> Value {
    json!({
        "name": format!("選手 {}", i),
        "inquiryType": "その他",
        "contact": "not-an-email-or-phone!",
    })
}

/// Contact values that must be rejected.
pub fn generate_bad_contacts() -> Vec<&'static str> {
    vec![
        "not-an-email-or-phone!",
        "user@localhost",
        "user@@example.com",
        "user example@example.com",
        "03-1234-5678 ext. 9",
        "０３-１２３４-５６７８", // Full-width digits
        "javascript:alert(1)",
    ]
}

/// Contact values that must be accepted.
pub fn generate_good_contacts() -> Vec<&'static str> {
    vec![
        "test@example.com",
        "coach+club@sub.example.co.jp",
        "03-1234-5678",
        "090 1234 5678",
        "+81 (76) 123-4567",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_clients() {
        let clients = generate_clients(256);
        assert_eq!(clients.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = clients.iter().collect();
        assert_eq!(unique.len(), 256);
    }
}
