use cinerate::presentation::http::handlers::auth::RegisterRequest;
use validator::Validate;

fn request(email: &str, username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn register_accepts_well_formed_input() {
    assert!(request("ada@example.com", "ada_l", "correcthorse").validate().is_ok());
}

#[test]
fn register_rejects_malformed_email() {
    assert!(request("not-an-email", "ada_l", "correcthorse").validate().is_err());
}

#[test]
fn register_rejects_username_with_forbidden_characters() {
    assert!(request("ada@example.com", "ada lovelace", "correcthorse").validate().is_err());
    assert!(request("ada@example.com", "ada-l", "correcthorse").validate().is_err());
    assert!(request("ada@example.com", "", "correcthorse").validate().is_err());
}

#[test]
fn register_enforces_username_length_ceiling() {
    assert!(request("ada@example.com", &"a".repeat(150), "correcthorse").validate().is_ok());
    assert!(request("ada@example.com", &"a".repeat(151), "correcthorse").validate().is_err());
}

#[test]
fn register_enforces_minimum_password_length() {
    assert!(request("ada@example.com", "ada_l", "1234567").validate().is_err());
    assert!(request("ada@example.com", "ada_l", "12345678").validate().is_ok());
}
