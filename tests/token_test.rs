use chrono::Utc;
use tidal2deezer::{management::TokenManager, types::Token};

fn token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        token_type: "Bearer".to_string(),
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_fresh_token_is_not_expired() {
    let manager = TokenManager::new(token(Utc::now().timestamp() as u64, 3600));
    assert!(!manager.is_expired());
}

#[test]
fn test_token_inside_safety_buffer_counts_as_expired() {
    // 120 s left is inside the 4 minute renewal buffer.
    let manager = TokenManager::new(token(Utc::now().timestamp() as u64, 120));
    assert!(manager.is_expired());
}

#[test]
fn test_lifetime_shorter_than_buffer_does_not_underflow() {
    let manager = TokenManager::new(token(0, 10));
    assert!(manager.is_expired());

    let manager = TokenManager::new(token(Utc::now().timestamp() as u64, 0));
    assert!(manager.is_expired());
}
