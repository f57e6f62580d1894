//! Unit tests for session persistence and token decoding.

use super::*;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> PathBuf {
    dir.path().join("session.json")
}

/// Builds an unsigned JWT-shaped token with the given id claim.
fn token_for(user_id: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"id":"{user_id}"}}"#));
    format!("{header}.{payload}.sig")
}

mod persistence_tests {
    use super::*;

    #[test]
    fn starts_logged_out_without_store_file() {
        let dir = TempDir::new().unwrap();
        let session = Session::load_from(store_in(&dir));
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn set_token_survives_reload() {
        let dir = TempDir::new().unwrap();

        let mut session = Session::load_from(store_in(&dir));
        session.set_token("abc123".to_string());

        let reloaded = Session::load_from(store_in(&dir));
        assert_eq!(reloaded.token(), Some("abc123"));
    }

    #[test]
    fn clear_token_removes_store_file() {
        let dir = TempDir::new().unwrap();

        let mut session = Session::load_from(store_in(&dir));
        session.set_token("abc123".to_string());
        assert!(store_in(&dir).exists());

        assert!(session.clear_token());
        assert!(!store_in(&dir).exists());

        let reloaded = Session::load_from(store_in(&dir));
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn corrupt_store_file_starts_logged_out() {
        let dir = TempDir::new().unwrap();
        std::fs::write(store_in(&dir), "{ not valid json").unwrap();

        let session = Session::load_from(store_in(&dir));
        assert!(!session.is_authenticated());
    }
}

mod clear_once_tests {
    use super::*;

    #[test]
    fn clear_fires_exactly_once() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load_from(store_in(&dir));
        session.set_token("abc123".to_string());

        // Simulates several concurrent queries all reporting unauthorized:
        // only the first observer performs the side effect.
        assert!(session.clear_token());
        assert!(!session.clear_token());
        assert!(!session.clear_token());
    }

    #[test]
    fn clear_without_token_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load_from(store_in(&dir));
        assert!(!session.clear_token());
    }
}

mod token_decode_tests {
    use super::*;

    #[test]
    fn decodes_user_id_claim() {
        let token = token_for("user-42");
        assert_eq!(user_id_from_token(&token), Some("user-42".to_string()));
    }

    #[test]
    fn session_exposes_user_id() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::load_from(store_in(&dir));
        session.set_token(token_for("u1"));
        assert_eq!(session.user_id(), Some("u1".to_string()));
    }

    #[test]
    fn rejects_token_without_payload_segment() {
        assert_eq!(user_id_from_token("garbage"), None);
    }

    #[test]
    fn rejects_payload_that_is_not_base64() {
        assert_eq!(user_id_from_token("a.!!!.c"), None);
    }

    #[test]
    fn rejects_payload_without_id_claim() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"u1"}"#);
        assert_eq!(user_id_from_token(&format!("h.{payload}.s")), None);
    }
}
