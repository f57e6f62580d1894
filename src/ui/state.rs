use crate::session::Session;

/// The two authenticated screens plus the login gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Feed,
    Create,
}

pub struct AppState {
    pub current_screen: Screen,
    /// Where to land after a successful login.
    pub login_redirect: Screen,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_screen: Screen::Feed,
            login_redirect: Screen::Feed,
        }
    }
}

/// Global reaction to an unauthorized response: clear the stored
/// credential and route to the login screen, remembering where the user
/// was. `Session::clear_token` only reports `true` for the first caller,
/// so the side effect runs exactly once no matter how many in-flight
/// queries failed at the same time.
pub fn handle_unauthorized(app_state: &mut AppState, session: &mut Session, from: Screen) {
    if session.clear_token() {
        log::warn!("Session rejected by server, redirecting to login");
        app_state.login_redirect = from;
        app_state.current_screen = Screen::Login;
    } else {
        app_state.current_screen = Screen::Login;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        Session::load_from(dir.path().join("session.json"))
    }

    #[test]
    fn unauthorized_clears_session_and_remembers_origin() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.set_token("tok".to_string());
        let mut app_state = AppState::default();
        app_state.current_screen = Screen::Create;

        handle_unauthorized(&mut app_state, &mut session, Screen::Create);

        assert!(!session.is_authenticated());
        assert_eq!(app_state.current_screen, Screen::Login);
        assert_eq!(app_state.login_redirect, Screen::Create);
    }

    #[test]
    fn second_unauthorized_does_not_overwrite_redirect() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.set_token("tok".to_string());
        let mut app_state = AppState::default();

        handle_unauthorized(&mut app_state, &mut session, Screen::Create);
        assert_eq!(app_state.login_redirect, Screen::Create);

        // A second concurrent query also failed; the clear already ran.
        handle_unauthorized(&mut app_state, &mut session, Screen::Feed);
        assert_eq!(app_state.login_redirect, Screen::Create);
        assert_eq!(app_state.current_screen, Screen::Login);
    }
}
