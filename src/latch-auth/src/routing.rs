//! Which screens the UI may show for a given session state.

use latch_session_store::SessionDatabase;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Login,
    Signup,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Login => "Sign In",
            Screen::Signup => "Sign Up",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

const AUTHENTICATED: &[Screen] = &[Screen::Home];
const ANONYMOUS: &[Screen] = &[Screen::Login, Screen::Signup];

/// Home is only reachable with a session; Login and Signup only without one.
pub fn available_screens(state: &SessionDatabase) -> &'static [Screen] {
    if state.is_authenticated() {
        AUTHENTICATED
    } else {
        ANONYMOUS
    }
}

/// The screen shown on entering `state`.
pub fn initial_screen(state: &SessionDatabase) -> Screen {
    available_screens(state)[0]
}

/// `requested` if reachable in `state`, otherwise the initial screen.
pub fn resolve(requested: Screen, state: &SessionDatabase) -> Screen {
    if available_screens(state).contains(&requested) {
        requested
    } else {
        initial_screen(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latch_session_store::Account;

    fn signed_in() -> SessionDatabase {
        SessionDatabase {
            current_session: Some(Account::new("Ada", "ada@example.com", "hunter22")),
            ..SessionDatabase::default()
        }
    }

    #[test]
    fn test_anonymous_screens() {
        let state = SessionDatabase::new();
        assert_eq!(available_screens(&state), &[Screen::Login, Screen::Signup]);
        assert_eq!(initial_screen(&state), Screen::Login);
    }

    #[test]
    fn test_authenticated_screens() {
        let state = signed_in();
        assert_eq!(available_screens(&state), &[Screen::Home]);
        assert_eq!(initial_screen(&state), Screen::Home);
    }

    #[test]
    fn test_resolve() {
        let anonymous = SessionDatabase::new();
        assert_eq!(resolve(Screen::Signup, &anonymous), Screen::Signup);
        assert_eq!(resolve(Screen::Home, &anonymous), Screen::Login);
        assert_eq!(resolve(Screen::Signup, &signed_in()), Screen::Home);
    }
}
