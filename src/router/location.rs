//! Reserved system paths.
//!
//! Some launch locations bypass auth routing entirely: the OAuth callback
//! and the debug view.

use super::screen::Screen;

/// Path the identity provider redirects back to.
pub const OAUTH_CALLBACK_PATH: &str = "/auth/callback";

/// Any path containing this segment opens the debug view.
pub const DEBUG_SEGMENT: &str = "/debug";

/// Return the system screen a location is reserved for, if any.
///
/// Query strings and fragments are ignored, so `/auth/callback?code=x` still
/// matches.
pub fn reserved_screen(location: &str) -> Option<Screen> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if path == OAUTH_CALLBACK_PATH {
        Some(Screen::OauthCallback)
    } else if path.contains(DEBUG_SEGMENT) {
        Some(Screen::Debug)
    } else {
        None
    }
}
