//! Screen identifiers.
//!
//! `Screen` is the closed set of mountable views. Each variant has a stable
//! kebab-case tag (`"team-detail"`, `"oauth-callback"`, ...) used in logs,
//! the CLI and the serialized form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    // ============ System ============
    Loading,
    OauthCallback,
    Debug,

    // ============ Entry ============
    Welcome,
    SignIn,
    SignUp,
    Onboarding,

    // ============ Tabbed shell ============
    Home,
    Schedule,
    Teams,
    Ratings,
    Chat,

    // ============ Detail ============
    TeamDetail,
    MatchDetail,
    DivisionStandings,
    TeamSeasonReport,
    PlayerProfile,
    Payments,
    Notifications,
    Settings,

    // ============ Captain tools ============
    LineupEditor,
    Analytics,
    RosterManagement,
    CourtBooking,
}

impl Screen {
    /// Every screen, in registry order.
    pub const ALL: [Screen; 24] = [
        Screen::Loading,
        Screen::OauthCallback,
        Screen::Debug,
        Screen::Welcome,
        Screen::SignIn,
        Screen::SignUp,
        Screen::Onboarding,
        Screen::Home,
        Screen::Schedule,
        Screen::Teams,
        Screen::Ratings,
        Screen::Chat,
        Screen::TeamDetail,
        Screen::MatchDetail,
        Screen::DivisionStandings,
        Screen::TeamSeasonReport,
        Screen::PlayerProfile,
        Screen::Payments,
        Screen::Notifications,
        Screen::Settings,
        Screen::LineupEditor,
        Screen::Analytics,
        Screen::RosterManagement,
        Screen::CourtBooking,
    ];

    /// The stable tag for this screen.
    pub fn tag(&self) -> &'static str {
        match self {
            Screen::Loading => "loading",
            Screen::OauthCallback => "oauth-callback",
            Screen::Debug => "debug",
            Screen::Welcome => "welcome",
            Screen::SignIn => "sign-in",
            Screen::SignUp => "sign-up",
            Screen::Onboarding => "onboarding",
            Screen::Home => "home",
            Screen::Schedule => "schedule",
            Screen::Teams => "teams",
            Screen::Ratings => "ratings",
            Screen::Chat => "chat",
            Screen::TeamDetail => "team-detail",
            Screen::MatchDetail => "match-detail",
            Screen::DivisionStandings => "division-standings",
            Screen::TeamSeasonReport => "team-season-report",
            Screen::PlayerProfile => "player-profile",
            Screen::Payments => "payments",
            Screen::Notifications => "notifications",
            Screen::Settings => "settings",
            Screen::LineupEditor => "lineup-editor",
            Screen::Analytics => "analytics",
            Screen::RosterManagement => "roster-management",
            Screen::CourtBooking => "court-booking",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

impl FromStr for Screen {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.tag() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown screen: {}", s))
    }
}

/// Tabs of the tabbed shell, in tab bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabId {
    #[default]
    Home,
    Schedule,
    Teams,
    Ratings,
    Chat,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Home,
        TabId::Schedule,
        TabId::Teams,
        TabId::Ratings,
        TabId::Chat,
    ];

    /// The screen mounted inside the shell for this tab.
    pub const fn screen(&self) -> Screen {
        match self {
            TabId::Home => Screen::Home,
            TabId::Schedule => Screen::Schedule,
            TabId::Teams => Screen::Teams,
            TabId::Ratings => Screen::Ratings,
            TabId::Chat => Screen::Chat,
        }
    }

    /// Tab bar label
    pub fn label(&self) -> &'static str {
        match self {
            TabId::Home => "Home",
            TabId::Schedule => "Schedule",
            TabId::Teams => "Teams",
            TabId::Ratings => "Ratings",
            TabId::Chat => "Chat",
        }
    }

    pub fn index(&self) -> usize {
        TabId::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// Next tab, wrapping around.
    pub fn next(&self) -> TabId {
        TabId::ALL[(self.index() + 1) % TabId::ALL.len()]
    }

    /// Previous tab, wrapping around.
    pub fn prev(&self) -> TabId {
        TabId::ALL[(self.index() + TabId::ALL.len() - 1) % TabId::ALL.len()]
    }
}

/// Role chosen during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Player,
    Captain,
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Player => "Player",
            UserRole::Captain => "Captain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_parse_back() {
        for screen in Screen::ALL {
            assert_eq!(screen.tag().parse::<Screen>().unwrap(), screen);
        }
    }

    #[test]
    fn test_serde_tag_matches_display() {
        let json = serde_json::to_string(&Screen::TeamSeasonReport).unwrap();
        assert_eq!(json, "\"team-season-report\"");
        assert_eq!(Screen::OauthCallback.to_string(), "oauth-callback");
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!("admin-panel".parse::<Screen>().is_err());
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(TabId::Home.prev(), TabId::Chat);
        assert_eq!(TabId::Chat.next(), TabId::Home);
        assert_eq!(TabId::Teams.index(), 2);
    }
}
