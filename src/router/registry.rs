//! Screen registry.
//!
//! A static table describing every [`Screen`]: its chrome (title, back
//! button, back target), which shell wraps it, whether it is a captain tool,
//! what selection it needs, and which transitions it offers to the user.
//! This is configuration, not behavior; the controller and the views read
//! it, nothing writes it.

use super::screen::{Screen, TabId};
use SelectionKind::{Division, Match, Team};

/// Which frame a screen is mounted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// Full-screen system view (loading, callbacks, debug).
    System,
    /// Pre-login and onboarding views.
    Entry,
    /// Mounted inside the tab bar shell for the given tab.
    Tabbed(TabId),
    /// Pushed detail view with a back button.
    Detail,
}

/// Where the back button goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackTarget {
    /// No back button.
    None,
    /// Always this screen.
    Screen(Screen),
    /// Whatever tab was last active.
    ActiveTab,
}

/// Kinds of selection a detail screen can depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Team,
    Match,
    Division,
}

/// Selection a screen needs before it can be shown, and where to go instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisite {
    pub needs: SelectionKind,
    pub fallback: Screen,
}

/// A transition a screen offers (the `onViewX` callbacks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordance {
    /// Shortcut key
    pub key: char,
    pub label: &'static str,
    pub target: Screen,
    /// Only shown to captains
    pub captain_only: bool,
    /// Selection made when the affordance is used
    pub selects: Option<SelectionKind>,
}

const fn to(key: char, label: &'static str, target: Screen) -> Affordance {
    Affordance {
        key,
        label,
        target,
        captain_only: false,
        selects: None,
    }
}

const fn pick(key: char, label: &'static str, target: Screen, kind: SelectionKind) -> Affordance {
    Affordance {
        key,
        label,
        target,
        captain_only: false,
        selects: Some(kind),
    }
}

const fn captain(key: char, label: &'static str, target: Screen) -> Affordance {
    Affordance {
        key,
        label,
        target,
        captain_only: true,
        selects: None,
    }
}

/// Registry entry for one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpec {
    pub screen: Screen,
    pub title: &'static str,
    pub description: &'static str,
    pub shell: Shell,
    pub back: BackTarget,
    pub captain_only: bool,
    pub prerequisite: Option<Prerequisite>,
    pub affordances: &'static [Affordance],
}

impl ScreenSpec {
    pub fn show_back(&self) -> bool {
        self.back != BackTarget::None
    }

    /// Tab this screen fills, if it is a tab root.
    pub fn tab(&self) -> Option<TabId> {
        match self.shell {
            Shell::Tabbed(tab) => Some(tab),
            _ => None,
        }
    }

    /// Affordances visible for the given role.
    pub fn visible_affordances(&self, is_captain: bool) -> impl Iterator<Item = &'static Affordance> {
        self.affordances
            .iter()
            .filter(move |a| is_captain || !a.captain_only)
    }
}

const fn system(screen: Screen, title: &'static str, description: &'static str) -> ScreenSpec {
    ScreenSpec {
        screen,
        title,
        description,
        shell: Shell::System,
        back: BackTarget::None,
        captain_only: false,
        prerequisite: None,
        affordances: &[],
    }
}

const fn tab_root(
    tab: TabId,
    title: &'static str,
    description: &'static str,
    affordances: &'static [Affordance],
) -> ScreenSpec {
    ScreenSpec {
        screen: tab.screen(),
        title,
        description,
        shell: Shell::Tabbed(tab),
        back: BackTarget::None,
        captain_only: false,
        prerequisite: None,
        affordances,
    }
}

const fn detail(
    screen: Screen,
    title: &'static str,
    description: &'static str,
    back: BackTarget,
    affordances: &'static [Affordance],
) -> ScreenSpec {
    ScreenSpec {
        screen,
        title,
        description,
        shell: Shell::Detail,
        back,
        captain_only: false,
        prerequisite: None,
        affordances,
    }
}

const fn requires(mut entry: ScreenSpec, needs: SelectionKind, fallback: Screen) -> ScreenSpec {
    entry.prerequisite = Some(Prerequisite { needs, fallback });
    entry
}

const fn captain_tool(mut entry: ScreenSpec) -> ScreenSpec {
    entry.captain_only = true;
    entry
}

const WELCOME_ACTIONS: &[Affordance] = &[
    to('i', "Sign in", Screen::SignIn),
    to('u', "Create an account", Screen::SignUp),
];

const SIGN_IN_ACTIONS: &[Affordance] = &[
    to('u', "Need an account?", Screen::SignUp),
];

const SIGN_UP_ACTIONS: &[Affordance] = &[
    to('i', "Already registered?", Screen::SignIn),
];

const HOME_ACTIONS: &[Affordance] = &[
    pick('m', "Next match", Screen::MatchDetail, Match),
    pick('s', "Division standings", Screen::DivisionStandings, Division),
    to('n', "Notifications", Screen::Notifications),
    to('p', "Payments", Screen::Payments),
    to('o', "My profile", Screen::PlayerProfile),
    to('g', "Settings", Screen::Settings),
    captain('a', "Team analytics", Screen::Analytics),
];

const SCHEDULE_ACTIONS: &[Affordance] = &[
    pick('m', "Match details", Screen::MatchDetail, Match),
    captain('c', "Book a court", Screen::CourtBooking),
];

const TEAMS_ACTIONS: &[Affordance] = &[
    pick('t', "Team details", Screen::TeamDetail, Team),
];

const RATINGS_ACTIONS: &[Affordance] = &[
    pick('m', "Rate a match", Screen::MatchDetail, Match),
    to('o', "My profile", Screen::PlayerProfile),
];

const CHAT_ACTIONS: &[Affordance] = &[
    pick('t', "Team details", Screen::TeamDetail, Team),
];

const TEAM_DETAIL_ACTIONS: &[Affordance] = &[
    pick('s', "Division standings", Screen::DivisionStandings, Division),
    to('o', "Player profile", Screen::PlayerProfile),
    captain('r', "Manage roster", Screen::RosterManagement),
];

const MATCH_DETAIL_ACTIONS: &[Affordance] = &[
    captain('l', "Edit lineup", Screen::LineupEditor),
];

const DIVISION_STANDINGS_ACTIONS: &[Affordance] = &[
    pick('r', "Team season report", Screen::TeamSeasonReport, Team),
];

/// Registry table, indexed by `Screen` discriminant.
static REGISTRY: [ScreenSpec; Screen::ALL.len()] = [
    system(Screen::Loading, "Loading", "Checking your session..."),
    system(
        Screen::OauthCallback,
        "Signing you in",
        "Finishing sign-in with your identity provider.",
    ),
    system(Screen::Debug, "Debug", "Navigation and session state."),

    ScreenSpec {
        screen: Screen::Welcome,
        title: "Welcome",
        description: "Join your league, follow your schedule and rate your matches.",
        shell: Shell::Entry,
        back: BackTarget::None,
        captain_only: false,
        prerequisite: None,
        affordances: WELCOME_ACTIONS,
    },
    ScreenSpec {
        screen: Screen::SignIn,
        title: "Sign in",
        description: "Sign in with the email you registered.",
        shell: Shell::Entry,
        back: BackTarget::Screen(Screen::Welcome),
        captain_only: false,
        prerequisite: None,
        affordances: SIGN_IN_ACTIONS,
    },
    ScreenSpec {
        screen: Screen::SignUp,
        title: "Create account",
        description: "Create an account to join a league.",
        shell: Shell::Entry,
        back: BackTarget::Screen(Screen::Welcome),
        captain_only: false,
        prerequisite: None,
        affordances: SIGN_UP_ACTIONS,
    },
    ScreenSpec {
        screen: Screen::Onboarding,
        title: "Get started",
        description: "Tell us how you play.",
        shell: Shell::Entry,
        back: BackTarget::None,
        captain_only: false,
        prerequisite: None,
        affordances: &[],
    },

    tab_root(
        TabId::Home,
        "Home",
        "Your next match, standings and league news.",
        HOME_ACTIONS,
    ),
    tab_root(
        TabId::Schedule,
        "Schedule",
        "Upcoming and past matches for your teams.",
        SCHEDULE_ACTIONS,
    ),
    tab_root(
        TabId::Teams,
        "Teams",
        "Teams you play on or captain.",
        TEAMS_ACTIONS,
    ),
    tab_root(
        TabId::Ratings,
        "Ratings",
        "Rate sportsmanship after each match.",
        RATINGS_ACTIONS,
    ),
    tab_root(
        TabId::Chat,
        "Chat",
        "Team conversations.",
        CHAT_ACTIONS,
    ),

    requires(
        detail(
            Screen::TeamDetail,
            "Team",
            "Roster, record and upcoming fixtures.",
            BackTarget::Screen(Screen::Teams),
            TEAM_DETAIL_ACTIONS,
        ),
        Team,
        Screen::Teams,
    ),
    requires(
        detail(
            Screen::MatchDetail,
            "Match",
            "Kickoff, venue, lineups and result.",
            BackTarget::ActiveTab,
            MATCH_DETAIL_ACTIONS,
        ),
        Match,
        Screen::Schedule,
    ),
    detail(
        Screen::DivisionStandings,
        "Standings",
        "Division table for the current season.",
        BackTarget::Screen(Screen::Home),
        DIVISION_STANDINGS_ACTIONS,
    ),
    requires(
        detail(
            Screen::TeamSeasonReport,
            "Season report",
            "A team's season within its division.",
            BackTarget::Screen(Screen::DivisionStandings),
            &[],
        ),
        Division,
        Screen::DivisionStandings,
    ),
    detail(
        Screen::PlayerProfile,
        "Profile",
        "Sports, skill levels and rating history.",
        BackTarget::ActiveTab,
        &[],
    ),
    detail(
        Screen::Payments,
        "Payments",
        "League fees and receipts.",
        BackTarget::Screen(Screen::Home),
        &[],
    ),
    detail(
        Screen::Notifications,
        "Notifications",
        "Schedule changes and league announcements.",
        BackTarget::Screen(Screen::Home),
        &[],
    ),
    detail(
        Screen::Settings,
        "Settings",
        "Account and notification preferences.",
        BackTarget::Screen(Screen::Home),
        &[],
    ),

    captain_tool(requires(
        detail(
            Screen::LineupEditor,
            "Lineup",
            "Pick who plays in this match.",
            BackTarget::Screen(Screen::MatchDetail),
            &[],
        ),
        Match,
        Screen::Schedule,
    )),
    captain_tool(detail(
        Screen::Analytics,
        "Analytics",
        "Attendance and results trends for your team.",
        BackTarget::Screen(Screen::Home),
        &[],
    )),
    captain_tool(requires(
        detail(
            Screen::RosterManagement,
            "Roster",
            "Invite, remove and reorder players.",
            BackTarget::Screen(Screen::TeamDetail),
            &[],
        ),
        Team,
        Screen::Teams,
    )),
    captain_tool(detail(
        Screen::CourtBooking,
        "Court booking",
        "Reserve a court for a practice or rescheduled match.",
        BackTarget::Screen(Screen::Schedule),
        &[],
    )),
];

/// Look up the registry entry for a screen.
pub fn spec(screen: Screen) -> ScreenSpec {
    REGISTRY[screen as usize]
}

/// All registry entries, in `Screen::ALL` order.
pub fn all() -> Vec<ScreenSpec> {
    Screen::ALL.iter().map(|s| spec(*s)).collect()
}
