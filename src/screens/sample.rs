//! Demo league data shown by the content screens until the league endpoints
//! are wired in.

use crate::router::SelectionKind;

/// `(id, label)` pairs
pub type Entry = (&'static str, &'static str);

const TEAMS: &[Entry] = &[
    ("thunder", "Thunder FC"),
    ("net-ninjas", "Net Ninjas"),
    ("court-jesters", "Court Jesters"),
    ("spike-lee", "Spike Lee's Joint"),
];

const MATCHES: &[Entry] = &[
    ("wk3-thunder-ninjas", "Week 3 · Thunder FC vs Net Ninjas · Thu 7:00pm"),
    ("wk3-jesters-spike", "Week 3 · Court Jesters vs Spike Lee's Joint · Thu 8:00pm"),
    ("wk4-thunder-jesters", "Week 4 · Thunder FC vs Court Jesters · Thu 7:00pm"),
];

const DIVISIONS: &[Entry] = &[
    ("coed-rec", "Co-ed Recreational"),
    ("coed-comp", "Co-ed Competitive"),
];

pub fn entries(kind: SelectionKind) -> &'static [Entry] {
    match kind {
        SelectionKind::Team => TEAMS,
        SelectionKind::Match => MATCHES,
        SelectionKind::Division => DIVISIONS,
    }
}

pub fn label(kind: SelectionKind, id: &str) -> Option<&'static str> {
    entries(kind)
        .iter()
        .find(|(entry_id, _)| *entry_id == id)
        .map(|(_, label)| *label)
}
