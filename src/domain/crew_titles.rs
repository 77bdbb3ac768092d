//! Playful per-participant titles shown on the picker header.
//!
//! Assignment is a pure function of the normalized name, so a participant
//! sees the same title every time they come back.

pub const CREW_TITLES: [&str; 20] = [
    "Tide Navigator",
    "Coral Cartographer",
    "Reef Recon Officer",
    "Surface Support Specialist",
    "Current Whisperer",
    "Sea State Analyst",
    "Coastal Operations Lead",
    "Plankton Patrol",
    "Bay Watch Coordinator",
    "Deck Data Recorder",
    "Weather Window Watcher",
    "Wave Pattern Specialist",
    "Field Notes Captain",
    "Beach Landing Scout",
    "Marine Life Liaison",
    "Logbook Keeper",
    "Shoreline Safety Officer",
    "Snack & Morale Officer",
    "Sunscreen Quartermaster",
    "Celebration Steward",
];

pub const UNASSIGNED_TITLE: &str = "Awaiting Assignment";

pub fn title_for_name(name: &str) -> &'static str {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return UNASSIGNED_TITLE;
    }
    let hash: u64 = normalized.chars().map(|c| u64::from(c as u32)).sum();
    CREW_TITLES[(hash % CREW_TITLES.len() as u64) as usize]
}
