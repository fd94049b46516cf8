// Built-in draft event definitions — 2020 Spring economy prize ladders
// Static configuration only: all validation happens in EventStructure::new

use draft_ev::{EventError, EventStructure, PrizeLevel};

fn ladder(levels: &[(&str, u32, u32)]) -> Result<Vec<PrizeLevel>, EventError> {
    levels
        .iter()
        .map(|&(packs, gems, gold)| Ok(PrizeLevel::new(packs, gems, gold)?))
        .collect()
}

/// Best-of-3, three matches, no loss cap: every entrant plays all three.
pub fn traditional_ikoria_draft() -> Result<EventStructure, EventError> {
    EventStructure::new(
        "Traditional Ikoria Draft",
        3,
        0,
        3,
        ladder(&[
            ("1", 0, 0),
            ("1", 0, 0),
            ("4", 1000, 0),
            ("6", 3000, 0),
        ])?,
        Some(10000.into()),
        Some(1500.into()),
    )
}

/// Best-of-1 ladder to seven wins, out at three losses.
pub fn premier_draft() -> Result<EventStructure, EventError> {
    EventStructure::new(
        "Premier Draft",
        7,
        3,
        1,
        ladder(&[
            ("1", 50, 0),
            ("1", 100, 0),
            ("2", 250, 0),
            ("2", 1000, 0),
            ("3", 1400, 0),
            ("4", 1600, 0),
            ("5", 1800, 0),
            ("6", 2200, 0),
        ])?,
        Some(10000.into()),
        Some(1500.into()),
    )
}

/// Cheaper best-of-1 ladder with smaller gem payouts and fractional packs.
pub fn quick_draft() -> Result<EventStructure, EventError> {
    EventStructure::new(
        "Quick Draft",
        7,
        3,
        1,
        ladder(&[
            ("1.2", 50, 0),
            ("1.22", 100, 0),
            ("1.24", 200, 0),
            ("1.26", 300, 0),
            ("1.30", 450, 0),
            ("1.35", 650, 0),
            ("1.40", 850, 0),
            ("2", 950, 0),
        ])?,
        Some(5000.into()),
        Some(750.into()),
    )
}

/// All built-in events, in display order.
pub fn scenarios() -> Result<Vec<EventStructure>, EventError> {
    Ok(vec![
        traditional_ikoria_draft()?,
        premier_draft()?,
        quick_draft()?,
    ])
}
