//! Hazard catalog
//!
//! Five fixed hazard types drive all alert content. Each has exactly one
//! immutable profile; lookups of any other key fail with
//! `UnknownHazardType` rather than defaulting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use errors::{HomeguardError, HomeguardResult};

/// Hazard type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Tornado,
    Fire,
    Flood,
    Power,
    Gas,
}

impl HazardKind {
    /// All registered hazard types
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Tornado,
        HazardKind::Fire,
        HazardKind::Flood,
        HazardKind::Power,
        HazardKind::Gas,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Tornado => "tornado",
            HazardKind::Fire => "fire",
            HazardKind::Flood => "flood",
            HazardKind::Power => "power",
            HazardKind::Gas => "gas",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardKind {
    type Err = HomeguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tornado" => Ok(HazardKind::Tornado),
            "fire" => Ok(HazardKind::Fire),
            "flood" => Ok(HazardKind::Flood),
            "power" => Ok(HazardKind::Power),
            "gas" => Ok(HazardKind::Gas),
            other => Err(HomeguardError::UnknownHazardType(other.to_string())),
        }
    }
}

/// Alert severity, fixed per hazard type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
    Extreme,
}

/// Static catalog entry for one hazard type
#[derive(Debug, Clone, Copy)]
pub struct HazardProfile {
    pub kind: HazardKind,
    pub icon: &'static str,
    pub severity: Severity,
    pub headline: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub color_token: &'static str,
}

/// The fixed catalog, one profile per hazard type
static CATALOG: [HazardProfile; 5] = [
    HazardProfile {
        kind: HazardKind::Tornado,
        icon: "🌪️",
        severity: Severity::Extreme,
        headline: "Tornado Warning",
        description: "A tornado has been spotted in your area. Take immediate shelter.",
        instruction: "Go to the lowest floor, center room, away from windows. Cover your head \
                      with a mattress or heavy blankets.",
        color_token: "bg-red-100 border-red-500 text-red-900",
    },
    HazardProfile {
        kind: HazardKind::Fire,
        icon: "🔥",
        severity: Severity::Severe,
        headline: "Fire Emergency",
        description: "Fire reported in your building. Evacuate immediately.",
        instruction: "Use stairs, not elevators. Feel doors before opening. If hot, use \
                      alternate route. Meet at designated assembly point.",
        color_token: "bg-orange-100 border-orange-500 text-orange-900",
    },
    HazardProfile {
        kind: HazardKind::Flood,
        icon: "🌊",
        severity: Severity::Moderate,
        headline: "Flood Warning",
        description: "Heavy rainfall causing flooding in your area.",
        instruction: "Avoid driving through flooded areas. Move to higher ground if in a \
                      flood-prone area. Stay tuned for updates.",
        color_token: "bg-blue-100 border-blue-500 text-blue-900",
    },
    HazardProfile {
        kind: HazardKind::Power,
        icon: "⚡",
        severity: Severity::Minor,
        headline: "Power Outage Alert",
        description: "Power outage reported in your neighborhood.",
        instruction: "Use flashlights, not candles. Keep refrigerator closed. Unplug sensitive \
                      electronics. Check with neighbors.",
        color_token: "bg-yellow-100 border-yellow-500 text-yellow-900",
    },
    HazardProfile {
        kind: HazardKind::Gas,
        icon: "💨",
        severity: Severity::Severe,
        headline: "Gas Leak Alert",
        description: "Natural gas leak detected in your building.",
        instruction: "Evacuate immediately. Do not use phones, lights, or anything that could \
                      create a spark. Call 911 from outside.",
        color_token: "bg-red-100 border-red-500 text-red-900",
    },
];

/// Get the catalog profile for a hazard type
pub fn profile(kind: HazardKind) -> &'static HazardProfile {
    match kind {
        HazardKind::Tornado => &CATALOG[0],
        HazardKind::Fire => &CATALOG[1],
        HazardKind::Flood => &CATALOG[2],
        HazardKind::Power => &CATALOG[3],
        HazardKind::Gas => &CATALOG[4],
    }
}

/// Look up a catalog profile by key, failing on unregistered hazard types
pub fn lookup(key: &str) -> HomeguardResult<&'static HazardProfile> {
    key.parse::<HazardKind>().map(profile)
}
