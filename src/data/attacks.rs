//! Attack kinds and events for the firewall defense game

use serde::{Deserialize, Serialize};

/// The five kinds of attack the simulator can launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    BruteForce,
    DDoS,
    SqlInjection,
    PortScan,
    Malware,
}

impl AttackKind {
    /// All kinds, in the order random selection indexes them
    pub const ALL: [AttackKind; 5] = [
        AttackKind::BruteForce,
        AttackKind::DDoS,
        AttackKind::SqlInjection,
        AttackKind::PortScan,
        AttackKind::Malware,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AttackKind::BruteForce => "Brute Force",
            AttackKind::DDoS => "DDoS",
            AttackKind::SqlInjection => "SQL Injection",
            AttackKind::PortScan => "Port Scan",
            AttackKind::Malware => "Malware",
        }
    }

    /// Strength before random jitter is added
    pub fn base_strength(&self) -> u32 {
        match self {
            AttackKind::BruteForce => 20,
            AttackKind::DDoS => 30,
            AttackKind::SqlInjection => 25,
            AttackKind::PortScan => 15,
            AttackKind::Malware => 35,
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Identifier of an attack within one defense session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttackId(pub u64);

impl std::fmt::Display for AttackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single incoming attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub id: AttackId,
    pub kind: AttackKind,
    pub source_address: String,
    pub strength: u32,
    /// Only ever goes from false to true
    pub blocked: bool,
    /// Ticks this event has spent in the window
    pub age_ticks: u32,
    /// How many times this event has damaged the shield
    pub hits: u32,
}

impl AttackEvent {
    pub fn new(id: AttackId, kind: AttackKind, source_address: String, jitter: u32) -> Self {
        Self {
            id,
            kind,
            source_address,
            strength: kind.base_strength() + jitter,
            blocked: false,
            age_ticks: 0,
            hits: 0,
        }
    }

    /// Has this attack already landed at least once?
    pub fn has_hit(&self) -> bool {
        self.hits > 0
    }

    /// One-line description for logs and terminal output
    pub fn brief(&self) -> String {
        let status = if self.blocked {
            "BLOCKED"
        } else if self.has_hit() {
            "BREACHED"
        } else {
            "INCOMING"
        };
        format!(
            "{} {} from {} (strength {}) [{}]",
            self.id, self.kind, self.source_address, self.strength, status
        )
    }
}

/// Format four octets as a dotted address
pub fn format_address(octets: [u8; 4]) -> String {
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}
