//! Firewall defense simulation
//!
//! A discrete-time stepper. Each tick may spawn an attack, may raise the
//! level, and charges the shield for attacks the player failed to block.
//! Randomness comes from a [`RandomSource`] so runs can be replayed.

use super::random::RandomSource;
use crate::config::{DamagePolicy, DefenseConfig};
use crate::data::{format_address, AttackEvent, AttackId, AttackKind, Id};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, info, trace};

pub const MAX_SHIELD: f64 = 100.0;

/// Simulator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimulatorState {
    Idle,
    Running,
}

/// Counters for one run, from `start()` to `stop()`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefenseSession {
    pub id: Id,
    pub started_at: DateTime<Utc>,
    pub elapsed_seconds: u32,
    /// Never decreases within a session
    pub level: u32,
    /// Always within [0, 100]
    pub shield_strength: f64,
    pub blocked_count: u32,
    pub succeeded_count: u32,
}

impl DefenseSession {
    fn new() -> Self {
        Self {
            id: Id::new(),
            started_at: Utc::now(),
            elapsed_seconds: 0,
            level: 1,
            shield_strength: MAX_SHIELD,
            blocked_count: 0,
            succeeded_count: 0,
        }
    }

    /// Share of resolved attacks that were blocked, as a percentage.
    /// 100 when nothing has been resolved yet.
    pub fn efficiency(&self) -> f64 {
        let total = self.blocked_count + self.succeeded_count;
        if total == 0 {
            100.0
        } else {
            self.blocked_count as f64 / total as f64 * 100.0
        }
    }

    pub fn is_shield_down(&self) -> bool {
        self.shield_strength <= 0.0
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub elapsed_seconds: u32,
    pub spawned: Option<AttackEvent>,
    pub evicted: Vec<AttackId>,
    pub leveled_up: bool,
    pub damage: f64,
    pub hits: u32,
}

/// The firewall defense mini-game
#[derive(Debug, Clone)]
pub struct DefenseSimulator {
    config: DefenseConfig,
    session: Option<DefenseSession>,
    window: VecDeque<AttackEvent>,
    next_attack_id: u64,
}

impl DefenseSimulator {
    pub fn new(config: DefenseConfig) -> Self {
        Self {
            config,
            session: None,
            window: VecDeque::new(),
            next_attack_id: 1,
        }
    }

    pub fn config(&self) -> &DefenseConfig {
        &self.config
    }

    pub fn state(&self) -> SimulatorState {
        if self.session.is_some() {
            SimulatorState::Running
        } else {
            SimulatorState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == SimulatorState::Running
    }

    /// The live session, if running
    pub fn session(&self) -> Option<&DefenseSession> {
        self.session.as_ref()
    }

    /// Recent attacks, oldest first
    pub fn attacks(&self) -> impl Iterator<Item = &AttackEvent> {
        self.window.iter()
    }

    pub fn attack(&self, id: AttackId) -> Option<&AttackEvent> {
        self.window.iter().find(|a| a.id == id)
    }

    /// Efficiency of the live session; 100 when idle
    pub fn efficiency(&self) -> f64 {
        self.session.as_ref().map_or(100.0, DefenseSession::efficiency)
    }

    /// Begin a fresh session. Restarting while running discards the old one.
    pub fn start(&mut self) -> &DefenseSession {
        self.window.clear();
        self.next_attack_id = 1;
        let session = self.session.insert(DefenseSession::new());
        info!(session = %session.id, "Defense started");
        session
    }

    /// End the session and hand back its final state. Nothing is kept.
    pub fn stop(&mut self) -> Option<DefenseSession> {
        self.window.clear();
        let session = self.session.take();
        if let Some(ref s) = session {
            info!(
                session = %s.id,
                elapsed = s.elapsed_seconds,
                level = s.level,
                shield = s.shield_strength,
                blocked = s.blocked_count,
                breached = s.succeeded_count,
                "Defense stopped"
            );
        }
        session
    }

    /// Probability that an attack spawns this tick at the given level
    pub fn spawn_chance(&self, level: u32) -> f64 {
        (self.config.base_spawn_chance + level as f64 * self.config.spawn_chance_per_level)
            .clamp(0.0, 1.0)
    }

    /// Advance one simulated second. Returns `None` when idle.
    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> Option<TickReport> {
        let chance = self.spawn_chance(self.session.as_ref()?.level);
        let config = &self.config;
        let session = self.session.as_mut()?;

        session.elapsed_seconds += 1;
        let mut report = TickReport {
            elapsed_seconds: session.elapsed_seconds,
            ..TickReport::default()
        };

        for attack in self.window.iter_mut() {
            attack.age_ticks += 1;
        }

        if rng.chance() < chance {
            let kind = AttackKind::ALL[rng.index(AttackKind::ALL.len())];
            let jitter = rng.jitter();
            let octets = [rng.octet(), rng.octet(), rng.octet(), rng.octet()];
            let id = AttackId(self.next_attack_id);
            self.next_attack_id += 1;

            let attack = AttackEvent::new(id, kind, format_address(octets), jitter);
            debug!(session = %session.id, attack = %attack.brief(), "Attack spawned");
            self.window.push_back(attack.clone());
            while self.window.len() > config.window_size {
                if let Some(old) = self.window.pop_front() {
                    report.evicted.push(old.id);
                }
            }
            report.spawned = Some(attack);
        }

        if config.level_interval_secs > 0 && session.elapsed_seconds % config.level_interval_secs == 0 {
            session.level += 1;
            report.leveled_up = true;
            info!(session = %session.id, level = session.level, "Level up");
        }

        let mut strength_sum: u32 = 0;
        for attack in self.window.iter_mut() {
            if attack.blocked || attack.age_ticks < config.grace_ticks {
                continue;
            }
            if config.damage_policy == DamagePolicy::OncePerEvent && attack.has_hit() {
                continue;
            }
            attack.hits += 1;
            strength_sum += attack.strength;
            report.hits += 1;
        }

        if report.hits > 0 {
            let damage = strength_sum as f64 * config.damage_factor;
            session.shield_strength = (session.shield_strength - damage).clamp(0.0, MAX_SHIELD);
            session.succeeded_count += report.hits;
            report.damage = damage;
            debug!(
                session = %session.id,
                hits = report.hits,
                damage,
                shield = session.shield_strength,
                "Shield hit"
            );
        }

        Some(report)
    }

    /// Block an attack. Returns true if this call blocked it; unknown,
    /// already blocked or already landed (under once-per-event damage)
    /// attacks are left alone.
    pub fn block(&mut self, id: AttackId) -> bool {
        let policy = self.config.damage_policy;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(attack) = self.window.iter_mut().find(|a| a.id == id) else {
            trace!(attack = %id, "Block ignored: no such attack");
            return false;
        };
        if attack.blocked || (policy == DamagePolicy::OncePerEvent && attack.has_hit()) {
            trace!(attack = %id, "Block ignored: already resolved");
            return false;
        }

        attack.blocked = true;
        session.blocked_count += 1;
        debug!(session = %session.id, attack = %attack.brief(), "Attack blocked");
        true
    }

    /// Attacks that can still be blocked
    pub fn blockable(&self) -> Vec<AttackId> {
        let policy = self.config.damage_policy;
        self.window
            .iter()
            .filter(|a| !a.blocked && !(policy == DamagePolicy::OncePerEvent && a.has_hit()))
            .map(|a| a.id)
            .collect()
    }
}

impl Default for DefenseSimulator {
    fn default() -> Self {
        Self::new(DefenseConfig::default())
    }
}

/// Render seconds as `MM:SS`
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::random::{RngSource, ScriptedSource};

    fn running(config: DefenseConfig) -> DefenseSimulator {
        let mut sim = DefenseSimulator::new(config);
        sim.start();
        sim
    }

    #[test]
    fn start_resets_everything() {
        let mut sim = DefenseSimulator::default();
        assert_eq!(sim.state(), SimulatorState::Idle);
        let session = sim.start();
        assert_eq!(session.shield_strength, 100.0);
        assert_eq!(session.level, 1);
        assert_eq!(session.elapsed_seconds, 0);
        assert_eq!(session.blocked_count, 0);
        assert_eq!(session.succeeded_count, 0);
        assert_eq!(sim.attacks().count(), 0);
        assert_eq!(sim.state(), SimulatorState::Running);
    }

    #[test]
    fn restart_clears_previous_run() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        rng.spawn(0, 0, [1, 1, 1, 1]);
        sim.tick(&mut rng);
        assert_eq!(sim.attacks().count(), 1);

        sim.start();
        assert_eq!(sim.attacks().count(), 0);
        assert_eq!(sim.session().unwrap().elapsed_seconds, 0);
    }

    #[test]
    fn tick_when_idle_does_nothing() {
        let mut sim = DefenseSimulator::default();
        assert!(sim.tick(&mut ScriptedSource::new()).is_none());
    }

    #[test]
    fn stop_discards_session() {
        let mut sim = running(DefenseConfig::default());
        sim.tick(&mut ScriptedSource::new());
        let last = sim.stop().unwrap();
        assert_eq!(last.elapsed_seconds, 1);
        assert!(sim.session().is_none());
        assert_eq!(sim.attacks().count(), 0);
        assert!(sim.stop().is_none());
    }

    #[test]
    fn spawn_uses_scripted_draws() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        rng.spawn(4, 6, [10, 0, 0, 254]);
        let report = sim.tick(&mut rng).unwrap();

        let attack = report.spawned.unwrap();
        assert_eq!(attack.id, AttackId(1));
        assert_eq!(attack.kind, AttackKind::Malware);
        assert_eq!(attack.strength, 41);
        assert_eq!(attack.source_address, "10.0.0.254");
        assert!(!attack.blocked);
    }

    #[test]
    fn spawn_chance_grows_with_level_and_clamps() {
        let sim = DefenseSimulator::default();
        assert!((sim.spawn_chance(1) - 0.4).abs() < 1e-9);
        assert!((sim.spawn_chance(5) - 0.8).abs() < 1e-9);
        assert_eq!(sim.spawn_chance(8), 1.0);
        assert_eq!(sim.spawn_chance(100), 1.0);
    }

    #[test]
    fn chance_above_threshold_spawns_nothing() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        // Level 1 threshold is 0.4
        rng.push(crate::game::random::Draw::Chance(0.45));
        let report = sim.tick(&mut rng).unwrap();
        assert!(report.spawned.is_none());
    }

    #[test]
    fn window_keeps_last_ten() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        for _ in 0..12 {
            rng.spawn(3, 0, [0, 0, 0, 0]);
        }
        let mut evicted = Vec::new();
        for _ in 0..12 {
            evicted.extend(sim.tick(&mut rng).unwrap().evicted);
        }
        let ids: Vec<u64> = sim.attacks().map(|a| a.id.0).collect();
        assert_eq!(ids, (3..=12).collect::<Vec<u64>>());
        assert_eq!(evicted, vec![AttackId(1), AttackId(2)]);
    }

    #[test]
    fn smallest_window_still_resolves_every_evicted_attack() {
        let mut sim = running(DefenseConfig {
            window_size: 2,
            ..DefenseConfig::default()
        });
        let mut rng = ScriptedSource::new();
        for _ in 0..20 {
            rng.spawn(4, 0, [10, 0, 0, 1]); // Malware, strength 35
        }
        let mut evicted = Vec::new();
        for _ in 0..20 {
            evicted.extend(sim.tick(&mut rng).unwrap().evicted);
        }

        let session = sim.session().unwrap();
        assert_eq!(evicted.len(), 18);
        assert_eq!(session.blocked_count, 0);
        assert_eq!(session.succeeded_count, 19);
        assert!(session.succeeded_count + session.blocked_count >= evicted.len() as u32);
        assert!((session.shield_strength - 33.5).abs() < 1e-9);
        assert_eq!(session.efficiency(), 0.0);
    }

    #[test]
    fn level_rises_every_thirty_seconds() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        let mut level_ups = Vec::new();
        for _ in 0..90 {
            let report = sim.tick(&mut rng).unwrap();
            if report.leveled_up {
                level_ups.push(report.elapsed_seconds);
            }
        }
        assert_eq!(level_ups, vec![30, 60, 90]);
        assert_eq!(sim.session().unwrap().level, 4);
    }

    #[test]
    fn unblocked_attack_lands_once_after_grace() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        rng.spawn(1, 0, [1, 2, 3, 4]); // DDoS, strength 30

        let first = sim.tick(&mut rng).unwrap();
        assert_eq!(first.hits, 0);
        assert_eq!(sim.session().unwrap().shield_strength, 100.0);

        let second = sim.tick(&mut rng).unwrap();
        assert_eq!(second.hits, 1);
        assert!((second.damage - 3.0).abs() < 1e-9);
        let session = sim.session().unwrap();
        assert!((session.shield_strength - 97.0).abs() < 1e-9);
        assert_eq!(session.succeeded_count, 1);

        let third = sim.tick(&mut rng).unwrap();
        assert_eq!(third.hits, 0);
        assert_eq!(sim.session().unwrap().succeeded_count, 1);
    }

    #[test]
    fn blocking_in_time_prevents_damage() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        rng.spawn(0, 5, [1, 2, 3, 4]);
        let id = sim.tick(&mut rng).unwrap().spawned.unwrap().id;

        assert!(sim.block(id));
        sim.tick(&mut rng);
        let session = sim.session().unwrap();
        assert_eq!(session.shield_strength, 100.0);
        assert_eq!(session.blocked_count, 1);
        assert_eq!(session.succeeded_count, 0);
        assert!(sim.attack(id).unwrap().blocked);
    }

    #[test]
    fn double_block_counts_once() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        rng.spawn(0, 0, [0, 0, 0, 0]);
        let id = sim.tick(&mut rng).unwrap().spawned.unwrap().id;

        assert!(sim.block(id));
        assert!(!sim.block(id));
        assert_eq!(sim.session().unwrap().blocked_count, 1);
    }

    #[test]
    fn unknown_or_landed_attacks_cannot_be_blocked() {
        let mut sim = running(DefenseConfig::default());
        assert!(!sim.block(AttackId(99)));

        let mut rng = ScriptedSource::new();
        rng.spawn(0, 0, [0, 0, 0, 0]);
        let id = sim.tick(&mut rng).unwrap().spawned.unwrap().id;
        sim.tick(&mut rng);
        assert!(sim.blockable().is_empty());
        assert!(!sim.block(id));
        assert_eq!(sim.session().unwrap().blocked_count, 0);
    }

    #[test]
    fn block_when_idle_is_noop() {
        let mut sim = DefenseSimulator::default();
        assert!(!sim.block(AttackId(1)));
    }

    #[test]
    fn classic_policy_repeats_damage_until_blocked() {
        let mut sim = running(DefenseConfig::classic());
        let mut rng = ScriptedSource::new();
        rng.spawn(3, 0, [0, 0, 0, 0]); // Port Scan, strength 15

        let first = sim.tick(&mut rng).unwrap();
        assert_eq!(first.hits, 1);
        let id = first.spawned.unwrap().id;
        sim.tick(&mut rng);
        let session = sim.session().unwrap();
        assert!((session.shield_strength - 97.0).abs() < 1e-9);
        assert_eq!(session.succeeded_count, 2);

        // Still blockable under the classic model
        assert!(sim.block(id));
        sim.tick(&mut rng);
        assert!((sim.session().unwrap().shield_strength - 97.0).abs() < 1e-9);
    }

    #[test]
    fn shield_never_goes_negative() {
        let config = DefenseConfig {
            damage_factor: 10.0,
            ..DefenseConfig::classic()
        };
        let mut sim = running(config);
        let mut rng = ScriptedSource::new();
        rng.spawn(4, 9, [0, 0, 0, 0]);
        sim.tick(&mut rng);
        sim.tick(&mut rng);
        let session = sim.session().unwrap();
        assert_eq!(session.shield_strength, 0.0);
        assert!(session.is_shield_down());
    }

    #[test]
    fn efficiency_is_100_with_nothing_resolved() {
        let mut sim = DefenseSimulator::default();
        assert_eq!(sim.efficiency(), 100.0);
        sim.start();
        assert_eq!(sim.efficiency(), 100.0);
    }

    #[test]
    fn efficiency_tracks_ratio() {
        let mut sim = running(DefenseConfig::default());
        let mut rng = ScriptedSource::new();
        rng.spawn(0, 0, [0, 0, 0, 0]);
        let blocked = sim.tick(&mut rng).unwrap().spawned.unwrap().id;
        sim.block(blocked);
        rng.spawn(0, 0, [0, 0, 0, 0]);
        sim.tick(&mut rng);
        sim.tick(&mut rng);
        // One blocked, one landed
        assert_eq!(sim.efficiency(), 50.0);
    }

    #[test]
    fn seeded_runs_are_reproducible_and_hold_invariants() {
        let run = |seed| {
            let mut sim = running(DefenseConfig::default());
            let mut rng = RngSource::seeded(seed);
            let mut last_level = 1;
            for _ in 0..200 {
                sim.tick(&mut rng);
                let session = sim.session().unwrap();
                assert!((0.0..=100.0).contains(&session.shield_strength));
                assert!(session.level >= last_level);
                assert!(sim.attacks().count() <= 10);
                last_level = session.level;
            }
            sim.stop().unwrap()
        };
        let a = run(1234);
        let b = run(1234);
        assert_eq!(a.shield_strength, b.shield_strength);
        assert_eq!(a.succeeded_count, b.succeeded_count);
        assert_eq!(a.level, 7);
    }

    #[test]
    fn time_formats_as_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3600), "60:00");
    }
}
