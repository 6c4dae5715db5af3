//! Command line front end
//!
//! Each subcommand drives one training module and prints either plain
//! text or, with `--json`, a serialized result.

use crate::config::AcademyConfig;
use crate::game::cipher::{self, CipherMethod, Direction, INVALID_BASE64};
use crate::game::defense::{format_time, DefenseSession};
use crate::game::password::StrengthResult;
use crate::game::random::{RandomSource, RngSource};
use crate::game::ticker::{Clock, DefenseTicker, Flow, ManualClock, SystemClock, TickerExit};
use crate::game::Academy;
use crate::logging::LogFormat;
use crate::{AcademyError, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "cyber-academy", version, about = "Gamified cybersecurity training")]
pub struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    pub log_format: LogFormat,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard: player profile, modules and achievements
    Modules,

    /// Rate a password
    Password {
        password: String,
    },

    /// Run text through a toy cipher
    Cipher {
        text: String,

        /// caesar, rot13 or base64
        #[arg(long, default_value = "caesar")]
        method: String,

        /// Caesar shift
        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        shift: i32,

        /// Decode instead of encode
        #[arg(long)]
        decode: bool,
    },

    /// Phishing quiz on stdin: answer "s" (safe) or "p" (phishing), "q" quits
    Phishing {
        /// Stop after this many emails
        #[arg(long, default_value_t = 4)]
        rounds: u32,
    },

    /// Play firewall defense
    Defend {
        /// How many simulated seconds to run
        #[arg(long, default_value_t = 60)]
        seconds: u32,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Do not wait between ticks
        #[arg(long)]
        fast: bool,

        /// Chance (0-1) that the autopilot blocks each open attack per tick
        #[arg(long, default_value_t = 0.5)]
        auto_block: f64,
    },
}

#[derive(Debug, Serialize)]
struct PasswordOutput<'a> {
    #[serde(flatten)]
    result: &'a StrengthResult,
    tone: &'static str,
}

#[derive(Debug, Serialize)]
struct CipherOutput<'a> {
    method: &'a str,
    description: &'a str,
    direction: Direction,
    input: &'a str,
    output: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct DefenseSummary {
    session: Option<DefenseSession>,
    efficiency: f64,
    exit: String,
}

/// Load the config named on the command line, or the defaults
pub fn load_config(cli: &Cli) -> Result<AcademyConfig> {
    match &cli.config {
        Some(path) => AcademyConfig::load(path),
        None => Ok(AcademyConfig::default()),
    }
}

/// Execute a parsed command line
pub fn run(cli: &Cli, config: &AcademyConfig, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    let mut academy = Academy::new(config);
    match &cli.command {
        Command::Modules => show_modules(&academy, cli.json, out),
        Command::Password { password } => {
            let result = academy.check_password(password);
            if cli.json {
                let report = PasswordOutput {
                    result: &result,
                    tone: result.label.color(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
                return Ok(());
            }
            writeln!(out, "Strength: {} ({:.0}%)  +{} XP", result.label, result.percentage, result.xp)?;
            for c in &result.criteria {
                let mark = if c.met { "✓" } else { "✗" };
                writeln!(out, "  {} {} - {}", mark, c.name, c.description)?;
            }
            Ok(())
        }
        Command::Cipher { text, method, shift, decode } => {
            let method = CipherMethod::parse(method, *shift)?;
            let direction = if *decode { Direction::Decode } else { Direction::Encode };
            let result = cipher::transform(text, method, direction);
            if cli.json {
                let (output, error) = match result {
                    Ok(s) => (Some(s), None),
                    Err(e) => (None, Some(e.to_string())),
                };
                let report = CipherOutput {
                    method: method.name(),
                    description: method.description(),
                    direction,
                    input: text,
                    output,
                    error,
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                match result {
                    Ok(s) => writeln!(out, "{s}")?,
                    Err(AcademyError::InvalidBase64) => writeln!(out, "{INVALID_BASE64}")?,
                    Err(e) => return Err(e.into()),
                }
            }
            Ok(())
        }
        Command::Phishing { rounds } => play_phishing(&mut academy, *rounds, input, out),
        Command::Defend { seconds, seed, fast, auto_block } => {
            let options = DefendOptions {
                seconds: *seconds,
                seed: *seed,
                auto_block: auto_block.clamp(0.0, 1.0),
                json: cli.json,
            };
            let interval = Duration::from_millis(config.defense.tick_interval_ms);
            if *fast {
                play_defense(&mut academy, DefenseTicker::new(interval, ManualClock::default()), &options, out)
            } else {
                play_defense(&mut academy, DefenseTicker::new(interval, SystemClock), &options, out)
            }
        }
    }
}

fn show_modules(academy: &Academy, json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&academy.modules)?)?;
        return Ok(());
    }
    let player = &academy.player;
    writeln!(
        out,
        "{} | XP: {}/{} ({:.0}%)",
        player.title(),
        player.xp,
        player.next_level_xp,
        player.progress_percent()
    )?;
    writeln!(out)?;
    for module in &academy.modules {
        let lock = if module.is_locked() { "🔒" } else { "▶" };
        writeln!(
            out,
            "{} {:<18} {:<13} +{:<4} XP  {}",
            lock,
            module.title,
            module.difficulty.to_string(),
            module.xp_reward,
            module.description
        )?;
    }
    writeln!(out)?;
    for achievement in crate::Achievement::ALL {
        let icon = if player.has_achievement(achievement) { achievement.icon() } else { "🔒" };
        writeln!(out, "{} {}", icon, achievement.name())?;
    }
    Ok(())
}

fn play_phishing(academy: &mut Academy, rounds: u32, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    let mut line = String::new();
    let mut asked = 0;
    while asked < rounds {
        let case = academy.phishing.current_case();
        writeln!(out, "From:    {}", case.sender)?;
        writeln!(out, "Subject: {}", case.subject)?;
        writeln!(out, "{}", case.body)?;
        write!(out, "Safe or phishing? [s/p/q] ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let user_says_safe = match line.trim().to_ascii_lowercase().as_str() {
            "s" | "safe" => true,
            "p" | "phishing" => false,
            "q" | "quit" => break,
            _ => {
                writeln!(out, "Please answer s, p or q.")?;
                continue;
            }
        };

        let judgement = academy.answer_phishing(user_says_safe)?;
        let verdict = if judgement.correct { "Correct!" } else { "Wrong." };
        writeln!(out, "{} This email is {}.", verdict, case.verdict())?;
        for indicator in case.indicators {
            writeln!(out, "  - {indicator}")?;
        }
        writeln!(out)?;
        asked += 1;
    }

    let session = &academy.phishing;
    writeln!(out, "Score: {}/{} ({}% accuracy)", session.score, session.attempts, session.accuracy())?;
    Ok(())
}

struct DefendOptions {
    seconds: u32,
    seed: Option<u64>,
    auto_block: f64,
    json: bool,
}

fn play_defense<C: Clock>(
    academy: &mut Academy,
    mut ticker: DefenseTicker<C>,
    options: &DefendOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let (mut rng, mut autopilot) = match options.seed {
        Some(seed) => (RngSource::seeded(seed), RngSource::seeded(seed.wrapping_add(1))),
        None => (RngSource::from_entropy(), RngSource::from_entropy()),
    };

    academy.defense.start();
    let json = options.json;
    let mut lines: Vec<String> = Vec::new();
    let exit = ticker.run(&mut academy.defense, &mut rng, options.seconds, |sim, report| {
        let clock = format_time(report.elapsed_seconds);
        if let Some(ref attack) = report.spawned {
            lines.push(format!("[{clock}] ⚠ {}", attack.brief()));
        }
        if report.leveled_up {
            if let Some(session) = sim.session() {
                lines.push(format!("[{clock}] ▲ Level {}", session.level));
            }
        }
        for id in sim.blockable() {
            if autopilot.chance() < options.auto_block && sim.block(id) {
                lines.push(format!("[{clock}] 🛡 Blocked {id}"));
            }
        }
        if report.hits > 0 {
            let shield = sim.session().map_or(0.0, |s| s.shield_strength);
            lines.push(format!("[{clock}] ✗ {} hit(s), -{:.1} shield ({shield:.1}% left)", report.hits, report.damage));
        }
        match sim.session() {
            Some(session) if session.is_shield_down() => Flow::Break,
            _ => Flow::Continue,
        }
    });

    let efficiency = academy.defense.efficiency();
    let session = academy.defense.stop();

    if json {
        let summary = DefenseSummary {
            session,
            efficiency,
            exit: format!("{exit:?}"),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    for line in &lines {
        writeln!(out, "{line}")?;
    }
    if let Some(s) = session {
        let outcome = match exit {
            TickerExit::Finished => "Shield destroyed",
            _ => "Defense ended",
        };
        writeln!(
            out,
            "{outcome} at {} | Level {} | Shield {:.0}% | Blocked {} | Breached {} | Efficiency {:.0}%",
            format_time(s.elapsed_seconds),
            s.level,
            s.shield_strength,
            s.blocked_count,
            s.succeeded_count,
            efficiency
        )?;
    }
    Ok(())
}
