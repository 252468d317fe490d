//! Terminal output of the replayer

use crate::ant::Move;
use crate::error::ParseError;
use crate::world::GraphStats;
use colored::{ColoredString, Colorize};
use std::time::Duration;

/// One line per settled turn, e.g. `Turn 2: L1-end L2-mid`
pub fn turn_line(turn: u32, moves: &[Move]) -> String {
    format!("Turn {}: {}", turn, tokens(moves))
}

#[inline]
pub fn print_turn(turn: u32, moves: &[Move]) {
    println!("{}", paint_label(&turn_line(turn, moves), |label| label.green().bold()));
}

fn tokens(moves: &[Move]) -> String {
    moves.iter().map(Move::token).collect::<Vec<_>>().join(" ")
}

pub fn print_loop() {
    println!("{}", "↺ looping".dimmed());
}

/// Parse failures read `error: line N: reason`
pub fn error_line(err: &ParseError) -> String {
    format!("error: {}", reason(err))
}

pub fn print_error(err: &ParseError) {
    eprintln!("{}", paint_label(&error_line(err), |label| label.red().bold()));
}

fn reason(err: &ParseError) -> String {
    match err {
        // validation messages already carry their line
        ParseError::Validation(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

/// Colour the text up to and including the first ':'
fn paint_label(line: &str, paint: impl FnOnce(&str) -> ColoredString) -> String {
    match line.split_once(':') {
        Some((label, rest)) => format!("{}{}", paint(&format!("{label}:")), rest),
        None => line.to_string(),
    }
}

/// Print the farm summary; `replay` is the wall time spent replaying, if any
pub fn print_summary(stats: &GraphStats, replay: Option<Duration>) {
    println!(
        "\n{}\n{} {} {} {} {} {}",
        "===".bright_blue().bold(),
        "🐜 Ant farm:".green().bold(),
        format!("rooms={}", stats.rooms).cyan(),
        format!("tunnels={}", stats.tunnels).cyan(),
        format!("ants={}", stats.ants).cyan(),
        format!("turns={}", stats.turns).cyan(),
        format!("moves={}", stats.moves).cyan(),
    );
    println!(
        "{} {} {} {}",
        "   roles:".dimmed(),
        format!("start={}", stats.start_rooms).cyan(),
        format!("end={}", stats.end_rooms).cyan(),
        format!("normal={}", stats.normal_rooms).cyan(),
    );
    match &stats.paths {
        Some(paths) => println!(
            "{} {} {} {} {}",
            "   paths:".dimmed(),
            format!("shortest={}", paths.shortest).cyan(),
            format!("longest={}", paths.longest).cyan(),
            format!("average={:.2}", paths.average).cyan(),
            format!("total={}", paths.total).cyan(),
        ),
        None => println!("{} {}", "   paths:".dimmed(), "none".yellow()),
    }
    if let Some(elapsed) = replay {
        println!(
            "{} {:.3} ms",
            "⏱️  Replay time:".green().bold(),
            elapsed.as_secs_f64() * 1000.0
        );
    }
}
