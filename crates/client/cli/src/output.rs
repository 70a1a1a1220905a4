//! Rendering of simulation results.

use anyhow::Result;
use game_core::{GameEvent, GimmickEvent};
use runtime::{Outcome, SessionSummary, TickReport};

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and timeline
    Summary,
    /// Summary and timeline as JSON
    Json,
}

/// A notable moment of the run.
pub struct Moment {
    pub time: f32,
    pub what: String,
}

/// Moments worth showing from one tick.
pub fn timeline_entries(report: &TickReport) -> Vec<Moment> {
    let mut moments = Vec::new();
    let mut push = |what: String| {
        moments.push(Moment {
            time: report.time,
            what,
        })
    };

    for event in &report.events {
        match event {
            GameEvent::AttackResolved { position } => push(format!(
                "attack at ({:.1}, {:.1}, {:.1})",
                position.x, position.y, position.z
            )),
            GameEvent::Respawned => {
                push(format!("adversary respawned at {:?}", report.adversary_node))
            }
            GameEvent::DisableRequested { .. } => push("adversary disabled".to_owned()),
            GameEvent::GimmickCompleted { node } => push(format!("gimmick {node} completed")),
            GameEvent::SkillCheckFailed { node } => push(format!("skill check failed at {node}")),
            GameEvent::HideEntered => push("player hid".to_owned()),
            GameEvent::HideExited => push("player left hiding".to_owned()),
            GameEvent::Noise { .. } => {}
        }
    }
    for event in &report.gimmick {
        match event {
            GimmickEvent::Started { node } => push(format!("gimmick {node} started")),
            GimmickEvent::Cancelled { node } => push(format!("gimmick {node} abandoned")),
            _ => {}
        }
    }
    moments
}

pub fn print(summary: &SessionSummary, timeline: &[Moment], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let timeline: Vec<_> = timeline
                .iter()
                .map(|m| serde_json::json!({ "time": m.time, "event": m.what }))
                .collect();
            let document = serde_json::json!({ "summary": summary, "timeline": timeline });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        OutputFormat::Summary => {
            for moment in timeline {
                println!("[{:>7.2}s] {}", moment.time, moment.what);
            }
            println!();
            println!("seed:        {}", summary.seed);
            println!("simulated:   {:.2}s over {} ticks", summary.elapsed, summary.ticks);
            match summary.outcome {
                Some(Outcome::Caught { time, .. }) => {
                    println!("outcome:     caught at {time:.2}s")
                }
                None => println!("outcome:     survived"),
            }
            println!(
                "gimmicks:    {}/{}",
                summary.tally.gimmicks_completed, summary.gimmicks_total
            );
            println!(
                "adversary:   {} at {:?}, threat {:.1}",
                summary.adversary_mode, summary.adversary_node, summary.threat
            );
            println!(
                "events:      {} published, {} attacks, {} respawns, {} failed checks",
                summary.events_published,
                summary.tally.attacks,
                summary.tally.respawns,
                summary.tally.skill_checks_failed
            );
        }
    }
    Ok(())
}
