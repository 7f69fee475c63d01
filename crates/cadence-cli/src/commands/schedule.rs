use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use cadence_core::{
    AvailabilityScheduler, Config, ScheduleRequest, SchedulingPolicy, SchedulingResult,
};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

#[derive(Args)]
pub struct RequestArgs {
    /// JSON request file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Anchor instant in RFC 3339; defaults to the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Propose a slot (or split sessions) for the request's task
    Propose {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// List alternative single-slot candidates, earliest first
    Candidates {
        #[command(flatten)]
        request: RequestArgs,
        /// Maximum number of candidates (config `output.candidate_limit` by default)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List free working time over the lookahead horizon
    Free {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Propose slots for every task in the request, most urgent first
    Batch {
        #[command(flatten)]
        request: RequestArgs,
    },
}

/// A loaded request with its resolved policy.
struct Resolved {
    request: ScheduleRequest,
    scheduler: AvailabilityScheduler,
    pretty: bool,
}

impl RequestArgs {
    fn resolve(&self, config: &Config) -> Result<Resolved, Box<dyn std::error::Error>> {
        let request = match &self.input {
            Some(path) => ScheduleRequest::from_reader(BufReader::new(File::open(path)?))?,
            None => ScheduleRequest::from_reader(io::stdin().lock())?,
        };

        let mut policy: SchedulingPolicy = request
            .policy
            .apply(config.to_policy(self.now.unwrap_or_else(Utc::now)));
        if let Some(now) = self.now {
            policy.current_date = now;
        }

        let scheduler = AvailabilityScheduler::new(policy)?;
        tracing::debug!(policy = ?scheduler.policy(), "resolved scheduling policy");

        Ok(Resolved {
            request,
            scheduler,
            pretty: self.pretty || config.output.pretty,
        })
    }
}

/// Explain a missing proposal on stderr; stdout stays machine-readable.
fn report_no_slot(label: &str, result: &SchedulingResult) {
    if let Some(reason) = result.no_slot_reason() {
        eprintln!("{label}: {}", reason.description());
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        ScheduleAction::Propose { request } => {
            let resolved = request.resolve(&config)?;
            let task = resolved
                .request
                .all_tasks()
                .into_iter()
                .next()
                .ok_or("request has no task")?;
            let result = resolved
                .scheduler
                .propose(&task, &resolved.request.busy_intervals())?;
            report_no_slot(&task.id, &result);
            print_json(&result, resolved.pretty)?;
        }
        ScheduleAction::Candidates { request, limit } => {
            let resolved = request.resolve(&config)?;
            let task = resolved
                .request
                .all_tasks()
                .into_iter()
                .next()
                .ok_or("request has no task")?;
            let candidates = resolved.scheduler.candidates(
                &task,
                &resolved.request.busy_intervals(),
                limit.unwrap_or(config.output.candidate_limit),
            )?;
            print_json(&candidates, resolved.pretty)?;
        }
        ScheduleAction::Free { request } => {
            let resolved = request.resolve(&config)?;
            let slots = resolved
                .scheduler
                .free_slots(&resolved.request.busy_intervals())?;
            print_json(&slots, resolved.pretty)?;
        }
        ScheduleAction::Batch { request } => {
            let resolved = request.resolve(&config)?;
            let tasks = resolved.request.all_tasks();
            if tasks.is_empty() {
                return Err("request has no tasks".into());
            }
            let proposals = resolved
                .scheduler
                .plan_batch(&tasks, &resolved.request.busy_intervals())?;
            for proposal in &proposals {
                report_no_slot(&proposal.task_id, &proposal.result);
            }
            print_json(&proposals, resolved.pretty)?;
        }
    }
    Ok(())
}
