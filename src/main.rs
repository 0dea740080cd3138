//! Coldreach - Entry Point
//!
//! Walks the campaign setup wizard (SMTP, leads, templates, follow-up
//! rules), then drops into an interactive dashboard loop where the
//! outreach simulation can be started, paused, stepped and inspected.

use clap::Parser;
use coldreach::campaign::import::{load_leads, sample_leads};
use coldreach::campaign::plan::{CampaignPlan, EmailTemplate};
use coldreach::campaign::wizard::{CampaignDraft, WizardStep};
use coldreach::core::config::{EngineConfig, SpeedPreset, DEFAULT_TICK_PERIOD_MS};
use coldreach::core::error::Result;
use coldreach::llm::client::LlmClient;
use coldreach::llm::copywriter::{draft_email, DraftRequest};
use coldreach::simulation::driver::CampaignDriver;
use coldreach::simulation::engine::{EngineSnapshot, EngineState, SimulationEngine};
use coldreach::simulation::roll::{RollSource, SeededRolls, ThreadRolls};

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Cold email outreach campaign simulator
#[derive(Parser, Debug)]
#[command(name = "coldreach")]
#[command(about = "Simulate an email outreach campaign with a live dashboard")]
struct Args {
    /// Campaign plan TOML (skips the SMTP/template/logic wizard steps)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Leads file with name,email,company lines
    #[arg(long)]
    leads: Option<PathBuf>,

    /// Use the built-in sample leads instead of a file
    #[arg(long)]
    sample: bool,

    /// Wall-clock milliseconds per simulated day
    #[arg(long)]
    period_ms: Option<u64>,

    /// Pacing preset: realtime, fast or instant
    #[arg(long)]
    speed: Option<String>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("coldreach=info")
        .init();

    let args = Args::parse();

    // Async runtime for the tick timer and LLM calls
    let rt = Runtime::new()?;

    let llm_client = LlmClient::from_env().ok().map(std::sync::Arc::new);
    if llm_client.is_none() {
        tracing::warn!("COLDREACH_LLM_API_KEY not set - using offline copy and analysis");
    }

    let draft = build_draft(&args, &rt, llm_client.as_deref())?;
    let tick_period = tick_period(&args);
    let rolls: Box<dyn RollSource + Send> = match args.seed {
        Some(seed) => Box::new(SeededRolls::new(seed)),
        None => Box::new(ThreadRolls),
    };

    let config = EngineConfig {
        tick_period,
        ..EngineConfig::default()
    };
    let engine = SimulationEngine::new(draft.leads.clone(), &config, rolls);
    let mut driver = CampaignDriver::new(engine, tick_period, llm_client.clone());

    println!("\n=== COLDREACH ===");
    println!("Campaign ready: {} leads, {} ms per simulated day", draft.leads.len(), tick_period.as_millis());
    println!();
    println!("Commands:");
    println!("  start           - Start or resume the campaign");
    println!("  pause           - Pause the campaign");
    println!("  reset           - Discard progress and reload imported leads");
    println!("  tick / t        - Advance one simulated day manually");
    println!("  run <n>         - Advance n simulated days");
    println!("  status / s      - Show the dashboard");
    println!("  leads           - Show the lead status table");
    println!("  logs            - Show the activity log");
    println!("  preview         - Render the template for the first lead");
    println!("  draft <topic>   - Draft email copy with AI (offline fallback)");
    println!("  export          - Write campaign_report.json");
    println!("  quit / q        - Exit");
    println!();

    let mut plan = draft.plan.clone();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "start" {
            let _guard = rt.enter();
            match driver.start() {
                Ok(state) => println!("Engine: {:?}", state),
                Err(e) => println!("Cannot start: {}", e),
            }
            continue;
        }

        if input == "pause" {
            println!("Engine: {:?}", driver.pause());
            continue;
        }

        if input == "reset" {
            println!("Engine: {:?}", driver.reset());
            continue;
        }

        if input == "tick" || input == "t" {
            if driver.state() == EngineState::Running {
                println!("Campaign is running; pause before stepping manually.");
                continue;
            }
            let _guard = rt.enter();
            let outcome = driver.step();
            println!("Day {} complete.", driver.snapshot().sim_day);
            if outcome.finished {
                println!("Campaign finished.");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if driver.state() == EngineState::Running {
                println!("Campaign is running; pause before stepping manually.");
                continue;
            }
            match rest.parse::<u32>() {
                Ok(n) => {
                    let _guard = rt.enter();
                    for _ in 0..n {
                        if driver.step().finished {
                            break;
                        }
                    }
                    println!("Now at day {}.", driver.snapshot().sim_day);
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        if input == "status" || input == "s" {
            display_dashboard(&driver.snapshot());
            continue;
        }

        if input == "leads" {
            display_leads(&driver.snapshot());
            continue;
        }

        if input == "logs" {
            let snapshot = driver.snapshot();
            if snapshot.logs.is_empty() {
                println!("Waiting to start...");
            }
            for line in &snapshot.logs {
                println!("> {}", line);
            }
            continue;
        }

        if input == "preview" {
            let snapshot = driver.snapshot();
            match snapshot.leads.first() {
                Some(lead) => {
                    let rendered = plan.template.render(lead);
                    println!("To: {}", lead.email);
                    println!("Subject: {}", rendered.subject);
                    println!("{}", rendered.body);
                }
                None => println!("No leads imported."),
            }
            continue;
        }

        if let Some(topic) = input.strip_prefix("draft ") {
            let request = DraftRequest {
                topic: topic.into(),
                audience: "prospective customers".into(),
                tone: "professional".into(),
            };
            match rt.block_on(draft_email(llm_client.as_deref(), &request)) {
                Ok(template) => {
                    println!("Subject: {}", template.subject);
                    println!("{}", template.body);
                    plan.template = template;
                    println!("(template updated)");
                }
                Err(e) => println!("Draft failed: {}", e),
            }
            continue;
        }

        if input == "export" {
            let json = driver.snapshot().to_json()?;
            std::fs::write("campaign_report.json", &json)?;
            println!("Report written to campaign_report.json");
            continue;
        }

        println!("Unknown command. Try: start, pause, reset, tick, run <n>, status, leads, logs, preview, draft <topic>, export, quit");
    }

    let snapshot = driver.snapshot();
    println!(
        "\nGoodbye! Final state: day {}, {} of {} leads contacted.",
        snapshot.sim_day, snapshot.stats.sent, snapshot.stats.total
    );
    Ok(())
}

/// Resolve the tick period from flags (explicit period wins over preset)
fn tick_period(args: &Args) -> Duration {
    if let Some(ms) = args.period_ms {
        return Duration::from_millis(ms);
    }
    match args.speed.as_deref() {
        Some("realtime") => SpeedPreset::Realtime.period(),
        Some("fast") => SpeedPreset::Fast.period(),
        Some("instant") => SpeedPreset::Instant.period(),
        _ => Duration::from_millis(DEFAULT_TICK_PERIOD_MS),
    }
}

/// Assemble the campaign draft from flags, walking the wizard for
/// whatever the flags did not provide
fn build_draft(args: &Args, rt: &Runtime, llm: Option<&LlmClient>) -> Result<CampaignDraft> {
    let mut draft = CampaignDraft::new();

    if let Some(path) = &args.plan {
        draft.plan = CampaignPlan::load(path)?;
    }
    if args.sample {
        draft.leads = sample_leads();
    } else if let Some(path) = &args.leads {
        draft.leads = load_leads(path)?;
    }

    // Everything supplied up front: skip the interactive wizard
    if draft.plan.smtp.is_complete() && !draft.leads.is_empty() && !draft.plan.template.is_empty() {
        return Ok(draft);
    }

    println!("\n=== CAMPAIGN SETUP ===");
    loop {
        let step = draft.step();
        println!("\n--- {} ---", step.title());
        match step {
            WizardStep::Smtp => {
                if !draft.plan.smtp.is_complete() {
                    draft.plan.smtp.host = prompt("SMTP host: ")?;
                    draft.plan.smtp.port = prompt("SMTP port [587]: ")?;
                    if draft.plan.smtp.port.is_empty() {
                        draft.plan.smtp.port = "587".into();
                    }
                    draft.plan.smtp.user = prompt("SMTP user: ")?;
                    draft.plan.smtp.pass = prompt("SMTP password: ")?;
                }
            }
            WizardStep::Leads => {
                if draft.leads.is_empty() {
                    let answer = prompt("Leads file path (or 'sample'): ")?;
                    if answer == "sample" {
                        draft.leads = sample_leads();
                    } else {
                        match load_leads(answer.as_ref()) {
                            Ok(leads) => draft.leads = leads,
                            Err(e) => println!("Import failed: {}", e),
                        }
                    }
                    println!("Imported {} leads.", draft.leads.len());
                }
            }
            WizardStep::Template => {
                if draft.plan.template.is_empty() {
                    let answer = prompt("Subject (or 'ai <topic>' to draft with AI): ")?;
                    if let Some(topic) = answer.strip_prefix("ai ") {
                        let request = DraftRequest {
                            topic: topic.into(),
                            audience: prompt("Audience: ")?,
                            tone: prompt("Tone: ")?,
                        };
                        match rt.block_on(draft_email(llm, &request)) {
                            Ok(template) => {
                                println!("Subject: {}", template.subject);
                                println!("{}", template.body);
                                draft.plan.template = template;
                            }
                            Err(e) => println!("Draft failed: {}", e),
                        }
                    } else {
                        let body = prompt("Body (use {name} and {company}): ")?;
                        draft.plan.template = EmailTemplate {
                            subject: answer,
                            body,
                        };
                    }
                }
            }
            WizardStep::Logic => {
                let wait = prompt("Wait days before follow-up [2]: ")?;
                if let Ok(days) = wait.parse() {
                    draft.plan.policy.wait_days = days;
                }
                let max = prompt("Max follow-ups [1]: ")?;
                if let Ok(n) = max.parse() {
                    draft.plan.policy.max_followups = n;
                }
                draft.plan.policy = draft.plan.policy.clone().clamped();
            }
            WizardStep::Review => {
                println!("SMTP: {}@{}", draft.plan.smtp.user, draft.plan.smtp.host);
                println!("Leads: {}", draft.leads.len());
                println!("Subject: {}", draft.plan.template.subject);
                println!(
                    "Follow-up: wait {} days, max {}, stop on reply: {}",
                    draft.plan.policy.wait_days,
                    draft.plan.policy.max_followups,
                    draft.plan.policy.stop_on_reply
                );
                prompt("Press enter to start the simulation...")?;
            }
            WizardStep::Simulation => break,
        }

        if draft.advance().is_none() && draft.step() != WizardStep::Simulation {
            println!("(step incomplete, try again)");
        }
    }

    Ok(draft)
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}

/// KPI cards, bar chart and insight line for the current snapshot
fn display_dashboard(snapshot: &EngineSnapshot) {
    let stats = &snapshot.stats;
    println!();
    println!(
        "--- Day {} | Engine: {:?} ---",
        snapshot.sim_day, snapshot.state
    );
    println!(
        "  Emails Sent: {}   Open Rate: {:.0}%   Reply Rate: {:.0}%",
        stats.sent,
        stats.open_rate() * 100.0,
        stats.reply_rate() * 100.0
    );
    println!();

    let buckets = [
        ("Sent", stats.sent),
        ("Opened", stats.opened),
        ("Replied", stats.replied),
        ("Bounced", stats.bounced),
    ];
    let max = buckets.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    for (label, value) in buckets {
        let width = (value * 30) / max;
        println!(
            "  {:<8} |{}{}| {}",
            label,
            "#".repeat(width),
            " ".repeat(30 - width),
            value
        );
    }

    println!();
    match &snapshot.summary {
        Some(summary) => println!("  Insight: {}", summary),
        None => println!("  Insight: waiting for campaign data..."),
    }

    if !snapshot.logs.is_empty() {
        println!();
        for line in snapshot.logs.iter().take(10) {
            println!("  > {}", line);
        }
    }
    println!();
}

/// Lead status table, capped at 10 rows
fn display_leads(snapshot: &EngineSnapshot) {
    println!();
    println!(
        "  {:<28} {:<18} {:<20}",
        "EMAIL", "STATUS", "LAST EVENT"
    );
    for lead in snapshot.leads.iter().take(10) {
        println!(
            "  {:<28} {:<18} {:<20}",
            lead.email,
            lead.status.label(),
            lead.last_event().unwrap_or("-")
        );
    }
    if snapshot.leads.len() > 10 {
        println!("  Showing 10 of {} leads", snapshot.leads.len());
    }
    println!();
}
