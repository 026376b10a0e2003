//! ancr — terminal dashboard for the identity-anchor reputation service.

mod shell;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ancr_dashboard::{Dashboard, DashboardConfig, VerifyOutcome};
use ancr_flow::{FlowEvent, FlowRunner};
use ancr_types::{AnchorId, Platform, Timestamp};

#[derive(Parser)]
#[command(name = "ancr", about = "Identity anchor reputation dashboard")]
struct Cli {
    /// Base URL of the reputation service, including the /api prefix.
    #[arg(long, env = "ANCR_API_URL")]
    api_url: Option<String>,

    /// Items per page in list views.
    #[arg(long, env = "ANCR_PAGE_SIZE")]
    page_size: Option<usize>,

    /// Directory export files are written to.
    #[arg(long, env = "ANCR_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    /// Probability in [0, 1] that a simulated verification flow succeeds.
    #[arg(long, env = "ANCR_FLOW_SUCCESS_RATE")]
    success_rate: Option<f64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "ANCR_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show aggregate statistics.
    Stats,
    /// Identity operations.
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },
    /// Verification operations.
    Verify {
        #[command(subcommand)]
        action: VerifyAction,
    },
    /// Consistency check operations.
    Consistency {
        #[command(subcommand)]
        action: ConsistencyAction,
    },
    /// Log a reputation event.
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Check service liveness.
    Health,
    /// Interactive dashboard shell.
    Dash,
}

#[derive(Subcommand)]
enum IdentityAction {
    /// Create a new identity anchor.
    Create,
    /// List identities.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Search identities by anchor id or public key.
    Search { term: String },
    /// Show one identity with its verifications and recent events.
    Show { id: u64 },
    /// Write an identity's export file.
    Export { id: u64 },
    /// Show an identity's trust score history.
    History { id: u64 },
}

#[derive(Subcommand)]
enum VerifyAction {
    /// Verify an identity against a platform profile.
    Add {
        id: u64,
        platform: String,
        profile_url: String,
        /// Persist directly without playing the simulated flow.
        #[arg(long)]
        skip_flow: bool,
    },
    /// List verifications.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand)]
enum ConsistencyAction {
    /// Run a consistency check between two platforms.
    Run {
        user_group: String,
        platform_a: String,
        platform_b: String,
    },
    /// List consistency checks.
    List,
}

#[derive(Subcommand)]
enum EventAction {
    /// Log a reputation event against an identity.
    Log {
        id: u64,
        event_type: String,
        #[arg(long)]
        platform: Option<String>,
        /// Score impact; the service clamps the result into [0, 100].
        #[arg(long, default_value_t = 0.0)]
        impact: f64,
    },
}

fn print_flow_event(event: &FlowEvent) {
    match event {
        FlowEvent::StepStarted {
            title, description, ..
        } => println!("  -> {title}: {description}"),
        FlowEvent::StepCompleted { progress, .. } => {
            println!("     done ({:.0}%)", progress * 100.0)
        }
        FlowEvent::StepFailed { .. } => println!("     FAILED"),
        FlowEvent::Finished { success } => {
            if *success {
                println!("Platform confirmed the profile.");
            } else {
                println!("Platform rejected the verification.");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => DashboardConfig::from_toml_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(export_dir) = cli.export_dir {
        config.export_dir = export_dir;
    }
    if let Some(success_rate) = cli.success_rate {
        config.flow_success_rate = success_rate;
    }
    config.log_level = cli.log_level;

    ancr_utils::init_tracing(&config.log_level);
    tracing::debug!(api_url = %config.api_url, "starting ancr");

    let mut dashboard = Dashboard::new(config);
    let now = Timestamp::now();

    match cli.command {
        Command::Stats => {
            let stats = dashboard.refresh_statistics().await?;
            println!("{}", ancr_render::statistics_block(&stats));
        }

        Command::Identity { action } => match action {
            IdentityAction::Create => {
                let identity = dashboard.create_identity().await?;
                println!(
                    "Created identity #{} (trust score {:.1})",
                    identity.anchor_id, identity.trust_score
                );
            }
            IdentityAction::List { page } => {
                dashboard.switch_tab(ancr_dashboard::Tab::Identities).await?;
                for _ in 1..page {
                    dashboard.next_page();
                }
                println!("{}", dashboard.render_active(now));
            }
            IdentityAction::Search { term } => {
                let matches = dashboard.apply_search(&term).await?;
                println!("{} match(es) for \"{term}\"", matches);
                println!("{}", dashboard.render_active(now));
            }
            IdentityAction::Show { id } => {
                let details = dashboard.identity_details(AnchorId(id)).await?;
                println!("{}", ancr_render::details_block(&details, now));
            }
            IdentityAction::Export { id } => {
                let path = dashboard.export_identity(AnchorId(id)).await?;
                println!("Exported identity {id} to {}", path.display());
            }
            IdentityAction::History { id } => {
                let history = dashboard.trust_history(AnchorId(id)).await?;
                println!("{}", ancr_render::history_table(AnchorId(id), &history, now));
            }
        },

        Command::Verify { action } => match action {
            VerifyAction::Add {
                id,
                platform,
                profile_url,
                skip_flow,
            } => {
                let platform = Platform::parse(&platform);
                if skip_flow {
                    let v = dashboard
                        .add_verification_direct(AnchorId(id), &platform, profile_url)
                        .await?;
                    println!(
                        "Verification #{} recorded for identity {id} on {}",
                        v.verification_id, platform
                    );
                } else {
                    let runner = FlowRunner::new(dashboard.config().flow_config())?;
                    println!("Connecting identity {id} to {platform}...");
                    let outcome = dashboard
                        .verify_with_flow(
                            &runner,
                            AnchorId(id),
                            platform.clone(),
                            profile_url,
                            print_flow_event,
                        )
                        .await?;
                    match outcome {
                        VerifyOutcome::Verified(v) => println!(
                            "Verification #{} recorded for identity {id} on {}",
                            v.verification_id, platform
                        ),
                        VerifyOutcome::FlowFailed => {
                            println!("Nothing was recorded; try again later.")
                        }
                    }
                }
            }
            VerifyAction::List { page } => {
                dashboard
                    .switch_tab(ancr_dashboard::Tab::Verifications)
                    .await?;
                for _ in 1..page {
                    dashboard.next_page();
                }
                println!("{}", dashboard.render_active(now));
            }
        },

        Command::Consistency { action } => match action {
            ConsistencyAction::Run {
                user_group,
                platform_a,
                platform_b,
            } => {
                let check = dashboard
                    .run_consistency_check(
                        user_group,
                        &Platform::parse(&platform_a),
                        &Platform::parse(&platform_b),
                    )
                    .await?;
                println!(
                    "Check #{}: {} vs {} scored {}",
                    check.check_id,
                    check.platform_a,
                    check.platform_b,
                    ancr_render::trust_badge(check.consistency_score)
                );
            }
            ConsistencyAction::List => {
                dashboard
                    .switch_tab(ancr_dashboard::Tab::Consistency)
                    .await?;
                println!("{}", dashboard.render_active(now));
            }
        },

        Command::Event { action } => match action {
            EventAction::Log {
                id,
                event_type,
                platform,
                impact,
            } => {
                let event = dashboard
                    .log_event(
                        AnchorId(id),
                        event_type,
                        platform.map(|p| Platform::parse(&p)),
                        impact,
                    )
                    .await?;
                println!("Event #{} logged for identity {id}", event.event_id);
            }
        },

        Command::Health => {
            let health = dashboard.health().await?;
            match health.message {
                Some(message) => println!("{} ({message})", health.status),
                None => println!("{}", health.status),
            }
        }

        Command::Dash => {
            shell::run(dashboard).await?;
        }
    }

    Ok(())
}
