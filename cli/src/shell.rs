//! Interactive dashboard shell.
//!
//! A line-oriented loop driving the page controller: tab switching,
//! debounced search, pagination, and the write actions. Searches are
//! debounced through [`SearchDebouncer`]; typing several `search` commands
//! quickly results in a single fetch for the last term.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};

use ancr_dashboard::{Dashboard, SearchDebouncer, Tab, VerifyOutcome};
use ancr_flow::FlowRunner;
use ancr_types::{AnchorId, Platform, Timestamp};

use crate::print_flow_event;

const HELP: &str = "\
commands:
  tab <identities|verifications|consistency>   switch tab
  search [term]         debounced identity search (empty clears the filter)
  next / prev           page through the active tab
  refresh               re-fetch the active tab
  stats                 show aggregate statistics
  create                create a new identity
  verify <id> <platform> <url>   run the verification flow
  check <group> <a> <b>          run a consistency check
  event <id> <type> [platform] [impact]   log a reputation event
  show <id> / export <id> / history <id>
  health                service liveness
  help / quit";

/// Sleep until `deadline`; pends forever when there is none.
async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep(deadline.saturating_duration_since(Instant::now())).await
        }
        None => std::future::pending().await,
    }
}

pub async fn run(mut dashboard: Dashboard) -> anyhow::Result<()> {
    let mut debouncer = SearchDebouncer::new(dashboard.config().debounce_delay());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match dashboard.refresh_statistics().await {
        Ok(stats) => println!("{}\n", ancr_render::statistics_block(&stats)),
        Err(e) => println!("statistics unavailable: {e}\n"),
    }
    if let Err(e) = dashboard.switch_tab(Tab::Identities).await {
        println!("error: {e}");
    }
    println!("{}", dashboard.render_active(Timestamp::now()));
    println!("(type `help` for commands)");

    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut dashboard, &mut debouncer, line.trim()).await {
                    break;
                }
            }
            _ = sleep_until(deadline), if deadline.is_some() => {
                if let Some(term) = debouncer.fire(Instant::now()) {
                    match dashboard.apply_search(&term).await {
                        Ok(count) if term.is_empty() => {
                            println!("filter cleared ({count} identities)");
                        }
                        Ok(count) => println!("search \"{term}\": {count} match(es)"),
                        Err(e) => println!("search failed: {e}"),
                    }
                    println!("{}", dashboard.render_active(Timestamp::now()));
                }
            }
        }
    }

    Ok(())
}

/// Handle one input line. Returns `false` to leave the shell.
async fn handle_line(
    dashboard: &mut Dashboard,
    debouncer: &mut SearchDebouncer,
    line: &str,
) -> bool {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return true;
    };
    let args: Vec<&str> = words.collect();
    let now = Timestamp::now();

    match command {
        "quit" | "exit" => return false,
        "help" => println!("{HELP}"),

        "tab" => match args.first().and_then(|s| Tab::parse(s)) {
            Some(tab) => {
                debouncer.cancel();
                match dashboard.switch_tab(tab).await {
                    Ok(()) => println!("{}", dashboard.render_active(now)),
                    Err(e) => println!("error: {e}"),
                }
            }
            None => println!("usage: tab <identities|verifications|consistency>"),
        },

        "search" => {
            // Empty term clears the filter; the fetch fires after the
            // quiet period either way.
            debouncer.submit(args.join(" "), Instant::now());
        }

        "next" => {
            dashboard.next_page();
            println!("{}", dashboard.render_active(now));
        }
        "prev" => {
            dashboard.prev_page();
            println!("{}", dashboard.render_active(now));
        }
        "refresh" => match dashboard.refresh_active().await {
            Ok(()) => println!("{}", dashboard.render_active(now)),
            Err(e) => println!("error: {e}"),
        },

        "stats" => match dashboard.refresh_statistics().await {
            Ok(stats) => println!("{}", ancr_render::statistics_block(&stats)),
            Err(e) => println!("error: {e}"),
        },

        "create" => match dashboard.create_identity().await {
            Ok(identity) => {
                println!(
                    "Created identity #{} (trust score {:.1})",
                    identity.anchor_id, identity.trust_score
                );
                println!("{}", dashboard.render_active(now));
            }
            Err(e) => println!("error: {e}"),
        },

        "verify" => match args.as_slice() {
            [id, platform, url] => match id.parse::<AnchorId>() {
                Ok(anchor_id) => {
                    let platform = Platform::parse(platform);
                    let runner = match FlowRunner::new(dashboard.config().flow_config()) {
                        Ok(runner) => runner,
                        Err(e) => {
                            println!("error: {e}");
                            return true;
                        }
                    };
                    println!("Connecting identity {anchor_id} to {platform}...");
                    match dashboard
                        .verify_with_flow(
                            &runner,
                            anchor_id,
                            platform.clone(),
                            url.to_string(),
                            print_flow_event,
                        )
                        .await
                    {
                        Ok(VerifyOutcome::Verified(v)) => println!(
                            "Verification #{} recorded on {}",
                            v.verification_id, platform
                        ),
                        Ok(VerifyOutcome::FlowFailed) => {
                            println!("Nothing was recorded; try again later.")
                        }
                        Err(e) => println!("error: {e}"),
                    }
                }
                Err(_) => println!("invalid anchor id: {id}"),
            },
            _ => println!("usage: verify <id> <platform> <url>"),
        },

        "check" => match args.as_slice() {
            [group, a, b] => {
                match dashboard
                    .run_consistency_check(
                        group.to_string(),
                        &Platform::parse(a),
                        &Platform::parse(b),
                    )
                    .await
                {
                    Ok(check) => println!(
                        "Check #{} scored {}",
                        check.check_id,
                        ancr_render::trust_badge(check.consistency_score)
                    ),
                    Err(e) => println!("error: {e}"),
                }
            }
            _ => println!("usage: check <group> <platform-a> <platform-b>"),
        },

        "event" => match args.as_slice() {
            [id, event_type, rest @ ..] => match id.parse::<AnchorId>() {
                Ok(anchor_id) => {
                    let platform = rest.first().map(|p| Platform::parse(p));
                    let impact = rest
                        .get(1)
                        .and_then(|s| s.parse::<f64>().ok())
                        .unwrap_or(0.0);
                    match dashboard
                        .log_event(anchor_id, event_type.to_string(), platform, impact)
                        .await
                    {
                        Ok(event) => println!("Event #{} logged", event.event_id),
                        Err(e) => println!("error: {e}"),
                    }
                }
                Err(_) => println!("invalid anchor id: {id}"),
            },
            _ => println!("usage: event <id> <type> [platform] [impact]"),
        },

        "show" | "export" | "history" => match args.first().map(|s| s.parse::<AnchorId>()) {
            Some(Ok(anchor_id)) => match command {
                "show" => match dashboard.identity_details(anchor_id).await {
                    Ok(details) => println!("{}", ancr_render::details_block(&details, now)),
                    Err(e) => println!("error: {e}"),
                },
                "export" => match dashboard.export_identity(anchor_id).await {
                    Ok(path) => println!("Exported to {}", path.display()),
                    Err(e) => println!("error: {e}"),
                },
                _ => match dashboard.trust_history(anchor_id).await {
                    Ok(history) => {
                        println!("{}", ancr_render::history_table(anchor_id, &history, now))
                    }
                    Err(e) => println!("error: {e}"),
                },
            },
            _ => println!("usage: {command} <id>"),
        },

        "health" => match dashboard.health().await {
            Ok(health) => println!("{}", health.status),
            Err(e) => println!("error: {e}"),
        },

        other => println!("unknown command `{other}` (type `help`)"),
    }

    true
}
