use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use opina_core::constants::{SIGNUP_COOLDOWN_SECS, TOP_TRENDS_DEFAULT};
use opina_core::models::{NewFeedItem, SignalEventDetail, SignalSource, Trend};
use opina_core::{
    ChangeBus, CoreConfig, FeedStore, FeedView, FileBackend, MetricsStore, SignalStore,
    SignupCooldown, StorageWatcher, TrendStore, TrendView, VoteRegistry,
};

#[derive(Parser)]
#[command(name = "opina-cli")]
#[command(about = "Inspect and drive the local Opina state stores")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, short = 'd')]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the activity feed, newest first
    Feed,

    /// Add a feed entry
    FeedAdd {
        user: String,
        action: String,
        target: String,
        /// Optional avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },

    /// List all trends, ranked
    Trends,

    /// Show the highest-ranked trends
    TrendsTop {
        #[arg(default_value_t = TOP_TRENDS_DEFAULT)]
        limit: usize,
    },

    /// Add to a trend's score
    TrendsBump { id: String, amount: f64 },

    /// Seed a trend (id, label, category; score starts at 0)
    TrendsSeed {
        id: String,
        label: String,
        category: String,
    },

    /// Show the gamification state (streak, mission, event log)
    Signals,

    /// Record signals; optionally log the source they came from
    SignalsAdd {
        #[arg(default_value_t = 1)]
        amount: i64,
        /// Log an event for this source id (versus/review id)
        #[arg(long)]
        source_id: Option<String>,
        /// Title of the content the signal targets
        #[arg(long, default_value = "")]
        title: String,
    },

    /// Show the demo metrics counters
    Metrics,

    /// Report whether a target is inside its vote cooldown window
    VoteStatus { target: String },

    /// Record a vote against a target
    VoteCast { target: String },

    /// Show the signup cooldown gate
    SignupStatus,

    /// Arm the signup cooldown gate
    SignupStart {
        #[arg(default_value_t = SIGNUP_COOLDOWN_SECS)]
        seconds: u64,
    },

    /// Clear the signup cooldown gate
    SignupClear,

    /// Follow feed/trend changes live (including writes from other processes)
    Watch,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("opina"))
        .unwrap_or_else(|| CoreConfig::default().data_dir)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CoreConfig::new(cli.data_dir.unwrap_or_else(default_data_dir));

    let backend = Arc::new(FileBackend::new(&config.data_dir)?);
    let bus = Arc::new(ChangeBus::new());
    let feed = FeedStore::new(backend.clone(), bus.clone());
    let trends = TrendStore::new(backend.clone(), bus.clone());
    let signals = SignalStore::new(backend.clone());
    let metrics = MetricsStore::new(backend.clone());
    let votes = VoteRegistry::new(backend.clone());
    let signup = SignupCooldown::new(backend.clone());

    match cli.command {
        Commands::Feed => print_json(&feed.load(), cli.pretty)?,
        Commands::FeedAdd {
            user,
            action,
            target,
            avatar,
        } => {
            let added = feed.add_item(NewFeedItem {
                user,
                action,
                target,
                avatar,
            });
            print_json(&added, cli.pretty)?;
        }
        Commands::Trends => print_json(&trends.load(), cli.pretty)?,
        Commands::TrendsTop { limit } => print_json(&trends.top_trends(limit), cli.pretty)?,
        Commands::TrendsBump { id, amount } => match trends.bump(&id, amount) {
            Some(updated) => print_json(&updated, cli.pretty)?,
            None => anyhow::bail!("no trend with id {id}"),
        },
        Commands::TrendsSeed {
            id,
            label,
            category,
        } => {
            let mut all = trends.load();
            all.push(Trend {
                id,
                label,
                score: 0.0,
                delta_24h: 0.0,
                category,
            });
            trends.save(&all);
            print_json(&trends.load(), cli.pretty)?;
        }
        Commands::Signals => print_json(&signals.load(), cli.pretty)?,
        Commands::SignalsAdd {
            amount,
            source_id,
            title,
        } => {
            let detail = source_id.map(|source_id| SignalEventDetail {
                source_type: SignalSource::Versus,
                source_id,
                title,
                choice_label: None,
                trend_id: None,
            });
            print_json(&signals.add_signal(amount, detail), cli.pretty)?;
        }
        Commands::Metrics => print_json(&metrics.get(), cli.pretty)?,
        Commands::VoteStatus { target } => {
            print_json(
                &json!({ "target": target, "hasVoted": votes.has_voted(&target) }),
                cli.pretty,
            )?;
        }
        Commands::VoteCast { target } => {
            votes.register_vote(&target);
            print_json(
                &json!({ "target": target, "hasVoted": true }),
                cli.pretty,
            )?;
        }
        Commands::SignupStatus => {
            print_json(
                &json!({
                    "active": signup.is_active(),
                    "secondsLeft": signup.seconds_left(),
                }),
                cli.pretty,
            )?;
        }
        Commands::SignupStart { seconds } => {
            signup.start(seconds);
            print_json(
                &json!({ "active": true, "secondsLeft": signup.seconds_left() }),
                cli.pretty,
            )?;
        }
        Commands::SignupClear => {
            signup.clear();
            print_json(&json!({ "active": false }), cli.pretty)?;
        }
        Commands::Watch => {
            let _watcher = StorageWatcher::spawn(&config.data_dir, bus.clone())?;
            let mut feed_view = FeedView::new(feed);
            let mut trend_view = TrendView::new(trends);

            eprintln!(
                "watching {} (ctrl-c to stop)",
                config.data_dir.display()
            );
            loop {
                std::thread::sleep(Duration::from_millis(200));
                if feed_view.refresh() {
                    if let Some(latest) = feed_view.items().first() {
                        println!(
                            "feed: {} {} {} ({} entries)",
                            latest.user,
                            latest.action,
                            latest.target,
                            feed_view.items().len()
                        );
                    }
                }
                if trend_view.refresh() {
                    let top: Vec<String> = trend_view
                        .top_trends()
                        .iter()
                        .map(|t| format!("{} ({:.1})", t.label, t.score))
                        .collect();
                    println!("trends: {}", top.join(", "));
                }
            }
        }
    }

    Ok(())
}
