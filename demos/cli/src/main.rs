use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use vote_core::{CardConfig, PanelState, PanelStates, VoteId};
use vote_feed::parse_feed_str;
use vote_ui::build_timeline;

#[derive(Parser, Debug)]
#[command(
    name = "vote-cli",
    about = "Render a vote timeline feed as static HTML."
)]
struct Args {
    /// Path to the JSON feed file.
    #[arg(short, long)]
    input: PathBuf,

    /// Optional JSON file overriding the card configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vote ids whose panel should be rendered expanded.
    #[arg(short, long = "expanded", value_name = "VOTE_ID")]
    expanded: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("could not read feed {:?}", args.input))?;

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config {path:?}"))?;
            serde_json::from_str::<CardConfig>(&raw)
                .with_context(|| format!("invalid config {path:?}"))?
        }
        None => CardConfig::default(),
    };

    let cards = parse_feed_str(&data)?;

    let mut panels = PanelStates::default();
    for id in args.expanded {
        panels.set(VoteId::new(id), PanelState::Expanded);
    }

    info!(
        "rendering {} card(s), {} expanded",
        cards.len(),
        panels.expanded().count()
    );
    println!("{}", build_timeline(&cards, &panels, &config).to_html());

    Ok(())
}
