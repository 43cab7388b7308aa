//! Benchmark harness
//!
//! Plays a series of games between an agent and rule-based opponents and
//! appends one JSON line per game to a result log.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use monopoly_bench::agents::{
    BaselineAgent, DecisionProvider, Ensemble, EnsembleConfig, LlmAgent, OllamaClient, RandomAgent,
    ReplySource,
};
use monopoly_bench::core::GameConfig;
use monopoly_bench::runner::{ResultLog, Series, SeriesConfig};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    Baseline,
    Random,
}

/// Run a series of games and log the results
#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Benchmark a decision-making agent on a property-trading board game")]
struct Args {
    /// Agent under test: baseline, random, ollama:<model> or ensemble:<model>,<model>,...
    #[arg(long, default_value = "baseline")]
    agent: String,

    /// Provider for every other seat
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Games to play
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Seats per game, including the agent
    #[arg(long)]
    players: Option<usize>,

    /// Round limit per game
    #[arg(long)]
    rounds: Option<u32>,

    /// Seed of the first game; game g uses seed + g
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with game settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-lines file to append results to
    #[arg(long, default_value = "results.jsonl")]
    log: PathBuf,

    /// Chat endpoint for ollama and ensemble agents
    #[arg(long)]
    url: Option<String>,

    /// Keep seats fixed instead of rotating them
    #[arg(long, default_value_t = false)]
    fixed_seats: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("monopoly_bench=info,simulate=info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(players) = args.players {
        game = game.with_player_count(players);
    }
    if let Some(rounds) = args.rounds {
        game = game.with_max_rounds(rounds);
    }
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    game.validate()?;

    let config = SeriesConfig::default()
        .with_games(args.games)
        .with_rotate_seats(!args.fixed_seats)
        .with_game(game.clone());

    let agent = AgentSpec::parse(&args.agent, args.url.clone())?;
    let mut series = Series::new(config)
        .with_log(ResultLog::new(&args.log))
        .entrant(move |seed| agent.build(seed));
    for _ in 1..game.player_count {
        let opponent = args.opponent;
        series = series.entrant(move |seed| -> Box<dyn DecisionProvider> {
            match opponent {
                Opponent::Baseline => Box::new(BaselineAgent::new()),
                Opponent::Random => Box::new(RandomAgent::new(seed)),
            }
        });
    }

    tracing::info!(agent = %args.agent, games = args.games, players = game.player_count, "starting series");
    let records = series.run()?;
    let summary = series.summarize(&records);

    for (entrant, wins) in summary.wins.iter().enumerate() {
        tracing::info!(
            entrant,
            wins,
            mean_net_worth = summary.mean_net_worth[entrant],
            defaulted_moves = summary.defaulted_moves[entrant],
            "entrant summary"
        );
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[derive(Clone, Debug)]
enum AgentSpec {
    Baseline,
    Random,
    Ollama { model: String, url: Option<String> },
    Ensemble { models: Vec<String>, url: Option<String> },
}

impl AgentSpec {
    fn parse(spec: &str, url: Option<String>) -> Result<Self, String> {
        match spec.split_once(':') {
            None if spec == "baseline" => Ok(Self::Baseline),
            None if spec == "random" => Ok(Self::Random),
            Some(("ollama", model)) if !model.is_empty() => Ok(Self::Ollama {
                model: model.to_string(),
                url,
            }),
            Some(("ensemble", models)) => {
                let models: Vec<String> = models
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect();
                if models.is_empty() {
                    return Err("ensemble needs at least one model".into());
                }
                Ok(Self::Ensemble { models, url })
            }
            _ => Err(format!("unknown agent '{spec}'")),
        }
    }

    fn client(model: &str, url: &Option<String>) -> Option<OllamaClient> {
        let client = match OllamaClient::with_timeout(model, Duration::from_secs(120)) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(model, "cannot build HTTP client: {e}");
                return None;
            }
        };
        Some(match url {
            Some(url) => client.with_url(url.clone()),
            None => client,
        })
    }

    /// Falls back to the baseline strategy if an HTTP client cannot be built.
    fn build(&self, seed: u64) -> Box<dyn DecisionProvider> {
        match self {
            Self::Baseline => Box::new(BaselineAgent::new()),
            Self::Random => Box::new(RandomAgent::new(seed)),
            Self::Ollama { model, url } => match Self::client(model, url) {
                Some(client) => Box::new(LlmAgent::new(client)),
                None => Box::new(BaselineAgent::new()),
            },
            Self::Ensemble { models, url } => {
                let members: Vec<Arc<dyn ReplySource>> = models
                    .iter()
                    .filter_map(|m| Self::client(m, url))
                    .map(|c| Arc::new(c) as Arc<dyn ReplySource>)
                    .collect();
                match Ensemble::new(members, EnsembleConfig::default()) {
                    Ok(ensemble) => Box::new(ensemble),
                    Err(e) => {
                        tracing::error!("cannot start ensemble: {e}");
                        Box::new(BaselineAgent::new())
                    }
                }
            }
        }
    }
}
