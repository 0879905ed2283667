mod input;
mod seed;
mod text;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use game_core::{
    Action, DifficultyTable, DifficultyTier, Game, GameError, GameEvent, GameMode, QueryAnswer,
    generate_dungeon,
};
use log::LevelFilter;

use input::{Command, HELP, parse_command};
use seed::SeedChoice;

const MODE_HINT: &str = "Pick a mode: start <easy|normal|hard|adventurer|survival>";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG still applies
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Play a run, reading one command per line from stdin
    Play(PlayArgs),
    /// Print freshly generated dungeons for a tier
    Generate(GenerateArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum TierArg {
    Easy,
    Normal,
    Hard,
    Adventurer,
}

impl From<TierArg> for DifficultyTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Easy => DifficultyTier::Easy,
            TierArg::Normal => DifficultyTier::Normal,
            TierArg::Hard => DifficultyTier::Hard,
            TierArg::Adventurer => DifficultyTier::Adventurer,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Easy,
    Normal,
    Hard,
    Adventurer,
    Survival,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Easy => GameMode::Classic(DifficultyTier::Easy),
            ModeArg::Normal => GameMode::Classic(DifficultyTier::Normal),
            ModeArg::Hard => GameMode::Classic(DifficultyTier::Hard),
            ModeArg::Adventurer => GameMode::Classic(DifficultyTier::Adventurer),
            ModeArg::Survival => GameMode::Survival,
        }
    }
}

#[derive(Args)]
struct PlayArgs {
    /// Start immediately in this mode instead of waiting for `start <mode>`
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
    /// Run seed; a fresh one is generated when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// TOML difficulty table overriding the built-in tiers
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print events and query answers as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GenerateArgs {
    #[arg(short, long, value_enum, default_value_t = TierArg::Normal)]
    tier: TierArg,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of consecutive dungeons to print
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u64,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new().filter_level(level).parse_default_env().init();
}

fn load_table(path: Option<&Path>) -> Result<DifficultyTable> {
    let Some(path) = path else {
        return Ok(DifficultyTable::default());
    };
    DifficultyTable::load(path)
        .with_context(|| format!("Failed to load difficulty config: {}", path.display()))
}

struct Shell {
    game: Game,
    json: bool,
}

impl Shell {
    fn run(&mut self, action: Action) -> Result<()> {
        match self.game.apply(action) {
            Ok(report) => {
                if !self.json {
                    for event in &report.events {
                        println!("{}", text::event_text(event));
                    }
                    if action == Action::ChangeDifficulty {
                        println!("{MODE_HINT}");
                    }
                }
                if let Some(answer) = &report.answer {
                    self.print_answer(answer)?;
                }
            }
            Err(err) => self.print_rejection(err)?,
        }
        Ok(())
    }

    fn print_answer(&self, answer: &QueryAnswer) -> Result<()> {
        if self.json {
            let line = serde_json::to_string(answer).context("Failed to serialize answer")?;
            println!("{line}");
        } else {
            for line in text::answer_lines(answer) {
                println!("{line}");
            }
        }
        Ok(())
    }

    fn print_rejection(&self, err: GameError) -> Result<()> {
        log::debug!("action rejected: {err:?}");
        if self.json {
            let line = serde_json::to_string(&serde_json::json!({ "rejected": err.to_string() }))
                .context("Failed to serialize rejection")?;
            println!("{line}");
        } else {
            println!("Cannot do that: {err}.");
        }
        Ok(())
    }

    fn draw_map(&mut self) -> Result<()> {
        self.run(Action::MapOverviewQuery)?;
        if !self.json
            && let Some(dungeon) = self.game.dungeon()
        {
            print!("{}", text::fog_map(dungeon));
        }
        Ok(())
    }

    fn prompt(&self) -> Result<()> {
        if !self.json {
            print!("> ");
            io::stdout().flush().context("Failed to flush stdout")?;
        }
        Ok(())
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let table = load_table(args.config.as_deref())?;
    let seed = SeedChoice::resolve(args.seed);
    log::info!("run seed {} ({})", seed.value(), seed.label());

    let game = Game::new(seed.value(), table).context("Difficulty table cannot be played")?;
    let mut shell = Shell { game, json: args.json };
    if args.json {
        shell.game.set_event_sink(Box::new(|event: &GameEvent| {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(err) => log::warn!("could not serialize {event:?}: {err}"),
            }
        }));
    } else {
        println!("Seed: {} ({}). Type 'help' for commands.", seed.value(), seed.label());
    }

    match args.mode {
        Some(mode) => shell.run(Action::StartGame(mode.into()))?,
        None if !args.json => println!("{MODE_HINT}"),
        None => {}
    }

    let mut lines = io::stdin().lock().lines();
    loop {
        shell.prompt()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command from stdin")?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{HELP}"),
            Ok(Some(Command::DrawMap)) => shell.draw_map()?,
            Ok(Some(Command::Act(action))) => shell.run(action)?,
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let table = load_table(args.config.as_deref())?;
    let tier = DifficultyTier::from(args.tier);
    let settings = table.settings(tier);
    let seed = SeedChoice::resolve(args.seed);
    println!("Seed: {} ({}), tier {}", seed.value(), seed.label(), tier.name());

    for index in 0..args.count {
        let dungeon = generate_dungeon(seed.value(), index, settings)
            .with_context(|| format!("Cannot generate a {} dungeon", tier.name()))?;
        let fallback = if dungeon.used_fallback { ", fallback layout" } else { "" };
        let void = if dungeon.has_void() { ", void" } else { "" };
        println!();
        println!(
            "#{index}: {side}x{side} after {} attempt(s){fallback}{void}",
            dungeon.attempts,
            side = dungeon.side()
        );
        print!("{}", dungeon.grid.draw());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        CliCommand::Play(args) => play(args),
        CliCommand::Generate(args) => generate(args),
    }
}
