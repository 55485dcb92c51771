mod config;
mod ui;

use clap::{Parser, ValueEnum};
use tictactoe_engine::{BotStrategy, GameController, GameSettings, log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use ui::{Command, HELP, parse_command, render};

#[derive(Clone, Copy, ValueEnum)]
enum BotArg {
    Random,
    Minimax,
}

impl From<BotArg> for BotStrategy {
    fn from(arg: BotArg) -> Self {
        match arg {
            BotArg::Random => BotStrategy::Random,
            BotArg::Minimax => BotStrategy::Minimax,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    /// YAML settings file, defaults to one next to the executable
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    vs_computer: bool,

    #[arg(long, value_enum)]
    bot: Option<BotArg>,

    #[arg(long)]
    delay_ms: Option<u64>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

fn apply_overrides(settings: &mut GameSettings, args: &Args) {
    if args.vs_computer {
        settings.vs_computer = true;
    }
    if let Some(bot) = args.bot {
        settings.vs_computer = true;
        settings.bot_strategy = bot.into();
    }
    if let Some(delay_ms) = args.delay_ms {
        settings.bot_delay_ms = delay_ms;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = config::get_config_manager(args.config.as_deref());
    let mut client_config = config_manager.get_config()?;

    if args.verbose {
        let prefix = (args.use_log_prefix || client_config.use_log_prefix)
            .then(|| "Console".to_string());
        logger::init_logger(prefix);
    }

    apply_overrides(&mut client_config.game, &args);
    if args.save {
        config_manager.set_config(&client_config)?;
        log!("Settings saved");
    }

    let mut controller = GameController::new(client_config.game.clone())?;
    let mut changes = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}\n", HELP);
    println!("{}", render(&controller.snapshot().await));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match command {
                    Command::Move { row, col } => {
                        controller.apply_move(row, col).await;
                    }
                    Command::Reset => controller.reset().await,
                    Command::Rename { index, name } => {
                        if let Err(e) = controller.update_player_name(index, &name).await {
                            println!("{}", e);
                            continue;
                        }
                    }
                    Command::Help => {
                        println!("{}", HELP);
                        continue;
                    }
                    Command::Quit => break,
                }
                let _ = changes.borrow_and_update();
                println!("\n{}", render(&controller.snapshot().await));
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("\n{}", render(&controller.snapshot().await));
            }
        }
    }

    Ok(())
}
