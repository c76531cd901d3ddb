mod commands;
mod terminal;

use commands::{CommandLine, Commands, ping, sweep};
use darkly_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: Config = commands.config();
    let listen_for_keys: bool = !commands.no_input;
    print::banner(&cfg);

    let outcome = match commands.command {
        Commands::Ping(args) => {
            print::header("starting ping", &cfg);
            ping::ping(args, &cfg, listen_for_keys).await
        }
        Commands::Sweep(args) => {
            print::header("getting ready for sweep", &cfg);
            sweep::sweep(args, &cfg, listen_for_keys).await
        }
    };

    print::end_of_program(&cfg);
    outcome
}
