mod commands;
mod terminal;

use commands::{CommandLine, Commands, get, inventory, traffic};
use terminal::{logging, print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let output = commands.output();

    spinner::init(!output.json && output.quiet == 0);
    logging::init(commands.verbose, commands.quiet, output.json)?;

    let config = commands.sweep_config();

    let result = match commands.command {
        Commands::Inventory { target, probe, .. } => {
            print::header("getting ready for inventory", output.quiet);
            inventory::inventory(target, probe, config, &output).await
        }
        Commands::Get { host, oid } => get::get(host, oid, &config, &output).await,
        Commands::Traffic => traffic::traffic(&output),
    };
    spinner::get_spinner().finish_and_clear();
    result
}
