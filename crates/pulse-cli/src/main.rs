use clap::Parser;
use pulse_cli::config::{Cli, Command};
use pulse_cli::{decode, describe, encode, EventSpec};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = cli.subscriber().try_init()?;

    match cli.command {
        Command::Encode {
            key,
            count,
            duration,
            timestamp,
            attributes,
            transient,
            format,
        } => {
            let event = EventSpec {
                key,
                count,
                duration,
                timestamp,
                attributes,
                transient,
            }
            .build();
            tracing::info!(%event, "Built event");
            println!("{}", encode(&event, format)?);
        }

        Command::Decode { input, format } => {
            let event = decode(&input, format)?;
            println!("{}", describe(&event));
        }
    }

    Ok(())
}
