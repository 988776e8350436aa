use anyhow::Result;
use clap::{Parser, Subcommand};
use server_api::{create_value, delete_value, list_values, ApiContext};
use shared::domain::{NewValue, ValueId};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/values.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    AddValue {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    ListValues,
    RemoveValue {
        value_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = ApiContext {
        storage: Storage::new(&cli.database_url).await?,
    };

    for line in run(&ctx, cli.command).await? {
        println!("{line}");
    }

    Ok(())
}

/// Goes through the same operations as the HTTP API, so name rules match.
async fn run(ctx: &ApiContext, command: Command) -> Result<Vec<String>> {
    let lines = match command {
        Command::AddValue { name, description } => {
            let value = create_value(ctx, NewValue { name, description }).await?;
            vec![format!("created value_id={}", value.id)]
        }
        Command::ListValues => list_values(ctx)
            .await?
            .into_iter()
            .map(|value| {
                format!(
                    "{}\t{}\t{}",
                    value.id,
                    value.name,
                    value.description.unwrap_or_default()
                )
            })
            .collect(),
        Command::RemoveValue { value_id } => {
            let value = delete_value(ctx, ValueId(value_id)).await?;
            vec![format!("removed value_id={} name={}", value.id, value.name)]
        }
    };
    Ok(lines)
}
