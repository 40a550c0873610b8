//! Command dispatcher that routes parsed CLI commands to their handlers.

mod inspect;
mod show;

use anyhow::Result;

use crate::catalog::catalog;
use crate::cli::formatters::{format_asset_list, format_class_list, format_group_list};
use crate::cli::Commands;
use crate::config;

/// Route a parsed command to its handler
pub async fn dispatch_command(command: Commands, json_output: bool) -> Result<()> {
    match command {
        Commands::List { class: None, .. } => {
            print!("{}", format_class_list(json_output));
            Ok(())
        }
        Commands::List {
            class: Some(class),
            group,
        } => {
            let assets = catalog(class).assets(group.as_deref())?;
            println!("{}", format_asset_list(class, &assets, json_output));
            Ok(())
        }
        Commands::Groups { class } => {
            println!("{}", format_group_list(class, catalog(class).groups(), json_output));
            Ok(())
        }
        Commands::Show {
            class,
            asset,
            from,
            to,
            export,
            output,
        } => {
            let config = config::load_config()?;
            let request = show::ShowRequest {
                class,
                asset,
                from,
                to,
                export,
                output,
            };
            show::dispatch_show(request, &config, json_output).await
        }
        Commands::Inspect { file, full } => inspect::dispatch_inspect(&file, full),
    }
}
