use super::commands::options::{GetArgs, InitArgs, ListArgs, SetArgs};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "note-options")]
#[command(about = "Inspect and edit the option store of a notes instance")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap a new instance and create its default options
    Init(InitArgs),
    /// Print the value of an option
    Get(GetArgs),
    /// Set the value of an option, creating it as local-only if missing
    Set(SetArgs),
    /// List options
    List(ListArgs),
    /// Show database and migration status
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_with_kind() {
        let cli = Cli::try_parse_from(["note-options", "get", "leftPaneWidth", "--int"]).unwrap();
        match cli.command {
            Commands::Get(args) => {
                assert_eq!(args.name, "leftPaneWidth");
                assert!(args.int);
                assert!(!args.bool);
            }
            _ => panic!("Expected get command"),
        }
    }

    #[test]
    fn test_list_filters_conflict() {
        assert!(Cli::try_parse_from(["note-options", "list", "--synced", "--local"]).is_err());
    }
}
