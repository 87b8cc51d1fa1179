use crate::demo::{
    run_demo, run_prioritize, run_role_score, DemoArgs, PrioritizeArgs, RoleScoreArgs,
};
use crate::server;
use ai_assessment::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AI Transformation Assessment",
    about = "Score roles, AI adoption, and transformation priorities from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank the roles of an exported assessment and print the report
    Prioritize(PrioritizeArgs),
    /// Score a single role from 1-5 ratings
    RoleScore(RoleScoreArgs),
    /// Run a sample assessment end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Prioritize(args) => run_prioritize(args).await,
        Command::RoleScore(args) => run_role_score(args),
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["ai-assessment-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn role_score_rejects_out_of_range_ratings() {
        assert!(Cli::try_parse_from(["ai-assessment-api", "role-score", "--time-savings", "7"]).is_err());
        let cli = Cli::try_parse_from(["ai-assessment-api", "role-score", "--time-savings", "4"])
            .expect("parses");
        match cli.command {
            Some(Command::RoleScore(args)) => assert_eq!(args.time_savings, Some(4)),
            other => panic!("expected role-score, got {other:?}"),
        }
    }
}
