use bamclust::cli;
use bamclust::commands;
use clap::Parser;
use env_logger::Env;
use log::error;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();

    let result = match args.command {
        cli::Commands::Cluster(cluster_args) => commands::cluster::run(cluster_args),
        cli::Commands::Config { config } => commands::config::run(config.as_deref()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
