use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use text_grammar_api::api::routes::run_server;
use text_grammar_api::config::ServiceConfig;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "HTTP service for tokenization, POS groupings and toy grammar synthesis",
    long_about = None
)]
struct Args {
    /// JSON config file; flags below override its values.
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    #[clap(long, value_parser)]
    host: Option<String>,

    #[clap(long, value_parser)]
    port: Option<u16>,

    /// Number of entries in the word frequency distribution.
    #[clap(long, value_parser)]
    top_n: Option<usize>,

    /// Keep stopwords so they reach the tagger and the grammar.
    #[clap(long, action)]
    keep_stopwords: bool,

    #[clap(long, value_parser)]
    workers: Option<usize>,

    /// Largest grammar, in rule lines, synthesized for one request.
    #[clap(long, value_parser)]
    max_grammar_rules: Option<usize>,
}

fn build_config(args: Args) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            ServiceConfig::load(path)?
        }
        None => ServiceConfig::default(),
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    if args.keep_stopwords {
        config.remove_stopwords = false;
    }
    if args.workers.is_some() {
        config.workers = args.workers;
    }
    if let Some(max_grammar_rules) = args.max_grammar_rules {
        config.max_grammar_rules = max_grammar_rules;
    }
    config.validate()?;
    Ok(config)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match build_config(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };
    run_server(config).await
}
