use clap::Parser;
use std::io::Read;

use text_grammar_api::freq::DEFAULT_TOP_N;
use text_grammar_api::grammar::DEFAULT_MAX_RULES;
use text_grammar_api::{AnalyzerOptions, TextAnalyzer};

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Analyze text offline and print the API response object",
    long_about = None
)]
struct Args {
    /// Text to analyze; read from stdin when omitted.
    #[clap(long, value_parser)]
    text: Option<String>,

    #[clap(long, value_parser, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    #[clap(long, action)]
    keep_stopwords: bool,

    #[clap(long, value_parser, default_value_t = DEFAULT_MAX_RULES)]
    max_grammar_rules: usize,

    /// Also print every token with its part-of-speech tag.
    #[clap(long, action)]
    show_tags: bool,

    #[clap(long, action)]
    pretty: bool,
}

fn options(args: &Args) -> Result<AnalyzerOptions, Box<dyn std::error::Error>> {
    if args.top_n == 0 {
        return Err("--top-n must be at least 1".into());
    }
    if args.max_grammar_rules == 0 {
        return Err("--max-grammar-rules must be at least 1".into());
    }
    Ok(AnalyzerOptions {
        remove_stopwords: !args.keep_stopwords,
        top_n: args.top_n,
        max_grammar_rules: args.max_grammar_rules,
    })
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = TextAnalyzer::new(options(&args)?);
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let analysis = analyzer.analyze(&text)?;

    if args.show_tags {
        for token in &analysis.tagged {
            eprintln!("{}\t{}", token.text, token.tag);
        }
    }
    let output = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{}", output);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Application error: {}", e);
        let mut current_err: Option<&(dyn std::error::Error + 'static)> = e.source();
        while let Some(source) = current_err {
            eprintln!("Caused by: {}", source);
            current_err = source.source();
        }
        std::process::exit(1);
    }
}
