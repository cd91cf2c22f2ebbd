use std::path::PathBuf;

use clap::Parser;
use log::info;

use tweet_gen_core::corpus::csv_file_to_training_data;
use tweet_gen_core::io::write_lines;
use tweet_gen_core::{GeneratorConfig, MarkovChain, StdRandom, TextGenerator};

#[derive(Parser)]
#[command(name = "tweet-gen-bot", about = "Generate tweets from a CSV file of tweets")]
struct Cli {
    /// Path to the CSV file containing the training tweets
    #[arg(long, default_value = "files/dog_feelings_tweets.csv")]
    csv: PathBuf,

    /// Column of the CSV file holding the tweet text
    #[arg(long, default_value = "2")]
    column: usize,

    /// Number of tweets to generate
    #[arg(long, default_value = "10")]
    count: usize,

    /// Approximate length of each tweet, in characters
    #[arg(long, default_value = "140")]
    length: usize,

    /// File to write the tweets to (printed to stdout if missing)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Append to the output file instead of overwriting it
    #[arg(long)]
    append: bool,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the generation settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    // Generation settings, defaults unless a config file is given
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };

    // Clean the tweets and train the chain, one sequence per sentence
    let sentences = csv_file_to_training_data(&cli.csv, cli.column)?;
    let chain = MarkovChain::from_sentences(sentences)?;
    info!(
        "Trained on {}: {} tokens, {} start words",
        cli.csv.display(),
        chain.len(),
        chain.start_words().len()
    );

    // A fixed seed replays the same tweets for the same corpus
    let random = match cli.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::new(),
    };

    let mut generator = TextGenerator::with_config(&chain, random, config)?;
    let tweets = generator.generate_many(cli.count, cli.length)?;

    match &cli.output {
        Some(path) => {
            write_lines(path, &tweets, cli.append)?;
            info!("Wrote {} tweets to {}", tweets.len(), path.display());
        }
        None => {
            for tweet in &tweets {
                println!("{}", tweet);
            }
        }
    }

    Ok(())
}
