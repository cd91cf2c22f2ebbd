use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use tweet_gen_core::corpus::csv_file_to_training_data;
use tweet_gen_core::io::{get_filename, list_files, normalize_folder};
use tweet_gen_core::{GenError, GeneratorConfig, MarkovChain, StdRandom, TextGenerator};

const DATA_FOLDER: &str = "./data";
const DEFAULT_CORPUS: &str = "tweets";
const DEFAULT_COLUMN: usize = 2;
const MAX_COUNT: usize = 100;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	length: Option<usize>,
	seed: Option<u64>,
}

/// Query parameters for the `/v1/train` endpoint
#[derive(Deserialize)]
struct TrainQuery {
	file: Option<String>,
	column: Option<usize>,
}

#[derive(Serialize)]
struct Stats {
	corpus: String,
	tokens: usize,
	start_words: usize,
	observations: usize,
}

/// Trained chain and the corpus it came from.
///
/// Readers only hold the read lock long enough to clone the `Arc`, so
/// generation never blocks retraining. Retraining builds a new chain first
/// and only takes the write lock to swap it in.
struct SharedData {
	corpus: String,
	chain: Arc<MarkovChain>,
	config: GeneratorConfig,
}

fn error_response(e: GenError) -> HttpResponse {
	match e {
		GenError::InvalidArgument(_) => HttpResponse::BadRequest().body(e.to_string()),
		GenError::EmptyDistribution(_) => HttpResponse::Conflict().body(e.to_string()),
		_ => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

fn check_count(count: usize) -> Result<usize, GenError> {
	if count > MAX_COUNT {
		return Err(GenError::InvalidArgument(format!(
			"count must be at most {MAX_COUNT}, got {count}"
		)));
	}
	Ok(count)
}

/// Resolves a corpus name to its CSV file under `./data`.
///
/// Names are plain file stems; separators and `..` are rejected.
fn corpus_path(name: &str) -> Result<PathBuf, GenError> {
	if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
		return Err(GenError::InvalidArgument(format!("invalid corpus name '{name}'")));
	}
	Ok(normalize_folder(DATA_FOLDER).join(format!("{name}.csv")))
}

/// Trains a chain on a corpus and returns it with the corpus name.
fn train_corpus(name: &str, column: usize) -> Result<(String, MarkovChain), GenError> {
	let path = corpus_path(name)?;
	let sentences = csv_file_to_training_data(&path, column)?;
	let corpus = get_filename(&path)?;
	Ok((corpus, MarkovChain::from_sentences(sentences)?))
}

fn generate_tweets(
	chain: &MarkovChain,
	config: GeneratorConfig,
	random: StdRandom,
	count: usize,
	length: usize,
) -> Result<Vec<String>, GenError> {
	TextGenerator::with_config(chain, random, config)?.generate_many(count, length)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` tweets (at most 100) of roughly `length` characters,
/// one per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let count = match check_count(query.count.unwrap_or(1)) {
		Ok(c) => c,
		Err(e) => return error_response(e),
	};
	let length = query.length.unwrap_or(140);
	let random = match query.seed {
		Some(seed) => StdRandom::seeded(seed),
		None => StdRandom::new(),
	};

	let (chain, config) = {
		let shared_data = match data.read() {
			Ok(m) => m,
			Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
		};
		(Arc::clone(&shared_data.chain), shared_data.config.clone())
	};

	match web::block(move || generate_tweets(&chain, config, random, count, length)).await {
		Ok(Ok(tweets)) => HttpResponse::Ok().body(tweets.join("\n")),
		Ok(Err(e)) => error_response(e),
		Err(_) => HttpResponse::InternalServerError().body("Generation task failed"),
	}
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files(normalize_folder(DATA_FOLDER), "csv") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".csv", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().json(Stats {
		corpus: shared_data.corpus.clone(),
		tokens: shared_data.chain.len(),
		start_words: shared_data.chain.start_words().len(),
		observations: shared_data.chain.observations(),
	})
}

#[put("/v1/train")]
async fn put_train(data: web::Data<RwLock<SharedData>>, query: web::Query<TrainQuery>) -> impl Responder {
	let name = match &query.file {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let column = query.column.unwrap_or(DEFAULT_COLUMN);

	// Training runs outside the lock, readers keep the old chain meanwhile
	let (corpus, chain) = match web::block({
		let name = name.clone();
		move || train_corpus(&name, column)
	})
	.await
	{
		Ok(Ok(trained)) => trained,
		Ok(Err(e)) => {
			warn!("Failed to train on {name}: {e}");
			return error_response(e);
		}
		Err(_) => return HttpResponse::InternalServerError().body("Training task failed"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	info!("Trained on {corpus}: {} tokens", chain.len());
	shared_data.chain = Arc::new(chain);
	shared_data.corpus = corpus;

	HttpResponse::Ok().body("Corpus trained successfully")
}

/// Main entry point for the server.
///
/// Trains the chain on `./data/tweets.csv` when it exists, wraps it in a
/// `RwLock` and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Other corpora under `./data` can be trained with `PUT /v1/train`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let (corpus, chain) = match train_corpus(DEFAULT_CORPUS, DEFAULT_COLUMN) {
		Ok(trained) => trained,
		Err(e) => {
			error!("Starting untrained, could not load {DEFAULT_CORPUS}: {e}");
			(DEFAULT_CORPUS.to_owned(), MarkovChain::new())
		}
	};

	let shared_data = SharedData {
		corpus,
		chain: Arc::new(chain),
		config: GeneratorConfig::default(),
	};
	let shared_chain = web::Data::new(RwLock::new(shared_data));

	info!("Serving on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_chain.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_stats)
			.service(put_train)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
