//! Turns raw tweets into training sentences.
//!
//! A tweet is stripped of URLs, split into sentences on punctuation, and each
//! sentence is split into lowercase words. Words containing anything other
//! than ASCII letters, digits, `_` or `'` are dropped.

use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::error::Result;
use crate::io::read_file;

/// Punctuation marks that separate sentences.
pub const PUNCTUATION: [char; 4] = ['.', '?', '!', ';'];

// Should not panic, the pattern is a valid literal
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bhttp\S*").unwrap());

/// Deletes every URL-like word (anything starting with `http`).
pub fn remove_urls(text: &str) -> String {
	URL_REGEX.replace_all(text, "").into_owned()
}

/// Trims and lowercases a word.
///
/// Returns `None` if the result is empty or contains a character other than
/// an ASCII letter, a digit, `_` or `'`.
pub fn clean_word(word: &str) -> Option<String> {
	let cleaned = word.trim().to_lowercase();
	let valid = cleaned
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'');
	if cleaned.is_empty() || !valid {
		return None;
	}
	Some(cleaned)
}

/// Replaces every punctuation mark with a period.
pub fn replace_punctuation(tweet: &str) -> String {
	tweet.replace(PUNCTUATION, ".")
}

/// Splits a tweet into trimmed, non-empty sentences without their punctuation.
pub fn sentence_split(tweet: &str) -> Vec<String> {
	replace_punctuation(tweet)
		.split('.')
		.map(str::trim)
		.filter(|sentence| !sentence.is_empty())
		.map(str::to_owned)
		.collect()
}

/// Splits a sentence on spaces and keeps the words that clean successfully.
///
/// Punctuation inside a word becomes a space, so `"hi!"` is kept as `"hi"`
/// while `"a.b"` is dropped.
pub fn parse_and_clean_sentence(sentence: &str) -> Vec<String> {
	sentence
		.split(' ')
		.filter_map(|word| clean_word(&word.replace(PUNCTUATION, " ")))
		.collect()
}

/// Removes URLs, splits into sentences and cleans each sentence.
///
/// Sentences left without any valid word are dropped.
pub fn parse_and_clean_tweet(tweet: &str) -> Vec<Vec<String>> {
	sentence_split(&remove_urls(tweet))
		.iter()
		.map(|sentence| parse_and_clean_sentence(sentence))
		.filter(|words| !words.is_empty())
		.collect()
}

/// Returns the `column`-th comma separated field of a CSV line.
///
/// Quoting is not supported. Returns `None` if the line has no such column.
pub fn extract_column(line: &str, column: usize) -> Option<&str> {
	line.split(',').nth(column)
}

/// Reads the tweet column of every line of a CSV file.
///
/// Lines without the requested column are skipped.
pub fn csv_file_to_tweets<P: AsRef<Path>>(path: P, column: usize) -> Result<Vec<String>> {
	let tweets = read_file(path)?
		.iter()
		.filter_map(|line| extract_column(line, column))
		.map(str::to_owned)
		.collect();
	Ok(tweets)
}

/// Reads a CSV file of tweets and returns its cleaned sentences.
pub fn csv_file_to_training_data<P: AsRef<Path>>(path: P, column: usize) -> Result<Vec<Vec<String>>> {
	let path = path.as_ref();
	let tweets = csv_file_to_tweets(path, column)?;
	let sentences: Vec<Vec<String>> = tweets
		.iter()
		.flat_map(|tweet| parse_and_clean_tweet(tweet))
		.collect();

	debug!(
		"{}: {} tweets, {} sentences",
		path.display(),
		tweets.len(),
		sentences.len()
	);
	Ok(sentences)
}
