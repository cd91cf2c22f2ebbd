use tweet_gen_core::{GenError, MarkovChain, ScriptedRandom, StdRandom, Successor};

fn words(sentence: &str) -> Vec<String> {
	sentence.split_whitespace().map(str::to_owned).collect()
}

fn walk_all(chain: &MarkovChain, random: &mut ScriptedRandom) -> Vec<String> {
	let mut walk = chain.walk(random).unwrap();
	let mut out = Vec::new();
	while walk.has_more() {
		out.push(walk.advance(random).unwrap());
	}
	out
}

#[test]
fn test_train_records_bigrams_and_end() {
	let mut chain = MarkovChain::new();
	chain.train(["a", "b", "c"]).unwrap();

	let a = chain.successors("a").unwrap();
	assert_eq!(a.total(), 1);
	assert_eq!(a.count(&Successor::from("b")), 1);

	let b = chain.successors("b").unwrap();
	assert_eq!(b.total(), 1);
	assert_eq!(b.count(&Successor::from("c")), 1);

	let c = chain.successors("c").unwrap();
	assert_eq!(c.total(), 1);
	assert_eq!(c.count(&Successor::End), 1);

	assert_eq!(chain.start_words().total(), 1);
	assert_eq!(chain.start_words().count(&"a".to_owned()), 1);
	assert_eq!(chain.len(), 3);
	assert_eq!(chain.observations(), 3);
}

#[test]
fn test_train_empty_is_noop() {
	let mut chain = MarkovChain::new();
	chain.train(Vec::<String>::new()).unwrap();
	assert!(chain.is_empty());
	assert_eq!(chain.start_words().total(), 0);
}

#[test]
fn test_train_single_word_starts_and_ends() {
	let mut chain = MarkovChain::new();
	chain.train(["hello"]).unwrap();
	assert_eq!(chain.start_words().count(&"hello".to_owned()), 1);
	let successors = chain.successors("hello").unwrap();
	assert_eq!(successors.len(), 1);
	assert_eq!(successors.count(&Successor::End), 1);
}

#[test]
fn test_train_rejects_empty_token_atomically() {
	let mut chain = MarkovChain::new();
	let result = chain.train(["good", "", "words"]);
	assert!(matches!(result, Err(GenError::InvalidArgument(_))));
	assert!(chain.is_empty());
	assert_eq!(chain.start_words().total(), 0);
}

#[test]
fn test_repeated_sentence_walks_back_exactly() {
	let sentence = words("the quick brown fox jumps");
	let mut chain = MarkovChain::new();
	chain.train(sentence.clone()).unwrap();
	chain.train(sentence.clone()).unwrap();

	let mut random = ScriptedRandom::new(vec![0]);
	assert_eq!(walk_all(&chain, &mut random), sentence);
	// One draw for the start word, one per advance
	assert_eq!(random.draws(), sentence.len() + 1);
}

#[test]
fn test_walk_on_untrained_chain_fails() {
	let chain = MarkovChain::new();
	let mut random = ScriptedRandom::new(vec![0]);
	assert!(matches!(chain.walk(&mut random), Err(GenError::EmptyDistribution(_))));
	assert!(matches!(chain.walk_from("x"), Err(GenError::EmptyDistribution(_))));
}

#[test]
fn test_advance_when_exhausted_fails() {
	let mut chain = MarkovChain::new();
	chain.train(["alone"]).unwrap();
	let mut random = ScriptedRandom::new(vec![0]);
	let mut walk = chain.walk(&mut random).unwrap();

	assert_eq!(walk.peek(), Some("alone"));
	assert_eq!(walk.advance(&mut random).unwrap(), "alone");
	assert!(!walk.has_more());
	assert_eq!(walk.peek(), None);
	assert!(matches!(walk.advance(&mut random), Err(GenError::ExhaustedWalk)));
}

#[test]
fn test_walk_from_explicit_start() {
	let mut chain = MarkovChain::new();
	chain.train(words("i like cats")).unwrap();
	chain.train(words("dogs like me")).unwrap();

	// "like" is never a start word but has trained successors
	let mut random = ScriptedRandom::new(vec![0]);
	let mut walk = chain.walk_from("like").unwrap();
	let mut out = Vec::new();
	while walk.has_more() {
		out.push(walk.advance(&mut random).unwrap());
	}
	// "cats" sorts before "me"
	assert_eq!(out, words("like cats"));
}

#[test]
fn test_walk_from_unknown_token_fails_on_advance() {
	let mut chain = MarkovChain::new();
	chain.train(["known"]).unwrap();
	let mut random = ScriptedRandom::new(vec![0]);
	let mut walk = chain.walk_from("unknown").unwrap();
	assert!(matches!(walk.advance(&mut random), Err(GenError::EmptyDistribution(_))));
	assert_eq!(walk.peek(), Some("unknown"));
}

#[test]
fn test_successor_choice_follows_draws() {
	let mut chain = MarkovChain::new();
	chain.train(words("go left")).unwrap();
	chain.train(words("go left")).unwrap();
	chain.train(words("go right")).unwrap();

	let go = chain.successors("go").unwrap();
	assert_eq!(go.total(), 3);

	// Start draw, then successor draw: 0..2 is "left", 2 is "right"
	for (draw, expected) in [(0, "left"), (1, "left"), (2, "right")] {
		let mut random = ScriptedRandom::new(vec![0, draw, 0]);
		assert_eq!(walk_all(&chain, &mut random), vec!["go".to_owned(), expected.to_owned()]);
	}
}

#[test]
fn test_end_marker_sorts_last() {
	let mut chain = MarkovChain::new();
	chain.train(words("stop")).unwrap();
	chain.train(words("stop zzz")).unwrap();

	// Bucket 0 is the word, bucket 1 is the end marker
	let mut random = ScriptedRandom::new(vec![0, 1]);
	assert_eq!(walk_all(&chain, &mut random), words("stop"));
}

#[test]
fn test_parallel_training_matches_sequential() {
	let corpus: Vec<Vec<String>> = (0..500)
		.map(|i| words(&format!("tweet number {} is about {}", i % 7, i % 3)))
		.collect();

	let mut sequential = MarkovChain::new();
	for sentence in &corpus {
		sequential.train(sentence.clone()).unwrap();
	}
	let parallel = MarkovChain::from_sentences(corpus).unwrap();

	assert_eq!(parallel.len(), sequential.len());
	assert_eq!(parallel.observations(), sequential.observations());
	assert_eq!(parallel.start_words(), sequential.start_words());
	for token in ["tweet", "number", "is", "about", "0", "6"] {
		assert_eq!(parallel.successors(token), sequential.successors(token));
	}
}

#[test]
fn test_parallel_training_propagates_errors() {
	let corpus = vec![words("fine sentence"), vec!["bad".to_owned(), String::new()]];
	assert!(matches!(
		MarkovChain::from_sentences(corpus),
		Err(GenError::InvalidArgument(_))
	));
	assert!(MarkovChain::from_sentences(Vec::new()).unwrap().is_empty());
}

#[test]
fn test_every_walk_terminates() {
	let mut chain = MarkovChain::new();
	chain.train(words("a b a b c")).unwrap();
	chain.train(words("b a")).unwrap();
	let mut random = StdRandom::seeded(7);
	for _ in 0..100 {
		let mut walk = chain.walk(&mut random).unwrap();
		let mut steps = 0;
		while walk.has_more() {
			walk.advance(&mut random).unwrap();
			steps += 1;
			assert!(steps < 10_000);
		}
	}
}
