//! Property-based tests for terminator matching and tokenization.

use proptest::prelude::*;
use ucmd_core::transport::MemoryTransport;
use ucmd_core::{Config, Dispatcher, Error, Feed, MatchState, TerminatorMatcher, Tokenizer};

// =============================================================================
// STRATEGIES
// =============================================================================

fn terminator_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        Just(b"\r\n".to_vec()),
        Just(b"\n".to_vec()),
        Just(b";".to_vec()),
        prop::collection::vec(any::<u8>(), 1..4),
    ]
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn match_positions(terminator: &[u8], input: &[u8]) -> Vec<usize> {
    let mut matcher = TerminatorMatcher::new(terminator);
    input
        .iter()
        .enumerate()
        .filter(|&(_, &b)| matcher.advance(b) == MatchState::Matched)
        .map(|(i, _)| i)
        .collect()
}

// =============================================================================
// MATCHER
// =============================================================================

proptest! {
    #[test]
    fn no_match_without_terminator(
        terminator in terminator_strategy(),
        input in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(!contains(&input, &terminator));
        prop_assert!(match_positions(&terminator, &input).is_empty());
    }

    #[test]
    fn terminator_alone_matches_once_at_end(terminator in terminator_strategy()) {
        prop_assert_eq!(match_positions(&terminator, &terminator), vec![terminator.len() - 1]);
    }

    #[test]
    fn two_terminators_bound_garbage(
        terminator in terminator_strategy(),
        garbage in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        // Garbage ending in a partial terminator would swallow the closing one,
        // since a broken run restarts from zero.
        prop_assume!(!garbage.contains(&terminator[0]));
        let mut input = terminator.clone();
        input.extend_from_slice(&garbage);
        input.extend_from_slice(&terminator);

        let positions = match_positions(&terminator, &input);
        prop_assert_eq!(positions, vec![terminator.len() - 1, input.len() - 1]);
    }

    #[test]
    fn match_position_stays_in_bounds(
        terminator in terminator_strategy(),
        input in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let mut matcher = TerminatorMatcher::new(&terminator);
        for b in input {
            matcher.advance(b);
            prop_assert!(matcher.position() < terminator.len());
        }
    }
}

// =============================================================================
// TOKENIZER
// =============================================================================

proptest! {
    #[test]
    fn tokens_are_never_empty_and_never_contain_delimiters(
        line in prop::collection::vec(prop_oneof![Just(b' '), Just(b','), b'a'..=b'z'], 0..64),
    ) {
        let delimiters = b" ,";
        for token in Tokenizer::new(&line, delimiters) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.iter().all(|b| !delimiters.contains(b)));
        }
    }

    #[test]
    fn tokens_match_split_without_empties(
        line in prop::collection::vec(prop_oneof![Just(b' '), b'a'..=b'c'], 0..64),
    ) {
        let expected: Vec<&[u8]> = line.split(|&b| b == b' ').filter(|t| !t.is_empty()).collect();
        let actual: Vec<&[u8]> = Tokenizer::new(&line, b" ").collect();
        prop_assert_eq!(actual, expected);
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

proptest! {
    #[test]
    fn overlong_line_reports_buffer_full(extra in 1usize..16) {
        let mut d = Dispatcher::<MemoryTransport<64, 8>, 16, 1>::new(
            MemoryTransport::new(),
            Config::default(),
        ).unwrap();
        let line = vec![b'a'; 15 + extra];
        d.transport_mut().push_input(&line);
        d.transport_mut().push_input(b"\r\n");

        prop_assert_eq!(d.read_data(), Err(Error::BufferFull));
        prop_assert_eq!(d.pending_line().len(), 15);
        d.clear_buffer();
        prop_assert!(d.pending_line().is_empty());
    }

    #[test]
    fn buffer_never_exceeds_capacity(input in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut d = Dispatcher::<MemoryTransport<8, 8>, 8, 1>::new(
            MemoryTransport::new(),
            Config::default(),
        ).unwrap();
        for b in input {
            match d.feed(b) {
                Ok(Feed::Pending) | Ok(Feed::Dispatched(_)) => {}
                Err(Error::BufferFull) => d.clear_buffer(),
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
            prop_assert!(d.pending_line().len() <= 7);
        }
    }
}
