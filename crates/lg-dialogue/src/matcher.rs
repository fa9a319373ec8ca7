//! Approximate matching of free text against landmark aliases and topic keywords.
//!
//! Every alias (or keyword) is scored against the utterance and the best of
//! three signals wins:
//!
//! 1. the alias appears verbatim, on word boundaries: `1.0`
//! 2. token overlap: the share of the alias's words present in the input
//! 3. edit-distance similarity between the alias and a same-width run of input
//!    words, accepted only within [`MatcherConfig::max_divergence`]
//!
//! Filler words ("tell", "me", "about", ...) never count toward 2 or 3, and a
//! term that contains one ("built like", "tell me about") only matches verbatim.

use std::cmp::Ordering;

use lg_core::text::{normalize, tokens};
use lg_core::{EntityKey, KnowledgeStore, Topic};
use strsim::normalized_levenshtein;

use crate::config::MatcherConfig;

/// Absorbs rounding when a divergence lands exactly on the limit.
const EPSILON: f64 = 1e-9;

/// Words that carry no reference to a landmark or topic.
const FILLER_WORDS: &[&str] = &[
    "a", "about", "an", "and", "any", "anything", "are", "at", "be", "by", "can", "could",
    "did", "do", "does", "even", "for", "give", "hello", "hey", "hi", "how", "i", "in",
    "info", "information", "is", "it", "its", "know", "like", "me", "more", "my", "of",
    "on", "or", "please", "say", "show", "some", "tell", "that", "the", "their", "there",
    "this", "to", "us", "was", "we", "were", "what", "whats", "when", "where", "which",
    "who", "with", "would", "you",
];

/// Keywords per topic, in priority order.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::History,
        &[
            "history", "historical", "background", "past", "origin", "origins", "founded",
            "timeline", "namesake", "named after", "when was", "built in", "what year",
            "how old",
        ],
    ),
    (
        Topic::Architecture,
        &[
            "architecture", "architectural", "architect", "design", "designed", "style",
            "built like", "exterior", "structure", "building", "look like",
        ],
    ),
    (
        Topic::CurrentUse,
        &[
            "current use", "currently", "now", "today", "used for", "use", "purpose",
            "department", "departments", "facilities", "houses", "rooms", "spaces",
        ],
    ),
    (
        Topic::Events,
        &[
            "event", "events", "activities", "programs", "happening", "performances",
            "concerts", "clubs", "shows",
        ],
    ),
    (
        Topic::General,
        &["tell me about", "overview", "general", "summary", "what is", "who is", "basics"],
    ),
];

fn is_filler(word: &str) -> bool {
    FILLER_WORDS.contains(&word)
}

/// A ranked match of an utterance against one landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// The matched landmark.
    pub entity_key: EntityKey,
    /// Confidence in `[0, 1]`; `1.0` means the alias appeared verbatim.
    pub score: f64,
    /// The (normalized) alias that produced the score.
    pub matched_alias: String,
}

/// A normalized alias or keyword, pre-split for scoring.
#[derive(Debug, Clone)]
struct Term {
    text: String,
    padded: String,
    tokens: Vec<String>,
    verbatim_only: bool,
    fuzzy: bool,
}

impl Term {
    fn new(raw: &str, config: &MatcherConfig) -> Self {
        let text = normalize(raw);
        let tokens = tokens(&text);
        let verbatim_only = tokens.iter().any(|t| is_filler(t));
        let fuzzy = !verbatim_only && text.chars().count() >= config.min_fuzzy_len;
        Self {
            padded: format!(" {text} "),
            text,
            tokens,
            verbatim_only,
            fuzzy,
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A normalized utterance.
#[derive(Debug)]
struct Query {
    padded: String,
    content: Vec<String>,
}

impl Query {
    fn new(input: &str) -> Self {
        let text = normalize(input);
        let content = tokens(&text).into_iter().filter(|t| !is_filler(t)).collect();
        Self {
            padded: format!(" {text} "),
            content,
        }
    }

    fn is_blank(&self) -> bool {
        self.padded.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
struct IndexedAlias {
    term: Term,
    key: EntityKey,
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    index: usize,
    score: f64,
}

/// Scores utterances against the store's aliases and a fixed topic vocabulary.
///
/// Built once per store; read-only afterwards and safe to share.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: MatcherConfig,
    aliases: Vec<IndexedAlias>,
    keywords: Vec<(Topic, Vec<Term>)>,
}

impl FuzzyMatcher {
    /// Index every alias in the store.
    pub fn new(store: &KnowledgeStore, config: MatcherConfig) -> Self {
        let aliases = store
            .alias_index()
            .map(|(alias, key)| IndexedAlias {
                term: Term::new(alias, &config),
                key: key.clone(),
            })
            .collect();
        let keywords = TOPIC_KEYWORDS
            .iter()
            .map(|(topic, words)| (*topic, words.iter().map(|w| Term::new(w, &config)).collect()))
            .collect();
        Self {
            config,
            aliases,
            keywords,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Rank landmarks mentioned in `text`, best first, one candidate per landmark.
    ///
    /// Candidates below the acceptance threshold are dropped. Equal scores
    /// prefer the longer alias, then the alias indexed first.
    pub fn match_entity(&self, text: &str) -> Vec<MatchCandidate> {
        let query = Query::new(text);
        if query.is_blank() {
            return Vec::new();
        }

        let mut hits: Vec<Hit> = self
            .aliases
            .iter()
            .enumerate()
            .filter_map(|(index, alias)| {
                let score = self.score(&alias.term, &query);
                self.accepts(score).then_some(Hit { index, score })
            })
            .collect();
        hits.sort_by(|a, b| self.rank(a, b));

        let mut candidates: Vec<MatchCandidate> = Vec::new();
        for hit in hits {
            let alias = &self.aliases[hit.index];
            if candidates.iter().any(|c| c.entity_key == alias.key) {
                continue;
            }
            candidates.push(MatchCandidate {
                entity_key: alias.key.clone(),
                score: hit.score,
                matched_alias: alias.term.text.clone(),
            });
        }

        tracing::debug!(input = text, candidates = ?candidates, "entity match");
        candidates
    }

    /// The topic `text` asks about, if any keyword scores above the threshold.
    ///
    /// Equal scores go to the higher-priority topic.
    pub fn match_topic(&self, text: &str) -> Option<Topic> {
        let query = Query::new(text);
        if query.is_blank() {
            return None;
        }

        let mut best: Option<(Topic, f64)> = None;
        for (topic, terms) in &self.keywords {
            let score = terms
                .iter()
                .map(|t| self.score(t, &query))
                .fold(0.0, f64::max);
            if !self.accepts(score) {
                continue;
            }
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*topic, score)),
            }
        }

        tracing::debug!(input = text, topic = ?best, "topic match");
        best.map(|(topic, _)| topic)
    }

    fn accepts(&self, score: f64) -> bool {
        score > 0.0 && score >= self.config.acceptance_threshold
    }

    fn rank(&self, a: &Hit, b: &Hit) -> Ordering {
        let a_len = self.aliases[a.index].term.len();
        let b_len = self.aliases[b.index].term.len();
        b.score
            .total_cmp(&a.score)
            .then_with(|| b_len.cmp(&a_len))
            .then_with(|| a.index.cmp(&b.index))
    }

    fn score(&self, term: &Term, query: &Query) -> f64 {
        if term.tokens.is_empty() {
            return 0.0;
        }
        if query.padded.contains(&term.padded) {
            return 1.0;
        }
        if term.verbatim_only {
            return 0.0;
        }
        let overlap = self.overlap(term, query);
        let similarity = self.similarity(term, query);
        overlap.max(similarity)
    }

    /// Share of the term's words found among the input's content words.
    fn overlap(&self, term: &Term, query: &Query) -> f64 {
        let matched = term
            .tokens
            .iter()
            .filter(|t| query.content.contains(t))
            .count();
        matched as f64 / term.tokens.len() as f64
    }

    /// Best edit-distance similarity against any same-width run of content words.
    fn similarity(&self, term: &Term, query: &Query) -> f64 {
        let width = term.tokens.len();
        if !term.fuzzy || query.content.len() < width {
            return 0.0;
        }
        query
            .content
            .windows(width)
            .map(|window| normalized_levenshtein(&window.join(" "), &term.text))
            .filter(|sim| 1.0 - sim <= self.config.max_divergence + EPSILON)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{campus_store, store_from};
    use proptest::prelude::*;

    fn matcher() -> FuzzyMatcher {
        FuzzyMatcher::new(&campus_store(), MatcherConfig::default())
    }

    fn top(m: &FuzzyMatcher, text: &str) -> Option<(String, f64)> {
        m.match_entity(text)
            .first()
            .map(|c| (c.entity_key.to_string(), c.score))
    }

    #[test]
    fn every_alias_matches_its_landmark_exactly() {
        let store = campus_store();
        let m = FuzzyMatcher::new(&store, MatcherConfig::default());
        for (alias, key) in store.alias_index() {
            let candidates = m.match_entity(alias);
            let best = candidates.first().expect("alias should match");
            assert_eq!(&best.entity_key, key, "alias {alias:?}");
            assert_eq!(best.score, 1.0, "alias {alias:?}");
        }
    }

    #[test]
    fn alias_inside_sentence() {
        let m = matcher();
        assert_eq!(top(&m, "Tell me about EMPAC!"), Some(("empac".into(), 1.0)));
        assert_eq!(
            top(&m, "what's the story with the student union?"),
            Some(("rpi_union".into(), 1.0))
        );
    }

    #[test]
    fn single_typo_still_matches() {
        let m = matcher();
        let (key, score) = top(&m, "EMPC").unwrap();
        assert_eq!(key, "empac");
        assert!(score >= 0.45 && score < 1.0);

        let (key, _) = top(&m, "tell me about the folsm library").unwrap();
        assert_eq!(key, "folsom_library");

        let (key, _) = top(&m, "west hal").unwrap();
        assert_eq!(key, "west_hall");
    }

    #[test]
    fn partial_multiword_alias_uses_token_overlap() {
        let store = store_from(&[("north_hall", "North Hall", &[]), ("empac", "EMPAC", &[])]);
        let m = FuzzyMatcher::new(&store, MatcherConfig::default());
        let candidates = m.match_entity("the north side");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].score, 0.5);
        assert_eq!(candidates[0].matched_alias, "north hall");
    }

    #[test]
    fn short_aliases_only_match_exactly() {
        let m = matcher();
        // "wh" and "rsl" are too short for approximate matching.
        assert!(m.match_entity("wg").is_empty());
        assert!(m.match_entity("rsk").is_empty());
        assert_eq!(top(&m, "rsl"), Some(("russell_sage".into(), 1.0)));
    }

    #[test]
    fn nonsense_matches_nothing() {
        let m = matcher();
        assert!(m.match_entity("asdkfj").is_empty());
        assert!(m.match_entity("").is_empty());
        assert!(m.match_entity("?!?").is_empty());
        assert!(m.match_entity("its architecture").is_empty());
    }

    #[test]
    fn one_candidate_per_landmark_with_longest_alias() {
        let m = matcher();
        let candidates = m.match_entity("russell sage laboratory");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].matched_alias, "russell sage laboratory");
    }

    #[test]
    fn ties_prefer_longer_alias_then_index_order() {
        let store = store_from(&[
            ("north_gate", "North Gate", &[]),
            ("north_hall", "North Hall", &[]),
            ("nh", "Nh", &["northern"]),
        ]);
        let m = FuzzyMatcher::new(&store, MatcherConfig::default());
        let keys: Vec<String> = m
            .match_entity("north")
            .into_iter()
            .map(|c| c.entity_key.to_string())
            .collect();
        // "northern" is a close typo (0.625 is rejected), gate and hall tie on
        // overlap and length, so the first indexed wins.
        assert_eq!(keys, vec!["north_gate", "north_hall"]);
    }

    #[test]
    fn threshold_is_configurable() {
        let store = campus_store();
        let strict = FuzzyMatcher::new(&store, MatcherConfig::default().with_threshold(0.9));
        assert!(strict.match_entity("EMPC").is_empty());
        assert!(!strict.match_entity("EMPAC").is_empty());
    }

    #[test]
    fn topic_keywords() {
        let m = matcher();
        assert_eq!(m.match_topic("its architecture"), Some(Topic::Architecture));
        assert_eq!(m.match_topic("what's it used for today?"), Some(Topic::CurrentUse));
        assert_eq!(m.match_topic("any events coming up"), Some(Topic::Events));
        assert_eq!(m.match_topic("Tell me about EMPAC"), Some(Topic::General));
        assert_eq!(m.match_topic("asdkfj"), None);
        assert_eq!(m.match_topic("west hall"), None);
    }

    #[test]
    fn when_built_asks_for_history() {
        let m = matcher();
        assert_eq!(m.match_topic("When was EMPAC built?"), Some(Topic::History));
        assert_eq!(m.match_topic("when was west hall built"), Some(Topic::History));
        assert_eq!(m.match_topic("what year was folsom built in"), Some(Topic::History));
    }

    #[test]
    fn keywords_with_filler_words_need_every_word() {
        let m = matcher();
        // Half of "built like" or "look like" is not enough.
        assert_eq!(m.match_topic("empac built"), None);
        assert_eq!(m.match_topic("a quick look"), None);
        assert_eq!(m.match_topic("what is it built like"), Some(Topic::Architecture));
    }

    #[test]
    fn union_facility_words_ask_for_current_use() {
        let m = matcher();
        assert_eq!(m.match_topic("what facilities does the union have"), Some(Topic::CurrentUse));
        assert_eq!(m.match_topic("meeting rooms"), Some(Topic::CurrentUse));
    }

    #[test]
    fn topic_typo_tolerated() {
        assert_eq!(matcher().match_topic("the architecure"), Some(Topic::Architecture));
    }

    #[test]
    fn topic_ties_follow_priority() {
        let m = matcher();
        // "tell me about" (general) and "history" both match verbatim.
        assert_eq!(m.match_topic("tell me about its history"), Some(Topic::History));
        // "design" (architecture) and "events" both match verbatim.
        assert_eq!(m.match_topic("design events"), Some(Topic::Architecture));
    }

    proptest! {
        #[test]
        fn never_panics_and_scores_stay_in_range(input in "\\PC{0,40}") {
            let m = matcher();
            for c in m.match_entity(&input) {
                prop_assert!(c.score >= 0.45 && c.score <= 1.0);
            }
            let _ = m.match_topic(&input);
        }

        #[test]
        fn aliases_survive_surrounding_words(prefix in "[a-z]{0,6}", idx in 0usize..25) {
            let store = campus_store();
            let m = FuzzyMatcher::new(&store, MatcherConfig::default());
            let aliases: Vec<(String, EntityKey)> = store
                .alias_index()
                .map(|(a, k)| (a.to_string(), k.clone()))
                .collect();
            let (alias, key) = &aliases[idx % aliases.len()];
            let input = format!("{prefix} {alias}?");
            let candidates = m.match_entity(&input);
            prop_assert!(candidates.iter().any(|c| &c.entity_key == key && c.score == 1.0));
        }
    }
}
