//! Deck building
//!
//! Turns a mode, a session's used-set and optional mood/energy targets into
//! an ordered deck. The functions here are pure: randomness comes in as a
//! `pick` closure returning an index in `0..upper`, so callers decide where
//! entropy comes from and tests can script it.

use crate::catalog::{is_icebreaker, QuestionCatalog};
use crate::classifier::QuestionClassifier;
use crate::entities::{CustomQuestion, Question, QuestionSession};
use crate::types::{GameMode, SessionMood};
use crate::value_objects::SessionConfig;

/// Filters only run on candidate sets larger than this
pub const MIN_POOL_FOR_FILTERING: usize = 5;

/// Front-of-deck slots reserved for icebreakers in the icebreaker mode
pub const ICEBREAKER_SLOTS: usize = 5;

/// Unbiased in-place Fisher–Yates shuffle.
///
/// `pick(upper)` must return a value in `0..upper`.
pub fn shuffle<T>(items: &mut [T], pick: &mut impl FnMut(usize) -> usize) {
    for i in (1..items.len()).rev() {
        let j = pick(i + 1).min(i);
        items.swap(i, j);
    }
}

/// What the caller wants a deck for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub mode: GameMode,
    pub mood: Option<SessionMood>,
    pub energy_level: Option<u8>,
}

impl SelectionCriteria {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            mood: None,
            energy_level: None,
        }
    }

    /// Take the mood from a session config (`All` means no mood filter)
    pub fn with_config(mut self, config: &SessionConfig) -> Self {
        self.mood = config.mood_filter();
        self
    }

    pub fn with_mood(mut self, mood: SessionMood) -> Self {
        self.mood = Some(mood).filter(SessionMood::is_filter);
        self
    }

    pub fn with_energy(mut self, level: u8) -> Self {
        self.energy_level = Some(level);
        self
    }
}

/// An ordered deck for one mode
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub mode: GameMode,
    pub questions: Vec<Question>,
    /// Every fresh question was used, so this deck repeats the full pool
    pub repeats: bool,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.questions.iter().map(Question::text)
    }
}

/// Catalog questions plus approved custom questions for `mode`
pub fn mode_pool(
    catalog: &QuestionCatalog,
    custom: &[CustomQuestion],
    mode: GameMode,
) -> Vec<Question> {
    catalog
        .by_mode(mode)
        .cloned()
        .chain(
            custom
                .iter()
                .filter(|c| c.approved && c.question.belongs_to(mode))
                .map(|c| c.question.clone()),
        )
        .collect()
}

/// Keep questions that fit `mood`, unless that would leave nothing
pub fn filter_by_mood(
    candidates: Vec<Question>,
    mood: SessionMood,
    classifier: &dyn QuestionClassifier,
) -> Vec<Question> {
    narrow(candidates, |q| classifier.classify(q).fits_mood(mood))
}

/// Keep questions whose energy requirement is within tolerance of `level`,
/// unless that would leave nothing
pub fn filter_by_energy(
    candidates: Vec<Question>,
    level: u8,
    classifier: &dyn QuestionClassifier,
) -> Vec<Question> {
    narrow(candidates, |q| classifier.classify(q).fits_energy(level))
}

fn narrow(candidates: Vec<Question>, keep: impl Fn(&Question) -> bool) -> Vec<Question> {
    if candidates.len() <= MIN_POOL_FOR_FILTERING {
        return candidates;
    }
    let filtered: Vec<Question> = candidates.iter().filter(|&q| keep(q)).cloned().collect();
    if filtered.is_empty() {
        candidates
    } else {
        filtered
    }
}

/// Shuffle with up to [`ICEBREAKER_SLOTS`] icebreakers forced to the front
pub fn order_icebreakers_first(
    questions: Vec<Question>,
    pick: &mut impl FnMut(usize) -> usize,
) -> Vec<Question> {
    let (mut icebreakers, mut rest): (Vec<Question>, Vec<Question>) =
        questions.into_iter().partition(|q| is_icebreaker(q.text()));

    shuffle(&mut icebreakers, pick);
    if icebreakers.len() > ICEBREAKER_SLOTS {
        rest.extend(icebreakers.drain(ICEBREAKER_SLOTS..));
    }
    shuffle(&mut rest, pick);

    icebreakers.extend(rest);
    icebreakers
}

/// Build the deck for `criteria`.
///
/// Used texts are removed, then the mood and energy filters narrow the
/// remainder without ever emptying it. When nothing fresh is left the whole
/// mode pool is dealt again and [`Deck::repeats`] is set.
pub fn build_deck(
    catalog: &QuestionCatalog,
    custom: &[CustomQuestion],
    session: &QuestionSession,
    criteria: &SelectionCriteria,
    classifier: &dyn QuestionClassifier,
    pick: &mut impl FnMut(usize) -> usize,
) -> Deck {
    let pool = mode_pool(catalog, custom, criteria.mode);

    let mut candidates: Vec<Question> = pool
        .iter()
        .filter(|q| !session.is_used(q.text()))
        .cloned()
        .collect();

    if let Some(mood) = criteria.mood.filter(SessionMood::is_filter) {
        candidates = filter_by_mood(candidates, mood, classifier);
    }
    if let Some(level) = criteria.energy_level {
        candidates = filter_by_energy(candidates, level, classifier);
    }

    if candidates.is_empty() {
        let mut questions = pool;
        shuffle(&mut questions, pick);
        return Deck {
            mode: criteria.mode,
            repeats: !questions.is_empty(),
            questions,
        };
    }

    let questions = if criteria.mode.is_icebreaker_mode() {
        order_icebreakers_first(candidates, pick)
    } else {
        shuffle(&mut candidates, pick);
        candidates
    };

    Deck {
        mode: criteria.mode,
        questions,
        repeats: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FIRST_DATE_ICEBREAKERS;
    use crate::classifier::{Classification, KeywordClassifier};
    use crate::ids::{CustomQuestionId, PlayerId, SessionId};
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;

    /// Small deterministic generator so shuffles actually move things
    fn lcg(seed: u64) -> impl FnMut(usize) -> usize {
        let mut state = seed;
        move |upper| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 33) as usize) % upper
        }
    }

    fn session() -> QuestionSession {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 4, 20, 0, 0)
            .single()
            .expect("valid timestamp");
        QuestionSession::new(SessionId::new(), start)
    }

    /// Every question fits exactly the moods listed in its text
    struct TagClassifier;

    impl QuestionClassifier for TagClassifier {
        fn classify(&self, question: &Question) -> Classification {
            let moods = SessionMood::taggable()
                .iter()
                .copied()
                .filter(|m| question.text().contains(m.display_name()))
                .collect();
            let energy_requirement = if question.text().contains("loud") { 9 } else { 5 };
            Classification {
                moods,
                energy_requirement,
            }
        }
    }

    fn numbered(prefix: &str, n: usize, mode: GameMode) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("{prefix} {i}"), mode))
            .collect()
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut lcg(7));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, sorted);
    }

    #[test]
    fn test_shuffle_with_last_index_pick_is_identity() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        shuffle(&mut items, &mut |upper| upper - 1);
        assert_eq!(items, vec!['a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_shuffle_first_index_pick_rotates() {
        let mut items = vec![1, 2, 3];
        // i=2 swaps with 0 -> [3,2,1]; i=1 swaps with 0 -> [2,3,1]
        shuffle(&mut items, &mut |_| 0);
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn test_every_pick_sequence_gives_a_distinct_permutation() {
        // 4 * 3 * 2 equally likely pick sequences must cover all 4! orders once
        let mut seen = HashSet::new();
        for a in 0..4 {
            for b in 0..3 {
                for c in 0..2 {
                    let mut script = [a, b, c].into_iter();
                    let mut items = [0, 1, 2, 3];
                    shuffle(&mut items, &mut |_| script.next().unwrap_or(0));
                    assert!(seen.insert(items), "{items:?} produced twice");
                }
            }
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_shuffle_positions_are_uniform() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        const TRIALS: usize = 40_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut counts = [[0usize; 4]; 4];

        for _ in 0..TRIALS {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut |upper| rng.gen_range(0..upper));
            for (position, item) in items.iter().enumerate() {
                counts[*item][position] += 1;
            }
        }

        let expected = TRIALS / 4;
        for (item, row) in counts.iter().enumerate() {
            for (position, count) in row.iter().enumerate() {
                assert!(
                    count.abs_diff(expected) < expected / 20,
                    "item {item} at position {position}: {count} of {TRIALS}"
                );
            }
        }
    }

    #[test]
    fn test_mode_pool_includes_only_approved_custom() {
        let catalog = QuestionCatalog::builtin();
        let at = Utc::now();
        let approved = CustomQuestion::new(
            CustomQuestionId::new(),
            Question::new("Custom group question", GameMode::GroupMode),
            PlayerId::new(1),
            at,
        );
        let pending = CustomQuestion::new(
            CustomQuestionId::new(),
            Question::new("Custom date question", GameMode::SecondDate),
            PlayerId::new(1),
            at,
        );
        let custom = vec![approved, pending];

        let group = mode_pool(&catalog, &custom, GameMode::GroupMode);
        assert!(group.iter().any(|q| q.text() == "Custom group question"));
        assert_eq!(group.len(), catalog.by_mode(GameMode::GroupMode).count() + 1);

        let second = mode_pool(&catalog, &custom, GameMode::SecondDate);
        assert!(!second.iter().any(|q| q.text() == "Custom date question"));
    }

    #[test]
    fn test_filters_skip_small_pools() {
        let candidates = numbered("Chill", 5, GameMode::GroupMode);
        let filtered = filter_by_mood(candidates.clone(), SessionMood::Wild, &TagClassifier);
        assert_eq!(filtered, candidates);
    }

    #[test]
    fn test_mood_filter_narrows_large_pools() {
        let mut candidates = numbered("Chill", 4, GameMode::GroupMode);
        candidates.extend(numbered("Wild", 3, GameMode::GroupMode));
        let filtered = filter_by_mood(candidates, SessionMood::Wild, &TagClassifier);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|q| q.text().starts_with("Wild")));
    }

    #[test]
    fn test_filters_never_empty_the_pool() {
        let candidates = numbered("Chill", 8, GameMode::GroupMode);
        let by_mood = filter_by_mood(candidates.clone(), SessionMood::Funny, &TagClassifier);
        assert_eq!(by_mood, candidates);

        let by_energy = filter_by_energy(candidates.clone(), 1, &TagClassifier);
        assert_eq!(by_energy, candidates);
    }

    #[test]
    fn test_energy_filter_keeps_within_tolerance() {
        let mut candidates = numbered("quiet", 4, GameMode::GroupMode);
        candidates.extend(numbered("loud", 3, GameMode::GroupMode));
        let filtered = filter_by_energy(candidates, 8, &TagClassifier);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|q| q.text().starts_with("loud")));
    }

    #[test]
    fn test_used_questions_are_excluded() {
        let catalog = QuestionCatalog::builtin();
        let mut session = session();
        let used: Vec<String> = catalog
            .by_mode(GameMode::SecondDate)
            .take(4)
            .map(|q| q.text().to_string())
            .collect();
        for text in &used {
            session.mark_used(text.clone());
        }

        let deck = build_deck(
            &catalog,
            &[],
            &session,
            &SelectionCriteria::new(GameMode::SecondDate),
            &KeywordClassifier,
            &mut lcg(3),
        );

        assert!(!deck.repeats);
        assert_eq!(deck.len(), catalog.by_mode(GameMode::SecondDate).count() - 4);
        assert!(deck.texts().all(|t| !used.iter().any(|u| u == t)));
    }

    #[test]
    fn test_icebreakers_lead_first_date_deck() {
        let catalog = QuestionCatalog::builtin();
        let available = catalog
            .by_mode(GameMode::FirstDate)
            .filter(|q| is_icebreaker(q.text()))
            .count();
        assert!(available > 0);

        for seed in 0..10 {
            let deck = build_deck(
                &catalog,
                &[],
                &session(),
                &SelectionCriteria::new(GameMode::FirstDate),
                &KeywordClassifier,
                &mut lcg(seed),
            );
            assert_eq!(deck.len(), 16);
            let leading = available.min(ICEBREAKER_SLOTS);
            assert!(deck
                .texts()
                .take(leading)
                .all(|t| FIRST_DATE_ICEBREAKERS.contains(&t)));
            assert!(deck.texts().skip(leading).all(|t| !is_icebreaker(t)));
        }
    }

    #[test]
    fn test_exhausted_mode_repeats_full_pool() {
        let catalog = QuestionCatalog::builtin();
        let mut session = session();
        for question in catalog.by_mode(GameMode::FirstDate) {
            session.mark_used(question.text());
        }

        let deck = build_deck(
            &catalog,
            &[],
            &session,
            &SelectionCriteria::new(GameMode::FirstDate).with_energy(5),
            &KeywordClassifier,
            &mut lcg(11),
        );

        assert!(deck.repeats);
        assert_eq!(deck.len(), 16);
        let texts: HashSet<&str> = deck.texts().collect();
        let expected: HashSet<&str> = catalog.by_mode(GameMode::FirstDate).map(Question::text).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_with_mood_all_disables_filter() {
        let criteria = SelectionCriteria::new(GameMode::GroupMode).with_mood(SessionMood::All);
        assert_eq!(criteria.mood, None);

        let config = SessionConfig::new(SessionMood::Funny, 5);
        let criteria = SelectionCriteria::new(GameMode::GroupMode).with_config(&config);
        assert_eq!(criteria.mood, Some(SessionMood::Funny));
    }

    #[test]
    fn test_mood_filtered_deck_stays_within_mode() {
        let catalog = QuestionCatalog::builtin();
        let deck = build_deck(
            &catalog,
            &[],
            &session(),
            &SelectionCriteria::new(GameMode::GroupMode).with_mood(SessionMood::Funny),
            &KeywordClassifier,
            &mut lcg(5),
        );
        assert!(!deck.is_empty());
        assert!(deck.questions.iter().all(|q| q.mode() == GameMode::GroupMode));
        assert!(deck
            .questions
            .iter()
            .all(|q| KeywordClassifier.classify(q).fits_mood(SessionMood::Funny)));
    }
}
