//! Question drafting: remote prompt, line cleanup, and the per-language
//! static fallback banks.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use super::InferenceClient;
use crate::models::candidate::Language;
use crate::models::screening::QaItem;

/// Bounds for the per-session question count, inclusive.
pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 5;

/// Pre-written English screening questions used whenever generation is
/// unavailable.
pub const FALLBACK_QUESTIONS_EN: &[&str] = &[
    "What is the difference between a list and a tuple in Python?",
    "Explain how Docker helps in software deployment.",
    "Which SQL command is used to remove duplicate rows?",
    "You have experience with Pandas. How would you merge two DataFrames?",
    "What are the benefits of using Git for version control?",
    "How do you keep secrets out of application source code?",
];

/// Hindi bank, same coverage as the English one.
pub const FALLBACK_QUESTIONS_HI: &[&str] = &[
    "Python में list और tuple में क्या अंतर है?",
    "Docker सॉफ़्टवेयर परिनियोजन में किस प्रकार मदद करता है?",
    "SQL में duplicate पंक्तियाँ हटाने के लिए कौन सा command उपयोग होता है?",
    "आप दो Pandas DataFrames को कैसे merge करेंगे?",
    "Version control के लिए Git उपयोग करने के क्या लाभ हैं?",
    "आप application source code से secrets कैसे बाहर रखते हैं?",
];

fn bank_for(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => FALLBACK_QUESTIONS_EN,
        Language::Hindi => FALLBACK_QUESTIONS_HI,
        Language::Other => {
            warn!("no dedicated fallback bank for 'Other'; using the English bank");
            FALLBACK_QUESTIONS_EN
        }
    }
}

fn build_prompt(techs: &[String], language: Language, n: usize) -> String {
    format!(
        "Generate {n} {language} technical interview questions about: {}.",
        techs.join(", ")
    )
}

/// Strips list markers (numbering, dashes, dots, padding) from both ends of
/// a generated line.
fn strip_list_markers(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.'))
}

/// Splits a raw generation into at most `n` open questions, dropping lines
/// that are empty once markers are removed.
fn questions_from_output(output: &str, n: usize) -> Vec<QaItem> {
    output
        .lines()
        .map(strip_list_markers)
        .filter(|line| !line.is_empty())
        .take(n)
        .map(QaItem::open)
        .collect()
}

impl InferenceClient {
    /// Builds the screening question set for a declared tech stack.
    ///
    /// The count is drawn from `count_range` with the supplied rng, so
    /// callers control determinism. Any remote failure falls back to
    /// sampling the language's static bank without replacement.
    pub async fn generate_questions<R: Rng>(
        &self,
        techs: &[String],
        language: Language,
        count_range: RangeInclusive<usize>,
        rng: &mut R,
    ) -> Vec<QaItem> {
        let n = rng.gen_range(count_range);
        let prompt = build_prompt(techs, language, n);

        if let Some(output) = self.generate_text(&prompt).await {
            let mut items = questions_from_output(&output, n);
            if !items.is_empty() {
                if language != Language::English {
                    for item in &mut items {
                        item.question = self.translate_text(&item.question, language).await;
                    }
                }
                info!("generated {} questions from the inference service", items.len());
                return items;
            }
            warn!("generation output contained no usable lines; falling back");
        }

        let bank = bank_for(language);
        let sampled: Vec<QaItem> = bank
            .choose_multiple(rng, n.min(bank.len()))
            .map(|q| QaItem::open(*q))
            .collect();
        info!("using {} fallback questions for {language}", sampled.len());
        sampled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn offline_client() -> InferenceClient {
        InferenceClient::new(None)
    }

    fn techs() -> Vec<String> {
        vec!["Python".to_string(), "Django".to_string()]
    }

    #[test]
    fn test_build_prompt_mentions_count_language_and_stack() {
        let prompt = build_prompt(&techs(), Language::English, 4);
        assert_eq!(
            prompt,
            "Generate 4 English technical interview questions about: Python, Django."
        );
    }

    #[test]
    fn test_strip_list_markers() {
        assert_eq!(strip_list_markers("1. What is X?"), "What is X?");
        assert_eq!(strip_list_markers("- Explain Docker"), "Explain Docker");
        assert_eq!(strip_list_markers("  3 - Describe Git."), "Describe Git");
        assert_eq!(strip_list_markers("10."), "");
    }

    #[test]
    fn test_questions_from_output_cleans_and_caps() {
        let raw = "1. What is ownership?\n\n2. Explain borrowing.\n- Lifetimes?\n4. Traits?\n";
        let items = questions_from_output(raw, 3);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].question, "What is ownership?");
        assert_eq!(items[1].question, "Explain borrowing.");
        assert_eq!(items[2].question, "Lifetimes?");
    }

    #[test]
    fn test_questions_from_output_drops_marker_only_lines() {
        let items = questions_from_output("1.\n2.\nReal question?", 5);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "Real question?");
    }

    #[tokio::test]
    async fn test_fallback_count_stays_in_bounds() {
        let client = offline_client();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let items = client
                .generate_questions(
                    &techs(),
                    Language::English,
                    MIN_QUESTIONS..=MAX_QUESTIONS,
                    &mut rng,
                )
                .await;
            assert!(items.len() >= MIN_QUESTIONS, "seed {seed}: too few");
            assert!(items.len() <= MAX_QUESTIONS, "seed {seed}: too many");
        }
    }

    #[tokio::test]
    async fn test_pinned_range_fixes_the_count() {
        let client = offline_client();
        let mut rng = StdRng::seed_from_u64(3);
        let items = client
            .generate_questions(&techs(), Language::English, 4..=4, &mut rng)
            .await;
        assert_eq!(items.len(), 4);
    }

    #[tokio::test]
    async fn test_fallback_draws_from_matching_bank() {
        let client = offline_client();

        let mut rng = StdRng::seed_from_u64(7);
        let english = client
            .generate_questions(
                &techs(),
                Language::English,
                MIN_QUESTIONS..=MAX_QUESTIONS,
                &mut rng,
            )
            .await;
        for item in &english {
            assert!(FALLBACK_QUESTIONS_EN.contains(&item.question.as_str()));
        }

        let mut rng = StdRng::seed_from_u64(7);
        let hindi = client
            .generate_questions(
                &techs(),
                Language::Hindi,
                MIN_QUESTIONS..=MAX_QUESTIONS,
                &mut rng,
            )
            .await;
        for item in &hindi {
            assert!(FALLBACK_QUESTIONS_HI.contains(&item.question.as_str()));
        }
    }

    #[tokio::test]
    async fn test_fallback_never_repeats_a_question() {
        let client = offline_client();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let items = client
                .generate_questions(
                    &techs(),
                    Language::English,
                    MIN_QUESTIONS..=MAX_QUESTIONS,
                    &mut rng,
                )
                .await;
            let distinct: HashSet<&str> =
                items.iter().map(|item| item.question.as_str()).collect();
            assert_eq!(distinct.len(), items.len(), "seed {seed}: duplicate drawn");
        }
    }

    #[tokio::test]
    async fn test_other_language_uses_english_bank() {
        let client = offline_client();
        let mut rng = StdRng::seed_from_u64(11);
        let items = client
            .generate_questions(
                &techs(),
                Language::Other,
                MIN_QUESTIONS..=MAX_QUESTIONS,
                &mut rng,
            )
            .await;
        assert!(!items.is_empty());
        for item in &items {
            assert!(FALLBACK_QUESTIONS_EN.contains(&item.question.as_str()));
        }
    }

    #[tokio::test]
    async fn test_seeded_rng_is_reproducible() {
        let client = offline_client();

        let mut rng = StdRng::seed_from_u64(42);
        let first = client
            .generate_questions(
                &techs(),
                Language::English,
                MIN_QUESTIONS..=MAX_QUESTIONS,
                &mut rng,
            )
            .await;
        let mut rng = StdRng::seed_from_u64(42);
        let second = client
            .generate_questions(
                &techs(),
                Language::English,
                MIN_QUESTIONS..=MAX_QUESTIONS,
                &mut rng,
            )
            .await;

        let first: Vec<&str> = first.iter().map(|item| item.question.as_str()).collect();
        let second: Vec<&str> = second.iter().map(|item| item.question.as_str()).collect();
        assert_eq!(first, second);
    }
}
