//! Support-intent classification.
//!
//! A message is a support request when its lowercased text contains any of
//! the trigger phrases below as a plain substring. Matching is not
//! word-bounded: "i'm tiredness" still matches "i'm tired".

use std::sync::LazyLock;

use regex::Regex;

/// Phrases that route a message to the coaching agent (English and French).
///
/// Typographic apostrophes are kept as-is; "i’m sad" and "i'm sad" are
/// distinct entries.
#[rustfmt::skip]
pub const TRIGGER_PHRASES: &[&str] = &[
    // English
    "i'm tired", "i feel tired", "so tired", "i'm exhausted", "i feel exhausted",
    "i feel down", "i'm discouraged", "i feel discouraged", "i feel lost",
    "i'm lost", "i can't anymore", "i give up", "i feel stuck",
    "no motivation", "i have no motivation", "i lost motivation",
    "i'm unmotivated", "i feel empty", "i feel hopeless", "i'm hopeless",
    "i feel useless", "i'm stressed", "i'm overwhelmed", "i feel overwhelmed",
    "i'm anxious", "i feel anxious", "i panic", "i feel panic",
    "i feel sad", "i’m sad", "i'm depressed", "i feel depressed",
    "i need support", "i need help", "help me", "please help me",
    "i can't handle this", "i don't know what to do",
    "everything is too much", "i feel weak", "i feel like crying",
    "i'm burned out", "burned out", "i want to quit",
    "i feel pressure", "i'm not okay", "i'm not fine",
    // Casual English
    "i'm done", "i'm so done", "mentally drained", "i’m drained",
    "life is hard", "struggling", "i can't fight anymore",
    "i fail", "i keep failing", "nothing works",
    // French
    "je suis fatigué", "je suis fatiguée", "trop fatigué", "épuisé", "épuisée",
    "je suis épuisé", "je suis épuisée", "je n’en peux plus",
    "j’en peux plus", "c’est trop", "c’est dur", "je suis découragé",
    "je suis découragée", "je me sens perdu", "je me sens perdue",
    "je suis perdu", "je suis perdue", "je me sens vide",
    "je suis stressé", "je suis stressée", "je suis dépassé",
    "je suis dépassée", "je suis triste", "je me sens triste",
    "je suis anxieux", "je suis anxieuse", "je panique",
    "je n’ai plus de motivation", "pas de motivation",
    "j’ai perdu la motivation", "je veux abandonner",
    "je baisse les bras", "j'abandonne", "j’ai peur",
    "je ne vais pas bien", "ça ne va pas", "aidez moi",
    "j’ai besoin d’aide", "aide moi", "s'il vous plaît aidez moi",
    "je ne sais plus quoi faire", "je me sens inutile",
    "je suis à bout", "ça suffit", "marre de tout",
    "je craque", "je pleure", "envie de pleurer",
    "je suis en burn out", "burnout", "trop de pression",
    "je n’y arrive pas", "rien ne marche", "je suis perdu mentalement",
];

/// All trigger phrases compiled into one alternation of escaped literals.
static TRIGGER_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternation = TRIGGER_PHRASES
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).ok()
});

/// Stateless support-intent classifier.
pub struct TriggerClassifier;

impl TriggerClassifier {
    /// Whether `text` expresses a need for emotional support.
    pub fn is_support_intent(text: &str) -> bool {
        let lowered = text.to_lowercase();
        match TRIGGER_PATTERN.as_ref() {
            Some(pattern) => pattern.is_match(&lowered),
            None => TRIGGER_PHRASES.iter().any(|p| lowered.contains(p)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_compiles() {
        assert!(TRIGGER_PATTERN.is_some());
    }

    #[test]
    fn test_every_phrase_matches_embedded_mid_word() {
        for phrase in TRIGGER_PHRASES {
            let text = format!("xx{phrase}yy and more");
            assert!(
                TriggerClassifier::is_support_intent(&text),
                "phrase not matched: {phrase}"
            );
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(TriggerClassifier::is_support_intent("Honestly I'M TIRED of this"));
        assert!(TriggerClassifier::is_support_intent("JE SUIS ÉPUISÉE"));
    }

    #[test]
    fn test_substring_not_word_boundary() {
        assert!(TriggerClassifier::is_support_intent("the burnouts are real"));
        assert!(TriggerClassifier::is_support_intent("unstruggling"));
    }

    #[test]
    fn test_informational_questions_do_not_match() {
        assert!(!TriggerClassifier::is_support_intent("What is the capital of France?"));
        assert!(!TriggerClassifier::is_support_intent("Explain ownership in Rust"));
        assert!(!TriggerClassifier::is_support_intent(""));
    }

    #[test]
    fn test_typographic_apostrophe_variants_are_distinct() {
        // "i’m sad" is listed with a typographic apostrophe only
        assert!(TriggerClassifier::is_support_intent("i’m sad today"));
        assert!(!TriggerClassifier::is_support_intent("i'm sad today"));
    }
}
