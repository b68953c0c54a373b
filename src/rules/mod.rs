//! Rule-based translation of natural-language utterances to shell commands.
//!
//! Three stages, first success wins: exact phrase-table lookup, templated
//! parameter extraction through the intent families, then fuzzy substring
//! matching. The whole translator is a pure function of the utterance and
//! the static tables; a miss is a normal outcome, not an error.

mod intents;
mod table;

pub use table::{PhraseEntry, PHRASE_TABLE};

/// Translate an utterance, returning `None` when no rule applies.
pub fn translate(utterance: &str) -> Option<String> {
    let normalized = utterance.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(command) = table::exact_lookup(&normalized) {
        return Some(command.to_string());
    }

    if let Some(command) = intents::apply(&normalized) {
        return Some(command);
    }

    fuzzy_match(&normalized)
}

/// Fuzzy substring pass over the non-parameterized entries.
///
/// Accepts an entry when one side contains the other and the shorter string
/// covers at least half of the longer one (char counts, so mixed-width text
/// is measured the same way it reads). Table order decides ties: the first
/// satisfying entry wins, which is why [`PHRASE_TABLE`] is declared in a
/// fixed order.
fn fuzzy_match(normalized: &str) -> Option<String> {
    let input_len = normalized.chars().count();

    for e in PHRASE_TABLE {
        if e.is_parameterized() {
            continue;
        }
        if !(normalized.contains(e.phrase) || e.phrase.contains(normalized)) {
            continue;
        }
        let phrase_len = e.phrase.chars().count();
        let (shorter, longer) = if input_len <= phrase_len {
            (input_len, phrase_len)
        } else {
            (phrase_len, input_len)
        };
        if shorter * 2 >= longer {
            return Some(e.command.to_string());
        }
    }
    None
}
