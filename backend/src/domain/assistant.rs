//! Scripted housing assistant.
//!
//! A small canned question-and-answer surface: a fixed greeting, a handful
//! of quick questions, exact-match answers for those questions, and a
//! fallback reply for anything else. There is no inference and no state;
//! every reply is a pure function of the submitted text.

/// Greeting shown when a conversation opens.
pub const GREETING: &str = "Hi! I'm your housing assistant. How can I help you today?";

/// Suggested questions offered to the user verbatim.
///
/// Each entry has an exact-match answer in [`reply`], so clicking a
/// suggestion never lands on the fallback.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "What areas are available?",
    "What's the average rent?",
    "Are utilities included?",
    "Is parking available?",
];

/// Reply sent when the submitted text matches no scripted question.
pub const FALLBACK_REPLY: &str = "I'll help you find the perfect housing solution. \
     Could you please be more specific about what you're looking for?";

const SCRIPTED_ANSWERS: [(&str, &str); 4] = [
    (
        "What areas are available?",
        "We have properties available in Potomac Yard, Crystal City, and Pentagon City - \
         all convenient to Virginia Tech's Alexandria campus.",
    ),
    (
        "What's the average rent?",
        "The average rent ranges from $1,800 for studios to $3,500 for 3-bedroom units \
         in the Alexandria area.",
    ),
    (
        "Are utilities included?",
        "Utility inclusion varies by property. Most properties include water, but \
         electricity and internet are typically tenant responsibilities.",
    ),
    (
        "Is parking available?",
        "Many properties offer parking options, either included in rent or available for \
         an additional fee. Street parking is also available in some areas.",
    ),
];

/// Reply to a submitted message, or `None` when the text is blank.
///
/// Matching is exact on the trimmed text; anything unrecognised gets
/// [`FALLBACK_REPLY`].
///
/// # Examples
/// ```
/// use hearth::domain::assistant;
///
/// assert_eq!(assistant::reply("   "), None);
/// let answer = assistant::reply("Is parking available?").unwrap();
/// assert!(answer.contains("parking"));
/// ```
pub fn reply(text: &str) -> Option<&'static str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let scripted = SCRIPTED_ANSWERS
        .iter()
        .find(|(question, _)| *question == trimmed)
        .map(|(_, answer)| *answer);
    Some(scripted.unwrap_or(FALLBACK_REPLY))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_quick_question_has_a_scripted_answer() {
        for question in QUICK_QUESTIONS {
            let answer = reply(question).expect("non-blank question");
            assert_ne!(answer, FALLBACK_REPLY, "fallback for {question:?}");
        }
    }

    #[rstest]
    #[case("Do you allow pets?")]
    #[case("what areas are available?")]
    #[case("What areas are available? ...")]
    fn unscripted_text_gets_the_fallback(#[case] text: &str) {
        assert_eq!(reply(text), Some(FALLBACK_REPLY));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_text_gets_no_reply(#[case] text: &str) {
        assert_eq!(reply(text), None);
    }

    #[rstest]
    fn surrounding_whitespace_still_matches() {
        assert_eq!(
            reply("  What's the average rent?  "),
            reply("What's the average rent?")
        );
    }
}
