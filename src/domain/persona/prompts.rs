//! Prompt assembly for negotiator turns, feedback synthesis, and dialogue
//! facilitation.
//!
//! Pure functions over plain data so every prompt is unit-testable. Wording
//! is part of the product contract: the status heuristics and decode
//! fallbacks downstream assume replies shaped by these instructions.

use super::PersonaProfile;

/// Fixed seed message used to elicit each negotiator's opening statement.
pub const OPENING_SEED: &str = "Hello, I'm ready to begin the negotiation.";

/// System prompt for the feedback generation call.
pub const FEEDBACK_SYSTEM_PROMPT: &str =
    "You are a negotiation coach providing concise and actionable feedback.";

/// System prompt for the dialogue facilitator call.
pub const FACILITATOR_SYSTEM_PROMPT: &str =
    "You are an unbiased dialogue facilitator. Your goal is to de-escalate tension, promote \
     understanding, and guide the dialogue towards a constructive resolution.";

/// How many trailing transcript entries a turn prompt carries as context.
pub const CONTEXT_WINDOW: usize = 5;

/// Builds the system prompt for one AI negotiator.
pub fn negotiator_system_prompt(
    profile: &PersonaProfile,
    initial_stance: &str,
    scenario_description: &str,
) -> String {
    format!(
        "You are an AI negotiator in a simulation. Your goal is to reach a favorable agreement \
         for your side in a fair and strategic manner. Maintain your persona and objectives \
         throughout. The current scenario is: '{scenario_description}'. Your initial stance is: \
         '{initial_stance}'. Consider the full negotiation history below to inform your \
         responses. {fragment}",
        scenario_description = scenario_description,
        initial_stance = initial_stance,
        fragment = profile.prompt_fragment(),
    )
}

/// Builds the per-turn prompt for one AI negotiator.
pub fn turn_prompt(
    persona_type: &str,
    initial_stance: &str,
    context_window: &str,
    user_message: &str,
) -> String {
    format!(
        "Given the conversation context below, and your role as {persona_type} (initial stance: \
         '{initial_stance}'), respond to the user's latest statement: '{user_message}'\n\n\
         Conversation Context (recent):\n{context_window}\n\nYour response:",
    )
}

/// Prettifies a speaker id for transcript rendering ("vendor_alpha" -> "Vendor Alpha").
pub fn display_speaker(speaker_id: &str) -> String {
    speaker_id
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders transcript entries as "Speaker: message" lines.
pub fn transcript_lines<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    entries
        .into_iter()
        .map(|(speaker_id, message)| format!("{}: {}", display_speaker(speaker_id), message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the feedback prompt embedding the whole transcript and every
/// participant's role, plus the JSON shape instruction.
pub fn feedback_prompt<'a>(
    transcript: &str,
    user_persona: &str,
    participants: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
) -> String {
    let ai_roles_desc = participants
        .into_iter()
        .map(|(id, persona_type, stance)| format!("{id} ({persona_type}: {stance})"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Analyze the following negotiation transcript. The user's role was '{user_persona}'. \
         The AI opponents were: {ai_roles_desc}.\n\n\
         Negotiation Transcript:\n{transcript}\n\n\
         Please provide constructive feedback to the user on their negotiation performance, \
         considering:\n\
         1. Overall effectiveness in achieving their goals.\n\
         2. Communication style and tone.\n\
         3. Ability to adapt to AI opponents' personas.\n\
         4. Identification of missed opportunities or common pitfalls.\n\
         5. Specific actionable suggestions for improvement.\n\
         6. State the final outcome (e.g., 'Agreement Reached', 'Stalemate', 'Partial \
         Agreement').\n\
         Keep the summary concise but informative.\n\n\
         Provide feedback in a JSON format with keys: 'final_outcome', 'feedback_summary', \
         'specific_suggestions' (as a list of strings).",
    )
}

/// Builds the facilitator analysis prompt for one dialogue statement.
pub fn facilitator_prompt(speaker_id: &str, message: &str) -> String {
    format!(
        "Analyze the following statement from '{speaker_id}' in a dialogue context: \
         '{message}'. Determine its sentiment (e.g., 'positive', 'neutral', 'negative'). \
         Assign an escalation flag (True if highly escalatory, False otherwise). If escalatory \
         or negative, provide a single, short de-escalation or constructive intervention \
         suggestion. Provide the output in JSON format with keys: 'sentiment_score' (float \
         between -1.0 to 1.0), 'escalation_flag' (boolean), 'intervention' (string, or null if \
         no intervention needed).",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::persona::profiles;

    #[test]
    fn negotiator_system_prompt_embeds_scenario_stance_and_fragment() {
        let prompt = negotiator_system_prompt(
            &profiles::hardliner(),
            "We keep full mineral rights",
            "Border resource dispute",
        );
        assert!(prompt.contains("The current scenario is: 'Border resource dispute'"));
        assert!(prompt.contains("Your initial stance is: 'We keep full mineral rights'"));
        assert!(prompt.contains("You are a hardliner."));
    }

    #[test]
    fn turn_prompt_carries_context_and_latest_statement() {
        let prompt = turn_prompt(
            "compromiser",
            "open to resource sharing",
            "User: hello\nVendor Alpha: greetings",
            "Let's split the difference",
        );
        assert!(prompt.contains("your role as compromiser"));
        assert!(prompt.contains("initial stance: 'open to resource sharing'"));
        assert!(prompt.contains("latest statement: 'Let's split the difference'"));
        assert!(prompt.contains("Conversation Context (recent):\nUser: hello"));
        assert!(prompt.ends_with("Your response:"));
    }

    #[test]
    fn display_speaker_title_cases_underscored_ids() {
        assert_eq!(display_speaker("emotional_stakeholder"), "Emotional Stakeholder");
        assert_eq!(display_speaker("user"), "User");
        assert_eq!(display_speaker("beta"), "Beta");
    }

    #[test]
    fn transcript_lines_formats_speaker_message_pairs() {
        let lines = transcript_lines(vec![
            ("user", "We want access"),
            ("vendor_alpha", "Access is expensive"),
        ]);
        assert_eq!(lines, "User: We want access\nVendor Alpha: Access is expensive");
    }

    #[test]
    fn feedback_prompt_lists_all_participants() {
        let prompt = feedback_prompt(
            "User: hi",
            "Trade Minister",
            vec![
                ("alpha", "hardliner", "no concessions"),
                ("beta", "compromiser", "meet halfway"),
            ],
        );
        assert!(prompt.contains("The user's role was 'Trade Minister'"));
        assert!(prompt.contains("alpha (hardliner: no concessions), beta (compromiser: meet halfway)"));
        assert!(prompt.contains("'final_outcome', 'feedback_summary', 'specific_suggestions'"));
    }

    #[test]
    fn facilitator_prompt_names_speaker_and_keys() {
        let prompt = facilitator_prompt("delegate_two", "This is outrageous!");
        assert!(prompt.contains("statement from 'delegate_two'"));
        assert!(prompt.contains("'This is outrageous!'"));
        assert!(prompt.contains("'sentiment_score' (float between -1.0 to 1.0)"));
    }
}
