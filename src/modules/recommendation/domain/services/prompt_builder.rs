use crate::modules::recommendation::domain::entities::QuizAnswers;

pub const SYSTEM_PROMPT: &str = "Recommend 10-12 anime titles based on user preferences. \
Return ONLY a comma-separated list of English titles.\n\nFormat: Title1, Title2, Title3, etc.";

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn quiz(answers: &QuizAnswers) -> String {
        format!(
            "Genre: {}, Pace: {}, Era: {}, Violence: {}, Focus: {}",
            answers.vibe(),
            answers.pace(),
            answers.era(),
            answers.violence(),
            answers.focus()
        )
    }

    pub fn seeds(seed_titles: &[String]) -> String {
        format!("Recommend anime similar to: {}", seed_titles.join(", "))
    }
}
