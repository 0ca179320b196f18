// Prompt text sent to the model

const TITLE_INSTRUCTION: &str = "Given the following text, generate a three word identifier/title. \
Remember ONLY output the three words, and literally nothing else.";

const DETAIL_INSTRUCTION: &str = "Give a detailed and technical summary of the following content:";

const CONCISE_INSTRUCTION: &str = "Write a concise summary of the following:";

/// Asks for a bare three-word title
pub fn three_word_title(text: &str) -> String {
    format!("{TITLE_INSTRUCTION}\n{text}\n\n")
}

pub fn detailed_summary(text: &str) -> String {
    format!("{DETAIL_INSTRUCTION}\n{text}\n")
}

/// Used for both the map and the reduce step
pub fn concise_summary(text: &str) -> String {
    format!("{CONCISE_INSTRUCTION}\n\n\n\"{text}\"\n\n\nCONCISE SUMMARY:")
}

pub fn is_title_prompt(prompt: &str) -> bool {
    prompt.starts_with(TITLE_INSTRUCTION)
}

pub fn is_detail_prompt(prompt: &str) -> bool {
    prompt.starts_with(DETAIL_INSTRUCTION)
}
