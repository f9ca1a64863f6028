//! Fixed prompt templates for the feature generators.
//!
//! Wording is deliberately stable: providers cache identical prefixes, and
//! the MCQ template's JSON shape is load-bearing for the lenient parser
//! downstream.

pub const SUMMARY_SYSTEM: &str =
    "You are an expert tutor. Create clear, concise summaries for exam prep.";

pub const MCQ_SYSTEM: &str = "You generate exam-style MCQs based on provided content.";

pub const NOTES_SYSTEM: &str =
    "You create structured, exam-ready notes with headings and bullet points.";

pub const SOLVER_SYSTEM: &str =
    "You are a precise exam solver. Provide step-by-step solutions and final answers.";

pub const VISION_SYSTEM: &str =
    "You read study material from images and transcribe it faithfully.";

pub const VIDEO_GUESS_SYSTEM: &str =
    "You are an expert tutor. Infer the likely content of educational videos.";

pub fn summary_prompt(text: &str) -> String {
    format!(
        "Summarize the following study material in 6-10 bullet points. \
         Keep language simple and exam-ready.\n\n{}",
        text
    )
}

pub fn mcq_prompt(count: usize, content: &str) -> String {
    format!(
        "Generate {} multiple-choice questions (MCQs) from the content. \
         Each MCQ must include question, 4 options, and the correct answer. \
         Return ONLY valid JSON using this format:\n\
         {{\"mcqs\":[{{\"question\":\"...\",\"options\":[\"A\",\"B\",\"C\",\"D\"],\"answer\":\"...\"}}]}}\n\n\
         Content:\n{}",
        count, content
    )
}

pub fn notes_prompt(text: &str) -> String {
    format!(
        "Create detailed structured notes with headings and bullet points. \
         Cover all key concepts and make it exam-ready.\n\n{}",
        text
    )
}

pub fn solver_prompt(question: &str) -> String {
    format!(
        "Solve the following question. Provide:\n\
         1) Step-by-step solution\n\
         2) Explanation suitable for exams\n\
         3) Final answer clearly labeled\n\n\
         Question:\n{}",
        question
    )
}

pub const VISION_PROMPT: &str = "Extract all study content from this image. \
     Transcribe the text, formulas, and diagrams as plain text.";

pub fn video_guess_prompt(url: &str) -> String {
    format!(
        "The transcript for this video is unavailable. Based only on the URL, \
         describe the topic and likely content of the video so a student can \
         still study it.\n\nURL:\n{}",
        url
    )
}
