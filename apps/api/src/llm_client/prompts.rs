// Prompts for the resume improvement flow.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise resume editor. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Hard rule shared by both prompts.
const FIDELITY_INSTRUCTION: &str = "\
CRITICAL: Only rephrase what the resume below already says. \
Do NOT invent employers, titles, dates, degrees, metrics or skills. \
If a field is empty in the input, leave it empty in the output.";

const OUTPUT_SHAPE: &str = r#"Respond with a JSON object of exactly this shape:
{
  "profile": {"full_name": "", "email": "", "phone": "", "location": "", "linkedin": "",
              "professional_summary": "", "skills": "", "volunteering": ""},
  "work_experience": [{"position": "", "company": "", "location": "", "start_date": "",
                       "end_date": "", "description": "", "current": false}],
  "education": [{"degree": "", "institution": "", "location": "", "graduation_date": "", "current": false}],
  "projects": [{"name": "", "description": "", "technologies": "", "link": ""}]
}
Keep skills as one comma-separated string. Join the bullets of each
work_experience description with " | "."#;

/// Rewrites the resume for clarity and impact.
pub const IMPROVE_PROMPT: &str = "\
Improve the resume below. Tighten the professional summary and start every \
experience bullet with a strong verb.

{fidelity}

RESUME:
{resume}

{output_shape}";

/// Rewrites the resume toward a specific job posting.
pub const TAILOR_PROMPT: &str = "\
Tailor the resume below to the job description. Reorder and rephrase bullets \
and skills so the most relevant experience comes first.

{fidelity}

JOB DESCRIPTION:
{job_description}

RESUME:
{resume}

{output_shape}";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(fidelity|output_shape|job_description|resume)\}")
        .expect("valid placeholder regex")
});

/// Fills the shared placeholders of a prompt template in one pass, so
/// placeholder-like text inside the caller's values is left as written.
pub fn render(template: &str, resume: &str, job_description: Option<&str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "fidelity" => FIDELITY_INSTRUCTION,
            "output_shape" => OUTPUT_SHAPE,
            "job_description" => job_description.unwrap_or_default(),
            _ => resume,
        })
        .into_owned()
}
