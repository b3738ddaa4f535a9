mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use form_logic::{
    AnswerMap, FormSpec, Severity, ValidationResult, build_report, can_advance, form_schema, lint,
    next_visible, parse_answers, render_json, render_text, validate,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Inspect conditional logic of form definitions",
    long_about = "Resolves question visibility, navigation and validation for a form definition and an answers snapshot"
)]
struct Cli {
    /// Log filter (e.g. `debug`, `form_logic=trace`).
    #[arg(long, global = true, env = "FORM_LOGIC_LOG", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
struct AnswersArgs {
    /// Path to a JSON object of answers keyed by question id.
    #[arg(long, value_name = "ANSWERS", conflicts_with = "answers_json")]
    answers: Option<PathBuf>,
    /// Inline JSON object of answers.
    #[arg(long, value_name = "JSON")]
    answers_json: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print which questions are shown for the given answers.
    Visibility {
        /// Path to the form JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[command(flatten)]
        answers: AnswersArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the question the renderer should show after `--from`.
    Next {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[command(flatten)]
        answers: AnswersArgs,
        /// Index of the current question; omit to start from the beginning.
        #[arg(long, value_name = "INDEX")]
        from: Option<usize>,
    },
    /// Validate a submission; hidden questions are exempt from `required`.
    Validate {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[command(flatten)]
        answers: AnswersArgs,
    },
    /// Check rule references and ids before publishing a form.
    Lint {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
    },
    /// Print the JSON schema of the form format.
    Schema,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;
    match cli.command {
        Command::Visibility {
            form,
            answers,
            format,
        } => run_visibility(&form, &answers, format),
        Command::Next {
            form,
            answers,
            from,
        } => run_next(&form, &answers, from),
        Command::Validate { form, answers } => run_validate(&form, &answers),
        Command::Lint { form } => run_lint(&form),
        Command::Schema => run_schema(),
    }
}

fn load_form(path: &Path) -> CliResult<FormSpec> {
    let contents = fs::read_to_string(path)?;
    let spec = FormSpec::from_json(&contents)?;
    debug!(
        form = %spec.id,
        questions = spec.questions.len(),
        "loaded form"
    );
    Ok(spec)
}

fn load_answers(args: &AnswersArgs) -> CliResult<AnswerMap> {
    let answers = match (&args.answers, &args.answers_json) {
        (Some(path), _) => parse_answers(&fs::read_to_string(path)?)?,
        (None, Some(inline)) => parse_answers(inline)?,
        (None, None) => AnswerMap::new(),
    };
    debug!(answers = answers.len(), "loaded answers");
    Ok(answers)
}

fn run_visibility(form: &Path, answers: &AnswersArgs, format: OutputFormat) -> CliResult<()> {
    let spec = load_form(form)?;
    let answers = load_answers(answers)?;
    let report = build_report(&spec, &answers);
    match format {
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&render_json(&report))?),
    }
    Ok(())
}

fn run_next(form: &Path, answers: &AnswersArgs, from: Option<usize>) -> CliResult<()> {
    let spec = load_form(form)?;
    let answers = load_answers(answers)?;
    let visibility = spec.visibility(&answers);

    if let Some(index) = from {
        let question = spec
            .questions
            .get(index)
            .ok_or_else(|| format!("question index {} out of range", index))?;
        can_advance(question, &answers, &visibility)?;
    }

    let next = next_visible(&spec.questions, &visibility, from);
    let payload = json!({
        "status": if next.is_some() { "need_input" } else { "complete" },
        "next_index": next,
        "next_question_id": next.map(|index| spec.questions[index].id.clone()),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_validate(form: &Path, answers: &AnswersArgs) -> CliResult<()> {
    let spec = load_form(form)?;
    let answers = load_answers(answers)?;

    let result = validate(&spec, &answers);
    println!(
        "Validation result: {}",
        if result.valid { "valid" } else { "invalid" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("validation failed".into())
    }
}

fn describe_validation(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!(
                "  {} - {} ({})",
                error.question_id, error.message, error.code
            );
        }
    }
    if !result.missing_required.is_empty() {
        println!(
            "Missing required answers: {}",
            result.missing_required.join(", ")
        );
    }
    if !result.unknown_fields.is_empty() {
        println!(
            "Unknown answer fields: {}",
            result.unknown_fields.join(", ")
        );
    }
}

fn run_lint(form: &Path) -> CliResult<()> {
    let spec = load_form(form)?;
    let issues = lint(&spec);
    if issues.is_empty() {
        println!("No rule issues found in '{}'", spec.id);
        return Ok(());
    }

    for issue in &issues {
        let label = match issue.severity() {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("{}[{}]: {}", label, issue.code(), issue);
    }

    let errors = issues
        .iter()
        .filter(|issue| issue.severity() == Severity::Error)
        .count();
    if errors > 0 {
        Err(format!("{} rule error(s) found", errors).into())
    } else {
        Ok(())
    }
}

fn run_schema() -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(&form_schema())?);
    Ok(())
}
