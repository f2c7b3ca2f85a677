// Command line front end for bilingual insurance form extraction

use clap::{Parser, Subcommand};
use log::{debug, error};
use patra::{
    models::{ExtractionConfig, ExtractionResult, OcrSpan},
    processing::SpanClassifier,
    templates::persist,
    validation::NameValidator,
    DocumentExtraction, FormError, FormExtractor, TemplateChoice, TemplateStore, Verifier,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const DEFAULT_TEMPLATE_DIR: &str = "templates";

#[derive(Parser)]
#[command(
    name = "patra",
    version,
    about = "Extract fields from OCR'd Nepali/English insurance forms"
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract template fields from OCR span files (one file per page)
    Extract {
        #[arg(long = "spans", required = true, num_args = 1..)]
        spans: Vec<PathBuf>,
        /// Template directory; the built-in templates are used when omitted
        #[arg(long)]
        templates: Option<PathBuf>,
        /// Template name; auto-detected when omitted
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also run the verification checks
        #[arg(long)]
        verify: bool,
    },
    /// Verify a previously written extraction
    Verify {
        #[arg(long)]
        extraction: PathBuf,
    },
    /// Manage templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// Classify spans against the insurance form catalog
    Classify {
        #[arg(long = "spans", required = true, num_args = 1..)]
        spans: Vec<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Compare a name as read from two documents
    CompareNames {
        first: String,
        second: String,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum TemplateAction {
    List {
        #[arg(long)]
        templates: Option<PathBuf>,
    },
    Show {
        name: String,
        #[arg(long)]
        templates: Option<PathBuf>,
    },
    /// Find the template field whose label best matches a piece of text
    Match {
        template: String,
        text: String,
        #[arg(long)]
        templates: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Save a template from a JSON array of field definitions
    Save {
        name: String,
        #[arg(long)]
        fields: PathBuf,
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), FormError> {
    match command {
        Command::Extract {
            spans,
            templates,
            template,
            config,
            verify,
        } => {
            let config = load_config(config.as_deref())?;
            let store = open_store(templates.as_deref(), &config)?;
            let pages = read_pages(&spans)?;
            let choice = match template {
                Some(name) => TemplateChoice::Named(name),
                None => TemplateChoice::Auto,
            };

            let extractor = FormExtractor::new(Arc::new(store), config);
            if verify {
                print_json(&extractor.extract_and_verify(&pages, &choice)?)
            } else {
                print_json(&extractor.extract(&pages, &choice)?)
            }
        }
        Command::Verify { extraction } => {
            let fields = read_extraction(&extraction)?;
            print_json(&Verifier::run_all_checks(&fields))
        }
        Command::Templates { action } => run_templates(action),
        Command::Classify { spans, config } => {
            let config = load_config(config.as_deref())?;
            let spans: Vec<OcrSpan> = read_pages(&spans)?.into_iter().flatten().collect();
            let classifier = SpanClassifier::new(config.label_threshold);
            print_json(&classifier.classify(&spans))
        }
        Command::CompareNames { first, second, config } => {
            let config = load_config(config.as_deref())?;
            print_json(&NameValidator::compare(&first, &second, config.name_match_threshold))
        }
    }
}

fn run_templates(action: TemplateAction) -> Result<(), FormError> {
    let config = ExtractionConfig::default();
    match action {
        TemplateAction::List { templates } => {
            let store = open_store(templates.as_deref(), &config)?;
            for name in store.list_templates() {
                println!("{}", name);
            }
            Ok(())
        }
        TemplateAction::Show { name, templates } => {
            let store = open_store(templates.as_deref(), &config)?;
            let template = store
                .get_template(&name)
                .ok_or(FormError::TemplateNotFound(name))?;
            print_json(&template)
        }
        TemplateAction::Match {
            template,
            text,
            templates,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let store = open_store(templates.as_deref(), &config)?;
            if store.get_template(&template).is_none() {
                return Err(FormError::TemplateNotFound(template));
            }
            match store.match_field(&text, &template, config.field_match_threshold) {
                Some(found) => println!(
                    "{} (label '{}', score {:.1})",
                    found.field.name, found.matched_label, found.score
                ),
                None => println!("No field matched"),
            }
            Ok(())
        }
        TemplateAction::Save {
            name,
            fields,
            templates,
        } => {
            let dir = templates.unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
            let store = persist::load_dir(&dir)?;
            let template = store.save_template_json(&name, &fs::read_to_string(&fields)?)?;
            let path = persist::write_template(&dir, &template)?;
            println!("Saved template '{}' to {}", name, path.display());
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ExtractionConfig, FormError> {
    match path {
        Some(path) => ExtractionConfig::from_json_file(path),
        None => Ok(ExtractionConfig::default()),
    }
}

fn open_store(dir: Option<&Path>, config: &ExtractionConfig) -> Result<TemplateStore, FormError> {
    match dir {
        Some(dir) => {
            let store = TemplateStore::with_config(config.clone());
            let loaded = persist::load_into(&store, dir)?;
            debug!("Loaded {} templates from {:?}", loaded, dir);
            Ok(store)
        }
        None => Ok(TemplateStore::with_builtin_config(config.clone())),
    }
}

fn read_pages(paths: &[PathBuf]) -> Result<Vec<Vec<OcrSpan>>, FormError> {
    paths
        .iter()
        .map(|path| {
            let json = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        })
        .collect()
}

/// Accepts either a bare field map or the output of `patra extract`.
fn read_extraction(path: &Path) -> Result<ExtractionResult, FormError> {
    let json = fs::read_to_string(path)?;
    match serde_json::from_str::<DocumentExtraction>(&json) {
        Ok(document) => Ok(document.fields),
        Err(_) => Ok(serde_json::from_str(&json)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), FormError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
