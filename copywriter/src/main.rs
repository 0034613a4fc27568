//! Command-line entry point for one-off and batch copy generation

use std::path::{Path, PathBuf};

use clap::Parser;
use tokio_util::sync::CancellationToken;

use copywriter::core::{PROMPT_LIBRARY, find_template};
use copywriter::{CopywriterError, CopywriterResult, GeneratorConfig};
use shared::{
    CampaignType, Customer, GenerationRequest, Persona, ProcessId, Tone, logging, process_info, process_warn,
};

/// Generate A/B campaign copy with Gemini
#[derive(Parser)]
#[command(name = "copywriter")]
#[command(about = "Generates normalized A/B marketing copy for email and SMS campaigns")]
struct Args {
    /// Prompt to send as-is
    #[arg(long, conflicts_with = "template")]
    prompt: Option<String>,

    /// Prompt library template id (see --list-templates)
    #[arg(long)]
    template: Option<String>,

    /// Print the prompt library and exit
    #[arg(long)]
    list_templates: bool,

    /// JSON file with an array of customers; runs a personalized batch
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Campaign type (image-email, text-email, sms)
    #[arg(long, default_value = "image-email")]
    campaign_type: CampaignType,

    /// Tone of voice
    #[arg(long, default_value = "empathetic")]
    tone: Tone,

    /// Brand persona
    #[arg(long, default_value = "luxury")]
    persona: Persona,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> CopywriterResult<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    ProcessId::init_copywriter();
    logging::init_tracing_with_level(Some(&args.log_level));

    if args.list_templates {
        for template in PROMPT_LIBRARY.iter() {
            println!("{:<20} {}", template.id, template.name);
        }
        return Ok(());
    }

    let prompt = resolve_prompt(&args)?;

    let config = GeneratorConfig::from_env()?;
    if !config.has_api_key() {
        process_warn!(
            ProcessId::current(),
            "⚠️ GEMINI_API_KEY is not set; generation requests will fail"
        );
    }

    let shutdown = CancellationToken::new();
    let generator = config.build_cancellable_generator(shutdown.clone())?;
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        }
    });

    logging::log_startup(ProcessId::current(), &format!("model {}", config.model));

    let output = match &args.customers {
        Some(path) => {
            let customers = load_customers(path)?;
            process_info!(
                ProcessId::current(),
                "📋 Batch of {} customer(s) from {}",
                customers.len(),
                path.display()
            );
            let results = generator
                .generate_batch(&prompt, &customers, args.campaign_type, args.tone, args.persona)
                .await?;
            serde_json::to_string_pretty(&results)?
        }
        None => {
            let request = GenerationRequest::new(prompt, args.campaign_type, args.tone, args.persona);
            let variants = generator.generate(&request).await?;
            serde_json::to_string_pretty(&variants)?
        }
    };

    println!("{}", output);
    logging::log_shutdown(ProcessId::current(), "completed");
    Ok(())
}

fn resolve_prompt(args: &Args) -> CopywriterResult<String> {
    if let Some(prompt) = &args.prompt {
        return Ok(prompt.clone());
    }
    match &args.template {
        Some(id) => find_template(id)
            .map(|template| template.text.to_string())
            .ok_or_else(|| CopywriterError::invalid_input(format!("Unknown template '{}'", id))),
        None => Err(CopywriterError::invalid_input("prompt required")),
    }
}

fn load_customers(path: &Path) -> CopywriterResult<Vec<Customer>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
