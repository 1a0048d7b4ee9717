//! Command-line host for the contact form pipeline
//!
//! Fills an in-memory form from arguments and drives it through the same
//! handlers a UI would call:
//! - `submit` runs one full submission and prints the resulting alert
//! - `check` runs the live per-field checks and prints each verdict

use contact_form_service::{
    config::ContactFormConfig, FormController, MemoryForm, SubmitOutcome,
};
use contact_relay_shared::REQUIRED_FIELDS;

use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse command line arguments
    let matches = create_cli().get_matches();

    // Initialize tracing
    init_tracing(
        matches
            .get_one::<String>("log-level")
            .map(String::as_str)
            .unwrap_or_default(),
    )?;

    // Load configuration
    let config = load_config(&matches)?;

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Configuration validation failed: {}", e);
        anyhow!(e)
    })?;

    match matches.subcommand() {
        Some(("submit", args)) => run_submit(&config, args).await,
        Some(("check", args)) => run_check(&config, args),
        _ => Err(anyhow!("A subcommand is required")),
    }
}

/// Initialize tracing/logging on stderr; stdout carries the alert text
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "contact_form_service={level},contact_form={level},reqwest=warn,hyper=warn"
        ))
        .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize tracing")?;

    Ok(())
}

/// Create CLI argument parser
fn create_cli() -> Command {
    let field = Arg::new("field")
        .short('f')
        .long("field")
        .value_name("KEY=VALUE")
        .help("Form field; may be repeated")
        .action(ArgAction::Append)
        .value_parser(parse_field);

    Command::new("contact-form")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Contact form submission pipeline with webhook delivery")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("webhook-url")
                .long("webhook-url")
                .value_name("URL")
                .global(true)
                .help("Webhook endpoint (overrides configuration)"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Bearer token sent to the webhook"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .global(true)
                .help("Log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .subcommand(
            Command::new("submit")
                .about("Validate and send one contact form submission")
                .arg(Arg::new("name").long("name").value_name("NAME"))
                .arg(Arg::new("email").long("email").value_name("EMAIL"))
                .arg(Arg::new("subject").long("subject").value_name("SUBJECT"))
                .arg(Arg::new("message").long("message").value_name("MESSAGE"))
                .arg(field.clone()),
        )
        .subcommand(
            Command::new("check")
                .about("Run live field checks without sending anything")
                .arg(field),
        )
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Field name is empty in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Load configuration from file and environment, then apply CLI overrides
fn load_config(matches: &ArgMatches) -> anyhow::Result<ContactFormConfig> {
    let mut config = if let Some(config_file) = matches.get_one::<String>("config") {
        info!("Loading configuration from file: {}", config_file);
        ContactFormConfig::load(Some(config_file))
            .map_err(|e| anyhow!("Failed to load configuration from file: {}", e))?
    } else {
        ContactFormConfig::from_env()
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if let Some(url) = matches.get_one::<String>("webhook-url") {
        config.webhook.url = Some(url.clone());
    }

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config.webhook.api_key = Some(api_key.clone());
    }

    Ok(config)
}

fn fields(args: &ArgMatches) -> Vec<(String, String)> {
    args.get_many::<(String, String)>("field")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

async fn run_submit(config: &ContactFormConfig, args: &ArgMatches) -> anyhow::Result<ExitCode> {
    let mut form = MemoryForm::contact();
    for name in REQUIRED_FIELDS {
        if let Some(value) = args.get_one::<String>(name) {
            form.set_value(name, value.as_str());
        }
    }
    for (name, value) in fields(args) {
        form.set_value(&name, value);
    }

    let controller = FormController::from_config(form, config)?;
    let outcome = controller.submit().await;

    let view = controller.presenter().view();
    let alert = view.lock().alert().clone();
    if alert.visible {
        let kind = alert.kind.map(|kind| kind.as_str()).unwrap_or("info");
        println!("[{}] {}", kind, alert.text);
    }

    Ok(match outcome {
        SubmitOutcome::Sent { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn run_check(config: &ContactFormConfig, args: &ArgMatches) -> anyhow::Result<ExitCode> {
    let mut form = MemoryForm::contact();
    let provided = fields(args);
    for (name, value) in &provided {
        form.set_value(name, value.as_str());
    }

    let names: Vec<String> = if provided.is_empty() {
        REQUIRED_FIELDS.iter().map(|name| name.to_string()).collect()
    } else {
        provided.into_iter().map(|(name, _)| name).collect()
    };

    let controller = FormController::from_config(form, config)?;
    let mut all_valid = true;
    for name in &names {
        let valid = controller.field_blur(name).unwrap_or(false);
        all_valid &= valid;
        println!("{}: {}", name, if valid { "ok" } else { "invalid" });
    }

    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
