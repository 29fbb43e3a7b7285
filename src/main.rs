use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use agent_emailer::compose::{compose_url, inquiry_subject, EmailClient};
use agent_emailer::config::Config;
use agent_emailer::extract::agent::MissingEmailPolicy;
use agent_emailer::history::{ContactEvent, ContactHistory, ContactType, JsonFileHistory};
use agent_emailer::infra::page_source::{FilePageSource, HttpPageSource, PageSource};
use agent_emailer::sites::{require_handler, supported_sites};
use agent_emailer::{extract, logging, Page};

#[derive(Parser)]
#[command(name = "agent_emailer")]
#[command(about = "Find the listing agent on a property page and draft an inquiry email")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the property address and agent contact from a listing page
    Extract {
        /// URL of the listing page
        #[arg(long)]
        url: String,
        /// Saved HTML of the page; fetched from the URL when omitted
        #[arg(long)]
        html: Option<PathBuf>,
        /// Use the single-pass agent extractor instead of per-field cascades
        #[arg(long)]
        combined: bool,
        /// With --combined, put a placeholder email when only a name was found
        #[arg(long, requires = "combined")]
        placeholder_email: bool,
    },
    /// List supported listing sites
    Sites,
    /// Manage email templates
    Templates {
        #[command(subcommand)]
        command: TemplateCommand,
    },
    /// Draft an inquiry to the listing agent and record the contact
    Compose {
        #[arg(long)]
        url: String,
        #[arg(long)]
        html: Option<PathBuf>,
        /// Template id; the default template when omitted
        #[arg(long)]
        template: Option<String>,
        /// Email client override: native or gmail
        #[arg(long)]
        client: Option<EmailClient>,
        /// Print the email body instead of a compose URL
        #[arg(long)]
        copy: bool,
    },
    /// Inspect the contacted-properties history
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// All templates, default first
    List,
    /// Print one template's content
    Show { id: String },
    /// Add a template; the first one in an empty library becomes the default
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        content: TemplateContent,
    },
    /// Replace a template's name and content
    Edit {
        id: String,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        content: TemplateContent,
    },
    /// Delete a template other than the default
    Delete { id: String },
    /// Make a template the default
    Default { id: String },
    /// Restore the built-in Standard Inquiry as the only template
    Reset,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct TemplateContent {
    /// Template body with {{placeholders}}
    #[arg(long)]
    content: Option<String>,
    /// Read the template body from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl TemplateContent {
    fn read(self) -> anyhow::Result<String> {
        match (self.content, self.file) {
            (Some(content), _) => Ok(content),
            (None, Some(path)) => std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template file {}", path.display())),
            (None, None) => bail!("Template content is required"),
        }
    }
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// All contacted properties, most recent first
    List,
    /// One property's entry
    Show { address: String },
    /// Forget one property
    Remove { address: String },
    /// Forget everything
    Clear,
}

async fn load_page(url: &str, html: Option<PathBuf>) -> anyhow::Result<Page> {
    let source: Box<dyn PageSource> = match html {
        Some(path) => Box::new(FilePageSource::new(path)),
        None => Box::new(HttpPageSource::new()),
    };
    source
        .load(url)
        .await
        .with_context(|| format!("Error connecting to page {url}"))
}

async fn run_extract(url: &str, html: Option<PathBuf>, combined: bool, placeholder_email: bool) -> anyhow::Result<()> {
    let page = load_page(url, html).await?;

    if combined {
        let handler = require_handler(url)?;
        let policy = if placeholder_email {
            MissingEmailPolicy::Placeholder
        } else {
            MissingEmailPolicy::Absent
        };
        let agent = handler.agent_info(&page, policy);
        let output = serde_json::json!({
            "propertyAddress": handler.property_address(&page),
            "agentName": agent.name,
            "agentEmail": agent.email,
            "agentPhone": agent.phone,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let response = extract(&page, Some(url));
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_compose(
    config: &Config,
    url: &str,
    html: Option<PathBuf>,
    template_id: Option<String>,
    client: Option<EmailClient>,
    copy: bool,
) -> anyhow::Result<()> {
    if !config.profile.is_complete() {
        bail!("Profile incomplete! Fill in full_name, phone_number and email under [profile] in the config file.");
    }

    let page = load_page(url, html).await?;
    let response = extract(&page, Some(url));
    if !response.is_supported() {
        bail!("Please navigate to a supported listing page to use this tool.");
    }
    let listing = response.result;
    let Some(address) = listing.property_address.clone() else {
        bail!("No property details found. Make sure you're on a property listing page.");
    };

    let library = config.template_library()?;
    let template = match template_id.as_deref() {
        Some(id) => library.find(id).with_context(|| format!("No template with id '{id}'"))?,
        None => library.default_template().context("No templates available")?,
    };
    let body = template.render(&listing, &config.profile);

    let contact_type = if copy {
        println!("Subject: {}\n\n{}", inquiry_subject(&address), body);
        ContactType::Copied
    } else {
        let client = client.unwrap_or(config.email.client);
        let compose = compose_url(client, listing.agent_email.as_deref(), &address, &body)?;
        info!(%client, "Compose URL ready");
        println!("{compose}");
        ContactType::Sent
    };

    let mut history = JsonFileHistory::open(&config.history.path)?;
    let record = history.record(ContactEvent {
        address: &address,
        agent: listing.agent_name.as_deref().unwrap_or_default(),
        url,
        contact_type,
        at: Utc::now(),
    })?;
    if record.times_contacted > 1 {
        warn!(times = record.times_contacted, "This property has been contacted before");
    }
    Ok(())
}

fn run_templates(config: &Config, command: TemplateCommand) -> anyhow::Result<()> {
    let mut library = config.template_library()?;
    match command {
        TemplateCommand::List => {
            if library.is_empty() {
                println!("No templates saved in {}", config.template_store.path.display());
            }
            for template in library.sorted() {
                let marker = if template.is_default { " (Default)" } else { "" };
                println!("{}\t{}{}", template.id, template.name, marker);
            }
            return Ok(());
        }
        TemplateCommand::Show { id } => {
            let template = library.find(&id).with_context(|| format!("No template with id '{id}'"))?;
            println!("{}", template.content);
            return Ok(());
        }
        TemplateCommand::Add { name, content } => {
            let id = library.add(&name, &content.read()?)?;
            println!("Added template {id}");
        }
        TemplateCommand::Edit { id, name, content } => {
            library.update(&id, &name, &content.read()?)?;
            println!("Updated template {id}");
        }
        TemplateCommand::Delete { id } => {
            library.delete(&id)?;
            println!("Deleted template {id}");
        }
        TemplateCommand::Default { id } => {
            library.set_default(&id)?;
            println!("Template {id} is now the default");
        }
        TemplateCommand::Reset => {
            library.reset();
            println!("Templates reset to the Standard Inquiry");
        }
    }
    library.save(&config.template_store.path)?;
    Ok(())
}

fn run_history(config: &Config, command: HistoryCommand) -> anyhow::Result<()> {
    let mut history = JsonFileHistory::open(&config.history.path)?;
    match command {
        HistoryCommand::List => {
            let records = history.all();
            if records.is_empty() {
                println!("No contacts recorded in {}", history.path().display());
            } else {
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
        }
        HistoryCommand::Show { address } => match history.get(&address) {
            Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
            None => println!("No contact recorded for {address}"),
        },
        HistoryCommand::Remove { address } => match history.remove(&address)? {
            Some(_) => println!("Removed {address}"),
            None => println!("No contact recorded for {address}"),
        },
        HistoryCommand::Clear => {
            history.clear()?;
            println!("Contact history cleared");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Extract {
            url,
            html,
            combined,
            placeholder_email,
        } => run_extract(&url, html, combined, placeholder_email).await?,
        Commands::Sites => {
            for (name, domain) in supported_sites() {
                println!("{name}\t{domain}");
            }
        }
        Commands::Templates { command } => run_templates(&config, command)?,
        Commands::Compose {
            url,
            html,
            template,
            client,
            copy,
        } => run_compose(&config, &url, html, template, client, copy).await?,
        Commands::History { command } => run_history(&config, command)?,
    }
    Ok(())
}
