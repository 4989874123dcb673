use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use embedkit::config::AppConfig;
use embedkit::embed;
use embedkit::store::JsonFileStore;
use embedkit_core::{
    resolve_settings, validate_template, DependencyPolicy, EditorSession, NoData, SettingsStore,
};
use embedkit_types::{Settings, Template, ViewMode, WidgetInstance};
use log::info;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// embedkit - compose embeddable web widgets from declarative templates
#[derive(Parser, Debug)]
#[command(name = "embedkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered widget types and their templates
    List,

    /// Create a widget instance from a template
    Create {
        /// Widget type id (e.g. "countdown")
        #[arg(long = "widget-type")]
        widget_type: String,
        /// Template id within the widget type
        #[arg(long)]
        template: String,
        #[arg(long, default_value = "Untitled widget")]
        title: String,
    },

    /// Set one setting on an instance (the value is parsed as JSON,
    /// falling back to a plain string)
    Set {
        instance: Uuid,
        menu: String,
        value: String,
    },

    /// Render an instance as embed HTML
    Render {
        instance: Uuid,
        /// Render the mobile variant
        #[arg(long)]
        mobile: bool,
        /// Print the render tree as JSON instead of HTML
        #[arg(long)]
        tree: bool,
    },

    /// Show the editor form model with active flags
    Inspect { instance: Uuid },

    /// Validate a template JSON file
    Validate {
        path: PathBuf,
        /// Reject dangling dependency references instead of warning
        #[arg(long)]
        strict: bool,
    },

    /// Delete an instance
    Delete { instance: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag;
    // RUST_LOG still overrides the CLI setting
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = AppConfig::load()?;
    let engine = embedkit::default_engine(config.dependency_policy)
        .context("registering built-in widgets")?;
    let store = Arc::new(JsonFileStore::new(config.store_file()?));

    match cli.command {
        Command::List => {
            for widget_type in engine.templates().list_widget_types() {
                println!("{} - {}", widget_type.id, widget_type.name);
                for template in engine.templates().templates(&widget_type.id) {
                    let marker = if template.is_recommended {
                        " (recommended)"
                    } else {
                        ""
                    };
                    println!("  {} - {}{}", template.id, template.name, marker);
                }
            }
        }

        Command::Create {
            widget_type,
            template,
            title,
        } => {
            let Some(schema) = engine.templates().template(&widget_type, &template) else {
                anyhow::bail!("unknown template `{template}` for widget type `{widget_type}`");
            };
            let settings = resolve_settings(schema, &Settings::new());
            let mut instance = WidgetInstance::new(widget_type, template, title);
            instance.settings = settings;
            info!("created instance {} ({})", instance.id, instance.title);
            store.put(instance.clone())?;
            println!("{}", instance.id);
        }

        Command::Set {
            instance,
            menu,
            value,
        } => {
            let record = store
                .get(instance)?
                .with_context(|| format!("unknown instance {instance}"))?;
            let parsed: Value =
                serde_json::from_str(&value).unwrap_or_else(|_| Value::String(value.clone()));

            let mut session = EditorSession::open(
                &engine,
                record,
                store.clone(),
                Duration::from_millis(config.debounce_ms),
            )?;
            session.set_value(&menu, parsed);
            // closing flushes the debounced write
            let closed = session.close().await;
            if closed.settings.get(&menu) != store.load(instance)?.as_ref().and_then(|s| s.get(&menu))
            {
                anyhow::bail!("write did not reach the store");
            }
            println!("ok");
        }

        Command::Render {
            instance,
            mobile,
            tree,
        } => {
            let record = store
                .get(instance)?
                .with_context(|| format!("unknown instance {instance}"))?;
            let mode = if mobile {
                ViewMode::Mobile
            } else {
                ViewMode::Desktop
            };
            if tree {
                let node = embed::render_node(&engine, &record, mode, None);
                println!("{}", serde_json::to_string_pretty(&node)?);
            } else {
                println!("{}", embed::render_embed(&engine, &record, mode, &NoData));
            }
        }

        Command::Inspect { instance } => {
            let record = store
                .get(instance)?
                .with_context(|| format!("unknown instance {instance}"))?;
            let model = engine
                .form_model(&record.widget_type, &record.template_id, &record.settings)
                .with_context(|| {
                    format!(
                        "unknown template `{}` for widget type `{}`",
                        record.template_id, record.widget_type
                    )
                })?;
            println!("{}", serde_json::to_string_pretty(&model)?);
        }

        Command::Validate { path, strict } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let template: Template = serde_json::from_str(&raw).context("parsing template")?;
            let policy = if strict {
                DependencyPolicy::Strict
            } else {
                DependencyPolicy::Lenient
            };
            match validate_template(&template, policy) {
                Ok(()) => println!("ok: {} menus", template.menus().len()),
                Err(err) => {
                    eprintln!("invalid: {err}");
                    std::process::exit(1);
                }
            }
        }

        Command::Delete { instance } => {
            if store.remove(instance)? {
                println!("deleted");
            } else {
                anyhow::bail!("unknown instance {instance}");
            }
        }
    }

    Ok(())
}
