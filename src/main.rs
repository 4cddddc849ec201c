mod configs;
mod render;

use crate::configs::SvStatusConfig;
use crate::render::{Entry, Format};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use std::path::{Path, PathBuf};
use svstatus::{Service, SystemClock};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "/etc/svstatus/config.yml";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "SVSTATUS_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Supervision root, overrides the configuration file
    #[arg(short = 'd', long, env = "SVSTATUS_SERVICE_DIR", value_name = "DIR")]
    service_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List services under the supervision root
    List,
    /// Show the status of the named services, or of all services
    Status {
        names: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SvStatusConfig::load(path, true)?,
        None => SvStatusConfig::load(Path::new(DEFAULT_CONFIG), false)?,
    };

    let filter =
        EnvFilter::try_from_env("SVSTATUS_LOG").unwrap_or_else(|_| EnvFilter::new(&config.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "Loaded config");

    let root = args.service_dir.unwrap_or(config.service_dir);
    match args.command {
        Command::List => {
            for service in svstatus::list_services(&root)? {
                println!("{}", service.name);
            }
            Ok(())
        }
        Command::Status { names, format } => status(&root, &names, format),
    }
}

fn status(root: &Path, names: &[String], format: Format) -> Result<()> {
    let services: Vec<Service> = if names.is_empty() {
        svstatus::list_services(root)?
    } else {
        names.iter().map(|name| svstatus::service(root, name)).collect()
    };
    info!(count = services.len(), root = %root.display(), "Querying services");

    let mut failures = 0;
    let mut entries = Vec::with_capacity(services.len());
    for service in &services {
        let result = svstatus::status(service, &SystemClock);
        if let Err(err) = &result {
            if !err.is_not_running() {
                warn!(service = %service.name, ?err, "Status query failed");
                failures += 1;
            }
        }
        match format {
            Format::Text => println!("{}", render::text_line(&service.name, &result)),
            Format::Yaml => entries.push(Entry::new(&service.name, &result)),
        }
    }

    if format == Format::Yaml {
        print!("{}", render::yaml(&entries).wrap_err("Failed to render status")?);
    }

    if failures > 0 {
        bail!("{failures} of {} services failed", services.len());
    }
    Ok(())
}
