//! CLI entry point for `mailgrab`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use mailgrab::creds::{self, KeyringStore};
use mailgrab::download::{save_attachments, SaveOptions};
use mailgrab::imap::MailSession;

#[derive(Parser)]
#[command(name = "mailgrab", version)]
#[command(about = "Download email attachments from an IMAP mailbox")]
struct Cli {
    /// Email address used to log in and retrieve attachments
    #[arg(short, long)]
    email: String,

    /// Mailbox containing the messages
    #[arg(short, long)]
    mailbox: Option<String>,

    /// Extra search terms, in Gmail search-box syntax
    /// (messages with attachments are always filtered)
    #[arg(short, long, default_value = "")]
    search: String,

    /// Directory where attachments will be saved
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Extension for the downloaded attachments (e.g. "pdf")
    #[arg(long = "ext", value_name = "EXT")]
    file_ext: Option<String>,

    /// MIME type to filter attachments (guessed from --ext by default)
    #[arg(long)]
    mime: Option<String>,

    /// IMAP host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// IMAP TLS port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mailgrab::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level);

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);
    let mailbox = cli
        .mailbox
        .unwrap_or_else(|| config.server.mailbox.clone());

    let output_dir = cli
        .output
        .or_else(|| config.download.output_dir.clone())
        .context("No output directory given (use --output or set download.output_dir)")?;
    if config.download.create_output_dir {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Creating output directory '{}'", output_dir.display()))?;
    }

    // Without an explicit --mime, guess the filter from the extension
    let mime_filter = cli.mime.or_else(|| {
        let ext = cli.file_ext.as_deref()?;
        let guessed = mime_guess::from_ext(ext).first_raw();
        match guessed {
            Some(mime) => tracing::info!(ext, mime, "Guessed MIME type from extension"),
            None => tracing::warn!(ext, "No MIME type known for extension, not filtering"),
        }
        guessed.map(String::from)
    });

    let password = creds::obtain_password(&KeyringStore, &cli.email)?;

    let mut session = MailSession::connect(&host, port, &cli.email, &password)?;
    let total = session.select_mailbox(&mailbox)?;
    tracing::info!(mailbox, total, "Mailbox selected");

    let ids = session.search_attachments(&cli.search)?;
    println!("Found {} matching message(s)", ids.len());

    let opts = SaveOptions {
        mime_filter,
        file_ext: cli.file_ext,
        output_dir,
    };

    let bar = ProgressBar::new(ids.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Downloading [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let mut saved = 0usize;
    for seq in ids {
        match download_message(&mut session, seq, &opts) {
            Ok(count) => saved += count,
            Err(e) => {
                tracing::warn!(seq, error = %e, "Failed to download attachments");
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    session.logout();
    println!("Saved {saved} attachment(s) to '{}'", opts.output_dir.display());
    Ok(())
}

/// Fetch one message and save its attachments. Returns how many were written.
fn download_message(
    session: &mut MailSession,
    seq: u32,
    opts: &SaveOptions,
) -> anyhow::Result<usize> {
    let raw = session
        .fetch_raw(seq)?
        .with_context(|| format!("Message {seq} has no body"))?;
    let written = save_attachments(&raw, opts)?;
    Ok(written.len())
}

fn setup_logging(level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
