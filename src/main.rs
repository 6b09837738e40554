use clap::Parser;
use neural_contact::core::config;
use neural_contact::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "neural-contact", about = "Terminal contact form that relays messages through EmailJS")]
struct Args {
    /// Config file to use instead of ~/.neural-contact/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the debug log
    #[arg(long, default_value = "neural-contact.log")]
    log_file: PathBuf,

    /// EmailJS service id (overrides EMAILJS_SERVICE_ID and the config file)
    #[arg(long)]
    service_id: Option<String>,

    /// EmailJS template id (overrides EMAILJS_TEMPLATE_ID)
    #[arg(long)]
    template_id: Option<String>,

    /// EmailJS public key (overrides EMAILJS_PUBLIC_KEY)
    #[arg(long)]
    public_key: Option<String>,

    /// Recipient address (overrides CONTACT_EMAIL)
    #[arg(long)]
    to_email: Option<String>,

    /// EmailJS API base URL (overrides EMAILJS_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - stdout belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Neural contact starting up");

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            eprintln!("neural-contact: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    let cli = config::CliOverrides {
        service_id: args.service_id,
        template_id: args.template_id,
        public_key: args.public_key,
        to_email: args.to_email,
        base_url: args.base_url,
    };
    let resolved = config::resolve(&file_config, &cli);

    tui::run(resolved)
}
