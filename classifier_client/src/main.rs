use clap::Parser;
use classifier_client::{
    config::{ClientConfig, DEFAULT_BASE_URL},
    coordinator::Coordinator,
    presenter,
    task::EndpointId,
    SelectedFile, AVAILABLE_CLASSES,
};
use dotenv::dotenv;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Classify an audio clip with the closed-set and open-set services", long_about = None)]
struct Args {
    /// Audio file to classify
    #[arg(required_unless_present = "list_classes")]
    file: Option<PathBuf>,

    /// Base URL of the classification service
    #[arg(short, long, env = "CLASSIFIER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Route of the closed-set classifier
    #[arg(long, default_value = "/predict")]
    closed_path: String,

    /// Route of the open-set classifier
    #[arg(long, default_value = "/predict_mod")]
    open_path: String,

    /// Per-request timeout in seconds (no timeout when unset)
    #[arg(short, long, env = "CLASSIFIER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// MIME type to send instead of the one guessed from the extension
    #[arg(short, long)]
    mime: Option<String>,

    /// Print the classes the closed-set classifier knows and exit
    #[arg(short, long)]
    list_classes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classifier_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if args.list_classes {
        println!("Available classes");
        for class in AVAILABLE_CLASSES {
            println!("  {}", class);
        }
        return Ok(());
    }

    let path = args.file.ok_or("no audio file given")?;

    let mut config = ClientConfig::new(&args.base_url)?
        .with_timeout(args.timeout_secs.map(Duration::from_secs));
    config.closed_path = args.closed_path;
    config.open_path = args.open_path;
    let coordinator = Coordinator::from_config(&config)?;

    let mut file = SelectedFile::from_path(&path).await?;
    if let Some(mime) = args.mime {
        file = file.with_mime_type(mime);
    }
    coordinator.select_file(file);

    let mut changes = coordinator.changes();
    let round = coordinator.submit()?;
    changes.borrow_and_update();
    print!("{}", presenter::render(&coordinator.snapshot()));
    let mut shown = presenter::summarize(&coordinator.snapshot());

    // Re-render as each endpoint answers, so a fast service shows up before a slow one.
    loop {
        let settled = coordinator
            .current_round()
            .map_or(true, |r| r.is_settled());
        if settled || changes.changed().await.is_err() {
            break;
        }
        let summary = presenter::summarize(&coordinator.snapshot());
        if summary != shown {
            print!("\n{}", summary);
            shown = summary;
        }
    }
    round.settled().await;

    let summary = presenter::summarize(&coordinator.snapshot());
    if summary != shown {
        print!("\n{}", summary);
    }

    let failed = EndpointId::ALL
        .iter()
        .filter(|&&id| coordinator.task(id).failure_reason().is_some())
        .count();
    if failed == EndpointId::ALL.len() {
        return Err("both classifiers failed".into());
    }

    Ok(())
}
