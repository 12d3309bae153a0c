//! turnplan CLI binary entry point.

use clap::Parser;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_stream::wrappers::LinesStream;
use tracing_subscriber::EnvFilter;

use turnplan::cli::{render, Cli, Commands, RenderArgs};
use turnplan::config::PlanConfig;
use turnplan::error::Result;
use turnplan::plan::PlanBuilder;
use turnplan::store::PlanTransform;
use turnplan::types::{RenderPlan, WirePart};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render(args) => handle_render(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_render(args: RenderArgs) -> Result<()> {
    let config = PlanConfig::load(args.config.as_deref())?;

    let reader: Box<dyn AsyncRead + Unpin + Send> = if args.input == "-" {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(tokio::fs::File::open(&args.input).await?)
    };

    let records = LinesStream::new(BufReader::new(reader).lines())
        .filter(|line| futures::future::ready(!matches!(line, Ok(l) if l.trim().is_empty())))
        .map(|line| -> Result<WirePart> {
            let line = line?;
            Ok(serde_json::from_str(&line)?)
        });

    let transform = PlanTransform::new(PlanBuilder::new(config));
    let mut plans = transform.transform(records.boxed());

    let mut latest = RenderPlan::default();
    while let Some(item) = plans.next().await {
        match item {
            Ok(plan) => {
                if args.progressive {
                    println!("{}\n", render(&plan, args.format)?);
                }
                latest = plan;
            }
            // Already logged by the transform; the record is skipped.
            Err(e) if e.is_recoverable() => {}
            Err(e) => return Err(e),
        }
    }

    if !args.progressive {
        println!("{}", render(&latest, args.format)?);
    }

    Ok(())
}
