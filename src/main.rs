// Terminal front end: each stdin line is what the user typed into the search bar.
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use search_bar_lib::{Configuration, Host, HostEvent, HttpDataSource, SearchBar, Trigger};

#[derive(Parser, Debug)]
#[command(name = "search-bar", about = "Filter a remote JSON list from the terminal")]
struct Args {
    /// JSON options file (`url`, `filter`, `field`/`filterProperty`, `trigger`/`triggerWhen`)
    #[arg(long)]
    options: Option<PathBuf>,

    /// URL of the JSON document
    #[arg(long)]
    url: Option<String>,

    /// Dot-separated path to the record list
    #[arg(long)]
    filter: Option<String>,

    /// Record property compared against the query
    #[arg(long)]
    field: Option<String>,

    /// "click" commits each line, "keyup" searches as every character is typed
    #[arg(long)]
    trigger: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Renders the bar as status lines on stderr.
#[derive(Default)]
struct TerminalHost {
    expanded: bool,
    input: String,
}

impl Host for TerminalHost {
    fn render_toggle_control(&mut self) {
        eprintln!("[search] icon ready (type a query, `:clear` to reset, Ctrl-D to quit)");
    }

    fn render_input(&mut self) {
        eprintln!("[search] input ready");
    }

    fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        eprintln!("[search] {}", if self.expanded { "expanded" } else { "collapsed" });
    }

    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }
}

fn load_configuration(args: &Args) -> Result<Configuration> {
    let mut config = match &args.options {
        Some(path) => Configuration::load(path)
            .with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(url) = &args.url {
        config = config.with_url(url);
    }
    if let Some(filter) = &args.filter {
        config = config.with_path(filter);
    }
    if let Some(field) = &args.field {
        config = config.with_field(field);
    }
    if let Some(trigger) = &args.trigger {
        config = config.with_trigger_name(trigger);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "search_bar_lib=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_configuration(&args)?;

    let source = match args.timeout_secs {
        Some(secs) => HttpDataSource::with_timeout(Duration::from_secs(secs)),
        None => HttpDataSource::new(),
    }
    .context("Failed to create HTTP client")?;

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let bar = SearchBar::new(config, source).on_results(move || {
        let _ = done_tx.send(());
    });
    let mut mounted = Arc::new(bar)
        .mount(TerminalHost::default())
        .context("Search bar could not be set up")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line == ":clear" {
            mounted.dispatch(HostEvent::ClearClicked).await;
            continue;
        }

        match mounted.trigger() {
            Trigger::Click => {
                mounted.host_mut().input = line;
                mounted.dispatch(HostEvent::IconClicked).await;
            }
            Trigger::Keyup => {
                let mut typed = String::new();
                for ch in line.chars() {
                    typed.push(ch);
                    mounted.host_mut().input = typed.clone();
                    mounted.dispatch(HostEvent::KeyUp).await;
                }
            }
        }

        let mut notified = false;
        while done_rx.try_recv().is_ok() {
            notified = true;
        }
        if notified {
            let results = mounted.bar().results();
            println!("{}", serde_json::to_string_pretty(results.as_ref())?);
        }
    }

    Ok(())
}
