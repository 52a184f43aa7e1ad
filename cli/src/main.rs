//! mdlens CLI - detect and render Markdown pages from the terminal.
//!
//! Reads a file, a URL, or stdin; decides whether the content is Markdown;
//! and either emits a rendered HTML document or leaves the text exactly as
//! it arrived. Widget views (`--toc`, `--slides`, `--stats`, `--classify`)
//! print their structure instead of rendering.

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use mdlens_lib::classify::ClassifyLimits;
use mdlens_lib::frontmatter::split_frontmatter;
use mdlens_lib::page::{PageBody, PageSnapshot};
use mdlens_lib::render::{CmarkRenderer, EmbedDiagramRenderer, RenderOptions, render_document};
use mdlens_lib::search::find_matches;
use mdlens_lib::slides::segment;
use mdlens_lib::speech;
use mdlens_lib::stats::ReadingStats;
use mdlens_lib::theme::Theme;
use mdlens_lib::toc::Toc;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Settle delay before classifying a local file, mirroring how a viewer
/// waits for the host's own file display to stabilize.
const FILE_URL_SETTLE_DELAY: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "mdlens")]
#[command(about = "Detect Markdown in raw page text and render it", version)]
struct Cli {
    /// Input file; use "-" or omit to read stdin
    input: Option<PathBuf>,

    /// Fetch the page from a URL instead of a file
    #[arg(long, value_name = "URL", conflicts_with = "input")]
    url: Option<Url>,

    /// Print the classification decision and exit
    #[arg(long)]
    classify: bool,

    /// Print the table of contents and exit
    #[arg(long, conflicts_with = "classify")]
    toc: bool,

    /// Print the slide fragments and exit
    #[arg(long, conflicts_with_all = ["classify", "toc"])]
    slides: bool,

    /// Print reading statistics and exit
    #[arg(long, conflicts_with_all = ["classify", "toc", "slides"])]
    stats: bool,

    /// Print match locations for a query and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Speak the document's prose instead of printing
    #[arg(long)]
    speak: bool,

    /// Emit JSON where a structure is printed
    #[arg(long)]
    json: bool,

    /// Theme stamped on emitted HTML documents
    #[arg(long, value_name = "THEME", default_value_t = Theme::Light)]
    theme: Theme,

    /// Render even when classification says the input is not Markdown
    #[arg(long)]
    force: bool,

    /// Size cap in bytes; larger inputs are never classified
    #[arg(long, value_name = "BYTES", default_value_t = 1024 * 1024)]
    max_bytes: usize,

    /// Leading lines scanned by the content heuristic
    #[arg(long, value_name = "LINES", default_value_t = 20)]
    max_lines: usize,

    /// Distinct pattern signals required for a heuristic match
    #[arg(long, value_name = "COUNT", default_value_t = 2)]
    min_matches: usize,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn limits(&self) -> ClassifyLimits {
        ClassifyLimits {
            max_bytes: self.max_bytes,
            max_lines: self.max_lines,
            min_pattern_matches: self.min_matches,
        }
    }
}

/// Initialize tracing based on `-v` repetition: warnings only by default,
/// INFO at -v, DEBUG at -vv, TRACE from -vvv.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "info,mdlens=info,mdlens_lib=info".to_string(),
            2 => "info,mdlens=debug,mdlens_lib=debug".to_string(),
            _ => "debug,mdlens=trace,mdlens_lib=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Build the page snapshot from whichever input the flags selected.
async fn load_snapshot(cli: &Cli) -> Result<PageSnapshot> {
    if let Some(url) = &cli.url {
        return Ok(PageSnapshot::from_url(url).await?);
    }
    match &cli.input {
        Some(path) if path.as_os_str() != "-" => {
            // Give the host's own file display a beat to settle before the
            // raw text is read.
            tokio::time::sleep(FILE_URL_SETTLE_DELAY).await;
            Ok(PageSnapshot::from_file(path).await?)
        }
        _ => {
            let text = read_stdin()?;
            Ok(PageSnapshot::new(None, PageBody::TextOnly(text)))
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let snapshot = load_snapshot(&cli).await?;
    let limits = cli.limits();
    let classification = snapshot.classify(&limits);
    tracing::info!(?classification, "page classified");

    if cli.classify {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&classification)?);
        } else {
            let verdict = if classification.is_markdown { "yes" } else { "no" };
            println!(
                "markdown: {verdict} (reason: {:?}, signals: {})",
                classification.reason, classification.pattern_matches
            );
        }
        return Ok(());
    }

    let raw = snapshot.plain_text_view().unwrap_or_default().to_string();
    let (_, content) = split_frontmatter(&raw);

    if cli.toc {
        let toc = Toc::from_markdown(content);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&toc)?);
        } else {
            for entry in &toc.entries {
                let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
                println!("{indent}{} #{}", entry.title, entry.slug);
            }
        }
        return Ok(());
    }

    if cli.slides {
        let slides = segment(content);
        if slides.len() < 2 {
            return Err(eyre!("document has no slide delimiters"));
        }
        for (i, slide) in slides.iter().enumerate() {
            println!("--- slide {} ---", i + 1);
            println!("{slide}");
        }
        return Ok(());
    }

    if cli.stats {
        let stats = ReadingStats::from_markdown(content);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!(
                "{} words, {} headings, {} code blocks, ~{} min read",
                stats.words, stats.headings, stats.code_blocks, stats.reading_minutes
            );
        }
        return Ok(());
    }

    if let Some(query) = &cli.search {
        let matches = find_matches(content, query);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&matches)?);
        } else {
            for m in &matches {
                println!("line {}: bytes {}..{}", m.line, m.start, m.end);
            }
            println!("{} match(es)", matches.len());
        }
        return Ok(());
    }

    if cli.speak {
        speech::speak(&speech::speakable_text(content));
        return Ok(());
    }

    if !classification.is_markdown && !cli.force {
        // Not Markdown: the page keeps its plain-text display.
        print!("{raw}");
        return Ok(());
    }

    let options = RenderOptions {
        base_url: snapshot.url.clone(),
    };
    let renderer = match &snapshot.url {
        Some(url) => CmarkRenderer::with_base_url(url.clone()),
        None => CmarkRenderer::new(),
    };
    let document = render_document(&raw, &options, &renderer, &EmbedDiagramRenderer).await;
    for failure in &document.diagram_failures {
        tracing::warn!(%failure, "diagram degraded to source");
    }
    print!("{}", document.to_standalone_html(cli.theme));
    Ok(())
}
