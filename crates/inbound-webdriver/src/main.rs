use clap::{Parser as ClapParser, ValueEnum};
use inbound_engine::config::{ConfigLoader, FlowConfig};
use inbound_engine::outcome::CaseId;
use inbound_engine::suite::SuiteRunner;
use inbound_webdriver::backend::WebDriverBackend;
use inbound_webdriver::chromedriver::DEFAULT_CHROMEDRIVER_PORT;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CaseArg {
    Tc004,
    Tc036,
    All,
}

impl CaseArg {
    fn cases(self) -> Vec<CaseId> {
        match self {
            CaseArg::Tc004 => vec![CaseId::Tc004],
            CaseArg::Tc036 => vec![CaseId::Tc036],
            CaseArg::All => CaseId::ALL.to_vec(),
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(author, version, about = "End-to-end checks for the Inbound receipt form", long_about = None)]
struct Args {
    /// URL of an external WebDriver server. If not provided, chromedriver is launched.
    #[arg(short, long)]
    webdriver_url: Option<String>,

    /// Port for the launched chromedriver
    #[arg(long, default_value_t = DEFAULT_CHROMEDRIVER_PORT)]
    port: u16,

    /// Config file (defaults to ./inbound-e2e.yaml, then ~/.inbound-e2e/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which case to run
    #[arg(long, value_enum, default_value_t = CaseArg::All)]
    case: CaseArg,

    /// Base URL of the application under test
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    username: Option<String>,

    #[arg(long, env = "INBOUND_E2E_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Run Chrome without a window
    #[arg(long)]
    headless: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut FlowConfig) {
        if let Some(url) = &self.base_url {
            config.target.base_url = url.clone();
        }
        if let Some(username) = &self.username {
            config.credentials.username = username.clone();
        }
        if let Some(password) = &self.password {
            config.credentials.password = password.clone();
        }
        if self.headless {
            config.browser.headless = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path).await?,
        None => ConfigLoader::load_default().await?,
    };
    args.apply(&mut config);
    // Re-validate URLs after CLI overrides.
    config.target.login_url()?;
    config.target.inbound_url()?;

    info!(
        target_url = %config.target.base_url,
        username = %config.credentials.username,
        headless = config.browser.headless,
        "Starting inbound receipt checks"
    );

    let webdriver_url = args.webdriver_url.clone();
    let port = args.port;
    let mut runner = SuiteRunner::new(config, move |config: &FlowConfig| {
        let browser = config.browser.clone();
        match &webdriver_url {
            Some(url) => WebDriverBackend::with_url(url.clone(), browser),
            None => WebDriverBackend::on_port(browser, port),
        }
    });

    let report = runner.run(&args.case.cases()).await?;
    print!("{}", report.render());

    if !report.all_passed() {
        error!("{} of {} cases failed", report.failed(), report.outcomes.len());
        std::process::exit(1);
    }
    Ok(())
}
