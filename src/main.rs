use clap::Parser;
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tracing::{error, info};

use student_portal::api::HttpStudentApi;
use student_portal::config::{Cli, ClientConfig};
use student_portal::util::log;
use student_portal::App;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = ClientConfig::load(&cli)?;
    let log_path = log::init(&config.log_dir, &config.log_level)?;
    info!("Logging to {}", log_path.display());

    let api = HttpStudentApi::new(&config)?;
    if let Some((username, password)) = config.credentials() {
        if let Err(e) = api.login(username, password).await {
            error!("Login failed: {}", e);
            return Err(color_eyre::eyre::eyre!("login failed for {}: {}", username, e));
        }
    }

    let backend = config.base_url()?.to_string();
    info!("Starting against {}", backend);

    let terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;
    let result = App::new(api, backend).run(terminal).await;
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
