use chatdesk::{
    api::ChatClient,
    config::{get_config, initialize_config},
    logging, ui, App, ChatController,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    initialize_config()?;
    let config = get_config();
    let _logger = logging::init(&config)?;

    log::info!("Starting chatdesk against {}", config.endpoint);

    let client = ChatClient::from_config(&config)?;
    let controller = ChatController::new(client, config.greeting.clone());
    ui::run_ui(App::new(controller, config.prompts.clone())).await?;

    log::info!("chatdesk exited");
    Ok(())
}
