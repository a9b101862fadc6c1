use creator_marketplace::components::app::{App, AppProps};
use creator_marketplace::config::AppConfig;
use creator_marketplace::logging;

fn main() {
    let config = AppConfig::load();
    logging::init(&config.log_level);
    tracing::info!(api_base = %config.api_base, "starting");
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
