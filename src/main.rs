//! Terminal front end for the wizard.
//!
//! Reads one command per line from stdin and prints presenter events to
//! stdout. Logs go to stderr.

use reqwest::Client;
use std::error::Error;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use ona_wizard::adapters::presenter::ConsolePresenter;
use ona_wizard::adapters::relay::{HttpRelayConfig, HttpSuggestionRelay};
use ona_wizard::adapters::salic::{AllOriginsProxy, PassthroughProxy, RelayEndpoint, SalicClient};
use ona_wizard::adapters::storage::FileSessionStore;
use ona_wizard::application::WizardNavigator;
use ona_wizard::config::{AppConfig, LoggingConfig, ProxyKind, SalicConfig};
use ona_wizard::domain::wizard::{FormFields, RuleTable};
use ona_wizard::ports::{Presenter, ProxyRelay, UiEvent};

const HELP: &str = "\
comandos:
  set <campo> <valor>   preenche um campo (project-idea, estimated-budget, project-location)
  next | prev           avança ou volta uma etapa
  chat <mensagem>       envia uma mensagem ao consultor
  open <id>             abre o detalhe de um projeto SALIC
  stats                 estatísticas do SALIC
  save | new | status   salva, recomeça ou mostra a etapa atual
  quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    tracing::info!("ona-wizard v{} starting", env!("CARGO_PKG_VERSION"));

    let client = Client::builder().build()?;
    let presenter = Arc::new(ConsolePresenter::stdout());

    let store = FileSessionStore::new(&config.wizard.storage_dir, config.wizard.storage_key.clone());
    tracing::info!(path = %store.file_path().display(), "session store ready");

    let catalog = SalicClient::new(config.salic.base_url.clone(), build_proxies(&config.salic, &client))
        .with_cache_ttl(config.salic.cache_ttl())
        .with_display_limit(config.salic.display_limit);

    let relay = HttpSuggestionRelay::new(
        HttpRelayConfig::new(config.relay.url.clone()).with_timeout(config.relay.timeout()),
        client,
    );

    let navigator = WizardNavigator::new(
        config.wizard.total_steps,
        Arc::new(store),
        Arc::new(catalog),
        Arc::new(relay),
        presenter.clone(),
    )
    .with_rules(RuleTable::standard(config.wizard.idea_min_length))
    .with_chat_reply_delay(config.wizard.chat_reply_delay())
    .with_search_timeout(config.salic.search_timeout());

    navigator.restore().await;
    let mut form = navigator.form_from_session().await;
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "" => {}
            "set" => match rest.split_once(' ') {
                Some((field, value)) => form.set(field, value),
                None => form.set(rest, ""),
            },
            "next" => {
                navigator.advance(&form).await;
            }
            "prev" => {
                navigator.retreat().await;
            }
            "chat" => {
                navigator.send_chat_message(rest).await;
            }
            "open" => {
                navigator.open_project_detail(rest).await;
            }
            "stats" => navigator.show_statistics().await,
            "save" => {
                navigator.save_session().await;
            }
            "new" => {
                navigator.start_new_project().await;
                form = FormFields::new();
            }
            "status" => presenter.emit(UiEvent::Progress(navigator.progress().await)),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => println!("comando desconhecido: {} (digite help)", other),
        }
    }

    tracing::info!("ona-wizard exiting");
    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_proxies(config: &SalicConfig, client: &Client) -> Vec<Arc<dyn ProxyRelay>> {
    config
        .proxies
        .iter()
        .map(|proxy| {
            let mut endpoint = RelayEndpoint::new(&proxy.name, &proxy.prefix, client.clone())
                .with_timeout(config.request_timeout());
            if proxy.send_api_key {
                if let Some(key) = &config.proxy_api_key {
                    endpoint = endpoint.with_api_key(&config.api_key_header, key.clone());
                }
            }
            let relay: Arc<dyn ProxyRelay> = match proxy.kind {
                ProxyKind::Passthrough => Arc::new(PassthroughProxy::new(endpoint)),
                ProxyKind::AllOrigins => Arc::new(AllOriginsProxy::new(endpoint)),
            };
            relay
        })
        .collect()
}
