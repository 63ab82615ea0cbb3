mod address;
mod assemble;
mod cli;
mod conf;
mod env;
mod logging;
mod network;
mod paths;
mod persisted;
mod release;
mod settings;
mod wallet;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::blocking::Client;

use cli::CliArgs;
use env::EnvSnapshot;
use paths::NodePaths;
use settings::BootSettings;
use wallet::WalletInputs;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<()> {
    logging::init_logging()?;
    let cli = CliArgs::parse();

    let env = EnvSnapshot::capture();
    let settings = BootSettings::from_env(&env)?;
    settings.log_summary();

    if settings.startup_delay_secs > 0 {
        tracing::info!(seconds = settings.startup_delay_secs, "delaying startup");
        thread::sleep(Duration::from_secs(settings.startup_delay_secs));
    }

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .build()
        .context("build http client")?;

    let version = release::resolve_version(&client, settings.network, &settings.version_selector)?;
    tracing::info!(selector = %settings.version_selector, version = %version, "resolved node version");

    let paths = NodePaths::new(cli.base_dir, cli.node_dir);
    paths.ensure_dirs()?;

    release::download_config_template(&client, settings.network, &version, &paths.config_template())?;

    let persisted = persisted::load_wallet(&paths.local_conf())?;
    let wallet = wallet::resolve(
        &WalletInputs {
            raw_seed: settings.wallet_seed.clone(),
            encoded_seed: settings.wallet_seed_base58.clone(),
            password: settings.wallet_password.clone(),
        },
        &persisted,
    );

    let declared_address = address::resolve_declared_address(&client, &settings)?;

    let tree = assemble::assemble(&env, &persisted, &wallet, &paths, declared_address.as_deref())?;
    assemble::write_config(&tree, &paths.local_conf())?;
    tracing::info!(path = %paths.local_conf().display(), "node configuration written");

    if cli.skip_download {
        tracing::info!("skipping node jar download");
    } else {
        release::download_node_jar(&client, &version, &paths.node_jar(&settings.version_selector))?;
    }

    Ok(())
}
