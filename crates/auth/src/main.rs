use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokenforge_auth::{KeyMaterial, KeystoreConfig, StartupError};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tokenforge_auth=debug,tokenforge_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(material) => {
            // The public key is safe to hand to any verifier.
            print!("{}", material.public_key_pem());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup aborted");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration and key material. Every failure here is final.
fn run() -> Result<KeyMaterial, StartupError> {
    // --- Configuration ---
    let config = KeystoreConfig::from_env()?;
    tracing::info!(path = %config.path, alias = %config.keypair_alias, "Loaded keystore configuration");

    // --- Key material ---
    Ok(KeyMaterial::load(&config)?)
}
