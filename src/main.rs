mod config;
mod error;
mod health;
#[cfg(feature = "hyper")]
mod hyper_server;
mod listener;
#[cfg_attr(feature = "hyper", allow(dead_code))]
mod naive;
mod responder;
mod response;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let config = config::Config::from_env()?;
    #[cfg(not(feature = "hyper"))]
    naive::main(config)?;
    #[cfg(feature = "hyper")]
    hyper_server::main(config)?;
    Ok(())
}
