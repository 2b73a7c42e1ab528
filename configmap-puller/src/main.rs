//! `configmap-puller` binary: poll a ConfigMap key into a file until something fails
use std::process::ExitCode;

use clap::Parser;
use configmap_puller::{Error, FileSink, KubeSource, Opts, Poller};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(opts).await {
        Ok(never) => match never {},
        Err(err) => {
            error!(error = %err, exit_code = err.exit_code(), "exiting");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(opts: Opts) -> Result<std::convert::Infallible, Error> {
    info!(
        kubeconfig = %opts.kubeconfig,
        configmap_name = %opts.configmap_name,
        configmap_namespace = %opts.configmap_namespace,
        configmap_key = %opts.configmap_key,
        outfile_name = %opts.outfile_name.display(),
        interval_secs = opts.interval,
        "starting configmap-puller"
    );
    let client = opts.client().await?;
    Poller::new(opts.target(), KubeSource::new(client), FileSink::new(&opts.outfile_name))
        .interval(opts.poll_interval())
        .run()
        .await
}
