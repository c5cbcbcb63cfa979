// [apps/pipeline-cli/src/main.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE CLI SHELL (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: PARSEO DE ARGUMENTOS Y DISPARO DEL MOTOR (§6.4)
 *
 * Se mantiene fino a propósito — igual que el shell de census-taker, toda
 * la lógica vive en `sentinel_pipeline_lib` para que pueda auditarse e
 * integrarse sin pasar por un binario.
 * =================================================================
 */

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sentinel_domain_models::Stage;
use tracing::info;

use sentinel_pipeline_lib::bootstrap::PipelineContext;
use sentinel_pipeline_lib::orchestrator::{self, RunOptions};
use sentinel_pipeline_lib::{commands, graph_sink::LoggingGraphSink};

#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "1.0",
    about = "Adquisición y enriquecimiento del registro mercantil sueco sobre un Job Store persistente."
)]
struct CommandArguments {
    /// Ruta a un documento TOML de configuración (§6.1).
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Eleva el piso de trazado a `debug` para esta invocación.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Carga orgnrs desde un archivo hacia el Job Store en stage Registry.
    Seed {
        #[arg(long, value_name = "FILE")]
        source: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_delimiter = ',')]
        types: Option<Vec<String>>,
    },
    /// Ejecuta el orquestador sobre una o más etapas habilitadas.
    Run {
        #[arg(long, value_delimiter = ',')]
        stage: Option<Vec<Stage>>,
        #[arg(long)]
        max: Option<u64>,
        #[arg(long)]
        watch: bool,
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
    /// Imprime conteos por (stage, status) y la tasa de error terminal.
    Stats,
    /// Devuelve jobs in_progress y/o blocked a Pending.
    Reset {
        #[arg(long = "in-progress")]
        in_progress: bool,
        #[arg(long)]
        blocked: bool,
    },
    /// Vuelca los registros de compañía acumulados a JSON o CSV.
    Export {
        #[arg(long, value_name = "PATH")]
        output: PathBuf,
        #[arg(long, default_value = "json")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let arguments = CommandArguments::parse();

    sentinel_shared_telemetry::init_tracing("pipeline-cli", arguments.verbose);
    info!("🧭 [PIPELINE-CLI]: starting up");

    let config = sentinel_shared_config::load(arguments.config.as_deref())?;
    let secrets = sentinel_shared_config::load_secrets();

    let ctx = Arc::new(PipelineContext::<LoggingGraphSink>::bootstrap(config, secrets).await?);

    match arguments.command {
        Command::Seed { source, limit, types } => commands::seed(&ctx, &source, limit, types).await?,
        Command::Run { stage, max, watch, interval } => {
            let stages = stage.unwrap_or_else(|| Stage::ORDER.to_vec());
            let options = RunOptions::new(stages, max, watch, interval);
            orchestrator::run(ctx, options).await?;
        }
        Command::Stats => commands::stats(&ctx).await?,
        Command::Reset { in_progress, blocked } => commands::reset(&ctx, in_progress, blocked).await?,
        Command::Export { output, format } => commands::export(&ctx, &output, &format).await?,
    }

    Ok(())
}
