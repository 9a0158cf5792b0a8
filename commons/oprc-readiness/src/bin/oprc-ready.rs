use clap::Parser;
use envconfig::Envconfig;
use k8s_openapi::api::apps::v1::DaemonSet;
use k8s_openapi::api::batch::v1::Job;
use k8s_openapi::api::core::v1::Pod;
use oprc_readiness::{Snapshot, config::ReadyConfig, init_tracing, workflow};
use tracing::{debug, info};

/// Replay a recorded workflow through the readiness checks
#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct ReadyCli {
    /// Kind of the recorded objects; `auto` reads it from each entry
    #[arg(value_enum)]
    kind: KindArg,
    /// Recorded workflow (JSON array) as file or stdin if `-` is given. Example: `kubectl get pod foo -o json | jq -s . | oprc-ready pod -`
    input: clap_stdin::FileOrStdin,
    /// Print the trail after every snapshot
    #[arg(short, long)]
    all: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Pod,
    Job,
    #[value(name = "daemonset", alias = "ds")]
    DaemonSet,
    Auto,
}

fn load(kind: KindArg, raw: &[u8]) -> anyhow::Result<Vec<Snapshot>> {
    let snapshots = match kind {
        KindArg::Auto => workflow::load_workflow(raw)?,
        KindArg::Pod => into_snapshots(workflow::load_typed::<Pod>(raw)?),
        KindArg::Job => into_snapshots(workflow::load_typed::<Job>(raw)?),
        KindArg::DaemonSet => {
            into_snapshots(workflow::load_typed::<DaemonSet>(raw)?)
        }
    };
    Ok(snapshots)
}

fn into_snapshots<K: Into<Snapshot>>(items: Vec<K>) -> Vec<Snapshot> {
    items.into_iter().map(Into::into).collect()
}

fn main() -> anyhow::Result<()> {
    let cfg = ReadyConfig::init_from_env()?;
    init_tracing(&cfg.log_level);

    let cli = ReadyCli::parse();
    debug!(?cli, ?cfg, "parsed arguments");
    let print_all = cli.all || cfg.print_all;

    let raw = cli.input.contents()?;
    let snapshots = load(cli.kind, raw.as_bytes())?;
    info!(count = snapshots.len(), "replaying recorded snapshots");

    let total = snapshots.len();
    let mut ready = false;
    for (idx, snapshot) in snapshots.iter().enumerate() {
        let (ok, details) = snapshot.ready_details();
        ready = ok;
        if print_all || ok || idx + 1 == total {
            println!(
                "# {} {} [{}/{}]",
                snapshot.kind(),
                snapshot.qualified_name(),
                idx + 1,
                total
            );
            print!("{details}");
        }
        if ok {
            break;
        }
    }

    info!(ready, "replay finished");
    if !ready {
        std::process::exit(1);
    }
    Ok(())
}
