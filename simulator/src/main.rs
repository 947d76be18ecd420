use anyhow::Context;
use clap::Parser;
use ipincore::pipeline::RunKind;
use ipincore::scenario::ScenarioId;
use ipincore::synthetic::LesrMode;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::DemoConfig;
use workflow::runner::{RunRequest, RunSummary, Runner};

mod export;
mod workflow;

fn parse_scenario(value: &str) -> Result<ScenarioId, String> {
    ScenarioId::parse(value).ok_or_else(|| {
        let known: Vec<&str> = ScenarioId::ALL.iter().map(|id| id.key()).collect();
        format!("unknown scenario {:?} (one of {})", value, known.join(", "))
    })
}

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the I-PIN demo pipeline")]
struct Args {
    /// Run the scripted pipeline for a bundled sample
    #[arg(long, conflicts_with = "file")]
    sample: Option<u32>,
    /// Decode a WAV file and run the upload pipeline on it
    #[arg(long)]
    file: Option<PathBuf>,
    /// Reprocess the uploaded file once the first run completes
    #[arg(long, default_value_t = false, requires = "file")]
    reprocess: bool,
    /// Load the demo config from YAML instead of the flags below
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Write every chart and scenario card as SVG into this directory
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long, default_value = "clean", value_parser = parse_scenario)]
    scenario: ScenarioId,
    #[arg(long, default_value = "energy")]
    mode: LesrMode,
    #[arg(long, default_value_t = 32)]
    bands: usize,
    #[arg(long, default_value_t = 5)]
    users: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Print the run summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn print_scenario(id: ScenarioId) {
    println!("Scenario: {}", id);
    for metric in &id.scenario().metrics {
        println!(
            "  {:<28} {:>8}  {}",
            metric.title, metric.value, metric.description
        );
    }
}

fn print_summary(summary: &RunSummary) {
    for progress in &summary.trail {
        println!("[{:>3}%] {}", progress.percent, progress.label);
    }
    let results = &summary.results;
    if let Some(audio) = &results.audio {
        println!(
            "Audio: {}, {}, {} ch, {}",
            audio.sample_rate_label(),
            audio.duration_label(),
            audio.channels,
            audio.size_label()
        );
    }
    if let Some(lesr) = &results.lesr {
        println!(
            "LESR: SNR +{:.1} dB, noise {}, {} ({:.1}% confidence)",
            lesr.snr_improvement_db,
            if lesr.noise_filtered { "filtered" } else { "not detected" },
            lesr.replay_label(),
            lesr.confidence
        );
    }
    if let Some(verdict) = &results.verdict {
        println!(
            "Verdict: similarity {:.3} -> {}, session {} {}",
            verdict.similarity,
            if verdict.authenticated { "accepted" } else { "rejected" },
            verdict.session_label(),
            if verdict.session_passed { "passed" } else { "failed" }
        );
    }
    let runs: Vec<String> = summary
        .completed
        .iter()
        .map(|kind| match kind {
            RunKind::Upload => "upload".to_string(),
            RunKind::Sample(id) => format!("sample {}", id),
            RunKind::Reprocess => "reprocess".to_string(),
        })
        .collect();
    println!("Completed: {}", runs.join(", "));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = &args.workflow {
        DemoConfig::load(path)?
    } else {
        DemoConfig::from_args(args.bands, args.users, args.mode, args.scenario, args.seed)
    };

    if let Some(dir) = &args.export {
        let written = export::export_all(&config, dir)?;
        println!("Wrote {} SVG files to {}", written.len(), dir.display());
    }

    let request = match (args.sample, args.file) {
        (Some(sample), _) => Some(RunRequest::Sample(sample)),
        (None, Some(path)) => Some(RunRequest::Upload {
            path,
            reprocess: args.reprocess,
        }),
        (None, None) => None,
    };

    let Some(request) = request else {
        if args.export.is_none() {
            print_scenario(config.scenario);
        }
        return Ok(());
    };

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the pipeline timer")?;
    let mut runner = Runner::new(&config);
    let summary = runtime.block_on(async {
        tokio::select! {
            summary = runner.execute(&request) => summary.map(Some),
            interrupted = signal::ctrl_c() => {
                interrupted.context("awaiting Ctrl+C")?;
                log::warn!("interrupted, abandoning run");
                Ok(None)
            }
        }
    })?;

    let Some(summary) = summary else {
        return Ok(());
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing run summary")?
        );
    } else {
        print_summary(&summary);
    }
    Ok(())
}
