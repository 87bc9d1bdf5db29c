use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use std::process;
use std::time::Instant;

use portsweep::output::{print_text, ScanReport};
use portsweep::{parse_ports, ScanConfig, ScanEngine, ScanKind};

fn build_cli() -> Command {
    Command::new("portsweep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Concurrent TCP/UDP port scanner with nmap delegation")
        .arg(
            Arg::new("target")
                .help("Target host (hostname or IP literal)")
                .required(true),
        )
        .arg(
            Arg::new("ports")
                .short('p')
                .long("ports")
                .default_value("1-1024")
                .help("Port spec, e.g. 22,80,8000-8100"),
        )
        .arg(
            Arg::new("scan-type")
                .short('s')
                .long("scan-type")
                .default_value("tcp")
                .help("Scan type: tcp or udp (anything else scans tcp)"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_parser(clap::value_parser!(u64))
                .help("Per-probe timeout in milliseconds"),
        )
        .arg(
            Arg::new("concurrency")
                .long("concurrency")
                .value_parser(clap::value_parser!(usize))
                .help("Concurrent probe cap for TCP scans"),
        )
        .arg(
            Arg::new("builtin")
                .long("builtin")
                .action(ArgAction::SetTrue)
                .help("Skip nmap delegation and use the built-in probers"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit the report as JSON on stdout"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the JSON report to a file"),
        )
        .arg(
            Arg::new("show-closed")
                .long("show-closed")
                .action(ArgAction::SetTrue)
                .help("Include closed ports in the text output"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let target = matches
        .get_one::<String>("target")
        .cloned()
        .context("target is required")?;
    let spec = matches
        .get_one::<String>("ports")
        .cloned()
        .unwrap_or_else(|| "1-1024".to_string());

    let ports = match parse_ports(&spec) {
        Ok(ports) if !ports.is_empty() => ports,
        Ok(_) => {
            eprintln!("{} port spec \"{}\" selects no ports", "[!]".bright_red(), spec);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("{} {}", "[!]".bright_red(), e);
            process::exit(2);
        }
    };

    let kind = matches
        .get_one::<String>("scan-type")
        .map(|s| ScanKind::parse(s))
        .unwrap_or(ScanKind::Tcp);

    let mut config = ScanConfig::load_default_config()
        .with_ports(ports)
        .with_kind(kind);
    config.target = target;

    if let Some(&timeout_ms) = matches.get_one::<u64>("timeout") {
        config.timeout_ms = timeout_ms;
    }
    if let Some(&concurrency) = matches.get_one::<usize>("concurrency") {
        config.concurrency = concurrency;
    }
    if matches.get_flag("builtin") {
        config.force_builtin = true;
    }

    let engine = ScanEngine::new(config);
    let started = Instant::now();
    let results = engine.scan().await.context("scan failed")?;
    let elapsed = started.elapsed();

    let report = ScanReport::new(
        engine.config().target.clone(),
        engine.config().kind,
        elapsed,
        results,
    );

    if let Some(path) = matches.get_one::<String>("output") {
        report
            .save_json(path)
            .with_context(|| format!("failed to write report to {}", path))?;
        println!("{} report written to {}", "[~]".bright_blue(), path.bright_cyan());
    }

    if matches.get_flag("json") {
        println!("{}", report.to_json()?);
    } else {
        print_text(&report, matches.get_flag("show-closed"));
    }

    Ok(())
}
