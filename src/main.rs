use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use log::{info, warn};

use zns_cache_sim::config::SimConfig;
use zns_cache_sim::engine::Engine;
use zns_cache_sim::error::EngineWarning;
use zns_cache_sim::iolog::{IoKind, IoLogWriter};
use zns_cache_sim::policy::Policy;
use zns_cache_sim::summary::RunSummary;
use zns_cache_sim::workload::{Record, WorkloadReader};
use zns_cache_sim::zns::{ZnsOutcome, ZoneTable};

const SECTORS_PER_PAGE: u64 = zns_cache_sim::iolog::SECTORS_PER_PAGE;
const MAX_ZONES: u64 = 65536;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match SimConfig::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "starting simulation: policy={} buffer_size={} trace={} zone_size_pages={}",
        config.initial_policy.name(),
        config.buffer_size,
        config.trace_path,
        config.zone_size_pages
    );

    let trace_file = File::open(&config.trace_path)?;
    let reader = WorkloadReader::new(BufReader::new(trace_file));

    let log_path = config.log_file_name();
    let mut io_log = IoLogWriter::create(&log_path)?;

    let mut engine = Engine::new(config.buffer_size, config.initial_policy);
    let mut zones = ZoneTable::new(config.zone_size_pages, MAX_ZONES);

    for (line_no, raw, record) in reader {
        match record {
            None => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    warn!("{}", EngineWarning::MalformedRecord { line: line_no, text: raw });
                }
            }
            Some(Record::PolicySwitch(code)) => match Policy::from_code(code) {
                Some(p) => engine.switch_policy(p),
                None => warn!("{}", EngineWarning::UnknownPolicyCode { line: line_no, code }),
            },
            Some(Record::Access { lba, op }) => {
                let page_id = zns_cache_sim::engine::lba_to_page_id(lba, SECTORS_PER_PAGE);
                let outcome = engine.access(page_id, op);
                emit_io(&mut io_log, &mut zones, &outcome.io)?;
            }
        }

        if line_no % 1_000_000 == 0 {
            info!("processed {} LBA requests", line_no);
        }
    }

    let flushed = engine.flush_all();
    emit_io(&mut io_log, &mut zones, &flushed)?;
    io_log.close()?;

    let summary = RunSummary::from_config(config, engine.hits(), engine.misses());
    print!("{summary}");

    Ok(())
}

fn emit_io(
    io_log: &mut IoLogWriter,
    zones: &mut ZoneTable,
    events: &[zns_cache_sim::engine::DeviceIo],
) -> std::io::Result<()> {
    for event in events {
        if event.kind == IoKind::Write {
            match zones.check_write(event.page_id, 1) {
                ZnsOutcome::OutOfRange => continue,
                ZnsOutcome::Sequential
                | ZnsOutcome::NonSequential { .. }
                | ZnsOutcome::BoundaryClamped => {}
            }
        }
        io_log.write_io(event.kind, event.page_id, 1)?;
    }
    Ok(())
}
