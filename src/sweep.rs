//! Sweep driver: iterate over configuration variants, run the external
//! tools, and accumulate one output row per (variant, metric).

use crate::config::Config;
use crate::error::{Result, SweepError};
use crate::exec::ExternalCommand;
use crate::param::Params;
use crate::report::{parse_report, parse_time, EvalReport};
use std::io::Write;

/// One tab-separated output row: variant parameters, metric name, then the
/// metric's value for every query id in column order.
fn format_row(
    weight: &str,
    rank_source: &str,
    metric: &str,
    report: &EvalReport,
    query_set: &[String],
) -> Result<String> {
    let mut row = format!("{}\t{}\t{}", weight, rank_source, metric);
    for query in query_set {
        row.push('\t');
        row.push_str(report.value(query, metric)?);
    }
    row.push('\n');
    Ok(row)
}

/// Run the full sweep described by `config`.
///
/// The output file is opened once, appended to every iteration, and closed
/// at the end. There is no per-iteration isolation: a missing query or
/// metric in any variant's report aborts the whole run with an error naming
/// the failed lookup. Returns the number of rows written.
pub fn run_sweep(config: &Config) -> Result<usize> {
    let evaluator = ExternalCommand::parse(&config.evaluator.command)?;
    let post = ExternalCommand::parse(&config.evaluator.post_command)?;

    let mut base = Params::read(config.param_file())?;
    log::info!(
        "Read {} base parameters from {}",
        base.len(),
        config.param_file().display()
    );
    for (key, value) in &config.overrides {
        base.set(key, value);
    }

    let mut out = std::fs::File::create(config.output_file())?;
    let mut rows = 0usize;

    for rank_source in &config.sweep.rank_sources {
        for weight in &config.sweep.weights {
            // Each variant gets its own copy of the base parameters, so no
            // key set by one iteration can leak into the next.
            let mut params = base.clone();
            params.set("fbOrigWeight", weight);
            params.set("fbInitialRankingFile", rank_source);
            params.write(config.temp_param_file())?;

            log::info!("Running variant weight={} rankSource={}", weight, rank_source);
            let eval_out = evaluator.run(Some(config.temp_param_file().as_os_str()))?;
            log::debug!("evaluator reported time: {}", parse_time(&eval_out));

            let report_text = post.run(None)?;
            let report =
                parse_report(&report_text, Some(&config.metrics.interest_set)).ok_or_else(
                    || {
                        SweepError::Parse(format!(
                            "no result region in '{}' output (weight={}, rankSource={})",
                            post.program(),
                            weight,
                            rank_source
                        ))
                    },
                )?;

            println!("({}, {})", weight, rank_source);
            if let Some(all) = report.metrics("all") {
                println!("{}", serde_json::to_string_pretty(all)?);
            }

            for metric in &config.metrics.interest_set {
                let row = format_row(
                    weight,
                    rank_source,
                    metric,
                    &report,
                    &config.metrics.query_set,
                )?;
                out.write_all(row.as_bytes())?;
                rows += 1;
            }
        }
    }

    Ok(rows)
}
