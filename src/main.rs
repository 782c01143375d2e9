//! Wordlist Merge - multi-threaded wordlist merging for penetration testing
//!
//! Main entry point for the command-line application.

use std::process;
use std::time::Instant;

use wordlist_merge::cli::{usage, Args};
use wordlist_merge::error::MergeError;
use wordlist_merge::merger::{MergeConfig, MergeReport, Merger};
use wordlist_merge::progress::{print_error, print_header, print_info, print_success, print_warning};

fn main() {
    let started = Instant::now();

    // Parse command-line arguments; help and version exit 0, usage errors exit 1
    let args = match Args::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            e.print().ok();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Set up logging
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(report) => {
            print_success(&format!(
                "Wordlists merged successfully into {}",
                report.output.display()
            ));
            println!("Time measured: {:.3} seconds.", started.elapsed().as_secs_f64());
            println!("{} threads used.", report.threads);

            if args.stats && !args.quiet {
                report.stats.print_summary(report.unique_words, report.elapsed);
            }
        }
        Err(e) => {
            print_error(&format!("{}", e));

            // Print chain of errors
            let mut source = e.source();
            while let Some(err) = source {
                print_error(&format!("  Caused by: {}", err));
                source = err.source();
            }

            let code = match e.downcast_ref::<MergeError>() {
                Some(merge_error) => {
                    if matches!(merge_error, MergeError::InvalidArgument(_)) {
                        eprintln!("{}", usage());
                    }
                    merge_error.exit_code()
                }
                None => 1,
            };
            process::exit(code);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<MergeReport> {
    // Validate arguments
    args.validate()?;

    // Create merger configuration
    let config = MergeConfig::from_args(args)?;

    if !args.quiet {
        let cpus = num_cpus::get();
        if config.threads.get() > cpus {
            print_warning(&format!(
                "{} threads requested but only {} CPUs available",
                config.threads, cpus
            ));
        }
        if args.verbose {
            print_config(args, &config);
        }
    }

    let report = Merger::new(config).run(&args.files)?;
    log::info!(
        "{} unique words from {} files in {:?}",
        report.unique_words,
        report.stats.files,
        report.elapsed
    );

    Ok(report)
}

/// Print configuration summary
fn print_config(args: &Args, config: &MergeConfig) {
    print_header("Configuration");

    print_info(&format!("Inputs:       {} files", args.files.len()));
    print_info(&format!("Output:       {}", config.output.display()));
    print_info(&format!("Threads:      {}", config.threads));
    print_info(&format!("Order:        {:?}", config.order));
    print_info(&format!("Buffer size:  {}", bytesize::ByteSize(config.buffer_size as u64)));
    print_info(&format!("CPUs:         {}", num_cpus::get()));
}
