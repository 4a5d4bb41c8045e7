use std::time::Instant;

use parsort::{is_sorted, Args, PrettyDuration};
use rand::Rng;

fn main() {
    env_logger::init();
    let args: Args = argh::from_env();
    let config = args.config();
    parsort::set_default_scheduler(config.scheduler);

    // Generate an array of pseudo-random integers in range [0, max_value]
    let mut rng = rand::rng();
    let input: Vec<i64> = (0..args.len)
        .map(|_| rng.random_range(0..=args.max_value.max(0)))
        .collect();

    let mut total = std::time::Duration::ZERO;
    for run in 0..args.runs.max(1) {
        let start = Instant::now();
        let output = match args.algorithm.sort(input.clone(), &config) {
            Ok(output) => output,
            Err(err) => {
                eprintln!("{} sort failed: {err}", args.algorithm.name());
                std::process::exit(2);
            }
        };
        let elapsed = start.elapsed();
        total += elapsed;
        assert!(is_sorted(&output));
        assert_eq!(output.len(), input.len());
        log::info!("run {run}: {}", PrettyDuration(elapsed));
    }

    println!(
        "{} sort of {} elements on {:?}: {} average",
        args.algorithm.name(),
        args.len,
        config.scheduler,
        PrettyDuration(total / args.runs.max(1) as u32)
    );
}
