// SPDX-License-Identifier: Apache-2.0

use tickbench::{
    load_model_library, BenchmarkRunner, Config, CounterTop, DsoDevice, ModelSource,
    TickbenchError, SCENARIOS, TOP_N,
};

fn run(args: &[String]) -> Result<(), TickbenchError> {
    let config = Config::from_env();
    let runner = BenchmarkRunner::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match config.model {
        ModelSource::Builtin => {
            log::debug!("builtin model ignores {} argument(s)", args.len());
            runner.run_all(&SCENARIOS, || Ok(CounterTop::new(TOP_N)), &mut out)?;
        }
        ModelSource::SharedLibrary(path) => {
            let lib = load_model_library(&path)?;
            lib.command_args(args)?;
            runner.run_all(&SCENARIOS, || DsoDevice::new(lib), &mut out)?;
        }
    }
    Ok(())
}

fn main() {
    let _ = env_logger::try_init();
    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
