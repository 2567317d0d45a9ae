use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::{App, Arg, ArgMatches};

use fractal_streamer::core::fractals::mandelbrot::equation::DEFAULT_COLUMN_LATENCY;
use fractal_streamer::{
    AsyncConfig, AsyncService, Canvas, DefaultProviders, ProviderRegistry, Router, Status,
};

const PATH: &str = "path";
const NO_LATENCY: &str = "no-latency";
const NO_NOISE: &str = "no-noise";
const THREADS: &str = "threads";

const DEFAULT_PATH: &str = "/rest/config";

fn validate_threads(s: String) -> Result<(), String> {
    match s.parse::<usize>() {
        Ok(threads) if threads >= 1 => Ok(()),
        Ok(_) => Err("Thread count must be at least 1".to_string()),
        Err(_) => Err("Could not parse thread count".to_string()),
    }
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("fractal_streamer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serves one fractal request: headers to stderr, body to stdout")
        .arg(
            Arg::with_name(PATH)
                .required(false)
                .index(1)
                .default_value(DEFAULT_PATH)
                .help("Request path, e.g. /rest/render/sync/-2/1/-1.3/1.3/100/mandelbrot/fire"),
        )
        .arg(
            Arg::with_name(NO_LATENCY)
                .long(NO_LATENCY)
                .help("Drop the simulated per-column latency of the Mandelbrot equation"),
        )
        .arg(
            Arg::with_name(NO_NOISE)
                .long(NO_NOISE)
                .help("Drop the dithering noise of the Mandelbrot equation"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(validate_threads)
                .help("Worker threads for async renders"),
        )
        .get_matches()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    let canvas = Canvas::default();

    let providers = DefaultProviders {
        noise: !matches.is_present(NO_NOISE),
        column_latency: if matches.is_present(NO_LATENCY) {
            Duration::ZERO
        } else {
            DEFAULT_COLUMN_LATENCY
        },
        ..DefaultProviders::default()
    };

    let registry = Arc::new(ProviderRegistry::new());
    providers.install(&registry)?;

    let async_config = match matches.value_of(THREADS) {
        Some(threads) => AsyncConfig {
            worker_threads: threads.parse()?,
        },
        None => AsyncConfig::for_tile_factor(canvas.tile_factor()),
    };
    let router = Router::new(registry, AsyncService::new(async_config)?, canvas);

    let response = router.route(matches.value_of(PATH).unwrap_or(DEFAULT_PATH));
    let status = response.status;
    eprintln!("{}", response.head());

    // Render failures are logged by the renderer.
    let outcome = response.write_body(Box::new(io::stdout()));

    if status != Status::Ok || outcome.is_err() {
        std::process::exit(1);
    }

    Ok(())
}
