use std::process;
use std::time::Instant;

use clap::ArgEnum;
use env_logger;
use log;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ext_sort_sim::{check, SortingEngineBuilder};

fn main() {
    let arg_parser = build_arg_parser();

    let log_level: LogLevel = arg_parser.value_of_t_or_exit("log_level");
    init_logger(log_level);

    let input_size: usize = arg_parser.value_of_t_or_exit("input_size");
    let memory_size: usize = arg_parser.value_of_t_or_exit("memory_size");
    let seed: Option<u64> = arg_parser
        .is_present("seed")
        .then(|| arg_parser.value_of_t_or_exit("seed"));
    let dump = arg_parser.is_present("dump");

    let mut engine = match SortingEngineBuilder::new().with_memory_size(memory_size).build() {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("sorting engine initialization error: {}", err);
            process::exit(1);
        }
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let input: Vec<i32> = (0..input_size).map(|_| rng.gen_range(0..i32::MAX)).collect();

    engine.read_array(&input);
    if dump {
        print_array(engine.disk());
    }

    let output = engine.sort().to_vec();
    if dump {
        print_array(&output);
    }

    println!(
        "Finished: {} msec (input size: {}, memory size: {})",
        engine.elapsed().unwrap_or_default().as_millis(),
        input_size,
        memory_size
    );

    let started = Instant::now();
    let check_result = check::verify(&input, &output);
    println!("reference sort: {} msec", started.elapsed().as_millis());

    if let Err(err) = &check_result {
        println!("{}", err);
    }
    println!("Validation result >> {}", check_result.is_ok());

    if check_result.is_err() {
        process::exit(1);
    }
}

fn print_array(data: &[i32]) {
    let dump: String = data.iter().map(|value| format!("{:>10}\n", value)).collect();
    println!("{}", dump);
}

#[derive(Copy, Clone, clap::ArgEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn possible_values() -> impl Iterator<Item = clap::PossibleValue<'static>> {
        Self::value_variants().iter().filter_map(|v| v.to_possible_value())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogLevel as clap::ArgEnum>::from_str(s, false)
    }
}

fn build_arg_parser() -> clap::ArgMatches {
    clap::App::new("ext-sort-sim")
        .about("disk-constrained external sort simulator")
        .arg(
            clap::Arg::new("input_size")
                .help("input size, i.e. array size on the simulated disk")
                .required(true)
                .index(1)
                .validator(|v| match v.parse::<usize>() {
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("Input size format incorrect: {}", err)),
                }),
        )
        .arg(
            clap::Arg::new("memory_size")
                .help("memory size in cells, two of them are reserved")
                .required(true)
                .index(2)
                .validator(|v| match v.parse::<usize>() {
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("Memory size format incorrect: {}", err)),
                }),
        )
        .arg(
            clap::Arg::new("seed")
                .short('s')
                .long("seed")
                .help("random generator seed")
                .takes_value(true)
                .validator(|v| match v.parse::<u64>() {
                    Ok(_) => Ok(()),
                    Err(err) => Err(format!("Seed format incorrect: {}", err)),
                }),
        )
        .arg(
            clap::Arg::new("dump")
                .short('d')
                .long("dump")
                .help("print the array before and after sorting"),
        )
        .arg(
            clap::Arg::new("log_level")
                .short('l')
                .long("loglevel")
                .help("logging level")
                .takes_value(true)
                .default_value("info")
                .possible_values(LogLevel::possible_values()),
        )
        .get_matches()
}

fn init_logger(log_level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(match log_level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        })
        .format_timestamp_millis()
        .init();
}
