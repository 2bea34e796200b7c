use std::process;

use clap::{App, Arg};
use zeroize::Zeroize;

use hkdf_kit::{extract, expand, max_output_length, CounterWidth, HashAlgorithm, HashSpec, DEFAULT_LENGTH};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

struct Config {
    debug: bool,
    hash: HashAlgorithm,
    counter: CounterWidth,
    length: usize,
    salt: Option<Vec<u8>>,
    ikm: Vec<u8>,
    info: Vec<u8>,
    prk_only: bool,
}

fn exit_with(message: &str) -> ! {
    eprintln!("Error: {}. Exiting.", message);
    process::exit(1);
}

fn decode_hex(name: &str, value: &str) -> Vec<u8> {
    match hex::decode(value) {
        Ok(bytes) => bytes,
        Err(e) => exit_with(&format!("--{} is not valid hex ({})", name, e)),
    }
}

fn main() {
    let matches = App::new(PACKAGE_NAME)
        .version(VERSION)
        .about("Derives keys with HKDF (RFC 5869). Inputs and output are hex.")
        .arg(
            Arg::with_name("debug")
                .long("debug")
                .help("Enable debug mode"),
        )
        .arg(
            Arg::with_name("ikm")
                .short("k")
                .long("ikm")
                .value_name("HEX")
                .required(true)
                .takes_value(true)
                .help("Input keying material"),
        )
        .arg(
            Arg::with_name("salt")
                .short("s")
                .long("salt")
                .value_name("HEX")
                .takes_value(true)
                .help("Optional salt. Defaults to HashLen zero bytes"),
        )
        .arg(
            Arg::with_name("info")
                .short("i")
                .long("info")
                .value_name("HEX")
                .takes_value(true)
                .conflicts_with("prk")
                .help("Context and application specific information"),
        )
        .arg(
            Arg::with_name("length")
                .short("l")
                .long("length")
                .value_name("BYTES")
                .takes_value(true)
                .conflicts_with("prk")
                .help("Number of output bytes (default 32)"),
        )
        .arg(
            Arg::with_name("hash")
                .short("H")
                .long("hash")
                .value_name("HASH")
                .possible_values(&["sha1", "sha256", "sha384", "sha512", "sha3-256"])
                .default_value("sha256")
                .help("Hash function for both extract and expand"),
        )
        .arg(
            Arg::with_name("counter")
                .short("c")
                .long("counter")
                .value_name("BITS")
                .possible_values(&["8", "16", "32", "64", "128"])
                .default_value("8")
                .help("Block counter width. 8 bits is RFC 5869"),
        )
        .arg(
            Arg::with_name("prk")
                .long("prk")
                .help("Only run extract and print the pseudorandom key"),
        )
        .get_matches();

    let hash = match matches.value_of("hash").unwrap_or("sha256").parse::<HashAlgorithm>() {
        Ok(hash) => hash,
        Err(e) => exit_with(&e.to_string()),
    };
    let counter = match matches.value_of("counter").unwrap_or("8").parse::<CounterWidth>() {
        Ok(counter) => counter,
        Err(e) => exit_with(&e.to_string()),
    };
    let length = match matches.value_of("length").map(|l| l.parse::<usize>()) {
        Some(Ok(length)) => length,
        Some(Err(_)) => exit_with("--length must be a non-negative integer"),
        None => DEFAULT_LENGTH,
    };

    let mut config = Config {
        debug: matches.is_present("debug"),
        hash,
        counter,
        length,
        salt: matches.value_of("salt").map(|s| decode_hex("salt", s)),
        ikm: decode_hex("ikm", matches.value_of("ikm").unwrap_or("")),
        info: matches.value_of("info").map(|i| decode_hex("info", i)).unwrap_or_default(),
        prk_only: matches.is_present("prk"),
    };

    if config.debug {
        println!("hash: {} (HashLen {})", config.hash, config.hash.digest_size());
        println!("counter: {}", config.counter);
        println!("ikm bytes: {}", config.ikm.len());
        println!("salt bytes: {}", config.salt.as_ref().map_or(0, |s| s.len()));
        println!("info bytes: {}", config.info.len());
        println!("request bytes: {}", config.length);
        println!("max bytes: {}", max_output_length(config.hash.digest_size(), config.counter));
    }

    let prk = extract(config.salt.as_deref(), &config.ikm, &config.hash);
    config.ikm.zeroize();

    if config.prk_only {
        println!("{}", hex::encode(prk.as_bytes()));
        return;
    }

    let mut okm = match expand(prk.as_bytes(), &config.info, config.length, &config.hash, config.counter) {
        Ok(okm) => okm,
        Err(e) => exit_with(&e.to_string()),
    };

    println!("{}", hex::encode(&okm));
    okm.zeroize();
}
