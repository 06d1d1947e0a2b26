//! Loads a network definition (with its training samples) from a data file,
//! trains until it converges, and writes the updated state back.

use neurite_nn::{train_network, NetworkData, TrainConfig};

fn main() {
    env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("usage: retrain <network-data-file>");
        std::process::exit(2);
    });

    let data = match NetworkData::load_file(&path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let (mut network, inputs, target_outputs) = data.into_parts();
    if inputs.is_empty() {
        eprintln!("{} contains no training samples", path);
        std::process::exit(1);
    }

    let config = TrainConfig::new(100_000, 0.001);
    let outcome = train_network(&mut network, &inputs, &target_outputs, &config)
        .expect("samples were validated at parse time");

    if outcome.converged {
        println!("Took {} epochs to converge (error {:.6}).", outcome.epochs, outcome.final_error);
    } else {
        println!(
            "Did not converge after {} epochs (error {:.6}).",
            outcome.epochs, outcome.final_error
        );
    }

    let data = NetworkData::new(network, inputs, target_outputs).expect("shapes unchanged");
    if let Err(e) = data.save_file(&path) {
        eprintln!("failed to save {}: {}", path, e);
        std::process::exit(1);
    }
    println!("Saved updated network to {}", path);
}
