use neurite_nn::{train_network, Network, NetworkData, TrainConfig, TransferFunction};

fn main() {
    env_logger::init();

    let mut network = Network::new(&[2, 2, 1], 0.15, 0.5, TransferFunction::Sigmoid)
        .expect("valid topology");

    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let target_outputs = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];

    let config = TrainConfig::new(100_000, 0.001);
    let outcome = train_network(&mut network, &inputs, &target_outputs, &config)
        .expect("samples match the topology");

    if outcome.converged {
        println!("Converged after {} epochs (error {:.6}).", outcome.epochs, outcome.final_error);
    } else {
        println!(
            "Did not converge after {} epochs (error {:.6}).",
            outcome.epochs, outcome.final_error
        );
    }

    for input in &inputs {
        network.feed_forward(input).unwrap();
        println!("Input: {:?} -> Output: {:.4}", input, network.results()[0]);
    }

    NetworkData::new(network, inputs, target_outputs)
        .and_then(|data| data.save_file("xor.txt"))
        .expect("save trained network");
    println!("Saved trained network to xor.txt");
}
