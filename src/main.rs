// This binary crate is intentionally minimal.
// All neural network logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example xor
fn main() {
    println!("neurite-nn: a from-scratch back-propagation network in Rust.");
    println!("Run `cargo run --example xor` to see the XOR demo,");
    println!("or `cargo run --example retrain -- <file>` to train a saved network.");
}
