//! Dayview CLI (for testing purposes only)
//! The main interface is through WASM bindings.

fn main() {
    println!("Dayview Calendar Core");
    println!("=====================");
    println!();
    println!("This is a library crate. To use it:");
    println!();
    println!("  1. Build WASM: wasm-pack build --target web");
    println!("  2. Serve the web app and attach the address bar input");
    println!();
    println!("For testing the core library:");
    println!("  cargo test");
}
