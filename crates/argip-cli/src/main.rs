#![forbid(unsafe_code)]

//! Thin entrypoint for the `argip` terminal client.

#[tokio::main]
async fn main() {
    let code = argip_cli::run().await;
    std::process::exit(code);
}
