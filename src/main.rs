use std::env;

#[tokio::main]
async fn main() {
    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = raw_args
            .get(2)
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        if let Err(e) = proforma::api::run_http_server(port).await {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    // Any other invocation is a one-shot calculation from flags.
    if let Err(failure) = proforma::api::run_cli_report() {
        for error in &failure.errors {
            eprintln!("error: {error}");
        }
        std::process::exit(2);
    }
}
