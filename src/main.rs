/// Briefing cache TTL; dashboards poll more often than the counts change
#[cfg(feature = "http-transport")]
const REPORT_CACHE_TTL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments first to determine mode
    let args: Vec<String> = std::env::args().collect();
    let port = parse_args(&args);

    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Founder Insights server...");

    run_http_server(port).await?;

    Ok(())
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> u16 {
    let mut port = 3000u16;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(3000);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    port
}

/// Print usage information
fn print_usage() {
    println!("Founder Insights - derived metrics and strategy simulation for the marketplace founder dashboard");
    println!();
    println!("USAGE:");
    println!("    founder-insights [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>       Port to listen on (default: 3000)");
    println!("    --help, -h          Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    DATASTORE_URL           Hosted datastore REST root (required)");
    println!("    DATASTORE_SERVICE_KEY   Service-role key for server-side access (required)");
    println!("    HTTP_HOST               Bind address for config-driven deployments (default: 127.0.0.1)");
    println!("    HTTP_PORT               Port for config-driven deployments (default: 3000)");
    println!("    RUST_LOG                Logging level (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("    # Start the API on the default port (3000)");
    println!("    founder-insights");
    println!();
    println!("    # Start the API on a custom port");
    println!("    founder-insights --port 8080");
}

/// Run the founder dashboard HTTP server
#[cfg(feature = "http-transport")]
async fn run_http_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    use founder_insights::datastore::DatastoreClient;
    use founder_insights::report::ReportGenerator;
    use std::sync::Arc;

    let datastore = match DatastoreClient::from_env() {
        Ok(client) => {
            tracing::info!("Datastore credentials found - RPC access enabled");
            Arc::new(client)
        }
        Err(reason) => {
            tracing::warn!("{}", reason);
            tracing::warn!("Serving degraded responses until the datastore is configured");
            Arc::new(DatastoreClient::new("http://127.0.0.1:54321"))
        }
    };

    let report_generator = Arc::new(ReportGenerator::new(
        datastore.clone(),
        REPORT_CACHE_TTL_SECS,
    ));

    founder_insights::transport::http::start_http_server(port, datastore, report_generator).await
}

#[cfg(not(feature = "http-transport"))]
async fn run_http_server(_port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tracing::error!("HTTP transport not available - compile with the 'http-transport' feature");
    Err("HTTP transport not available".into())
}
