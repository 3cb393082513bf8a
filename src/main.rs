extern crate actix_web;
extern crate chrono;
#[macro_use]
extern crate serde;
extern crate serde_json;

use actix_cors::Cors;
use clap::Parser;
use tracing_batteries::{prelude::*, OpenTelemetry, Sentry, Session};

#[macro_use]
mod macros;

mod api;
mod identity;
mod models;
mod store;
mod telemetry;

use actix_web::{App, HttpServer};
use identity::{Environment, UploadPolicy};
use telemetry::TracingLogger;

/// The content backend for boganto.com, serving posts and uploads with
/// canonical routes and asset paths.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The SQLite database connection string to use.
    ///
    /// For testing purposes, you can use `:memory:` to create an in-memory database. By
    /// default, we will use a file-based database at `boganto.sqldb`, however this can
    /// be overridden by setting the `DATABASE` environment variable or passing the `--database`
    /// argument.
    #[arg(short, long, default_value = "boganto.sqldb", env = "DATABASE")]
    database: String,

    /// The port to listen for incoming requests on.
    #[arg(short, long, default_value_t = 8000, env = "PORT")]
    port: u16,

    /// An explicit base address to use for API calls and assets, regardless of
    /// which host a request arrives on.
    #[arg(long, env = "API_BASE_URL", value_parser = parse_base_url)]
    api_base_url: Option<String>,

    /// The backend address used when serving pages on localhost.
    #[arg(long, env = "LOCAL_URL", default_value = identity::DEFAULT_LOCAL_URL, value_parser = parse_base_url)]
    local_url: String,

    /// The public address of the production site.
    #[arg(long, env = "PRODUCTION_URL", default_value = identity::DEFAULT_PRODUCTION_URL, value_parser = parse_base_url)]
    production_url: String,

    /// The directory which holds the public `uploads/` tree.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    public_dir: std::path::PathBuf,

    /// The largest upload, in bytes, which will be accepted.
    #[arg(long, env = "MAX_UPLOAD_SIZE", default_value_t = identity::DEFAULT_MAX_UPLOAD_SIZE)]
    max_upload_size: usize,

    /// The name of the service which will be reported to OpenTelemetry endpoints.
    #[arg(long, env = "SERVICE_NAME", default_value = "boganto")]
    service_name: String,

    /// The Sentry DSN to use for error reporting.
    #[arg(long, env = "SENTRY_DSN")]
    sentry_dsn: Option<String>,

    /// The environment to report to Sentry.
    #[arg(long, env = "SENTRY_ENVIRONMENT")]
    sentry_environment: Option<String>,
}

fn parse_base_url(value: &str) -> Result<String, String> {
    reqwest::Url::parse(value)
        .map_err(|e| format!("'{value}' is not a valid base address: {e}"))
        .and_then(|url| {
            if url.cannot_be_a_base() {
                Err(format!("'{value}' cannot be used as a base address"))
            } else {
                Ok(value.trim_end_matches('/').to_string())
            }
        })
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let mut session = Session::new(args.service_name, version!("v"));
    if let Some(dsn) = args.sentry_dsn {
        session = session.with_battery(Sentry::new((
            dsn,
            sentry::ClientOptions {
                environment: args.sentry_environment.map(|v| v.into()),
                ..Default::default()
            },
        )));
    }
    let session = session.with_battery(OpenTelemetry::new(""));

    let environment = Environment {
        override_url: args.api_base_url,
        local_url: args.local_url,
        production_url: args.production_url,
    };
    let uploads = UploadPolicy::new(&args.public_dir).with_max_size(args.max_upload_size);

    let state = models::GlobalState::new(args.database)
        .map_err(|e| {
            eprintln!("Failed to initialize database connection: {e}");
            session.record_error(&e);

            std::io::ErrorKind::Other
        })?
        .with_environment(environment)
        .with_uploads(uploads);

    info!("Starting server on :{}", args.port);
    let result = HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(state.clone()))
            .wrap(TracingLogger)
            .wrap(Cors::default().allow_any_origin().send_wildcard())
            .configure(api::configure)
    })
    .bind(format!("0.0.0.0:{}", args.port))?
    .run()
    .await
    .map_err(|err| {
        error!("The server exited unexpectedly: {}", err);
        sentry::capture_event(sentry::protocol::Event {
            message: Some(format!("Server Exited Unexpectedly: {}", err)),
            level: sentry::protocol::Level::Fatal,
            ..Default::default()
        });

        err
    });

    session.shutdown();
    result
}
