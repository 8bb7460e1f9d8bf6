// src/main.rs

use execagent::{cli, logging, run};

#[actix_web::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("execagent error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level, args.log_file.as_deref())?;
    run(args).await
}
