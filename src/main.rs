use std::env;
use std::process::ExitCode;

use log::debug;
use thread_count::{spawn_and_count, task_count};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let arg = env::args().nth(1);
    let requested = match task_count(arg.as_deref()) {
        Ok(n) => n,
        Err(e) => {
            eprintln!(
                "invalid task count '{}': {}",
                arg.unwrap_or_default(),
                e
            );
            return ExitCode::from(2);
        }
    };

    debug!("spawning {} tasks", requested.max(0));
    let created = match spawn_and_count(requested).await {
        Ok(v) => v,
        Err(e) => {
            eprintln!("failed to join task: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Created {} threads.", created);

    if created == requested.max(0) as u64 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
